//! Horizon sweep: scan-line shadow casting over a height field.
//!
//! The grid is walked one scan line at a time, marching away from the sun.
//! A "crest" holds, for every position on the current line, the height a
//! sample must exceed to see the sun. Each line:
//! - terrain above the crest becomes the new crest (it is lit),
//! - the crest is written to the shadow field,
//! - the crest drops by `crest_descent` for the next line,
//! - the crest is sheared by `crest_offset` cells along the line to follow
//!   the sun's sideways slope.
//!
//! Rows and columns are handled by one procedure over a [`ScanLayout`].

use glam::Vec3;

use super::boundary::{CrestBoundary, shift_crest};
use crate::grid::DirtyRect;

/// Horizontal light components below this are treated as "sun overhead".
pub const LIGHT_EPSILON: f32 = 1e-3;

/// Which lines the sweep walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanAxis {
    /// One line per row, advancing in Y
    Rows,
    /// One line per column, advancing in X
    Columns,
}

/// Maps (line, position-on-line) to a row-major cell index.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ScanLayout {
    axis: ScanAxis,
    lines: usize,
    line_len: usize,
    line_stride: usize,
    pos_stride: usize,
}

impl ScanLayout {
    pub(crate) fn new(axis: ScanAxis, width: usize, height: usize) -> Self {
        match axis {
            ScanAxis::Rows => ScanLayout {
                axis,
                lines: height,
                line_len: width,
                line_stride: width,
                pos_stride: 1,
            },
            ScanAxis::Columns => ScanLayout {
                axis,
                lines: width,
                line_len: height,
                line_stride: 1,
                pos_stride: width,
            },
        }
    }

    #[inline]
    fn index(&self, line: usize, pos: usize) -> usize {
        line * self.line_stride + pos * self.pos_stride
    }

    /// Grid (x, y) of a line position.
    #[inline]
    fn cell(&self, line: usize, pos: usize) -> (i32, i32) {
        match self.axis {
            ScanAxis::Rows => (pos as i32, line as i32),
            ScanAxis::Columns => (line as i32, pos as i32),
        }
    }
}

/// Per-line crest motion for one light direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepParams {
    pub axis: ScanAxis,
    /// Sideways crest shift per line, in cells. Always in `[-1, 1]`.
    pub crest_offset: f32,
    /// Crest height change per line. Always `<= 0`.
    pub crest_descent: f32,
    /// Walk lines from the last one down to the first.
    pub reverse: bool,
}

impl SweepParams {
    /// Resolve the sweep for `light_dir` (pointing at the sun).
    ///
    /// Returns `None` when the light cannot cast shadows: sun at or below the
    /// horizon, or straight overhead.
    pub fn resolve(light_dir: Vec3, cell_width: f32) -> Option<SweepParams> {
        let abs_x = light_dir.x.abs();
        let abs_y = light_dir.y.abs();

        if !(light_dir.z > 0.0) || (abs_x < LIGHT_EPSILON && abs_y < LIGHT_EPSILON) {
            return None;
        }

        // Advance along the dominant horizontal axis so the shift stays within a cell.
        let (axis, along, across) = if abs_x < abs_y {
            (ScanAxis::Rows, light_dir.y, light_dir.x)
        } else {
            (ScanAxis::Columns, light_dir.x, light_dir.y)
        };

        let mut crest_offset = -across / along;
        let mut crest_descent = cell_width * light_dir.z / along;

        // March away from the sun so the crest only ever falls.
        let reverse = crest_descent >= 0.0;
        if reverse {
            crest_offset = -crest_offset;
            crest_descent = -crest_descent;
        }

        debug_assert!(crest_descent <= 0.0);
        debug_assert!((-1.0..=1.0).contains(&crest_offset));

        Some(SweepParams {
            axis,
            crest_offset,
            crest_descent,
            reverse,
        })
    }
}

/// Sweep `heights` into `shadows`, returning the changed cells.
///
/// `crest` is scratch space; its contents on entry are ignored.
pub(crate) fn run_sweep(
    heights: &[f32],
    shadows: &mut [f32],
    crest: &mut Vec<f32>,
    layout: ScanLayout,
    params: &SweepParams,
    boundary: CrestBoundary,
    max_depth: f32,
) -> DirtyRect {
    crest.clear();
    crest.resize(layout.line_len, max_depth);

    let mut dirty = DirtyRect::NONE;

    for step in 0..layout.lines {
        let line = if params.reverse { layout.lines - 1 - step } else { step };

        let mut first_update: Option<usize> = None;
        let mut last_update = 0;

        for (pos, c) in crest.iter_mut().enumerate() {
            let idx = layout.index(line, pos);

            // Lit samples become the new horizon.
            if *c < heights[idx] {
                *c = heights[idx];
            }

            if shadows[idx] != *c {
                shadows[idx] = *c;
                first_update.get_or_insert(pos);
                last_update = pos;
            }

            *c += params.crest_descent;
        }

        if let Some(first) = first_update {
            let (x0, y0) = layout.cell(line, first);
            let (x1, y1) = layout.cell(line, last_update);
            dirty.include(x0, y0);
            dirty.include(x1, y1);
        }

        shift_crest(crest, params.crest_offset, boundary);
    }

    dirty
}
