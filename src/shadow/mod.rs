//! Shadow casting over a height field.
//!
//! Algorithms implement the `ShadowAlgorithm` trait and write their result
//! into the shadow field of a [`ShadowGrid`].

pub mod boundary;
pub mod sweep;

pub use boundary::CrestBoundary;
pub use sweep::{LIGHT_EPSILON, ScanAxis, SweepParams};

use glam::Vec3;
use log::{debug, trace};

use crate::grid::ShadowGrid;
use sweep::{ScanLayout, run_sweep};

/// Trait for height-field shadow algorithms.
pub trait ShadowAlgorithm {
    /// Recompute the shadow field of `grid` for a sun in direction `light_dir`.
    ///
    /// # Arguments
    /// * `grid` - height field to read and shadow field to overwrite
    /// * `light_dir` - direction towards the sun, any positive length, Z up
    fn compute_shadows(&self, grid: &mut ShadowGrid, light_dir: Vec3);
}

/// Incremental horizon sweep.
///
/// Runs in O(width * height) with one scratch line of crest heights.
#[derive(Debug, Clone, Copy, Default)]
pub struct HorizonSweep {
    /// How the crest is filled past the grid edge
    pub boundary: CrestBoundary,
}

impl HorizonSweep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_boundary(boundary: CrestBoundary) -> Self {
        HorizonSweep { boundary }
    }

    /// Like [`ShadowAlgorithm::compute_shadows`], reusing `crest` as scratch
    /// so repeated sweeps do not reallocate.
    pub fn compute_shadows_with(&self, grid: &mut ShadowGrid, light_dir: Vec3, crest: &mut Vec<f32>) {
        let Some(params) = SweepParams::resolve(light_dir, grid.cell_width()) else {
            debug!("Light {:?} casts no shadow, clearing", light_dir);
            grid.finish_clear();
            return;
        };

        debug!(
            "Sweeping {:?} (reverse: {}), offset {:.4}, descent {:.4}",
            params.axis, params.reverse, params.crest_offset, params.crest_descent
        );

        let layout = ScanLayout::new(params.axis, grid.width(), grid.height());
        let max_depth = grid.max_depth();
        let (heights, shadows) = grid.sweep_fields();
        let dirty = run_sweep(heights, shadows, crest, layout, &params, self.boundary, max_depth);

        trace!("Shadow update rect: {:?}", dirty);
        grid.finish_sweep(dirty);
    }
}

impl ShadowAlgorithm for HorizonSweep {
    fn compute_shadows(&self, grid: &mut ShadowGrid, light_dir: Vec3) {
        let mut crest = Vec::with_capacity(grid.width().max(grid.height()));
        self.compute_shadows_with(grid, light_dir, &mut crest);
    }
}

impl ShadowGrid {
    /// Recompute shadows with the default [`HorizonSweep`].
    pub fn compute_shadows(&mut self, light_dir: Vec3) {
        HorizonSweep::default().compute_shadows(self, light_dir);
    }
}
