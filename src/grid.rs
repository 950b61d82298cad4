//! Grid store: the height field, the derived shadow field and their dimensions.
//!
//! Both fields are flat row-major `Vec<f32>` buffers (`index = x + y * width`),
//! sized together by [`ShadowGrid::configure`]. The height field is written by
//! the caller; the shadow field is written by a [`crate::ShadowAlgorithm`] or
//! reset with [`ShadowGrid::clear_shadow`].

use glam::{Vec2, Vec3};

use crate::error::{Result, ShadowError};

/// Default shadow-field floor: below this height nothing is ever shadowed.
pub const DEFAULT_MAX_UNSHADOWED_DEPTH: f32 = -1000.0;

/// Inclusive cell rectangle of shadow samples changed by the last sweep.
///
/// `DirtyRect::NONE` (`-1, -1, 0, 0`) means nothing changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl DirtyRect {
    pub const NONE: DirtyRect = DirtyRect { left: -1, top: -1, right: 0, bottom: 0 };

    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        DirtyRect { left, top, right, bottom }
    }

    /// Rectangle covering every cell of a `width x height` grid.
    pub fn full(width: usize, height: usize) -> Self {
        if width == 0 || height == 0 {
            return DirtyRect::NONE;
        }
        DirtyRect::new(0, 0, width as i32 - 1, height as i32 - 1)
    }

    pub fn is_empty(&self) -> bool {
        self.left < 0 || self.top < 0 || self.left > self.right || self.top > self.bottom
    }

    /// Grow to include the cell `(x, y)`.
    pub fn include(&mut self, x: i32, y: i32) {
        if self.is_empty() {
            *self = DirtyRect::new(x, y, x, y);
            return;
        }
        self.left = self.left.min(x);
        self.right = self.right.max(x);
        self.top = self.top.min(y);
        self.bottom = self.bottom.max(y);
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        !self.is_empty() && x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

impl Default for DirtyRect {
    fn default() -> Self {
        DirtyRect::NONE
    }
}

/// Dimensions and floor for a [`ShadowGrid`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    /// Samples along X
    pub width: usize,
    /// Samples along Y
    pub height: usize,
    /// World units per cell (must be positive)
    pub cell_width: f32,
    /// Initial and cleared value of both fields
    pub max_depth: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            cell_width: 1.0,
            max_depth: DEFAULT_MAX_UNSHADOWED_DEPTH,
        }
    }
}

/// Height field plus the shadow heights derived from it.
#[derive(Debug, Clone)]
pub struct ShadowGrid {
    width: usize,
    height: usize,
    cell_width: f32,
    inv_cell_width: f32,
    max_depth: f32,
    heights: Vec<f32>,
    shadows: Vec<f32>,
    /// Shadow field holds only `max_depth`
    empty_shadow: bool,
    dirty: DirtyRect,
}

impl Default for ShadowGrid {
    fn default() -> Self {
        let config = GridConfig::default();
        ShadowGrid {
            width: 0,
            height: 0,
            cell_width: config.cell_width,
            inv_cell_width: 1.0 / config.cell_width,
            max_depth: config.max_depth,
            heights: Vec::new(),
            shadows: Vec::new(),
            empty_shadow: true,
            dirty: DirtyRect::NONE,
        }
    }
}

impl ShadowGrid {
    /// Create a grid sized by `config`.
    pub fn new(config: GridConfig) -> Result<Self> {
        let mut grid = ShadowGrid::default();
        grid.configure(config.width, config.height, config.cell_width, config.max_depth)?;
        Ok(grid)
    }

    /// Create a grid with the default unshadowed floor.
    pub fn with_dimensions(width: usize, height: usize, cell_width: f32) -> Result<Self> {
        Self::new(GridConfig {
            width,
            height,
            cell_width,
            ..GridConfig::default()
        })
    }

    /// Resize both fields to `width * height` samples, all set to `max_depth`.
    ///
    /// Invalidates the dirty rectangle. On error the grid is left untouched.
    pub fn configure(&mut self, width: usize, height: usize, cell_width: f32, max_depth: f32) -> Result<()> {
        if !(cell_width > 0.0) || !cell_width.is_finite() {
            return Err(ShadowError::InvalidDimension(format!(
                "cell width must be positive and finite, got {}",
                cell_width
            )));
        }
        let len = width.checked_mul(height).ok_or_else(|| {
            ShadowError::InvalidDimension(format!("{}x{} samples overflow", width, height))
        })?;

        self.width = width;
        self.height = height;
        self.cell_width = cell_width;
        self.inv_cell_width = 1.0 / cell_width;
        self.max_depth = max_depth;

        self.heights.clear();
        self.shadows.clear();
        self.heights.resize(len, max_depth);
        self.shadows.resize(len, max_depth);

        self.empty_shadow = true;
        self.dirty = DirtyRect::NONE;
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_width(&self) -> f32 {
        self.cell_width
    }

    pub fn inv_cell_width(&self) -> f32 {
        self.inv_cell_width
    }

    pub fn max_depth(&self) -> f32 {
        self.max_depth
    }

    /// Cells changed by the most recent shadow computation.
    pub fn dirty_rect(&self) -> DirtyRect {
        self.dirty
    }

    /// True while the shadow field holds only the unshadowed floor.
    pub fn is_shadow_empty(&self) -> bool {
        self.empty_shadow
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height, "cell ({}, {}) out of bounds", x, y);
        x + y * self.width
    }

    #[inline]
    pub fn height_at(&self, x: usize, y: usize) -> f32 {
        self.heights[self.index(x, y)]
    }

    #[inline]
    pub fn set_height(&mut self, x: usize, y: usize, value: f32) {
        let idx = self.index(x, y);
        self.heights[idx] = value;
    }

    #[inline]
    pub fn shadow_at(&self, x: usize, y: usize) -> f32 {
        self.shadows[self.index(x, y)]
    }

    /// Overwrite one shadow sample. The field no longer counts as empty.
    #[inline]
    pub fn set_shadow(&mut self, x: usize, y: usize, value: f32) {
        let idx = self.index(x, y);
        self.shadows[idx] = value;
        self.empty_shadow = false;
    }

    /// Row-major height samples
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Row-major height samples, for bulk loading terrain
    pub fn heights_mut(&mut self) -> &mut [f32] {
        &mut self.heights
    }

    /// Row-major shadow heights
    pub fn shadows(&self) -> &[f32] {
        &self.shadows
    }

    /// Whether a world-space ground point lies on the grid (edges inclusive).
    pub fn is_in_bounds(&self, x: f32, y: f32) -> bool {
        let cx = x * self.inv_cell_width;
        let cy = y * self.inv_cell_width;
        cx >= 0.0 && cy >= 0.0 && cx <= self.width as f32 - 1.0 && cy <= self.height as f32 - 1.0
    }

    /// Reset the shadow field to `max_depth`.
    pub fn clear_shadow(&mut self) {
        self.shadows.fill(self.max_depth);
        self.empty_shadow = true;
    }

    /// World point to containing cell, truncating.
    #[inline]
    fn world_to_cell(&self, x: f32, y: f32) -> usize {
        let vx = (x * self.inv_cell_width) as usize;
        let vy = (y * self.inv_cell_width) as usize;
        self.index(vx, vy)
    }

    /// Shadow depth at a cell. Positive means in shadow.
    #[inline]
    pub fn shadow_depth(&self, x: usize, y: usize) -> f32 {
        let idx = self.index(x, y);
        self.shadows[idx] - self.heights[idx]
    }

    /// Shadow depth at a world-space ground point. The point must be in bounds.
    #[inline]
    pub fn shadow_depth_at(&self, p: Vec2) -> f32 {
        let idx = self.world_to_cell(p.x, p.y);
        self.shadows[idx] - self.heights[idx]
    }

    /// Shadow depth of an arbitrary point above (or below) the terrain, e.g. an object.
    #[inline]
    pub fn object_shadow_depth(&self, p: Vec3) -> f32 {
        self.shadows[self.world_to_cell(p.x, p.y)] - p.z
    }

    /// Split borrow for the sweep: heights read-only, shadows writable.
    pub(crate) fn sweep_fields(&mut self) -> (&[f32], &mut [f32]) {
        (&self.heights, &mut self.shadows)
    }

    /// Record the outcome of a completed sweep.
    pub(crate) fn finish_sweep(&mut self, dirty: DirtyRect) {
        self.dirty = dirty;
        self.empty_shadow = false;
    }

    /// Record a clear triggered by a light that casts no shadow.
    pub(crate) fn finish_clear(&mut self) {
        if self.empty_shadow {
            self.dirty = DirtyRect::NONE;
        } else {
            self.clear_shadow();
            self.dirty = DirtyRect::full(self.width, self.height);
        }
    }
}
