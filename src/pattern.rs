//! Synthetic fields for eyeballing shadow output.

use std::f32::consts::PI;

use crate::grid::ShadowGrid;

impl ShadowGrid {
    /// Fill the height field with a grid of rounded hills,
    /// `sin²(s·x)·sin²(s·y)·peak` with `s = cell_width·π/32`.
    ///
    /// `peak` defaults to four cell widths.
    pub fn make_height_test_pattern(&mut self, peak: Option<f32>) {
        let w = self.width();
        let peak = peak.unwrap_or(self.cell_width() * 4.0);
        let s = self.cell_width() * PI / 32.0;

        for (i, h) in self.heights_mut().iter_mut().enumerate() {
            let (x, y) = ((i % w) as f32, (i / w) as f32);
            *h = (s * x).sin().powi(2) * (s * y).sin().powi(2) * peak;
        }
    }

    /// Fill the shadow field with the gradient `(x / width) * (y / height)`.
    pub fn make_shadow_test_pattern(&mut self) {
        let (w, h) = (self.width(), self.height());
        for y in 0..h {
            for x in 0..w {
                self.set_shadow(x, y, x as f32 / w as f32 * y as f32 / h as f32);
            }
        }
    }
}
