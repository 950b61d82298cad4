//! Interactive shadow viewer - the mouse steers the sun in real time

use glam::Vec3;
use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};

use crate::grid::ShadowGrid;
use crate::normal::create_normal_map;
use crate::render::{shade_shadows, to_byte};
use crate::shading::ShadowShading;
use crate::shadow::{CrestBoundary, HorizonSweep};

/// Configuration for the interactive viewer
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Grid size (width x height in samples)
    pub grid_size: (usize, usize),
    /// Pixel scale factor (each sample = scale x scale pixels)
    pub scale: usize,
    /// World units per cell
    pub cell_width: f32,
    /// Height of the test-pattern hills
    pub peak_height: f32,
    /// Initial shadow strength
    pub shadow_strength: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            grid_size: (128, 128),
            scale: 5,
            cell_width: 1.0,
            peak_height: 64.0,
            shadow_strength: 0.25,
        }
    }
}

/// Interactive viewer for watching shadows move with the sun
pub struct InteractiveViewer {
    config: ViewerConfig,
    grid: ShadowGrid,
    normals: Vec<Vec3>,
    crest: Vec<f32>,
    window: Window,
    buffer: Vec<u32>,
}

impl InteractiveViewer {
    /// Create a new interactive viewer with the given configuration
    pub fn new(config: ViewerConfig) -> Result<Self, String> {
        let (grid_w, grid_h) = config.grid_size;
        let window_w = grid_w * config.scale;
        let window_h = grid_h * config.scale;

        let mut grid = ShadowGrid::with_dimensions(grid_w, grid_h, config.cell_width).map_err(|e| e.to_string())?;
        grid.make_height_test_pattern(Some(config.peak_height));
        let normals = create_normal_map(grid.heights(), grid_w, grid_h, config.peak_height / grid_w as f32);

        let window = Window::new(
            "Horizon Shadow - Interactive Viewer (ESC to exit)",
            window_w,
            window_h,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| e.to_string())?;

        Ok(Self {
            config,
            grid,
            normals,
            crest: Vec::with_capacity(grid_w.max(grid_h)),
            window,
            buffer: vec![0u32; window_w * window_h],
        })
    }

    /// Run the interactive viewer loop
    pub fn run(&mut self) -> Result<(), String> {
        let (grid_w, grid_h) = self.config.grid_size;
        let scale = self.config.scale;

        self.window.set_target_fps(60);

        let mut shading = ShadowShading::new(self.config.shadow_strength);
        let mut sweep = HorizonSweep::new();

        println!("=== Interactive Shadow Viewer ===");
        println!("Controls:");
        println!("  Mouse X    - Sun azimuth");
        println!("  Mouse Y    - Sun elevation (top = high)");
        println!("  +/-        - Adjust shadow strength");
        println!("  B          - Toggle crest boundary policy");
        println!("  ESC        - Exit");
        println!();

        while self.window.is_open() && !self.window.is_key_down(Key::Escape) {
            if self.window.is_key_pressed(Key::Equal, KeyRepeat::Yes)
                || self.window.is_key_pressed(Key::NumPadPlus, KeyRepeat::Yes)
            {
                shading.strength = (shading.strength * 1.25).min(16.0);
                println!("Shadow strength: {:.3}", shading.strength);
            }
            if self.window.is_key_pressed(Key::Minus, KeyRepeat::Yes)
                || self.window.is_key_pressed(Key::NumPadMinus, KeyRepeat::Yes)
            {
                shading.strength = (shading.strength / 1.25).max(0.01);
                println!("Shadow strength: {:.3}", shading.strength);
            }
            if self.window.is_key_pressed(Key::B, KeyRepeat::No) {
                sweep.boundary = match sweep.boundary {
                    CrestBoundary::LinearExtrapolation => CrestBoundary::ZeroExterior,
                    CrestBoundary::ZeroExterior => CrestBoundary::LinearExtrapolation,
                };
                println!("Crest boundary: {:?}", sweep.boundary);
            }

            if let Some((mx, my)) = self.window.get_mouse_pos(MouseMode::Clamp) {
                let u = mx / (grid_w * scale) as f32;
                let v = my / (grid_h * scale) as f32;
                let sun = sun_direction(u, v);

                sweep.compute_shadows_with(&mut self.grid, sun, &mut self.crest);
                let luminance = shade_shadows(&self.grid, &shading, sun, &self.normals);
                self.render_to_buffer(&luminance);
            }

            self.window
                .update_with_buffer(&self.buffer, grid_w * scale, grid_h * scale)
                .map_err(|e| e.to_string())?;
        }

        Ok(())
    }

    /// Render a row-major luminance grid to the pixel buffer
    fn render_to_buffer(&mut self, luminance: &[f32]) {
        let (grid_w, grid_h) = self.config.grid_size;
        let scale = self.config.scale;

        for gy in 0..grid_h {
            for gx in 0..grid_w {
                let l = to_byte(luminance[gx + gy * grid_w]) as u32;
                let color_u32 = (l << 16) | (l << 8) | l;

                for sy in 0..scale {
                    let row = (gy * scale + sy) * grid_w * scale;
                    let start = row + gx * scale;
                    self.buffer[start..start + scale].fill(color_u32);
                }
            }
        }
    }
}

/// Sun direction from normalized window coordinates.
///
/// `u` spans a full turn of azimuth; `v` runs from 80° elevation at the top
/// of the window down to the horizon at the bottom.
pub fn sun_direction(u: f32, v: f32) -> Vec3 {
    let azimuth = u.clamp(0.0, 1.0) * std::f32::consts::TAU;
    let elevation = (1.0 - v.clamp(0.0, 1.0)) * 80f32.to_radians();
    Vec3::new(
        azimuth.sin() * elevation.cos(),
        azimuth.cos() * elevation.cos(),
        elevation.sin(),
    )
}
