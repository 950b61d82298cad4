//! Terrain self-shadowing from a directional light.
//!
//! A [`ShadowGrid`] holds a height field and a derived shadow field: for each
//! sample, the height at which it crosses from shadow into sunlight. The
//! shadow field is built by a [`HorizonSweep`] and queried per cell, per
//! ground point, or per object point, then turned into lighting terms with
//! [`ShadowShading`].

pub mod error;
pub mod grid;
pub mod harness;
pub mod interactive;
pub mod normal;
mod pattern;
pub mod render;
pub mod shading;
pub mod shadow;

#[cfg(test)]
mod tests;

// Re-export public API
pub use error::{Result, ShadowError};
pub use grid::{DEFAULT_MAX_UNSHADOWED_DEPTH, DirtyRect, GridConfig, ShadowGrid};
pub use harness::{DumpConfig, dump_shadow_series, orbit_direction, run_benchmark};
pub use interactive::{InteractiveViewer, ViewerConfig};
pub use normal::create_normal_map;
pub use render::{normalize_values, save_pgm, save_ppm_normals, shade_shadows};
pub use shading::{DEFAULT_SHADOW_STRENGTH, ShadowShading};
pub use shadow::{CrestBoundary, HorizonSweep, ScanAxis, ShadowAlgorithm, SweepParams};
