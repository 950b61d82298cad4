//! Turning shadow depths into lighting terms.
//!
//! Shadow depth is `shadow height - surface height`; positive values are in
//! shadow. These helpers only read a depth, so they work for terrain cells
//! and for objects tested with [`crate::ShadowGrid::object_shadow_depth`].

use glam::Vec3;

/// Default strength modifier for hill shadows.
pub const DEFAULT_SHADOW_STRENGTH: f32 = 1.0;

/// Shadow strength applied when shading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowShading {
    /// How quickly attenuation saturates with depth (positive)
    pub strength: f32,
}

impl Default for ShadowShading {
    fn default() -> Self {
        Self {
            strength: DEFAULT_SHADOW_STRENGTH,
        }
    }
}

impl ShadowShading {
    pub fn new(strength: f32) -> Self {
        ShadowShading { strength }
    }

    /// Light scale in `(0, 1]` for a shadow depth; `1` when lit.
    #[inline]
    pub fn shadow_scale(&self, depth: f32) -> f32 {
        1.0 / (1.0 + depth.max(0.0) * self.strength)
    }

    /// Bend `normal` towards the main skylight direction by `depth`, to fake
    /// the sky-only lighting a shadowed point receives.
    ///
    /// A bent normal that cancels out to zero is returned unnormalized.
    #[inline]
    pub fn bend_shadowed_normal(&self, normal: Vec3, skylight_dir: Vec3, depth: f32) -> Vec3 {
        let bent = normal + skylight_dir * (depth * self.strength);
        let len_sq = bent.length_squared();
        if len_sq > 0.0 { bent / len_sq.sqrt() } else { bent }
    }
}
