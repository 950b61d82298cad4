//! Rendering functions for turning height and shadow fields into viewable images

use glam::Vec3;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::grid::ShadowGrid;
use crate::shading::ShadowShading;

/// Ambient floor of the preview lighting
const AMBIENT: f32 = 0.2;

/// Convert a float value (0.0-1.0) to a byte (0-255)
#[inline]
pub fn to_byte(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0) as u8
}

/// Scale values into 0-1 by the global min and max
pub fn normalize_values(values: &[f32]) -> Vec<f32> {
    let (min, max) = values
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    let range = max - min;
    if !(range > 0.0) {
        return vec![0.0; values.len()];
    }
    values.iter().map(|&v| (v - min) / range).collect()
}

/// Lit-and-shadowed luminance per sample:
/// `shadow_scale(depth) * (ambient + (1 - ambient) * saturate(sun . normal))`
pub fn shade_shadows(grid: &ShadowGrid, shading: &ShadowShading, sun_dir: Vec3, normals: &[Vec3]) -> Vec<f32> {
    let sun = sun_dir.normalize_or_zero();
    grid.shadows()
        .iter()
        .zip(grid.heights())
        .zip(normals)
        .map(|((&shadow, &height), &normal)| {
            let diffuse = sun.dot(normal).clamp(0.0, 1.0);
            let lit = AMBIENT + (1.0 - AMBIENT) * diffuse;
            shading.shadow_scale(shadow - height) * lit
        })
        .collect()
}

/// Save a row-major 0-1 grid to a plain PGM file
pub fn save_pgm(values: &[f32], width: usize, height: usize, filename: impl AsRef<Path>, scale: usize) -> io::Result<()> {
    let img_width = width * scale;
    let img_height = height * scale;

    let mut file = BufWriter::new(File::create(filename)?);
    writeln!(file, "P2")?;
    writeln!(file, "{} {}", img_width, img_height)?;
    writeln!(file, "255")?;

    for img_y in 0..img_height {
        for img_x in 0..img_width {
            let x = img_x / scale;
            let y = img_y / scale;
            write!(file, "{} ", to_byte(values[x + y * width]))?;
        }
        writeln!(file)?;
    }

    file.flush()
}

/// Save a normal map to a plain PPM file, mapping each component from -1..1 to 0..255
pub fn save_ppm_normals(normals: &[Vec3], width: usize, height: usize, filename: impl AsRef<Path>, scale: usize) -> io::Result<()> {
    let img_width = width * scale;
    let img_height = height * scale;

    let mut file = BufWriter::new(File::create(filename)?);
    writeln!(file, "P3")?;
    writeln!(file, "{} {}", img_width, img_height)?;
    writeln!(file, "255")?;

    for img_y in 0..img_height {
        for img_x in 0..img_width {
            let n = normals[img_x / scale + (img_y / scale) * width] * 0.5 + Vec3::splat(0.5);
            write!(file, "{} {} {} ", to_byte(n.x), to_byte(n.y), to_byte(n.z))?;
        }
        writeln!(file)?;
    }

    file.flush()
}
