//! Image dump and benchmark drivers for the command-line harness

use glam::Vec3;
use log::info;
use rayon::prelude::*;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use crate::grid::ShadowGrid;
use crate::normal::create_normal_map;
use crate::render::{normalize_values, save_pgm, save_ppm_normals, shade_shadows};
use crate::shading::ShadowShading;
use crate::shadow::{HorizonSweep, ShadowAlgorithm};

/// Configuration for the shadow image dump
#[derive(Debug, Clone)]
pub struct DumpConfig {
    /// Samples per side of the square test grid
    pub size: usize,
    /// Height of the test-pattern hills
    pub peak_height: f32,
    /// Shadow strength used for shading
    pub shadow_strength: f32,
    /// Sun azimuths, evenly spread over a full turn
    pub directions: usize,
    /// Pixel scale factor of the written images
    pub scale: usize,
    /// Output directory
    pub output_dir: PathBuf,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            size: 128,
            peak_height: 64.0,
            shadow_strength: 0.25,
            directions: 32,
            scale: 1,
            output_dir: PathBuf::from("."),
        }
    }
}

/// Sun at 45° elevation for step `j` of `n` around the horizon.
pub fn orbit_direction(j: usize, n: usize) -> Vec3 {
    let a = j as f32 / n.max(1) as f32 * std::f32::consts::TAU;
    Vec3::new(a.sin(), a.cos(), 1.0).normalize()
}

/// Write the test height field, its normals, and one shaded shadow image per
/// sun direction. Returns the written paths.
pub fn dump_shadow_series(config: &DumpConfig) -> io::Result<Vec<PathBuf>> {
    let size = config.size;
    let mut grid = ShadowGrid::with_dimensions(size, size, 1.0)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    grid.make_height_test_pattern(Some(config.peak_height));

    let normals = create_normal_map(grid.heights(), size, size, config.peak_height / size as f32);
    let shading = ShadowShading::new(config.shadow_strength);
    std::fs::create_dir_all(&config.output_dir)?;

    let mut written = Vec::with_capacity(config.directions + 2);

    let height_path = config.output_dir.join("height.pgm");
    save_pgm(&normalize_values(grid.heights()), size, size, &height_path, config.scale)?;
    written.push(height_path);

    let normal_path = config.output_dir.join("normal.ppm");
    save_ppm_normals(&normals, size, size, &normal_path, config.scale)?;
    written.push(normal_path);

    // Every direction sweeps its own grid clone
    let frames: Vec<(usize, Vec<f32>)> = (0..config.directions)
        .into_par_iter()
        .map(|j| {
            let sun = orbit_direction(j, config.directions);
            let mut frame = grid.clone();
            HorizonSweep::new().compute_shadows(&mut frame, sun);
            (j, shade_shadows(&frame, &shading, sun, &normals))
        })
        .collect();

    for (j, luminance) in frames {
        let path = config.output_dir.join(format!("shadow-{:02}.pgm", j));
        save_pgm(&luminance, size, size, &path, config.scale)?;
        written.push(path);
    }

    info!("Wrote {} images to {}", written.len(), config.output_dir.display());
    Ok(written)
}

/// Time one sweep at several grid sizes, then a full orbit in parallel.
pub fn run_benchmark() {
    println!("=== Horizon Sweep Benchmark ===\n");

    let sizes = [128usize, 256, 512, 1024];
    let iterations = 20;
    let sweep = HorizonSweep::new();

    for size in sizes {
        let mut grid = match ShadowGrid::with_dimensions(size, size, 1.0) {
            Ok(grid) => grid,
            Err(e) => {
                log::error!("Skipping {}x{}: {}", size, size, e);
                continue;
            }
        };
        grid.make_height_test_pattern(Some(64.0));

        println!("Grid size: {}x{}", size, size);
        println!("-----------------------");

        let mut crest = Vec::with_capacity(size);
        let start = Instant::now();
        for i in 0..iterations {
            // Alternate directions so every sweep rewrites the field
            let sun = orbit_direction(i % 8, 8);
            sweep.compute_shadows_with(&mut grid, sun, &mut crest);
        }
        let avg_ms = start.elapsed().as_secs_f64() * 1000.0 / iterations as f64;
        let ns_per_sample = avg_ms * 1.0e6 / (size * size) as f64;

        println!("  {:.3} ms/sweep ({:.2} ns/sample)", avg_ms, ns_per_sample);
        println!();
    }

    println!("=== Parallel Orbit (32 directions, 512x512) ===\n");

    let mut grid = match ShadowGrid::with_dimensions(512, 512, 1.0) {
        Ok(grid) => grid,
        Err(e) => {
            log::error!("{}", e);
            return;
        }
    };
    grid.make_height_test_pattern(Some(64.0));

    let start = Instant::now();
    for j in 0..32 {
        let mut frame = grid.clone();
        sweep.compute_shadows(&mut frame, orbit_direction(j, 32));
    }
    let sequential_ms = start.elapsed().as_secs_f64() * 1000.0;

    let start = Instant::now();
    (0..32).into_par_iter().for_each(|j| {
        let mut frame = grid.clone();
        sweep.compute_shadows(&mut frame, orbit_direction(j, 32));
    });
    let parallel_ms = start.elapsed().as_secs_f64() * 1000.0;

    println!("  Sequential: {:.3} ms", sequential_ms);
    println!("  Parallel:   {:.3} ms", parallel_ms);
    println!("  Speedup: {:.2}x", sequential_ms / parallel_ms);
}
