//! Tests for shadow casting over whole grids

use glam::{Vec2, Vec3};
use rayon::prelude::*;

use crate::{
    CrestBoundary, DEFAULT_MAX_UNSHADOWED_DEPTH, DirtyRect, GridConfig, HorizonSweep, ShadowAlgorithm, ShadowGrid,
    ShadowShading, orbit_direction,
};

const EPS: f32 = 1e-4;

fn pattern_grid(width: usize, height: usize) -> ShadowGrid {
    let mut grid = ShadowGrid::with_dimensions(width, height, 1.0).unwrap();
    grid.make_height_test_pattern(Some(16.0));
    grid
}

fn spike_grid(size: usize, spike: f32) -> ShadowGrid {
    let mut grid = ShadowGrid::with_dimensions(size, size, 1.0).unwrap();
    grid.heights_mut().fill(0.0);
    grid.set_height(size / 2, size / 2, spike);
    grid
}

#[test]
fn test_flat_field_casts_no_shadow() {
    let mut grid = ShadowGrid::with_dimensions(12, 9, 0.5).unwrap();
    grid.heights_mut().fill(5.0);

    for j in 0..16 {
        let sun = orbit_direction(j, 16) * Vec3::new(1.0, 1.0, 0.2 + j as f32 * 0.1);
        grid.compute_shadows(sun);

        for y in 0..9 {
            for x in 0..12 {
                assert!(
                    grid.shadow_depth(x, y).abs() < EPS,
                    "depth {} at ({}, {}) for sun {:?}",
                    grid.shadow_depth(x, y),
                    x,
                    y,
                    sun
                );
            }
        }
    }
}

#[test]
fn test_overhead_sun_on_fresh_grid() {
    // 4x4 zeros, floor -1000: straight-down light leaves the cleared field alone
    let mut grid = ShadowGrid::new(GridConfig {
        width: 4,
        height: 4,
        cell_width: 1.0,
        max_depth: -1000.0,
    })
    .unwrap();
    grid.heights_mut().fill(0.0);

    grid.compute_shadows(Vec3::new(0.0, 0.0, 1.0));

    assert!(grid.shadows().iter().all(|&s| s == -1000.0));
    assert!(grid.is_shadow_empty());
    assert_eq!(grid.dirty_rect(), DirtyRect::NONE);
    assert!((grid.shadow_depth(2, 2) + 1000.0).abs() < EPS);
}

#[test]
fn test_sun_below_horizon_clears() {
    let mut grid = pattern_grid(16, 16);
    grid.compute_shadows(Vec3::new(0.3, 1.0, 0.5));
    assert!(!grid.is_shadow_empty());

    grid.compute_shadows(Vec3::new(0.3, 1.0, -0.2));
    assert!(grid.shadows().iter().all(|&s| s == DEFAULT_MAX_UNSHADOWED_DEPTH));
    assert_eq!(grid.dirty_rect(), DirtyRect::full(16, 16));

    let shading = ShadowShading::new(3.0);
    for y in 0..16 {
        for x in 0..16 {
            assert_eq!(shading.shadow_scale(grid.shadow_depth(x, y)), 1.0);
        }
    }

    // Already clear: nothing to report
    grid.compute_shadows(Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(grid.dirty_rect(), DirtyRect::NONE);
}

#[test]
fn test_spike_shadow_falls_away_from_sun() {
    // Sun low on the +X side
    let mut grid = ShadowGrid::with_dimensions(5, 1, 1.0).unwrap();
    grid.heights_mut().copy_from_slice(&[0.0, 0.0, 10.0, 0.0, 0.0]);
    grid.compute_shadows(Vec3::new(1.0, 0.0, 0.01));

    assert!(grid.shadow_depth(0, 0) > 0.0);
    assert!(grid.shadow_depth(1, 0) > 0.0);
    assert_eq!(grid.shadow_depth(2, 0), 0.0);
    assert_eq!(grid.shadow_depth(3, 0), 0.0);
    assert_eq!(grid.shadow_depth(4, 0), 0.0);

    // Sun low on the -X side
    grid.compute_shadows(Vec3::new(-1.0, 0.0, 0.01));
    assert_eq!(grid.shadow_depth(0, 0), 0.0);
    assert_eq!(grid.shadow_depth(1, 0), 0.0);
    assert!((grid.shadow_depth(3, 0) - 9.99).abs() < EPS);
    assert!((grid.shadow_depth(4, 0) - 9.98).abs() < EPS);
}

#[test]
fn test_spike_shadow_in_column() {
    // Same scene turned on its side exercises the row-based scan
    let mut grid = ShadowGrid::with_dimensions(1, 5, 2.0).unwrap();
    grid.heights_mut().copy_from_slice(&[0.0, 0.0, 10.0, 0.0, 0.0]);
    grid.compute_shadows(Vec3::new(0.0, -1.0, 1.0));

    assert_eq!(grid.shadow_depth(0, 1), 0.0);
    // Descent is cell_width * z / |y| = 2 per cell
    assert!((grid.shadow_depth(0, 3) - 8.0).abs() < EPS);
    assert!((grid.shadow_depth(0, 4) - 6.0).abs() < EPS);
}

#[test]
fn test_axis_aligned_matches_brute_force() {
    let mut grid = pattern_grid(24, 20);
    let sun = Vec3::new(0.0, -2.0, 1.0);
    grid.compute_shadows(sun);

    // Shadow height: highest upstream sample minus the slope over the distance
    let drop_per_cell = grid.cell_width() * sun.z / sun.y.abs();
    for x in 0..24 {
        for y in 0..20 {
            let expected = (0..=y)
                .map(|k| grid.height_at(x, k) - (y - k) as f32 * drop_per_cell)
                .fold(f32::NEG_INFINITY, f32::max);
            assert!(
                (grid.shadow_at(x, y) - expected).abs() < 1e-3,
                "({}, {}): {} vs {}",
                x,
                y,
                grid.shadow_at(x, y),
                expected
            );
        }
    }
}

#[test]
fn test_recompute_is_idempotent() {
    let mut grid = pattern_grid(40, 30);
    let sun = Vec3::new(-0.7, 0.4, 0.3);

    grid.compute_shadows(sun);
    let first = grid.shadows().to_vec();
    assert!(!grid.dirty_rect().is_empty());

    grid.compute_shadows(sun);
    assert_eq!(grid.shadows(), first.as_slice());
    assert_eq!(grid.dirty_rect(), DirtyRect::NONE);
}

#[test]
fn test_first_sweep_dirties_whole_grid() {
    for sun in [Vec3::new(0.2, 1.0, 0.5), Vec3::new(0.2, -1.0, 0.5), Vec3::new(1.0, 0.3, 0.5), Vec3::new(-1.0, 0.3, 0.5)] {
        let mut grid = pattern_grid(10, 7);
        grid.compute_shadows(sun);
        assert_eq!(grid.dirty_rect(), DirtyRect::new(0, 0, 9, 6), "sun {:?}", sun);
    }
}

#[test]
fn test_dirty_rect_covers_changes() {
    let mut grid = pattern_grid(48, 48);
    grid.compute_shadows(orbit_direction(3, 16));
    let before = grid.shadows().to_vec();

    grid.compute_shadows(orbit_direction(4, 16));
    let rect = grid.dirty_rect();

    let mut changed = 0;
    for y in 0..48 {
        for x in 0..48 {
            if grid.shadow_at(x, y) != before[x + y * 48] {
                changed += 1;
                assert!(rect.contains(x as i32, y as i32), "({}, {}) outside {:?}", x, y, rect);
            }
        }
    }
    assert!(changed > 0);
    assert!(rect.left <= rect.right && rect.top <= rect.bottom);
}

#[test]
fn test_taller_spike_never_shrinks_shadow() {
    let sun = Vec3::new(0.3, 1.0, 1.0);
    let mut previous: Option<Vec<f32>> = None;

    for spike in [2.0, 4.0, 8.0, 12.0] {
        let mut grid = spike_grid(32, spike);
        grid.compute_shadows(sun);

        let depths: Vec<f32> = (0..32 * 32).map(|i| grid.shadow_depth(i % 32, i / 32)).collect();
        if let Some(prev) = &previous {
            for (i, (&now, &before)) in depths.iter().zip(prev).enumerate() {
                assert!(now >= before - EPS, "cell {} went from {} to {}", i, before, now);
            }
        }
        previous = Some(depths);
    }

    // The tallest spike shadows the cells on its far side from the sun
    let depths = previous.unwrap();
    assert!(depths[16 + 15 * 32] > 0.0);
    assert!(depths[16 + 17 * 32] <= 0.0);
}

#[test]
fn test_rows_and_columns_agree_on_transpose() {
    let (w, h) = (21, 13);
    let grid = pattern_grid(w, h);

    let mut transposed = ShadowGrid::with_dimensions(h, w, 1.0).unwrap();
    for y in 0..h {
        for x in 0..w {
            transposed.set_height(y, x, grid.height_at(x, y));
        }
    }

    let mut grid = grid;
    grid.compute_shadows(Vec3::new(0.35, -1.0, 0.6));
    transposed.compute_shadows(Vec3::new(-1.0, 0.35, 0.6));

    for y in 0..h {
        for x in 0..w {
            assert_eq!(grid.shadow_at(x, y), transposed.shadow_at(y, x), "({}, {})", x, y);
        }
    }
}

#[test]
fn test_boundary_policies() {
    // No sideways shift: the edge policy never runs
    let mut linear = pattern_grid(16, 16);
    let mut zero = linear.clone();
    let sun = Vec3::new(1.0, 0.0, 0.4);
    HorizonSweep::with_boundary(CrestBoundary::LinearExtrapolation).compute_shadows(&mut linear, sun);
    HorizonSweep::with_boundary(CrestBoundary::ZeroExterior).compute_shadows(&mut zero, sun);
    assert_eq!(linear.shadows(), zero.shadows());

    // Positive flat terrain stands above a zero exterior, so it stays lit
    let mut flat = ShadowGrid::with_dimensions(16, 16, 1.0).unwrap();
    flat.heights_mut().fill(3.0);
    HorizonSweep::with_boundary(CrestBoundary::ZeroExterior).compute_shadows(&mut flat, Vec3::new(0.6, 1.0, 0.5));
    for y in 0..16 {
        for x in 0..16 {
            assert!(flat.shadow_depth(x, y).abs() < EPS);
        }
    }
}

#[test]
fn test_object_and_point_queries() {
    let mut grid = ShadowGrid::with_dimensions(5, 1, 2.0).unwrap();
    grid.heights_mut().copy_from_slice(&[0.0, 0.0, 10.0, 0.0, 0.0]);
    grid.compute_shadows(Vec3::new(-1.0, 0.0, 0.5));

    // Cell 3 sits in the spike's shadow: 10 - 2 * 0.5 = 9
    assert!((grid.shadow_depth_at(Vec2::new(7.9, 1.0)) - 9.0).abs() < EPS);
    // An object floating above the shadow line is lit
    assert!(grid.object_shadow_depth(Vec3::new(7.0, 0.5, 12.0)) < 0.0);
    // One standing on the ground is not
    assert!(grid.object_shadow_depth(Vec3::new(7.0, 0.5, 1.0)) > 0.0);
    assert!(grid.is_in_bounds(7.0, 0.0));
    assert!(!grid.is_in_bounds(7.0, 0.5));
}

#[test]
fn test_independent_grids_in_parallel() {
    let base = pattern_grid(64, 64);
    let sweep = HorizonSweep::new();

    let parallel: Vec<Vec<f32>> = (0..8)
        .into_par_iter()
        .map(|j| {
            let mut grid = base.clone();
            sweep.compute_shadows(&mut grid, orbit_direction(j, 8));
            grid.shadows().to_vec()
        })
        .collect();

    for (j, shadows) in parallel.iter().enumerate() {
        let mut grid = base.clone();
        grid.compute_shadows(orbit_direction(j, 8));
        assert_eq!(grid.shadows(), shadows.as_slice());
    }
}

#[test]
fn test_reconfigure_resets_state() {
    let mut grid = pattern_grid(8, 8);
    grid.compute_shadows(Vec3::new(1.0, 0.5, 0.5));
    assert!(!grid.dirty_rect().is_empty());

    grid.configure(3, 5, 2.0, -10.0).unwrap();
    assert_eq!((grid.width(), grid.height()), (3, 5));
    assert_eq!(grid.dirty_rect(), DirtyRect::NONE);
    assert!(grid.is_shadow_empty());
    assert!(grid.shadows().iter().all(|&s| s == -10.0));
}
