//! Central-difference normals, used to give shadow dumps some diffuse shading.

use glam::Vec3;

/// Build a normal per sample from a row-major height field.
///
/// `height_scale` maps stored heights into the `[-1, 1]` span the grid covers
/// horizontally. Border samples get `+Z`.
pub fn create_normal_map(heights: &[f32], width: usize, height: usize, height_scale: f32) -> Vec<Vec3> {
    let mut normals = vec![Vec3::Z; width * height];
    if width < 3 || height < 3 {
        return normals;
    }

    // Two neighbouring samples are 2/width apart in normalized space
    let dscale_x = height_scale * (width as f32 / 2.0);
    let dscale_y = height_scale * (height as f32 / 2.0);

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let idx = x + y * width;
            let horiz = dscale_x * (heights[idx - 1] - heights[idx + 1]);
            let vert = dscale_y * (heights[idx - width] - heights[idx + width]);
            normals[idx] = Vec3::new(horiz, vert, 1.0).normalize_or_zero();
        }
    }

    normals
}
