//! Crest resampling between scan lines.
//!
//! After each line the crest is shifted by up to one cell along the free axis.
//! Every entry but one interpolates towards its neighbor; the entry at the
//! trailing edge has no neighbor on the grid and is filled by a
//! [`CrestBoundary`] policy instead.

/// How the crest entry with no in-grid neighbor is filled after a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrestBoundary {
    /// Continue the slope of the two nearest interior entries (`2a - b`).
    #[default]
    LinearExtrapolation,
    /// Treat terrain beyond the grid edge as height zero.
    ZeroExterior,
}

impl CrestBoundary {
    /// Value for the edge entry.
    ///
    /// * `edge` - edge value before the shift
    /// * `inner` - shifted neighbor next to the edge
    /// * `next_inner` - shifted neighbor two steps in, if the line is that long
    /// * `t` - shift amount in `(0, 1]`
    #[inline]
    fn edge_value(self, edge: f32, inner: Option<f32>, next_inner: Option<f32>, t: f32) -> f32 {
        match self {
            CrestBoundary::LinearExtrapolation => match (inner, next_inner) {
                (Some(a), Some(b)) => 2.0 * a - b,
                (Some(a), None) => a,
                _ => edge,
            },
            CrestBoundary::ZeroExterior => lerp(edge, 0.0, t),
        }
    }
}

#[inline]
pub(crate) fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Shift `crest` by `offset` cells (`-1..=1`) for the next scan line.
///
/// Positive offsets pull each entry towards its higher-index neighbor,
/// negative ones towards its lower-index neighbor.
pub(crate) fn shift_crest(crest: &mut [f32], offset: f32, boundary: CrestBoundary) {
    let n = crest.len();
    if n == 0 || offset == 0.0 {
        return;
    }

    if offset > 0.0 {
        let edge = crest[n - 1];
        for i in 0..n - 1 {
            crest[i] = lerp(crest[i], crest[i + 1], offset);
        }
        let inner = n.checked_sub(2).map(|i| crest[i]);
        let next_inner = n.checked_sub(3).map(|i| crest[i]);
        crest[n - 1] = boundary.edge_value(edge, inner, next_inner, offset);
    } else {
        let t = -offset;
        let edge = crest[0];
        for i in (1..n).rev() {
            crest[i] = lerp(crest[i], crest[i - 1], t);
        }
        let inner = crest.get(1).copied();
        let next_inner = crest.get(2).copied();
        crest[0] = boundary.edge_value(edge, inner, next_inner, t);
    }
}
