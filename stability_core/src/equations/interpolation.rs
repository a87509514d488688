//! # Table Interpolation
//!
//! Piecewise-linear lookups over tabulated data (hydrostatic curves, free
//! surface moment tables). The abscissa must be sorted ascending; repeated
//! abscissa values (flat segments in an inverse lookup) are tolerated.

use crate::units::EPS;

/// Linear interpolation between (x0, y0) and (x1, y1).
///
/// A zero-width segment returns `y0`.
#[inline]
pub fn lerp(x0: f64, y0: f64, x1: f64, y1: f64, x: f64) -> f64 {
    let dx = x1 - x0;
    if dx.abs() < EPS {
        return y0;
    }
    y0 + (x - x0) * (y1 - y0) / dx
}

/// Result of a table lookup that may run past the last sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lookup {
    /// Interpolated (or extrapolated) value
    pub value: f64,
    /// True when `x` was above the last sample and the value was extrapolated
    pub extrapolated: bool,
}

/// Interpolate `ys` at `x`, clamping to the end values outside the table.
///
/// Returns `None` for an empty table or mismatched lengths.
///
/// # Example
/// ```rust
/// use stability_core::equations::interpolation::interpolate_clamped;
///
/// let xs = [0.0, 1.0, 2.0];
/// let ys = [0.0, 10.0, 30.0];
/// assert_eq!(interpolate_clamped(1.5, &xs, &ys), Some(20.0));
/// assert_eq!(interpolate_clamped(5.0, &xs, &ys), Some(30.0));
/// assert_eq!(interpolate_clamped(-1.0, &xs, &ys), Some(0.0));
/// ```
pub fn interpolate_clamped(x: f64, xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.is_empty() || xs.len() != ys.len() {
        return None;
    }
    let last = xs.len() - 1;
    if x <= xs[0] {
        return Some(ys[0]);
    }
    if x >= xs[last] {
        return Some(ys[last]);
    }
    let i = segment_index(x, xs);
    Some(lerp(xs[i], ys[i], xs[i + 1], ys[i + 1], x))
}

/// Interpolate `ys` at `x`; clamp below the first sample and extrapolate
/// linearly from the last two samples above the last one.
///
/// Needs at least two samples; returns `None` otherwise.
///
/// # Example
/// ```rust
/// use stability_core::equations::interpolation::interpolate_extrapolating;
///
/// let xs = [0.0, 1.0, 2.0];
/// let ys = [0.0, 10.0, 20.0];
/// let hit = interpolate_extrapolating(3.0, &xs, &ys).unwrap();
/// assert_eq!(hit.value, 30.0);
/// assert!(hit.extrapolated);
/// ```
pub fn interpolate_extrapolating(x: f64, xs: &[f64], ys: &[f64]) -> Option<Lookup> {
    if xs.len() < 2 || xs.len() != ys.len() {
        return None;
    }
    let last = xs.len() - 1;
    if x <= xs[0] {
        return Some(Lookup {
            value: ys[0],
            extrapolated: false,
        });
    }
    if x > xs[last] {
        // Walk back past flat tail segments so the slope is usable.
        let mut j = last - 1;
        while j > 0 && (xs[last] - xs[j]).abs() < EPS {
            j -= 1;
        }
        return Some(Lookup {
            value: lerp(xs[j], ys[j], xs[last], ys[last], x),
            extrapolated: true,
        });
    }
    let i = segment_index(x, xs);
    Some(Lookup {
        value: lerp(xs[i], ys[i], xs[i + 1], ys[i + 1], x),
        extrapolated: false,
    })
}

/// Index `i` of the segment [xs[i], xs[i+1]] containing `x`.
///
/// Caller guarantees xs[0] < x <= xs[last].
fn segment_index(x: f64, xs: &[f64]) -> usize {
    // First sample >= x; the bracketing segment starts one before it.
    let upper = xs.partition_point(|&v| v < x);
    upper.saturating_sub(1).min(xs.len() - 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_midpoint() {
        assert!((lerp(0.0, 0.0, 2.0, 4.0, 1.0) - 2.0).abs() < 1e-12);
        assert_eq!(lerp(1.0, 7.0, 1.0, 9.0, 1.0), 7.0);
    }

    #[test]
    fn test_clamped_exact_samples() {
        let xs = [0.0, 1.0, 2.0, 4.0];
        let ys = [0.0, 1.0, 4.0, 16.0];
        for (x, y) in xs.iter().zip(ys.iter()) {
            assert_eq!(interpolate_clamped(*x, &xs, &ys), Some(*y));
        }
        assert_eq!(interpolate_clamped(3.0, &xs, &ys), Some(10.0));
    }

    #[test]
    fn test_clamped_rejects_bad_tables() {
        assert_eq!(interpolate_clamped(1.0, &[], &[]), None);
        assert_eq!(interpolate_clamped(1.0, &[0.0, 1.0], &[0.0]), None);
        assert_eq!(interpolate_clamped(3.0, &[2.0], &[5.0]), Some(5.0));
    }

    #[test]
    fn test_flat_segment_inverse() {
        // Displacement repeated: inverse lookup lands on the first draft.
        let disp = [0.0, 100.0, 100.0, 200.0];
        let draft = [0.0, 1.0, 1.5, 2.5];
        let hit = interpolate_extrapolating(100.0, &disp, &draft).unwrap();
        assert!((hit.value - 1.0).abs() < 1e-12);
        let hit = interpolate_extrapolating(150.0, &disp, &draft).unwrap();
        assert!((hit.value - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_extrapolation_flag() {
        let xs = [0.0, 1.0];
        let ys = [0.0, 2.0];
        let inside = interpolate_extrapolating(0.5, &xs, &ys).unwrap();
        assert!(!inside.extrapolated);
        let at_top = interpolate_extrapolating(1.0, &xs, &ys).unwrap();
        assert!(!at_top.extrapolated);
        let above = interpolate_extrapolating(1.5, &xs, &ys).unwrap();
        assert!(above.extrapolated);
        assert!((above.value - 3.0).abs() < 1e-12);
        assert!(interpolate_extrapolating(0.5, &[0.0], &[1.0]).is_none());
    }
}
