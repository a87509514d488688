//! # Hydrostatic and Equilibrium Formulas
//!
//! Closed-form relations between hull dimensions, displacement and the
//! centres of buoyancy, plus the trim balance used by the equilibrium solver.
//!
//! ## Notation
//!
//! - `L` = Length overall (m)
//! - `B` = Breadth (m)
//! - `T` = Mean draft (m)
//! - `Cb` = Block coefficient
//! - `ρ` = Water density (t/m³)
//! - `Δ` = Displacement (t)
//! - `V` = Displaced volume (m³)
//! - `I_T`, `I_L` = Transverse / longitudinal waterplane second moment (m⁴)
//!
//! ## Sign Conventions
//!
//! - Longitudinal positions: measured forward from the aft perpendicular
//! - Trim: positive by the stern (aft draft greater than forward draft)
//!
//! ## References
//!
//! - Vessel loading manual, draft calculation (p.11)
//! - Morrish approximation for KB

use crate::units::EPS;

/// Box-form displacement Δ = L·B·T·Cb·ρ
///
/// # Example
/// ```rust
/// use stability_core::equations::hydrostatic::box_displacement;
///
/// let disp = box_displacement(100.0, 18.0, 6.0, 0.78, 1.025);
/// assert!((disp - 8634.6).abs() < 0.1);
/// ```
#[inline]
pub fn box_displacement(l: f64, b: f64, t: f64, cb: f64, rho: f64) -> f64 {
    l * b * t * cb * rho
}

/// Box-form inversion T = Δ / (L·B·Cb·ρ)
///
/// Returns 0 when the denominator vanishes.
#[inline]
pub fn box_draft(displacement: f64, l: f64, b: f64, cb: f64, rho: f64) -> f64 {
    let denom = l * b * cb * rho;
    if denom.abs() < EPS {
        return 0.0;
    }
    displacement / denom
}

/// Morrish-style KB = (0.535 − 0.055·Cb)·T
#[inline]
pub fn kb_morrish(cb: f64, t: f64) -> f64 {
    (0.535 - 0.055 * cb) * t
}

/// Rectangular waterplane transverse second moment I_T = L·B³/12
#[inline]
pub fn waterplane_inertia_transverse(l: f64, b: f64) -> f64 {
    l * b.powi(3) / 12.0
}

/// Rectangular waterplane longitudinal second moment I_L = B·L³/12
#[inline]
pub fn waterplane_inertia_longitudinal(l: f64, b: f64) -> f64 {
    b * l.powi(3) / 12.0
}

/// Metacentric radius BM = I / V
///
/// Returns 0 for a vanishing volume.
#[inline]
pub fn metacentric_radius(inertia: f64, volume: f64) -> f64 {
    if volume <= EPS {
        return 0.0;
    }
    inertia / volume
}

/// Moment to change trim one centimetre, MCT1cm = Δ·BM_L / (100·L)  (t·m/cm)
#[inline]
pub fn moment_to_change_trim_1cm(displacement: f64, bm_l: f64, l: f64) -> f64 {
    if l <= EPS {
        return 0.0;
    }
    displacement * bm_l / (100.0 * l)
}

/// Trim (m) from the buoyancy/gravity lever.
///
/// t = Δ·(LCB − LCG) / (100·MCT1cm), positions from the aft perpendicular,
/// so a centre of gravity aft of the centre of buoyancy trims by the stern.
/// A vanishing MCT yields zero trim.
///
/// # Example
/// ```rust
/// use stability_core::equations::hydrostatic::trim_from_lever;
///
/// // LCG 1 m aft of LCB: stern down
/// assert!(trim_from_lever(5000.0, 50.0, 49.0, 80.0) > 0.0);
/// assert_eq!(trim_from_lever(5000.0, 50.0, 49.0, 0.0), 0.0);
/// ```
#[inline]
pub fn trim_from_lever(displacement: f64, lcb_m: f64, lcg_m: f64, mct_1cm: f64) -> f64 {
    if mct_1cm.abs() < EPS {
        return 0.0;
    }
    displacement * (lcb_m - lcg_m) / (100.0 * mct_1cm)
}

/// Drafts at the aft, midship and forward marks for a mean draft and trim.
///
/// Returns (aft, mid, fwd).
#[inline]
pub fn drafts_at_marks(mean_draft: f64, trim: f64) -> (f64, f64, f64) {
    (mean_draft + trim / 2.0, mean_draft, mean_draft - trim / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_round_trip() {
        let disp = box_displacement(100.0, 18.0, 4.0, 0.78, 1.025);
        let t = box_draft(disp, 100.0, 18.0, 0.78, 1.025);
        assert!((t - 4.0).abs() < 1e-12);
        assert_eq!(box_draft(100.0, 0.0, 18.0, 0.78, 1.025), 0.0);
    }

    #[test]
    fn test_reference_draft() {
        // 250 t on L=100, B=18, Cb=0.78: T = 250 / (100·18·0.78·1.025)
        let t = box_draft(250.0, 100.0, 18.0, 0.78, 1.025);
        assert!((t - 0.17372).abs() < 1e-4);
    }

    #[test]
    fn test_kb_morrish() {
        // (0.535 - 0.055·0.78) = 0.4921
        assert!((kb_morrish(0.78, 6.0) - 2.9526).abs() < 1e-9);
    }

    #[test]
    fn test_waterplane_inertia() {
        assert!((waterplane_inertia_transverse(100.0, 18.0) - 48_600.0).abs() < 1e-6);
        assert!((waterplane_inertia_longitudinal(100.0, 18.0) - 1_500_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_metacentric_radius_zero_volume() {
        assert_eq!(metacentric_radius(48_600.0, 0.0), 0.0);
        assert!((metacentric_radius(48_600.0, 243.9) - 199.26).abs() < 0.01);
    }

    #[test]
    fn test_trim_sign() {
        let forward = trim_from_lever(1000.0, 50.0, 52.0, 20.0);
        let aft = trim_from_lever(1000.0, 50.0, 48.0, 20.0);
        assert!(forward < 0.0);
        assert!(aft > 0.0);
        assert!((forward + aft).abs() < 1e-12);
    }

    #[test]
    fn test_drafts_at_marks() {
        let (aft, mid, fwd) = drafts_at_marks(5.0, 0.4);
        assert!((aft - 5.2).abs() < 1e-12);
        assert_eq!(mid, 5.0);
        assert!((fwd - 4.8).abs() < 1e-12);
    }
}
