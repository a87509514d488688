//! # Initial Stability and Ancillary Formulas
//!
//! Small-angle stability relations (GM, free-surface correction, heel, roll
//! period) and the operational geometry checks (freeboard, propeller
//! immersion, visibility, air draft).
//!
//! All of these are first-order, small-angle results. Heel from
//! `atan(TCG/GM)` is only meaningful for a few degrees and is not a
//! substitute for a righting-arm curve.
//!
//! ## References
//!
//! - Vessel loading manual, GM calculation (p.11): GG' = ΣFSM/Δ, GM = KM − KG − GG'
//! - AMSA MO43: roll period and freeboard for livestock carriers

use std::f64::consts::PI;

use crate::units::{Degrees, Radians, EPS};

/// Metacentric height GM = KM − KG
#[inline]
pub fn metacentric_height(km: f64, kg: f64) -> f64 {
    km - kg
}

/// Free-surface correction GG' = ΣFSM / Δ
///
/// Returns 0 for a vanishing displacement.
#[inline]
pub fn free_surface_correction(total_fsm_tm: f64, displacement: f64) -> f64 {
    if displacement <= EPS {
        return 0.0;
    }
    total_fsm_tm / displacement
}

/// Static heel angle (degrees) = atan(TCG / GM), zero when GM ≤ 0.
///
/// # Example
/// ```rust
/// use stability_core::equations::stability::heel_angle_deg;
///
/// assert!((heel_angle_deg(0.1, 1.0) - 5.7106).abs() < 1e-3);
/// assert_eq!(heel_angle_deg(0.1, -0.2), 0.0);
/// ```
#[inline]
pub fn heel_angle_deg(tcg: f64, gm: f64) -> f64 {
    if gm <= EPS {
        return 0.0;
    }
    Degrees::from(Radians((tcg / gm).atan())).0
}

/// Natural roll period T = 2π·k·B / √(g·GM)  (s)
///
/// `k` is the roll radius of gyration as a fraction of breadth.
/// `None` when GM ≤ 0 (no restoring moment, no period).
pub fn roll_period_s(k: f64, breadth: f64, gm: f64, g: f64) -> Option<f64> {
    if gm <= EPS || g <= EPS {
        return None;
    }
    Some(2.0 * PI * k * breadth / (g * gm).sqrt())
}

/// Freeboard at the lowest point of the deck line = D − T − |trim|/2
#[inline]
pub fn freeboard(depth: f64, mean_draft: f64, trim: f64) -> f64 {
    depth - mean_draft - 0.5 * trim.abs()
}

/// Propeller immersion as a percentage of diameter (0-100).
///
/// Immersion is measured from the propeller centre to the aft waterline.
pub fn propeller_immersion_pct(draft_aft: f64, prop_centre: f64, prop_diameter: f64) -> f64 {
    if prop_diameter <= EPS {
        return if draft_aft > prop_centre { 100.0 } else { 0.0 };
    }
    let immersion = (draft_aft - prop_centre).max(0.0);
    (100.0 * immersion / prop_diameter).clamp(0.0, 100.0)
}

/// Approximate visibility (m): where the sight line from the bridge meets
/// the water ahead, measured from the bridge, capped at the ship length.
///
/// With no trim the bow waterline is taken as visible over the whole
/// distance to the bow.
pub fn visibility_m(length: f64, bridge_from_ap: f64, bridge_height: f64, draft_fwd: f64, trim: f64) -> f64 {
    if length <= EPS {
        return 0.0;
    }
    let dist_to_bow = length - bridge_from_ap;
    if dist_to_bow <= 0.0 {
        return length;
    }
    let trim_angle = (trim / length).atan();
    let height_above_water = bridge_height - draft_fwd;
    if height_above_water <= 0.0 || trim_angle.abs() < EPS {
        return dist_to_bow;
    }
    (height_above_water / trim_angle.tan().abs()).clamp(0.0, length)
}

/// Air draft = highest point above baseline − mean draft (never negative)
#[inline]
pub fn air_draft_m(mast_height: f64, mean_draft: f64) -> f64 {
    (mast_height - mean_draft).max(0.0)
}
