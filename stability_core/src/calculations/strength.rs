//! # Longitudinal Strength Indicator
//!
//! A coarse still-water bending moment and shear force indicator driven by
//! how far the longitudinal centre of gravity sits from amidships.
//!
//! **This is not a hull-girder calculation.** There is no load curve, no
//! buoyancy distribution and no section modulus behind it; the coefficients
//! in [`StrengthConstants`] are placeholders. The output only shows the
//! direction and rough size of the imbalance.

use serde::{Deserialize, Serialize};

use crate::config::StrengthConstants;
use crate::loading::LoadingState;
use crate::units::EPS;

/// Strength indicator values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrengthIndicator {
    /// |LCG/L − 0.5|
    pub eccentricity: f64,
    /// Magnitude of the still water bending moment (t·m)
    pub bending_moment_tm: f64,
    /// Bending moment, positive hogging and negative sagging (t·m)
    pub signed_bending_moment_tm: f64,
    /// Still water shear force (t)
    pub shear_force_t: f64,
    /// Placeholder allowable bending moment (t·m)
    pub design_bending_moment_tm: f64,
    /// Placeholder allowable shear force (t)
    pub design_shear_force_t: f64,
    /// Bending moment as % of the allowable
    pub bending_moment_pct: f64,
    /// Shear force as % of the allowable
    pub shear_force_pct: f64,
    /// True when the signed moment is hogging
    pub hogging: bool,
}

/// SWBM ≈ Δ·L·|LCG_norm − 0.5|·k
#[inline]
pub fn still_water_bending_moment(displacement: f64, length: f64, lcg_norm: f64, k: f64) -> f64 {
    displacement * length * (lcg_norm - 0.5).abs() * k
}

/// SF ≈ Δ·|LCG_norm − 0.5|·k
#[inline]
pub fn still_water_shear_force(displacement: f64, lcg_norm: f64, k: f64) -> f64 {
    displacement * (lcg_norm - 0.5).abs() * k
}

fn percent_of(value: f64, allowable: f64) -> f64 {
    if allowable <= EPS {
        return 0.0;
    }
    100.0 * value / allowable
}

/// Evaluate the indicator; `None` when length or normalized LCG is unknown.
///
/// # Example
///
/// ```rust
/// use stability_core::calculations::strength;
/// use stability_core::config::StrengthConstants;
/// use stability_core::loading::LoadingState;
///
/// let state = LoadingState { total_mass_t: 1000.0, lcg_norm: Some(0.4), ..Default::default() };
/// let ind = strength::evaluate(&state, Some(100.0), &StrengthConstants::default()).unwrap();
/// assert!(ind.hogging);
/// assert!((ind.bending_moment_tm - 2500.0).abs() < 1e-6);
/// ```
pub fn evaluate(state: &LoadingState, length: Option<f64>, k: &StrengthConstants) -> Option<StrengthIndicator> {
    let length = length.filter(|l| *l > EPS)?;
    let lcg_norm = state.lcg_norm?;
    let disp = state.total_mass_t;

    let bm = still_water_bending_moment(disp, length, lcg_norm, k.bm_coefficient);
    let sf = still_water_shear_force(disp, lcg_norm, k.sf_coefficient);
    let design_bm = disp * length * k.design_bm_coefficient;
    let design_sf = disp * k.design_sf_coefficient;
    let hogging = lcg_norm < 0.5;

    Some(StrengthIndicator {
        eccentricity: (lcg_norm - 0.5).abs(),
        bending_moment_tm: bm,
        signed_bending_moment_tm: if hogging { bm } else { -bm },
        shear_force_t: sf,
        design_bending_moment_tm: design_bm,
        design_shear_force_t: design_sf,
        bending_moment_pct: percent_of(bm, design_bm),
        shear_force_pct: percent_of(sf, design_sf),
        hogging,
    })
}
