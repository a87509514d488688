//! # Trim Solver
//!
//! Balances the longitudinal centres of buoyancy and gravity about the
//! midship section. Positions are measured forward from the aft
//! perpendicular, so a centre of gravity aft of the centre of buoyancy gives
//! positive trim (by the stern).
//!
//! Any missing ingredient (unknown length, unresolved LCG, zero
//! displacement, vanishing MCT) gives zero trim with `applicable = false`.

use serde::{Deserialize, Serialize};

use crate::config::HydrostaticSettings;
use crate::equations::hydrostatic::{
    metacentric_radius, moment_to_change_trim_1cm, trim_from_lever, waterplane_inertia_longitudinal,
};
use crate::hydrostatics::{CurveAttribute, HydrostaticModel};
use crate::loading::LoadingState;
use crate::ship::ShipProfile;
use crate::units::EPS;

/// Trim and the longitudinal quantities it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrimSolution {
    /// Trim (m), positive by the stern
    pub trim_m: f64,
    /// LCB from AP (m)
    pub lcb_m: Option<f64>,
    /// LCG from AP (m)
    pub lcg_m: Option<f64>,
    /// Longitudinal metacentric radius (m)
    pub bm_l_m: f64,
    /// Moment to change trim one centimetre (t·m/cm)
    pub mct_1cm_tm: f64,
    /// False when trim could not be computed and was set to zero
    pub applicable: bool,
}

impl TrimSolution {
    fn level(lcb_m: Option<f64>, lcg_m: Option<f64>, bm_l_m: f64, mct_1cm_tm: f64) -> Self {
        Self {
            trim_m: 0.0,
            lcb_m,
            lcg_m,
            bm_l_m,
            mct_1cm_tm,
            applicable: false,
        }
    }
}

/// Solve trim at the given mean draft.
///
/// LCB comes from the model (default amidships); I_L from the model, else
/// from a rectangular waterplane when breadth is known.
///
/// # Example
///
/// ```rust
/// use stability_core::calculations::trim;
/// use stability_core::config::HydrostaticSettings;
/// use stability_core::hydrostatics::HullModel;
/// use stability_core::loading::LoadingState;
/// use stability_core::ship::ShipProfile;
///
/// let settings = HydrostaticSettings::default();
/// let ship = ShipProfile::new("MV Example").with_dimensions(100.0, 18.0, 9.0, 6.0);
/// let hull = HullModel::resolve(&ship, None, &settings).unwrap().unwrap();
///
/// // Centre of gravity 2 m aft of amidships: trimmed by the stern
/// let state = LoadingState { total_mass_t: 5000.0, kg_m: 6.0, lcg_m: Some(48.0),
///     lcg_norm: Some(0.48), ..Default::default() };
/// let solution = trim::solve(&state, hull.as_model(), 3.5, &ship, &settings);
/// assert!(solution.trim_m > 0.0);
/// ```
pub fn solve(
    state: &LoadingState,
    model: &dyn HydrostaticModel,
    draft_m: f64,
    ship: &ShipProfile,
    settings: &HydrostaticSettings,
) -> TrimSolution {
    let displacement = state.total_mass_t;
    let volume = if settings.water_density_t_m3 > EPS {
        displacement / settings.water_density_t_m3
    } else {
        0.0
    };

    let length = ship.length();
    let i_l = model
        .attribute_at(draft_m, CurveAttribute::LongitudinalInertia)
        .or_else(|| match (length, ship.breadth()) {
            (Some(l), Some(b)) => Some(waterplane_inertia_longitudinal(l, b)),
            _ => None,
        });
    let bm_l = i_l.map(|i| metacentric_radius(i, volume)).unwrap_or(0.0);

    let Some(length) = length else {
        log::debug!("trim not computed: length unknown");
        return TrimSolution::level(None, state.lcg_m, bm_l, 0.0);
    };

    let lcb_fraction = model
        .attribute_at(draft_m, CurveAttribute::LcbFraction)
        .unwrap_or(0.5);
    let lcb_m = lcb_fraction * length;
    let lcg_m = state.lcg_m.or_else(|| state.lcg_norm.map(|f| f * length));
    let mct = moment_to_change_trim_1cm(displacement, bm_l, length);

    let Some(lcg) = lcg_m else {
        log::debug!("trim not computed: LCG unresolved");
        return TrimSolution::level(Some(lcb_m), None, bm_l, mct);
    };
    if displacement <= EPS || mct.abs() < EPS {
        return TrimSolution::level(Some(lcb_m), Some(lcg), bm_l, mct);
    }

    let trim = trim_from_lever(displacement, lcb_m, lcg, mct);
    log::debug!(
        "trim solved: LCB {:.3} m, LCG {:.3} m, MCT {:.2} t·m/cm -> {:+.3} m",
        lcb_m,
        lcg,
        mct,
        trim
    );

    TrimSolution {
        trim_m: trim,
        lcb_m: Some(lcb_m),
        lcg_m: Some(lcg),
        bm_l_m: bm_l,
        mct_1cm_tm: mct,
        applicable: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hydrostatics::HullModel;

    fn setup() -> (ShipProfile, HullModel, HydrostaticSettings) {
        let settings = HydrostaticSettings::default();
        let ship = ShipProfile::new("Test").with_dimensions(100.0, 18.0, 9.0, 6.0);
        let hull = HullModel::resolve(&ship, None, &settings).unwrap().unwrap();
        (ship, hull, settings)
    }

    fn state(lcg_m: Option<f64>) -> LoadingState {
        LoadingState {
            total_mass_t: 5000.0,
            kg_m: 6.0,
            lcg_m,
            lcg_norm: lcg_m.map(|x| x / 100.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_balanced_is_level() {
        let (ship, hull, settings) = setup();
        let s = solve(&state(Some(50.0)), hull.as_model(), 3.5, &ship, &settings);
        assert!(s.applicable);
        assert!(s.trim_m.abs() < 1e-12);
    }

    #[test]
    fn test_trim_sign_and_magnitude() {
        let (ship, hull, settings) = setup();
        let aft = solve(&state(Some(48.0)), hull.as_model(), 3.5, &ship, &settings);
        let fwd = solve(&state(Some(52.0)), hull.as_model(), 3.5, &ship, &settings);
        assert!(aft.trim_m > 0.0);
        assert!(fwd.trim_m < 0.0);
        assert!((aft.trim_m + fwd.trim_m).abs() < 1e-9);

        // t = (LCB - LCG)·L / BM_L
        let expected = 2.0 * 100.0 / aft.bm_l_m;
        assert!((aft.trim_m - expected).abs() < 1e-9);
    }

    #[test]
    fn test_mct_formula() {
        let (ship, hull, settings) = setup();
        let s = solve(&state(Some(50.0)), hull.as_model(), 3.5, &ship, &settings);
        // I_L = 18·100³/12 = 1.5e6, V = 5000/1.025
        let bm_l = 1.5e6 / (5000.0 / 1.025);
        assert!((s.bm_l_m - bm_l).abs() < 1e-6);
        assert!((s.mct_1cm_tm - 5000.0 * bm_l / 10_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_length_is_not_applicable() {
        let settings = HydrostaticSettings::default();
        let ship = ShipProfile::new("NoLength").with_dimensions(0.0, 18.0, 9.0, 6.0);
        let hull = crate::hydrostatics::HydrostaticCurveSet::from_external(vec![
            crate::hydrostatics::CurveSample::new(0.0, 0.0),
            crate::hydrostatics::CurveSample::new(6.0, 9000.0),
        ])
        .unwrap();
        let s = solve(&state(Some(40.0)), &hull, 3.0, &ship, &settings);
        assert!(!s.applicable);
        assert_eq!(s.trim_m, 0.0);
        assert!(s.lcb_m.is_none());
    }

    #[test]
    fn test_unresolved_lcg_is_level() {
        let (ship, hull, settings) = setup();
        let s = solve(&state(None), hull.as_model(), 3.5, &ship, &settings);
        assert!(!s.applicable);
        assert_eq!(s.trim_m, 0.0);
    }

    #[test]
    fn test_zero_displacement_is_level() {
        let (ship, hull, settings) = setup();
        let empty = LoadingState::default();
        let s = solve(&empty, hull.as_model(), 0.0, &ship, &settings);
        assert_eq!(s.trim_m, 0.0);
        assert_eq!(s.bm_l_m, 0.0);
    }
}
