//! # Stability Calculator
//!
//! Assembles the floating equilibrium: metacentric heights with the
//! free-surface correction, drafts at the marks, static heel, the strength
//! indicator and the ancillary geometry.
//!
//! ## Assumptions
//!
//! - Small-angle (initial) stability only; no righting-arm curve
//! - KM = KB + BM_T at the mean draft, ignoring trim
//! - Free surface only from slack tanks with FSM data
//!
//! The negative-GM policy in [`Limits::gm_policy`] is applied once here, to
//! both GM and effective GM, so every later stage reads the same values.

use serde::{Deserialize, Serialize};

use super::ancillary::{self, AncillaryResult, Waterline};
use super::draft::DraftSolution;
use super::strength::{self, StrengthIndicator};
use super::trim::TrimSolution;
use crate::config::{HydrostaticSettings, Limits};
use crate::equations::hydrostatic::{drafts_at_marks, metacentric_radius, waterplane_inertia_transverse};
use crate::equations::stability::{free_surface_correction, heel_angle_deg, metacentric_height};
use crate::hydrostatics::{CurveAttribute, HydrostaticModel, HydrostaticSource};
use crate::loading::LoadingState;
use crate::ship::ShipProfile;
use crate::units::{Tonnes, EPS};

/// Complete floating equilibrium of a loading condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquilibriumResult {
    /// Displacement (t)
    pub displacement_t: f64,
    /// Mean draft (m)
    pub draft_mean_m: f64,
    /// Displacement exceeded the hydrostatic table
    pub draft_out_of_table: bool,
    /// Trim (m), positive by the stern
    pub trim_m: f64,
    /// Trim could be computed (length and LCG known)
    pub trim_applicable: bool,
    pub draft_aft_m: f64,
    pub draft_mid_m: f64,
    pub draft_fwd_m: f64,
    /// Static heel (degrees), positive to starboard
    pub heel_deg: f64,
    pub kb_m: f64,
    pub bm_t_m: f64,
    pub bm_l_m: f64,
    pub mct_1cm_tm: f64,
    pub km_m: f64,
    pub kg_m: f64,
    /// GM = KM − KG, after the GM policy
    pub gm_m: f64,
    /// GG' = ΣFSM / Δ
    pub free_surface_correction_m: f64,
    /// GM − GG', after the GM policy
    pub gm_effective_m: f64,
    /// LCB from AP (m)
    pub lcb_m: Option<f64>,
    /// LCG from AP (m)
    pub lcg_m: Option<f64>,
    pub hydrostatic_source: HydrostaticSource,
    /// `None` when length or normalized LCG is unknown
    pub strength: Option<StrengthIndicator>,
    pub ancillary: AncillaryResult,
}

/// Compute the equilibrium from the solved draft and trim.
#[allow(clippy::too_many_arguments)]
pub fn solve(
    state: &LoadingState,
    model: &dyn HydrostaticModel,
    draft: &DraftSolution,
    trim: &TrimSolution,
    ship: &ShipProfile,
    limits: &Limits,
    settings: &HydrostaticSettings,
) -> EquilibriumResult {
    let t = draft.draft_m;
    let displacement = state.total_mass_t;
    let volume = Tonnes(displacement)
        .displaced_volume(settings.water_density_t_m3)
        .value();

    let kb = model
        .attribute_at(t, CurveAttribute::Kb)
        .unwrap_or(settings.box_kb_ratio * t.max(0.0));
    let i_t = model
        .attribute_at(t, CurveAttribute::TransverseInertia)
        .or_else(|| match (ship.length(), ship.breadth()) {
            (Some(l), Some(b)) => Some(waterplane_inertia_transverse(l, b)),
            _ => None,
        });
    if i_t.is_none() && displacement > EPS {
        log::warn!("no transverse waterplane inertia: BM_T taken as 0");
    }
    let bm_t = i_t.map(|i| metacentric_radius(i, volume)).unwrap_or(0.0);
    let km = kb + bm_t;

    let gm_raw = metacentric_height(km, state.kg_m);
    let gg = free_surface_correction(state.free_surface_moment_tm, displacement);
    let gm = limits.gm_policy.apply(gm_raw);
    let gm_effective = limits.gm_policy.apply(gm_raw - gg);

    let (aft, mid, fwd) = drafts_at_marks(t, trim.trim_m);
    let heel = heel_angle_deg(state.tcg_m, gm);

    let waterline = Waterline {
        draft_mean_m: t,
        draft_aft_m: aft,
        draft_fwd_m: fwd,
        trim_m: trim.trim_m,
        gm_effective_m: gm_effective,
    };

    log::debug!(
        "equilibrium: KB {:.3} BM_T {:.3} KM {:.3} KG {:.3} GM {:.3} GG' {:.3} GM_eff {:.3}",
        kb,
        bm_t,
        km,
        state.kg_m,
        gm,
        gg,
        gm_effective
    );

    EquilibriumResult {
        displacement_t: displacement,
        draft_mean_m: t,
        draft_out_of_table: draft.out_of_table,
        trim_m: trim.trim_m,
        trim_applicable: trim.applicable,
        draft_aft_m: aft,
        draft_mid_m: mid,
        draft_fwd_m: fwd,
        heel_deg: heel,
        kb_m: kb,
        bm_t_m: bm_t,
        bm_l_m: trim.bm_l_m,
        mct_1cm_tm: trim.mct_1cm_tm,
        km_m: km,
        kg_m: state.kg_m,
        gm_m: gm,
        free_surface_correction_m: gg,
        gm_effective_m: gm_effective,
        lcb_m: trim.lcb_m,
        lcg_m: trim.lcg_m,
        hydrostatic_source: draft.source,
        strength: strength::evaluate(state, ship.length(), &settings.strength),
        ancillary: ancillary::evaluate(ship, &waterline, settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{draft, trim};
    use crate::config::GmPolicy;
    use crate::hydrostatics::HullModel;

    struct Fixture {
        ship: ShipProfile,
        hull: HullModel,
        settings: HydrostaticSettings,
    }

    fn fixture() -> Fixture {
        let settings = HydrostaticSettings::default();
        let ship = ShipProfile::new("Test").with_dimensions(100.0, 18.0, 9.0, 6.0);
        let hull = HullModel::resolve(&ship, None, &settings).unwrap().unwrap();
        Fixture { ship, hull, settings }
    }

    fn run(f: &Fixture, state: &LoadingState, limits: &Limits) -> EquilibriumResult {
        let model = f.hull.as_model();
        let d = draft::solve(state.total_mass_t, Some(model)).unwrap();
        let t = trim::solve(state, model, d.draft_m, &f.ship, &f.settings);
        solve(state, model, &d, &t, &f.ship, limits, &f.settings)
    }

    fn state(kg: f64, tcg: f64, fsm: f64) -> LoadingState {
        LoadingState {
            total_mass_t: 5000.0,
            kg_m: kg,
            lcg_m: Some(50.0),
            lcg_norm: Some(0.5),
            tcg_m: tcg,
            free_surface_moment_tm: fsm,
            item_count: 1,
            lcg_unresolved: false,
        }
    }

    #[test]
    fn test_gm_identity() {
        let f = fixture();
        let r = run(&f, &state(6.0, 0.0, 500.0), &Limits::default());
        assert!((r.gm_m - (r.km_m - r.kg_m)).abs() < 1e-12);
        assert!(r.gm_effective_m <= r.gm_m);
        assert!((r.free_surface_correction_m - 0.1).abs() < 1e-12);
        assert!((r.gm_effective_m - (r.gm_m - 0.1)).abs() < 1e-12);
    }

    #[test]
    fn test_metacentre_from_table() {
        let f = fixture();
        let r = run(&f, &state(6.0, 0.0, 0.0), &Limits::default());
        let volume = 5000.0 / 1.025;
        assert!((r.kb_m - 0.4921 * r.draft_mean_m).abs() < 1e-9);
        assert!((r.bm_t_m - 48_600.0 / volume).abs() < 1e-9);
        assert_eq!(r.hydrostatic_source, HydrostaticSource::Formula);
    }

    #[test]
    fn test_gm_policy_applies_to_both() {
        let f = fixture();
        let heavy_top = state(40.0, 0.0, 500.0);

        let signed = run(&f, &heavy_top, &Limits::default());
        assert!(signed.gm_m < 0.0);
        assert!(signed.gm_effective_m < signed.gm_m);

        let limits = Limits {
            gm_policy: GmPolicy::ClampAtZero,
            ..Limits::default()
        };
        let clamped = run(&f, &heavy_top, &limits);
        assert_eq!(clamped.gm_m, 0.0);
        assert_eq!(clamped.gm_effective_m, 0.0);
    }

    #[test]
    fn test_heel_direction() {
        let f = fixture();
        let stbd = run(&f, &state(6.0, 0.2, 0.0), &Limits::default());
        let port = run(&f, &state(6.0, -0.2, 0.0), &Limits::default());
        assert!(stbd.heel_deg > 0.0);
        assert!((stbd.heel_deg + port.heel_deg).abs() < 1e-12);
    }

    #[test]
    fn test_heel_uses_solid_gm() {
        let f = fixture();
        let r = run(&f, &state(6.0, 0.2, 500.0), &Limits::default());
        assert!(r.free_surface_correction_m > 0.0);

        let expected = (0.2 / r.gm_m).atan().to_degrees();
        assert!((r.heel_deg - expected).abs() < 1e-12);
        let from_effective = (0.2 / r.gm_effective_m).atan().to_degrees();
        assert!((r.heel_deg - from_effective).abs() > 1e-9);
    }

    #[test]
    fn test_no_heel_without_positive_gm() {
        let f = fixture();
        let r = run(&f, &state(40.0, 0.5, 0.0), &Limits::default());
        assert!(r.gm_m < 0.0);
        assert_eq!(r.heel_deg, 0.0);
    }

    #[test]
    fn test_marks_and_strength_present() {
        let f = fixture();
        let r = run(&f, &state(6.0, 0.0, 0.0), &Limits::default());
        assert!(r.trim_applicable);
        assert!(r.trim_m.abs() < 1e-12);
        assert_eq!(r.draft_aft_m, r.draft_fwd_m);
        assert!(r.strength.is_some());
        assert!(r.ancillary.freeboard_m.is_some());
    }
}
