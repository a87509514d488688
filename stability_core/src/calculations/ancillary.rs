//! Operational geometry at the solved waterline: propeller immersion,
//! bridge visibility, air draft, freeboard and natural roll period.
//!
//! Each value is `None` when the dimensions it depends on are unknown.

use serde::{Deserialize, Serialize};

use crate::config::HydrostaticSettings;
use crate::equations::stability::{
    air_draft_m, freeboard, propeller_immersion_pct, roll_period_s, visibility_m,
};
use crate::ship::ShipProfile;

/// Waterline geometry the ancillary values are computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waterline {
    pub draft_mean_m: f64,
    pub draft_aft_m: f64,
    pub draft_fwd_m: f64,
    pub trim_m: f64,
    /// Effective GM after free-surface correction
    pub gm_effective_m: f64,
}

/// Ancillary values; `None` means not computable for this ship.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AncillaryResult {
    /// Propeller immersion (% of diameter)
    pub prop_immersion_pct: Option<f64>,
    /// Bridge visibility to the water ahead (m)
    pub visibility_m: Option<f64>,
    /// Waterline to highest point (m)
    pub air_draft_m: Option<f64>,
    /// Freeboard at the lowest deck point (m)
    pub freeboard_m: Option<f64>,
    /// Natural roll period (s); `None` also when GM_eff ≤ 0
    pub roll_period_s: Option<f64>,
}

/// Evaluate the ancillary geometry at a waterline.
pub fn evaluate(ship: &ShipProfile, wl: &Waterline, settings: &HydrostaticSettings) -> AncillaryResult {
    let prop_immersion_pct = match (ship.prop_centre_m(), ship.prop_diameter_m()) {
        (Some(centre), Some(diameter)) => Some(propeller_immersion_pct(wl.draft_aft_m, centre, diameter)),
        _ => None,
    };

    let visibility = match (ship.length(), ship.bridge_from_ap_m(), ship.bridge_height_m()) {
        (Some(l), Some(x), Some(h)) => Some(visibility_m(l, x, h, wl.draft_fwd_m, wl.trim_m)),
        _ => None,
    };

    AncillaryResult {
        prop_immersion_pct,
        visibility_m: visibility,
        air_draft_m: ship.mast_height_m().map(|h| air_draft_m(h, wl.draft_mean_m)),
        freeboard_m: ship.depth().map(|d| freeboard(d, wl.draft_mean_m, wl.trim_m)),
        roll_period_s: ship.breadth().and_then(|b| {
            roll_period_s(settings.roll_gyration_factor, b, wl.gm_effective_m, settings.gravity_m_s2)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn waterline() -> Waterline {
        Waterline {
            draft_mean_m: 6.0,
            draft_aft_m: 6.0,
            draft_fwd_m: 6.0,
            trim_m: 0.0,
            gm_effective_m: 1.0,
        }
    }

    #[test]
    fn test_full_ship() {
        let ship = ShipProfile::new("Test").with_dimensions(100.0, 18.0, 9.0, 6.0);
        let r = evaluate(&ship, &waterline(), &HydrostaticSettings::default());
        // Propeller centre 0.45 m, diameter 3 m: fully immersed at 6 m aft
        assert_eq!(r.prop_immersion_pct, Some(100.0));
        assert!((r.visibility_m.unwrap() - 15.0).abs() < 1e-9);
        assert!((r.air_draft_m.unwrap() - 10.2).abs() < 1e-9);
        assert!((r.freeboard_m.unwrap() - 3.0).abs() < 1e-12);
        let expected = 2.0 * std::f64::consts::PI * 0.45 * 18.0 / 9.81_f64.sqrt();
        assert!((r.roll_period_s.unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_dimensions() {
        let ship = ShipProfile::new("Blank");
        let r = evaluate(&ship, &waterline(), &HydrostaticSettings::default());
        assert_eq!(r, AncillaryResult::default());
    }

    #[test]
    fn test_negative_gm_has_no_period() {
        let ship = ShipProfile::new("Test").with_dimensions(100.0, 18.0, 9.0, 6.0);
        let wl = Waterline {
            gm_effective_m: -0.2,
            ..waterline()
        };
        let r = evaluate(&ship, &wl, &HydrostaticSettings::default());
        assert!(r.roll_period_s.is_none());
        assert!(r.freeboard_m.is_some());
    }
}
