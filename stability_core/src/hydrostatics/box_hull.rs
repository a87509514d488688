//! Closed-form box hull, used when no hydrostatic table can be built.

use serde::{Deserialize, Serialize};

use super::{checked_block_coefficient, CurveAttribute, DraftLookup, HydrostaticModel, HydrostaticSource};
use crate::config::HydrostaticSettings;
use crate::equations::hydrostatic::{
    box_displacement, box_draft, waterplane_inertia_longitudinal, waterplane_inertia_transverse,
};
use crate::equations::registry::Equation;
use crate::errors::{CalcResult, StabilityError};
use crate::ship::ShipProfile;

/// Box-form hull reduced by a block coefficient.
///
/// Displacement is linear in draft with no upper bound, so a lookup is never
/// out of table. KB is a fixed fraction of draft and LCB sits amidships.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxHull {
    pub length_m: f64,
    pub breadth_m: f64,
    pub block_coefficient: f64,
    pub water_density_t_m3: f64,
    /// KB / T
    pub kb_ratio: f64,
}

impl BoxHull {
    /// Build from a ship with known length and breadth.
    pub fn from_ship(ship: &ShipProfile, settings: &HydrostaticSettings) -> CalcResult<Self> {
        let length_m = ship
            .length()
            .ok_or_else(|| StabilityError::missing_field("length_overall_m"))?;
        let breadth_m = ship.breadth().ok_or_else(|| StabilityError::missing_field("breadth_m"))?;
        Ok(Self {
            length_m,
            breadth_m,
            block_coefficient: checked_block_coefficient(ship, settings)?,
            water_density_t_m3: settings.water_density_t_m3,
            kb_ratio: settings.box_kb_ratio,
        })
    }
}

impl HydrostaticModel for BoxHull {
    fn displacement_at(&self, draft_m: f64) -> f64 {
        box_displacement(
            self.length_m,
            self.breadth_m,
            draft_m.max(0.0),
            self.block_coefficient,
            self.water_density_t_m3,
        )
    }

    fn draft_at(&self, displacement_t: f64) -> DraftLookup {
        let draft = box_draft(
            displacement_t,
            self.length_m,
            self.breadth_m,
            self.block_coefficient,
            self.water_density_t_m3,
        );
        DraftLookup {
            draft_m: draft.max(0.0),
            out_of_table: false,
        }
    }

    fn attribute_at(&self, draft_m: f64, attribute: CurveAttribute) -> Option<f64> {
        let value = match attribute {
            CurveAttribute::Displacement => self.displacement_at(draft_m),
            CurveAttribute::Kb => self.kb_ratio * draft_m.max(0.0),
            CurveAttribute::LcbFraction => 0.5,
            CurveAttribute::TransverseInertia => waterplane_inertia_transverse(self.length_m, self.breadth_m),
            CurveAttribute::LongitudinalInertia => waterplane_inertia_longitudinal(self.length_m, self.breadth_m),
        };
        Some(value)
    }

    fn source(&self) -> HydrostaticSource {
        HydrostaticSource::BoxHull
    }

    fn equations(&self) -> Vec<Equation> {
        vec![
            Equation::BoxDraft,
            Equation::KbBoxRatio,
            Equation::WaterplaneInertiaTransverse,
            Equation::WaterplaneInertiaLongitudinal,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hull() -> BoxHull {
        let ship = ShipProfile::new("Box").with_dimensions(100.0, 18.0, 9.0, 0.0);
        BoxHull::from_ship(&ship, &HydrostaticSettings::default()).unwrap()
    }

    #[test]
    fn test_reference_draft() {
        let lookup = hull().draft_at(250.0);
        assert!((lookup.draft_m - 250.0 / (100.0 * 18.0 * 0.78 * 1.025)).abs() < 1e-12);
        assert!(!lookup.out_of_table);
    }

    #[test]
    fn test_round_trip() {
        let h = hull();
        for &t in &[0.0, 0.5, 6.0, 12.0] {
            assert!((h.draft_at(h.displacement_at(t)).draft_m - t).abs() < 1e-9);
        }
    }

    #[test]
    fn test_attributes() {
        let h = hull();
        assert!((h.attribute_at(4.0, CurveAttribute::Kb).unwrap() - 2.12).abs() < 1e-12);
        assert_eq!(h.attribute_at(4.0, CurveAttribute::LcbFraction), Some(0.5));
        assert!((h.attribute_at(4.0, CurveAttribute::TransverseInertia).unwrap() - 48_600.0).abs() < 1e-6);
    }

    #[test]
    fn test_needs_length_and_breadth() {
        let ship = ShipProfile::new("Blank").with_dimensions(0.0, 18.0, 9.0, 0.0);
        let err = BoxHull::from_ship(&ship, &HydrostaticSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_FIELD");
    }
}
