//! # Draft Solver
//!
//! Finds the mean draft at which the hull displaces the total mass aboard.
//! The hydrostatic model does the work; this stage only guards the inputs
//! and reports whether the answer came from inside the table.
//!
//! ## Example
//!
//! ```rust
//! use stability_core::calculations::draft;
//! use stability_core::config::HydrostaticSettings;
//! use stability_core::hydrostatics::HullModel;
//! use stability_core::ship::ShipProfile;
//!
//! let ship = ShipProfile::new("MV Example").with_dimensions(100.0, 18.0, 9.0, 6.0);
//! let hull = HullModel::resolve(&ship, None, &HydrostaticSettings::default()).unwrap().unwrap();
//!
//! let solution = draft::solve(250.0, Some(hull.as_model())).unwrap();
//! assert!((solution.draft_m - 0.1737).abs() < 1e-3);
//! assert!(!solution.out_of_table);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcResult, StabilityError};
use crate::hydrostatics::{HydrostaticModel, HydrostaticSource};
use crate::units::EPS;

/// Mean draft for a displacement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DraftSolution {
    /// Displacement the draft was solved for (t)
    pub displacement_t: f64,
    /// Mean draft (m)
    pub draft_m: f64,
    /// Displacement exceeded the hydrostatic table and was extrapolated
    pub out_of_table: bool,
    /// Provider that answered
    pub source: HydrostaticSource,
}

/// Solve the mean draft for `total_mass_t`.
///
/// Fails with `UnsolvableDraft` when there is no hydrostatic model, and with
/// `InvalidInput` when the mass is negative or not finite. Zero mass floats
/// at zero draft. The returned draft is not clamped to any sanity range.
pub fn solve(total_mass_t: f64, model: Option<&dyn HydrostaticModel>) -> CalcResult<DraftSolution> {
    let Some(model) = model else {
        return Err(StabilityError::unsolvable_draft(total_mass_t, "no hydrostatic data"));
    };
    if !total_mass_t.is_finite() || total_mass_t < 0.0 {
        return Err(StabilityError::invalid_input(
            "total_mass_t",
            total_mass_t.to_string(),
            "must be finite and non-negative",
        ));
    }

    if total_mass_t <= EPS {
        return Ok(DraftSolution {
            displacement_t: 0.0,
            draft_m: 0.0,
            out_of_table: false,
            source: model.source(),
        });
    }

    let lookup = model.draft_at(total_mass_t);
    if lookup.out_of_table {
        log::warn!(
            "displacement {:.1} t is above the hydrostatic table, draft {:.3} m extrapolated",
            total_mass_t,
            lookup.draft_m
        );
    }
    log::debug!("draft solved: {:.1} t -> {:.4} m", total_mass_t, lookup.draft_m);

    Ok(DraftSolution {
        displacement_t: total_mass_t,
        draft_m: lookup.draft_m,
        out_of_table: lookup.out_of_table,
        source: model.source(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hydrostatics::{CurveSample, HydrostaticCurveSet};

    fn table() -> HydrostaticCurveSet {
        HydrostaticCurveSet::from_external(vec![
            CurveSample::new(0.0, 0.0),
            CurveSample::new(2.0, 2000.0),
            CurveSample::new(4.0, 4400.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_no_model_is_unsolvable() {
        let err = solve(100.0, None).unwrap_err();
        assert_eq!(err.error_code(), "UNSOLVABLE_DRAFT");
    }

    #[test]
    fn test_bad_mass_is_invalid_input() {
        let t = table();
        for mass in [-1.0, f64::NAN, f64::INFINITY] {
            let err = solve(mass, Some(&t)).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_INPUT", "mass {}", mass);
        }
    }

    #[test]
    fn test_zero_mass_floats_at_zero() {
        let t = table();
        let s = solve(0.0, Some(&t)).unwrap();
        assert_eq!(s.draft_m, 0.0);
        assert!(!s.out_of_table);
    }

    #[test]
    fn test_interpolated_and_extrapolated() {
        let t = table();
        let inside = solve(3200.0, Some(&t)).unwrap();
        assert!((inside.draft_m - 3.0).abs() < 1e-12);
        assert!(!inside.out_of_table);
        assert_eq!(inside.source, HydrostaticSource::External);

        let above = solve(5600.0, Some(&t)).unwrap();
        assert!(above.out_of_table);
        assert!((above.draft_m - 5.0).abs() < 1e-12);
    }
}
