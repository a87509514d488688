//! # Hydrostatic Models
//!
//! Everything downstream of the mass summation asks the hull three questions:
//! how much does it displace at a draft, at what draft does it carry a
//! displacement, and what are its centre of buoyancy and waterplane inertias
//! at a draft. [`HydrostaticModel`] is that contract; two providers answer it:
//!
//! - [`HydrostaticCurveSet`] - a draft-indexed table, either supplied by the
//!   yard (external) or generated from the principal dimensions (formula)
//! - [`BoxHull`] - closed-form box hull, used when no table can be built
//!
//! [`HullModel::resolve`] picks the provider for a ship: external table, then
//! formula table, then box hull.
//!
//! ## Example
//!
//! ```rust
//! use stability_core::config::HydrostaticSettings;
//! use stability_core::hydrostatics::{HullModel, HydrostaticModel, HydrostaticSource};
//! use stability_core::ship::ShipProfile;
//!
//! let ship = ShipProfile::new("MV Example").with_dimensions(100.0, 18.0, 9.0, 6.0);
//! let hull = HullModel::resolve(&ship, None, &HydrostaticSettings::default())
//!     .unwrap()
//!     .expect("dimensions are known");
//!
//! assert_eq!(hull.source(), HydrostaticSource::Formula);
//! let disp = hull.displacement_at(4.0);
//! assert!((hull.draft_at(disp).draft_m - 4.0).abs() < 1e-9);
//! ```

pub mod box_hull;
pub mod curves;

pub use box_hull::BoxHull;
pub use curves::{CurveSample, HydrostaticCurveSet};

use serde::{Deserialize, Serialize};

use crate::config::HydrostaticSettings;
use crate::equations::registry::Equation;
use crate::errors::CalcResult;
use crate::ship::ShipProfile;

// ============================================================================
// Query Contract
// ============================================================================

/// Draft-dependent quantities a model can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveAttribute {
    /// Displacement (t)
    Displacement,
    /// Centre of buoyancy above keel (m)
    Kb,
    /// Longitudinal centre of buoyancy as a fraction of length from AP
    LcbFraction,
    /// Transverse waterplane second moment (m⁴)
    TransverseInertia,
    /// Longitudinal waterplane second moment (m⁴)
    LongitudinalInertia,
}

/// Where the hydrostatic data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HydrostaticSource {
    /// Yard-supplied table
    External,
    /// Table generated from principal dimensions
    Formula,
    /// Closed-form box hull
    BoxHull,
}

/// Result of an inverse (displacement → draft) lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DraftLookup {
    /// Mean draft (m)
    pub draft_m: f64,
    /// The displacement lies above the top of the table and was extrapolated
    pub out_of_table: bool,
}

/// Read-only hydrostatic queries.
pub trait HydrostaticModel: Send + Sync {
    /// Displacement (t) at a mean draft
    fn displacement_at(&self, draft_m: f64) -> f64;

    /// Mean draft carrying a displacement
    fn draft_at(&self, displacement_t: f64) -> DraftLookup;

    /// A draft-dependent attribute; `None` when the model has no data for it
    fn attribute_at(&self, draft_m: f64, attribute: CurveAttribute) -> Option<f64>;

    /// Provenance of the data
    fn source(&self) -> HydrostaticSource;

    /// Equations behind the model's answers, for the report trace
    fn equations(&self) -> Vec<Equation>;
}

// ============================================================================
// Provider Selection
// ============================================================================

/// The hydrostatic provider chosen for a ship.
#[derive(Debug, Clone)]
pub enum HullModel {
    Table(HydrostaticCurveSet),
    Box(BoxHull),
}

impl HullModel {
    /// Choose a provider: the external table if given, else a formula table
    /// (needs length, breadth and design draft), else a box hull (needs
    /// length and breadth). `Ok(None)` means there is no hull data at all.
    ///
    /// Fails on an invalid block coefficient.
    pub fn resolve(
        ship: &ShipProfile,
        external: Option<&HydrostaticCurveSet>,
        settings: &HydrostaticSettings,
    ) -> CalcResult<Option<HullModel>> {
        if let Some(table) = external {
            log::debug!("using external hydrostatic table ({} samples)", table.len());
            return Ok(Some(HullModel::Table(table.clone())));
        }

        if ship.length().is_some() && ship.breadth().is_some() {
            if ship.design_draft().is_some() {
                let table = HydrostaticCurveSet::build_from_dimensions(ship, settings)?;
                log::debug!("generated formula hydrostatic table ({} samples)", table.len());
                return Ok(Some(HullModel::Table(table)));
            }
            log::warn!("design draft unknown, falling back to box hull");
            return Ok(Some(HullModel::Box(BoxHull::from_ship(ship, settings)?)));
        }

        log::warn!("no hull data: length/breadth unknown and no external table");
        Ok(None)
    }

    /// The provider as a trait object
    pub fn as_model(&self) -> &dyn HydrostaticModel {
        match self {
            HullModel::Table(table) => table as &dyn HydrostaticModel,
            HullModel::Box(hull) => hull as &dyn HydrostaticModel,
        }
    }
}

impl HydrostaticModel for HullModel {
    fn displacement_at(&self, draft_m: f64) -> f64 {
        self.as_model().displacement_at(draft_m)
    }

    fn draft_at(&self, displacement_t: f64) -> DraftLookup {
        self.as_model().draft_at(displacement_t)
    }

    fn attribute_at(&self, draft_m: f64, attribute: CurveAttribute) -> Option<f64> {
        self.as_model().attribute_at(draft_m, attribute)
    }

    fn source(&self) -> HydrostaticSource {
        self.as_model().source()
    }

    fn equations(&self) -> Vec<Equation> {
        self.as_model().equations()
    }
}

/// Validate a block coefficient: finite and in (0, 1].
pub(crate) fn checked_block_coefficient(ship: &ShipProfile, settings: &HydrostaticSettings) -> CalcResult<f64> {
    let cb = ship.block_coefficient_or(settings.default_block_coefficient);
    if !cb.is_finite() || cb <= 0.0 || cb > 1.0 {
        return Err(crate::errors::StabilityError::invalid_input(
            "block_coefficient",
            cb.to_string(),
            "must be in (0, 1]",
        ));
    }
    Ok(cb)
}
