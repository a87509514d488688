//! # Condition Pipeline
//!
//! Runs every stage on one immutable input snapshot and returns one
//! immutable report:
//!
//! ```text
//! ConditionInput
//! ├── resolve     -> manifest (weight items + loading issues)
//! ├── aggregate   -> LoadingState
//! ├── draft       -> DraftSolution
//! ├── trim        -> TrimSolution
//! ├── stability   -> EquilibriumResult
//! ├── validate    -> status + alarms
//! └── criteria    -> CriteriaEvaluation
//!     = ConditionReport
//! ```
//!
//! Only structurally invalid input aborts the run: no hull data at all, a
//! malformed curve table, an invalid block coefficient or water density. A
//! FAILED status is still a fully computed report.
//!
//! ## Example
//!
//! ```rust
//! use stability_core::loading::{LongitudinalPosition, TankFill};
//! use stability_core::pipeline::{compute_condition, ConditionInput};
//! use stability_core::ship::{ShipProfile, TankCategory, TankDefinition};
//! use stability_core::validation::CalculationStatus;
//!
//! let ship = ShipProfile::new("MV Example")
//!     .with_dimensions(100.0, 18.0, 9.0, 6.0)
//!     .with_block_coefficient(0.78)
//!     .with_tank(TankDefinition::new("FW1", "Fresh Water", TankCategory::FreshWater, 500.0, 1.0)
//!         .at(LongitudinalPosition::Fraction(0.5), 5.0, 0.0));
//!
//! let input = ConditionInput::new("Departure", ship).with_fill(TankFill::new("FW1", 0.5));
//! let report = compute_condition(&input).unwrap();
//!
//! assert!((report.equilibrium.displacement_t - 250.0).abs() < 1e-9);
//! assert_ne!(report.validation.status, CalculationStatus::Failed);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{draft, stability, trim, EquilibriumResult};
use crate::config::{HydrostaticSettings, Limits};
use crate::criteria::{self, CriteriaEvaluation};
use crate::equations::registry::{Equation, EquationTracker, EquationUsage};
use crate::errors::{CalcResult, StabilityError};
use crate::hydrostatics::{HullModel, HydrostaticCurveSet, HydrostaticModel};
use crate::loading::{self, FixedWeight, LoadingState, PenLoad, TankFill, WeightItem};
use crate::ship::ShipProfile;
use crate::units::EPS;
use crate::validation::{self, ValidationReport};

/// Current schema version for condition files and reports
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Fixed notice carried by every report
pub const DISCLAIMER: &str = "Indicative results for loading guidance only. \
Not suitable for classification-society submission or approval.";

fn default_schema_version() -> String {
    SCHEMA_VERSION.to_string()
}

// ============================================================================
// Input
// ============================================================================

/// Everything needed to compute one loading condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionInput {
    /// Schema version the input was written with
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Condition name, e.g. "Departure, full load"
    pub name: String,

    pub ship: ShipProfile,

    #[serde(default)]
    pub fills: Vec<TankFill>,

    #[serde(default)]
    pub pens: Vec<PenLoad>,

    #[serde(default)]
    pub fixed_weights: Vec<FixedWeight>,

    /// Yard hydrostatic table; formula curves are generated when absent
    #[serde(default)]
    pub hydrostatics: Option<HydrostaticCurveSet>,

    #[serde(default)]
    pub limits: Limits,

    #[serde(default)]
    pub settings: HydrostaticSettings,
}

impl ConditionInput {
    /// New condition with default limits and settings
    pub fn new(name: impl Into<String>, ship: ShipProfile) -> Self {
        Self {
            schema_version: default_schema_version(),
            name: name.into(),
            ship,
            fills: Vec::new(),
            pens: Vec::new(),
            fixed_weights: Vec::new(),
            hydrostatics: None,
            limits: Limits::default(),
            settings: HydrostaticSettings::default(),
        }
    }

    pub fn with_fill(mut self, fill: TankFill) -> Self {
        self.fills.push(fill);
        self
    }

    pub fn with_pen_load(mut self, load: PenLoad) -> Self {
        self.pens.push(load);
        self
    }

    pub fn with_fixed_weight(mut self, weight: FixedWeight) -> Self {
        self.fixed_weights.push(weight);
        self
    }

    pub fn with_hydrostatics(mut self, curves: HydrostaticCurveSet) -> Self {
        self.hydrostatics = Some(curves);
        self
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }
}

// ============================================================================
// Report
// ============================================================================

/// Complete, self-describing result of one condition run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionReport {
    pub schema_version: String,
    /// Unique id of this run
    pub run_id: Uuid,
    pub computed_at: DateTime<Utc>,
    pub condition_name: String,
    pub ship_name: String,
    /// Weight items that entered the sums
    pub manifest: Vec<WeightItem>,
    pub loading: LoadingState,
    pub equilibrium: EquilibriumResult,
    /// Status and alarms
    #[serde(flatten)]
    pub validation: ValidationReport,
    pub criteria: CriteriaEvaluation,
    /// e.g. "Criteria: 9 passed, 0 failed, 1 N/A"
    pub criteria_summary: String,
    /// Every relation applied, in order, with the stage that applied it
    pub equations_used: Vec<EquationUsage>,
    pub disclaimer: String,
}

impl ConditionReport {
    /// Distinct equations applied, in first-use order
    pub fn unique_equations(&self) -> Vec<Equation> {
        let mut seen = std::collections::HashSet::new();
        self.equations_used
            .iter()
            .filter(|u| seen.insert(u.equation))
            .map(|u| u.equation)
            .collect()
    }
}

// ============================================================================
// Pipeline
// ============================================================================

fn check_settings(settings: &HydrostaticSettings) -> CalcResult<()> {
    let rho = settings.water_density_t_m3;
    if !rho.is_finite() || rho <= EPS {
        return Err(StabilityError::invalid_input(
            "water_density_t_m3",
            rho.to_string(),
            "must be positive and finite",
        ));
    }
    Ok(())
}

/// Compute a loading condition end to end.
pub fn compute_condition(input: &ConditionInput) -> CalcResult<ConditionReport> {
    let ship = &input.ship;
    let limits = &input.limits;
    let settings = &input.settings;
    log::info!("computing condition '{}' for '{}'", input.name, ship.name);

    check_settings(settings)?;
    let hull = HullModel::resolve(ship, input.hydrostatics.as_ref(), settings)?
        .ok_or_else(|| StabilityError::missing_field("length_overall_m and breadth_m, or hydrostatics"))?;
    let model = hull.as_model();

    let mut tracker = EquationTracker::new();

    // Manifest and mass summation
    let manifest = loading::resolve(ship, &input.fills, &input.pens, &input.fixed_weights, limits);
    let state = loading::aggregate(&manifest.items, ship.length());
    tracker.record(Equation::CentreOfGravity, "Mass aggregation");
    log::debug!(
        "aggregated {} items: {:.1} t, KG {:.3} m, {} issues",
        state.item_count,
        state.total_mass_t,
        state.kg_m,
        manifest.issues.len()
    );

    // Draft
    let draft = draft::solve(state.total_mass_t, Some(model))?;
    for eq in model.equations() {
        tracker.record(eq, "Draft");
    }

    // Trim
    let trim = trim::solve(&state, model, draft.draft_m, ship, settings);
    if trim.applicable {
        tracker.record(Equation::MetacentricRadius, "Trim");
        tracker.record(Equation::MomentToChangeTrim, "Trim");
        tracker.record(Equation::TrimFromLever, "Trim");
    }

    // Equilibrium
    let equilibrium = stability::solve(&state, model, &draft, &trim, ship, limits, settings);
    record_equilibrium(&mut tracker, &equilibrium, &state);

    // Verdicts
    let validation = validation::validate(&equilibrium, &state, ship, limits, &manifest.issues);
    let criteria = criteria::evaluate(&equilibrium, ship, limits);
    let criteria_summary = criteria.summary_line();

    log::info!(
        "condition '{}': {} ({} alarms), {}",
        input.name,
        validation.status.as_str(),
        validation.alarms.iter().filter(|a| a.applicable).count(),
        criteria_summary
    );

    Ok(ConditionReport {
        schema_version: SCHEMA_VERSION.to_string(),
        run_id: Uuid::new_v4(),
        computed_at: Utc::now(),
        condition_name: input.name.clone(),
        ship_name: ship.name.clone(),
        manifest: manifest.items,
        loading: state,
        equilibrium,
        validation,
        criteria,
        criteria_summary,
        equations_used: tracker.usages().to_vec(),
        disclaimer: DISCLAIMER.to_string(),
    })
}

fn record_equilibrium(tracker: &mut EquationTracker, result: &EquilibriumResult, state: &LoadingState) {
    const STAGE: &str = "Equilibrium";
    tracker.record(Equation::MetacentricRadius, STAGE);
    tracker.record(Equation::MetacentricHeight, STAGE);
    if state.free_surface_moment_tm > 0.0 {
        tracker.record(Equation::FreeSurfaceCorrection, STAGE);
    }
    tracker.record(Equation::DraftsAtMarks, STAGE);
    tracker.record(Equation::HeelAngle, STAGE);

    if result.strength.is_some() {
        tracker.record(Equation::StillWaterBendingMoment, "Strength");
        tracker.record(Equation::StillWaterShearForce, "Strength");
    }

    let anc = &result.ancillary;
    let ancillary = [
        (anc.freeboard_m, Equation::Freeboard),
        (anc.prop_immersion_pct, Equation::PropellerImmersion),
        (anc.visibility_m, Equation::Visibility),
        (anc.air_draft_m, Equation::AirDraft),
        (anc.roll_period_s, Equation::RollPeriod),
    ];
    for (value, eq) in ancillary {
        if value.is_some() {
            tracker.record(eq, "Ancillary");
        }
    }
}
