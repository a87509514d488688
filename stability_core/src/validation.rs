//! # Validation Engine
//!
//! Applies the operational [`Limits`] to a computed equilibrium and turns the
//! outcome into a calculation status plus an alarm list.
//!
//! ## Status
//!
//! - `FAILED` - at least one `Error` alarm
//! - `WARNING` - no errors, at least one `Warning` alarm
//! - `OK` - everything else
//!
//! A check that cannot run because a dimension is unknown is recorded as an
//! `Info` alarm with `applicable = false`. Info alarms never change status.
//!
//! ## Example
//!
//! ```rust
//! use stability_core::validation::{CalculationStatus, Severity};
//!
//! assert_eq!(serde_json::to_string(&CalculationStatus::Failed).unwrap(), "\"FAILED\"");
//! assert!(Severity::Error > Severity::Warning);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::EquilibriumResult;
use crate::config::Limits;
use crate::loading::{LoadingIssue, LoadingState};
use crate::ship::ShipProfile;
use crate::units::EPS;

/// Overall verdict of a loading condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalculationStatus {
    Ok,
    Warning,
    Failed,
}

impl CalculationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationStatus::Ok => "OK",
            CalculationStatus::Warning => "WARNING",
            CalculationStatus::Failed => "FAILED",
        }
    }
}

/// Alarm severity, ordered from least to most serious.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// One validation finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlarmRecord {
    pub severity: Severity,
    /// Stable machine code, e.g. `GM_LOW`
    pub code: String,
    /// Human-readable description
    pub message: String,
    /// Checked value, when there is one
    pub value: Option<f64>,
    /// Limit the value was checked against
    pub limit: Option<f64>,
    /// Distance to the limit; positive means on the safe side
    pub margin: Option<f64>,
    /// False when the check was skipped for missing data
    pub applicable: bool,
}

impl AlarmRecord {
    fn new(severity: Severity, code: &str, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: code.to_string(),
            message: message.into(),
            value: None,
            limit: None,
            margin: None,
            applicable: true,
        }
    }

    fn error(code: &str, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, message)
    }

    fn warning(code: &str, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, message)
    }

    fn not_applicable(code: &str, reason: impl Into<String>) -> Self {
        Self {
            applicable: false,
            ..Self::new(Severity::Info, code, reason)
        }
    }

    fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    fn measured(mut self, value: f64, limit: f64, margin: f64) -> Self {
        self.value = Some(value);
        self.limit = Some(limit);
        self.margin = Some(margin);
        self
    }
}

/// Status plus every alarm raised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub status: CalculationStatus,
    pub alarms: Vec<AlarmRecord>,
}

impl ValidationReport {
    fn from_alarms(alarms: Vec<AlarmRecord>) -> Self {
        let status = if alarms.iter().any(|a| a.severity == Severity::Error) {
            CalculationStatus::Failed
        } else if alarms.iter().any(|a| a.severity == Severity::Warning) {
            CalculationStatus::Warning
        } else {
            CalculationStatus::Ok
        };
        Self { status, alarms }
    }

    pub fn has_errors(&self) -> bool {
        self.alarms.iter().any(|a| a.severity == Severity::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.alarms.iter().any(|a| a.severity == Severity::Warning)
    }

    /// Alarms with the given code
    pub fn with_code<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a AlarmRecord> + 'a {
        self.alarms.iter().filter(move |a| a.code == code)
    }
}

// ============================================================================
// Checks
// ============================================================================

/// Validate an equilibrium against the limits.
///
/// `issues` are the loading problems found while resolving the manifest;
/// each one becomes a warning.
pub fn validate(
    result: &EquilibriumResult,
    state: &LoadingState,
    ship: &ShipProfile,
    limits: &Limits,
    issues: &[LoadingIssue],
) -> ValidationReport {
    let mut alarms = Vec::new();

    let loaded = result.displacement_t > EPS;
    if !loaded {
        alarms.push(AlarmRecord::warning(
            "ZERO_WEIGHT",
            "Zero displacement: nothing is loaded",
        ));
    }

    check_gm(result, limits, loaded, &mut alarms);
    check_trim(result, ship, limits, &mut alarms);
    check_draft(result, ship, limits, &mut alarms);
    check_strength(result, limits, loaded, &mut alarms);

    if result.draft_out_of_table {
        alarms.push(
            AlarmRecord::warning(
                "DRAFT_OUT_OF_TABLE",
                format!(
                    "Displacement {:.1} t is above the hydrostatic table; draft {:.3} m is extrapolated",
                    result.displacement_t, result.draft_mean_m
                ),
            )
            .with_value(result.draft_mean_m),
        );
    }

    if state.lcg_unresolved {
        alarms.push(AlarmRecord::warning(
            "LCG_UNRESOLVED",
            "LCG mixes fractions and meters with unknown length; trim not computed",
        ));
    }

    let lowest_mark = result.draft_aft_m.min(result.draft_fwd_m);
    if loaded && lowest_mark < 0.0 {
        alarms.push(
            AlarmRecord::warning(
                "KEEL_EMERGED",
                format!("Draft mark at {:.3} m: keel clears the water", lowest_mark),
            )
            .measured(lowest_mark, 0.0, lowest_mark),
        );
    }

    for issue in issues {
        alarms.push(issue_alarm(issue));
    }

    let report = ValidationReport::from_alarms(alarms);
    log::debug!(
        "validation: {} ({} alarms)",
        report.status.as_str(),
        report.alarms.len()
    );
    report
}

fn check_gm(result: &EquilibriumResult, limits: &Limits, loaded: bool, alarms: &mut Vec<AlarmRecord>) {
    if !loaded {
        alarms.push(AlarmRecord::not_applicable("GM_LOW", "GM check skipped: zero displacement"));
        return;
    }

    let gm = result.gm_effective_m;
    let marginal = limits.min_gm_m * limits.gm_warning_factor;
    if gm < limits.min_gm_m {
        alarms.push(
            AlarmRecord::error(
                "GM_LOW",
                format!(
                    "Effective GM {:.3} m below minimum {:.3} m. Condition unsafe.",
                    gm, limits.min_gm_m
                ),
            )
            .measured(gm, limits.min_gm_m, gm - limits.min_gm_m),
        );
    } else if gm < marginal {
        alarms.push(
            AlarmRecord::warning(
                "GM_MARGINAL",
                format!("Effective GM {:.3} m is marginal (below {:.3} m)", gm, marginal),
            )
            .measured(gm, marginal, gm - marginal),
        );
    }
}

fn check_trim(result: &EquilibriumResult, ship: &ShipProfile, limits: &Limits, alarms: &mut Vec<AlarmRecord>) {
    let Some(length) = ship.length() else {
        alarms.push(AlarmRecord::not_applicable(
            "TRIM_EXCESSIVE",
            "Trim check skipped: length overall unknown",
        ));
        return;
    };

    let max_trim = length * limits.max_trim_fraction;
    let trim = result.trim_m.abs();
    if trim > max_trim {
        alarms.push(
            AlarmRecord::error(
                "TRIM_EXCESSIVE",
                format!(
                    "Trim {:+.2} m exceeds limit {:.2} m ({:.1}% LOA)",
                    result.trim_m,
                    max_trim,
                    limits.max_trim_fraction * 100.0
                ),
            )
            .measured(trim, max_trim, max_trim - trim),
        );
    }
}

fn check_draft(result: &EquilibriumResult, ship: &ShipProfile, limits: &Limits, alarms: &mut Vec<AlarmRecord>) {
    let Some(design) = ship.design_draft() else {
        alarms.push(AlarmRecord::not_applicable(
            "DRAFT_OVER",
            "Draft check skipped: design draft unknown",
        ));
        return;
    };

    let max_draft = design * limits.max_draft_fraction;
    let draft = result.draft_mean_m;
    if draft > max_draft {
        alarms.push(
            AlarmRecord::error(
                "DRAFT_OVER",
                format!(
                    "Draft {:.2} m exceeds {:.0}% of design draft {:.2} m",
                    draft,
                    limits.max_draft_fraction * 100.0,
                    design
                ),
            )
            .measured(draft, max_draft, max_draft - draft),
        );
    }
}

fn check_strength(result: &EquilibriumResult, limits: &Limits, loaded: bool, alarms: &mut Vec<AlarmRecord>) {
    let indicator = match &result.strength {
        Some(ind) if loaded => ind,
        _ => {
            alarms.push(AlarmRecord::not_applicable(
                "BM_OVER",
                "Strength indicator skipped: length, LCG or displacement unknown",
            ));
            return;
        }
    };

    if indicator.bending_moment_pct > limits.bm_warning_pct {
        alarms.push(
            AlarmRecord::warning(
                "BM_OVER",
                format!(
                    "Still-water BM {:.0} t·m is {:.0}% of the indicative allowable. Verify strength.",
                    indicator.bending_moment_tm, indicator.bending_moment_pct
                ),
            )
            .measured(
                indicator.bending_moment_pct,
                limits.bm_warning_pct,
                limits.bm_warning_pct - indicator.bending_moment_pct,
            ),
        );
    }
    if indicator.shear_force_pct > limits.sf_warning_pct {
        alarms.push(
            AlarmRecord::warning(
                "SF_OVER",
                format!(
                    "Still-water SF {:.0} t is {:.0}% of the indicative allowable. Verify strength.",
                    indicator.shear_force_t, indicator.shear_force_pct
                ),
            )
            .measured(
                indicator.shear_force_pct,
                limits.sf_warning_pct,
                limits.sf_warning_pct - indicator.shear_force_pct,
            ),
        );
    }
}

fn issue_alarm(issue: &LoadingIssue) -> AlarmRecord {
    match issue {
        LoadingIssue::UnknownTank { tank_id } => AlarmRecord::warning(
            "TANK_UNKNOWN",
            format!("Fill given for unknown tank '{}'. Ignored in calculations.", tank_id),
        ),
        LoadingIssue::UnknownPen { pen_id } => AlarmRecord::warning(
            "PEN_UNKNOWN",
            format!("Load given for unknown pen '{}'. Ignored in calculations.", pen_id),
        ),
        LoadingIssue::InvalidItem { error } => {
            AlarmRecord::warning("INVALID_WEIGHT", format!("{}. Item excluded.", error))
        }
        LoadingIssue::PenOverCapacity {
            pen_id,
            head_count,
            capacity_head,
        } => AlarmRecord::warning(
            "PEN_OVER_CAPACITY",
            format!(
                "Pen '{}' holds {} head, rated for {}",
                pen_id, head_count, capacity_head
            ),
        )
        .measured(
            *head_count as f64,
            *capacity_head as f64,
            *capacity_head as f64 - *head_count as f64,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{AncillaryResult, StrengthIndicator};
    use crate::errors::StabilityError;
    use crate::hydrostatics::HydrostaticSource;

    fn ship() -> ShipProfile {
        ShipProfile::new("Test").with_dimensions(100.0, 18.0, 9.0, 6.0)
    }

    fn result(gm_eff: f64) -> EquilibriumResult {
        EquilibriumResult {
            displacement_t: 5000.0,
            draft_mean_m: 3.5,
            draft_out_of_table: false,
            trim_m: 0.0,
            trim_applicable: true,
            draft_aft_m: 3.5,
            draft_mid_m: 3.5,
            draft_fwd_m: 3.5,
            heel_deg: 0.0,
            kb_m: 1.7,
            bm_t_m: 10.0,
            bm_l_m: 300.0,
            mct_1cm_tm: 150.0,
            km_m: 11.7,
            kg_m: 11.7 - gm_eff,
            gm_m: gm_eff,
            free_surface_correction_m: 0.0,
            gm_effective_m: gm_eff,
            lcb_m: Some(50.0),
            lcg_m: Some(50.0),
            hydrostatic_source: HydrostaticSource::Formula,
            strength: None,
            ancillary: AncillaryResult::default(),
        }
    }

    fn state() -> LoadingState {
        LoadingState {
            total_mass_t: 5000.0,
            item_count: 1,
            ..Default::default()
        }
    }

    fn run(r: &EquilibriumResult, ship: &ShipProfile, limits: &Limits) -> ValidationReport {
        validate(r, &state(), ship, limits, &[])
    }

    fn active(report: &ValidationReport) -> Vec<&AlarmRecord> {
        report.alarms.iter().filter(|a| a.applicable).collect()
    }

    #[test]
    fn test_good_condition_is_ok() {
        let report = run(&result(1.0), &ship(), &Limits::default());
        assert_eq!(report.status, CalculationStatus::Ok);
        assert!(active(&report).is_empty());
    }

    #[test]
    fn test_gm_low_is_error_with_negative_margin() {
        let limits = Limits {
            min_gm_m: 5.0,
            ..Limits::default()
        };
        let report = run(&result(1.0), &ship(), &limits);
        assert_eq!(report.status, CalculationStatus::Failed);
        let errors: Vec<_> = report.alarms.iter().filter(|a| a.severity == Severity::Error).collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, "GM_LOW");
        assert!((errors[0].margin.unwrap() + 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_gm_marginal_is_warning() {
        // min 0.15, marginal below 0.225
        let report = run(&result(0.2), &ship(), &Limits::default());
        assert_eq!(report.status, CalculationStatus::Warning);
        assert_eq!(report.with_code("GM_MARGINAL").count(), 1);
        assert!(!report.has_errors());
        assert!(report.has_warnings());
    }

    #[test]
    fn test_trim_excessive() {
        let mut r = result(1.0);
        r.trim_m = -2.5;
        let report = run(&r, &ship(), &Limits::default());
        let alarm = report.with_code("TRIM_EXCESSIVE").next().unwrap();
        assert_eq!(alarm.severity, Severity::Error);
        assert!((alarm.limit.unwrap() - 2.0).abs() < 1e-12);
        assert!((alarm.margin.unwrap() + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_length_never_fails_trim() {
        let mut r = result(1.0);
        r.trim_m = 50.0;
        let no_length = ShipProfile::new("Test").with_dimensions(0.0, 18.0, 9.0, 6.0);
        let report = run(&r, &no_length, &Limits::default());
        assert_eq!(report.status, CalculationStatus::Ok);
        let alarm = report.with_code("TRIM_EXCESSIVE").next().unwrap();
        assert_eq!(alarm.severity, Severity::Info);
        assert!(!alarm.applicable);
    }

    #[test]
    fn test_draft_over() {
        let mut r = result(1.0);
        r.draft_mean_m = 6.5;
        let report = run(&r, &ship(), &Limits::default());
        assert_eq!(report.status, CalculationStatus::Failed);
        assert_eq!(report.with_code("DRAFT_OVER").count(), 1);

        let no_design = ShipProfile::new("Test").with_dimensions(100.0, 18.0, 9.0, 0.0);
        let report = run(&r, &no_design, &Limits::default());
        assert_eq!(report.status, CalculationStatus::Ok);
    }

    #[test]
    fn test_zero_weight_is_warning_only() {
        let mut r = result(0.0);
        r.displacement_t = 0.0;
        r.draft_mean_m = 0.0;
        r.draft_aft_m = 0.0;
        r.draft_fwd_m = 0.0;
        let report = validate(&r, &LoadingState::default(), &ship(), &Limits::default(), &[]);
        assert_eq!(report.status, CalculationStatus::Warning);
        assert_eq!(report.with_code("ZERO_WEIGHT").count(), 1);
        assert!(!report.has_errors());
    }

    #[test]
    fn test_strength_warnings() {
        let mut r = result(1.0);
        r.strength = Some(StrengthIndicator {
            eccentricity: 0.45,
            bending_moment_tm: 56_250.0,
            signed_bending_moment_tm: 56_250.0,
            shear_force_t: 450.0,
            design_bending_moment_tm: 50_000.0,
            design_shear_force_t: 500.0,
            bending_moment_pct: 112.5,
            shear_force_pct: 90.0,
            hogging: true,
        });
        let report = run(&r, &ship(), &Limits::default());
        assert_eq!(report.status, CalculationStatus::Warning);
        assert_eq!(report.with_code("BM_OVER").count(), 1);
        assert_eq!(report.with_code("SF_OVER").count(), 0);
    }

    #[test]
    fn test_loading_issues_become_warnings() {
        let issues = vec![
            LoadingIssue::UnknownTank { tank_id: "WB9".into() },
            LoadingIssue::UnknownPen { pen_id: "P9".into() },
            LoadingIssue::InvalidItem {
                error: StabilityError::invalid_weight_item("FW1", "fill fraction 1.2 outside [0, 1]"),
            },
            LoadingIssue::PenOverCapacity {
                pen_id: "P1".into(),
                head_count: 120,
                capacity_head: 100,
            },
        ];
        let report = validate(&result(1.0), &state(), &ship(), &Limits::default(), &issues);
        assert_eq!(report.status, CalculationStatus::Warning);
        for code in ["TANK_UNKNOWN", "PEN_UNKNOWN", "INVALID_WEIGHT", "PEN_OVER_CAPACITY"] {
            assert_eq!(report.with_code(code).count(), 1, "{}", code);
        }
        let pen = report.with_code("PEN_OVER_CAPACITY").next().unwrap();
        assert!((pen.margin.unwrap() + 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_table_and_emerged_keel() {
        let mut r = result(1.0);
        r.draft_out_of_table = true;
        r.trim_m = 1.0;
        r.draft_mean_m = 0.3;
        r.draft_aft_m = 0.8;
        r.draft_fwd_m = -0.2;
        let report = run(&r, &ship(), &Limits::default());
        assert_eq!(report.with_code("DRAFT_OUT_OF_TABLE").count(), 1);
        assert_eq!(report.with_code("KEEL_EMERGED").count(), 1);
        assert_eq!(report.status, CalculationStatus::Warning);
    }

    #[test]
    fn test_lcg_unresolved_warning() {
        let unresolved = LoadingState {
            lcg_unresolved: true,
            ..state()
        };
        let report = validate(&result(1.0), &unresolved, &ship(), &Limits::default(), &[]);
        assert_eq!(report.with_code("LCG_UNRESOLVED").count(), 1);
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&CalculationStatus::Ok).unwrap();
        assert_eq!(json, "\"OK\"");
        let back: CalculationStatus = serde_json::from_str("\"WARNING\"").unwrap();
        assert_eq!(back, CalculationStatus::Warning);
    }
}
