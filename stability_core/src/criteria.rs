//! # Criteria Engine
//!
//! Evaluates a computed equilibrium against three rule sets:
//!
//! | Rule set | Codes | Reference |
//! |----------|-------|-----------|
//! | General | `IMO_GM`, `IMO_TRIM`, `IMO_DRAFT`, `IMO_HEEL` | IMO IS Code A.749(18) |
//! | Livestock | `LIV_GM`, `LIV_ROLL`, `LIV_FREEBOARD` | AMSA MO43 |
//! | Ancillary | `PROP_IMM`, `VISIBILITY`, `AIR_DRAFT` | Operational / SOLAS |
//!
//! Every criterion is either an `AtLeast` or an `AtMost` comparison. The
//! margin is always signed so that a positive margin passes:
//!
//! ```text
//! AtLeast: margin = attained - limit
//! AtMost:  margin = limit - attained
//! ```
//!
//! A criterion whose inputs are unknown (missing dimension, zero
//! displacement) is `NotApplicable`, never `Fail`. The order of results is
//! for presentation only.
//!
//! ## Example
//!
//! ```rust
//! use stability_core::criteria::Comparison;
//!
//! assert!((Comparison::AtLeast.margin(0.30, 0.15) - 0.15).abs() < 1e-12);
//! assert!((Comparison::AtMost.margin(2.5, 2.0) + 0.5).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::EquilibriumResult;
use crate::config::Limits;
use crate::ship::ShipProfile;
use crate::units::EPS;

/// Group a criterion belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleSet {
    /// IMO general intact stability
    General,
    /// AMSA MO43 livestock carriage
    Livestock,
    /// Operational checks on the ancillary geometry
    Ancillary,
}

impl RuleSet {
    pub fn display_name(&self) -> &'static str {
        match self {
            RuleSet::General => "IMO Intact Stability",
            RuleSet::Livestock => "Livestock (AMSA MO43)",
            RuleSet::Ancillary => "Ancillary",
        }
    }
}

/// Verdict of one criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Pass,
    Fail,
    NotApplicable,
}

/// Direction of a limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    /// Attained value must be at least the limit
    AtLeast,
    /// Attained value must be at most the limit
    AtMost,
}

impl Comparison {
    /// Signed margin, positive when passing
    pub fn margin(self, attained: f64, limit: f64) -> f64 {
        match self {
            Comparison::AtLeast => attained - limit,
            Comparison::AtMost => limit - attained,
        }
    }
}

/// One evaluated criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionResult {
    pub rule_set: RuleSet,
    /// Stable machine code, e.g. `IMO_GM`
    pub code: String,
    pub name: String,
    /// Regulation or source the limit comes from
    pub reference: String,
    pub outcome: Outcome,
    /// Attained value; `None` when not applicable
    pub attained: Option<f64>,
    pub limit: f64,
    pub comparison: Comparison,
    /// Signed margin, positive when passing
    pub margin: Option<f64>,
    pub applicable: bool,
    pub message: String,
}

/// All criteria results with counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CriteriaEvaluation {
    pub results: Vec<CriterionResult>,
    pub passed: usize,
    pub failed: usize,
    pub not_applicable: usize,
}

impl CriteriaEvaluation {
    /// True when no applicable criterion failed
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Look up a result by code
    pub fn get(&self, code: &str) -> Option<&CriterionResult> {
        self.results.iter().find(|r| r.code == code)
    }

    /// One-line summary, e.g. `Criteria: 8 passed, 1 failed, 1 N/A`
    pub fn summary_line(&self) -> String {
        format!(
            "Criteria: {} passed, {} failed, {} N/A",
            self.passed, self.failed, self.not_applicable
        )
    }

    fn push(&mut self, result: CriterionResult) {
        match result.outcome {
            Outcome::Pass => self.passed += 1,
            Outcome::Fail => self.failed += 1,
            Outcome::NotApplicable => self.not_applicable += 1,
        }
        self.results.push(result);
    }
}

// ============================================================================
// Criterion builder
// ============================================================================

struct Criterion {
    rule_set: RuleSet,
    code: &'static str,
    name: &'static str,
    reference: &'static str,
    comparison: Comparison,
    limit: f64,
    unit: &'static str,
}

impl Criterion {
    fn check(&self, attained: Option<f64>, skip_reason: &str) -> CriterionResult {
        let (outcome, margin, message) = match attained {
            Some(value) => {
                let margin = self.comparison.margin(value, self.limit);
                let outcome = if margin >= 0.0 { Outcome::Pass } else { Outcome::Fail };
                let bound = match self.comparison {
                    Comparison::AtLeast => "min",
                    Comparison::AtMost => "max",
                };
                let message = format!(
                    "{} {:.3} {}, {} {:.3} {}, margin {:+.3} {}",
                    self.name, value, self.unit, bound, self.limit, self.unit, margin, self.unit
                );
                (outcome, Some(margin), message)
            }
            None => (Outcome::NotApplicable, None, format!("N/A ({})", skip_reason)),
        };

        CriterionResult {
            rule_set: self.rule_set,
            code: self.code.to_string(),
            name: self.name.to_string(),
            reference: self.reference.to_string(),
            outcome,
            attained,
            limit: self.limit,
            comparison: self.comparison,
            margin,
            applicable: attained.is_some(),
            message,
        }
    }
}

// ============================================================================
// Evaluation
// ============================================================================

/// Evaluate every rule set against an equilibrium.
///
/// GM criteria read the effective GM, which already carries the negative-GM
/// policy, so criteria and validation always see the same number.
pub fn evaluate(result: &EquilibriumResult, ship: &ShipProfile, limits: &Limits) -> CriteriaEvaluation {
    let mut eval = CriteriaEvaluation::default();
    let loaded = result.displacement_t > EPS;
    let gm_effective = Some(result.gm_effective_m).filter(|_| loaded);

    // General intact stability
    eval.push(
        Criterion {
            rule_set: RuleSet::General,
            code: "IMO_GM",
            name: "Minimum GM",
            reference: "IS Code A.749(18) 3.1.2.4",
            comparison: Comparison::AtLeast,
            limit: limits.min_gm_m,
            unit: "m",
        }
        .check(gm_effective, "zero displacement"),
    );

    let max_trim = ship.length().map(|l| l * limits.max_trim_fraction);
    eval.push(
        Criterion {
            rule_set: RuleSet::General,
            code: "IMO_TRIM",
            name: "Trim",
            reference: "IS Code / Loading Manual",
            comparison: Comparison::AtMost,
            limit: max_trim.unwrap_or(0.0),
            unit: "m",
        }
        .check(max_trim.map(|_| result.trim_m.abs()), "length overall unknown"),
    );

    let max_draft = ship.design_draft().map(|t| t * limits.max_draft_fraction);
    eval.push(
        Criterion {
            rule_set: RuleSet::General,
            code: "IMO_DRAFT",
            name: "Mean draft",
            reference: "Load Line",
            comparison: Comparison::AtMost,
            limit: max_draft.unwrap_or(0.0),
            unit: "m",
        }
        .check(max_draft.map(|_| result.draft_mean_m), "design draft unknown"),
    );

    eval.push(
        Criterion {
            rule_set: RuleSet::General,
            code: "IMO_HEEL",
            name: "Static heel",
            reference: "IS Code A.749(18)",
            comparison: Comparison::AtMost,
            limit: limits.max_heel_deg,
            unit: "deg",
        }
        .check(Some(result.heel_deg.abs()).filter(|_| loaded), "zero displacement"),
    );

    // Livestock
    eval.push(
        Criterion {
            rule_set: RuleSet::Livestock,
            code: "LIV_GM",
            name: "Livestock minimum GM",
            reference: "AMSA MO43",
            comparison: Comparison::AtLeast,
            limit: limits.min_gm_livestock_m,
            unit: "m",
        }
        .check(gm_effective, "zero displacement"),
    );

    eval.push(
        Criterion {
            rule_set: RuleSet::Livestock,
            code: "LIV_ROLL",
            name: "Roll period",
            reference: "AMSA MO43",
            comparison: Comparison::AtMost,
            limit: limits.max_roll_period_s,
            unit: "s",
        }
        .check(
            result.ancillary.roll_period_s.filter(|_| loaded),
            "breadth unknown or GM not positive",
        ),
    );

    eval.push(
        Criterion {
            rule_set: RuleSet::Livestock,
            code: "LIV_FREEBOARD",
            name: "Minimum freeboard",
            reference: "AMSA MO43",
            comparison: Comparison::AtLeast,
            limit: limits.min_freeboard_m,
            unit: "m",
        }
        .check(result.ancillary.freeboard_m, "depth unknown"),
    );

    // Ancillary
    eval.push(
        Criterion {
            rule_set: RuleSet::Ancillary,
            code: "PROP_IMM",
            name: "Propeller immersion",
            reference: "Operational",
            comparison: Comparison::AtLeast,
            limit: limits.min_prop_immersion_pct,
            unit: "%",
        }
        .check(result.ancillary.prop_immersion_pct, "propeller geometry unknown"),
    );

    eval.push(
        Criterion {
            rule_set: RuleSet::Ancillary,
            code: "VISIBILITY",
            name: "Bridge visibility",
            reference: "SOLAS V/22",
            comparison: Comparison::AtLeast,
            limit: limits.min_visibility_m,
            unit: "m",
        }
        .check(result.ancillary.visibility_m, "bridge geometry unknown"),
    );

    eval.push(
        Criterion {
            rule_set: RuleSet::Ancillary,
            code: "AIR_DRAFT",
            name: "Air draft",
            reference: "Operational",
            comparison: Comparison::AtLeast,
            limit: limits.min_air_draft_m,
            unit: "m",
        }
        .check(result.ancillary.air_draft_m, "mast height unknown"),
    );

    log::debug!("{}", eval.summary_line());
    eval
}
