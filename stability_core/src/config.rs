//! # Limits and Reference Settings
//!
//! Every numeric threshold and reference constant the engine uses lives in
//! one of three plain structs, passed explicitly into each call:
//!
//! - [`Limits`] - operational thresholds for validation and criteria
//! - [`HydrostaticSettings`] - water density, curve generation and physical constants
//! - [`StrengthConstants`] - coefficients of the illustrative strength indicator
//!
//! Defaults follow the vessel loading manual, IMO IS Code A.749(18) and
//! AMSA MO43 for livestock carriers. Every field has a serde default, so a
//! JSON override only needs the fields it changes.
//!
//! ## Example
//!
//! ```rust
//! use stability_core::config::{Limits, GmPolicy};
//!
//! let limits: Limits = serde_json::from_str(r#"{ "min_gm_m": 0.30 }"#).unwrap();
//! assert_eq!(limits.min_gm_m, 0.30);
//! assert_eq!(limits.max_trim_fraction, 0.02);
//! assert_eq!(limits.gm_policy, GmPolicy::Signed);
//! ```

use serde::{Deserialize, Serialize};

/// How a negative metacentric height is reported.
///
/// The same policy is applied to the displayed GM, the effective GM and
/// every check or criterion that reads them, so the shown number and the
/// verdict never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GmPolicy {
    /// Report GM = KM - KG as computed, negative values included
    #[default]
    Signed,
    /// Report max(0, GM); a negative GM shows (and is checked) as zero
    ClampAtZero,
}

impl GmPolicy {
    /// Apply the policy to a raw GM value
    pub fn apply(self, gm_m: f64) -> f64 {
        match self {
            GmPolicy::Signed => gm_m,
            GmPolicy::ClampAtZero => gm_m.max(0.0),
        }
    }
}

/// Operational limits for validation and criteria evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Minimum effective GM, general intact stability (IS Code 3.1.2.4)
    pub min_gm_m: f64,

    /// Minimum effective GM for livestock carriage (AMSA MO43)
    pub min_gm_livestock_m: f64,

    /// GM below `min_gm_m * gm_warning_factor` raises a marginal-GM warning
    pub gm_warning_factor: f64,

    /// Maximum roll period for animal welfare (s)
    pub max_roll_period_s: f64,

    /// Minimum freeboard to avoid deck immersion (m)
    pub min_freeboard_m: f64,

    /// Maximum |trim| as a fraction of length overall
    pub max_trim_fraction: f64,

    /// Maximum mean draft as a fraction of design draft
    pub max_draft_fraction: f64,

    /// Maximum static heel (degrees)
    pub max_heel_deg: f64,

    /// Bending moment utilisation (%) above which a warning is raised
    pub bm_warning_pct: f64,

    /// Shear force utilisation (%) above which a warning is raised
    pub sf_warning_pct: f64,

    /// Minimum propeller immersion (% of diameter)
    pub min_prop_immersion_pct: f64,

    /// Minimum visibility, bridge to bow waterline (m)
    pub min_visibility_m: f64,

    /// Minimum air draft, waterline to highest point (m)
    pub min_air_draft_m: f64,

    /// Lower bound (exclusive) of the slack fill band for free-surface effects
    pub slack_fill_min: f64,

    /// Upper bound (exclusive) of the slack fill band for free-surface effects
    pub slack_fill_max: f64,

    /// Negative GM reporting policy
    pub gm_policy: GmPolicy,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            min_gm_m: 0.15,
            min_gm_livestock_m: 0.20,
            gm_warning_factor: 1.5,
            max_roll_period_s: 15.0,
            min_freeboard_m: 0.3,
            max_trim_fraction: 0.02,
            max_draft_fraction: 1.05,
            max_heel_deg: 5.0,
            bm_warning_pct: 100.0,
            sf_warning_pct: 100.0,
            min_prop_immersion_pct: 60.0,
            min_visibility_m: 1.0,
            min_air_draft_m: 5.0,
            slack_fill_min: 0.05,
            slack_fill_max: 0.95,
            gm_policy: GmPolicy::Signed,
        }
    }
}

impl Limits {
    /// True when a tank at this fill fraction has a free liquid surface
    pub fn is_slack(&self, fill_fraction: f64) -> bool {
        fill_fraction > self.slack_fill_min && fill_fraction < self.slack_fill_max
    }
}

/// Physical constants and hydrostatic curve generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HydrostaticSettings {
    /// Sea water density (t/m³)
    pub water_density_t_m3: f64,

    /// Block coefficient used when the ship profile has none
    pub default_block_coefficient: f64,

    /// Number of draft samples in a formula-generated curve set
    pub curve_samples: usize,

    /// Formula curves span 0 to `curve_draft_factor * design draft`
    pub curve_draft_factor: f64,

    /// KB/T ratio for the closed-form box hull (no curve table)
    pub box_kb_ratio: f64,

    /// Roll radius of gyration as a fraction of breadth
    pub roll_gyration_factor: f64,

    /// Gravitational acceleration (m/s²)
    pub gravity_m_s2: f64,

    /// Longitudinal strength indicator coefficients
    pub strength: StrengthConstants,
}

impl Default for HydrostaticSettings {
    fn default() -> Self {
        HydrostaticSettings {
            water_density_t_m3: 1.025,
            default_block_coefficient: 0.78,
            curve_samples: 25,
            curve_draft_factor: 1.2,
            box_kb_ratio: 0.53,
            roll_gyration_factor: 0.45,
            gravity_m_s2: 9.81,
            strength: StrengthConstants::default(),
        }
    }
}

/// Coefficients of the simplified still-water strength indicator.
///
/// **These are placeholders, not engineering values.** They have no physical
/// derivation and only scale an eccentricity measure into something that
/// can be plotted. Replace them with class-approved allowables before reading
/// the percentages as utilisation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StrengthConstants {
    /// SWBM ≈ Δ·L·ecc·k
    pub bm_coefficient: f64,
    /// SF ≈ Δ·ecc·k
    pub sf_coefficient: f64,
    /// Placeholder allowable BM = Δ·L·k
    pub design_bm_coefficient: f64,
    /// Placeholder allowable SF = Δ·k
    pub design_sf_coefficient: f64,
}

impl Default for StrengthConstants {
    fn default() -> Self {
        StrengthConstants {
            bm_coefficient: 0.25,
            sf_coefficient: 0.2,
            design_bm_coefficient: 0.1,
            design_sf_coefficient: 0.1,
        }
    }
}
