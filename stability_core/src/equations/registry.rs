//! # Equation Registry
//!
//! Central registry of every naval-architecture relation used by the engine.
//! Each equation carries its plain-text formula, a reference and the function
//! that implements it, so a loading-condition report can list exactly which
//! relations produced its numbers.
//!
//! ## Usage
//!
//! ```rust
//! use stability_core::equations::registry::{Equation, EquationTracker};
//!
//! let mut tracker = EquationTracker::new();
//! tracker.record(Equation::MetacentricHeight, "Equilibrium");
//!
//! let meta = Equation::MetacentricHeight.metadata();
//! assert!(meta.formula_plain.contains("KM - KG"));
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Code References
// ============================================================================

/// Source of a formula or threshold.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum CodeReference {
    /// IMO Intact Stability Code, Resolution A.749(18)
    IsCode { section: &'static str },
    /// The vessel's approved loading manual
    LoadingManual { page: u16 },
    /// AMSA Marine Order 43 (livestock carriers)
    Amsa { section: &'static str },
    /// Standard textbook naval architecture
    NavalArchitecture,
    /// Placeholder relation with no engineering derivation
    Illustrative,
}

impl CodeReference {
    /// Format the reference for reports
    pub fn citation(&self) -> String {
        match self {
            CodeReference::IsCode { section } => format!("IMO IS Code A.749(18) {}", section),
            CodeReference::LoadingManual { page } => format!("Vessel loading manual p.{}", page),
            CodeReference::Amsa { section } => format!("AMSA MO43 {}", section),
            CodeReference::NavalArchitecture => "Basic naval architecture".to_string(),
            CodeReference::Illustrative => "Illustrative only (no class basis)".to_string(),
        }
    }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for grouping equations in reports and EQUATIONS.md.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Weight summation and centres of gravity
    MassProperties,
    /// Displacement, draft and centre of buoyancy
    Hydrostatics,
    /// Trim balance and drafts at the marks
    Equilibrium,
    /// GM, free surface, heel, roll
    Stability,
    /// Longitudinal strength indicator
    Strength,
    /// Freeboard and operational geometry
    Ancillary,
}

impl EquationCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::MassProperties => "Mass Properties",
            EquationCategory::Hydrostatics => "Hydrostatics",
            EquationCategory::Equilibrium => "Equilibrium",
            EquationCategory::Stability => "Stability",
            EquationCategory::Strength => "Longitudinal Strength",
            EquationCategory::Ancillary => "Ancillary Checks",
        }
    }

    /// Sort order (lower = earlier), follows the calculation order
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::MassProperties => 1,
            EquationCategory::Hydrostatics => 2,
            EquationCategory::Equilibrium => 3,
            EquationCategory::Stability => 4,
            EquationCategory::Strength => 5,
            EquationCategory::Ancillary => 6,
        }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Descriptive metadata for one equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// What the equation calculates
    pub description: &'static str,
    /// Formula in plain text
    pub formula_plain: &'static str,
    /// Source of the relation
    pub reference: CodeReference,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    /// Category for grouping
    pub category: EquationCategory,
    /// Module implementing the equation
    pub source_module: &'static str,
    /// Function implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All relations used by the stability engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    // -------------------------------------------------------------------------
    // Mass properties
    // -------------------------------------------------------------------------
    /// KG = Σ(m·VCG)/Σm, likewise LCG and TCG
    CentreOfGravity,

    // -------------------------------------------------------------------------
    // Hydrostatics
    // -------------------------------------------------------------------------
    /// Δ = L·B·T·Cb·ρ
    BoxDisplacement,
    /// T = Δ/(L·B·Cb·ρ)
    BoxDraft,
    /// Piecewise-linear lookup in the hydrostatic table
    CurveInterpolation,
    /// KB = (0.535 − 0.055·Cb)·T
    KbMorrish,
    /// KB = k·T for a box hull
    KbBoxRatio,
    /// I_T = L·B³/12
    WaterplaneInertiaTransverse,
    /// I_L = B·L³/12
    WaterplaneInertiaLongitudinal,
    /// BM = I/V
    MetacentricRadius,

    // -------------------------------------------------------------------------
    // Equilibrium
    // -------------------------------------------------------------------------
    /// MCT1cm = Δ·BM_L/(100·L)
    MomentToChangeTrim,
    /// t = Δ·(LCB − LCG)/(100·MCT1cm)
    TrimFromLever,
    /// T_aft = T + t/2, T_fwd = T − t/2
    DraftsAtMarks,

    // -------------------------------------------------------------------------
    // Stability
    // -------------------------------------------------------------------------
    /// GM = KM − KG
    MetacentricHeight,
    /// GG' = ΣFSM/Δ
    FreeSurfaceCorrection,
    /// φ = atan(TCG/GM)
    HeelAngle,
    /// T_roll = 2π·k·B/√(g·GM)
    RollPeriod,

    // -------------------------------------------------------------------------
    // Strength
    // -------------------------------------------------------------------------
    /// SWBM ≈ Δ·L·|LCG/L − 0.5|·k
    StillWaterBendingMoment,
    /// SF ≈ Δ·|LCG/L − 0.5|·k
    StillWaterShearForce,

    // -------------------------------------------------------------------------
    // Ancillary
    // -------------------------------------------------------------------------
    /// f = D − T − |t|/2
    Freeboard,
    /// immersion % = 100·(T_aft − z_prop)/D_prop
    PropellerImmersion,
    /// Bridge sight line to the water ahead
    Visibility,
    /// Air draft = z_mast − T
    AirDraft,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::CentreOfGravity => EquationMetadata {
                name: "Centre of Gravity",
                description: "Mass-weighted centre of all weight items (lightship, tanks, pens, fixed weights)",
                formula_plain: "KG = sum(m_i * VCG_i) / sum(m_i), LCG = sum(m_i * LCG_i) / sum(m_i), TCG likewise",
                reference: CodeReference::LoadingManual { page: 11 },
                assumptions: vec!["Each item acts at a single point"],
                category: EquationCategory::MassProperties,
                source_module: "loading/aggregate.rs",
                source_function: "aggregate",
            },
            Equation::BoxDisplacement => EquationMetadata {
                name: "Box Displacement",
                description: "Displacement of a box-form hull reduced by the block coefficient",
                formula_plain: "Delta = L * B * T * Cb * rho",
                reference: CodeReference::NavalArchitecture,
                assumptions: vec!["Constant block coefficient at all drafts"],
                category: EquationCategory::Hydrostatics,
                source_module: "equations/hydrostatic.rs",
                source_function: "box_displacement",
            },
            Equation::BoxDraft => EquationMetadata {
                name: "Box Draft",
                description: "Mean draft of a box-form hull carrying a given displacement",
                formula_plain: "T = Delta / (L * B * Cb * rho)",
                reference: CodeReference::LoadingManual { page: 11 },
                assumptions: vec!["Constant block coefficient at all drafts"],
                category: EquationCategory::Hydrostatics,
                source_module: "equations/hydrostatic.rs",
                source_function: "box_draft",
            },
            Equation::CurveInterpolation => EquationMetadata {
                name: "Hydrostatic Curve Interpolation",
                description: "Linear interpolation between tabulated drafts; clamped below, extrapolated above",
                formula_plain: "y = y0 + (x - x0) * (y1 - y0) / (x1 - x0)",
                reference: CodeReference::NavalArchitecture,
                assumptions: vec!["Curves are piecewise linear between samples"],
                category: EquationCategory::Hydrostatics,
                source_module: "equations/interpolation.rs",
                source_function: "interpolate_extrapolating",
            },
            Equation::KbMorrish => EquationMetadata {
                name: "Centre of Buoyancy (Morrish)",
                description: "Height of the centre of buoyancy above the keel for a ship-shaped hull",
                formula_plain: "KB = (0.535 - 0.055 * Cb) * T",
                reference: CodeReference::NavalArchitecture,
                assumptions: vec!["Conventional hull form"],
                category: EquationCategory::Hydrostatics,
                source_module: "equations/hydrostatic.rs",
                source_function: "kb_morrish",
            },
            Equation::KbBoxRatio => EquationMetadata {
                name: "Centre of Buoyancy (Box Ratio)",
                description: "Height of the centre of buoyancy as a fixed fraction of the draft",
                formula_plain: "KB = k * T",
                reference: CodeReference::NavalArchitecture,
                assumptions: vec!["Used when no curve table is available"],
                category: EquationCategory::Hydrostatics,
                source_module: "hydrostatics/box_hull.rs",
                source_function: "BoxHull::attribute_at",
            },
            Equation::WaterplaneInertiaTransverse => EquationMetadata {
                name: "Transverse Waterplane Inertia",
                description: "Second moment of a rectangular waterplane about the centreline",
                formula_plain: "I_T = L * B^3 / 12",
                reference: CodeReference::NavalArchitecture,
                assumptions: vec!["Rectangular waterplane"],
                category: EquationCategory::Hydrostatics,
                source_module: "equations/hydrostatic.rs",
                source_function: "waterplane_inertia_transverse",
            },
            Equation::WaterplaneInertiaLongitudinal => EquationMetadata {
                name: "Longitudinal Waterplane Inertia",
                description: "Second moment of a rectangular waterplane about the midship section",
                formula_plain: "I_L = B * L^3 / 12",
                reference: CodeReference::NavalArchitecture,
                assumptions: vec!["Rectangular waterplane"],
                category: EquationCategory::Hydrostatics,
                source_module: "equations/hydrostatic.rs",
                source_function: "waterplane_inertia_longitudinal",
            },
            Equation::MetacentricRadius => EquationMetadata {
                name: "Metacentric Radius",
                description: "Height of the metacentre above the centre of buoyancy",
                formula_plain: "BM = I / V, V = Delta / rho",
                reference: CodeReference::NavalArchitecture,
                assumptions: vec!["Small angles"],
                category: EquationCategory::Hydrostatics,
                source_module: "equations/hydrostatic.rs",
                source_function: "metacentric_radius",
            },
            Equation::MomentToChangeTrim => EquationMetadata {
                name: "Moment to Change Trim 1 cm",
                description: "Trimming moment that changes the trim by one centimetre",
                formula_plain: "MCT1cm = Delta * BM_L / (100 * L)",
                reference: CodeReference::NavalArchitecture,
                assumptions: vec!["GM_L approximated by BM_L"],
                category: EquationCategory::Equilibrium,
                source_module: "equations/hydrostatic.rs",
                source_function: "moment_to_change_trim_1cm",
            },
            Equation::TrimFromLever => EquationMetadata {
                name: "Trim from Lever",
                description: "Trim produced by the longitudinal separation of buoyancy and gravity",
                formula_plain: "t = Delta * (LCB - LCG) / (100 * MCT1cm)",
                reference: CodeReference::LoadingManual { page: 11 },
                assumptions: vec![
                    "Positions measured forward from the aft perpendicular",
                    "Positive trim is by the stern",
                    "Trimming about the midship section",
                ],
                category: EquationCategory::Equilibrium,
                source_module: "equations/hydrostatic.rs",
                source_function: "trim_from_lever",
            },
            Equation::DraftsAtMarks => EquationMetadata {
                name: "Drafts at Marks",
                description: "Aft, midship and forward drafts from mean draft and trim",
                formula_plain: "T_aft = T + t/2, T_mid = T, T_fwd = T - t/2",
                reference: CodeReference::NavalArchitecture,
                assumptions: vec!["Trim about midships"],
                category: EquationCategory::Equilibrium,
                source_module: "equations/hydrostatic.rs",
                source_function: "drafts_at_marks",
            },
            Equation::MetacentricHeight => EquationMetadata {
                name: "Metacentric Height",
                description: "Initial transverse stability lever",
                formula_plain: "KM = KB + BM_T, GM = KM - KG",
                reference: CodeReference::IsCode { section: "3.1.2.4" },
                assumptions: vec!["Small angles of heel"],
                category: EquationCategory::Stability,
                source_module: "equations/stability.rs",
                source_function: "metacentric_height",
            },
            Equation::FreeSurfaceCorrection => EquationMetadata {
                name: "Free Surface Correction",
                description: "Virtual rise of G caused by slack tanks",
                formula_plain: "GG' = sum(FSM) / Delta, GM_eff = GM - GG'",
                reference: CodeReference::LoadingManual { page: 11 },
                assumptions: vec!["Only tanks inside the slack fill band contribute"],
                category: EquationCategory::Stability,
                source_module: "equations/stability.rs",
                source_function: "free_surface_correction",
            },
            Equation::HeelAngle => EquationMetadata {
                name: "Static Heel",
                description: "List caused by a transverse centre of gravity off the centreline",
                formula_plain: "phi = atan(TCG / GM), 0 when GM <= 0",
                reference: CodeReference::IsCode { section: "3.1.2" },
                assumptions: vec!["Small angles", "Wall-sided hull"],
                category: EquationCategory::Stability,
                source_module: "equations/stability.rs",
                source_function: "heel_angle_deg",
            },
            Equation::RollPeriod => EquationMetadata {
                name: "Natural Roll Period",
                description: "Undamped roll period from the roll radius of gyration",
                formula_plain: "T_roll = 2 * pi * k * B / sqrt(g * GM_eff)",
                reference: CodeReference::Amsa { section: "roll period" },
                assumptions: vec!["k taken as a fixed fraction of breadth"],
                category: EquationCategory::Stability,
                source_module: "equations/stability.rs",
                source_function: "roll_period_s",
            },
            Equation::StillWaterBendingMoment => EquationMetadata {
                name: "Still Water Bending Moment Indicator",
                description: "Bending moment proxy from the eccentricity of the longitudinal centre of gravity",
                formula_plain: "SWBM = Delta * L * |LCG/L - 0.5| * k_bm",
                reference: CodeReference::Illustrative,
                assumptions: vec!["Not a load-curve integration", "Coefficients are placeholders"],
                category: EquationCategory::Strength,
                source_module: "calculations/strength.rs",
                source_function: "still_water_bending_moment",
            },
            Equation::StillWaterShearForce => EquationMetadata {
                name: "Still Water Shear Force Indicator",
                description: "Shear force proxy from the eccentricity of the longitudinal centre of gravity",
                formula_plain: "SF = Delta * |LCG/L - 0.5| * k_sf",
                reference: CodeReference::Illustrative,
                assumptions: vec!["Not a load-curve integration", "Coefficients are placeholders"],
                category: EquationCategory::Strength,
                source_module: "calculations/strength.rs",
                source_function: "still_water_shear_force",
            },
            Equation::Freeboard => EquationMetadata {
                name: "Freeboard",
                description: "Freeboard at the lowest point of the deck line",
                formula_plain: "f = D - T - |t| / 2",
                reference: CodeReference::Amsa { section: "freeboard" },
                assumptions: vec!["Straight deck line, no sheer"],
                category: EquationCategory::Ancillary,
                source_module: "equations/stability.rs",
                source_function: "freeboard",
            },
            Equation::PropellerImmersion => EquationMetadata {
                name: "Propeller Immersion",
                description: "Share of the propeller diameter below the aft waterline",
                formula_plain: "I% = 100 * (T_aft - z_prop) / D_prop, clamped to 0..100",
                reference: CodeReference::NavalArchitecture,
                assumptions: vec!["Propeller centre and diameter estimated when not given"],
                category: EquationCategory::Ancillary,
                source_module: "equations/stability.rs",
                source_function: "propeller_immersion_pct",
            },
            Equation::Visibility => EquationMetadata {
                name: "Bridge Visibility",
                description: "Distance at which the sight line from the bridge meets the water ahead",
                formula_plain: "d = (h_bridge - T_fwd) / tan(|atan(t / L)|), capped at L",
                reference: CodeReference::Illustrative,
                assumptions: vec!["Bow obstructions ignored"],
                category: EquationCategory::Ancillary,
                source_module: "equations/stability.rs",
                source_function: "visibility_m",
            },
            Equation::AirDraft => EquationMetadata {
                name: "Air Draft",
                description: "Height of the highest fixed point above the waterline",
                formula_plain: "h_air = z_mast - T",
                reference: CodeReference::NavalArchitecture,
                assumptions: vec!["Mast height estimated from depth when not given"],
                category: EquationCategory::Ancillary,
                source_module: "equations/stability.rs",
                source_function: "air_draft_m",
            },
        }
    }

    /// Get all equations in a given category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// Get all categories, in calculation order
    pub fn all_categories() -> Vec<EquationCategory> {
        use EquationCategory::*;
        let mut cats = vec![MassProperties, Hydrostatics, Equilibrium, Stability, Strength, Ancillary];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    Equation::CentreOfGravity,
    // Hydrostatics
    Equation::BoxDisplacement,
    Equation::BoxDraft,
    Equation::CurveInterpolation,
    Equation::KbMorrish,
    Equation::KbBoxRatio,
    Equation::WaterplaneInertiaTransverse,
    Equation::WaterplaneInertiaLongitudinal,
    Equation::MetacentricRadius,
    // Equilibrium
    Equation::MomentToChangeTrim,
    Equation::TrimFromLever,
    Equation::DraftsAtMarks,
    // Stability
    Equation::MetacentricHeight,
    Equation::FreeSurfaceCorrection,
    Equation::HeelAngle,
    Equation::RollPeriod,
    // Strength
    Equation::StillWaterBendingMoment,
    Equation::StillWaterShearForce,
    // Ancillary
    Equation::Freeboard,
    Equation::PropellerImmersion,
    Equation::Visibility,
    Equation::AirDraft,
];

// ============================================================================
// Equation Usage Tracking
// ============================================================================

/// Record of an equation being used in a calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquationUsage {
    /// The equation that was used
    pub equation: Equation,
    /// Calculation stage that used it (e.g., "Draft", "Equilibrium")
    pub context: String,
}

impl EquationUsage {
    /// Create a new equation usage record
    pub fn new(equation: Equation, context: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
        }
    }
}

/// Collector for equation usage during a calculation.
///
/// The pipeline records every relation each stage applies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquationTracker {
    usages: Vec<EquationUsage>,
}

impl EquationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an equation was used
    pub fn record(&mut self, equation: Equation, context: impl Into<String>) {
        self.usages.push(EquationUsage::new(equation, context));
    }

    /// Get all recorded usages
    pub fn usages(&self) -> &[EquationUsage] {
        &self.usages
    }

    /// Get unique equations used, in first-use order
    pub fn unique_equations(&self) -> Vec<Equation> {
        let mut seen = std::collections::HashSet::new();
        self.usages
            .iter()
            .filter(|u| seen.insert(u.equation))
            .map(|u| u.equation)
            .collect()
    }

    /// Group unique equations by category, in calculation order
    pub fn by_category(&self) -> Vec<(EquationCategory, Vec<Equation>)> {
        let mut by_cat: std::collections::HashMap<EquationCategory, Vec<Equation>> =
            std::collections::HashMap::new();

        for eq in self.unique_equations() {
            by_cat.entry(eq.metadata().category).or_default().push(eq);
        }

        let mut result: Vec<_> = by_cat.into_iter().collect();
        result.sort_by_key(|(cat, _)| cat.sort_order());
        result
    }
}

// ============================================================================
// Markdown Generation for EQUATIONS.md
// ============================================================================

/// Generate a complete EQUATIONS.md listing every registered equation,
/// grouped by category, with formulas, references and source locations.
///
/// # Example
///
/// ```rust
/// use stability_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Trimline Equations Reference"));
/// assert!(markdown.contains("## Hydrostatics"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(16_000);

    output.push_str(
        r#"# Trimline Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

This document lists all relations used by the Trimline stability engine.
Each equation includes its formula, reference, source location and assumptions.

## Sign Conventions

| Quantity | Positive Direction |
|----------|-------------------|
| Longitudinal position (LCG, LCB) | Forward from the aft perpendicular |
| Vertical position (KG, VCG) | Up from the keel |
| Transverse position (TCG) | Starboard |
| Trim | By the stern (aft draft > forward draft) |
| Heel | To starboard |
| Bending moment | Hogging |

---

"#,
    );

    let categories = Equation::all_categories();

    for category in &categories {
        let equations = Equation::in_category(*category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));
            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output.push_str(
        r#"## Limitations

Results are indicative only and not suitable for classification-society
submission. The strength indicator uses placeholder coefficients.
"#,
    );

    output
}

// ============================================================================
// Tests
// ============================================================================
