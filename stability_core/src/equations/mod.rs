//! # Naval Architecture Equations
//!
//! Every closed-form relation the engine uses lives here as a plain `f64`
//! function, so each one can be checked against its reference in isolation.
//!
//! ## Modules
//!
//! - [`interpolation`] - Piecewise-linear table lookups
//! - [`hydrostatic`] - Displacement, draft, KB, BM, MCT and trim
//! - [`stability`] - GM, free surface, heel, roll period and ancillary geometry
//! - [`registry`] - Equation metadata and usage tracking for reports
//!
//! ## Sign Conventions
//!
//! - **Longitudinal**: measured forward from the aft perpendicular (AP)
//! - **Vertical**: measured up from the keel
//! - **Transverse**: positive to starboard
//! - **Trim**: positive by the stern
//! - **Heel**: positive to starboard
//!
//! ## References
//!
//! - IMO Intact Stability Code, Resolution A.749(18)
//! - AMSA Marine Order 43 (livestock carriers)
//! - Vessel loading manual, draft and GM calculation (p.11)

pub mod hydrostatic;
pub mod interpolation;
pub mod registry;
pub mod stability;

pub use hydrostatic::{
    box_displacement,
    box_draft,
    drafts_at_marks,
    kb_morrish,
    metacentric_radius,
    moment_to_change_trim_1cm,
    trim_from_lever,
    waterplane_inertia_longitudinal,
    waterplane_inertia_transverse,
};

pub use interpolation::{interpolate_clamped, interpolate_extrapolating, lerp, Lookup};

pub use stability::{
    air_draft_m,
    free_surface_correction,
    freeboard,
    heel_angle_deg,
    metacentric_height,
    propeller_immersion_pct,
    roll_period_s,
    visibility_m,
};

pub use registry::{
    CodeReference,
    Equation,
    EquationCategory,
    EquationMetadata,
    EquationTracker,
    EquationUsage,
    ALL_EQUATIONS,
    generate_equations_markdown,
};
