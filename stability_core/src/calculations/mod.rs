//! # Equilibrium Calculations
//!
//! The solver stages that turn an aggregated loading state into a floating
//! equilibrium. Each stage follows the pattern:
//!
//! - a `*Solution` / `*Result` / `*Indicator` output type (JSON-serializable)
//! - a `solve(..)` or `evaluate(..)` free function with no hidden state
//!
//! ## Stages
//!
//! - [`draft`] - Mean draft from displacement (DraftSolver)
//! - [`trim`] - Trim from the LCB/LCG lever (TrimSolver)
//! - [`stability`] - GM, free surface, heel and drafts at marks
//! - [`strength`] - Coarse still-water bending moment / shear force
//! - [`ancillary`] - Propeller immersion, visibility, air draft, freeboard, roll period

pub mod ancillary;
pub mod draft;
pub mod stability;
pub mod strength;
pub mod trim;

pub use ancillary::{AncillaryResult, Waterline};
pub use draft::DraftSolution;
pub use stability::EquilibriumResult;
pub use strength::StrengthIndicator;
pub use trim::TrimSolution;
