//! # stability_core - Vessel Intact Stability Engine
//!
//! `stability_core` is the computational heart of Trimline: it takes a ship
//! profile and a loading condition (tank fills, livestock pens, fixed
//! weights), finds the floating equilibrium and checks it against IMO and
//! AMSA MO43 criteria. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: pure functions, limits and settings passed explicitly
//! - **JSON-First**: all types implement Serialize/Deserialize
//! - **Degrade, don't abort**: only structurally invalid input is an error;
//!   everything else becomes an alarm on a fully computed report
//! - **Unknown is not zero**: missing dimensions are `Option`s and gate the
//!   checks that need them
//!
//! ## Quick Start
//!
//! ```rust
//! use stability_core::loading::{LongitudinalPosition, TankFill};
//! use stability_core::pipeline::{compute_condition, ConditionInput};
//! use stability_core::ship::{ShipProfile, TankCategory, TankDefinition};
//!
//! let ship = ShipProfile::new("MV Example")
//!     .with_dimensions(100.0, 18.0, 9.0, 6.0)
//!     .with_tank(TankDefinition::new("WB1", "Ballast 1", TankCategory::WaterBallast, 500.0, 1.025)
//!         .at(LongitudinalPosition::Fraction(0.5), 2.0, 0.0));
//!
//! let input = ConditionInput::new("Ballast", ship).with_fill(TankFill::new("WB1", 1.0));
//! let report = compute_condition(&input).unwrap();
//!
//! let json = serde_json::to_string_pretty(&report).unwrap();
//! assert!(json.contains("\"status\""));
//! ```
//!
//! ## Modules
//!
//! - [`ship`] - Ship profile, tank and pen registers, livestock cargo types
//! - [`loading`] - Condition resolution and mass aggregation
//! - [`hydrostatics`] - Hydrostatic curve table and box hull providers
//! - [`calculations`] - Draft, trim, stability, strength and ancillary solvers
//! - [`validation`] - Limit checks, status and alarms
//! - [`criteria`] - IMO, livestock and ancillary criteria
//! - [`pipeline`] - End-to-end condition computation and report
//! - [`equations`] - Formulas and the equation registry
//! - [`config`] - Limits and hydrostatic settings
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Condition loading and atomic report saves

pub mod calculations;
pub mod config;
pub mod criteria;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod hydrostatics;
pub mod loading;
pub mod pipeline;
pub mod ship;
pub mod units;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use config::{GmPolicy, HydrostaticSettings, Limits};
pub use errors::{CalcResult, StabilityError};
pub use file_io::{load_condition, save_report};
pub use pipeline::{compute_condition, ConditionInput, ConditionReport};
pub use validation::CalculationStatus;
