//! # Error Types
//!
//! Structured error types for stability_core. Only structurally invalid input
//! (no hull data at all, a malformed curve table) is returned as an error;
//! everything else degrades to alarms on the report so the user always sees
//! numbers alongside the verdict.
//!
//! ## Example
//!
//! ```rust
//! use stability_core::errors::{StabilityError, CalcResult};
//!
//! fn validate_fill(fill_fraction: f64) -> CalcResult<()> {
//!     if !(0.0..=1.0).contains(&fill_fraction) {
//!         return Err(StabilityError::invalid_weight_item(
//!             "WB1P",
//!             format!("fill fraction {} outside [0, 1]", fill_fraction),
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for stability_core operations
pub type CalcResult<T> = Result<T, StabilityError>;

/// Structured error type for stability operations.
///
/// A regulatory FAILED verdict is *not* an error: it is reported through
/// [`crate::validation::CalculationStatus`] on a fully computed result.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum StabilityError {
    /// Hydrostatic table has too few samples or is not monotone
    #[error("Hydrostatic curve out of range: {reason}")]
    OutOfRangeCurve { reason: String },

    /// No draft can be found for the given mass
    #[error("Unsolvable draft for {total_mass_t} t: {reason}")]
    UnsolvableDraft { total_mass_t: f64, reason: String },

    /// A weight item breaks its invariants (negative mass, bad fill, unknown reference)
    #[error("Invalid weight item '{item}': {reason}")]
    InvalidWeightItem { item: String, reason: String },

    /// An input value is invalid (out of range, non-finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// File could not be read or written
    #[error("File error during {operation} on '{path}': {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// Condition file written by an incompatible schema
    #[error("Schema version mismatch: file is {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl StabilityError {
    /// Create an OutOfRangeCurve error
    pub fn out_of_range_curve(reason: impl Into<String>) -> Self {
        StabilityError::OutOfRangeCurve {
            reason: reason.into(),
        }
    }

    /// Create an UnsolvableDraft error
    pub fn unsolvable_draft(total_mass_t: f64, reason: impl Into<String>) -> Self {
        StabilityError::UnsolvableDraft {
            total_mass_t,
            reason: reason.into(),
        }
    }

    /// Create an InvalidWeightItem error
    pub fn invalid_weight_item(item: impl Into<String>, reason: impl Into<String>) -> Self {
        StabilityError::InvalidWeightItem {
            item: item.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        StabilityError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        StabilityError::MissingField {
            field: field.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        StabilityError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Errors that abort the pipeline, as opposed to per-item problems
    /// which are downgraded to warnings.
    pub fn is_hard_failure(&self) -> bool {
        !matches!(self, StabilityError::InvalidWeightItem { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            StabilityError::OutOfRangeCurve { .. } => "OUT_OF_RANGE_CURVE",
            StabilityError::UnsolvableDraft { .. } => "UNSOLVABLE_DRAFT",
            StabilityError::InvalidWeightItem { .. } => "INVALID_WEIGHT_ITEM",
            StabilityError::InvalidInput { .. } => "INVALID_INPUT",
            StabilityError::MissingField { .. } => "MISSING_FIELD",
            StabilityError::SerializationError { .. } => "SERIALIZATION_ERROR",
            StabilityError::FileError { .. } => "FILE_ERROR",
            StabilityError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<serde_json::Error> for StabilityError {
    fn from(err: serde_json::Error) -> Self {
        StabilityError::SerializationError {
            reason: err.to_string(),
        }
    }
}
