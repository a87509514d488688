//! # Unit Types
//!
//! Type-safe wrappers for the SI units used by the engine. They stay as
//! lightweight `f64` newtypes so JSON stays clean (just numbers).
//!
//! ## Units
//!
//! - Length: meters (m)
//! - Mass: metric tonnes (t)
//! - Volume: cubic meters (m³)
//! - Angle: degrees
//!
//! ## Unknown Dimensions
//!
//! Principal dimensions are carried as `Option<Meters>`. A zero (or negative)
//! value coming from an upstream form means "not entered yet", so
//! [`known_meters`] deserializes it as `None` instead of letting a zero leak
//! into a limit comparison.
//!
//! ## Example
//!
//! ```rust
//! use stability_core::units::{Meters, Tonnes, Degrees, Radians};
//!
//! let draft = Meters(6.0);
//! assert!(draft.is_known());
//! assert!(!Meters(0.0).is_known());
//!
//! let heel: Degrees = Radians(std::f64::consts::FRAC_PI_2).into();
//! assert!((heel.0 - 90.0).abs() < 1e-9);
//!
//! let mass = Tonnes(250.0) + Tonnes(50.0);
//! assert_eq!(mass.0, 300.0);
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Floating-point tolerance used for "is this quantity effectively zero"
pub const EPS: f64 = 1e-9;

// ============================================================================
// Length Units
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl Meters {
    /// A dimension is known when it is finite and strictly positive.
    pub fn is_known(self) -> bool {
        self.0.is_finite() && self.0 > EPS
    }
}

// ============================================================================
// Mass and Volume Units
// ============================================================================

/// Mass in metric tonnes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tonnes(pub f64);

/// Volume in cubic meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMeters(pub f64);

impl Tonnes {
    /// Displaced volume at the given water density (t/m³)
    pub fn displaced_volume(self, density_t_m3: f64) -> CubicMeters {
        if density_t_m3 <= EPS {
            return CubicMeters(0.0);
        }
        CubicMeters(self.0 / density_t_m3)
    }
}

// ============================================================================
// Angle Units
// ============================================================================

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Radians(pub f64);

impl From<Radians> for Degrees {
    fn from(rad: Radians) -> Self {
        Degrees(rad.0.to_degrees())
    }
}

impl From<Degrees> for Radians {
    fn from(deg: Degrees) -> Self {
        Radians(deg.0.to_radians())
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(Tonnes);
impl_arithmetic!(CubicMeters);
impl_arithmetic!(Degrees);
impl_arithmetic!(Radians);

// ============================================================================
// Serde helpers
// ============================================================================

/// Deserialize an optional dimension, mapping zero/negative/missing to `None`.
///
/// Use with `#[serde(default, deserialize_with = "known_meters")]`.
pub fn known_meters<'de, D>(deserializer: D) -> Result<Option<Meters>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<f64> = Option::deserialize(deserializer)?;
    Ok(raw.map(Meters).filter(|m| m.is_known()))
}

/// Unwrap a known dimension to its raw value.
pub fn known(dimension: Option<Meters>) -> Option<f64> {
    dimension.filter(|m| m.is_known()).map(Meters::value)
}
