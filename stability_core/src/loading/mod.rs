//! # Loading Conditions
//!
//! A loading condition names what is aboard: tank fillings, pen loads and
//! fixed weights. [`resolve`] turns those references into a flat manifest of
//! [`WeightItem`]s with masses and centres of gravity, using the geometry in
//! the [`ShipProfile`](crate::ship::ShipProfile).
//!
//! Items that break their invariants (negative mass, fill outside [0, 1],
//! unknown tank or pen) are dropped from the manifest and reported as
//! [`LoadingIssue`]s, which the validation stage turns into warnings.
//!
//! - [`aggregate`] - mass and centre-of-gravity summation
//!
//! ## Example
//!
//! ```rust
//! use stability_core::config::Limits;
//! use stability_core::loading::{resolve, LongitudinalPosition, TankFill};
//! use stability_core::ship::{ShipProfile, TankDefinition, TankCategory};
//!
//! let ship = ShipProfile::new("MV Example")
//!     .with_dimensions(100.0, 18.0, 9.0, 6.0)
//!     .with_tank(TankDefinition::new("FW1", "Fresh Water", TankCategory::FreshWater, 500.0, 1.0)
//!         .at(LongitudinalPosition::Fraction(0.5), 5.0, 0.0));
//!
//! let manifest = resolve(&ship, &[TankFill::new("FW1", 0.5)], &[], &[], &Limits::default());
//! assert_eq!(manifest.items.len(), 1);
//! assert!((manifest.items[0].mass_t - 250.0).abs() < 1e-9);
//! assert!(manifest.issues.is_empty());
//! ```

pub mod aggregate;

pub use aggregate::{aggregate, LoadingState};

use serde::{Deserialize, Serialize};

use crate::config::Limits;
use crate::errors::{CalcResult, StabilityError};
use crate::ship::ShipProfile;

// ============================================================================
// Positions
// ============================================================================

/// Longitudinal position of a centre of gravity.
///
/// Tank registers often give LCG as a fraction of length; pens and fixed
/// weights give it in meters. Both are measured forward from the aft
/// perpendicular.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value")]
pub enum LongitudinalPosition {
    /// Fraction of length overall (0 = AP, 1 = FP)
    Fraction(f64),
    /// Meters from the aft perpendicular
    Meters(f64),
}

impl LongitudinalPosition {
    /// Position in meters from AP; a fraction needs the length
    pub fn to_meters(self, length: Option<f64>) -> Option<f64> {
        match self {
            LongitudinalPosition::Meters(x) => Some(x),
            LongitudinalPosition::Fraction(f) => length.map(|l| f * l),
        }
    }

    /// Position as a fraction of length; meters need the length
    pub fn to_fraction(self, length: Option<f64>) -> Option<f64> {
        match self {
            LongitudinalPosition::Fraction(f) => Some(f),
            LongitudinalPosition::Meters(x) => length.filter(|l| *l > 0.0).map(|l| x / l),
        }
    }

    fn raw(self) -> f64 {
        match self {
            LongitudinalPosition::Fraction(v) | LongitudinalPosition::Meters(v) => v,
        }
    }
}

// ============================================================================
// Weight Items
// ============================================================================

/// Where a weight item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightKind {
    Lightship,
    Tank,
    Pen,
    Fixed,
}

/// One resolved contributor to the loading condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightItem {
    /// Tank/pen id, or the name for lightship and fixed weights
    pub id: String,
    pub name: String,
    pub kind: WeightKind,
    /// Mass (t)
    pub mass_t: f64,
    /// Vertical centre of gravity above keel (m)
    pub vcg_m: f64,
    /// Longitudinal centre of gravity
    pub lcg: LongitudinalPosition,
    /// Transverse centre of gravity, starboard positive (m)
    pub tcg_m: f64,
    /// Free-surface moment (t·m), set only for slack tanks with FSM data
    pub free_surface_moment_tm: Option<f64>,
    /// Fill fraction, tanks only
    pub fill_fraction: Option<f64>,
}

impl WeightItem {
    /// Check mass, centres and fill against their invariants.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.mass_t.is_finite() || self.mass_t < 0.0 {
            return Err(StabilityError::invalid_weight_item(
                &self.id,
                format!("mass {} t must be finite and non-negative", self.mass_t),
            ));
        }
        if !self.vcg_m.is_finite() || !self.tcg_m.is_finite() || !self.lcg.raw().is_finite() {
            return Err(StabilityError::invalid_weight_item(&self.id, "centre of gravity is not finite"));
        }
        if let Some(fill) = self.fill_fraction {
            if !(0.0..=1.0).contains(&fill) {
                return Err(StabilityError::invalid_weight_item(
                    &self.id,
                    format!("fill fraction {} outside [0, 1]", fill),
                ));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Condition Entries
// ============================================================================

/// Explicit centre of gravity overriding a register value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CogOverride {
    pub vcg_m: f64,
    pub lcg: LongitudinalPosition,
    #[serde(default)]
    pub tcg_m: f64,
}

/// Filling of one tank from the register.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TankFill {
    pub tank_id: String,
    /// Fill fraction of capacity, 0 to 1
    pub fill_fraction: f64,
    /// Liquid density (t/m³); `None` uses the tank default
    #[serde(default)]
    pub density_t_m3: Option<f64>,
    /// Centre of gravity; `None` uses the tank register
    #[serde(default)]
    pub cog: Option<CogOverride>,
}

impl TankFill {
    pub fn new(tank_id: impl Into<String>, fill_fraction: f64) -> Self {
        Self {
            tank_id: tank_id.into(),
            fill_fraction,
            density_t_m3: None,
            cog: None,
        }
    }

    pub fn with_density(mut self, density_t_m3: f64) -> Self {
        self.density_t_m3 = Some(density_t_m3);
        self
    }

    pub fn with_cog(mut self, cog: CogOverride) -> Self {
        self.cog = Some(cog);
        self
    }
}

/// Livestock loaded into one pen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PenLoad {
    pub pen_id: String,
    pub head_count: u32,
    /// Average mass per head (t)
    pub mass_per_head_t: f64,
    /// Cargo VCG above the pen deck (m)
    #[serde(default)]
    pub vcg_offset_m: f64,
}

/// A named weight with an explicit centre of gravity (stores, crew, constant).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedWeight {
    pub name: String,
    pub mass_t: f64,
    pub vcg_m: f64,
    pub lcg: LongitudinalPosition,
    #[serde(default)]
    pub tcg_m: f64,
}

impl FixedWeight {
    pub fn new(name: impl Into<String>, mass_t: f64, vcg_m: f64, lcg: LongitudinalPosition, tcg_m: f64) -> Self {
        Self {
            name: name.into(),
            mass_t,
            vcg_m,
            lcg,
            tcg_m,
        }
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// A condition entry that could not be used as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LoadingIssue {
    /// Fill refers to a tank id missing from the register
    UnknownTank { tank_id: String },
    /// Pen load refers to a pen id missing from the register
    UnknownPen { pen_id: String },
    /// Item rejected by [`WeightItem::validate`]
    InvalidItem { error: StabilityError },
    /// More heads than the pen is rated for (the load is still counted)
    PenOverCapacity { pen_id: String, head_count: u32, capacity_head: u32 },
}

/// Resolved weights plus everything that was skipped or questionable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolvedManifest {
    pub items: Vec<WeightItem>,
    pub issues: Vec<LoadingIssue>,
}

impl ResolvedManifest {
    fn push(&mut self, item: WeightItem) {
        match item.validate() {
            Ok(()) => self.items.push(item),
            Err(error) => {
                log::warn!("excluding weight item: {}", error);
                self.issues.push(LoadingIssue::InvalidItem { error });
            }
        }
    }
}

/// Resolve lightship, tank fills, pen loads and fixed weights into weight items.
///
/// Free-surface moments are attached only to tanks whose fill lies in the
/// slack band of `limits`; FSM tables are scaled by the ratio of the fill
/// density to the register density.
pub fn resolve(
    ship: &ShipProfile,
    fills: &[TankFill],
    pens: &[PenLoad],
    fixed: &[FixedWeight],
    limits: &Limits,
) -> ResolvedManifest {
    let mut manifest = ResolvedManifest::default();

    if let Some(lightship) = &ship.lightship {
        manifest.push(WeightItem {
            id: "lightship".to_string(),
            name: "Lightship".to_string(),
            kind: WeightKind::Lightship,
            mass_t: lightship.mass_t,
            vcg_m: lightship.vcg_m,
            lcg: lightship.lcg,
            tcg_m: lightship.tcg_m,
            free_surface_moment_tm: None,
            fill_fraction: None,
        });
    }

    for fill in fills {
        let Some(tank) = ship.tank(&fill.tank_id) else {
            log::warn!("tank '{}' not in register, skipped", fill.tank_id);
            manifest.issues.push(LoadingIssue::UnknownTank {
                tank_id: fill.tank_id.clone(),
            });
            continue;
        };

        let density = fill.density_t_m3.unwrap_or(tank.density_t_m3);
        let volume = tank.capacity_m3 * fill.fill_fraction;
        let (vcg_m, lcg, tcg_m) = match fill.cog {
            Some(cog) => (cog.vcg_m, cog.lcg, cog.tcg_m),
            None => (tank.vcg_m, tank.lcg, tank.tcg_m),
        };

        let free_surface_moment_tm = if limits.is_slack(fill.fill_fraction) {
            tank.free_surface.as_ref().and_then(|fs| fs.fsm_at(volume)).map(|fsm| {
                if tank.density_t_m3 > 0.0 {
                    fsm * density / tank.density_t_m3
                } else {
                    fsm
                }
            })
        } else {
            None
        };

        manifest.push(WeightItem {
            id: tank.id.clone(),
            name: tank.name.clone(),
            kind: WeightKind::Tank,
            mass_t: volume * density,
            vcg_m,
            lcg,
            tcg_m,
            free_surface_moment_tm,
            fill_fraction: Some(fill.fill_fraction),
        });
    }

    for load in pens {
        let Some(pen) = ship.pen(&load.pen_id) else {
            log::warn!("pen '{}' not in register, skipped", load.pen_id);
            manifest.issues.push(LoadingIssue::UnknownPen {
                pen_id: load.pen_id.clone(),
            });
            continue;
        };

        if pen.is_over_capacity(load.head_count) {
            manifest.issues.push(LoadingIssue::PenOverCapacity {
                pen_id: pen.id.clone(),
                head_count: load.head_count,
                capacity_head: pen.capacity_head,
            });
        }

        manifest.push(WeightItem {
            id: pen.id.clone(),
            name: pen.name.clone(),
            kind: WeightKind::Pen,
            mass_t: f64::from(load.head_count) * load.mass_per_head_t,
            vcg_m: pen.vcg_m + load.vcg_offset_m,
            lcg: LongitudinalPosition::Meters(pen.lcg_m),
            tcg_m: pen.tcg_m,
            free_surface_moment_tm: None,
            fill_fraction: None,
        });
    }

    for weight in fixed {
        manifest.push(WeightItem {
            id: weight.name.clone(),
            name: weight.name.clone(),
            kind: WeightKind::Fixed,
            mass_t: weight.mass_t,
            vcg_m: weight.vcg_m,
            lcg: weight.lcg,
            tcg_m: weight.tcg_m,
            free_surface_moment_tm: None,
            fill_fraction: None,
        });
    }

    log::debug!(
        "resolved {} weight items ({} issues)",
        manifest.items.len(),
        manifest.issues.len()
    );
    manifest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ship::{FreeSurfaceData, Lightship, PenDefinition, TankCategory, TankDefinition};

    fn ship() -> ShipProfile {
        ShipProfile::new("Test")
            .with_dimensions(100.0, 18.0, 9.0, 6.0)
            .with_lightship(Lightship {
                mass_t: 2000.0,
                vcg_m: 7.0,
                lcg: LongitudinalPosition::Meters(45.0),
                tcg_m: 0.0,
            })
            .with_tank(
                TankDefinition::new("WB1", "No.1 WB", TankCategory::WaterBallast, 400.0, 1.025)
                    .at(LongitudinalPosition::Fraction(0.8), 2.0, 0.0)
                    .with_free_surface(FreeSurfaceData::Constant { fsm_tm: 300.0 }),
            )
            .with_pen(PenDefinition::new("P1", "PEN 1-1", 12.0, 40.0, 1.0).with_area(50.0, 20))
    }

    #[test]
    fn test_position_conversion() {
        let frac = LongitudinalPosition::Fraction(0.25);
        assert_eq!(frac.to_meters(Some(100.0)), Some(25.0));
        assert_eq!(frac.to_meters(None), None);
        let m = LongitudinalPosition::Meters(25.0);
        assert_eq!(m.to_fraction(Some(100.0)), Some(0.25));
        assert_eq!(m.to_fraction(None), None);
        assert_eq!(m.to_meters(None), Some(25.0));
    }

    #[test]
    fn test_position_json() {
        let json = serde_json::to_string(&LongitudinalPosition::Fraction(0.5)).unwrap();
        assert_eq!(json, r#"{"unit":"Fraction","value":0.5}"#);
    }

    #[test]
    fn test_resolve_all_sources() {
        let fills = [TankFill::new("WB1", 0.5)];
        let pens = [PenLoad {
            pen_id: "P1".to_string(),
            head_count: 10,
            mass_per_head_t: 0.5,
            vcg_offset_m: 1.5,
        }];
        let fixed = [FixedWeight::new("Stores", 20.0, 8.0, LongitudinalPosition::Meters(30.0), 0.0)];
        let manifest = resolve(&ship(), &fills, &pens, &fixed, &Limits::default());

        assert!(manifest.issues.is_empty());
        assert_eq!(manifest.items.len(), 4);
        assert_eq!(manifest.items[0].kind, WeightKind::Lightship);

        let tank = &manifest.items[1];
        assert!((tank.mass_t - 205.0).abs() < 1e-9);
        assert_eq!(tank.free_surface_moment_tm, Some(300.0));

        let pen = &manifest.items[2];
        assert!((pen.mass_t - 5.0).abs() < 1e-12);
        assert!((pen.vcg_m - 13.5).abs() < 1e-12);
    }

    #[test]
    fn test_full_tank_has_no_free_surface() {
        let manifest = resolve(&ship(), &[TankFill::new("WB1", 0.98)], &[], &[], &Limits::default());
        assert_eq!(manifest.items[1].free_surface_moment_tm, None);
    }

    #[test]
    fn test_density_override_scales_fsm() {
        let fills = [TankFill::new("WB1", 0.5).with_density(2.05)];
        let manifest = resolve(&ship(), &fills, &[], &[], &Limits::default());
        let tank = &manifest.items[1];
        assert!((tank.mass_t - 410.0).abs() < 1e-9);
        assert!((tank.free_surface_moment_tm.unwrap() - 600.0).abs() < 1e-9);
    }

    #[test]
    fn test_cog_override() {
        let cog = CogOverride {
            vcg_m: 1.0,
            lcg: LongitudinalPosition::Meters(70.0),
            tcg_m: -2.0,
        };
        let manifest = resolve(&ship(), &[TankFill::new("WB1", 0.5).with_cog(cog)], &[], &[], &Limits::default());
        let tank = &manifest.items[1];
        assert_eq!(tank.vcg_m, 1.0);
        assert_eq!(tank.lcg, LongitudinalPosition::Meters(70.0));
        assert_eq!(tank.tcg_m, -2.0);
    }

    #[test]
    fn test_unknown_references_are_issues() {
        let pens = [PenLoad {
            pen_id: "NOPE".to_string(),
            head_count: 5,
            mass_per_head_t: 0.5,
            vcg_offset_m: 0.0,
        }];
        let manifest = resolve(&ship(), &[TankFill::new("XX", 0.5)], &pens, &[], &Limits::default());
        assert_eq!(manifest.items.len(), 1);
        assert!(manifest.issues.contains(&LoadingIssue::UnknownTank { tank_id: "XX".to_string() }));
        assert!(manifest.issues.contains(&LoadingIssue::UnknownPen { pen_id: "NOPE".to_string() }));
    }

    #[test]
    fn test_invalid_items_excluded() {
        let fixed = [FixedWeight::new("Bad", -5.0, 1.0, LongitudinalPosition::Meters(10.0), 0.0)];
        let manifest = resolve(&ship(), &[TankFill::new("WB1", 1.2)], &[], &fixed, &Limits::default());
        assert_eq!(manifest.items.len(), 1);
        assert_eq!(manifest.issues.len(), 2);
        assert!(manifest
            .issues
            .iter()
            .all(|i| matches!(i, LoadingIssue::InvalidItem { .. })));
    }

    #[test]
    fn test_pen_over_capacity_still_counted() {
        let pens = [PenLoad {
            pen_id: "P1".to_string(),
            head_count: 25,
            mass_per_head_t: 0.5,
            vcg_offset_m: 0.0,
        }];
        let manifest = resolve(&ship(), &[], &pens, &[], &Limits::default());
        assert_eq!(manifest.items.len(), 2);
        assert_eq!(
            manifest.issues,
            vec![LoadingIssue::PenOverCapacity {
                pen_id: "P1".to_string(),
                head_count: 25,
                capacity_head: 20
            }]
        );
    }
}
