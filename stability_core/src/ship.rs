//! # Ship Profile
//!
//! Principal dimensions, lightship, ancillary geometry and the tank and pen
//! registers of one vessel. A condition refers to tanks and pens by id; the
//! profile holds their fixed geometry.
//!
//! Principal dimensions are `Option<Meters>`: a dimension that was never
//! entered is `None`, and every check that needs it is reported as not
//! applicable instead of being compared against zero.
//!
//! ## Example
//!
//! ```rust
//! use stability_core::ship::{ShipProfile, TankDefinition, TankCategory};
//! use stability_core::loading::LongitudinalPosition;
//! use stability_core::units::Meters;
//!
//! let ship = ShipProfile::new("MV Example")
//!     .with_dimensions(100.0, 18.0, 9.0, 6.0)
//!     .with_tank(TankDefinition::new("WB1", "No.1 WB Tank", TankCategory::WaterBallast, 500.0, 1.025)
//!         .at(LongitudinalPosition::Fraction(0.8), 2.5, 0.0));
//!
//! assert_eq!(ship.length_overall_m, Some(Meters(100.0)));
//! assert!(ship.tank("WB1").is_some());
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::interpolation::interpolate_clamped;
use crate::loading::{LongitudinalPosition, PenLoad};
use crate::units::{known, known_meters, Meters};

// ============================================================================
// Ship Profile
// ============================================================================

/// One vessel: dimensions, lightship and compartment registers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShipProfile {
    /// Ship name
    pub name: String,

    /// IMO number (free text, may be empty)
    #[serde(default)]
    pub imo_number: String,

    /// Length overall; also the reference length for LCG fractions
    #[serde(default, deserialize_with = "known_meters")]
    pub length_overall_m: Option<Meters>,

    /// Moulded breadth
    #[serde(default, deserialize_with = "known_meters")]
    pub breadth_m: Option<Meters>,

    /// Moulded depth
    #[serde(default, deserialize_with = "known_meters")]
    pub depth_m: Option<Meters>,

    /// Design (summer) draft
    #[serde(default, deserialize_with = "known_meters")]
    pub design_draft_m: Option<Meters>,

    /// Block coefficient; `None` uses the configured default
    #[serde(default)]
    pub block_coefficient: Option<f64>,

    /// Lightship weight and centre of gravity
    #[serde(default)]
    pub lightship: Option<Lightship>,

    /// Propeller, bridge and mast geometry
    #[serde(default)]
    pub ancillary: AncillaryGeometry,

    /// Tank register
    #[serde(default)]
    pub tanks: Vec<TankDefinition>,

    /// Livestock pen register
    #[serde(default)]
    pub pens: Vec<PenDefinition>,
}

impl ShipProfile {
    /// Create a profile with no dimensions known
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set length, breadth, depth and design draft. Zero means unknown.
    pub fn with_dimensions(mut self, length: f64, breadth: f64, depth: f64, design_draft: f64) -> Self {
        self.length_overall_m = Some(Meters(length)).filter(|m| m.is_known());
        self.breadth_m = Some(Meters(breadth)).filter(|m| m.is_known());
        self.depth_m = Some(Meters(depth)).filter(|m| m.is_known());
        self.design_draft_m = Some(Meters(design_draft)).filter(|m| m.is_known());
        self
    }

    pub fn with_block_coefficient(mut self, cb: f64) -> Self {
        self.block_coefficient = Some(cb);
        self
    }

    pub fn with_lightship(mut self, lightship: Lightship) -> Self {
        self.lightship = Some(lightship);
        self
    }

    pub fn with_tank(mut self, tank: TankDefinition) -> Self {
        self.tanks.push(tank);
        self
    }

    pub fn with_pen(mut self, pen: PenDefinition) -> Self {
        self.pens.push(pen);
        self
    }

    /// Look up a tank by id
    pub fn tank(&self, id: &str) -> Option<&TankDefinition> {
        self.tanks.iter().find(|t| t.id == id)
    }

    /// Look up a pen by id
    pub fn pen(&self, id: &str) -> Option<&PenDefinition> {
        self.pens.iter().find(|p| p.id == id)
    }

    /// Known length overall (m)
    pub fn length(&self) -> Option<f64> {
        known(self.length_overall_m)
    }

    /// Known breadth (m)
    pub fn breadth(&self) -> Option<f64> {
        known(self.breadth_m)
    }

    /// Known depth (m)
    pub fn depth(&self) -> Option<f64> {
        known(self.depth_m)
    }

    /// Known design draft (m)
    pub fn design_draft(&self) -> Option<f64> {
        known(self.design_draft_m)
    }

    /// Block coefficient, falling back to `default_cb`
    pub fn block_coefficient_or(&self, default_cb: f64) -> f64 {
        self.block_coefficient.unwrap_or(default_cb)
    }

    /// Propeller centre height above keel (default 5% of depth)
    pub fn prop_centre_m(&self) -> Option<f64> {
        self.ancillary
            .prop_centre_m
            .or_else(|| self.depth().map(|d| 0.05 * d))
    }

    /// Propeller diameter (default 3% of length)
    pub fn prop_diameter_m(&self) -> Option<f64> {
        self.ancillary
            .prop_diameter_m
            .or_else(|| self.length().map(|l| 0.03 * l))
    }

    /// Bridge position from AP (default 85% of length)
    pub fn bridge_from_ap_m(&self) -> Option<f64> {
        self.ancillary
            .bridge_from_ap_m
            .or_else(|| self.length().map(|l| 0.85 * l))
    }

    /// Bridge eye height above keel (default equal to depth)
    pub fn bridge_height_m(&self) -> Option<f64> {
        self.ancillary.bridge_height_m.or_else(|| self.depth())
    }

    /// Highest fixed point above keel (default 1.8 x depth)
    pub fn mast_height_m(&self) -> Option<f64> {
        self.ancillary
            .mast_height_m
            .or_else(|| self.depth().map(|d| 1.8 * d))
    }
}

/// Lightship weight and centre of gravity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lightship {
    pub mass_t: f64,
    pub vcg_m: f64,
    pub lcg: LongitudinalPosition,
    #[serde(default)]
    pub tcg_m: f64,
}

/// Optional operational geometry. Missing values are estimated from the
/// principal dimensions by the accessors on [`ShipProfile`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AncillaryGeometry {
    pub prop_centre_m: Option<f64>,
    pub prop_diameter_m: Option<f64>,
    pub bridge_from_ap_m: Option<f64>,
    pub bridge_height_m: Option<f64>,
    pub mast_height_m: Option<f64>,
}

// ============================================================================
// Tanks
// ============================================================================

/// Tank grouping used by the loading forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TankCategory {
    WaterBallast,
    FreshWater,
    HeavyFuelOil,
    DieselOil,
    LubeOil,
    Dung,
    Fodder,
    #[default]
    Misc,
}

/// Free-surface moment data for a tank.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FreeSurfaceData {
    /// One FSM value (t·m) regardless of filling
    Constant { fsm_tm: f64 },
    /// FSM as a function of liquid volume
    Table { points: Vec<FsmPoint> },
}

/// One row of a volume → FSM table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FsmPoint {
    pub volume_m3: f64,
    pub fsm_tm: f64,
}

impl FreeSurfaceData {
    /// FSM (t·m) at the given liquid volume.
    ///
    /// Table lookups are linear between rows and clamped at the ends.
    /// An empty table yields `None`.
    pub fn fsm_at(&self, volume_m3: f64) -> Option<f64> {
        match self {
            FreeSurfaceData::Constant { fsm_tm } => Some(*fsm_tm),
            FreeSurfaceData::Table { points } => {
                let mut sorted = points.clone();
                sorted.sort_by(|a, b| a.volume_m3.total_cmp(&b.volume_m3));
                let xs: Vec<f64> = sorted.iter().map(|p| p.volume_m3).collect();
                let ys: Vec<f64> = sorted.iter().map(|p| p.fsm_tm).collect();
                interpolate_clamped(volume_m3, &xs, &ys)
            }
        }
    }
}

/// Fixed geometry of one tank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TankDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: TankCategory,
    /// Usable capacity (m³)
    pub capacity_m3: f64,
    /// Default liquid density (t/m³)
    pub density_t_m3: f64,
    /// Centre of gravity when filled
    pub vcg_m: f64,
    pub lcg: LongitudinalPosition,
    #[serde(default)]
    pub tcg_m: f64,
    /// Free-surface moment data, if known
    #[serde(default)]
    pub free_surface: Option<FreeSurfaceData>,
}

impl TankDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: TankCategory,
        capacity_m3: f64,
        density_t_m3: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            capacity_m3,
            density_t_m3,
            vcg_m: 0.0,
            lcg: LongitudinalPosition::Fraction(0.5),
            tcg_m: 0.0,
            free_surface: None,
        }
    }

    /// Set the centre of gravity
    pub fn at(mut self, lcg: LongitudinalPosition, vcg_m: f64, tcg_m: f64) -> Self {
        self.lcg = lcg;
        self.vcg_m = vcg_m;
        self.tcg_m = tcg_m;
        self
    }

    pub fn with_free_surface(mut self, data: FreeSurfaceData) -> Self {
        self.free_surface = Some(data);
        self
    }
}

// ============================================================================
// Livestock Pens
// ============================================================================

/// Fixed geometry of one livestock pen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PenDefinition {
    pub id: String,
    pub name: String,
    /// Deck label (e.g. "DK1")
    #[serde(default)]
    pub deck: String,
    /// Deck VCG above keel (m)
    pub vcg_m: f64,
    /// LCG from AP (m)
    pub lcg_m: f64,
    #[serde(default)]
    pub tcg_m: f64,
    #[serde(default)]
    pub area_m2: f64,
    /// Maximum head count; 0 means unlimited
    #[serde(default)]
    pub capacity_head: u32,
}

impl PenDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>, vcg_m: f64, lcg_m: f64, tcg_m: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            deck: String::new(),
            vcg_m,
            lcg_m,
            tcg_m,
            area_m2: 0.0,
            capacity_head: 0,
        }
    }

    pub fn with_area(mut self, area_m2: f64, capacity_head: u32) -> Self {
        self.area_m2 = area_m2;
        self.capacity_head = capacity_head;
        self
    }

    /// True when `head_count` exceeds a set capacity
    pub fn is_over_capacity(&self, head_count: u32) -> bool {
        self.capacity_head > 0 && head_count > self.capacity_head
    }
}

// ============================================================================
// Cargo Library
// ============================================================================

/// A livestock cargo type from the user's library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CargoType {
    pub name: String,
    /// Average weight per head (kg)
    pub avg_weight_per_head_kg: f64,
    /// Cargo VCG above the pen deck (m)
    pub vcg_from_deck_m: f64,
    /// Deck area required per head (m²)
    pub deck_area_per_head_m2: f64,
}

impl CargoType {
    pub fn new(name: impl Into<String>, avg_weight_per_head_kg: f64, vcg_from_deck_m: f64, deck_area_per_head_m2: f64) -> Self {
        Self {
            name: name.into(),
            avg_weight_per_head_kg,
            vcg_from_deck_m,
            deck_area_per_head_m2,
        }
    }

    /// Heads that fit in a pen by deck area
    pub fn heads_for_area(&self, area_m2: f64) -> u32 {
        if self.deck_area_per_head_m2 <= 0.0 || area_m2 <= 0.0 {
            return 0;
        }
        (area_m2 / self.deck_area_per_head_m2).floor() as u32
    }

    /// Build a pen load of this cargo
    pub fn load(&self, pen_id: impl Into<String>, head_count: u32) -> PenLoad {
        PenLoad {
            pen_id: pen_id.into(),
            head_count,
            mass_per_head_t: self.avg_weight_per_head_kg / 1000.0,
            vcg_offset_m: self.vcg_from_deck_m,
        }
    }

    /// Fill a pen to its area limit (or its head capacity, if lower)
    pub fn fill_pen(&self, pen: &PenDefinition) -> PenLoad {
        let mut heads = self.heads_for_area(pen.area_m2);
        if pen.capacity_head > 0 {
            heads = heads.min(pen.capacity_head);
        }
        self.load(pen.id.clone(), heads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dimensions_are_unknown() {
        let ship = ShipProfile::new("Test").with_dimensions(0.0, 18.0, 9.0, 0.0);
        assert!(ship.length().is_none());
        assert_eq!(ship.breadth(), Some(18.0));
        assert!(ship.design_draft().is_none());
    }

    #[test]
    fn test_profile_json_zero_length() {
        let json = r#"{ "name": "Test", "length_overall_m": 0.0, "breadth_m": 18.0 }"#;
        let ship: ShipProfile = serde_json::from_str(json).unwrap();
        assert!(ship.length_overall_m.is_none());
        assert_eq!(ship.breadth(), Some(18.0));
        assert!(ship.tanks.is_empty());
    }

    #[test]
    fn test_ancillary_defaults() {
        let ship = ShipProfile::new("Test").with_dimensions(100.0, 18.0, 9.0, 6.0);
        assert!((ship.prop_centre_m().unwrap() - 0.45).abs() < 1e-12);
        assert!((ship.prop_diameter_m().unwrap() - 3.0).abs() < 1e-12);
        assert!((ship.bridge_from_ap_m().unwrap() - 85.0).abs() < 1e-12);
        assert_eq!(ship.bridge_height_m(), Some(9.0));
        assert!((ship.mast_height_m().unwrap() - 16.2).abs() < 1e-12);

        let unknown = ShipProfile::new("Blank");
        assert!(unknown.prop_diameter_m().is_none());
        assert!(unknown.mast_height_m().is_none());
    }

    #[test]
    fn test_fsm_table_clamped() {
        let data = FreeSurfaceData::Table {
            points: vec![
                FsmPoint { volume_m3: 100.0, fsm_tm: 200.0 },
                FsmPoint { volume_m3: 0.0, fsm_tm: 0.0 },
                FsmPoint { volume_m3: 200.0, fsm_tm: 300.0 },
            ],
        };
        assert_eq!(data.fsm_at(50.0), Some(100.0));
        assert_eq!(data.fsm_at(150.0), Some(250.0));
        assert_eq!(data.fsm_at(500.0), Some(300.0));
        assert_eq!(FreeSurfaceData::Table { points: vec![] }.fsm_at(1.0), None);
        assert_eq!(FreeSurfaceData::Constant { fsm_tm: 42.0 }.fsm_at(1.0), Some(42.0));
    }

    #[test]
    fn test_pen_capacity() {
        let pen = PenDefinition::new("P1", "PEN 1-1", 12.0, 40.0, 0.0).with_area(50.0, 20);
        assert!(!pen.is_over_capacity(20));
        assert!(pen.is_over_capacity(21));
        let open = PenDefinition::new("P2", "PEN 1-2", 12.0, 45.0, 0.0);
        assert!(!open.is_over_capacity(10_000));
    }

    #[test]
    fn test_cargo_type_fills_pen() {
        let cattle = CargoType::new("Cattle", 520.0, 1.5, 1.85);
        let pen = PenDefinition::new("P1", "PEN 1-1", 12.0, 40.0, 0.0).with_area(50.0, 20);
        // 50 / 1.85 = 27 heads by area, capped at 20 by capacity
        let load = cattle.fill_pen(&pen);
        assert_eq!(load.head_count, 20);
        assert!((load.mass_per_head_t - 0.52).abs() < 1e-12);
        assert_eq!(cattle.heads_for_area(50.0), 27);
    }
}
