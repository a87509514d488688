//! Draft-indexed hydrostatic table.
//!
//! Lookups are linear between bracketing samples and clamped below the first
//! sample. Above the last sample both the forward and the inverse lookup
//! extrapolate linearly from the last two samples; the inverse lookup flags
//! the result as out of table.

use serde::{Deserialize, Serialize};

use super::{checked_block_coefficient, CurveAttribute, DraftLookup, HydrostaticModel, HydrostaticSource};
use crate::config::HydrostaticSettings;
use crate::equations::hydrostatic::{
    box_displacement, kb_morrish, waterplane_inertia_longitudinal, waterplane_inertia_transverse,
};
use crate::equations::interpolation::interpolate_extrapolating;
use crate::equations::registry::Equation;
use crate::errors::{CalcResult, StabilityError};
use crate::ship::ShipProfile;

/// One row of a hydrostatic table.
///
/// Only draft and displacement are required; a missing column makes
/// [`HydrostaticModel::attribute_at`] return `None` for that attribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveSample {
    pub draft_m: f64,
    pub displacement_t: f64,
    #[serde(default)]
    pub kb_m: Option<f64>,
    /// LCB as a fraction of length from AP (0.5 = amidships)
    #[serde(default)]
    pub lcb_fraction: Option<f64>,
    #[serde(default)]
    pub i_t_m4: Option<f64>,
    #[serde(default)]
    pub i_l_m4: Option<f64>,
}

impl CurveSample {
    /// A sample with draft and displacement only
    pub fn new(draft_m: f64, displacement_t: f64) -> Self {
        Self {
            draft_m,
            displacement_t,
            kb_m: None,
            lcb_fraction: None,
            i_t_m4: None,
            i_l_m4: None,
        }
    }

    fn value(&self, attribute: CurveAttribute) -> Option<f64> {
        match attribute {
            CurveAttribute::Displacement => Some(self.displacement_t),
            CurveAttribute::Kb => self.kb_m,
            CurveAttribute::LcbFraction => self.lcb_fraction,
            CurveAttribute::TransverseInertia => self.i_t_m4,
            CurveAttribute::LongitudinalInertia => self.i_l_m4,
        }
    }

    fn is_finite(&self) -> bool {
        let optional = [self.kb_m, self.lcb_fraction, self.i_t_m4, self.i_l_m4];
        self.draft_m.is_finite()
            && self.displacement_t.is_finite()
            && optional.iter().flatten().all(|v| v.is_finite())
    }
}

/// Validated hydrostatic table, read-only after construction.
///
/// Serializes as `{ "source", "samples" }` so a generated table keeps its
/// provenance. Deserializing also accepts a bare list of samples (a yard
/// table) and runs the same validation as [`HydrostaticCurveSet::from_external`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "CurveSetInput", into = "CurveSetDocument")]
pub struct HydrostaticCurveSet {
    samples: Vec<CurveSample>,
    source: HydrostaticSource,
    drafts: Vec<f64>,
    displacements: Vec<f64>,
}

impl HydrostaticCurveSet {
    /// Validate a yard-supplied table.
    ///
    /// Needs at least two samples, strictly increasing draft, non-decreasing
    /// displacement, non-negative draft and finite values throughout.
    pub fn from_external(samples: Vec<CurveSample>) -> CalcResult<Self> {
        Self::validated(samples, HydrostaticSource::External)
    }

    /// Generate a table from principal dimensions.
    ///
    /// Samples `settings.curve_samples` drafts evenly from 0 to
    /// `curve_draft_factor` x design draft, with box-form displacement,
    /// Morrish KB, LCB amidships and rectangular-waterplane inertias.
    pub fn build_from_dimensions(ship: &ShipProfile, settings: &HydrostaticSettings) -> CalcResult<Self> {
        let length = ship
            .length()
            .ok_or_else(|| StabilityError::missing_field("length_overall_m"))?;
        let breadth = ship.breadth().ok_or_else(|| StabilityError::missing_field("breadth_m"))?;
        let design_draft = ship
            .design_draft()
            .ok_or_else(|| StabilityError::missing_field("design_draft_m"))?;
        let cb = checked_block_coefficient(ship, settings)?;
        let rho = settings.water_density_t_m3;
        let n = settings.curve_samples.max(2);
        let top = design_draft * settings.curve_draft_factor.max(1.0);

        let i_t = waterplane_inertia_transverse(length, breadth);
        let i_l = waterplane_inertia_longitudinal(length, breadth);

        let samples = (0..n)
            .map(|i| {
                let t = top * i as f64 / (n - 1) as f64;
                CurveSample {
                    draft_m: t,
                    displacement_t: box_displacement(length, breadth, t, cb, rho),
                    kb_m: Some(kb_morrish(cb, t)),
                    lcb_fraction: Some(0.5),
                    i_t_m4: Some(i_t),
                    i_l_m4: Some(i_l),
                }
            })
            .collect();

        Self::validated(samples, HydrostaticSource::Formula)
    }

    fn validated(samples: Vec<CurveSample>, source: HydrostaticSource) -> CalcResult<Self> {
        if samples.len() < 2 {
            return Err(StabilityError::out_of_range_curve(format!(
                "need at least 2 samples, got {}",
                samples.len()
            )));
        }
        for (i, sample) in samples.iter().enumerate() {
            if !sample.is_finite() {
                return Err(StabilityError::out_of_range_curve(format!("sample {} has a non-finite value", i)));
            }
            if sample.draft_m < 0.0 {
                return Err(StabilityError::out_of_range_curve(format!(
                    "sample {} has negative draft {}",
                    i, sample.draft_m
                )));
            }
        }
        for (i, pair) in samples.windows(2).enumerate() {
            if pair[1].draft_m <= pair[0].draft_m {
                return Err(StabilityError::out_of_range_curve(format!(
                    "draft not strictly increasing at sample {}",
                    i + 1
                )));
            }
            if pair[1].displacement_t < pair[0].displacement_t {
                return Err(StabilityError::out_of_range_curve(format!(
                    "displacement decreases at sample {}",
                    i + 1
                )));
            }
        }

        let drafts = samples.iter().map(|s| s.draft_m).collect();
        let displacements = samples.iter().map(|s| s.displacement_t).collect();
        Ok(Self {
            samples,
            source,
            drafts,
            displacements,
        })
    }

    /// The samples, ordered by draft
    pub fn samples(&self) -> &[CurveSample] {
        &self.samples
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false for a validated table
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Deepest tabulated draft (m)
    pub fn max_draft(&self) -> f64 {
        self.drafts.last().copied().unwrap_or(0.0)
    }
}

// ============================================================================
// Serialized form
// ============================================================================

fn external_source() -> HydrostaticSource {
    HydrostaticSource::External
}

#[derive(Serialize, Deserialize)]
struct CurveSetDocument {
    #[serde(default = "external_source")]
    source: HydrostaticSource,
    samples: Vec<CurveSample>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CurveSetInput {
    Samples(Vec<CurveSample>),
    Document(CurveSetDocument),
}

impl TryFrom<CurveSetInput> for HydrostaticCurveSet {
    type Error = StabilityError;

    fn try_from(input: CurveSetInput) -> Result<Self, Self::Error> {
        match input {
            CurveSetInput::Samples(samples) => Self::from_external(samples),
            CurveSetInput::Document(doc) => match doc.source {
                HydrostaticSource::BoxHull => Err(StabilityError::invalid_input(
                    "hydrostatics.source",
                    "BoxHull",
                    "a box hull has no sample table",
                )),
                source => Self::validated(doc.samples, source),
            },
        }
    }
}

impl From<HydrostaticCurveSet> for CurveSetDocument {
    fn from(set: HydrostaticCurveSet) -> Self {
        CurveSetDocument {
            source: set.source,
            samples: set.samples,
        }
    }
}

impl HydrostaticModel for HydrostaticCurveSet {
    fn displacement_at(&self, draft_m: f64) -> f64 {
        interpolate_extrapolating(draft_m, &self.drafts, &self.displacements)
            .map(|hit| hit.value)
            .unwrap_or(0.0)
    }

    fn draft_at(&self, displacement_t: f64) -> DraftLookup {
        match interpolate_extrapolating(displacement_t, &self.displacements, &self.drafts) {
            Some(hit) => DraftLookup {
                draft_m: hit.value,
                out_of_table: hit.extrapolated,
            },
            None => DraftLookup {
                draft_m: 0.0,
                out_of_table: true,
            },
        }
    }

    fn attribute_at(&self, draft_m: f64, attribute: CurveAttribute) -> Option<f64> {
        let column: Option<Vec<f64>> = self.samples.iter().map(|s| s.value(attribute)).collect();
        let column = column?;
        interpolate_extrapolating(draft_m, &self.drafts, &column).map(|hit| hit.value)
    }

    fn source(&self) -> HydrostaticSource {
        self.source
    }

    fn equations(&self) -> Vec<Equation> {
        match self.source {
            HydrostaticSource::Formula => vec![
                Equation::BoxDisplacement,
                Equation::KbMorrish,
                Equation::WaterplaneInertiaTransverse,
                Equation::WaterplaneInertiaLongitudinal,
                Equation::CurveInterpolation,
            ],
            _ => vec![Equation::CurveInterpolation],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formula_table() -> HydrostaticCurveSet {
        let ship = ShipProfile::new("Test").with_dimensions(100.0, 18.0, 9.0, 6.0);
        HydrostaticCurveSet::build_from_dimensions(&ship, &HydrostaticSettings::default()).unwrap()
    }

    #[test]
    fn test_formula_table_shape() {
        let table = formula_table();
        assert_eq!(table.len(), 25);
        assert_eq!(table.samples()[0].draft_m, 0.0);
        assert!((table.max_draft() - 7.2).abs() < 1e-12);
        assert_eq!(table.source(), HydrostaticSource::Formula);
    }

    #[test]
    fn test_round_trip_within_table() {
        let table = formula_table();
        for &t in &[0.1, 0.5, 1.7, 3.3, 6.0, 7.1] {
            let lookup = table.draft_at(table.displacement_at(t));
            assert!((lookup.draft_m - t).abs() < 1e-9, "draft {} round trip gave {}", t, lookup.draft_m);
            assert!(!lookup.out_of_table);
        }
    }

    #[test]
    fn test_monotone_displacement() {
        let table = formula_table();
        let mut prev = table.displacement_at(0.0);
        for i in 1..=80 {
            let d = table.displacement_at(i as f64 * 0.1);
            assert!(d >= prev);
            prev = d;
        }
    }

    #[test]
    fn test_above_table_is_flagged() {
        let table = formula_table();
        let top_disp = table.displacement_at(7.2);
        let lookup = table.draft_at(top_disp * 1.1);
        assert!(lookup.out_of_table);
        assert!(lookup.draft_m > 7.2);
        // Extrapolation is consistent in both directions
        assert!((table.displacement_at(lookup.draft_m) - top_disp * 1.1).abs() < 1e-6);
    }

    #[test]
    fn test_clamped_below() {
        let table = HydrostaticCurveSet::from_external(vec![
            CurveSample::new(1.0, 1000.0),
            CurveSample::new(2.0, 2100.0),
        ])
        .unwrap();
        assert_eq!(table.displacement_at(0.5), 1000.0);
        assert_eq!(table.draft_at(500.0).draft_m, 1.0);
    }

    #[test]
    fn test_attribute_columns() {
        let table = formula_table();
        let kb = table.attribute_at(6.0, CurveAttribute::Kb).unwrap();
        assert!((kb - 0.4921 * 6.0).abs() < 1e-9);
        assert_eq!(table.attribute_at(3.0, CurveAttribute::LcbFraction), Some(0.5));

        let sparse = HydrostaticCurveSet::from_external(vec![
            CurveSample::new(0.0, 0.0),
            CurveSample::new(5.0, 5000.0),
        ])
        .unwrap();
        assert!(sparse.attribute_at(2.0, CurveAttribute::Kb).is_none());
        assert_eq!(sparse.attribute_at(2.0, CurveAttribute::Displacement), Some(2000.0));
    }

    #[test]
    fn test_rejects_malformed_tables() {
        let single = HydrostaticCurveSet::from_external(vec![CurveSample::new(1.0, 100.0)]);
        assert_eq!(single.unwrap_err().error_code(), "OUT_OF_RANGE_CURVE");

        let not_increasing = HydrostaticCurveSet::from_external(vec![
            CurveSample::new(1.0, 100.0),
            CurveSample::new(1.0, 200.0),
        ]);
        assert!(not_increasing.is_err());

        let decreasing = HydrostaticCurveSet::from_external(vec![
            CurveSample::new(1.0, 200.0),
            CurveSample::new(2.0, 100.0),
        ]);
        assert!(decreasing.is_err());

        let nan = HydrostaticCurveSet::from_external(vec![
            CurveSample::new(0.0, 0.0),
            CurveSample::new(1.0, f64::NAN),
        ]);
        assert!(nan.is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: HydrostaticCurveSet =
            serde_json::from_str(r#"[{"draft_m": 0.0, "displacement_t": 0.0}, {"draft_m": 4.0, "displacement_t": 4000.0}]"#)
                .unwrap();
        assert_eq!(ok.len(), 2);
        assert_eq!(ok.source(), HydrostaticSource::External);

        let bad = serde_json::from_str::<HydrostaticCurveSet>(r#"[{"draft_m": 1.0, "displacement_t": 10.0}]"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_serialized_table_keeps_source() {
        let json = serde_json::to_string(&formula_table()).unwrap();
        assert!(json.contains(r#""source":"Formula""#));

        let back: HydrostaticCurveSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back.source(), HydrostaticSource::Formula);
        assert_eq!(back.len(), 25);

        let doc: HydrostaticCurveSet = serde_json::from_str(
            r#"{"samples": [{"draft_m": 0.0, "displacement_t": 0.0}, {"draft_m": 4.0, "displacement_t": 4000.0}]}"#,
        )
        .unwrap();
        assert_eq!(doc.source(), HydrostaticSource::External);

        let boxed = serde_json::from_str::<HydrostaticCurveSet>(
            r#"{"source": "BoxHull", "samples": [{"draft_m": 0.0, "displacement_t": 0.0}, {"draft_m": 4.0, "displacement_t": 4000.0}]}"#,
        );
        assert!(boxed.is_err());
    }

    #[test]
    fn test_missing_dimensions() {
        let ship = ShipProfile::new("NoDraft").with_dimensions(100.0, 18.0, 9.0, 0.0);
        let err = HydrostaticCurveSet::build_from_dimensions(&ship, &HydrostaticSettings::default()).unwrap_err();
        assert_eq!(err, StabilityError::missing_field("design_draft_m"));
    }
}
