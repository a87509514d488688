//! Mass and centre-of-gravity summation over a weight manifest.

use serde::{Deserialize, Serialize};

use super::{LongitudinalPosition, WeightItem};
use crate::units::EPS;

/// Summed mass properties of a loading condition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadingState {
    /// Total mass, i.e. displacement (t)
    pub total_mass_t: f64,
    /// Vertical centre of gravity above keel (m)
    pub kg_m: f64,
    /// LCG from AP (m), when it can be expressed in meters
    pub lcg_m: Option<f64>,
    /// LCG as a fraction of length, when it can be normalized
    pub lcg_norm: Option<f64>,
    /// Transverse centre of gravity, starboard positive (m)
    pub tcg_m: f64,
    /// Sum of free-surface moments of slack tanks (t·m)
    pub free_surface_moment_tm: f64,
    /// Number of items summed
    pub item_count: usize,
    /// Positions mixed fractions and meters with no length to reconcile them
    pub lcg_unresolved: bool,
}

impl LoadingState {
    /// True for an empty (or all-zero) manifest
    pub fn is_empty(&self) -> bool {
        self.total_mass_t <= EPS
    }
}

/// Sum masses and first moments into a [`LoadingState`].
///
/// With a known `length`, every position is converted to meters and the
/// normalized LCG follows. Without one, an all-fraction manifest still gets
/// a normalized LCG and an all-meter manifest an absolute one; a mix leaves
/// the LCG unresolved. Zero total mass gives the zero state.
///
/// # Example
///
/// ```rust
/// use stability_core::loading::{aggregate, LongitudinalPosition, WeightItem, WeightKind};
///
/// let item = |mass: f64, x: f64| WeightItem {
///     id: "w".into(), name: "w".into(), kind: WeightKind::Fixed,
///     mass_t: mass, vcg_m: 5.0, lcg: LongitudinalPosition::Meters(x), tcg_m: 0.0,
///     free_surface_moment_tm: None, fill_fraction: None,
/// };
/// let state = aggregate(&[item(100.0, 40.0), item(100.0, 60.0)], Some(100.0));
/// assert_eq!(state.total_mass_t, 200.0);
/// assert_eq!(state.lcg_m, Some(50.0));
/// assert_eq!(state.lcg_norm, Some(0.5));
/// ```
pub fn aggregate(items: &[WeightItem], length: Option<f64>) -> LoadingState {
    let length = length.filter(|l| *l > EPS);

    let mut total_mass = 0.0;
    let mut v_moment = 0.0;
    let mut t_moment = 0.0;
    let mut fsm = 0.0;

    // Longitudinal moments kept per unit until it is clear they can be combined
    let mut frac_moment = 0.0;
    let mut frac_mass = 0.0;
    let mut meter_moment = 0.0;
    let mut meter_mass = 0.0;

    for item in items {
        total_mass += item.mass_t;
        v_moment += item.mass_t * item.vcg_m;
        t_moment += item.mass_t * item.tcg_m;
        fsm += item.free_surface_moment_tm.unwrap_or(0.0);

        if item.mass_t <= EPS {
            continue;
        }
        match (item.lcg, length) {
            (pos, Some(l)) => {
                meter_moment += item.mass_t * pos.to_meters(Some(l)).unwrap_or(0.0);
                meter_mass += item.mass_t;
            }
            (LongitudinalPosition::Fraction(f), None) => {
                frac_moment += item.mass_t * f;
                frac_mass += item.mass_t;
            }
            (LongitudinalPosition::Meters(x), None) => {
                meter_moment += item.mass_t * x;
                meter_mass += item.mass_t;
            }
        }
    }

    if total_mass <= EPS {
        return LoadingState {
            item_count: items.len(),
            free_surface_moment_tm: fsm,
            ..Default::default()
        };
    }

    let mixed = frac_mass > EPS && meter_mass > EPS;
    let (lcg_m, lcg_norm) = if mixed {
        (None, None)
    } else if frac_mass > EPS {
        (None, Some(frac_moment / frac_mass))
    } else if meter_mass > EPS {
        let lcg = meter_moment / meter_mass;
        (Some(lcg), length.map(|l| lcg / l))
    } else {
        (None, None)
    };

    LoadingState {
        total_mass_t: total_mass,
        kg_m: v_moment / total_mass,
        lcg_m,
        lcg_norm,
        tcg_m: t_moment / total_mass,
        free_surface_moment_tm: fsm,
        item_count: items.len(),
        lcg_unresolved: mixed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading::WeightKind;

    fn item(mass: f64, vcg: f64, lcg: LongitudinalPosition, tcg: f64) -> WeightItem {
        WeightItem {
            id: "w".to_string(),
            name: "w".to_string(),
            kind: WeightKind::Fixed,
            mass_t: mass,
            vcg_m: vcg,
            lcg,
            tcg_m: tcg,
            free_surface_moment_tm: None,
            fill_fraction: None,
        }
    }

    #[test]
    fn test_centres_of_gravity() {
        let items = [
            item(300.0, 4.0, LongitudinalPosition::Meters(30.0), 1.0),
            item(100.0, 8.0, LongitudinalPosition::Fraction(0.7), -1.0),
        ];
        let state = aggregate(&items, Some(100.0));
        assert_eq!(state.total_mass_t, 400.0);
        assert!((state.kg_m - 5.0).abs() < 1e-12);
        assert!((state.tcg_m - 0.5).abs() < 1e-12);
        assert!((state.lcg_m.unwrap() - 40.0).abs() < 1e-12);
        assert!((state.lcg_norm.unwrap() - 0.4).abs() < 1e-12);
        assert!(!state.lcg_unresolved);
        assert_eq!(state.item_count, 2);
    }

    #[test]
    fn test_zero_state() {
        let state = aggregate(&[], Some(100.0));
        assert!(state.is_empty());
        assert_eq!(state.kg_m, 0.0);
        assert!(state.lcg_m.is_none());

        let zero = aggregate(&[item(0.0, 4.0, LongitudinalPosition::Meters(30.0), 0.0)], None);
        assert!(zero.is_empty());
        assert_eq!(zero.item_count, 1);
    }

    #[test]
    fn test_unknown_length_fractions_only() {
        let items = [
            item(100.0, 4.0, LongitudinalPosition::Fraction(0.4), 0.0),
            item(100.0, 4.0, LongitudinalPosition::Fraction(0.6), 0.0),
        ];
        let state = aggregate(&items, None);
        assert!(state.lcg_m.is_none());
        assert!((state.lcg_norm.unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_length_meters_only() {
        let items = [item(100.0, 4.0, LongitudinalPosition::Meters(42.0), 0.0)];
        let state = aggregate(&items, None);
        assert_eq!(state.lcg_m, Some(42.0));
        assert!(state.lcg_norm.is_none());
    }

    #[test]
    fn test_unknown_length_mixed_is_unresolved() {
        let items = [
            item(100.0, 4.0, LongitudinalPosition::Fraction(0.4), 0.0),
            item(100.0, 4.0, LongitudinalPosition::Meters(42.0), 0.0),
        ];
        let state = aggregate(&items, None);
        assert!(state.lcg_unresolved);
        assert!(state.lcg_m.is_none());
        assert!(state.lcg_norm.is_none());
        // Vertical and transverse centres do not depend on length
        assert!((state.kg_m - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_free_surface_sum() {
        let mut a = item(100.0, 4.0, LongitudinalPosition::Meters(42.0), 0.0);
        a.free_surface_moment_tm = Some(120.0);
        let mut b = item(50.0, 2.0, LongitudinalPosition::Meters(20.0), 0.0);
        b.free_surface_moment_tm = Some(30.0);
        let state = aggregate(&[a, b], Some(100.0));
        assert!((state.free_surface_moment_tm - 150.0).abs() < 1e-12);
    }
}
