//! Computation rules for every derived field.
//!
//! All functions here are pure and deterministic so the propagator can
//! re-invoke them freely. They raise no business errors: callers resolve
//! and validate references before computing.

use crate::domain::plan::Plan;
use crate::domain::records::{Factor, Measurement};
use crate::store::Store;

/// `quantity * factor.value`. The caller has already resolved the factor;
/// a dangling `factor_id` is a reference error at the operation boundary,
/// never a silent zero here.
pub fn measurement_value(measurement: &Measurement, factor: &Factor) -> f64 {
    measurement.quantity * factor.value
}

/// Sum of `measurement_value` over all measurements on the given track,
/// each re-evaluated against its own factor.
///
/// A measurement whose factor is gone cannot occur in a guarded store
/// (factor deletes are blocked while referenced); such a row is skipped
/// rather than counted stale.
pub fn track_total(track_id: &str, store: &Store) -> f64 {
    store
        .measurements
        .values()
        .filter(|m| m.track_id == track_id)
        .filter_map(|m| store.factor(&m.factor_id).map(|f| measurement_value(m, f)))
        .sum()
}

/// `baseline * (1 - percentage / 100)`. Percentage is taken as-is; range
/// validation belongs to the form boundary, not this rule.
pub fn target_value(baseline_value: f64, target_percentage: f64) -> f64 {
    baseline_value * (1.0 - target_percentage / 100.0)
}

/// Sum over the referenced targets of `target_value * |plan fraction|`.
/// Yields 0 when no referenced target exists.
pub fn initiative_absolute(plan: &Plan, target_ids: &[String], store: &Store) -> f64 {
    let p = plan.magnitude();
    target_ids
        .iter()
        .filter_map(|id| store.target(id))
        .map(|target| target.target_value * p)
        .sum()
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{initiative_absolute, measurement_value, target_value, track_total};
    use crate::domain::plan::Plan;
    use crate::domain::records::{Factor, Measurement, Target};
    use crate::store::Store;

    fn factor(id: &str, track_id: &str, value: f64) -> Factor {
        Factor {
            id: id.to_string(),
            track_id: track_id.to_string(),
            name: "grid electricity".to_string(),
            value,
            unit: "kgCO2e/kWh".to_string(),
            category: "energy".to_string(),
            created_at: "2026-01-01T00:00:00Z".to_string(),
            updated_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    fn measurement(id: &str, track_id: &str, factor_id: &str, quantity: f64) -> Measurement {
        Measurement {
            id: id.to_string(),
            track_id: track_id.to_string(),
            factor_id: factor_id.to_string(),
            supplier_id: None,
            quantity,
            unit: "kgCO2e/kWh".to_string(),
            calculated_value: 0.0,
            created_at: "2026-01-01T00:00:00Z".to_string(),
            updated_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    fn target(id: &str, target_value: f64) -> Target {
        Target {
            id: id.to_string(),
            track_id: "trk-1".to_string(),
            scenario_id: None,
            supplier_id: None,
            baseline_value: 100.0,
            target_percentage: 25.0,
            target_value,
            created_at: "2026-01-01T00:00:00Z".to_string(),
            updated_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn measurement_value_is_quantity_times_factor_value() {
        let f = factor("fac-1", "trk-1", 2.0);
        let m = measurement("mea-1", "trk-1", "fac-1", 10.0);
        assert_eq!(measurement_value(&m, &f), 20.0);
    }

    #[test]
    fn track_total_sums_only_matching_measurements() {
        let mut store = Store::new();
        store.put_factor(factor("fac-1", "trk-1", 2.0));
        store.put_factor(factor("fac-2", "trk-2", 3.0));
        store.put_measurement(measurement("mea-1", "trk-1", "fac-1", 10.0));
        store.put_measurement(measurement("mea-2", "trk-1", "fac-1", 5.0));
        store.put_measurement(measurement("mea-3", "trk-2", "fac-2", 1.0));

        assert_eq!(track_total("trk-1", &store), 30.0);
        assert_eq!(track_total("trk-2", &store), 3.0);
        assert_eq!(track_total("trk-none", &store), 0.0);
    }

    #[test]
    fn track_total_is_idempotent() {
        let mut store = Store::new();
        store.put_factor(factor("fac-1", "trk-1", 1.5));
        store.put_measurement(measurement("mea-1", "trk-1", "fac-1", 4.0));

        let first = track_total("trk-1", &store);
        let second = track_total("trk-1", &store);
        assert_eq!(first, second);
    }

    #[test]
    fn target_value_applies_the_reduction_percentage_unclamped() {
        assert_eq!(target_value(100.0, 25.0), 75.0);
        assert_eq!(target_value(100.0, 0.0), 100.0);
        assert_eq!(target_value(100.0, 100.0), 0.0);
        // Out-of-range percentages are not clamped by this rule.
        assert_eq!(target_value(100.0, 150.0), -50.0);
        assert_eq!(target_value(100.0, -10.0), 110.0);
    }

    #[test]
    fn initiative_absolute_sums_referenced_targets_by_plan_magnitude() {
        let mut store = Store::new();
        store.put_target(target("tgt-1", 75.0));
        store.put_target(target("tgt-2", 25.0));

        let plan = Plan::from_str("-10%").expect("plan should parse");
        let ids = vec!["tgt-1".to_string(), "tgt-2".to_string()];
        assert_eq!(initiative_absolute(&plan, &ids, &store), 10.0);

        let missing = vec!["tgt-gone".to_string()];
        assert_eq!(initiative_absolute(&plan, &missing, &store), 0.0);
        assert_eq!(initiative_absolute(&plan, &[], &store), 0.0);
    }
}
