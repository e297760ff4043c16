//! Referential-integrity predicates shared by the mutation operations.
//!
//! Centralized here so every delete and uniqueness check uses the same
//! logic, and so a blocked operation can name exactly which records stand
//! in its way.

use crate::domain::kind::Kind;
use crate::store::Store;

/// Every live record that holds a reference to `(kind, id)`.
///
/// Only the kinds whose deletion is guarded have referencers worth
/// collecting; scenario and target references are cascade-detached, and
/// measurements and initiatives are referenced by nothing.
pub fn referencers_of(kind: Kind, id: &str, store: &Store) -> Vec<(Kind, String)> {
    let mut found = Vec::new();
    match kind {
        Kind::Track => {
            for factor in store.factors.values() {
                if factor.track_id == id {
                    found.push((Kind::Factor, factor.id.clone()));
                }
            }
            for measurement in store.measurements.values() {
                if measurement.track_id == id {
                    found.push((Kind::Measurement, measurement.id.clone()));
                }
            }
            for target in store.targets.values() {
                if target.track_id == id {
                    found.push((Kind::Target, target.id.clone()));
                }
            }
        }
        Kind::Factor => {
            for measurement in store.measurements.values() {
                if measurement.factor_id == id {
                    found.push((Kind::Measurement, measurement.id.clone()));
                }
            }
        }
        Kind::Supplier => {
            for measurement in store.measurements.values() {
                if measurement.supplier_id.as_deref() == Some(id) {
                    found.push((Kind::Measurement, measurement.id.clone()));
                }
            }
            for target in store.targets.values() {
                if target.supplier_id.as_deref() == Some(id) {
                    found.push((Kind::Target, target.id.clone()));
                }
            }
        }
        Kind::Measurement | Kind::Target | Kind::Initiative | Kind::Scenario => {}
    }
    found
}

/// A supplier may back at most one target. Returns the id of the target
/// already holding `supplier_id`, if any, ignoring `excluding_target`
/// (the target being updated may keep its own supplier).
pub fn supplier_taken_by(
    supplier_id: &str,
    excluding_target: Option<&str>,
    store: &Store,
) -> Option<String> {
    store
        .targets
        .values()
        .find(|target| {
            target.supplier_id.as_deref() == Some(supplier_id)
                && Some(target.id.as_str()) != excluding_target
        })
        .map(|target| target.id.clone())
}

#[cfg(test)]
mod tests {
    use super::{referencers_of, supplier_taken_by};
    use crate::domain::kind::Kind;
    use crate::domain::records::{Factor, Target};
    use crate::store::Store;

    fn factor_on(track_id: &str, id: &str) -> Factor {
        Factor {
            id: id.to_string(),
            track_id: track_id.to_string(),
            name: "diesel".to_string(),
            value: 2.7,
            unit: "kgCO2e/l".to_string(),
            category: "fuel".to_string(),
            created_at: "2026-01-01T00:00:00Z".to_string(),
            updated_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    fn target_with_supplier(id: &str, supplier_id: Option<&str>) -> Target {
        Target {
            id: id.to_string(),
            track_id: "trk-1".to_string(),
            scenario_id: None,
            supplier_id: supplier_id.map(str::to_string),
            baseline_value: 100.0,
            target_percentage: 20.0,
            target_value: 80.0,
            created_at: "2026-01-01T00:00:00Z".to_string(),
            updated_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn track_referencers_name_each_dependent_record() {
        let mut store = Store::new();
        store.put_factor(factor_on("trk-1", "fac-1"));
        store.put_factor(factor_on("trk-2", "fac-2"));
        store.put_target(target_with_supplier("tgt-1", None));

        let refs = referencers_of(Kind::Track, "trk-1", &store);
        assert_eq!(
            refs,
            vec![
                (Kind::Factor, "fac-1".to_string()),
                (Kind::Target, "tgt-1".to_string()),
            ]
        );
        assert!(referencers_of(Kind::Track, "trk-3", &store).is_empty());
    }

    #[test]
    fn supplier_uniqueness_ignores_the_excluded_target() {
        let mut store = Store::new();
        store.put_target(target_with_supplier("tgt-1", Some("sup-1")));

        assert_eq!(
            supplier_taken_by("sup-1", None, &store),
            Some("tgt-1".to_string())
        );
        assert_eq!(supplier_taken_by("sup-1", Some("tgt-1"), &store), None);
        assert_eq!(supplier_taken_by("sup-2", None, &store), None);
    }
}
