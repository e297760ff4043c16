//! Dependency-directed recompute of derived fields.
//!
//! The dependency graph is two levels deep (Factor → Measurement → Track,
//! Target → Initiative), so propagation is one bounded pass per mutation
//! with no fixpoint loop. Recompute always runs in dependency order:
//! measurements before track totals, target values before initiative
//! impacts.

use crate::compute;
use crate::ident;
use crate::store::{ChangeSet, Record, Store};

/// Recompute `total_emissions` for one track. No-op when the total is
/// already current, so back-to-back refreshes are idempotent.
pub fn refresh_track_total(store: &mut Store, changes: &mut ChangeSet, track_id: &str) {
    let total = compute::track_total(track_id, store);
    let Some(track) = store.tracks.get_mut(track_id) else {
        return;
    };
    if track.total_emissions == total {
        return;
    }
    track.total_emissions = total;
    track.updated_at = ident::now_utc_rfc3339();
    changes.upsert(Record::Track(track.clone()));
}

/// A factor's value, unit, or track changed: refresh every measurement
/// that used it (derived `track_id`, `unit`, `calculated_value`), then the
/// total of every track those measurements touched, old homes included.
pub fn refresh_factor_dependents(store: &mut Store, changes: &mut ChangeSet, factor_id: &str) {
    let Some(factor) = store.factor(factor_id).cloned() else {
        return;
    };

    let mut affected_tracks: Vec<String> = Vec::new();
    let measurement_ids: Vec<String> = store
        .measurements
        .values()
        .filter(|m| m.factor_id == factor_id)
        .map(|m| m.id.clone())
        .collect();

    for id in measurement_ids {
        let Some(measurement) = store.measurements.get_mut(&id) else {
            continue;
        };
        let calculated = measurement.quantity * factor.value;
        let unchanged = measurement.track_id == factor.track_id
            && measurement.unit == factor.unit
            && measurement.calculated_value == calculated;
        if unchanged {
            continue;
        }
        if !affected_tracks.contains(&measurement.track_id) {
            affected_tracks.push(measurement.track_id.clone());
        }
        measurement.track_id = factor.track_id.clone();
        measurement.unit = factor.unit.clone();
        measurement.calculated_value = calculated;
        measurement.updated_at = ident::now_utc_rfc3339();
        changes.upsert(Record::Measurement(measurement.clone()));
        if !affected_tracks.contains(&factor.track_id) {
            affected_tracks.push(factor.track_id.clone());
        }
    }

    for track_id in affected_tracks {
        refresh_track_total(store, changes, &track_id);
    }
}

/// A target's value changed (or the target vanished): refresh `absolute`
/// on every initiative whose `target_ids` includes it.
pub fn refresh_initiatives_for_target(store: &mut Store, changes: &mut ChangeSet, target_id: &str) {
    let initiative_ids: Vec<String> = store
        .initiatives
        .values()
        .filter(|i| i.target_ids.iter().any(|id| id == target_id))
        .map(|i| i.id.clone())
        .collect();

    for id in initiative_ids {
        refresh_initiative_absolute(store, changes, &id);
    }
}

/// Recompute one initiative's `absolute` from its current targets.
pub fn refresh_initiative_absolute(store: &mut Store, changes: &mut ChangeSet, initiative_id: &str) {
    let Some(initiative) = store.initiative(initiative_id) else {
        return;
    };
    let absolute = compute::initiative_absolute(&initiative.plan, &initiative.target_ids, store);
    let Some(initiative) = store.initiatives.get_mut(initiative_id) else {
        return;
    };
    if initiative.absolute == absolute {
        return;
    }
    initiative.absolute = absolute;
    initiative.updated_at = ident::now_utc_rfc3339();
    changes.upsert(Record::Initiative(initiative.clone()));
}
