//! The entity store: one insertion-ordered keyed collection per entity
//! kind. Pure data, no validation; the mutation operations in `engine`
//! own all business rules.

use indexmap::IndexMap;

use crate::domain::kind::Kind;
use crate::domain::records::{
    Factor, Initiative, Measurement, Scenario, Supplier, Target, Track,
};

#[derive(Debug, Clone, Default)]
pub struct Store {
    pub tracks: IndexMap<String, Track>,
    pub factors: IndexMap<String, Factor>,
    pub measurements: IndexMap<String, Measurement>,
    pub targets: IndexMap<String, Target>,
    pub initiatives: IndexMap<String, Initiative>,
    pub scenarios: IndexMap<String, Scenario>,
    pub suppliers: IndexMap<String, Supplier>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&self, id: &str) -> Option<&Track> {
        self.tracks.get(id)
    }

    pub fn factor(&self, id: &str) -> Option<&Factor> {
        self.factors.get(id)
    }

    pub fn measurement(&self, id: &str) -> Option<&Measurement> {
        self.measurements.get(id)
    }

    pub fn target(&self, id: &str) -> Option<&Target> {
        self.targets.get(id)
    }

    pub fn initiative(&self, id: &str) -> Option<&Initiative> {
        self.initiatives.get(id)
    }

    pub fn scenario(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.get(id)
    }

    pub fn supplier(&self, id: &str) -> Option<&Supplier> {
        self.suppliers.get(id)
    }

    pub fn put_track(&mut self, record: Track) {
        self.tracks.insert(record.id.clone(), record);
    }

    pub fn put_factor(&mut self, record: Factor) {
        self.factors.insert(record.id.clone(), record);
    }

    pub fn put_measurement(&mut self, record: Measurement) {
        self.measurements.insert(record.id.clone(), record);
    }

    pub fn put_target(&mut self, record: Target) {
        self.targets.insert(record.id.clone(), record);
    }

    pub fn put_initiative(&mut self, record: Initiative) {
        self.initiatives.insert(record.id.clone(), record);
    }

    pub fn put_scenario(&mut self, record: Scenario) {
        self.scenarios.insert(record.id.clone(), record);
    }

    pub fn put_supplier(&mut self, record: Supplier) {
        self.suppliers.insert(record.id.clone(), record);
    }

    // shift_remove keeps the insertion order of the survivors stable.
    pub fn remove_track(&mut self, id: &str) -> Option<Track> {
        self.tracks.shift_remove(id)
    }

    pub fn remove_factor(&mut self, id: &str) -> Option<Factor> {
        self.factors.shift_remove(id)
    }

    pub fn remove_measurement(&mut self, id: &str) -> Option<Measurement> {
        self.measurements.shift_remove(id)
    }

    pub fn remove_target(&mut self, id: &str) -> Option<Target> {
        self.targets.shift_remove(id)
    }

    pub fn remove_initiative(&mut self, id: &str) -> Option<Initiative> {
        self.initiatives.shift_remove(id)
    }

    pub fn remove_scenario(&mut self, id: &str) -> Option<Scenario> {
        self.scenarios.shift_remove(id)
    }

    pub fn remove_supplier(&mut self, id: &str) -> Option<Supplier> {
        self.suppliers.shift_remove(id)
    }
}

/// One record of any kind, as carried by a [`ChangeSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Track(Track),
    Factor(Factor),
    Measurement(Measurement),
    Target(Target),
    Initiative(Initiative),
    Scenario(Scenario),
    Supplier(Supplier),
}

impl Record {
    pub fn kind(&self) -> Kind {
        match self {
            Record::Track(_) => Kind::Track,
            Record::Factor(_) => Kind::Factor,
            Record::Measurement(_) => Kind::Measurement,
            Record::Target(_) => Kind::Target,
            Record::Initiative(_) => Kind::Initiative,
            Record::Scenario(_) => Kind::Scenario,
            Record::Supplier(_) => Kind::Supplier,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Record::Track(r) => &r.id,
            Record::Factor(r) => &r.id,
            Record::Measurement(r) => &r.id,
            Record::Target(r) => &r.id,
            Record::Initiative(r) => &r.id,
            Record::Scenario(r) => &r.id,
            Record::Supplier(r) => &r.id,
        }
    }
}

/// Every record an operation touched, in apply order, so the persistence
/// adapter can write exactly one transaction per mutation.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    upserts: Vec<Record>,
    deletes: Vec<(Kind, String)>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an upsert. A later upsert of the same (kind, id) replaces the
    /// earlier one: only the final state of a record is persisted.
    pub fn upsert(&mut self, record: Record) {
        self.upserts
            .retain(|existing| (existing.kind(), existing.id()) != (record.kind(), record.id()));
        self.upserts.push(record);
    }

    pub fn delete(&mut self, kind: Kind, id: &str) {
        self.upserts
            .retain(|existing| (existing.kind(), existing.id()) != (kind, id));
        self.deletes.push((kind, id.to_string()));
    }

    pub fn upserts(&self) -> &[Record] {
        &self.upserts
    }

    pub fn deletes(&self) -> &[(Kind, String)] {
        &self.deletes
    }

    pub fn is_empty(&self) -> bool {
        self.upserts.is_empty() && self.deletes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{ChangeSet, Record, Store};
    use crate::domain::kind::Kind;
    use crate::domain::records::Track;

    fn track(id: &str, name: &str) -> Track {
        Track {
            id: id.to_string(),
            name: name.to_string(),
            unit: "tCO2e".to_string(),
            total_emissions: 0.0,
            created_at: "2026-01-01T00:00:00Z".to_string(),
            updated_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn store_preserves_insertion_order_across_removals() {
        let mut store = Store::new();
        store.put_track(track("trk-1", "Scope 1"));
        store.put_track(track("trk-2", "Scope 2"));
        store.put_track(track("trk-3", "Scope 3"));
        store.remove_track("trk-2");

        let ids: Vec<&str> = store.tracks.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["trk-1", "trk-3"]);
    }

    #[test]
    fn changeset_keeps_only_the_last_upsert_per_record() {
        let mut changes = ChangeSet::new();
        changes.upsert(Record::Track(track("trk-1", "first")));
        changes.upsert(Record::Track(track("trk-1", "second")));

        assert_eq!(changes.upserts().len(), 1);
        match &changes.upserts()[0] {
            Record::Track(t) => assert_eq!(t.name, "second"),
            other => panic!("unexpected record {other:?}"),
        }
    }

    #[test]
    fn changeset_delete_drops_a_pending_upsert() {
        let mut changes = ChangeSet::new();
        changes.upsert(Record::Track(track("trk-1", "doomed")));
        changes.delete(Kind::Track, "trk-1");

        assert!(changes.upserts().is_empty());
        assert_eq!(changes.deletes(), &[(Kind::Track, "trk-1".to_string())]);
    }
}
