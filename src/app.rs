//! The persistence-backed wrapper around the synchronous engine.
//!
//! Each mutation runs against an optimistic copy of the in-memory store;
//! the resulting change set is written to sqlite in one transaction, and
//! only then does the copy become the live store. A failed persistence
//! call leaves both the database and the in-memory state exactly as they
//! were, so the two can never diverge.

use std::error::Error;
use std::fmt;

use rusqlite::Connection;

use crate::config::ConfigError;
use crate::db;
use crate::domain::inputs::{
    FactorInput, FactorPatch, InitiativeInput, InitiativePatch, MeasurementInput,
    MeasurementPatch, ScenarioInput, ScenarioPatch, SupplierInput, SupplierPatch, TargetInput,
    TargetPatch, TrackInput, TrackPatch,
};
use crate::domain::records::{
    Factor, Initiative, Measurement, Scenario, Supplier, Target, Track,
};
use crate::engine::{self, EngineError};
use crate::store::{ChangeSet, Store};

pub struct App {
    conn: Connection,
    store: Store,
}

impl App {
    pub fn open(db_path: &str) -> Result<Self, AppError> {
        ensure_parent_dir(db_path)?;
        let conn = db::open_connection(db_path)?;
        let store = db::load_store(&conn)?;
        Ok(Self { conn, store })
    }

    /// Run one engine operation end to end: optimistic copy, engine step,
    /// one persistence transaction, then commit the copy.
    fn apply<T>(
        &mut self,
        op: impl FnOnce(&mut Store, &mut ChangeSet) -> Result<T, EngineError>,
    ) -> Result<T, AppError> {
        let mut working = self.store.clone();
        let mut changes = ChangeSet::new();
        let outcome = op(&mut working, &mut changes)?;
        db::apply_changes(&mut self.conn, &changes)?;
        self.store = working;
        Ok(outcome)
    }

    pub fn create_track(&mut self, input: TrackInput) -> Result<Track, AppError> {
        self.apply(|store, changes| engine::create_track(store, changes, input))
    }

    pub fn update_track(&mut self, id: &str, patch: TrackPatch) -> Result<Track, AppError> {
        self.apply(|store, changes| engine::update_track(store, changes, id, patch))
    }

    pub fn delete_track(&mut self, id: &str) -> Result<(), AppError> {
        self.apply(|store, changes| engine::delete_track(store, changes, id))
    }

    pub fn create_factor(&mut self, input: FactorInput) -> Result<Factor, AppError> {
        self.apply(|store, changes| engine::create_factor(store, changes, input))
    }

    pub fn update_factor(&mut self, id: &str, patch: FactorPatch) -> Result<Factor, AppError> {
        self.apply(|store, changes| engine::update_factor(store, changes, id, patch))
    }

    pub fn delete_factor(&mut self, id: &str) -> Result<(), AppError> {
        self.apply(|store, changes| engine::delete_factor(store, changes, id))
    }

    pub fn create_measurement(
        &mut self,
        input: MeasurementInput,
    ) -> Result<Measurement, AppError> {
        self.apply(|store, changes| engine::create_measurement(store, changes, input))
    }

    pub fn update_measurement(
        &mut self,
        id: &str,
        patch: MeasurementPatch,
    ) -> Result<Measurement, AppError> {
        self.apply(|store, changes| engine::update_measurement(store, changes, id, patch))
    }

    pub fn delete_measurement(&mut self, id: &str) -> Result<(), AppError> {
        self.apply(|store, changes| engine::delete_measurement(store, changes, id))
    }

    pub fn create_target(&mut self, input: TargetInput) -> Result<Target, AppError> {
        self.apply(|store, changes| engine::create_target(store, changes, input))
    }

    pub fn update_target(&mut self, id: &str, patch: TargetPatch) -> Result<Target, AppError> {
        self.apply(|store, changes| engine::update_target(store, changes, id, patch))
    }

    pub fn delete_target(&mut self, id: &str) -> Result<(), AppError> {
        self.apply(|store, changes| engine::delete_target(store, changes, id))
    }

    pub fn create_initiative(
        &mut self,
        input: InitiativeInput,
    ) -> Result<Initiative, AppError> {
        self.apply(|store, changes| engine::create_initiative(store, changes, input))
    }

    pub fn update_initiative(
        &mut self,
        id: &str,
        patch: InitiativePatch,
    ) -> Result<Initiative, AppError> {
        self.apply(|store, changes| engine::update_initiative(store, changes, id, patch))
    }

    pub fn delete_initiative(&mut self, id: &str) -> Result<(), AppError> {
        self.apply(|store, changes| engine::delete_initiative(store, changes, id))
    }

    pub fn add_targets_to_initiative(
        &mut self,
        id: &str,
        target_ids: &[String],
    ) -> Result<Initiative, AppError> {
        self.apply(|store, changes| {
            engine::add_targets_to_initiative(store, changes, id, target_ids)
        })
    }

    pub fn remove_target_from_initiative(
        &mut self,
        id: &str,
        target_id: &str,
    ) -> Result<Initiative, AppError> {
        self.apply(|store, changes| {
            engine::remove_target_from_initiative(store, changes, id, target_id)
        })
    }

    pub fn create_scenario(&mut self, input: ScenarioInput) -> Result<Scenario, AppError> {
        self.apply(|store, changes| engine::create_scenario(store, changes, input))
    }

    pub fn update_scenario(
        &mut self,
        id: &str,
        patch: ScenarioPatch,
    ) -> Result<Scenario, AppError> {
        self.apply(|store, changes| engine::update_scenario(store, changes, id, patch))
    }

    pub fn delete_scenario(&mut self, id: &str) -> Result<(), AppError> {
        self.apply(|store, changes| engine::delete_scenario(store, changes, id))
    }

    pub fn create_supplier(&mut self, input: SupplierInput) -> Result<Supplier, AppError> {
        self.apply(|store, changes| engine::create_supplier(store, changes, input))
    }

    pub fn update_supplier(
        &mut self,
        id: &str,
        patch: SupplierPatch,
    ) -> Result<Supplier, AppError> {
        self.apply(|store, changes| engine::update_supplier(store, changes, id, patch))
    }

    pub fn delete_supplier(&mut self, id: &str) -> Result<(), AppError> {
        self.apply(|store, changes| engine::delete_supplier(store, changes, id))
    }

    // Read side: list in insertion order, show by id.

    pub fn tracks(&self) -> Vec<Track> {
        self.store.tracks.values().cloned().collect()
    }

    pub fn track(&self, id: &str) -> Option<Track> {
        self.store.track(id).cloned()
    }

    pub fn factors(&self) -> Vec<Factor> {
        self.store.factors.values().cloned().collect()
    }

    pub fn factor(&self, id: &str) -> Option<Factor> {
        self.store.factor(id).cloned()
    }

    pub fn measurements(&self) -> Vec<Measurement> {
        self.store.measurements.values().cloned().collect()
    }

    pub fn measurement(&self, id: &str) -> Option<Measurement> {
        self.store.measurement(id).cloned()
    }

    pub fn targets(&self) -> Vec<Target> {
        self.store.targets.values().cloned().collect()
    }

    pub fn target(&self, id: &str) -> Option<Target> {
        self.store.target(id).cloned()
    }

    pub fn initiatives(&self) -> Vec<Initiative> {
        self.store.initiatives.values().cloned().collect()
    }

    pub fn initiative(&self, id: &str) -> Option<Initiative> {
        self.store.initiative(id).cloned()
    }

    pub fn scenarios(&self) -> Vec<Scenario> {
        self.store.scenarios.values().cloned().collect()
    }

    pub fn scenario(&self, id: &str) -> Option<Scenario> {
        self.store.scenario(id).cloned()
    }

    pub fn suppliers(&self) -> Vec<Supplier> {
        self.store.suppliers.values().cloned().collect()
    }

    pub fn supplier(&self, id: &str) -> Option<Supplier> {
        self.store.supplier(id).cloned()
    }
}

fn ensure_parent_dir(path: &str) -> Result<(), AppError> {
    if let Some(parent) = std::path::Path::new(path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[derive(Debug)]
pub enum AppError {
    Io(std::io::Error),
    Db(rusqlite::Error),
    Engine(EngineError),
    Config(ConfigError),
    NotFound(String),
    InvalidArgument(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Io(err) => write!(f, "I/O error: {}", err),
            AppError::Db(err) => write!(f, "database error: {}", err),
            AppError::Engine(err) => write!(f, "{}", err),
            AppError::Config(err) => write!(f, "config error: {}", err),
            AppError::NotFound(id) => write!(f, "record '{}' not found", id),
            AppError::InvalidArgument(message) => write!(f, "{}", message),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AppError::Io(err) => Some(err),
            AppError::Db(err) => Some(err),
            AppError::Engine(err) => Some(err),
            AppError::Config(err) => Some(err),
            AppError::NotFound(_) => None,
            AppError::InvalidArgument(_) => None,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(value: rusqlite::Error) -> Self {
        AppError::Db(value)
    }
}

impl From<EngineError> for AppError {
    fn from(value: EngineError) -> Self {
        AppError::Engine(value)
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        AppError::Config(value)
    }
}

#[cfg(test)]
mod tests;
