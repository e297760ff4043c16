//! Mutation operations: one per (entity, verb) pair.
//!
//! Every operation validates its preconditions against the caller-owned
//! store, applies the computation rules, records each touched record into
//! the given [`ChangeSet`], and returns the primary record or a tagged
//! [`EngineError`]. Operations are synchronous and perform no I/O; a
//! failed precondition leaves the store untouched because validation runs
//! before the first write.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use crate::compute;
use crate::domain::inputs::{
    FactorInput, FactorPatch, InitiativeInput, InitiativePatch, MeasurementInput,
    MeasurementPatch, ScenarioInput, ScenarioPatch, SupplierInput, SupplierPatch, TargetInput,
    TargetPatch, TrackInput, TrackPatch,
};
use crate::domain::kind::Kind;
use crate::domain::plan::{ParsePlanError, Plan};
use crate::domain::records::{
    Factor, Initiative, Measurement, Scenario, Supplier, Target, Track,
};
use crate::ident;
use crate::integrity;
use crate::propagate;
use crate::store::{ChangeSet, Record, Store};

// ---- tracks ----

pub fn create_track(
    store: &mut Store,
    changes: &mut ChangeSet,
    input: TrackInput,
) -> Result<Track, EngineError> {
    let name = require_text("track name", &input.name)?;
    let unit = require_text("track unit", &input.unit)?;
    let now = ident::now_utc_rfc3339();
    let track = Track {
        id: ident::new_id(Kind::Track),
        name,
        unit,
        total_emissions: 0.0,
        created_at: now.clone(),
        updated_at: now,
    };
    store.put_track(track.clone());
    changes.upsert(Record::Track(track.clone()));
    Ok(track)
}

pub fn update_track(
    store: &mut Store,
    changes: &mut ChangeSet,
    id: &str,
    patch: TrackPatch,
) -> Result<Track, EngineError> {
    require_changes(patch.has_changes())?;
    let mut track = resolve_track(store, id)?.clone();
    if let Some(name) = patch.name.as_deref() {
        track.name = require_text("track name", name)?;
    }
    if let Some(unit) = patch.unit.as_deref() {
        track.unit = require_text("track unit", unit)?;
    }
    track.updated_at = ident::now_utc_rfc3339();
    store.put_track(track.clone());
    changes.upsert(Record::Track(track.clone()));
    Ok(track)
}

pub fn delete_track(
    store: &mut Store,
    changes: &mut ChangeSet,
    id: &str,
) -> Result<(), EngineError> {
    resolve_track(store, id)?;
    require_unreferenced(Kind::Track, id, store)?;
    store.remove_track(id);
    changes.delete(Kind::Track, id);
    Ok(())
}

// ---- factors ----

pub fn create_factor(
    store: &mut Store,
    changes: &mut ChangeSet,
    input: FactorInput,
) -> Result<Factor, EngineError> {
    resolve_track(store, &input.track_id)?;
    let name = require_text("factor name", &input.name)?;
    let unit = require_text("factor unit", &input.unit)?;
    let category = require_text("factor category", &input.category)?;
    let value = require_finite("factor value", input.value)?;
    let now = ident::now_utc_rfc3339();
    let factor = Factor {
        id: ident::new_id(Kind::Factor),
        track_id: input.track_id,
        name,
        value,
        unit,
        category,
        created_at: now.clone(),
        updated_at: now,
    };
    store.put_factor(factor.clone());
    changes.upsert(Record::Factor(factor.clone()));
    Ok(factor)
}

pub fn update_factor(
    store: &mut Store,
    changes: &mut ChangeSet,
    id: &str,
    patch: FactorPatch,
) -> Result<Factor, EngineError> {
    require_changes(patch.has_changes())?;
    let mut factor = resolve_factor(store, id)?.clone();
    if let Some(track_id) = patch.track_id.clone() {
        resolve_track(store, &track_id)?;
        factor.track_id = track_id;
    }
    if let Some(name) = patch.name.as_deref() {
        factor.name = require_text("factor name", name)?;
    }
    if let Some(value) = patch.value {
        factor.value = require_finite("factor value", value)?;
    }
    if let Some(unit) = patch.unit.as_deref() {
        factor.unit = require_text("factor unit", unit)?;
    }
    if let Some(category) = patch.category.as_deref() {
        factor.category = require_text("factor category", category)?;
    }
    factor.updated_at = ident::now_utc_rfc3339();
    store.put_factor(factor.clone());
    changes.upsert(Record::Factor(factor.clone()));

    // Value, unit, or track repoints ripple through the measurements that
    // used this factor, then the affected track totals.
    if patch.value.is_some() || patch.unit.is_some() || patch.track_id.is_some() {
        propagate::refresh_factor_dependents(store, changes, id);
    }
    Ok(factor)
}

pub fn delete_factor(
    store: &mut Store,
    changes: &mut ChangeSet,
    id: &str,
) -> Result<(), EngineError> {
    resolve_factor(store, id)?;
    require_unreferenced(Kind::Factor, id, store)?;
    store.remove_factor(id);
    changes.delete(Kind::Factor, id);
    Ok(())
}

// ---- measurements ----

pub fn create_measurement(
    store: &mut Store,
    changes: &mut ChangeSet,
    input: MeasurementInput,
) -> Result<Measurement, EngineError> {
    let quantity = require_finite("measurement quantity", input.quantity)?;
    let factor = resolve_factor(store, &input.factor_id)?.clone();
    if let Some(supplier_id) = input.supplier_id.as_deref() {
        resolve_supplier(store, supplier_id)?;
    }
    let now = ident::now_utc_rfc3339();
    let mut measurement = Measurement {
        id: ident::new_id(Kind::Measurement),
        track_id: factor.track_id.clone(),
        factor_id: factor.id.clone(),
        supplier_id: input.supplier_id,
        quantity,
        unit: factor.unit.clone(),
        calculated_value: 0.0,
        created_at: now.clone(),
        updated_at: now,
    };
    measurement.calculated_value = compute::measurement_value(&measurement, &factor);
    store.put_measurement(measurement.clone());
    changes.upsert(Record::Measurement(measurement.clone()));
    propagate::refresh_track_total(store, changes, &factor.track_id);
    Ok(measurement)
}

pub fn update_measurement(
    store: &mut Store,
    changes: &mut ChangeSet,
    id: &str,
    patch: MeasurementPatch,
) -> Result<Measurement, EngineError> {
    require_changes(patch.has_changes())?;
    if patch.supplier_id.is_some() && patch.clear_supplier {
        return Err(EngineError::Validation(
            "cannot both set and clear the supplier in one update".to_string(),
        ));
    }
    let mut measurement = resolve_measurement(store, id)?.clone();
    let previous_track = measurement.track_id.clone();

    if let Some(factor_id) = patch.factor_id.clone() {
        resolve_factor(store, &factor_id)?;
        measurement.factor_id = factor_id;
    }
    if let Some(quantity) = patch.quantity {
        measurement.quantity = require_finite("measurement quantity", quantity)?;
    }
    if let Some(supplier_id) = patch.supplier_id.clone() {
        resolve_supplier(store, &supplier_id)?;
        measurement.supplier_id = Some(supplier_id);
    }
    if patch.clear_supplier {
        measurement.supplier_id = None;
    }

    // Track and unit always follow the (possibly new) factor.
    let factor = resolve_factor(store, &measurement.factor_id)?.clone();
    measurement.track_id = factor.track_id.clone();
    measurement.unit = factor.unit.clone();
    measurement.calculated_value = compute::measurement_value(&measurement, &factor);
    measurement.updated_at = ident::now_utc_rfc3339();
    store.put_measurement(measurement.clone());
    changes.upsert(Record::Measurement(measurement.clone()));

    propagate::refresh_track_total(store, changes, &measurement.track_id);
    if previous_track != measurement.track_id {
        propagate::refresh_track_total(store, changes, &previous_track);
    }
    Ok(measurement)
}

pub fn delete_measurement(
    store: &mut Store,
    changes: &mut ChangeSet,
    id: &str,
) -> Result<(), EngineError> {
    let track_id = resolve_measurement(store, id)?.track_id.clone();
    store.remove_measurement(id);
    changes.delete(Kind::Measurement, id);
    propagate::refresh_track_total(store, changes, &track_id);
    Ok(())
}

// ---- targets ----

pub fn create_target(
    store: &mut Store,
    changes: &mut ChangeSet,
    input: TargetInput,
) -> Result<Target, EngineError> {
    resolve_track(store, &input.track_id)?;
    if let Some(scenario_id) = input.scenario_id.as_deref() {
        resolve_scenario(store, scenario_id)?;
    }
    if let Some(supplier_id) = input.supplier_id.as_deref() {
        resolve_supplier(store, supplier_id)?;
        require_supplier_free(supplier_id, None, store)?;
    }
    let baseline_value = require_finite("target baseline", input.baseline_value)?;
    let target_percentage = require_finite("target percentage", input.target_percentage)?;
    let now = ident::now_utc_rfc3339();
    let target = Target {
        id: ident::new_id(Kind::Target),
        track_id: input.track_id,
        scenario_id: input.scenario_id,
        supplier_id: input.supplier_id,
        baseline_value,
        target_percentage,
        target_value: compute::target_value(baseline_value, target_percentage),
        created_at: now.clone(),
        updated_at: now,
    };
    store.put_target(target.clone());
    changes.upsert(Record::Target(target.clone()));
    Ok(target)
}

pub fn update_target(
    store: &mut Store,
    changes: &mut ChangeSet,
    id: &str,
    patch: TargetPatch,
) -> Result<Target, EngineError> {
    require_changes(patch.has_changes())?;
    if patch.scenario_id.is_some() && patch.clear_scenario {
        return Err(EngineError::Validation(
            "cannot both set and clear the scenario in one update".to_string(),
        ));
    }
    if patch.supplier_id.is_some() && patch.clear_supplier {
        return Err(EngineError::Validation(
            "cannot both set and clear the supplier in one update".to_string(),
        ));
    }
    let mut target = resolve_target(store, id)?.clone();

    if let Some(track_id) = patch.track_id.clone() {
        resolve_track(store, &track_id)?;
        target.track_id = track_id;
    }
    if let Some(scenario_id) = patch.scenario_id.clone() {
        resolve_scenario(store, &scenario_id)?;
        target.scenario_id = Some(scenario_id);
    }
    if patch.clear_scenario {
        target.scenario_id = None;
    }
    if let Some(supplier_id) = patch.supplier_id.clone() {
        resolve_supplier(store, &supplier_id)?;
        require_supplier_free(&supplier_id, Some(id), store)?;
        target.supplier_id = Some(supplier_id);
    }
    if patch.clear_supplier {
        target.supplier_id = None;
    }

    let value_inputs_changed =
        patch.baseline_value.is_some() || patch.target_percentage.is_some();
    if let Some(baseline) = patch.baseline_value {
        target.baseline_value = require_finite("target baseline", baseline)?;
    }
    if let Some(percentage) = patch.target_percentage {
        target.target_percentage = require_finite("target percentage", percentage)?;
    }
    if value_inputs_changed {
        // The baseline/percentage pair is the single source of truth for
        // target_value; a directly supplied value never survives.
        target.target_value =
            compute::target_value(target.baseline_value, target.target_percentage);
    }

    target.updated_at = ident::now_utc_rfc3339();
    store.put_target(target.clone());
    changes.upsert(Record::Target(target.clone()));

    if value_inputs_changed {
        propagate::refresh_initiatives_for_target(store, changes, id);
    }
    Ok(target)
}

pub fn delete_target(
    store: &mut Store,
    changes: &mut ChangeSet,
    id: &str,
) -> Result<(), EngineError> {
    resolve_target(store, id)?;
    store.remove_target(id);
    changes.delete(Kind::Target, id);

    // Cascade-detach: drop the id from every initiative that carried it,
    // then refresh those impacts. The initiatives themselves survive.
    let holders: Vec<String> = store
        .initiatives
        .values()
        .filter(|i| i.target_ids.iter().any(|tid| tid == id))
        .map(|i| i.id.clone())
        .collect();
    for initiative_id in holders {
        if let Some(initiative) = store.initiatives.get_mut(&initiative_id) {
            initiative.target_ids.retain(|tid| tid != id);
            initiative.updated_at = ident::now_utc_rfc3339();
            changes.upsert(Record::Initiative(initiative.clone()));
        }
        propagate::refresh_initiative_absolute(store, changes, &initiative_id);
    }
    Ok(())
}

// ---- initiatives ----

pub fn create_initiative(
    store: &mut Store,
    changes: &mut ChangeSet,
    input: InitiativeInput,
) -> Result<Initiative, EngineError> {
    let name = require_text("initiative name", &input.name)?;
    let plan = Plan::from_str(&input.plan)?;
    let target_ids = resolve_target_set(store, &input.target_ids)?;
    let now = ident::now_utc_rfc3339();
    let initiative = Initiative {
        id: ident::new_id(Kind::Initiative),
        name,
        absolute: compute::initiative_absolute(&plan, &target_ids, store),
        plan,
        target_ids,
        created_at: now.clone(),
        updated_at: now,
    };
    store.put_initiative(initiative.clone());
    changes.upsert(Record::Initiative(initiative.clone()));
    Ok(initiative)
}

pub fn update_initiative(
    store: &mut Store,
    changes: &mut ChangeSet,
    id: &str,
    patch: InitiativePatch,
) -> Result<Initiative, EngineError> {
    require_changes(patch.has_changes())?;
    let mut initiative = resolve_initiative(store, id)?.clone();
    if let Some(name) = patch.name.as_deref() {
        initiative.name = require_text("initiative name", name)?;
    }
    if let Some(plan) = patch.plan.as_deref() {
        initiative.plan = Plan::from_str(plan)?;
    }
    if let Some(target_ids) = patch.target_ids.as_deref() {
        initiative.target_ids = resolve_target_set(store, target_ids)?;
    }
    initiative.absolute =
        compute::initiative_absolute(&initiative.plan, &initiative.target_ids, store);
    initiative.updated_at = ident::now_utc_rfc3339();
    store.put_initiative(initiative.clone());
    changes.upsert(Record::Initiative(initiative.clone()));
    Ok(initiative)
}

pub fn delete_initiative(
    store: &mut Store,
    changes: &mut ChangeSet,
    id: &str,
) -> Result<(), EngineError> {
    resolve_initiative(store, id)?;
    store.remove_initiative(id);
    changes.delete(Kind::Initiative, id);
    Ok(())
}

/// Union the given target ids into the initiative's set (duplicates are
/// collapsed, insertion order kept) and refresh `absolute`.
pub fn add_targets_to_initiative(
    store: &mut Store,
    changes: &mut ChangeSet,
    id: &str,
    target_ids: &[String],
) -> Result<Initiative, EngineError> {
    let mut initiative = resolve_initiative(store, id)?.clone();
    for target_id in target_ids {
        resolve_target(store, target_id)?;
        if !initiative.target_ids.iter().any(|tid| tid == target_id) {
            initiative.target_ids.push(target_id.clone());
        }
    }
    initiative.absolute =
        compute::initiative_absolute(&initiative.plan, &initiative.target_ids, store);
    initiative.updated_at = ident::now_utc_rfc3339();
    store.put_initiative(initiative.clone());
    changes.upsert(Record::Initiative(initiative.clone()));
    Ok(initiative)
}

pub fn remove_target_from_initiative(
    store: &mut Store,
    changes: &mut ChangeSet,
    id: &str,
    target_id: &str,
) -> Result<Initiative, EngineError> {
    let mut initiative = resolve_initiative(store, id)?.clone();
    if !initiative.target_ids.iter().any(|tid| tid == target_id) {
        return Err(EngineError::Validation(format!(
            "target '{target_id}' is not attached to initiative '{id}'"
        )));
    }
    initiative.target_ids.retain(|tid| tid != target_id);
    initiative.absolute =
        compute::initiative_absolute(&initiative.plan, &initiative.target_ids, store);
    initiative.updated_at = ident::now_utc_rfc3339();
    store.put_initiative(initiative.clone());
    changes.upsert(Record::Initiative(initiative.clone()));
    Ok(initiative)
}

// ---- scenarios ----

pub fn create_scenario(
    store: &mut Store,
    changes: &mut ChangeSet,
    input: ScenarioInput,
) -> Result<Scenario, EngineError> {
    let name = require_text("scenario name", &input.name)?;
    let now = ident::now_utc_rfc3339();
    let scenario = Scenario {
        id: ident::new_id(Kind::Scenario),
        name,
        description: input.description,
        created_at: now.clone(),
        updated_at: now,
    };
    store.put_scenario(scenario.clone());
    changes.upsert(Record::Scenario(scenario.clone()));
    Ok(scenario)
}

pub fn update_scenario(
    store: &mut Store,
    changes: &mut ChangeSet,
    id: &str,
    patch: ScenarioPatch,
) -> Result<Scenario, EngineError> {
    require_changes(patch.has_changes())?;
    let mut scenario = resolve_scenario(store, id)?.clone();
    if let Some(name) = patch.name.as_deref() {
        scenario.name = require_text("scenario name", name)?;
    }
    if let Some(description) = patch.description.clone() {
        scenario.description = Some(description);
    }
    scenario.updated_at = ident::now_utc_rfc3339();
    store.put_scenario(scenario.clone());
    changes.upsert(Record::Scenario(scenario.clone()));
    Ok(scenario)
}

/// Deleting a scenario detaches it from every target that referenced it;
/// the targets themselves survive with `scenario_id` unset.
pub fn delete_scenario(
    store: &mut Store,
    changes: &mut ChangeSet,
    id: &str,
) -> Result<(), EngineError> {
    resolve_scenario(store, id)?;
    let holders: Vec<String> = store
        .targets
        .values()
        .filter(|t| t.scenario_id.as_deref() == Some(id))
        .map(|t| t.id.clone())
        .collect();
    for target_id in holders {
        if let Some(target) = store.targets.get_mut(&target_id) {
            target.scenario_id = None;
            target.updated_at = ident::now_utc_rfc3339();
            changes.upsert(Record::Target(target.clone()));
        }
    }
    store.remove_scenario(id);
    changes.delete(Kind::Scenario, id);
    Ok(())
}

// ---- suppliers ----

pub fn create_supplier(
    store: &mut Store,
    changes: &mut ChangeSet,
    input: SupplierInput,
) -> Result<Supplier, EngineError> {
    let name = require_text("supplier name", &input.name)?;
    let industry = require_text("supplier industry", &input.industry)?;
    let currency = require_text("supplier currency", &input.currency)?;
    let now = ident::now_utc_rfc3339();
    let supplier = Supplier {
        id: ident::new_id(Kind::Supplier),
        name,
        industry,
        contact_name: input.contact_name,
        contact_email: input.contact_email,
        currency,
        created_at: now.clone(),
        updated_at: now,
    };
    store.put_supplier(supplier.clone());
    changes.upsert(Record::Supplier(supplier.clone()));
    Ok(supplier)
}

pub fn update_supplier(
    store: &mut Store,
    changes: &mut ChangeSet,
    id: &str,
    patch: SupplierPatch,
) -> Result<Supplier, EngineError> {
    require_changes(patch.has_changes())?;
    let mut supplier = resolve_supplier(store, id)?.clone();
    if let Some(name) = patch.name.as_deref() {
        supplier.name = require_text("supplier name", name)?;
    }
    if let Some(industry) = patch.industry.as_deref() {
        supplier.industry = require_text("supplier industry", industry)?;
    }
    if let Some(contact_name) = patch.contact_name.clone() {
        supplier.contact_name = Some(contact_name);
    }
    if let Some(contact_email) = patch.contact_email.clone() {
        supplier.contact_email = Some(contact_email);
    }
    if let Some(currency) = patch.currency.as_deref() {
        supplier.currency = require_text("supplier currency", currency)?;
    }
    supplier.updated_at = ident::now_utc_rfc3339();
    store.put_supplier(supplier.clone());
    changes.upsert(Record::Supplier(supplier.clone()));
    Ok(supplier)
}

pub fn delete_supplier(
    store: &mut Store,
    changes: &mut ChangeSet,
    id: &str,
) -> Result<(), EngineError> {
    resolve_supplier(store, id)?;
    require_unreferenced(Kind::Supplier, id, store)?;
    store.remove_supplier(id);
    changes.delete(Kind::Supplier, id);
    Ok(())
}

// ---- shared preconditions ----

fn require_text(field: &str, value: &str) -> Result<String, EngineError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

fn require_finite(field: &str, value: f64) -> Result<f64, EngineError> {
    if !value.is_finite() {
        return Err(EngineError::Validation(format!(
            "{field} must be a finite number"
        )));
    }
    Ok(value)
}

fn require_changes(has_changes: bool) -> Result<(), EngineError> {
    if has_changes {
        Ok(())
    } else {
        Err(EngineError::Validation(
            "update requires at least one field change".to_string(),
        ))
    }
}

fn require_unreferenced(kind: Kind, id: &str, store: &Store) -> Result<(), EngineError> {
    let blockers = integrity::referencers_of(kind, id, store);
    if blockers.is_empty() {
        Ok(())
    } else {
        Err(EngineError::Conflict(Conflict::DeleteBlocked {
            kind,
            id: id.to_string(),
            blockers,
        }))
    }
}

fn require_supplier_free(
    supplier_id: &str,
    excluding_target: Option<&str>,
    store: &Store,
) -> Result<(), EngineError> {
    match integrity::supplier_taken_by(supplier_id, excluding_target, store) {
        None => Ok(()),
        Some(taken_by) => Err(EngineError::Conflict(Conflict::SupplierTaken {
            supplier_id: supplier_id.to_string(),
            taken_by,
        })),
    }
}

/// Validate each id against the store and collapse duplicates, keeping
/// first-seen order.
fn resolve_target_set(store: &Store, target_ids: &[String]) -> Result<Vec<String>, EngineError> {
    let mut resolved: Vec<String> = Vec::new();
    for target_id in target_ids {
        resolve_target(store, target_id)?;
        if !resolved.iter().any(|id| id == target_id) {
            resolved.push(target_id.clone());
        }
    }
    Ok(resolved)
}

fn resolve_track<'a>(store: &'a Store, id: &str) -> Result<&'a Track, EngineError> {
    store.track(id).ok_or_else(|| missing(Kind::Track, id))
}

fn resolve_factor<'a>(store: &'a Store, id: &str) -> Result<&'a Factor, EngineError> {
    store.factor(id).ok_or_else(|| missing(Kind::Factor, id))
}

fn resolve_measurement<'a>(store: &'a Store, id: &str) -> Result<&'a Measurement, EngineError> {
    store
        .measurement(id)
        .ok_or_else(|| missing(Kind::Measurement, id))
}

fn resolve_target<'a>(store: &'a Store, id: &str) -> Result<&'a Target, EngineError> {
    store.target(id).ok_or_else(|| missing(Kind::Target, id))
}

fn resolve_initiative<'a>(store: &'a Store, id: &str) -> Result<&'a Initiative, EngineError> {
    store
        .initiative(id)
        .ok_or_else(|| missing(Kind::Initiative, id))
}

fn resolve_scenario<'a>(store: &'a Store, id: &str) -> Result<&'a Scenario, EngineError> {
    store.scenario(id).ok_or_else(|| missing(Kind::Scenario, id))
}

fn resolve_supplier<'a>(store: &'a Store, id: &str) -> Result<&'a Supplier, EngineError> {
    store.supplier(id).ok_or_else(|| missing(Kind::Supplier, id))
}

fn missing(kind: Kind, id: &str) -> EngineError {
    EngineError::Reference {
        kind,
        id: id.to_string(),
    }
}

// ---- errors ----

#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Malformed input; the caller must fix it before retrying.
    Validation(String),
    /// The input refers to an entity that does not exist.
    Reference { kind: Kind, id: String },
    /// A referential-integrity or uniqueness rule blocks the operation.
    Conflict(Conflict),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Conflict {
    DeleteBlocked {
        kind: Kind,
        id: String,
        blockers: Vec<(Kind, String)>,
    },
    SupplierTaken {
        supplier_id: String,
        taken_by: String,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Validation(message) => write!(f, "{}", message),
            EngineError::Reference { kind, id } => {
                write!(f, "{} '{}' does not exist", kind, id)
            }
            EngineError::Conflict(conflict) => write!(f, "{}", conflict),
        }
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conflict::DeleteBlocked { kind, id, blockers } => {
                let listed = blockers
                    .iter()
                    .map(|(kind, id)| format!("{} '{}'", kind, id))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "cannot delete {} '{}': referenced by {}", kind, id, listed)
            }
            Conflict::SupplierTaken {
                supplier_id,
                taken_by,
            } => write!(
                f,
                "supplier '{}' is already assigned to target '{}'",
                supplier_id, taken_by
            ),
        }
    }
}

impl Error for EngineError {}

impl From<ParsePlanError> for EngineError {
    fn from(value: ParsePlanError) -> Self {
        EngineError::Validation(value.to_string())
    }
}
