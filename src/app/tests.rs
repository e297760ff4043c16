use std::path::PathBuf;

use uuid::Uuid;

use super::{App, AppError};
use crate::domain::inputs::{
    FactorInput, FactorPatch, InitiativeInput, MeasurementInput, TargetInput, TrackInput,
};
use crate::engine::EngineError;

fn unique_workspace() -> PathBuf {
    let root = std::env::temp_dir().join(format!("footprint-app-test-{}", Uuid::now_v7()));
    std::fs::create_dir_all(&root).expect("temp workspace should be creatable");
    root
}

fn open_app(root: &PathBuf) -> App {
    let db_path = root.join(".footprint/state.sqlite");
    App::open(db_path.to_str().expect("utf8 path")).expect("app should open")
}

#[test]
fn mutations_survive_a_reopen() {
    let root = unique_workspace();
    let mut app = open_app(&root);

    let track = app
        .create_track(TrackInput {
            name: "Scope 2".to_string(),
            unit: "tCO2e".to_string(),
        })
        .expect("track should be created");
    let factor = app
        .create_factor(FactorInput {
            track_id: track.id.clone(),
            name: "grid electricity".to_string(),
            value: 2.0,
            unit: "kgCO2e/kWh".to_string(),
            category: "energy".to_string(),
        })
        .expect("factor should be created");
    app.create_measurement(MeasurementInput {
        factor_id: factor.id.clone(),
        quantity: 10.0,
        supplier_id: None,
    })
    .expect("measurement should be created");

    drop(app);
    let reopened = open_app(&root);
    let reloaded = reopened.track(&track.id).expect("track should reload");
    assert_eq!(reloaded.total_emissions, 20.0);
    assert_eq!(reopened.measurements().len(), 1);
    assert_eq!(reopened.measurements()[0].calculated_value, 20.0);

    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn factor_edit_ripples_through_persisted_state() {
    let root = unique_workspace();
    let mut app = open_app(&root);

    let track = app
        .create_track(TrackInput {
            name: "T1".to_string(),
            unit: "tCO2e".to_string(),
        })
        .expect("track should be created");
    let factor = app
        .create_factor(FactorInput {
            track_id: track.id.clone(),
            name: "F1".to_string(),
            value: 2.0,
            unit: "kgCO2e/kWh".to_string(),
            category: "energy".to_string(),
        })
        .expect("factor should be created");
    app.create_measurement(MeasurementInput {
        factor_id: factor.id.clone(),
        quantity: 10.0,
        supplier_id: None,
    })
    .expect("measurement should be created");

    app.update_factor(
        &factor.id,
        FactorPatch {
            value: Some(3.0),
            ..FactorPatch::default()
        },
    )
    .expect("factor update should succeed");

    drop(app);
    let reopened = open_app(&root);
    assert_eq!(
        reopened.track(&track.id).expect("track").total_emissions,
        30.0
    );
    assert_eq!(reopened.measurements()[0].calculated_value, 30.0);

    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn a_blocked_delete_leaves_memory_and_disk_untouched() {
    let root = unique_workspace();
    let mut app = open_app(&root);

    let track = app
        .create_track(TrackInput {
            name: "Scope 1".to_string(),
            unit: "tCO2e".to_string(),
        })
        .expect("track should be created");
    app.create_factor(FactorInput {
        track_id: track.id.clone(),
        name: "diesel".to_string(),
        value: 2.7,
        unit: "kgCO2e/l".to_string(),
        category: "fuel".to_string(),
    })
    .expect("factor should be created");

    let blocked = app.delete_track(&track.id);
    assert!(matches!(
        blocked,
        Err(AppError::Engine(EngineError::Conflict(_)))
    ));
    assert!(app.track(&track.id).is_some());

    drop(app);
    let reopened = open_app(&root);
    assert!(reopened.track(&track.id).is_some());
    assert_eq!(reopened.factors().len(), 1);

    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn initiative_round_trips_with_its_target_set() {
    let root = unique_workspace();
    let mut app = open_app(&root);

    let track = app
        .create_track(TrackInput {
            name: "Scope 1".to_string(),
            unit: "tCO2e".to_string(),
        })
        .expect("track should be created");
    let target = app
        .create_target(TargetInput {
            track_id: track.id.clone(),
            scenario_id: None,
            supplier_id: None,
            baseline_value: 100.0,
            target_percentage: 25.0,
        })
        .expect("target should be created");
    let initiative = app
        .create_initiative(InitiativeInput {
            name: "LED retrofit".to_string(),
            plan: "-10%".to_string(),
            target_ids: vec![target.id.clone(), target.id.clone()],
        })
        .expect("initiative should be created");
    assert_eq!(initiative.target_ids, vec![target.id.clone()]);
    assert_eq!(initiative.absolute, 7.5);

    drop(app);
    let mut reopened = open_app(&root);
    let reloaded = reopened
        .initiative(&initiative.id)
        .expect("initiative should reload");
    assert_eq!(reloaded.plan.as_str(), "-10%");
    assert_eq!(reloaded.absolute, 7.5);

    reopened
        .delete_target(&target.id)
        .expect("target delete should succeed");
    let detached = reopened
        .initiative(&initiative.id)
        .expect("initiative survives");
    assert!(detached.target_ids.is_empty());
    assert_eq!(detached.absolute, 0.0);

    let _ = std::fs::remove_dir_all(root);
}
