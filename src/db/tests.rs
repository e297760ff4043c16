use std::str::FromStr;

use uuid::Uuid;

use super::{apply_changes, get_meta, load_store, open_connection, CURRENT_SCHEMA_VERSION};
use crate::domain::kind::Kind;
use crate::domain::plan::Plan;
use crate::domain::records::{Initiative, Track};
use crate::store::{ChangeSet, Record};

fn temp_db_path() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("footprint-db-test-{}", Uuid::now_v7()));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir.join("state.sqlite")
}

fn track(id: &str, total: f64) -> Track {
    Track {
        id: id.to_string(),
        name: "Scope 2".to_string(),
        unit: "tCO2e".to_string(),
        total_emissions: total,
        created_at: "2026-03-01T00:00:00Z".to_string(),
        updated_at: "2026-03-01T00:00:00Z".to_string(),
    }
}

#[test]
fn open_connection_applies_migrations_idempotently() {
    let path = temp_db_path();
    let path_str = path.to_str().expect("utf8 path");

    let conn = open_connection(path_str).expect("db should open");
    let version = get_meta(&conn, "schema_version")
        .expect("meta should read")
        .expect("schema_version should be set");
    assert_eq!(version, CURRENT_SCHEMA_VERSION.to_string());
    drop(conn);

    // Reopening must not re-run migrations or fail on existing tables.
    let conn = open_connection(path_str).expect("db should reopen");
    let store = load_store(&conn).expect("empty store should load");
    assert!(store.tracks.is_empty());

    let _ = std::fs::remove_dir_all(path.parent().expect("parent"));
}

#[test]
fn changes_round_trip_through_the_snapshot() {
    let path = temp_db_path();
    let path_str = path.to_str().expect("utf8 path");
    let mut conn = open_connection(path_str).expect("db should open");

    let mut changes = ChangeSet::new();
    changes.upsert(Record::Track(track("trk-1", 20.0)));
    changes.upsert(Record::Initiative(Initiative {
        id: "ini-1".to_string(),
        name: "Fleet".to_string(),
        plan: Plan::from_str("-10%").expect("plan should parse"),
        target_ids: vec!["tgt-1".to_string(), "tgt-2".to_string()],
        absolute: 7.5,
        created_at: "2026-03-01T00:00:00Z".to_string(),
        updated_at: "2026-03-01T00:00:00Z".to_string(),
    }));
    apply_changes(&mut conn, &changes).expect("changes should persist");

    let loaded = load_store(&conn).expect("store should load");
    assert_eq!(loaded.track("trk-1").expect("track").total_emissions, 20.0);
    let initiative = loaded.initiative("ini-1").expect("initiative");
    assert_eq!(initiative.plan.as_str(), "-10%");
    assert_eq!(
        initiative.target_ids,
        vec!["tgt-1".to_string(), "tgt-2".to_string()]
    );

    // Upsert replaces, delete removes.
    let mut changes = ChangeSet::new();
    changes.upsert(Record::Track(track("trk-1", 30.0)));
    changes.delete(Kind::Initiative, "ini-1");
    apply_changes(&mut conn, &changes).expect("changes should persist");

    let loaded = load_store(&conn).expect("store should reload");
    assert_eq!(loaded.track("trk-1").expect("track").total_emissions, 30.0);
    assert!(loaded.initiative("ini-1").is_none());

    let _ = std::fs::remove_dir_all(path.parent().expect("parent"));
}
