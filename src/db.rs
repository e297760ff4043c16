use std::str::FromStr;
use std::time::Duration;

use rusqlite::types::Type;
use rusqlite::{params, Connection, DatabaseName, OptionalExtension, Result, Row};

use crate::domain::kind::Kind;
use crate::domain::plan::Plan;
use crate::domain::records::{
    Factor, Initiative, Measurement, Scenario, Supplier, Target, Track,
};
use crate::ident::now_utc_rfc3339;
use crate::store::{ChangeSet, Record, Store};

pub const CURRENT_SCHEMA_VERSION: i64 = 1;

struct Migration {
    version: i64,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: [Migration; 1] = [Migration {
    version: 1,
    name: "baseline_ledger_schema_v1",
    sql: r#"
CREATE TABLE IF NOT EXISTS meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS track (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    unit TEXT NOT NULL,
    total_emissions REAL NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS factor (
    id TEXT PRIMARY KEY,
    track_id TEXT NOT NULL,
    name TEXT NOT NULL,
    value REAL NOT NULL,
    unit TEXT NOT NULL,
    category TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS measurement (
    id TEXT PRIMARY KEY,
    track_id TEXT NOT NULL,
    factor_id TEXT NOT NULL,
    supplier_id TEXT,
    quantity REAL NOT NULL,
    unit TEXT NOT NULL,
    calculated_value REAL NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS target (
    id TEXT PRIMARY KEY,
    track_id TEXT NOT NULL,
    scenario_id TEXT,
    supplier_id TEXT,
    baseline_value REAL NOT NULL,
    target_percentage REAL NOT NULL,
    target_value REAL NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS initiative (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    plan TEXT NOT NULL,
    target_ids TEXT NOT NULL,
    absolute REAL NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS scenario (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS supplier (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    industry TEXT NOT NULL,
    contact_name TEXT,
    contact_email TEXT,
    currency TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_factor_track ON factor(track_id);
CREATE INDEX IF NOT EXISTS idx_measurement_track ON measurement(track_id);
CREATE INDEX IF NOT EXISTS idx_measurement_factor ON measurement(factor_id);
CREATE INDEX IF NOT EXISTS idx_target_track ON target(track_id);
CREATE INDEX IF NOT EXISTS idx_target_supplier ON target(supplier_id);
"#,
}];

pub fn open_connection(path: &str) -> Result<Connection> {
    let mut conn = Connection::open(path)?;
    configure_for_speed(&conn)?;
    apply_migrations(&mut conn)?;
    Ok(conn)
}

fn configure_for_speed(conn: &Connection) -> Result<()> {
    conn.pragma_update(None::<DatabaseName>, "journal_mode", "WAL")?;
    conn.pragma_update(None::<DatabaseName>, "synchronous", "NORMAL")?;
    conn.pragma_update(None::<DatabaseName>, "temp_store", "MEMORY")?;
    conn.pragma_update(None::<DatabaseName>, "busy_timeout", 5000i64)?;
    conn.busy_timeout(Duration::from_millis(5000))?;
    Ok(())
}

fn apply_migrations(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(
        r#"
CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at TEXT NOT NULL
);
"#,
    )?;

    for migration in MIGRATIONS {
        let already_applied: Option<i64> = tx
            .query_row(
                "SELECT version FROM schema_migrations WHERE version = ?1",
                params![migration.version],
                |row| row.get(0),
            )
            .optional()?;

        if already_applied.is_some() {
            continue;
        }

        tx.execute_batch(migration.sql)?;
        tx.execute(
            "INSERT INTO schema_migrations (version, name, applied_at) VALUES (?1, ?2, ?3)",
            params![migration.version, migration.name, now_utc_rfc3339()],
        )?;
    }

    tx.execute(
        r#"
INSERT INTO meta (key, value)
VALUES ('schema_version', ?1)
ON CONFLICT(key) DO UPDATE SET value = excluded.value
"#,
        params![CURRENT_SCHEMA_VERSION.to_string()],
    )?;

    tx.commit()
}

/// Load the full snapshot into an in-memory store. Ids are uuid-v7 based,
/// so ordering by id reproduces insertion order.
pub fn load_store(conn: &Connection) -> Result<Store> {
    let mut store = Store::new();

    each_row(
        conn,
        "SELECT id, name, unit, total_emissions, created_at, updated_at FROM track ORDER BY id",
        |row| {
            store.put_track(Track {
                id: row.get(0)?,
                name: row.get(1)?,
                unit: row.get(2)?,
                total_emissions: row.get(3)?,
                created_at: row.get(4)?,
                updated_at: row.get(5)?,
            });
            Ok(())
        },
    )?;

    each_row(
        conn,
        "SELECT id, track_id, name, value, unit, category, created_at, updated_at FROM factor ORDER BY id",
        |row| {
            store.put_factor(Factor {
                id: row.get(0)?,
                track_id: row.get(1)?,
                name: row.get(2)?,
                value: row.get(3)?,
                unit: row.get(4)?,
                category: row.get(5)?,
                created_at: row.get(6)?,
                updated_at: row.get(7)?,
            });
            Ok(())
        },
    )?;

    each_row(
        conn,
        "SELECT id, track_id, factor_id, supplier_id, quantity, unit, calculated_value, created_at, updated_at FROM measurement ORDER BY id",
        |row| {
            store.put_measurement(Measurement {
                id: row.get(0)?,
                track_id: row.get(1)?,
                factor_id: row.get(2)?,
                supplier_id: row.get(3)?,
                quantity: row.get(4)?,
                unit: row.get(5)?,
                calculated_value: row.get(6)?,
                created_at: row.get(7)?,
                updated_at: row.get(8)?,
            });
            Ok(())
        },
    )?;

    each_row(
        conn,
        "SELECT id, track_id, scenario_id, supplier_id, baseline_value, target_percentage, target_value, created_at, updated_at FROM target ORDER BY id",
        |row| {
            store.put_target(Target {
                id: row.get(0)?,
                track_id: row.get(1)?,
                scenario_id: row.get(2)?,
                supplier_id: row.get(3)?,
                baseline_value: row.get(4)?,
                target_percentage: row.get(5)?,
                target_value: row.get(6)?,
                created_at: row.get(7)?,
                updated_at: row.get(8)?,
            });
            Ok(())
        },
    )?;

    each_row(
        conn,
        "SELECT id, name, plan, target_ids, absolute, created_at, updated_at FROM initiative ORDER BY id",
        |row| {
            store.put_initiative(Initiative {
                id: row.get(0)?,
                name: row.get(1)?,
                plan: parse_plan(row, 2)?,
                target_ids: parse_id_list(row, 3)?,
                absolute: row.get(4)?,
                created_at: row.get(5)?,
                updated_at: row.get(6)?,
            });
            Ok(())
        },
    )?;

    each_row(
        conn,
        "SELECT id, name, description, created_at, updated_at FROM scenario ORDER BY id",
        |row| {
            store.put_scenario(Scenario {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
                created_at: row.get(3)?,
                updated_at: row.get(4)?,
            });
            Ok(())
        },
    )?;

    each_row(
        conn,
        "SELECT id, name, industry, contact_name, contact_email, currency, created_at, updated_at FROM supplier ORDER BY id",
        |row| {
            store.put_supplier(Supplier {
                id: row.get(0)?,
                name: row.get(1)?,
                industry: row.get(2)?,
                contact_name: row.get(3)?,
                contact_email: row.get(4)?,
                currency: row.get(5)?,
                created_at: row.get(6)?,
                updated_at: row.get(7)?,
            });
            Ok(())
        },
    )?;

    Ok(store)
}

fn each_row(
    conn: &Connection,
    sql: &str,
    mut consume: impl FnMut(&Row<'_>) -> Result<()>,
) -> Result<()> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        consume(row)?;
    }
    Ok(())
}

fn parse_plan(row: &Row<'_>, idx: usize) -> Result<Plan> {
    let raw: String = row.get(idx)?;
    Plan::from_str(&raw)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err)))
}

fn parse_id_list(row: &Row<'_>, idx: usize) -> Result<Vec<String>> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err)))
}

/// Persist one mutation's change set as a single transaction. Nothing is
/// committed if any statement fails, so the on-disk snapshot reflects the
/// whole mutation or none of it.
pub fn apply_changes(conn: &mut Connection, changes: &ChangeSet) -> Result<()> {
    let tx = conn.transaction()?;
    for record in changes.upserts() {
        match record {
            Record::Track(r) => upsert_track(&tx, r)?,
            Record::Factor(r) => upsert_factor(&tx, r)?,
            Record::Measurement(r) => upsert_measurement(&tx, r)?,
            Record::Target(r) => upsert_target(&tx, r)?,
            Record::Initiative(r) => upsert_initiative(&tx, r)?,
            Record::Scenario(r) => upsert_scenario(&tx, r)?,
            Record::Supplier(r) => upsert_supplier(&tx, r)?,
        }
    }
    for (kind, id) in changes.deletes() {
        delete_record(&tx, *kind, id)?;
    }
    tx.commit()
}

fn upsert_track(conn: &Connection, r: &Track) -> Result<()> {
    conn.execute(
        r#"
INSERT INTO track (id, name, unit, total_emissions, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6)
ON CONFLICT(id) DO UPDATE SET
    name = excluded.name,
    unit = excluded.unit,
    total_emissions = excluded.total_emissions,
    updated_at = excluded.updated_at
"#,
        params![
            r.id,
            r.name,
            r.unit,
            r.total_emissions,
            r.created_at,
            r.updated_at
        ],
    )?;
    Ok(())
}

fn upsert_factor(conn: &Connection, r: &Factor) -> Result<()> {
    conn.execute(
        r#"
INSERT INTO factor (id, track_id, name, value, unit, category, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
ON CONFLICT(id) DO UPDATE SET
    track_id = excluded.track_id,
    name = excluded.name,
    value = excluded.value,
    unit = excluded.unit,
    category = excluded.category,
    updated_at = excluded.updated_at
"#,
        params![
            r.id,
            r.track_id,
            r.name,
            r.value,
            r.unit,
            r.category,
            r.created_at,
            r.updated_at
        ],
    )?;
    Ok(())
}

fn upsert_measurement(conn: &Connection, r: &Measurement) -> Result<()> {
    conn.execute(
        r#"
INSERT INTO measurement (
    id, track_id, factor_id, supplier_id, quantity, unit, calculated_value, created_at, updated_at
)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
ON CONFLICT(id) DO UPDATE SET
    track_id = excluded.track_id,
    factor_id = excluded.factor_id,
    supplier_id = excluded.supplier_id,
    quantity = excluded.quantity,
    unit = excluded.unit,
    calculated_value = excluded.calculated_value,
    updated_at = excluded.updated_at
"#,
        params![
            r.id,
            r.track_id,
            r.factor_id,
            r.supplier_id,
            r.quantity,
            r.unit,
            r.calculated_value,
            r.created_at,
            r.updated_at
        ],
    )?;
    Ok(())
}

fn upsert_target(conn: &Connection, r: &Target) -> Result<()> {
    conn.execute(
        r#"
INSERT INTO target (
    id, track_id, scenario_id, supplier_id, baseline_value, target_percentage, target_value,
    created_at, updated_at
)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
ON CONFLICT(id) DO UPDATE SET
    track_id = excluded.track_id,
    scenario_id = excluded.scenario_id,
    supplier_id = excluded.supplier_id,
    baseline_value = excluded.baseline_value,
    target_percentage = excluded.target_percentage,
    target_value = excluded.target_value,
    updated_at = excluded.updated_at
"#,
        params![
            r.id,
            r.track_id,
            r.scenario_id,
            r.supplier_id,
            r.baseline_value,
            r.target_percentage,
            r.target_value,
            r.created_at,
            r.updated_at
        ],
    )?;
    Ok(())
}

fn upsert_initiative(conn: &Connection, r: &Initiative) -> Result<()> {
    let target_ids = serde_json::to_string(&r.target_ids)
        .expect("a vec of strings should always serialize to JSON");
    conn.execute(
        r#"
INSERT INTO initiative (id, name, plan, target_ids, absolute, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
ON CONFLICT(id) DO UPDATE SET
    name = excluded.name,
    plan = excluded.plan,
    target_ids = excluded.target_ids,
    absolute = excluded.absolute,
    updated_at = excluded.updated_at
"#,
        params![
            r.id,
            r.name,
            r.plan.as_str(),
            target_ids,
            r.absolute,
            r.created_at,
            r.updated_at
        ],
    )?;
    Ok(())
}

fn upsert_scenario(conn: &Connection, r: &Scenario) -> Result<()> {
    conn.execute(
        r#"
INSERT INTO scenario (id, name, description, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5)
ON CONFLICT(id) DO UPDATE SET
    name = excluded.name,
    description = excluded.description,
    updated_at = excluded.updated_at
"#,
        params![r.id, r.name, r.description, r.created_at, r.updated_at],
    )?;
    Ok(())
}

fn upsert_supplier(conn: &Connection, r: &Supplier) -> Result<()> {
    conn.execute(
        r#"
INSERT INTO supplier (
    id, name, industry, contact_name, contact_email, currency, created_at, updated_at
)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
ON CONFLICT(id) DO UPDATE SET
    name = excluded.name,
    industry = excluded.industry,
    contact_name = excluded.contact_name,
    contact_email = excluded.contact_email,
    currency = excluded.currency,
    updated_at = excluded.updated_at
"#,
        params![
            r.id,
            r.name,
            r.industry,
            r.contact_name,
            r.contact_email,
            r.currency,
            r.created_at,
            r.updated_at
        ],
    )?;
    Ok(())
}

fn delete_record(conn: &Connection, kind: Kind, id: &str) -> Result<()> {
    let sql = match kind {
        Kind::Track => "DELETE FROM track WHERE id = ?1",
        Kind::Factor => "DELETE FROM factor WHERE id = ?1",
        Kind::Measurement => "DELETE FROM measurement WHERE id = ?1",
        Kind::Target => "DELETE FROM target WHERE id = ?1",
        Kind::Initiative => "DELETE FROM initiative WHERE id = ?1",
        Kind::Scenario => "DELETE FROM scenario WHERE id = ?1",
        Kind::Supplier => "DELETE FROM supplier WHERE id = ?1",
    };
    conn.execute(sql, params![id])?;
    Ok(())
}

pub fn get_meta(conn: &Connection, key: &str) -> Result<Option<String>> {
    conn.query_row(
        "SELECT value FROM meta WHERE key = ?1",
        params![key],
        |row| row.get(0),
    )
    .optional()
}

#[cfg(test)]
mod tests;
