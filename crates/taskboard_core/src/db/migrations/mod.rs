//! Layout steps for the `kv_store` container.
//!
//! # Invariants
//! - Steps are listed in strictly increasing version order and applied in
//!   one transaction, each bumping `user_version`.
//! - After migrating, `kv_store` must exist; a file that says otherwise is
//!   rejected rather than silently recreated.
//! - Only the table layout is versioned. The board document stored in
//!   `kv_store` carries no version.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// Table holding every key/value pair.
pub const KV_TABLE: &str = "kv_store";

const LAYOUT_STEPS: &[(u32, &str)] = &[(1, include_str!("0001_kv_store.sql"))];

/// Newest container version this build can open.
pub fn latest_version() -> u32 {
    LAYOUT_STEPS.last().map_or(0, |(version, _)| *version)
}

/// Reads the container version recorded in the file.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Brings the container up to [`latest_version`] and checks `kv_store`.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    let supported = latest_version();
    if found > supported {
        return Err(DbError::SchemaTooNew { found, supported });
    }

    if found < supported {
        let tx = conn.transaction()?;
        for (version, sql) in LAYOUT_STEPS.iter().filter(|(version, _)| *version > found) {
            tx.execute_batch(sql)?;
            tx.pragma_update(None, "user_version", *version)?;
        }
        tx.commit()?;
        info!(
            "event=db_migrate module=db status=ok from_version={} to_version={}",
            found, supported
        );
    }

    ensure_kv_table(conn, supported)
}

fn ensure_kv_table(conn: &Connection, version: u32) -> DbResult<()> {
    let present: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
        [KV_TABLE],
        |row| row.get(0),
    )?;
    if present {
        Ok(())
    } else {
        Err(DbError::MissingKvTable { version })
    }
}
