//! Schema steps for the snapshot database.
//!
//! Step `n` moves a file from `user_version = n - 1` to `n`. Steps are never
//! edited once released; schema changes append a new step.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

const STEPS: &[&str] = &[include_str!("0001_init.sql")];

/// Schema version written by this build.
pub fn latest_version() -> u32 {
    STEPS.len() as u32
}

/// Reads `PRAGMA user_version`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Brings `conn` up to `latest_version()` in a single transaction.
///
/// # Errors
/// - `SchemaTooNew` when the file is ahead of this build.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    let supported = latest_version();
    if found > supported {
        return Err(DbError::SchemaTooNew { found, supported });
    }
    if found == supported {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (version, sql) in (1..).zip(STEPS).skip(found as usize) {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={found} to_version={supported}");
    Ok(())
}
