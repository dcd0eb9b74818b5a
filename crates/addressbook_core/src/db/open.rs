//! Connection setup.
//!
//! # Invariants
//! - Returned connections enforce foreign keys, so tag rows follow their
//!   contact on delete.
//! - Returned connections are at `migrations::latest_version()`.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{info, warn};
use rusqlite::Connection;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

enum Target {
    File(PathBuf),
    Memory,
}

impl Display for Target {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(_) => f.write_str("file"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

/// Opens (or creates) the snapshot file at `path`.
///
/// # Side effects
/// - Emits one `db_open` event with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open(Target::File(path.as_ref().to_path_buf()))
}

/// Opens a private in-memory database with the current schema.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open(Target::Memory)
}

fn open(target: Target) -> DbResult<Connection> {
    let started_at = Instant::now();
    let result = connect(&target).and_then(|mut conn| {
        prepare(&mut conn)?;
        Ok(conn)
    });

    let duration_ms = started_at.elapsed().as_millis();
    match &result {
        Ok(_) => info!("event=db_open module=db status=ok mode={target} duration_ms={duration_ms}"),
        Err(err) => warn!(
            "event=db_open module=db status=error mode={target} duration_ms={duration_ms} error_code={} error={err}",
            err.code()
        ),
    }
    result
}

fn connect(target: &Target) -> DbResult<Connection> {
    let conn = match target {
        Target::File(path) => Connection::open(path),
        Target::Memory => Connection::open_in_memory(),
    };
    conn.map_err(DbError::from)
}

fn prepare(conn: &mut Connection) -> DbResult<()> {
    conn.pragma_update(None, "foreign_keys", true)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)
}
