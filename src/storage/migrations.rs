//! Database migrations for quotebook.
//!
//! Each migration is a function that upgrades the schema by one version.
//! Migrations are run automatically when the database is opened.

use rusqlite::Connection;

use crate::error::QuotebookError;

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, QuotebookError> {
    let version: i32 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| QuotebookError::Database(format!("Failed to get schema version: {e}")))?;

    Ok(version)
}

/// Set the schema version in the database.
fn set_version(conn: &Connection, version: i32) -> Result<(), QuotebookError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| QuotebookError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), QuotebookError> {
    let current = get_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(());
    }

    for version in (current + 1)..=CURRENT_VERSION {
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

/// Run a specific migration.
fn run_migration(conn: &Connection, version: i32) -> Result<(), QuotebookError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(QuotebookError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: Initial schema.
///
/// Creates tables for:
/// - `kv`: durable key-value pairs (quotes, selected category)
/// - `session_kv`: key-value pairs scoped to one terminal session
fn migrate_v1(conn: &Connection) -> Result<(), QuotebookError> {
    conn.execute_batch(
        r"
        -- Durable values
        CREATE TABLE IF NOT EXISTS kv (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        -- Session-scoped values
        CREATE TABLE IF NOT EXISTS session_kv (
            session_id TEXT NOT NULL,
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            touched_at TEXT NOT NULL,
            PRIMARY KEY (session_id, key)
        );

        CREATE INDEX IF NOT EXISTS idx_session_kv_touched
        ON session_kv(touched_at);
        ",
    )
    .map_err(|e| QuotebookError::Database(format!("Migration v1 failed: {e}")))
}
