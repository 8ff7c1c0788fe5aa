//! `SQLite` database connection and operations.
//!
//! The database is stored at `~/.quotebook/quotebook.db` and contains the
//! durable `kv` table and the session-scoped `session_kv` table.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;

use crate::error::QuotebookError;

use super::migrations;

/// Database connection wrapper.
///
/// The connection sits behind a mutex so one database can back every store
/// shared across the sync agent, the TUI and the CLI commands.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open the database file at `path`, creating it and running migrations
    /// if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &Path) -> Result<Self, QuotebookError> {
        let conn = Connection::open(path).map_err(|e| {
            QuotebookError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;

        Self::from_connection(conn)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, QuotebookError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            QuotebookError::Database(format!("Failed to open in-memory database: {e}"))
        })?;

        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, QuotebookError> {
        // Concurrent CLI invocations wait for each other instead of failing.
        conn.busy_timeout(std::time::Duration::from_secs(5))
            .map_err(|e| QuotebookError::Database(format!("Failed to set busy timeout: {e}")))?;

        migrations::run(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, QuotebookError> {
        let conn = self.connection()?;
        migrations::get_version(&conn)
    }

    /// Lock and return the underlying connection.
    ///
    /// # Errors
    ///
    /// Returns an error if a previous holder panicked while holding the lock.
    pub fn connection(&self) -> Result<MutexGuard<'_, Connection>, QuotebookError> {
        self.conn
            .lock()
            .map_err(|_| QuotebookError::Database("Database connection lock poisoned".to_string()))
    }

    /// Execute a statement that returns no rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    pub fn execute(
        &self,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<usize, QuotebookError> {
        self.connection()?
            .execute(sql, params)
            .map_err(|e| QuotebookError::Database(format!("Query failed: {e}")))
    }
}
