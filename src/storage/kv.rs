//! Key-value stores backing quotebook state.
//!
//! `PersistentStore` survives restarts. `SessionStore` is scoped to one
//! terminal session and is cleared when the session ends or goes idle.
//! `MemoryStore` keeps values for the lifetime of the process.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{Duration, SecondsFormat, Utc};
use rusqlite::{params, OptionalExtension};

use super::Database;
use crate::error::QuotebookError;

/// Environment variable naming the current session explicitly.
pub const SESSION_ENV: &str = "QUOTEBOOK_SESSION";

/// A string key-value store.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, QuotebookError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), QuotebookError>;

    /// Remove the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn remove(&self, key: &str) -> Result<(), QuotebookError>;
}

fn timestamp() -> String {
    // Fixed-width UTC so timestamps compare correctly as strings.
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Durable store over the `kv` table.
#[derive(Clone)]
pub struct PersistentStore {
    db: Arc<Database>,
}

impl PersistentStore {
    #[must_use]
    pub const fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

impl KeyValueStore for PersistentStore {
    fn get(&self, key: &str) -> Result<Option<String>, QuotebookError> {
        self.db
            .connection()?
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
            .optional()
            .map_err(|e| QuotebookError::Database(format!("Failed to read '{key}': {e}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), QuotebookError> {
        self.db
            .connection()?
            .execute(
                r"INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                  ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, timestamp()],
            )
            .map_err(|e| QuotebookError::Database(format!("Failed to write '{key}': {e}")))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), QuotebookError> {
        self.db
            .connection()?
            .execute("DELETE FROM kv WHERE key = ?1", [key])
            .map_err(|e| QuotebookError::Database(format!("Failed to remove '{key}': {e}")))?;
        Ok(())
    }
}

/// Session-scoped store over the `session_kv` table.
#[derive(Clone)]
pub struct SessionStore {
    db: Arc<Database>,
    session_id: String,
}

impl SessionStore {
    /// Create a store for an explicit session id.
    #[must_use]
    pub fn new(db: Arc<Database>, session_id: impl Into<String>) -> Self {
        Self {
            db,
            session_id: session_id.into(),
        }
    }

    /// Create a store for the current terminal session.
    #[must_use]
    pub fn current(db: Arc<Database>) -> Self {
        Self::new(db, current_session_id())
    }

    /// The id this store is scoped to.
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Drop every value of this session.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn end(&self) -> Result<usize, QuotebookError> {
        self.db
            .connection()?
            .execute(
                "DELETE FROM session_kv WHERE session_id = ?1",
                [&self.session_id],
            )
            .map_err(|e| QuotebookError::Database(format!("Failed to end session: {e}")))
    }

    /// Drop sessions (of any id) that have not been touched within `max_idle`.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn purge_idle(&self, max_idle: Duration) -> Result<usize, QuotebookError> {
        let cutoff = (Utc::now() - max_idle).to_rfc3339_opts(SecondsFormat::Secs, true);
        let removed = self
            .db
            .connection()?
            .execute("DELETE FROM session_kv WHERE touched_at < ?1", [cutoff])
            .map_err(|e| QuotebookError::Database(format!("Failed to purge sessions: {e}")))?;
        if removed > 0 {
            tracing::debug!(removed, "Purged idle session values");
        }
        Ok(removed)
    }
}

impl KeyValueStore for SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, QuotebookError> {
        self.db
            .connection()?
            .query_row(
                "SELECT value FROM session_kv WHERE session_id = ?1 AND key = ?2",
                params![self.session_id, key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| QuotebookError::Database(format!("Failed to read session '{key}': {e}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), QuotebookError> {
        self.db
            .connection()?
            .execute(
                r"INSERT INTO session_kv (session_id, key, value, touched_at) VALUES (?1, ?2, ?3, ?4)
                  ON CONFLICT(session_id, key) DO UPDATE SET value = excluded.value, touched_at = excluded.touched_at",
                params![self.session_id, key, value, timestamp()],
            )
            .map_err(|e| {
                QuotebookError::Database(format!("Failed to write session '{key}': {e}"))
            })?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), QuotebookError> {
        self.db
            .connection()?
            .execute(
                "DELETE FROM session_kv WHERE session_id = ?1 AND key = ?2",
                params![self.session_id, key],
            )
            .map_err(|e| {
                QuotebookError::Database(format!("Failed to remove session '{key}': {e}"))
            })?;
        Ok(())
    }
}

/// Resolve the current session id.
///
/// `QUOTEBOOK_SESSION` wins; otherwise the parent process (the interactive
/// shell) identifies the session.
#[must_use]
pub fn current_session_id() -> String {
    if let Ok(id) = std::env::var(SESSION_ENV) {
        if !id.trim().is_empty() {
            return id;
        }
    }
    parent_process_id()
}

#[cfg(unix)]
fn parent_process_id() -> String {
    format!("ppid-{}", std::os::unix::process::parent_id())
}

#[cfg(not(unix))]
fn parent_process_id() -> String {
    "default".to_string()
}

/// In-process store.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, QuotebookError> {
        self.values
            .lock()
            .map_err(|_| QuotebookError::Database("Memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, QuotebookError> {
        Ok(self.values()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), QuotebookError> {
        self.values()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), QuotebookError> {
        self.values()?.remove(key);
        Ok(())
    }
}
