//! Path resolution for quotebook configuration and data files.
//!
//! All quotebook data is stored in `~/.quotebook/`:
//! - `config.yaml` - Main configuration file
//! - `quotebook.db` - SQLite database holding the persistent and session stores
//! - `quotebook.log` - Log file used while the TUI owns the terminal

use std::path::PathBuf;

use crate::error::QuotebookError;

/// Paths to quotebook configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.quotebook/`
    pub root: PathBuf,
    /// Config file: `~/.quotebook/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.quotebook/quotebook.db`
    pub database: PathBuf,
    /// Log file: `~/.quotebook/quotebook.log`
    pub log_file: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, QuotebookError> {
        let home = std::env::var("HOME").map_err(|_| {
            QuotebookError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".quotebook")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("quotebook.db"),
            log_file: root.join("quotebook.log"),
            root,
        }
    }

    /// Ensure the root directory exists, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), QuotebookError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                QuotebookError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }

        Ok(())
    }
}
