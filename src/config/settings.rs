//! Configuration settings for quotebook.
//!
//! Settings are loaded from `~/.quotebook/config.yaml`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::QuotebookError;

/// Environment variable overriding `sync.endpoint`.
pub const ENDPOINT_ENV: &str = "QUOTEBOOK_ENDPOINT";

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Server sync settings.
    pub sync: SyncConfig,
    /// Status line settings.
    pub status: StatusConfig,
    /// Session store settings.
    pub session: SessionConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorSetting {
    /// Apply this setting to the global `colored` override.
    pub fn apply(self) {
        match self {
            Self::Auto => colored::control::unset_override(),
            Self::Always => colored::control::set_override(true),
            Self::Never => colored::control::set_override(false),
        }
    }
}

/// Server sync settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Endpoint polled for server quotes and notified after replacement.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Seconds between timer-driven syncs.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Number of remote records consumed per sync.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Category assigned to every quote that came from the server.
    #[serde(default = "default_server_category")]
    pub server_category: String,
    /// POST the replacement list back to the endpoint after a sync.
    #[serde(default = "default_true")]
    pub push_after_sync: bool,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Run a sync as soon as the TUI or `watch` starts.
    #[serde(default = "default_true")]
    pub on_start: bool,
}

/// Status line settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    /// Seconds before a transient status message clears itself.
    #[serde(default = "default_clear_after_secs")]
    pub clear_after_secs: u64,
}

/// Session store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Sessions untouched for longer than this are purged on startup.
    #[serde(default = "default_idle_timeout_minutes")]
    pub idle_timeout_minutes: u32,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

fn default_endpoint() -> String {
    "https://jsonplaceholder.typicode.com/posts".to_string()
}

const fn default_interval_secs() -> u64 {
    30
}

const fn default_page_size() -> usize {
    5
}

fn default_server_category() -> String {
    "Server".to_string()
}

const fn default_true() -> bool {
    true
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_clear_after_secs() -> u64 {
    5
}

const fn default_idle_timeout_minutes() -> u32 {
    720
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            interval_secs: default_interval_secs(),
            page_size: default_page_size(),
            server_category: default_server_category(),
            push_after_sync: default_true(),
            timeout_secs: default_timeout_secs(),
            on_start: default_true(),
        }
    }
}

impl SyncConfig {
    /// Interval between timer-driven syncs. Never zero.
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            clear_after_secs: default_clear_after_secs(),
        }
    }
}

impl StatusConfig {
    /// Lifetime of a transient status message.
    #[must_use]
    pub const fn clear_after(&self) -> Duration {
        Duration::from_secs(self.clear_after_secs)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_minutes: default_idle_timeout_minutes(),
        }
    }
}

impl Config {
    /// Load configuration from the default path, then apply environment overrides.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, QuotebookError> {
        let paths = Paths::new()?;
        let mut config = Self::load_from_path(&paths.config_file)?;
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            if !endpoint.trim().is_empty() {
                config.sync.endpoint = endpoint;
            }
        }
        Ok(config)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, QuotebookError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            QuotebookError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            QuotebookError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), QuotebookError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| QuotebookError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            QuotebookError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }
}
