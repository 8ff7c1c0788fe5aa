//! Configuration management for quotebook.
//!
//! This module handles loading configuration from `~/.quotebook/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{
    ColorSetting, Config, GeneralConfig, SessionConfig, StatusConfig, SyncConfig, ENDPOINT_ENV,
};
