//! Error types for quotebook.

use thiserror::Error;

/// Errors produced by quotebook operations.
#[derive(Debug, Error)]
pub enum QuotebookError {
    /// A required field was empty when adding a quote.
    #[error("{0}")]
    Validation(String),

    /// An import file could not be read or parsed.
    #[error("Import failed: {0}")]
    Import(String),

    /// The remote endpoint could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// The remote endpoint answered with a non-success status.
    #[error("Remote returned {status}: {message}")]
    Remote { status: u16, message: String },

    /// The remote endpoint answered with a body we cannot map to quotes.
    #[error("Malformed server payload: {0}")]
    MalformedPayload(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl QuotebookError {
    /// Whether this error came from the sync boundary (fetch, status, payload).
    #[must_use]
    pub const fn is_sync_failure(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Remote { .. } | Self::MalformedPayload(_)
        )
    }

    /// Whether the user must acknowledge this error before continuing.
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Import(_))
    }
}

impl From<reqwest::Error> for QuotebookError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            return Self::Remote {
                status: status.as_u16(),
                message: e.to_string(),
            };
        }
        if e.is_decode() {
            return Self::MalformedPayload(e.to_string());
        }
        Self::Network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocking_errors() {
        assert!(QuotebookError::Validation("x".to_string()).is_blocking());
        assert!(QuotebookError::Import("x".to_string()).is_blocking());
        assert!(!QuotebookError::Network("x".to_string()).is_blocking());
    }

    #[test]
    fn test_sync_failures() {
        assert!(QuotebookError::Network("down".to_string()).is_sync_failure());
        assert!(QuotebookError::Remote {
            status: 500,
            message: "boom".to_string()
        }
        .is_sync_failure());
        assert!(QuotebookError::MalformedPayload("x".to_string()).is_sync_failure());
        assert!(!QuotebookError::Database("x".to_string()).is_sync_failure());
    }

    #[test]
    fn test_validation_message_is_verbatim() {
        let err = QuotebookError::Validation("Please enter both quote text and category".to_string());
        assert_eq!(err.to_string(), "Please enter both quote text and category");
    }
}
