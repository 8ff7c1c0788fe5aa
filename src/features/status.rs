//! Transient status line.
//!
//! A status message is visible until it is replaced or its lifetime elapses.
//! Callers pass the current instant in, so expiry is driven by whatever
//! clock the caller runs on.

use std::time::{Duration, Instant};

use serde::Serialize;

/// Tone of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Info,
    Success,
    Failure,
}

/// One status message and its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    expires_at: Instant,
}

/// A status line whose messages clear themselves.
#[derive(Debug, Clone)]
pub struct StatusLine {
    ttl: Duration,
    message: Option<StatusMessage>,
}

impl StatusLine {
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self { ttl, message: None }
    }

    /// Show `text`, replacing any current message.
    pub fn set(&mut self, text: impl Into<String>, kind: StatusKind, now: Instant) {
        self.message = Some(StatusMessage {
            text: text.into(),
            kind,
            expires_at: now + self.ttl,
        });
    }

    /// The visible message at `now`, if any.
    #[must_use]
    pub fn current(&self, now: Instant) -> Option<&StatusMessage> {
        self.message.as_ref().filter(|m| now < m.expires_at)
    }

    /// Drop an expired message. Returns `true` if one was dropped.
    pub fn clear_expired(&mut self, now: Instant) -> bool {
        if self.message.as_ref().is_some_and(|m| now >= m.expires_at) {
            self.message = None;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_clears_after_ttl() {
        let start = Instant::now();
        let mut line = StatusLine::new(Duration::from_secs(5));

        line.set("Quotes synced with server!", StatusKind::Success, start);

        assert_eq!(
            line.current(start + Duration::from_secs(4)).map(|m| m.text.as_str()),
            Some("Quotes synced with server!")
        );
        assert!(line.current(start + Duration::from_secs(5)).is_none());
        assert!(line.clear_expired(start + Duration::from_secs(6)));
        assert!(!line.clear_expired(start + Duration::from_secs(7)));
    }

    #[test]
    fn test_new_message_restarts_ttl() {
        let start = Instant::now();
        let mut line = StatusLine::new(Duration::from_secs(5));

        line.set("first", StatusKind::Info, start);
        line.set("second", StatusKind::Failure, start + Duration::from_secs(4));

        let current = line.current(start + Duration::from_secs(8)).unwrap();
        assert_eq!(current.text, "second");
        assert_eq!(current.kind, StatusKind::Failure);
    }

    #[test]
    fn test_empty_line() {
        let line = StatusLine::new(Duration::from_secs(5));
        assert!(line.current(Instant::now()).is_none());
    }
}
