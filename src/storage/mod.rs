//! Storage layer for quotebook.
//!
//! This module provides SQLite-based persistence for:
//! - Durable values (the quote list, the selected category)
//! - Session values (the last shown quote)

mod database;
mod kv;
mod migrations;

pub use database::Database;
#[cfg(test)]
pub use kv::MockKeyValueStore;
pub use kv::{
    current_session_id, KeyValueStore, MemoryStore, PersistentStore, SessionStore, SESSION_ENV,
};
