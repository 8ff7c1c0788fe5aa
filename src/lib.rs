//! quotebook - a terminal quote manager
//!
//! This crate keeps an ordered list of quotes in a local key-value store,
//! renders a random or category-filtered view, imports and exports JSON,
//! and replaces the local list with quotes fetched from a REST endpoint.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod features;
pub mod output;
pub mod page;
pub mod quotes;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use context::Context;
pub use error::QuotebookError;
pub use page::QuotePage;
pub use quotes::{Quote, QuoteBook};
