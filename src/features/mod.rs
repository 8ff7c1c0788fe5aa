//! Quotebook features.
//!
//! Each module owns one part of the quote page: the display region, the
//! category selector, the add form, JSON import and export, the status
//! line, and server sync.

pub mod categories;
pub mod completions;
pub mod display;
pub mod form;
pub mod status;
pub mod sync;
pub mod transfer;
