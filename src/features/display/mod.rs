//! Quote display region.
//!
//! The renderer decides what the display region shows (one quote, a filtered
//! list, or a message) and keeps the session snapshot of the last random quote.
//! Painting the region is left to `output` (CLI) and `tui::ui`.

mod renderer;

pub use renderer::{format_quote_line, DisplayRegion, Renderer, LAST_QUOTE_KEY, NO_QUOTES_FOUND};
