//! JSON export and import of the quote list.
//!
//! Export writes the whole list as a pretty-printed `quotes.json`. Import
//! reads a JSON array of quote-shaped records; the records are appended as-is.

mod export;
mod import;

pub use export::{export_json, export_to, EXPORT_FILE_NAME};
pub use import::{parse_import, read_import, IMPORTED_MESSAGE};
