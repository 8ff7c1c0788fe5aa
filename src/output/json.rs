//! JSON output formatting.

use std::path::Path;

use serde::Serialize;
use serde_json::json;

use crate::error::QuotebookError;
use crate::features::categories::CategoryIndex;
use crate::features::form::ADDED_MESSAGE;
use crate::features::transfer::IMPORTED_MESSAGE;
use crate::quotes::Quote;

/// Format a quote list as JSON
///
/// # Errors
///
/// Returns `QuotebookError::Parse` if JSON serialization fails.
pub fn format_quotes_json(quotes: &[Quote], title: &str) -> Result<String, QuotebookError> {
    let output = json!({
        "category": title,
        "count": quotes.len(),
        "items": quotes
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the category selector as JSON
///
/// # Errors
///
/// Returns `QuotebookError::Parse` if JSON serialization fails.
pub fn format_categories_json(index: &CategoryIndex) -> Result<String, QuotebookError> {
    let output = json!({
        "options": index.options(),
        "selected": index.selected(),
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format an added quote as JSON
///
/// # Errors
///
/// Returns `QuotebookError::Parse` if JSON serialization fails.
pub fn format_added_json(quote: &Quote, total: usize) -> Result<String, QuotebookError> {
    let output = json!({
        "message": ADDED_MESSAGE,
        "quote": quote,
        "total": total
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format an export result as JSON
///
/// # Errors
///
/// Returns `QuotebookError::Parse` if JSON serialization fails.
pub fn format_exported_json(path: &Path, count: usize) -> Result<String, QuotebookError> {
    let output = json!({
        "path": path.display().to_string(),
        "count": count
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format an import result as JSON
///
/// # Errors
///
/// Returns `QuotebookError::Parse` if JSON serialization fails.
pub fn format_imported_json(added: usize, total: usize) -> Result<String, QuotebookError> {
    let output = json!({
        "message": IMPORTED_MESSAGE,
        "added": added,
        "total": total
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `QuotebookError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, QuotebookError> {
    Ok(serde_json::to_string_pretty(value)?)
}
