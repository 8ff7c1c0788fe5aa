//! Output formatting for quotebook.
//!
//! Every command result can be rendered as colored text or as JSON.

mod json;
mod pretty;

use std::path::Path;

use crate::cli::args::OutputFormat;
use crate::error::QuotebookError;
use crate::features::categories::CategoryIndex;
use crate::features::display::DisplayRegion;
use crate::features::sync::SyncReport;
use crate::page::PageView;
use crate::quotes::Quote;

pub use json::*;
pub use pretty::*;

/// Format the display region.
///
/// # Errors
///
/// Returns `QuotebookError::Parse` if JSON serialization fails.
pub fn format_region(
    region: &DisplayRegion,
    format: OutputFormat,
) -> Result<String, QuotebookError> {
    match format {
        OutputFormat::Pretty => Ok(format_region_pretty(region)),
        OutputFormat::Json => to_json(region),
    }
}

/// Format the page-load view.
///
/// # Errors
///
/// Returns `QuotebookError::Parse` if JSON serialization fails.
pub fn format_page(view: &PageView, format: OutputFormat) -> Result<String, QuotebookError> {
    match format {
        OutputFormat::Pretty => Ok(format_page_pretty(view)),
        OutputFormat::Json => to_json(view),
    }
}

/// Format a filtered list under `title`.
///
/// # Errors
///
/// Returns `QuotebookError::Parse` if JSON serialization fails.
pub fn format_quotes(
    quotes: &[Quote],
    title: &str,
    format: OutputFormat,
) -> Result<String, QuotebookError> {
    match format {
        OutputFormat::Pretty => Ok(format_quotes_pretty(quotes, title)),
        OutputFormat::Json => format_quotes_json(quotes, title),
    }
}

/// Format the category selector.
///
/// # Errors
///
/// Returns `QuotebookError::Parse` if JSON serialization fails.
pub fn format_categories(
    index: &CategoryIndex,
    format: OutputFormat,
) -> Result<String, QuotebookError> {
    match format {
        OutputFormat::Pretty => Ok(format_categories_pretty(index)),
        OutputFormat::Json => format_categories_json(index),
    }
}

/// Format a confirmation for an added quote.
///
/// # Errors
///
/// Returns `QuotebookError::Parse` if JSON serialization fails.
pub fn format_added(
    quote: &Quote,
    total: usize,
    format: OutputFormat,
) -> Result<String, QuotebookError> {
    match format {
        OutputFormat::Pretty => Ok(format_added_pretty(quote, total)),
        OutputFormat::Json => format_added_json(quote, total),
    }
}

/// Format an export result.
///
/// # Errors
///
/// Returns `QuotebookError::Parse` if JSON serialization fails.
pub fn format_exported(
    path: &Path,
    count: usize,
    format: OutputFormat,
) -> Result<String, QuotebookError> {
    match format {
        OutputFormat::Pretty => Ok(format_exported_pretty(path, count)),
        OutputFormat::Json => format_exported_json(path, count),
    }
}

/// Format an import result.
///
/// # Errors
///
/// Returns `QuotebookError::Parse` if JSON serialization fails.
pub fn format_imported(
    added: usize,
    total: usize,
    format: OutputFormat,
) -> Result<String, QuotebookError> {
    match format {
        OutputFormat::Pretty => Ok(format_imported_pretty(added, total)),
        OutputFormat::Json => format_imported_json(added, total),
    }
}

/// Format a sync report.
///
/// # Errors
///
/// Returns `QuotebookError::Parse` if JSON serialization fails.
pub fn format_sync_report(
    report: &SyncReport,
    format: OutputFormat,
) -> Result<String, QuotebookError> {
    match format {
        OutputFormat::Pretty => Ok(format_sync_report_pretty(report)),
        OutputFormat::Json => to_json(report),
    }
}
