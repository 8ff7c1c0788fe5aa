use std::path::{Path, PathBuf};

use crate::error::QuotebookError;
use crate::quotes::Quote;

/// File name used when exporting to a directory.
pub const EXPORT_FILE_NAME: &str = "quotes.json";

/// Serialize `quotes` as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn export_json(quotes: &[Quote]) -> Result<String, QuotebookError> {
    Ok(serde_json::to_string_pretty(quotes)?)
}

/// Write `quotes` to `target` and return the written path.
///
/// A directory target receives a `quotes.json` inside it.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn export_to(quotes: &[Quote], target: &Path) -> Result<PathBuf, QuotebookError> {
    let path = if target.is_dir() {
        target.join(EXPORT_FILE_NAME)
    } else {
        target.to_path_buf()
    };

    let json = export_json(quotes)?;
    std::fs::write(&path, json)?;
    tracing::info!(path = %path.display(), count = quotes.len(), "Exported quotes");

    Ok(path)
}
