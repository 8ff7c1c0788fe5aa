use std::path::Path;

use crate::error::QuotebookError;
use crate::quotes::Quote;

/// Confirmation shown after a successful import.
pub const IMPORTED_MESSAGE: &str = "Quotes imported successfully!";

/// Parse an import payload: a JSON array of quote-shaped objects.
///
/// Records are not validated; missing fields become empty strings.
///
/// # Errors
///
/// Returns `QuotebookError::Import` if the text is not such an array.
pub fn parse_import(text: &str) -> Result<Vec<Quote>, QuotebookError> {
    serde_json::from_str(text).map_err(|e| QuotebookError::Import(format!("invalid JSON: {e}")))
}

/// Read and parse an import file asynchronously.
///
/// # Errors
///
/// Returns `QuotebookError::Import` if the file cannot be read or parsed.
pub async fn read_import(path: &Path) -> Result<Vec<Quote>, QuotebookError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| QuotebookError::Import(format!("cannot read {}: {e}", path.display())))?;
    let quotes = parse_import(&text)?;
    tracing::debug!(path = %path.display(), count = quotes.len(), "Parsed import file");
    Ok(quotes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::transfer::export_to;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_parse_import_passes_records_through() {
        let quotes = parse_import(
            r#"[{"text": "a", "category": "A"}, {"text": "no category"}, {"category": "C", "extra": 1}]"#,
        )
        .unwrap();

        assert_eq!(
            quotes,
            vec![
                Quote::new("a", "A"),
                Quote::new("no category", ""),
                Quote::new("", "C"),
            ]
        );
    }

    #[test]
    fn test_parse_import_rejects_malformed() {
        for text in ["", "{", r#"{"text": "a"}"#, r#"[{"text": 5}]"#, "[1, 2]"] {
            let err = parse_import(text).unwrap_err();
            assert!(matches!(err, QuotebookError::Import(_)), "{text:?}");
        }
    }

    #[tokio::test]
    async fn test_read_import_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_import(&dir.path().join("nope.json")).await.unwrap_err();
        assert!(matches!(err, QuotebookError::Import(_)));
    }

    #[tokio::test]
    async fn test_export_then_import_preserves_quotes() {
        let dir = TempDir::new().unwrap();
        let original = vec![
            Quote::new("one", "A"),
            Quote::new("two", "B"),
            Quote::new("one", "A"),
        ];

        let path = export_to(&original, dir.path()).unwrap();
        let imported = read_import(&path).await.unwrap();

        let count = |quotes: &[Quote]| {
            let mut counts: HashMap<Quote, usize> = HashMap::new();
            for quote in quotes {
                *counts.entry(quote.clone()).or_default() += 1;
            }
            counts
        };
        assert_eq!(count(&imported), count(&original));
    }
}
