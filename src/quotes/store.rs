//! Quote list persistence.
//!
//! The list lives under the `quotes` key of the persistent store as a JSON
//! array. A missing value falls back to the seed list; a corrupt value also
//! falls back, but is reported so the caller can warn the user.

use std::sync::Arc;

use super::types::{CategoryFilter, Quote};
use crate::error::QuotebookError;
use crate::storage::KeyValueStore;

/// Persistent key holding the quote list.
pub const QUOTES_KEY: &str = "quotes";
/// Persistent key holding the selected category.
pub const SELECTED_CATEGORY_KEY: &str = "selectedCategory";

/// The list used when nothing has been stored yet.
#[must_use]
pub fn seed_quotes() -> Vec<Quote> {
    vec![
        Quote::new("Learning never exhausts the mind.", "Education"),
        Quote::new("Talk is cheap. Show me the code.", "Programming"),
        Quote::new(
            "Success is the sum of small efforts repeated daily.",
            "Motivation",
        ),
    ]
}

/// Where a loaded list came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOrigin {
    /// Parsed from the store.
    Stored,
    /// Nothing stored yet; seed list used.
    Seeded,
    /// A stored value existed but could not be parsed; seed list used.
    Recovered { reason: String },
}

/// Result of [`QuoteStore::load`].
#[derive(Debug, Clone)]
pub struct Loaded {
    pub quotes: Vec<Quote>,
    pub origin: LoadOrigin,
}

/// Reads and writes the quote list and the selected category.
#[derive(Clone)]
pub struct QuoteStore {
    kv: Arc<dyn KeyValueStore>,
}

impl QuoteStore {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Load the persisted list, falling back to the seed list.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store itself cannot be read. Corrupt
    /// content is not an error.
    pub fn load(&self) -> Result<Loaded, QuotebookError> {
        let Some(raw) = self.kv.get(QUOTES_KEY)? else {
            tracing::debug!("No stored quotes, using seed list");
            return Ok(Loaded {
                quotes: seed_quotes(),
                origin: LoadOrigin::Seeded,
            });
        };

        match serde_json::from_str::<Vec<Quote>>(&raw) {
            Ok(quotes) => {
                tracing::debug!(count = quotes.len(), "Loaded stored quotes");
                Ok(Loaded {
                    quotes,
                    origin: LoadOrigin::Stored,
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored quotes are corrupt, falling back to seed list");
                Ok(Loaded {
                    quotes: seed_quotes(),
                    origin: LoadOrigin::Recovered {
                        reason: e.to_string(),
                    },
                })
            }
        }
    }

    /// Overwrite the stored list with `quotes`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, quotes: &[Quote]) -> Result<(), QuotebookError> {
        let raw = serde_json::to_string(quotes)?;
        self.kv.set(QUOTES_KEY, &raw)
    }

    /// The persisted category selection, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn selected_category(&self) -> Result<Option<CategoryFilter>, QuotebookError> {
        Ok(self
            .kv
            .get(SELECTED_CATEGORY_KEY)?
            .filter(|value| !value.is_empty())
            .map(|value| CategoryFilter::parse(&value)))
    }

    /// Persist the category selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn set_selected_category(&self, filter: &CategoryFilter) -> Result<(), QuotebookError> {
        self.kv.set(SELECTED_CATEGORY_KEY, filter.as_str())
    }
}
