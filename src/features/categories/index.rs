use serde::Serialize;

use crate::error::QuotebookError;
use crate::quotes::{CategoryFilter, Quote, QuoteStore, ALL_CATEGORIES};

/// Distinct category labels in order of first occurrence.
#[must_use]
pub fn distinct_categories(quotes: &[Quote]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for quote in quotes {
        if !labels.iter().any(|label| *label == quote.category) {
            labels.push(quote.category.clone());
        }
    }
    labels
}

/// Quotes passing `filter`, in their original relative order.
#[must_use]
pub fn filter_quotes(quotes: &[Quote], filter: &CategoryFilter) -> Vec<Quote> {
    quotes
        .iter()
        .filter(|quote| filter.matches(quote))
        .cloned()
        .collect()
}

/// The category selector: its options and the selected one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CategoryIndex {
    categories: Vec<String>,
    selected: CategoryFilter,
}

impl CategoryIndex {
    /// Rebuild the selector from `quotes` and restore the persisted selection.
    ///
    /// A persisted label that no longer occurs falls back to `all` without
    /// touching the persisted value.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted selection cannot be read.
    pub fn populate(quotes: &[Quote], store: &QuoteStore) -> Result<Self, QuotebookError> {
        let mut index = Self {
            categories: distinct_categories(quotes),
            selected: CategoryFilter::All,
        };

        if let Some(saved) = store.selected_category()? {
            if index.has_option(&saved) {
                index.selected = saved;
            } else {
                tracing::debug!(category = %saved, "Saved category no longer exists");
            }
        }

        Ok(index)
    }

    /// Change the selection and persist it.
    ///
    /// Any label is accepted; one without quotes simply filters to nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection cannot be persisted.
    pub fn select(
        &mut self,
        filter: CategoryFilter,
        store: &QuoteStore,
    ) -> Result<(), QuotebookError> {
        store.set_selected_category(&filter)?;
        self.selected = filter;
        Ok(())
    }

    /// Move the selection by `step` options, wrapping around.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection cannot be persisted.
    pub fn cycle(&mut self, step: isize, store: &QuoteStore) -> Result<(), QuotebookError> {
        let options = self.options();
        let len = options.len() as isize;
        let current = options
            .iter()
            .position(|option| option == self.selected.as_str())
            .unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(len) as usize;
        let filter = CategoryFilter::parse(&options[next]);
        self.select(filter, store)
    }

    fn has_option(&self, filter: &CategoryFilter) -> bool {
        match filter {
            CategoryFilter::All => true,
            CategoryFilter::Category(label) => self.categories.iter().any(|c| c == label),
        }
    }

    /// Selector options: `all` followed by every distinct category.
    #[must_use]
    pub fn options(&self) -> Vec<String> {
        std::iter::once(ALL_CATEGORIES.to_string())
            .chain(self.categories.iter().cloned())
            .collect()
    }

    /// Distinct categories without the synthetic `all`.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// The active selection.
    #[must_use]
    pub const fn selected(&self) -> &CategoryFilter {
        &self.selected
    }

    /// Quotes matching the active selection.
    #[must_use]
    pub fn filtered(&self, quotes: &[Quote]) -> Vec<Quote> {
        filter_quotes(quotes, &self.selected)
    }
}
