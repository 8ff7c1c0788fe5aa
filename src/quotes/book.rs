//! The quote book: the authoritative in-memory quote list.
//!
//! Every mutation goes through [`QuoteBook::append`], [`QuoteBook::append_all`]
//! or [`QuoteBook::replace_all`]. Each one builds the next list, persists it,
//! and only then swaps it in, so a failed write leaves the book unchanged.
//! Readers take an `Arc` snapshot and never observe a partial list.

use std::sync::{Arc, Mutex, MutexGuard};

use super::store::{LoadOrigin, QuoteStore};
use super::types::Quote;
use crate::error::QuotebookError;

pub struct QuoteBook {
    store: QuoteStore,
    quotes: Mutex<Arc<Vec<Quote>>>,
    origin: LoadOrigin,
}

impl QuoteBook {
    /// Load the book from `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn open(store: QuoteStore) -> Result<Self, QuotebookError> {
        let loaded = store.load()?;
        Ok(Self {
            store,
            quotes: Mutex::new(Arc::new(loaded.quotes)),
            origin: loaded.origin,
        })
    }

    /// The store backing this book.
    #[must_use]
    pub const fn store(&self) -> &QuoteStore {
        &self.store
    }

    /// A user-facing warning when stored data had to be discarded at open.
    #[must_use]
    pub fn load_warning(&self) -> Option<String> {
        match &self.origin {
            LoadOrigin::Recovered { reason } => Some(format!(
                "Stored quotes could not be read ({reason}); showing the default quotes instead"
            )),
            LoadOrigin::Stored | LoadOrigin::Seeded => None,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Arc<Vec<Quote>>>, QuotebookError> {
        self.quotes
            .lock()
            .map_err(|_| QuotebookError::Database("Quote list lock poisoned".to_string()))
    }

    /// The current list.
    ///
    /// # Errors
    ///
    /// Returns an error if the list lock is poisoned.
    pub fn snapshot(&self) -> Result<Arc<Vec<Quote>>, QuotebookError> {
        Ok(Arc::clone(&*self.lock()?))
    }

    /// Number of quotes in the current list.
    ///
    /// # Errors
    ///
    /// Returns an error if the list lock is poisoned.
    pub fn len(&self) -> Result<usize, QuotebookError> {
        Ok(self.lock()?.len())
    }

    /// Whether the current list is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the list lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, QuotebookError> {
        Ok(self.lock()?.is_empty())
    }

    /// Append one quote and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails; the list is then unchanged.
    pub fn append(&self, quote: Quote) -> Result<(), QuotebookError> {
        self.append_all(vec![quote]).map(|_| ())
    }

    /// Append `quotes` in order and persist. Returns the new length.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails; the list is then unchanged.
    pub fn append_all(&self, quotes: Vec<Quote>) -> Result<usize, QuotebookError> {
        let mut current = self.lock()?;
        let mut next = Vec::with_capacity(current.len() + quotes.len());
        next.extend(current.iter().cloned());
        next.extend(quotes);
        self.commit(&mut current, next)
    }

    /// Discard the current list and replace it with `quotes`, then persist.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails; the list is then unchanged.
    pub fn replace_all(&self, quotes: Vec<Quote>) -> Result<usize, QuotebookError> {
        let mut current = self.lock()?;
        self.commit(&mut current, quotes)
    }

    fn commit(
        &self,
        current: &mut MutexGuard<'_, Arc<Vec<Quote>>>,
        next: Vec<Quote>,
    ) -> Result<usize, QuotebookError> {
        self.store.save(&next)?;
        let len = next.len();
        **current = Arc::new(next);
        Ok(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quotes::store::{seed_quotes, QUOTES_KEY};
    use crate::storage::{KeyValueStore, MemoryStore, MockKeyValueStore};

    fn book() -> (Arc<MemoryStore>, QuoteBook) {
        let kv = Arc::new(MemoryStore::new());
        let book = QuoteBook::open(QuoteStore::new(kv.clone())).unwrap();
        (kv, book)
    }

    fn stored(kv: &MemoryStore) -> Vec<Quote> {
        serde_json::from_str(&kv.get(QUOTES_KEY).unwrap().unwrap()).unwrap()
    }

    #[test]
    fn test_open_seeds_new_book() {
        let (_, book) = book();
        assert_eq!(*book.snapshot().unwrap(), seed_quotes());
        assert!(book.load_warning().is_none());
    }

    #[test]
    fn test_append_persists() {
        let (kv, book) = book();
        book.append(Quote::new("New", "Fresh")).unwrap();

        assert_eq!(book.len().unwrap(), 4);
        assert_eq!(stored(&kv).last(), Some(&Quote::new("New", "Fresh")));
    }

    #[test]
    fn test_append_all_keeps_duplicates_and_order() {
        let (_, book) = book();
        let added = vec![Quote::new("x", "X"), Quote::new("x", "X")];
        let len = book.append_all(added).unwrap();

        assert_eq!(len, 5);
        let snapshot = book.snapshot().unwrap();
        assert_eq!(snapshot[3], Quote::new("x", "X"));
        assert_eq!(snapshot[4], Quote::new("x", "X"));
    }

    #[test]
    fn test_replace_all_discards_local() {
        let (kv, book) = book();
        book.replace_all(vec![Quote::new("only", "Server")]).unwrap();

        assert_eq!(*book.snapshot().unwrap(), vec![Quote::new("only", "Server")]);
        assert_eq!(stored(&kv), vec![Quote::new("only", "Server")]);
    }

    #[test]
    fn test_snapshot_is_not_affected_by_later_replace() {
        let (_, book) = book();
        let before = book.snapshot().unwrap();
        book.replace_all(Vec::new()).unwrap();

        assert_eq!(before.len(), 3);
        assert!(book.is_empty().unwrap());
    }

    #[test]
    fn test_failed_save_leaves_list_unchanged() {
        let mut kv = MockKeyValueStore::new();
        kv.expect_get().returning(|_| Ok(None));
        kv.expect_set()
            .returning(|_, _| Err(QuotebookError::Database("read-only".to_string())));
        let book = QuoteBook::open(QuoteStore::new(Arc::new(kv))).unwrap();

        let err = book.append(Quote::new("lost", "Nowhere")).unwrap_err();

        assert!(matches!(err, QuotebookError::Database(_)));
        assert_eq!(*book.snapshot().unwrap(), seed_quotes());
    }

    #[test]
    fn test_corrupt_store_produces_warning() {
        let kv = Arc::new(MemoryStore::new());
        kv.set(QUOTES_KEY, "[{\"text\": 1}]").unwrap();
        let book = QuoteBook::open(QuoteStore::new(kv)).unwrap();

        assert_eq!(*book.snapshot().unwrap(), seed_quotes());
        assert!(book.load_warning().unwrap().contains("could not be read"));
    }
}
