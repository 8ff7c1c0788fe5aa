//! The quote page: display region, category selector, and status line
//! composed over one [`QuoteBook`].
//!
//! Every user action ends the same way: the category selector is rebuilt
//! from the current list and the filtered view is repainted.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;
use serde::Serialize;

use crate::error::QuotebookError;
use crate::features::categories::CategoryIndex;
use crate::features::display::{DisplayRegion, Renderer};
use crate::features::form::{self, ADDED_MESSAGE};
use crate::features::status::{StatusKind, StatusLine, StatusMessage};
use crate::features::sync::{SyncReport, SYNCED_MESSAGE, SYNC_FAILED_MESSAGE};
use crate::features::transfer::{self, IMPORTED_MESSAGE};
use crate::quotes::{CategoryFilter, Quote, QuoteBook};
use crate::storage::KeyValueStore;

/// Serializable snapshot of everything the page shows.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub display: DisplayRegion,
    pub categories: CategoryIndex,
    pub filtered: Vec<Quote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

pub struct QuotePage {
    book: Arc<QuoteBook>,
    renderer: Renderer,
    categories: CategoryIndex,
    status: StatusLine,
}

impl QuotePage {
    /// Build a page over `book`. Nothing is painted until [`QuotePage::load`].
    #[must_use]
    pub fn new(
        book: Arc<QuoteBook>,
        session: Arc<dyn KeyValueStore>,
        status_ttl: Duration,
    ) -> Self {
        Self {
            book,
            renderer: Renderer::new(session),
            categories: CategoryIndex::default(),
            status: StatusLine::new(status_ttl),
        }
    }

    /// Page load: rebuild the selector, then restore the session's last
    /// quote or show a random one.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read or written.
    pub fn load<R: Rng>(&mut self, rng: &mut R) -> Result<(), QuotebookError> {
        let quotes = self.book.snapshot()?;
        self.categories = CategoryIndex::populate(&quotes, self.book.store())?;
        self.renderer.restore_or_random(&quotes, rng)?;
        if *self.renderer.region() == DisplayRegion::Blank {
            self.renderer.show_filtered(self.categories.filtered(&quotes));
        }
        if let Some(warning) = self.book.load_warning() {
            self.status.set(warning, StatusKind::Failure, Instant::now());
        }
        Ok(())
    }

    /// Rebuild the selector and repaint the filtered view.
    ///
    /// # Errors
    ///
    /// Returns an error if the saved selection cannot be read.
    pub fn refresh(&mut self) -> Result<(), QuotebookError> {
        let quotes = self.book.snapshot()?;
        self.categories = CategoryIndex::populate(&quotes, self.book.store())?;
        self.renderer.show_filtered(self.categories.filtered(&quotes));
        Ok(())
    }

    /// Show a fresh random quote. `None` when the list is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the session snapshot cannot be written.
    pub fn show_random<R: Rng>(&mut self, rng: &mut R) -> Result<Option<Quote>, QuotebookError> {
        let quotes = self.book.snapshot()?;
        Ok(self
            .renderer
            .show_random(&quotes, rng)?
            .map(|index| quotes[index].clone()))
    }

    /// Validate and append a quote, then confirm in the display region.
    ///
    /// # Errors
    ///
    /// Returns `QuotebookError::Validation` for blank input, or a storage
    /// error. The list is unchanged on error.
    pub fn add_quote(&mut self, text: &str, category: &str) -> Result<Quote, QuotebookError> {
        let quote = form::validate(text, category)?;
        self.book.append(quote.clone())?;
        tracing::debug!(category = %quote.category, "Added quote");

        self.refresh()?;
        self.renderer.show_message(ADDED_MESSAGE);
        self.status.set(ADDED_MESSAGE, StatusKind::Success, Instant::now());
        Ok(quote)
    }

    /// Select a category, persist it, and repaint the filtered view.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection cannot be persisted.
    pub fn select_category(&mut self, filter: CategoryFilter) -> Result<(), QuotebookError> {
        self.categories.select(filter, self.book.store())?;
        let quotes = self.book.snapshot()?;
        self.renderer.show_filtered(self.categories.filtered(&quotes));
        Ok(())
    }

    /// Move the selection by `step` options and repaint.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection cannot be persisted.
    pub fn cycle_category(&mut self, step: isize) -> Result<(), QuotebookError> {
        self.categories.cycle(step, self.book.store())?;
        let quotes = self.book.snapshot()?;
        self.renderer.show_filtered(self.categories.filtered(&quotes));
        Ok(())
    }

    /// Export the whole list to `target`. Returns the written path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn export(&mut self, target: &Path) -> Result<PathBuf, QuotebookError> {
        let quotes = self.book.snapshot()?;
        let path = transfer::export_to(&quotes, target)?;
        self.status.set(
            format!("Exported {} quotes to {}", quotes.len(), path.display()),
            StatusKind::Success,
            Instant::now(),
        );
        Ok(path)
    }

    /// Append already-parsed quotes and repaint. Returns how many were added.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be persisted.
    pub fn import_quotes(&mut self, quotes: Vec<Quote>) -> Result<usize, QuotebookError> {
        let added = quotes.len();
        let total = self.book.append_all(quotes)?;
        tracing::info!(added, total, "Imported quotes");

        self.refresh()?;
        self.status.set(IMPORTED_MESSAGE, StatusKind::Success, Instant::now());
        Ok(added)
    }

    /// Read `path` and append its quotes.
    ///
    /// # Errors
    ///
    /// Returns `QuotebookError::Import` if the file cannot be read or parsed;
    /// the list is then unchanged.
    pub async fn import(&mut self, path: &Path) -> Result<usize, QuotebookError> {
        let quotes = transfer::read_import(path).await?;
        self.import_quotes(quotes)
    }

    /// Reflect a finished sync: repaint on success and post the outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the repaint cannot read storage.
    pub fn apply_sync(
        &mut self,
        result: &Result<SyncReport, QuotebookError>,
    ) -> Result<(), QuotebookError> {
        let now = Instant::now();
        match result {
            Ok(report) if report.dry_run => {
                self.status.set(
                    format!(
                        "Dry run: {} server quotes would replace {}",
                        report.kept, report.replaced
                    ),
                    StatusKind::Info,
                    now,
                );
            }
            Ok(_) => {
                self.refresh()?;
                self.status.set(SYNCED_MESSAGE, StatusKind::Success, now);
            }
            Err(_) => self.status.set(SYNC_FAILED_MESSAGE, StatusKind::Failure, now),
        }
        Ok(())
    }

    /// Post a status message.
    pub fn notify(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status.set(text, kind, Instant::now());
    }

    /// Drop an expired status message. Returns `true` if the line changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.status.clear_expired(now)
    }

    #[must_use]
    pub fn status(&self, now: Instant) -> Option<&StatusMessage> {
        self.status.current(now)
    }

    #[must_use]
    pub const fn region(&self) -> &DisplayRegion {
        self.renderer.region()
    }

    #[must_use]
    pub const fn categories(&self) -> &CategoryIndex {
        &self.categories
    }

    #[must_use]
    pub const fn book(&self) -> &Arc<QuoteBook> {
        &self.book
    }

    /// Quotes passing the current selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the list lock is poisoned.
    pub fn filtered(&self) -> Result<Vec<Quote>, QuotebookError> {
        Ok(self.categories.filtered(&self.book.snapshot()?))
    }

    /// Snapshot the page for output.
    ///
    /// # Errors
    ///
    /// Returns an error if the list lock is poisoned.
    pub fn view(&self) -> Result<PageView, QuotebookError> {
        Ok(PageView {
            display: self.renderer.region().clone(),
            categories: self.categories.clone(),
            filtered: self.filtered()?,
            warning: self.book.load_warning(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::display::{LAST_QUOTE_KEY, NO_QUOTES_FOUND};
    use crate::features::form::VALIDATION_MESSAGE;
    use crate::quotes::{seed_quotes, QuoteStore, QUOTES_KEY, SELECTED_CATEGORY_KEY};
    use crate::storage::MemoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    struct Fixture {
        persistent: Arc<MemoryStore>,
        session: Arc<MemoryStore>,
        page: QuotePage,
    }

    fn fixture_with(quotes: Option<&[Quote]>) -> Fixture {
        let persistent = Arc::new(MemoryStore::new());
        let session = Arc::new(MemoryStore::new());
        let store = QuoteStore::new(persistent.clone());
        if let Some(quotes) = quotes {
            store.save(quotes).unwrap();
        }
        let book = Arc::new(QuoteBook::open(store).unwrap());
        let page = QuotePage::new(book, session.clone(), Duration::from_secs(5));
        Fixture {
            persistent,
            session,
            page,
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn aab() -> Vec<Quote> {
        vec![
            Quote::new("one", "A"),
            Quote::new("two", "A"),
            Quote::new("three", "B"),
        ]
    }

    #[test]
    fn test_load_shows_random_seed_quote() {
        let mut f = fixture_with(None);
        f.page.load(&mut rng()).unwrap();

        let DisplayRegion::Single { quote } = f.page.region() else {
            panic!("expected a single quote, got {:?}", f.page.region());
        };
        assert!(seed_quotes().contains(quote));
        assert_eq!(
            f.page.categories().options(),
            vec!["all", "Education", "Programming", "Motivation"]
        );
        assert!(f.session.get(LAST_QUOTE_KEY).unwrap().is_some());
    }

    #[test]
    fn test_load_restores_session_quote() {
        let mut f = fixture_with(None);
        f.session
            .set(LAST_QUOTE_KEY, r#"{"text":"kept","category":"Session"}"#)
            .unwrap();

        f.page.load(&mut rng()).unwrap();

        assert_eq!(
            f.page.region(),
            &DisplayRegion::Single {
                quote: Quote::new("kept", "Session")
            }
        );
    }

    #[test]
    fn test_load_empty_list_shows_no_quotes_found() {
        let mut f = fixture_with(Some(&[]));
        f.page.load(&mut rng()).unwrap();

        assert_eq!(
            f.page.region(),
            &DisplayRegion::Message {
                text: NO_QUOTES_FOUND.to_string()
            }
        );
    }

    #[test]
    fn test_load_reports_corrupt_storage() {
        let mut f = fixture_with(None);
        f.persistent.set(QUOTES_KEY, "{not json").unwrap();
        let book = Arc::new(QuoteBook::open(QuoteStore::new(f.persistent.clone())).unwrap());
        f.page = QuotePage::new(book, f.session.clone(), Duration::from_secs(5));

        f.page.load(&mut rng()).unwrap();

        let status = f.page.status(Instant::now()).unwrap();
        assert_eq!(status.kind, StatusKind::Failure);
        assert!(f.page.view().unwrap().warning.is_some());
        assert_eq!(*f.page.book().snapshot().unwrap(), seed_quotes());
    }

    #[test]
    fn test_add_quote_appends_and_confirms() {
        let mut f = fixture_with(None);
        f.page.load(&mut rng()).unwrap();

        let quote = f.page.add_quote("  New one ", " Fresh ").unwrap();

        assert_eq!(quote, Quote::new("New one", "Fresh"));
        assert_eq!(f.page.book().len().unwrap(), 4);
        assert_eq!(
            f.page.region(),
            &DisplayRegion::Message {
                text: ADDED_MESSAGE.to_string()
            }
        );
        assert!(f.page.categories().options().contains(&"Fresh".to_string()));
        let stored: Vec<Quote> =
            serde_json::from_str(&f.persistent.get(QUOTES_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(stored.last(), Some(&quote));
    }

    #[test]
    fn test_add_quote_rejects_blank_input() {
        let mut f = fixture_with(None);
        f.page.load(&mut rng()).unwrap();

        for (text, category) in [("", "X"), ("X", ""), ("", "")] {
            let err = f.page.add_quote(text, category).unwrap_err();
            assert_eq!(err.to_string(), VALIDATION_MESSAGE);
        }
        assert_eq!(f.page.book().len().unwrap(), 3);
    }

    #[test]
    fn test_select_category_filters_and_persists() {
        let mut f = fixture_with(Some(&aab()));
        f.page.load(&mut rng()).unwrap();

        f.page.select_category(CategoryFilter::parse("A")).unwrap();

        assert_eq!(
            f.page.region(),
            &DisplayRegion::List {
                quotes: vec![Quote::new("one", "A"), Quote::new("two", "A")]
            }
        );
        assert_eq!(
            f.persistent.get(SELECTED_CATEGORY_KEY).unwrap().as_deref(),
            Some("A")
        );

        f.page.select_category(CategoryFilter::All).unwrap();
        assert_eq!(f.page.filtered().unwrap(), aab());
    }

    #[test]
    fn test_cycle_category() {
        let mut f = fixture_with(Some(&aab()));
        f.page.load(&mut rng()).unwrap();

        f.page.cycle_category(-1).unwrap();

        assert_eq!(f.page.categories().selected().as_str(), "B");
        assert_eq!(f.page.filtered().unwrap(), vec![Quote::new("three", "B")]);
    }

    #[tokio::test]
    async fn test_export_then_import_appends_copies() {
        let dir = TempDir::new().unwrap();
        let mut f = fixture_with(Some(&aab()));
        f.page.load(&mut rng()).unwrap();

        let path = f.page.export(dir.path()).unwrap();
        let added = f.page.import(&path).await.unwrap();

        assert_eq!(added, 3);
        let quotes = f.page.book().snapshot().unwrap();
        assert_eq!(quotes.len(), 6);
        assert_eq!(quotes[3..], aab()[..]);
        assert_eq!(
            f.page.status(Instant::now()).map(|s| s.text.as_str()),
            Some(IMPORTED_MESSAGE)
        );
    }

    #[tokio::test]
    async fn test_import_malformed_file_leaves_list() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "[{\"text\": ").unwrap();
        let mut f = fixture_with(Some(&aab()));
        f.page.load(&mut rng()).unwrap();

        let err = f.page.import(&path).await.unwrap_err();

        assert!(matches!(err, QuotebookError::Import(_)));
        assert_eq!(*f.page.book().snapshot().unwrap(), aab());
    }

    #[test]
    fn test_apply_sync_success_refreshes() {
        let mut f = fixture_with(Some(&aab()));
        f.page.load(&mut rng()).unwrap();
        let server = vec![Quote::new("s", "Server")];
        f.page.book().replace_all(server.clone()).unwrap();
        let report = SyncReport {
            trigger: crate::features::sync::SyncTrigger::Manual,
            fetched: 1,
            kept: 1,
            replaced: 3,
            pushed: false,
            dry_run: false,
            quotes: server.clone(),
        };

        f.page.apply_sync(&Ok(report)).unwrap();

        assert_eq!(f.page.categories().options(), vec!["all", "Server"]);
        assert_eq!(f.page.region(), &DisplayRegion::List { quotes: server });
        assert_eq!(
            f.page.status(Instant::now()).map(|s| s.text.as_str()),
            Some(SYNCED_MESSAGE)
        );
    }

    #[test]
    fn test_apply_sync_failure_posts_status() {
        let mut f = fixture_with(Some(&aab()));
        f.page.load(&mut rng()).unwrap();
        let before = f.page.region().clone();

        f.page
            .apply_sync(&Err(QuotebookError::Network("down".to_string())))
            .unwrap();

        let status = f.page.status(Instant::now()).unwrap();
        assert_eq!(status.text, SYNC_FAILED_MESSAGE);
        assert_eq!(status.kind, StatusKind::Failure);
        assert_eq!(f.page.region(), &before);
        assert!(f.page.tick(Instant::now() + Duration::from_secs(6)));
        assert!(f.page.status(Instant::now() + Duration::from_secs(6)).is_none());
    }
}
