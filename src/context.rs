//! Shared state for one quotebook invocation.

use std::sync::Arc;

use crate::config::{Config, Paths};
use crate::error::QuotebookError;
use crate::features::sync::{HttpRemote, SyncAgent, SyncOptions};
use crate::page::QuotePage;
use crate::quotes::{QuoteBook, QuoteStore};
use crate::storage::{Database, KeyValueStore, PersistentStore, SessionStore};

/// Opened stores and the quote book, built once per process.
pub struct Context {
    pub config: Config,
    pub paths: Paths,
    book: Arc<QuoteBook>,
    session: Arc<SessionStore>,
}

impl Context {
    /// Open the database under `paths`, purge idle sessions and load the book.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory or database cannot be opened.
    pub fn open(config: Config, paths: Paths) -> Result<Self, QuotebookError> {
        paths.ensure_dirs()?;
        let db = Arc::new(Database::open_at(&paths.database)?);
        Self::with_database(config, paths, db)
    }

    /// Build a context over an already opened database.
    ///
    /// # Errors
    ///
    /// Returns an error if the stores cannot be read.
    pub fn with_database(
        config: Config,
        paths: Paths,
        db: Arc<Database>,
    ) -> Result<Self, QuotebookError> {
        let session = SessionStore::current(Arc::clone(&db));
        let idle = chrono::Duration::minutes(i64::from(config.session.idle_timeout_minutes));
        session.purge_idle(idle)?;

        let store = QuoteStore::new(Arc::new(PersistentStore::new(db)));
        let book = Arc::new(QuoteBook::open(store)?);
        tracing::debug!(session = session.session_id(), quotes = book.len()?, "Opened quotebook");

        Ok(Self {
            config,
            paths,
            book,
            session: Arc::new(session),
        })
    }

    #[must_use]
    pub const fn book(&self) -> &Arc<QuoteBook> {
        &self.book
    }

    #[must_use]
    pub const fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// A fresh page over the shared book. Call [`QuotePage::load`] or
    /// [`QuotePage::refresh`] before reading it.
    #[must_use]
    pub fn page(&self) -> QuotePage {
        let session: Arc<dyn KeyValueStore> = self.session.clone();
        QuotePage::new(
            Arc::clone(&self.book),
            session,
            self.config.status.clear_after(),
        )
    }

    /// A sync agent for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn sync_agent(
        &self,
        options: SyncOptions,
    ) -> Result<SyncAgent<HttpRemote>, QuotebookError> {
        let remote = HttpRemote::from_config(&self.config.sync)?;
        tracing::debug!(endpoint = remote.endpoint(), "Using sync endpoint");
        Ok(SyncAgent::new(Arc::new(remote), Arc::clone(&self.book), options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::display::LAST_QUOTE_KEY;
    use crate::quotes::{seed_quotes, Quote};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    fn open(dir: &TempDir) -> Context {
        let paths = Paths::with_root(dir.path().join(".quotebook"));
        Context::open(Config::default(), paths).unwrap()
    }

    #[test]
    fn test_fresh_context_seeds_book() {
        let dir = TempDir::new().unwrap();
        let ctx = open(&dir);

        assert_eq!(*ctx.book().snapshot().unwrap(), seed_quotes());
        assert!(ctx.paths.database.exists());
    }

    #[test]
    fn test_quotes_persist_across_contexts() {
        let dir = TempDir::new().unwrap();
        open(&dir).book().append(Quote::new("kept", "Disk")).unwrap();

        let reopened = open(&dir);

        assert_eq!(reopened.book().len().unwrap(), 4);
        assert_eq!(
            reopened.book().snapshot().unwrap().last(),
            Some(&Quote::new("kept", "Disk"))
        );
    }

    #[test]
    fn test_page_writes_session_snapshot() {
        let dir = TempDir::new().unwrap();
        let ctx = open(&dir);
        let mut page = ctx.page();

        page.show_random(&mut StdRng::seed_from_u64(3)).unwrap();

        assert!(ctx.session().get(LAST_QUOTE_KEY).unwrap().is_some());
    }
}
