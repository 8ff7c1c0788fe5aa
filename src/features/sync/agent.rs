//! Sync agent: remote-authoritative replacement of the quote list.
//!
//! A sync fetches the endpoint's records, keeps the first `page_size`, maps
//! each record's `title` to a quote in the server category, optionally pushes
//! that list back, and finally replaces the local list with it. Nothing local
//! changes until every earlier step has succeeded.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::remote::QuoteRemote;
use crate::config::SyncConfig;
use crate::error::QuotebookError;
use crate::quotes::{Quote, QuoteBook};

/// Status shown after a successful sync.
pub const SYNCED_MESSAGE: &str = "Quotes synced with server!";
/// Status shown after a failed sync.
pub const SYNC_FAILED_MESSAGE: &str = "Sync failed.";

/// What started a sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncTrigger {
    /// The recurring timer.
    Timer,
    /// A user action.
    Manual,
    /// The initial sync at startup.
    Startup,
}

impl std::fmt::Display for SyncTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timer => write!(f, "timer"),
            Self::Manual => write!(f, "manual"),
            Self::Startup => write!(f, "startup"),
        }
    }
}

/// Tunables for one agent.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Remote records consumed per sync.
    pub page_size: usize,
    /// Category given to every remote quote.
    pub server_category: String,
    /// Push the replacement list back to the endpoint.
    pub push: bool,
    /// Fetch and map only; leave local state and the remote untouched.
    pub dry_run: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self::from(&SyncConfig::default())
    }
}

impl From<&SyncConfig> for SyncOptions {
    fn from(config: &SyncConfig) -> Self {
        Self {
            page_size: config.page_size,
            server_category: config.server_category.clone(),
            push: config.push_after_sync,
            dry_run: false,
        }
    }
}

/// Summary of one successful sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub trigger: SyncTrigger,
    /// Records the endpoint returned.
    pub fetched: usize,
    /// Records mapped into quotes.
    pub kept: usize,
    /// Local quotes discarded by the replacement.
    pub replaced: usize,
    /// Whether the replacement list was pushed back.
    pub pushed: bool,
    /// Whether local state was left untouched on purpose.
    pub dry_run: bool,
    /// The quotes that now make up (or, on a dry run, would make up) the list.
    pub quotes: Vec<Quote>,
}

#[derive(Deserialize)]
struct RemoteRecord {
    title: String,
}

/// Map the first `page_size` remote records to quotes in `category`.
///
/// # Errors
///
/// Returns `QuotebookError::MalformedPayload` if a consumed record has no
/// string `title`.
pub fn map_remote(
    records: Vec<Value>,
    page_size: usize,
    category: &str,
) -> Result<Vec<Quote>, QuotebookError> {
    records
        .into_iter()
        .take(page_size)
        .enumerate()
        .map(|(i, record)| {
            serde_json::from_value::<RemoteRecord>(record)
                .map(|r| Quote::new(r.title, category))
                .map_err(|e| QuotebookError::MalformedPayload(format!("record {i}: {e}")))
        })
        .collect()
}

/// Performs syncs against one remote for one quote book.
pub struct SyncAgent<R> {
    remote: Arc<R>,
    book: Arc<QuoteBook>,
    options: SyncOptions,
}

impl<R> Clone for SyncAgent<R> {
    fn clone(&self) -> Self {
        Self {
            remote: Arc::clone(&self.remote),
            book: Arc::clone(&self.book),
            options: self.options.clone(),
        }
    }
}

impl<R: QuoteRemote> SyncAgent<R> {
    #[must_use]
    pub fn new(remote: Arc<R>, book: Arc<QuoteBook>, options: SyncOptions) -> Self {
        Self {
            remote,
            book,
            options,
        }
    }

    #[must_use]
    pub const fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// Run one sync.
    ///
    /// Overlapping syncs are allowed: each one commits with a single atomic
    /// swap, so the last to finish wins.
    ///
    /// # Errors
    ///
    /// Returns the first failure. The local list is then unchanged.
    pub async fn sync_once(&self, trigger: SyncTrigger) -> Result<SyncReport, QuotebookError> {
        match self.run(trigger).await {
            Ok(report) => {
                tracing::info!(
                    %trigger,
                    fetched = report.fetched,
                    kept = report.kept,
                    replaced = report.replaced,
                    pushed = report.pushed,
                    dry_run = report.dry_run,
                    "Sync completed"
                );
                Ok(report)
            }
            Err(e) => {
                tracing::error!(%trigger, error = %e, "Sync failed");
                Err(e)
            }
        }
    }

    async fn run(&self, trigger: SyncTrigger) -> Result<SyncReport, QuotebookError> {
        let records = self.remote.fetch().await?;
        let fetched = records.len();
        let quotes = map_remote(
            records,
            self.options.page_size,
            &self.options.server_category,
        )?;

        if self.options.dry_run {
            return Ok(SyncReport {
                trigger,
                fetched,
                kept: quotes.len(),
                replaced: self.book.len()?,
                pushed: false,
                dry_run: true,
                quotes,
            });
        }

        // Push the staged list first so a failed push leaves local state alone.
        if self.options.push {
            self.remote.push(&quotes).await?;
        }

        let replaced = self.book.len()?;
        self.book.replace_all(quotes.clone())?;

        Ok(SyncReport {
            trigger,
            fetched,
            kept: quotes.len(),
            replaced,
            pushed: self.options.push,
            dry_run: false,
            quotes,
        })
    }
}
