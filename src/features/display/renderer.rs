use std::sync::Arc;

use rand::Rng;
use serde::Serialize;

use crate::error::QuotebookError;
use crate::quotes::Quote;
use crate::storage::KeyValueStore;

/// Session key holding the last randomly shown quote.
pub const LAST_QUOTE_KEY: &str = "lastQuote";

/// Message shown when a filtered view is empty.
pub const NO_QUOTES_FOUND: &str = "No quotes found.";

/// What the display region currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DisplayRegion {
    /// Nothing painted yet.
    #[default]
    Blank,
    /// A single quote, e.g. a random pick.
    Single { quote: Quote },
    /// A (filtered) list of quotes, in list order.
    List { quotes: Vec<Quote> },
    /// A plain message.
    Message { text: String },
}

/// Format one list line: `"<text>" — <category>`.
#[must_use]
pub fn format_quote_line(quote: &Quote) -> String {
    format!("\"{}\" — {}", quote.text, quote.category)
}

/// Paints quotes into a [`DisplayRegion`].
pub struct Renderer {
    session: Arc<dyn KeyValueStore>,
    region: DisplayRegion,
}

impl Renderer {
    #[must_use]
    pub fn new(session: Arc<dyn KeyValueStore>) -> Self {
        Self {
            session,
            region: DisplayRegion::Blank,
        }
    }

    /// The current display region.
    #[must_use]
    pub const fn region(&self) -> &DisplayRegion {
        &self.region
    }

    /// Show a uniformly random quote from `quotes` and remember it for the session.
    ///
    /// Does nothing and returns `None` when `quotes` is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the session snapshot cannot be written.
    pub fn show_random<R: Rng>(
        &mut self,
        quotes: &[Quote],
        rng: &mut R,
    ) -> Result<Option<usize>, QuotebookError> {
        if quotes.is_empty() {
            return Ok(None);
        }

        let index = rng.gen_range(0..quotes.len());
        let quote = quotes[index].clone();
        self.session
            .set(LAST_QUOTE_KEY, &serde_json::to_string(&quote)?)?;
        tracing::debug!(index, "Showing random quote");
        self.region = DisplayRegion::Single { quote };

        Ok(Some(index))
    }

    /// Show `quotes` as a list, or [`NO_QUOTES_FOUND`] when empty.
    pub fn show_filtered(&mut self, quotes: Vec<Quote>) {
        self.region = if quotes.is_empty() {
            DisplayRegion::Message {
                text: NO_QUOTES_FOUND.to_string(),
            }
        } else {
            DisplayRegion::List { quotes }
        };
    }

    /// Show a message in place of quotes.
    pub fn show_message(&mut self, text: impl Into<String>) {
        self.region = DisplayRegion::Message { text: text.into() };
    }

    /// The last quote shown this session, if any.
    ///
    /// An unreadable snapshot counts as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub fn last_shown(&self) -> Result<Option<Quote>, QuotebookError> {
        let Some(raw) = self.session.get(LAST_QUOTE_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(quote) => Ok(Some(quote)),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unreadable last-quote snapshot");
                Ok(None)
            }
        }
    }

    /// Show the session's last quote verbatim, or pick a fresh random one.
    ///
    /// Returns `true` when the snapshot was restored.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read or written.
    pub fn restore_or_random<R: Rng>(
        &mut self,
        quotes: &[Quote],
        rng: &mut R,
    ) -> Result<bool, QuotebookError> {
        if let Some(quote) = self.last_shown()? {
            self.region = DisplayRegion::Single { quote };
            return Ok(true);
        }
        self.show_random(quotes, rng)?;
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quotes::seed_quotes;
    use crate::storage::MemoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn renderer() -> (Arc<MemoryStore>, Renderer) {
        let session = Arc::new(MemoryStore::new());
        let renderer = Renderer::new(session.clone());
        (session, renderer)
    }

    #[test]
    fn test_show_random_stays_in_bounds() {
        let (_, mut renderer) = renderer();
        let quotes = seed_quotes();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let index = renderer.show_random(&quotes, &mut rng).unwrap().unwrap();
            assert!(index < quotes.len());
            assert_eq!(
                renderer.region(),
                &DisplayRegion::Single {
                    quote: quotes[index].clone()
                }
            );
        }
    }

    #[test]
    fn test_show_random_reaches_every_quote() {
        let (_, mut renderer) = renderer();
        let quotes = seed_quotes();
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = [false; 3];

        for _ in 0..100 {
            let index = renderer.show_random(&quotes, &mut rng).unwrap().unwrap();
            seen[index] = true;
        }

        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_show_random_empty_is_noop() {
        let (session, mut renderer) = renderer();
        renderer.show_message("before");
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(renderer.show_random(&[], &mut rng).unwrap(), None);

        assert_eq!(
            renderer.region(),
            &DisplayRegion::Message {
                text: "before".to_string()
            }
        );
        assert!(session.get(LAST_QUOTE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_show_random_saves_session_snapshot() {
        let (session, mut renderer) = renderer();
        let quotes = vec![Quote::new("only", "One")];
        let mut rng = StdRng::seed_from_u64(0);

        renderer.show_random(&quotes, &mut rng).unwrap();

        let raw = session.get(LAST_QUOTE_KEY).unwrap().unwrap();
        assert_eq!(raw, r#"{"text":"only","category":"One"}"#);
    }

    #[test]
    fn test_restore_prefers_session_snapshot() {
        let (session, mut renderer) = renderer();
        session
            .set(LAST_QUOTE_KEY, r#"{"text":"remembered","category":"Past"}"#)
            .unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let restored = renderer.restore_or_random(&seed_quotes(), &mut rng).unwrap();

        assert!(restored);
        assert_eq!(
            renderer.region(),
            &DisplayRegion::Single {
                quote: Quote::new("remembered", "Past")
            }
        );
    }

    #[test]
    fn test_restore_falls_back_to_random_on_corrupt_snapshot() {
        let (session, mut renderer) = renderer();
        session.set(LAST_QUOTE_KEY, "garbage").unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let restored = renderer.restore_or_random(&seed_quotes(), &mut rng).unwrap();

        assert!(!restored);
        assert!(matches!(renderer.region(), DisplayRegion::Single { .. }));
    }

    #[test]
    fn test_show_filtered() {
        let (_, mut renderer) = renderer();

        renderer.show_filtered(Vec::new());
        assert_eq!(
            renderer.region(),
            &DisplayRegion::Message {
                text: NO_QUOTES_FOUND.to_string()
            }
        );

        renderer.show_filtered(seed_quotes());
        assert_eq!(
            renderer.region(),
            &DisplayRegion::List {
                quotes: seed_quotes()
            }
        );
    }

    #[test]
    fn test_format_quote_line() {
        let line = format_quote_line(&Quote::new("Talk is cheap.", "Programming"));
        assert_eq!(line, "\"Talk is cheap.\" — Programming");
    }
}
