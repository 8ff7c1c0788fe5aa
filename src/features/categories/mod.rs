//! Category index and filtering.
//!
//! Derives the distinct category labels of the quote list, builds the
//! selector options (with the synthetic `all` first) and remembers the
//! user's selection across runs.

mod index;

pub use index::{distinct_categories, filter_quotes, CategoryIndex};
