//! Quote data model, persistence and the shared quote book.

mod book;
mod store;
mod types;

pub use book::QuoteBook;
pub use store::{
    seed_quotes, LoadOrigin, Loaded, QuoteStore, QUOTES_KEY, SELECTED_CATEGORY_KEY,
};
pub use types::{CategoryFilter, Quote, ALL_CATEGORIES};
