//! Quote page commands: show, random, list, add, categories, filter.

use crate::cli::args::{AddArgs, ListArgs, OutputFormat};
use crate::context::Context;
use crate::error::QuotebookError;
use crate::features::categories::filter_quotes;
use crate::features::display::{DisplayRegion, NO_QUOTES_FOUND};
use crate::output::{format_added, format_categories, format_page, format_quotes, format_region};
use crate::quotes::CategoryFilter;

/// Execute the show command: the page-load view.
///
/// # Errors
///
/// Returns an error if storage fails or output formatting fails.
pub fn show(ctx: &Context, format: OutputFormat) -> Result<String, QuotebookError> {
    let mut page = ctx.page();
    page.load(&mut rand::thread_rng())?;
    format_page(&page.view()?, format)
}

/// Execute the random command.
///
/// # Errors
///
/// Returns an error if storage fails or output formatting fails.
pub fn random(ctx: &Context, format: OutputFormat) -> Result<String, QuotebookError> {
    let mut page = ctx.page();
    if page.show_random(&mut rand::thread_rng())?.is_none() {
        return format_region(
            &DisplayRegion::Message {
                text: NO_QUOTES_FOUND.to_string(),
            },
            format,
        );
    }
    format_region(page.region(), format)
}

/// Execute the list command.
///
/// An explicit `--category` filters this listing only; the saved
/// selection is left alone.
///
/// # Errors
///
/// Returns an error if storage fails or output formatting fails.
pub fn list(
    ctx: &Context,
    args: &ListArgs,
    format: OutputFormat,
) -> Result<String, QuotebookError> {
    let mut page = ctx.page();
    page.refresh()?;

    let filter = args
        .category
        .as_deref()
        .map_or_else(|| page.categories().selected().clone(), CategoryFilter::parse);
    let quotes = filter_quotes(&ctx.book().snapshot()?, &filter);
    format_quotes(&quotes, filter.as_str(), format)
}

/// Execute the add command.
///
/// # Errors
///
/// Returns `QuotebookError::Validation` for blank input, or an error if
/// storage fails.
pub fn add(ctx: &Context, args: &AddArgs, format: OutputFormat) -> Result<String, QuotebookError> {
    let mut page = ctx.page();
    let quote = page.add_quote(&args.text, &args.category)?;
    format_added(&quote, ctx.book().len()?, format)
}

/// Execute the categories command.
///
/// # Errors
///
/// Returns an error if storage fails or output formatting fails.
pub fn categories(ctx: &Context, format: OutputFormat) -> Result<String, QuotebookError> {
    let mut page = ctx.page();
    page.refresh()?;
    format_categories(page.categories(), format)
}

/// Execute the filter command: save the selection and list it.
///
/// # Errors
///
/// Returns an error if storage fails or output formatting fails.
pub fn filter(
    ctx: &Context,
    category: &str,
    format: OutputFormat,
) -> Result<String, QuotebookError> {
    let mut page = ctx.page();
    page.refresh()?;
    let filter = CategoryFilter::parse(category.trim());
    page.select_category(filter.clone())?;
    format_quotes(&page.filtered()?, filter.as_str(), format)
}
