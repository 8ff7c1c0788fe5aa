//! Export and import commands.

use std::path::Path;

use crate::cli::args::OutputFormat;
use crate::context::Context;
use crate::error::QuotebookError;
use crate::output::{format_exported, format_imported};

/// Execute the export command.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn export(ctx: &Context, path: &Path, format: OutputFormat) -> Result<String, QuotebookError> {
    let mut page = ctx.page();
    let written = page.export(path)?;
    format_exported(&written, ctx.book().len()?, format)
}

/// Execute the import command.
///
/// # Errors
///
/// Returns `QuotebookError::Import` if the file cannot be read or parsed;
/// nothing is imported in that case.
pub async fn import(
    ctx: &Context,
    file: &Path,
    format: OutputFormat,
) -> Result<String, QuotebookError> {
    let mut page = ctx.page();
    let added = page.import(file).await?;
    format_imported(added, ctx.book().len()?, format)
}
