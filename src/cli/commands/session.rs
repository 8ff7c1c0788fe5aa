//! Session command implementation.

use colored::Colorize;

use crate::cli::args::{OutputFormat, SessionCommands};
use crate::context::Context;
use crate::error::QuotebookError;
use crate::output::to_json;

/// Execute session subcommands.
///
/// # Errors
///
/// Returns an error if the session store cannot be cleared.
pub fn session(
    ctx: &Context,
    cmd: &SessionCommands,
    format: OutputFormat,
) -> Result<String, QuotebookError> {
    match cmd {
        SessionCommands::End => {
            let removed = ctx.session().end()?;
            tracing::debug!(session = ctx.session().session_id(), removed, "Ended session");
            match format {
                OutputFormat::Json => to_json(&serde_json::json!({
                    "session": ctx.session().session_id(),
                    "removed": removed,
                })),
                OutputFormat::Pretty => Ok(format!(
                    "{} Ended session {} ({} values cleared)",
                    "✓".green(),
                    ctx.session().session_id().cyan(),
                    removed
                )),
            }
        }
    }
}
