//! Command implementations for quotebook.
//!
//! Each command takes the shared [`Context`](crate::context::Context) and
//! returns the text to print.

mod quotes;
mod session;
mod sync;
mod transfer;

pub use quotes::{add, categories, filter, list, random, show};
pub use session::session;
pub use sync::{sync, watch};
pub use transfer::{export, import};

use clap_complete::Shell;

use crate::error::QuotebookError;
use crate::features::completions::{generate_completions, install_hint};

/// Execute the completions command.
///
/// # Errors
///
/// Returns an error if the script cannot be generated.
pub fn completions(shell: Shell, install: bool) -> Result<String, QuotebookError> {
    if install {
        Ok(install_hint(shell).to_string())
    } else {
        generate_completions(shell)
    }
}
