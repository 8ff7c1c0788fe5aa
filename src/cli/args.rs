use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "quotebook")]
#[command(about = "A terminal quote manager with categories, JSON import/export and server sync")]
#[command(long_about = "quotebook - a terminal quote manager

Keeps a list of quotes on disk, shows a random one, filters by category,
imports and exports JSON, and syncs with a REST endpoint. On sync the
server always wins: the local list is replaced by the server's quotes.

QUICK START:
  quotebook                       Show a quote, the categories and the list
  quotebook random                Show another random quote
  quotebook add \"Stay hungry.\" -c Motivation
  quotebook filter Programming    Only list Programming quotes
  quotebook sync                  Replace local quotes with the server's
  quotebook tui                   Interactive mode

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  quotebook <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output or 'json' for
    /// machine-readable output. Defaults to `general.default_output`.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the page: the featured quote, the categories and the filtered list
    ///
    /// The featured quote is the last one shown in this terminal session,
    /// or a random one when the session has none. This is the default
    /// command.
    Show,

    /// Show a new random quote
    ///
    /// Picks uniformly from the whole list and remembers the pick for the
    /// rest of the terminal session.
    #[command(alias = "r")]
    Random,

    /// List quotes, filtered by category
    ///
    /// Without --category the saved selection is used.
    ///
    /// # Examples
    ///
    ///   quotebook list
    ///   quotebook list --category Programming
    ///   quotebook list -c all -o json
    #[command(alias = "ls")]
    List(ListArgs),

    /// Add a quote
    ///
    /// Both the text and the category are trimmed and must not be empty.
    ///
    /// # Examples
    ///
    ///   quotebook add "Talk is cheap. Show me the code." --category Programming
    ///   quotebook a "Keep going." -c Motivation
    #[command(alias = "a")]
    Add(AddArgs),

    /// Show the category options, marking the selection
    #[command(alias = "cats")]
    Categories,

    /// Select a category (or 'all') and list its quotes
    ///
    /// The selection is saved and restored on the next run.
    Filter {
        /// Category label, or 'all'
        category: String,
    },

    /// Export all quotes to a JSON file
    ///
    /// A directory target receives a quotes.json inside it.
    Export {
        /// Target file or directory
        #[arg(default_value = "quotes.json")]
        path: PathBuf,
    },

    /// Import quotes from a JSON file
    ///
    /// The file must hold a JSON array of {"text", "category"} objects.
    /// Imported quotes are appended; nothing is deduplicated.
    Import {
        /// File to import
        file: PathBuf,
    },

    /// Sync with the server
    ///
    /// Fetches the endpoint, keeps the first page of records as quotes in
    /// the server category, and replaces the local list with them.
    Sync(SyncArgs),

    /// Sync on a timer until interrupted
    Watch(WatchArgs),

    /// Manage the terminal session
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },

    /// Generate shell completions
    ///
    /// Example: quotebook completions zsh > ~/.zsh/completions/_quotebook
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,

        /// Show installation instructions instead
        #[arg(long, short = 'i')]
        install: bool,
    },

    /// Interactive terminal UI
    ///
    /// Keys: n new quote, a add, e export, i import, s sync,
    /// ←/→ or [/] change category, ? help, q quit.
    Tui,
}

/// Arguments for listing quotes.
#[derive(Args, Default)]
pub struct ListArgs {
    /// Category label, or 'all'. Defaults to the saved selection.
    #[arg(long, short = 'c')]
    pub category: Option<String>,
}

/// Arguments for adding a quote.
#[derive(Args)]
pub struct AddArgs {
    /// Quote text
    pub text: String,

    /// Quote category
    #[arg(long, short = 'c')]
    pub category: String,
}

/// Arguments for a one-shot sync.
#[derive(Args, Default)]
pub struct SyncArgs {
    /// Fetch and map only; change nothing locally or remotely
    #[arg(long)]
    pub dry_run: bool,

    /// Do not push the replacement list back to the server
    #[arg(long)]
    pub no_push: bool,
}

/// Arguments for the sync loop.
#[derive(Args, Default)]
pub struct WatchArgs {
    /// Seconds between syncs. Defaults to `sync.interval_secs`.
    #[arg(long, short = 'n')]
    pub interval: Option<u64>,

    /// Do not push the replacement list back to the server
    #[arg(long)]
    pub no_push: bool,
}

/// Session subcommands.
#[derive(Subcommand)]
pub enum SessionCommands {
    /// Forget this terminal session's values (e.g. the last shown quote)
    End,
}
