use std::fs::OpenOptions;
use std::sync::Mutex;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use quotebook::cli::args::{Cli, Commands};
use quotebook::cli::commands;
use quotebook::config::{Config, Paths};
use quotebook::context::Context;
use quotebook::error::QuotebookError;

const LOG_ENV: &str = "QUOTEBOOK_LOG";

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Log to stderr for one-shot commands. The TUI owns the terminal, so it
/// logs to the log file instead, or nowhere if the file cannot be opened.
fn init_tracing(paths: &Paths, tui: bool) {
    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    if !tui {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
        return;
    }

    let file = paths.ensure_dirs().ok().and_then(|()| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&paths.log_file)
            .ok()
    });

    match file {
        Some(file) => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(env_filter)
                .init();
            tracing::info!(path = %paths.log_file.display(), "Logging initialized");
        }
        None => tracing_subscriber::registry().with(env_filter).init(),
    }
}

fn run() -> Result<(), QuotebookError> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Show);

    // Completions need neither config nor storage.
    if let Commands::Completions { shell, install } = command {
        println!("{}", commands::completions(shell, install)?);
        return Ok(());
    }

    let paths = Paths::new()?;
    init_tracing(&paths, matches!(command, Commands::Tui));

    let config = Config::load()?;
    config.general.color.apply();
    let format = cli.output.unwrap_or(config.general.default_output);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| QuotebookError::Config(format!("Failed to start async runtime: {e}")))?;

    let ctx = Context::open(config, paths)?;
    if let Some(warning) = ctx.book().load_warning() {
        if !matches!(command, Commands::Tui | Commands::Show) {
            eprintln!("{} {}", "warning:".yellow().bold(), warning);
        }
    }

    let output = match command {
        Commands::Show => commands::show(&ctx, format)?,
        Commands::Random => commands::random(&ctx, format)?,
        Commands::List(args) => commands::list(&ctx, &args, format)?,
        Commands::Add(args) => commands::add(&ctx, &args, format)?,
        Commands::Categories => commands::categories(&ctx, format)?,
        Commands::Filter { category } => commands::filter(&ctx, &category, format)?,
        Commands::Export { path } => commands::export(&ctx, &path, format)?,
        Commands::Import { file } => runtime.block_on(commands::import(&ctx, &file, format))?,
        Commands::Sync(args) => runtime.block_on(commands::sync(&ctx, &args, format))?,
        Commands::Watch(args) => runtime.block_on(commands::watch(&ctx, &args, format))?,
        Commands::Session { command } => commands::session(&ctx, &command, format)?,
        Commands::Completions { shell, install } => commands::completions(shell, install)?,
        Commands::Tui => {
            quotebook::tui::run(&ctx, &runtime)?;
            String::new()
        }
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
