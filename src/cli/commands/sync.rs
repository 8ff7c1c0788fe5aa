//! Sync command implementations.
//!
//! `sync` runs one sync and reports it. `watch` keeps syncing on the
//! configured interval until Ctrl+C, printing each outcome as it happens.

use std::time::Duration;

use colored::Colorize;

use crate::cli::args::{OutputFormat, SyncArgs, WatchArgs};
use crate::context::Context;
use crate::error::QuotebookError;
use crate::features::sync::{run_periodic, SyncOptions, SyncReport, SyncTrigger};
use crate::output::format_sync_report;

fn options(ctx: &Context, no_push: bool, dry_run: bool) -> SyncOptions {
    let mut options = SyncOptions::from(&ctx.config.sync);
    if no_push {
        options.push = false;
    }
    options.dry_run = dry_run;
    options
}

/// Execute the sync command.
///
/// # Errors
///
/// Returns the sync failure after printing the failure status; the local
/// list is unchanged in that case.
pub async fn sync(
    ctx: &Context,
    args: &SyncArgs,
    format: OutputFormat,
) -> Result<String, QuotebookError> {
    let agent = ctx.sync_agent(options(ctx, args.no_push, args.dry_run))?;
    let result = agent.sync_once(SyncTrigger::Manual).await;
    if result.is_err() {
        print_outcome(SyncTrigger::Manual, &result, format);
    }
    format_sync_report(&result?, format)
}

fn print_outcome(
    trigger: SyncTrigger,
    result: &Result<SyncReport, QuotebookError>,
    format: OutputFormat,
) {
    match (result, format) {
        (Ok(report), OutputFormat::Json) => match serde_json::to_string(report) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::warn!(error = %e, "Could not serialize sync report"),
        },
        (Ok(report), OutputFormat::Pretty) => {
            let stamp = chrono::Local::now().format("%H:%M:%S");
            println!(
                "{} {} {} ({} quotes)",
                stamp.to_string().dimmed(),
                "✓".green(),
                crate::features::sync::SYNCED_MESSAGE,
                report.kept
            );
        }
        (Err(e), OutputFormat::Json) => {
            let line = serde_json::json!({
                "trigger": trigger,
                "error": e.to_string(),
            });
            println!("{line}");
        }
        (Err(e), OutputFormat::Pretty) => {
            let stamp = chrono::Local::now().format("%H:%M:%S");
            eprintln!(
                "{} {} {}: {}",
                stamp.to_string().dimmed(),
                "✗".red(),
                crate::features::sync::SYNC_FAILED_MESSAGE,
                e
            );
        }
    }
}

/// Execute the watch command.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built. Individual sync
/// failures are printed and do not stop the loop.
pub async fn watch(
    ctx: &Context,
    args: &WatchArgs,
    format: OutputFormat,
) -> Result<String, QuotebookError> {
    let agent = ctx.sync_agent(options(ctx, args.no_push, false))?;
    let period = args
        .interval
        .map_or_else(|| ctx.config.sync.interval(), |secs| Duration::from_secs(secs.max(1)));

    if format == OutputFormat::Pretty {
        println!(
            "Syncing every {}s with {} (Ctrl+C to stop)",
            period.as_secs(),
            ctx.config.sync.endpoint.cyan()
        );
    }

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Could not listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    let attempts = run_periodic(
        &agent,
        period,
        ctx.config.sync.on_start,
        shutdown,
        |trigger, result| print_outcome(trigger, result, format),
    )
    .await;

    tracing::info!(attempts, "Stopped watching");
    Ok(match format {
        OutputFormat::Pretty => format!("Stopped after {attempts} syncs"),
        OutputFormat::Json => String::new(),
    })
}
