//! Terminal User Interface (TUI) for quotebook.
//!
//! The page, the add form, and the import prompt run on the main thread.
//! Syncs and file reads run as tokio tasks and report back over a channel
//! drained once per frame. Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::{Action, App, BackgroundEvent, Mode};

use std::io;
use std::path::PathBuf;
use std::time::Instant;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tokio::runtime::Runtime;

use crate::context::Context;
use crate::error::QuotebookError;
use crate::features::sync::{QuoteRemote, SyncOptions};
use crate::features::transfer::EXPORT_FILE_NAME;

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(ctx: &Context, runtime: &Runtime) -> Result<(), QuotebookError> {
    // Tasks spawned by the app land on this runtime.
    let _guard = runtime.enter();

    let mut page = ctx.page();
    page.load(&mut rand::thread_rng())?;
    let agent = ctx.sync_agent(SyncOptions::from(&ctx.config.sync))?;
    let mut app = App::new(page, agent, PathBuf::from(EXPORT_FILE_NAME));
    app.start(ctx.config.sync.interval(), ctx.config.sync.on_start);

    // Setup terminal
    enable_raw_mode()
        .map_err(|e| QuotebookError::Config(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| QuotebookError::Config(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| QuotebookError::Config(format!("Failed to create terminal: {e}")))?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Run the main application loop.
fn run_app<B: Backend, R: QuoteRemote + 'static>(
    terminal: &mut Terminal<B>,
    app: &mut App<R>,
) -> Result<(), QuotebookError> {
    while !app.should_quit {
        app.drain_background()?;
        app.tick(Instant::now());

        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| QuotebookError::Config(format!("Failed to draw: {e}")))?;

        if let Some(action) = event::handle_events(app)? {
            app.perform(action)?;
        }
    }

    Ok(())
}
