//! Application state for the TUI.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::QuotebookError;
use crate::features::form::QuoteForm;
use crate::features::status::StatusKind;
use crate::features::sync::{spawn_timer, QuoteRemote, SyncAgent, SyncReport, SyncTrigger};
use crate::features::transfer::read_import;
use crate::page::QuotePage;
use crate::quotes::Quote;

/// Help text shown by `?`.
pub const HELP_TEXT: &str =
    "n:new quote | a:add | e:export | i:import | s:sync | ←/→ [/]:category | l:list | q:quit";

/// What the UI is currently doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Browsing quotes.
    Browse,
    /// Editing the add-quote form.
    Adding,
    /// Typing the path of a file to import.
    Importing { path: String },
    /// Help overlay.
    Help,
    /// A blocking alert. Dismissing it returns to `previous`.
    Alert {
        message: String,
        previous: Box<Mode>,
    },
}

/// Work finished off the UI thread.
#[derive(Debug)]
pub enum BackgroundEvent {
    Synced(Result<SyncReport, QuotebookError>),
    ImportRead {
        path: PathBuf,
        result: Result<Vec<Quote>, QuotebookError>,
    },
}

/// User intents produced by the key handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NewQuote,
    ShowList,
    StartAdd,
    SubmitAdd,
    Export,
    StartImport,
    SubmitImport,
    Sync,
    PreviousCategory,
    NextCategory,
    Help,
    /// Close the current overlay without acting.
    Dismiss,
}

/// Application state.
pub struct App<R> {
    page: QuotePage,
    agent: SyncAgent<R>,
    /// The add-quote form, built once and reused.
    pub form: QuoteForm,
    pub mode: Mode,
    pub should_quit: bool,
    export_path: PathBuf,
    in_flight: usize,
    events_tx: mpsc::UnboundedSender<BackgroundEvent>,
    events_rx: mpsc::UnboundedReceiver<BackgroundEvent>,
    triggers_rx: Option<mpsc::Receiver<SyncTrigger>>,
    timer: Option<JoinHandle<()>>,
}

impl<R: QuoteRemote + 'static> App<R> {
    /// Create the app over a loaded page.
    #[must_use]
    pub fn new(page: QuotePage, agent: SyncAgent<R>, export_path: PathBuf) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            page,
            agent,
            form: QuoteForm::new(),
            mode: Mode::Browse,
            should_quit: false,
            export_path,
            in_flight: 0,
            events_tx,
            events_rx,
            triggers_rx: None,
            timer: None,
        }
    }

    /// Start the recurring sync timer and, optionally, an initial sync.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self, interval: Duration, sync_on_start: bool) {
        let (tx, rx) = mpsc::channel(4);
        self.timer = Some(spawn_timer(interval, tx));
        self.triggers_rx = Some(rx);
        if sync_on_start {
            self.start_sync(SyncTrigger::Startup);
        }
    }

    /// Spawn a sync. Its result arrives as a [`BackgroundEvent::Synced`].
    pub fn start_sync(&mut self, trigger: SyncTrigger) {
        self.in_flight += 1;
        let agent = self.agent.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = agent.sync_once(trigger).await;
            // The receiver is gone only when the app is shutting down.
            let _ = tx.send(BackgroundEvent::Synced(result));
        });
    }

    fn start_import(&mut self, path: PathBuf) {
        let tx = self.events_tx.clone();
        self.page
            .notify(format!("Importing {}...", path.display()), StatusKind::Info);
        tokio::spawn(async move {
            let result = read_import(&path).await;
            let _ = tx.send(BackgroundEvent::ImportRead { path, result });
        });
    }

    fn alert(&mut self, message: String) {
        let previous = std::mem::replace(&mut self.mode, Mode::Browse);
        self.mode = Mode::Alert {
            message,
            previous: Box::new(previous),
        };
    }

    /// Route an error: user-facing ones become an alert, others propagate.
    fn absorb(&mut self, result: Result<(), QuotebookError>) -> Result<(), QuotebookError> {
        match result {
            Err(e) if e.is_blocking() || matches!(e, QuotebookError::Io(_)) => {
                self.alert(e.to_string());
                Ok(())
            }
            other => other,
        }
    }

    /// Apply a finished background task.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails while repainting.
    pub fn apply_background(&mut self, event: BackgroundEvent) -> Result<(), QuotebookError> {
        match event {
            BackgroundEvent::Synced(result) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                self.page.apply_sync(&result)
            }
            BackgroundEvent::ImportRead { path, result } => {
                tracing::debug!(path = %path.display(), ok = result.is_ok(), "Import read finished");
                let outcome = result.and_then(|quotes| self.page.import_quotes(quotes).map(|_| ()));
                self.absorb(outcome)
            }
        }
    }

    /// Start syncs for pending timer ticks and apply finished background work.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails while repainting.
    pub fn drain_background(&mut self) -> Result<(), QuotebookError> {
        let mut ticks = 0;
        if let Some(rx) = self.triggers_rx.as_mut() {
            while rx.try_recv().is_ok() {
                ticks += 1;
            }
        }
        for _ in 0..ticks {
            self.start_sync(SyncTrigger::Timer);
        }

        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_background(event)?;
        }
        Ok(())
    }

    /// Clear an expired status message.
    pub fn tick(&mut self, now: Instant) {
        self.page.tick(now);
    }

    /// Carry out an action.
    ///
    /// # Errors
    ///
    /// Returns storage errors. Validation, import, and file errors are
    /// shown as an alert instead.
    pub fn perform(&mut self, action: Action) -> Result<(), QuotebookError> {
        match action {
            Action::Quit => self.should_quit = true,
            Action::NewQuote => {
                self.page.show_random(&mut rand::thread_rng())?;
            }
            Action::ShowList => self.page.refresh()?,
            Action::StartAdd => self.mode = Mode::Adding,
            Action::SubmitAdd => {
                let outcome = self
                    .page
                    .add_quote(&self.form.text, &self.form.category)
                    .map(|_| ());
                if outcome.is_ok() {
                    self.form.clear();
                    self.mode = Mode::Browse;
                }
                self.absorb(outcome)?;
            }
            Action::Export => {
                let outcome = self.page.export(&self.export_path).map(|_| ());
                self.absorb(outcome)?;
            }
            Action::StartImport => {
                self.mode = Mode::Importing {
                    path: String::new(),
                };
            }
            Action::SubmitImport => {
                if let Mode::Importing { path } = &self.mode {
                    let path = path.trim().to_string();
                    self.mode = Mode::Browse;
                    if path.is_empty() {
                        self.alert(QuotebookError::Import("no file given".to_string()).to_string());
                    } else {
                        self.start_import(PathBuf::from(path));
                    }
                }
            }
            Action::Sync => {
                self.page.notify("Syncing...", StatusKind::Info);
                self.start_sync(SyncTrigger::Manual);
            }
            Action::PreviousCategory => self.page.cycle_category(-1)?,
            Action::NextCategory => self.page.cycle_category(1)?,
            Action::Help => self.mode = Mode::Help,
            Action::Dismiss => {
                self.mode = match std::mem::replace(&mut self.mode, Mode::Browse) {
                    Mode::Alert { previous, .. } => *previous,
                    _ => Mode::Browse,
                };
            }
        }
        Ok(())
    }
}

impl<R> App<R> {
    #[must_use]
    pub const fn page(&self) -> &QuotePage {
        &self.page
    }

    /// Syncs started but not yet finished.
    #[must_use]
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }
}

impl<R> Drop for App<R> {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}
