//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::QuotebookError;
use crate::tui::app::{Action, App, Mode};

/// Poll for one terminal event and translate it.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events<R>(app: &mut App<R>) -> Result<Option<Action>, QuotebookError> {
    if event::poll(Duration::from_millis(100))
        .map_err(|e| QuotebookError::Config(format!("Event poll failed: {e}")))?
    {
        if let Event::Key(key) = event::read()
            .map_err(|e| QuotebookError::Config(format!("Event read failed: {e}")))?
        {
            if key.kind == KeyEventKind::Press {
                return Ok(handle_key(app, key));
            }
        }
    }

    Ok(None)
}

/// Translate one key press for the current mode.
///
/// Text input is applied to the app directly; everything else becomes an
/// [`Action`].
pub fn handle_key<R>(app: &mut App<R>, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match &mut app.mode {
        Mode::Browse => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('n') => Some(Action::NewQuote),
            KeyCode::Char('l') => Some(Action::ShowList),
            KeyCode::Char('a') => Some(Action::StartAdd),
            KeyCode::Char('e') => Some(Action::Export),
            KeyCode::Char('i') => Some(Action::StartImport),
            KeyCode::Char('s') => Some(Action::Sync),
            KeyCode::Left | KeyCode::Char('[') => Some(Action::PreviousCategory),
            KeyCode::Right | KeyCode::Char(']') => Some(Action::NextCategory),
            KeyCode::Char('?') => Some(Action::Help),
            _ => None,
        },

        Mode::Adding => match key.code {
            KeyCode::Esc => Some(Action::Dismiss),
            KeyCode::Enter => Some(Action::SubmitAdd),
            KeyCode::Tab | KeyCode::BackTab => {
                app.form.toggle_focus();
                None
            }
            KeyCode::Backspace => {
                app.form.focused_mut().pop();
                None
            }
            KeyCode::Char(c) => {
                app.form.focused_mut().push(c);
                None
            }
            _ => None,
        },

        Mode::Importing { path } => match key.code {
            KeyCode::Esc => Some(Action::Dismiss),
            KeyCode::Enter => Some(Action::SubmitImport),
            KeyCode::Backspace => {
                path.pop();
                None
            }
            KeyCode::Char(c) => {
                path.push(c);
                None
            }
            _ => None,
        },

        Mode::Help => Some(Action::Dismiss),

        Mode::Alert { .. } => match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(Action::Dismiss),
            _ => None,
        },
    }
}
