//! UI rendering for the TUI.

use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::features::display::{format_quote_line, DisplayRegion};
use crate::features::form::FormField;
use crate::features::status::StatusKind;
use crate::tui::app::{App, Mode, HELP_TEXT};

/// Render the application UI.
pub fn render<R>(frame: &mut Frame<'_>, app: &App<R>) {
    // Create layout: category tabs, display region, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Categories
            Constraint::Min(0),    // Display
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_categories(frame, app, chunks[0]);
    render_display(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    match &app.mode {
        Mode::Browse => {}
        Mode::Adding => render_form(frame, app),
        Mode::Importing { path } => render_import_prompt(frame, path),
        Mode::Help => render_popup(frame, " Help ", HELP_TEXT, Color::Cyan),
        Mode::Alert { message, .. } => render_popup(frame, " Alert ", message, Color::Red),
    }
}

/// Render the category selector.
fn render_categories<R>(frame: &mut Frame<'_>, app: &App<R>, area: Rect) {
    let index = app.page().categories();
    let options = index.options();
    let selected = options
        .iter()
        .position(|option| option == index.selected().as_str())
        .unwrap_or(0);

    let tabs = Tabs::new(options)
        .select(selected)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .title(" quotebook ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(tabs, area);
}

/// Render the display region.
fn render_display<R>(frame: &mut Frame<'_>, app: &App<R>, area: Rect) {
    let lines: Vec<Line<'_>> = match app.page().region() {
        DisplayRegion::Blank => Vec::new(),
        DisplayRegion::Single { quote } => vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("\"{}\"", quote.text),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Category: ", Style::default().fg(Color::DarkGray)),
                Span::styled(quote.category.clone(), Style::default().fg(Color::Cyan)),
            ]),
        ],
        DisplayRegion::List { quotes } => quotes
            .iter()
            .map(|quote| Line::from(format_quote_line(quote)))
            .collect(),
        DisplayRegion::Message { text } => vec![Line::from(Span::styled(
            text.clone(),
            Style::default().fg(Color::Yellow),
        ))],
    };

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White)),
        );

    frame.render_widget(paragraph, area);
}

/// Render the status bar.
fn render_status_bar<R>(frame: &mut Frame<'_>, app: &App<R>, area: Rect) {
    let (text, color) = match app.page().status(Instant::now()) {
        Some(message) => (
            message.text.clone(),
            match message.kind {
                StatusKind::Info => Color::White,
                StatusKind::Success => Color::Green,
                StatusKind::Failure => Color::Red,
            },
        ),
        None => ("?:help | q:quit".to_string(), Color::DarkGray),
    };

    let mut spans = vec![Span::styled(text, Style::default().fg(color))];
    if app.in_flight() > 0 {
        spans.push(Span::styled("  [syncing]", Style::default().fg(Color::Yellow)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the add-quote form.
fn render_form<R>(frame: &mut Frame<'_>, app: &App<R>) {
    let area = centered(frame.area(), 60, 8);
    let field = |label: &str, value: &str, focused: bool| {
        let style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let cursor = if focused { "_" } else { "" };
        Line::from(vec![
            Span::styled(format!("{label:>9}: "), style),
            Span::raw(format!("{value}{cursor}")),
        ])
    };

    let lines = vec![
        field("Quote", &app.form.text, app.form.focus == FormField::Text),
        field(
            "Category",
            &app.form.category,
            app.form.focus == FormField::Category,
        ),
        Line::from(""),
        Line::from(Span::styled(
            "Tab: switch field | Enter: add | Esc: cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(" Add quote ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        ),
        area,
    );
}

/// Render the import path prompt.
fn render_import_prompt(frame: &mut Frame<'_>, path: &str) {
    let area = centered(frame.area(), 60, 5);
    let lines = vec![
        Line::from(format!("File: {path}_")),
        Line::from(Span::styled(
            "Enter: import | Esc: cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(" Import JSON ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        ),
        area,
    );
}

/// Render a modal message box.
fn render_popup(frame: &mut Frame<'_>, title: &str, message: &str, color: Color) {
    let area = centered(frame.area(), 60, 7);
    let lines = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to continue",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(title.to_string())
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            ),
        area,
    );
}

/// A `width` x `height` rectangle centered in `area`, clamped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
