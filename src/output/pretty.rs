use std::path::Path;

use colored::Colorize;

use crate::features::categories::CategoryIndex;
use crate::features::display::{format_quote_line, DisplayRegion};
use crate::features::form::ADDED_MESSAGE;
use crate::features::sync::SyncReport;
use crate::features::transfer::IMPORTED_MESSAGE;
use crate::page::PageView;
use crate::quotes::Quote;

const RULE_WIDTH: usize = 60;

fn rule() -> String {
    "─".repeat(RULE_WIDTH).dimmed().to_string()
}

/// Format a single quote as a card
pub fn format_quote_card(quote: &Quote) -> String {
    format!(
        "{}\n  {}: {}\n",
        format!("\"{}\"", quote.text).bold(),
        "Category".dimmed(),
        quote.category.cyan()
    )
}

/// Format the display region as pretty output
pub fn format_region_pretty(region: &DisplayRegion) -> String {
    match region {
        DisplayRegion::Blank => String::new(),
        DisplayRegion::Single { quote } => format_quote_card(quote),
        DisplayRegion::List { quotes } => {
            let mut output = String::new();
            for quote in quotes {
                output.push_str(&format_quote_line(quote));
                output.push('\n');
            }
            output
        }
        DisplayRegion::Message { text } => format!("{text}\n"),
    }
}

/// Format a filtered list with a header
pub fn format_quotes_pretty(quotes: &[Quote], title: &str) -> String {
    if quotes.is_empty() {
        return format!("{} (0 quotes)\n  {}", title.bold(), "No quotes found.".dimmed());
    }

    let mut output = format!("{} ({} quotes)\n", title.bold(), quotes.len());
    output.push_str(&rule());
    output.push('\n');
    for quote in quotes {
        output.push_str(&format_quote_line(quote));
        output.push('\n');
    }
    output
}

/// Format the category selector, marking the selection
pub fn format_categories_pretty(index: &CategoryIndex) -> String {
    let selected = index.selected().as_str();
    let mut output = format!("{}\n", "Categories".bold());

    for option in index.options() {
        if option == selected {
            output.push_str(&format!("  {} {}\n", "*".green(), option.green().bold()));
        } else {
            output.push_str(&format!("    {option}\n"));
        }
    }

    output
}

/// Format the page-load view: featured quote, selector and filtered list
pub fn format_page_pretty(view: &PageView) -> String {
    let mut output = String::new();

    if let Some(warning) = &view.warning {
        output.push_str(&format!("{} {}\n\n", "warning:".yellow().bold(), warning));
    }

    let region = format_region_pretty(&view.display);
    if !region.is_empty() {
        output.push_str(&region);
        output.push('\n');
    }

    output.push_str(&format_categories_pretty(&view.categories));
    output.push('\n');

    let title = format!("Showing: {}", view.categories.selected());
    output.push_str(&format_quotes_pretty(&view.filtered, &title));
    output
}

/// Format an add confirmation
pub fn format_added_pretty(quote: &Quote, total: usize) -> String {
    format!(
        "{} {}\n  {}\n  {}: {}\n",
        "✓".green(),
        ADDED_MESSAGE,
        format_quote_line(quote),
        "Total".dimmed(),
        total
    )
}

/// Format an export confirmation
pub fn format_exported_pretty(path: &Path, count: usize) -> String {
    format!(
        "{} Exported {} quotes to {}\n",
        "✓".green(),
        count,
        path.display().to_string().cyan()
    )
}

/// Format an import confirmation
pub fn format_imported_pretty(added: usize, total: usize) -> String {
    format!(
        "{} {}\n  {}: {}\n  {}: {}\n",
        "✓".green(),
        IMPORTED_MESSAGE,
        "Added".dimmed(),
        added,
        "Total".dimmed(),
        total
    )
}

/// Format a sync report
pub fn format_sync_report_pretty(report: &SyncReport) -> String {
    let mut output = if report.dry_run {
        format!("{} {}\n", "Dry run:".yellow().bold(), "no changes were made")
    } else {
        format!("{} {}\n", "✓".green(), crate::features::sync::SYNCED_MESSAGE)
    };

    output.push_str(&format!("  {}: {}\n", "Trigger".dimmed(), report.trigger));
    output.push_str(&format!("  {}: {}\n", "Fetched".dimmed(), report.fetched));
    output.push_str(&format!("  {}: {}\n", "Kept".dimmed(), report.kept));
    output.push_str(&format!("  {}: {}\n", "Replaced".dimmed(), report.replaced));
    output.push_str(&format!(
        "  {}: {}\n",
        "Pushed".dimmed(),
        if report.pushed { "yes" } else { "no" }
    ));

    if !report.quotes.is_empty() {
        output.push_str(&rule());
        output.push('\n');
        for quote in &report.quotes {
            output.push_str(&format_quote_line(quote));
            output.push('\n');
        }
    }

    output
}
