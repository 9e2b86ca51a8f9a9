//! Terminal display utilities for CLI output.
//!
//! Column widths follow the terminal width so long titles and distributor
//! lists are truncated instead of wrapping the table.

use comfy_table::{presets, Attribute, Cell, CellAlignment, Table};
use std::io::{self, IsTerminal};
use std::sync::OnceLock;
use terminal_size::terminal_size;
use unicode_width::UnicodeWidthChar;

use crate::models::SearchResponse;
use crate::config::ProvidersConfig;

/// Terminal information with cached size and capabilities.
#[derive(Debug, Clone)]
pub struct Terminal {
    width: usize,
    is_tty: bool,
}

static TERMINAL_INFO: OnceLock<Terminal> = OnceLock::new();

/// Default width when terminal size cannot be determined.
pub const DEFAULT_WIDTH: usize = 100;

/// Get the global terminal information, initialized on first call.
pub fn terminal_info() -> &'static Terminal {
    TERMINAL_INFO.get_or_init(|| {
        let width = terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(DEFAULT_WIDTH);

        Terminal {
            width,
            is_tty: io::stdout().is_terminal(),
        }
    })
}

/// Get the current terminal width in characters.
#[inline]
pub fn terminal_width() -> usize {
    terminal_info().width
}

/// Check if stdout is a terminal.
#[inline]
pub fn is_terminal() -> bool {
    terminal_info().is_tty
}

/// Truncate text to fit within the specified display width.
///
/// Wide characters count for their rendered width. An ellipsis is appended
/// when anything was cut.
///
/// ```
/// use lantern_search::utils::truncate_with_ellipsis;
///
/// assert_eq!(truncate_with_ellipsis("Hello World", 8), "Hello...");
/// assert_eq!(truncate_with_ellipsis("Hi", 8), "Hi");
/// ```
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    let char_widths: Vec<(char, usize)> = text
        .chars()
        .map(|c| (c, UnicodeWidthChar::width(c).unwrap_or(1)))
        .collect();

    let total_width: usize = char_widths.iter().map(|(_, w)| *w).sum();
    if total_width <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut current_width = 0;
    let mut truncated = String::new();
    for (c, w) in char_widths {
        if current_width + w > budget {
            break;
        }
        current_width += w;
        truncated.push(c);
    }

    format!("{}...", truncated)
}

/// Split the available width between the title and distributor columns.
///
/// Returns (title_width, distributors_width). Year, copies and director take
/// roughly fixed space.
pub fn result_table_columns(terminal_width: usize) -> (usize, usize) {
    // year + copies + director + borders
    let fixed = 6 + 8 + 22 + 16;
    let flexible = terminal_width.saturating_sub(fixed).max(30);
    let title = (flexible * 3 / 5).clamp(20, 70);
    let distributors = flexible.saturating_sub(title).clamp(10, 50);
    (title, distributors)
}

/// Render a page of consolidated results as a table.
pub fn render_results_table(response: &SearchResponse, terminal_width: usize) -> String {
    let (title_width, distributors_width) = result_table_columns(terminal_width);

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.set_header(vec!["Title", "Year", "Copies", "Director", "Distributors"]);

    for item in &response.results {
        table.add_row(vec![
            Cell::new(truncate_with_ellipsis(&item.title, title_width))
                .add_attribute(Attribute::Bold),
            Cell::new(item.release_year),
            Cell::new(item.total_copies_available).set_alignment(CellAlignment::Right),
            Cell::new(truncate_with_ellipsis(&item.director, 20)),
            Cell::new(truncate_with_ellipsis(
                &item.distributor_list(),
                distributors_width,
            )),
        ]);
    }

    table.to_string()
}

/// One-line summary of the page shown under the results table.
pub fn format_page_summary(response: &SearchResponse) -> String {
    let shown = response.results.len();
    if shown == 0 {
        return format!(
            "No results on page {} ({} total)",
            response.current_page, response.total_results
        );
    }

    let first = response
        .current_page
        .saturating_sub(1)
        .saturating_mul(response.page_size)
        .saturating_add(1);
    let last = first.saturating_add(shown - 1);
    let summary = format!(
        "Showing {}-{} of {} (page {}, {} per page)",
        first, last, response.total_results, response.current_page, response.page_size
    );

    if response.has_more() {
        format!("{}, next page {}", summary, response.current_page.saturating_add(1))
    } else {
        summary
    }
}

/// Render the configured providers as a table, disabled ones included.
pub fn render_providers_table(providers: &ProvidersConfig) -> String {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.set_header(vec!["Id", "Label", "Endpoint", "Enabled"]);

    for (id, provider) in providers.iter() {
        table.add_row(vec![
            Cell::new(id).add_attribute(Attribute::Bold),
            Cell::new(&provider.label),
            Cell::new(&provider.endpoint),
            Cell::new(if provider.enabled { "yes" } else { "no" }),
        ]);
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConsolidatedItem;

    fn response(results: Vec<ConsolidatedItem>, page: usize, size: usize, total: usize) -> SearchResponse {
        SearchResponse::new(page, size, total, results)
    }

    fn film(title: &str) -> ConsolidatedItem {
        ConsolidatedItem {
            title: title.to_string(),
            release_year: 1999,
            total_copies_available: 5,
            director: "Wachowskis".to_string(),
            distributors: vec!["WarnerBros".to_string(), "Sony".to_string()],
        }
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("Hello World", 8), "Hello...");
        assert_eq!(truncate_with_ellipsis("Hello", 5), "Hello");
        assert_eq!(truncate_with_ellipsis("Hello", 0), "");
        assert_eq!(truncate_with_ellipsis("Hello", 2), "...");
    }

    #[test]
    fn test_truncate_wide_characters() {
        // each CJK character is two columns wide
        assert_eq!(truncate_with_ellipsis("七人の侍", 8), "七人の侍");
        assert_eq!(truncate_with_ellipsis("七人の侍です", 8), "七人...");
    }

    #[test]
    fn test_column_widths_respect_bounds() {
        let (title, distributors) = result_table_columns(40);
        assert!(title >= 20);
        assert!(distributors >= 10);

        let (title, distributors) = result_table_columns(400);
        assert!(title <= 70);
        assert!(distributors <= 50);
    }

    #[test]
    fn test_render_results_table() {
        let table = render_results_table(&response(vec![film("Matrix")], 1, 10, 1), 120);
        assert!(table.contains("Matrix"));
        assert!(table.contains("WarnerBros, Sony"));
        assert!(table.contains("1999"));
    }

    #[test]
    fn test_page_summary() {
        let summary = format_page_summary(&response(vec![film("C")], 2, 2, 3));
        assert_eq!(summary, "Showing 3-3 of 3 (page 2, 2 per page)");

        let summary = format_page_summary(&response(Vec::new(), 5, 2, 3));
        assert_eq!(summary, "No results on page 5 (3 total)");
    }

    #[test]
    fn test_page_summary_points_to_next_page() {
        let summary = format_page_summary(&response(vec![film("A"), film("B")], 1, 2, 3));
        assert_eq!(summary, "Showing 1-2 of 3 (page 1, 2 per page), next page 2");
    }

    #[test]
    fn test_page_summary_with_page_zero() {
        let summary = format_page_summary(&response(vec![film("A")], 0, 2, 1));
        assert!(summary.starts_with("Showing 1-1 of 1 (page 0, 2 per page)"));
    }

    #[test]
    fn test_providers_table_lists_disabled() {
        let mut providers = ProvidersConfig::default();
        providers.projector.enabled = false;

        let table = render_providers_table(&providers);
        assert!(table.contains("localhost:3002"));
        assert!(table.contains("Projector"));
        assert!(table.contains("no"));
    }
}
