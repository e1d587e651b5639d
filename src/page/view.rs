//! Pure rendering: map a page to the lines of one screen.
//!
//! Layout, top to bottom:
//! - title bar (title left, application name right) and a rule
//! - the visible rows; a column header is repeated when a screen opens
//!   in the middle of its table, and every header gets a rule under it
//! - a closing rule, then "Page n of m" when there is more than one screen
//! - queued feedback lines
//! - the prompt, listing every action valid on this screen
//!
//! The prompt is always the last line and carries no newline.

use unicode_width::UnicodeWidthStr;

use super::Page;
use super::action::Action;
use super::row::{self, Layout, Row};
use super::theme;
use crate::strings::{self, Text};

/// Render the current screen.
pub fn render(page: &Page) -> Vec<String> {
    let layout = page.layout();
    let mut lines = Vec::new();

    lines.push(title_bar(page, &layout));
    lines.push(row::rule(layout.width));
    lines.extend(content(page, &layout));
    lines.push(row::rule(layout.width));

    if page.pager().total_pages() > 1 {
        lines.push(strings::paging(
            page.pager().current() + 1,
            page.pager().total_pages(),
        ));
    }

    lines.extend(page.feedback().iter().map(|f| f.render(layout.decorate)));
    lines.push(prompt(page));
    lines
}

// ============================================================================
// SECTIONS
// ============================================================================

fn title_bar(page: &Page, layout: &Layout) -> String {
    let app = Text::ApplicationName.as_str();
    let room = layout.width.saturating_sub(app.width() + 1);
    let title = row::fit(page.title(), room);
    format!("{} {app}", theme::bold(&title, layout.decorate))
}

fn content(page: &Page, layout: &Layout) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(header) = carried_header(page) {
        push_row(header, layout, &mut lines);
    }
    for row in page.visible_rows() {
        push_row(row, layout, &mut lines);
    }
    lines
}

fn push_row(row: &Row, layout: &Layout, lines: &mut Vec<String>) {
    lines.push(row.render(layout));
    if let Row::ColumnHeader(cells) = row {
        lines.push(row::header_rule(cells.len(), layout));
    }
}

/// The header of a column table that started on an earlier screen.
fn carried_header(page: &Page) -> Option<&Row> {
    let start = page.pager().visible_range().start;
    if !matches!(page.rows().get(start), Some(Row::Columns(_))) {
        return None;
    }
    page.rows()[..start]
        .iter()
        .rev()
        .find(|row| !matches!(row, Row::Columns(_)))
        .filter(|row| matches!(row, Row::ColumnHeader(_)))
}

/// "Choose a file valid actions [Q, F, B, G<n>, 1-5] > "
pub fn prompt(page: &Page) -> String {
    let symbols = action_symbols(page).join(", ");
    let lead = page.prompt().unwrap_or(Text::Choose.as_str());
    format!("{lead} {} > ", strings::valid_actions(&symbols))
}

/// Labels of the actions that do something on this screen.
fn action_symbols(page: &Page) -> Vec<String> {
    let multi_page = page.pager().total_pages() > 1;
    let selectable = page.selectable();

    let mut symbols: Vec<String> = page
        .registry()
        .actions()
        .iter()
        .filter(|action| match action {
            Action::Forward | Action::Back => multi_page,
            Action::Dynamic { numeric: true, .. } => !selectable.is_empty(),
            _ => true,
        })
        .map(Action::label)
        .collect();

    if let Some(range) = numeric_range(&selectable) {
        symbols.push(range);
    }
    symbols
}

/// "3", "1-5", or "2, 4, 9" for gapped sequences.
fn numeric_range(selectable: &[usize]) -> Option<String> {
    let (first, last) = (*selectable.first()?, *selectable.last()?);
    if selectable.len() == 1 {
        return Some(first.to_string());
    }
    let contiguous = selectable.windows(2).all(|w| w[1] == w[0] + 1);
    if contiguous {
        Some(format!("{first}-{last}"))
    } else {
        Some(
            selectable
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DisplayConfig;

    fn page(capacity: usize) -> Page {
        Page::new("Title", capacity, &DisplayConfig::plain(40)).unwrap()
    }

    #[test]
    fn empty_page_still_has_header_and_prompt() {
        let lines = render(&page(5));
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Title"));
        assert!(lines[0].ends_with("StarTerm"));
        assert_eq!(lines[3], "Choose valid actions [Q] > ");
    }

    #[test]
    fn title_bar_fills_the_width() {
        let lines = render(&page(5));
        assert_eq!(lines[0].width(), 40);
    }

    #[test]
    fn multi_page_shows_paging_and_navigation() {
        let mut page = page(2);
        for seq in 1..=5 {
            page.add_menu_option(seq, "x", "").unwrap();
        }
        let lines = render(&page);
        assert!(lines.contains(&"Page 1 of 3".to_string()));
        assert_eq!(
            lines.last().unwrap(),
            "Choose valid actions [Q, F, B, 1-2] > "
        );
    }

    #[test]
    fn numbered_prefix_listed_only_with_options_on_screen() {
        let mut page = page(5);
        page.register_action(Action::numbered("G")).unwrap();
        assert!(!prompt(&page).contains("G<n>"));

        page.add_menu_option(1, "one", "").unwrap();
        assert!(prompt(&page).contains("G<n>"));
    }

    #[test]
    fn caller_prompt_leads_the_prompt_line() {
        let mut page = page(5);
        page.set_prompt("Choose a file to use");
        assert!(prompt(&page).starts_with("Choose a file to use valid actions"));
    }

    #[test]
    fn gapped_sequences_are_listed() {
        assert_eq!(numeric_range(&[2, 4, 9]).unwrap(), "2, 4, 9");
        assert_eq!(numeric_range(&[6, 7, 8]).unwrap(), "6-8");
        assert_eq!(numeric_range(&[3]).unwrap(), "3");
        assert_eq!(numeric_range(&[]), None);
    }

    #[test]
    fn feedback_lines_precede_prompt() {
        let mut page = page(5);
        page.report_error("not a directory", "x.txt");
        let lines = render(&page);
        let n = lines.len();
        assert_eq!(lines[n - 2], "ERROR not a directory 'x.txt'");
    }

    #[test]
    fn header_gets_a_rule() {
        let mut page = page(10);
        page.add_column_header(["Name", "Size"]);
        page.add_columns(["a", "1"]);
        let lines = render(&page);
        assert_eq!(lines[2], "Name                Size");
        assert_eq!(lines[3], "------------------- -------------------");
        assert_eq!(lines[4], "a                   1");
    }

    #[test]
    fn header_is_carried_onto_later_screens() {
        let mut page = page(3);
        page.add_column_header(["Name", "Size"]);
        for i in 0..5 {
            page.add_columns([format!("file{i}"), format!("{i}")]);
        }
        page.forward();
        let lines = render(&page);
        assert!(lines[2].starts_with("Name"));
        assert!(lines[3].starts_with("---"));
        assert!(lines[4].starts_with("file2"));
    }

    #[test]
    fn header_not_carried_past_other_rows() {
        let mut page = page(3);
        page.add_column_header(["Name"]);
        page.add_columns(["a"]);
        page.add_blank();
        page.add_columns(["b"]);
        page.forward();
        let lines = render(&page);
        assert_eq!(lines[2], "b");
    }
}
