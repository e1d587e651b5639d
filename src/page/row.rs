//! Row model: the content shapes a page can hold, and how each one
//! becomes exactly one fixed-width line.
//!
//! Pure functions. Widths are measured in terminal columns (display width),
//! so wide glyphs pad and truncate correctly. Nothing here rejects input:
//! an empty label is just an empty field.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::theme;

/// Width of the "  12) " gutter in front of a menu option.
pub const MENU_GUTTER: usize = 6;

/// Separator between label and value in a field/value line.
const FIELD_SEPARATOR: &str = " : ";

/// Character used for break and rule rows.
const RULE_CHAR: char = '-';

/// One line of page content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// "label : value", label padded to a fixed width.
    FieldValue {
        label: String,
        value: String,
        /// Render the value in bold.
        emphasis: bool,
    },
    /// Data cells aligned to the page's cell width.
    Columns(Vec<String>),
    /// Header cells; same widths as `Columns`, followed by a rule on screen.
    ColumnHeader(Vec<String>),
    /// Selectable line, addressed by its sequence number.
    MenuOption(MenuOption),
    Blank,
    /// Horizontal rule across the page width.
    Break,
    /// Pre-formatted line, only truncated.
    Raw(String),
}

/// A numbered, selectable row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    /// Positive, unique within the page.
    pub sequence: usize,
    pub description: String,
    /// Short trailing text, e.g. what picking the option does.
    pub hint: String,
}

impl Row {
    /// The menu option this row holds, if it is one.
    pub fn as_menu_option(&self) -> Option<&MenuOption> {
        match self {
            Row::MenuOption(option) => Some(option),
            _ => None,
        }
    }

    /// Render to a single line using the page layout.
    pub fn render(&self, layout: &Layout) -> String {
        match self {
            Row::FieldValue {
                label,
                value,
                emphasis,
            } => {
                let label = fit(label, layout.label_width);
                let room = layout
                    .width
                    .saturating_sub(layout.label_width + FIELD_SEPARATOR.len());
                let value = truncate(value, room);
                let value = if *emphasis {
                    theme::bold(&value, layout.decorate)
                } else {
                    value
                };
                format!("{label}{FIELD_SEPARATOR}{value}").trim_end().to_string()
            }
            Row::Columns(cells) => render_cells(cells, layout.cell_width),
            Row::ColumnHeader(cells) => {
                theme::bold(&render_cells(cells, layout.cell_width), layout.decorate)
            }
            Row::MenuOption(option) => render_option(option, layout),
            Row::Blank => String::new(),
            Row::Break => rule(layout.width),
            Row::Raw(line) => truncate(line, layout.width),
        }
    }
}

fn render_option(option: &MenuOption, layout: &Layout) -> String {
    let gutter = format!("{:>4}) ", option.sequence);
    let room = layout.width.saturating_sub(gutter.width());

    if option.hint.is_empty() {
        return format!("{gutter}{}", truncate(&option.description, room));
    }

    let hint_width = option.hint.width().min(room / 3);
    let description = fit(&option.description, room.saturating_sub(hint_width + 1));
    let hint = truncate(&option.hint, hint_width);
    format!("{gutter}{description} {hint}").trim_end().to_string()
}

fn render_cells(cells: &[String], cell_width: usize) -> String {
    let inner = cell_width.saturating_sub(1);
    cells
        .iter()
        .map(|cell| fit(cell, inner))
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end()
        .to_string()
}

/// The rule drawn under a column header: one dash run per cell.
pub fn header_rule(cells: usize, layout: &Layout) -> String {
    let dashes = RULE_CHAR
        .to_string()
        .repeat(layout.cell_width.saturating_sub(1));
    vec![dashes; cells].join(" ")
}

/// A full-width rule.
pub fn rule(width: usize) -> String {
    RULE_CHAR.to_string().repeat(width)
}

// ============================================================================
// LAYOUT
// ============================================================================

/// Widths shared by every row of one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Total line width.
    pub width: usize,
    /// Label column of field/value rows.
    pub label_width: usize,
    /// Width of one column cell, separator included.
    pub cell_width: usize,
    /// Whether bold escapes may be emitted.
    pub decorate: bool,
}

impl Layout {
    /// Derive the layout for a set of rows.
    ///
    /// Cell width is the page width split across the widest column row, so
    /// headers and data rows always share widths.
    pub fn for_rows(width: usize, label_width: usize, decorate: bool, rows: &[Row]) -> Self {
        let max_cells = rows
            .iter()
            .filter_map(|row| match row {
                Row::Columns(cells) | Row::ColumnHeader(cells) => Some(cells.len()),
                _ => None,
            })
            .max()
            .unwrap_or(1)
            .max(1);

        Self {
            width,
            label_width: label_width.min(width),
            cell_width: width / max_cells,
            decorate,
        }
    }
}

// ============================================================================
// WIDTH HELPERS
// ============================================================================

/// Pad or truncate to exactly `width` display columns.
pub fn fit(text: &str, width: usize) -> String {
    let truncated = truncate(text, width);
    let pad = width.saturating_sub(truncated.width());
    format!("{truncated}{}", " ".repeat(pad))
}

/// Truncate to at most `width` display columns, marking the cut with "…".
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

// ============================================================================
// TESTS
// ============================================================================
