//! Text decoration.
//!
//! Only two kinds exist: bold emphasis (an ANSI escape, dropped when
//! decoration is off) and quoting (plain characters, always safe).
//! Quotes: 'single' around feedback context, (parens) around status detail.
//!
//! Where bold is used:
//! - Page title
//! - Column headers
//! - Emphasized field values (dashboard status)
//! - Severity label of feedback lines

use crossterm::style::Stylize;

/// Bold when decoration is on, unchanged otherwise.
pub fn bold(text: &str, decorate: bool) -> String {
    if decorate {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

/// 'text'
pub fn single_quote(text: &str) -> String {
    format!("'{text}'")
}

/// (text)
pub fn paren_quote(text: &str) -> String {
    format!("({text})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_degrades_to_plain_text() {
        assert_eq!(bold("title", false), "title");
    }

    #[test]
    fn bold_wraps_in_escape_sequences() {
        let out = bold("title", true);
        assert!(out.contains("title"));
        assert!(out.starts_with('\u{1b}'));
        assert_ne!(out, "title");
    }

    #[test]
    fn quoting() {
        assert_eq!(single_quote("x"), "'x'");
        assert_eq!(paren_quote("x"), "(x)");
    }
}
