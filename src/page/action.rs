//! Action registry: the symbols a page accepts and how raw input maps to them.
//!
//! Resolution order is fixed, whatever order actions were registered in:
//! 1. static symbol, exact match
//! 2. dynamic prefix (longest matching prefix whose remainder validates)
//! 3. bare number naming a menu option on the current screen
//!
//! Anything else is an `InvalidAction`, which callers re-prompt on.

use crate::error::{InvalidAction, PageError};
use crate::strings::symbols;

use super::pager::Direction;

// ============================================================================
// ACTIONS
// ============================================================================

/// Something a page accepts as input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Ends the loop.
    Quit,
    /// Next screen.
    Forward,
    /// Previous screen.
    Back,
    /// Caller-defined exact symbol, stored normalized.
    Symbol(String),
    /// Prefix followed by a suffix, e.g. "G12".
    Dynamic {
        prefix: String,
        /// Suffix must be the sequence of a visible menu option.
        numeric: bool,
    },
}

impl Action {
    /// Exact-match symbol. Case and surrounding whitespace are ignored.
    pub fn symbol(symbol: &str) -> Self {
        Action::Symbol(normalize(symbol))
    }

    /// Prefix followed by a visible menu option's sequence number.
    pub fn numbered(prefix: &str) -> Self {
        Action::Dynamic {
            prefix: normalize(prefix),
            numeric: true,
        }
    }

    /// Prefix followed by any non-empty text.
    pub fn prefixed(prefix: &str) -> Self {
        Action::Dynamic {
            prefix: normalize(prefix),
            numeric: false,
        }
    }

    /// Uniqueness key: statics and prefixes live in separate namespaces.
    fn key(&self) -> Key<'_> {
        match self {
            Action::Quit => Key::Static(symbols::QUIT),
            Action::Forward => Key::Static(symbols::FORWARD),
            Action::Back => Key::Static(symbols::BACK),
            Action::Symbol(symbol) => Key::Static(symbol),
            Action::Dynamic { prefix, .. } => Key::Prefix(prefix),
        }
    }

    /// How the action appears in the prompt: "Q", "G<n>", "X…".
    pub fn label(&self) -> String {
        match self {
            Action::Dynamic {
                prefix,
                numeric: true,
            } => format!("{prefix}<n>"),
            Action::Dynamic {
                prefix,
                numeric: false,
            } => format!("{prefix}…"),
            other => match other.key() {
                Key::Static(symbol) | Key::Prefix(symbol) => symbol.to_string(),
            },
        }
    }

    fn is_static(&self) -> bool {
        matches!(self.key(), Key::Static(_))
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Key<'a> {
    Static(&'a str),
    Prefix(&'a str),
}

/// Trim and uppercase, the form every comparison happens in.
pub fn normalize(input: &str) -> String {
    input.trim().to_uppercase()
}

// ============================================================================
// RESOLUTION RESULTS
// ============================================================================

/// What a dynamic action captured after its prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suffix {
    /// Sequence number of a visible menu option.
    Number(usize),
    /// Free text, original casing kept.
    Text(String),
}

/// Input successfully matched against the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// Forward/back: handled inside the loop.
    Navigate(Direction),
    Quit,
    /// A caller-defined static symbol.
    Symbol(String),
    Dynamic { prefix: String, suffix: Suffix },
    /// Bare number: the chosen menu option's sequence.
    Choice(usize),
}

// ============================================================================
// REGISTRY
// ============================================================================

/// The set of actions one page accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionRegistry {
    /// Registration order, kept for the prompt.
    actions: Vec<Action>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quit, forward and back: what every page accepts.
    pub fn with_paging() -> Self {
        Self {
            actions: vec![Action::Quit, Action::Forward, Action::Back],
        }
    }

    /// Add an action.
    ///
    /// # Errors
    /// `DuplicateAction` when a static symbol (or a dynamic prefix) is
    /// already registered under the same normalized text.
    pub fn register(&mut self, action: Action) -> Result<(), PageError> {
        if self.actions.iter().any(|a| a.key() == action.key()) {
            let label = match action.key() {
                Key::Static(s) | Key::Prefix(s) => s.to_string(),
            };
            return Err(PageError::DuplicateAction(label));
        }
        tracing::debug!(action = %action.label(), "registered action");
        self.actions.push(action);
        Ok(())
    }

    /// Registered actions in registration order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn contains(&self, action: &Action) -> bool {
        self.actions.contains(action)
    }

    /// Resolve one line of input.
    ///
    /// `selectable` holds the sequence numbers of the menu options on the
    /// current screen; numeric suffixes and bare numbers must name one.
    ///
    /// # Errors
    /// `InvalidAction` when nothing matches. Recoverable: re-prompt.
    pub fn resolve(&self, raw: &str, selectable: &[usize]) -> Result<Resolved, InvalidAction> {
        let trimmed = raw.trim();
        let normalized = normalize(trimmed);

        let resolved = self
            .resolve_static(&normalized)
            .or_else(|| self.resolve_dynamic(trimmed, selectable))
            .or_else(|| resolve_choice(trimmed, selectable));

        tracing::debug!(input = trimmed, ?resolved, "resolved input");

        resolved.ok_or_else(|| InvalidAction {
            input: trimmed.to_string(),
        })
    }

    fn resolve_static(&self, normalized: &str) -> Option<Resolved> {
        let action = self
            .actions
            .iter()
            .filter(|a| a.is_static())
            .find(|a| a.key() == Key::Static(normalized))?;

        Some(match action {
            Action::Quit => Resolved::Quit,
            Action::Forward => Resolved::Navigate(Direction::Forward),
            Action::Back => Resolved::Navigate(Direction::Back),
            Action::Symbol(symbol) => Resolved::Symbol(symbol.clone()),
            Action::Dynamic { .. } => return None,
        })
    }

    fn resolve_dynamic(&self, trimmed: &str, selectable: &[usize]) -> Option<Resolved> {
        let mut prefixes: Vec<(&str, bool)> = self
            .actions
            .iter()
            .filter_map(|a| match a {
                Action::Dynamic { prefix, numeric } => Some((prefix.as_str(), *numeric)),
                _ => None,
            })
            .collect();
        // Longest first; ties cannot match the same input.
        prefixes.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then(a.0.cmp(b.0)));

        prefixes.into_iter().find_map(|(prefix, numeric)| {
            let rest = strip_prefix_ignore_case(trimmed, prefix)?;
            // Numbers follow the prefix directly; text may be spaced off it.
            let suffix = if numeric {
                Suffix::Number(parse_selectable(rest, selectable)?)
            } else {
                let text = rest.trim();
                if text.is_empty() {
                    return None;
                }
                Suffix::Text(text.to_string())
            };
            Some(Resolved::Dynamic {
                prefix: prefix.to_string(),
                suffix,
            })
        })
    }
}

fn resolve_choice(trimmed: &str, selectable: &[usize]) -> Option<Resolved> {
    parse_selectable(trimmed, selectable).map(Resolved::Choice)
}

/// Digits only (no sign), positive, and one of `selectable`.
fn parse_selectable(text: &str, selectable: &[usize]) -> Option<usize> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n: usize = text.parse().ok()?;
    (n > 0 && selectable.contains(&n)).then_some(n)
}

/// `input` minus a case-insensitive `prefix`, keeping the remainder's casing.
fn strip_prefix_ignore_case<'a>(input: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() || !input.is_char_boundary(prefix.len()) {
        return None;
    }
    let (head, rest) = input.split_at(prefix.len());
    (head.to_uppercase() == prefix).then_some(rest)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(actions: Vec<Action>) -> ActionRegistry {
        let mut registry = ActionRegistry::new();
        for action in actions {
            registry.register(action).unwrap();
        }
        registry
    }

    fn options(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn static_symbols_are_case_insensitive_duplicates() {
        let mut reg = registry(vec![Action::symbol("s")]);
        assert_eq!(
            reg.register(Action::symbol(" S ")),
            Err(PageError::DuplicateAction("S".into()))
        );
    }

    #[test]
    fn custom_symbol_cannot_shadow_quit() {
        let mut reg = ActionRegistry::with_paging();
        assert_eq!(
            reg.register(Action::symbol("q")),
            Err(PageError::DuplicateAction("Q".into()))
        );
        assert_eq!(reg.register(Action::Forward), Err(PageError::DuplicateAction("F".into())));
    }

    #[test]
    fn duplicate_prefixes_are_rejected() {
        let mut reg = registry(vec![Action::numbered("g")]);
        assert!(reg.register(Action::prefixed("G")).is_err());
    }

    #[test]
    fn static_and_prefix_may_share_text() {
        let reg = registry(vec![Action::symbol("G"), Action::numbered("G")]);
        assert_eq!(reg.actions().len(), 2);
    }

    #[test]
    fn quit_and_dynamic_scenario() {
        let reg = registry(vec![Action::Quit, Action::numbered("G")]);

        assert_eq!(reg.resolve("q", &options(7)), Ok(Resolved::Quit));
        assert_eq!(
            reg.resolve("g7", &options(7)),
            Ok(Resolved::Dynamic {
                prefix: "G".into(),
                suffix: Suffix::Number(7)
            })
        );
        assert_eq!(
            reg.resolve("g7", &options(3)),
            Err(InvalidAction { input: "g7".into() })
        );
    }

    #[test]
    fn numeric_suffix_must_follow_the_prefix() {
        let reg = registry(vec![Action::numbered("G")]);
        for input in ["g 7", "G 7", "g\t7", "g7 1"] {
            assert!(reg.resolve(input, &options(7)).is_err(), "{input:?}");
        }
        assert!(reg.resolve(" g7 ", &options(7)).is_ok());
    }

    #[test]
    fn bare_number_picks_visible_option() {
        let reg = ActionRegistry::with_paging();
        assert_eq!(reg.resolve("3", &options(5)), Ok(Resolved::Choice(3)));
        assert!(reg.resolve("3", &options(2)).is_err());
    }

    #[test]
    fn bare_number_must_be_on_screen() {
        let reg = ActionRegistry::with_paging();
        let second_screen = vec![6, 7, 8, 9, 10];
        assert_eq!(reg.resolve(" 8 ", &second_screen), Ok(Resolved::Choice(8)));
        assert!(reg.resolve("3", &second_screen).is_err());
    }

    #[test]
    fn numbers_reject_signs_zero_and_garbage() {
        let reg = ActionRegistry::with_paging();
        for input in ["0", "+1", "-1", "1.0", "1a", ""] {
            assert!(reg.resolve(input, &options(5)).is_err(), "{input:?}");
        }
    }

    #[test]
    fn static_beats_dynamic_beats_numeric() {
        // "G1" is both a static symbol and a dynamic match.
        let reg = registry(vec![Action::symbol("G1"), Action::numbered("G")]);
        assert_eq!(reg.resolve("g1", &options(5)), Ok(Resolved::Symbol("G1".into())));

        // "1" as a dynamic text match vs bare numeric.
        let reg = registry(vec![Action::prefixed("1")]);
        assert_eq!(
            reg.resolve("12", &options(20)),
            Ok(Resolved::Dynamic {
                prefix: "1".into(),
                suffix: Suffix::Text("2".into())
            })
        );
    }

    #[test]
    fn resolution_ignores_registration_order() {
        let actions = vec![
            Action::Quit,
            Action::symbol("S"),
            Action::numbered("G"),
            Action::prefixed("GO"),
            Action::symbol(".."),
        ];
        let forward = registry(actions.clone());
        let reversed = registry(actions.into_iter().rev().collect());

        for input in ["q", "s", "g2", "go home", "GO3", "..", "2", "x", "g9"] {
            assert_eq!(
                forward.resolve(input, &options(4)),
                reversed.resolve(input, &options(4)),
                "{input:?}"
            );
        }
    }

    #[test]
    fn longest_validating_prefix_wins() {
        let reg = registry(vec![Action::numbered("G"), Action::prefixed("GO")]);
        assert_eq!(
            reg.resolve("go home", &options(4)),
            Ok(Resolved::Dynamic {
                prefix: "GO".into(),
                suffix: Suffix::Text("home".into())
            })
        );
        assert_eq!(
            reg.resolve("G4", &options(4)),
            Ok(Resolved::Dynamic {
                prefix: "G".into(),
                suffix: Suffix::Number(4)
            })
        );
    }

    #[test]
    fn text_suffix_keeps_original_casing() {
        let reg = registry(vec![Action::prefixed("/")]);
        assert_eq!(
            reg.resolve("/ReadMe", &[]),
            Ok(Resolved::Dynamic {
                prefix: "/".into(),
                suffix: Suffix::Text("ReadMe".into())
            })
        );
        assert!(reg.resolve("/", &[]).is_err());
    }

    #[test]
    fn navigation_symbols_resolve_to_directions() {
        let reg = ActionRegistry::with_paging();
        assert_eq!(reg.resolve("f", &[]), Ok(Resolved::Navigate(Direction::Forward)));
        assert_eq!(reg.resolve(" B", &[]), Ok(Resolved::Navigate(Direction::Back)));
    }

    #[test]
    fn labels_for_prompt() {
        assert_eq!(Action::Quit.label(), "Q");
        assert_eq!(Action::numbered("g").label(), "G<n>");
        assert_eq!(Action::prefixed("/").label(), "/…");
        assert_eq!(Action::symbol("^").label(), "^");
    }

    #[test]
    fn resolution_is_deterministic() {
        let reg = registry(vec![Action::Quit, Action::numbered("G")]);
        let first = reg.resolve("g2", &options(3));
        for _ in 0..5 {
            assert_eq!(reg.resolve("g2", &options(3)), first);
        }
    }
}
