//! Interaction loop state algebra: pure types, zero effects.
//!
//! `LoopState` is the whole state machine:
//!
//! ```text
//! Rendering -> AwaitingInput -> Resolving -> Navigating  -> Rendering
//!                                         -> Erroring    -> Rendering
//!                                         -> Dispatching (exit)
//!                                         -> Terminated  (exit)
//! ```
//!
//! Only `AwaitingInput` blocks. The two exits hand a `Dispatch` back to the
//! caller; the engine never acts on it.

use super::action::{Resolved, Suffix};
use super::pager::Direction;
use super::theme;
use crate::strings::Text;

// ============================================================================
// LOOP STATES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopState {
    /// Draw the current screen.
    Rendering,
    /// Block on one line of input.
    AwaitingInput,
    /// Match a line against the registry.
    Resolving(String),
    /// Move the pager, then redraw.
    Navigating(Direction),
    /// Hand a result to the caller and exit.
    Dispatching(Dispatch),
    /// Queue a feedback line, then redraw.
    Erroring(Feedback),
    /// Quit requested (or input gone): exit with `Dispatch::Quit`.
    Terminated,
}

// ============================================================================
// DISPATCH
// ============================================================================

/// What the loop returns to its caller. Navigation never shows up here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Quit symbol, or the input stream closed.
    Quit,
    /// A caller-defined static symbol, normalized.
    Symbol(String),
    /// A dynamic prefix and what followed it.
    Dynamic { prefix: String, suffix: Suffix },
    /// Bare number: the chosen menu option's sequence.
    Choice(usize),
}

impl Dispatch {
    /// The integer payload, for choices and numeric suffixes.
    pub fn payload(&self) -> Option<usize> {
        match self {
            Dispatch::Choice(n)
            | Dispatch::Dynamic {
                suffix: Suffix::Number(n),
                ..
            } => Some(*n),
            _ => None,
        }
    }
}

impl LoopState {
    /// The state a resolved action leads to.
    pub fn from_resolved(resolved: Resolved) -> Self {
        match resolved {
            Resolved::Navigate(direction) => LoopState::Navigating(direction),
            Resolved::Quit => LoopState::Terminated,
            Resolved::Symbol(symbol) => LoopState::Dispatching(Dispatch::Symbol(symbol)),
            Resolved::Dynamic { prefix, suffix } => {
                LoopState::Dispatching(Dispatch::Dynamic { prefix, suffix })
            }
            Resolved::Choice(n) => LoopState::Dispatching(Dispatch::Choice(n)),
        }
    }
}

// ============================================================================
// FEEDBACK
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Success,
    Hint,
}

impl Severity {
    fn label(self) -> Text {
        match self {
            Severity::Error => Text::Error,
            Severity::Warning => Text::Warning,
            Severity::Info => Text::Info,
            Severity::Success => Text::Success,
            Severity::Hint => Text::Hint,
        }
    }
}

/// One annotation line shown on the next render, then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub severity: Severity,
    pub message: String,
    /// What the message is about: the input, a path...
    pub context: Option<String>,
}

impl Feedback {
    /// Unresolved user input.
    pub fn invalid_action(input: &str) -> Self {
        Self {
            severity: Severity::Error,
            message: Text::InvalidAction.to_string(),
            context: Some(input.to_string()),
        }
    }

    /// Caller domain error, e.g. "not a directory".
    pub fn error(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            context: Some(context.into()),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            context: None,
        }
    }

    pub fn info(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
            context: Some(context.into()),
        }
    }

    pub fn success(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
            context: Some(context.into()),
        }
    }

    pub fn hint(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Hint,
            message: message.into(),
            context: None,
        }
    }

    /// "ERROR invalid action 'xyz'"
    pub fn render(&self, decorate: bool) -> String {
        let label = theme::bold(self.severity.label().as_str(), decorate);
        match &self.context {
            Some(context) => format!(
                "{label} {} {}",
                self.message,
                theme::single_quote(context)
            ),
            None => format!("{label} {}", self.message),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_terminates() {
        assert_eq!(LoopState::from_resolved(Resolved::Quit), LoopState::Terminated);
    }

    #[test]
    fn navigation_stays_in_the_loop() {
        assert_eq!(
            LoopState::from_resolved(Resolved::Navigate(Direction::Back)),
            LoopState::Navigating(Direction::Back)
        );
    }

    #[test]
    fn choices_dispatch_with_payload() {
        let state = LoopState::from_resolved(Resolved::Choice(4));
        match state {
            LoopState::Dispatching(dispatch) => assert_eq!(dispatch.payload(), Some(4)),
            other => panic!("Expected Dispatching, got {other:?}"),
        }
    }

    #[test]
    fn numeric_suffix_is_the_payload() {
        let dispatch = Dispatch::Dynamic {
            prefix: "G".into(),
            suffix: Suffix::Number(7),
        };
        assert_eq!(dispatch.payload(), Some(7));

        let text = Dispatch::Dynamic {
            prefix: "/".into(),
            suffix: Suffix::Text("x".into()),
        };
        assert_eq!(text.payload(), None);
        assert_eq!(Dispatch::Symbol("S".into()).payload(), None);
    }

    #[test]
    fn invalid_action_feedback_quotes_input() {
        let line = Feedback::invalid_action("xyz").render(false);
        assert_eq!(line, "ERROR invalid action 'xyz'");
    }

    #[test]
    fn domain_error_names_its_context() {
        let line = Feedback::error("not a directory", "/etc/hosts").render(false);
        assert_eq!(line, "ERROR not a directory '/etc/hosts'");
    }

    #[test]
    fn warning_without_context() {
        assert_eq!(Feedback::warning("careful").render(false), "WARNING careful");
        assert_eq!(Feedback::hint("try G<n>").render(false), "HINT try G<n>");
    }

    #[test]
    fn success_names_its_context() {
        let line = Feedback::success("opening", "http://nas").render(false);
        assert_eq!(line, "SUCCESS opening 'http://nas'");
    }
}
