//! Pure transition for the `Resolving` state: (input, page) -> next state.
//!
//! Testable without a terminal. Invalid input becomes an `Erroring` state
//! carrying its feedback line; it never escapes the loop.

use super::Page;
use super::state::{Feedback, LoopState};

/// Resolve one line of input against the page's current screen.
pub fn resolve(page: &Page, input: &str) -> LoopState {
    match page.resolve(input) {
        Ok(resolved) => LoopState::from_resolved(resolved),
        Err(invalid) => LoopState::Erroring(Feedback::invalid_action(&invalid.input)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::action::{Action, Suffix};
    use crate::page::pager::Direction;
    use crate::page::state::Dispatch;
    use crate::types::DisplayConfig;

    fn menu_page(options: usize, capacity: usize) -> Page {
        let mut page = Page::new("Menu", capacity, &DisplayConfig::plain(80)).unwrap();
        for seq in 1..=options {
            page.add_menu_option(seq, format!("Option {seq}"), "").unwrap();
        }
        page.register_action(Action::numbered("G")).unwrap();
        page
    }

    #[test]
    fn quit_terminates() {
        assert_eq!(resolve(&menu_page(3, 5), "q"), LoopState::Terminated);
    }

    #[test]
    fn forward_navigates() {
        assert_eq!(
            resolve(&menu_page(12, 5), "F"),
            LoopState::Navigating(Direction::Forward)
        );
    }

    #[test]
    fn garbage_becomes_feedback() {
        assert_eq!(
            resolve(&menu_page(3, 5), "zzz"),
            LoopState::Erroring(Feedback::invalid_action("zzz"))
        );
    }

    #[test]
    fn numbers_resolve_against_current_screen_only() {
        let mut page = menu_page(12, 5);
        assert_eq!(
            resolve(&page, "3"),
            LoopState::Dispatching(Dispatch::Choice(3))
        );
        page.forward();
        assert!(matches!(resolve(&page, "3"), LoopState::Erroring(_)));
        assert_eq!(
            resolve(&page, "g7"),
            LoopState::Dispatching(Dispatch::Dynamic {
                prefix: "G".into(),
                suffix: Suffix::Number(7)
            })
        );
    }
}
