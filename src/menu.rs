//! Main menu: a numbered list of the tools, each opening a fresh page.

use crate::error::PageError;
use crate::page::{Dispatch, Page};
use crate::strings::{self, Text};
use crate::types::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Dashboard,
    Chooser,
    Launcher,
    Demo,
}

/// Menu order; sequence numbers start at 1.
pub const ITEMS: [MenuItem; 4] = [
    MenuItem::Dashboard,
    MenuItem::Chooser,
    MenuItem::Launcher,
    MenuItem::Demo,
];

impl MenuItem {
    pub fn text(self) -> Text {
        match self {
            MenuItem::Dashboard => Text::MainMenuDashboard,
            MenuItem::Chooser => Text::MainMenuChooser,
            MenuItem::Launcher => Text::MainMenuLauncher,
            MenuItem::Demo => Text::MainMenuDemo,
        }
    }
}

pub fn build_page(config: &Config) -> Result<Page, PageError> {
    let mut page = Page::new(Text::MainMenuTitle.as_str(), config.page_capacity, &config.display)?;
    page.add_raw(strings::application_version());
    page.add_blank();
    for (i, item) in ITEMS.iter().enumerate() {
        page.add_menu_option(i + 1, item.text().as_str(), "")?;
    }
    Ok(page)
}

/// The item a dispatch picked, or None to leave the menu.
pub fn picked(dispatch: &Dispatch) -> Option<MenuItem> {
    match dispatch {
        Dispatch::Choice(n) => n.checked_sub(1).and_then(|i| ITEMS.get(i)).copied(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DisplayConfig;
    use std::io::Cursor;

    fn config() -> Config {
        Config {
            display: DisplayConfig::plain(80),
            ..Config::default()
        }
    }

    #[test]
    fn every_item_is_numbered() {
        let page = build_page(&config()).unwrap();
        assert_eq!(page.selectable(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn choice_maps_to_item() {
        assert_eq!(picked(&Dispatch::Choice(1)), Some(MenuItem::Dashboard));
        assert_eq!(picked(&Dispatch::Choice(4)), Some(MenuItem::Demo));
        assert_eq!(picked(&Dispatch::Choice(5)), None);
        assert_eq!(picked(&Dispatch::Quit), None);
    }

    #[test]
    fn menu_run_returns_pick() {
        let mut page = build_page(&config()).unwrap();
        let mut input = Cursor::new(b"x\n2\n".to_vec());
        let mut output = Vec::new();
        let dispatch = page.run_with(&mut input, &mut output);
        assert_eq!(picked(&dispatch), Some(MenuItem::Chooser));
        let out = String::from_utf8(output).unwrap();
        assert!(out.contains("StarTerm - Utilities"));
        assert!(out.contains("ERROR invalid action 'x'"));
    }
}
