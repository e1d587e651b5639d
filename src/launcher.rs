//! Launcher menu: pick a configured entry to open its URI.
//!
//! The page stays up after a launch; the outcome is shown as a feedback
//! line on the next render.

use std::io::{self, BufRead, Write};

use crate::error::PageError;
use crate::page::{Dispatch, Feedback, Page};
use crate::strings::Text;
use crate::types::{Config, LaunchEntry};

/// Numbered menu, one option per entry, the URI as hint.
pub fn build_page(entries: &[LaunchEntry], config: &Config) -> Result<Page, PageError> {
    let mut page = Page::new(
        Text::LauncherTitle.as_str(),
        config.page_capacity,
        &config.display,
    )?;
    for (i, entry) in entries.iter().enumerate() {
        page.add_menu_option(i + 1, &entry.name, &entry.uri)?;
    }
    Ok(page)
}

/// Run the menu, opening picks with `open`, until the user quits.
pub fn run_with<R, W, F>(
    config: &Config,
    input: &mut R,
    output: &mut W,
    mut open: F,
) -> Result<(), PageError>
where
    R: BufRead,
    W: Write,
    F: FnMut(&str) -> io::Result<()>,
{
    let mut page = build_page(&config.launcher, config)?;

    loop {
        let entry = match page.run_with(input, output) {
            Dispatch::Choice(n) => n.checked_sub(1).and_then(|i| config.launcher.get(i)),
            _ => return Ok(()),
        };
        let Some(entry) = entry else { continue };

        match open(&entry.uri) {
            Ok(()) => {
                tracing::info!(name = %entry.name, uri = %entry.uri, "launched");
                page.report(Feedback::success(Text::LauncherOpening.as_str(), &entry.uri));
            }
            Err(e) => {
                tracing::warn!(uri = %entry.uri, error = %e, "launch failed");
                page.report_error(Text::LauncherFailed.as_str(), &entry.uri);
            }
        }
    }
}

/// Hand a URI to the platform opener, without waiting for it.
pub fn open_uri(uri: &str) -> io::Result<()> {
    open::that_detached(uri)
}

// ============================================================================
// TESTS
// ============================================================================
