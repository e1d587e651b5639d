//! Effects boundary: drive the loop over a reader and a writer.
//!
//! This is the only module with side effects. It steps the state machine
//! from `state`, asking `update` to resolve input and `view` to draw.
//! A closed or broken input stream ends the loop as a quit; so does an
//! output stream that can no longer be written.

use std::io::{self, BufRead, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};

use super::Page;
use super::state::{Dispatch, LoopState};
use super::update;
use super::view;

/// Run until the page yields a dispatch.
pub fn run_with<R: BufRead, W: Write>(page: &mut Page, input: &mut R, output: &mut W) -> Dispatch {
    let mut state = LoopState::Rendering;

    loop {
        state = match state {
            LoopState::Rendering => match draw(page, output) {
                Ok(()) => LoopState::AwaitingInput,
                Err(e) => {
                    tracing::warn!(error = %e, "output closed, ending page");
                    LoopState::Terminated
                }
            },
            LoopState::AwaitingInput => match read_line(input) {
                Some(line) => LoopState::Resolving(line),
                None => LoopState::Terminated,
            },
            LoopState::Resolving(line) => update::resolve(page, &line),
            LoopState::Navigating(direction) => {
                page.navigate(direction);
                LoopState::Rendering
            }
            LoopState::Erroring(feedback) => {
                page.report(feedback);
                LoopState::Rendering
            }
            LoopState::Dispatching(dispatch) => {
                tracing::debug!(page = page.title(), ?dispatch, "page dispatched");
                return dispatch;
            }
            LoopState::Terminated => {
                tracing::debug!(page = page.title(), "page terminated");
                return Dispatch::Quit;
            }
        };
    }
}

/// Draw one screen, then drop the feedback it showed.
fn draw<W: Write>(page: &mut Page, output: &mut W) -> io::Result<()> {
    if page.display().clear_screen {
        queue!(output, Clear(ClearType::All), MoveTo(0, 0))?;
    }

    let mut lines = view::render(page);
    let prompt = lines.pop().unwrap_or_default();
    for line in &lines {
        writeln!(output, "{line}")?;
    }
    write!(output, "{prompt}")?;
    output.flush()?;

    page.clear_feedback();
    Ok(())
}

/// One line of input; None once the stream is closed or unreadable.
fn read_line<R: BufRead>(input: &mut R) -> Option<String> {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => {
            tracing::debug!("input closed");
            None
        }
        Ok(_) => Some(line),
        Err(e) => {
            tracing::warn!(error = %e, "input unreadable");
            None
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
