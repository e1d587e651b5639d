//! Page engine: build a page of rows and actions, then run the
//! render -> read -> resolve loop until it yields something for the caller.
//!
//! Organized along the same pure/effect split throughout:
//! - `row`, `action`, `pager`: pure data and lookups
//! - `state`, `update`: the loop's state machine and its pure transition
//! - `view`: pure rendering (page in, lines out)
//! - `run`: the only module touching the terminal

pub mod action;
pub mod pager;
pub mod row;
pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;

use std::io;

pub use action::{Action, ActionRegistry, Resolved, Suffix};
pub use pager::{Direction, Pager};
pub use row::{Layout, MenuOption, Row};
pub use state::{Dispatch, Feedback, Severity};

use crate::error::{InvalidAction, PageError};
use crate::types::DisplayConfig;

/// Width used when neither the config nor the terminal says otherwise.
const FALLBACK_WIDTH: u16 = 80;

/// One logical screen of content.
///
/// Built by a caller, run, then discarded. Rows are append-only; the
/// pager only changes which slice of them is visible.
#[derive(Debug, Clone)]
pub struct Page {
    title: String,
    rows: Vec<Row>,
    registry: ActionRegistry,
    pager: Pager,
    display: DisplayConfig,
    width: usize,
    /// Shown in front of the valid-actions list.
    prompt: Option<String>,
    /// Lines for the next render only.
    feedback: Vec<Feedback>,
}

impl Page {
    /// A page accepting quit, forward and back.
    ///
    /// # Errors
    /// `InvalidCapacity` when `capacity` is zero.
    pub fn new(
        title: impl Into<String>,
        capacity: usize,
        display: &DisplayConfig,
    ) -> Result<Self, PageError> {
        let pager = Pager::new(capacity, 0)?;
        let width = display
            .width
            .or_else(|| crossterm::terminal::size().ok().map(|(w, _)| w))
            .unwrap_or(FALLBACK_WIDTH);

        Ok(Self {
            title: title.into(),
            rows: Vec::new(),
            registry: ActionRegistry::with_paging(),
            pager,
            display: display.clone(),
            width: usize::from(width),
            prompt: None,
            feedback: Vec::new(),
        })
    }

    // ------------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------------

    pub fn add_field_value(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.push(Row::FieldValue {
            label: label.into(),
            value: value.into(),
            emphasis: false,
        });
    }

    /// Field/value line with the value in bold.
    pub fn add_emphasized_field_value(
        &mut self,
        label: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.push(Row::FieldValue {
            label: label.into(),
            value: value.into(),
            emphasis: true,
        });
    }

    pub fn add_columns<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Row::Columns(cells.into_iter().map(Into::into).collect()));
    }

    pub fn add_column_header<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Row::ColumnHeader(cells.into_iter().map(Into::into).collect()));
    }

    /// Add a numbered, selectable row.
    ///
    /// # Errors
    /// `InvalidSequence` for 0, `DuplicateSequence` when already used.
    pub fn add_menu_option(
        &mut self,
        sequence: usize,
        description: impl Into<String>,
        hint: impl Into<String>,
    ) -> Result<(), PageError> {
        if sequence == 0 {
            return Err(PageError::InvalidSequence(sequence));
        }
        if self.menu_options().any(|o| o.sequence == sequence) {
            return Err(PageError::DuplicateSequence(sequence));
        }
        self.push(Row::MenuOption(MenuOption {
            sequence,
            description: description.into(),
            hint: hint.into(),
        }));
        Ok(())
    }

    pub fn add_blank(&mut self) {
        self.push(Row::Blank);
    }

    pub fn add_break(&mut self) {
        self.push(Row::Break);
    }

    pub fn add_raw(&mut self, line: impl Into<String>) {
        self.push(Row::Raw(line.into()));
    }

    /// Several pre-formatted lines.
    pub fn add_paragraph<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for line in lines {
            self.add_raw(line);
        }
    }

    /// # Errors
    /// `DuplicateAction` when the symbol or prefix is already registered.
    pub fn register_action(&mut self, action: Action) -> Result<(), PageError> {
        self.registry.register(action)
    }

    /// Text shown before the list of valid actions.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = Some(prompt.into());
    }

    fn push(&mut self, row: Row) {
        self.rows.push(row);
        self.pager.set_total_rows(self.rows.len());
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Rows on the current screen.
    pub fn visible_rows(&self) -> &[Row] {
        self.pager.visible(&self.rows)
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Shared widths for every row of this page.
    pub fn layout(&self) -> Layout {
        Layout::for_rows(
            self.width,
            self.display.label_width,
            self.display.decorate,
            &self.rows,
        )
    }

    /// All menu options, every screen.
    pub fn menu_options(&self) -> impl Iterator<Item = &MenuOption> {
        self.rows.iter().filter_map(Row::as_menu_option)
    }

    /// Sequence numbers of the menu options on the current screen.
    pub fn selectable(&self) -> Vec<usize> {
        self.visible_rows()
            .iter()
            .filter_map(Row::as_menu_option)
            .map(|o| o.sequence)
            .collect()
    }

    /// Resolve input against the current screen.
    ///
    /// # Errors
    /// `InvalidAction` when nothing matches.
    pub fn resolve(&self, input: &str) -> Result<Resolved, InvalidAction> {
        self.registry.resolve(input, &self.selectable())
    }

    // ------------------------------------------------------------------------
    // Navigation and feedback
    // ------------------------------------------------------------------------

    pub fn forward(&mut self) -> bool {
        self.pager.go(Direction::Forward)
    }

    pub fn back(&mut self) -> bool {
        self.pager.go(Direction::Back)
    }

    pub(crate) fn navigate(&mut self, direction: Direction) {
        self.pager.go(direction);
    }

    /// Queue a line for the next render.
    pub fn report(&mut self, feedback: Feedback) {
        self.feedback.push(feedback);
    }

    /// Queue a caller domain error ("not a directory", path) for the next render.
    pub fn report_error(&mut self, message: impl Into<String>, context: impl Into<String>) {
        self.report(Feedback::error(message, context));
    }

    /// Lines waiting for the next render.
    pub fn feedback(&self) -> &[Feedback] {
        &self.feedback
    }

    pub(crate) fn clear_feedback(&mut self) {
        self.feedback.clear();
    }

    // ------------------------------------------------------------------------
    // Running
    // ------------------------------------------------------------------------

    /// Run the loop on stdin/stdout until a non-navigation action resolves.
    ///
    /// May be called again on the same page, e.g. after `report_error`;
    /// the current screen is kept.
    pub fn run(&mut self) -> Dispatch {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout().lock();
        run::run_with(self, &mut input, &mut output)
    }

    /// Same as [`Page::run`] over any reader and writer.
    pub fn run_with<R: io::BufRead, W: io::Write>(&mut self, input: &mut R, output: &mut W) -> Dispatch {
        run::run_with(self, input, output)
    }
}

// ============================================================================
// TESTS
// ============================================================================
