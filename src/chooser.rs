//! File chooser: browse directories on a page and pick a file or directory.
//!
//! Listing and dispatch handling are pure functions over `Entry` values;
//! `Chooser` holds the navigation stack and drives pages. A rejected pick
//! ("not a directory", "not a file") is reported on the same page, which
//! is then run again with its screen intact.

use std::fs::{self, Metadata};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use humansize::{BINARY, format_size};
use walkdir::WalkDir;

use crate::error::{ChooserError, PageError};
use crate::page::row::{self, MENU_GUTTER};
use crate::page::{Action, Dispatch, Page, Suffix};
use crate::strings::{Text, symbols};
use crate::types::{Chosen, Config, DisplayConfig};

const NAME_WIDTH: usize = 30;
const MODE_WIDTH: usize = 10;
const MODIFIED_WIDTH: usize = 12;
const SIZE_WIDTH: usize = 10;
const CELL_SEPARATOR: &str = " | ";

// ============================================================================
// MODES
// ============================================================================

/// What is listed and what may be picked.
///
/// Directories are always listed so the user can navigate; the mode decides
/// whether files and dotfiles appear, and which kind a pick may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Files and directories, dotfiles included; either may be picked.
    #[default]
    All,
    /// Directories only, no dotfiles.
    DirectoriesOnly,
    /// Files (directories listed for navigation), no dotfiles.
    FilesOnly,
    /// Directories only, dotfiles included.
    DirectoriesAll,
    /// Files (directories listed for navigation), dotfiles included.
    FilesAll,
}

impl Mode {
    pub fn lists_files(self) -> bool {
        matches!(self, Mode::All | Mode::FilesOnly | Mode::FilesAll)
    }

    pub fn lists_dotfiles(self) -> bool {
        matches!(self, Mode::All | Mode::DirectoriesAll | Mode::FilesAll)
    }

    pub fn picks_directories(self) -> bool {
        matches!(self, Mode::All | Mode::DirectoriesOnly | Mode::DirectoriesAll)
    }

    pub fn picks_files(self) -> bool {
        self.lists_files()
    }

    fn prompt(self) -> Text {
        match (self.picks_directories(), self.picks_files()) {
            (true, true) => Text::ChooserPickAny,
            (true, false) => Text::ChooserPickDirectory,
            _ => Text::ChooserPickFile,
        }
    }
}

// ============================================================================
// ENTRIES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
    Symlink,
}

impl EntryKind {
    fn marker(self) -> &'static str {
        match self {
            EntryKind::Directory => "d",
            EntryKind::File => "f",
            EntryKind::Symlink => "l",
        }
    }
}

/// One listed item of a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
    /// Target is a directory (symlinks followed).
    pub is_dir: bool,
    /// "drwxr-xr-x", or N/A where permissions are not available.
    pub mode: String,
    pub modified: Option<SystemTime>,
    pub size: u64,
}

/// List one directory level, sorted by name, filtered by mode.
///
/// Entries that vanish or cannot be read while listing are skipped.
///
/// # Errors
/// The directory itself cannot be read, or is not a directory.
pub fn list_entries(dir: &Path, mode: Mode) -> io::Result<Vec<Entry>> {
    let meta = fs::metadata(dir)?;
    if !meta.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotADirectory,
            Text::NotADirectory.as_str(),
        ));
    }
    // Surface permission errors for the directory itself.
    fs::read_dir(dir)?;

    let mut entries = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    for item in walker {
        let item = match item {
            Ok(item) => item,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };

        let name = item.file_name().to_string_lossy().trim().to_string();
        let is_dir = item.path().is_dir();

        if name.starts_with('.') && !mode.lists_dotfiles() {
            continue;
        }
        if !is_dir && !mode.lists_files() {
            continue;
        }

        let kind = if item.path_is_symlink() {
            EntryKind::Symlink
        } else if is_dir {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        let meta = item.metadata().ok();

        entries.push(Entry {
            name,
            path: item.path().to_path_buf(),
            kind,
            is_dir,
            mode: meta
                .as_ref()
                .map_or_else(|| Text::NotAvailable.to_string(), mode_text),
            modified: meta.as_ref().and_then(|m| m.modified().ok()),
            size: meta.as_ref().map_or(0, Metadata::len),
        });
    }

    Ok(entries)
}

#[cfg(unix)]
fn mode_text(meta: &Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;

    let kind = if meta.file_type().is_symlink() {
        'l'
    } else if meta.is_dir() {
        'd'
    } else {
        '-'
    };
    permission_string(kind, meta.permissions().mode())
}

#[cfg(not(unix))]
fn mode_text(_meta: &Metadata) -> String {
    Text::NotAvailable.to_string()
}

/// "drwxr-x---" from a type character and unix permission bits.
#[cfg_attr(not(unix), allow(dead_code))]
fn permission_string(kind: char, bits: u32) -> String {
    let mut out = String::with_capacity(10);
    out.push(kind);
    for shift in [6, 3, 0] {
        let triple = (bits >> shift) & 0o7;
        out.push(if triple & 0o4 != 0 { 'r' } else { '-' });
        out.push(if triple & 0o2 != 0 { 'w' } else { '-' });
        out.push(if triple & 0o1 != 0 { 'x' } else { '-' });
    }
    out
}

/// "42 secs", "5 mins", "3 hr", "12 days".
pub fn age(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    match secs {
        0..60 => format!("{secs} {}", Text::Seconds),
        60..3_600 => format!("{} {}", secs / 60, Text::MinutesShort),
        3_600..86_400 => format!("{} {}", secs / 3_600, Text::HourShort),
        _ => format!("{} {}", secs / 86_400, Text::Days),
    }
}

fn entry_line(entry: &Entry) -> String {
    let modified = entry
        .modified
        .and_then(|t| t.elapsed().ok())
        .map_or_else(|| Text::NotAvailable.to_string(), age);
    let size = if entry.is_dir {
        String::new()
    } else {
        format_size(entry.size, BINARY)
    };
    line(entry.kind.marker(), &entry.name, &entry.mode, &modified, &size)
}

fn line(marker: &str, name: &str, mode: &str, modified: &str, size: &str) -> String {
    [
        row::fit(marker, 1),
        row::fit(name, NAME_WIDTH),
        row::fit(mode, MODE_WIDTH),
        row::fit(modified, MODIFIED_WIDTH),
        row::fit(size, SIZE_WIDTH),
    ]
    .join(CELL_SEPARATOR)
    .trim_end()
    .to_string()
}

// ============================================================================
// PAGE
// ============================================================================

/// The chooser page for one directory.
pub fn build_page(
    dir: &Path,
    entries: &[Entry],
    mode: Mode,
    capacity: usize,
    display: &DisplayConfig,
) -> Result<Page, PageError> {
    let mut page = Page::new(Text::ChooserTitle.as_str(), capacity, display)?;

    page.add_field_value(Text::ChooserUserName.as_str(), user_name());
    page.add_field_value(Text::ChooserUserHome.as_str(), user_home());
    page.add_field_value(Text::ChooserDirectory.as_str(), dir.display().to_string());
    page.add_blank();

    let gutter = " ".repeat(MENU_GUTTER);
    let head = line(
        Text::ChooserHeadType.as_str(),
        Text::ChooserHeadName.as_str(),
        Text::ChooserHeadMode.as_str(),
        Text::ChooserHeadModified.as_str(),
        Text::ChooserHeadSize.as_str(),
    );
    let breaker = [1, NAME_WIDTH, MODE_WIDTH, MODIFIED_WIDTH, SIZE_WIDTH]
        .map(|w| "-".repeat(w))
        .join(CELL_SEPARATOR);
    let table_head = [format!("{gutter}{head}"), format!("{gutter}{breaker}")];
    for line in &table_head {
        page.add_raw(line);
    }
    page.add_raw(format!(
        "{:>width$}) {}",
        symbols::UP,
        Text::ChooserParent,
        width = MENU_GUTTER - 2
    ));

    // Entries are menu options, not columns, so every screen gets its own head.
    let capacity = page.pager().capacity();
    let repeat_head = capacity > table_head.len();
    for (i, entry) in entries.iter().enumerate() {
        if repeat_head && page.rows().len() % capacity == 0 {
            for line in &table_head {
                page.add_raw(line);
            }
        }
        page.add_menu_option(i + 1, entry_line(entry), "")?;
    }

    for symbol in [symbols::UP, symbols::UP_ARROW, symbols::PARENT, symbols::SELECT] {
        page.register_action(Action::symbol(symbol))?;
    }
    page.register_action(Action::numbered(symbols::GO))?;
    page.set_prompt(mode.prompt().as_str());

    Ok(page)
}

fn user_name() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| Text::NotAvailable.to_string())
}

fn user_home() -> String {
    dirs::home_dir().map_or_else(
        || Text::NotAvailable.to_string(),
        |home| home.display().to_string(),
    )
}

// ============================================================================
// DISPATCH HANDLING
// ============================================================================

/// What a dispatch means for the chooser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Stop: a pick, or None on quit.
    Done(Option<Chosen>),
    /// Descend into a directory.
    Enter(PathBuf),
    /// Go to the parent directory.
    Up,
    /// Refuse the pick; report it on the same page.
    Reject { message: Text, context: PathBuf },
    /// Nothing to do; run the page again.
    Stay,
}

/// Interpret one dispatch against the listed entries.
pub fn step(dispatch: &Dispatch, dir: &Path, entries: &[Entry], mode: Mode) -> Step {
    let entry = |n: usize| n.checked_sub(1).and_then(|i| entries.get(i));

    match dispatch {
        Dispatch::Quit => Step::Done(None),
        Dispatch::Symbol(s)
            if s == symbols::UP || s == symbols::UP_ARROW || s == symbols::PARENT =>
        {
            Step::Up
        }
        Dispatch::Symbol(s) if s == symbols::SELECT => {
            if mode.picks_directories() {
                Step::Done(Some(Chosen {
                    path: dir.to_path_buf(),
                    is_dir: true,
                }))
            } else {
                Step::Reject {
                    message: Text::NotAFile,
                    context: dir.to_path_buf(),
                }
            }
        }
        Dispatch::Dynamic {
            prefix,
            suffix: Suffix::Number(n),
        } if prefix == symbols::GO => match entry(*n) {
            Some(e) if e.is_dir => Step::Enter(e.path.clone()),
            Some(e) => Step::Reject {
                message: Text::NotADirectory,
                context: e.path.clone(),
            },
            None => Step::Stay,
        },
        Dispatch::Choice(n) => match entry(*n) {
            Some(e) if e.is_dir && !mode.picks_directories() => Step::Reject {
                message: Text::NotAFile,
                context: e.path.clone(),
            },
            Some(e) if !e.is_dir && !mode.picks_files() => Step::Reject {
                message: Text::NotADirectory,
                context: e.path.clone(),
            },
            Some(e) => Step::Done(Some(Chosen {
                path: e.path.clone(),
                is_dir: e.is_dir,
            })),
            None => Step::Stay,
        },
        _ => Step::Stay,
    }
}

// ============================================================================
// NAVIGATION
// ============================================================================

/// Directories descended into, on top of a base directory.
///
/// Going up pops the stack; with nothing left to pop the base is replaced
/// by its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavStack {
    base: PathBuf,
    descended: Vec<PathBuf>,
}

impl NavStack {
    pub fn new(base: PathBuf) -> Self {
        Self {
            base,
            descended: Vec::new(),
        }
    }

    pub fn current(&self) -> &Path {
        self.descended.last().unwrap_or(&self.base)
    }

    pub fn enter(&mut self, dir: PathBuf) {
        self.descended.push(dir);
    }

    pub fn up(&mut self) {
        if self.descended.pop().is_none() {
            if let Some(parent) = self.base.parent() {
                self.base = parent.to_path_buf();
            }
        }
    }

    pub fn depth(&self) -> usize {
        self.descended.len()
    }
}

// ============================================================================
// CHOOSER
// ============================================================================

pub struct Chooser {
    nav: NavStack,
    mode: Mode,
    capacity: usize,
    display: DisplayConfig,
}

impl Chooser {
    /// Start browsing at `start`.
    ///
    /// # Errors
    /// `start` does not exist or cannot be resolved.
    pub fn new(start: &Path, mode: Mode, config: &Config) -> Result<Self, ChooserError> {
        let base = fs::canonicalize(start).map_err(|source| ChooserError::Io {
            path: start.to_path_buf(),
            source,
        })?;
        Ok(Self {
            nav: NavStack::new(base),
            mode,
            capacity: config.page_capacity,
            display: config.display.clone(),
        })
    }

    pub fn current(&self) -> &Path {
        self.nav.current()
    }

    /// Browse on stdin/stdout.
    pub fn choose(&mut self) -> Result<Option<Chosen>, ChooserError> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout().lock();
        self.choose_with(&mut input, &mut output)
    }

    /// Browse until something is picked or the user quits.
    ///
    /// # Errors
    /// The starting directory cannot be listed, or a page cannot be built.
    pub fn choose_with<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<Option<Chosen>, ChooserError> {
        let start = self.current().to_path_buf();
        let mut entries = list_entries(&start, self.mode).map_err(|source| ChooserError::Io {
            path: start,
            source,
        })?;

        loop {
            let dir = self.current().to_path_buf();
            let mut page = build_page(&dir, &entries, self.mode, self.capacity, &self.display)?;

            // Same page until the directory changes.
            loop {
                let dispatch = page.run_with(input, output);
                let next = match step(&dispatch, &dir, &entries, self.mode) {
                    Step::Done(chosen) => {
                        if let Some(chosen) = &chosen {
                            tracing::info!(path = %chosen.path.display(), "chooser picked");
                        }
                        return Ok(chosen);
                    }
                    Step::Stay => continue,
                    Step::Reject { message, context } => {
                        page.report_error(message.as_str(), context.display().to_string());
                        continue;
                    }
                    Step::Enter(path) => {
                        let mut next = self.nav.clone();
                        next.enter(path);
                        next
                    }
                    Step::Up => {
                        let mut next = self.nav.clone();
                        next.up();
                        next
                    }
                };

                match list_entries(next.current(), self.mode) {
                    Ok(listed) => {
                        tracing::info!(
                            dir = %next.current().display(),
                            depth = next.depth(),
                            "chooser moved"
                        );
                        self.nav = next;
                        entries = listed;
                        break;
                    }
                    Err(e) => {
                        page.report_error(e.to_string(), next.current().display().to_string());
                    }
                }
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
