//! Error taxonomy.
//!
//! Construction faults (`PageError`) stop a page from being built.
//! `InvalidAction` is recoverable and never leaves the interaction loop.
//! The rest belong to the callers around the engine.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Faults raised while building a page. The loop never starts on these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    /// Page capacity was zero; pagination would be undefined.
    #[error("page capacity must be greater than zero")]
    InvalidCapacity,

    /// A symbol (or dynamic prefix) is already registered on this page.
    #[error("action {0:?} is already registered on this page")]
    DuplicateAction(String),

    /// Menu option sequences start at 1.
    #[error("menu option sequence {0} is not a positive number")]
    InvalidSequence(usize),

    /// Menu option sequences are unique within one page build.
    #[error("menu option {0} is already on this page")]
    DuplicateSequence(usize),
}

/// User input that matched nothing on the current screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid action {input:?}")]
pub struct InvalidAction {
    /// The input as typed, trimmed.
    pub input: String,
}

/// Failure to read or parse the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure inside the file chooser.
#[derive(Debug, Error)]
pub enum ChooserError {
    #[error(transparent)]
    Page(#[from] PageError),

    #[error("cannot list {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A dashboard probe that got no usable answer.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
