//! # Errors
//!
//! Every fallible core operation returns [`ReaderError`]. Nothing here is
//! recovered mid-stream: the TUI reports the message in the status line and
//! the navigation state stays as it was before the failing action.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, ReaderError>;

#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    /// Focus or commit was requested on a list with no elements.
    #[error("nothing to select: the list is empty")]
    EmptyList,

    #[error("{what} {index} is out of range ({len} available)")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid book manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid chapter {path}: {source}")]
    Chapter {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),
}

impl ReaderError {
    pub(crate) fn out_of_range(what: &'static str, index: usize, len: usize) -> Self {
        ReaderError::IndexOutOfRange { what, index, len }
    }
}
