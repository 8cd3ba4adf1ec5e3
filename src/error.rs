//! Error type shared by the indexer, record stream and search engine.
//!
//! End-of-stream is never an error: the record stream reports it as `Ok(None)`.
//! Everything here aborts the operation that produced it.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The configured tag pattern is unusable. Fatal: the process must not continue.
    #[error("Invalid tag pattern {pattern:?}: {reason}")]
    InvalidTagPattern { pattern: String, reason: String },

    #[error("{message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },

    /// A line of the index file is not a valid record.
    #[error("Malformed record at byte offset {offset}: {source}")]
    Decode {
        offset: u64,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("No record at byte offset {offset}")]
    RecordNotFound { offset: u64 },
}

impl Error {
    pub(crate) fn io(message: impl Into<String>, path: &Path, source: io::Error) -> Self {
        Self::Io { message: message.into(), path: Some(path.to_path_buf()), source }
    }

    /// True for configuration errors that must stop the process rather than be reported
    /// as the outcome of one build.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvalidTagPattern { .. })
    }
}
