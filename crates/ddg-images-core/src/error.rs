//! Error types for the DuckDuckGo image client
//!
//! One enum covers every failure path in the library; per-record
//! validation failures during pagination are the only errors that are
//! swallowed, and that happens in `search`, not here.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for all DuckDuckGo image client operations
#[derive(Error, Debug)]
pub enum DdgImageError {
    /// HTTP request failed (transport error or non-success status)
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The vqd session token could not be extracted from the front page
    #[error("failed to extract vqd token: {0}")]
    TokenExtraction(String),

    /// Response body could not be parsed (malformed JSON or HTML)
    #[error("failed to parse response: {0}")]
    Parsing(String),

    /// Invalid URL format
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid search query
    #[error("invalid search query: {0}")]
    InvalidQuery(String),

    /// Filesystem error while writing a downloaded file
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl DdgImageError {
    /// Wraps a filesystem error together with the path it occurred at
    pub(crate) fn io(path: PathBuf, source: std::io::Error) -> Self {
        Self::Io { path, source }
    }
}

/// Result type alias for DuckDuckGo image client operations
pub type Result<T> = std::result::Result<T, DdgImageError>;
