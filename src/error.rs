//! Error types for rs-feedposts.
//!
//! Per-post problems never surface here: a missing region, a malformed
//! identifier or a failed image fetch degrade to defaults or log lines.
//! Only run-level failures (configuration, reading the page, writing the
//! export) are returned as `Error`.

use std::path::PathBuf;

/// Error type for scan and export operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configured CSS selector does not parse.
    #[error("invalid selector for `{name}`: {selector}")]
    InvalidSelector {
        /// Which `Selectors` field holds the bad value.
        name: &'static str,
        /// The selector text as configured.
        selector: String,
    },

    /// Configuration file could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem failure while reading input or writing output.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Serializing the post records failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// An HTTP request for an image failed before a response arrived.
    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The image server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    HttpStatus {
        /// Requested URL.
        url: String,
        /// Response status code.
        status: u16,
    },

    /// An export task panicked or was aborted.
    #[error("export task failed: {0}")]
    Task(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for scan and export operations.
pub type Result<T> = std::result::Result<T, Error>;
