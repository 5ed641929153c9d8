//! Error types for the Xiphos library.
//!
//! All fallible operations in this crate return [`Result`], with
//! [`XiphosError`] as the error type. Note that unmatched searches are not
//! errors; they are ordinary empty results (see the `search` module).
//!
//! # Examples
//!
//! ```
//! use xiphos::error::{Result, XiphosError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(XiphosError::corpus_load("input was unreadable"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for Xiphos operations.
///
/// It uses the `thiserror` crate for automatic `Error` trait implementation
/// and provides convenient constructor methods for the string-carrying
/// variants.
#[derive(Error, Debug)]
pub enum XiphosError {
    /// I/O errors (file operations, reading corpus sources, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The corpus source was missing, unreadable, or yielded no pages.
    #[error("Corpus load error: {0}")]
    CorpusLoad(String),

    /// A page record lacked the required title/body delimiters, or the
    /// delimiters were out of order.
    #[error("Malformed content: {0}")]
    MalformedContent(String),

    /// An engine was invoked over zero pages.
    #[error("Empty corpus: {0}")]
    EmptyCorpus(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with XiphosError.
pub type Result<T> = std::result::Result<T, XiphosError>;

impl XiphosError {
    /// Create a new corpus load error.
    pub fn corpus_load<S: Into<String>>(msg: S) -> Self {
        XiphosError::CorpusLoad(msg.into())
    }

    /// Create a new malformed content error.
    pub fn malformed_content<S: Into<String>>(msg: S) -> Self {
        XiphosError::MalformedContent(msg.into())
    }

    /// Create a new empty corpus error.
    pub fn empty_corpus<S: Into<String>>(msg: S) -> Self {
        XiphosError::EmptyCorpus(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        XiphosError::Analysis(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        XiphosError::Other(format!("Invalid configuration: {}", msg.into()))
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        XiphosError::Other(msg.into())
    }
}
