//! Error types for docpair library.

use std::io;
use thiserror::Error;

/// Result type alias for docpair operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading or rendering a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not valid JSON or does not match the content model.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input is not recognized as a structured document.
    #[error("Unknown input format: not a structured document")]
    UnknownFormat,

    /// A content reference string could not be parsed or points at the wrong collection.
    #[error("Invalid content reference: {0}")]
    InvalidRef(String),

    /// Two nodes share the same `self_ref`.
    #[error("Duplicate content reference: {0}")]
    DuplicateRef(String),

    /// A relocation or pairing rule file is malformed.
    #[error("Invalid view rules: {0}")]
    InvalidRules(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Error during rendering (HTML, Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
