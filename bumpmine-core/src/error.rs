//! Error types for bumpmine-core

use thiserror::Error;

/// Main error type for the bumpmine-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// git could not be run, or exited with a failure status
    #[error("log extraction failed: {0}")]
    Extraction(String),

    /// Malformed commit record stream
    ///
    /// `fragment` holds the document the parser choked on.
    #[error("YAML parsing error: {message}")]
    Parse { message: String, fragment: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Offending text for parse failures, if any.
    pub fn fragment(&self) -> Option<&str> {
        match self {
            Error::Parse { fragment, .. } => Some(fragment),
            _ => None,
        }
    }
}

/// Result type alias for bumpmine-core
pub type Result<T> = std::result::Result<T, Error>;
