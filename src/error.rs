//! Error types for the SymSpell library.
//!
//! All fallible operations return [`SymSpellError`]. Two kinds matter to
//! callers: [`SymSpellError::Validation`] for a bad query parameter and
//! [`SymSpellError::Format`] for a corrupt or foreign dictionary file. Not
//! finding a suggestion is never an error; it is an empty result.
//!
//! # Examples
//!
//! ```
//! use symspell::error::{Result, SymSpellError};
//!
//! fn check_distance(distance: f64) -> Result<()> {
//!     if distance > 2.0 {
//!         return Err(SymSpellError::validation("edit distance too large"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_distance(3.0).is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for SymSpell operations.
#[derive(Error, Debug)]
pub enum SymSpellError {
    /// I/O errors (dictionary files, settings files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid query or configuration parameters
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed binary dictionary data
    #[error("Format error: {0}")]
    Format(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

}

/// Result type alias for operations that may fail with SymSpellError.
pub type Result<T> = std::result::Result<T, SymSpellError>;

impl SymSpellError {
    /// Create a new validation error.
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        SymSpellError::Validation(msg.into())
    }

    /// Create a new format error.
    pub fn format<S: Into<String>>(msg: S) -> Self {
        SymSpellError::Format(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        SymSpellError::Validation(format!("Invalid configuration: {}", msg.into()))
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SymSpellError::Validation(format!("Invalid argument: {}", msg.into()))
    }

    /// Whether this error was caused by a bad parameter rather than bad data.
    pub fn is_validation(&self) -> bool {
        matches!(self, SymSpellError::Validation(_))
    }

    /// Whether this error was caused by an unreadable dictionary file.
    pub fn is_format(&self) -> bool {
        matches!(self, SymSpellError::Format(_))
    }
}
