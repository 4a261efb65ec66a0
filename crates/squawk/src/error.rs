//! Error types for Squawk operations.
//!
//! This module provides the main error type [`SquawkError`] which wraps
//! the error conditions that can occur while turning a script into a track.

use std::io;

use thiserror::Error;

use squawk_parser::error::ParseError;

/// The main error type for Squawk operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the script text next to the diagnostics so the
/// spans can be rendered against it.
#[derive(Debug, Error)]
pub enum SquawkError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for SquawkError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl SquawkError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
