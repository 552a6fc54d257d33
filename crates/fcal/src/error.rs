//! Error types for FCAL translation.

use std::io;

use thiserror::Error;

use fcal_core::LowerError;
use fcal_parser::error::ParseError;

/// The main error type for translator operations.
///
/// The `Parse` variant keeps the source text next to the diagnostics so that
/// reporters can show the offending lines.
#[derive(Debug, Error)]
pub enum FcalError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Lowering error: {0}")]
    Lower(#[from] LowerError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FcalError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
