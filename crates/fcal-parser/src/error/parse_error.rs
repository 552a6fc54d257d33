//! The error type returned by [`crate::parse`].

use std::fmt;

use crate::error::Diagnostic;

/// Result of a single parsing step. The parser stops at the first problem.
pub type Result<T> = std::result::Result<T, Diagnostic>;

/// Error returned when source text cannot be parsed.
///
/// Parsing stops at the first problem, so the error carries exactly one
/// diagnostic.
#[derive(Debug, Clone)]
pub struct ParseError {
    diagnostic: Diagnostic,
}

impl ParseError {
    /// The diagnostic that stopped parsing.
    pub fn diagnostic(&self) -> &Diagnostic {
        &self.diagnostic
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.diagnostic, f)
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self { diagnostic }
    }
}
