//! Error codes reported by the FCAL front end.
//!
//! - `E0xx` - Scanner errors surfaced by the parser
//! - `E1xx` - Parser errors
//! - `E9xx` - Internal errors

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Unrecognized character.
    ///
    /// No lexical rule matched at this position, so the scanner produced a
    /// one-character error token and the parser ran into it.
    E001,

    /// Unexpected token.
    ///
    /// The parser found a token that cannot appear at this position.
    E100,

    /// Incomplete input.
    ///
    /// The input ended before the program was complete.
    E101,

    /// Nesting too deep.
    ///
    /// Statements or expressions are nested beyond the parser's limit.
    E102,

    /// Token stream not terminated.
    ///
    /// A token sequence handed to the parser did not end with exactly one
    /// end-of-input token. Scanned input never triggers this, and it is
    /// reported as an [`InternalError`](crate::error::InternalError) rather
    /// than a diagnostic.
    E900,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E900 => "E900",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
