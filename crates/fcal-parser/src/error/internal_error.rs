//! Errors caused by callers breaking the parser's input contract.

use std::fmt;

use crate::{error::ErrorCode, span::Span};

/// A defect in the caller rather than a problem with the source text.
///
/// Kept apart from [`ParseError`](crate::ParseError) so that a malformed
/// token sequence is never reported to users as a syntax error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalError {
    code: ErrorCode,
    message: String,
    span: Span,
}

impl InternalError {
    pub(crate) fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            code,
            message: message.into(),
            span,
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Where in the token sequence the contract was broken.
    pub fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "internal error[{}]: {}", self.code, self.message)
    }
}

impl std::error::Error for InternalError {}
