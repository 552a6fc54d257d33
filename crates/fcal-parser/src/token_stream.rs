//! Cursor over a scanned token sequence.

use crate::{
    error::{Diagnostic, ErrorCode, InternalError, Result},
    span::Span,
    tokens::{Token, TokenKind},
};

/// An owned token sequence with a cursor.
///
/// The sequence always ends with exactly one end-of-input token, so
/// [`TokenStream::current`] is always valid. Advancing past the end leaves
/// the cursor on the end-of-input token.
#[derive(Debug)]
pub struct TokenStream {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenStream {
    /// Wrap a token sequence, checking that it is terminated.
    ///
    /// # Errors
    ///
    /// Returns an [`InternalError`] with code [`ErrorCode::E900`] unless the
    /// sequence ends with exactly one end-of-input token.
    pub fn new(tokens: Vec<Token>) -> std::result::Result<Self, InternalError> {
        let eof_count = tokens.iter().filter(|token| token.is_eof()).count();
        let terminated = tokens.last().is_some_and(Token::is_eof);
        if eof_count != 1 || !terminated {
            let span = tokens.last().map_or_else(Span::default, |token| token.span);
            return Err(InternalError::new(
                ErrorCode::E900,
                format!(
                    "token stream must end with exactly one end-of-input token, found {eof_count}"
                ),
                span,
            ));
        }

        Ok(Self::scanned(tokens))
    }

    /// Wrap the output of the scanner, which is always terminated.
    pub(crate) fn scanned(tokens: Vec<Token>) -> Self {
        debug_assert!(tokens.last().is_some_and(Token::is_eof));
        Self {
            tokens,
            position: 0,
        }
    }

    /// The token under the cursor.
    pub fn current(&self) -> &Token {
        &self.tokens[self.position]
    }

    /// Check the kind of the current token.
    pub fn next_is(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    /// Move the cursor forward one token.
    pub fn advance(&mut self) {
        if !self.current().is_eof() {
            self.position += 1;
        }
    }

    /// Consume the current token if it has the given kind.
    pub fn attempt_match(&mut self, kind: TokenKind) -> Option<Token> {
        if self.next_is(kind) {
            let token = self.current().clone();
            self.advance();
            Some(token)
        } else {
            None
        }
    }

    /// Consume a token of the given kind or report what was found instead.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        match self.attempt_match(kind) {
            Some(token) => Ok(token),
            None => Err(self.unexpected(kind.description())),
        }
    }

    /// Build the diagnostic for finding the current token where something
    /// described by `expected` was required.
    pub fn unexpected(&self, expected: &str) -> Diagnostic {
        let found = self.current();
        let message = format!("expected {expected}, found {}", found.describe());
        let (code, label) = match found.kind {
            TokenKind::EndOfFile => (ErrorCode::E101, "input ends here"),
            TokenKind::LexicalError => (ErrorCode::E001, "unrecognized character"),
            _ => (ErrorCode::E100, "unexpected token"),
        };
        Diagnostic::error(message)
            .with_code(code)
            .with_label(found.span, label)
    }
}
