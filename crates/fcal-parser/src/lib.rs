//! # FCAL Parser
//!
//! Scanner and parser for the FCAL matrix language. Turns source text into
//! the [`fcal_core::ast::Program`] tree.
//!
//! ## Usage
//!
//! ```
//! # use fcal_parser::{parse, ParseError};
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//!         main () {
//!             Matrix m[2, 2] r, c = r + c;
//!             print(m);
//!         }
//!     "#;
//!
//!     let program = parse(source)?;
//!     assert_eq!(program.name().name(), "main");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod grammar;
mod parser;
pub mod scanner;
mod span;
pub mod token_stream;
pub mod tokens;

pub use error::ParseError;
pub use scanner::Scanner;
pub use span::Span;
pub use tokens::{Token, TokenKind};

use log::debug;

use fcal_core::ast::{Expr, Program};

use token_stream::TokenStream;

/// Scan source text into tokens.
///
/// Never fails: text no lexical rule matches becomes
/// [`TokenKind::LexicalError`] tokens, and the sequence always ends with one
/// [`TokenKind::EndOfFile`] token.
pub fn tokenize(source: &str) -> Vec<Token> {
    Scanner::new(source).scan()
}

/// Parse source text into a program tree.
///
/// The pipeline is:
///
/// 1. **Scan** - convert the text to tokens
/// 2. **Parse** - build the tree from the tokens, stopping at the first error
///
/// # Errors
///
/// Returns a [`ParseError`] holding one diagnostic when the text is not a
/// valid program. Unrecognized characters are reported when the parser
/// reaches them, with code [`error::ErrorCode::E001`].
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let program = parser::build_program(TokenStream::scanned(tokenize(source)))?;

    debug!(
        program = program.name().name(),
        statements = program.body().len();
        "Parsed program"
    );
    Ok(program)
}

/// Parse a token sequence that did not come from [`tokenize`].
///
/// The sequence is checked for its end-of-input terminator when the
/// [`TokenStream`] is built, which reports an
/// [`InternalError`](error::InternalError) instead of a syntax error.
///
/// ```
/// # use fcal_parser::{parse_tokens, tokenize, token_stream::TokenStream};
/// let stream = TokenStream::new(tokenize("main () { }")).expect("terminated");
/// assert!(parse_tokens(stream).is_ok());
///
/// let mut unterminated = tokenize("main () { }");
/// unterminated.pop();
/// assert!(TokenStream::new(unterminated).is_err());
/// ```
///
/// # Errors
///
/// Returns a [`ParseError`] when the tokens do not form a valid program.
pub fn parse_tokens(tokens: TokenStream) -> Result<Program, ParseError> {
    Ok(parser::build_program(tokens)?)
}

/// Parse source text holding a single expression.
///
/// # Errors
///
/// Returns a [`ParseError`] when the text is not a single expression.
pub fn parse_expr(source: &str) -> Result<Expr, ParseError> {
    Ok(parser::build_expr(TokenStream::scanned(tokenize(source)))?)
}
