//! Diagnostics for the FCAL parser.
//!
//! A [`Diagnostic`] is one error with an optional [`ErrorCode`], labeled
//! source spans and help text. [`ParseError`] wraps the diagnostic returned
//! from [`crate::parse`]. [`InternalError`] reports a malformed token
//! sequence handed to the parser.
//!
//! ```
//! # use fcal_parser::error::{Diagnostic, ErrorCode};
//! # use fcal_parser::Span;
//! let diag = Diagnostic::error("expected semicolon, found end of input")
//!     .with_code(ErrorCode::E101)
//!     .with_label(Span::new(20..20), "input ends here");
//! ```

mod diagnostic;
mod error_code;
mod internal_error;
mod label;
mod parse_error;

pub(crate) use parse_error::Result;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use internal_error::InternalError;
pub use label::Label;
pub use parse_error::ParseError;
