//! Error adapter for rendering [`FcalError`] with miette.
//!
//! A parse failure carries one diagnostic with labelled spans, which becomes
//! a [`Reportable::Diagnostic`] rendered against the source text. Every
//! other error becomes a plain [`Reportable::Error`].

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use fcal::FcalError;
use fcal_parser::{Span, error::Diagnostic};

/// Adapter for a single parser diagnostic.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let span = span_to_miette(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// Adapter for [`FcalError`] variants without source locations.
pub struct ErrorAdapter<'a>(pub &'a FcalError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            FcalError::Io(_) => "fcal::io",
            FcalError::Parse { .. } => return None,
            FcalError::Lower(_) => "fcal::lower",
            FcalError::Config(_) => "fcal::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            FcalError::Lower(_) => Some(Box::new(
                "this is a bug in the translator, please report it with the input file",
            )),
            _ => None,
        }
    }
}

/// A single renderable error.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A parser diagnostic with source locations.
    Diagnostic(DiagnosticAdapter<'a>),
    /// An error without source locations.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

fn span_to_miette(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Convert an [`FcalError`] into the error to render.
pub fn to_reportable(err: &FcalError) -> Reportable<'_> {
    match err {
        FcalError::Parse {
            err: parse_err,
            src,
        } => Reportable::Diagnostic(DiagnosticAdapter::new(parse_err.diagnostic(), src)),
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}

#[cfg(test)]
mod tests {
    use fcal::target_form::LowerError;

    use super::*;

    fn parse_failure(source: &str) -> FcalError {
        match fcal_parser::parse(source) {
            Ok(program) => panic!("expected a parse error, got {program:?}"),
            Err(err) => FcalError::new_parse_error(err, source),
        }
    }

    #[test]
    fn test_parse_error_becomes_diagnostic() {
        let err = parse_failure("main () { Int ; }");

        match to_reportable(&err) {
            Reportable::Diagnostic(d) => {
                assert_eq!(d.to_string(), "expected variable name, found semicolon `;`");
                assert_eq!(d.code().map(|c| c.to_string()), Some("E100".to_string()));
                assert!(d.source_code().is_some());
            }
            Reportable::Error(_) => panic!("Expected Diagnostic"),
        }
    }

    #[test]
    fn test_diagnostic_help_is_forwarded() {
        let err = parse_failure("main () { x = 1 }");
        let reportable = to_reportable(&err);

        assert_eq!(
            reportable.help().map(|h| h.to_string()),
            Some("statements end with `;`".to_string())
        );
    }

    #[test]
    fn test_non_parse_errors() {
        let err = FcalError::Config("target.runtime_header must not be empty".to_string());
        match to_reportable(&err) {
            Reportable::Error(e) => {
                assert_eq!(
                    e.to_string(),
                    "Configuration error: target.runtime_header must not be empty"
                );
                assert_eq!(e.code().map(|c| c.to_string()), Some("fcal::config".to_string()));
                assert!(e.source_code().is_none());
            }
            Reportable::Diagnostic(_) => panic!("Expected Error"),
        }

        let err = FcalError::from(LowerError::UnsupportedScalarType("Char".to_string()));
        assert!(to_reportable(&err).help().is_some());
    }

    #[test]
    fn test_labels_keep_primary_flag() {
        let err = parse_failure("main () { print(x; }");
        let reportable = to_reportable(&err);

        let labels: Vec<_> = reportable.labels().unwrap().collect();
        assert_eq!(labels.len(), 2);
        assert!(labels[0].primary());
        assert_eq!(labels[0].offset(), 17);
        assert_eq!(labels[0].len(), 1);
        assert!(!labels[1].primary());
        assert_eq!(labels[1].label(), Some("opened here"));
    }
}
