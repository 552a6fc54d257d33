//! Source spans annotated with a message.

use crate::span::Span;

/// A message attached to a span of the source text.
///
/// A diagnostic carries one primary label pointing at the offending token.
/// Secondary labels point at related context, for example the opening
/// bracket of a construct the parser could not finish:
///
/// ```text
/// error[E100]: expected ')', found semicolon `;`
///   |
/// 3 |   print(x;
///   |        - ^ unexpected token
///   |        |
///   |        opened here
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    span: Span,
    message: String,
    is_primary: bool,
}

impl Label {
    /// Create a label marking the main location of a problem.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a label marking related context.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: false,
        }
    }

    /// The span this label points at.
    pub fn span(&self) -> Span {
        self.span
    }

    /// The label text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check if this is a primary label.
    pub fn is_primary(&self) -> bool {
        self.is_primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_label() {
        let label = Label::primary(Span::new(7..8), "unexpected token");

        assert_eq!(label.span(), Span::new(7..8));
        assert_eq!(label.message(), "unexpected token");
        assert!(label.is_primary());
    }

    #[test]
    fn test_secondary_label() {
        let label = Label::secondary(Span::new(5..6), "opened here");

        assert_eq!(label.span().start(), 5);
        assert!(!label.is_primary());
    }
}
