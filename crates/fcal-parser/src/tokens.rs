//! Token types for the FCAL language.

use std::fmt;

use crate::span::Span;

/// The kind of a token.
///
/// Declaration order matters: the scanner's rule table lists the rules in
/// this order, and earlier rules win ties on match length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    IntKwd,
    FloatKwd,
    BoolKwd,
    TrueKwd,
    FalseKwd,
    StrKwd,
    MatrixKwd,
    LetKwd,
    InKwd,
    EndKwd,
    IfKwd,
    ThenKwd,
    ElseKwd,
    ForKwd,
    WhileKwd,
    PrintKwd,

    // Constants
    IntConst,
    FloatConst,
    StringConst,

    // Names
    VariableName,

    // Punctuation
    LeftParen,    // (
    RightParen,   // )
    LeftCurly,    // {
    RightCurly,   // }
    LeftSquare,   // [
    RightSquare,  // ]
    Comma,        // ,
    SemiColon,    // ;
    Colon,        // :

    // Operators
    Assign,           // =
    PlusSign,         // +
    Star,             // *
    Dash,             // -
    ForwardSlash,     // /
    LessThan,         // <
    LessThanEqual,    // <=
    GreaterThan,      // >
    GreaterThanEqual, // >=
    EqualsEquals,     // ==
    NotEquals,        // !=
    AndOp,            // &&
    OrOp,             // ||
    NotOp,            // !

    // Special
    EndOfFile,
    LexicalError,
}

impl TokenKind {
    /// Every keyword kind with its exact spelling.
    pub const KEYWORDS: [(TokenKind, &'static str); 16] = [
        (TokenKind::IntKwd, "Int"),
        (TokenKind::FloatKwd, "Float"),
        (TokenKind::BoolKwd, "Bool"),
        (TokenKind::TrueKwd, "True"),
        (TokenKind::FalseKwd, "False"),
        (TokenKind::StrKwd, "Str"),
        (TokenKind::MatrixKwd, "Matrix"),
        (TokenKind::LetKwd, "let"),
        (TokenKind::InKwd, "in"),
        (TokenKind::EndKwd, "end"),
        (TokenKind::IfKwd, "if"),
        (TokenKind::ThenKwd, "then"),
        (TokenKind::ElseKwd, "else"),
        (TokenKind::ForKwd, "for"),
        (TokenKind::WhileKwd, "while"),
        (TokenKind::PrintKwd, "print"),
    ];

    /// Every punctuation and operator kind with its exact spelling.
    pub const SYMBOLS: [(TokenKind, &'static str); 23] = [
        (TokenKind::LeftParen, "("),
        (TokenKind::RightParen, ")"),
        (TokenKind::LeftCurly, "{"),
        (TokenKind::RightCurly, "}"),
        (TokenKind::LeftSquare, "["),
        (TokenKind::RightSquare, "]"),
        (TokenKind::Comma, ","),
        (TokenKind::SemiColon, ";"),
        (TokenKind::Colon, ":"),
        (TokenKind::Assign, "="),
        (TokenKind::PlusSign, "+"),
        (TokenKind::Star, "*"),
        (TokenKind::Dash, "-"),
        (TokenKind::ForwardSlash, "/"),
        (TokenKind::LessThan, "<"),
        (TokenKind::LessThanEqual, "<="),
        (TokenKind::GreaterThan, ">"),
        (TokenKind::GreaterThanEqual, ">="),
        (TokenKind::EqualsEquals, "=="),
        (TokenKind::NotEquals, "!="),
        (TokenKind::AndOp, "&&"),
        (TokenKind::OrOp, "||"),
        (TokenKind::NotOp, "!"),
    ];

    /// Check if this is one of the scalar type keywords.
    pub fn is_scalar_type(&self) -> bool {
        matches!(
            self,
            TokenKind::IntKwd | TokenKind::FloatKwd | TokenKind::StrKwd | TokenKind::BoolKwd
        )
    }

    /// Human-readable name used in diagnostics.
    pub fn description(&self) -> &'static str {
        use TokenKind::*;
        match self {
            IntKwd => "'Int'",
            FloatKwd => "'Float'",
            BoolKwd => "'Bool'",
            TrueKwd => "'True'",
            FalseKwd => "'False'",
            StrKwd => "'Str'",
            MatrixKwd => "'Matrix'",
            LetKwd => "'let'",
            InKwd => "'in'",
            EndKwd => "'end'",
            IfKwd => "'if'",
            ThenKwd => "'then'",
            ElseKwd => "'else'",
            ForKwd => "'for'",
            WhileKwd => "'while'",
            PrintKwd => "'print'",
            IntConst => "integer constant",
            FloatConst => "float constant",
            StringConst => "string constant",
            VariableName => "variable name",
            LeftParen => "'('",
            RightParen => "')'",
            LeftCurly => "'{'",
            RightCurly => "'}'",
            LeftSquare => "'['",
            RightSquare => "']'",
            Comma => "comma",
            SemiColon => "semicolon",
            Colon => "colon",
            Assign => "'='",
            PlusSign => "'+'",
            Star => "'*'",
            Dash => "'-'",
            ForwardSlash => "'/'",
            LessThan => "'<'",
            LessThanEqual => "'<='",
            GreaterThan => "'>'",
            GreaterThanEqual => "'>='",
            EqualsEquals => "'=='",
            NotEquals => "'!='",
            AndOp => "'&&'",
            OrOp => "'||'",
            NotOp => "'!'",
            EndOfFile => "end of input",
            LexicalError => "unrecognized character",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A scanned token: its kind, the matched text and where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    /// Check if this is the end-of-input token.
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EndOfFile
    }

    /// Description of the token for "found ..." parts of diagnostics.
    ///
    /// Includes the lexeme unless the token is the end of input.
    pub fn describe(&self) -> String {
        if self.is_eof() {
            self.kind.description().to_string()
        } else {
            format!("{} `{}`", self.kind.description(), self.lexeme)
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.kind, self.lexeme)
    }
}
