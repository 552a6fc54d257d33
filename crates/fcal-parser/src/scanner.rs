//! Regex-table scanner for FCAL source text.
//!
//! The scanner alternates between two steps until the text is exhausted:
//!
//! 1. Skip trivia: whitespace, `/* block */` comments and `// line`
//!    comments, repeatedly, until none of them matches.
//! 2. Run every [`LexicalRule`] against the remaining text and keep the rule
//!    with the strictly longest match. Ties go to the rule declared first,
//!    which is how `Int` beats the identifier rule while `Integer` does not.
//!
//! Text no rule matches becomes a one-character [`TokenKind::LexicalError`]
//! token and scanning continues after it, so [`Scanner::scan`] never fails.
//! The parser decides what an error token means.
//!
//! # Accepted numeric literals
//!
//! The float rule is `[0-9]*\.?[0-9]*`: both `5.` and `.5` are float
//! constants, and so is a lone `.`. Digit-only text scans as an integer
//! because the integer rule is declared first and ties with the float rule.

use std::sync::LazyLock;

use log::trace;
use regex::Regex;

use crate::{
    span::Span,
    tokens::{Token, TokenKind},
};

/// One entry of the scanner's rule table.
#[derive(Debug)]
pub struct LexicalRule {
    kind: TokenKind,
    pattern: Regex,
}

impl LexicalRule {
    fn new(kind: TokenKind, pattern: &str) -> Self {
        let pattern = Regex::new(&format!("^(?:{pattern})"))
            .unwrap_or_else(|err| panic!("invalid pattern for {kind:?}: {err}"));
        Self { kind, pattern }
    }

    /// The token kind this rule produces.
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Length in bytes of the match anchored at the start of `text`, or 0.
    pub fn match_len(&self, text: &str) -> usize {
        match_len(&self.pattern, text)
    }
}

/// The rule table in priority order.
static RULES: LazyLock<Vec<LexicalRule>> = LazyLock::new(|| {
    let keywords = TokenKind::KEYWORDS
        .iter()
        .map(|(kind, text)| LexicalRule::new(*kind, &regex::escape(text)));

    let constants_and_names = [
        (TokenKind::IntConst, r"[0-9]+"),
        (TokenKind::FloatConst, r"[0-9]*\.?[0-9]*"),
        (TokenKind::StringConst, r#""[^"]*""#),
        (TokenKind::VariableName, r"[a-zA-Z_][a-zA-Z_0-9]*"),
    ]
    .into_iter()
    .map(|(kind, pattern)| LexicalRule::new(kind, pattern));

    let symbols = TokenKind::SYMBOLS
        .iter()
        .map(|(kind, text)| LexicalRule::new(*kind, &regex::escape(text)));

    keywords.chain(constants_and_names).chain(symbols).collect()
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\n\t\r ]+").expect("whitespace pattern is valid"));

static BLOCK_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/\*([^*]|\*+[^*/])*\*+/").expect("block comment pattern is valid")
});

static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^//[^\n]*(\n|$)").expect("line comment pattern is valid"));

fn match_len(pattern: &Regex, text: &str) -> usize {
    pattern.find(text).map_or(0, |m| m.end())
}

/// The scanner's rule table, in priority order.
pub fn rules() -> &'static [LexicalRule] {
    &RULES
}

/// Scanner over one source text.
#[derive(Debug)]
pub struct Scanner<'src> {
    source: &'src str,
    offset: usize,
}

impl<'src> Scanner<'src> {
    /// Create a scanner positioned at the start of `source`.
    pub fn new(source: &'src str) -> Self {
        Self { source, offset: 0 }
    }

    /// Scan the whole text.
    ///
    /// The returned sequence always ends with exactly one
    /// [`TokenKind::EndOfFile`] token.
    pub fn scan(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        self.skip_trivia();
        while !self.rest().is_empty() {
            let token = self.next_token();
            self.offset = token.span.end();
            tokens.push(token);
            self.skip_trivia();
        }

        let end = self.source.len();
        tokens.push(Token::new(TokenKind::EndOfFile, "", Span::new(end..end)));

        trace!(token_count = tokens.len(); "Scanned source");
        tokens
    }

    fn rest(&self) -> &'src str {
        &self.source[self.offset..]
    }

    /// Skip whitespace and comments, trying each category in turn until a
    /// full pass matches nothing.
    fn skip_trivia(&mut self) {
        loop {
            let mut skipped = false;
            for pattern in [&*WHITESPACE, &*BLOCK_COMMENT, &*LINE_COMMENT] {
                let len = match_len(pattern, self.rest());
                if len > 0 {
                    self.offset += len;
                    skipped = true;
                }
            }
            if !skipped {
                break;
            }
        }
    }

    /// Match the longest token at the current position.
    fn next_token(&self) -> Token {
        let rest = self.rest();

        let mut best: Option<(TokenKind, usize)> = None;
        for rule in rules() {
            let len = rule.match_len(rest);
            if len > best.map_or(0, |(_, best_len)| best_len) {
                best = Some((rule.kind(), len));
            }
        }

        let (kind, len) = best.unwrap_or_else(|| {
            let len = rest.chars().next().map_or(1, char::len_utf8);
            (TokenKind::LexicalError, len)
        });

        let span = Span::new(self.offset..self.offset + len);
        Token::new(kind, &rest[..len], span)
    }
}

/// Scan `source` into tokens.
pub fn scan(source: &str) -> Vec<Token> {
    Scanner::new(source).scan()
}
