//! Expression grammar dispatch table.
//!
//! The expression parser looks up the current token's [`GrammarRule`] to
//! decide how to continue: the prefix rule starts an expression, the infix
//! rule extends one, and the binding power decides whether an infix rule
//! may take over the expression parsed so far.

use crate::tokens::TokenKind;

/// Left binding power of an operator token.
pub type BindingPower = u8;

/// Binding power of tokens that never continue an expression.
pub const NO_BINDING: BindingPower = 0;

/// `< <= > >= == != && ||`
pub const RELATIONAL: BindingPower = 40;

/// `+ -`
pub const ADDITIVE: BindingPower = 50;

/// `* /`
pub const MULTIPLICATIVE: BindingPower = 60;

/// How a token begins an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixRule {
    /// Integer, float and string constants, `True` and `False`.
    Constant,
    /// A name: variable, matrix reference or call.
    Variable,
    /// `( expr )`
    Nested,
    /// `let stmts in expr end`
    Let,
    /// `if expr then expr else expr`
    IfThenElse,
    /// `! expr`
    Not,
}

/// How a token extends an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixRule {
    BinaryOperator,
}

/// The grammar entry for one token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrammarRule {
    pub lbp: BindingPower,
    pub prefix: Option<PrefixRule>,
    pub infix: Option<InfixRule>,
}

impl GrammarRule {
    const NONE: GrammarRule = GrammarRule {
        lbp: NO_BINDING,
        prefix: None,
        infix: None,
    };

    const fn prefix(rule: PrefixRule) -> Self {
        Self {
            lbp: NO_BINDING,
            prefix: Some(rule),
            infix: None,
        }
    }

    const fn binary(lbp: BindingPower) -> Self {
        Self {
            lbp,
            prefix: None,
            infix: Some(InfixRule::BinaryOperator),
        }
    }
}

/// Look up the grammar rule for a token kind.
pub fn rule_for(kind: TokenKind) -> GrammarRule {
    use TokenKind::*;
    match kind {
        IntConst | FloatConst | StringConst | TrueKwd | FalseKwd => {
            GrammarRule::prefix(PrefixRule::Constant)
        }
        VariableName => GrammarRule::prefix(PrefixRule::Variable),
        LeftParen => GrammarRule::prefix(PrefixRule::Nested),
        LetKwd => GrammarRule::prefix(PrefixRule::Let),
        IfKwd => GrammarRule::prefix(PrefixRule::IfThenElse),
        NotOp => GrammarRule::prefix(PrefixRule::Not),

        Star | ForwardSlash => GrammarRule::binary(MULTIPLICATIVE),
        PlusSign | Dash => GrammarRule::binary(ADDITIVE),
        LessThan | LessThanEqual | GreaterThan | GreaterThanEqual | EqualsEquals | NotEquals
        | AndOp | OrOp => GrammarRule::binary(RELATIONAL),

        _ => GrammarRule::NONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_power_ordering() {
        assert!(rule_for(TokenKind::Star).lbp > rule_for(TokenKind::PlusSign).lbp);
        assert!(rule_for(TokenKind::Dash).lbp > rule_for(TokenKind::OrOp).lbp);
        assert_eq!(rule_for(TokenKind::ForwardSlash).lbp, MULTIPLICATIVE);
        assert_eq!(rule_for(TokenKind::NotEquals).lbp, RELATIONAL);
    }

    #[test]
    fn test_non_operators_do_not_bind() {
        for kind in [
            TokenKind::SemiColon,
            TokenKind::RightParen,
            TokenKind::ThenKwd,
            TokenKind::EndOfFile,
            TokenKind::NotOp,
            TokenKind::Assign,
        ] {
            let rule = rule_for(kind);
            assert_eq!(rule.lbp, NO_BINDING, "{kind:?}");
            assert!(rule.infix.is_none(), "{kind:?}");
        }
    }

    #[test]
    fn test_prefix_rules() {
        assert_eq!(rule_for(TokenKind::TrueKwd).prefix, Some(PrefixRule::Constant));
        assert_eq!(rule_for(TokenKind::StringConst).prefix, Some(PrefixRule::Constant));
        assert_eq!(rule_for(TokenKind::VariableName).prefix, Some(PrefixRule::Variable));
        assert_eq!(rule_for(TokenKind::LetKwd).prefix, Some(PrefixRule::Let));
        assert_eq!(rule_for(TokenKind::NotOp).prefix, Some(PrefixRule::Not));
        assert_eq!(rule_for(TokenKind::Dash).prefix, None);
        assert_eq!(rule_for(TokenKind::LexicalError).prefix, None);
    }

    #[test]
    fn test_every_operator_symbol_has_an_infix_rule() {
        for (kind, text) in TokenKind::SYMBOLS {
            let is_operator = matches!(
                text,
                "+" | "-" | "*" | "/" | "<" | "<=" | ">" | ">=" | "==" | "!=" | "&&" | "||"
            );
            assert_eq!(rule_for(kind).infix.is_some(), is_operator, "{text}");
        }
    }
}
