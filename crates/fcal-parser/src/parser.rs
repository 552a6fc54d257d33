//! Parser for FCAL token streams.
//!
//! Statements are parsed by recursive descent. Expressions are parsed by
//! precedence climbing driven by the [`grammar`](super::grammar) table: the
//! current token's prefix rule produces a left operand, then infix rules
//! extend it while the next operator binds tighter than the caller's
//! minimum. Operators of equal binding power associate to the left.
//!
//! Nesting of statements and expressions is capped at [`MAX_NESTING`]
//! levels. A chain of left-associative operators counts one level per
//! operator, since each one deepens the tree.
//!
//! The first error aborts the parse; no partial tree is returned. The
//! public entry point is [`build_program`].

use log::trace;

use fcal_core::ast::{Expr, Program, Stmt, Stmts, Variable};

use crate::{
    error::{Diagnostic, ErrorCode, Result},
    grammar::{self, BindingPower, InfixRule, NO_BINDING, PrefixRule},
    token_stream::TokenStream,
    tokens::{Token, TokenKind},
};

/// Deepest nesting of statements and expressions the parser accepts.
pub const MAX_NESTING: usize = 256;

struct Parser {
    tokens: TokenStream,
    depth: usize,
}

impl Parser {
    fn new(tokens: TokenStream) -> Self {
        Self { tokens, depth: 0 }
    }

    /// Run `parse` one nesting level deeper.
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.check_depth(self.depth)?;
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth < MAX_NESTING {
            return Ok(());
        }
        Err(Diagnostic::error(format!(
            "nesting exceeds the limit of {MAX_NESTING} levels"
        ))
        .with_code(ErrorCode::E102)
        .with_label(self.tokens.current().span, "limit reached here")
        .with_help("split the construct with intermediate variables"))
    }

    /// `name ( ) { stmts } EOF`
    fn program(&mut self) -> Result<Program> {
        let name = self.variable()?;
        let open_paren = self.tokens.expect(TokenKind::LeftParen)?;
        self.closing(TokenKind::RightParen, &open_paren)?;
        let open_curly = self.tokens.expect(TokenKind::LeftCurly)?;
        let body = self.stmts()?;
        self.closing(TokenKind::RightCurly, &open_curly)?;
        self.tokens.expect(TokenKind::EndOfFile)?;

        Ok(Program::new(name, body))
    }

    /// Statements up to, not including, a `}` or `in`.
    fn stmts(&mut self) -> Result<Stmts> {
        let mut stmts = Vec::new();
        while !self.tokens.next_is(TokenKind::RightCurly) && !self.tokens.next_is(TokenKind::InKwd)
        {
            stmts.push(self.stmt()?);
        }
        Ok(stmts.into_iter().collect())
    }

    fn stmt(&mut self) -> Result<Stmt> {
        self.nested(Self::statement)
    }

    fn statement(&mut self) -> Result<Stmt> {
        let kind = self.tokens.current().kind;
        match kind {
            _ if kind.is_scalar_type() => self.scalar_decl(),
            TokenKind::MatrixKwd => self.matrix_decl(),
            TokenKind::LeftCurly => {
                let open = self.advance();
                let stmts = self.stmts()?;
                self.closing(TokenKind::RightCurly, &open)?;
                Ok(Stmt::Block(stmts))
            }
            TokenKind::IfKwd => self.if_stmt(),
            TokenKind::VariableName => self.assignment(),
            TokenKind::PrintKwd => {
                self.advance();
                let value = self.parenthesized_expr()?;
                self.semicolon()?;
                Ok(Stmt::Print(value))
            }
            TokenKind::ForKwd => self.for_stmt(),
            TokenKind::WhileKwd => {
                self.advance();
                let cond = self.parenthesized_expr()?;
                let body = self.stmt()?;
                Ok(Stmt::While {
                    cond,
                    body: Box::new(body),
                })
            }
            TokenKind::SemiColon => {
                self.advance();
                Ok(Stmt::Skip)
            }
            _ => Err(self.tokens.unexpected("statement")),
        }
    }

    /// `Int x;` and friends.
    fn scalar_decl(&mut self) -> Result<Stmt> {
        let type_keyword = self.advance().lexeme;
        let name = self.variable()?;
        self.semicolon()?;
        Ok(Stmt::ScalarDecl { type_keyword, name })
    }

    /// `Matrix m[rows, cols] r, c = fill;` or `Matrix m = source;`
    fn matrix_decl(&mut self) -> Result<Stmt> {
        self.advance();
        let name = self.variable()?;

        if let Some(open) = self.tokens.attempt_match(TokenKind::LeftSquare) {
            let rows = self.expr(NO_BINDING)?;
            self.tokens.expect(TokenKind::Comma)?;
            let cols = self.expr(NO_BINDING)?;
            self.closing(TokenKind::RightSquare, &open)?;
            let row_var = self.variable()?;
            self.tokens.expect(TokenKind::Comma)?;
            let col_var = self.variable()?;
            self.tokens.expect(TokenKind::Assign)?;
            let fill = self.expr(NO_BINDING)?;
            self.semicolon()?;
            Ok(Stmt::MatrixDeclSized {
                name,
                rows,
                cols,
                row_var,
                col_var,
                fill,
            })
        } else if self.tokens.attempt_match(TokenKind::Assign).is_some() {
            let source = self.expr(NO_BINDING)?;
            self.semicolon()?;
            Ok(Stmt::MatrixDeclFromExpr { name, source })
        } else {
            Err(self
                .tokens
                .unexpected("'[' or '='")
                .with_help("declare a matrix as `Matrix m[rows, cols] r, c = fill;` or `Matrix m = expr;`"))
        }
    }

    /// `if (cond) stmt [else stmt]`
    ///
    /// An `else` binds to the nearest unmatched `if`.
    fn if_stmt(&mut self) -> Result<Stmt> {
        self.advance();
        let cond = self.parenthesized_expr()?;
        let then_stmt = Box::new(self.stmt()?);

        if self.tokens.attempt_match(TokenKind::ElseKwd).is_some() {
            let else_stmt = Box::new(self.stmt()?);
            Ok(Stmt::IfElse {
                cond,
                then_stmt,
                else_stmt,
            })
        } else {
            Ok(Stmt::If { cond, then_stmt })
        }
    }

    /// `x = value;` or `m[row, col] = value;`
    fn assignment(&mut self) -> Result<Stmt> {
        let name = self.variable()?;

        if let Some(open) = self.tokens.attempt_match(TokenKind::LeftSquare) {
            let row = self.expr(NO_BINDING)?;
            self.tokens.expect(TokenKind::Comma)?;
            let col = self.expr(NO_BINDING)?;
            self.closing(TokenKind::RightSquare, &open)?;
            self.tokens.expect(TokenKind::Assign)?;
            let value = self.expr(NO_BINDING)?;
            self.semicolon()?;
            Ok(Stmt::MatrixAssign {
                name,
                row,
                col,
                value,
            })
        } else {
            self.tokens.expect(TokenKind::Assign)?;
            let value = self.expr(NO_BINDING)?;
            self.semicolon()?;
            Ok(Stmt::ScalarAssign { name, value })
        }
    }

    /// `for (var = start : end) body`
    fn for_stmt(&mut self) -> Result<Stmt> {
        self.advance();
        let open = self.tokens.expect(TokenKind::LeftParen)?;
        let var = self.variable()?;
        self.tokens.expect(TokenKind::Assign)?;
        let start = self.expr(NO_BINDING)?;
        self.tokens.expect(TokenKind::Colon)?;
        let end = self.expr(NO_BINDING)?;
        self.closing(TokenKind::RightParen, &open)?;
        let body = self.stmt()?;

        Ok(Stmt::For {
            var,
            start,
            end,
            body: Box::new(body),
        })
    }

    /// Parse an expression whose operators all bind tighter than `min_bp`.
    fn expr(&mut self, min_bp: BindingPower) -> Result<Expr> {
        self.nested(|parser| parser.operand_chain(min_bp))
    }

    fn operand_chain(&mut self, min_bp: BindingPower) -> Result<Expr> {
        let Some(prefix) = grammar::rule_for(self.tokens.current().kind).prefix else {
            return Err(self.tokens.unexpected("expression"));
        };
        let token = self.advance();
        let mut left = self.prefix(prefix, token)?;
        let mut chain = 0;

        loop {
            let rule = grammar::rule_for(self.tokens.current().kind);
            if rule.lbp <= min_bp {
                break;
            }
            let Some(infix) = rule.infix else {
                break;
            };
            chain += 1;
            self.check_depth(self.depth + chain)?;
            let operator = self.advance();
            left = self.infix(infix, left, operator, rule.lbp)?;
        }

        Ok(left)
    }

    fn prefix(&mut self, rule: PrefixRule, token: Token) -> Result<Expr> {
        match rule {
            PrefixRule::Constant => Ok(Expr::Constant(token.lexeme)),
            PrefixRule::Variable => self.name_expr(Variable::new(token.lexeme)),
            PrefixRule::Nested => {
                let inner = self.expr(NO_BINDING)?;
                self.closing(TokenKind::RightParen, &token)?;
                Ok(Expr::parens(inner))
            }
            PrefixRule::Let => {
                let stmts = self.stmts()?;
                self.tokens.expect(TokenKind::InKwd)?;
                let result = self.expr(NO_BINDING)?;
                self.closing(TokenKind::EndKwd, &token)?;
                Ok(Expr::Let {
                    stmts,
                    result: Box::new(result),
                })
            }
            PrefixRule::IfThenElse => {
                let cond = self.expr(NO_BINDING)?;
                self.tokens.expect(TokenKind::ThenKwd)?;
                let then_expr = self.expr(NO_BINDING)?;
                self.tokens.expect(TokenKind::ElseKwd)?;
                let else_expr = self.expr(NO_BINDING)?;
                Ok(Expr::IfThenElse {
                    cond: Box::new(cond),
                    then_expr: Box::new(then_expr),
                    else_expr: Box::new(else_expr),
                })
            }
            // The operand extends as far right as possible: `!a && b` is
            // `!(a && b)`.
            PrefixRule::Not => Ok(Expr::not(self.expr(NO_BINDING)?)),
        }
    }

    fn infix(
        &mut self,
        rule: InfixRule,
        left: Expr,
        operator: Token,
        lbp: BindingPower,
    ) -> Result<Expr> {
        match rule {
            InfixRule::BinaryOperator => {
                let right = self.expr(lbp)?;
                Ok(Expr::binary(left, operator.lexeme, right))
            }
        }
    }

    /// A name in expression position: `m[row, col]`, `f(arg)` or a plain
    /// variable, decided by the token after the name.
    fn name_expr(&mut self, name: Variable) -> Result<Expr> {
        if let Some(open) = self.tokens.attempt_match(TokenKind::LeftSquare) {
            let row = self.expr(NO_BINDING)?;
            self.tokens.expect(TokenKind::Comma)?;
            let col = self.expr(NO_BINDING)?;
            self.closing(TokenKind::RightSquare, &open)?;
            Ok(Expr::MatrixRef {
                name,
                row: Box::new(row),
                col: Box::new(col),
            })
        } else if let Some(open) = self.tokens.attempt_match(TokenKind::LeftParen) {
            let arg = self.expr(NO_BINDING)?;
            self.closing(TokenKind::RightParen, &open)?;
            Ok(Expr::Call {
                name,
                arg: Box::new(arg),
            })
        } else {
            Ok(Expr::Variable(name))
        }
    }

    /// `( expr )` as required by `if`, `while` and `print`.
    fn parenthesized_expr(&mut self) -> Result<Expr> {
        let open = self.tokens.expect(TokenKind::LeftParen)?;
        let expr = self.expr(NO_BINDING)?;
        self.closing(TokenKind::RightParen, &open)?;
        Ok(expr)
    }

    fn variable(&mut self) -> Result<Variable> {
        let token = self.tokens.expect(TokenKind::VariableName)?;
        Ok(Variable::new(token.lexeme))
    }

    fn semicolon(&mut self) -> Result<()> {
        self.tokens
            .expect(TokenKind::SemiColon)
            .map_err(|diag| diag.with_help("statements end with `;`"))?;
        Ok(())
    }

    /// Expect the token closing a construct opened by `opener`.
    fn closing(&mut self, kind: TokenKind, opener: &Token) -> Result<Token> {
        self.tokens
            .expect(kind)
            .map_err(|diag| diag.with_secondary_label(opener.span, "opened here"))
    }

    /// Consume and return the current token.
    fn advance(&mut self) -> Token {
        let token = self.tokens.current().clone();
        self.tokens.advance();
        token
    }
}

/// Parse a complete program from a token stream.
pub fn build_program(tokens: TokenStream) -> Result<Program> {
    let program = Parser::new(tokens).program()?;
    trace!(program:? = program; "Built program tree");
    Ok(program)
}

/// Parse a single expression followed by end of input.
pub fn build_expr(tokens: TokenStream) -> Result<Expr> {
    let mut parser = Parser::new(tokens);
    let expr = parser.expr(NO_BINDING)?;
    parser.tokens.expect(TokenKind::EndOfFile)?;
    Ok(expr)
}
