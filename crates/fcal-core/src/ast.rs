//! Abstract syntax tree for FCAL programs.
//!
//! The tree is strict: every node exclusively owns its children and nodes are
//! never mutated once the parser has built them. The three node families are
//! [`Stmts`] (statement sequences), [`Stmt`] and [`Expr`], rooted at
//! [`Program`].
//!
//! Both traversals are implemented in sibling modules:
//! - [`source_form`](crate::source_form) prints canonical FCAL source.
//! - [`target_form`](crate::target_form) lowers the tree to C++.

use std::fmt;

/// A variable name as written in the source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable(String);

impl Variable {
    /// Create a variable from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name of the variable.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Variable {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Root of a parsed program: `name () { body }`.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    name: Variable,
    body: Stmts,
}

impl Program {
    /// Create a program from its name and body.
    pub fn new(name: Variable, body: Stmts) -> Self {
        Self { name, body }
    }

    /// Returns the program name.
    pub fn name(&self) -> &Variable {
        &self.name
    }

    /// Returns the statements of the program body.
    pub fn body(&self) -> &Stmts {
        &self.body
    }
}

/// A sequence of zero or more statements.
///
/// Represented as a cons list so that the empty sequence and a statement
/// followed by the rest of the sequence are the only two shapes.
///
/// Walking the spine is iterative everywhere, including `Drop`, `Clone`,
/// `PartialEq` and `Debug`, so long statement sequences never exhaust the
/// stack.
#[derive(Default)]
pub enum Stmts {
    /// No statements.
    #[default]
    Empty,
    /// A statement followed by the remaining statements.
    Cons(Box<Stmt>, Box<Stmts>),
}

impl Stmts {
    /// Prepend `stmt` to `rest`.
    pub fn cons(stmt: Stmt, rest: Stmts) -> Self {
        Stmts::Cons(Box::new(stmt), Box::new(rest))
    }

    /// Returns `true` if the sequence holds no statements.
    pub fn is_empty(&self) -> bool {
        matches!(self, Stmts::Empty)
    }

    /// Number of statements in the sequence.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Iterate over the statements in source order.
    pub fn iter(&self) -> StmtsIter<'_> {
        StmtsIter { next: self }
    }
}

impl Drop for Stmts {
    fn drop(&mut self) {
        let mut next = std::mem::take(self);
        while let Stmts::Cons(_, rest) = &mut next {
            let tail = std::mem::take(rest.as_mut());
            next = tail;
        }
    }
}

impl Clone for Stmts {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl PartialEq for Stmts {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl fmt::Debug for Stmts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl FromIterator<Stmt> for Stmts {
    fn from_iter<I: IntoIterator<Item = Stmt>>(iter: I) -> Self {
        let stmts: Vec<Stmt> = iter.into_iter().collect();
        stmts
            .into_iter()
            .rev()
            .fold(Stmts::Empty, |rest, stmt| Stmts::cons(stmt, rest))
    }
}

impl<'a> IntoIterator for &'a Stmts {
    type Item = &'a Stmt;
    type IntoIter = StmtsIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over a [`Stmts`] list.
#[derive(Debug, Clone)]
pub struct StmtsIter<'a> {
    next: &'a Stmts,
}

impl<'a> Iterator for StmtsIter<'a> {
    type Item = &'a Stmt;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next {
            Stmts::Empty => None,
            Stmts::Cons(stmt, rest) => {
                self.next = rest;
                Some(stmt)
            }
        }
    }
}

/// A single statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `Int x;`, `Float x;`, `Str x;` or `Bool x;`
    ScalarDecl {
        type_keyword: String,
        name: Variable,
    },
    /// `Matrix m[rows, cols] r, c = fill;`
    ///
    /// `fill` is evaluated once per cell with `row_var` and `col_var` bound
    /// to the cell's indices.
    MatrixDeclSized {
        name: Variable,
        rows: Expr,
        cols: Expr,
        row_var: Variable,
        col_var: Variable,
        fill: Expr,
    },
    /// `Matrix m = source;`
    MatrixDeclFromExpr { name: Variable, source: Expr },
    /// `{ stmts }`
    Block(Stmts),
    /// `if (cond) then_stmt`
    If { cond: Expr, then_stmt: Box<Stmt> },
    /// `if (cond) then_stmt else else_stmt`
    IfElse {
        cond: Expr,
        then_stmt: Box<Stmt>,
        else_stmt: Box<Stmt>,
    },
    /// `x = value;`
    ScalarAssign { name: Variable, value: Expr },
    /// `m[row, col] = value;`
    MatrixAssign {
        name: Variable,
        row: Expr,
        col: Expr,
        value: Expr,
    },
    /// `print(value);`
    Print(Expr),
    /// `for (var = start : end) body`, inclusive on both ends.
    For {
        var: Variable,
        start: Expr,
        end: Expr,
        body: Box<Stmt>,
    },
    /// `while (cond) body`
    While { cond: Expr, body: Box<Stmt> },
    /// The empty statement `;`.
    Skip,
}

/// An expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Variable(Variable),
    /// Integer, float, string or boolean literal, kept as its source text.
    Constant(String),
    BinaryOp {
        left: Box<Expr>,
        op: String,
        right: Box<Expr>,
    },
    /// `m[row, col]`
    MatrixRef {
        name: Variable,
        row: Box<Expr>,
        col: Box<Expr>,
    },
    /// `f(arg)`
    Call { name: Variable, arg: Box<Expr> },
    Parenthesized(Box<Expr>),
    /// `let stmts in result end`
    Let { stmts: Stmts, result: Box<Expr> },
    /// `if cond then then_expr else else_expr`
    IfThenElse {
        cond: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },
    Not(Box<Expr>),
}

impl Expr {
    /// Shorthand for [`Expr::Variable`].
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Variable(Variable::new(name))
    }

    /// Shorthand for [`Expr::Constant`].
    pub fn constant(text: impl Into<String>) -> Self {
        Expr::Constant(text.into())
    }

    /// Shorthand for [`Expr::BinaryOp`].
    pub fn binary(left: Expr, op: impl Into<String>, right: Expr) -> Self {
        Expr::BinaryOp {
            left: Box::new(left),
            op: op.into(),
            right: Box::new(right),
        }
    }

    /// Shorthand for [`Expr::Parenthesized`].
    pub fn parens(inner: Expr) -> Self {
        Expr::Parenthesized(Box::new(inner))
    }

    /// Shorthand for [`Expr::Not`].
    pub fn not(inner: Expr) -> Self {
        Expr::Not(Box::new(inner))
    }
}
