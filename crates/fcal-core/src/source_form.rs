//! Canonical FCAL printer.
//!
//! Regenerates concrete FCAL syntax from the tree. The output is not the
//! original text (comments and spacing are gone) but scanning and parsing it
//! again yields a structurally equal tree.
//!
//! Layout: one statement per line, single spaces around binary operators
//! and after commas, and no indentation.

use crate::ast::{Expr, Program, Stmt, Stmts};

impl Program {
    /// Print the program as canonical FCAL source.
    pub fn to_source(&self) -> String {
        let mut out = String::new();
        out.push_str(self.name().name());
        out.push_str(" () {\n");
        self.body().write_source(&mut out);
        out.push_str("}\n");
        out
    }
}

impl Stmts {
    /// Print the statements as canonical FCAL source.
    pub fn to_source(&self) -> String {
        let mut out = String::new();
        self.write_source(&mut out);
        out
    }

    pub(crate) fn write_source(&self, out: &mut String) {
        for stmt in self {
            stmt.write_source(out);
        }
    }
}

impl Stmt {
    /// Print the statement as canonical FCAL source.
    pub fn to_source(&self) -> String {
        let mut out = String::new();
        self.write_source(&mut out);
        out
    }

    pub(crate) fn write_source(&self, out: &mut String) {
        match self {
            Stmt::ScalarDecl { type_keyword, name } => {
                out.push_str(type_keyword);
                out.push(' ');
                out.push_str(name.name());
                out.push_str(";\n");
            }
            Stmt::MatrixDeclSized {
                name,
                rows,
                cols,
                row_var,
                col_var,
                fill,
            } => {
                out.push_str("Matrix ");
                out.push_str(name.name());
                out.push('[');
                rows.write_source(out);
                out.push_str(", ");
                cols.write_source(out);
                out.push_str("] ");
                out.push_str(row_var.name());
                out.push_str(", ");
                out.push_str(col_var.name());
                out.push_str(" = ");
                fill.write_source(out);
                out.push_str(";\n");
            }
            Stmt::MatrixDeclFromExpr { name, source } => {
                out.push_str("Matrix ");
                out.push_str(name.name());
                out.push_str(" = ");
                source.write_source(out);
                out.push_str(";\n");
            }
            Stmt::Block(stmts) => {
                out.push_str("{\n");
                stmts.write_source(out);
                out.push_str("}\n");
            }
            Stmt::If { cond, then_stmt } => {
                out.push_str("if (");
                cond.write_source(out);
                out.push_str(") ");
                then_stmt.write_source(out);
            }
            Stmt::IfElse {
                cond,
                then_stmt,
                else_stmt,
            } => {
                out.push_str("if (");
                cond.write_source(out);
                out.push_str(") ");
                then_stmt.write_source(out);
                out.push_str("else ");
                else_stmt.write_source(out);
            }
            Stmt::ScalarAssign { name, value } => {
                out.push_str(name.name());
                out.push_str(" = ");
                value.write_source(out);
                out.push_str(";\n");
            }
            Stmt::MatrixAssign {
                name,
                row,
                col,
                value,
            } => {
                out.push_str(name.name());
                out.push('[');
                row.write_source(out);
                out.push_str(", ");
                col.write_source(out);
                out.push_str("] = ");
                value.write_source(out);
                out.push_str(";\n");
            }
            Stmt::Print(value) => {
                out.push_str("print(");
                value.write_source(out);
                out.push_str(");\n");
            }
            Stmt::For {
                var,
                start,
                end,
                body,
            } => {
                out.push_str("for (");
                out.push_str(var.name());
                out.push_str(" = ");
                start.write_source(out);
                out.push_str(" : ");
                end.write_source(out);
                out.push_str(") ");
                body.write_source(out);
            }
            Stmt::While { cond, body } => {
                out.push_str("while (");
                cond.write_source(out);
                out.push_str(") ");
                body.write_source(out);
            }
            Stmt::Skip => out.push_str(";\n"),
        }
    }
}

impl Expr {
    /// Print the expression as canonical FCAL source.
    pub fn to_source(&self) -> String {
        let mut out = String::new();
        self.write_source(&mut out);
        out
    }

    pub(crate) fn write_source(&self, out: &mut String) {
        match self {
            Expr::Variable(var) => out.push_str(var.name()),
            Expr::Constant(text) => out.push_str(text),
            Expr::BinaryOp { left, op, right } => {
                left.write_source(out);
                out.push(' ');
                out.push_str(op);
                out.push(' ');
                right.write_source(out);
            }
            Expr::MatrixRef { name, row, col } => {
                out.push_str(name.name());
                out.push('[');
                row.write_source(out);
                out.push_str(", ");
                col.write_source(out);
                out.push(']');
            }
            Expr::Call { name, arg } => {
                out.push_str(name.name());
                out.push('(');
                arg.write_source(out);
                out.push(')');
            }
            Expr::Parenthesized(inner) => {
                out.push('(');
                inner.write_source(out);
                out.push(')');
            }
            Expr::Let { stmts, result } => {
                out.push_str("let ");
                stmts.write_source(out);
                out.push_str("in ");
                result.write_source(out);
                out.push_str(" end");
            }
            Expr::IfThenElse {
                cond,
                then_expr,
                else_expr,
            } => {
                out.push_str("if ");
                cond.write_source(out);
                out.push_str(" then ");
                then_expr.write_source(out);
                out.push_str(" else ");
                else_expr.write_source(out);
            }
            Expr::Not(inner) => {
                out.push('!');
                inner.write_source(out);
            }
        }
    }
}
