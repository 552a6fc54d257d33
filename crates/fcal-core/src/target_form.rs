//! Lowering of FCAL trees to C++.
//!
//! The generated code depends on an external `Matrix` runtime type offering
//! `Matrix(rows, cols)`, `float *access(row, col)`, the static factory
//! `Matrix::readMatrix(path)` and an `operator<<` for output streams.
//!
//! Constructs without a direct C++ counterpart are desugared:
//! - sized matrix declarations become an allocation plus a row-major
//!   double loop assigning every cell,
//! - `let ... in ... end` becomes a GNU statement expression `({ ...; })`,
//! - `if ... then ... else ...` becomes a conditional `?:` expression.

use log::trace;
use serde::Deserialize;
use thiserror::Error;

use crate::ast::{Expr, Program, Stmt, Stmts};

/// Identifier that turns a call `f(data)` into the method call `data.f()`.
pub const RUNTIME_HANDLE: &str = "data";

/// Lowering defects.
///
/// These indicate a tree that the parser should never have produced, not a
/// problem with user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LowerError {
    #[error("internal error: unsupported scalar type `{0}` reached lowering")]
    UnsupportedScalarType(String),
}

/// Result type for lowering.
pub type Result<T> = std::result::Result<T, LowerError>;

/// Scalar types of FCAL and their C++ spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Int,
    Float,
    Str,
    Bool,
}

impl ScalarType {
    /// Look up a scalar type by its FCAL keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "Int" => Some(ScalarType::Int),
            "Float" => Some(ScalarType::Float),
            "Str" => Some(ScalarType::Str),
            "Bool" => Some(ScalarType::Bool),
            _ => None,
        }
    }

    /// The FCAL keyword for this type.
    pub fn keyword(&self) -> &'static str {
        match self {
            ScalarType::Int => "Int",
            ScalarType::Float => "Float",
            ScalarType::Str => "Str",
            ScalarType::Bool => "Bool",
        }
    }

    /// The C++ type name for this type.
    pub fn host_type(&self) -> &'static str {
        match self {
            ScalarType::Int => "int",
            ScalarType::Float => "float",
            ScalarType::Str => "string",
            ScalarType::Bool => "bool",
        }
    }
}

/// Options for the program-level wrapper emitted around the lowered body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TargetOptions {
    /// Header declaring the `Matrix` runtime type.
    runtime_header: String,

    /// Emit the `#include` lines and `using namespace std;`.
    include_preamble: bool,
}

impl Default for TargetOptions {
    fn default() -> Self {
        Self {
            runtime_header: "Matrix.h".to_string(),
            include_preamble: true,
        }
    }
}

impl TargetOptions {
    /// Create options with the given runtime header and preamble switch.
    pub fn new(runtime_header: impl Into<String>, include_preamble: bool) -> Self {
        Self {
            runtime_header: runtime_header.into(),
            include_preamble,
        }
    }

    /// Returns the header declaring the `Matrix` runtime type.
    pub fn runtime_header(&self) -> &str {
        &self.runtime_header
    }

    /// Returns whether the preamble is emitted.
    pub fn include_preamble(&self) -> bool {
        self.include_preamble
    }

    fn preamble(&self) -> String {
        if !self.include_preamble {
            return String::new();
        }
        format!(
            "#include <iostream>\n#include \"{}\"\n#include <math.h>\nusing namespace std;\n\n",
            self.runtime_header
        )
    }
}

impl Program {
    /// Lower the program to C++ using the default [`TargetOptions`].
    pub fn to_target(&self) -> Result<String> {
        self.to_target_with(&TargetOptions::default())
    }

    /// Lower the program to C++.
    pub fn to_target_with(&self, options: &TargetOptions) -> Result<String> {
        let mut out = options.preamble();
        out.push_str(self.name().name());
        out.push_str(" () {\n");
        self.body().write_target(&mut out)?;
        out.push_str("}\n");

        trace!(program = self.name().name(), bytes = out.len(); "Lowered program");
        Ok(out)
    }
}

impl Stmts {
    /// Lower the statements to C++.
    pub fn to_target(&self) -> Result<String> {
        let mut out = String::new();
        self.write_target(&mut out)?;
        Ok(out)
    }

    pub(crate) fn write_target(&self, out: &mut String) -> Result<()> {
        for stmt in self {
            stmt.write_target(out)?;
        }
        Ok(())
    }
}

impl Stmt {
    /// Lower the statement to C++.
    pub fn to_target(&self) -> Result<String> {
        let mut out = String::new();
        self.write_target(&mut out)?;
        Ok(out)
    }

    pub(crate) fn write_target(&self, out: &mut String) -> Result<()> {
        match self {
            Stmt::ScalarDecl { type_keyword, name } => {
                let scalar = ScalarType::from_keyword(type_keyword)
                    .ok_or_else(|| LowerError::UnsupportedScalarType(type_keyword.clone()))?;
                out.push_str(scalar.host_type());
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
                let (m, r, c) = (name.name(), row_var.name(), col_var.name());
                let rows = rows.to_target()?;
                let cols = cols.to_target()?;
                let fill = fill.to_target()?;
                out.push_str(&format!("Matrix {m}({rows},{cols});\n"));
                out.push_str(&format!("for (int {r} = 0; {r} < {rows}; {r}++ ) {{\n"));
                out.push_str(&format!("\tfor (int {c} = 0; {c} < {cols}; {c}++ ) {{\n"));
                out.push_str(&format!("\t\t*({m}.access({r}, {c})) = {fill};\n"));
                out.push_str("\t}\n");
                out.push_str("}\n");
            }
            Stmt::MatrixDeclFromExpr { name, source } => {
                out.push_str("Matrix ");
                out.push_str(name.name());
                out.push_str(" = Matrix::");
                source.write_target(out)?;
                out.push_str(";\n");
            }
            Stmt::Block(stmts) => {
                out.push_str("{\n");
                stmts.write_target(out)?;
                out.push('}');
            }
            Stmt::If { cond, then_stmt } => {
                out.push_str("if ( ");
                cond.write_target(out)?;
                out.push_str(" ) ");
                then_stmt.write_target(out)?;
            }
            Stmt::IfElse {
                cond,
                then_stmt,
                else_stmt,
            } => {
                out.push_str("if (");
                cond.write_target(out)?;
                out.push_str(") ");
                then_stmt.write_target(out)?;
                out.push_str(" else ");
                else_stmt.write_target(out)?;
                out.push('\n');
            }
            Stmt::ScalarAssign { name, value } => {
                out.push_str(name.name());
                out.push_str(" = ");
                value.write_target(out)?;
                out.push_str(";\n");
            }
            Stmt::MatrixAssign {
                name,
                row,
                col,
                value,
            } => {
                write_access(out, name.name(), row, col, ", ")?;
                out.push_str(" = ");
                value.write_target(out)?;
                out.push_str(";\n");
            }
            Stmt::Print(value) => {
                out.push_str("cout << ");
                value.write_target(out)?;
                out.push_str(";\n");
            }
            Stmt::For {
                var,
                start,
                end,
                body,
            } => {
                // The FCAL range includes its upper bound.
                let i = var.name();
                out.push_str(&format!("for({i}="));
                start.write_target(out)?;
                out.push_str(&format!("; {i} <= "));
                end.write_target(out)?;
                out.push_str(&format!("; {i} ++)"));
                body.write_target(out)?;
                out.push('\n');
            }
            Stmt::While { cond, body } => {
                out.push_str("while(");
                cond.write_target(out)?;
                out.push(')');
                body.write_target(out)?;
                out.push('\n');
            }
            Stmt::Skip => out.push_str(";\n"),
        }
        Ok(())
    }
}

impl Expr {
    /// Lower the expression to C++.
    pub fn to_target(&self) -> Result<String> {
        let mut out = String::new();
        self.write_target(&mut out)?;
        Ok(out)
    }

    /// Returns `true` if this expression lowers to exactly the runtime
    /// handle identifier, which turns an enclosing call into a method call.
    pub fn is_runtime_handle(&self) -> Result<bool> {
        Ok(self.to_target()? == RUNTIME_HANDLE)
    }

    pub(crate) fn write_target(&self, out: &mut String) -> Result<()> {
        match self {
            Expr::Variable(var) => out.push_str(var.name()),
            Expr::Constant(text) => out.push_str(text),
            Expr::BinaryOp { left, op, right } => {
                left.write_target(out)?;
                out.push(' ');
                out.push_str(op);
                out.push(' ');
                right.write_target(out)?;
            }
            Expr::MatrixRef { name, row, col } => {
                write_access(out, name.name(), row, col, ",")?;
            }
            Expr::Call { name, arg } => {
                let arg = arg.to_target()?;
                if arg == RUNTIME_HANDLE {
                    out.push_str(&format!("{arg}.{name}()"));
                } else {
                    out.push_str(&format!("{name}({arg})"));
                }
            }
            Expr::Parenthesized(inner) => {
                out.push('(');
                inner.write_target(out)?;
                out.push(')');
            }
            Expr::Let { stmts, result } => {
                out.push_str("({ ");
                stmts.write_target(out)?;
                result.write_target(out)?;
                out.push_str(";\n})");
            }
            // `?:` binds looser than every C++ binary operator, so the
            // conditional is wrapped to stay a single operand.
            Expr::IfThenElse {
                cond,
                then_expr,
                else_expr,
            } => {
                out.push_str("((");
                cond.write_target(out)?;
                out.push_str(") ? ");
                then_expr.write_target(out)?;
                out.push_str(" : ");
                else_expr.write_target(out)?;
                out.push(')');
            }
            // `!` takes its whole operand, while C++ `!` binds tightest.
            Expr::Not(inner) => {
                out.push('!');
                if matches!(**inner, Expr::BinaryOp { .. }) {
                    out.push('(');
                    inner.write_target(out)?;
                    out.push(')');
                } else {
                    inner.write_target(out)?;
                }
            }
        }
        Ok(())
    }
}

/// Write `*(m.access(row<sep>col))`, the single addressing form used for
/// both reads and writes of a matrix cell.
fn write_access(out: &mut String, matrix: &str, row: &Expr, col: &Expr, sep: &str) -> Result<()> {
    out.push_str("*(");
    out.push_str(matrix);
    out.push_str(".access(");
    row.write_target(out)?;
    out.push_str(sep);
    col.write_target(out)?;
    out.push_str("))");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Variable;

    fn decl(keyword: &str, name: &str) -> Stmt {
        Stmt::ScalarDecl {
            type_keyword: keyword.to_string(),
            name: Variable::new(name),
        }
    }

    #[test]
    fn test_scalar_type_table() {
        for (keyword, host) in [
            ("Int", "int"),
            ("Float", "float"),
            ("Str", "string"),
            ("Bool", "bool"),
        ] {
            assert_eq!(decl(keyword, "v").to_target().unwrap(), format!("{host} v;\n"));
            let scalar = ScalarType::from_keyword(keyword).unwrap();
            assert_eq!(scalar.keyword(), keyword);
        }
    }

    #[test]
    fn test_unsupported_scalar_type_is_internal_error() {
        let err = decl("Matrix", "v").to_target().unwrap_err();
        assert_eq!(err, LowerError::UnsupportedScalarType("Matrix".to_string()));
        assert!(err.to_string().starts_with("internal error"));
    }

    #[test]
    fn test_program_preamble() {
        let program = Program::new(Variable::new("main"), Stmts::Empty);

        assert_eq!(
            program.to_target().unwrap(),
            "#include <iostream>\n#include \"Matrix.h\"\n#include <math.h>\nusing namespace std;\n\nmain () {\n}\n"
        );
    }

    #[test]
    fn test_program_without_preamble() {
        let program = Program::new(Variable::new("main"), Stmts::Empty);
        let options = TargetOptions::new("Matrix.h", false);

        assert_eq!(program.to_target_with(&options).unwrap(), "main () {\n}\n");
    }

    #[test]
    fn test_custom_runtime_header() {
        let program = Program::new(Variable::new("main"), Stmts::Empty);
        let options = TargetOptions::new("runtime/matrix.hpp", true);

        let code = program.to_target_with(&options).unwrap();
        assert!(code.contains("#include \"runtime/matrix.hpp\"\n"));
        assert_eq!(options.runtime_header(), "runtime/matrix.hpp");
        assert!(options.include_preamble());
    }

    #[test]
    fn test_sized_matrix_lowers_to_double_loop() {
        let stmt = Stmt::MatrixDeclSized {
            name: Variable::new("m"),
            rows: Expr::constant("2"),
            cols: Expr::constant("2"),
            row_var: Variable::new("r"),
            col_var: Variable::new("c"),
            fill: Expr::binary(Expr::var("r"), "+", Expr::var("c")),
        };

        assert_eq!(
            stmt.to_target().unwrap(),
            "Matrix m(2,2);\n\
             for (int r = 0; r < 2; r++ ) {\n\
             \tfor (int c = 0; c < 2; c++ ) {\n\
             \t\t*(m.access(r, c)) = r + c;\n\
             \t}\n\
             }\n"
        );
    }

    #[test]
    fn test_matrix_from_expression() {
        let stmt = Stmt::MatrixDeclFromExpr {
            name: Variable::new("m"),
            source: Expr::Call {
                name: Variable::new("readMatrix"),
                arg: Box::new(Expr::constant("\"m.data\"")),
            },
        };

        assert_eq!(
            stmt.to_target().unwrap(),
            "Matrix m = Matrix::readMatrix(\"m.data\");\n"
        );
    }

    #[test]
    fn test_for_loop_upper_bound_is_inclusive() {
        let stmt = Stmt::For {
            var: Variable::new("i"),
            start: Expr::constant("1"),
            end: Expr::constant("3"),
            body: Box::new(Stmt::Print(Expr::var("i"))),
        };

        assert_eq!(
            stmt.to_target().unwrap(),
            "for(i=1; i <= 3; i ++)cout << i;\n\n"
        );
    }

    #[test]
    fn test_matrix_read_and_write_share_addressing() {
        let stmt = Stmt::MatrixAssign {
            name: Variable::new("a"),
            row: Expr::var("i"),
            col: Expr::var("j"),
            value: Expr::MatrixRef {
                name: Variable::new("b"),
                row: Box::new(Expr::var("j")),
                col: Box::new(Expr::var("i")),
            },
        };

        assert_eq!(
            stmt.to_target().unwrap(),
            "*(a.access(i, j)) = *(b.access(j,i));\n"
        );
    }

    #[test]
    fn test_call_on_runtime_handle_becomes_method_call() {
        let call = |arg: Expr| Expr::Call {
            name: Variable::new("numRows"),
            arg: Box::new(arg),
        };

        assert_eq!(call(Expr::var("data")).to_target().unwrap(), "data.numRows()");
        assert_eq!(call(Expr::var("m")).to_target().unwrap(), "numRows(m)");
        // The trigger is the lowered text, so a parenthesized handle does not count.
        assert_eq!(
            call(Expr::parens(Expr::var("data"))).to_target().unwrap(),
            "numRows((data))"
        );
        assert!(Expr::var("data").is_runtime_handle().unwrap());
        assert!(!Expr::var("m").is_runtime_handle().unwrap());
    }

    #[test]
    fn test_let_lowers_to_statement_expression() {
        let expr = Expr::Let {
            stmts: Stmts::cons(decl("Int", "x"), Stmts::Empty),
            result: Box::new(Expr::var("x")),
        };

        assert_eq!(expr.to_target().unwrap(), "({ int x;\nx;\n})");
    }

    #[test]
    fn test_if_then_else_lowers_to_conditional() {
        let expr = Expr::IfThenElse {
            cond: Box::new(Expr::binary(Expr::var("a"), ">", Expr::var("b"))),
            then_expr: Box::new(Expr::var("a")),
            else_expr: Box::new(Expr::var("b")),
        };

        assert_eq!(expr.to_target().unwrap(), "((a > b) ? a : b)");
    }

    #[test]
    fn test_not_wraps_binary_operand() {
        let expr = Expr::not(Expr::binary(Expr::var("a"), "&&", Expr::var("b")));
        assert_eq!(expr.to_target().unwrap(), "!(a && b)");
        assert_eq!(Expr::not(Expr::var("a")).to_target().unwrap(), "!a");
    }

    #[test]
    fn test_statement_forms() {
        let cond = Expr::not(Expr::var("done"));
        let if_stmt = Stmt::If {
            cond: cond.clone(),
            then_stmt: Box::new(Stmt::Block(Stmts::Empty)),
        };
        let if_else = Stmt::IfElse {
            cond: cond.clone(),
            then_stmt: Box::new(Stmt::Skip),
            else_stmt: Box::new(Stmt::Skip),
        };
        let while_stmt = Stmt::While {
            cond,
            body: Box::new(Stmt::ScalarAssign {
                name: Variable::new("done"),
                value: Expr::constant("True"),
            }),
        };

        assert_eq!(if_stmt.to_target().unwrap(), "if ( !done ) {\n}");
        assert_eq!(if_else.to_target().unwrap(), "if (!done) ;\n else ;\n\n");
        assert_eq!(while_stmt.to_target().unwrap(), "while(!done)done = True;\n\n");
    }

    #[test]
    fn test_lowering_error_propagates_from_nested_statement() {
        let stmt = Stmt::Block(Stmts::cons(
            Stmt::While {
                cond: Expr::constant("True"),
                body: Box::new(decl("Double", "d")),
            },
            Stmts::Empty,
        ));

        assert!(matches!(
            stmt.to_target(),
            Err(LowerError::UnsupportedScalarType(keyword)) if keyword == "Double"
        ));
    }
}
