//! FCAL Core Types and Traversals
//!
//! This crate provides the abstract syntax tree of the FCAL matrix language
//! and the two traversals every node supports:
//!
//! - **AST**: programs, statement sequences, statements and expressions
//!   ([`ast`] module)
//! - **Source form**: canonical FCAL printer ([`source_form`] module)
//! - **Target form**: lowering to C++ against the `Matrix` runtime
//!   ([`target_form`] module)

pub mod ast;
pub mod source_form;
pub mod target_form;

pub use ast::{Expr, Program, Stmt, Stmts, Variable};
pub use target_form::{LowerError, RUNTIME_HANDLE, ScalarType, TargetOptions};
