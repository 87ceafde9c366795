//! Interpreter (semantic) error type. Every variant here is reported with
//! the `[Semantic]` tag — type errors, scope violations,
//! and arity/arity-adjacent mistakes caught during evaluation rather than
//! during parsing. Names are resolved to their source text at the point
//! an error is raised (the interner is always in scope there), so the
//! error itself can stay a plain owned `String` with no lifetime.

use minic_lex::TypeName;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum InterpError {
    #[error("identifier '{name}' not declared")]
    Undeclared { name: String },

    #[error("identifier '{name}' already declared in this scope")]
    Redeclared { name: String },

    #[error("'{name}' names a function, not a value")]
    NotAValue { name: String },

    #[error("call to '{name}' has no return value (void) and cannot be used as an expression")]
    VoidValueUsed { name: String },

    #[error("type mismatch in {context}: expected {expected}, found {found}")]
    TypeMismatch { context: &'static str, expected: TypeName, found: TypeName },

    #[error("operator '{op}' requires {expected}, found {lhs} {op} {rhs}")]
    OperatorTypeMismatch { op: &'static str, expected: &'static str, lhs: TypeName, rhs: TypeName },

    #[error("relational operator '{op}' requires number/number or string/string, found {lhs} {op} {rhs}")]
    RelationalTypeMismatch { op: &'static str, lhs: TypeName, rhs: TypeName },

    #[error("strict comparison '{op}' between different types {lhs} and {rhs}")]
    StrictCompareTypeMismatch { op: &'static str, lhs: TypeName, rhs: TypeName },

    #[error("variable '{name}' cannot have type void")]
    VoidVariable { name: String },

    #[error("assignment to function '{name}' is not allowed")]
    AssignToFunction { name: String },

    #[error("'{name}' is not a function")]
    NotAFunction { name: String },

    #[error("call to '{name}' passed {found} argument(s), expected {expected}")]
    ArityMismatch { name: String, expected: usize, found: usize },

    #[error("function '{name}' ({return_type}) did not return a value")]
    MissingReturn { name: String, return_type: TypeName },

    #[error("return value of '{name}' has type {found}, expected {expected}")]
    ReturnTypeMismatch { name: String, expected: TypeName, found: TypeName },

    #[error("division by zero")]
    DivisionByZero,

    #[error("modulo by zero")]
    ModuloByZero,

    #[error("readline expected an integer, found {text:?}")]
    ReadNotAnInteger { text: String },

    #[error("reading from standard input failed: {0}")]
    ReadIo(String),
}
