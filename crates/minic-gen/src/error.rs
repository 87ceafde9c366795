//! Code generator error type.
//!
//! The generator reuses [`minic_interp::Scopes`] to assign each variable its
//! stack `shift`, so a scope-chain failure can in
//! principle surface here too — most commonly when `--gen-only` runs the
//! generator over a program that was never interpreted and so never had its
//! declarations validated. Everything else is a construct the generator
//! simply has no opcode sequence for: strings, functions, `return`, and
//! calls.

use minic_util::Tag;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CodeGenError {
    #[error("{construct} is not supported by the code generator")]
    Unsupported { construct: &'static str },

    #[error("{0}")]
    Scope(#[from] minic_interp::InterpError),
}

impl CodeGenError {
    /// Which diagnostic tag this failure should be reported under. A scope
    /// failure is a semantic mistake that simply wasn't caught earlier (the
    /// interpreter pass was skipped); an unsupported construct is squarely
    /// the code generator's own limitation.
    pub fn tag(&self) -> Tag {
        match self {
            CodeGenError::Unsupported { .. } => Tag::CodeGen,
            CodeGenError::Scope(_) => Tag::Semantic,
        }
    }
}

pub type Result<T> = std::result::Result<T, CodeGenError>;
