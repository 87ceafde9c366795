//! Parser error type.

use minic_lex::TokenKind;
use minic_util::Span;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("expected {expected}, found {found:?}")]
    UnexpectedToken { expected: &'static str, found: TokenKind, span: Span },

    #[error("unclosed '{open}', expected '{close}'")]
    Unbalanced { open: &'static str, close: &'static str, span: Span },

    #[error("malformed variable declaration")]
    MalformedVarDec { span: Span },

    #[error("malformed function declaration")]
    MalformedFuncDec { span: Span },

    #[error("lexical error: {0}")]
    Lex(#[from] minic_lex::LexError),
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::Unbalanced { span, .. }
            | ParseError::MalformedVarDec { span }
            | ParseError::MalformedFuncDec { span } => *span,
            ParseError::Lex(e) => e.span(),
        }
    }
}
