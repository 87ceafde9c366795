//! Lexer error type.

use minic_util::Span;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unterminated string literal")]
    UnterminatedString { span: Span },

    #[error("invalid escape '\\{ch}' in string literal")]
    InvalidEscape { ch: char, span: Span },

    #[error("unterminated escape sequence at end of string literal")]
    UnterminatedEscape { span: Span },

    #[error("invalid identifier: cannot start with '_'")]
    LeadingUnderscore { span: Span },

    #[error("invalid symbol '{ch}'")]
    InvalidSymbol { ch: char, span: Span },

    #[error("integer literal '{text}' out of range for a 32-bit signed integer")]
    IntOverflow { text: String, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnterminatedString { span }
            | LexError::InvalidEscape { span, .. }
            | LexError::UnterminatedEscape { span }
            | LexError::LeadingUnderscore { span }
            | LexError::InvalidSymbol { span, .. }
            | LexError::IntOverflow { span, .. } => *span,
        }
    }
}
