//! Lexical analysis: turns source text into a stream of tokens.
//!
//! The lexer is a single-pass, greedy-longest-match scanner with no lexer
//! generator and no lookahead beyond three characters (for `===`/`!==`).
//! It never buffers the whole token stream; callers pull tokens one at a
//! time through [`Lexer::advance`] and [`Lexer::current`].

mod cursor;
#[cfg(test)]
mod edge_cases;
mod error;
mod lexer;
mod token;

pub use error::LexError;
pub use lexer::Lexer;
pub use token::{Token, TokenKind, TokenValue, TypeName};
