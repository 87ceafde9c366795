//! minic-util - shared foundation types for the minic pipeline.
//!
//! Every other crate in this workspace (`minic-lex`, `minic-par`,
//! `minic-interp`, `minic-gen`, `minic-drv`) depends on this one for three
//! things: byte-offset [`span::Span`]s, interned [`symbol::Symbol`]s, and
//! the tagged [`diagnostic::Diagnostic`] format every phase reports failures
//! through. None of it is specific to this language; it is the same small
//! foundation layer a front end reaches for regardless of what it parses.

pub mod diagnostic;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, Tag};
pub use span::{SourceFile, SourceMap, Span};
pub use symbol::{Interner, Symbol};
