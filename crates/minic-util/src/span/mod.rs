//! Source location tracking.
//!
//! A [`Span`] is a half-open byte range `[start, end)` into a single source
//! file. Unlike a line/column pair, a byte range survives comment-stripping
//! and whitespace-skipping without any bookkeeping beyond "where did this
//! token start and end" — which is all the lexer and parser ever need to
//! answer a diagnostic.

mod source_map;

pub use source_map::{SourceFile, SourceMap};

/// A byte-offset range into one source file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// A zero-width span at a single offset, used for EOF and synthetic nodes.
    #[inline]
    pub fn point(at: usize) -> Self {
        Self { start: at, end: at }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// The smallest span covering both `self` and `other`.
    #[inline]
    pub fn to(&self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}
