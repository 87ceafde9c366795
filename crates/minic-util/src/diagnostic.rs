//! Tagged diagnostics.
//!
//! Every phase in this pipeline fails the same way: the first error
//! aborts the run and is reported as a single line,
//! prefixed with a tag naming the phase that raised it. There is no warning
//! level and no accumulation of more than one diagnostic per run — unlike a
//! compiler that keeps going to report every error it can find, this one
//! stops at the first.

use std::fmt;

use crate::span::{SourceFile, Span};

/// Which phase raised a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tag {
    Lexer,
    Parser,
    Semantic,
    CodeGen,
    Io,
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Tag::Lexer => "Lexer",
            Tag::Parser => "Parser",
            Tag::Semantic => "Semantic",
            Tag::CodeGen => "CodeGen",
            Tag::Io => "IO",
        };
        f.write_str(s)
    }
}

/// A single fatal diagnostic.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub tag: Tag,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(tag: Tag, message: impl Into<String>, span: Span) -> Self {
        Self {
            tag,
            message: message.into(),
            span,
        }
    }

    /// Render as `[Tag] message`, the wire format that reaches stderr.
    pub fn render_short(&self) -> String {
        format!("[{}] {}", self.tag, self.message)
    }

    /// Render with a `line:col` location prefix when the source file that
    /// produced the span is available. Used by `--verbose` runs; the plain
    /// `[Tag] message` form in [`render_short`](Self::render_short) is what
    /// actually reaches stderr on a normal failing run, to keep the output
    /// stable for scripts matching on it.
    pub fn render_located(&self, file: &SourceFile) -> String {
        let (line, col) = file.line_col(self.span.start);
        format!("[{}] {}:{}: {}", self.tag, line, col, self.message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_short())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_tagged_single_line() {
        let d = Diagnostic::new(Tag::Lexer, "invalid symbol '@'", Span::new(3, 4));
        assert_eq!(d.render_short(), "[Lexer] invalid symbol '@'");
    }

    #[test]
    fn renders_located_form() {
        let file = SourceFile::new("t", "let x = 1;\nlog(@);\n");
        let d = Diagnostic::new(Tag::Lexer, "invalid symbol '@'", Span::new(15, 16));
        assert_eq!(d.render_located(&file), "[Lexer] 2:5: invalid symbol '@'");
    }
}
