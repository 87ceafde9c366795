//! A loaded source file plus the line-start table used to turn a byte offset
//! into a human-readable line/column pair for diagnostics.

use super::Span;

/// A single loaded source file.
///
/// The driver only ever loads one of these per run (there is no
/// notion of multi-file compilation), but keeping line/column lookup here
/// rather than inline in the driver keeps that concern testable on its own.
#[derive(Clone, Debug)]
pub struct SourceFile {
    name: String,
    content: String,
    line_starts: Vec<usize>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        let line_starts = line_starts(&content);
        Self {
            name: name.into(),
            content,
            line_starts,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// 1-based (line, column) for a byte offset, clamped to the file's extent.
    pub fn line_col(&self, offset: usize) -> (u32, u32) {
        let offset = offset.min(self.content.len());
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        let line_start = self.line_starts[line_idx];
        let col = self.content[line_start..offset].chars().count() + 1;
        (line_idx as u32 + 1, col as u32)
    }

    /// The source text covered by `span`, for snippet-style diagnostics.
    pub fn snippet(&self, span: Span) -> &str {
        &self.content[span.start.min(self.content.len())..span.end.min(self.content.len())]
    }
}

fn line_starts(content: &str) -> Vec<usize> {
    let mut starts = vec![0];
    starts.extend(content.match_indices('\n').map(|(i, _)| i + 1));
    starts
}

/// A thin wrapper kept around for symmetry with a multi-file `SourceMap`; this
/// crate's driver only ever holds a single [`SourceFile`], but giving it a
/// named home here (rather than a bare `SourceFile` in the driver) leaves room
/// to grow into a real multi-file map without moving the type.
#[derive(Clone, Debug, Default)]
pub struct SourceMap {
    file: Option<SourceFile>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self { file: None }
    }

    pub fn set(&mut self, file: SourceFile) {
        self.file = Some(file);
    }

    pub fn file(&self) -> Option<&SourceFile> {
        self.file.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_col_first_line() {
        let f = SourceFile::new("t", "abc\ndef\n");
        assert_eq!(f.line_col(0), (1, 1));
        assert_eq!(f.line_col(2), (1, 3));
    }

    #[test]
    fn line_col_second_line() {
        let f = SourceFile::new("t", "abc\ndef\n");
        assert_eq!(f.line_col(4), (2, 1));
        assert_eq!(f.line_col(6), (2, 3));
    }

    #[test]
    fn snippet_extracts_span() {
        let f = SourceFile::new("t", "let x = 1;");
        let span = Span::new(4, 5);
        assert_eq!(f.snippet(span), "x");
    }
}
