//! Byte offset to line/column conversion.
//!
//! Built once per loaded source file and consulted whenever the build context
//! or writer needs to report a human-facing location for a byte offset.

use text_size::TextSize;

use super::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

/// Maps byte offsets in a source file to (line, column) pairs.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset of the start of each line; `line_starts[0] == 0`.
    line_starts: Vec<u32>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0u32];
        for (offset, ch) in text.char_indices() {
            if ch == '\n' {
                line_starts.push(offset as u32 + 1);
            }
        }
        Self { line_starts }
    }

    /// Convert a byte offset into a 0-indexed (line, column) pair.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let offset: u32 = offset.into();
        let line = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };
        let col = offset - self.line_starts[line];
        LineCol {
            line: line as u32,
            col,
        }
    }

    /// Convert a byte offset into a [`Position`].
    pub fn position(&self, offset: u32) -> Position {
        let lc = self.line_col(TextSize::from(offset));
        Position::new(lc.line, lc.col)
    }
}
