//! Line/column lookup for byte offsets
//!
//! The engine only threads byte offsets; lines and columns are computed on
//! demand when an error is rendered for a human.

use std::fmt;

/// A position in header text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    /// Byte offset from start of text
    pub offset: usize,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based, counted in chars)
    pub column: usize,
}

impl SourcePosition {
    /// Calculate the position of `offset` in `text`
    ///
    /// Offsets past the end are clamped to the text length.
    pub fn from_offset(text: &str, offset: usize) -> Self {
        let offset = offset.min(text.len());
        let mut line = 1;
        let mut column = 1;

        for (i, ch) in text.char_indices() {
            if i >= offset {
                break;
            }
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }

        Self {
            offset,
            line,
            column,
        }
    }

    /// Render the line containing this position with a caret under it
    pub fn render_pointer(&self, text: &str) -> String {
        let line = line_at_offset(text, self.offset);
        let mut out = String::with_capacity(line.len() * 2 + 2);
        out.push_str(line);
        out.push('\n');
        for _ in 1..self.column {
            out.push(' ');
        }
        out.push('^');
        out
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Get the line content at a given offset
pub fn line_at_offset(text: &str, offset: usize) -> &str {
    let offset = offset.min(text.len());
    let bytes = text.as_bytes();

    let line_start = memchr::memrchr(b'\n', &bytes[..offset]).map_or(0, |p| p + 1);
    let line_end = memchr::memchr(b'\n', &bytes[offset..]).map_or(text.len(), |p| offset + p);

    &text[line_start..line_end]
}
