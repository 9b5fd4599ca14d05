//! Source position types.
//!
//! Tokens and errors carry a 1-based line/column `Position`. Columns count
//! characters, not bytes, so a multi-byte character advances the column by one.

use std::fmt;

/// A byte offset into source text.
pub type TextPos = u32;

/// A 1-based line and column in source text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// The line number, starting at 1.
    pub line: u32,
    /// The column number in characters, starting at 1.
    pub column: u32,
}

impl Position {
    /// Create a new position.
    #[inline]
    pub fn new(line: u32, column: u32) -> Self {
        debug_assert!(line >= 1 && column >= 1);
        Self { line, column }
    }

    /// Move past a newline: next line, first column.
    #[inline]
    pub fn next_line(&mut self) {
        self.line += 1;
        self.column = 1;
    }

    /// Move past any other character.
    #[inline]
    pub fn next_column(&mut self) {
        self.column += 1;
    }
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A map from line numbers to the byte offsets where those lines start.
///
/// Line breaks are `\n`, `\r\n` and a lone `\r`, matching the way the cursor
/// counts lines.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Byte offsets of the start of each line.
    line_starts: Vec<TextPos>,
}

impl LineMap {
    /// Build a line map from source text.
    pub fn new(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut line_starts = vec![0u32];
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\n' => line_starts.push((i + 1) as u32),
                b'\r' => {
                    if bytes.get(i + 1) == Some(&b'\n') {
                        i += 1;
                    }
                    line_starts.push((i + 1) as u32);
                }
                _ => {}
            }
            i += 1;
        }
        Self { line_starts }
    }

    /// Get the byte offset of the start of a 1-based line, if the line exists.
    pub fn line_start(&self, line: u32) -> Option<TextPos> {
        let index = line.checked_sub(1)?;
        self.line_starts.get(index as usize).copied()
    }

    /// Convert a position back into a byte offset in `text`.
    ///
    /// Positions past the end of a line or of the text clamp to the end.
    pub fn offset_of(&self, text: &str, pos: Position) -> usize {
        let Some(start) = self.line_start(pos.line) else {
            return text.len();
        };
        let start = start as usize;
        let skip = pos.column.saturating_sub(1) as usize;
        match text[start..].char_indices().nth(skip) {
            Some((offset, _)) => start + offset,
            None => text.len(),
        }
    }
}
