//! The text cursor: a scan position over the source with line/column tracking.

use crate::char_codes::{is_new_line, CARRIAGE_RETURN, LINE_FEED};
use crate::error::{LexError, LexErrorKind};
use snek_core::text::Position;

/// A forward-only cursor over source text.
///
/// `advance` is the only way to consume a character, and it folds `\r\n`,
/// `\r` and `\n` into a single `\n` while keeping `position` in step.
#[derive(Debug, Clone)]
pub struct Cursor<'src> {
    source: &'src str,
    /// Byte offset of the next unconsumed character.
    offset: usize,
    position: Position,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            offset: 0,
            position: Position::default(),
        }
    }

    /// The line/column of the next unconsumed character.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Byte offset of the next unconsumed character.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Whether all input has been consumed.
    #[inline]
    pub fn eof(&self) -> bool {
        self.offset >= self.source.len()
    }

    /// The character at the scan position, without consuming it.
    #[inline]
    pub fn current(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Whether the character `offset` characters ahead is `expected`.
    #[inline]
    pub fn peek(&self, expected: char, offset: usize) -> bool {
        self.rest().chars().nth(offset) == Some(expected)
    }

    /// Consume the current character if it is `expected`.
    pub fn peek_read(&mut self, expected: char) -> bool {
        if self.current() != Some(expected) {
            return false;
        }
        self.bump(expected);
        true
    }

    /// Consume a line break in any of its forms.
    pub fn read_new_line(&mut self) -> bool {
        match self.current() {
            Some(ch) if is_new_line(ch) => {
                self.bump(ch);
                true
            }
            _ => false,
        }
    }

    /// Consume and return one character, with line breaks normalized to `\n`.
    pub fn advance(&mut self) -> Result<char, LexError> {
        match self.current() {
            Some(ch) => Ok(self.bump(ch)),
            None => Err(LexError::new(
                LexErrorKind::UnexpectedEndOfInput,
                self.position,
            )),
        }
    }

    /// Discard everything up to and including the next line break, or up to
    /// the end of input if there is none.
    pub fn skip_line(&mut self) {
        let rest = self.rest();
        let len = memchr::memchr2(b'\n', b'\r', rest.as_bytes()).unwrap_or(rest.len());
        let columns = rest[..len].chars().count() as u32;
        self.offset += len;
        self.position.column += columns;
        self.read_new_line();
    }

    /// The source text consumed since byte offset `start`.
    #[inline]
    pub fn slice_from(&self, start: usize) -> &'src str {
        &self.source[start..self.offset]
    }

    #[inline]
    fn rest(&self) -> &'src str {
        &self.source[self.offset..]
    }

    /// Consume `ch`, which must be the current character.
    fn bump(&mut self, ch: char) -> char {
        self.offset += ch.len_utf8();
        if is_new_line(ch) {
            if ch == CARRIAGE_RETURN && self.rest().starts_with(LINE_FEED) {
                self.offset += 1;
            }
            self.position.next_line();
            LINE_FEED
        } else {
            self.position.next_column();
            ch
        }
    }
}
