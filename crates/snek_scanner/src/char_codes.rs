//! Character code constants and character-class predicates used by the lexer.

pub const LINE_FEED: char = '\n';
pub const CARRIAGE_RETURN: char = '\r';
pub const SPACE: char = ' ';
pub const TAB: char = '\t';
pub const HASH: char = '#';
pub const DOUBLE_QUOTE: char = '"';
pub const SINGLE_QUOTE: char = '\'';
pub const BACKSLASH: char = '\\';
pub const DOT: char = '.';
pub const UNDERSCORE: char = '_';

/// Check if a character can start an identifier. ASCII only.
#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
}

/// Check if a character can continue an identifier. ASCII only.
#[inline]
pub fn is_identifier_part(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
}

/// Check if a character is a line terminator.
#[inline]
pub fn is_new_line(ch: char) -> bool {
    ch == LINE_FEED || ch == CARRIAGE_RETURN
}

/// Check if a character may continue a run of digits: a digit or `_`.
#[inline]
pub fn is_num_part(ch: char) -> bool {
    ch.is_ascii_digit() || ch == UNDERSCORE
}

/// Check if a character is a decimal digit.
#[inline]
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

/// Check if a character is whitespace (not line break) between tokens.
#[inline]
pub fn is_white_space_single_line(ch: char) -> bool {
    !is_new_line(ch) && ch.is_whitespace()
}
