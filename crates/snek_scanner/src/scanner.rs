//! The snek lexer.
//!
//! Source text is consumed one physical line at a time. Each line first has
//! its leading indentation measured and compared against the indent stack,
//! which produces `Indent`/`Dedent` tokens, and then the rest of the line is
//! scanned token by token. Scanning is single pass and stops at the first
//! fault.

use crate::char_codes::*;
use crate::cursor::Cursor;
use crate::error::{LexError, LexErrorKind};
use crate::indent::IndentStack;
use crate::token::{Keyword, Token, TokenKind};
use snek_core::text::Position;
use snek_options::LexerOptions;
use tracing::{debug, trace};

/// Converts snek source text into tokens.
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    indents: IndentStack,
    tokens: Vec<Token>,
    /// Unmatched `(`, `[` and `{`. Carried across physical lines.
    bracket_depth: u32,
    tab_width: u32,
}

impl<'src> Lexer<'src> {
    /// Create a lexer using the default options.
    pub fn new(source: &'src str) -> Self {
        Self::with_options(source, &LexerOptions::default())
    }

    /// Create a lexer with explicit options.
    pub fn with_options(source: &'src str, options: &LexerOptions) -> Self {
        Self {
            cursor: Cursor::new(source),
            indents: IndentStack::new(),
            tokens: Vec::new(),
            bracket_depth: 0,
            tab_width: options.tab_width,
        }
    }

    /// The tokens scanned so far. After a failed `run`, these are the tokens
    /// that preceded the fault.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Scan the whole input, then close any indentation levels still open.
    pub fn run(&mut self) -> Result<(), LexError> {
        while !self.cursor.eof() {
            self.scan_logical_line()?;
        }
        self.finish();
        debug!(
            tokens = self.tokens.len(),
            lines = self.cursor.position().line,
            "tokenized source"
        );
        Ok(())
    }

    /// Close every open block: one `NewLine`, then one `Dedent` per level.
    fn finish(&mut self) {
        if self.indents.is_empty() {
            return;
        }
        let position = self.cursor.position();
        self.tokens.push(Token::new(position, TokenKind::NewLine));
        while !self.indents.is_empty() {
            self.indents.pop();
            self.tokens.push(Token::new(position, TokenKind::Dedent));
        }
    }

    // ========================================================================
    // Logical lines
    // ========================================================================

    fn scan_logical_line(&mut self) -> Result<(), LexError> {
        let line_start = self.cursor.position();
        let mut width = 0u32;
        loop {
            if self.cursor.peek_read(SPACE) {
                width = width.saturating_add(1);
            } else if self.cursor.peek_read(TAB) {
                width = width.saturating_add(self.tab_width);
            } else {
                break;
            }
        }

        // Comment-only and blank lines leave the indentation alone.
        if self.cursor.peek_read(HASH) {
            self.cursor.skip_line();
            return Ok(());
        }
        if self.cursor.eof() || self.cursor.read_new_line() {
            return Ok(());
        }

        self.update_indentation(width, line_start)?;

        while let Some(ch) = self.cursor.current() {
            if is_new_line(ch) {
                let position = self.cursor.position();
                self.cursor.read_new_line();
                if self.bracket_depth == 0 {
                    self.tokens.push(Token::new(position, TokenKind::NewLine));
                }
                break;
            }
            if is_white_space_single_line(ch) {
                self.cursor.advance()?;
                continue;
            }
            if ch == HASH {
                self.cursor.skip_line();
                break;
            }
            let position = self.cursor.position();
            let kind = self.scan_token(ch)?;
            self.tokens.push(Token::new(position, kind));
        }
        Ok(())
    }

    fn update_indentation(&mut self, width: u32, position: Position) -> Result<(), LexError> {
        let current = self.indents.current();
        if width > current {
            self.indents.push(width);
            trace!(
                from = current,
                to = width,
                depth = self.indents.len(),
                line = position.line,
                "indent"
            );
            self.tokens.push(Token::new(position, TokenKind::Indent));
        } else if width < current {
            while !self.indents.is_empty() && self.indents.top() > width {
                self.indents.pop();
                self.tokens.push(Token::new(position, TokenKind::Dedent));
            }
            trace!(
                from = current,
                to = width,
                depth = self.indents.len(),
                line = position.line,
                "dedent"
            );
            if self.indents.current() != width {
                return Err(LexError::new(
                    LexErrorKind::IndentationMismatch(width),
                    position,
                ));
            }
        }
        Ok(())
    }

    // ========================================================================
    // Tokens
    // ========================================================================

    fn scan_token(&mut self, ch: char) -> Result<TokenKind, LexError> {
        match ch {
            '(' | '[' | '{' => {
                self.cursor.advance()?;
                self.bracket_depth += 1;
                Ok(match ch {
                    '(' => TokenKind::OpenParen,
                    '[' => TokenKind::OpenBracket,
                    _ => TokenKind::OpenBrace,
                })
            }
            ')' | ']' | '}' => {
                self.cursor.advance()?;
                self.bracket_depth = self.bracket_depth.saturating_sub(1);
                Ok(match ch {
                    ')' => TokenKind::CloseParen,
                    ']' => TokenKind::CloseBracket,
                    _ => TokenKind::CloseBrace,
                })
            }
            DOUBLE_QUOTE | SINGLE_QUOTE => self.scan_string_literal(),
            _ if is_identifier_start(ch) => self.scan_identifier(),
            _ if is_digit(ch) => self.scan_number(),
            _ => self.scan_operator(),
        }
    }

    fn scan_identifier(&mut self) -> Result<TokenKind, LexError> {
        let start = self.cursor.offset();
        self.cursor.advance()?;
        while self.cursor.current().is_some_and(is_identifier_part) {
            self.cursor.advance()?;
        }
        let text = self.cursor.slice_from(start);

        Ok(match Keyword::from_keyword(text) {
            Some(keyword) => TokenKind::Keyword(keyword),
            None => TokenKind::Id(text.to_string()),
        })
    }

    fn scan_string_literal(&mut self) -> Result<TokenKind, LexError> {
        let quote = self.cursor.advance()?;
        let mut value = String::new();
        loop {
            if self.cursor.eof() {
                return Err(LexError::new(
                    LexErrorKind::UnterminatedString,
                    self.cursor.position(),
                ));
            }
            let ch = self.cursor.advance()?;
            if ch == quote {
                break;
            }
            if ch == BACKSLASH {
                value.push(self.scan_escape_sequence()?);
            } else {
                value.push(ch);
            }
        }
        Ok(TokenKind::Str(value))
    }

    /// Decode the escape following a `\`.
    fn scan_escape_sequence(&mut self) -> Result<char, LexError> {
        let position = self.cursor.position();
        if self.cursor.eof() {
            return Err(LexError::new(
                LexErrorKind::UnterminatedEscapeSequence,
                position,
            ));
        }
        let ch = self.cursor.advance()?;
        match ch {
            'b' => Ok('\u{0008}'),
            't' => Ok('\t'),
            'n' => Ok('\n'),
            'f' => Ok('\u{000C}'),
            'r' => Ok('\r'),
            '"' | '\'' | '\\' | '/' => Ok(ch),
            'u' => self.scan_unicode_escape(position),
            _ => Err(LexError::new(
                LexErrorKind::UnrecognizedEscapeSequence(ch),
                position,
            )),
        }
    }

    /// Decode `XXXX` after `\u`. A high surrogate must be followed directly by
    /// a `\uXXXX` low surrogate; the pair becomes one character.
    fn scan_unicode_escape(&mut self, position: Position) -> Result<char, LexError> {
        let unit = self.scan_code_unit()?;
        let invalid = || LexError::new(LexErrorKind::InvalidUnicodeScalar(unit), position);

        let is_high_surrogate = (0xD800..0xDC00).contains(&unit);
        if is_high_surrogate && self.cursor.peek(BACKSLASH, 0) && self.cursor.peek('u', 1) {
            self.cursor.advance()?;
            self.cursor.advance()?;
            let low = self.scan_code_unit()?;
            if !(0xDC00..0xE000).contains(&low) {
                return Err(invalid());
            }
            let scalar = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
            return char::from_u32(scalar).ok_or_else(invalid);
        }
        char::from_u32(unit).ok_or_else(invalid)
    }

    /// Read exactly four hex digits.
    fn scan_code_unit(&mut self) -> Result<u32, LexError> {
        let mut value = 0u32;
        for _ in 0..4 {
            let position = self.cursor.position();
            let Some(ch) = self.cursor.current() else {
                return Err(LexError::new(
                    LexErrorKind::UnterminatedEscapeSequence,
                    position,
                ));
            };
            let Some(digit) = ch.to_digit(16) else {
                return Err(LexError::new(
                    LexErrorKind::IllegalUnicodeHexDigit(ch),
                    position,
                ));
            };
            self.cursor.advance()?;
            value = value * 16 + digit;
        }
        Ok(value)
    }

    fn scan_number(&mut self) -> Result<TokenKind, LexError> {
        let mut buffer = String::new();
        let mut is_float = false;

        // TODO: hexadecimal, octal and binary literals.
        self.scan_digits(&mut buffer)?;

        if self.cursor.peek_read(DOT) {
            is_float = true;
            buffer.push(DOT);
            if !self.cursor.current().is_some_and(is_digit) {
                return Err(LexError::new(
                    LexErrorKind::MissingFractionalDigits,
                    self.cursor.position(),
                ));
            }
            self.scan_digits(&mut buffer)?;
        }

        if self.cursor.peek_read('e') || self.cursor.peek_read('E') {
            is_float = true;
            buffer.push('e');
            if let Some(sign @ ('+' | '-')) = self.cursor.current() {
                self.cursor.advance()?;
                buffer.push(sign);
            }
            if !self.cursor.current().is_some_and(is_digit) {
                return Err(LexError::new(
                    LexErrorKind::MissingExponentDigits,
                    self.cursor.position(),
                ));
            }
            self.scan_digits(&mut buffer)?;
        }

        Ok(if is_float {
            TokenKind::Float(buffer)
        } else {
            TokenKind::Int(buffer)
        })
    }

    /// Consume a run of digits and `_`, keeping only the digits.
    fn scan_digits(&mut self, buffer: &mut String) -> Result<(), LexError> {
        while let Some(ch) = self.cursor.current().filter(|&ch| is_num_part(ch)) {
            self.cursor.advance()?;
            if ch != UNDERSCORE {
                buffer.push(ch);
            }
        }
        Ok(())
    }

    /// Punctuators, longest spelling first.
    fn scan_operator(&mut self) -> Result<TokenKind, LexError> {
        let position = self.cursor.position();
        let ch = self.cursor.advance()?;
        let kind = match ch {
            '.' => {
                if self.cursor.peek_read('.') {
                    if !self.cursor.peek_read('.') {
                        return Err(LexError::new(LexErrorKind::MalformedSpread, position));
                    }
                    TokenKind::DotDotDot
                } else {
                    TokenKind::Dot
                }
            }
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            '~' => TokenKind::Tilde,
            '^' => TokenKind::Caret,
            '+' => TokenKind::Plus,
            '*' => TokenKind::Asterisk,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '!' => {
                if self.cursor.peek_read('=') {
                    TokenKind::ExclamationEquals
                } else {
                    TokenKind::Exclamation
                }
            }
            '=' => {
                if self.cursor.peek_read('=') {
                    TokenKind::EqualsEquals
                } else if self.cursor.peek_read('>') {
                    TokenKind::FatArrow
                } else {
                    TokenKind::Equals
                }
            }
            '-' => {
                if self.cursor.peek_read('>') {
                    TokenKind::Arrow
                } else {
                    TokenKind::Minus
                }
            }
            '&' => {
                if self.cursor.peek_read('&') {
                    TokenKind::AmpersandAmpersand
                } else {
                    TokenKind::Ampersand
                }
            }
            '|' => {
                if self.cursor.peek_read('|') {
                    TokenKind::BarBar
                } else {
                    TokenKind::Bar
                }
            }
            '<' => {
                if self.cursor.peek_read('<') {
                    TokenKind::LessThanLessThan
                } else if self.cursor.peek_read('=') {
                    TokenKind::LessThanEquals
                } else {
                    TokenKind::LessThan
                }
            }
            '>' => {
                if self.cursor.peek_read('>') {
                    TokenKind::GreaterThanGreaterThan
                } else if self.cursor.peek_read('=') {
                    TokenKind::GreaterThanEquals
                } else {
                    TokenKind::GreaterThan
                }
            }
            '?' => {
                if !self.cursor.peek_read('.') {
                    return Err(LexError::new(
                        LexErrorKind::MalformedConditionalDot,
                        position,
                    ));
                }
                TokenKind::QuestionDot
            }
            _ => {
                return Err(LexError::new(
                    LexErrorKind::UnrecognizedOperator(ch),
                    position,
                ))
            }
        };
        Ok(kind)
    }
}

/// Tokenize `source` with the default options.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    lex_with_options(source, &LexerOptions::default())
}

/// Tokenize `source` with explicit options.
pub fn lex_with_options(source: &str, options: &LexerOptions) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::with_options(source, options);
    lexer.run()?;
    Ok(lexer.into_tokens())
}
