//! Tokenizer errors.

use snek_core::text::Position;
use snek_diagnostics::{messages, Diagnostic};

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexErrorKind {
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated escape sequence")]
    UnterminatedEscapeSequence,
    #[error("illegal hexadecimal digit {0:?} in Unicode escape sequence")]
    IllegalUnicodeHexDigit(char),
    #[error("unrecognized escape sequence `\\{0}`")]
    UnrecognizedEscapeSequence(char),
    #[error("missing digits after `.`")]
    MissingFractionalDigits,
    #[error("missing digits after `e`")]
    MissingExponentDigits,
    #[error("unexpected `..`")]
    MalformedSpread,
    #[error("unexpected `?`")]
    MalformedConditionalDot,
    #[error("unrecognized operator {0:?}")]
    UnrecognizedOperator(char),
    #[error("indentation of {0} does not match any enclosing block")]
    IndentationMismatch(u32),
    #[error("Unicode escape `\\u{0:04X}` is not a valid character")]
    InvalidUnicodeScalar(u32),
}

/// A tokenizer fault and where it happened.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at {position}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub position: Position,
}

impl LexError {
    pub fn new(kind: LexErrorKind, position: Position) -> Self {
        Self { kind, position }
    }

    /// Convert into a diagnostic for `file`.
    pub fn to_diagnostic(&self, file: Option<&str>) -> Diagnostic {
        let (message, arg) = match &self.kind {
            LexErrorKind::UnexpectedEndOfInput => (&messages::UNEXPECTED_END_OF_INPUT, None),
            LexErrorKind::UnterminatedString => (&messages::UNTERMINATED_STRING_LITERAL, None),
            LexErrorKind::UnterminatedEscapeSequence => {
                (&messages::UNTERMINATED_ESCAPE_SEQUENCE, None)
            }
            LexErrorKind::IllegalUnicodeHexDigit(ch) => {
                (&messages::ILLEGAL_UNICODE_HEX_DIGIT, Some(ch.to_string()))
            }
            LexErrorKind::UnrecognizedEscapeSequence(ch) => {
                (&messages::UNRECOGNIZED_ESCAPE_SEQUENCE, Some(ch.to_string()))
            }
            LexErrorKind::MissingFractionalDigits => (&messages::MISSING_FRACTIONAL_DIGITS, None),
            LexErrorKind::MissingExponentDigits => (&messages::MISSING_EXPONENT_DIGITS, None),
            LexErrorKind::MalformedSpread => (&messages::MALFORMED_SPREAD, None),
            LexErrorKind::MalformedConditionalDot => (&messages::MALFORMED_CONDITIONAL_DOT, None),
            LexErrorKind::UnrecognizedOperator(ch) => {
                (&messages::UNRECOGNIZED_OPERATOR, Some(ch.to_string()))
            }
            LexErrorKind::IndentationMismatch(width) => {
                (&messages::INDENTATION_MISMATCH, Some(width.to_string()))
            }
            LexErrorKind::InvalidUnicodeScalar(unit) => {
                (&messages::INVALID_UNICODE_SCALAR, Some(format!("{unit:04X}")))
            }
        };
        let args: Vec<&str> = arg.iter().map(String::as_str).collect();
        Diagnostic::with_location(file.map(str::to_string), self.position, message, &args)
    }
}
