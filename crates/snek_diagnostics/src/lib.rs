//! snek_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Every fault the tokenizer can raise has a stable code and message template
//! in [`messages`]. Diagnostics carry the file and position of the fault so
//! front ends can render them however they like.

use snek_core::text::Position;
use std::fmt;

/// Diagnostic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g., 1002).
    pub code: u32,
    /// The category of this diagnostic.
    pub category: DiagnosticCategory,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// The file path where this diagnostic occurred, if any.
    pub file: Option<String>,
    /// The source position where this diagnostic occurred, if any.
    pub position: Option<Position>,
    /// The resolved message text.
    pub message_text: String,
    /// The diagnostic code.
    pub code: u32,
    /// The category.
    pub category: DiagnosticCategory,
}

impl Diagnostic {
    /// Create a new diagnostic without location info.
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            position: None,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
        }
    }

    /// Create a new diagnostic with file and position info.
    pub fn with_location(
        file: Option<String>,
        position: Position,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Self {
        Self {
            file,
            position: Some(position),
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
        }
    }

    /// Whether this is an error diagnostic.
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }

    /// The code as printed, e.g. `SNEK1002`.
    pub fn code_text(&self) -> String {
        format!("SNEK{}", self.code)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.position) {
            (Some(file), Some(pos)) => write!(f, "{}:{}: ", file, pos)?,
            (Some(file), None) => write!(f, "{}: ", file)?,
            (None, Some(pos)) => write!(f, "{}: ", pos)?,
            (None, None) => {}
        }
        write!(
            f,
            "{} {}: {}",
            self.category,
            self.code_text(),
            self.message_text
        )
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// A collection of diagnostics accumulated across several inputs.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
        ($code:expr, Warning, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Warning, message: $msg }
        };
    }

    // ========================================================================
    // Tokenizer errors (1000-1099)
    // ========================================================================
    pub const UNEXPECTED_END_OF_INPUT: DiagnosticMessage = diag!(1001, Error, "Unexpected end of input.");
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(1002, Error, "Unterminated string literal.");
    pub const UNTERMINATED_ESCAPE_SEQUENCE: DiagnosticMessage = diag!(1003, Error, "Unterminated escape sequence.");
    pub const ILLEGAL_UNICODE_HEX_DIGIT: DiagnosticMessage = diag!(1004, Error, "Illegal hexadecimal digit '{0}' in Unicode escape sequence.");
    pub const UNRECOGNIZED_ESCAPE_SEQUENCE: DiagnosticMessage = diag!(1005, Error, "Unrecognized escape sequence '\\{0}'.");
    pub const MISSING_FRACTIONAL_DIGITS: DiagnosticMessage = diag!(1006, Error, "Missing digits after '.'.");
    pub const MISSING_EXPONENT_DIGITS: DiagnosticMessage = diag!(1007, Error, "Missing digits after 'e'.");
    pub const MALFORMED_SPREAD: DiagnosticMessage = diag!(1008, Error, "Unexpected '..'; did you mean '...'?");
    pub const MALFORMED_CONDITIONAL_DOT: DiagnosticMessage = diag!(1009, Error, "Unexpected '?'; did you mean '?.'?");
    pub const UNRECOGNIZED_OPERATOR: DiagnosticMessage = diag!(1010, Error, "Unrecognized operator '{0}'.");
    pub const INDENTATION_MISMATCH: DiagnosticMessage = diag!(1011, Error, "Indentation of {0} does not match any enclosing block.");
    pub const INVALID_UNICODE_SCALAR: DiagnosticMessage = diag!(1012, Error, "Unicode escape '\\u{0}' is not a valid character.");

    // ========================================================================
    // Input errors (6000-6099)
    // ========================================================================
    pub const CANNOT_READ_FILE_0_1: DiagnosticMessage = diag!(6001, Error, "Cannot read file '{0}': {1}.");
    pub const INVALID_CONFIG_FILE_0_1: DiagnosticMessage = diag!(6002, Error, "Invalid config file '{0}': {1}.");
    pub const NO_INPUTS_FOUND: DiagnosticMessage = diag!(6003, Warning, "No input files were given; reading standard input.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        assert_eq!(format_message("'{0}' and '{1}'", &["a", "b"]), "'a' and 'b'");
        assert_eq!(format_message("no args", &[]), "no args");
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::with_location(
            Some("main.snek".into()),
            Position::new(3, 7),
            &messages::UNRECOGNIZED_OPERATOR,
            &["@"],
        );
        assert_eq!(
            diag.to_string(),
            "main.snek:3:7: error SNEK1010: Unrecognized operator '@'."
        );

        let diag = Diagnostic::new(&messages::NO_INPUTS_FOUND, &[]);
        assert!(!diag.is_error());
        assert_eq!(
            diag.to_string(),
            "warning SNEK6003: No input files were given; reading standard input."
        );
    }

    #[test]
    fn test_collection_counts_errors_only() {
        let mut diags = DiagnosticCollection::new();
        diags.add(Diagnostic::with_location(
            Some("b.snek".into()),
            Position::new(1, 1),
            &messages::UNTERMINATED_STRING_LITERAL,
            &[],
        ));
        diags.add(Diagnostic::with_location(
            Some("a.snek".into()),
            Position::new(2, 1),
            &messages::MALFORMED_SPREAD,
            &[],
        ));
        diags.add(Diagnostic::new(&messages::NO_INPUTS_FOUND, &[]));

        assert_eq!(diags.len(), 3);
        assert_eq!(diags.error_count(), 2);
        assert!(diags.has_errors());
        assert_eq!(diags.diagnostics()[1].file.as_deref(), Some("a.snek"));
        assert_eq!(diags.diagnostics()[2].file, None);
    }
}
