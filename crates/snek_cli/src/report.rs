//! Rendering tokenizer faults as labelled source snippets.

use miette::{NamedSource, SourceSpan};
use snek_core::text::LineMap;
use snek_diagnostics::Diagnostic;
use snek_scanner::LexError;

/// A tokenizer fault bound to the source it came from.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
#[error("{code}: {message}")]
#[diagnostic(code(snek::lex))]
pub struct LexReport {
    code: String,
    message: String,
    #[source_code]
    src: NamedSource<String>,
    #[label("{label}")]
    span: SourceSpan,
    label: String,
}

impl LexReport {
    pub fn new(file: &str, text: &str, error: &LexError, diagnostic: &Diagnostic) -> Self {
        let offset = LineMap::new(text).offset_of(text, error.position);
        let len = text[offset..].chars().next().map_or(0, char::len_utf8);
        Self {
            code: diagnostic.code_text(),
            message: diagnostic.message_text.clone(),
            src: NamedSource::new(file, text.to_string()),
            span: (offset, len).into(),
            label: error.kind.to_string(),
        }
    }
}

/// Print a diagnostic that has no source snippet to show.
pub fn print_plain(diagnostic: &Diagnostic) {
    eprintln!("{:?}", miette::miette!("{}", diagnostic));
}

/// Print a tokenizer fault with its source snippet.
pub fn print_lex_error(file: &str, text: &str, error: &LexError, diagnostic: &Diagnostic) {
    let report = miette::Report::new(LexReport::new(file, text, error, diagnostic));
    eprintln!("{:?}", report);
}

#[cfg(test)]
mod tests {
    use super::*;
    use snek_core::text::Position;
    use snek_scanner::LexErrorKind;

    #[test]
    fn test_span_points_at_offending_character() {
        let text = "a = 1\nb = é @";
        let error = LexError::new(LexErrorKind::UnrecognizedOperator('@'), Position::new(2, 7));
        let report = LexReport::new("t.snek", text, &error, &error.to_diagnostic(Some("t.snek")));
        // `é` is two bytes: line 2 starts at 6, column 7 is byte 6 + 7.
        assert_eq!(report.span.offset(), 13);
        assert_eq!(report.span.len(), 1);
        assert_eq!(report.code, "SNEK1010");
    }

    #[test]
    fn test_span_at_end_of_input_is_empty() {
        let text = "'abc";
        let error = LexError::new(LexErrorKind::UnterminatedString, Position::new(1, 5));
        let report = LexReport::new("t.snek", text, &error, &error.to_diagnostic(None));
        assert_eq!(report.span.offset(), 4);
        assert_eq!(report.span.len(), 0);
    }
}
