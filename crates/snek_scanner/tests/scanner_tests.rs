//! Scanner integration tests.
//!
//! Verifies that the lexer correctly tokenizes snek source, including the
//! indentation tokens and every fault it can report.

use snek_core::text::Position;
use snek_scanner::{lex, Keyword, LexErrorKind, Lexer, Token, TokenKind};

/// Helper: lex source that must succeed and return the kinds.
fn lex_kinds(source: &str) -> Vec<TokenKind> {
    lex(source)
        .unwrap_or_else(|e| panic!("failed to lex {source:?}: {e}"))
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

/// Helper: lex source that must fail and return the error kind and position.
fn lex_error(source: &str) -> (LexErrorKind, Position) {
    let err = lex(source).expect_err(source);
    (err.kind, err.position)
}

fn id(text: &str) -> TokenKind {
    TokenKind::Id(text.to_string())
}

#[test]
fn test_blank_sources_produce_no_tokens() {
    for source in ["", "    ", "\n\n", "\t\t\n  \n", "# test\n", "  # indented comment\n\n# x"] {
        assert!(lex_kinds(source).is_empty(), "{source:?}");
    }
}

#[test]
fn test_line_terminators() {
    let kinds = lex_kinds("foo\nbar\nbaz\nquux");
    assert_eq!(
        kinds,
        vec![
            id("foo"),
            TokenKind::NewLine,
            id("bar"),
            TokenKind::NewLine,
            id("baz"),
            TokenKind::NewLine,
            id("quux"),
        ]
    );
}

#[test]
fn test_crlf_and_cr_line_endings() {
    assert_eq!(lex_kinds("a\r\nb"), lex_kinds("a\nb"));
    assert_eq!(lex_kinds("a\rb"), lex_kinds("a\nb"));
    assert_eq!(lex_kinds("if x\r\n  y\r\n"), lex_kinds("if x\n  y\n"));
}

#[test]
fn test_indent_and_dedent() {
    let kinds = lex_kinds("if x\n  y\n  z\nw\n");
    assert_eq!(
        kinds,
        vec![
            TokenKind::Keyword(Keyword::If),
            id("x"),
            TokenKind::NewLine,
            TokenKind::Indent,
            id("y"),
            TokenKind::NewLine,
            id("z"),
            TokenKind::NewLine,
            TokenKind::Dedent,
            id("w"),
            TokenKind::NewLine,
        ]
    );
}

#[test]
fn test_dedent_pops_several_levels() {
    let kinds = lex_kinds("a\n  b\n    c\nd");
    let dedents_before_d = kinds
        .iter()
        .rev()
        .skip(1)
        .take_while(|k| **k == TokenKind::Dedent)
        .count();
    assert_eq!(dedents_before_d, 2);
    assert_eq!(kinds.last(), Some(&id("d")));
}

#[test]
fn test_tab_counts_as_eight() {
    // A tab and eight spaces are the same level.
    let kinds = lex_kinds("a\n\tb\n        c\n");
    assert_eq!(kinds.iter().filter(|k| **k == TokenKind::Indent).count(), 1);
    assert_eq!(kinds.iter().filter(|k| **k == TokenKind::Dedent).count(), 1);
}

#[test]
fn test_blank_and_comment_lines_keep_indentation() {
    let kinds = lex_kinds("a\n  b\n\n# note\n      \n  c\n");
    assert_eq!(kinds.iter().filter(|k| **k == TokenKind::Indent).count(), 1);
    assert_eq!(
        kinds,
        vec![
            id("a"),
            TokenKind::NewLine,
            TokenKind::Indent,
            id("b"),
            TokenKind::NewLine,
            id("c"),
            TokenKind::NewLine,
            TokenKind::NewLine,
            TokenKind::Dedent,
        ]
    );
}

#[test]
fn test_finalization_closes_every_open_level() {
    let kinds = lex_kinds("a\n  b\n    c\n      d");
    let tail: Vec<_> = kinds.iter().rev().take(4).rev().cloned().collect();
    assert_eq!(
        tail,
        vec![
            TokenKind::NewLine,
            TokenKind::Dedent,
            TokenKind::Dedent,
            TokenKind::Dedent,
        ]
    );
    let indents = kinds.iter().filter(|k| **k == TokenKind::Indent).count();
    let dedents = kinds.iter().filter(|k| **k == TokenKind::Dedent).count();
    assert_eq!(indents, 3);
    assert_eq!(indents, dedents);
}

#[test]
fn test_no_finalization_at_column_zero() {
    let kinds = lex_kinds("a\n");
    assert_eq!(kinds, vec![id("a"), TokenKind::NewLine]);
}

#[test]
fn test_trailing_comment_ends_line_without_newline_token() {
    assert_eq!(lex_kinds("a # note\nb"), vec![id("a"), id("b")]);
}

#[test]
fn test_brackets_suppress_newline() {
    let kinds = lex_kinds("f(a,\nb)\nc");
    assert_eq!(
        kinds,
        vec![
            id("f"),
            TokenKind::OpenParen,
            id("a"),
            TokenKind::Comma,
            id("b"),
            TokenKind::CloseParen,
            TokenKind::NewLine,
            id("c"),
        ]
    );

    let kinds = lex_kinds("x = [\n1,\n{\n2\n}\n]\n");
    assert_eq!(
        kinds.iter().filter(|k| **k == TokenKind::NewLine).count(),
        1
    );
    assert_eq!(kinds.last(), Some(&TokenKind::NewLine));
}

#[test]
fn test_indentation_is_recomputed_inside_brackets() {
    let kinds = lex_kinds("f(\n  a\n)\n");
    assert_eq!(
        kinds,
        vec![
            id("f"),
            TokenKind::OpenParen,
            TokenKind::Indent,
            id("a"),
            TokenKind::Dedent,
            TokenKind::CloseParen,
            TokenKind::NewLine,
        ]
    );
    assert!(!kinds[..6].contains(&TokenKind::NewLine));
}

#[test]
fn test_unmatched_closer_keeps_depth_at_zero() {
    // The stray `)` does not push the depth negative, so the following
    // newline still ends the line.
    let kinds = lex_kinds(")\n  x");
    assert_eq!(
        kinds,
        vec![
            TokenKind::CloseParen,
            TokenKind::NewLine,
            TokenKind::Indent,
            id("x"),
            TokenKind::NewLine,
            TokenKind::Dedent,
        ]
    );
}

#[test]
fn test_separators() {
    let cases = [
        ("(", TokenKind::OpenParen),
        (")", TokenKind::CloseParen),
        ("[", TokenKind::OpenBracket),
        ("]", TokenKind::CloseBracket),
        ("{", TokenKind::OpenBrace),
        ("}", TokenKind::CloseBrace),
        (".", TokenKind::Dot),
        ("?.", TokenKind::QuestionDot),
        (",", TokenKind::Comma),
        (":", TokenKind::Colon),
        (";", TokenKind::Semicolon),
        ("->", TokenKind::Arrow),
        ("=>", TokenKind::FatArrow),
        ("...", TokenKind::DotDotDot),
    ];
    for (source, expected) in cases {
        let kinds = lex_kinds(source);
        assert_eq!(kinds, vec![expected.clone()], "{source:?}");
        assert_eq!(expected.text(), source);
    }
}

#[test]
fn test_operators() {
    let cases = [
        ("=", TokenKind::Equals),
        ("+", TokenKind::Plus),
        ("-", TokenKind::Minus),
        ("*", TokenKind::Asterisk),
        ("/", TokenKind::Slash),
        ("%", TokenKind::Percent),
        ("&", TokenKind::Ampersand),
        ("|", TokenKind::Bar),
        ("!", TokenKind::Exclamation),
        ("~", TokenKind::Tilde),
        ("==", TokenKind::EqualsEquals),
        ("!=", TokenKind::ExclamationEquals),
        ("<", TokenKind::LessThan),
        (">", TokenKind::GreaterThan),
        ("<=", TokenKind::LessThanEquals),
        (">=", TokenKind::GreaterThanEquals),
        ("^", TokenKind::Caret),
        ("<<", TokenKind::LessThanLessThan),
        (">>", TokenKind::GreaterThanGreaterThan),
        ("&&", TokenKind::AmpersandAmpersand),
        ("||", TokenKind::BarBar),
    ];
    for (source, expected) in cases {
        let kinds = lex_kinds(source);
        assert_eq!(kinds, vec![expected.clone()], "{source:?}");
        assert_eq!(expected.text(), source);
    }
}

#[test]
fn test_maximal_munch() {
    assert_eq!(
        lex_kinds("a<<=b"),
        vec![id("a"), TokenKind::LessThanLessThan, TokenKind::Equals, id("b")]
    );
    assert_eq!(
        lex_kinds("x->y=>z"),
        vec![id("x"), TokenKind::Arrow, id("y"), TokenKind::FatArrow, id("z")]
    );
    assert_eq!(
        lex_kinds("a?.b...c"),
        vec![id("a"), TokenKind::QuestionDot, id("b"), TokenKind::DotDotDot, id("c")]
    );
    assert_eq!(
        lex_kinds("!==="),
        vec![TokenKind::ExclamationEquals, TokenKind::EqualsEquals]
    );
}

#[test]
fn test_identifiers() {
    for source in ["foo", "_foo", "_foo_500", "$dollar", "Camel9"] {
        assert_eq!(lex_kinds(source), vec![id(source)]);
    }
}

#[test]
fn test_keywords() {
    let source = "as break continue else export false for from if import in let null pass return true type while";
    let expected: Vec<_> = Keyword::ALL.into_iter().map(TokenKind::Keyword).collect();
    assert_eq!(lex_kinds(source), expected);
    // Keywords are case sensitive and must match the whole word.
    assert_eq!(lex_kinds("If iffy"), vec![id("If"), id("iffy")]);
}

#[test]
fn test_string_literals() {
    let cases = [
        (r#""""#, ""),
        ("''", ""),
        (r#""foo""#, "foo"),
        ("\"foo\nbar\"", "foo\nbar"),
        ("'it\"s'", "it\"s"),
        ("\"a\r\nb\"", "a\nb"),
    ];
    for (source, expected) in cases {
        assert_eq!(lex_kinds(source), vec![TokenKind::Str(expected.into())], "{source:?}");
    }
}

#[test]
fn test_string_escapes() {
    let source = r#""\b\t\n\f\r\"\'\\\/""#;
    assert_eq!(
        lex_kinds(source),
        vec![TokenKind::Str("\u{8}\t\n\u{c}\r\"'\\/".into())]
    );
}

#[test]
fn test_unicode_escapes() {
    assert_eq!(lex_kinds(r#""\u0041\u00e9""#), vec![TokenKind::Str("A\u{e9}".into())]);
    assert_eq!(lex_kinds(r#""\u00E9""#), vec![TokenKind::Str("\u{e9}".into())]);
    // Surrogate pairs combine into one character.
    assert_eq!(
        lex_kinds(r#""\uD83D\uDE00""#),
        vec![TokenKind::Str("\u{1F600}".into())]
    );
}

#[test]
fn test_multiline_string_does_not_emit_newline() {
    let kinds = lex_kinds("x = 'a\nb'\ny");
    assert_eq!(
        kinds,
        vec![
            id("x"),
            TokenKind::Equals,
            TokenKind::Str("a\nb".into()),
            TokenKind::NewLine,
            id("y"),
        ]
    );
}

#[test]
fn test_integer_literals() {
    for (source, expected) in [("0", "0"), ("1000", "1000"), ("1_000_000", "1000000"), ("1__0_", "10")] {
        assert_eq!(lex_kinds(source), vec![TokenKind::Int(expected.into())], "{source:?}");
    }
}

#[test]
fn test_float_literals() {
    let cases = [
        ("0.0", "0.0"),
        ("5.5555", "5.5555"),
        ("5.55_55", "5.5555"),
        ("6.67e-11", "6.67e-11"),
        ("6.67E-11", "6.67e-11"),
        ("6.67e+11", "6.67e+11"),
        ("1e9", "1e9"),
        ("1_0E1_0", "10e10"),
    ];
    for (source, expected) in cases {
        assert_eq!(lex_kinds(source), vec![TokenKind::Float(expected.into())], "{source:?}");
    }
}

#[test]
fn test_numeric_payloads_are_canonical() {
    for token in lex("1_2 3.4_5e-6_7 8E+9").unwrap() {
        let payload = token.kind.payload().unwrap();
        assert!(!payload.contains('_'), "{payload}");
        assert!(!payload.contains('E'), "{payload}");
        assert!(payload.chars().filter(|&c| c == '.').count() <= 1);
    }
}

#[test]
fn test_positions() {
    let tokens = lex("a = 'x'\n  b").unwrap();
    let positions: Vec<_> = tokens.iter().map(|t| (t.position.line, t.position.column)).collect();
    assert_eq!(
        positions,
        vec![
            (1, 1), // a
            (1, 3), // =
            (1, 5), // 'x'
            (1, 8), // NewLine
            (2, 1), // Indent
            (2, 3), // b
            (2, 4), // NewLine
            (2, 4), // Dedent
        ]
    );
    assert!(tokens.windows(2).all(|w| w[0].position <= w[1].position));
}

#[test]
fn test_lexing_is_idempotent() {
    let source = "import foo from 'bar'\nif x.y?.z >= 1_0.5e3\n  return [a, b]\nelse\n  pass\n";
    let first: Vec<Token> = lex(source).unwrap();
    let second: Vec<Token> = lex(source).unwrap();
    assert_eq!(first, second);
}

// ============================================================================
// Faults
// ============================================================================

#[test]
fn test_unterminated_string() {
    assert_eq!(
        lex_error("x = 'abc"),
        (LexErrorKind::UnterminatedString, Position::new(1, 9))
    );
    assert_eq!(lex_error("\"").0, LexErrorKind::UnterminatedString);
}

#[test]
fn test_unterminated_escape_sequence() {
    assert_eq!(lex_error("'abc\\").0, LexErrorKind::UnterminatedEscapeSequence);
    assert_eq!(lex_error("'\\u12").0, LexErrorKind::UnterminatedEscapeSequence);
}

#[test]
fn test_illegal_unicode_hex_digit() {
    assert_eq!(
        lex_error(r#""\u12g4""#),
        (LexErrorKind::IllegalUnicodeHexDigit('g'), Position::new(1, 6))
    );
}

#[test]
fn test_unrecognized_escape_sequence() {
    assert_eq!(
        lex_error(r#""\q""#),
        (LexErrorKind::UnrecognizedEscapeSequence('q'), Position::new(1, 3))
    );
}

#[test]
fn test_lone_surrogate() {
    assert_eq!(
        lex_error(r#""\uD800""#).0,
        LexErrorKind::InvalidUnicodeScalar(0xD800)
    );
    assert_eq!(
        lex_error(r#""\uDC00""#).0,
        LexErrorKind::InvalidUnicodeScalar(0xDC00)
    );
    assert_eq!(
        lex_error(r#""\uD800\u0041""#).0,
        LexErrorKind::InvalidUnicodeScalar(0xD800)
    );
}

#[test]
fn test_missing_fractional_digits() {
    assert_eq!(
        lex_error("1."),
        (LexErrorKind::MissingFractionalDigits, Position::new(1, 3))
    );
    assert_eq!(lex_error("1._5").0, LexErrorKind::MissingFractionalDigits);
    assert_eq!(lex_error("1.x").0, LexErrorKind::MissingFractionalDigits);
}

#[test]
fn test_missing_exponent_digits() {
    assert_eq!(lex_error("1.5e").0, LexErrorKind::MissingExponentDigits);
    assert_eq!(lex_error("1.5e+").0, LexErrorKind::MissingExponentDigits);
    assert_eq!(lex_error("2E-x").0, LexErrorKind::MissingExponentDigits);
}

#[test]
fn test_malformed_spread() {
    assert_eq!(
        lex_error("a..b"),
        (LexErrorKind::MalformedSpread, Position::new(1, 2))
    );
}

#[test]
fn test_malformed_conditional_dot() {
    assert_eq!(
        lex_error("a ? b"),
        (LexErrorKind::MalformedConditionalDot, Position::new(1, 3))
    );
}

#[test]
fn test_unrecognized_operator() {
    assert_eq!(
        lex_error("x = @y"),
        (LexErrorKind::UnrecognizedOperator('@'), Position::new(1, 5))
    );
    assert_eq!(lex_error("é").0, LexErrorKind::UnrecognizedOperator('é'));
}

#[test]
fn test_indentation_mismatch() {
    assert_eq!(
        lex_error("a\n    b\n  c"),
        (LexErrorKind::IndentationMismatch(2), Position::new(3, 1))
    );
    // Between two open levels.
    assert_eq!(
        lex_error("a\n  b\n      c\n    d").0,
        LexErrorKind::IndentationMismatch(4)
    );
}

#[test]
fn test_first_fault_wins() {
    let mut lexer = Lexer::new("ok\n'open\n@");
    let err = lexer.run().unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!(
        lexer.tokens(),
        &[
            Token::new(Position::new(1, 1), id("ok")),
            Token::new(Position::new(1, 3), TokenKind::NewLine),
        ]
    );
}
