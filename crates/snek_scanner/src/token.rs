//! Tokens produced by the lexer.

use snek_core::text::Position;
use std::fmt;

/// A scanned token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Where the token starts.
    pub position: Position,
    /// What the token is, with its payload for literals.
    pub kind: TokenKind,
}

impl Token {
    pub fn new(position: Position, kind: TokenKind) -> Self {
        Self { position, kind }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.position, self.kind.text())?;
        if let Some(payload) = self.kind.payload() {
            write!(f, " {:?}", payload)?;
        }
        Ok(())
    }
}

/// The kind of a token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Separators
    Indent,
    Dedent,
    NewLine,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,
    Dot,
    QuestionDot,
    Comma,
    Colon,
    Semicolon,
    /// `->`
    Arrow,
    /// `=>`
    FatArrow,
    /// `...`
    DotDotDot,

    // Literals
    /// An identifier and its spelling.
    Id(String),
    /// Decimal digits with grouping underscores removed.
    Int(String),
    /// Canonical float spelling: digits, optional fraction, optional `e[+-]digits`.
    Float(String),
    /// The decoded string value.
    Str(String),

    Keyword(Keyword),

    // Operators
    Equals,
    Plus,
    Minus,
    Asterisk,
    Slash,
    Percent,
    Ampersand,
    Bar,
    Exclamation,
    Tilde,
    Caret,
    EqualsEquals,
    ExclamationEquals,
    LessThan,
    GreaterThan,
    LessThanEquals,
    GreaterThanEquals,
    LessThanLessThan,
    GreaterThanGreaterThan,
    AmpersandAmpersand,
    BarBar,
}

impl TokenKind {
    /// The kind's name as it appears in token dumps.
    ///
    /// Punctuators are named by their spelling, keywords as `Keyword<Word>`.
    pub fn text(&self) -> &'static str {
        match self {
            TokenKind::Indent => "Indent",
            TokenKind::Dedent => "Dedent",
            TokenKind::NewLine => "NewLine",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::OpenBrace => "{",
            TokenKind::CloseBrace => "}",
            TokenKind::Dot => ".",
            TokenKind::QuestionDot => "?.",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::Arrow => "->",
            TokenKind::FatArrow => "=>",
            TokenKind::DotDotDot => "...",
            TokenKind::Id(_) => "Id",
            TokenKind::Int(_) => "Int",
            TokenKind::Float(_) => "Float",
            TokenKind::Str(_) => "Str",
            TokenKind::Keyword(keyword) => keyword.kind_name(),
            TokenKind::Equals => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Ampersand => "&",
            TokenKind::Bar => "|",
            TokenKind::Exclamation => "!",
            TokenKind::Tilde => "~",
            TokenKind::Caret => "^",
            TokenKind::EqualsEquals => "==",
            TokenKind::ExclamationEquals => "!=",
            TokenKind::LessThan => "<",
            TokenKind::GreaterThan => ">",
            TokenKind::LessThanEquals => "<=",
            TokenKind::GreaterThanEquals => ">=",
            TokenKind::LessThanLessThan => "<<",
            TokenKind::GreaterThanGreaterThan => ">>",
            TokenKind::AmpersandAmpersand => "&&",
            TokenKind::BarBar => "||",
        }
    }

    /// The identifier spelling or literal value, for kinds that carry one.
    pub fn payload(&self) -> Option<&str> {
        match self {
            TokenKind::Id(text)
            | TokenKind::Int(text)
            | TokenKind::Float(text)
            | TokenKind::Str(text) => Some(text),
            _ => None,
        }
    }
}

/// Reserved words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Keyword {
    As,
    Break,
    Continue,
    Else,
    Export,
    False,
    For,
    From,
    If,
    Import,
    In,
    Let,
    Null,
    Pass,
    Return,
    True,
    Type,
    While,
}

impl Keyword {
    pub const ALL: [Keyword; 18] = [
        Keyword::As,
        Keyword::Break,
        Keyword::Continue,
        Keyword::Else,
        Keyword::Export,
        Keyword::False,
        Keyword::For,
        Keyword::From,
        Keyword::If,
        Keyword::Import,
        Keyword::In,
        Keyword::Let,
        Keyword::Null,
        Keyword::Pass,
        Keyword::Return,
        Keyword::True,
        Keyword::Type,
        Keyword::While,
    ];

    /// Look up a reserved word.
    pub fn from_keyword(text: &str) -> Option<Keyword> {
        match text {
            "as" => Some(Keyword::As),
            "break" => Some(Keyword::Break),
            "continue" => Some(Keyword::Continue),
            "else" => Some(Keyword::Else),
            "export" => Some(Keyword::Export),
            "false" => Some(Keyword::False),
            "for" => Some(Keyword::For),
            "from" => Some(Keyword::From),
            "if" => Some(Keyword::If),
            "import" => Some(Keyword::Import),
            "in" => Some(Keyword::In),
            "let" => Some(Keyword::Let),
            "null" => Some(Keyword::Null),
            "pass" => Some(Keyword::Pass),
            "return" => Some(Keyword::Return),
            "true" => Some(Keyword::True),
            "type" => Some(Keyword::Type),
            "while" => Some(Keyword::While),
            _ => None,
        }
    }

    /// The source spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::As => "as",
            Keyword::Break => "break",
            Keyword::Continue => "continue",
            Keyword::Else => "else",
            Keyword::Export => "export",
            Keyword::False => "false",
            Keyword::For => "for",
            Keyword::From => "from",
            Keyword::If => "if",
            Keyword::Import => "import",
            Keyword::In => "in",
            Keyword::Let => "let",
            Keyword::Null => "null",
            Keyword::Pass => "pass",
            Keyword::Return => "return",
            Keyword::True => "true",
            Keyword::Type => "type",
            Keyword::While => "while",
        }
    }

    /// The token kind name, e.g. `KeywordIf`.
    pub fn kind_name(self) -> &'static str {
        match self {
            Keyword::As => "KeywordAs",
            Keyword::Break => "KeywordBreak",
            Keyword::Continue => "KeywordContinue",
            Keyword::Else => "KeywordElse",
            Keyword::Export => "KeywordExport",
            Keyword::False => "KeywordFalse",
            Keyword::For => "KeywordFor",
            Keyword::From => "KeywordFrom",
            Keyword::If => "KeywordIf",
            Keyword::Import => "KeywordImport",
            Keyword::In => "KeywordIn",
            Keyword::Let => "KeywordLet",
            Keyword::Null => "KeywordNull",
            Keyword::Pass => "KeywordPass",
            Keyword::Return => "KeywordReturn",
            Keyword::True => "KeywordTrue",
            Keyword::Type => "KeywordType",
            Keyword::While => "KeywordWhile",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
