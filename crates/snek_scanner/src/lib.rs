//! snek_scanner: Tokenizer for snek source code.
//!
//! Turns source text into the token stream the parser consumes, including
//! the synthetic `Indent`/`Dedent`/`NewLine` tokens that carry snek's
//! indentation-based block structure. Supports:
//! - Identifiers and the 18 reserved words
//! - Single- and double-quoted strings with escape decoding
//! - Decimal integer and float literals with `_` grouping and exponents
//! - Maximal-munch operators and separators
//!
//! ```
//! use snek_scanner::{lex, TokenKind};
//!
//! let tokens = lex("x = 1_000").unwrap();
//! assert_eq!(tokens[2].kind, TokenKind::Int("1000".into()));
//! ```

mod char_codes;
mod cursor;
mod error;
mod indent;
mod scanner;
mod token;

pub use cursor::Cursor;
pub use error::{LexError, LexErrorKind};
pub use indent::IndentStack;
pub use scanner::{lex, lex_with_options, Lexer};
pub use snek_options::LexerOptions;
pub use token::{Keyword, Token, TokenKind};
