//! snek_options: `snek.json` parsing and tokenizer options.
//!
//! A project file looks like:
//!
//! ```json
//! {
//!   "lexerOptions": { "tabWidth": 8 },
//!   "files": ["src/main.snek"]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

/// The width a tab contributes to leading indentation unless overridden.
pub const DEFAULT_TAB_WIDTH: u32 = 8;

/// The largest accepted tab width.
pub const MAX_TAB_WIDTH: u32 = 64;

/// Options that affect how source text is tokenized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LexerOptions {
    /// Columns contributed by a tab in leading indentation. A space is always 1.
    pub tab_width: u32,
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }
}

impl LexerOptions {
    /// Check the options for values the tokenizer cannot work with.
    pub fn validate(&self) -> Result<(), String> {
        if self.tab_width == 0 {
            return Err("tabWidth must be at least 1".to_string());
        }
        if self.tab_width > MAX_TAB_WIDTH {
            return Err(format!("tabWidth must be at most {}", MAX_TAB_WIDTH));
        }
        Ok(())
    }
}

/// A parsed `snek.json` file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnekConfig {
    pub lexer_options: Option<LexerOptions>,
    pub files: Option<Vec<String>>,
}

impl SnekConfig {
    /// The effective lexer options, falling back to the defaults.
    pub fn lexer_options(&self) -> LexerOptions {
        self.lexer_options.clone().unwrap_or_default()
    }
}

/// Errors raised while loading a config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid lexerOptions: {0}")]
    Invalid(String),
}

/// Parse a `snek.json` file from a string.
pub fn parse_config(content: &str) -> Result<SnekConfig, ConfigError> {
    let config: SnekConfig = serde_json::from_str(content)?;
    if let Some(options) = &config.lexer_options {
        options.validate().map_err(ConfigError::Invalid)?;
    }
    Ok(config)
}

/// Parse a `snek.json` file from a path.
pub fn parse_config_file(path: impl AsRef<Path>) -> Result<SnekConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}
