//! snek-lex: The snek tokenizer CLI.
//!
//! Usage:
//!   snek-lex [options] [file...]
//!
//! Prints the token stream of each input. With no files, the inputs listed in
//! `snek.json` are used, and failing that, standard input.

mod report;

use clap::{Parser as ClapParser, ValueEnum};
use rayon::prelude::*;
use serde::Serialize;
use snek_diagnostics::{messages, Diagnostic, DiagnosticCollection};
use snek_options::SnekConfig;
use snek_scanner::{lex_with_options, LexError, Token};
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, info, warn, Level};

const DEFAULT_CONFIG: &str = "snek.json";

#[derive(ClapParser, Debug)]
#[command(name = "snek-lex", about = "Tokenize snek source files", version)]
struct Cli {
    /// Snek files to tokenize.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Path to snek.json.
    #[arg(short = 'p', long = "project")]
    project: Option<PathBuf>,

    /// Columns a tab contributes to indentation.
    #[arg(long = "tab-width")]
    tab_width: Option<u32>,

    /// Output format for the token stream.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// One source unit to tokenize.
struct Input {
    name: String,
    text: String,
}

#[derive(Serialize)]
struct TokenRecord<'a> {
    line: u32,
    column: u32,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<&'a str>,
}

#[derive(Serialize)]
struct FileTokens<'a> {
    file: &'a str,
    tokens: Vec<TokenRecord<'a>>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    process::exit(run(&cli));
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => std::env::var("SNEK_LOG")
            .ok()
            .and_then(|v| Level::from_str(&v).ok())
            .unwrap_or(Level::WARN),
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

fn run(cli: &Cli) -> i32 {
    let start = Instant::now();
    let mut diagnostics = DiagnosticCollection::new();

    let (config, config_dir) = match load_config(cli) {
        Ok(loaded) => loaded,
        Err(diag) => {
            report::print_plain(&diag);
            diagnostics.add(diag);
            return summarize(&diagnostics);
        }
    };

    let mut options = config.lexer_options();
    if let Some(tab_width) = cli.tab_width {
        options.tab_width = tab_width;
    }
    if let Err(reason) = options.validate() {
        let diag = Diagnostic::new(&messages::INVALID_CONFIG_FILE_0_1, &["--tab-width", &reason]);
        report::print_plain(&diag);
        diagnostics.add(diag);
        return summarize(&diagnostics);
    }

    let inputs = read_inputs(cli, &config, config_dir.as_deref(), &mut diagnostics);
    info!(files = inputs.len(), tab_width = options.tab_width, "tokenizing");

    // Every call owns its cursor and indent stack, so inputs lex independently.
    let results: Vec<Result<Vec<Token>, LexError>> = inputs
        .par_iter()
        .map(|input| lex_with_options(&input.text, &options))
        .collect();

    for (input, result) in inputs.iter().zip(&results) {
        match result {
            Ok(tokens) => print_tokens(cli.format, &input.name, tokens, inputs.len() > 1),
            Err(error) => {
                let diag = error.to_diagnostic(Some(&input.name));
                report::print_lex_error(&input.name, &input.text, error, &diag);
                diagnostics.add(diag);
            }
        }
    }

    debug!(elapsed = ?start.elapsed(), "done");
    summarize(&diagnostics)
}

/// Print the error count, if any, and pick the exit code.
fn summarize(diagnostics: &DiagnosticCollection) -> i32 {
    if !diagnostics.has_errors() {
        return 0;
    }
    let count = diagnostics.error_count();
    eprintln!(
        "Found {} error{}.",
        count,
        if count == 1 { "" } else { "s" }
    );
    1
}

/// Load the project config, if any, along with the directory its paths are relative to.
fn load_config(cli: &Cli) -> Result<(SnekConfig, Option<PathBuf>), Diagnostic> {
    let path = match &cli.project {
        Some(path) => path.clone(),
        None if cli.files.is_empty() && Path::new(DEFAULT_CONFIG).is_file() => {
            PathBuf::from(DEFAULT_CONFIG)
        }
        None => return Ok((SnekConfig::default(), None)),
    };

    debug!(path = %path.display(), "loading config");
    match snek_options::parse_config_file(&path) {
        Ok(config) => {
            let dir = path.parent().map(Path::to_path_buf);
            Ok((config, dir))
        }
        Err(e) => Err(Diagnostic::new(
            &messages::INVALID_CONFIG_FILE_0_1,
            &[&path.display().to_string(), &e.to_string()],
        )),
    }
}

fn read_inputs(
    cli: &Cli,
    config: &SnekConfig,
    config_dir: Option<&Path>,
    diagnostics: &mut DiagnosticCollection,
) -> Vec<Input> {
    let paths: Vec<PathBuf> = if !cli.files.is_empty() {
        cli.files.clone()
    } else if let Some(files) = &config.files {
        files
            .iter()
            .map(|f| match config_dir {
                Some(dir) => dir.join(f),
                None => PathBuf::from(f),
            })
            .collect()
    } else {
        Vec::new()
    };

    if paths.is_empty() {
        warn!("{}", Diagnostic::new(&messages::NO_INPUTS_FOUND, &[]));
        return match std::io::read_to_string(std::io::stdin()) {
            Ok(text) => vec![Input {
                name: "<stdin>".to_string(),
                text,
            }],
            Err(e) => {
                let diag = Diagnostic::new(
                    &messages::CANNOT_READ_FILE_0_1,
                    &["<stdin>", &e.to_string()],
                );
                report::print_plain(&diag);
                diagnostics.add(diag);
                Vec::new()
            }
        };
    }

    let mut inputs = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path.display().to_string();
        match std::fs::read_to_string(&path) {
            Ok(text) => inputs.push(Input { name, text }),
            Err(e) => {
                let diag = Diagnostic::new(&messages::CANNOT_READ_FILE_0_1, &[&name, &e.to_string()]);
                report::print_plain(&diag);
                diagnostics.add(diag);
            }
        }
    }
    inputs
}

fn print_tokens(format: OutputFormat, name: &str, tokens: &[Token], with_header: bool) {
    match format {
        OutputFormat::Text => {
            if with_header {
                println!("==> {} <==", name);
            }
            for token in tokens {
                println!("{}", token);
            }
        }
        OutputFormat::Json => {
            let records = tokens
                .iter()
                .map(|token| TokenRecord {
                    line: token.position.line,
                    column: token.position.column,
                    kind: token.kind.text(),
                    value: token.kind.payload(),
                })
                .collect();
            let file = FileTokens {
                file: name,
                tokens: records,
            };
            match serde_json::to_string(&file) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("error: cannot serialize tokens for {}: {}", name, e),
            }
        }
    }
}
