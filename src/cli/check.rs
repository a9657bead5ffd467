//! Run the front end over a source text

use super::CliError;
use crate::{lex, output, parse_source};

/// What to produce from the source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Only report whether the source is valid
    #[default]
    Check,
    /// Dump the token stream as JSON
    Tokens,
    /// Dump the syntax tree as JSON
    Ast,
}

/// Options for a CLI run
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Source text
    pub source: Option<String>,
    pub mode: Mode,
    /// Pretty-print JSON output
    pub pretty: bool,
}

/// Result of a CLI run
#[derive(Debug)]
pub enum CheckResult {
    /// Source lexed and parsed; carries the statement count
    Valid(usize),
    /// Rendered JSON document
    Json(String),
}

/// Execute a CLI run
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let source = options.source.as_deref().ok_or(CliError::NoInput)?;

    let document = match options.mode {
        Mode::Check => {
            let program = parse_source(source)?;
            return Ok(CheckResult::Valid(program.len()));
        }
        Mode::Tokens => {
            let tokens = lex(source).into_result(source)?;
            output::tokens_to_json(&tokens)
        }
        Mode::Ast => output::program_to_json(&parse_source(source)?),
    };

    let json = if options.pretty {
        serde_json::to_string_pretty(&document)
    } else {
        serde_json::to_string(&document)
    }?;
    Ok(CheckResult::Json(json))
}
