use clap::{Args, Parser as ClapParser, Subcommand};
use pseudo_lang::cli::{self, CheckOptions, CheckResult, CliError, Mode};
use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(ClapParser)]
#[command(name = "pseudo")]
#[command(about = "Pseudo - lex and parse pseudocode into a syntax tree")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a pseudocode program
    Check {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Print the token stream as JSON
    Tokens {
        #[command(flatten)]
        input: InputArgs,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Print the syntax tree as JSON
    Ast {
        #[command(flatten)]
        input: InputArgs,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Source file (reads from stdin if not provided)
    file: Option<PathBuf>,

    /// Inline source text
    #[arg(short, long, conflicts_with = "file")]
    source: Option<String>,
}

fn main() {
    fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let (input, mode, pretty) = match cli.command {
        Commands::Check { input } => (input, Mode::Check, false),
        Commands::Tokens { input, pretty } => (input, Mode::Tokens, pretty),
        Commands::Ast { input, pretty } => (input, Mode::Ast, pretty),
    };

    if let Err(e) = run(input, mode, pretty) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(input: InputArgs, mode: Mode, pretty: bool) -> Result<(), CliError> {
    let source = match (input.source, input.file) {
        (Some(text), _) => Some(text),
        (None, Some(path)) => Some(fs::read_to_string(path)?),
        (None, None) if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        (None, None) => None,
    };

    let options = CheckOptions {
        source,
        mode,
        pretty,
    };

    match cli::execute_check(&options)? {
        CheckResult::Valid(count) => println!("Syntax is valid ({} statements)", count),
        CheckResult::Json(json) => println!("{}", json),
    }
    Ok(())
}
