//! oxide-sql-lint CLI
//!
//! Command-line syntax checker for SQLite and Room SQL.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

use oxide_sql_lint::prelude::*;

/// Syntax checker for SQLite and Room SQL.
#[derive(Parser)]
#[command(name = "oxide-sql-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Deepest rule nesting before the parser gives up on a statement.
    #[arg(long, env = "OXIDE_SQL_MAX_DEPTH")]
    max_depth: Option<usize>,

    /// Output format for diagnostics.
    #[arg(short, long, value_enum, env = "OXIDE_SQL_FORMAT", default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// JSON file with parse options.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output (-v for debug, -vv for trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report the syntax errors of each input.
    Check {
        /// Files to check; `-` reads standard input.
        #[arg(required = true)]
        files: Vec<String>,
    },

    /// Print the syntax tree of an input.
    Tree {
        /// File to parse; `-` reads standard input.
        file: String,
    },

    /// Print the token stream of an input.
    Tokens {
        /// File to lex; `-` reads standard input.
        file: String,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays parseable.
    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let options = load_options(cli.config.as_deref(), cli.max_depth)?;

    match cli.command {
        Commands::Check { files } => {
            let mut diagnostics = Vec::new();
            for file in &files {
                let source = SqlSource::read(file)?;
                diagnostics.extend(check(&source, &options));
            }
            print!("{}", render(&diagnostics, cli.format)?);

            if diagnostics.is_empty() {
                debug!(files = files.len(), "all inputs are valid");
                return Ok(ExitCode::SUCCESS);
            }
            info!(
                files = files.len(),
                errors = diagnostics.len(),
                "check failed"
            );
            Ok(ExitCode::FAILURE)
        }

        Commands::Tree { file } => {
            let source = SqlSource::read(&file)?;
            let (tree, count) = render_tree(&source, &options);
            print!("{tree}");
            if count > 0 {
                return Err(LintError::Syntax {
                    path: source.name,
                    count,
                }
                .into());
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Tokens { file } => {
            let source = SqlSource::read(&file)?;
            print!("{}", render_tokens(&source));
            Ok(ExitCode::SUCCESS)
        }
    }
}
