//! dimadb CLI
//!
//! Parses a single query or runs an interactive shell.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

use dimadb_cli::{CommandProcessor, OutputFormat, ProcessorConfig, Repl};
use dimadb_core::IdentifierQuoting;

/// Front end for the DimaDB query language.
#[derive(Parser)]
#[command(name = "dimadb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Process a single query and exit with its status.
    #[arg(short, long)]
    query: Option<String>,

    /// Print the parsed statements.
    #[arg(long, env = "DIMADB_AST_DEBUG")]
    ast_debug: bool,

    /// Format used by --ast-debug.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Keep double quotes around quoted identifiers when printing.
    #[arg(long)]
    quote_identifiers: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    const fn config(&self) -> ProcessorConfig {
        ProcessorConfig {
            ast_debug: self.ast_debug,
            format: self.format,
            quoting: if self.quote_identifiers {
                IdentifierQuoting::Preserve
            } else {
                IdentifierQuoting::Strip
            },
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too.
            let code = if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
            e.print()?;
            return Ok(code);
        }
    };

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = cli.config();
    debug!(?config, "starting");
    let mut processor = CommandProcessor::new(config);

    match cli.query.as_deref().filter(|q| !q.trim().is_empty()) {
        Some(query) => {
            let outcome = processor.process(query, &mut io::stdout(), &mut io::stderr())?;
            debug!(success = outcome.is_success(), ?outcome, "query finished");
            Ok(ExitCode::from(outcome.exit_code()))
        }
        None => {
            let processed = Repl::new(processor).run(
                io::stdin().lock(),
                &mut io::stdout(),
                &mut io::stderr(),
            )?;
            debug!(processed, "session ended");
            Ok(ExitCode::SUCCESS)
        }
    }
}
