//! Runs one command through the lexer and parser.

use std::io::Write;

use clap::ValueEnum;
use serde::Serialize;
use tracing::debug;

use dimadb_core::{
    AstPrinter, ErrorCollector, IdentifierQuoting, Lexer, Parser, PrintOptions, Statement, Token,
};

use crate::diagnostic::write_diagnostics;
use crate::error::Result;

/// How `--ast-debug` renders the parsed statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Canonical query text.
    #[default]
    Text,
    /// The syntax tree as pretty-printed JSON.
    Json,
}

/// Runtime options for a [`CommandProcessor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProcessorConfig {
    /// Print the statements after a successful parse.
    pub ast_debug: bool,
    /// Rendering used when `ast_debug` is set.
    pub format: OutputFormat,
    /// Rendering of quoted identifiers in text output.
    pub quoting: IdentifierQuoting,
}

/// Result of processing a single command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command scanned and parsed cleanly.
    Success,
    /// The lexer reported at least one error; the command was not parsed.
    LexError,
    /// The parser reported at least one error.
    ParseError,
}

impl Outcome {
    /// Process exit status for this outcome.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::LexError => 2,
            Self::ParseError => 3,
        }
    }

    /// Returns true for [`Outcome::Success`].
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

#[derive(Serialize)]
struct AstDump<'a> {
    statements: &'a [Statement],
}

/// Scans and parses commands, writing diagnostics and optional AST output.
///
/// Diagnostics are collected per command; nothing carries over from one
/// call to the next.
#[derive(Debug)]
pub struct CommandProcessor {
    config: ProcessorConfig,
    printer: AstPrinter,
    errors: ErrorCollector,
}

impl CommandProcessor {
    /// Creates a processor with the given configuration.
    #[must_use]
    pub const fn new(config: ProcessorConfig) -> Self {
        Self {
            config,
            printer: AstPrinter::new(PrintOptions {
                quoting: config.quoting,
            }),
            errors: ErrorCollector::new(),
        }
    }

    /// Returns the processor's configuration.
    #[must_use]
    pub const fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Processes one command.
    ///
    /// Lexer errors stop the command before parsing. Diagnostics go to
    /// `err`; AST output goes to `out`. Only I/O and serialization failures
    /// are returned as errors.
    pub fn process<O: Write, E: Write>(
        &mut self,
        command: &str,
        out: &mut O,
        err: &mut E,
    ) -> Result<Outcome> {
        self.errors.clear();

        let tokens = Lexer::new(&mut self.errors).tokenize(command);
        if self.errors.has_lex_errors() {
            debug!(
                errors = self.errors.diagnostics().len(),
                "rejected command with lexer errors"
            );
            write_diagnostics(err, self.errors.diagnostics())?;
            return Ok(Outcome::LexError);
        }

        if tokens.iter().all(Token::is_eof) {
            return Ok(Outcome::Success);
        }

        let statements = Parser::new(&mut self.errors).parse(command, &tokens);
        if self.errors.has_parse_errors() {
            debug!(
                errors = self.errors.diagnostics().len(),
                "rejected command with parser errors"
            );
            write_diagnostics(err, self.errors.diagnostics())?;
            return Ok(Outcome::ParseError);
        }

        debug!(statements = statements.len(), "processed command");
        if self.config.ast_debug {
            self.write_ast(out, &statements)?;
        }
        Ok(Outcome::Success)
    }

    fn write_ast<O: Write>(&self, out: &mut O, statements: &[Statement]) -> Result<()> {
        match self.config.format {
            OutputFormat::Text => writeln!(out, "{}", self.printer.print(statements))?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, &AstDump { statements })?;
                writeln!(out)?;
            }
        }
        Ok(())
    }
}
