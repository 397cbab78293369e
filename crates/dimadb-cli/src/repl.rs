//! Interactive read-eval-print loop.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::Result;
use crate::processor::CommandProcessor;

/// Prompt written before each line is read.
pub const PROMPT: &str = "DimaDB> ";

const BANNER: &str = "Welcome to DimaDB REPL!\nType 'exit' to quit.";
const GOODBYE: &str = "Exiting DimaDB REPL. Goodbye!";

/// Reads commands line by line and hands each to a [`CommandProcessor`].
#[derive(Debug)]
pub struct Repl {
    processor: CommandProcessor,
}

impl Repl {
    /// Creates a REPL around `processor`.
    #[must_use]
    pub const fn new(processor: CommandProcessor) -> Self {
        Self { processor }
    }

    /// Runs until end of input or an `exit` line.
    ///
    /// `exit` is matched case-insensitively after trimming. Returns the
    /// number of commands processed.
    pub fn run<I: BufRead, O: Write, E: Write>(
        &mut self,
        input: I,
        out: &mut O,
        err: &mut E,
    ) -> Result<usize> {
        writeln!(out, "{BANNER}")?;

        let mut lines = input.lines();
        let mut processed = 0;
        loop {
            write!(out, "{PROMPT}")?;
            out.flush()?;

            let Some(line) = lines.next().transpose()? else {
                // Keep the goodbye line off the prompt.
                writeln!(out)?;
                break;
            };
            if line.trim().eq_ignore_ascii_case("exit") {
                break;
            }

            let outcome = self.processor.process(&line, out, err)?;
            debug!(?outcome, "command finished");
            processed += 1;
        }

        writeln!(out, "{GOODBYE}")?;
        Ok(processed)
    }
}
