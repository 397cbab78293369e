//! Text format for lexer and parser diagnostics.

use std::fmt;
use std::io::{self, Write};

use dimadb_core::{Diagnostic, LexError, ParseError};

/// Display adapter that renders a diagnostic the way the shell prints it.
///
/// ```text
/// [Line 1, Position 7] Lexer Error: Unexpected character: $
/// [Line 1, Position 7] Parser Error at 'FROM': Expect expression
/// [Line 1, Position 8] Parser Error at end: Expect expression
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Formatted<'a>(pub &'a Diagnostic);

impl fmt::Display for Formatted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Diagnostic::Lex(e) => write_lex_error(f, e),
            Diagnostic::Parse(e) => write_parse_error(f, e),
        }
    }
}

fn write_lex_error(f: &mut fmt::Formatter<'_>, e: &LexError) -> fmt::Result {
    write!(
        f,
        "[Line {}, Position {}] Lexer Error: {}",
        e.line, e.position, e.message
    )
}

fn write_parse_error(f: &mut fmt::Formatter<'_>, e: &ParseError) -> fmt::Result {
    write!(
        f,
        "[Line {}, Position {}] Parser Error ",
        e.token.line,
        e.token.position()
    )?;
    if e.at_end() {
        write!(f, "at end: {}", e.message)
    } else {
        write!(f, "at '{}': {}", e.lexeme, e.message)
    }
}

/// Formats a single diagnostic.
#[must_use]
pub fn format_diagnostic(diagnostic: &Diagnostic) -> String {
    Formatted(diagnostic).to_string()
}

/// Writes every diagnostic on its own line, in order.
pub fn write_diagnostics<W: Write>(out: &mut W, diagnostics: &[Diagnostic]) -> io::Result<()> {
    for diagnostic in diagnostics {
        writeln!(out, "{}", Formatted(diagnostic))?;
    }
    Ok(())
}
