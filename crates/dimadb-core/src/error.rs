//! Diagnostics produced while scanning and parsing.
//!
//! Neither error is fatal: the lexer and parser hand them to a
//! [`Reporter`](crate::reporter::Reporter) and keep going.

use crate::lexer::Token;

/// A malformed lexeme.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at line {line}, position {position}")]
pub struct LexError {
    /// 1-based line of the offending input.
    pub line: usize,
    /// Byte offset of the offending input.
    pub position: usize,
    /// Human-readable message.
    pub message: String,
}

impl LexError {
    /// Creates a new lexer error.
    #[must_use]
    pub fn new(line: usize, position: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            position,
            message: message.into(),
        }
    }
}

/// A grammar violation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message} at line {}, position {}", .token.line, .token.span.start)]
pub struct ParseError {
    /// The offending token.
    pub token: Token,
    /// Source text of the offending token (empty at end of input).
    pub lexeme: String,
    /// Human-readable message.
    pub message: String,
}

impl ParseError {
    /// Creates a parse error for `token`, capturing its lexeme from `source`.
    #[must_use]
    pub fn new(source: &str, token: &Token, message: impl Into<String>) -> Self {
        Self {
            token: token.clone(),
            lexeme: token.lexeme(source).to_owned(),
            message: message.into(),
        }
    }

    /// Returns true if the error was raised at end of input.
    #[must_use]
    pub const fn at_end(&self) -> bool {
        self.token.is_eof()
    }
}

/// Either kind of diagnostic, in the order it was reported.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Diagnostic {
    /// Raised by the lexer.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// Raised by the parser.
    #[error(transparent)]
    Parse(#[from] ParseError),
}
