//! Diagnostic sinks for the lexer and parser.

use crate::error::{Diagnostic, LexError, ParseError};

/// Receives diagnostics as they are raised.
///
/// Called synchronously; scanning or parsing continues after the call
/// returns.
pub trait Reporter {
    /// Called for every malformed lexeme.
    fn report_lex_error(&mut self, error: LexError);

    /// Called for every statement that fails to parse.
    fn report_parse_error(&mut self, error: ParseError);
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report_lex_error(&mut self, error: LexError) {
        (**self).report_lex_error(error);
    }

    fn report_parse_error(&mut self, error: ParseError) {
        (**self).report_parse_error(error);
    }
}

/// A reporter that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn report_lex_error(&mut self, _error: LexError) {}

    fn report_parse_error(&mut self, _error: ParseError) {}
}

/// A reporter that keeps every diagnostic in arrival order.
///
/// When shared across commands it must be [`clear`](Self::clear)ed
/// before each one.
#[derive(Debug, Clone, Default)]
pub struct ErrorCollector {
    diagnostics: Vec<Diagnostic>,
}

impl ErrorCollector {
    /// Creates an empty collector.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    /// Forgets everything collected so far.
    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }

    /// All diagnostics, oldest first.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns true if nothing has been reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Iterates over the lexer errors.
    pub fn lex_errors(&self) -> impl Iterator<Item = &LexError> {
        self.diagnostics.iter().filter_map(|d| match d {
            Diagnostic::Lex(e) => Some(e),
            Diagnostic::Parse(_) => None,
        })
    }

    /// Iterates over the parser errors.
    pub fn parse_errors(&self) -> impl Iterator<Item = &ParseError> {
        self.diagnostics.iter().filter_map(|d| match d {
            Diagnostic::Parse(e) => Some(e),
            Diagnostic::Lex(_) => None,
        })
    }

    /// Returns true if at least one lexer error was reported.
    #[must_use]
    pub fn has_lex_errors(&self) -> bool {
        self.lex_errors().next().is_some()
    }

    /// Returns true if at least one parser error was reported.
    #[must_use]
    pub fn has_parse_errors(&self) -> bool {
        self.parse_errors().next().is_some()
    }

    /// Takes the collected diagnostics, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

impl Reporter for ErrorCollector {
    fn report_lex_error(&mut self, error: LexError) {
        self.diagnostics.push(Diagnostic::Lex(error));
    }

    fn report_parse_error(&mut self, error: ParseError) {
        self.diagnostics.push(Diagnostic::Parse(error));
    }
}
