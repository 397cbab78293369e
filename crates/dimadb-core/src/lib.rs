//! # dimadb-core
//!
//! The query front end of DimaDB: a lexer, a recursive descent parser with
//! Pratt expression parsing and error recovery, the typed AST it produces,
//! and a printer that renders the AST back to canonical text.
//!
//! ```rust
//! use dimadb_core::{parse, tokenize, Statement};
//!
//! let source = "CREATE TABLE users (id INT, name TEXT); SELECT * FROM users LIMIT 5;";
//! let tokens = tokenize(source);
//! let statements = parse(source, &tokens);
//!
//! assert_eq!(statements.len(), 2);
//! assert!(matches!(statements[1], Statement::Select(_)));
//! ```
//!
//! ## Diagnostics
//!
//! Malformed input never stops the front end. Lexer and parser errors go to
//! a [`Reporter`]; the [`ErrorCollector`] keeps them for inspection:
//!
//! ```rust
//! use dimadb_core::{ErrorCollector, Lexer, Parser};
//!
//! let source = "SELECT FROM t; SELECT a FROM t;";
//! let mut errors = ErrorCollector::new();
//! let tokens = Lexer::new(&mut errors).tokenize(source);
//! let statements = Parser::new(&mut errors).parse(source, &tokens);
//!
//! assert_eq!(statements.len(), 1);
//! assert_eq!(errors.parse_errors().count(), 1);
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod reporter;

pub use ast::{Expr, Statement};
pub use error::{Diagnostic, LexError, ParseError};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;
pub use printer::{AstPrinter, IdentifierQuoting, PrintOptions, print};
pub use reporter::{ErrorCollector, NoopReporter, Reporter};

/// Tokenizes `source`, discarding diagnostics.
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(NoopReporter).tokenize(source)
}

/// Parses tokens scanned from `source`, discarding diagnostics.
#[must_use]
pub fn parse(source: &str, tokens: &[Token]) -> Vec<Statement> {
    Parser::new(NoopReporter).parse(source, tokens)
}
