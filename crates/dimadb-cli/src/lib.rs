//! # dimadb-cli
//!
//! Drives the DimaDB front end from the command line.
//!
//! A [`CommandProcessor`] runs one command through the lexer and parser,
//! writes diagnostics in the shell's text format and maps the result to an
//! exit status. [`Repl`] feeds it one line at a time.
//!
//! ```
//! use dimadb_cli::{CommandProcessor, Outcome, ProcessorConfig};
//!
//! let mut processor = CommandProcessor::new(ProcessorConfig::default());
//! let (mut out, mut err) = (Vec::new(), Vec::new());
//!
//! let outcome = processor.process("SELECT FROM users;", &mut out, &mut err).unwrap();
//! assert_eq!(outcome, Outcome::ParseError);
//! assert_eq!(outcome.exit_code(), 3);
//! assert_eq!(
//!     String::from_utf8(err).unwrap(),
//!     "[Line 1, Position 7] Parser Error at 'FROM': Expect expression\n"
//! );
//! ```

pub mod diagnostic;
pub mod error;
pub mod processor;
pub mod repl;

pub use error::{CliError, Result};
pub use processor::{CommandProcessor, OutputFormat, Outcome, ProcessorConfig};
pub use repl::Repl;
