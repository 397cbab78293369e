//! Parser
//!
//! A hand-written recursive descent parser with Pratt expression parsing
//! and statement-level error recovery.

mod parser;
mod pratt;

pub use parser::Parser;
