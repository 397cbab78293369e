//! Lexer
//!
//! A hand-written scanner that turns query text into a stream of tokens,
//! reporting malformed lexemes without stopping.

mod span;
mod token;
mod tokenizer;

pub use span::Span;
pub use token::{Keyword, LiteralValue, Token, TokenKind};
pub use tokenizer::Lexer;
