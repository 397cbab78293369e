//! Token types for the DimaDB lexer.

use serde::Serialize;

use super::Span;

/// Reserved words of the query language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Keyword {
    // Statements and clauses
    Select,
    From,
    Where,
    Create,
    Table,
    Insert,
    Into,
    Values,
    Limit,
    As,

    // Logical operators
    And,
    Or,
    Not,

    // Literal keywords
    Null,
    True,
    False,

    // Column types
    Int,
    Bigint,
    Text,
}

impl Keyword {
    /// Attempts to parse a keyword from a string (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SELECT" => Some(Self::Select),
            "FROM" => Some(Self::From),
            "WHERE" => Some(Self::Where),
            "CREATE" => Some(Self::Create),
            "TABLE" => Some(Self::Table),
            "INSERT" => Some(Self::Insert),
            "INTO" => Some(Self::Into),
            "VALUES" => Some(Self::Values),
            "LIMIT" => Some(Self::Limit),
            "AS" => Some(Self::As),
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            "NOT" => Some(Self::Not),
            "NULL" => Some(Self::Null),
            "TRUE" => Some(Self::True),
            "FALSE" => Some(Self::False),
            "INT" => Some(Self::Int),
            "BIGINT" => Some(Self::Bigint),
            "TEXT" => Some(Self::Text),
            _ => None,
        }
    }

    /// Returns the keyword as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::From => "FROM",
            Self::Where => "WHERE",
            Self::Create => "CREATE",
            Self::Table => "TABLE",
            Self::Insert => "INSERT",
            Self::Into => "INTO",
            Self::Values => "VALUES",
            Self::Limit => "LIMIT",
            Self::As => "AS",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::Null => "NULL",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Int => "INT",
            Self::Bigint => "BIGINT",
            Self::Text => "TEXT",
        }
    }

    /// Returns true for keywords that begin a statement.
    #[must_use]
    pub const fn starts_statement(&self) -> bool {
        matches!(self, Self::Select | Self::Create | Self::Insert)
    }
}

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// A reserved word.
    Keyword(Keyword),
    /// A bare or double-quoted identifier.
    Identifier,
    /// A decimal number (e.g. `42`, `3.5`).
    NumberLiteral,
    /// A single-quoted string.
    StringLiteral,

    // Operators
    /// =
    Equal,
    /// <>
    NotEqual,
    /// <
    Less,
    /// <=
    LessEqual,
    /// >
    Greater,
    /// >=
    GreaterEqual,
    /// +
    Plus,
    /// -
    Minus,
    /// /
    Slash,
    /// ||
    Concat,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// *
    Star,
    /// .
    Dot,

    /// End of input.
    Eof,
}

/// Decoded value carried by literal-bearing tokens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LiteralValue {
    /// Value of a number token.
    Number(f64),
    /// Unescaped content of a string token or quoted identifier.
    Text(String),
    /// Value of a `TRUE`/`FALSE` keyword.
    Boolean(bool),
}

/// A token with its location in the source code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// Byte range of the lexeme.
    pub span: Span,
    /// Decoded literal value, if any.
    pub literal: Option<LiteralValue>,
    /// 1-based line the token starts on.
    pub line: usize,
    /// Whether this identifier was written in double quotes.
    pub quoted: bool,
}

impl Token {
    /// Creates a new token without a literal value.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span, line: usize) -> Self {
        Self {
            kind,
            span,
            literal: None,
            line,
            quoted: false,
        }
    }

    /// Creates the end-of-input token for a source of `len` bytes.
    #[must_use]
    pub const fn eof(len: usize, line: usize) -> Self {
        Self::new(TokenKind::Eof, Span::empty_at(len), line)
    }

    /// Attaches a decoded literal value.
    #[must_use]
    pub fn with_literal(mut self, literal: LiteralValue) -> Self {
        self.literal = Some(literal);
        self
    }

    /// Marks the token as a quoted identifier.
    #[must_use]
    pub fn quoted(mut self) -> Self {
        self.quoted = true;
        self
    }

    /// Returns the byte offset where the lexeme starts.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.span.start
    }

    /// Returns the raw lexeme from the source the token was scanned from.
    #[must_use]
    pub fn lexeme<'s>(&self, source: &'s str) -> &'s str {
        self.span.slice(source)
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword(kw) => Some(kw),
            _ => None,
        }
    }

    /// Returns the decoded number for number tokens.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match &self.literal {
            Some(LiteralValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

    /// Returns the decoded text of string tokens and quoted identifiers.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match &self.literal {
            Some(LiteralValue::Text(s)) => Some(s),
            _ => None,
        }
    }
}
