//! Tokenizer implementation.

use tracing::debug;

use super::{Keyword, LiteralValue, Span, Token, TokenKind};
use crate::error::LexError;
use crate::reporter::{NoopReporter, Reporter};

/// A lexer that turns query text into tokens.
///
/// Malformed lexemes are handed to the reporter and skipped; scanning
/// always runs to the end of the input.
#[derive(Debug, Default)]
pub struct Lexer<R = NoopReporter> {
    reporter: R,
}

impl<R: Reporter> Lexer<R> {
    /// Creates a lexer that reports to `reporter`.
    #[must_use]
    pub const fn new(reporter: R) -> Self {
        Self { reporter }
    }

    /// Consumes the lexer, returning the reporter.
    #[must_use]
    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// Tokenizes the entire input.
    ///
    /// The result is never empty and always ends with exactly one
    /// [`TokenKind::Eof`] token positioned at `source.len()`.
    pub fn tokenize(&mut self, source: &str) -> Vec<Token> {
        let mut scanner = Scanner::new(source, &mut self.reporter);
        scanner.run();
        debug!(
            tokens = scanner.tokens.len(),
            errors = scanner.errors,
            lines = scanner.line,
            "tokenized query"
        );
        scanner.tokens
    }
}

/// Cursor state for a single `tokenize` call.
struct Scanner<'a, 'r, R> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
    /// The current line.
    line: usize,
    /// The line the current token started on.
    start_line: usize,
    tokens: Vec<Token>,
    errors: usize,
    reporter: &'r mut R,
}

impl<'a, 'r, R: Reporter> Scanner<'a, 'r, R> {
    fn new(input: &'a str, reporter: &'r mut R) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            line: 1,
            start_line: 1,
            tokens: Vec::new(),
            errors: 0,
            reporter,
        }
    }

    fn run(&mut self) {
        while self.peek().is_some() {
            self.start = self.pos;
            self.start_line = self.line;
            self.scan_token();
        }
        self.tokens.push(Token::eof(self.input.len(), self.line));
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    /// Consumes the current character if it is `expected`.
    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Creates a token spanning from start to the current position.
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, Span::new(self.start, self.pos), self.start_line)
    }

    fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    fn error(&mut self, line: usize, position: usize, message: impl Into<String>) {
        self.errors += 1;
        self.reporter
            .report_lex_error(LexError::new(line, position, message));
    }

    fn scan_token(&mut self) {
        let Some(c) = self.advance() else {
            return;
        };

        let kind = match c {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            ';' => TokenKind::Semicolon,
            '*' => TokenKind::Star,
            '+' => TokenKind::Plus,
            '=' => TokenKind::Equal,
            '/' => TokenKind::Slash,
            '-' => {
                if self.match_char('-') {
                    self.skip_line_comment();
                    return;
                }
                TokenKind::Minus
            }
            '>' => {
                if self.match_char('=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                }
            }
            '<' => {
                if self.match_char('=') {
                    TokenKind::LessEqual
                } else if self.match_char('>') {
                    TokenKind::NotEqual
                } else {
                    TokenKind::Less
                }
            }
            '|' if self.match_char('|') => TokenKind::Concat,

            // Whitespace; `advance` already counted newlines.
            ' ' | '\t' | '\r' | '\n' => return,

            '\'' => return self.scan_string(),
            '"' => return self.scan_quoted_identifier(),
            c if c.is_ascii_digit() => return self.scan_number(),
            c if c.is_ascii_alphabetic() || c == '_' => return self.scan_identifier(),

            other => {
                let line = self.start_line;
                let position = self.start;
                self.error(line, position, format!("Unexpected character: {other}"));
                return;
            }
        };

        let token = self.make_token(kind);
        self.push(token);
    }

    /// Skips to the end of the line, leaving the newline in place.
    fn skip_line_comment(&mut self) {
        while self.peek().is_some_and(|c| c != '\n') {
            self.advance();
        }
    }

    /// Scans a string literal; the opening quote is already consumed.
    fn scan_string(&mut self) {
        let mut value = String::new();

        loop {
            match self.peek() {
                Some('\'') => {
                    self.advance();
                    // A doubled quote is an escaped quote.
                    if self.match_char('\'') {
                        value.push('\'');
                    } else {
                        break;
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
                None => {
                    let (line, position) = (self.line, self.pos);
                    self.error(line, position, "Unterminated string");
                    return;
                }
            }
        }

        let token = self
            .make_token(TokenKind::StringLiteral)
            .with_literal(LiteralValue::Text(value));
        self.push(token);
    }

    /// Scans a double-quoted identifier; the opening quote is already consumed.
    fn scan_quoted_identifier(&mut self) {
        let content_start = self.pos;

        loop {
            match self.peek() {
                Some('"') => break,
                Some(_) => {
                    self.advance();
                }
                None => {
                    let (line, position) = (self.line, self.pos);
                    self.error(line, position, "Unterminated quoted identifier");
                    return;
                }
            }
        }

        let content = self.input[content_start..self.pos].to_owned();
        self.advance(); // closing quote

        let token = self
            .make_token(TokenKind::Identifier)
            .with_literal(LiteralValue::Text(content))
            .quoted();
        self.push(token);
    }

    /// Scans a number; the first digit is already consumed.
    fn scan_number(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        // A trailing '.' without a digit after it is left for the Dot token.
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let text = &self.input[self.start..self.pos];
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => {
                let token = self
                    .make_token(TokenKind::NumberLiteral)
                    .with_literal(LiteralValue::Number(value));
                self.push(token);
            }
            Ok(_) => {
                let (line, position) = (self.start_line, self.start);
                self.error(line, position, "Invalid number: out of range");
            }
            Err(e) => {
                let (line, position) = (self.start_line, self.start);
                self.error(line, position, format!("Invalid number: {e}"));
            }
        }
    }

    /// Scans an identifier or keyword; the first character is already consumed.
    fn scan_identifier(&mut self) {
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.advance();
        }

        let text = &self.input[self.start..self.pos];
        let token = match Keyword::from_str(text) {
            Some(kw @ (Keyword::True | Keyword::False)) => self
                .make_token(TokenKind::Keyword(kw))
                .with_literal(LiteralValue::Boolean(kw == Keyword::True)),
            Some(kw) => self.make_token(TokenKind::Keyword(kw)),
            None => self.make_token(TokenKind::Identifier),
        };
        self.push(token);
    }
}
