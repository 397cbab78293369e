//! Statement parser implementation.

use tracing::{debug, trace};

use super::pratt::{infix_binding_power, token_to_binary_op, token_to_unary_op};
use crate::ast::{
    ColumnDef, CreateTableStatement, Expr, FromClause, Identifier, InsertStatement, Literal,
    SelectItem, SelectStatement, Statement, TableRef, TypeName, WhereClause,
};
use crate::error::ParseError;
use crate::lexer::{Keyword, Token, TokenKind};
use crate::reporter::{NoopReporter, Reporter};

/// Exclusive upper bound of a LIMIT value (2^64).
const LIMIT_BOUND: f64 = 18_446_744_073_709_551_616.0;

/// Parser for token streams produced by [`Lexer`](crate::lexer::Lexer).
///
/// A statement that fails to parse is reported and skipped; parsing
/// resumes at the next statement boundary.
#[derive(Debug, Default)]
pub struct Parser<R = NoopReporter> {
    reporter: R,
}

impl<R: Reporter> Parser<R> {
    /// Creates a parser that reports to `reporter`.
    #[must_use]
    pub const fn new(reporter: R) -> Self {
        Self { reporter }
    }

    /// Consumes the parser, returning the reporter.
    #[must_use]
    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// Parses every statement in `tokens`.
    ///
    /// `source` is the text the tokens were scanned from. Statements that
    /// fail to parse are left out of the result.
    pub fn parse(&mut self, source: &str, tokens: &[Token]) -> Vec<Statement> {
        let mut cursor = Cursor::new(source, tokens, &mut self.reporter);
        let statements = cursor.parse_program();
        debug!(
            statements = statements.len(),
            errors = cursor.errors,
            "parsed query"
        );
        statements
    }
}

/// Cursor state for a single `parse` call.
struct Cursor<'a, 'r, R> {
    source: &'a str,
    tokens: &'a [Token],
    /// Stands in for a missing trailing `Eof`.
    eof: Token,
    current: usize,
    errors: usize,
    reporter: &'r mut R,
}

impl<'a, 'r, R: Reporter> Cursor<'a, 'r, R> {
    fn new(source: &'a str, tokens: &'a [Token], reporter: &'r mut R) -> Self {
        let line = tokens.last().map_or(1, |t| t.line);
        Self {
            source,
            tokens,
            eof: Token::eof(source.len(), line),
            current: 0,
            errors: 0,
            reporter,
        }
    }

    fn parse_program(&mut self) -> Vec<Statement> {
        let mut statements = vec![];

        while !self.is_at_end() {
            while self.match_kind(TokenKind::Semicolon) {}

            if self.is_at_end() {
                break;
            }

            match self.parse_statement() {
                Ok(statement) => {
                    trace!(kind = statement.kind_name(), "parsed statement");
                    statements.push(statement);
                }
                Err(error) => {
                    debug!(
                        line = error.token.line,
                        position = error.token.position(),
                        message = %error.message,
                        "skipping malformed statement"
                    );
                    self.errors += 1;
                    self.reporter.report_parse_error(error);
                    self.synchronize();
                }
            }
        }

        statements
    }

    /// Skips to the next statement boundary.
    fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self
                .previous()
                .is_some_and(|t| t.kind == TokenKind::Semicolon)
            {
                return;
            }

            if self.peek().as_keyword().is_some_and(|kw| kw.starts_statement()) {
                return;
            }

            self.advance();
        }
    }

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        match self.peek().kind {
            TokenKind::Keyword(Keyword::Select) => {
                self.advance();
                Ok(Statement::Select(self.parse_select_statement()?))
            }
            TokenKind::Keyword(Keyword::Create) => {
                self.advance();
                self.expect_keyword(Keyword::Table, "Expect 'TABLE' after CREATE")?;
                Ok(Statement::CreateTable(self.parse_create_table_statement()?))
            }
            TokenKind::Keyword(Keyword::Insert) => {
                self.advance();
                self.expect_keyword(Keyword::Into, "Expect 'INTO' after INSERT")?;
                Ok(Statement::Insert(self.parse_insert_statement()?))
            }
            _ => Err(self.error("Expect statement")),
        }
    }

    /// Parses a SELECT statement after the SELECT keyword.
    fn parse_select_statement(&mut self) -> Result<SelectStatement, ParseError> {
        let items = self.parse_select_items()?;

        let from = if self.match_keyword(Keyword::From) {
            Some(FromClause {
                table: self.parse_table_ref()?,
            })
        } else {
            None
        };

        let where_clause = if self.match_keyword(Keyword::Where) {
            Some(WhereClause {
                expr: self.parse_expression(0)?,
            })
        } else {
            None
        };

        let limit = if self.check_keyword(Keyword::Limit) {
            Some(self.parse_limit()?)
        } else {
            None
        };

        self.expect(TokenKind::Semicolon, "Expect ';' after SELECT statement")?;

        Ok(SelectStatement {
            items,
            from,
            where_clause,
            limit,
        })
    }

    fn parse_select_items(&mut self) -> Result<Vec<SelectItem>, ParseError> {
        let mut items = vec![];

        loop {
            items.push(self.parse_select_item()?);
            if !self.match_kind(TokenKind::Comma) {
                break;
            }
        }

        Ok(items)
    }

    fn parse_select_item(&mut self) -> Result<SelectItem, ParseError> {
        if self.match_kind(TokenKind::Star) {
            return Ok(SelectItem::Wildcard);
        }

        // table.*
        if self.check(TokenKind::Identifier)
            && self.peek_at(1).kind == TokenKind::Dot
            && self.peek_at(2).kind == TokenKind::Star
        {
            let table = self.identifier(self.peek());
            self.advance();
            self.advance();
            self.advance();
            return Ok(SelectItem::QualifiedWildcard(table));
        }

        let expr = self.parse_expression(0)?;
        let alias = self.parse_alias()?;
        Ok(SelectItem::Expr { expr, alias })
    }

    /// Parses `AS name` or a bare trailing identifier.
    fn parse_alias(&mut self) -> Result<Option<Identifier>, ParseError> {
        if self.match_keyword(Keyword::As) {
            return self
                .expect_identifier("Expect identifier after AS")
                .map(Some);
        }

        if self.check(TokenKind::Identifier) {
            let alias = self.identifier(self.peek());
            self.advance();
            return Ok(Some(alias));
        }

        Ok(None)
    }

    fn parse_table_ref(&mut self) -> Result<TableRef, ParseError> {
        let table = self.expect_identifier("Expect table name")?;
        let alias = self.parse_alias()?;
        Ok(TableRef { table, alias })
    }

    /// Parses `LIMIT [-] number`, rejecting values that are not row counts.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn parse_limit(&mut self) -> Result<u64, ParseError> {
        let limit_token = self.peek().clone();
        self.advance();

        let negative = self.match_kind(TokenKind::Minus);
        let number = self.expect(TokenKind::NumberLiteral, "Expect number after LIMIT")?;
        let value = self.number_value(&number)?;
        let value = if negative { -value } else { value };

        if !(0.0..LIMIT_BOUND).contains(&value) || value.fract() != 0.0 {
            return Err(ParseError::new(
                self.source,
                &limit_token,
                "LIMIT must be a non-negative integer",
            ));
        }

        Ok(value as u64)
    }

    /// Parses a CREATE TABLE statement after `CREATE TABLE`.
    fn parse_create_table_statement(&mut self) -> Result<CreateTableStatement, ParseError> {
        let table = self.expect_identifier("Expect table name")?;

        self.expect(
            TokenKind::LeftParen,
            "Expect '(' before column definitions",
        )?;

        let mut columns = vec![];
        loop {
            columns.push(self.parse_column_def()?);
            if !self.match_kind(TokenKind::Comma) {
                break;
            }
        }

        self.expect(
            TokenKind::RightParen,
            "Expect ')' after column definitions",
        )?;
        self.expect(
            TokenKind::Semicolon,
            "Expect ';' after CREATE TABLE statement",
        )?;

        Ok(CreateTableStatement { table, columns })
    }

    fn parse_column_def(&mut self) -> Result<ColumnDef, ParseError> {
        let column = self.expect_identifier("Expect column identifier in the column definition")?;

        let data_type = match self.peek().kind {
            TokenKind::Keyword(Keyword::Int) => TypeName::Int,
            TokenKind::Keyword(Keyword::Bigint) => TypeName::BigInt,
            TokenKind::Keyword(Keyword::Text) => TypeName::Text,
            _ => return Err(self.error("Unsupported type")),
        };
        self.advance();

        Ok(ColumnDef { column, data_type })
    }

    /// Parses an INSERT statement after `INSERT INTO`.
    fn parse_insert_statement(&mut self) -> Result<InsertStatement, ParseError> {
        let table = self.expect_identifier("Expect table name")?;

        self.match_keyword(Keyword::Values);

        self.expect(TokenKind::LeftParen, "Expect '(' before values")?;

        let mut values = vec![];
        loop {
            match self.parse_literal()? {
                Some(value) => values.push(value),
                None => return Err(self.error("Expect value expression")),
            }
            if !self.match_kind(TokenKind::Comma) {
                break;
            }
        }

        self.expect(TokenKind::RightParen, "Expect ')' after values")?;
        self.expect(
            TokenKind::Semicolon,
            "Expect ';' after INSERT INTO statement",
        )?;

        Ok(InsertStatement { table, values })
    }

    // --- Expressions ---

    /// Parses an expression using Pratt parsing.
    fn parse_expression(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_unary()?;

        loop {
            let kind = self.peek().kind;
            let Some((l_bp, r_bp)) = infix_binding_power(&kind) else {
                break;
            };

            if l_bp < min_bp {
                break;
            }

            let Some(op) = token_to_binary_op(&kind) else {
                break;
            };
            self.advance();

            let rhs = self.parse_expression(r_bp)?;
            lhs = lhs.binary(op, rhs);
        }

        Ok(lhs)
    }

    /// Parses a unary operator applied to a primary expression.
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if let Some(op) = token_to_unary_op(&self.peek().kind) {
            self.advance();
            let operand = self.parse_primary()?;
            return Ok(Expr::unary(op, operand));
        }

        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        if let Some(literal) = self.parse_literal()? {
            return Ok(literal);
        }

        match self.peek().kind {
            TokenKind::LeftParen => {
                self.advance();
                let expr = self.parse_expression(0)?;
                self.expect(TokenKind::RightParen, "Expect ')' after expression")?;
                Ok(expr.paren())
            }
            TokenKind::Identifier => {
                let first = self.identifier(self.peek());
                self.advance();

                if self.match_kind(TokenKind::Dot) {
                    let column = self.expect_identifier("Expect column name after '.'")?;
                    return Ok(Expr::Column {
                        table: Some(first),
                        column,
                    });
                }

                Ok(Expr::Column {
                    table: None,
                    column: first,
                })
            }
            _ => Err(self.error("Expect expression")),
        }
    }

    /// Consumes a literal token if there is one.
    fn parse_literal(&mut self) -> Result<Option<Expr>, ParseError> {
        let literal = match self.peek().kind {
            TokenKind::Keyword(Keyword::True) => Literal::Boolean(true),
            TokenKind::Keyword(Keyword::False) => Literal::Boolean(false),
            TokenKind::Keyword(Keyword::Null) => Literal::Null,
            TokenKind::NumberLiteral => Literal::Number(self.number_value(self.peek())?),
            TokenKind::StringLiteral => Literal::String(self.string_value(self.peek())),
            _ => return Ok(None),
        };
        self.advance();
        Ok(Some(Expr::Literal(literal)))
    }

    // --- Helper methods ---

    fn peek(&self) -> &Token {
        self.peek_at(0)
    }

    /// Returns the token `offset` positions ahead of the current one.
    fn peek_at(&self, offset: usize) -> &Token {
        self.tokens.get(self.current + offset).unwrap_or(&self.eof)
    }

    fn previous(&self) -> Option<&Token> {
        self.current
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
    }

    fn is_at_end(&self) -> bool {
        self.peek().is_eof()
    }

    /// Advances to the next token; a no-op at end of input.
    fn advance(&mut self) {
        if !self.is_at_end() {
            self.current += 1;
        }
    }

    /// Checks if the current token is of the given kind.
    fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    /// Checks if the current token is the given keyword.
    fn check_keyword(&self, keyword: Keyword) -> bool {
        self.check(TokenKind::Keyword(keyword))
    }

    fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_keyword(&mut self, keyword: Keyword) -> bool {
        self.match_kind(TokenKind::Keyword(keyword))
    }

    /// Expects the current token to be the given kind and returns it.
    fn expect(&mut self, kind: TokenKind, message: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            let token = self.peek().clone();
            self.advance();
            Ok(token)
        } else {
            Err(self.error(message))
        }
    }

    /// Expects the current token to be the given keyword.
    fn expect_keyword(&mut self, keyword: Keyword, message: &str) -> Result<(), ParseError> {
        self.expect(TokenKind::Keyword(keyword), message).map(|_| ())
    }

    /// Expects and returns an identifier.
    fn expect_identifier(&mut self, message: &str) -> Result<Identifier, ParseError> {
        if self.check(TokenKind::Identifier) {
            let identifier = self.identifier(self.peek());
            self.advance();
            Ok(identifier)
        } else {
            Err(self.error(message))
        }
    }

    /// Builds an error at the current token, or at the last real token
    /// once the input is exhausted.
    fn error(&self, message: &str) -> ParseError {
        let token = match self.previous() {
            Some(previous) if self.is_at_end() => previous,
            _ => self.peek(),
        };
        ParseError::new(self.source, token, message)
    }

    fn identifier(&self, token: &Token) -> Identifier {
        if token.quoted {
            let name = token
                .as_text()
                .unwrap_or_else(|| token.lexeme(self.source).trim_matches('"'));
            Identifier::quoted(name)
        } else {
            Identifier::new(token.lexeme(self.source))
        }
    }

    fn number_value(&self, token: &Token) -> Result<f64, ParseError> {
        if let Some(value) = token.as_number() {
            return Ok(value);
        }
        token
            .lexeme(self.source)
            .parse()
            .map_err(|_| ParseError::new(self.source, token, "Invalid decimal literal"))
    }

    fn string_value(&self, token: &Token) -> String {
        match token.as_text() {
            Some(text) => text.to_owned(),
            None => {
                let lexeme = token.lexeme(self.source);
                let inner = lexeme
                    .strip_prefix('\'')
                    .and_then(|s| s.strip_suffix('\''))
                    .unwrap_or(lexeme);
                inner.replace("''", "'")
            }
        }
    }
}
