#![allow(dead_code)]

use dimadb_core::ast::{
    CreateTableStatement, Expr, InsertStatement, SelectItem, SelectStatement, Statement,
};
use dimadb_core::lexer::Lexer;
use dimadb_core::{ErrorCollector, LexError, ParseError, Parser, Token, print};

/// Tokenizes `sql`, returning the tokens and every lexer error.
pub fn tokenize_with_errors(sql: &str) -> (Vec<Token>, Vec<LexError>) {
    let mut collector = ErrorCollector::new();
    let tokens = Lexer::new(&mut collector).tokenize(sql);
    let errors = collector.lex_errors().cloned().collect();
    (tokens, errors)
}

/// Parses `sql`, returning the statements and every parser error.
pub fn parse_with_errors(sql: &str) -> (Vec<Statement>, Vec<ParseError>) {
    let (tokens, lex_errors) = tokenize_with_errors(sql);
    assert!(lex_errors.is_empty(), "Lexer errors for: {sql}\n{lex_errors:?}");

    let mut collector = ErrorCollector::new();
    let statements = Parser::new(&mut collector).parse(sql, &tokens);
    let errors = collector.parse_errors().cloned().collect();
    (statements, errors)
}

/// Parses `sql`, failing on any diagnostic.
pub fn parse(sql: &str) -> Vec<Statement> {
    let (statements, errors) = parse_with_errors(sql);
    assert!(errors.is_empty(), "Failed to parse: {sql}\nErrors: {errors:?}");
    statements
}

/// Parses exactly one statement.
pub fn parse_one(sql: &str) -> Statement {
    let mut statements = parse(sql);
    assert_eq!(statements.len(), 1, "Expected one statement in: {sql}");
    statements.remove(0)
}

/// Parses `sql`, expecting exactly one parser error.
pub fn parse_err(sql: &str) -> ParseError {
    let (_, mut errors) = parse_with_errors(sql);
    assert_eq!(errors.len(), 1, "Expected one parse error for: {sql}\n{errors:?}");
    errors.remove(0)
}

pub fn parse_select(sql: &str) -> SelectStatement {
    match parse_one(sql) {
        Statement::Select(s) => s,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}

pub fn parse_create(sql: &str) -> CreateTableStatement {
    match parse_one(sql) {
        Statement::CreateTable(c) => c,
        other => panic!("Expected CREATE TABLE, got {other:?}"),
    }
}

pub fn parse_insert(sql: &str) -> InsertStatement {
    match parse_one(sql) {
        Statement::Insert(i) => i,
        other => panic!("Expected INSERT, got {other:?}"),
    }
}

/// Returns the expression of the first select item.
pub fn select_expr(sql: &str) -> Expr {
    match parse_select(sql).items.into_iter().next() {
        Some(SelectItem::Expr { expr, .. }) => expr,
        other => panic!("Expected expression item, got {other:?}"),
    }
}

/// Returns the WHERE condition.
pub fn where_expr(sql: &str) -> Expr {
    parse_select(sql)
        .where_clause
        .unwrap_or_else(|| panic!("Expected WHERE clause in: {sql}"))
        .expr
}

/// Verifies that printing produces a fixed point:
/// print(parse(sql)) can be re-parsed and yields the same
/// string again.
pub fn round_trip(sql: &str) {
    let rendered1 = print(&parse(sql));
    let rendered2 = print(&parse(&rendered1));
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
}
