//! Tests for SELECT statements: items, aliases, FROM, WHERE and LIMIT.

mod common;
use common::*;

use dimadb_core::ast::{
    BinaryOp, Expr, FromClause, Identifier, SelectItem, Statement, TableRef,
};

// ===================================================================
// Whole statements
// ===================================================================

#[test]
fn select_with_where_and_limit() {
    let s = parse_select("SELECT name, age FROM users WHERE age > 30 LIMIT 10;");

    assert_eq!(
        s.items,
        vec![
            SelectItem::expr(Expr::column("name")),
            SelectItem::expr(Expr::column("age")),
        ]
    );
    assert_eq!(
        s.from,
        Some(FromClause {
            table: TableRef::new("users"),
        })
    );
    assert_eq!(
        s.where_clause.map(|w| w.expr),
        Some(Expr::column("age").gt(Expr::number(30.0)))
    );
    assert_eq!(s.limit, Some(10));
    round_trip("SELECT name, age FROM users WHERE age > 30 LIMIT 10;");
}

#[test]
fn select_star_and_qualified_star() {
    let s = parse_select("SELECT *, users.* FROM users;");
    assert_eq!(
        s.items,
        vec![
            SelectItem::Wildcard,
            SelectItem::QualifiedWildcard(Identifier::new("users")),
        ]
    );
    round_trip("SELECT *, users.* FROM users;");
}

#[test]
fn select_without_from() {
    let s = parse_select("SELECT 1 + 1;");
    assert!(s.from.is_none());
    assert_eq!(
        s.items,
        vec![SelectItem::expr(
            Expr::number(1.0).binary(BinaryOp::Add, Expr::number(1.0))
        )]
    );
}

#[test]
fn keywords_are_case_insensitive() {
    let s = parse_select("select id from users where active = true limit 3;");
    assert_eq!(s.items.len(), 1);
    assert_eq!(s.limit, Some(3));
    assert_eq!(
        s.where_clause.map(|w| w.expr),
        Some(Expr::column("active").eq(Expr::boolean(true)))
    );
}

#[test]
fn identifiers_keep_source_case() {
    let s = parse_select("SELECT UserName FROM Accounts;");
    assert_eq!(s.items, vec![SelectItem::expr(Expr::column("UserName"))]);
    assert_eq!(s.from.unwrap().table.table, Identifier::new("Accounts"));
}

#[test]
fn quoted_identifiers() {
    let s = parse_select("SELECT \"Full Name\" FROM \"People\" AS \"p\";");
    assert_eq!(
        s.items,
        vec![SelectItem::expr(Expr::Column {
            table: None,
            column: Identifier::quoted("Full Name"),
        })]
    );
    let table = s.from.unwrap().table;
    assert_eq!(table.table, Identifier::quoted("People"));
    assert_eq!(table.alias, Some(Identifier::quoted("p")));
}

// ===================================================================
// Select items and aliases
// ===================================================================

#[test]
fn qualified_column() {
    let s = parse_select("SELECT u.id FROM users u;");
    assert_eq!(
        s.items,
        vec![SelectItem::expr(Expr::qualified_column("u", "id"))]
    );
    assert_eq!(
        s.from.unwrap().table,
        TableRef::new("users").with_alias("u")
    );
}

#[test]
fn alias_with_as() {
    let s = parse_select("SELECT name AS n, age AS a FROM users;");
    assert_eq!(
        s.items,
        vec![
            SelectItem::aliased(Expr::column("name"), "n"),
            SelectItem::aliased(Expr::column("age"), "a"),
        ]
    );
}

#[test]
fn bare_alias_is_greedy() {
    // A second identifier always aliases the first.
    let s = parse_select("SELECT a b FROM t;");
    assert_eq!(s.items, vec![SelectItem::aliased(Expr::column("a"), "b")]);
}

#[test]
fn expression_items_take_aliases() {
    let s = parse_select("SELECT price * 2 AS doubled, 'x' label FROM items;");
    assert_eq!(
        s.items,
        vec![
            SelectItem::aliased(
                Expr::column("price").binary(BinaryOp::Mul, Expr::number(2.0)),
                "doubled"
            ),
            SelectItem::aliased(Expr::string("x"), "label"),
        ]
    );
    round_trip("SELECT price * 2 AS doubled, 'x' label FROM items;");
}

#[test]
fn table_alias_with_as() {
    let s = parse_select("SELECT o.total FROM orders AS o WHERE o.total > 100;");
    assert_eq!(
        s.from.unwrap().table,
        TableRef::new("orders").with_alias("o")
    );
}

// ===================================================================
// LIMIT
// ===================================================================

#[test]
fn limit_zero() {
    assert_eq!(parse_select("SELECT 1 LIMIT 0;").limit, Some(0));
}

#[test]
fn limit_with_where() {
    let s = parse_select("SELECT * FROM t WHERE a = 1 LIMIT 25;");
    assert!(s.where_clause.is_some());
    assert_eq!(s.limit, Some(25));
}

#[test]
fn limit_accepts_whole_decimal() {
    assert_eq!(parse_select("SELECT 1 LIMIT 5.0;").limit, Some(5));
}

#[test]
fn limit_largest_exact_integer() {
    let n = 1u64 << 53;
    assert_eq!(parse_select(&format!("SELECT 1 LIMIT {n};")).limit, Some(n));
}

// ===================================================================
// Multiple statements
// ===================================================================

#[test]
fn several_statements_in_order() {
    let statements = parse("SELECT 1; SELECT 2;\nSELECT 3;");
    assert_eq!(statements.len(), 3);
    let items: Vec<_> = statements
        .iter()
        .filter_map(Statement::as_select)
        .map(|s| s.items.clone())
        .collect();
    assert_eq!(items[2], vec![SelectItem::expr(Expr::number(3.0))]);
}

#[test]
fn empty_statements_are_skipped() {
    assert!(parse("").is_empty());
    assert!(parse(";;;").is_empty());
    assert_eq!(parse(";SELECT 1;;").len(), 1);
}
