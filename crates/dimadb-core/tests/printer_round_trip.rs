//! Round-trip tests: printing a parsed statement and parsing the output
//! again reproduces the same tree, and printing is a fixed point.

mod common;
use common::*;

use dimadb_core::ast::{
    BinaryOp, ColumnDef, CreateTableStatement, Expr, FromClause, Identifier, InsertStatement,
    SelectItem, SelectStatement, Statement, TableRef, TypeName, UnaryOp, WhereClause,
};
use dimadb_core::lexer::Keyword;
use dimadb_core::{AstPrinter, IdentifierQuoting, PrintOptions, parse as parse_tokens, print, tokenize};

fn preserving() -> AstPrinter {
    AstPrinter::new(PrintOptions::default().with_quoting(IdentifierQuoting::Preserve))
}

fn reparse(text: &str) -> Vec<Statement> {
    let (statements, errors) = parse_with_errors(text);
    assert!(errors.is_empty(), "printed text does not parse:\n{text}\n{errors:?}");
    statements
}

// ===================================================================
// Fixed cases
// ===================================================================

#[test]
fn canonical_text() {
    let statements = parse(
        "select u.name n, u.* from users as u where not u.banned and u.age >= 21 limit 5;",
    );
    assert_eq!(
        print(&statements),
        "\nSELECT U.NAME AS N, U.*\nFROM USERS AS U\nWHERE NOT U.BANNED AND U.AGE >= 21\nLIMIT 5;\n"
    );
}

#[test]
fn fixed_point_cases() {
    for sql in [
        "SELECT * FROM t;",
        "SELECT a, b AS c FROM t x WHERE a <> 'q''s' LIMIT 0;",
        "SELECT -(1 + 2) * 3, 'a' || 'b';",
        "SELECT 0.5, 100, TRUE, FALSE, NULL;",
        "CREATE TABLE people (id BIGINT, name TEXT, age INT);",
        "INSERT INTO people VALUES (1, 'Ada', 36);",
        "SELECT 1; SELECT 2; INSERT INTO t (NULL);",
    ] {
        round_trip(sql);
    }
}

#[test]
fn stripped_quotes_change_the_tree() {
    // Without quotes the name is re-read as a plain identifier.
    let statements = parse("SELECT \"Name\" FROM t;");
    let printed = print(&statements);
    assert_eq!(printed, "\nSELECT Name\nFROM T;\n");

    let again = reparse(&printed);
    assert_ne!(again, statements);
    assert_eq!(print(&again), "\nSELECT NAME\nFROM T;\n");
}

#[test]
fn preserved_quotes_survive_exactly() {
    let sql = "SELECT \"Full Name\", \"t\".\"Id\" FROM \"My Table\" \"t\";";
    let statements = parse(sql);
    let printed = preserving().print(&statements);
    assert_eq!(
        printed,
        "\nSELECT \"Full Name\", \"t\".\"Id\"\nFROM \"My Table\" AS \"t\";\n"
    );
    assert_eq!(reparse(&printed), statements);
}

#[test]
fn largest_numbers_print_as_plain_digits() {
    let sql = format!("INSERT INTO T VALUES (1{});", "0".repeat(308));
    let statements = parse(&sql);
    let printed = print(&statements);
    assert!(!printed.contains("inf"));
    assert_eq!(reparse(&printed), statements);
}

#[test]
fn numbers_beyond_f64_never_reach_the_tree() {
    let sql = format!("SELECT {};", "9".repeat(400));
    let (tokens, errors) = tokenize_with_errors(&sql);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.starts_with("Invalid number"));
    assert!(parse_tokens(&sql, &tokens).is_empty());
}

// ===================================================================
// Generated statements
// ===================================================================

mod proptest_fuzz {
    use super::*;
    use proptest::prelude::*;

    fn arb_name() -> impl Strategy<Value = String> {
        "[A-Z_][A-Z0-9_]{0,6}".prop_filter("keyword", |s| Keyword::from_str(s).is_none())
    }

    /// Unquoted names are already upper-case so the printer leaves them
    /// unchanged.
    fn arb_identifier() -> impl Strategy<Value = Identifier> {
        prop_oneof![
            3 => arb_name().prop_map(Identifier::new),
            1 => "[a-zA-Z ][a-zA-Z0-9 _]{0,6}".prop_map(Identifier::quoted),
        ]
    }

    fn arb_literal() -> impl Strategy<Value = Expr> {
        prop_oneof![
            any::<bool>().prop_map(Expr::boolean),
            Just(Expr::null()),
            (0u32..1_000_000).prop_map(|n| Expr::number(f64::from(n))),
            (0u32..4000).prop_map(|n| Expr::number(f64::from(n) / 4.0)),
            "[a-zA-Z0-9 ']{0,8}".prop_map(Expr::string),
        ]
    }

    fn arb_binary_op() -> impl Strategy<Value = BinaryOp> {
        prop_oneof![
            Just(BinaryOp::And),
            Just(BinaryOp::Or),
            Just(BinaryOp::Eq),
            Just(BinaryOp::NotEq),
            Just(BinaryOp::Lt),
            Just(BinaryOp::LtEq),
            Just(BinaryOp::Gt),
            Just(BinaryOp::GtEq),
            Just(BinaryOp::Add),
            Just(BinaryOp::Sub),
            Just(BinaryOp::Mul),
            Just(BinaryOp::Div),
            Just(BinaryOp::Concat),
        ]
    }

    /// Parenthesizes `expr` unless it is already a primary expression.
    fn primary(expr: Expr) -> Expr {
        match expr {
            Expr::Binary { .. } | Expr::Unary { .. } => expr.paren(),
            other => other,
        }
    }

    /// Parenthesizes binary operands so the printed text needs no
    /// precedence knowledge to parse back.
    fn operand(expr: Expr) -> Expr {
        match expr {
            Expr::Binary { .. } => expr.paren(),
            other => other,
        }
    }

    fn arb_expr() -> impl Strategy<Value = Expr> {
        let leaf = prop_oneof![
            arb_literal(),
            (proptest::option::of(arb_identifier()), arb_identifier())
                .prop_map(|(table, column)| Expr::Column { table, column }),
        ];

        leaf.prop_recursive(4, 24, 2, |inner| {
            prop_oneof![
                inner.clone().prop_map(Expr::paren),
                (prop_oneof![Just(UnaryOp::Neg), Just(UnaryOp::Not)], inner.clone())
                    .prop_map(|(op, e)| Expr::unary(op, primary(e))),
                (inner.clone(), arb_binary_op(), inner)
                    .prop_map(|(l, op, r)| operand(l).binary(op, operand(r))),
            ]
        })
    }

    fn arb_select_item() -> impl Strategy<Value = SelectItem> {
        prop_oneof![
            1 => Just(SelectItem::Wildcard),
            1 => arb_identifier().prop_map(SelectItem::QualifiedWildcard),
            4 => (arb_expr(), proptest::option::of(arb_identifier()))
                .prop_map(|(expr, alias)| SelectItem::Expr { expr, alias }),
        ]
    }

    fn arb_select() -> impl Strategy<Value = Statement> {
        (
            prop::collection::vec(arb_select_item(), 1..=4),
            proptest::option::of((arb_identifier(), proptest::option::of(arb_identifier()))),
            proptest::option::of(arb_expr()),
            proptest::option::of(0u64..(1 << 53)),
        )
            .prop_map(|(items, from, where_expr, limit)| {
                Statement::Select(SelectStatement {
                    items,
                    from: from.map(|(table, alias)| FromClause {
                        table: TableRef { table, alias },
                    }),
                    where_clause: where_expr.map(|expr| WhereClause { expr }),
                    limit,
                })
            })
    }

    fn arb_create() -> impl Strategy<Value = Statement> {
        let column = (
            arb_identifier(),
            prop_oneof![Just(TypeName::Int), Just(TypeName::BigInt), Just(TypeName::Text)],
        )
            .prop_map(|(column, data_type)| ColumnDef { column, data_type });

        (arb_identifier(), prop::collection::vec(column, 1..=5)).prop_map(|(table, columns)| {
            Statement::CreateTable(CreateTableStatement { table, columns })
        })
    }

    fn arb_insert() -> impl Strategy<Value = Statement> {
        (arb_identifier(), prop::collection::vec(arb_literal(), 1..=5))
            .prop_map(|(table, values)| Statement::Insert(InsertStatement { table, values }))
    }

    fn arb_statement() -> impl Strategy<Value = Statement> {
        prop_oneof![3 => arb_select(), 1 => arb_create(), 1 => arb_insert()]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        /// Printing with preserved quotes and parsing back reproduces the tree.
        #[test]
        fn statements_round_trip(statements in prop::collection::vec(arb_statement(), 1..=3)) {
            let printed = preserving().print(&statements);
            let tokens = tokenize(&printed);
            let reparsed = parse_tokens(&printed, &tokens);
            prop_assert_eq!(reparsed, statements, "printed:\n{}", printed);
        }

        /// The default printer output is stable under re-parsing.
        #[test]
        fn printing_is_a_fixed_point(statement in arb_statement()) {
            let first = print(std::slice::from_ref(&statement));
            let second = print(&parse_tokens(&first, &tokenize(&first)));
            let third = print(&parse_tokens(&second, &tokenize(&second)));
            prop_assert_eq!(second, third);
        }

        /// Every row count up to 2^53 survives LIMIT.
        #[test]
        fn limit_accepts_whole_numbers(n in 0u64..(1 << 53)) {
            let sql = format!("SELECT 1 LIMIT {n};");
            let statements = parse_tokens(&sql, &tokenize(&sql));
            prop_assert_eq!(statements.len(), 1);
            prop_assert_eq!(statements[0].as_select().and_then(|s| s.limit), Some(n));
        }

        /// Tokenizing never panics and always ends with a single Eof.
        #[test]
        fn tokenize_never_panics(source in any::<String>()) {
            let tokens = tokenize(&source);
            let last = tokens.last().expect("token stream is never empty");
            prop_assert!(last.is_eof());
            prop_assert_eq!(last.position(), source.len());
            prop_assert_eq!(tokens.iter().filter(|t| t.is_eof()).count(), 1);
        }

        /// Parsing arbitrary query-like text never panics.
        #[test]
        fn parse_never_panics(source in "[a-zA-Z0-9 ;,.()'\"*+\\-/<>=|\n]{0,80}") {
            let tokens = tokenize(&source);
            let _ = parse_tokens(&source, &tokens);
        }
    }
}
