//! Statement AST types.

use serde::Serialize;

use super::{ColumnDef, Expr, Identifier};

/// A table named in FROM, optionally aliased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRef {
    /// Table name.
    pub table: Identifier,
    /// Alias (optional).
    pub alias: Option<Identifier>,
}

impl TableRef {
    /// Creates an unaliased table reference.
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: Identifier::new(table),
            alias: None,
        }
    }

    /// Adds an alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(Identifier::new(alias));
        self
    }
}

/// One entry of a SELECT list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SelectItem {
    /// `*`
    Wildcard,
    /// `table.*`
    QualifiedWildcard(Identifier),
    /// An expression with an optional alias.
    Expr {
        /// The expression.
        expr: Expr,
        /// Alias (optional).
        alias: Option<Identifier>,
    },
}

impl SelectItem {
    /// Creates an unaliased expression item.
    #[must_use]
    pub const fn expr(expr: Expr) -> Self {
        Self::Expr { expr, alias: None }
    }

    /// Creates an aliased expression item.
    #[must_use]
    pub fn aliased(expr: Expr, alias: impl Into<String>) -> Self {
        Self::Expr {
            expr,
            alias: Some(Identifier::new(alias)),
        }
    }
}

/// FROM clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FromClause {
    /// The table read from.
    pub table: TableRef,
}

/// WHERE clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhereClause {
    /// The filter condition.
    pub expr: Expr,
}

/// A SELECT statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectStatement {
    /// Selected items, in source order (never empty).
    pub items: Vec<SelectItem>,
    /// FROM clause (optional).
    pub from: Option<FromClause>,
    /// WHERE clause (optional).
    pub where_clause: Option<WhereClause>,
    /// LIMIT row count (optional).
    pub limit: Option<u64>,
}

/// A CREATE TABLE statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateTableStatement {
    /// Table name.
    pub table: Identifier,
    /// Column definitions (never empty).
    pub columns: Vec<ColumnDef>,
}

/// An INSERT INTO statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsertStatement {
    /// Target table.
    pub table: Identifier,
    /// Literal values of the single row, in column order.
    pub values: Vec<Expr>,
}

/// A statement of the language.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Statement {
    /// CREATE TABLE statement.
    CreateTable(CreateTableStatement),
    /// INSERT INTO statement.
    Insert(InsertStatement),
    /// SELECT statement.
    Select(SelectStatement),
}

impl Statement {
    /// Returns the statement's leading keyword(s).
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::CreateTable(_) => "CREATE TABLE",
            Self::Insert(_) => "INSERT",
            Self::Select(_) => "SELECT",
        }
    }

    /// Returns the inner SELECT, if this is one.
    #[must_use]
    pub const fn as_select(&self) -> Option<&SelectStatement> {
        match self {
            Self::Select(select) => Some(select),
            _ => None,
        }
    }
}
