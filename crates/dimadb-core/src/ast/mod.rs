//! Abstract Syntax Tree (AST) types for DimaDB statements.

mod expression;
mod statement;
mod types;

pub use expression::{BinaryOp, Expr, Identifier, Literal, UnaryOp};
pub use statement::{
    CreateTableStatement, FromClause, InsertStatement, SelectItem, SelectStatement, Statement,
    TableRef, WhereClause,
};
pub use types::{ColumnDef, TypeName};
