//! Renders statements back to canonical query text.
//!
//! Output is deterministic: unquoted identifiers are upper-cased, keywords
//! are upper-case and every clause starts on its own line. Parsing the
//! output again and printing it yields the same text.
//!
//! ```rust
//! use dimadb_core::{parse, print, tokenize};
//!
//! let source = "select id, name from users where age > 18;";
//! let statements = parse(source, &tokenize(source));
//! assert_eq!(
//!     print(&statements),
//!     "\nSELECT ID, NAME\nFROM USERS\nWHERE AGE > 18;\n"
//! );
//! ```

use core::fmt::{self, Write};

use serde::Serialize;

use crate::ast::{
    ColumnDef, CreateTableStatement, Expr, Identifier, InsertStatement, Literal, SelectItem,
    SelectStatement, Statement, TableRef,
};

/// How quoted identifiers are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum IdentifierQuoting {
    /// Print the raw name without quotes.
    #[default]
    Strip,
    /// Re-wrap the name in double quotes.
    Preserve,
}

/// Printer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PrintOptions {
    /// Rendering of quoted identifiers.
    pub quoting: IdentifierQuoting,
}

impl PrintOptions {
    /// Sets the identifier quoting mode.
    #[must_use]
    pub const fn with_quoting(mut self, quoting: IdentifierQuoting) -> Self {
        self.quoting = quoting;
        self
    }
}

/// Renders AST nodes as text.
#[derive(Debug, Clone, Copy, Default)]
pub struct AstPrinter {
    options: PrintOptions,
}

impl AstPrinter {
    /// Creates a printer with the given options.
    #[must_use]
    pub const fn new(options: PrintOptions) -> Self {
        Self { options }
    }

    /// Prints every statement, each surrounded by newlines.
    #[must_use]
    pub fn print(&self, statements: &[Statement]) -> String {
        let mut out = String::new();
        for statement in statements {
            out.push('\n');
            out.push_str(&self.statement(statement).to_string());
            out.push('\n');
        }
        out
    }

    /// Returns a [`Display`](fmt::Display) adapter for a statement.
    #[must_use]
    pub const fn statement<'a>(&'a self, statement: &'a Statement) -> Printed<'a, Statement> {
        Printed {
            printer: self,
            node: statement,
        }
    }

    /// Returns a [`Display`](fmt::Display) adapter for an expression.
    #[must_use]
    pub const fn expr<'a>(&'a self, expr: &'a Expr) -> Printed<'a, Expr> {
        Printed {
            printer: self,
            node: expr,
        }
    }

    fn write_statement(&self, f: &mut fmt::Formatter<'_>, statement: &Statement) -> fmt::Result {
        match statement {
            Statement::Select(select) => self.write_select(f, select),
            Statement::CreateTable(create) => self.write_create_table(f, create),
            Statement::Insert(insert) => self.write_insert(f, insert),
        }
    }

    fn write_select(&self, f: &mut fmt::Formatter<'_>, select: &SelectStatement) -> fmt::Result {
        f.write_str("SELECT ")?;
        for (i, item) in select.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            self.write_select_item(f, item)?;
        }

        if let Some(from) = &select.from {
            f.write_str("\nFROM ")?;
            self.write_table_ref(f, &from.table)?;
        }

        if let Some(where_clause) = &select.where_clause {
            f.write_str("\nWHERE ")?;
            self.write_expr(f, &where_clause.expr)?;
        }

        if let Some(limit) = select.limit {
            write!(f, "\nLIMIT {limit}")?;
        }

        f.write_char(';')
    }

    fn write_select_item(&self, f: &mut fmt::Formatter<'_>, item: &SelectItem) -> fmt::Result {
        match item {
            SelectItem::Wildcard => f.write_char('*'),
            SelectItem::QualifiedWildcard(table) => {
                self.write_identifier(f, table)?;
                f.write_str(".*")
            }
            SelectItem::Expr { expr, alias } => {
                self.write_expr(f, expr)?;
                self.write_alias(f, alias.as_ref())
            }
        }
    }

    fn write_table_ref(&self, f: &mut fmt::Formatter<'_>, table: &TableRef) -> fmt::Result {
        self.write_identifier(f, &table.table)?;
        self.write_alias(f, table.alias.as_ref())
    }

    fn write_alias(&self, f: &mut fmt::Formatter<'_>, alias: Option<&Identifier>) -> fmt::Result {
        match alias {
            Some(alias) => {
                f.write_str(" AS ")?;
                self.write_identifier(f, alias)
            }
            None => Ok(()),
        }
    }

    fn write_create_table(
        &self,
        f: &mut fmt::Formatter<'_>,
        create: &CreateTableStatement,
    ) -> fmt::Result {
        f.write_str("CREATE TABLE ")?;
        self.write_identifier(f, &create.table)?;
        f.write_str("\n(\n")?;
        for (i, column) in create.columns.iter().enumerate() {
            if i > 0 {
                f.write_str(",\n")?;
            }
            f.write_str("  ")?;
            self.write_column_def(f, column)?;
        }
        f.write_str("\n);")
    }

    fn write_column_def(&self, f: &mut fmt::Formatter<'_>, column: &ColumnDef) -> fmt::Result {
        self.write_identifier(f, &column.column)?;
        write!(f, " {}", column.data_type)
    }

    fn write_insert(&self, f: &mut fmt::Formatter<'_>, insert: &InsertStatement) -> fmt::Result {
        f.write_str("INSERT INTO ")?;
        self.write_identifier(f, &insert.table)?;
        f.write_str("\nVALUES (\n")?;
        for (i, value) in insert.values.iter().enumerate() {
            if i > 0 {
                f.write_str(",\n")?;
            }
            f.write_str("  ")?;
            self.write_expr(f, value)?;
        }
        f.write_str("\n);")
    }

    fn write_expr(&self, f: &mut fmt::Formatter<'_>, expr: &Expr) -> fmt::Result {
        match expr {
            Expr::Literal(literal) => write_literal(f, literal),
            Expr::Column { table, column } => {
                if let Some(table) = table {
                    self.write_identifier(f, table)?;
                    f.write_char('.')?;
                }
                self.write_identifier(f, column)
            }
            Expr::Wildcard { table } => {
                if let Some(table) = table {
                    self.write_identifier(f, table)?;
                    f.write_char('.')?;
                }
                f.write_char('*')
            }
            Expr::Paren(inner) => {
                f.write_char('(')?;
                self.write_expr(f, inner)?;
                f.write_char(')')
            }
            Expr::Unary { op, operand } => {
                write!(f, "{} ", op.as_str())?;
                self.write_expr(f, operand)
            }
            Expr::Binary { left, op, right } => {
                self.write_expr(f, left)?;
                write!(f, " {} ", op.as_str())?;
                self.write_expr(f, right)
            }
        }
    }

    fn write_identifier(&self, f: &mut fmt::Formatter<'_>, identifier: &Identifier) -> fmt::Result {
        if !identifier.quoted {
            return f.write_str(&identifier.name.to_ascii_uppercase());
        }
        match self.options.quoting {
            IdentifierQuoting::Strip => f.write_str(&identifier.name),
            IdentifierQuoting::Preserve => write!(f, "\"{}\"", identifier.name),
        }
    }
}

fn write_literal(f: &mut fmt::Formatter<'_>, literal: &Literal) -> fmt::Result {
    match literal {
        Literal::Boolean(true) => f.write_str("TRUE"),
        Literal::Boolean(false) => f.write_str("FALSE"),
        Literal::Number(value) => write!(f, "{value}"),
        Literal::String(value) => write!(f, "'{}'", value.replace('\'', "''")),
        Literal::Null => f.write_str("NULL"),
    }
}

/// A node paired with the printer that renders it.
#[derive(Debug, Clone, Copy)]
pub struct Printed<'a, T> {
    printer: &'a AstPrinter,
    node: &'a T,
}

impl fmt::Display for Printed<'_, Statement> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.printer.write_statement(f, self.node)
    }
}

impl fmt::Display for Printed<'_, Expr> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.printer.write_expr(f, self.node)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        AstPrinter::default().write_statement(f, self)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        AstPrinter::default().write_expr(f, self)
    }
}

/// Prints statements with the default options.
#[must_use]
pub fn print(statements: &[Statement]) -> String {
    AstPrinter::default().print(statements)
}
