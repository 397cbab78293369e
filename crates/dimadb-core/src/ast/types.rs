//! Column type definitions.

use core::fmt;

use serde::Serialize;

use super::Identifier;

/// Supported column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TypeName {
    /// 32-bit integer.
    Int,
    /// 64-bit integer.
    BigInt,
    /// Variable-length text.
    Text,
}

impl TypeName {
    /// Returns the canonical, upper-cased type name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Int => "INT",
            Self::BigInt => "BIGINT",
            Self::Text => "TEXT",
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A column definition in CREATE TABLE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDef {
    /// Column name.
    pub column: Identifier,
    /// Column type.
    pub data_type: TypeName,
}

impl ColumnDef {
    /// Creates a new column definition.
    #[must_use]
    pub fn new(column: impl Into<String>, data_type: TypeName) -> Self {
        Self {
            column: Identifier::new(column),
            data_type,
        }
    }
}
