use serde::{Deserialize, Serialize};
use std::fmt;

// Pure mapping stages shared by every connector
pub mod classify;
pub mod defaults;

pub use classify::{Classification, classify};
pub use defaults::normalize_default;

/// Canonical target type system, independent of the source database dialect.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TypeIdentifier {
    String,
    Int,
    Float,
    Boolean,
    DateTime,
    Id,
    Json,
}

impl TypeIdentifier {
    /// Stable string form used when rendering type definitions.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeIdentifier::String => "String",
            TypeIdentifier::Int => "Int",
            TypeIdentifier::Float => "Float",
            TypeIdentifier::Boolean => "Boolean",
            TypeIdentifier::DateTime => "DateTime",
            TypeIdentifier::Id => "ID",
            TypeIdentifier::Json => "Json",
        }
    }
}

impl fmt::Display for TypeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One matched foreign-key column pair.
///
/// A composite foreign key produces one `Relation` per ordinal column pair,
/// never a cross product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Relation {
    pub source_table: String,
    pub source_column: String,
    pub target_table: String,
    pub target_column: String,
}

/// A table's primary key.
///
/// `fields` is ordered by catalog ordinal position and is never empty; a
/// table without a primary key simply has no `PrimaryKey` entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrimaryKey {
    pub table_name: String,
    pub fields: Vec<String>,
}

impl PrimaryKey {
    /// Whether this key covers exactly one column.
    pub fn is_single_column(&self) -> bool {
        self.fields.len() == 1
    }
}

/// A column of an introspected table.
///
/// `type_identifier`, `default_value`, `relation`, `comment` and `error`
/// are independently optional: an absent default and an unclassifiable
/// native type are distinct conditions and never share a representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    /// Native type name as reported by the catalog.
    pub native_type: String,
    /// Canonical type, absent when the native type is unsupported.
    pub type_identifier: Option<TypeIdentifier>,
    /// Set only for single-column primary keys.
    pub is_primary_key: bool,
    pub is_unique: bool,
    pub nullable: bool,
    /// Normalized default expression, absent when the column has no stored
    /// default (generated values count as absent).
    pub default_value: Option<String>,
    /// The foreign-key relation sourced at this column, if any.
    pub relation: Option<Relation>,
    /// Human-readable diagnostic from type classification.
    pub comment: Option<String>,
    /// Machine-oriented diagnostic from type classification.
    pub error: Option<String>,
}

/// An introspected table.
///
/// Columns are ordered primary-key-first then alphabetically by name,
/// regardless of catalog return order. `is_join_table` is a best-effort
/// structural heuristic, not an authoritative classification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    /// Relations whose source is this table.
    pub relations: Vec<Relation>,
    pub is_join_table: bool,
    pub has_primary_key: bool,
}
