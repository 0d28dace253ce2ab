//! Typed catalog rows, parsed at the query boundary.
//!
//! Each query has its own row struct with named fields; nothing downstream
//! ever reaches into a dynamic row by string key.

use sqlx::Row;
use sqlx::postgres::PgRow;

/// One column of one table, from `information_schema.columns`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRow {
    pub table_name: String,
    pub column_name: String,
    /// Native type name (`data_type`), e.g. `character varying`.
    pub data_type: String,
    pub is_nullable: bool,
    /// Raw default expression, unnormalized.
    pub column_default: Option<String>,
    /// Whether a UNIQUE constraint covers this column.
    pub is_unique: bool,
}

impl ColumnRow {
    pub(crate) fn from_pg_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let is_nullable: String = row.try_get("is_nullable")?;
        Ok(Self {
            table_name: row.try_get("table_name")?,
            column_name: row.try_get("column_name")?,
            data_type: row.try_get("data_type")?,
            is_nullable: is_nullable == "YES",
            column_default: row.try_get("column_default")?,
            is_unique: row.try_get("is_unique")?,
        })
    }
}

/// One primary-key column, from `information_schema.table_constraints`.
///
/// The query orders rows by ordinal position, so within a table the rows
/// arrive in key-field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKeyRow {
    pub table_name: String,
    pub column_name: String,
}

impl PrimaryKeyRow {
    pub(crate) fn from_pg_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            table_name: row.try_get("table_name")?,
            column_name: row.try_get("column_name")?,
        })
    }
}

/// One matched foreign-key column pair, from `pg_constraint`.
///
/// Composite foreign keys are expanded pairwise by constraint ordinal, so
/// each row correlates exactly one source column with one target column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyRow {
    pub source_table: String,
    pub source_column: String,
    pub target_table: String,
    pub target_column: String,
}

impl ForeignKeyRow {
    pub(crate) fn from_pg_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            source_table: row.try_get("source_table_name")?,
            source_column: row.try_get("source_column")?,
            target_table: row.try_get("target_table_name")?,
            target_column: row.try_get("target_column")?,
        })
    }
}
