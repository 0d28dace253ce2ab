//! The metadata-source boundary.

use crate::error::IntrospectError;
use crate::rows::{ColumnRow, ForeignKeyRow, PrimaryKeyRow};
use async_trait::async_trait;

/// Read-only access to a relational catalog.
///
/// Implementations receive schema names already folded to lowercase. The
/// three per-schema queries are independent of one another and may be
/// dispatched concurrently; a failure in any of them aborts introspection
/// of that schema.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// List schema names available in the database, excluding system
    /// schemas.
    async fn list_schemas(&self) -> Result<Vec<String>, IntrospectError>;

    /// All columns of all tables in the schema.
    async fn schema_columns(&self, schema: &str) -> Result<Vec<ColumnRow>, IntrospectError>;

    /// Primary-key column rows, ordered by table then ordinal position.
    async fn primary_keys(&self, schema: &str) -> Result<Vec<PrimaryKeyRow>, IntrospectError>;

    /// Foreign-key column pairs, correlated pairwise by constraint ordinal.
    async fn foreign_keys(&self, schema: &str) -> Result<Vec<ForeignKeyRow>, IntrospectError>;
}
