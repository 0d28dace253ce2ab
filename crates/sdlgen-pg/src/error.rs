//! Error types for the introspection pipeline.

use thiserror::Error;

/// Errors that abort introspection of a schema.
///
/// Any metadata-query failure is fatal for the whole schema: there are no
/// partial table lists and no retries. Unsupported column types are not
/// errors at all; they degrade to diagnostics on the affected column.
#[derive(Debug, Error)]
pub enum IntrospectError {
    /// Connecting to the metadata store failed.
    #[error("failed to connect to the metadata store: {0}")]
    Connect(#[source] sqlx::Error),

    /// A catalog query failed or returned malformed rows.
    #[error("metadata query failed: {0}")]
    Query(#[from] sqlx::Error),
}
