//! Postgres catalog introspection for sdlgen.
//!
//! The pipeline is linear: catalog queries produce typed rows, extractors
//! turn foreign-key and primary-key rows into model entities, and the
//! assembler joins everything into a deterministic `Vec<Table>`.

pub mod assemble;
pub mod error;
pub mod extract;
pub mod rows;
pub mod session;
pub mod source;

pub use assemble::introspect_schema;
pub use error::IntrospectError;
pub use rows::{ColumnRow, ForeignKeyRow, PrimaryKeyRow};
pub use session::PgSession;
pub use source::MetadataSource;
