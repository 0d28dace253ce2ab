//! SDL rendering for introspected schema models.
//!
//! The node types here are a presentation-layer mirror of the schema
//! model: they exist only while producing text and are discarded after.
//! Invalid types are never dropped from the document; they render fully
//! commented so a human can see and fix them.

pub mod builder;
pub mod node;

pub use builder::document_from_tables;
pub use node::{FieldNode, RelationRef, SdlDocument, TypeNode};
