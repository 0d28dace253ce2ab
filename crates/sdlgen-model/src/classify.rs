//! Native column type classification.
//!
//! Maps Postgres native type names to the canonical [`TypeIdentifier`]
//! system. Classification is pure and advisory: an unsupported type never
//! fails introspection, it degrades to an absent identifier plus
//! diagnostics on the column.

use crate::TypeIdentifier;

/// Outcome of classifying one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub type_identifier: Option<TypeIdentifier>,
    pub comment: Option<String>,
    pub error: Option<String>,
}

impl Classification {
    fn known(type_identifier: TypeIdentifier) -> Self {
        Self {
            type_identifier: Some(type_identifier),
            comment: None,
            error: None,
        }
    }

    fn unsupported(native_type: &str) -> Self {
        Self {
            type_identifier: None,
            comment: Some(format!("Type '{}' is not yet supported.", native_type)),
            error: Some(format!("Not able to handle type '{}'", native_type)),
        }
    }
}

/// Native types that classify as `ID` when they carry the primary key.
const ID_CAPABLE_TYPES: &[&str] = &["character", "character varying", "text", "uuid"];

/// Classify a native column type into the canonical type system.
///
/// The primary-key rule is checked first: a string-family primary key is
/// always `ID`, never `String`. `column_name` is currently unused; it is
/// part of the signature so name-based heuristics can be added without a
/// breaking change.
pub fn classify(native_type: &str, _column_name: &str, is_primary_key: bool) -> Classification {
    if is_primary_key && ID_CAPABLE_TYPES.contains(&native_type) {
        return Classification::known(TypeIdentifier::Id);
    }

    match native_type {
        "uuid" | "character" | "character varying" | "text" => {
            Classification::known(TypeIdentifier::String)
        }
        "smallint" | "integer" | "bigint" => Classification::known(TypeIdentifier::Int),
        "real" | "double precision" | "numeric" => Classification::known(TypeIdentifier::Float),
        "boolean" => Classification::known(TypeIdentifier::Boolean),
        "timestamp without time zone" | "timestamp with time zone" | "timestamp" | "date" => {
            Classification::known(TypeIdentifier::DateTime)
        }
        "json" => Classification::known(TypeIdentifier::Json),
        other => Classification::unsupported(other),
    }
}
