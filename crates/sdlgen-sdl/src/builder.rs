//! Mapping from the schema model to renderable nodes.

use crate::node::{FieldNode, RelationRef, SdlDocument, TypeNode};
use sdlgen_model::{Column, Table};

/// Build an SDL document from an introspected table model.
pub fn document_from_tables(tables: &[Table]) -> SdlDocument {
    let types = tables.iter().map(type_from_table).collect();
    SdlDocument::new(types)
}

fn type_from_table(table: &Table) -> TypeNode {
    let fields = table.columns.iter().map(field_from_column).collect();
    TypeNode::new(table.name.clone(), fields, Vec::new(), false)
}

fn field_from_column(column: &Column) -> FieldNode {
    // Unclassifiable columns keep an empty type string; their diagnostics
    // travel on the field comment.
    let type_name = column
        .type_identifier
        .map(|t| t.as_str().to_string())
        .unwrap_or_default();

    FieldNode::new(
        column.name.clone(),
        type_name,
        !column.nullable,
        Vec::new(),
        column.is_primary_key,
        column.comment.clone(),
        false,
        column.relation.as_ref().map(|rel| RelationRef {
            target_type: rel.target_table.clone(),
        }),
    )
}
