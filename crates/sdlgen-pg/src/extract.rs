//! Extractors: catalog rows to model entities.

use crate::rows::{ForeignKeyRow, PrimaryKeyRow};
use sdlgen_model::{PrimaryKey, Relation};
use std::collections::BTreeMap;

/// Turn foreign-key rows into relations, one per column pair.
///
/// No deduplication, no merging across tables, no cardinality inference;
/// order is whatever the catalog returned.
pub fn relations_from_rows(rows: Vec<ForeignKeyRow>) -> Vec<Relation> {
    rows.into_iter()
        .map(|row| Relation {
            source_table: row.source_table,
            source_column: row.source_column,
            target_table: row.target_table,
            target_column: row.target_column,
        })
        .collect()
}

/// Group primary-key rows by table.
///
/// Rows arrive ordered by ordinal position within each table, so pushing
/// in order preserves key-field order. Tables with no rows produce no
/// entry, so `fields` is never empty.
pub fn primary_keys_from_rows(rows: Vec<PrimaryKeyRow>) -> Vec<PrimaryKey> {
    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for row in rows {
        grouped.entry(row.table_name).or_default().push(row.column_name);
    }

    grouped
        .into_iter()
        .map(|(table_name, fields)| PrimaryKey { table_name, fields })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pk_row(table: &str, column: &str) -> PrimaryKeyRow {
        PrimaryKeyRow {
            table_name: table.to_string(),
            column_name: column.to_string(),
        }
    }

    #[test]
    fn primary_keys_group_by_table_preserving_ordinal_order() {
        let rows = vec![
            pk_row("memberships", "user_id"),
            pk_row("memberships", "team_id"),
            pk_row("users", "id"),
        ];

        let keys = primary_keys_from_rows(rows);
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].table_name, "memberships");
        assert_eq!(keys[0].fields, vec!["user_id", "team_id"]);
        assert_eq!(keys[1].table_name, "users");
        assert_eq!(keys[1].fields, vec!["id"]);
    }

    #[test]
    fn tables_without_rows_get_no_entry() {
        assert_eq!(primary_keys_from_rows(Vec::new()), Vec::new());
    }

    #[test]
    fn composite_foreign_keys_stay_pairwise() {
        let rows = vec![
            ForeignKeyRow {
                source_table: "orders".to_string(),
                source_column: "customer_region".to_string(),
                target_table: "customers".to_string(),
                target_column: "region".to_string(),
            },
            ForeignKeyRow {
                source_table: "orders".to_string(),
                source_column: "customer_id".to_string(),
                target_table: "customers".to_string(),
                target_column: "id".to_string(),
            },
        ];

        let relations = relations_from_rows(rows);
        assert_eq!(relations.len(), 2);
        assert_eq!(relations[0].source_column, "customer_region");
        assert_eq!(relations[0].target_column, "region");
        assert_eq!(relations[1].source_column, "customer_id");
        assert_eq!(relations[1].target_column, "id");
    }
}
