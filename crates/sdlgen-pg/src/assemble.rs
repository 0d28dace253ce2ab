//! The table assembler.
//!
//! Joins column rows, relations and primary keys into the schema model.
//! The three catalog queries fan out concurrently; the first failure
//! aborts the whole schema with no partial results. Assembly itself is
//! pure and deterministic: output order never depends on catalog return
//! order.

use crate::error::IntrospectError;
use crate::extract::{primary_keys_from_rows, relations_from_rows};
use crate::rows::ColumnRow;
use crate::source::MetadataSource;
use sdlgen_model::{Column, PrimaryKey, Relation, Table, classify, normalize_default};
use std::collections::BTreeMap;

/// Introspect one schema into its full table model.
///
/// The schema name is folded to lowercase before any query is issued.
pub async fn introspect_schema<S>(
    source: &S,
    schema_name: &str,
) -> Result<Vec<Table>, IntrospectError>
where
    S: MetadataSource + ?Sized,
{
    let schema = schema_name.to_lowercase();

    let (column_rows, pk_rows, fk_rows) = tokio::try_join!(
        source.schema_columns(&schema),
        source.primary_keys(&schema),
        source.foreign_keys(&schema),
    )?;

    let relations = relations_from_rows(fk_rows);
    let primary_keys = primary_keys_from_rows(pk_rows);
    let tables = assemble_tables(column_rows, &relations, &primary_keys);

    tracing::debug!(%schema, tables = tables.len(), "assembled schema model");
    Ok(tables)
}

/// Join pre-fetched catalog data into sorted tables.
pub fn assemble_tables(
    column_rows: Vec<ColumnRow>,
    relations: &[Relation],
    primary_keys: &[PrimaryKey],
) -> Vec<Table> {
    // BTreeMap grouping fixes both the table order and the per-table
    // grouping independent of catalog return order.
    let mut grouped: BTreeMap<String, Vec<ColumnRow>> = BTreeMap::new();
    for row in column_rows {
        grouped.entry(row.table_name.clone()).or_default().push(row);
    }

    grouped
        .into_iter()
        .map(|(table_name, rows)| {
            let table_pk = primary_keys.iter().find(|pk| pk.table_name == table_name);
            let table_relations: Vec<Relation> = relations
                .iter()
                .filter(|rel| rel.source_table == table_name)
                .cloned()
                .collect();

            let mut columns: Vec<Column> = rows
                .into_iter()
                .map(|row| build_column(row, table_pk, &table_relations))
                .collect();
            columns.sort_by(|a, b| {
                (!a.is_primary_key, &a.name).cmp(&(!b.is_primary_key, &b.name))
            });

            let is_join_table = join_table_heuristic(&table_name, &columns, &table_relations);
            let has_primary_key = columns.iter().any(|c| c.is_primary_key);

            Table {
                name: table_name,
                columns,
                relations: table_relations,
                is_join_table,
                has_primary_key,
            }
        })
        .collect()
}

fn build_column(
    row: ColumnRow,
    table_pk: Option<&PrimaryKey>,
    table_relations: &[Relation],
) -> Column {
    // Only single-column primary keys flag a column; composite keys are
    // recognized at the table level but flag nothing.
    let is_primary_key = table_pk
        .is_some_and(|pk| pk.is_single_column() && pk.fields.contains(&row.column_name));

    let classification = classify(&row.data_type, &row.column_name, is_primary_key);
    let relation = table_relations
        .iter()
        .find(|rel| rel.source_column == row.column_name)
        .cloned();

    Column {
        name: row.column_name,
        native_type: row.data_type,
        type_identifier: classification.type_identifier,
        is_primary_key,
        is_unique: row.is_unique || is_primary_key,
        nullable: row.is_nullable,
        default_value: normalize_default(row.column_default.as_deref()),
        relation,
        comment: classification.comment,
        error: classification.error,
    }
}

/// Best-effort detection of many-to-many join tables.
///
/// A table qualifies when it has exactly two relations pointing away from
/// itself, every non-key column is one of those relation columns, and any
/// remaining column is nullable or defaulted. False positives and
/// negatives are possible; downstream consumers must treat the flag as a
/// hint.
fn join_table_heuristic(table_name: &str, columns: &[Column], relations: &[Relation]) -> bool {
    let non_self_relations = relations
        .iter()
        .filter(|rel| rel.target_table != table_name)
        .count();
    if non_self_relations != 2 {
        return false;
    }

    let only_relation_columns = columns
        .iter()
        .filter(|c| !c.is_primary_key)
        .all(|c| c.relation.is_some());

    let extras_optional = columns
        .iter()
        .filter(|c| !c.is_primary_key && c.relation.is_none())
        .all(|c| c.nullable || c.default_value.is_some());

    only_relation_columns && extras_optional
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sdlgen_model::TypeIdentifier;

    fn column_row(table: &str, column: &str, data_type: &str) -> ColumnRow {
        ColumnRow {
            table_name: table.to_string(),
            column_name: column.to_string(),
            data_type: data_type.to_string(),
            is_nullable: false,
            column_default: None,
            is_unique: false,
        }
    }

    fn relation(source: &str, column: &str, target: &str) -> Relation {
        Relation {
            source_table: source.to_string(),
            source_column: column.to_string(),
            target_table: target.to_string(),
            target_column: "id".to_string(),
        }
    }

    fn single_pk(table: &str, field: &str) -> PrimaryKey {
        PrimaryKey {
            table_name: table.to_string(),
            fields: vec![field.to_string()],
        }
    }

    #[test]
    fn primary_key_column_comes_first_then_alphabetical() {
        let rows = vec![
            column_row("users", "zip", "text"),
            column_row("users", "email", "text"),
            column_row("users", "id", "uuid"),
            column_row("users", "age", "integer"),
        ];
        let pks = vec![single_pk("users", "id")];

        let tables = assemble_tables(rows, &[], &pks);
        let names: Vec<&str> = tables[0].columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["id", "age", "email", "zip"]);
    }

    #[test]
    fn tables_sort_alphabetically_regardless_of_row_order() {
        let rows = vec![
            column_row("zebras", "id", "uuid"),
            column_row("apples", "id", "uuid"),
            column_row("mangos", "id", "uuid"),
        ];

        let tables = assemble_tables(rows, &[], &[]);
        let names: Vec<&str> = tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["apples", "mangos", "zebras"]);
    }

    #[test]
    fn single_column_pk_flags_column_and_table() {
        let rows = vec![column_row("users", "id", "uuid")];
        let pks = vec![single_pk("users", "id")];

        let tables = assemble_tables(rows, &[], &pks);
        let id = &tables[0].columns[0];
        assert!(id.is_primary_key);
        assert!(id.is_unique);
        assert_eq!(id.type_identifier, Some(TypeIdentifier::Id));
        assert!(tables[0].has_primary_key);
    }

    #[test]
    fn composite_pk_flags_no_column() {
        let rows = vec![
            column_row("memberships", "team_id", "uuid"),
            column_row("memberships", "user_id", "uuid"),
        ];
        let pks = vec![PrimaryKey {
            table_name: "memberships".to_string(),
            fields: vec!["user_id".to_string(), "team_id".to_string()],
        }];

        let tables = assemble_tables(rows, &[], &pks);
        assert!(tables[0].columns.iter().all(|c| !c.is_primary_key));
        assert!(!tables[0].has_primary_key);
    }

    #[test]
    fn unsupported_type_degrades_without_aborting_the_table() {
        let rows = vec![
            column_row("docs", "id", "uuid"),
            column_row("docs", "search", "tsvector"),
        ];
        let pks = vec![single_pk("docs", "id")];

        let tables = assemble_tables(rows, &[], &pks);
        let search = tables[0].columns.iter().find(|c| c.name == "search").unwrap();
        assert_eq!(search.type_identifier, None);
        assert!(search.comment.as_deref().unwrap().contains("tsvector"));
        assert!(search.error.as_deref().unwrap().contains("tsvector"));
        // Rest of the table is unaffected.
        assert_eq!(
            tables[0].columns[0].type_identifier,
            Some(TypeIdentifier::Id)
        );
    }

    #[test]
    fn join_table_with_two_foreign_keys_and_nothing_else() {
        let rows = vec![
            column_row("post_tags", "post_id", "uuid"),
            column_row("post_tags", "tag_id", "uuid"),
        ];
        let relations = vec![
            relation("post_tags", "post_id", "posts"),
            relation("post_tags", "tag_id", "tags"),
        ];

        let tables = assemble_tables(rows, &relations, &[]);
        assert!(tables[0].is_join_table);
    }

    #[test]
    fn extra_required_column_defeats_the_join_table_heuristic() {
        let rows = vec![
            column_row("post_tags", "post_id", "uuid"),
            column_row("post_tags", "tag_id", "uuid"),
            column_row("post_tags", "weight", "integer"),
        ];
        let relations = vec![
            relation("post_tags", "post_id", "posts"),
            relation("post_tags", "tag_id", "tags"),
        ];

        let tables = assemble_tables(rows, &relations, &[]);
        assert!(!tables[0].is_join_table);
    }

    #[test]
    fn self_relations_do_not_count_toward_join_table_detection() {
        let rows = vec![
            column_row("nodes", "parent_id", "uuid"),
            column_row("nodes", "root_id", "uuid"),
        ];
        let relations = vec![
            relation("nodes", "parent_id", "nodes"),
            relation("nodes", "root_id", "nodes"),
        ];

        let tables = assemble_tables(rows, &relations, &[]);
        assert!(!tables[0].is_join_table);
    }

    #[test]
    fn relation_attaches_to_matching_source_column() {
        let rows = vec![
            column_row("posts", "id", "uuid"),
            column_row("posts", "user_id", "uuid"),
        ];
        let pks = vec![single_pk("posts", "id")];
        let relations = vec![relation("posts", "user_id", "users")];

        let tables = assemble_tables(rows, &relations, &pks);
        let user_id = tables[0].columns.iter().find(|c| c.name == "user_id").unwrap();
        let rel = user_id.relation.as_ref().unwrap();
        assert_eq!(rel.target_table, "users");
        assert_eq!(tables[0].relations.len(), 1);
    }

    #[test]
    fn catalog_unique_flag_survives_and_pk_implies_unique() {
        let mut email = column_row("users", "email", "text");
        email.is_unique = true;
        let rows = vec![column_row("users", "id", "uuid"), email];
        let pks = vec![single_pk("users", "id")];

        let tables = assemble_tables(rows, &[], &pks);
        assert!(tables[0].columns.iter().all(|c| c.is_unique));
    }
}
