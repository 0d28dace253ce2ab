//! sqlx-backed introspection session.

use crate::error::IntrospectError;
use crate::rows::{ColumnRow, ForeignKeyRow, PrimaryKeyRow};
use crate::source::MetadataSource;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

/// How long a session keeps its connection open after creation.
///
/// Callers must finish all catalog queries inside this window; the
/// connection is reclaimed afterwards whether or not queries are still in
/// flight.
pub const CONNECTION_GRACE: Duration = Duration::from_secs(3);

/// An introspection session against one Postgres database.
///
/// Each session owns exactly one connection and releases it automatically
/// after [`CONNECTION_GRACE`].
pub struct PgSession {
    pool: sqlx::PgPool,
}

impl PgSession {
    /// Connect to the database behind `database_url`.
    pub async fn connect(database_url: &str) -> Result<Self, IntrospectError> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await
            .map_err(IntrospectError::Connect)?;

        let reaper = pool.clone();
        tokio::spawn(async move {
            tokio::time::sleep(CONNECTION_GRACE).await;
            tracing::debug!("introspection session grace period elapsed, closing connection");
            reaper.close().await;
        });

        Ok(Self { pool })
    }
}

#[async_trait]
impl MetadataSource for PgSession {
    async fn list_schemas(&self) -> Result<Vec<String>, IntrospectError> {
        let rows = sqlx::query(
            r#"
            select schema_name::text as schema_name
            from information_schema.schemata
            where schema_name not like 'pg_%'
              and schema_name <> 'information_schema'
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|r| sqlx::Row::try_get::<String, _>(r, "schema_name").map_err(Into::into))
            .collect()
    }

    async fn schema_columns(&self, schema: &str) -> Result<Vec<ColumnRow>, IntrospectError> {
        tracing::debug!(schema, "querying column metadata");
        let rows = sqlx::query(
            r#"
            select
              c.table_name::text as table_name,
              c.column_name::text as column_name,
              c.data_type::text as data_type,
              c.is_nullable::text as is_nullable,
              c.column_default::text as column_default,
              (select exists (
                 select 1
                 from information_schema.table_constraints tc
                 join information_schema.key_column_usage kcu
                   on tc.constraint_name = kcu.constraint_name
                 where tc.constraint_type = 'UNIQUE'
                   and tc.table_schema = $1::text
                   and tc.table_name = c.table_name
                   and kcu.column_name = c.column_name
              )) as is_unique
            from information_schema.columns c
            where c.table_schema = $1::text
            "#,
        )
        .bind(schema)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|r| ColumnRow::from_pg_row(r).map_err(Into::into))
            .collect()
    }

    async fn primary_keys(&self, schema: &str) -> Result<Vec<PrimaryKeyRow>, IntrospectError> {
        tracing::debug!(schema, "querying primary keys");
        let rows = sqlx::query(
            r#"
            select tc.table_name::text as table_name, kc.column_name::text as column_name
            from information_schema.table_constraints tc
            join information_schema.key_column_usage kc
              on kc.table_name = tc.table_name
             and kc.table_schema = tc.table_schema
             and kc.constraint_name = tc.constraint_name
            where tc.constraint_type = 'PRIMARY KEY'
              and tc.table_schema = $1::text
              and kc.ordinal_position is not null
            order by tc.table_name, kc.ordinal_position
            "#,
        )
        .bind(schema)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|r| PrimaryKeyRow::from_pg_row(r).map_err(Into::into))
            .collect()
    }

    async fn foreign_keys(&self, schema: &str) -> Result<Vec<ForeignKeyRow>, IntrospectError> {
        tracing::debug!(schema, "querying foreign keys");
        // Composite constraints are expanded with generate_series so each
        // ordinal column pair becomes one row.
        let rows = sqlx::query(
            r#"
            select source_table_name::text as source_table_name,
                   source_attr.attname::text as source_column,
                   target_table_name::text as target_table_name,
                   target_attr.attname::text as target_column
            from pg_attribute target_attr, pg_attribute source_attr,
            (
              select source_table_name, target_table_name, source_table_oid,
                     target_table_oid, source_constraints[i] as source_constraint,
                     target_constraints[i] as target_constraint
              from
              (
                select pgc.relname as source_table_name,
                       pgct.relname as target_table_name,
                       conrelid as source_table_oid,
                       confrelid as target_table_oid,
                       conkey as source_constraints,
                       confkey as target_constraints,
                       generate_series(1, array_upper(conkey, 1)) as i
                from pg_constraint pgcon
                  left join pg_class pgc on pgcon.conrelid = pgc.oid
                  left join pg_namespace pgn on pgc.relnamespace = pgn.oid
                  left join pg_class pgct on pgcon.confrelid = pgct.oid
                  left join pg_namespace pgnt on pgct.relnamespace = pgnt.oid
                where contype = 'f'
                  and pgn.nspname = $1::text
                  and pgnt.nspname = $1::text
              ) expanded
            ) pairs
            where target_attr.attnum = pairs.target_constraint
              and target_attr.attrelid = pairs.target_table_oid
              and source_attr.attnum = pairs.source_constraint
              and source_attr.attrelid = pairs.source_table_oid
            "#,
        )
        .bind(schema)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|r| ForeignKeyRow::from_pg_row(r).map_err(Into::into))
            .collect()
    }
}
