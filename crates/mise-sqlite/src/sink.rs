use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool};
use tracing::info;

use mise_generate::{Population, Value};
use mise_schema::{Catalog, Table, create_index_sql, create_table_sql, drop_table_sql, insertion_order};

use crate::errors::SinkError;
use crate::options::SinkOptions;

/// Outcome of a bulk load.
#[derive(Debug, Clone, Copy)]
pub struct LoadSummary {
    pub rows_inserted: u64,
}

/// SQLite output adapter. One connection, strictly sequential writes.
#[derive(Debug, Clone)]
pub struct SqliteSink {
    pool: SqlitePool,
}

impl SqliteSink {
    /// Open (or create) the database file with foreign keys enforced.
    pub async fn connect(options: &SinkOptions) -> Result<Self, SinkError> {
        let connect = SqliteConnectOptions::new()
            .filename(&options.path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(connect)
            .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Clean slate: drop any previous tables (children first, plus legacy
    /// names), then create the catalog tables.
    pub async fn apply_schema(&self, catalog: &Catalog) -> Result<(), SinkError> {
        let graph = insertion_order(catalog)?;

        for legacy in &catalog.legacy_tables {
            sqlx::query(&drop_table_sql(legacy)).execute(&self.pool).await?;
        }
        for name in graph.order.iter().rev() {
            sqlx::query(&drop_table_sql(name)).execute(&self.pool).await?;
        }

        for name in &graph.order {
            let table = catalog
                .table(name)
                .ok_or_else(|| SinkError::UnknownTable(name.clone()))?;
            sqlx::query(&create_table_sql(table)).execute(&self.pool).await?;
        }

        info!(tables = graph.order.len(), "schema applied");
        Ok(())
    }

    /// Insert the whole dataset inside a single transaction, parent tables
    /// before children. Any constraint violation rolls back everything.
    pub async fn load(
        &self,
        catalog: &Catalog,
        population: &Population,
    ) -> Result<LoadSummary, SinkError> {
        let mut tx = self.pool.begin().await?;
        let mut rows_inserted = 0_u64;

        for table_rows in &population.tables {
            let table = catalog
                .table(&table_rows.name)
                .ok_or_else(|| SinkError::UnknownTable(table_rows.name.clone()))?;
            let sql = insert_sql(table);

            for row in &table_rows.rows {
                let mut query = sqlx::query(&sql);
                for column in &table.columns {
                    query = bind_value(query, row.get(&column.name));
                }
                query.execute(&mut *tx).await?;
                rows_inserted += 1;
            }

            info!(table = %table_rows.name, rows = table_rows.rows.len(), "table loaded");
        }

        tx.commit().await?;
        Ok(LoadSummary { rows_inserted })
    }

    /// Declare the secondary indexes; runs after the bulk load.
    pub async fn create_indexes(&self, catalog: &Catalog) -> Result<(), SinkError> {
        for index in &catalog.indexes {
            sqlx::query(&create_index_sql(index)).execute(&self.pool).await?;
        }
        info!(indexes = catalog.indexes.len(), "indexes created");
        Ok(())
    }

    pub async fn table_count(&self, table: &str) -> Result<i64, SinkError> {
        let sql = format!("SELECT COUNT(*) FROM {table}");
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(count)
    }

    /// Number of rows reported by `PRAGMA foreign_key_check`.
    pub async fn foreign_key_violations(&self) -> Result<u64, SinkError> {
        let rows = sqlx::query("PRAGMA foreign_key_check")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.len() as u64)
    }
}

fn insert_sql(table: &Table) -> String {
    let columns: Vec<&str> = table
        .columns
        .iter()
        .map(|column| column.name.as_str())
        .collect();
    let placeholders = vec!["?"; columns.len()].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table.name,
        columns.join(", "),
        placeholders
    )
}

fn bind_value<'q>(
    query: sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>,
    value: Option<&Value>,
) -> sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        None | Some(Value::Null) => query.bind(Option::<String>::None),
        Some(Value::Int(value)) => query.bind(*value),
        Some(Value::Real(value)) => query.bind(*value),
        Some(Value::Text(value)) => query.bind(value.clone()),
        Some(Value::Date(value)) => query.bind(*value),
    }
}
