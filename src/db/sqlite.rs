//! SQLite snapshot client.
//!
//! Provides the `SqliteClient` struct that implements the `DatabaseClient`
//! trait over a file-backed practice snapshot using sqlx. Snapshots are
//! opened read-only: a candidate query containing a mutating statement can
//! never alter the shared file, even with concurrent graders.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column as SqlxColumn, Row as SqlxRow, TypeInfo, ValueRef};
use tracing::{debug, warn};

use crate::db::{DatabaseClient, Record, ResultSet, TablePreview, Value};
use crate::error::{DrillError, Result};

/// Query timeout in seconds.
const QUERY_TIMEOUT_SECS: u64 = 10;

/// Maximum rows returned per table by `list_tables`.
const SAMPLE_ROW_LIMIT: usize = 5;

/// Read-only client for one snapshot file.
#[derive(Debug)]
pub struct SqliteClient {
    pool: SqlitePool,
}

impl SqliteClient {
    /// Opens a snapshot file read-only.
    ///
    /// A missing or unopenable file is a configuration problem and is
    /// reported as such, before any query runs.
    pub async fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(DrillError::config(format!(
                "snapshot '{}' not found",
                path.display()
            )));
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await
            .map_err(|e| {
                DrillError::config(format!("cannot open snapshot '{}': {e}", path.display()))
            })?;

        debug!("Opened snapshot {}", path.display());
        Ok(Self { pool })
    }
}

#[async_trait]
impl DatabaseClient for SqliteClient {
    async fn execute_query(&self, sql: &str) -> Result<ResultSet> {
        let rows = tokio::time::timeout(
            Duration::from_secs(QUERY_TIMEOUT_SECS),
            sqlx::query(sql).fetch_all(&self.pool),
        )
        .await
        .map_err(|_| {
            DrillError::query(format!(
                "Query timed out after {QUERY_TIMEOUT_SECS} seconds"
            ))
        })?
        .map_err(|e| DrillError::query(format_query_error(e)))?;

        let records = rows
            .iter()
            .map(decode_row)
            .collect::<Result<Vec<Record>>>()?;

        debug!("Query returned {} rows", records.len());
        Ok(ResultSet::from_records(records))
    }

    async fn list_tables(&self) -> Result<Vec<TablePreview>> {
        let names: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT name FROM sqlite_master
            WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DrillError::query(format!("Failed to list tables: {e}")))?;

        let mut previews = Vec::with_capacity(names.len());
        for name in names {
            let sample = format!(
                "SELECT * FROM \"{}\" LIMIT {SAMPLE_ROW_LIMIT}",
                name.replace('"', "\"\"")
            );

            // A table that cannot be sampled still shows up, just without rows.
            let rows = match self.execute_query(&sample).await {
                Ok(rows) => rows,
                Err(e) => {
                    warn!("Failed to sample table {name}: {e}");
                    ResultSet::new()
                }
            };

            previews.push(TablePreview { name, rows });
        }

        Ok(previews)
    }

    async fn close(&self) -> Result<()> {
        self.pool.close().await;
        Ok(())
    }
}

/// Decodes a sqlx SqliteRow into a Record, preserving column order.
fn decode_row(row: &SqliteRow) -> Result<Record> {
    let mut record = Record::new();
    for (index, column) in row.columns().iter().enumerate() {
        record.insert(column.name(), decode_value(row, index, column.name())?);
    }
    Ok(record)
}

/// Decodes a single column value by its runtime storage class.
///
/// SQLite columns are dynamically typed, so the declared column type cannot
/// be trusted; each value reports its own storage class.
fn decode_value(row: &SqliteRow, index: usize, name: &str) -> Result<Value> {
    let raw = row
        .try_get_raw(index)
        .map_err(|e| DrillError::decode(format!("column '{name}': {e}")))?;

    if raw.is_null() {
        return Ok(Value::Null);
    }

    let storage = raw.type_info().name().to_uppercase();
    let decoded = match storage.as_str() {
        "INTEGER" | "INT" | "INT4" | "INT8" | "BIGINT" => {
            row.try_get::<i64, _>(index).map(Value::Int)
        }
        "REAL" | "FLOAT" | "DOUBLE" | "NUMERIC" => row.try_get::<f64, _>(index).map(Value::Float),
        "TEXT" | "DATE" | "TIME" | "DATETIME" => row.try_get::<String, _>(index).map(Value::Text),
        "BLOB" => row.try_get::<Vec<u8>, _>(index).map(Value::Blob),
        "BOOLEAN" | "BOOL" => row.try_get::<bool, _>(index).map(Value::Bool),
        other => {
            return Err(DrillError::decode(format!(
                "unsupported storage class {other} in column '{name}'"
            )))
        }
    };

    decoded.map_err(|e| DrillError::decode(format!("column '{name}': {e}")))
}

/// Formats a query error, preferring the engine's own message.
fn format_query_error(error: sqlx::Error) -> String {
    match error.as_database_error() {
        Some(db_error) => db_error.message().to_string(),
        None => error.to_string(),
    }
}
