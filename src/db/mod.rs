//! Database abstraction layer for sqldrill.
//!
//! Provides a trait-based interface over a practice snapshot, allowing the
//! grading workflow to be exercised against mock clients in tests while the
//! real implementation runs on file-backed SQLite.

mod mock;
mod schema;
mod sqlite;
mod types;

pub use mock::{FailingDatabaseClient, MockDatabaseClient};
pub use schema::TablePreview;
pub use sqlite::SqliteClient;
pub use types::{Record, ResultSet, Value};

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;

/// Opens a read-only client on the given snapshot file.
///
/// This is the central factory function for snapshot access. Returns a
/// `Config` error if the snapshot does not exist or cannot be opened.
pub async fn open_snapshot(path: &Path) -> Result<Box<dyn DatabaseClient>> {
    let client = SqliteClient::open(path).await?;
    Ok(Box::new(client))
}

/// Trait defining the interface for snapshot clients.
///
/// All operations are async and return Results with DrillError.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Executes a SQL query and returns the decoded result set.
    async fn execute_query(&self, sql: &str) -> Result<ResultSet>;

    /// Lists user tables with a few sample rows each.
    async fn list_tables(&self) -> Result<Vec<TablePreview>>;

    /// Closes the snapshot handle.
    async fn close(&self) -> Result<()>;
}
