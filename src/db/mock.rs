//! Mock snapshot clients for testing.
//!
//! Provide scripted, in-memory implementations of `DatabaseClient` so the
//! grading workflow can be exercised without a snapshot file.

use async_trait::async_trait;

use super::{DatabaseClient, ResultSet, TablePreview};
use crate::error::{DrillError, Result};

/// A mock client that returns pre-registered results per query string.
#[derive(Default)]
pub struct MockDatabaseClient {
    results: Vec<(String, ResultSet)>,
}

impl MockDatabaseClient {
    /// Creates a mock client with no registered queries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the result set returned for an exact query string.
    pub fn with_result(mut self, sql: impl Into<String>, result: ResultSet) -> Self {
        self.results.push((sql.into(), result));
        self
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn execute_query(&self, sql: &str) -> Result<ResultSet> {
        self.results
            .iter()
            .find(|(registered, _)| registered == sql)
            .map(|(_, result)| result.clone())
            .ok_or_else(|| DrillError::query(format!("no such table: {sql}")))
    }

    async fn list_tables(&self) -> Result<Vec<TablePreview>> {
        Ok(Vec::new())
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// A mock client whose queries all fail with a fixed message.
pub struct FailingDatabaseClient {
    message: String,
}

impl FailingDatabaseClient {
    /// Creates a failing client with the given engine error message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl DatabaseClient for FailingDatabaseClient {
    async fn execute_query(&self, _sql: &str) -> Result<ResultSet> {
        Err(DrillError::query(self.message.clone()))
    }

    async fn list_tables(&self) -> Result<Vec<TablePreview>> {
        Err(DrillError::query(self.message.clone()))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
