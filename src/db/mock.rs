//! Mock database clients for testing.
//!
//! Provide scripted schema and query results so the agent can be
//! exercised without a real store.

use super::{ColumnInfo, DatabaseClient, QueryResult, Schema, Value};
use crate::error::{AskdbError, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// A mock database client that returns predefined results.
///
/// Results are served from a script queue in order; when the queue is
/// empty the client falls back to a one-row echo of the statement, or to
/// a persistent error if one was configured.
#[derive(Default)]
pub struct MockDatabaseClient {
    schema: Schema,
    script: Mutex<VecDeque<Result<QueryResult>>>,
    persistent_error: Option<String>,
    executed: Mutex<Vec<String>>,
}

impl MockDatabaseClient {
    /// Creates a new mock database client with an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new mock database client with the given schema.
    pub fn with_schema(schema: Schema) -> Self {
        Self {
            schema,
            ..Self::default()
        }
    }

    /// Queues a successful result for the next execution.
    pub fn push_result(self, result: QueryResult) -> Self {
        self.script
            .lock()
            .expect("mock script lock poisoned")
            .push_back(Ok(result));
        self
    }

    /// Queues an execution failure for the next execution.
    pub fn push_error(self, message: impl Into<String>) -> Self {
        self.script
            .lock()
            .expect("mock script lock poisoned")
            .push_back(Err(AskdbError::query(message.into())));
        self
    }

    /// Makes every unscripted execution fail with the given message.
    pub fn failing_with(mut self, message: impl Into<String>) -> Self {
        self.persistent_error = Some(message.into());
        self
    }

    /// Returns the statements executed so far, in order.
    pub fn executed_statements(&self) -> Vec<String> {
        self.executed
            .lock()
            .expect("mock executed lock poisoned")
            .clone()
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn introspect_schema(&self) -> Result<Schema> {
        Ok(self.schema.clone())
    }

    async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        self.executed
            .lock()
            .expect("mock executed lock poisoned")
            .push(sql.to_string());

        if let Some(scripted) = self
            .script
            .lock()
            .expect("mock script lock poisoned")
            .pop_front()
        {
            return scripted;
        }

        if let Some(message) = &self.persistent_error {
            return Err(AskdbError::query(message.clone()));
        }

        Ok(QueryResult::with_data(
            vec![ColumnInfo::new("result", "TEXT")],
            vec![vec![Value::String(format!("Mock result for: {}", sql))]],
        ))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// A database client whose every operation fails.
///
/// Used to test the fatal path when the store is unreachable.
#[derive(Debug, Default)]
pub struct FailingDatabaseClient;

impl FailingDatabaseClient {
    /// Creates a new failing client.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DatabaseClient for FailingDatabaseClient {
    async fn introspect_schema(&self) -> Result<Schema> {
        Err(AskdbError::connection("database is unreachable"))
    }

    async fn execute_query(&self, _sql: &str) -> Result<QueryResult> {
        Err(AskdbError::connection("database is unreachable"))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Column, Table};

    #[tokio::test]
    async fn test_mock_returns_schema() {
        let schema = Schema {
            tables: vec![Table::new("users").with_column(Column::new("id", "INTEGER"))],
        };
        let client = MockDatabaseClient::with_schema(schema);

        let introspected = client.introspect_schema().await.unwrap();
        assert_eq!(introspected.tables.len(), 1);
        assert_eq!(introspected.tables[0].name, "users");
    }

    #[tokio::test]
    async fn test_mock_scripted_results_in_order() {
        let client = MockDatabaseClient::new()
            .push_error("no such table: a")
            .push_result(QueryResult::with_data(
                vec![ColumnInfo::new("n", "INTEGER")],
                vec![vec![Value::Int(1)]],
            ));

        assert!(client.execute_query("SELECT * FROM a").await.is_err());
        let ok = client.execute_query("SELECT 1").await.unwrap();
        assert_eq!(ok.row_count, 1);
    }

    #[tokio::test]
    async fn test_mock_persistent_error() {
        let client = MockDatabaseClient::new().failing_with("no such table: ghosts");

        for _ in 0..3 {
            let err = client.execute_query("SELECT * FROM ghosts").await.unwrap_err();
            assert!(err.to_string().contains("no such table: ghosts"));
        }
        assert_eq!(client.executed_statements().len(), 3);
    }

    #[tokio::test]
    async fn test_failing_client() {
        let client = FailingDatabaseClient::new();
        assert!(client.introspect_schema().await.is_err());
        assert!(client.execute_query("SELECT 1").await.is_err());
    }
}
