//! Database abstraction layer for askdb.
//!
//! Provides a trait-based interface for the relational store, allowing
//! the agent to run against different backends interchangeably.

mod mock;
mod schema;
mod sqlite;
mod types;

pub use mock::{FailingDatabaseClient, MockDatabaseClient};
pub use schema::{Column, Schema, Table};
pub use sqlite::SqliteClient;
pub use types::{ColumnInfo, QueryResult, Row, Value};

use crate::error::Result;
use async_trait::async_trait;

/// Supported database backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    #[default]
    Sqlite,
    // Future: Postgres, MySQL, etc.
}

impl DatabaseBackend {
    /// Returns the backend as a string for persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
        }
    }

    /// Parses a backend from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sqlite" | "sqlite3" => Some(Self::Sqlite),
            _ => None,
        }
    }
}

/// Creates a database client for the given backend and database path.
///
/// This is the central factory function for store connections.
pub async fn connect(backend: DatabaseBackend, path: &str) -> Result<Box<dyn DatabaseClient>> {
    match backend {
        DatabaseBackend::Sqlite => {
            let client = SqliteClient::connect(path).await?;
            Ok(Box::new(client))
        }
    }
}

/// Trait defining the interface for database clients.
///
/// All database operations are async and return Results with AskdbError.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Introspects the database schema, returning table and column information.
    async fn introspect_schema(&self) -> Result<Schema>;

    /// Executes a SQL statement and returns the results.
    async fn execute_query(&self, sql: &str) -> Result<QueryResult>;

    /// Closes the database connection.
    async fn close(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parse() {
        assert_eq!(DatabaseBackend::parse("sqlite"), Some(DatabaseBackend::Sqlite));
        assert_eq!(DatabaseBackend::parse("SQLite3"), Some(DatabaseBackend::Sqlite));
        assert_eq!(DatabaseBackend::parse("oracle"), None);
    }

    #[test]
    fn test_backend_as_str() {
        assert_eq!(DatabaseBackend::Sqlite.as_str(), "sqlite");
    }
}
