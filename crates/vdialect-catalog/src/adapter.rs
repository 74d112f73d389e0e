//! Introspection trait implemented by the transport layer

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use vdialect_core::DatabaseSchema;

/// Identifies a database to describe
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DatabaseRef {
    /// Database name
    pub name: String,

    /// Connection details the transport needs to reach it
    #[serde(default)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl DatabaseRef {
    /// Create a database reference with no connection details
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            details: serde_json::Map::new(),
        }
    }

    /// Attach connection details
    pub fn with_details(mut self, details: serde_json::Map<String, serde_json::Value>) -> Self {
        self.details = details;
        self
    }
}

impl fmt::Display for DatabaseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// One row returned by a raw query, keyed by column label
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    pub columns: HashMap<String, serde_json::Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column value
    pub fn with(mut self, column: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.columns.insert(column.into(), value.into());
        self
    }

    /// Raw column value
    pub fn get(&self, column: &str) -> Option<&serde_json::Value> {
        self.columns.get(column)
    }

    /// Column value if it is a string
    pub fn get_str(&self, column: &str) -> Option<&str> {
        self.columns.get(column).and_then(|v| v.as_str())
    }
}

/// Errors that can occur when talking to the database
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Database not found: {0}")]
    DatabaseNotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Query failed: {0}")]
    QueryError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Generic introspection and query transport
///
/// Timeouts and retries belong to implementations; callers surface or
/// suppress the returned errors as-is.
#[async_trait::async_trait]
pub trait Introspector: Send + Sync {
    /// Get the transport name
    fn name(&self) -> &'static str;

    /// Describe the tables of a database using the generic introspection
    /// path for the given driver identity
    async fn describe_database(
        &self,
        driver: &str,
        database: &DatabaseRef,
    ) -> Result<DatabaseSchema, FetchError>;

    /// Run a raw SQL query and return its rows
    async fn execute(&self, database: &DatabaseRef, sql: &str) -> Result<Vec<Row>, FetchError>;
}
