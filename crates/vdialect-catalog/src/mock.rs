//! Mock introspector for testing
//!
//! Returns predefined database schemas and query results without connecting
//! to anything. Useful for:
//! - Unit testing the catalog merge
//! - Simulating permission errors on system views
//! - Simulating an unreachable database
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vdialect_catalog::{MockIntrospector, Introspector, DatabaseRef, Row};
//! use vdialect_core::{DatabaseSchema, TableDescriptor};
//!
//! let introspector = MockIntrospector::new();
//! introspector.add_schema("sales", DatabaseSchema::from_tables(vec![
//!     TableDescriptor::new("public", "orders"),
//! ])).await;
//! introspector.add_rows("SELECT ...", vec![
//!     Row::new().with("schema", "public").with("name", "orders_mv"),
//! ]).await;
//! ```

use crate::adapter::{DatabaseRef, FetchError, Introspector, Row};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use vdialect_core::DatabaseSchema;

/// Mock introspector for testing
///
/// Schemas are keyed by database name, query results by exact SQL text.
/// Clones share state.
pub struct MockIntrospector {
    /// Base schemas by database name
    schemas: Arc<RwLock<HashMap<String, DatabaseSchema>>>,

    /// Errors to return from `describe_database`, by database name
    database_errors: Arc<RwLock<HashMap<String, FetchError>>>,

    /// Rows to return from `execute`, by SQL text
    query_rows: Arc<RwLock<HashMap<String, Vec<Row>>>>,

    /// Errors to return from `execute`, by SQL text
    query_errors: Arc<RwLock<HashMap<String, FetchError>>>,

    /// Every SQL text passed to `execute`, in order
    executed: Arc<RwLock<Vec<String>>>,

    /// Simulate query latency (milliseconds)
    latency_ms: u64,

    /// Name to return from name() method
    introspector_name: &'static str,
}

impl MockIntrospector {
    /// Create a new mock with no predefined data
    pub fn new() -> Self {
        Self {
            schemas: Arc::new(RwLock::new(HashMap::new())),
            database_errors: Arc::new(RwLock::new(HashMap::new())),
            query_rows: Arc::new(RwLock::new(HashMap::new())),
            query_errors: Arc::new(RwLock::new(HashMap::new())),
            executed: Arc::new(RwLock::new(Vec::new())),
            latency_ms: 0,
            introspector_name: "Mock",
        }
    }

    /// Set the base schema returned for a database
    pub async fn add_schema(&self, database: &str, schema: DatabaseSchema) {
        self.schemas.write().await.insert(database.to_string(), schema);
    }

    /// Make `describe_database` fail for a database
    pub async fn add_database_error(&self, database: &str, error: FetchError) {
        self.database_errors
            .write()
            .await
            .insert(database.to_string(), error);
    }

    /// Set the rows returned for a query
    pub async fn add_rows(&self, sql: &str, rows: Vec<Row>) {
        self.query_rows.write().await.insert(sql.to_string(), rows);
    }

    /// Make `execute` fail for a query
    ///
    /// Takes precedence over rows registered for the same query.
    pub async fn add_query_error(&self, sql: &str, error: FetchError) {
        self.query_errors.write().await.insert(sql.to_string(), error);
    }

    /// Configure simulated latency for all operations
    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Set a custom introspector name
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.introspector_name = name;
        self
    }

    /// SQL texts executed so far
    pub async fn executed_queries(&self) -> Vec<String> {
        self.executed.read().await.clone()
    }

    /// Clear all stored data and the execution log
    pub async fn clear(&self) {
        self.schemas.write().await.clear();
        self.database_errors.write().await.clear();
        self.query_rows.write().await.clear();
        self.query_errors.write().await.clear();
        self.executed.write().await.clear();
    }

    async fn simulate_latency(&self) {
        if self.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.latency_ms)).await;
        }
    }
}

impl Default for MockIntrospector {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MockIntrospector {
    fn clone(&self) -> Self {
        Self {
            schemas: Arc::clone(&self.schemas),
            database_errors: Arc::clone(&self.database_errors),
            query_rows: Arc::clone(&self.query_rows),
            query_errors: Arc::clone(&self.query_errors),
            executed: Arc::clone(&self.executed),
            latency_ms: self.latency_ms,
            introspector_name: self.introspector_name,
        }
    }
}

#[async_trait::async_trait]
impl Introspector for MockIntrospector {
    fn name(&self) -> &'static str {
        self.introspector_name
    }

    async fn describe_database(
        &self,
        _driver: &str,
        database: &DatabaseRef,
    ) -> Result<DatabaseSchema, FetchError> {
        self.simulate_latency().await;

        if let Some(error) = self.database_errors.read().await.get(&database.name) {
            return Err(error.clone());
        }

        self.schemas
            .read()
            .await
            .get(&database.name)
            .cloned()
            .ok_or_else(|| FetchError::DatabaseNotFound(database.name.clone()))
    }

    async fn execute(&self, _database: &DatabaseRef, sql: &str) -> Result<Vec<Row>, FetchError> {
        self.simulate_latency().await;
        self.executed.write().await.push(sql.to_string());

        if let Some(error) = self.query_errors.read().await.get(sql) {
            return Err(error.clone());
        }

        self.query_rows
            .read()
            .await
            .get(sql)
            .cloned()
            .ok_or_else(|| FetchError::QueryError(format!("no result registered for query: {}", sql)))
    }
}

/// Builder for creating a MockIntrospector with predefined data
///
/// # Example
///
/// ```rust,ignore
/// let introspector = MockIntrospectorBuilder::new()
///     .with_schema("sales", DatabaseSchema::from_tables(vec![
///         TableDescriptor::new("public", "orders"),
///     ]))
///     .with_query_error(VIEWS_QUERY, FetchError::PermissionDenied("v_catalog".into()))
///     .build();
/// ```
pub struct MockIntrospectorBuilder {
    schemas: HashMap<String, DatabaseSchema>,
    database_errors: HashMap<String, FetchError>,
    query_rows: HashMap<String, Vec<Row>>,
    query_errors: HashMap<String, FetchError>,
    latency_ms: u64,
    introspector_name: &'static str,
}

impl MockIntrospectorBuilder {
    pub fn new() -> Self {
        Self {
            schemas: HashMap::new(),
            database_errors: HashMap::new(),
            query_rows: HashMap::new(),
            query_errors: HashMap::new(),
            latency_ms: 0,
            introspector_name: "Mock",
        }
    }

    pub fn with_schema(mut self, database: &str, schema: DatabaseSchema) -> Self {
        self.schemas.insert(database.to_string(), schema);
        self
    }

    pub fn with_database_error(mut self, database: &str, error: FetchError) -> Self {
        self.database_errors.insert(database.to_string(), error);
        self
    }

    pub fn with_rows(mut self, sql: &str, rows: Vec<Row>) -> Self {
        self.query_rows.insert(sql.to_string(), rows);
        self
    }

    pub fn with_query_error(mut self, sql: &str, error: FetchError) -> Self {
        self.query_errors.insert(sql.to_string(), error);
        self
    }

    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.introspector_name = name;
        self
    }

    pub fn build(self) -> MockIntrospector {
        MockIntrospector {
            schemas: Arc::new(RwLock::new(self.schemas)),
            database_errors: Arc::new(RwLock::new(self.database_errors)),
            query_rows: Arc::new(RwLock::new(self.query_rows)),
            query_errors: Arc::new(RwLock::new(self.query_errors)),
            executed: Arc::new(RwLock::new(Vec::new())),
            latency_ms: self.latency_ms,
            introspector_name: self.introspector_name,
        }
    }
}

impl Default for MockIntrospectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
