//! Catalog merge: base introspection plus a best-effort supplementary fetch
//!
//! Some engines expose table-like objects (derived or materialized views)
//! only through proprietary system views the generic introspector never
//! reads. The merger runs the generic path first, then queries the system
//! view directly and unions the results.
//!
//! The base fetch is the primary result: its errors propagate. The
//! supplementary fetch is a side path: its errors are logged and dropped,
//! and the caller gets the base tables as if the extra object kind did not
//! exist.

use crate::adapter::{DatabaseRef, FetchError, Introspector, Row};
use vdialect_core::{DatabaseSchema, TableDescriptor};

/// Column carrying the object's schema in supplementary query results
pub const SCHEMA_COLUMN: &str = "schema";

/// Column carrying the object's name in supplementary query results
pub const NAME_COLUMN: &str = "name";

/// Unions base tables with a proprietary object kind
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogMerger {
    /// Human-readable object kind, used in logs
    object_kind: &'static str,

    /// Query returning `schema` and `name` columns
    query: String,

    /// Whether the supplementary fetch runs at all
    include_supplementary: bool,
}

impl CatalogMerger {
    /// Create a merger for an object kind fetched by `query`
    pub fn new(object_kind: &'static str, query: impl Into<String>) -> Self {
        Self {
            object_kind,
            query: query.into(),
            include_supplementary: true,
        }
    }

    /// Enable or disable the supplementary fetch
    pub fn with_supplementary(mut self, enabled: bool) -> Self {
        self.include_supplementary = enabled;
        self
    }

    pub fn object_kind(&self) -> &'static str {
        self.object_kind
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn includes_supplementary(&self) -> bool {
        self.include_supplementary
    }

    /// Describe a database: base tables unioned with the supplementary kind
    pub async fn describe_database(
        &self,
        introspector: &dyn Introspector,
        driver: &str,
        database: &DatabaseRef,
    ) -> Result<DatabaseSchema, FetchError> {
        let mut schema = introspector.describe_database(driver, database).await?;

        if !self.include_supplementary {
            return Ok(schema);
        }

        match self.fetch_supplementary(introspector, database).await {
            Ok(tables) => {
                let before = schema.len();
                schema.merge(tables);
                tracing::debug!(
                    database = %database,
                    kind = self.object_kind,
                    added = schema.len() - before,
                    "merged supplementary catalog objects"
                );
            }
            Err(e) => {
                tracing::warn!(
                    database = %database,
                    kind = self.object_kind,
                    error = %e,
                    "failed to fetch supplementary catalog objects; using base tables only"
                );
            }
        }

        Ok(schema)
    }

    /// Run the supplementary query and convert its rows
    pub async fn fetch_supplementary(
        &self,
        introspector: &dyn Introspector,
        database: &DatabaseRef,
    ) -> Result<Vec<TableDescriptor>, FetchError> {
        let rows = introspector.execute(database, &self.query).await?;
        rows.iter().map(table_from_row).collect()
    }
}

/// Read a table descriptor out of a `schema`/`name` row
pub fn table_from_row(row: &Row) -> Result<TableDescriptor, FetchError> {
    let column = |name: &str| {
        row.get_str(name).ok_or_else(|| {
            FetchError::InvalidResponse(format!("missing string column '{}' in catalog row", name))
        })
    };

    Ok(TableDescriptor::new(column(SCHEMA_COLUMN)?, column(NAME_COLUMN)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockIntrospector;
    use pretty_assertions::assert_eq;

    const QUERY: &str = "SELECT schema, name FROM sys.views";

    fn row(schema: &str, name: &str) -> Row {
        Row::new().with(SCHEMA_COLUMN, schema).with(NAME_COLUMN, name)
    }

    #[tokio::test]
    async fn merges_supplementary_tables() {
        let db = DatabaseRef::new("sales");
        let introspector = MockIntrospector::new();
        introspector
            .add_schema("sales", DatabaseSchema::from_tables(vec![TableDescriptor::new("public", "orders")]))
            .await;
        introspector.add_rows(QUERY, vec![row("public", "orders_mv")]).await;

        let merger = CatalogMerger::new("view", QUERY);
        let schema = merger.describe_database(&introspector, "vertica", &db).await.unwrap();

        assert_eq!(
            schema,
            DatabaseSchema::from_tables(vec![
                TableDescriptor::new("public", "orders"),
                TableDescriptor::new("public", "orders_mv"),
            ])
        );
    }

    #[tokio::test]
    async fn duplicates_collapse() {
        let db = DatabaseRef::new("sales");
        let introspector = MockIntrospector::new();
        introspector
            .add_schema("sales", DatabaseSchema::from_tables(vec![TableDescriptor::new("public", "orders")]))
            .await;
        introspector
            .add_rows(QUERY, vec![row("public", "orders"), row("public", "orders")])
            .await;

        let merger = CatalogMerger::new("view", QUERY);
        let schema = merger.describe_database(&introspector, "vertica", &db).await.unwrap();
        assert_eq!(schema.len(), 1);
    }

    #[tokio::test]
    async fn supplementary_failure_returns_base() {
        let db = DatabaseRef::new("sales");
        let base = DatabaseSchema::from_tables(vec![TableDescriptor::new("public", "orders")]);
        let introspector = MockIntrospector::new();
        introspector.add_schema("sales", base.clone()).await;
        introspector
            .add_query_error(QUERY, FetchError::PermissionDenied("sys.views".to_string()))
            .await;

        let merger = CatalogMerger::new("view", QUERY);
        let schema = merger.describe_database(&introspector, "vertica", &db).await.unwrap();
        assert_eq!(schema, base);
    }

    #[tokio::test]
    async fn malformed_rows_are_contained() {
        let db = DatabaseRef::new("sales");
        let base = DatabaseSchema::from_tables(vec![TableDescriptor::new("public", "orders")]);
        let introspector = MockIntrospector::new();
        introspector.add_schema("sales", base.clone()).await;
        introspector
            .add_rows(QUERY, vec![row("public", "good_view"), Row::new().with(SCHEMA_COLUMN, "public")])
            .await;

        let merger = CatalogMerger::new("view", QUERY);

        let err = merger.fetch_supplementary(&introspector, &db).await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidResponse(_)));

        // a partially bad result set is dropped as a whole
        let schema = merger.describe_database(&introspector, "vertica", &db).await.unwrap();
        assert_eq!(schema, base);
    }

    #[tokio::test]
    async fn base_failure_propagates() {
        let db = DatabaseRef::new("sales");
        let introspector = MockIntrospector::new();
        introspector
            .add_database_error("sales", FetchError::NetworkError("connection refused".to_string()))
            .await;
        introspector.add_rows(QUERY, vec![row("public", "orders_mv")]).await;

        let merger = CatalogMerger::new("view", QUERY);
        let err = merger.describe_database(&introspector, "vertica", &db).await.unwrap_err();
        match err {
            FetchError::NetworkError(msg) => assert_eq!(msg, "connection refused"),
            other => panic!("Expected NetworkError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn disabled_merger_skips_the_query() {
        let db = DatabaseRef::new("sales");
        let base = DatabaseSchema::from_tables(vec![TableDescriptor::new("public", "orders")]);
        let introspector = MockIntrospector::new();
        introspector.add_schema("sales", base.clone()).await;
        introspector.add_rows(QUERY, vec![row("public", "orders_mv")]).await;

        let merger = CatalogMerger::new("view", QUERY).with_supplementary(false);
        let schema = merger.describe_database(&introspector, "vertica", &db).await.unwrap();

        assert_eq!(schema, base);
        assert!(introspector.executed_queries().await.is_empty());
    }

    #[test]
    fn table_from_row_requires_string_columns() {
        assert_eq!(
            table_from_row(&row("public", "v")).unwrap(),
            TableDescriptor::new("public", "v")
        );
        let bad = Row::new().with(SCHEMA_COLUMN, "public").with(NAME_COLUMN, 7);
        assert!(matches!(table_from_row(&bad), Err(FetchError::InvalidResponse(_))));
    }
}
