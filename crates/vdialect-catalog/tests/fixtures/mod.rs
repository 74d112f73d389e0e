//! Test fixtures for catalog integration tests
//!
//! Reusable catalogs shaped like a small sales warehouse.

#![allow(dead_code)]

use vdialect_catalog::{Row, NAME_COLUMN, SCHEMA_COLUMN};
use vdialect_core::{DatabaseSchema, TableDescriptor};

/// Supplementary query used throughout the integration tests
pub const VIEWS_QUERY: &str = "SELECT table_schema AS schema, table_name AS name FROM sys.views";

/// Base tables of the sales database
pub fn sales_tables() -> DatabaseSchema {
    DatabaseSchema::from_tables(vec![
        TableDescriptor::new("public", "orders"),
        TableDescriptor::new("public", "customers"),
        TableDescriptor::new("public", "products"),
        TableDescriptor::new("staging", "raw_orders"),
    ])
}

/// Derived views of the sales database, as system-view rows
pub fn sales_view_rows() -> Vec<Row> {
    vec![
        view_row("public", "orders_mv"),
        view_row("public", "daily_revenue"),
        view_row("reporting", "customer_ltv"),
    ]
}

/// A single `schema`/`name` row
pub fn view_row(schema: &str, name: &str) -> Row {
    Row::new().with(SCHEMA_COLUMN, schema).with(NAME_COLUMN, name)
}

/// A large catalog for stress-style tests
pub fn wide_tables(schemas: usize, tables_per_schema: usize) -> DatabaseSchema {
    DatabaseSchema::from_tables((0..schemas).flat_map(|s| {
        (0..tables_per_schema).map(move |t| TableDescriptor::new(format!("s{}", s), format!("t{}", t)))
    }))
}
