//! vdialect core
//!
//! Dialect-agnostic domain model: logical types, catalog descriptors,
//! temporal granularities and the expression toolkit dialect adapters build on.

pub mod config;
pub mod error;
pub mod expr;
pub mod granularity;
pub mod schema;

pub use config::{CatalogConfig, Config, ConfigError};
pub use error::ConfigurationError;
pub use expr::{BinaryOperator, Expr, Literal};
pub use granularity::{Granularity, IntervalUnit};
pub use schema::{DatabaseSchema, LogicalType, TableDescriptor};
