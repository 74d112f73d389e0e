//! Catalog introspection for dialect adapters
//!
//! Defines the transport boundary ([`Introspector`]) and the catalog merge
//! that unions generically introspected tables with engine-specific object
//! kinds read from system views.
//!
//! ## Example
//!
//! ```rust,ignore
//! use vdialect_catalog::{CatalogMerger, DatabaseRef};
//!
//! let merger = CatalogMerger::new("view", VIEWS_QUERY);
//! let schema = merger
//!     .describe_database(&introspector, "vertica", &DatabaseRef::new("sales"))
//!     .await?;
//! ```

pub mod adapter;
pub mod merge;
pub mod mock;

pub use adapter::{DatabaseRef, FetchError, Introspector, Row};
pub use merge::{table_from_row, CatalogMerger, NAME_COLUMN, SCHEMA_COLUMN};
pub use mock::{MockIntrospector, MockIntrospectorBuilder};
