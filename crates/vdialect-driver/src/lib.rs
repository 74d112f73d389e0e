//! Vertica dialect adapter
//!
//! Teaches a generic query compiler how to speak to Vertica: which native
//! column types map to which logical types, how temporal bucketing is
//! rendered, how connection details become transport parameters and how the
//! catalog is enriched with views.
//!
//! ## Example
//!
//! ```rust
//! use vdialect_core::{Expr, Granularity, LogicalType};
//! use vdialect_driver::{SqlDriver, VerticaDriver};
//!
//! let driver = VerticaDriver::new();
//! assert_eq!(driver.resolve_type("Long Varchar"), LogicalType::Text);
//!
//! let week = driver.truncate(Granularity::Week, Expr::column("created_at"));
//! assert_eq!(
//!     week.to_string(),
//!     r#"DATE_TRUNC('week', "created_at" + INTERVAL '1 day') - INTERVAL '1 day'"#
//! );
//! ```

pub mod connection;
pub mod driver;
pub mod registry;
pub mod temporal;
pub mod typemap;
pub mod vertica;

pub use connection::{build_spec, connection_spec, ConnectionParams, ConnectionSpec};
pub use driver::{ConnectionProperty, PropertyKind, SqlDriver};
pub use registry::{ClientProbe, LibraryProbe};
pub use typemap::{resolve_type, TYPE_MAP};
pub use vertica::{ClockError, VerticaDriver, DRIVER_NAME};
