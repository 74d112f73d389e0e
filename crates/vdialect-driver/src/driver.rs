//! Capability set a dialect adapter exposes to the host compiler

use crate::connection::ConnectionSpec;
use serde::{Deserialize, Serialize};
use vdialect_catalog::{DatabaseRef, FetchError, Introspector};
use vdialect_core::{ConfigurationError, DatabaseSchema, Expr, Granularity, IntervalUnit, LogicalType};

/// Kind of value a connection property holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    String,
    Integer,
    Password,
}

/// Describes one connection field the host should ask the user for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionProperty {
    /// Key in the connection details map
    pub name: &'static str,
    pub display_name: &'static str,
    pub kind: PropertyKind,
    pub default: Option<&'static str>,
    pub placeholder: Option<&'static str>,
    pub required: bool,
}

/// One method per capability the host dispatches through
///
/// Everything but `describe_database` is pure and synchronous.
#[async_trait::async_trait]
pub trait SqlDriver: Send + Sync {
    /// Stable registry identity
    fn name(&self) -> &'static str;

    /// Human-readable engine name
    fn display_name(&self) -> &'static str;

    /// Map a native column type to its logical type; never fails
    fn resolve_type(&self, type_name: &str) -> LogicalType;

    /// Truncate or extract `expr` at `granularity`
    fn truncate(&self, granularity: Granularity, expr: Expr) -> Expr;

    /// Current timestamp offset by `amount` whole units
    fn date_offset(&self, unit: IntervalUnit, amount: f64) -> Result<Expr, ConfigurationError>;

    /// Character length of `expr`
    fn string_length(&self, expr: Expr) -> Expr;

    /// Transport parameters for the given connection details
    fn connection_spec(
        &self,
        details: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<ConnectionSpec, ConfigurationError>;

    /// Ordered connection field descriptors
    fn connection_properties(&self) -> &'static [ConnectionProperty];

    /// Statement template setting the session timezone
    ///
    /// The single `%s` placeholder takes an already-quoted SQL string
    /// literal (`'America/New_York'`), not a bare zone id.
    fn set_timezone_sql(&self) -> &'static str;

    /// Query reading the engine clock, and the display pattern of its output
    fn current_time_query(&self) -> (&'static str, &'static str);

    /// Full table list of a database
    async fn describe_database(
        &self,
        introspector: &dyn Introspector,
        database: &DatabaseRef,
    ) -> Result<DatabaseSchema, FetchError>;
}
