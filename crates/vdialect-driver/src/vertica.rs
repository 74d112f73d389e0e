//! Vertica dialect adapter
//!
//! The single object the host registers for Vertica. Every capability is a
//! dispatch to the type map, the temporal compiler, the connection builder
//! or the catalog merger; the adapter itself holds no mutable state and
//! does no I/O when constructed.

use crate::connection::{self, ConnectionSpec};
use crate::driver::{ConnectionProperty, PropertyKind, SqlDriver};
use crate::{temporal, typemap};
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use vdialect_catalog::{CatalogMerger, DatabaseRef, FetchError, Introspector};
use vdialect_core::{
    CatalogConfig, ConfigurationError, DatabaseSchema, Expr, Granularity, IntervalUnit, LogicalType,
};

/// Registry identity
pub const DRIVER_NAME: &str = "vertica";

/// Session timezone statement
///
/// `%s` takes a quoted, escaped SQL string literal; use
/// [`VerticaDriver::set_timezone_statement`] to fill it from a bare zone id.
pub const SET_TIMEZONE_SQL: &str = "SET TIME ZONE TO %s;";

/// Reads the engine's wall clock
pub const CURRENT_TIME_QUERY: &str =
    "select to_char(CURRENT_TIMESTAMP, 'YYYY-MM-DD HH24:MI:SS TZ')";

/// Display pattern of `CURRENT_TIME_QUERY` output
///
/// For formatting only: chrono cannot parse `%Z`. Read the query result with
/// [`VerticaDriver::parse_current_time`].
pub const CURRENT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

/// User-defined views, read from the proprietary catalog
pub const VIEWS_QUERY: &str = r#"SELECT table_schema AS "schema", table_name AS "name" FROM v_catalog.views WHERE NOT is_system_view"#;

const DEFAULT_PORT_TEXT: &str = "5433";

static CONNECTION_PROPERTIES: [ConnectionProperty; 6] = [
    ConnectionProperty {
        name: "host",
        display_name: "Host",
        kind: PropertyKind::String,
        default: Some("localhost"),
        placeholder: None,
        required: false,
    },
    ConnectionProperty {
        name: "port",
        display_name: "Port",
        kind: PropertyKind::Integer,
        default: Some(DEFAULT_PORT_TEXT),
        placeholder: None,
        required: false,
    },
    ConnectionProperty {
        name: "dbname",
        display_name: "Database name",
        kind: PropertyKind::String,
        default: None,
        placeholder: Some("birds_of_the_world"),
        required: true,
    },
    ConnectionProperty {
        name: "user",
        display_name: "Database username",
        kind: PropertyKind::String,
        default: None,
        placeholder: Some("What username do you use to login to the database?"),
        required: true,
    },
    ConnectionProperty {
        name: "password",
        display_name: "Database password",
        kind: PropertyKind::Password,
        default: None,
        placeholder: None,
        required: false,
    },
    ConnectionProperty {
        name: "additional-options",
        display_name: "Additional JDBC connection string options",
        kind: PropertyKind::String,
        default: None,
        placeholder: Some("ConnectionLoadBalance=1"),
        required: false,
    },
];

/// Errors reading the engine clock
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    #[error("Unparseable timestamp: {0}")]
    Timestamp(String),

    #[error("Unsupported time zone: {0}")]
    Zone(String),
}

/// Vertica dialect adapter
#[derive(Debug, Clone)]
pub struct VerticaDriver {
    merger: CatalogMerger,
}

impl VerticaDriver {
    /// Adapter with view discovery enabled
    pub fn new() -> Self {
        Self {
            merger: CatalogMerger::new("view", VIEWS_QUERY),
        }
    }

    /// Adapter honoring catalog settings from config
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self {
            merger: CatalogMerger::new("view", VIEWS_QUERY).with_supplementary(config.include_views),
        }
    }

    pub fn merger(&self) -> &CatalogMerger {
        &self.merger
    }

    /// Render the session timezone statement for a zone name
    pub fn set_timezone_statement(timezone: &str) -> String {
        SET_TIMEZONE_SQL.replace("%s", &Expr::string(timezone).to_string())
    }

    /// Parse the output of `CURRENT_TIME_QUERY`
    ///
    /// The zone is `UTC`, `GMT`, `Z` or a numeric offset (`+05`, `+0530`,
    /// `-08:00`). Other abbreviations are ambiguous and rejected.
    pub fn parse_current_time(text: &str) -> Result<DateTime<FixedOffset>, ClockError> {
        let text = text.trim();
        let (stamp, zone) = text
            .rsplit_once(' ')
            .ok_or_else(|| ClockError::Timestamp(text.to_string()))?;

        let naive = NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S")
            .map_err(|e| ClockError::Timestamp(format!("{}: {}", stamp, e)))?;
        let offset = parse_zone(zone).ok_or_else(|| ClockError::Zone(zone.to_string()))?;

        offset
            .from_local_datetime(&naive)
            .single()
            .ok_or_else(|| ClockError::Timestamp(text.to_string()))
    }
}

impl Default for VerticaDriver {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_zone(zone: &str) -> Option<FixedOffset> {
    match zone {
        "UTC" | "GMT" | "Z" => return FixedOffset::east_opt(0),
        _ => {}
    }

    let sign = match zone.chars().next()? {
        '+' => 1,
        '-' => -1,
        _ => return None,
    };
    let digits: String = zone[1..].chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if minutes >= 60 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[async_trait::async_trait]
impl SqlDriver for VerticaDriver {
    fn name(&self) -> &'static str {
        DRIVER_NAME
    }

    fn display_name(&self) -> &'static str {
        "Vertica"
    }

    fn resolve_type(&self, type_name: &str) -> LogicalType {
        typemap::resolve_type(type_name)
    }

    fn truncate(&self, granularity: Granularity, expr: Expr) -> Expr {
        temporal::truncate(granularity, expr)
    }

    fn date_offset(&self, unit: IntervalUnit, amount: f64) -> Result<Expr, ConfigurationError> {
        temporal::date_offset(unit, amount)
    }

    fn string_length(&self, expr: Expr) -> Expr {
        temporal::string_length(expr)
    }

    fn connection_spec(
        &self,
        details: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<ConnectionSpec, ConfigurationError> {
        connection::connection_spec(details)
    }

    fn connection_properties(&self) -> &'static [ConnectionProperty] {
        &CONNECTION_PROPERTIES
    }

    fn set_timezone_sql(&self) -> &'static str {
        SET_TIMEZONE_SQL
    }

    fn current_time_query(&self) -> (&'static str, &'static str) {
        (CURRENT_TIME_QUERY, CURRENT_TIME_FORMAT)
    }

    async fn describe_database(
        &self,
        introspector: &dyn Introspector,
        database: &DatabaseRef,
    ) -> Result<DatabaseSchema, FetchError> {
        self.merger
            .describe_database(introspector, DRIVER_NAME, database)
            .await
    }
}
