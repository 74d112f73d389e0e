//! Connection spec builder
//!
//! Turns the caller's open map of connection details into the parameter bag
//! the transport expects: driver class, subprotocol and a `//host:port/db`
//! subname, with every field this layer does not interpret carried through.
//!
//! ## Usage
//!
//! ```rust
//! use serde_json::json;
//! use vdialect_driver::connection::connection_spec;
//!
//! let details = json!({ "dbname": "sales", "user": "analyst" });
//! let spec = connection_spec(details.as_object().unwrap()).unwrap();
//! assert_eq!(spec.subname, "//localhost:5433/sales");
//! assert_eq!(spec.details["user"], "analyst");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use vdialect_core::ConfigurationError;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5433;
pub const DRIVER_CLASSNAME: &str = "com.vertica.jdbc.Driver";
pub const SUBPROTOCOL: &str = "vertica";

/// Fields consumed by the builder; everything else passes through
const CONSUMED_FIELDS: &[&str] = &["host", "port", "dbname", "db", "ssl", "additional-options"];

/// Typed view over caller-supplied connection details
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionParams {
    /// Host, `localhost` when absent or empty
    pub host: String,

    /// Port, 5433 when absent or unusable
    pub port: u16,

    /// Explicit database name
    pub dbname: Option<String>,

    /// Legacy database name field
    pub db: Option<String>,

    pub ssl: Option<bool>,

    /// Driver options appended to the subname
    pub additional_options: Option<String>,

    /// Every field not listed above, untouched
    pub other: Map<String, Value>,
}

impl ConnectionParams {
    /// Read connection params from an open map of details
    ///
    /// Only a host that cannot be coerced to a string is an error. Missing
    /// optional fields take their defaults.
    pub fn from_details(details: &Map<String, Value>) -> Result<Self, ConfigurationError> {
        let host = match details.get("host") {
            None | Some(Value::Null) => DEFAULT_HOST.to_string(),
            Some(Value::String(s)) if s.trim().is_empty() => DEFAULT_HOST.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => return Err(ConfigurationError::InvalidHost(other.to_string())),
        };

        let other = details
            .iter()
            .filter(|(key, _)| !CONSUMED_FIELDS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(Self {
            host,
            port: parse_port(details.get("port")),
            dbname: text_field(details.get("dbname")),
            db: text_field(details.get("db")),
            ssl: details.get("ssl").and_then(parse_bool),
            additional_options: text_field(details.get("additional-options")),
            other,
        })
    }

    /// Database identity: `dbname` wins over the legacy `db`
    pub fn database(&self) -> &str {
        self.dbname
            .as_deref()
            .or(self.db.as_deref())
            .unwrap_or_default()
    }
}

fn parse_port(value: Option<&Value>) -> u16 {
    let parsed = match value {
        None | Some(Value::Null) => return DEFAULT_PORT,
        Some(Value::String(s)) if s.trim().is_empty() => return DEFAULT_PORT,
        Some(Value::Number(n)) => n.as_u64().and_then(|p| u16::try_from(p).ok()),
        Some(Value::String(s)) => s.trim().parse::<u16>().ok(),
        Some(_) => None,
    };

    parsed.unwrap_or_else(|| {
        tracing::warn!(
            port = ?value,
            default = DEFAULT_PORT,
            "unusable port in connection details; using default"
        );
        DEFAULT_PORT
    })
}

fn text_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Parameter bag consumed by the transport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionSpec {
    pub classname: String,
    pub subprotocol: String,

    /// `//host:port/database`, plus `?options` when supplied
    pub subname: String,

    pub host: String,
    pub port: u16,
    pub database: String,

    /// Caller fields carried through untouched
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl ConnectionSpec {
    /// Full JDBC-style URL
    pub fn url(&self) -> String {
        format!("jdbc:{}:{}", self.subprotocol, self.subname)
    }
}

/// Build the transport spec from typed params
pub fn build_spec(params: &ConnectionParams) -> ConnectionSpec {
    let database = params.database().to_string();
    let mut subname = format!("//{}:{}/{}", params.host, params.port, database);

    if let Some(options) = &params.additional_options {
        let options = options.trim_start_matches(['?', ';']);
        if !options.is_empty() {
            subname.push('?');
            subname.push_str(options);
        }
    }

    ConnectionSpec {
        classname: DRIVER_CLASSNAME.to_string(),
        subprotocol: SUBPROTOCOL.to_string(),
        subname,
        host: params.host.clone(),
        port: params.port,
        database,
        details: params.other.clone(),
    }
}

/// Build the transport spec straight from an open map of details
pub fn connection_spec(details: &Map<String, Value>) -> Result<ConnectionSpec, ConfigurationError> {
    Ok(build_spec(&ConnectionParams::from_details(details)?))
}
