//! Schema types and the portable logical type system

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Portable logical type system
///
/// Engine-native column types resolve to one of these categories, which is
/// all the host query layer needs to pick operators and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalType {
    /// Boolean type
    Boolean,

    /// 32-bit style integer
    Integer,

    /// 64-bit integer
    BigInteger,

    /// Exact or wide numeric (NUMERIC, MONEY, DOUBLE)
    Decimal,

    /// Floating point
    Float,

    /// Character data of any length
    Text,

    /// Date (no time component)
    Date,

    /// Time of day, with or without zone
    Time,

    /// Timestamp (with time component)
    DateTime,

    /// Binary or unrecognized type
    Unknown,
}

impl LogicalType {
    /// Whether values of this type carry a calendar or clock component
    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::Date | Self::Time | Self::DateTime)
    }

    /// Whether values of this type are numeric
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Integer | Self::BigInteger | Self::Decimal | Self::Float
        )
    }
}

impl std::fmt::Display for LogicalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Boolean => "BOOLEAN",
            Self::Integer => "INTEGER",
            Self::BigInteger => "BIGINTEGER",
            Self::Decimal => "DECIMAL",
            Self::Float => "FLOAT",
            Self::Text => "TEXT",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::DateTime => "DATETIME",
            Self::Unknown => "UNKNOWN",
        };
        f.write_str(name)
    }
}

/// A table-like object in a database catalog
///
/// Identity is the (schema, name) pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TableDescriptor {
    /// Schema the object lives in
    pub schema: String,

    /// Object name
    pub name: String,
}

impl TableDescriptor {
    /// Create a new table descriptor
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
        }
    }

    /// Get qualified name (`schema.name`)
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }
}

impl std::fmt::Display for TableDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.schema, self.name)
    }
}

/// The set of tables discovered in one database
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSchema {
    /// Tables, unique on (schema, name)
    pub tables: BTreeSet<TableDescriptor>,
}

impl DatabaseSchema {
    /// Create an empty database schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a database schema from a list of tables; duplicates collapse
    pub fn from_tables(tables: impl IntoIterator<Item = TableDescriptor>) -> Self {
        Self {
            tables: tables.into_iter().collect(),
        }
    }

    /// Add a table, returning false if it was already present
    pub fn insert(&mut self, table: TableDescriptor) -> bool {
        self.tables.insert(table)
    }

    /// Union another set of tables into this one
    pub fn merge(&mut self, tables: impl IntoIterator<Item = TableDescriptor>) {
        self.tables.extend(tables);
    }

    /// Check whether a table is present
    pub fn contains(&self, schema: &str, name: &str) -> bool {
        self.tables
            .iter()
            .any(|t| t.schema == schema && t.name == name)
    }

    /// Number of tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether no tables were discovered
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
