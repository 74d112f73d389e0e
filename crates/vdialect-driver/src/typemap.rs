//! Vertica column type -> LogicalType mapping
//!
//! Keys are Vertica's canonical type spellings as the catalog reports them.
//! Multi-word names ("Long Varchar") are single keys. Entries may be added
//! but existing mappings must not change: synced schemas depend on them.

use vdialect_core::LogicalType;

/// Canonical type table
pub const TYPE_MAP: &[(&str, LogicalType)] = &[
    ("Boolean", LogicalType::Boolean),
    ("Integer", LogicalType::Integer),
    ("Bigint", LogicalType::BigInteger),
    ("Varbinary", LogicalType::Unknown),
    ("Binary", LogicalType::Unknown),
    ("Char", LogicalType::Text),
    ("Varchar", LogicalType::Text),
    ("Money", LogicalType::Decimal),
    ("Numeric", LogicalType::Decimal),
    ("Double", LogicalType::Decimal),
    ("Float", LogicalType::Float),
    ("Date", LogicalType::Date),
    ("Time", LogicalType::Time),
    ("TimeTz", LogicalType::Time),
    ("Timestamp", LogicalType::DateTime),
    ("TimestampTz", LogicalType::DateTime),
    ("AUTO_INCREMENT", LogicalType::Integer),
    ("Long Varchar", LogicalType::Text),
    ("Long Varbinary", LogicalType::Unknown),
];

/// Resolve a Vertica type name to its logical type
///
/// Total: unmapped names, including the empty string, resolve to
/// `LogicalType::Unknown`. An exact canonical match wins; otherwise the name
/// is compared against the canonical keys ignoring ASCII case.
pub fn resolve_type(type_name: &str) -> LogicalType {
    TYPE_MAP
        .iter()
        .find(|(name, _)| *name == type_name)
        .or_else(|| {
            TYPE_MAP
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(type_name))
        })
        .map(|(_, logical_type)| *logical_type)
        .unwrap_or(LogicalType::Unknown)
}
