//! Type Classifier & Value Pipeline (component A).
//!
//! Classifies backend SQL type strings into a closed set of categories, picks the transport cast
//! (if any) a row query should apply to a column, and parses transported values back into display
//! form. Classification is pure, total, and case-insensitive; it never fails (unrecognized types
//! fall back to `TypeCategory::Unknown`).

use std::sync::Arc;

/// The closed set of type categories every backend SQL type classifies into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    Text,
    Numeric,
    Temporal,
    Boolean,
    Binary,
    Complex,
    Identifier,
    Enum,
    Geo,
    Unknown,
}

/// SQL type families recognized as 64-bit-or-wider integers.
///
/// `cast_for` casts these to `TEXT` on the wire to avoid lossy bridging: an `i64`/`f64` transport
/// pair cannot round-trip a `HUGEINT`, and even `BIGINT` values near `i64::MAX` are unsafe to
/// carry through a float-capable transport without an explicit textual cast.
const WIDE_INT_TYPES: &[&str] = &["BIGINT", "HUGEINT", "UBIGINT", "UNSIGNED BIGINT"];

/// Strips a trailing parameter list, e.g. `DECIMAL(10,2)` -> `DECIMAL`, `ENUM('a','b')` -> `ENUM`.
fn strip_params(sql_type: &str) -> &str {
    match sql_type.find('(') {
        Some(idx) => sql_type[..idx].trim_end(),
        None => sql_type,
    }
}

/// Classifies a backend SQL type string into a `TypeCategory`. Pure, total, case-insensitive.
///
/// Precedence: exact matches > family prefixes > fallback `Unknown`, checked in a fixed order so
/// overlapping families (e.g. `ENUM` vs. a generic identifier) never race.
pub fn categorize(sql_type: &str) -> TypeCategory {
    let trimmed = strip_params(sql_type.trim());
    let upper = trimmed.to_uppercase();
    let upper = upper.as_str();

    if upper == "BOOL" || upper == "BOOLEAN" {
        return TypeCategory::Boolean;
    }
    if upper.starts_with("UUID") {
        return TypeCategory::Identifier;
    }
    if upper.starts_with("ENUM") {
        return TypeCategory::Enum;
    }
    if ["LIST", "ARRAY", "STRUCT", "ROW", "MAP", "UNION"].contains(&upper)
        || upper.starts_with("JSON")
    {
        return TypeCategory::Complex;
    }
    if ["GEOMETRY", "GEOGRAPHY", "POINT", "LINESTRING", "POLYGON"].contains(&upper) {
        return TypeCategory::Geo;
    }
    if upper == "DATE" || upper == "TIME" || upper.starts_with("TIMESTAMP") || upper == "INTERVAL"
    {
        return TypeCategory::Temporal;
    }
    if upper == "BLOB" || upper == "BYTEA" {
        return TypeCategory::Binary;
    }
    if is_integer_family(upper)
        || ["FLOAT", "REAL", "DOUBLE"].contains(&upper)
        || upper.starts_with("DECIMAL")
        || upper.starts_with("NUMERIC")
    {
        return TypeCategory::Numeric;
    }
    if ["VARCHAR", "TEXT", "CHAR", "STRING", "NAME", "BPCHAR"].contains(&upper) {
        return TypeCategory::Text;
    }
    TypeCategory::Unknown
}

fn is_integer_family(upper: &str) -> bool {
    const INT_TYPES: &[&str] = &[
        "TINYINT",
        "SMALLINT",
        "INT",
        "INTEGER",
        "BIGINT",
        "HUGEINT",
        "UTINYINT",
        "USMALLINT",
        "UINTEGER",
        "UBIGINT",
    ];
    INT_TYPES.contains(&upper)
        || upper.starts_with("UNSIGNED ")
        || (upper.starts_with('U') && INT_TYPES.contains(&&upper[1..]))
}

/// True for the wide-integer subset of the numeric family: types whose range exceeds what
/// round-trips losslessly through the transport without an explicit `TEXT` cast.
pub fn is_wide_integer(sql_type: &str) -> bool {
    let upper = strip_params(sql_type.trim()).to_uppercase();
    WIDE_INT_TYPES.contains(&upper.as_str())
}

/// A stable, per-column schema entry: its key, its backend SQL type string, and the derived
/// category that drives transport casting, parsing, alignment, sortability, and filter
/// affordances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    pub key: String,
    pub sql_type: String,
    pub category: TypeCategory,
}

impl ColumnSchema {
    pub fn new(key: impl Into<String>, sql_type: impl Into<String>) -> Self {
        let sql_type = sql_type.into();
        let category = categorize(&sql_type);
        Self {
            key: key.into(),
            sql_type,
            category,
        }
    }
}

/// Picks the SQL cast target a row query should apply to a column, or `None` if the column can
/// be selected directly.
///
/// Required casts: wide integers, `INTERVAL`, `TIME`, and any `Complex` category column cast to
/// `TEXT`. All others pass through uncast.
pub fn cast_for(schema: &ColumnSchema) -> Option<&'static str> {
    if is_wide_integer(&schema.sql_type) {
        return Some("TEXT");
    }
    let upper = strip_params(schema.sql_type.trim()).to_uppercase();
    if upper == "INTERVAL" || upper == "TIME" {
        return Some("TEXT");
    }
    if schema.category == TypeCategory::Complex {
        return Some("TEXT");
    }
    None
}

/// An immutable, shared schema list — the Row Window Client and the Layout Engine both read a
/// clone of the same `Arc<[ColumnSchema]>` rather than cloning the `Vec` itself.
pub type SchemaRef = Arc<[ColumnSchema]>;
