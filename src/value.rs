//! Type Classifier & Value Pipeline (component A), part 2: the wire value type and the parse step
//! that turns a transported `RawValue` into display/sort-ready `Value`, given the column's
//! `TypeCategory`.

use crate::schema::{ColumnSchema, TypeCategory, is_wide_integer};
use std::cmp::Ordering;
use std::sync::LazyLock;

/// Default horizontal alignment per type category, mirrored from the same numeric-right /
/// text-left convention used for rendering tabular cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

static DEFAULT_ALIGNMENTS: LazyLock<[(TypeCategory, Alignment); 9]> = LazyLock::new(|| {
    [
        (TypeCategory::Numeric, Alignment::Right),
        (TypeCategory::Boolean, Alignment::Center),
        (TypeCategory::Temporal, Alignment::Center),
        (TypeCategory::Enum, Alignment::Center),
        (TypeCategory::Identifier, Alignment::Left),
        (TypeCategory::Text, Alignment::Left),
        (TypeCategory::Binary, Alignment::Left),
        (TypeCategory::Complex, Alignment::Left),
        (TypeCategory::Geo, Alignment::Left),
    ]
});

/// Default alignment for a category; `Unknown` falls back to `Left`.
pub fn default_alignment(category: TypeCategory) -> Alignment {
    DEFAULT_ALIGNMENTS
        .iter()
        .find(|(cat, _)| *cat == category)
        .map(|(_, align)| *align)
        .unwrap_or(Alignment::Left)
}

/// The value a backend places on the wire for one cell. Untyped beyond this set — the *meaning*
/// of a `Text` payload (a cast `BIGINT`, a stringified `LIST`, a genuine `VARCHAR`) comes from the
/// column's `ColumnSchema`, not from `RawValue` itself.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Bytes(Vec<u8>),
}

/// One raw result row: column-keyed `RawValue` payloads, in the order the query projected them.
pub type ResultRow = Vec<(String, RawValue)>;

/// A full coordinator result set: one `ResultRow` per returned row.
pub type QueryResultSet = Vec<ResultRow>;

/// A parsed, display/sort-ready cell value. Produced from a `RawValue` plus the originating
/// column's category; the inverse of the transport cast chosen by `cast_for`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    /// A wide integer (`BIGINT`/`HUGEINT`/`UBIGINT`) carried as text on the wire. `display` is the
    /// original digit string; `sort_value` is the same magnitude widened to `i128` so ordering
    /// stays numeric instead of falling back to a lexical string comparison.
    BigInt { display: String, sort_value: i128 },
    Float(f64),
    Bool(bool),
    Text(String),
    Bytes(Vec<u8>),
}

impl Value {
    /// Display text for the cell. Nulls render as the empty string; the caller decides whether to
    /// special-case that for a placeholder glyph.
    pub fn display(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Int(v) => v.to_string(),
            Value::BigInt { display, .. } => display.clone(),
            Value::Float(v) => format!("{v}"),
            Value::Bool(v) => v.to_string(),
            Value::Text(v) => v.clone(),
            Value::Bytes(v) => format!("0x{}", hex_encode(v)),
        }
    }

    /// A total order for sorting. Nulls sort last regardless of direction, matching the Data
    /// Model's documented null-handling: direction flips the non-null ordering only.
    pub fn cmp_for_sort(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, _) => Ordering::Greater,
            (_, Value::Null) => Ordering::Less,
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::BigInt { sort_value: a, .. }, Value::BigInt { sort_value: b, .. }) => {
                a.cmp(b)
            }
            (Value::BigInt { sort_value: a, .. }, Value::Int(b)) => a.cmp(&(*b as i128)),
            (Value::Int(a), Value::BigInt { sort_value: b, .. }) => (*a as i128).cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Int(a), Value::Float(b)) => (*a as f64).total_cmp(b),
            (Value::Float(a), Value::Int(b)) => a.total_cmp(&(*b as f64)),
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Bytes(a), Value::Bytes(b)) => a.cmp(b),
            (a, b) => a.display().cmp(&b.display()),
        }
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Parses a `RawValue` into display/sort form for a given column.
///
/// For columns that required a transport cast (`cast_for` returned `Some("TEXT")`), the raw
/// payload arrives as `RawValue::Text` and must be parsed back according to the column's
/// `TypeCategory`; for all other columns the raw payload already carries its native shape and is
/// passed through. Parse failures are recovered locally: they produce `Value::Text` holding the
/// original raw text rather than propagating a `GridError` — parsing errors never escape as an
/// `Err`.
pub fn parse_value(raw: &RawValue, schema: &ColumnSchema) -> Value {
    match raw {
        RawValue::Null => Value::Null,
        RawValue::Bool(v) => Value::Bool(*v),
        RawValue::Int(v) => Value::Int(*v),
        RawValue::Float(v) => Value::Float(*v),
        RawValue::Bytes(v) => Value::Bytes(v.clone()),
        RawValue::Text(text) => parse_text(text, schema),
    }
}

fn parse_text(text: &str, schema: &ColumnSchema) -> Value {
    match schema.category {
        TypeCategory::Numeric if is_wide_integer(&schema.sql_type) => {
            match text.parse::<i128>() {
                Ok(sort_value) => Value::BigInt {
                    display: text.to_string(),
                    sort_value,
                },
                Err(_) => Value::Text(text.to_string()),
            }
        }
        TypeCategory::Numeric => {
            if let Ok(i) = text.parse::<i64>() {
                Value::Int(i)
            } else if let Ok(f) = text.parse::<f64>() {
                Value::Float(f)
            } else {
                Value::Text(text.to_string())
            }
        }
        TypeCategory::Boolean => match text.to_ascii_lowercase().as_str() {
            "true" | "t" | "1" => Value::Bool(true),
            "false" | "f" | "0" => Value::Bool(false),
            _ => Value::Text(text.to_string()),
        },
        _ => Value::Text(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnSchema;

    #[test]
    fn parse_value_passthrough_for_native_types() {
        let schema = ColumnSchema::new("age", "INTEGER");
        assert_eq!(parse_value(&RawValue::Int(42), &schema), Value::Int(42));
        assert_eq!(parse_value(&RawValue::Null, &schema), Value::Null);
    }

    #[test]
    fn parse_value_recovers_cast_bigint() {
        let schema = ColumnSchema::new("id", "BIGINT");
        assert_eq!(
            parse_value(&RawValue::Text("9223372036854775807".into()), &schema),
            Value::BigInt {
                display: "9223372036854775807".to_string(),
                sort_value: i64::MAX as i128,
            }
        );
    }

    #[test]
    fn parse_value_preserves_hugeint_beyond_i64_range() {
        let schema = ColumnSchema::new("id", "HUGEINT");
        let huge = "170141183460469231731687303715884105727"; // i128::MAX
        assert_eq!(
            parse_value(&RawValue::Text(huge.into()), &schema),
            Value::BigInt {
                display: huge.to_string(),
                sort_value: i128::MAX,
            }
        );
    }

    #[test]
    fn bigint_sorts_numerically_not_lexically() {
        let nine = Value::BigInt {
            display: "9".to_string(),
            sort_value: 9,
        };
        let eighty = Value::BigInt {
            display: "80".to_string(),
            sort_value: 80,
        };
        assert_eq!(nine.cmp_for_sort(&eighty), Ordering::Less);
    }

    #[test]
    fn parse_value_falls_back_on_unparseable_text() {
        let schema = ColumnSchema::new("id", "BIGINT");
        assert_eq!(
            parse_value(&RawValue::Text("not-a-number".into()), &schema),
            Value::Text("not-a-number".into())
        );
    }

    #[test]
    fn null_sorts_last_both_directions() {
        let a = Value::Null;
        let b = Value::Int(5);
        assert_eq!(a.cmp_for_sort(&b), Ordering::Greater);
        assert_eq!(b.cmp_for_sort(&a), Ordering::Less);
    }

    #[test]
    fn default_alignment_matches_category() {
        assert_eq!(default_alignment(TypeCategory::Numeric), Alignment::Right);
        assert_eq!(default_alignment(TypeCategory::Text), Alignment::Left);
        assert_eq!(default_alignment(TypeCategory::Unknown), Alignment::Left);
    }
}
