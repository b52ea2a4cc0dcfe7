//! Dynamic cell values and the generic `Record` row.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

use crate::error::UiError;
use crate::table::TableRow;

/// A dynamic value read out of a row for one column.
///
/// Columns describe how to present a value; the value itself carries no
/// presentation. Any variant can be fed to any column type, mismatches
/// degrade at render time.
///
/// # Example
///
/// ```
/// use campus_ui::value::Value;
///
/// let title = Value::from("Rust for Beginners");
/// let seats = Value::from(40i64);
/// let published = Value::from(true);
/// let missing = Value::Null;
/// assert!(missing.is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(untagged)]
pub enum Value {
    /// Null/absent value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Arbitrary precision decimal (money).
    Decimal(Decimal),
    /// String value.
    String(String),
    /// Timestamp.
    DateTime(DateTime<Utc>),
    /// Arrays and objects that have no scalar meaning.
    Json(serde_json::Value),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
            Value::DateTime(_) => "datetime",
            Value::Json(_) => "json",
        }
    }

    /// Numeric view of the value. Only numeric variants qualify; numeric
    /// looking strings are still strings.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Decimal(v) => v.to_f64(),
            _ => None,
        }
    }

    /// Returns the string slice if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Truthiness as a toggle switch sees it.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(v) => *v != 0,
            Value::Float(v) => *v != 0.0 && !v.is_nan(),
            Value::Decimal(v) => !v.is_zero(),
            Value::String(s) => !s.is_empty(),
            Value::DateTime(_) => true,
            Value::Json(v) => !v.is_null(),
        }
    }

    /// Raw stringification, used whenever a typed renderer cannot apply.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(v) => v.to_string(),
            Value::Float(v) => v.to_string(),
            Value::Decimal(v) => v.normalize().to_string(),
            Value::String(s) => s.clone(),
            Value::DateTime(dt) => dt.to_rfc3339(),
            Value::Json(serde_json::Value::String(s)) => s.clone(),
            Value::Json(serde_json::Value::Array(items)) => items
                .iter()
                .map(|item| Value::from(item.clone()).to_display_string())
                .collect::<Vec<_>>()
                .join(","),
            Value::Json(v) => v.to_string(),
        }
    }

    /// Ordering used by column sorting.
    ///
    /// Values are grouped by kind first (booleans, numbers, timestamps,
    /// text, nulls), so mixed columns still sort consistently. Within a
    /// kind, numbers compare numerically with NaN last, timestamps
    /// chronologically, booleans `false < true`, and text case-insensitively.
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        self.sort_rank()
            .cmp(&other.sort_rank())
            .then_with(|| match (self, other) {
                (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
                (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
                (Value::Null, Value::Null) => Ordering::Equal,
                _ => match (self.as_f64(), other.as_f64()) {
                    (Some(a), Some(b)) => a
                        .is_nan()
                        .cmp(&b.is_nan())
                        .then_with(|| a.total_cmp(&b)),
                    _ => self
                        .to_display_string()
                        .to_lowercase()
                        .cmp(&other.to_display_string().to_lowercase()),
                },
            })
    }

    fn sort_rank(&self) -> u8 {
        match self {
            Value::Bool(_) => 0,
            Value::Int(_) | Value::Float(_) | Value::Decimal(_) => 1,
            Value::DateTime(_) => 2,
            Value::String(_) | Value::Json(_) => 3,
            Value::Null => 4,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    n.as_f64().map(Value::Float).unwrap_or(Value::Null)
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            other => Value::Json(other),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// A loosely typed row: a map from field name to value.
///
/// Used for rows that come straight from the API as JSON objects.
///
/// # Example
///
/// ```
/// use campus_ui::value::{Record, Value};
///
/// let row = Record::new()
///     .set("id", 7i64)
///     .set("title", "Intro to SQL");
/// assert_eq!(row.get("title"), Some(&Value::from("Intro to SQL")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: HashMap<String, Value>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, builder style.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Sets a field in place.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Decodes a JSON array of objects into records.
    pub fn list_from_json(json: &str) -> Result<Vec<Record>, UiError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl TableRow for Record {
    fn field(&self, key: &str) -> Value {
        self.fields.get(key).cloned().unwrap_or_default()
    }
}
