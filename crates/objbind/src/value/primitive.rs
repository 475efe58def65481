//! [`Primitive`] — the universal untyped exchange shape.
//!
//! A primitive tree is what an external JSON/YAML parser produces and what an
//! external dumper consumes: scalars, ordered sequences, and key-ordered
//! mappings. Mapping order follows insertion order.

use base64::Engine;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::encode::{DEFAULT_DATE_FORMAT, DEFAULT_DATE_TIME_FORMAT, DEFAULT_TIME_FORMAT};

/// Untyped value tree at the system boundary.
///
/// Every variant except [`Primitive::Array`] and [`Primitive::Object`] is a
/// scalar; classification is total over the enum.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Fixed-point decimal.
    Decimal(Decimal),
    Str(String),
    /// Byte sequence. Rendered as base64 when bridged to JSON.
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    Duration(TimeDelta),
    /// Ordered sequence.
    Array(Vec<Primitive>),
    /// Key-ordered mapping.
    Object(IndexMap<String, Primitive>),
}

impl Primitive {
    /// Scalar vs. composite classification. Total: a value is scalar iff it
    /// is not a sequence or a mapping.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Self::Array(_) | Self::Object(_))
    }

    /// Short kind name, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Decimal(_) => "decimal",
            Self::Str(_) => "str",
            Self::Bytes(_) => "bytes",
            Self::Date(_) => "date",
            Self::Time(_) => "time",
            Self::DateTime(_) => "datetime",
            Self::Duration(_) => "duration",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Primitive]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Primitive>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }
}

impl From<bool> for Primitive {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Primitive {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Primitive {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<f64> for Primitive {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Primitive {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Primitive {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec<Primitive>> for Primitive {
    fn from(v: Vec<Primitive>) -> Self {
        Self::Array(v)
    }
}

impl From<IndexMap<String, Primitive>> for Primitive {
    fn from(v: IndexMap<String, Primitive>) -> Self {
        Self::Object(v)
    }
}

// ---------------------------------------------------------------------------
// JSON bridge

impl From<serde_json::Value> for Primitive {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::Decimal(Decimal::from(u))
                } else {
                    Self::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => Self::Str(s),
            serde_json::Value::Array(arr) => {
                Self::Array(arr.into_iter().map(Primitive::from).collect())
            }
            serde_json::Value::Object(obj) => Self::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, Primitive::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Primitive> for serde_json::Value {
    fn from(v: Primitive) -> Self {
        match v {
            Primitive::Null => serde_json::Value::Null,
            Primitive::Bool(b) => serde_json::Value::Bool(b),
            Primitive::Int(i) => serde_json::json!(i),
            Primitive::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Primitive::Decimal(d) => serde_json::Value::String(d.to_string()),
            Primitive::Str(s) => serde_json::Value::String(s),
            Primitive::Bytes(b) => {
                let b64 = base64::engine::general_purpose::STANDARD.encode(&b);
                serde_json::Value::String(format!("data:application/octet-stream;base64,{}", b64))
            }
            Primitive::Date(d) => {
                serde_json::Value::String(d.format(DEFAULT_DATE_FORMAT).to_string())
            }
            Primitive::Time(t) => {
                serde_json::Value::String(t.format(DEFAULT_TIME_FORMAT).to_string())
            }
            Primitive::DateTime(dt) => {
                serde_json::Value::String(dt.format(DEFAULT_DATE_TIME_FORMAT).to_string())
            }
            Primitive::Duration(d) => serde_json::Value::String(d.to_string()),
            Primitive::Array(arr) => {
                serde_json::Value::Array(arr.into_iter().map(serde_json::Value::from).collect())
            }
            Primitive::Object(obj) => serde_json::Value::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}
