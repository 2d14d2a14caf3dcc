//! # Subject Values
//!
//! [`Value`] is the untyped runtime value a schema is checked against.
//! It is deliberately wider than `serde_json::Value`:
//!
//! - `Undefined` is distinct from `Null`, so an absent property (or an
//!   explicit `undefined` array slot) can be told apart from `null`.
//! - Numbers are `f64` and may hold `NaN` or `±Infinity`, which a
//!   `number` schema must be able to reject.
//!
//! Objects use a `BTreeMap`, so own-key iteration order is sorted and
//! deterministic.

use std::collections::BTreeMap;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::error::ValueError;

/// Plain key-value mapping held by [`Value::Object`].
pub type Map = BTreeMap<String, Value>;

/// Shared `Undefined` used when a subject lookup finds nothing.
pub static UNDEFINED: Value = Value::Undefined;

/// An untyped subject value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent value.
    #[default]
    Undefined,
    /// Explicit null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Number, possibly non-finite.
    Number(f64),
    /// String.
    String(String),
    /// Array-like sequence.
    Array(Vec<Value>),
    /// Plain key-value mapping.
    Object(Map),
}

impl Value {
    /// Human-readable name of the value's runtime kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Look up an own property. Non-objects and missing keys yield
    /// [`Value::Undefined`], mirroring property access on a plain object.
    pub fn get(&self, key: &str) -> &Value {
        match self {
            Value::Object(map) => map.get(key).unwrap_or(&UNDEFINED),
            _ => &UNDEFINED,
        }
    }

    /// Convert a `serde_yaml::Value` into a subject.
    ///
    /// YAML tags are ignored and the inner value converted. Mapping keys
    /// must be strings, numbers, or booleans. Every YAML number converts,
    /// including `.nan` and `.inf`.
    pub fn from_yaml(yaml: &serde_yaml::Value) -> Result<Value, ValueError> {
        match yaml {
            serde_yaml::Value::Null => Ok(Value::Null),
            serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
            // Integers beyond 2^53 round to the nearest f64.
            serde_yaml::Value::Number(n) => Ok(Value::Number(n.as_f64().unwrap_or(f64::NAN))),
            serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
            serde_yaml::Value::Sequence(seq) => {
                let items: Result<Vec<Value>, ValueError> =
                    seq.iter().map(Value::from_yaml).collect();
                Ok(Value::Array(items?))
            }
            serde_yaml::Value::Mapping(mapping) => {
                let mut map = Map::new();
                for (k, v) in mapping {
                    let key = match k {
                        serde_yaml::Value::String(s) => s.clone(),
                        serde_yaml::Value::Number(n) => n.to_string(),
                        serde_yaml::Value::Bool(b) => b.to_string(),
                        other => return Err(ValueError::UnsupportedKey(format!("{other:?}"))),
                    };
                    map.insert(key, Value::from_yaml(v)?);
                }
                Ok(Value::Object(map))
            }
            serde_yaml::Value::Tagged(tagged) => Value::from_yaml(&tagged.value),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            // Every JSON number has an f64 form unless arbitrary precision
            // is enabled, in which case out-of-range values become NaN.
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            ),
        }
    }
}

impl From<&serde_json::Value> for Value {
    fn from(json: &serde_json::Value) -> Self {
        Value::from(json.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(map)
    }
}

/// Largest integer an `f64` represents exactly (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Undefined | Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => serializer.collect_seq(items),
            Value::Object(map) => {
                // Undefined entries are not serialized.
                let present = map.iter().filter(|(_, v)| !v.is_undefined());
                let mut out = serializer.serialize_map(None)?;
                for (k, v) in present {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}
