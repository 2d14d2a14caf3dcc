//! # Schema Model
//!
//! A [`Schema`] is an immutable, acyclic tree describing an expected
//! shape. Each node is one of nine variants ([`SchemaKind`]) plus four
//! shared modifiers that apply to every variant:
//!
//! - `optional`: the subject may be `undefined`
//! - `nullable`: the subject may be `null`
//! - `brand`: a `[name, value]` marker with no runtime effect
//! - `description`: free-text metadata, never validated
//!
//! ## Document Shape
//!
//! Schemas serialize to the same literal object a caller would write by
//! hand, discriminated by `type`:
//!
//! ```json
//! {
//!   "type": "record",
//!   "of": { "type": "number", "min": 0 },
//!   "key": { "type": "string", "brand": ["UserId", "string"] },
//!   "maxLength": 16,
//!   "nullable": true
//! }
//! ```
//!
//! Deserialization checks each node as it is built (see
//! [`SchemaKind::check_local`]), so a malformed document never yields a
//! `Schema`. Hand-built schemas can be checked with [`Schema::check`].
//!
//! ## Immutability
//!
//! The validator only ever borrows a schema. Modifier helpers consume the
//! schema and return a new value; keep the original by cloning first.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::SchemaError;

/// The fixed value a `literal` schema accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Number(f64),
    String(String),
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Bool(b)
    }
}

impl From<f64> for Literal {
    fn from(n: f64) -> Self {
        Literal::Number(n)
    }
}

impl From<i32> for Literal {
    fn from(n: i32) -> Self {
        Literal::Number(f64::from(n))
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::String(s)
    }
}

/// Phantom brand marker, serialized as a two-element array.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Brand(pub String, pub String);

impl Brand {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self(name.into(), value.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn value(&self) -> &str {
        &self.1
    }
}

/// Declared properties of an `object` schema.
///
/// Keys are unique and keep declaration order, which decides the order
/// of reported violations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Properties(Vec<(String, Schema)>);

impl Properties {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Declare `key`. An existing declaration is replaced in place.
    pub fn insert(&mut self, key: impl Into<String>, schema: Schema) {
        let key = key.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = schema,
            None => self.0.push((key, schema)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Schema> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, s)| s)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.0.iter().map(|(k, s)| (k.as_str(), s))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Schema)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, Schema)>>(iter: I) -> Self {
        let mut props = Properties::new();
        for (key, schema) in iter {
            props.insert(key, schema);
        }
        props
    }
}

impl Serialize for Properties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, schema) in &self.0 {
            map.serialize_entry(key, schema)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Properties {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PropertiesVisitor;

        impl<'de> Visitor<'de> for PropertiesVisitor {
            type Value = Properties;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from property name to schema")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Properties, A::Error> {
                let mut entries: Vec<(String, Schema)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, schema)) = access.next_entry::<String, Schema>()? {
                    if entries.iter().any(|(k, _)| *k == key) {
                        return Err(de::Error::custom(format!("duplicate property '{key}'")));
                    }
                    entries.push((key, schema));
                }
                Ok(Properties(entries))
            }
        }

        deserializer.deserialize_map(PropertiesVisitor)
    }
}

/// The nine schema variants, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum SchemaKind {
    Boolean,
    Number {
        /// Inclusive lower bound.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        /// Inclusive upper bound.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    /// Lengths count Unicode scalar values (`char`s), not UTF-16 code
    /// units: `"😀"` has length 1 here.
    String {
        /// Inclusive minimum length in Unicode scalar values.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_length: Option<usize>,
        /// Inclusive maximum length in Unicode scalar values.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },
    Literal {
        of: Literal,
    },
    Array {
        /// Applied to every element.
        of: Box<Schema>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_length: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },
    Tuple {
        /// One schema per position; the subject length must match exactly.
        of: Vec<Schema>,
    },
    Object {
        of: Properties,
    },
    Record {
        /// Applied to every own entry's value.
        of: Box<Schema>,
        /// String schema carrying a phantom key brand. Keys are not
        /// checked beyond being strings.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key: Option<Box<Schema>>,
        /// Inclusive bounds on the number of own keys.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_length: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },
    Union {
        /// Alternatives tried in order; the first match wins.
        of: Vec<Schema>,
    },
}

impl SchemaKind {
    /// The `type` tag of this variant.
    pub fn tag(&self) -> &'static str {
        match self {
            SchemaKind::Boolean => "boolean",
            SchemaKind::Number { .. } => "number",
            SchemaKind::String { .. } => "string",
            SchemaKind::Literal { .. } => "literal",
            SchemaKind::Array { .. } => "array",
            SchemaKind::Tuple { .. } => "tuple",
            SchemaKind::Object { .. } => "object",
            SchemaKind::Record { .. } => "record",
            SchemaKind::Union { .. } => "union",
        }
    }

    /// Well-formedness of this node alone, ignoring nested schemas.
    pub fn check_local(&self) -> Result<(), SchemaError> {
        match self {
            SchemaKind::Number { min, max } => {
                for (field, bound) in [("min", min), ("max", max)] {
                    if let Some(value) = *bound {
                        if !value.is_finite() {
                            return Err(SchemaError::NonFiniteBound { field, value });
                        }
                    }
                }
                check_order("min/max", *min, *max)
            }
            SchemaKind::String { min_length, max_length }
            | SchemaKind::Array { min_length, max_length, .. } => check_lengths(*min_length, *max_length),
            SchemaKind::Record { key, min_length, max_length, .. } => {
                if let Some(key) = key {
                    if !matches!(key.kind, SchemaKind::String { .. }) {
                        return Err(SchemaError::NonStringRecordKey { found: key.tag() });
                    }
                }
                check_lengths(*min_length, *max_length)
            }
            SchemaKind::Union { of } if of.is_empty() => Err(SchemaError::EmptyUnion),
            SchemaKind::Boolean
            | SchemaKind::Literal { .. }
            | SchemaKind::Tuple { .. }
            | SchemaKind::Object { .. }
            | SchemaKind::Union { .. } => Ok(()),
        }
    }

    /// Direct child schemas, in declaration order.
    pub fn children(&self) -> Vec<&Schema> {
        match self {
            SchemaKind::Boolean
            | SchemaKind::Number { .. }
            | SchemaKind::String { .. }
            | SchemaKind::Literal { .. } => Vec::new(),
            SchemaKind::Array { of, .. } => vec![of.as_ref()],
            SchemaKind::Record { of, key, .. } => {
                std::iter::once(of.as_ref()).chain(key.as_deref()).collect()
            }
            SchemaKind::Tuple { of } | SchemaKind::Union { of } => of.iter().collect(),
            SchemaKind::Object { of } => of.iter().map(|(_, s)| s).collect(),
        }
    }
}

fn check_order(field: &'static str, lower: Option<f64>, upper: Option<f64>) -> Result<(), SchemaError> {
    match (lower, upper) {
        (Some(lower), Some(upper)) if lower > upper => {
            Err(SchemaError::InvertedBounds { field, lower, upper })
        }
        _ => Ok(()),
    }
}

fn check_lengths(min_length: Option<usize>, max_length: Option<usize>) -> Result<(), SchemaError> {
    match (min_length, max_length) {
        (Some(lower), Some(upper)) if lower > upper => Err(SchemaError::InvertedLengths {
            field: "minLength/maxLength",
            lower,
            upper,
        }),
        _ => Ok(()),
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// A schema node: one variant plus the shared modifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SchemaDocument")]
pub struct Schema {
    #[serde(flatten)]
    pub kind: SchemaKind,
    /// `undefined` subjects pass.
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
    /// `null` subjects pass.
    #[serde(default, skip_serializing_if = "is_false")]
    pub nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<Brand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Unchecked wire form of a schema node.
#[derive(Deserialize)]
struct SchemaDocument {
    #[serde(flatten)]
    kind: SchemaKind,
    #[serde(default)]
    optional: bool,
    #[serde(default)]
    nullable: bool,
    #[serde(default)]
    brand: Option<Brand>,
    #[serde(default)]
    description: Option<String>,
}

impl TryFrom<SchemaDocument> for Schema {
    type Error = SchemaError;

    fn try_from(doc: SchemaDocument) -> Result<Self, Self::Error> {
        doc.kind.check_local()?;
        Ok(Schema {
            kind: doc.kind,
            optional: doc.optional,
            nullable: doc.nullable,
            brand: doc.brand,
            description: doc.description,
        })
    }
}

impl From<SchemaKind> for Schema {
    fn from(kind: SchemaKind) -> Self {
        Schema::new(kind)
    }
}

impl Schema {
    /// A schema with no modifiers set.
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            optional: false,
            nullable: false,
            brand: None,
            description: None,
        }
    }

    /// The `type` tag of this node.
    pub fn tag(&self) -> &'static str {
        self.kind.tag()
    }

    pub fn with_optional(self) -> Self {
        Self { optional: true, ..self }
    }

    pub fn with_nullable(self) -> Self {
        Self { nullable: true, ..self }
    }

    pub fn with_brand(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            brand: Some(Brand::new(name, value)),
            ..self
        }
    }

    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..self
        }
    }

    /// Check every node of the tree for well-formedness.
    ///
    /// Deserialized schemas are already checked; this is for schemas
    /// assembled in code.
    pub fn check(&self) -> Result<(), SchemaError> {
        self.kind.check_local()?;
        self.kind.children().into_iter().try_for_each(Schema::check)
    }
}
