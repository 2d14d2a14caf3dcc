//! # Schema Builder
//!
//! Chained construction of [`Schema`] values. Each call consumes the
//! builder and returns a new one; nothing is shared between steps.
//!
//! The marker parameter `K` records which variant is being built, so
//! kind-specific constraints only exist where they mean something:
//!
//! | Method | Available on |
//! |--------|--------------|
//! | `min`, `max` | [`number`] |
//! | `min_length`, `max_length` | [`string`], [`array`], [`record`] |
//! | `key` | [`record`] |
//! | `property` | [`object`] |
//! | `optional`, `nullable`, `brand`, `description`, `parse` | all |
//!
//! A built schema is the same value as the equivalent hand-written one
//! and validates through the same [`conform_engine::parse`].

use std::marker::PhantomData;

use conform_core::{Brand, Literal, Properties, Schema, SchemaError, SchemaKind, Value};
use conform_engine::{ParseResult, StandardSchema};

/// Variant markers for [`Builder`].
pub mod marker {
    #[derive(Debug, Clone, Copy)]
    pub struct Boolean;
    #[derive(Debug, Clone, Copy)]
    pub struct Number;
    #[derive(Debug, Clone, Copy)]
    pub struct Str;
    #[derive(Debug, Clone, Copy)]
    pub struct Literal;
    #[derive(Debug, Clone, Copy)]
    pub struct Array;
    #[derive(Debug, Clone, Copy)]
    pub struct Tuple;
    #[derive(Debug, Clone, Copy)]
    pub struct Object;
    #[derive(Debug, Clone, Copy)]
    pub struct Record;
    #[derive(Debug, Clone, Copy)]
    pub struct Union;

    /// Markers of variants with `minLength`/`maxLength`.
    pub trait Lengthed: sealed::Sealed {}
    impl Lengthed for Str {}
    impl Lengthed for Array {}
    impl Lengthed for Record {}

    mod sealed {
        pub trait Sealed {}
        impl Sealed for super::Str {}
        impl Sealed for super::Array {}
        impl Sealed for super::Record {}
    }
}

/// A schema under construction.
#[derive(Debug, Clone)]
pub struct Builder<K> {
    schema: Schema,
    _kind: PhantomData<K>,
}

impl<K> Builder<K> {
    fn from_kind(kind: SchemaKind) -> Self {
        Self {
            schema: Schema::new(kind),
            _kind: PhantomData,
        }
    }

    /// Admit `undefined`.
    pub fn optional(self) -> Self {
        self.map(Schema::with_optional)
    }

    /// Admit `null`.
    pub fn nullable(self) -> Self {
        self.map(Schema::with_nullable)
    }

    /// Attach a phantom brand. Has no effect on validation.
    pub fn brand(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.schema.brand = Some(Brand::new(name, value));
        self
    }

    pub fn description(self, text: impl Into<String>) -> Self {
        self.map(|s| s.with_description(text))
    }

    /// The schema built so far.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn into_schema(self) -> Schema {
        self.schema
    }

    /// Well-formedness of the built tree.
    pub fn check(&self) -> Result<(), SchemaError> {
        self.schema.check()
    }

    /// Validate `subject` against the built schema.
    ///
    /// # Errors
    ///
    /// Returns every violation found, as [`conform_engine::parse`] does.
    pub fn parse<'v>(&self, subject: &'v Value) -> ParseResult<'_, 'v> {
        conform_engine::parse(&self.schema, subject)
    }

    /// The built schema through the standard validation protocol.
    pub fn standard(&self) -> StandardSchema<'_> {
        StandardSchema::new(&self.schema)
    }

    fn map(self, f: impl FnOnce(Schema) -> Schema) -> Self {
        Self {
            schema: f(self.schema),
            _kind: PhantomData,
        }
    }
}

impl<K> From<Builder<K>> for Schema {
    fn from(builder: Builder<K>) -> Self {
        builder.schema
    }
}

impl Builder<marker::Number> {
    /// Inclusive lower bound.
    pub fn min(mut self, value: f64) -> Self {
        if let SchemaKind::Number { min, .. } = &mut self.schema.kind {
            *min = Some(value);
        }
        self
    }

    /// Inclusive upper bound.
    pub fn max(mut self, value: f64) -> Self {
        if let SchemaKind::Number { max, .. } = &mut self.schema.kind {
            *max = Some(value);
        }
        self
    }
}

impl<K: marker::Lengthed> Builder<K> {
    /// Inclusive minimum length (characters, elements, or keys).
    pub fn min_length(mut self, length: usize) -> Self {
        match &mut self.schema.kind {
            SchemaKind::String { min_length, .. }
            | SchemaKind::Array { min_length, .. }
            | SchemaKind::Record { min_length, .. } => *min_length = Some(length),
            _ => {}
        }
        self
    }

    /// Inclusive maximum length (characters, elements, or keys).
    pub fn max_length(mut self, length: usize) -> Self {
        match &mut self.schema.kind {
            SchemaKind::String { max_length, .. }
            | SchemaKind::Array { max_length, .. }
            | SchemaKind::Record { max_length, .. } => *max_length = Some(length),
            _ => {}
        }
        self
    }
}

impl Builder<marker::Record> {
    /// Brand the record's keys with a string schema.
    pub fn key(mut self, key_schema: Builder<marker::Str>) -> Self {
        if let SchemaKind::Record { key, .. } = &mut self.schema.kind {
            *key = Some(Box::new(key_schema.into_schema()));
        }
        self
    }
}

impl Builder<marker::Object> {
    /// Declare (or redeclare) one property.
    pub fn property(mut self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        if let SchemaKind::Object { of } = &mut self.schema.kind {
            of.insert(name, schema.into());
        }
        self
    }
}

pub fn boolean() -> Builder<marker::Boolean> {
    Builder::from_kind(SchemaKind::Boolean)
}

pub fn number() -> Builder<marker::Number> {
    Builder::from_kind(SchemaKind::Number { min: None, max: None })
}

pub fn string() -> Builder<marker::Str> {
    Builder::from_kind(SchemaKind::String {
        min_length: None,
        max_length: None,
    })
}

pub fn literal(of: impl Into<Literal>) -> Builder<marker::Literal> {
    Builder::from_kind(SchemaKind::Literal { of: of.into() })
}

/// Array whose every element matches `of`.
pub fn array(of: impl Into<Schema>) -> Builder<marker::Array> {
    Builder::from_kind(SchemaKind::Array {
        of: Box::new(of.into()),
        min_length: None,
        max_length: None,
    })
}

/// Fixed-length array, one schema per position.
pub fn tuple<I, S>(items: I) -> Builder<marker::Tuple>
where
    I: IntoIterator<Item = S>,
    S: Into<Schema>,
{
    Builder::from_kind(SchemaKind::Tuple {
        of: items.into_iter().map(Into::into).collect(),
    })
}

/// Object with the given properties, in declaration order.
pub fn object<I, N, S>(properties: I) -> Builder<marker::Object>
where
    I: IntoIterator<Item = (N, S)>,
    N: Into<String>,
    S: Into<Schema>,
{
    let of: Properties = properties
        .into_iter()
        .map(|(name, schema)| (name.into(), schema.into()))
        .collect();
    Builder::from_kind(SchemaKind::Object { of })
}

/// Mapping whose every value matches `of`.
pub fn record(of: impl Into<Schema>) -> Builder<marker::Record> {
    Builder::from_kind(SchemaKind::Record {
        of: Box::new(of.into()),
        key: None,
        min_length: None,
        max_length: None,
    })
}

/// First matching alternative wins.
///
/// An empty list builds a union that rejects everything; [`Builder::check`]
/// reports it as malformed.
pub fn union<I, S>(alternatives: I) -> Builder<marker::Union>
where
    I: IntoIterator<Item = S>,
    S: Into<Schema>,
{
    Builder::from_kind(SchemaKind::Union {
        of: alternatives.into_iter().map(Into::into).collect(),
    })
}
