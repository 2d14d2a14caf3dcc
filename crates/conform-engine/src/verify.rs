//! # Primitive Verifier
//!
//! Checks a leaf subject against a leaf schema (`boolean`, `number`,
//! `string`, `literal`). Order of checks:
//!
//! 1. `undefined` passes iff the schema is `optional`; `null` passes iff
//!    it is `nullable`. Nothing else is checked for these.
//! 2. Type check. A mismatch is `InvalidType`. Numbers must be finite:
//!    `NaN` and `±Infinity` are type errors, not range errors.
//! 3. Range check, each bound independently and inclusively. A violation
//!    is `InvalidRange`.

use conform_core::{ErrorCode, Literal, Schema, SchemaKind, Value};

/// Borrowed view of a leaf variant's constraints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Leaf<'s> {
    Boolean,
    Number {
        min: Option<f64>,
        max: Option<f64>,
    },
    String {
        min_length: Option<usize>,
        max_length: Option<usize>,
    },
    Literal(&'s Literal),
}

impl<'s> Leaf<'s> {
    /// The leaf view of `kind`, or `None` for composite variants.
    pub fn of(kind: &'s SchemaKind) -> Option<Self> {
        match kind {
            SchemaKind::Boolean => Some(Leaf::Boolean),
            SchemaKind::Number { min, max } => Some(Leaf::Number { min: *min, max: *max }),
            SchemaKind::String { min_length, max_length } => Some(Leaf::String {
                min_length: *min_length,
                max_length: *max_length,
            }),
            SchemaKind::Literal { of } => Some(Leaf::Literal(of)),
            SchemaKind::Array { .. }
            | SchemaKind::Tuple { .. }
            | SchemaKind::Object { .. }
            | SchemaKind::Record { .. }
            | SchemaKind::Union { .. } => None,
        }
    }
}

/// Whether the schema's modifiers admit an absent subject outright.
///
/// Applies to every variant, before any variant-specific check.
pub fn admits_absent(schema: &Schema, subject: &Value) -> bool {
    match subject {
        Value::Undefined => schema.optional,
        Value::Null => schema.nullable,
        _ => false,
    }
}

/// Verify `subject` against a leaf schema.
///
/// `schema` supplies the modifiers, `leaf` the type and bounds (normally
/// `Leaf::of(&schema.kind)`).
pub fn verify(schema: &Schema, leaf: Leaf<'_>, subject: &Value) -> Result<(), ErrorCode> {
    if admits_absent(schema, subject) {
        return Ok(());
    }

    match (leaf, subject) {
        (Leaf::Boolean, Value::Bool(_)) => Ok(()),
        (Leaf::Number { min, max }, Value::Number(n)) if n.is_finite() => {
            let above_min = min.map_or(true, |min| *n >= min);
            let below_max = max.map_or(true, |max| *n <= max);
            if above_min && below_max {
                Ok(())
            } else {
                Err(ErrorCode::InvalidRange)
            }
        }
        (Leaf::String { min_length, max_length }, Value::String(s)) => {
            if length_within(s.chars().count(), min_length, max_length) {
                Ok(())
            } else {
                Err(ErrorCode::InvalidRange)
            }
        }
        (Leaf::Literal(of), subject) if literal_matches(of, subject) => Ok(()),
        _ => Err(ErrorCode::InvalidType),
    }
}

/// Inclusive length bounds, shared by strings, arrays, and records.
pub(crate) fn length_within(len: usize, min_length: Option<usize>, max_length: Option<usize>) -> bool {
    min_length.map_or(true, |min| len >= min) && max_length.map_or(true, |max| len <= max)
}

/// Strict equality: same kind and equal value. `NaN` never matches.
fn literal_matches(of: &Literal, subject: &Value) -> bool {
    match (of, subject) {
        (Literal::Bool(a), Value::Bool(b)) => a == b,
        (Literal::Number(a), Value::Number(b)) => a == b,
        (Literal::String(a), Value::String(b)) => a == b,
        _ => false,
    }
}
