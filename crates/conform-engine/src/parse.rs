//! # Result Protocol
//!
//! [`parse`] is the validation entry point. It runs the recursive
//! validator from the root and folds the outcome into a two-case result:
//!
//! - `Ok` carries the subject. It is the caller's own value, borrowed,
//!   unless a `record` reached by the schema held `undefined` entries:
//!   those are dropped from the output, which is then an owned copy.
//! - `Err` carries [`Violations`], every error found, never truncated.
//!
//! There is no partial success and no coercion.

use std::borrow::Cow;
use std::fmt;

use conform_core::{ErrorCode, ErrorPath, Map, Schema, SchemaKind, Value};

use crate::validate::{conforms, validate, InvalidSubject};
use crate::verify::admits_absent;

/// Collection of violations returned by a failed [`parse`].
#[derive(Debug, Clone, PartialEq)]
pub struct Violations<'s, 'v> {
    violations: Vec<InvalidSubject<'s, 'v>>,
}

impl<'s, 'v> Violations<'s, 'v> {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[InvalidSubject<'s, 'v>] {
        &self.violations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InvalidSubject<'s, 'v>> {
        self.violations.iter()
    }

    /// Codes of all violations, in order.
    pub fn codes(&self) -> Vec<ErrorCode> {
        self.violations.iter().map(|v| v.code).collect()
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<InvalidSubject<'s, 'v>> {
        self.violations
    }
}

impl fmt::Display for Violations<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subject does not conform to schema ({} violation", self.len())?;
        if self.len() != 1 {
            f.write_str("s")?;
        }
        f.write_str("):")?;
        for v in &self.violations {
            write!(f, "\n{v}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Violations<'_, '_> {}

impl<'s, 'v> IntoIterator for Violations<'s, 'v> {
    type Item = InvalidSubject<'s, 'v>;
    type IntoIter = std::vec::IntoIter<InvalidSubject<'s, 'v>>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a, 's, 'v> IntoIterator for &'a Violations<'s, 'v> {
    type Item = &'a InvalidSubject<'s, 'v>;
    type IntoIter = std::slice::Iter<'a, InvalidSubject<'s, 'v>>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

/// Result of [`parse`].
pub type ParseResult<'s, 'v> = Result<Cow<'v, Value>, Violations<'s, 'v>>;

/// Validate `subject` against `schema`.
///
/// # Errors
///
/// Returns [`Violations`] listing every violation if the subject does
/// not conform.
pub fn parse<'s, 'v>(schema: &'s Schema, subject: &'v Value) -> ParseResult<'s, 'v> {
    let errors = validate(schema, subject, &ErrorPath::root());
    if !errors.is_empty() {
        tracing::trace!(
            violations = errors.len(),
            schema = schema.tag(),
            "subject rejected"
        );
        return Err(Violations { violations: errors });
    }

    Ok(match without_undefined_entries(schema, subject) {
        Some(rewritten) => Cow::Owned(rewritten),
        None => Cow::Borrowed(subject),
    })
}

/// Output value for a conforming subject, if it differs from the subject.
///
/// Only `record` entries whose value is `undefined` are removed; every
/// other value is carried over as-is. Returns `None` when nothing was
/// removed anywhere below `schema`.
fn without_undefined_entries(schema: &Schema, subject: &Value) -> Option<Value> {
    if admits_absent(schema, subject) {
        return None;
    }

    match (&schema.kind, subject) {
        (SchemaKind::Array { of, .. }, Value::Array(items)) => {
            rewrite_items(items.iter().map(|item| (of.as_ref(), item)), items)
        }
        (SchemaKind::Tuple { of }, Value::Array(items)) => rewrite_items(of.iter().zip(items), items),
        (SchemaKind::Object { of }, Value::Object(entries)) => {
            let mut out: Option<Map> = None;
            for (key, property) in of.iter() {
                let Some(value) = entries.get(key) else {
                    continue;
                };
                if let Some(rewritten) = without_undefined_entries(property, value) {
                    out.get_or_insert_with(|| entries.clone())
                        .insert(key.to_string(), rewritten);
                }
            }
            out.map(Value::Object)
        }
        (SchemaKind::Record { of, .. }, Value::Object(entries)) => {
            let mut out: Option<Map> = None;
            for (key, value) in entries {
                if value.is_undefined() {
                    out.get_or_insert_with(|| entries.clone()).remove(key);
                } else if let Some(rewritten) = without_undefined_entries(of, value) {
                    out.get_or_insert_with(|| entries.clone())
                        .insert(key.clone(), rewritten);
                }
            }
            out.map(Value::Object)
        }
        (SchemaKind::Union { of }, _) => of
            .iter()
            .find(|alternative| conforms(alternative, subject))
            .and_then(|alternative| without_undefined_entries(alternative, subject)),
        _ => None,
    }
}

fn rewrite_items<'a>(
    pairs: impl Iterator<Item = (&'a Schema, &'a Value)>,
    items: &[Value],
) -> Option<Value> {
    let mut out: Option<Vec<Value>> = None;
    for (index, (schema, item)) in pairs.enumerate() {
        if let Some(rewritten) = without_undefined_entries(schema, item) {
            out.get_or_insert_with(|| items.to_vec())[index] = rewritten;
        }
    }
    out.map(Value::Array)
}

#[cfg(test)]
mod tests {
    use super::*;
    use conform_core::error_path;
    use serde_json::json;

    fn schema(doc: serde_json::Value) -> Schema {
        Schema::from_json_value(doc).unwrap()
    }

    fn optional_boolean_record() -> Schema {
        schema(json!({"type": "record", "of": {"type": "boolean", "optional": true}}))
    }

    fn record_with(entries: Vec<(&str, Value)>) -> Value {
        Value::Object(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    #[test]
    fn success_borrows_the_subject() {
        let s = schema(json!({"type": "array", "of": {"type": "string"}}));
        let v = Value::from(json!(["a", "b"]));
        let out = parse(&s, &v).unwrap();
        assert!(matches!(out, Cow::Borrowed(_)));
        assert!(std::ptr::eq(out.as_ref(), &v));
    }

    #[test]
    fn failure_carries_every_violation() {
        let s = schema(json!({"type": "array", "of": {"type": "number"}}));
        let v = Value::from(json!(["a", 1, "b", "c"]));
        let err = parse(&s, &v).unwrap_err();
        assert_eq!(err.len(), 3);
        assert_eq!(err.codes(), vec![ErrorCode::InvalidType; 3]);
        let paths: Vec<ErrorPath> = err.iter().map(|e| e.path.clone()).collect();
        assert_eq!(paths, vec![error_path![0], error_path![2], error_path![3]]);
    }

    #[test]
    fn record_drops_undefined_entries() {
        let s = optional_boolean_record();
        let v = record_with(vec![("x", Value::Undefined)]);
        let out = parse(&s, &v).unwrap();
        assert!(matches!(out, Cow::Owned(_)));
        assert_eq!(out.as_ref(), &Value::Object(Map::new()));
    }

    #[test]
    fn record_keeps_present_entries() {
        let s = optional_boolean_record();
        let v = record_with(vec![
            ("gone", Value::Undefined),
            ("kept", Value::Bool(true)),
        ]);
        let out = parse(&s, &v).unwrap().into_owned();
        assert_eq!(out, record_with(vec![("kept", Value::Bool(true))]));
    }

    #[test]
    fn record_rewrite_reaches_through_composites() {
        let s = schema(json!({
            "type": "object",
            "of": {
                "inner": {"type": "array", "of": {"type": "record", "of": {"type": "number", "optional": true}}}
            }
        }));
        let v = record_with(vec![
            (
                "inner",
                Value::Array(vec![
                    record_with(vec![("a", Value::Number(1.0))]),
                    record_with(vec![("b", Value::Undefined)]),
                ]),
            ),
            ("untouched", Value::from("x")),
        ]);
        let out = parse(&s, &v).unwrap().into_owned();
        let expected = record_with(vec![
            (
                "inner",
                Value::Array(vec![
                    record_with(vec![("a", Value::Number(1.0))]),
                    record_with(vec![]),
                ]),
            ),
            ("untouched", Value::from("x")),
        ]);
        assert_eq!(out, expected);
    }

    #[test]
    fn record_rewrite_follows_matching_union_alternative() {
        let s = schema(json!({
            "type": "union",
            "of": [
                {"type": "string"},
                {"type": "record", "of": {"type": "string", "optional": true}}
            ]
        }));
        let v = record_with(vec![("a", Value::Undefined), ("b", Value::from("keep"))]);
        let out = parse(&s, &v).unwrap().into_owned();
        assert_eq!(out, record_with(vec![("b", Value::from("keep"))]));
    }

    #[test]
    fn object_keeps_undefined_properties() {
        let s = schema(json!({"type": "object", "of": {"a": {"type": "boolean", "optional": true}}}));
        let v = record_with(vec![("a", Value::Undefined)]);
        let out = parse(&s, &v).unwrap();
        assert!(std::ptr::eq(out.as_ref(), &v));
    }

    #[test]
    fn violations_display() {
        let s = schema(json!({"type": "object", "of": {"n": {"type": "number", "max": 1}}}));
        let v = Value::from(json!({"n": 5}));
        let err = parse(&s, &v).unwrap_err();
        assert_eq!(
            err.to_string(),
            "subject does not conform to schema (1 violation):\n  /n: invalidRange (expected number, got number)"
        );
    }

    #[test]
    fn violations_is_a_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        let s = schema(json!({"type": "boolean"}));
        let v = Value::Null;
        let err = parse(&s, &v).unwrap_err();
        takes_error(&err);
        let owned: Vec<_> = err.into_iter().collect();
        assert_eq!(owned.len(), 1);
        assert!(owned[0].path.is_empty());
    }
}
