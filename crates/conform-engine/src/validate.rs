//! # Recursive Validator
//!
//! Walks a schema and a subject together and collects every violation,
//! each with the exact sub-schema that rejected it, the offending value,
//! and the path from the root subject.
//!
//! Dispatch is an exhaustive `match` on [`SchemaKind`]:
//!
//! | Variant | Rejects with | Then |
//! |---------|--------------|------|
//! | leaf | `verify` result | nothing |
//! | `array` | `InvalidType` (not an array), `InvalidRange` (length) | every index |
//! | `tuple` | `InvalidType` (not an array of exactly `of.len()`) | every position |
//! | `object` | `InvalidType` (not an object) | every declared key |
//! | `record` | `InvalidType` (not an object), `InvalidRange` (key count) | every own key |
//! | `union` | `InvalidType` against the whole union | nothing |
//!
//! A range violation on a composite is reported once, with the whole
//! composite as the subject, and its elements are not visited.
//!
//! Subject keys not declared by an `object` schema are ignored.

use std::fmt;

use conform_core::{ErrorCode, ErrorPath, Schema, SchemaKind, Value};

use crate::verify::{admits_absent, length_within, verify, Leaf};

/// One validation failure.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidSubject<'s, 'v> {
    pub code: ErrorCode,
    /// The schema node that rejected `subject`.
    pub schema: &'s Schema,
    /// The offending value. For a range violation on a composite this is
    /// the whole array or mapping.
    pub subject: &'v Value,
    /// Keys and indices from the root subject to `subject`.
    pub path: ErrorPath,
}

impl fmt::Display for InvalidSubject<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "  {}: {} (expected {}, got {})",
            self.path,
            self.code,
            self.schema.tag(),
            self.subject.kind_name()
        )
    }
}

/// Validate `subject` against `schema`, starting at `path`.
///
/// Returns every violation found, in traversal order. An empty list
/// means the subject conforms. Never fails on a malformed subject.
pub fn validate<'s, 'v>(
    schema: &'s Schema,
    subject: &'v Value,
    path: &ErrorPath,
) -> Vec<InvalidSubject<'s, 'v>> {
    let mut errors = Vec::new();
    collect(schema, subject, path, &mut errors);
    errors
}

/// Whether `subject` conforms to `schema`.
pub fn conforms(schema: &Schema, subject: &Value) -> bool {
    validate(schema, subject, &ErrorPath::root()).is_empty()
}

fn reject<'s, 'v>(
    code: ErrorCode,
    schema: &'s Schema,
    subject: &'v Value,
    path: &ErrorPath,
) -> InvalidSubject<'s, 'v> {
    InvalidSubject {
        code,
        schema,
        subject,
        path: path.clone(),
    }
}

fn collect<'s, 'v>(
    schema: &'s Schema,
    subject: &'v Value,
    path: &ErrorPath,
    errors: &mut Vec<InvalidSubject<'s, 'v>>,
) {
    if admits_absent(schema, subject) {
        return;
    }

    match &schema.kind {
        SchemaKind::Boolean => leaf(schema, Leaf::Boolean, subject, path, errors),
        SchemaKind::Number { min, max } => {
            let leaf_view = Leaf::Number { min: *min, max: *max };
            leaf(schema, leaf_view, subject, path, errors)
        }
        SchemaKind::String { min_length, max_length } => {
            let leaf_view = Leaf::String {
                min_length: *min_length,
                max_length: *max_length,
            };
            leaf(schema, leaf_view, subject, path, errors)
        }
        SchemaKind::Literal { of } => leaf(schema, Leaf::Literal(of), subject, path, errors),

        SchemaKind::Array { of, min_length, max_length } => {
            let Value::Array(items) = subject else {
                errors.push(reject(ErrorCode::InvalidType, schema, subject, path));
                return;
            };
            if !length_within(items.len(), *min_length, *max_length) {
                errors.push(reject(ErrorCode::InvalidRange, schema, subject, path));
                return;
            }
            for (index, item) in items.iter().enumerate() {
                collect(of, item, &path.child(index), errors);
            }
        }

        SchemaKind::Tuple { of } => match subject {
            Value::Array(items) if items.len() == of.len() => {
                for (index, (position, item)) in of.iter().zip(items).enumerate() {
                    collect(position, item, &path.child(index), errors);
                }
            }
            _ => errors.push(reject(ErrorCode::InvalidType, schema, subject, path)),
        },

        SchemaKind::Object { of } => {
            if !matches!(subject, Value::Object(_)) {
                errors.push(reject(ErrorCode::InvalidType, schema, subject, path));
                return;
            }
            for (key, property) in of.iter() {
                collect(property, subject.get(key), &path.child(key), errors);
            }
        }

        SchemaKind::Record { of, min_length, max_length, .. } => {
            let Value::Object(entries) = subject else {
                errors.push(reject(ErrorCode::InvalidType, schema, subject, path));
                return;
            };
            if !length_within(entries.len(), *min_length, *max_length) {
                errors.push(reject(ErrorCode::InvalidRange, schema, subject, path));
                return;
            }
            for (key, value) in entries {
                collect(of, value, &path.child(key.as_str()), errors);
            }
        }

        SchemaKind::Union { of } => {
            // Diagnostics from rejected alternatives are discarded.
            if !of.iter().any(|alternative| conforms(alternative, subject)) {
                errors.push(reject(ErrorCode::InvalidType, schema, subject, path));
            }
        }
    }
}

fn leaf<'s, 'v>(
    schema: &'s Schema,
    leaf_view: Leaf<'_>,
    subject: &'v Value,
    path: &ErrorPath,
    errors: &mut Vec<InvalidSubject<'s, 'v>>,
) {
    if let Err(code) = verify(schema, leaf_view, subject) {
        errors.push(reject(code, schema, subject, path));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conform_core::{error_path, Literal};
    use serde_json::json;

    fn schema(doc: serde_json::Value) -> Schema {
        Schema::from_json_value(doc).unwrap()
    }

    fn subject(doc: serde_json::Value) -> Value {
        Value::from(doc)
    }

    fn codes_and_paths(errors: &[InvalidSubject<'_, '_>]) -> Vec<(ErrorCode, ErrorPath)> {
        errors.iter().map(|e| (e.code, e.path.clone())).collect()
    }

    #[test]
    fn valid_subject_yields_no_errors() {
        let s = schema(json!({
            "type": "object",
            "of": {
                "id": {"type": "number", "min": 1},
                "tags": {"type": "array", "of": {"type": "string"}}
            }
        }));
        let v = subject(json!({"id": 7, "tags": ["a", "b"]}));
        assert!(validate(&s, &v, &ErrorPath::root()).is_empty());
    }

    #[test]
    fn non_array_subject_for_array_schema() {
        let s = schema(json!({"type": "array", "of": {"type": "boolean"}}));
        let v = subject(json!({"0": true}));
        let errors = validate(&s, &v, &ErrorPath::root());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::InvalidType);
        assert!(std::ptr::eq(errors[0].schema, &s));
        assert!(std::ptr::eq(errors[0].subject, &v));
    }

    #[test]
    fn array_max_length_supersedes_elements() {
        let s = schema(json!({"type": "array", "of": {"type": "boolean"}, "maxLength": 1}));
        let v = subject(json!([1, 2]));
        let errors = validate(&s, &v, &ErrorPath::root());
        assert_eq!(codes_and_paths(&errors), vec![(ErrorCode::InvalidRange, error_path![])]);
    }

    #[test]
    fn tuple_length_mismatch_is_type_error() {
        let s = schema(json!({"type": "tuple", "of": [{"type": "string"}, {"type": "number"}]}));
        for v in [json!(["a"]), json!(["a", 1, 2]), json!("a")] {
            let v = subject(v);
            let errors = validate(&s, &v, &ErrorPath::root());
            assert_eq!(codes_and_paths(&errors), vec![(ErrorCode::InvalidType, error_path![])]);
        }
    }

    #[test]
    fn tuple_positions_validated_independently() {
        let s = schema(json!({"type": "tuple", "of": [{"type": "string"}, {"type": "number", "max": 5}]}));
        let v = subject(json!([3, 9]));
        let errors = validate(&s, &v, &ErrorPath::root());
        assert_eq!(
            codes_and_paths(&errors),
            vec![
                (ErrorCode::InvalidType, error_path![0]),
                (ErrorCode::InvalidRange, error_path![1]),
            ]
        );
    }

    #[test]
    fn object_reports_missing_keys_in_declaration_order() {
        let s = schema(json!({
            "type": "object",
            "of": {
                "zeta": {"type": "string"},
                "alpha": {"type": "string"},
                "maybe": {"type": "string", "optional": true}
            }
        }));
        let v = subject(json!({"extra": 1}));
        let errors = validate(&s, &v, &ErrorPath::root());
        assert_eq!(
            codes_and_paths(&errors),
            vec![
                (ErrorCode::InvalidType, error_path!["zeta"]),
                (ErrorCode::InvalidType, error_path!["alpha"]),
            ]
        );
        assert!(errors[0].subject.is_undefined());
    }

    #[test]
    fn object_rejects_arrays_and_null() {
        let s = schema(json!({"type": "object", "of": {}}));
        for v in [json!([]), json!(null), json!("x")] {
            let v = subject(v);
            assert_eq!(validate(&s, &v, &ErrorPath::root()).len(), 1);
        }
        assert!(validate(&s, &subject(json!({"anything": 1})), &ErrorPath::root()).is_empty());
    }

    #[test]
    fn record_validates_every_value() {
        let s = schema(json!({"type": "record", "of": {"type": "number"}}));
        let v = subject(json!({"a": 1, "b": "two", "c": null}));
        let errors = validate(&s, &v, &ErrorPath::root());
        assert_eq!(
            codes_and_paths(&errors),
            vec![
                (ErrorCode::InvalidType, error_path!["b"]),
                (ErrorCode::InvalidType, error_path!["c"]),
            ]
        );
    }

    #[test]
    fn record_key_count_bounds() {
        let s = schema(json!({"type": "record", "of": {"type": "boolean"}, "minLength": 1, "maxLength": 2}));
        let empty = subject(json!({}));
        let errors = validate(&s, &empty, &ErrorPath::root());
        assert_eq!(codes_and_paths(&errors), vec![(ErrorCode::InvalidRange, error_path![])]);

        let too_many = subject(json!({"a": 1, "b": 2, "c": 3}));
        let errors = validate(&s, &too_many, &ErrorPath::root());
        assert_eq!(errors.len(), 1, "range failure must not descend into bad values");
        assert!(std::ptr::eq(errors[0].subject, &too_many));
    }

    #[test]
    fn union_first_match_wins_and_collapses() {
        let s = schema(json!({
            "type": "union",
            "of": [
                {"type": "literal", "of": "auto"},
                {"type": "number", "min": 0}
            ]
        }));
        assert!(conforms(&s, &subject(json!("auto"))));
        assert!(conforms(&s, &subject(json!(4))));

        let v = subject(json!(-1));
        let errors = validate(&s, &v, &ErrorPath::root());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::InvalidType);
        assert!(std::ptr::eq(errors[0].schema, &s));
    }

    #[test]
    fn nested_union_error_path() {
        let s = schema(json!({
            "type": "object",
            "of": {
                "mode": {"type": "union", "of": [{"type": "literal", "of": 1}, {"type": "literal", "of": 2}]}
            }
        }));
        let v = subject(json!({"mode": 3}));
        let errors = validate(&s, &v, &ErrorPath::root());
        assert_eq!(codes_and_paths(&errors), vec![(ErrorCode::InvalidType, error_path!["mode"])]);
        match &errors[0].schema.kind {
            SchemaKind::Union { of } => assert_eq!(of.len(), 2),
            other => panic!("Expected union schema, got {other:?}"),
        }
    }

    #[test]
    fn starting_path_is_prefixed() {
        let s = schema(json!({"type": "array", "of": {"type": "literal", "of": true}}));
        let v = subject(json!([true, false]));
        let errors = validate(&s, &v, &error_path!["payload"]);
        assert_eq!(
            codes_and_paths(&errors),
            vec![(ErrorCode::InvalidType, error_path!["payload", 1])]
        );
        assert_eq!(
            errors[0].schema.kind,
            SchemaKind::Literal { of: Literal::Bool(true) }
        );
    }

    #[test]
    fn display_mentions_path_code_and_kinds() {
        let s = schema(json!({"type": "array", "of": {"type": "number"}}));
        let v = subject(json!([1, "x"]));
        let errors = validate(&s, &v, &ErrorPath::root());
        let line = errors[0].to_string();
        assert_eq!(line, "  /1: invalidType (expected number, got string)");
    }
}
