//! Builders and schema documents describe the same schemas.
//!
//! Each fixture is written twice, once chained and once as a JSON
//! document. The two must be equal as values and must agree on every
//! subject, including the paths and codes of each violation.

use conform_builder::{array, boolean, literal, number, object, record, string, tuple, union};
use conform_core::{error_path, ErrorCode, ErrorPath, Schema, Value};
use proptest::prelude::*;
use serde_json::json;

fn document(doc: serde_json::Value) -> Schema {
    Schema::from_json_value(doc).unwrap()
}

fn pairs() -> Vec<(Schema, Schema)> {
    vec![
        (boolean().into_schema(), document(json!({"type": "boolean"}))),
        (
            number().min(-1.0).max(10.0).nullable().into_schema(),
            document(json!({"type": "number", "min": -1, "max": 10, "nullable": true})),
        ),
        (
            string().min_length(1).max_length(4).optional().into_schema(),
            document(json!({"type": "string", "minLength": 1, "maxLength": 4, "optional": true})),
        ),
        (
            literal("on").description("switch").into_schema(),
            document(json!({"type": "literal", "of": "on", "description": "switch"})),
        ),
        (
            array(number().min(0.0)).max_length(3).into_schema(),
            document(json!({"type": "array", "of": {"type": "number", "min": 0}, "maxLength": 3})),
        ),
        (
            tuple([string().into_schema(), boolean().optional().into_schema()]).into_schema(),
            document(json!({"type": "tuple", "of": [
                {"type": "string"},
                {"type": "boolean", "optional": true}
            ]})),
        ),
        (
            object([
                ("name", string().min_length(1).into_schema()),
                ("tags", array(string()).optional().into_schema()),
            ])
            .into_schema(),
            document(json!({"type": "object", "of": {
                "name": {"type": "string", "minLength": 1},
                "tags": {"type": "array", "of": {"type": "string"}, "optional": true}
            }})),
        ),
        (
            object([
                ("zeta", number().max(5.0).into_schema()),
                ("alpha", string().into_schema()),
                ("mid", boolean().nullable().into_schema()),
            ])
            .into_schema(),
            document(json!({"type": "object", "of": {
                "zeta": {"type": "number", "max": 5},
                "alpha": {"type": "string"},
                "mid": {"type": "boolean", "nullable": true}
            }})),
        ),
        (
            record(number().optional())
                .key(string().brand("UserId", "string"))
                .min_length(1)
                .into_schema(),
            document(json!({
                "type": "record",
                "of": {"type": "number", "optional": true},
                "key": {"type": "string", "brand": ["UserId", "string"]},
                "minLength": 1
            })),
        ),
        (
            union([
                literal(1.0).into_schema(),
                string().max_length(2).into_schema(),
                object([("x", boolean())]).into_schema(),
            ])
            .into_schema(),
            document(json!({"type": "union", "of": [
                {"type": "literal", "of": 1},
                {"type": "string", "maxLength": 2},
                {"type": "object", "of": {"x": {"type": "boolean"}}}
            ]})),
        ),
    ]
}

fn outcome(schema: &Schema, subject: &Value) -> Result<Value, Vec<(ErrorCode, ErrorPath)>> {
    match conform_engine::parse(schema, subject) {
        Ok(value) => Ok(value.into_owned()),
        Err(violations) => Err(violations
            .iter()
            .map(|v| (v.code, v.path.clone()))
            .collect()),
    }
}

#[test]
fn built_schemas_equal_documents() {
    for (built, loaded) in pairs() {
        assert_eq!(built, loaded);
        assert!(built.check().is_ok());
    }
}

#[test]
fn built_schema_serializes_as_document() {
    let built = object([("age", number().min(0.0).optional())]).into_schema();
    let text = serde_json::to_string(&built).unwrap();
    assert_eq!(Schema::from_json_str(&text).unwrap(), built);
}

#[test]
fn unsorted_properties_report_in_declaration_order() {
    let built = object([
        ("zeta", number().into_schema()),
        ("alpha", string().into_schema()),
    ])
    .into_schema();
    let loaded = document(json!({"type": "object", "of": {
        "zeta": {"type": "number"},
        "alpha": {"type": "string"}
    }}));
    let subject = Value::from(json!({}));
    let expected = Err(vec![
        (ErrorCode::InvalidType, error_path!["zeta"]),
        (ErrorCode::InvalidType, error_path!["alpha"]),
    ]);
    assert_eq!(outcome(&built, &subject), expected);
    assert_eq!(outcome(&loaded, &subject), expected);
}

#[test]
fn users_example() {
    let users = array(object([
        ("email", string().min_length(3).into_schema()),
        ("age", number().min(0.0).into_schema()),
    ]));

    let good = Value::from(json!([{"email": "a@b", "age": 3}]));
    assert!(users.parse(&good).is_ok());

    let bad = Value::from(json!([{"email": "x", "age": -1}]));
    let err = users.parse(&bad).unwrap_err();
    let found: Vec<String> = err.iter().map(|v| v.path.to_string()).collect();
    assert_eq!(found, vec!["/0/email", "/0/age"]);
    assert_eq!(err.codes(), vec![ErrorCode::InvalidRange; 2]);
}

fn arb_subject() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Undefined),
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        prop_oneof![Just(1.0), -3.0f64..12.0].prop_map(Value::Number),
        prop_oneof![Just("on"), Just(""), Just("ab"), Just("abcde")].prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map(
                prop_oneof![
                    Just("name"),
                    Just("tags"),
                    Just("x"),
                    Just("u1"),
                    Just("zeta"),
                    Just("alpha"),
                    Just("mid"),
                ]
                .prop_map(String::from),
                inner,
                0..4
            )
            .prop_map(Value::Object),
        ]
    })
}

proptest! {
    #[test]
    fn built_and_loaded_agree(subject in arb_subject()) {
        for (built, loaded) in pairs() {
            prop_assert_eq!(outcome(&built, &subject), outcome(&loaded, &subject));
        }
    }
}
