//! End-to-end validation behaviour of schemas


use pactum_core::rules::{AnyOf, Generic, Pattern, SequenceOf};
use pactum_core::{FieldType, Rule, RuleRef, Schema, ValidationErrorKind, Verdict};
use rand::RngCore;
use serde_json::{json, Value};
use std::sync::Arc;
use test_support::{nested_schema, pair_rule, person_schema, pick_schema};

#[test]
fn test_person_accepts_valid_document() {
    let verdict = person_schema().validate_with_error(&json!({"name": "a", "index": 5}));
    assert_eq!(verdict, Verdict::Valid);
    assert_eq!(serde_json::to_value(&verdict).unwrap(), json!([true]));
}

#[test]
fn test_person_reports_missing_name() {
    let verdict = person_schema().validate_with_error(&json!({"index": 5}));
    assert_eq!(
        serde_json::to_value(&verdict).unwrap(),
        json!([false, "\"name\" is missing.", "\"name\" must be present."])
    );
}

#[test]
fn test_presence_is_fail_fast() {
    let err = person_schema().validate(&json!({})).unwrap_err();
    assert_eq!(err.kind, ValidationErrorKind::MissingField);
    assert_eq!(err.path.to_string(), "name");
}

#[test]
fn test_bounds_and_enumeration() {
    let schema = pick_schema();
    for x in [20, 100, 57] {
        assert!(schema.validate(&json!({"x": x, "fav": "green"})).is_ok());
    }
    for x in [json!(19), json!(101), json!(3.5)] {
        assert!(schema.validate(&json!({"x": x, "fav": "green"})).is_err());
    }
    let err = schema
        .validate(&json!({"x": 50, "fav": "blue"}))
        .unwrap_err();
    assert_eq!(err.kind, ValidationErrorKind::NotInSet);
}

#[test]
fn test_float_valued_integer_is_rejected() {
    let err = pick_schema()
        .validate(&json!({"x": 50.0, "fav": "red"}))
        .unwrap_err();
    assert_eq!(err.kind, ValidationErrorKind::TypeMismatch);
    assert_eq!(err.actual, "\"x\" must be integer, got float");
}

#[test]
fn test_tuple_field() {
    let schema = Schema::builder("T")
        .field("t", pair_rule())
        .build()
        .unwrap();
    assert!(schema.validate(&json!({"t": ["example", 3]})).is_ok());
    assert!(schema.validate(&json!({"t": ["example", 7]})).is_err());
    assert_eq!(
        schema
            .validate(&json!({"t": ["example"]}))
            .unwrap_err()
            .kind,
        ValidationErrorKind::ArityMismatch
    );
}

#[test]
fn test_deep_error_inside_nested_schema() {
    let data = json!({"a": {"z": [0.5], "y": [4, 42]}, "b": "example"});
    let err = nested_schema().validate(&data).unwrap_err();
    assert_eq!(err.path.to_string(), "a.y[1]");
    assert_eq!(err.actual, "\"a.y[1]\" is out of range, got 42");
    assert_eq!(err.expected, "\"a.y[1]\" must be a integer between 0 and 9");
}

#[test]
fn test_sequence_element_type_mismatch() {
    let data = json!({"a": {"z": [0.5, "x"], "y": []}, "b": "example"});
    let err = nested_schema().validate(&data).unwrap_err();
    assert_eq!(err.path.to_string(), "a.z[1]");
    assert_eq!(err.kind, ValidationErrorKind::TypeMismatch);
}

#[derive(Debug)]
struct Odd;

impl Rule for Odd {
    fn describe(&self) -> String {
        "an odd integer".to_string()
    }

    fn example(&self, _rng: &mut dyn RngCore) -> Value {
        json!(1)
    }

    fn validate(&self, value: &Value) -> bool {
        value.as_i64().is_some_and(|v| v % 2 != 0)
    }
}

#[test]
fn test_custom_rule_failures() {
    let odd: RuleRef = Arc::new(Odd);
    let schema = Schema::builder("Custom")
        .field_ref("one", odd.clone())
        .field("many", SequenceOf::new(odd))
        .build()
        .unwrap();

    let err = schema.validate(&json!({"one": 2, "many": []})).unwrap_err();
    assert_eq!(err.kind, ValidationErrorKind::RuleViolation);
    assert_eq!(err.actual, "\"one\" is invalid.");
    assert_eq!(err.expected, "\"one\" must be an odd integer");

    let err = schema
        .validate(&json!({"one": 1, "many": [3, 4]}))
        .unwrap_err();
    assert_eq!(err.kind, ValidationErrorKind::ElementInvalid);
    assert_eq!(err.path.to_string(), "many[1]");
}

#[test]
fn test_union_and_pattern_fields() {
    let limit: RuleRef = Arc::new(Generic::integer());
    let unlimited: RuleRef = Arc::new(Pattern::new("unlimited|none", "none").unwrap());
    let schema = Schema::builder("Quota")
        .field("limit", AnyOf::new(vec![limit, unlimited]).unwrap())
        .build()
        .unwrap();
    assert!(schema.validate(&json!({"limit": 10})).is_ok());
    assert!(schema.validate(&json!({"limit": "unlimited"})).is_ok());

    let err = schema.validate(&json!({"limit": "lots"})).unwrap_err();
    assert_eq!(err.kind, ValidationErrorKind::NoAlternativeMatched);
    assert_eq!(
        err.expected,
        "\"limit\" must be a integer or \"limit\" must be a string matching regex \"unlimited|none\""
    );
}

#[test]
fn test_declared_fields_match_builder_fields() {
    let declared = Schema::builder("Person")
        .declare("name", FieldType::String)
        .declare("index", FieldType::Integer)
        .build()
        .unwrap();
    assert_eq!(declared.rule_lines(), person_schema().rule_lines());
}

#[test]
fn test_examples_validate_for_many_seeds() {
    for schema in [person_schema(), pick_schema(), nested_schema()] {
        for seed in 0..64 {
            let example = schema.example_seeded(seed);
            assert!(
                schema.validate(&example).is_ok(),
                "{} rejected its own example {}",
                schema.name(),
                example
            );
        }
    }
}

#[test]
fn test_concurrent_validation() {
    let schema = Arc::new(pick_schema());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let schema = Arc::clone(&schema);
            std::thread::spawn(move || {
                let prompt = schema.prompt_seeded(9);
                let ok = schema.validate(&json!({"x": 20 + i, "fav": "red"})).is_ok();
                (prompt, ok)
            })
        })
        .collect();
    let results: Vec<(String, bool)> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(results.iter().all(|(_, ok)| *ok));
    assert!(results.windows(2).all(|w| w[0].0 == w[1].0));
}
