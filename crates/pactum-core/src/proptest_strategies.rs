//! Property-based testing strategies for generating field types
//!
//! Copyright (c) 2025 Pactum Team
//! Licensed under the Apache-2.0 license

#![cfg(test)]

use crate::declaration::{FieldDeclaration, SchemaDeclaration};
use crate::resolver::FieldType;
use proptest::collection::{hash_set, vec};
use proptest::prelude::*;
use serde_json::Value;

/// Strategy for generating regex/sample pairs that match
pub fn pattern_strategy() -> impl Strategy<Value = FieldType> {
    prop_oneof![
        Just(("[a-z]+", "abc")),
        Just((r"\d{3}-\d{4}", "555-0100")),
        Just(("(yes|no)", "no")),
        Just(("[A-Z]{2}[0-9]?", "GB1")),
    ]
    .prop_map(|(regex, example)| FieldType::Pattern {
        regex: regex.to_string(),
        example: example.to_string(),
    })
}

/// Strategy for generating non-recursive field types
pub fn leaf_field_type_strategy() -> impl Strategy<Value = FieldType> {
    prop_oneof![
        Just(FieldType::String),
        Just(FieldType::Integer),
        Just(FieldType::Float),
        Just(FieldType::Boolean),
        (-1_000_000i64..1_000_000, 0i64..1_000)
            .prop_map(|(low, span)| FieldType::int_range(low, low + span)),
        (-1.0e6f64..1.0e6, 0.0f64..1.0e3).prop_map(|(low, span)| {
            FieldType::float_range(low, low + span).unwrap_or(FieldType::Float)
        }),
        hash_set("[a-z]{1,8}", 1..6).prop_map(|members| {
            FieldType::one_of(members.into_iter().map(Value::String))
        }),
        pattern_strategy(),
    ]
}

/// Strategy for generating a nested object declaration from field types
fn object_strategy(inner: BoxedStrategy<FieldType>) -> impl Strategy<Value = FieldType> {
    (vec(inner, 1..4), any::<bool>()).prop_map(|(types, deny)| {
        let mut declaration = SchemaDeclaration::new("Nested");
        declaration.deny_unknown_fields = deny;
        declaration.fields = types
            .into_iter()
            .enumerate()
            .map(|(i, field_type)| FieldDeclaration::new(format!("f{}", i), field_type))
            .collect();
        FieldType::Object {
            schema: declaration,
        }
    })
}

/// Strategy for generating arbitrarily nested field types
pub fn field_type_strategy() -> impl Strategy<Value = FieldType> {
    leaf_field_type_strategy().prop_recursive(3, 24, 4, |inner| {
        let inner = inner.boxed();
        prop_oneof![
            inner.clone().prop_map(FieldType::list),
            vec(inner.clone(), 1..4).prop_map(|items| FieldType::Tuple { items }),
            vec(inner.clone(), 1..3).prop_map(|options| FieldType::AnyOf { options }),
            object_strategy(inner),
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::TypeResolver;
    use crate::rule::Rule;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    proptest! {
        #[test]
        fn prop_resolved_examples_validate(field_type in field_type_strategy(), seed in any::<u64>()) {
            let rule = TypeResolver::new().resolve(&field_type).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            let example = rule.example(&mut rng);
            prop_assert!(rule.validate(&example), "{} rejected {}", rule.describe(), example);
        }

        #[test]
        fn prop_check_agrees_with_validate(field_type in field_type_strategy(), seed in any::<u64>()) {
            let rule = TypeResolver::new().resolve(&field_type).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            let example = rule.example(&mut rng);
            let path = crate::path::FieldPath::root().field("v");
            prop_assert!(rule.check(&example, &path).is_ok());
            prop_assert!(rule.check(&Value::Null, &path).is_err() == !rule.validate(&Value::Null));
        }

        #[test]
        fn prop_declarations_round_trip_through_yaml(field_type in field_type_strategy()) {
            let declaration = FieldDeclaration::new("v", field_type);
            let yaml = serde_yaml::to_string(&declaration).unwrap();
            let parsed: FieldDeclaration = serde_yaml::from_str(&yaml).unwrap();
            let a = TypeResolver::new().resolve(&declaration.field_type).unwrap();
            let b = TypeResolver::new().resolve(&parsed.field_type).unwrap();
            prop_assert_eq!(a.describe(), b.describe());
        }
    }
}
