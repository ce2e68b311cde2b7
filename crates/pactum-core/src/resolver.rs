//! Type declarations and their resolution into rules
//!
//! [`FieldType`] is the declarative vocabulary for field types. It is a
//! serde model, so the same declarations work from Rust code, YAML and JSON:
//!
//! ```yaml
//! type: list
//! items:
//!   type: range
//!   number: integer
//!   low: 1
//!   high: 5
//! ```
//!
//! [`TypeResolver`] turns a declaration into a [`RuleRef`] once, when the
//! schema is defined. Every structural problem is reported right there as a
//! [`SchemaError`].
//!
//! Copyright (c) 2025 Pactum Team
//! Licensed under the Apache-2.0 license

use crate::declaration::SchemaDeclaration;
use crate::error::{Result, SchemaError};
use crate::rule::RuleRef;
use crate::rules::{
    excerpt, AnyOf, BoundedFloat, BoundedInt, Excerpt, Generic, NaturalNumber, ObjectRule, OneOf,
    Pattern, PrimitiveKind, SequenceOf, TupleOf,
};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Numeric domain of a range declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericKind {
    Integer,
    Float,
}

/// Declared type of a field
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldType {
    String,
    Integer,
    Float,
    Boolean,
    /// Inclusive numeric range
    Range {
        number: NumericKind,
        low: Number,
        high: Number,
    },
    /// Fixed set of atomic values
    OneOf { values: Vec<Value> },
    /// Homogeneous list
    List { items: Box<FieldType> },
    /// Fixed-arity positional list
    Tuple { items: Vec<FieldType> },
    /// Union of alternatives
    AnyOf { options: Vec<FieldType> },
    /// String fully matching `regex`; `example` must match
    Pattern { regex: String, example: String },
    /// Text quoted, closely enough, from `source`
    Excerpt {
        source: String,
        #[serde(default = "default_excerpt_threshold")]
        threshold: f64,
    },
    /// Nested object
    Object { schema: SchemaDeclaration },
    /// Rule registered under `name`
    Rule {
        #[serde(rename = "rule")]
        name: String,
    },
    /// Rule supplied directly from code
    #[serde(skip)]
    Custom(RuleRef),
}

impl FieldType {
    pub fn list(items: FieldType) -> Self {
        FieldType::List {
            items: Box::new(items),
        }
    }

    pub fn int_range(low: i64, high: i64) -> Self {
        FieldType::Range {
            number: NumericKind::Integer,
            low: low.into(),
            high: high.into(),
        }
    }

    /// Float range; `None` when a bound is not finite
    pub fn float_range(low: f64, high: f64) -> Option<Self> {
        Some(FieldType::Range {
            number: NumericKind::Float,
            low: Number::from_f64(low)?,
            high: Number::from_f64(high)?,
        })
    }

    pub fn one_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        FieldType::OneOf {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Excerpt of `source` at the default similarity threshold
    pub fn excerpt(source: impl Into<String>) -> Self {
        FieldType::Excerpt {
            source: source.into(),
            threshold: default_excerpt_threshold(),
        }
    }

    pub fn custom(rule: RuleRef) -> Self {
        FieldType::Custom(rule)
    }
}

fn default_excerpt_threshold() -> f64 {
    excerpt::DEFAULT_THRESHOLD
}

impl From<PrimitiveKind> for FieldType {
    fn from(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::String => FieldType::String,
            PrimitiveKind::Integer => FieldType::Integer,
            PrimitiveKind::Float => FieldType::Float,
            PrimitiveKind::Boolean => FieldType::Boolean,
        }
    }
}

/// Named rules available to `FieldType::Rule` declarations
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: BTreeMap<String, RuleRef>,
}

impl RuleRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry preloaded with the built-in named rules
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("natural_number", Arc::new(NaturalNumber));
        registry
    }

    /// Register `rule` under `name`, returning the rule it replaced
    pub fn register(&mut self, name: impl Into<String>, rule: RuleRef) -> Option<RuleRef> {
        self.rules.insert(name.into(), rule)
    }

    pub fn get(&self, name: &str) -> Option<&RuleRef> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Maps declared field types to rules
#[derive(Debug, Clone)]
pub struct TypeResolver {
    registry: RuleRegistry,
}

impl Default for TypeResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeResolver {
    /// Resolver backed by the built-in registry
    pub fn new() -> Self {
        Self::with_registry(RuleRegistry::with_builtins())
    }

    pub fn with_registry(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut RuleRegistry {
        &mut self.registry
    }

    /// Build the rule for `field_type`
    pub fn resolve(&self, field_type: &FieldType) -> Result<RuleRef> {
        let rule: RuleRef = match field_type {
            FieldType::String => Arc::new(Generic::string()),
            FieldType::Integer => Arc::new(Generic::integer()),
            FieldType::Float => Arc::new(Generic::float()),
            FieldType::Boolean => Arc::new(Generic::boolean()),
            FieldType::Range { number, low, high } => match number {
                NumericKind::Integer => {
                    Arc::new(BoundedInt::new(integral_bound(low)?, integral_bound(high)?)?)
                }
                NumericKind::Float => Arc::new(BoundedFloat::new(float_bound(low)?, float_bound(high)?)?),
            },
            FieldType::OneOf { values } => Arc::new(OneOf::new(values.iter().cloned())?),
            FieldType::List { items } => Arc::new(SequenceOf::new(self.resolve(items)?)),
            FieldType::Tuple { items } => Arc::new(TupleOf::new(self.resolve_all(items)?)?),
            FieldType::AnyOf { options } => Arc::new(AnyOf::new(self.resolve_all(options)?)?),
            FieldType::Pattern { regex, example } => {
                Arc::new(Pattern::new(regex.as_str(), example.as_str())?)
            }
            FieldType::Excerpt { source, threshold } => {
                Arc::new(Excerpt::new(source.as_str(), *threshold)?)
            }
            FieldType::Object { schema } => Arc::new(ObjectRule::new(schema.to_schema_with(self)?)),
            FieldType::Rule { name } => {
                let rule = self.registry.get(name).cloned().ok_or_else(|| {
                    SchemaError::UnknownRule {
                        name: name.clone(),
                        available: self.registry.names().collect::<Vec<_>>().join(", "),
                    }
                })?;
                debug!(rule = %name, "resolved named rule");
                rule
            }
            FieldType::Custom(rule) => Arc::clone(rule),
        };
        Ok(rule)
    }

    fn resolve_all(&self, types: &[FieldType]) -> Result<Vec<RuleRef>> {
        types.iter().map(|t| self.resolve(t)).collect()
    }
}

fn integral_bound(bound: &Number) -> Result<i64> {
    if let Some(value) = bound.as_i64() {
        return Ok(value);
    }
    match bound.as_f64() {
        Some(value) if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 => {
            Ok(value as i64)
        }
        _ => Err(SchemaError::NonIntegralBound {
            value: bound.to_string(),
        }),
    }
}

fn float_bound(bound: &Number) -> Result<f64> {
    bound
        .as_f64()
        .ok_or_else(|| SchemaError::declaration(format!("bound {} is not a number", bound)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Rule;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};
    use serde_json::json;

    fn resolve(field_type: FieldType) -> RuleRef {
        TypeResolver::new().resolve(&field_type).unwrap()
    }

    #[test]
    fn test_primitives() {
        assert_eq!(resolve(FieldType::String).describe(), "a string");
        assert_eq!(resolve(FieldType::Integer).describe(), "a integer");
        assert_eq!(resolve(FieldType::Float).describe(), "a float");
        assert_eq!(resolve(FieldType::Boolean).describe(), "a boolean");
    }

    #[test]
    fn test_ranges() {
        let rule = resolve(FieldType::int_range(20, 100));
        assert_eq!(rule.describe(), "a integer between 20 and 100");
        assert!(!rule.validate(&json!(50.0)));

        let rule = resolve(FieldType::float_range(0.0, 1.0).unwrap());
        assert!(rule.validate(&json!(0.5)));
    }

    #[test]
    fn test_integer_range_requires_integral_bounds() {
        let field_type = FieldType::Range {
            number: NumericKind::Integer,
            low: Number::from_f64(0.5).unwrap(),
            high: 3.into(),
        };
        let err = TypeResolver::new().resolve(&field_type).unwrap_err();
        assert!(matches!(err, SchemaError::NonIntegralBound { .. }));

        let field_type = FieldType::Range {
            number: NumericKind::Integer,
            low: Number::from_f64(1.0).unwrap(),
            high: 3.into(),
        };
        assert!(TypeResolver::new().resolve(&field_type).is_ok());
    }

    #[test]
    fn test_composites() {
        let rule = resolve(FieldType::list(FieldType::int_range(1, 5)));
        assert_eq!(rule.describe(), "a list of a integer between 1 and 5");

        let rule = resolve(FieldType::Tuple {
            items: vec![FieldType::String, FieldType::int_range(1, 5)],
        });
        assert!(rule.validate(&json!(["example", 3])));
        assert!(!rule.validate(&json!(["example", 7])));
        assert!(!rule.validate(&json!(["example"])));
    }

    #[test]
    fn test_structural_errors_surface_at_resolution() {
        let resolver = TypeResolver::new();
        assert!(matches!(
            resolver.resolve(&FieldType::one_of(Vec::<Value>::new())),
            Err(SchemaError::EmptyEnumeration)
        ));
        assert!(matches!(
            resolver.resolve(&FieldType::int_range(9, 1)),
            Err(SchemaError::InvertedBounds { .. })
        ));
        assert!(matches!(
            resolver.resolve(&FieldType::Tuple { items: vec![] }),
            Err(SchemaError::EmptyTuple)
        ));
        assert!(matches!(
            resolver.resolve(&FieldType::Pattern {
                regex: "[".to_string(),
                example: "x".to_string()
            }),
            Err(SchemaError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_named_rules() {
        let rule = resolve(FieldType::Rule {
            name: "natural_number".to_string(),
        });
        assert!(rule.validate(&json!(3)));

        let err = TypeResolver::new()
            .resolve(&FieldType::Rule {
                name: "prime".to_string(),
            })
            .unwrap_err();
        match err {
            SchemaError::UnknownRule { name, available } => {
                assert_eq!(name, "prime");
                assert_eq!(available, "natural_number");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[derive(Debug)]
    struct Uppercase;

    impl Rule for Uppercase {
        fn describe(&self) -> String {
            "an uppercase string".to_string()
        }

        fn example(&self, _rng: &mut dyn RngCore) -> Value {
            json!("ABC")
        }

        fn validate(&self, value: &Value) -> bool {
            value
                .as_str()
                .is_some_and(|s| s.chars().all(|c| !c.is_lowercase()))
        }
    }

    #[test]
    fn test_custom_and_registered_rules() {
        let custom: RuleRef = Arc::new(Uppercase);
        let rule = resolve(FieldType::list(FieldType::custom(custom.clone())));
        assert!(rule.validate(&json!(["AB", "CD"])));
        assert!(!rule.validate(&json!(["Ab"])));

        let mut resolver = TypeResolver::with_registry(RuleRegistry::new());
        resolver.registry_mut().register("upper", custom);
        let rule = resolver
            .resolve(&FieldType::Rule {
                name: "upper".to_string(),
            })
            .unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(rule.validate(&rule.example(&mut rng)));
    }

    #[test]
    fn test_deserialize_from_yaml() {
        let yaml = "type: list\nitems:\n  type: range\n  number: integer\n  low: 1\n  high: 5\n";
        let field_type: FieldType = serde_yaml::from_str(yaml).unwrap();
        let rule = TypeResolver::new().resolve(&field_type).unwrap();
        assert_eq!(rule.describe(), "a list of a integer between 1 and 5");
    }

    #[test]
    fn test_excerpt_declarations() {
        let source = "The committee approved the new budget after a long debate about school funding.";
        let yaml = format!("type: excerpt\nsource: \"{}\"\n", source);
        let field_type: FieldType = serde_yaml::from_str(&yaml).unwrap();
        let rule = TypeResolver::new().resolve(&field_type).unwrap();
        assert_eq!(
            rule.describe(),
            "text closely matching a passage of the source (at least 75% similar)"
        );
        assert!(rule.validate(&json!("approved the new budget after a long debate")));
        assert!(!rule.validate(&json!("the weather stayed warm and dry all week long")));

        let strict = resolve(FieldType::Excerpt {
            source: source.to_string(),
            threshold: 0.95,
        });
        assert!(strict.describe().contains("at least 95% similar"));

        assert!(matches!(
            TypeResolver::new().resolve(&FieldType::excerpt("too short")),
            Err(SchemaError::InvalidExcerpt { .. })
        ));
    }

    #[test]
    fn test_deserialize_one_of_and_any_of_from_json() {
        let field_type: FieldType = serde_json::from_value(json!({
            "type": "any_of",
            "options": [
                {"type": "integer"},
                {"type": "one_of", "values": ["none"]}
            ]
        }))
        .unwrap();
        let rule = TypeResolver::new().resolve(&field_type).unwrap();
        assert_eq!(rule.describe(), "either a integer or a one of 'none'");
    }
}
