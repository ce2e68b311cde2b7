//! Unconstrained primitive rules
//!
//! Copyright (c) 2025 Pactum Team
//! Licensed under the Apache-2.0 license

use crate::path::FieldPath;
use crate::rule::Rule;
use crate::validation::ValidationError;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// Primitive JSON kinds a field can be declared as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    String,
    Integer,
    Float,
    Boolean,
}

impl PrimitiveKind {
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Integer => "integer",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Boolean => "boolean",
        }
    }

    /// Whether `value` is of this kind
    ///
    /// Integers count as floats; non-integral numbers are not integers.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            PrimitiveKind::String => value.is_string(),
            PrimitiveKind::Integer => value.is_i64() || value.is_u64(),
            PrimitiveKind::Float => value.is_number(),
            PrimitiveKind::Boolean => value.is_boolean(),
        }
    }

    /// Fixed stand-in used in examples
    pub fn sentinel(self) -> Value {
        match self {
            PrimitiveKind::String => json!("example"),
            PrimitiveKind::Integer => json!(42),
            PrimitiveKind::Float => json!(1.5),
            PrimitiveKind::Boolean => json!(true),
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Any value of one primitive kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generic {
    kind: PrimitiveKind,
}

impl Generic {
    pub fn new(kind: PrimitiveKind) -> Self {
        Self { kind }
    }

    pub fn string() -> Self {
        Self::new(PrimitiveKind::String)
    }

    pub fn integer() -> Self {
        Self::new(PrimitiveKind::Integer)
    }

    pub fn float() -> Self {
        Self::new(PrimitiveKind::Float)
    }

    pub fn boolean() -> Self {
        Self::new(PrimitiveKind::Boolean)
    }

    pub fn kind(&self) -> PrimitiveKind {
        self.kind
    }
}

impl Rule for Generic {
    fn describe(&self) -> String {
        format!("a {}", self.kind)
    }

    fn example(&self, _rng: &mut dyn RngCore) -> Value {
        self.kind.sentinel()
    }

    fn validate(&self, value: &Value) -> bool {
        self.kind.matches(value)
    }

    fn check(&self, value: &Value, path: &FieldPath) -> Result<(), ValidationError> {
        if self.kind.matches(value) {
            Ok(())
        } else {
            Err(ValidationError::type_mismatch(
                path.clone(),
                self.kind.name(),
                value,
                &self.describe(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_describe_uses_invariant_article() {
        assert_eq!(Generic::string().describe(), "a string");
        assert_eq!(Generic::integer().describe(), "a integer");
        assert_eq!(Generic::float().describe(), "a float");
        assert_eq!(Generic::boolean().describe(), "a boolean");
    }

    #[test]
    fn test_sentinel_examples_are_stable() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(Generic::string().example(&mut rng), json!("example"));
        assert_eq!(Generic::integer().example(&mut rng), json!(42));
        assert_eq!(Generic::float().example(&mut rng), json!(1.5));
        assert_eq!(Generic::boolean().example(&mut rng), json!(true));
    }

    #[test]
    fn test_kind_checks() {
        assert!(Generic::integer().validate(&json!(5)));
        assert!(Generic::integer().validate(&json!(u64::MAX)));
        assert!(!Generic::integer().validate(&json!(5.5)));
        assert!(!Generic::integer().validate(&json!(true)));
        assert!(!Generic::integer().validate(&json!("5")));

        assert!(Generic::float().validate(&json!(5)));
        assert!(Generic::float().validate(&json!(0.25)));
        assert!(!Generic::float().validate(&json!(null)));

        assert!(Generic::boolean().validate(&json!(false)));
        assert!(!Generic::boolean().validate(&json!(0)));

        assert!(Generic::string().validate(&json!("")));
        assert!(!Generic::string().validate(&json!(["a"])));
    }

    #[test]
    fn test_check_reports_type_mismatch() {
        let err = Generic::integer()
            .check(&json!("example"), &FieldPath::root().field("x"))
            .unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::TypeMismatch);
        assert_eq!(err.actual, "\"x\" must be integer, got string");
        assert_eq!(err.expected, "\"x\" must be a integer");
    }
}
