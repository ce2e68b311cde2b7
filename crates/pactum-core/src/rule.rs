//! The rule abstraction
//!
//! A [`Rule`] constrains one value tree. It can describe itself for the
//! prompt, produce an example value that it accepts, and validate candidate
//! values. Built-in rules live in [`crate::rules`]; third-party rules only
//! need to implement the three required methods.
//!
//! Copyright (c) 2025 Pactum Team
//! Licensed under the Apache-2.0 license

use crate::path::FieldPath;
use crate::schema::Schema;
use crate::validation::ValidationError;
use rand::RngCore;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Shared handle to a rule
pub type RuleRef = Arc<dyn Rule>;

/// Describe / example / validate capability set for one value
///
/// # Contract
///
/// - `describe()` is deterministic and reads naturally after "must be".
/// - `example()` never returns a value that `validate()` rejects.
/// - `validate()` is a pure predicate and rejects values of the wrong kind.
///
/// # Example
///
/// ```
/// use pactum_core::{Rule, Schema};
/// use rand::{Rng, RngCore};
/// use serde_json::{json, Value};
///
/// #[derive(Debug)]
/// struct Probability;
///
/// impl Rule for Probability {
///     fn describe(&self) -> String {
///         "a number between 0 and 1".to_string()
///     }
///
///     fn example(&self, rng: &mut dyn RngCore) -> Value {
///         json!(rng.gen_range(0.0..=1.0))
///     }
///
///     fn validate(&self, value: &Value) -> bool {
///         value.as_f64().is_some_and(|v| (0.0..=1.0).contains(&v))
///     }
/// }
///
/// let schema = Schema::builder("Forecast")
///     .field("rain", Probability)
///     .build()
///     .unwrap();
/// assert!(schema.validate_with_error(&json!({"rain": 0.3})).is_valid());
/// ```
pub trait Rule: fmt::Debug + Send + Sync {
    /// Clause used as "<field> must be <describe()>"
    fn describe(&self) -> String;

    /// A value accepted by [`Rule::validate`]
    fn example(&self, rng: &mut dyn RngCore) -> Value;

    /// Whether `value` lies in this rule's domain
    fn validate(&self, value: &Value) -> bool;

    /// Validate `value` found at `path`, reporting where and why it failed
    ///
    /// Built-in rules override this to classify failures and to point into
    /// nested values; the default reports an opaque rule violation.
    fn check(&self, value: &Value, path: &FieldPath) -> Result<(), ValidationError> {
        if self.validate(value) {
            Ok(())
        } else {
            Err(ValidationError::rule_violation(path.clone(), &self.describe()))
        }
    }

    /// Schemas nested in this rule, with the path suffix leading to them
    ///
    /// The suffix is `""` for an object rule, `"[]"` for the element of a
    /// list and `"[i]"` for the i-th tuple position. Used to render nested
    /// rule lines in the prompt.
    fn nested(&self) -> Vec<(String, &Schema)> {
        Vec::new()
    }
}

impl<R: Rule + ?Sized> Rule for Arc<R> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn example(&self, rng: &mut dyn RngCore) -> Value {
        (**self).example(rng)
    }

    fn validate(&self, value: &Value) -> bool {
        (**self).validate(value)
    }

    fn check(&self, value: &Value, path: &FieldPath) -> Result<(), ValidationError> {
        (**self).check(value, path)
    }

    fn nested(&self) -> Vec<(String, &Schema)> {
        (**self).nested()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    #[derive(Debug)]
    struct Even;

    impl Rule for Even {
        fn describe(&self) -> String {
            "an even integer".to_string()
        }

        fn example(&self, _rng: &mut dyn RngCore) -> Value {
            json!(4)
        }

        fn validate(&self, value: &Value) -> bool {
            value.as_i64().is_some_and(|v| v % 2 == 0)
        }
    }

    #[test]
    fn test_default_check_reports_rule_violation() {
        let path = FieldPath::root().field("n");
        assert!(Even.check(&json!(2), &path).is_ok());

        let err = Even.check(&json!(3), &path).unwrap_err();
        assert_eq!(err.actual, "\"n\" is invalid.");
        assert_eq!(err.expected, "\"n\" must be an even integer");
    }

    #[test]
    fn test_arc_forwards_to_inner_rule() {
        let rule: RuleRef = Arc::new(Even);
        let mut rng = StdRng::seed_from_u64(7);
        assert!(rule.validate(&rule.example(&mut rng)));
        assert_eq!(rule.describe(), "an even integer");
        assert!(rule.nested().is_empty());
    }
}
