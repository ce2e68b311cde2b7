//! Inclusive numeric ranges
//!
//! Copyright (c) 2025 Pactum Team
//! Licensed under the Apache-2.0 license

use crate::error::{Result, SchemaError};
use crate::path::FieldPath;
use crate::rule::Rule;
use crate::validation::ValidationError;
use rand::{Rng, RngCore};
use serde_json::Value;

/// Integer in `[low, high]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedInt {
    low: i64,
    high: i64,
}

impl BoundedInt {
    /// Create a range rule, rejecting `low > high`
    pub fn new(low: i64, high: i64) -> Result<Self> {
        if low > high {
            return Err(SchemaError::inverted(low, high));
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> i64 {
        self.low
    }

    pub fn high(&self) -> i64 {
        self.high
    }

    fn contains(&self, value: &Value) -> Option<bool> {
        if value.is_i64() {
            value.as_i64().map(|v| (self.low..=self.high).contains(&v))
        } else if value.is_u64() {
            // above i64::MAX, so above any i64 bound
            Some(false)
        } else {
            None
        }
    }
}

impl Rule for BoundedInt {
    fn describe(&self) -> String {
        format!("a integer between {} and {}", self.low, self.high)
    }

    fn example(&self, rng: &mut dyn RngCore) -> Value {
        Value::from(rng.gen_range(self.low..=self.high))
    }

    fn validate(&self, value: &Value) -> bool {
        self.contains(value).unwrap_or(false)
    }

    fn check(&self, value: &Value, path: &FieldPath) -> std::result::Result<(), ValidationError> {
        match self.contains(value) {
            Some(true) => Ok(()),
            Some(false) => Err(ValidationError::out_of_range(path.clone(), value, &self.describe())),
            None => Err(ValidationError::type_mismatch(
                path.clone(),
                "integer",
                value,
                &self.describe(),
            )),
        }
    }
}

/// Integer `>= 1`, registered by default as `natural_number`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalNumber;

impl Rule for NaturalNumber {
    fn describe(&self) -> String {
        "a natural number (integer >= 1)".to_string()
    }

    fn example(&self, _rng: &mut dyn RngCore) -> Value {
        Value::from(3)
    }

    fn validate(&self, value: &Value) -> bool {
        value.is_u64() && value.as_u64().is_some_and(|v| v >= 1)
    }

    fn check(&self, value: &Value, path: &FieldPath) -> std::result::Result<(), ValidationError> {
        if self.validate(value) {
            Ok(())
        } else if value.is_i64() || value.is_u64() {
            Err(ValidationError::out_of_range(path.clone(), value, &self.describe()))
        } else {
            Err(ValidationError::type_mismatch(
                path.clone(),
                "integer",
                value,
                &self.describe(),
            ))
        }
    }
}

const DEFAULT_FLOAT_TEMPLATE: &str = "a float between {low} and {high}";

/// Number in `[low, high]`; integers are accepted
///
/// The description is rendered from a phrase template in which `{low}` and
/// `{high}` are replaced by the bounds, so wrappers can reword it:
///
/// ```
/// use pactum_core::rules::BoundedFloat;
/// use pactum_core::Rule;
///
/// let rule = BoundedFloat::new(0.0, 1.0)
///     .unwrap()
///     .with_template("a probability between {low} and {high}");
/// assert_eq!(rule.describe(), "a probability between 0 and 1");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedFloat {
    low: f64,
    high: f64,
    template: String,
}

impl BoundedFloat {
    /// Create a range rule, rejecting non-finite or inverted bounds
    pub fn new(low: f64, high: f64) -> Result<Self> {
        for bound in [low, high] {
            if !bound.is_finite() {
                return Err(SchemaError::NonFiniteBound { value: bound });
            }
        }
        if low > high {
            return Err(SchemaError::inverted(low, high));
        }
        Ok(Self {
            low,
            high,
            template: DEFAULT_FLOAT_TEMPLATE.to_string(),
        })
    }

    /// Replace the phrase template used by `describe()`
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }
}

impl Rule for BoundedFloat {
    fn describe(&self) -> String {
        self.template
            .replace("{low}", &self.low.to_string())
            .replace("{high}", &self.high.to_string())
    }

    fn example(&self, rng: &mut dyn RngCore) -> Value {
        let sample = if (self.high - self.low).is_finite() {
            rng.gen_range(self.low..=self.high)
        } else {
            self.low / 2.0 + self.high / 2.0
        };
        Value::from(sample)
    }

    fn validate(&self, value: &Value) -> bool {
        value
            .as_f64()
            .is_some_and(|v| v >= self.low && v <= self.high)
    }

    fn check(&self, value: &Value, path: &FieldPath) -> std::result::Result<(), ValidationError> {
        match value.as_f64() {
            Some(v) if v >= self.low && v <= self.high => Ok(()),
            Some(_) => Err(ValidationError::out_of_range(path.clone(), value, &self.describe())),
            None => Err(ValidationError::type_mismatch(
                path.clone(),
                "float",
                value,
                &self.describe(),
            )),
        }
    }
}
