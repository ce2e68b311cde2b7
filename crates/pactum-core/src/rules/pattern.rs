//! Regular-expression string rule
//!
//! Copyright (c) 2025 Pactum Team
//! Licensed under the Apache-2.0 license

use crate::error::{Result, SchemaError};
use crate::path::FieldPath;
use crate::rule::Rule;
use crate::validation::ValidationError;
use rand::RngCore;
use regex::Regex;
use serde_json::Value;

/// String whose whole content matches a regular expression
///
/// The pattern is anchored on both ends, so `[a-z]+` rejects `"abc1"`.
/// A sample string is required up front and must match; it is what
/// `example()` returns.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
    sample: String,
}

impl Pattern {
    pub fn new(pattern: impl Into<String>, sample: impl Into<String>) -> Result<Self> {
        let source = pattern.into();
        let sample = sample.into();
        let regex = Regex::new(&format!("^(?:{})$", source)).map_err(|e| {
            SchemaError::InvalidPattern {
                pattern: source.clone(),
                source: e,
            }
        })?;
        if !regex.is_match(&sample) {
            return Err(SchemaError::PatternSampleMismatch {
                pattern: source,
                sample,
            });
        }
        Ok(Self {
            source,
            regex,
            sample,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.source
    }
}

impl Rule for Pattern {
    fn describe(&self) -> String {
        format!("a string matching regex \"{}\"", self.source)
    }

    fn example(&self, _rng: &mut dyn RngCore) -> Value {
        Value::String(self.sample.clone())
    }

    fn validate(&self, value: &Value) -> bool {
        value.as_str().is_some_and(|s| self.regex.is_match(s))
    }

    fn check(&self, value: &Value, path: &FieldPath) -> std::result::Result<(), ValidationError> {
        match value.as_str() {
            Some(s) if self.regex.is_match(s) => Ok(()),
            Some(_) => Err(ValidationError::pattern_mismatch(path.clone(), &self.describe())),
            None => Err(ValidationError::type_mismatch(
                path.clone(),
                "string",
                value,
                &self.describe(),
            )),
        }
    }
}
