//! Fixed-set membership
//!
//! Numbers are members by numeric value, so `1` and `1.0` are the same
//! member. JSON text written by a model does not keep the distinction.
//!
//! Copyright (c) 2025 Pactum Team
//! Licensed under the Apache-2.0 license

use crate::error::{Result, SchemaError};
use crate::path::FieldPath;
use crate::rule::Rule;
use crate::validation::ValidationError;
use rand::seq::SliceRandom;
use rand::RngCore;
use serde_json::Value;

/// Value equal to one member of an ordered set of atomic values
#[derive(Debug, Clone, PartialEq)]
pub struct OneOf {
    allowed: Vec<Value>,
}

impl OneOf {
    /// Create an enumeration rule
    ///
    /// Members must be atomic (string, number, boolean or null), unique, and
    /// there must be at least one.
    pub fn new<I, V>(allowed: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut members: Vec<Value> = Vec::new();
        for value in allowed {
            let value = value.into();
            if value.is_array() || value.is_object() {
                return Err(SchemaError::NonAtomicMember {
                    value: value.to_string(),
                });
            }
            if members.iter().any(|member| same_member(member, &value)) {
                return Err(SchemaError::DuplicateMember {
                    value: value.to_string(),
                });
            }
            members.push(value);
        }
        if members.is_empty() {
            return Err(SchemaError::EmptyEnumeration);
        }
        Ok(Self { allowed: members })
    }

    pub fn allowed(&self) -> &[Value] {
        &self.allowed
    }
}

fn same_member(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                x == y
            } else if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                x == y
            } else if x.is_f64() || y.is_f64() {
                x.as_f64() == y.as_f64()
            } else {
                // An i64 below zero against a u64 above i64::MAX
                false
            }
        }
        _ => a == b,
    }
}

/// Strings are single-quoted, other atoms print as JSON
fn render_member(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{}'", s),
        other => other.to_string(),
    }
}

impl Rule for OneOf {
    fn describe(&self) -> String {
        let members: Vec<String> = self.allowed.iter().map(render_member).collect();
        format!("a one of {}", members.join(", "))
    }

    fn example(&self, rng: &mut dyn RngCore) -> Value {
        self.allowed
            .choose(rng)
            .cloned()
            .unwrap_or(Value::Null)
    }

    fn validate(&self, value: &Value) -> bool {
        self.allowed.iter().any(|member| same_member(member, value))
    }

    fn check(&self, value: &Value, path: &FieldPath) -> std::result::Result<(), ValidationError> {
        if self.validate(value) {
            Ok(())
        } else {
            Err(ValidationError::not_in_set(path.clone(), value, &self.describe()))
        }
    }
}
