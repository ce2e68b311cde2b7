//! Rules built from other rules
//!
//! Copyright (c) 2025 Pactum Team
//! Licensed under the Apache-2.0 license

use crate::error::{Result, SchemaError};
use crate::path::FieldPath;
use crate::rule::{Rule, RuleRef};
use crate::schema::Schema;
use crate::validation::ValidationError;
use rand::RngCore;
use serde_json::Value;

/// Homogeneous list of any length, including empty
#[derive(Debug, Clone)]
pub struct SequenceOf {
    element: RuleRef,
}

impl SequenceOf {
    pub fn new(element: RuleRef) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &RuleRef {
        &self.element
    }
}

impl Rule for SequenceOf {
    fn describe(&self) -> String {
        format!("a list of {}", self.element.describe())
    }

    fn example(&self, rng: &mut dyn RngCore) -> Value {
        Value::Array(vec![self.element.example(rng)])
    }

    fn validate(&self, value: &Value) -> bool {
        value
            .as_array()
            .is_some_and(|items| items.iter().all(|item| self.element.validate(item)))
    }

    fn check(&self, value: &Value, path: &FieldPath) -> std::result::Result<(), ValidationError> {
        let items = value.as_array().ok_or_else(|| {
            ValidationError::type_mismatch(path.clone(), "list", value, &self.describe())
        })?;
        for (i, item) in items.iter().enumerate() {
            self.element.check(item, &path.index(i))?;
        }
        Ok(())
    }

    fn nested(&self) -> Vec<(String, &Schema)> {
        self.element
            .nested()
            .into_iter()
            .map(|(suffix, schema)| (format!("[]{}", suffix), schema))
            .collect()
    }
}

/// Fixed-arity positional list
#[derive(Debug, Clone)]
pub struct TupleOf {
    elements: Vec<RuleRef>,
}

impl TupleOf {
    /// Create a tuple rule; at least one element rule is required
    pub fn new(elements: Vec<RuleRef>) -> Result<Self> {
        if elements.is_empty() {
            return Err(SchemaError::EmptyTuple);
        }
        Ok(Self { elements })
    }

    pub fn elements(&self) -> &[RuleRef] {
        &self.elements
    }
}

impl Rule for TupleOf {
    fn describe(&self) -> String {
        let parts: Vec<String> = self.elements.iter().map(|e| e.describe()).collect();
        format!("a tuple ({})", parts.join(", "))
    }

    fn example(&self, rng: &mut dyn RngCore) -> Value {
        Value::Array(self.elements.iter().map(|e| e.example(rng)).collect())
    }

    fn validate(&self, value: &Value) -> bool {
        value.as_array().is_some_and(|items| {
            items.len() == self.elements.len()
                && self
                    .elements
                    .iter()
                    .zip(items)
                    .all(|(rule, item)| rule.validate(item))
        })
    }

    fn check(&self, value: &Value, path: &FieldPath) -> std::result::Result<(), ValidationError> {
        let items = value.as_array().ok_or_else(|| {
            ValidationError::type_mismatch(path.clone(), "list", value, &self.describe())
        })?;
        if items.len() != self.elements.len() {
            return Err(ValidationError::arity_mismatch(
                path.clone(),
                self.elements.len(),
                items.len(),
                &self.describe(),
            ));
        }
        for (i, (rule, item)) in self.elements.iter().zip(items).enumerate() {
            rule.check(item, &path.index(i))?;
        }
        Ok(())
    }

    fn nested(&self) -> Vec<(String, &Schema)> {
        self.elements
            .iter()
            .enumerate()
            .flat_map(|(i, rule)| {
                rule.nested()
                    .into_iter()
                    .map(move |(suffix, schema)| (format!("[{}]{}", i, suffix), schema))
            })
            .collect()
    }
}

/// Union: the value must satisfy at least one alternative
#[derive(Debug, Clone)]
pub struct AnyOf {
    alternatives: Vec<RuleRef>,
}

impl AnyOf {
    pub fn new(alternatives: Vec<RuleRef>) -> Result<Self> {
        if alternatives.is_empty() {
            return Err(SchemaError::EmptyAlternatives);
        }
        Ok(Self { alternatives })
    }

    pub fn alternatives(&self) -> &[RuleRef] {
        &self.alternatives
    }
}

impl Rule for AnyOf {
    fn describe(&self) -> String {
        let parts: Vec<String> = self.alternatives.iter().map(|a| a.describe()).collect();
        format!("either {}", parts.join(" or "))
    }

    fn example(&self, rng: &mut dyn RngCore) -> Value {
        // non-empty by construction
        self.alternatives[0].example(rng)
    }

    fn validate(&self, value: &Value) -> bool {
        self.alternatives.iter().any(|a| a.validate(value))
    }

    fn check(&self, value: &Value, path: &FieldPath) -> std::result::Result<(), ValidationError> {
        let mut expectations = Vec::with_capacity(self.alternatives.len());
        for alternative in &self.alternatives {
            match alternative.check(value, path) {
                Ok(()) => return Ok(()),
                Err(err) => expectations.push(err.expected),
            }
        }
        Err(ValidationError::no_alternative(path.clone(), &expectations))
    }

    fn nested(&self) -> Vec<(String, &Schema)> {
        self.alternatives.iter().flat_map(|a| a.nested()).collect()
    }
}
