//! Nested object rule
//!
//! Copyright (c) 2025 Pactum Team
//! Licensed under the Apache-2.0 license

use crate::path::FieldPath;
use crate::rule::Rule;
use crate::schema::Schema;
use crate::validation::ValidationError;
use rand::RngCore;
use serde_json::Value;
use std::sync::Arc;

/// Object validated by a nested schema
///
/// Errors inside the object keep their full path, e.g. `address.zip`.
#[derive(Debug, Clone)]
pub struct ObjectRule {
    schema: Arc<Schema>,
}

impl ObjectRule {
    pub fn new(schema: impl Into<Arc<Schema>>) -> Self {
        Self {
            schema: schema.into(),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

impl Rule for ObjectRule {
    fn describe(&self) -> String {
        format!("a {} object", self.schema.name())
    }

    fn example(&self, rng: &mut dyn RngCore) -> Value {
        self.schema.example_with_rng(rng)
    }

    fn validate(&self, value: &Value) -> bool {
        self.schema.validate(value).is_ok()
    }

    fn check(&self, value: &Value, path: &FieldPath) -> Result<(), ValidationError> {
        if !value.is_object() {
            return Err(ValidationError::type_mismatch(
                path.clone(),
                "object",
                value,
                &self.describe(),
            ));
        }
        self.schema.check_at(value, path)
    }

    fn nested(&self) -> Vec<(String, &Schema)> {
        vec![(String::new(), self.schema.as_ref())]
    }
}
