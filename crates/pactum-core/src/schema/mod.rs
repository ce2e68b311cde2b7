//! Schemas: ordered field tables of rules
//!
//! A [`Schema`] is defined once through a [`SchemaBuilder`] (or a
//! [`SchemaDeclaration`](crate::declaration::SchemaDeclaration)) and is
//! immutable afterwards. Field order is declaration order everywhere: in the
//! prompt, in the example object and in the order validation stops.
//!
//! Copyright (c) 2025 Pactum Team
//! Licensed under the Apache-2.0 license

mod prompt;

use crate::error::{Result, SchemaError};
use crate::path::FieldPath;
use crate::resolver::{FieldType, TypeResolver};
use crate::rule::{Rule, RuleRef};
use crate::validation::{value_kind, ValidationError, Verdict};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, trace};

/// One declared field of a schema
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    name: String,
    rule: RuleRef,
    required: bool,
    note: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, rule: RuleRef) -> Self {
        Self {
            name: name.into(),
            rule,
            required: true,
            note: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rule(&self) -> &RuleRef {
        &self.rule
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

/// A named, ordered mapping from field names to rules
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    header: Option<String>,
    preamble: Option<String>,
    fields: Vec<FieldDescriptor>,
    deny_unknown_fields: bool,
    example_overrides: Vec<(String, Value)>,
    additional_examples: Vec<Value>,
}

impl Schema {
    /// Start declaring a schema
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    pub fn preamble(&self) -> Option<&str> {
        self.preamble.as_deref()
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn denies_unknown_fields(&self) -> bool {
        self.deny_unknown_fields
    }

    pub fn additional_examples(&self) -> &[Value] {
        &self.additional_examples
    }

    /// Validate `data`, stopping at the first violation
    pub fn validate(&self, data: &Value) -> std::result::Result<(), ValidationError> {
        if !data.is_object() {
            let description = format!("a {} object", self.name);
            return Err(ValidationError::type_mismatch(
                FieldPath::root(),
                "object",
                data,
                &description,
            ));
        }
        self.check_at(data, &FieldPath::root())
    }

    /// Validate `data` and return the verdict shape handed back to callers
    pub fn validate_with_error(&self, data: &Value) -> Verdict {
        Verdict::from(self.validate(data))
    }

    /// Walk the field table against an object found at `base`
    pub(crate) fn check_at(
        &self,
        data: &Value,
        base: &FieldPath,
    ) -> std::result::Result<(), ValidationError> {
        let Some(object) = data.as_object() else {
            let description = format!("a {} object", self.name);
            return Err(ValidationError::type_mismatch(
                base.clone(),
                "object",
                data,
                &description,
            ));
        };

        if self.deny_unknown_fields {
            if let Some(key) = object.keys().find(|key| self.field(key).is_none()) {
                let err = ValidationError::unexpected(base.field(key.as_str()));
                trace!(schema = %self.name, path = %err.path, "undeclared field");
                return Err(err);
            }
        }

        for field in &self.fields {
            let path = base.field(field.name.as_str());
            let value = match object.get(&field.name) {
                Some(Value::Null) | None if !field.required => continue,
                Some(value) => value,
                None => {
                    trace!(schema = %self.name, path = %path, "missing field");
                    return Err(ValidationError::missing(path));
                }
            };
            if let Err(err) = field.rule.check(value, &path) {
                trace!(schema = %self.name, path = %err.path, kind = ?err.kind, "field rejected");
                return Err(err);
            }
        }
        Ok(())
    }

    /// Example object using the thread-local RNG
    pub fn example(&self) -> Value {
        self.example_with_rng(&mut rand::thread_rng())
    }

    /// Reproducible example object
    pub fn example_seeded(&self, seed: u64) -> Value {
        self.example_with_rng(&mut StdRng::seed_from_u64(seed))
    }

    /// Example object with keys in declaration order and overrides applied
    pub fn example_with_rng(&self, rng: &mut dyn RngCore) -> Value {
        let mut example = self.generated_example(rng);
        for (path, value) in &self.example_overrides {
            // Unreachable paths were rejected by `build`; a differently
            // shaped example leaves the generated value in place
            if let Err(reason) = apply_override(&mut example, path, value.clone()) {
                trace!(schema = %self.name, path = %path, %reason, "override skipped");
            }
        }
        example
    }

    fn generated_example(&self, rng: &mut dyn RngCore) -> Value {
        let mut object = Map::new();
        for field in &self.fields {
            object.insert(field.name.clone(), field.rule.example(rng));
        }
        Value::Object(object)
    }

    /// Apply every override to the seed-0 example and validate the result
    fn check_overrides(&self) -> Result<()> {
        if self.example_overrides.is_empty() {
            return Ok(());
        }
        let invalid = |path: &str, reason: String| SchemaError::InvalidOverride {
            schema: self.name.clone(),
            path: path.to_string(),
            reason,
        };

        let mut example = self.generated_example(&mut StdRng::seed_from_u64(0));
        for (path, value) in &self.example_overrides {
            apply_override(&mut example, path, value.clone())
                .map_err(|reason| invalid(path.as_str(), reason))?;
        }
        self.validate(&example).map_err(|err| {
            let paths: Vec<&str> = self.example_overrides.iter().map(|(p, _)| p.as_str()).collect();
            invalid(&paths.join(", "), err.actual)
        })
    }

    /// The generated example followed by the hand-written ones
    pub fn all_examples(&self, rng: &mut dyn RngCore) -> Vec<Value> {
        let mut examples = Vec::with_capacity(1 + self.additional_examples.len());
        examples.push(self.example_with_rng(rng));
        examples.extend(self.additional_examples.iter().cloned());
        examples
    }
}

/// Assign `value` at a dot-separated path
///
/// Segments name object keys, or list positions when the target is a list.
/// Missing object keys on the way are created as objects. A segment that
/// lands on a scalar or past the end of a list is an error and nothing is
/// written.
fn apply_override(target: &mut Value, path: &str, value: Value) -> std::result::Result<(), String> {
    let (head, tail) = match path.split_once('.') {
        Some((head, tail)) => (head, Some(tail)),
        None => (path, None),
    };
    match target {
        Value::Object(object) => match tail {
            None => {
                object.insert(head.to_string(), value);
                Ok(())
            }
            Some(rest) => {
                let child = object
                    .entry(head.to_string())
                    .or_insert_with(|| Value::Object(Map::new()));
                apply_override(child, rest, value)
            }
        },
        Value::Array(items) => {
            let len = items.len();
            let slot = head
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get_mut(index))
                .ok_or_else(|| format!("'{}' is not a position in a list of length {}", head, len))?;
            match tail {
                None => {
                    *slot = value;
                    Ok(())
                }
                Some(rest) => apply_override(slot, rest, value),
            }
        }
        other => Err(format!(
            "'{}' cannot be reached through a {}",
            head,
            value_kind(other)
        )),
    }
}

/// Incremental schema definition
///
/// ```
/// use pactum_core::rules::{BoundedInt, OneOf};
/// use pactum_core::Schema;
///
/// let schema = Schema::builder("Pick")
///     .field("x", BoundedInt::new(20, 100).unwrap())
///     .field("fav", OneOf::new(["red", "green"]).unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     schema.rule_lines(),
///     vec![
///         "- x must be a integer between 20 and 100".to_string(),
///         "- fav must be a one of 'red', 'green'".to_string(),
///     ]
/// );
/// ```
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    header: Option<String>,
    preamble: Option<String>,
    fields: Vec<FieldDescriptor>,
    deny_unknown_fields: bool,
    example_overrides: Vec<(String, Value)>,
    additional_examples: Vec<Value>,
    resolver: TypeResolver,
    deferred: Option<SchemaError>,
}

impl SchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            header: None,
            preamble: None,
            fields: Vec::new(),
            deny_unknown_fields: false,
            example_overrides: Vec::new(),
            additional_examples: Vec::new(),
            resolver: TypeResolver::new(),
            deferred: None,
        }
    }

    /// Use `resolver` for subsequent [`declare`](Self::declare) calls
    pub fn resolver(mut self, resolver: TypeResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Add a required field checked by `rule`
    pub fn field<R: Rule + 'static>(self, name: impl Into<String>, rule: R) -> Self {
        self.field_ref(name, Arc::new(rule))
    }

    /// Add a required field from an already shared rule
    pub fn field_ref(mut self, name: impl Into<String>, rule: RuleRef) -> Self {
        self.fields.push(FieldDescriptor::new(name, rule));
        self
    }

    /// Add a field that may be absent or null
    pub fn optional_field<R: Rule + 'static>(mut self, name: impl Into<String>, rule: R) -> Self {
        let mut descriptor = FieldDescriptor::new(name, Arc::new(rule));
        descriptor.required = false;
        self.fields.push(descriptor);
        self
    }

    /// Add a required field from a type declaration
    ///
    /// Resolution errors are kept and returned by [`build`](Self::build).
    pub fn declare(self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.declare_field(name, &field_type, true)
    }

    pub(crate) fn declare_field(
        mut self,
        name: impl Into<String>,
        field_type: &FieldType,
        required: bool,
    ) -> Self {
        match self.resolver.resolve(field_type) {
            Ok(rule) => {
                let mut descriptor = FieldDescriptor::new(name, rule);
                descriptor.required = required;
                self.fields.push(descriptor);
            }
            Err(err) => {
                if self.deferred.is_none() {
                    self.deferred = Some(err);
                }
            }
        }
        self
    }

    /// Attach a note to the most recently added field
    pub fn note(mut self, note: impl Into<String>) -> Self {
        if let Some(field) = self.fields.last_mut() {
            field.note = Some(note.into());
        }
        self
    }

    /// Short title rendered on the prompt's first line
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Free text placed before the instruction block
    pub fn preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = Some(preamble.into());
        self
    }

    /// Reject keys that no field declares
    pub fn deny_unknown_fields(mut self) -> Self {
        self.deny_unknown_fields = true;
        self
    }

    /// Pin part of the generated example, e.g. `("address.zip", "10115")`
    pub fn example_override(mut self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.example_overrides.push((path.into(), value.into()));
        self
    }

    /// Add a hand-written example shown after the generated one
    pub fn additional_example(mut self, example: impl Into<Value>) -> Self {
        self.additional_examples.push(example.into());
        self
    }

    /// Finish the schema
    ///
    /// Fails on deferred resolution errors and duplicate field names. The
    /// example overrides and additional examples must also pass the
    /// schema's own validation.
    pub fn build(self) -> Result<Schema> {
        if let Some(err) = self.deferred {
            return Err(err);
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    schema: self.name,
                    field: field.name.clone(),
                });
            }
        }

        let schema = Schema {
            name: self.name,
            header: self.header,
            preamble: self.preamble,
            fields: self.fields,
            deny_unknown_fields: self.deny_unknown_fields,
            example_overrides: self.example_overrides,
            additional_examples: self.additional_examples,
        };

        schema.check_overrides()?;

        for (i, example) in schema.additional_examples.iter().enumerate() {
            if let Err(err) = schema.validate(example) {
                return Err(SchemaError::InvalidExample {
                    schema: schema.name.clone(),
                    index: i + 1,
                    reason: err.actual,
                });
            }
        }

        debug!(
            schema = %schema.name,
            fields = schema.fields.len(),
            examples = schema.additional_examples.len(),
            "schema built"
        );
        Ok(schema)
    }
}
