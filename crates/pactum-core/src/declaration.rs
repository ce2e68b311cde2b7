//! Declarative schema tables
//!
//! A [`SchemaDeclaration`] describes a schema as data. Each field carries
//! its [`FieldType`] inline:
//!
//! ```yaml
//! name: Pick
//! header: Colour survey
//! fields:
//!   - name: x
//!     type: range
//!     number: integer
//!     low: 20
//!     high: 100
//!   - name: fav
//!     type: one_of
//!     values: [red, green]
//!     note: pick one
//!   - name: comment
//!     type: string
//!     required: false
//! ```
//!
//! Copyright (c) 2025 Pactum Team
//! Licensed under the Apache-2.0 license

use crate::error::{Result, SchemaError};
use crate::resolver::{FieldType, TypeResolver};
use crate::schema::Schema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Declaration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => Err(SchemaError::declaration(format!(
                "unsupported declaration format: {}",
                path.display()
            ))),
        }
    }

    /// Parse `content` in this format into any deserializable value
    pub fn parse<T: serde::de::DeserializeOwned>(self, content: &str) -> Result<T> {
        match self {
            Format::Yaml => Ok(serde_yaml::from_str(content)?),
            Format::Json => Ok(serde_json::from_str(content)?),
        }
    }
}

fn default_required() -> bool {
    true
}

/// One field of a declaration table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDeclaration {
    pub name: String,
    #[serde(flatten)]
    pub field_type: FieldType,
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl FieldDeclaration {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: true,
            note: None,
        }
    }
}

/// A schema described as data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDeclaration {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preamble: Option<String>,
    pub fields: Vec<FieldDeclaration>,
    #[serde(default)]
    pub deny_unknown_fields: bool,
    /// Dot path to value, applied to the generated example in order
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub example_overrides: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_examples: Vec<Value>,
}

impl SchemaDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            header: None,
            preamble: None,
            fields: Vec::new(),
            deny_unknown_fields: false,
            example_overrides: Map::new(),
            additional_examples: Vec::new(),
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Format::Yaml.parse(content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Format::Json.parse(content)
    }

    /// Load a declaration file, picking the format from its extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::Declaration {
            message: format!("failed to read {}: {}", path.display(), e),
            source: Some(Box::new(e)),
        })?;
        format.parse(&content)
    }

    /// Build the schema with the default resolver
    pub fn to_schema(&self) -> Result<Schema> {
        self.to_schema_with(&TypeResolver::new())
    }

    /// Build the schema, resolving field types (and named rules) with `resolver`
    pub fn to_schema_with(&self, resolver: &TypeResolver) -> Result<Schema> {
        let mut builder = Schema::builder(self.name.as_str()).resolver(resolver.clone());
        if let Some(header) = &self.header {
            builder = builder.header(header.as_str());
        }
        if let Some(preamble) = &self.preamble {
            builder = builder.preamble(preamble.as_str());
        }
        for field in &self.fields {
            builder = builder.declare_field(field.name.as_str(), &field.field_type, field.required);
            if let Some(note) = &field.note {
                builder = builder.note(note.as_str());
            }
        }
        if self.deny_unknown_fields {
            builder = builder.deny_unknown_fields();
        }
        for (path, value) in &self.example_overrides {
            builder = builder.example_override(path.as_str(), value.clone());
        }
        for example in &self.additional_examples {
            builder = builder.additional_example(example.clone());
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PICK: &str = r#"
name: Pick
header: Colour survey
fields:
  - name: x
    type: range
    number: integer
    low: 20
    high: 100
  - name: fav
    type: one_of
    values: [red, green]
    note: pick one
  - name: comment
    type: string
    required: false
"#;

    #[test]
    fn test_yaml_declaration() {
        let schema = SchemaDeclaration::from_yaml_str(PICK)
            .unwrap()
            .to_schema()
            .unwrap();
        assert_eq!(schema.name(), "Pick");
        assert_eq!(schema.header(), Some("Colour survey"));
        assert_eq!(
            schema.rule_lines(),
            vec![
                "- x must be a integer between 20 and 100",
                "- fav must be a one of 'red', 'green'  – pick one",
                "- comment must be a string (optional)",
            ]
        );
        assert!(schema.validate(&json!({"x": 20, "fav": "red"})).is_ok());
    }

    #[test]
    fn test_json_declaration_with_nested_object() {
        let content = json!({
            "name": "Order",
            "deny_unknown_fields": true,
            "fields": [
                {"name": "id", "type": "rule", "rule": "natural_number"},
                {"name": "lines", "type": "list", "items": {
                    "type": "object",
                    "schema": {
                        "name": "Line",
                        "fields": [
                            {"name": "sku", "type": "pattern", "regex": "[A-Z]{3}-\\d+", "example": "ABC-1"},
                            {"name": "qty", "type": "range", "number": "integer", "low": 1, "high": 99}
                        ]
                    }
                }}
            ],
            "example_overrides": {"id": 7}
        })
        .to_string();
        let schema = SchemaDeclaration::from_json_str(&content)
            .unwrap()
            .to_schema()
            .unwrap();

        let example = schema.example_seeded(3);
        assert_eq!(example["id"], json!(7));
        assert!(schema.validate(&example).is_ok());

        let err = schema
            .validate(&json!({"id": 1, "lines": [{"sku": "ABC-1", "qty": 0}]}))
            .unwrap_err();
        assert_eq!(err.path.to_string(), "lines[0].qty");

        let err = schema
            .validate(&json!({"id": 1, "lines": [], "extra": 1}))
            .unwrap_err();
        assert_eq!(err.actual, "\"extra\" is not a valid field.");
    }

    #[test]
    fn test_unknown_type_is_a_declaration_error() {
        let err = SchemaDeclaration::from_yaml_str("name: X\nfields:\n  - name: a\n    type: date\n")
            .unwrap_err();
        assert!(matches!(err, SchemaError::Declaration { .. }));
    }

    #[test]
    fn test_resolution_errors_surface_from_to_schema() {
        let declaration = SchemaDeclaration::from_yaml_str(
            "name: X\nfields:\n  - name: a\n    type: one_of\n    values: []\n",
        )
        .unwrap();
        assert!(matches!(
            declaration.to_schema(),
            Err(SchemaError::EmptyEnumeration)
        ));
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_path(Path::new("a.YML")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("a.json")).unwrap(), Format::Json);
        assert!(Format::from_path(Path::new("a.toml")).is_err());
    }

    #[test]
    fn test_round_trips_through_serde() {
        let declaration = SchemaDeclaration::from_yaml_str(PICK).unwrap();
        let yaml = serde_yaml::to_string(&declaration).unwrap();
        let again = SchemaDeclaration::from_yaml_str(&yaml).unwrap();
        assert_eq!(again.fields.len(), 3);
        assert!(!again.fields[2].required);
    }
}
