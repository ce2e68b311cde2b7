//! Error types for the Pactum core library
//!
//! Schema-definition problems (inverted bounds, empty enumerations, unknown
//! rule names, ...) are configuration errors: they surface as [`SchemaError`]
//! when a rule or schema is constructed, never while validating data.
//! Validation failures are ordinary values, see [`crate::validation`].
//!
//! Copyright (c) 2025 Pactum Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

/// Errors raised while defining rules and schemas
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A bounded range whose lower bound exceeds its upper bound
    #[error("Inverted bounds: low ({low}) must not exceed high ({high})")]
    InvertedBounds { low: String, high: String },

    /// A float bound that is NaN or infinite
    #[error("Non-finite bound: {value}")]
    NonFiniteBound { value: f64 },

    /// An integer range declared with fractional bounds
    #[error("Integer range bounds must be integral, got {value}")]
    NonIntegralBound { value: String },

    /// A one-of rule without any allowed value
    #[error("Enumeration must allow at least one value")]
    EmptyEnumeration,

    /// A one-of member that is an array or object
    #[error("Enumeration members must be atomic values, got {value}")]
    NonAtomicMember { value: String },

    /// A one-of member listed twice
    #[error("Enumeration member {value} is listed more than once")]
    DuplicateMember { value: String },

    /// A tuple rule without element rules
    #[error("Tuple must declare at least one element rule")]
    EmptyTuple,

    /// A union rule without alternatives
    #[error("Union must declare at least one alternative")]
    EmptyAlternatives,

    /// A pattern rule whose regex does not compile
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A pattern rule whose sample does not satisfy the pattern
    #[error("Sample '{sample}' does not match pattern '{pattern}'")]
    PatternSampleMismatch { pattern: String, sample: String },

    /// An excerpt rule whose source or parameters cannot accept any text
    #[error("Invalid excerpt rule: {reason}")]
    InvalidExcerpt { reason: String },

    /// A named rule that is not present in the registry
    #[error("Unknown rule '{name}' (registered: {available})")]
    UnknownRule { name: String, available: String },

    /// Two fields sharing one name in a schema
    #[error("Field '{field}' is declared more than once in schema '{schema}'")]
    DuplicateField { schema: String, field: String },

    /// A hand-written example that does not satisfy the schema
    #[error("Additional example #{index} for schema '{schema}' is invalid: {reason}")]
    InvalidExample {
        schema: String,
        index: usize,
        reason: String,
    },

    /// An example override that cannot be applied, or that breaks the example
    #[error("Example override '{path}' for schema '{schema}' is invalid: {reason}")]
    InvalidOverride {
        schema: String,
        path: String,
        reason: String,
    },

    /// A declaration table that could not be parsed
    #[error("Declaration error: {message}")]
    Declaration {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl SchemaError {
    /// Create a declaration error without an underlying cause
    pub fn declaration(message: impl Into<String>) -> Self {
        Self::Declaration {
            message: message.into(),
            source: None,
        }
    }

    /// Create an inverted-bounds error from any displayable bounds
    pub fn inverted<T: std::fmt::Display>(low: T, high: T) -> Self {
        Self::InvertedBounds {
            low: low.to_string(),
            high: high.to_string(),
        }
    }
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Declaration {
            message: format!("invalid JSON declaration: {}", err),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_yaml::Error> for SchemaError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Declaration {
            message: format!("invalid YAML declaration: {}", err),
            source: Some(Box::new(err)),
        }
    }
}

/// Convenience type alias for Results using [`SchemaError`]
pub type Result<T> = std::result::Result<T, SchemaError>;
