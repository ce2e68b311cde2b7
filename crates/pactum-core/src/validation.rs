//! Validation outcomes
//!
//! Validation is fail-fast: a schema reports at most one [`ValidationError`],
//! the first one met in declaration order. Every error carries the same two
//! strings, an `actual` description of what went wrong and an `expected`
//! description of what the contract requires. [`Verdict`] is the
//! caller-facing shape of a validation call and serializes to the literal
//! `[true]` / `[false, actual, expected]` tuples.
//!
//! Copyright (c) 2025 Pactum Team
//! Licensed under the Apache-2.0 license

use crate::path::FieldPath;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Classification of a validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// A required field is absent
    MissingField,
    /// A field that the schema does not declare
    UnexpectedField,
    /// Wrong primitive or container kind
    TypeMismatch,
    /// Numeric bound violated
    OutOfRange,
    /// Value outside an enumeration
    NotInSet,
    /// Tuple length differs from the declared arity
    ArityMismatch,
    /// String does not match a pattern rule
    PatternMismatch,
    /// No alternative of a union accepted the value
    NoAlternativeMatched,
    /// An opaque rule rejected an element of a sequence or tuple
    ElementInvalid,
    /// An opaque rule rejected a field value
    RuleViolation,
}

/// First violation found while validating a document
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub struct ValidationError {
    /// Where the violation occurred
    pub path: FieldPath,
    /// What kind of violation it is
    pub kind: ValidationErrorKind,
    /// Description of the offending value
    pub actual: String,
    /// Description of what the contract requires
    pub expected: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation error at '{}': {}", self.path, self.actual)?;
        write!(f, "\n  expected: {}", self.expected)
    }
}

impl ValidationError {
    pub fn new(
        kind: ValidationErrorKind,
        path: FieldPath,
        actual: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self {
            path,
            kind,
            actual: actual.into(),
            expected: expected.into(),
        }
    }

    /// A required field is absent
    pub fn missing(path: FieldPath) -> Self {
        let actual = format!("\"{}\" is missing.", path);
        let expected = format!("\"{}\" must be present.", path);
        Self::new(ValidationErrorKind::MissingField, path, actual, expected)
    }

    /// A key the schema does not declare
    pub fn unexpected(path: FieldPath) -> Self {
        let actual = format!("\"{}\" is not a valid field.", path);
        let expected = format!("\"{}\" is not expected here.", path);
        Self::new(ValidationErrorKind::UnexpectedField, path, actual, expected)
    }

    /// The value has the wrong kind, e.g. a string where a list is required
    pub fn type_mismatch(path: FieldPath, wanted: &str, value: &Value, description: &str) -> Self {
        let actual = format!("\"{}\" must be {}, got {}", path, wanted, value_kind(value));
        let expected = expectation(&path, description);
        Self::new(ValidationErrorKind::TypeMismatch, path, actual, expected)
    }

    pub fn out_of_range(path: FieldPath, value: &Value, description: &str) -> Self {
        let actual = format!("\"{}\" is out of range, got {}", path, value);
        let expected = expectation(&path, description);
        Self::new(ValidationErrorKind::OutOfRange, path, actual, expected)
    }

    pub fn not_in_set(path: FieldPath, value: &Value, description: &str) -> Self {
        let actual = format!("\"{}\" is not an allowed value, got {}", path, value);
        let expected = expectation(&path, description);
        Self::new(ValidationErrorKind::NotInSet, path, actual, expected)
    }

    pub fn arity_mismatch(path: FieldPath, wanted: usize, found: usize, description: &str) -> Self {
        let actual = format!("\"{}\" must have length {}, got {}", path, wanted, found);
        let expected = expectation(&path, description);
        Self::new(ValidationErrorKind::ArityMismatch, path, actual, expected)
    }

    pub fn pattern_mismatch(path: FieldPath, description: &str) -> Self {
        let actual = format!("\"{}\" does not match the required pattern.", path);
        let expected = expectation(&path, description);
        Self::new(ValidationErrorKind::PatternMismatch, path, actual, expected)
    }

    /// Every alternative of a union failed; `expectations` are theirs, in order
    pub fn no_alternative(path: FieldPath, expectations: &[String]) -> Self {
        let actual = format!("\"{}\" matches none of the allowed alternatives.", path);
        Self::new(
            ValidationErrorKind::NoAlternativeMatched,
            path,
            actual,
            expectations.join(" or "),
        )
    }

    /// An opaque rule said no
    ///
    /// Reported as [`ValidationErrorKind::ElementInvalid`] when the value sits
    /// directly inside a sequence or tuple.
    pub fn rule_violation(path: FieldPath, description: &str) -> Self {
        let kind = if path.ends_in_index() {
            ValidationErrorKind::ElementInvalid
        } else {
            ValidationErrorKind::RuleViolation
        };
        let actual = format!("\"{}\" is invalid.", path);
        let expected = expectation(&path, description);
        Self::new(kind, path, actual, expected)
    }
}

fn expectation(path: &FieldPath, description: &str) -> String {
    format!("\"{}\" must be {}", path, description)
}

/// Short kind name of a JSON value, as used in type-mismatch messages
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

/// Outcome of validating one document against a schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Every field is present and valid
    Valid,
    /// The first violation, as an (actual, expected) pair
    Invalid { actual: String, expected: String },
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }

    /// The (actual, expected) pair of a failed validation
    pub fn messages(&self) -> Option<(&str, &str)> {
        match self {
            Verdict::Valid => None,
            Verdict::Invalid { actual, expected } => Some((actual, expected)),
        }
    }
}

impl From<Result<(), ValidationError>> for Verdict {
    fn from(result: Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => Verdict::Valid,
            Err(error) => Verdict::Invalid {
                actual: error.actual,
                expected: error.expected,
            },
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Valid => write!(f, "(true,)"),
            Verdict::Invalid { actual, expected } => {
                write!(f, "(false, '{}', '{}')", actual, expected)
            }
        }
    }
}

impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Verdict::Valid => {
                let mut seq = serializer.serialize_seq(Some(1))?;
                seq.serialize_element(&true)?;
                seq.end()
            }
            Verdict::Invalid { actual, expected } => {
                let mut seq = serializer.serialize_seq(Some(3))?;
                seq.serialize_element(&false)?;
                seq.serialize_element(actual)?;
                seq.serialize_element(expected)?;
                seq.end()
            }
        }
    }
}
