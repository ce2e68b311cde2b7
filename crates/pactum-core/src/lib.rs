//! Pactum Core - typed data contracts for LLM output
//!
//! This crate turns a declared contract (an ordered table of field names and
//! rules) into two artifacts: a natural-language prompt telling a model which
//! JSON object to produce, and a validator that checks the object it returns.
//!
//! # Main Components
//!
//! - **Rules**: the [`Rule`] trait and the built-in rules in [`rules`]
//! - **Resolver**: [`FieldType`] declarations resolved into rules by [`TypeResolver`]
//! - **Schema**: [`Schema`] with prompt rendering and fail-fast validation
//! - **Declarations**: YAML/JSON schema tables in [`declaration`]
//!
//! # Example
//!
//! ```
//! use pactum_core::{FieldType, Schema, Verdict};
//! use serde_json::json;
//!
//! let schema = Schema::builder("Person")
//!     .declare("name", FieldType::String)
//!     .declare("index", FieldType::Integer)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schema.validate_with_error(&json!({"name": "a", "index": 5})), Verdict::Valid);
//! assert_eq!(
//!     schema.validate_with_error(&json!({"index": 5})).messages(),
//!     Some(("\"name\" is missing.", "\"name\" must be present."))
//! );
//! println!("{}", schema.prompt_seeded(0));
//! ```
//!
//! Copyright (c) 2025 Pactum Team
//! Licensed under the Apache-2.0 license

pub mod declaration;
pub mod error;
pub mod path;
pub mod resolver;
pub mod rule;
pub mod rules;
pub mod schema;
pub mod validation;

#[cfg(test)]
mod proptest_strategies;

pub use declaration::{FieldDeclaration, Format, SchemaDeclaration};
pub use error::{Result, SchemaError};
pub use path::{FieldPath, PathSegment};
pub use resolver::{FieldType, NumericKind, RuleRegistry, TypeResolver};
pub use rule::{Rule, RuleRef};
pub use schema::{FieldDescriptor, Schema, SchemaBuilder};
pub use validation::{value_kind, ValidationError, ValidationErrorKind, Verdict};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
