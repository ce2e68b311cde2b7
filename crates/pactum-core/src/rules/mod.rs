//! Built-in rules
//!
//! Primitive and bounded rules check a single JSON atom. Composite rules
//! hold other rules behind [`RuleRef`](crate::RuleRef) handles and point
//! their errors at the failing element.
//!
//! Copyright (c) 2025 Pactum Team
//! Licensed under the Apache-2.0 license

pub mod composite;
pub mod excerpt;
pub mod object;
pub mod one_of;
pub mod pattern;
pub mod primitive;
pub mod range;

pub use composite::{AnyOf, SequenceOf, TupleOf};
pub use excerpt::Excerpt;
pub use object::ObjectRule;
pub use one_of::OneOf;
pub use pattern::Pattern;
pub use primitive::{Generic, PrimitiveKind};
pub use range::{BoundedFloat, BoundedInt, NaturalNumber};
