//! Locations inside a validated document
//!
//! A [`FieldPath`] is empty at the document root and grows by one segment
//! per nesting level: a field name when entering an object, an index when
//! entering an array. It renders as `a.y[1]`.
//!
//! Copyright (c) 2025 Pactum Team
//! Licensed under the Apache-2.0 license

use serde::{Serialize, Serializer};
use std::fmt;

/// One step into a nested value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Key of an object member
    Field(String),
    /// Position inside an array
    Index(usize),
}

/// Ordered sequence of segments from the document root
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The document root
    pub fn root() -> Self {
        Self::default()
    }

    /// Child path for an object member
    pub fn field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Child path for an array element
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// True when the innermost segment is an array position
    pub fn ends_in_index(&self) -> bool {
        matches!(self.last(), Some(PathSegment::Index(_)))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "$");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => write!(f, "{}", name)?,
                PathSegment::Field(name) => write!(f, ".{}", name)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_renders_as_dollar() {
        let path = FieldPath::root();
        assert!(path.is_root());
        assert_eq!(path.to_string(), "$");
    }

    #[test]
    fn test_nested_path_rendering() {
        let path = FieldPath::root().field("a").field("y").index(1);
        assert_eq!(path.to_string(), "a.y[1]");
        assert_eq!(path.len(), 3);
        assert!(path.ends_in_index());
    }

    #[test]
    fn test_index_directly_under_field() {
        let path = FieldPath::root().field("coords").index(0).index(2);
        assert_eq!(path.to_string(), "coords[0][2]");
    }

    #[test]
    fn test_serializes_as_string() {
        let path = FieldPath::root().field("x");
        assert_eq!(serde_json::to_value(&path).unwrap(), serde_json::json!("x"));
    }
}
