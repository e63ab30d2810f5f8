//! Explicit record-shape descriptors.
//!
//! A [`Shape`] describes a record without a Rust type behind it: its name and
//! an ordered list of fields, each either a scalar with a [`ScalarKind`] or a
//! nested record with its own shape. Shapes drive
//! [`decode_record`](crate::decode_record).
//!
//! ```rust
//! use serde_qdn::{Shape, ScalarKind};
//!
//! let point = Shape::new("Point")
//!     .with_scalar("X", ScalarKind::I32)
//!     .with_scalar("Y", ScalarKind::I32);
//! let line = Shape::new("Line")
//!     .with_record("Start", point.clone())
//!     .with_record("End", point);
//!
//! assert_eq!(line.fields().len(), 2);
//! assert_eq!(line.depth(), 2);
//! ```
//!
//! The [`shape!`](crate::shape!) macro builds the same descriptors with less noise.

use crate::scalar::ScalarKind;
use std::collections::HashSet;

/// What a field holds.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldKind {
    Scalar(ScalarKind),
    Record(Shape),
}

/// One declared field of a record.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldShape {
    pub name: String,
    pub kind: FieldKind,
}

/// The shape of a record: its name and its fields in declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    name: String,
    fields: Vec<FieldShape>,
}

impl Shape {
    /// Creates a shape with no fields yet.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Shape {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a scalar field.
    #[must_use]
    pub fn with_scalar(mut self, name: impl Into<String>, kind: ScalarKind) -> Self {
        self.fields.push(FieldShape {
            name: name.into(),
            kind: FieldKind::Scalar(kind),
        });
        self
    }

    /// Appends a nested record field.
    #[must_use]
    pub fn with_record(mut self, name: impl Into<String>, shape: Shape) -> Self {
        self.fields.push(FieldShape {
            name: name.into(),
            kind: FieldKind::Record(shape),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldShape] {
        &self.fields
    }

    /// The first field name declared twice, if any.
    ///
    /// Decoded fields are stored by name, so a shape with a repeated name
    /// cannot be decoded without losing a field.
    pub fn duplicate_field(&self) -> Option<&str> {
        let mut seen = HashSet::with_capacity(self.fields.len());
        self.fields
            .iter()
            .map(|field| field.name.as_str())
            .find(|name| !seen.insert(*name))
    }

    /// Number of record levels, this one included.
    pub fn depth(&self) -> usize {
        1 + self
            .fields
            .iter()
            .filter_map(|field| match &field.kind {
                FieldKind::Record(shape) => Some(shape.depth()),
                FieldKind::Scalar(_) => None,
            })
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_keep_declaration_order() {
        let shape = Shape::new("Config")
            .with_scalar("port", ScalarKind::U16)
            .with_scalar("host", ScalarKind::String)
            .with_scalar("debug", ScalarKind::Bool);

        let names: Vec<_> = shape.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["port", "host", "debug"]);
        assert_eq!(shape.depth(), 1);
    }

    #[test]
    fn test_depth_follows_deepest_branch() {
        let leaf = Shape::new("Leaf").with_scalar("v", ScalarKind::I8);
        let mid = Shape::new("Mid").with_record("leaf", leaf.clone());
        let root = Shape::new("Root")
            .with_record("leaf", leaf)
            .with_record("mid", mid);
        assert_eq!(root.depth(), 3);
    }

    #[test]
    fn test_duplicate_field_names() {
        let point = Shape::new("Point").with_scalar("X", ScalarKind::I32);
        assert_eq!(point.duplicate_field(), None);

        let line = Shape::new("Line")
            .with_record("p", point.clone())
            .with_scalar("w", ScalarKind::U8)
            .with_record("p", point);
        assert_eq!(line.duplicate_field(), Some("p"));
    }
}
