//! Static field lists registered by record types.

use std::any::Any;

use super::{Dive, Layout, ValueType};

/// A raw annotation attached to a field, e.g. `sensitive = "data,kind=email"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Annotation {
    /// The annotation identifier (`sensitive`, `pii`, `sens`, ...).
    pub id: &'static str,
    /// The unparsed annotation body.
    pub raw: &'static str,
}

/// Static description of one field of a record type.
#[derive(Clone, Debug)]
pub struct FieldSchema {
    name: &'static str,
    value: ValueType,
    layout: Option<Layout>,
    annotations: Vec<Annotation>,
}

impl FieldSchema {
    /// Describes a plain field of type `T`.
    pub fn value<T: Any>(name: &'static str) -> Self {
        Self {
            name,
            value: ValueType::of::<T>(),
            layout: None,
            annotations: Vec::new(),
        }
    }

    /// Describes a field that can be dived into: a record, an optional or
    /// boxed record, or a sequence or map of those.
    pub fn nested<D: Dive>(name: &'static str) -> Self {
        Self {
            name,
            value: ValueType::of::<D>(),
            layout: Some(D::layout()),
            annotations: Vec::new(),
        }
    }

    /// Attaches a raw annotation found under identifier `id`.
    #[must_use]
    pub fn tag(mut self, id: &'static str, raw: &'static str) -> Self {
        self.annotations.push(Annotation { id, raw });
        self
    }

    /// The field name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The declared field type.
    pub fn value_type(&self) -> ValueType {
        self.value
    }

    /// The container layout, for fields declared with [`FieldSchema::nested`].
    pub fn layout(&self) -> Option<Layout> {
        self.layout
    }

    /// The raw annotations in declaration order.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Hidden fields (leading underscore) are never scanned, annotated or not.
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('_')
    }
}

/// Static field list of a record type.
#[derive(Clone, Debug)]
pub struct Schema {
    name: &'static str,
    fields: Vec<FieldSchema>,
}

impl Schema {
    /// Starts an empty schema for the record named `name`.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    /// Appends a field; its index is its position in the schema.
    #[must_use]
    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// The record name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The fields in declaration order.
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }
}
