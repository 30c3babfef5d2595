//! Immutable traversal plans built by the scanner.

use crate::{
    record::{Container, RecordType, ValueType},
    tag::{Role, TagOptions},
    text::TextSlot,
};

/// Scanned metadata of one annotated field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub(crate) name: &'static str,
    pub(crate) index: usize,
    pub(crate) role: Role,
    pub(crate) value: ValueType,
    pub(crate) options: TagOptions,
    pub(crate) container: Container,
    pub(crate) nested: Option<RecordType>,
    pub(crate) text: Option<TextSlot>,
}

impl FieldDescriptor {
    /// The field name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Position of the field in the record schema.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The annotated role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// The declared field type.
    pub fn value_type(&self) -> ValueType {
        self.value
    }

    /// The `kind` option, empty when unset.
    pub fn kind(&self) -> &str {
        self.options.get(crate::tag::OPTION_KIND)
    }

    /// The `prefix` option, empty when unset.
    pub fn prefix(&self) -> &str {
        self.options.get(crate::tag::OPTION_PREFIX)
    }

    /// All annotation options.
    pub fn options(&self) -> &TagOptions {
        &self.options
    }

    /// Container shape of a `dive` field; [`Container::None`] otherwise.
    pub fn container(&self) -> Container {
        self.container
    }

    /// The nested record type of a `dive` field.
    ///
    /// The nested descriptor is owned by the scanner cache and looked up by
    /// this identity.
    pub fn nested(&self) -> Option<RecordType> {
        self.nested
    }
}

/// Cached traversal plan of a record type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub(crate) record: RecordType,
    pub(crate) name: &'static str,
    pub(crate) has_sensitive: bool,
    pub(crate) subject: Option<FieldDescriptor>,
    pub(crate) fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    /// The record type the descriptor was built from.
    pub fn record_type(&self) -> RecordType {
        self.record
    }

    /// The record name as registered in its schema.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the type declares any `data` or `dive` field.
    pub fn has_sensitive(&self) -> bool {
        self.has_sensitive
    }

    /// The `subjectID` field, if any.
    pub fn subject(&self) -> Option<&FieldDescriptor> {
        self.subject.as_ref()
    }

    /// The `data` and `dive` fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }
}
