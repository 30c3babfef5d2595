//! Record metadata and field access.
//!
//! Rust has no runtime reflection, so every record type registers itself by
//! implementing [`Record`], usually through `#[derive(Sensitive)]`:
//!
//! - **`schema`**: the static field list with raw annotations (see [`Schema`])
//! - **field access**: [`FieldRef`] / [`FieldMut`] views of annotated fields
//! - **`containers`**: the [`Dive`] trait, implemented for records and for
//!   `Option`, `Box`, sequences and maps of records
//!
//! Annotations are kept as raw strings here. Parsing and validation happen in
//! the scanner, once per type.

use std::{
    any::{Any, TypeId, type_name},
    fmt,
    hash::{Hash, Hasher},
};

mod containers;
mod schema;

pub use containers::{Container, Dive, Layout};
pub use schema::{Annotation, FieldSchema, Schema};

/// A record type whose fields can be scanned and walked.
///
/// Implemented by `#[derive(Sensitive)]`. A manual implementation returns the
/// same field indices from [`Record::field`] / [`Record::field_mut`] as the
/// position of the field in [`Record::schema`]:
///
/// ```
/// use sensitive::{FieldMut, FieldRef, FieldSchema, Record, Schema};
///
/// struct Account {
///     id: String,
///     email: String,
/// }
///
/// impl Record for Account {
///     fn schema() -> Schema {
///         Schema::new("Account")
///             .field(FieldSchema::value::<String>("id").tag("sensitive", "subjectID"))
///             .field(FieldSchema::value::<String>("email").tag("sensitive", "data,kind=email"))
///     }
///
///     fn field(&self, index: usize) -> Option<FieldRef<'_>> {
///         match index {
///             0 => Some(FieldRef::Value(&self.id)),
///             1 => Some(FieldRef::Value(&self.email)),
///             _ => None,
///         }
///     }
///
///     fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
///         match index {
///             0 => Some(FieldMut::Value(&mut self.id)),
///             1 => Some(FieldMut::Value(&mut self.email)),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Record: 'static {
    /// Returns the static field list of the type.
    fn schema() -> Schema
    where
        Self: Sized;

    /// Returns a shared view of the field at `index`.
    ///
    /// `None` means the field is not exposed to the walker.
    fn field(&self, index: usize) -> Option<FieldRef<'_>>;

    /// Returns a mutable view of the field at `index`.
    ///
    /// `None` means the field cannot be mutated in place and is skipped.
    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>>;
}

/// Shared view of a record field.
pub enum FieldRef<'a> {
    /// A plain value (`data` and `subjectID` fields).
    Value(&'a dyn Any),
    /// A nested record, optional record or collection of records (`dive`).
    Nested(&'a dyn Dive),
}

/// Mutable view of a record field.
pub enum FieldMut<'a> {
    /// A plain value (`data` and `subjectID` fields).
    Value(&'a mut dyn Any),
    /// A nested record, optional record or collection of records (`dive`).
    Nested(&'a mut dyn Dive),
}

/// Identity of a record type: its `TypeId`, name and schema constructor.
///
/// Equality and hashing use the `TypeId` only.
#[derive(Clone, Copy)]
pub struct RecordType {
    id: TypeId,
    name: &'static str,
    schema: fn() -> Schema,
}

impl RecordType {
    /// Returns the identity of `T`.
    pub fn of<T: Record>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            schema: T::schema,
        }
    }

    /// The `TypeId` used as cache and cycle-detection key.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The fully qualified type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Builds the schema of the type.
    pub fn schema(&self) -> Schema {
        (self.schema)()
    }
}

impl PartialEq for RecordType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for RecordType {}

impl Hash for RecordType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RecordType").field(&self.name).finish()
    }
}

/// Declared type of a field.
#[derive(Clone, Copy)]
pub struct ValueType {
    id: TypeId,
    name: &'static str,
}

impl ValueType {
    /// Returns the declared type `T`.
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// The `TypeId` of the declared type.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The declared type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if the declared type is `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for ValueType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ValueType {}

impl fmt::Debug for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
