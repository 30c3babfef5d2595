//! Containers a `dive` field may traverse.
//!
//! A `dive` field strips to a record in at most three steps: one optional
//! indirection (`Option`, `Box`), one container (`Vec`, `VecDeque`,
//! `HashMap`, `BTreeMap`) and one more optional indirection around each
//! element. [`Dive`] is implemented for each of those layers and for every
//! record type (by the derive).
//!
//! ## Map Keys Are Not Walked
//!
//! For map containers only **values** are visited. Keys are left untouched to
//! preserve hashing/ordering invariants.

use std::ops::ControlFlow;

use super::{Record, RecordType};

mod maps;
mod sequences;
mod wrappers;


/// Container shape of a `dive` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Container {
    /// A single (possibly optional or boxed) record.
    None,
    /// An ordered sequence of records.
    Sequence,
    /// A key to record map.
    Map,
}

/// How a `dive` field reaches its nested record type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    container: Container,
    record: RecordType,
    depth: u8,
}

impl Layout {
    /// Layout of a record held directly.
    pub fn record<T: Record>() -> Self {
        Self {
            container: Container::None,
            record: RecordType::of::<T>(),
            depth: 0,
        }
    }

    /// Wraps an element layout into a container.
    pub fn contained(element: Self, container: Container) -> Self {
        Self {
            container,
            record: element.record,
            depth: element.depth.saturating_add(1),
        }
    }

    /// The outermost container shape.
    pub fn container(&self) -> Container {
        self.container
    }

    /// The nested record type.
    pub fn record_type(&self) -> RecordType {
        self.record
    }

    /// Returns `true` for containers of containers, e.g. `Vec<Vec<T>>`.
    pub fn is_nested_container(&self) -> bool {
        self.depth > 1
    }
}

/// A value holding zero or more records of one type.
///
/// Implemented by `#[derive(Sensitive)]` for the record itself, and here for
/// `Option`, `Box`, `Vec`, `VecDeque`, `HashMap` and `BTreeMap`.
pub trait Dive: 'static {
    /// Describes the container shape and the nested record type.
    fn layout() -> Layout
    where
        Self: Sized;

    /// Returns `true` for absent values: `None`, empty collections.
    fn is_absent(&self) -> bool;

    /// Returns the record when the value holds exactly one, directly or
    /// through an optional indirection.
    fn as_record(&self) -> Option<&dyn Record>;

    /// Mutable counterpart of [`Dive::as_record`].
    fn as_record_mut(&mut self) -> Option<&mut dyn Record>;

    /// Visits every record held by the value, in container order, until `f`
    /// breaks.
    fn visit(&self, f: &mut dyn FnMut(&dyn Record) -> ControlFlow<()>) -> ControlFlow<()>;

    /// Mutable counterpart of [`Dive::visit`].
    fn visit_mut(
        &mut self,
        f: &mut dyn FnMut(&mut dyn Record) -> ControlFlow<()>,
    ) -> ControlFlow<()>;
}
