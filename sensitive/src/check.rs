//! Existence check: does a record type carry sensitive data?

use std::any::type_name;

use crate::{
    error::{Error, Result},
    record::{Container, Dive},
    scan::Scanner,
};

impl Scanner {
    /// Returns whether `T` declares any `data` or `dive` field.
    ///
    /// Only the type is scanned; no instance is needed. `T` may be a record or
    /// an optional or boxed record.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedType`] when `T` is a collection, and the scan
    /// errors of the record type.
    pub fn check<T: Dive>(&self) -> Result<bool> {
        let layout = T::layout();
        if layout.container() != Container::None {
            return Err(Error::UnsupportedType(type_name::<T>().to_string()));
        }
        Ok(self.scan_type(layout.record_type())?.has_sensitive())
    }
}

/// Returns whether `T` declares any `data` or `dive` field, using the global
/// scanner.
///
/// ```ignore
/// use sensitive::Sensitive;
///
/// #[derive(Sensitive)]
/// struct Contact {
///     #[sensitive("data,kind=email")]
///     email: String,
/// }
///
/// assert!(sensitive::check::<Contact>()?);
/// ```
pub fn check<T: Dive>() -> Result<bool> {
    Scanner::global().check::<T>()
}
