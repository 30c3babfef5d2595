//! Instance walking: subject resolution and in-place replacement.
//!
//! An [`Accessor`] pairs one record value with its cached
//! [`TypeDescriptor`]. It is created per call by [`Scanner::scan_value`] and
//! never shared; the subject identifier it resolves is memoized on it.

use std::{any::type_name, fmt, ops::ControlFlow, sync::Arc};

use crate::{
    error::{Error, Result},
    record::{Container, Dive, FieldMut, FieldRef, Record},
    scan::{FieldDescriptor, Scanner, TypeDescriptor},
    tag::{Role, TagOptions},
    text::subject_text,
};

/// Context handed to a transformation callback for one `data` field.
#[derive(Clone, Copy, Debug)]
pub struct FieldReplace<'a> {
    /// The subject identifier resolved for the top-level record, if it has
    /// been resolved.
    pub subject_id: Option<&'a str>,
    /// The field name.
    pub name: &'static str,
    /// The declared field type.
    pub type_name: &'static str,
    /// The `kind` option, empty when unset.
    pub kind: &'a str,
    /// All annotation options of the field.
    pub options: &'a TagOptions,
}

impl<'a> FieldReplace<'a> {
    fn new(field: &'a FieldDescriptor, subject_id: Option<&'a str>) -> Self {
        Self {
            subject_id,
            name: field.name(),
            type_name: field.value_type().name(),
            kind: field.kind(),
            options: field.options(),
        }
    }
}

/// Per-call view of a record value and its descriptor.
pub struct Accessor<'v> {
    scanner: &'v Scanner,
    descriptor: Arc<TypeDescriptor>,
    value: &'v mut dyn Record,
    subject: Option<Option<String>>,
}

impl fmt::Debug for Accessor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("descriptor", &self.descriptor.name())
            .field("has_sensitive", &self.descriptor.has_sensitive())
            .field("subject", &self.subject)
            .finish_non_exhaustive()
    }
}

impl<'v> Accessor<'v> {
    /// Whether the record type declares any `data` or `dive` field.
    pub fn has_sensitive(&self) -> bool {
        self.descriptor.has_sensitive()
    }

    /// The cached descriptor of the record type.
    pub fn descriptor(&self) -> &Arc<TypeDescriptor> {
        &self.descriptor
    }

    /// Resolves the subject identifier of the record, once.
    ///
    /// The local `subjectID` field wins when set, with its `prefix` option
    /// prepended. Nested records reached through `dive` fields must agree
    /// with it.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateSubject`] when two non-empty identifiers disagree,
    /// [`Error::SubjectNotFound`] when none is set anywhere.
    pub fn subject_id(&mut self) -> Result<&str> {
        if self.subject.is_none() {
            let resolved = resolve_subject(self.scanner, &self.descriptor, &*self.value)?;
            self.subject = Some(resolved);
        }
        self.subject
            .as_ref()
            .and_then(Option::as_deref)
            .ok_or_else(|| Error::SubjectNotFound(self.descriptor.name().to_string()))
    }

    /// Calls `f` for every non-empty `data` field, depth first, and writes
    /// back the returned value when it differs.
    ///
    /// Absent values (empty strings, `None`, empty collections) are skipped,
    /// and so are nested records whose type has nothing sensitive. The first
    /// error aborts the walk and is returned as is; fields replaced before it
    /// keep their new value.
    ///
    /// `FieldReplace::subject_id` carries the subject identifier only if it
    /// was resolved before, eagerly or through [`Accessor::subject_id`].
    pub fn replace<F, E>(&mut self, mut f: F) -> std::result::Result<(), E>
    where
        F: FnMut(&FieldReplace<'_>, &str) -> std::result::Result<String, E>,
    {
        if !self.descriptor.has_sensitive() {
            return Ok(());
        }
        let Self {
            scanner,
            descriptor,
            value,
            subject,
        } = self;
        let subject = subject.as_ref().and_then(Option::as_deref);
        replace_record(scanner, descriptor, &mut **value, subject, &mut f)
    }
}

impl Scanner {
    /// Scans the type of `value` and returns an [`Accessor`] over it.
    ///
    /// `value` must be a record, or an optional or boxed record. With
    /// `require_subject` the subject identifier is resolved right away and
    /// resolution failures are returned here.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedType`] for collections and absent values, the
    /// scan errors of the type, and the subject errors of
    /// [`Accessor::subject_id`] when `require_subject` is set.
    pub fn scan_value<'v, T: Dive>(
        &'v self,
        value: &'v mut T,
        require_subject: bool,
    ) -> Result<Accessor<'v>> {
        let layout = T::layout();
        if layout.container() != Container::None {
            return Err(Error::UnsupportedType(type_name::<T>().to_string()));
        }
        let record = value
            .as_record_mut()
            .ok_or_else(|| Error::UnsupportedType(type_name::<T>().to_string()))?;
        let descriptor = self.scan_type(layout.record_type())?;

        let mut accessor = Accessor {
            scanner: self,
            descriptor,
            value: record,
            subject: None,
        };
        if require_subject {
            accessor.subject_id()?;
        }
        Ok(accessor)
    }
}

/// Scans `value` with the global scanner and returns an [`Accessor`] over it.
///
/// See [`Scanner::scan_value`].
pub fn scan<T: Dive>(value: &mut T, require_subject: bool) -> Result<Accessor<'_>> {
    Scanner::global().scan_value(value, require_subject)
}

fn resolve_subject(
    scanner: &Scanner,
    descriptor: &TypeDescriptor,
    record: &dyn Record,
) -> Result<Option<String>> {
    let mut subject = descriptor.subject().and_then(|field| {
        let Some(FieldRef::Value(value)) = record.field(field.index()) else {
            return None;
        };
        subject_text(value)
            .map(|text| format!("{}{text}", field.prefix()))
            .filter(|id| !id.is_empty())
    });

    for field in descriptor.fields() {
        if field.role() != Role::Dive {
            continue;
        }
        let Some(nested) = field.nested().and_then(|nested| scanner.descriptor(nested.id()))
        else {
            continue;
        };
        let Some(FieldRef::Nested(value)) = record.field(field.index()) else {
            continue;
        };
        if value.is_absent() {
            continue;
        }

        let mut found = None;
        let mut failure = None;
        if let ControlFlow::Break(()) =
            value.visit(&mut |element| match resolve_subject(scanner, &nested, element) {
                Ok(Some(id)) => {
                    found = Some(id);
                    ControlFlow::Break(())
                }
                Ok(None) => ControlFlow::Continue(()),
                Err(err) => {
                    failure = Some(err);
                    ControlFlow::Break(())
                }
            })
        {
            // Stopped either on the first nested subject or on an error.
            if let Some(err) = failure.take() {
                return Err(err);
            }
        }

        match (&subject, found) {
            (Some(first), Some(second)) if *first != second => {
                return Err(Error::DuplicateSubject {
                    first: first.clone(),
                    second,
                });
            }
            (None, Some(second)) => subject = Some(second),
            _ => {}
        }
    }

    Ok(subject)
}

fn replace_record<F, E>(
    scanner: &Scanner,
    descriptor: &TypeDescriptor,
    record: &mut dyn Record,
    subject: Option<&str>,
    f: &mut F,
) -> std::result::Result<(), E>
where
    F: FnMut(&FieldReplace<'_>, &str) -> std::result::Result<String, E>,
{
    for field in descriptor.fields() {
        match field.role() {
            Role::Data => {
                let Some(slot) = field.text else {
                    continue;
                };
                let Some(FieldMut::Value(value)) = record.field_mut(field.index()) else {
                    continue;
                };
                let Some(current) = slot.get(&*value) else {
                    continue;
                };
                let replaced = f(&FieldReplace::new(field, subject), current)?;
                if replaced != current {
                    slot.set(value, replaced);
                }
            }
            Role::Dive => {
                let Some(nested) = field.nested().and_then(|nested| scanner.descriptor(nested.id()))
                else {
                    continue;
                };
                if !nested.has_sensitive() {
                    tracing::trace!(
                        record = descriptor.name(),
                        field = field.name(),
                        "skipping nested record without sensitive fields"
                    );
                    continue;
                }
                let Some(FieldMut::Nested(value)) = record.field_mut(field.index()) else {
                    continue;
                };
                if value.is_absent() {
                    continue;
                }

                let mut failure = None;
                if let ControlFlow::Break(()) = value.visit_mut(&mut |element| {
                    match replace_record(scanner, &nested, element, subject, &mut *f) {
                        Ok(()) => ControlFlow::Continue(()),
                        Err(err) => {
                            failure = Some(err);
                            ControlFlow::Break(())
                        }
                    }
                }) {
                    if let Some(err) = failure.take() {
                        return Err(err);
                    }
                }
            }
            Role::SubjectId => {}
        }
    }
    Ok(())
}
