//! Type scanner and descriptor cache.
//!
//! Scanning turns a record [`Schema`](crate::Schema) into a
//! [`TypeDescriptor`]: the annotated fields that matter, their parsed options
//! and, for `dive` fields, the identity of the nested record type. The cache
//! is an arena keyed by `TypeId`. Nested descriptors are referenced by type
//! identity, so self-referential and mutually recursive types resolve to the
//! same slot instead of recursing forever.
//!
//! A type is marked in progress before its fields are processed. Descriptors
//! produced by one scan are published together once the whole scan succeeds;
//! a failed scan publishes nothing, so a corrected type can be scanned again.

use std::{
    any::TypeId,
    collections::{HashMap, HashSet},
    sync::Arc,
};

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::{
    error::{ConfigError, Result},
    record::{Container, Record, RecordType},
    tag::{Role, parse_annotations},
    text::{TextSlot, is_subject_type},
};

mod descriptor;

pub use descriptor::{FieldDescriptor, TypeDescriptor};

static GLOBAL: Lazy<Scanner> = Lazy::new(Scanner::new);

/// Scans record types and caches their descriptors.
///
/// Many threads may scan concurrently: cache hits take a shared lock, a miss
/// populates the cache under an exclusive lock. Cached descriptors never hold
/// instance data and are immutable, so they are shared by every caller.
///
/// Use [`Scanner::global`] for the process-wide cache, or [`Scanner::new`] for
/// an isolated one.
#[derive(Debug, Default)]
pub struct Scanner {
    cache: RwLock<HashMap<TypeId, Arc<TypeDescriptor>>>,
}

impl Scanner {
    /// Creates a scanner with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide scanner.
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Scans `T`, or returns its cached descriptor.
    pub fn scan<T: Record>(&self) -> Result<Arc<TypeDescriptor>> {
        self.scan_type(RecordType::of::<T>())
    }

    /// Scans a record type, or returns its cached descriptor.
    pub fn scan_type(&self, record: RecordType) -> Result<Arc<TypeDescriptor>> {
        if let Some(hit) = self.descriptor(record.id()) {
            tracing::trace!(record = record.name(), "sensitive type descriptor cache hit");
            return Ok(hit);
        }

        let mut cache = self.cache.write();
        // Another writer may have published it while we waited for the lock.
        if let Some(hit) = cache.get(&record.id()) {
            return Ok(Arc::clone(hit));
        }

        let mut ctx = ScanContext::new(&cache);
        let root = Arc::new(ctx.scan(record)?);
        let ScanContext { pending, .. } = ctx;

        tracing::debug!(
            record = root.name(),
            types = pending.len() + 1,
            has_sensitive = root.has_sensitive(),
            "published sensitive type descriptors"
        );
        for (id, descriptor) in pending {
            cache.insert(id, Arc::new(descriptor));
        }
        cache.insert(record.id(), Arc::clone(&root));
        Ok(root)
    }

    /// Returns the cached descriptor of a type, without scanning.
    pub fn descriptor(&self, id: TypeId) -> Option<Arc<TypeDescriptor>> {
        self.cache.read().get(&id).cloned()
    }

    /// Number of cached descriptors.
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    /// Returns `true` when nothing has been scanned yet.
    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }
}

/// State of one scan call: in-progress markers and not yet published
/// descriptors. Never shared with other calls.
struct ScanContext<'c> {
    published: &'c HashMap<TypeId, Arc<TypeDescriptor>>,
    in_progress: HashSet<TypeId>,
    pending: HashMap<TypeId, TypeDescriptor>,
}

impl<'c> ScanContext<'c> {
    fn new(published: &'c HashMap<TypeId, Arc<TypeDescriptor>>) -> Self {
        Self {
            published,
            in_progress: HashSet::new(),
            pending: HashMap::new(),
        }
    }

    fn knows(&self, id: TypeId) -> bool {
        self.in_progress.contains(&id)
            || self.pending.contains_key(&id)
            || self.published.contains_key(&id)
    }

    fn scan(&mut self, record: RecordType) -> std::result::Result<TypeDescriptor, ConfigError> {
        self.in_progress.insert(record.id());

        let schema = record.schema();
        let mut subject: Option<FieldDescriptor> = None;
        let mut fields = Vec::new();

        for (index, field) in schema.fields().iter().enumerate() {
            if field.is_hidden() {
                continue;
            }
            let Some(tag) = parse_annotations(field.annotations()) else {
                continue;
            };
            let role = Role::from_name(&tag.name).ok_or_else(|| ConfigError::UnknownRole {
                record: schema.name(),
                field: field.name(),
                role: tag.name.clone(),
            })?;

            let mut descriptor = FieldDescriptor {
                name: field.name(),
                index,
                role,
                value: field.value_type(),
                options: tag.options,
                container: Container::None,
                nested: None,
                text: None,
            };

            match role {
                Role::SubjectId => {
                    if !is_subject_type(field.value_type()) {
                        return Err(ConfigError::UnsupportedFieldType {
                            record: schema.name(),
                            field: field.name(),
                            type_name: field.value_type().name(),
                        });
                    }
                    if let Some(first) = &subject {
                        return Err(ConfigError::MultipleSubjectId {
                            record: schema.name(),
                            first: first.name,
                            second: field.name(),
                        });
                    }
                    subject = Some(descriptor);
                }
                Role::Data => {
                    // Non-string leaves are dropped, not rejected.
                    let Some(slot) = TextSlot::of(field.value_type()) else {
                        tracing::trace!(
                            record = schema.name(),
                            field = field.name(),
                            type_name = field.value_type().name(),
                            "ignoring 'data' annotation on a non-string field"
                        );
                        continue;
                    };
                    descriptor.text = Some(slot);
                    fields.push(descriptor);
                }
                Role::Dive => {
                    let layout = field
                        .layout()
                        .filter(|layout| !layout.is_nested_container())
                        .ok_or_else(|| ConfigError::UnsupportedFieldType {
                            record: schema.name(),
                            field: field.name(),
                            type_name: field.value_type().name(),
                        })?;
                    let nested = layout.record_type();
                    if !self.knows(nested.id()) {
                        let nested_descriptor = self.scan(nested)?;
                        self.pending.insert(nested.id(), nested_descriptor);
                    }
                    descriptor.container = layout.container();
                    descriptor.nested = Some(nested);
                    fields.push(descriptor);
                }
            }
        }

        self.in_progress.remove(&record.id());

        Ok(TypeDescriptor {
            record,
            name: schema.name(),
            has_sensitive: !fields.is_empty(),
            subject,
            fields,
        })
    }
}
