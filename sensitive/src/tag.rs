//! Annotation grammar: `<role>[,<key>=<value>]*`.
//!
//! A field is annotated with one of the recognized identifiers
//! ([`TAG_IDS`]), e.g. `#[sensitive("data,kind=email")]` or
//! `#[pii("subjectID,prefix=acct-")]`. The parser itself never fails: absent
//! or unparseable input yields an empty role, and unknown roles are rejected
//! later by the scanner.

use std::{collections::BTreeMap, fmt};

use crate::{
    error::{Error, Result},
    record::{Annotation, Record},
};

/// Recognized annotation identifiers, in priority order.
pub const TAG_IDS: [&str; 3] = ["sensitive", "pii", "sens"];

/// Role name of the subject identifier field.
pub const TAG_SUBJECT_ID: &str = "subjectID";
/// Role name of a sensitive leaf field.
pub const TAG_DATA: &str = "data";
/// Role name of a nested record field.
pub const TAG_DIVE: &str = "dive";

/// Option key surfaced to transformation callbacks as the field kind.
pub const OPTION_KIND: &str = "kind";
/// Option key prepended to a resolved subject identifier.
pub const OPTION_PREFIX: &str = "prefix";

/// The three field roles understood by the scanner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// `subjectID`: identifies the subject the record is about.
    SubjectId,
    /// `data`: a sensitive string leaf.
    Data,
    /// `dive`: a nested record to recurse into.
    Dive,
}

impl Role {
    /// Maps a role name to a [`Role`]; names are case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            TAG_SUBJECT_ID => Some(Self::SubjectId),
            TAG_DATA => Some(Self::Data),
            TAG_DIVE => Some(Self::Dive),
            _ => None,
        }
    }

    /// Returns the annotation name of the role.
    pub fn name(self) -> &'static str {
        match self {
            Self::SubjectId => TAG_SUBJECT_ID,
            Self::Data => TAG_DATA,
            Self::Dive => TAG_DIVE,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Options configured on an annotation, keyed by option name.
///
/// Keys are unique and case-sensitive. Iteration follows key order, which is
/// also the canonical order used by [`TagPayload::marshal`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagOptions(BTreeMap<String, String>);

impl TagOptions {
    /// Creates an empty option map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the option value, or an empty string when the option is unset.
    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map_or("", String::as_str)
    }

    /// Returns `true` if the option is set.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Sets an option, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no option is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates options in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for TagOptions
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A parsed annotation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagPayload {
    /// Identifier the annotation was found under, e.g. `sensitive` or `pii`.
    pub id: String,
    /// Role name, e.g. `data` or `subjectID`. Not validated.
    pub name: String,
    /// Options following the role name.
    pub options: TagOptions,
}

impl TagPayload {
    /// Parses a raw annotation body found under `id`.
    pub fn parse(id: impl Into<String>, raw: &str) -> Self {
        let (name, options) = parse_tag(raw);
        Self {
            id: id.into(),
            name,
            options,
        }
    }

    /// Returns the role, if the name is a known one.
    pub fn role(&self) -> Option<Role> {
        Role::from_name(&self.name)
    }

    /// Returns the canonical annotation body, options in key order.
    pub fn marshal(&self) -> String {
        let mut out = self.name.clone();
        for (key, value) in self.options.iter() {
            out.push(',');
            out.push_str(key);
            out.push('=');
            out.push_str(value);
        }
        out
    }
}

impl fmt::Display for TagPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(\"{}\")", self.id, self.marshal())
    }
}

/// Splits an annotation body into its role name and options.
///
/// Option tokens that are not exactly `key=value` are ignored, and a later
/// duplicate key overwrites an earlier one.
pub fn parse_tag(raw: &str) -> (String, TagOptions) {
    let mut parts = raw.split(',');
    let name = parts.next().unwrap_or_default().trim().to_string();
    let mut options = TagOptions::new();
    for option in parts {
        let mut split = option.split('=');
        if let (Some(key), Some(value), None) = (split.next(), split.next(), split.next()) {
            options.insert(key.trim(), value.trim());
        }
    }
    (name, options)
}

/// Picks the winning annotation among those declared on a field.
///
/// Identifiers are tried in [`TAG_IDS`] order and the first non-empty
/// annotation wins; returns `None` when the field carries none.
pub fn extract_tag(annotations: &[Annotation]) -> Option<&Annotation> {
    TAG_IDS.iter().find_map(|id| {
        annotations
            .iter()
            .find(|annotation| annotation.id == *id && !annotation.raw.is_empty())
    })
}

/// Parses the winning annotation of a field's annotation list.
pub fn parse_annotations(annotations: &[Annotation]) -> Option<TagPayload> {
    extract_tag(annotations).map(|annotation| TagPayload::parse(annotation.id, annotation.raw))
}

/// Looks up and parses the annotation of the named field of `T`.
///
/// Returns `Ok(None)` when the field carries no recognized annotation, and
/// [`Error::FieldNotFound`] when `T` has no such field.
pub fn field_tag<T: Record>(field: &str) -> Result<Option<TagPayload>> {
    let schema = T::schema();
    let found = schema
        .fields()
        .iter()
        .find(|candidate| candidate.name() == field)
        .ok_or_else(|| Error::FieldNotFound {
            record: schema.name(),
            field: field.to_string(),
        })?;
    Ok(parse_annotations(found.annotations()))
}
