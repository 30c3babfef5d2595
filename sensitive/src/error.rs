//! Error types returned by scanning, walking and the facades.
//!
//! The taxonomy keeps three families apart so callers can tell them apart:
//!
//! - the input value has the wrong shape ([`Error::UnsupportedType`])
//! - the type definition is misconfigured ([`Error::InvalidTagConfiguration`])
//! - the instance data is inconsistent ([`Error::DuplicateSubject`],
//!   [`Error::SubjectNotFound`])
//!
//! Transformation callbacks keep their own error type on the low-level
//! [`crate::Accessor::replace`] path. The facades box it into
//! [`Error::Transform`], which is transparent.

use thiserror::Error;

/// Boxed error produced by a caller-supplied transformation or masker.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the `sensitive` operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The value is not a record, an optional record or a boxed record, or it
    /// is absent.
    #[error("unsupported 'sensitive' type '{0}'")]
    UnsupportedType(String),

    /// The record type carries a misconfigured annotation.
    #[error("invalid 'sensitive' tag configuration: {0}")]
    InvalidTagConfiguration(#[from] ConfigError),

    /// Two nested records carry different subject identifiers.
    #[error("potential multiple nested subject IDs: '{first}' and '{second}'")]
    DuplicateSubject {
        /// The subject identifier established first.
        first: String,
        /// The conflicting subject identifier.
        second: String,
    },

    /// No subject identifier was found although one was required.
    #[error("subject ID is not found in '{0}'")]
    SubjectNotFound(String),

    /// The transformation callback failed.
    #[error(transparent)]
    Transform(BoxError),

    /// The redact configuration carries no transformation function.
    #[error("redact function not found")]
    RedactFuncNotFound,

    /// Tag introspection asked for a field the record does not declare.
    #[error("field '{field}' not found in '{record}'")]
    FieldNotFound {
        /// The record type name.
        record: &'static str,
        /// The requested field name.
        field: String,
    },
}

impl Error {
    /// Returns `true` when the error comes from a misconfigured record type
    /// rather than from the input value or the transformation.
    pub fn is_misconfiguration(&self) -> bool {
        matches!(self, Self::InvalidTagConfiguration(_))
    }
}

/// Misconfigured annotations detected while scanning a record type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The annotation role is neither `subjectID`, `data` nor `dive`.
    #[error("invalid tag name '{role}' on field '{record}.{field}'")]
    UnknownRole {
        /// The record type name.
        record: &'static str,
        /// The annotated field.
        field: &'static str,
        /// The role name found in the annotation.
        role: String,
    },

    /// A record type declares more than one `subjectID` field.
    #[error("multiple subject ID fields in '{record}': '{first}' and '{second}'")]
    MultipleSubjectId {
        /// The record type name.
        record: &'static str,
        /// The subject field declared first.
        first: &'static str,
        /// The extra subject field.
        second: &'static str,
    },

    /// The field type cannot carry the annotated role.
    #[error("'sensitive' field '{record}.{field}' has unsupported type '{type_name}'")]
    UnsupportedFieldType {
        /// The record type name.
        record: &'static str,
        /// The annotated field.
        field: &'static str,
        /// The declared type of the field.
        type_name: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, Error};

    #[test]
    fn configuration_errors_are_wrapped_under_the_umbrella() {
        let err = Error::from(ConfigError::UnknownRole {
            record: "Profile",
            field: "email",
            role: "secret".to_string(),
        });
        assert!(err.is_misconfiguration());
        assert_eq!(
            err.to_string(),
            "invalid 'sensitive' tag configuration: invalid tag name 'secret' on field 'Profile.email'"
        );
    }

    #[test]
    fn input_shape_errors_are_not_misconfiguration() {
        let err = Error::UnsupportedType("Vec<Profile>".to_string());
        assert!(!err.is_misconfiguration());
    }

    #[test]
    fn transform_errors_are_transparent() {
        let err = Error::Transform("boom".into());
        assert_eq!(err.to_string(), "boom");
    }
}
