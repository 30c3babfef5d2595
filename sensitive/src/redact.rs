//! Redaction facade over [`Accessor::replace`](crate::Accessor::replace).

use std::{fmt, iter, sync::Arc};

use crate::{
    error::{BoxError, Error, Result},
    record::Dive,
    scan::Scanner,
    walk::FieldReplace,
};

/// Default character used to mask sensitive characters.
pub const MASK_CHAR: char = '*';

/// Shareable transformation applied to every non-empty `data` field.
pub type ReplaceFn =
    Arc<dyn Fn(&FieldReplace<'_>, &str) -> std::result::Result<String, BoxError> + Send + Sync>;

/// Replaces every character of `value` with [`MASK_CHAR`].
///
/// The output has as many characters as the input, so `"jane"` becomes
/// `"****"`.
pub fn default_redact_fn(
    _field: &FieldReplace<'_>,
    value: &str,
) -> std::result::Result<String, BoxError> {
    Ok(iter::repeat_n(MASK_CHAR, value.chars().count()).collect())
}

/// Configuration of [`redact_with`].
///
/// The default resolves the subject lazily and uses [`default_redact_fn`].
#[derive(Clone)]
pub struct RedactConfig {
    /// Resolve the subject identifier before redacting and fail when it
    /// cannot be resolved.
    pub require_subject_id: bool,
    /// The transformation; `None` makes redaction fail with
    /// [`Error::RedactFuncNotFound`].
    pub redact_fn: Option<ReplaceFn>,
}

impl RedactConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires the subject identifier to be resolvable.
    #[must_use]
    pub fn with_require_subject_id(mut self, require: bool) -> Self {
        self.require_subject_id = require;
        self
    }

    /// Replaces the transformation.
    #[must_use]
    pub fn with_redact_fn<F>(mut self, redact_fn: F) -> Self
    where
        F: Fn(&FieldReplace<'_>, &str) -> std::result::Result<String, BoxError>
            + Send
            + Sync
            + 'static,
    {
        self.redact_fn = Some(Arc::new(redact_fn));
        self
    }
}

impl Default for RedactConfig {
    fn default() -> Self {
        Self {
            require_subject_id: false,
            redact_fn: Some(Arc::new(default_redact_fn)),
        }
    }
}

impl fmt::Debug for RedactConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedactConfig")
            .field("require_subject_id", &self.require_subject_id)
            .field("redact_fn", &self.redact_fn.as_ref().map(|_| ".."))
            .finish()
    }
}

impl Scanner {
    /// Redacts every non-empty `data` field of `value` in place.
    ///
    /// # Errors
    ///
    /// [`Error::RedactFuncNotFound`] when `config` has no transformation, the
    /// errors of [`Scanner::scan_value`], and [`Error::Transform`] when the
    /// transformation fails. Fields redacted before a failure stay redacted.
    pub fn redact<T: Dive>(&self, value: &mut T, config: &RedactConfig) -> Result<()> {
        let redact_fn = config
            .redact_fn
            .as_ref()
            .ok_or(Error::RedactFuncNotFound)?;

        let mut accessor = self.scan_value(value, config.require_subject_id)?;
        if !accessor.has_sensitive() {
            return Ok(());
        }
        accessor
            .replace(|field, current| redact_fn(field, current))
            .map_err(Error::Transform)
    }
}

/// Redacts `value` in place with the default configuration.
///
/// ```ignore
/// use sensitive::Sensitive;
///
/// #[derive(Sensitive)]
/// struct Contact {
///     #[sensitive("subjectID")]
///     id: String,
///     #[sensitive("data,kind=email")]
///     email: String,
/// }
///
/// let mut contact = Contact {
///     id: "abc".to_string(),
///     email: "jane@example.com".to_string(),
/// };
/// sensitive::redact(&mut contact)?;
/// assert_eq!(contact.email, "****************");
/// assert_eq!(contact.id, "abc");
/// ```
pub fn redact<T: Dive>(value: &mut T) -> Result<()> {
    redact_with(value, &RedactConfig::default())
}

/// Redacts `value` in place with the global scanner and `config`.
///
/// See [`Scanner::redact`].
pub fn redact_with<T: Dive>(value: &mut T, config: &RedactConfig) -> Result<()> {
    Scanner::global().redact(value, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Sensitive, TagOptions};

    #[derive(Sensitive)]
    struct Contact {
        #[sensitive("subjectID")]
        id: String,
        #[sensitive("data")]
        name: String,
    }

    fn masked(value: &str) -> String {
        let options = TagOptions::new();
        let field = FieldReplace {
            subject_id: None,
            name: "name",
            type_name: "alloc::string::String",
            kind: "",
            options: &options,
        };
        default_redact_fn(&field, value).unwrap()
    }

    #[test]
    fn default_fn_masks_each_character() {
        assert_eq!(masked("jane"), "****");
        assert_eq!(masked("élan"), "****");
    }

    #[test]
    fn missing_function_fails_before_scanning() {
        let mut value = Contact {
            id: "1".to_string(),
            name: "Jane".to_string(),
        };
        let config = RedactConfig {
            redact_fn: None,
            ..RedactConfig::default()
        };
        assert!(matches!(
            redact_with(&mut value, &config),
            Err(Error::RedactFuncNotFound)
        ));
        assert_eq!(value.name, "Jane");
    }

    #[test]
    fn custom_function_errors_are_transparent() {
        let mut value = Contact {
            id: "1".to_string(),
            name: "Jane".to_string(),
        };
        let config = RedactConfig::new().with_redact_fn(|_, _| Err("vault unavailable".into()));
        let err = redact_with(&mut value, &config).unwrap_err();
        assert!(matches!(err, Error::Transform(_)));
        assert_eq!(err.to_string(), "vault unavailable");
    }

    #[test]
    fn config_debug_hides_the_function() {
        let config = RedactConfig::default().with_require_subject_id(true);
        assert_eq!(
            format!("{config:?}"),
            r#"RedactConfig { require_subject_id: true, redact_fn: Some("..") }"#
        );
    }
}
