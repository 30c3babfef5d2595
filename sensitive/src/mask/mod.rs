//! Kind-aware maskers and their registry.
//!
//! A `data` field annotated with `kind=<name>` is masked by the masker
//! registered under that name when redacting with
//! [`RedactConfig::with_registered_masks`] or [`mask()`]. Fields without a
//! kind, or with a kind nobody registered, fall back to
//! [`default_redact_fn`](crate::default_redact_fn).
//!
//! Predefined kinds:
//!
//! | kind          | masker           | example                                      |
//! |---------------|------------------|----------------------------------------------|
//! | `email`       | [`email`]        | `jane@example.com` → `****@example.com`      |
//! | `ipv4_addr`   | [`ipv4_addr`]    | `169.251.207.194` → `169.251.207.***`        |
//! | `credit_card` | [`credit_card`]  | `6706 7510 5149 0155` → `**** **** **** 0155` |

use std::{collections::HashMap, sync::Arc};

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use thiserror::Error;

use crate::{
    error::{BoxError, Result},
    record::Dive,
    redact::{RedactConfig, default_redact_fn, redact_with},
};

mod credit_card;
mod email;
mod ipv4;

pub use credit_card::{CreditCardConfig, credit_card};
pub use email::{EmailConfig, email};
pub use ipv4::{Ipv4AddrConfig, ipv4_addr};

/// Kind name of the email masker.
pub const KIND_EMAIL: &str = "email";
/// Kind name of the IPv4 address masker.
pub const KIND_IPV4_ADDR: &str = "ipv4_addr";
/// Kind name of the payment card number masker.
pub const KIND_CREDIT_CARD: &str = "credit_card";

/// A masker registered for a kind.
pub type Masker = Arc<dyn Fn(&str) -> std::result::Result<String, BoxError> + Send + Sync>;

/// Input a predefined masker cannot handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MaskError {
    /// The value does not contain exactly one `@`.
    #[error("invalid email format")]
    InvalidEmail,
    /// The value is not a dotted IPv4 address.
    #[error("invalid IPv4 address")]
    InvalidIpv4Addr,
    /// The value is not a card number of 12 to 19 digits.
    #[error("invalid credit card number")]
    InvalidCreditCard,
}

/// Thread-safe map from kind names to maskers.
#[derive(Default)]
pub struct Registry {
    maskers: RwLock<HashMap<String, Masker>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the predefined maskers.
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register(KIND_EMAIL, |value| Ok(email(value, &EmailConfig::default())?));
        registry.register(KIND_IPV4_ADDR, |value| {
            Ok(ipv4_addr(value, &Ipv4AddrConfig::default())?)
        });
        registry.register(KIND_CREDIT_CARD, |value| {
            Ok(credit_card(value, &CreditCardConfig::default())?)
        });
        registry
    }

    /// Registers `masker` for `kind`, replacing any previous one.
    pub fn register<M>(&self, kind: impl Into<String>, masker: M)
    where
        M: Fn(&str) -> std::result::Result<String, BoxError> + Send + Sync + 'static,
    {
        let kind = kind.into();
        tracing::debug!(kind = %kind, "registered masker");
        self.maskers.write().insert(kind, Arc::new(masker));
    }

    /// Returns the masker registered for `kind`.
    pub fn lookup(&self, kind: &str) -> Option<Masker> {
        self.maskers.read().get(kind).cloned()
    }

    /// Returns the registered kind names, sorted.
    pub fn kinds(&self) -> Vec<String> {
        let mut kinds: Vec<_> = self.maskers.read().keys().cloned().collect();
        kinds.sort();
        kinds
    }

    /// Builds a transformation that masks with the maskers of this registry
    /// and falls back to [`default_redact_fn`].
    pub fn redact_fn(
        self: &Arc<Self>,
    ) -> impl Fn(&crate::FieldReplace<'_>, &str) -> std::result::Result<String, BoxError>
    + Send
    + Sync
    + 'static {
        let registry = Arc::clone(self);
        move |field: &crate::FieldReplace<'_>, value: &str| match registry.lookup(field.kind) {
            Some(masker) if !field.kind.is_empty() => masker(value),
            _ => default_redact_fn(field, value),
        }
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

static REGISTRY: Lazy<Arc<Registry>> = Lazy::new(|| Arc::new(Registry::with_defaults()));

/// Returns the process-wide registry, pre-populated with the predefined
/// maskers.
pub fn registry() -> &'static Arc<Registry> {
    &REGISTRY
}

/// Registers `masker` for `kind` in the process-wide registry.
pub fn register<M>(kind: impl Into<String>, masker: M)
where
    M: Fn(&str) -> std::result::Result<String, BoxError> + Send + Sync + 'static,
{
    REGISTRY.register(kind, masker);
}

/// Returns the masker registered for `kind` in the process-wide registry.
pub fn of(kind: &str) -> Option<Masker> {
    REGISTRY.lookup(kind)
}

impl RedactConfig {
    /// Masks with the process-wide registry instead of the configured
    /// transformation.
    #[must_use]
    pub fn with_registered_masks(mut self) -> Self {
        self.redact_fn = Some(Arc::new(REGISTRY.redact_fn()));
        self
    }
}

/// Masks `value` in place with the registered maskers.
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
/// let mut contact = Contact { email: "jane@example.com".to_string() };
/// sensitive::mask::mask(&mut contact)?;
/// assert_eq!(contact.email, "****@example.com");
/// ```
pub fn mask<T: Dive>(value: &mut T) -> Result<()> {
    mask_with(value, RedactConfig::default())
}

/// Masks `value` in place with the registered maskers, keeping the other
/// settings of `config`.
pub fn mask_with<T: Dive>(value: &mut T, config: RedactConfig) -> Result<()> {
    redact_with(value, &config.with_registered_masks())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldReplace, TagOptions};

    fn replace_with(registry: &Arc<Registry>, kind: &str, value: &str) -> String {
        let options = TagOptions::new();
        let field = FieldReplace {
            subject_id: None,
            name: "value",
            type_name: "alloc::string::String",
            kind,
            options: &options,
        };
        registry.redact_fn()(&field, value).unwrap()
    }

    #[test]
    fn registers_and_looks_up_maskers() {
        let registry = Registry::new();
        assert!(registry.lookup("foo").is_none());

        registry.register("foo", |_| Ok("***".to_string()));
        let masker = registry.lookup("foo").unwrap();
        assert_eq!(masker("sensitive content").unwrap(), "***");
    }

    #[test]
    fn later_registration_wins() {
        let registry = Registry::with_defaults();
        registry.register(KIND_EMAIL, |_| Ok("hidden".to_string()));
        assert_eq!(registry.lookup(KIND_EMAIL).unwrap()("a@b.c").unwrap(), "hidden");
    }

    #[test]
    fn defaults_are_predefined() {
        let registry = Registry::with_defaults();
        assert_eq!(
            registry.kinds(),
            vec![KIND_CREDIT_CARD, KIND_EMAIL, KIND_IPV4_ADDR]
        );
        assert!(of(KIND_EMAIL).is_some());
    }

    #[test]
    fn unknown_and_empty_kinds_fall_back_to_full_redaction() {
        let registry = Arc::new(Registry::with_defaults());
        assert_eq!(replace_with(&registry, "", "secret"), "******");
        assert_eq!(replace_with(&registry, "phone", "secret"), "******");
        assert_eq!(
            replace_with(&registry, KIND_EMAIL, "jane@example.com"),
            "****@example.com"
        );
    }

    #[test]
    fn masker_errors_are_boxed_mask_errors() {
        let masker = Registry::with_defaults().lookup(KIND_IPV4_ADDR).unwrap();
        let err = masker("not an address").unwrap_err();
        assert_eq!(
            err.downcast_ref::<MaskError>(),
            Some(&MaskError::InvalidIpv4Addr)
        );
    }
}
