//! Email address masker.

use super::MaskError;
use crate::redact::MASK_CHAR;

/// Configuration of the [`email`] masker.
///
/// The local part is always masked. The domain is kept unless
/// [`EmailConfig::with_mask_domain`] is set, in which case every character
/// but the dots is masked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmailConfig {
    /// Whether the domain is masked too.
    mask_domain: bool,
    /// Symbol used to mask characters.
    mask_char: char,
}

impl EmailConfig {
    /// Creates a configuration that keeps the domain visible.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mask_domain: false,
            mask_char: MASK_CHAR,
        }
    }

    /// Masks the domain as well, keeping its dots.
    #[must_use]
    pub fn with_mask_domain(mut self, mask_domain: bool) -> Self {
        self.mask_domain = mask_domain;
        self
    }

    /// Uses a specific masking character.
    #[must_use]
    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }

    pub(crate) fn apply_to(&self, value: &str) -> Result<String, MaskError> {
        let mut parts = value.split('@');
        let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(MaskError::InvalidEmail);
        };

        let mut masked = String::with_capacity(value.len());
        masked.extend(local.chars().map(|_| self.mask_char));
        masked.push('@');
        if self.mask_domain {
            masked.extend(
                domain
                    .chars()
                    .map(|ch| if ch == '.' { '.' } else { self.mask_char }),
            );
        } else {
            masked.push_str(domain);
        }
        Ok(masked)
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Masks an email address according to `config`.
///
/// # Errors
///
/// [`MaskError::InvalidEmail`] unless `value` contains exactly one `@`.
pub fn email(value: &str, config: &EmailConfig) -> Result<String, MaskError> {
    config.apply_to(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_the_local_part() {
        assert_eq!(
            email("email.bar@example.com", &EmailConfig::default()).unwrap(),
            "*********@example.com"
        );
    }

    #[test]
    fn masks_the_domain_but_keeps_dots() {
        let config = EmailConfig::new().with_mask_domain(true);
        assert_eq!(
            email("email@example.com", &config).unwrap(),
            "*****@*******.***"
        );
    }

    #[test]
    fn respects_mask_char() {
        let config = EmailConfig::new().with_mask_domain(true).with_mask_char('□');
        assert_eq!(
            email("email@example.com", &config).unwrap(),
            "□□□□□@□□□□□□□.□□□"
        );
    }

    #[test]
    fn rejects_values_without_exactly_one_at() {
        let config = EmailConfig::default();
        assert_eq!(email("invalid_example.com", &config), Err(MaskError::InvalidEmail));
        assert_eq!(email("a@b@c.com", &config), Err(MaskError::InvalidEmail));
    }
}
