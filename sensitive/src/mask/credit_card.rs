//! Payment card number masker.

use super::MaskError;
use crate::redact::MASK_CHAR;

const MIN_DIGITS: usize = 12;
const MAX_DIGITS: usize = 19;

/// Configuration of the [`credit_card`] masker.
///
/// Keeps the last `visible_suffix` digits (4 by default) and masks the
/// others. Space and dash separators are kept in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CreditCardConfig {
    /// Number of trailing digits to keep visible.
    visible_suffix: usize,
    /// Symbol used to mask digits.
    mask_char: char,
}

impl CreditCardConfig {
    /// Creates a configuration keeping the last `visible_suffix` digits.
    #[must_use]
    pub fn last(visible_suffix: usize) -> Self {
        Self {
            visible_suffix,
            mask_char: MASK_CHAR,
        }
    }

    /// Uses a specific masking character.
    #[must_use]
    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }

    pub(crate) fn apply_to(&self, value: &str) -> Result<String, MaskError> {
        let mut digits = 0;
        for ch in value.chars() {
            match ch {
                '0'..='9' => digits += 1,
                ' ' | '-' => {}
                _ => return Err(MaskError::InvalidCreditCard),
            }
        }
        if !(MIN_DIGITS..=MAX_DIGITS).contains(&digits) {
            return Err(MaskError::InvalidCreditCard);
        }

        let masked_digits = digits.saturating_sub(self.visible_suffix);
        let mut seen = 0;
        Ok(value
            .chars()
            .map(|ch| {
                if !ch.is_ascii_digit() {
                    return ch;
                }
                seen += 1;
                if seen <= masked_digits { self.mask_char } else { ch }
            })
            .collect())
    }
}

impl Default for CreditCardConfig {
    fn default() -> Self {
        Self::last(4)
    }
}

/// Masks a payment card number according to `config`.
///
/// # Errors
///
/// [`MaskError::InvalidCreditCard`] unless `value` holds 12 to 19 digits,
/// optionally grouped with spaces or dashes.
pub fn credit_card(value: &str, config: &CreditCardConfig) -> Result<String, MaskError> {
    config.apply_to(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_the_last_four_digits_and_separators() {
        let config = CreditCardConfig::default();
        assert_eq!(
            credit_card("6706 7510 5149 0155", &config).unwrap(),
            "**** **** **** 0155"
        );
        assert_eq!(
            credit_card("6706-7510-5149-0155", &config).unwrap(),
            "****-****-****-0155"
        );
        assert_eq!(
            credit_card("6706751051490155", &config).unwrap(),
            "************0155"
        );
    }

    #[test]
    fn visible_suffix_and_mask_char_are_configurable() {
        let config = CreditCardConfig::last(0).with_mask_char('#');
        assert_eq!(
            credit_card("6706 7510 5149 0155", &config).unwrap(),
            "#### #### #### ####"
        );
    }

    #[test]
    fn rejects_non_card_input() {
        let config = CreditCardConfig::default();
        assert_eq!(
            credit_card("invalid_number", &config),
            Err(MaskError::InvalidCreditCard)
        );
        assert_eq!(credit_card("1234 5678", &config), Err(MaskError::InvalidCreditCard));
    }
}
