//! IPv4 address masker.

use std::net::Ipv4Addr;

use super::MaskError;
use crate::redact::MASK_CHAR;

const OCTETS: usize = 4;

/// Configuration of the [`ipv4_addr`] masker.
///
/// Masks the trailing `octets_to_mask` octets (1 by default, at most 4), each
/// with three mask characters, or with one when
/// [`Ipv4AddrConfig::with_one_octet_symbol`] is set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ipv4AddrConfig {
    /// Number of trailing octets to mask.
    octets_to_mask: usize,
    /// Mask an octet with a single character instead of three.
    one_octet_symbol: bool,
    /// Symbol used to mask octets.
    mask_char: char,
}

impl Ipv4AddrConfig {
    /// Creates a configuration masking the last `octets_to_mask` octets.
    #[must_use]
    pub fn last(octets_to_mask: usize) -> Self {
        Self {
            octets_to_mask: octets_to_mask.min(OCTETS),
            one_octet_symbol: false,
            mask_char: MASK_CHAR,
        }
    }

    /// Masks each octet with a single character.
    #[must_use]
    pub fn with_one_octet_symbol(mut self, one_octet_symbol: bool) -> Self {
        self.one_octet_symbol = one_octet_symbol;
        self
    }

    /// Uses a specific masking character.
    #[must_use]
    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }

    pub(crate) fn apply_to(&self, value: &str) -> Result<String, MaskError> {
        if value.contains(':') || value.parse::<Ipv4Addr>().is_err() {
            return Err(MaskError::InvalidIpv4Addr);
        }

        let symbol: String = if self.one_octet_symbol {
            self.mask_char.to_string()
        } else {
            std::iter::repeat_n(self.mask_char, 3).collect()
        };
        let keep = OCTETS - self.octets_to_mask;
        let octets: Vec<&str> = value
            .split('.')
            .enumerate()
            .map(|(index, octet)| if index < keep { octet } else { symbol.as_str() })
            .collect();
        Ok(octets.join("."))
    }
}

impl Default for Ipv4AddrConfig {
    fn default() -> Self {
        Self::last(1)
    }
}

/// Masks an IPv4 address according to `config`.
///
/// # Errors
///
/// [`MaskError::InvalidIpv4Addr`] unless `value` is a dotted-quad IPv4
/// address.
pub fn ipv4_addr(value: &str, config: &Ipv4AddrConfig) -> Result<String, MaskError> {
    config.apply_to(value)
}
