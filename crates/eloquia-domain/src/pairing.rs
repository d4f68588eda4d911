//! Pairing-code value rules.

use std::fmt;

/// Number of digits in a pairing code.
pub const PAIRING_CODE_LEN: usize = 6;

/// Exclusive upper bound of the numeric code space.
pub const PAIRING_CODE_SPACE: u32 = 1_000_000;

/// Pairing code time-to-live in seconds.
pub const PAIRING_CODE_TTL_SECS: i64 = 120;

/// Attempts at drawing an unused code before issuance fails.
pub const MAX_GENERATION_ATTEMPTS: usize = 25;

/// A syntactically valid pairing code: exactly six ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PairingCodeValue(String);

impl PairingCodeValue {
    /// Zero-pad a number from `[0, PAIRING_CODE_SPACE)` into a code.
    ///
    /// ```
    /// use eloquia_domain::pairing::PairingCodeValue;
    ///
    /// assert_eq!(PairingCodeValue::from_number(42).unwrap().as_str(), "000042");
    /// assert!(PairingCodeValue::from_number(1_000_000).is_none());
    /// ```
    pub fn from_number(n: u32) -> Option<Self> {
        (n < PAIRING_CODE_SPACE).then(|| Self(format!("{n:06}")))
    }

    /// Normalize user input: trim, drop inner spaces and hyphens, then require
    /// exactly six ASCII digits.
    pub fn normalize(raw: &str) -> Option<Self> {
        let cleaned: String = raw
            .trim()
            .chars()
            .filter(|c| *c != ' ' && *c != '-')
            .collect();
        let valid = cleaned.len() == PAIRING_CODE_LEN && cleaned.bytes().all(|b| b.is_ascii_digit());
        valid.then_some(Self(cleaned))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PairingCodeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
