//! Strength policy for signing secrets.

use crate::SecretError;

/// Special chars accepted by the default [`SecretPolicy`].
pub const DEFAULT_SPECIAL_CHARS: &str = "*&!@%^#$";

/// Capability to check a signing secret before it is used.
pub trait ValidateSecret {
    /// Checks `secret`, returning the first violated rule on failure.
    fn validate(&self, secret: &str) -> Result<(), SecretError>;

    /// Convenience wrapper around [`Self::validate()`].
    fn is_valid(&self, secret: &str) -> bool {
        self.validate(secret).is_ok()
    }
}

/// Secret strength policy.
///
/// A secret is accepted if it has at least [`Self::min_length`] chars and contains a digit,
/// an uppercase letter, a lowercase letter and one of [`Self::special_chars`]. Rules are checked
/// in this order, and the first violated one is reported.
///
/// # Examples
///
/// ```
/// use simple_jwt::{SecretError, SecretPolicy, ValidateSecret};
///
/// let policy = SecretPolicy::default();
/// assert!(policy.is_valid("sec!ReT423*&"));
/// assert_eq!(policy.validate("sec!ReT423&").unwrap_err(), SecretError::TooShort {
///     min_length: 12,
///     actual: 11,
/// });
/// assert_eq!(policy.validate("secret!ReTtt*&").unwrap_err(), SecretError::NoDigit);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct SecretPolicy {
    /// Minimum secret length in chars.
    pub min_length: usize,
    /// Chars of which at least one must be present in the secret.
    pub special_chars: String,
}

impl Default for SecretPolicy {
    fn default() -> Self {
        Self {
            min_length: 12,
            special_chars: DEFAULT_SPECIAL_CHARS.to_owned(),
        }
    }
}

impl SecretPolicy {
    /// Sets the minimum secret length.
    #[must_use]
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Sets the accepted special chars.
    #[must_use]
    pub fn with_special_chars(mut self, special_chars: impl Into<String>) -> Self {
        self.special_chars = special_chars.into();
        self
    }
}

impl ValidateSecret for SecretPolicy {
    fn validate(&self, secret: &str) -> Result<(), SecretError> {
        let len = secret.chars().count();
        if len < self.min_length {
            return Err(SecretError::TooShort {
                min_length: self.min_length,
                actual: len,
            });
        }
        if !secret.chars().any(|ch| ch.is_ascii_digit()) {
            return Err(SecretError::NoDigit);
        }
        if !secret.chars().any(|ch| ch.is_ascii_uppercase()) {
            return Err(SecretError::NoUppercase);
        }
        if !secret.chars().any(|ch| ch.is_ascii_lowercase()) {
            return Err(SecretError::NoLowercase);
        }
        if !secret.chars().any(|ch| self.special_chars.contains(ch)) {
            return Err(SecretError::NoSpecialChar {
                allowed: self.special_chars.clone(),
            });
        }
        Ok(())
    }
}
