//! Error handling.
//!
//! Every error carries a stable numeric code (see [`CreationError::code()`] and
//! [`ValidationError::code()`]) so that callers can branch on it without matching variants.

use core::fmt;

/// Identifier of a claim that must be present for a check to proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Claim {
    /// `exp` claim (expiration time).
    Expiration,
    /// `nbf` claim (valid not before).
    NotBefore,
    /// `aud` claim (intended audience).
    Audience,
    /// `alg` header claim (signing algorithm).
    Algorithm,
}

impl Claim {
    /// Returns the name of the claim as it appears in the token.
    pub fn name(self) -> &'static str {
        match self {
            Self::Expiration => "exp",
            Self::NotBefore => "nbf",
            Self::Audience => "aud",
            Self::Algorithm => "alg",
        }
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// Reasons a signing secret can be rejected by a [`SecretPolicy`](crate::SecretPolicy).
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SecretError {
    /// Secret is shorter than the required length.
    TooShort {
        /// Minimum accepted length in chars.
        min_length: usize,
        /// Actual length of the secret in chars.
        actual: usize,
    },
    /// Secret contains no ASCII digit.
    NoDigit,
    /// Secret contains no uppercase letter.
    NoUppercase,
    /// Secret contains no lowercase letter.
    NoLowercase,
    /// Secret contains none of the required special chars.
    NoSpecialChar {
        /// Special chars accepted by the policy.
        allowed: String,
    },
}

impl fmt::Display for SecretError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { min_length, actual } => write!(
                formatter,
                "secret must be at least {min_length} characters long, got {actual}"
            ),
            Self::NoDigit => formatter.write_str("secret must contain a number"),
            Self::NoUppercase => formatter.write_str("secret must contain an uppercase letter"),
            Self::NoLowercase => formatter.write_str("secret must contain a lowercase letter"),
            Self::NoSpecialChar { allowed } => write!(
                formatter,
                "secret must contain one of the special characters `{allowed}`"
            ),
        }
    }
}

impl std::error::Error for SecretError {}

/// Errors that can occur during token creation.
#[derive(Debug)]
#[non_exhaustive]
pub enum CreationError {
    /// Expiration time is not in the future.
    Expired,
    /// Claim key looks like an integer, which is not allowed.
    InvalidClaim {
        /// Offending claim key.
        key: String,
    },
    /// Signing secret does not satisfy the secret policy.
    InvalidSecret(SecretError),
    /// `aud` claim is neither a string nor an array of strings.
    InvalidAudience,
}

impl CreationError {
    /// Returns the stable numeric code of this error.
    pub fn code(&self) -> u16 {
        match self {
            Self::Expired => 4,
            Self::InvalidClaim { .. } => 8,
            Self::InvalidSecret(_) => 9,
            Self::InvalidAudience => 10,
        }
    }
}

impl fmt::Display for CreationError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expired => formatter.write_str("Expiration claim has expired"),
            Self::InvalidClaim { key } => write!(
                formatter,
                "Claim key `{key}` is numeric; claim keys must be non-numeric strings"
            ),
            Self::InvalidSecret(e) => write!(formatter, "Invalid secret: {e}"),
            Self::InvalidAudience => formatter
                .write_str("Audience claim must be a string or an array of strings"),
        }
    }
}

impl std::error::Error for CreationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidSecret(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SecretError> for CreationError {
    fn from(error: SecretError) -> Self {
        Self::InvalidSecret(error)
    }
}

/// Errors that can occur during token parsing and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    /// Token has invalid structure.
    ///
    /// Valid tokens must consist of 3 base64url-encoded parts (header, claims, and signature)
    /// separated by periods.
    InvalidStructure,
    /// `aud` claim does not contain the checked audience.
    AudienceMismatch,
    /// Token signature has failed verification.
    InvalidSignature,
    /// Token has expired.
    Expired,
    /// Token is not yet valid as per `nbf` claim.
    NotMature,
    /// Claim requested during validation is not present in the token.
    NoClaim(Claim),
    /// Algorithm mentioned in the token header is not in the allow-list.
    AlgorithmNotAllowed {
        /// Actual algorithm in the token.
        actual: String,
    },
    /// Algorithm mentioned in the token header is `none`.
    AlgorithmNone,
}

impl ValidationError {
    /// Returns the stable numeric code of this error.
    pub fn code(&self) -> u16 {
        match self {
            Self::InvalidStructure => 1,
            Self::AudienceMismatch => 2,
            Self::InvalidSignature => 3,
            Self::Expired => 4,
            Self::NotMature => 5,
            Self::NoClaim(Claim::Expiration) => 6,
            Self::NoClaim(Claim::NotBefore) => 7,
            Self::NoClaim(Claim::Audience) => 11,
            Self::AlgorithmNotAllowed { .. } => 12,
            Self::NoClaim(Claim::Algorithm) => 13,
            Self::AlgorithmNone => 14,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStructure => formatter.write_str("Invalid token structure"),
            Self::AudienceMismatch => {
                formatter.write_str("Audience claim does not contain the provided value")
            }
            Self::InvalidSignature => formatter.write_str("Signature has failed verification"),
            Self::Expired => formatter.write_str("Token has expired"),
            Self::NotMature => formatter.write_str("Token is not yet ready"),
            Self::NoClaim(claim) => write!(
                formatter,
                "Claim `{claim}` requested during validation is not present in the token"
            ),
            Self::AlgorithmNotAllowed { actual } => {
                write!(formatter, "Token algorithm ({actual}) is not allowed")
            }
            Self::AlgorithmNone => formatter.write_str("Token algorithm is `none`"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_codes_are_stable() {
        let errors = [
            (ValidationError::InvalidStructure, 1),
            (ValidationError::AudienceMismatch, 2),
            (ValidationError::InvalidSignature, 3),
            (ValidationError::Expired, 4),
            (ValidationError::NotMature, 5),
            (ValidationError::NoClaim(Claim::Expiration), 6),
            (ValidationError::NoClaim(Claim::NotBefore), 7),
            (ValidationError::NoClaim(Claim::Audience), 11),
            (
                ValidationError::AlgorithmNotAllowed {
                    actual: "HS512".to_owned(),
                },
                12,
            ),
            (ValidationError::NoClaim(Claim::Algorithm), 13),
            (ValidationError::AlgorithmNone, 14),
        ];
        for (error, code) in &errors {
            assert_eq!(error.code(), *code, "{error}");
        }
    }

    #[test]
    fn creation_codes_are_stable() {
        assert_eq!(CreationError::Expired.code(), 4);
        let err = CreationError::InvalidClaim {
            key: "1".to_owned(),
        };
        assert_eq!(err.code(), 8);
        assert_eq!(CreationError::from(SecretError::NoDigit).code(), 9);
        assert_eq!(CreationError::InvalidAudience.code(), 10);
    }

    #[test]
    fn missing_claim_is_named_in_message() {
        let message = ValidationError::NoClaim(Claim::Audience).to_string();
        assert!(message.contains("`aud`"), "{message}");
    }
}
