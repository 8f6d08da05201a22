//! Claim names and typed claim values.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `iss` claim.
pub const ISSUER: &str = "iss";
/// `sub` claim.
pub const SUBJECT: &str = "sub";
/// `aud` claim.
pub const AUDIENCE: &str = "aud";
/// `exp` claim.
pub const EXPIRATION: &str = "exp";
/// `nbf` claim.
pub const NOT_BEFORE: &str = "nbf";
/// `iat` claim.
pub const ISSUED_AT: &str = "iat";
/// `jti` claim.
pub const JWT_ID: &str = "jti";
/// `alg` header claim.
pub const ALGORITHM: &str = "alg";
/// `typ` header claim.
pub const TOKEN_TYPE: &str = "typ";
/// `cty` header claim.
pub const CONTENT_TYPE: &str = "cty";

/// Checks whether a claim key is the canonical form of an `i64` (e.g., `"12"` or `"-3"`,
/// but not `"007"`, `"-0"` or `"+1"`).
///
/// Such keys are rejected, so that a claim map is never confused with a JSON array.
pub(crate) fn is_numeric_key(key: &str) -> bool {
    key.parse::<i64>()
        .is_ok_and(|number| number.to_string() == key)
}

/// Value of the `aud` claim: either a single audience or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    /// Single audience.
    Single(String),
    /// List of audiences.
    Multiple(Vec<String>),
}

impl Default for Audience {
    fn default() -> Self {
        Self::Single(String::new())
    }
}

impl Audience {
    /// Converts a JSON value into an audience. Returns `None` if the value is neither
    /// a string nor an array of strings.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(audience) => Some(Self::Single(audience.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_owned))
                .collect::<Option<Vec<_>>>()
                .map(Self::Multiple),
            _ => None,
        }
    }

    /// Checks whether `check` is this audience, or is contained in the audience list.
    pub fn contains(&self, check: &str) -> bool {
        match self {
            Self::Single(audience) => audience == check,
            Self::Multiple(audiences) => audiences.iter().any(|audience| audience == check),
        }
    }
}

impl From<&str> for Audience {
    fn from(audience: &str) -> Self {
        Self::Single(audience.to_owned())
    }
}

impl From<String> for Audience {
    fn from(audience: String) -> Self {
        Self::Single(audience)
    }
}

impl From<Vec<String>> for Audience {
    fn from(audiences: Vec<String>) -> Self {
        Self::Multiple(audiences)
    }
}

impl From<Audience> for Value {
    fn from(audience: Audience) -> Self {
        match audience {
            Audience::Single(audience) => Value::String(audience),
            Audience::Multiple(audiences) => {
                Value::Array(audiences.into_iter().map(Value::String).collect())
            }
        }
    }
}
