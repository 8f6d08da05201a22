//! Lenient convenience API.
//!
//! [`Tokens`] wraps [`Builder`], [`Parser`] and [`Validator`] for callers that prefer
//! `bool` answers and empty claim maps to typed errors. It is a thin layer: every failure
//! of the strict API is mapped to `false` / an empty map, and is logged at `debug` level.

use chrono::Utc;
use serde_json::Value;

use crate::{
    claims, json::ClaimMap, Builder, CreationError, Jwt, Parser, ValidationError, Validator,
};

/// Name of the payload claim holding the user ID in tokens created by [`Tokens::create()`].
pub const USER_ID: &str = "user_id";

/// Static helpers for creating and checking `HS256` tokens with default settings.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use simple_jwt::Tokens;
///
/// # fn main() -> Result<(), simple_jwt::CreationError> {
/// let secret = "sec!ReT423*&";
/// let expiration = Utc::now().timestamp() + 3_600;
/// let jwt = Tokens::create(12, secret, expiration, "localhost")?;
///
/// assert!(Tokens::validate(jwt.token(), secret));
/// assert!(Tokens::validate_expiration(jwt.token(), secret));
/// assert_eq!(Tokens::payload(jwt.token(), secret)["user_id"], 12);
/// assert!(!Tokens::validate(jwt.token(), "wrong-Secret123!"));
/// assert!(Tokens::payload(jwt.token(), "wrong-Secret123!").is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokens;

impl Tokens {
    /// Creates a token carrying a user ID, issuer, expiration and issuance time.
    pub fn create(
        user_id: impl Into<Value>,
        secret: &str,
        expiration: i64,
        issuer: &str,
    ) -> Result<Jwt, CreationError> {
        Self::builder()
            .set_payload_claim(USER_ID, user_id)?
            .set_secret(secret)?
            .set_expiration(expiration)?
            .set_issuer(issuer)
            .set_issued_at(Utc::now().timestamp())
            .build()
    }

    /// Creates a token with the provided payload claims.
    ///
    /// Claims are set one by one as with [`Builder::set_payload_claim()`], so standard claims
    /// such as `exp` are not checked.
    pub fn custom_payload(payload: &ClaimMap, secret: &str) -> Result<Jwt, CreationError> {
        let mut builder = Self::builder();
        for (key, value) in payload {
            builder.set_payload_claim(key.as_str(), value.clone())?;
        }
        builder.set_secret(secret)?;
        builder.build()
    }

    /// Checks the token structure and signature, and that its algorithm is not `none`.
    pub fn validate(token: &str, secret: &str) -> bool {
        Self::check(token, secret, |validator| {
            validator.signature()?.algorithm_not_none()?;
            Ok(())
        })
    }

    /// Checks that the token has not expired. The signature is not checked.
    pub fn validate_expiration(token: &str, secret: &str) -> bool {
        Self::check(token, secret, |validator| {
            validator.expiration()?;
            Ok(())
        })
    }

    /// Checks that the token is already usable as per its `nbf` claim. The signature
    /// is not checked.
    pub fn validate_not_before(token: &str, secret: &str) -> bool {
        Self::check(token, secret, |validator| {
            validator.not_before()?;
            Ok(())
        })
    }

    /// Returns header claims of a token with a valid signature, or an empty map.
    pub fn header(token: &str, secret: &str) -> ClaimMap {
        Self::verified_claims(token, secret)
            .map(|(header, _)| header)
            .unwrap_or_default()
    }

    /// Returns payload claims of a token with a valid signature, or an empty map.
    pub fn payload(token: &str, secret: &str) -> ClaimMap {
        Self::verified_claims(token, secret)
            .map(|(_, payload)| payload)
            .unwrap_or_default()
    }

    /// Returns the user ID of a token created by [`Self::create()`], if the token signature
    /// is valid.
    pub fn user_id(token: &str, secret: &str) -> Option<Value> {
        Self::payload(token, secret).remove(USER_ID)
    }

    /// Returns the issuer of a token with a valid signature, or an empty string.
    pub fn issuer(token: &str, secret: &str) -> String {
        match Self::payload(token, secret).remove(claims::ISSUER) {
            Some(Value::String(issuer)) => issuer,
            _ => String::new(),
        }
    }

    /// Creates a builder with default settings.
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Creates a parser with default settings.
    pub fn parser(jwt: &Jwt) -> Parser<'_> {
        Parser::new(jwt)
    }

    /// Creates a validator with default settings.
    pub fn validator(jwt: &Jwt) -> Validator<'_> {
        Validator::new(jwt)
    }

    fn check<C>(token: &str, secret: &str, checks: C) -> bool
    where
        C: FnOnce(&Validator<'_>) -> Result<(), ValidationError>,
    {
        let outcome = Jwt::new(token, secret).and_then(|jwt| {
            let validator = Validator::new(&jwt);
            checks(&validator)
        });
        match outcome {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(jwt.error.code = err.code(), error = %err, "token check failed");
                false
            }
        }
    }

    fn verified_claims(token: &str, secret: &str) -> Option<(ClaimMap, ClaimMap)> {
        let jwt = Jwt::new(token, secret).ok()?;
        Validator::new(&jwt).signature().ok()?;
        let parsed = Parser::new(&jwt).parse().ok()?;
        Some((parsed.header().clone(), parsed.payload().clone()))
    }
}
