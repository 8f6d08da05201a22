//! Fluent token builder.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use zeroize::Zeroize;

use core::fmt;

use crate::{
    alg::{Encode, Hs256},
    claims::{self, is_numeric_key},
    json::ClaimMap,
    Audience, CreationError, Jwt, SecretPolicy, TimeOptions, ValidateSecret,
};

/// Default value of the `typ` header claim.
pub const DEFAULT_TOKEN_TYPE: &str = "JWT";

/// Accumulates header and payload claims and signs them into a [`Jwt`].
///
/// Setters mutate the builder in place and return it, so that calls can be chained;
/// fallible setters return a `Result` to be unwrapped with `?` inside the chain.
/// A builder is not meant to be shared between threads; use one builder per token,
/// or call [`Self::reset()`] between tokens.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use simple_jwt::Builder;
///
/// # fn main() -> Result<(), simple_jwt::CreationError> {
/// let jwt = Builder::new()
///     .set_secret("sec!ReT423*&")?
///     .set_issuer("localhost")
///     .set_expiration(Utc::now().timestamp() + 3_600)?
///     .set_payload_claim("uid", 12)?
///     .build()?;
/// assert_eq!(jwt.token().matches('.').count(), 2);
/// # Ok(())
/// # }
/// ```
pub struct Builder<E = Hs256, P = SecretPolicy, F = fn() -> DateTime<Utc>> {
    encoder: E,
    secret_policy: P,
    time_options: TimeOptions<F>,
    token_type: String,
    header: ClaimMap,
    payload: ClaimMap,
    secret: String,
}

impl<E: fmt::Debug, P: fmt::Debug, F> fmt::Debug for Builder<E, P, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Builder")
            .field("encoder", &self.encoder)
            .field("secret_policy", &self.secret_policy)
            .field("header", &self.header)
            .field("payload", &self.payload)
            .field("secret", &"_")
            .finish_non_exhaustive()
    }
}

impl<E, P, F> Drop for Builder<E, P, F> {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// Creates a builder for `HS256` tokens with the default secret policy and system clock.
    pub fn new() -> Self {
        Self::with_parts(Hs256, SecretPolicy::default(), TimeOptions::default())
    }
}

impl<E, P, F> Builder<E, P, F>
where
    E: Encode,
    P: ValidateSecret,
    F: Fn() -> DateTime<Utc>,
{
    /// Creates a builder from its collaborators.
    pub fn with_parts(encoder: E, secret_policy: P, time_options: TimeOptions<F>) -> Self {
        let token_type = DEFAULT_TOKEN_TYPE.to_owned();
        Self {
            encoder,
            secret_policy,
            time_options,
            header: Self::initial_header(&token_type),
            token_type,
            payload: ClaimMap::new(),
            secret: String::new(),
        }
    }

    fn initial_header(token_type: &str) -> ClaimMap {
        let mut header = ClaimMap::new();
        header.insert(claims::TOKEN_TYPE.to_owned(), Value::from(token_type));
        header
    }

    /// Sets the `typ` header claim used by this builder, including after [`Self::reset()`].
    #[must_use]
    pub fn with_type(mut self, token_type: impl Into<String>) -> Self {
        self.token_type = token_type.into();
        self.header
            .insert(claims::TOKEN_TYPE.to_owned(), Value::from(self.token_type.as_str()));
        self
    }

    /// Sets the `cty` header claim.
    pub fn set_content_type(&mut self, content_type: impl Into<String>) -> &mut Self {
        self.header
            .insert(claims::CONTENT_TYPE.to_owned(), Value::String(content_type.into()));
        self
    }

    /// Sets an arbitrary header claim.
    ///
    /// The `alg` claim is always overwritten by the encoder when the token is built.
    pub fn set_header_claim(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<&mut Self, CreationError> {
        let key = checked_key(key.into())?;
        self.header.insert(key, value.into());
        Ok(self)
    }

    /// Sets the signing secret after checking it against the secret policy.
    pub fn set_secret(&mut self, secret: impl Into<String>) -> Result<&mut Self, CreationError> {
        let mut secret = secret.into();
        if let Err(err) = self.secret_policy.validate(&secret) {
            secret.zeroize();
            return Err(err.into());
        }
        self.secret.zeroize();
        self.secret = secret;
        Ok(self)
    }

    /// Sets the `exp` claim. The timestamp must be in the future.
    pub fn set_expiration(&mut self, timestamp: i64) -> Result<&mut Self, CreationError> {
        if timestamp <= self.time_options.now() {
            return Err(CreationError::Expired);
        }
        self.payload
            .insert(claims::EXPIRATION.to_owned(), Value::from(timestamp));
        Ok(self)
    }

    /// Sets `iat` to the current time and `exp` to `duration` after it.
    pub fn set_duration_and_issuance(
        &mut self,
        duration: Duration,
    ) -> Result<&mut Self, CreationError> {
        let issued_at = self.time_options.now();
        self.set_expiration(issued_at.saturating_add(duration.num_seconds()))?;
        Ok(self.set_issued_at(issued_at))
    }

    /// Sets the `nbf` claim.
    pub fn set_not_before(&mut self, timestamp: i64) -> &mut Self {
        self.payload
            .insert(claims::NOT_BEFORE.to_owned(), Value::from(timestamp));
        self
    }

    /// Sets the `iat` claim.
    pub fn set_issued_at(&mut self, timestamp: i64) -> &mut Self {
        self.payload
            .insert(claims::ISSUED_AT.to_owned(), Value::from(timestamp));
        self
    }

    /// Sets the `iss` claim.
    pub fn set_issuer(&mut self, issuer: impl Into<String>) -> &mut Self {
        self.payload
            .insert(claims::ISSUER.to_owned(), Value::String(issuer.into()));
        self
    }

    /// Sets the `sub` claim.
    pub fn set_subject(&mut self, subject: impl Into<String>) -> &mut Self {
        self.payload
            .insert(claims::SUBJECT.to_owned(), Value::String(subject.into()));
        self
    }

    /// Sets the `jti` claim.
    pub fn set_jwt_id(&mut self, jwt_id: impl Into<String>) -> &mut Self {
        self.payload
            .insert(claims::JWT_ID.to_owned(), Value::String(jwt_id.into()));
        self
    }

    /// Sets the `aud` claim, which must be a string or an array of strings.
    pub fn set_audience(&mut self, audience: impl Into<Value>) -> Result<&mut Self, CreationError> {
        let audience = audience.into();
        let audience = Audience::from_value(&audience).ok_or(CreationError::InvalidAudience)?;
        self.payload
            .insert(claims::AUDIENCE.to_owned(), audience.into());
        Ok(self)
    }

    /// Sets an arbitrary payload claim.
    pub fn set_payload_claim(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<&mut Self, CreationError> {
        let key = checked_key(key.into())?;
        self.payload.insert(key, value.into());
        Ok(self)
    }

    /// Returns the header the token would be built with, including the `alg` claim.
    pub fn header(&self) -> ClaimMap {
        let mut header = self.header.clone();
        header.insert(
            claims::ALGORITHM.to_owned(),
            Value::from(self.encoder.algorithm().into_owned()),
        );
        header
    }

    /// Returns the accumulated payload claims.
    pub fn payload(&self) -> &ClaimMap {
        &self.payload
    }

    /// Clears all claims and the secret, returning the builder to its initial state.
    pub fn reset(&mut self) -> &mut Self {
        self.header = Self::initial_header(&self.token_type);
        self.payload.clear();
        self.secret.zeroize();
        self
    }

    /// Signs the accumulated claims and creates a token.
    ///
    /// # Errors
    ///
    /// Returns [`CreationError::InvalidSecret`] if no valid secret has been set.
    ///
    /// # Panics
    ///
    /// Panics if the encoder produces a segment that is not base64url; see [`Encode`].
    pub fn build(&self) -> Result<Jwt, CreationError> {
        self.secret_policy.validate(&self.secret)?;

        let header = self.header();
        let signature = self
            .encoder
            .signature(&header, &self.payload, &self.secret);
        let token = format!(
            "{}.{}.{}",
            self.encoder.encode(&header),
            self.encoder.encode(&self.payload),
            signature
        );
        tracing::debug!(
            jwt.alg = %self.encoder.algorithm(),
            jwt.claims = self.payload.len(),
            jwt.len = token.len(),
            "built token"
        );

        Ok(Jwt::new(token, self.secret.as_str())
            .expect("encoder produced a token with invalid structure"))
    }
}

fn checked_key(key: String) -> Result<String, CreationError> {
    if is_numeric_key(&key) {
        Err(CreationError::InvalidClaim { key })
    } else {
        Ok(key)
    }
}
