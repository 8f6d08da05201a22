//! Decoded token claims.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::{claims, json::ClaimMap, Audience, Jwt, TimeOptions};

/// Header and payload claims decoded from a [`Jwt`] by [`Parser::parse()`](crate::Parser::parse()).
///
/// Getters never fail: a missing or mistyped string claim reads as `""`, a missing integer
/// claim reads as `0`. The claims are **not** verified; use [`Validator`](crate::Validator)
/// before trusting them.
#[derive(Debug, Clone)]
pub struct Parsed<'a> {
    jwt: &'a Jwt,
    header: ClaimMap,
    payload: ClaimMap,
    signature: String,
}

impl<'a> Parsed<'a> {
    pub(crate) fn new(jwt: &'a Jwt, header: ClaimMap, payload: ClaimMap, signature: String) -> Self {
        Self {
            jwt,
            header,
            payload,
            signature,
        }
    }

    /// Gets the token these claims were decoded from.
    pub fn jwt(&self) -> &'a Jwt {
        self.jwt
    }

    /// Gets all header claims.
    pub fn header(&self) -> &ClaimMap {
        &self.header
    }

    /// Gets all payload claims.
    pub fn payload(&self) -> &ClaimMap {
        &self.payload
    }

    /// Gets the encoded signature segment of the token.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Gets a header claim by name.
    pub fn header_claim(&self, key: &str) -> Option<&Value> {
        self.header.get(key)
    }

    /// Gets a payload claim by name.
    pub fn payload_claim(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    /// `alg` header claim.
    pub fn algorithm(&self) -> &str {
        str_claim(&self.header, claims::ALGORITHM)
    }

    /// `typ` header claim.
    pub fn token_type(&self) -> &str {
        str_claim(&self.header, claims::TOKEN_TYPE)
    }

    /// `cty` header claim.
    pub fn content_type(&self) -> &str {
        str_claim(&self.header, claims::CONTENT_TYPE)
    }

    /// `iss` claim.
    pub fn issuer(&self) -> &str {
        str_claim(&self.payload, claims::ISSUER)
    }

    /// `sub` claim.
    pub fn subject(&self) -> &str {
        str_claim(&self.payload, claims::SUBJECT)
    }

    /// `jti` claim.
    pub fn jwt_id(&self) -> &str {
        str_claim(&self.payload, claims::JWT_ID)
    }

    /// `aud` claim; `Audience::Single("")` if absent.
    pub fn audience(&self) -> Audience {
        self.payload
            .get(claims::AUDIENCE)
            .and_then(Audience::from_value)
            .unwrap_or_default()
    }

    /// `exp` claim.
    pub fn expiration(&self) -> i64 {
        int_claim(&self.payload, claims::EXPIRATION)
    }

    /// `nbf` claim.
    pub fn not_before(&self) -> i64 {
        int_claim(&self.payload, claims::NOT_BEFORE)
    }

    /// `iat` claim.
    pub fn issued_at(&self) -> i64 {
        int_claim(&self.payload, claims::ISSUED_AT)
    }

    /// Seconds left until the token expires, or 0 if it has already expired.
    pub fn expires_in<F>(&self, time_options: &TimeOptions<F>) -> i64
    where
        F: Fn() -> DateTime<Utc>,
    {
        self.expiration().saturating_sub(time_options.now()).max(0)
    }

    /// Seconds left until the token becomes usable, or 0 if it is usable already.
    pub fn usable_in<F>(&self, time_options: &TimeOptions<F>) -> i64
    where
        F: Fn() -> DateTime<Utc>,
    {
        self.not_before().saturating_sub(time_options.now()).max(0)
    }
}

fn str_claim<'m>(claims: &'m ClaimMap, key: &str) -> &'m str {
    claims.get(key).and_then(Value::as_str).unwrap_or_default()
}

fn int_claim(claims: &ClaimMap, key: &str) -> i64 {
    claims.get(key).and_then(Value::as_i64).unwrap_or_default()
}
