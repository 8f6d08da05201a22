//! Token parsing.

use serde_json::Value;

use crate::{
    alg::{Decode, Hs256},
    claims,
    json::ClaimMap,
    Audience, Claim, Jwt, Parsed, ValidationError,
};

/// Splits a [`Jwt`] into segments and decodes its header and payload.
///
/// Claim getters decode the relevant segment on every call and fail with
/// [`ValidationError::NoClaim`] if the claim is absent. Use [`Self::parse()`] to decode
/// the token once and access claims with defaults instead.
#[derive(Debug, Clone)]
pub struct Parser<'a, D = Hs256> {
    jwt: &'a Jwt,
    decoder: D,
}

impl<'a> Parser<'a> {
    /// Creates a parser for `HS256` tokens.
    pub fn new(jwt: &'a Jwt) -> Self {
        Self::with_decoder(jwt, Hs256)
    }
}

impl<'a, D: Decode> Parser<'a, D> {
    /// Creates a parser with the specified decoder.
    pub fn with_decoder(jwt: &'a Jwt, decoder: D) -> Self {
        Self { jwt, decoder }
    }

    /// Decodes the header and payload of the token.
    ///
    /// Missing claims do not cause an error here; they are defaulted by [`Parsed`] getters.
    ///
    /// # Errors
    ///
    /// Fails if the token does not consist of exactly 3 segments.
    pub fn parse(&self) -> Result<Parsed<'a>, ValidationError> {
        let [header, payload, signature] = self.jwt.segments()?;
        Ok(Parsed::new(
            self.jwt,
            self.decoder.decode(header),
            self.decoder.decode(payload),
            signature.to_owned(),
        ))
    }

    /// Gets the token being parsed.
    pub fn jwt(&self) -> &'a Jwt {
        self.jwt
    }

    /// Gets the token string.
    pub fn token(&self) -> &'a str {
        self.jwt.token()
    }

    /// Gets the secret the token is signed with.
    pub fn secret(&self) -> &'a str {
        self.jwt.secret()
    }

    /// Gets the encoded signature segment.
    pub fn signature(&self) -> Result<&'a str, ValidationError> {
        let [_, _, signature] = self.jwt.segments()?;
        Ok(signature)
    }

    /// Gets the encoded `header.payload` part of the token covered by the signature.
    pub fn signing_input(&self) -> Result<&'a str, ValidationError> {
        self.jwt
            .token()
            .rsplit_once('.')
            .map(|(signing_input, _)| signing_input)
            .ok_or(ValidationError::InvalidStructure)
    }

    /// Decodes the header segment.
    pub fn decoded_header(&self) -> Result<ClaimMap, ValidationError> {
        let [header, _, _] = self.jwt.segments()?;
        Ok(self.decoder.decode(header))
    }

    /// Decodes the payload segment.
    pub fn decoded_payload(&self) -> Result<ClaimMap, ValidationError> {
        let [_, payload, _] = self.jwt.segments()?;
        Ok(self.decoder.decode(payload))
    }

    /// Gets the `exp` claim.
    pub fn expiration(&self) -> Result<i64, ValidationError> {
        let payload = self.decoded_payload()?;
        payload
            .get(claims::EXPIRATION)
            .and_then(Value::as_i64)
            .ok_or(ValidationError::NoClaim(Claim::Expiration))
    }

    /// Gets the `nbf` claim.
    pub fn not_before(&self) -> Result<i64, ValidationError> {
        let payload = self.decoded_payload()?;
        payload
            .get(claims::NOT_BEFORE)
            .and_then(Value::as_i64)
            .ok_or(ValidationError::NoClaim(Claim::NotBefore))
    }

    /// Gets the `aud` claim.
    pub fn audience(&self) -> Result<Audience, ValidationError> {
        let payload = self.decoded_payload()?;
        payload
            .get(claims::AUDIENCE)
            .and_then(Audience::from_value)
            .ok_or(ValidationError::NoClaim(Claim::Audience))
    }

    /// Gets the `alg` header claim.
    pub fn algorithm(&self) -> Result<String, ValidationError> {
        let mut header = self.decoded_header()?;
        match header.remove(claims::ALGORITHM) {
            Some(Value::String(algorithm)) => Ok(algorithm),
            _ => Err(ValidationError::NoClaim(Claim::Algorithm)),
        }
    }
}
