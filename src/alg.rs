//! Token encoding and signing algorithms.
//!
//! [`Encode`] and [`Decode`] are the seams through which [`Builder`](crate::Builder),
//! [`Parser`](crate::Parser) and [`Validator`](crate::Validator) reach the wire format.
//! The crate ships a single implementation of both, [`Hs256`].

use crate::{
    base64url,
    json::{self, ClaimMap},
};

use std::borrow::Cow;

mod hmacs;

pub use self::hmacs::{hash, HashAlgorithm};

/// Encoding capability: serializes claim maps into token segments and signs them.
///
/// Outputs of [`Self::encode()`] and [`Self::sign()`] must be non-empty strings
/// of base64url chars (`A-Z`, `a-z`, `0-9`, `-`, `_`, optionally `=`);
/// [`Builder::build()`](crate::Builder::build()) panics otherwise.
pub trait Encode {
    /// Returns the name of this algorithm, as mentioned in the `alg` field of the JWT header.
    fn algorithm(&self) -> Cow<'static, str>;

    /// Encodes a claim map into a token segment.
    fn encode(&self, claims: &ClaimMap) -> String;

    /// Signs an already encoded `header.payload` string and returns the encoded signature.
    fn sign(&self, signing_input: &str, secret: &str) -> String;

    /// Computes the encoded signature for the provided `header` and `payload`.
    fn signature(&self, header: &ClaimMap, payload: &ClaimMap, secret: &str) -> String {
        let signing_input = format!("{}.{}", self.encode(header), self.encode(payload));
        self.sign(&signing_input, secret)
    }
}

/// Decoding capability: restores a claim map from a token segment.
pub trait Decode {
    /// Decodes a header or payload segment.
    ///
    /// Segments that are not valid base64url-encoded JSON objects decode to an empty map.
    fn decode(&self, segment: &str) -> ClaimMap;
}

/// `HS256` algorithm: HMAC with SHA-256 over base64url-encoded JSON segments.
///
/// See [RFC 7518] for the algorithm specification.
///
/// [RFC 7518]: https://tools.ietf.org/html/rfc7518#section-3.2
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Hs256;

impl Encode for Hs256 {
    fn algorithm(&self) -> Cow<'static, str> {
        Cow::Borrowed("HS256")
    }

    fn encode(&self, claims: &ClaimMap) -> String {
        base64url::encode(json::encode(claims))
    }

    fn sign(&self, signing_input: &str, secret: &str) -> String {
        let digest = hash(
            HashAlgorithm::Sha256,
            signing_input.as_bytes(),
            secret.as_bytes(),
        );
        base64url::encode(digest)
    }
}

impl Decode for Hs256 {
    fn decode(&self, segment: &str) -> ClaimMap {
        let bytes = match base64url::decode(segment) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::trace!(error = %err, "segment is not valid base64url; using empty claims");
                return ClaimMap::new();
            }
        };
        match String::from_utf8(bytes) {
            Ok(text) => json::decode(&text),
            Err(err) => {
                tracing::trace!(error = %err, "segment is not valid UTF-8; using empty claims");
                ClaimMap::new()
            }
        }
    }
}

/// Encoder that uses a custom name for the `alg` header field while delegating
/// encoding and signing to the wrapped encoder.
///
/// # Examples
///
/// ```
/// use simple_jwt::{alg::{Encode, Hs256}, Renamed};
///
/// let alg = Renamed::new(Hs256, "HS2");
/// assert_eq!(alg.algorithm(), "HS2");
/// assert_eq!(alg.sign("a.b", "secret"), Hs256.sign("a.b", "secret"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Renamed<E> {
    inner: E,
    name: &'static str,
}

impl<E: Encode> Renamed<E> {
    /// Creates a renamed encoder.
    pub fn new(encoder: E, new_name: &'static str) -> Self {
        Self {
            inner: encoder,
            name: new_name,
        }
    }
}

impl<E: Encode> Encode for Renamed<E> {
    fn algorithm(&self) -> Cow<'static, str> {
        Cow::Borrowed(self.name)
    }

    fn encode(&self, claims: &ClaimMap) -> String {
        self.inner.encode(claims)
    }

    fn sign(&self, signing_input: &str, secret: &str) -> String {
        self.inner.sign(signing_input, secret)
    }
}
