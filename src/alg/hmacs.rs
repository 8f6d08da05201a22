//! HMAC computation over the SHA-2 family.

use hmac::{digest::KeyInit, Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

use core::fmt;

/// Hash function backing an HMAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum HashAlgorithm {
    /// SHA-256; used by `HS256`.
    Sha256,
    /// SHA-384.
    Sha384,
    /// SHA-512.
    Sha512,
}

impl HashAlgorithm {
    /// Returns the conventional lowercase name of the hash function.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }

    /// Returns the digest length in bytes.
    pub fn output_len(self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// Computes the HMAC of `message` keyed with `secret` and returns the raw digest bytes.
pub fn hash(algorithm: HashAlgorithm, message: &[u8], secret: &[u8]) -> Vec<u8> {
    match algorithm {
        HashAlgorithm::Sha256 => mac::<Hmac<Sha256>>(message, secret),
        HashAlgorithm::Sha384 => mac::<Hmac<Sha384>>(message, secret),
        HashAlgorithm::Sha512 => mac::<Hmac<Sha512>>(message, secret),
    }
}

fn mac<M: Mac + KeyInit>(message: &[u8], secret: &[u8]) -> Vec<u8> {
    let mut hmac = <M as Mac>::new_from_slice(secret).expect("HMACs work with any key size");
    hmac.update(message);
    hmac.finalize().into_bytes().to_vec()
}
