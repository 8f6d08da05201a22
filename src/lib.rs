//! Builder, parser and validator for [JSON web tokens (JWT)][JWT] signed with `HS256`.
//!
//! # Design choices
//!
//! - Claims are kept as ordered JSON maps ([`ClaimMap`]), so that custom claims of any shape
//!   can be set and read without declaring types, and so that re-encoding decoded claims
//!   yields identical bytes.
//! - Tokens are created by the fluent [`Builder`]. Setters enforce claim invariants
//!   eagerly: claim keys cannot be numeric, `exp` must be in the future, `aud` must be
//!   a string or a list of strings, and the signing secret must satisfy a [`SecretPolicy`].
//! - Verification is split into independent checks on [`Validator`] (structure, signature,
//!   expiration, maturity, audience, algorithm). The caller chooses which checks to run;
//!   **signature verification is never implied**.
//! - All fallible operations return typed errors with stable numeric codes
//!   ([`CreationError::code()`], [`ValidationError::code()`]). The [`Tokens`] facade maps
//!   these errors to `bool`s and empty maps for callers that do not need the details.
//! - Encoding and decoding go through the [`Encode`](alg::Encode) and [`Decode`](alg::Decode)
//!   traits; [`Hs256`](alg::Hs256) is the only shipped implementation.
//! - The current time is provided by a clock function in [`TimeOptions`], which makes
//!   time-related checks testable.
//!
//! # Error codes
//!
//! | Code | Error |
//! |------|-------|
//! | 1 | Invalid token structure |
//! | 2 | Audience mismatch |
//! | 3 | Invalid signature |
//! | 4 | Token expired, or expiration set in the past during creation |
//! | 5 | Token not yet usable (`nbf`) |
//! | 6 | `exp` claim not set |
//! | 7 | `nbf` claim not set |
//! | 8 | Numeric claim key |
//! | 9 | Invalid secret |
//! | 10 | `aud` claim is neither a string nor a list of strings |
//! | 11 | `aud` claim not set |
//! | 12 | Algorithm not in the allow-list |
//! | 13 | `alg` claim not set |
//! | 14 | Algorithm is `none` |
//!
//! [JWT]: https://jwt.io/
//!
//! # Examples
//!
//! Basic JWT lifecycle:
//!
//! ```
//! use chrono::{Duration, Utc};
//! use simple_jwt::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let secret = "123abcDEF!$%456";
//! // Create a token.
//! let jwt = Builder::new()
//!     .set_secret(secret)?
//!     .set_issuer("localhost")
//!     .set_subject("alice")
//!     .set_expiration((Utc::now() + Duration::minutes(10)).timestamp())?
//!     .set_not_before((Utc::now() - Duration::minutes(1)).timestamp())
//!     .set_payload_claim("uid", 2)?
//!     .build()?;
//! println!("token: {jwt}");
//!
//! // Restore the token from a string, e.g. received in an HTTP header.
//! let jwt = Jwt::new(jwt.token(), secret)?;
//! // Validate the token integrity and its claims.
//! Validator::new(&jwt)
//!     .signature()?
//!     .algorithm_not_none()?
//!     .expiration()?
//!     .not_before()?;
//! // Now, we can extract information from the token.
//! let parsed = Parser::new(&jwt).parse()?;
//! assert_eq!(parsed.subject(), "alice");
//! assert_eq!(parsed.payload()["uid"], 2);
//! # Ok(())
//! # } // end main()
//! ```
//!
//! ## Lenient API
//!
//! ```
//! # use chrono::Utc;
//! use simple_jwt::Tokens;
//!
//! # fn main() -> Result<(), simple_jwt::CreationError> {
//! let secret = "123abcDEF!$%456";
//! let jwt = Tokens::create(2, secret, Utc::now().timestamp() + 60, "localhost")?;
//! assert!(Tokens::validate(jwt.token(), secret));
//! assert!(Tokens::validate_expiration(jwt.token(), secret));
//! assert!(Tokens::payload("not.a.token", secret).is_empty());
//! # Ok(())
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/simple-jwt/0.1.0")]
#![warn(missing_debug_implementations, missing_docs, bare_trait_objects)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

pub mod alg;
pub mod base64url;
mod builder;
pub mod claims;
mod error;
mod facade;
pub mod json;
mod parsed;
mod parser;
mod secret;
mod time;
mod token;
mod validate;
mod validator;

/// Prelude to neatly import all necessary stuff from the crate.
pub mod prelude {
    pub use crate::{
        alg::{Decode as _, Encode as _},
        Builder, Jwt, Parsed, Parser, TimeOptions, Tokens, Validator,
    };
}

pub use crate::{
    alg::Renamed,
    builder::{Builder, DEFAULT_TOKEN_TYPE},
    claims::Audience,
    error::{Claim, CreationError, SecretError, ValidationError},
    facade::{Tokens, USER_ID},
    json::ClaimMap,
    parsed::Parsed,
    parser::Parser,
    secret::{SecretPolicy, ValidateSecret, DEFAULT_SPECIAL_CHARS},
    time::TimeOptions,
    token::Jwt,
    validate::ClaimValidator,
    validator::Validator,
};

#[cfg(doctest)]
doc_comment::doctest!("../README.md");
