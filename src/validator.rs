//! Token validation.

use chrono::{DateTime, Utc};

use crate::{
    alg::{Decode, Encode, Hs256},
    ClaimValidator, Jwt, Parser, ValidationError,
};

/// Checks a single token against its secret and its claims.
///
/// Each check is independent and may be invoked in any order; a check returns the validator
/// on success, so checks can be chained with `?`. The validator does not enforce which checks
/// are run: callers relying on the token for any security decision must call
/// [`Self::signature()`], and should call [`Self::algorithm_not_none()`].
///
/// The clock is read separately by each time-related check.
///
/// [`Self::signature()`] signs the raw `header.payload` segments of the token as received.
/// It does not re-encode the decoded claims, so tokens whose JSON is formatted differently
/// from [`Encode::encode()`] output still verify.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use simple_jwt::{Builder, Validator};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let jwt = Builder::new()
///     .set_secret("sec!ReT423*&")?
///     .set_expiration(Utc::now().timestamp() + 3_600)?
///     .set_audience("https://example.com")?
///     .build()?;
///
/// Validator::new(&jwt)
///     .structure()?
///     .signature()?
///     .algorithm_not_none()?
///     .expiration()?
///     .audience("https://example.com")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Validator<'a, E = Hs256, D = Hs256, F = fn() -> DateTime<Utc>> {
    parser: Parser<'a, D>,
    encoder: E,
    claim_validator: ClaimValidator<F>,
}

impl<'a> Validator<'a> {
    /// Creates a validator for an `HS256` token using the system clock.
    pub fn new(jwt: &'a Jwt) -> Self {
        Self::with_parts(Parser::new(jwt), Hs256, ClaimValidator::default())
    }
}

impl<'a, E, D, F> Validator<'a, E, D, F>
where
    E: Encode,
    D: Decode,
    F: Fn() -> DateTime<Utc>,
{
    /// Creates a validator from its collaborators.
    pub fn with_parts(parser: Parser<'a, D>, encoder: E, claim_validator: ClaimValidator<F>) -> Self {
        Self {
            parser,
            encoder,
            claim_validator,
        }
    }

    /// Gets the parser used by this validator.
    pub fn parser(&self) -> &Parser<'a, D> {
        &self.parser
    }

    fn fail(&self, err: ValidationError) -> ValidationError {
        tracing::debug!(
            jwt.error.code = err.code(),
            error = %err,
            "token validation failed"
        );
        err
    }

    /// Checks that the token has the shape of a JWT.
    pub fn structure(&self) -> Result<&Self, ValidationError> {
        if self.claim_validator.structure(self.parser.token()) {
            Ok(self)
        } else {
            Err(self.fail(ValidationError::InvalidStructure))
        }
    }

    /// Re-signs the encoded header and payload segments with the secret and compares
    /// the result with the token signature in constant time.
    ///
    /// The segments are signed as they appear in the token; decoded claims are not re-encoded.
    pub fn signature(&self) -> Result<&Self, ValidationError> {
        let signing_input = self.parser.signing_input().map_err(|err| self.fail(err))?;
        let actual = self.parser.signature().map_err(|err| self.fail(err))?;
        let generated = self.encoder.sign(signing_input, self.parser.secret());

        if self.claim_validator.signature(&generated, actual) {
            Ok(self)
        } else {
            Err(self.fail(ValidationError::InvalidSignature))
        }
    }

    /// Checks that the token has an `exp` claim in the future.
    pub fn expiration(&self) -> Result<&Self, ValidationError> {
        let expiration = self.parser.expiration().map_err(|err| self.fail(err))?;
        if self.claim_validator.expiration(expiration) {
            Ok(self)
        } else {
            Err(self.fail(ValidationError::Expired))
        }
    }

    /// Checks that the token has a non-zero `nbf` claim that has already passed.
    pub fn not_before(&self) -> Result<&Self, ValidationError> {
        let not_before = self.parser.not_before().map_err(|err| self.fail(err))?;
        if self.claim_validator.not_before(not_before) {
            Ok(self)
        } else {
            Err(self.fail(ValidationError::NotMature))
        }
    }

    /// Checks that the `aud` claim is `check`, or contains it.
    pub fn audience(&self, check: &str) -> Result<&Self, ValidationError> {
        let audience = self.parser.audience().map_err(|err| self.fail(err))?;
        if self.claim_validator.audience(&audience, check) {
            Ok(self)
        } else {
            Err(self.fail(ValidationError::AudienceMismatch))
        }
    }

    /// Checks that the `alg` header claim is in `allow_list`.
    ///
    /// **Warning.** An empty `allow_list` accepts tokens with the `none` algorithm.
    pub fn algorithm(&self, allow_list: &[&str]) -> Result<&Self, ValidationError> {
        let algorithm = self.parser.algorithm().map_err(|err| self.fail(err))?;
        if self.claim_validator.algorithm(&algorithm, allow_list) {
            Ok(self)
        } else {
            Err(self.fail(ValidationError::AlgorithmNotAllowed { actual: algorithm }))
        }
    }

    /// Checks that the `alg` header claim is not `none` (in any letter case).
    pub fn algorithm_not_none(&self) -> Result<&Self, ValidationError> {
        let algorithm = self.parser.algorithm().map_err(|err| self.fail(err))?;
        if self
            .claim_validator
            .algorithm(&algorithm.to_lowercase(), &["none"])
        {
            Err(self.fail(ValidationError::AlgorithmNone))
        } else {
            Ok(self)
        }
    }

    /// Returns the name of the algorithm this validator signs with.
    pub fn expected_algorithm(&self) -> String {
        self.encoder.algorithm().into_owned()
    }
}
