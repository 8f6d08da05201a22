//! Stateless claim predicates.

use chrono::{DateTime, Utc};
use subtle::ConstantTimeEq;

use crate::{token::has_valid_structure, Audience, TimeOptions};

/// Boolean predicates over individual claims.
///
/// Apart from the clock in [`TimeOptions`], the validator holds no state. Predicates
/// never fail; [`Validator`](crate::Validator) turns their results into typed errors.
#[derive(Debug, Clone)]
pub struct ClaimValidator<F = fn() -> DateTime<Utc>> {
    time_options: TimeOptions<F>,
}

impl Default for ClaimValidator {
    fn default() -> Self {
        Self::new(TimeOptions::default())
    }
}

impl<F: Fn() -> DateTime<Utc>> ClaimValidator<F> {
    /// Creates a validator reading the current time from `time_options`.
    pub fn new(time_options: TimeOptions<F>) -> Self {
        Self { time_options }
    }

    /// Returns time options used by this validator.
    pub fn time_options(&self) -> &TimeOptions<F> {
        &self.time_options
    }

    /// Checks that the expiration timestamp is in the future.
    pub fn expiration(&self, expiration: i64) -> bool {
        expiration.saturating_add(self.time_options.leeway_secs()) > self.time_options.now()
    }

    /// Checks that the not-before timestamp is set and has already passed.
    ///
    /// A zero timestamp is treated as unset and is never valid.
    pub fn not_before(&self, not_before: i64) -> bool {
        not_before != 0
            && not_before.saturating_sub(self.time_options.leeway_secs())
                <= self.time_options.now()
    }

    /// Checks that `check` matches the audience, or is contained in the audience list.
    pub fn audience(&self, audience: &Audience, check: &str) -> bool {
        audience.contains(check)
    }

    /// Compares two encoded signatures in constant time.
    pub fn signature(&self, generated: &str, actual: &str) -> bool {
        generated.as_bytes().ct_eq(actual.as_bytes()).into()
    }

    /// Checks that `algorithm` is in `allow_list`.
    ///
    /// **Warning.** An empty allow-list accepts the `none` algorithm. Use
    /// [`Validator::algorithm_not_none()`](crate::Validator::algorithm_not_none())
    /// when verifying tokens.
    pub fn algorithm(&self, algorithm: &str, allow_list: &[&str]) -> bool {
        if allow_list.is_empty() && algorithm == "none" {
            return true;
        }
        allow_list.contains(&algorithm)
    }

    /// Checks that `token` has the shape of a JWT: 3 non-empty base64url segments
    /// separated by periods.
    pub fn structure(&self, token: &str) -> bool {
        has_valid_structure(token)
    }
}
