//! Time-related options.

use chrono::{DateTime, Duration, Utc};

/// Time-related validation options.
///
/// The clock is read anew on every check; a chain of checks is not evaluated against
/// a single snapshot of the current time.
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub struct TimeOptions<F = fn() -> DateTime<Utc>> {
    /// Leeway to use during validation. Zero by default.
    pub leeway: Duration,
    /// Source of the current timestamps.
    pub clock_fn: F,
}

impl<F: Fn() -> DateTime<Utc>> TimeOptions<F> {
    /// Creates options based on the specified time leeway and clock function.
    pub fn new(leeway: Duration, clock_fn: F) -> Self {
        Self { leeway, clock_fn }
    }

    /// Returns the current Unix timestamp as reported by the clock.
    pub fn now(&self) -> i64 {
        (self.clock_fn)().timestamp()
    }

    /// Returns the leeway in whole seconds.
    pub(crate) fn leeway_secs(&self) -> i64 {
        self.leeway.num_seconds()
    }
}

impl TimeOptions {
    /// Creates options based on the specified time leeway. The clock source is [`Utc::now()`].
    pub fn from_leeway(leeway: Duration) -> Self {
        Self {
            leeway,
            clock_fn: Utc::now,
        }
    }
}

impl Default for TimeOptions {
    fn default() -> Self {
        Self::from_leeway(Duration::zero())
    }
}
