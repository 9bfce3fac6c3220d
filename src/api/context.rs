//! # Per-request context.
//!
//! A [`RequestContext`] carries the total deadline and the retry backoff for
//! one logical API call. The deadline bounds the whole call including every
//! retry, not a single network attempt.

use std::time::{Duration, Instant};

use crate::policies::{BackoffPolicy, JitterPolicy};

/// Deadline and retry policy for one logical API call.
#[derive(Clone, Copy, Debug)]
pub struct RequestContext {
    /// Absolute point after which no further attempt is started.
    pub deadline: Instant,
    /// Delay schedule between retried attempts.
    pub backoff: BackoffPolicy,
}

impl RequestContext {
    /// Creates a context whose deadline is `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Instant::now() + timeout,
            backoff: BackoffPolicy {
                first: Duration::from_millis(250),
                max: Duration::from_secs(5),
                factor: 2.0,
                jitter: JitterPolicy::Equal,
            },
        }
    }

    /// Returns a context with a custom retry backoff.
    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    /// Remaining budget before the deadline, zero if already past.
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    /// Returns whether the deadline has elapsed.
    pub fn expired(&self) -> bool {
        Instant::now() >= self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_shrinks_toward_deadline() {
        let ctx = RequestContext::with_timeout(Duration::from_secs(30));
        assert!(!ctx.expired());
        assert!(ctx.remaining() <= Duration::from_secs(30));
        assert!(ctx.remaining() > Duration::from_secs(29));
    }

    #[test]
    fn zero_timeout_is_immediately_expired() {
        let ctx = RequestContext::with_timeout(Duration::ZERO);
        assert!(ctx.expired());
        assert_eq!(ctx.remaining(), Duration::ZERO);
    }
}
