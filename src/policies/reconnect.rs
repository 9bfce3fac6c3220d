//! # Reconnect policy for the subscriber.
//!
//! [`ReconnectPolicy`] bundles the backoff schedule used between reconnect
//! attempts with an optional attempt cap. The cap defaults to unlimited
//! (retry until cancelled); operators who prefer to fail fast can set a
//! bound and handle
//! [`StreamError::ReconnectExhausted`](crate::StreamError::ReconnectExhausted)
//! on the errors channel.
//!
//! ## Sentinel values
//! - `max_attempts = 0` → unlimited (retry until cancellation)

use crate::policies::BackoffPolicy;

/// Policy controlling the subscriber's reconnect cycle.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReconnectPolicy {
    /// Delay schedule between consecutive failed attempts.
    ///
    /// The attempt counter resets after every successful connect, so a stream
    /// that drops after a long healthy session starts again from
    /// `backoff.first`.
    pub backoff: BackoffPolicy,

    /// Maximum number of consecutive failed attempts before giving up.
    ///
    /// - `0` = unlimited (retry until cancellation)
    /// - `n > 0` = after `n` consecutive failures the subscriber surfaces
    ///   `ReconnectExhausted` and closes permanently
    pub max_attempts: u32,
}

impl ReconnectPolicy {
    /// Returns the attempt cap as an `Option`.
    ///
    /// - `None` → unlimited
    /// - `Some(n)` → at most `n` consecutive failed attempts
    #[inline]
    pub fn attempt_cap(&self) -> Option<u32> {
        if self.max_attempts == 0 {
            None
        } else {
            Some(self.max_attempts)
        }
    }

    /// Returns `true` once `attempts` consecutive failures hit the cap.
    #[inline]
    pub fn exhausted(&self, attempts: u32) -> bool {
        matches!(self.attempt_cap(), Some(cap) if attempts >= cap)
    }
}
