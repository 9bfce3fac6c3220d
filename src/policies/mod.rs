//! Retry and reconnect policies.
//!
//! This module groups the knobs that control **how long** to wait between
//! retry attempts and **how many** reconnect attempts are allowed.
//!
//! ## Contents
//! - [`BackoffPolicy`] how retry delays evolve (first / factor / max + jitter)
//! - [`JitterPolicy`]  randomization strategy to avoid thundering herd
//! - [`ReconnectPolicy`] backoff plus an optional attempt cap for the subscriber
//!
//! ## Quick wiring
//! ```text
//! RequestContext { backoff: BackoffPolicy, .. }
//!      └─► api::Client retries transient failures until the deadline
//!
//! Config { reconnect: ReconnectPolicy }
//!      └─► subscribe::Subscriber sleeps backoff.next(attempt) between
//!          reconnect attempts; attempt counter resets on success
//! ```
//!
//! ## Defaults
//! - `BackoffPolicy::default()` → first=250ms, factor=2.0, max=30s, jitter=Equal.
//! - `ReconnectPolicy::default()` → default backoff, `max_attempts = 0`
//!   (retry until cancelled).

mod backoff;
mod jitter;
mod reconnect;

pub use backoff::BackoffPolicy;
pub use jitter::JitterPolicy;
pub use reconnect::ReconnectPolicy;
