//! # Global client configuration.
//!
//! Provides [`Config`] centralized settings for the scopewatch runtime.
//!
//! Config is consumed in three places:
//! 1. **Scope provisioning**: `create_deadline` bounds the namespace create.
//! 2. **Token lifecycle**: `renew_interval` paces background renewal.
//! 3. **Subscription**: `recursive` and `reconnect` shape the subscriber.

use std::time::Duration;

use crate::policies::ReconnectPolicy;

/// Global configuration for the scopewatch client.
///
/// Defines:
/// - **Provisioning behavior**: deadline for the namespace create call
/// - **Token lifecycle**: how often the bearer token is renewed
/// - **Subscription shape**: subtree vs exact-scope, reconnect policy
///
/// ## Field semantics
/// - `create_deadline`: total budget for the create call including retries
/// - `renew_interval`: renewal period; the previous token stays valid across
///   a failed renewal, so this should be well under the token lifetime
/// - `recursive`: `true` subscribes to the whole subtree under the scope
/// - `reconnect`: backoff schedule and optional attempt cap for reconnects
#[derive(Clone, Debug)]
pub struct Config {
    /// Total deadline for the namespace create call.
    ///
    /// Transient failures are retried inside this window; terminal failures
    /// return immediately regardless of remaining budget.
    pub create_deadline: Duration,

    /// Interval between bearer-token renewal cycles.
    pub renew_interval: Duration,

    /// Whether the subscription covers the whole subtree under the scope.
    ///
    /// - `true` = events from the scope and all of its children
    /// - `false` = events from the exact scope only
    pub recursive: bool,

    /// Reconnect behavior for the push-event stream.
    pub reconnect: ReconnectPolicy,
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `create_deadline = 30s`
    /// - `renew_interval = 24h`
    /// - `recursive = true`
    /// - `reconnect = ReconnectPolicy::default()` (retry until cancelled)
    fn default() -> Self {
        Self {
            create_deadline: Duration::from_secs(30),
            renew_interval: Duration::from_secs(24 * 60 * 60),
            recursive: true,
            reconnect: ReconnectPolicy::default(),
        }
    }
}
