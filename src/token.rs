//! # Bearer-token lifecycle management.
//!
//! [`TokenManager`] keeps a current bearer token available to the transport
//! without blocking callers during renewal:
//!
//! - **Reads** (`token()`) are non-blocking and return the last-known-valid
//!   token, or fail if none was ever issued.
//! - **Writes** happen from a single background renewal task that swaps the
//!   stored `Arc<str>` under a short write lock; readers observe either the
//!   old or the new token, never a partial state.
//! - **Renewal failures** are reported and logged but never crash the
//!   process; the previous token stays in use until a later cycle succeeds.
//!
//! The actual token issuance (the identity-provider call and its
//! cryptographic signing) lives behind the [`TokenIssuer`] trait and is
//! injected.
//!
//! ## Architecture
//! ```text
//! spawn_renewal(token):
//!   loop {
//!     ├─► issuer.issue()     ── Ok  ─► swap current (write lock, brief)
//!     │                      ── Err ─► Sink::report(TokenRenewalFailed), keep old
//!     └─► sleep(renew_interval)   (cancellable)
//!   }
//!
//! transport (any task):  manager.token() ─► clone Arc<str> (read lock, brief)
//! ```

use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::dispatch::{Report, Sink};
use crate::error::TokenError;

/// A freshly issued bearer token.
#[derive(Clone, Debug)]
pub struct IssuedToken {
    /// The opaque token value attached to outgoing requests.
    pub token: String,
    /// Advisory validity window, when the issuer reports one.
    pub valid_for: Option<Duration>,
}

/// Contract for the identity-provider boundary.
///
/// Implementations call out to the identity provider using the credential
/// bundle's signing material. The manager never inspects the token; it only
/// stores and hands it out.
#[async_trait]
pub trait TokenIssuer: Send + Sync + 'static {
    /// Obtains a fresh bearer token.
    async fn issue(&self) -> Result<IssuedToken, TokenError>;
}

/// Holds the current bearer token and runs the renewal cycle.
pub struct TokenManager {
    issuer: Arc<dyn TokenIssuer>,
    current: RwLock<Option<Arc<str>>>,
    renew_interval: Duration,
}

impl TokenManager {
    /// Creates a manager around the given issuer.
    ///
    /// No token is available until the first [`refresh`](Self::refresh)
    /// succeeds (usually triggered immediately by
    /// [`spawn_renewal`](Self::spawn_renewal)).
    pub fn new(issuer: Arc<dyn TokenIssuer>, renew_interval: Duration) -> Arc<Self> {
        Arc::new(Self {
            issuer,
            current: RwLock::new(None),
            renew_interval,
        })
    }

    /// Returns the last-known-valid token without blocking.
    ///
    /// Fails with [`TokenError::NotYetIssued`] if no issuance ever succeeded.
    pub fn token(&self) -> Result<Arc<str>, TokenError> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .ok_or(TokenError::NotYetIssued)
    }

    /// Runs one issue-and-swap cycle.
    ///
    /// On failure the previous token (if any) is left untouched.
    pub async fn refresh(&self) -> Result<(), TokenError> {
        let issued = self.issuer.issue().await?;
        let mut slot = self.current.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(Arc::from(issued.token.as_str()));
        Ok(())
    }

    /// Spawns the background renewal task.
    ///
    /// The task refreshes immediately, then on every `renew_interval` tick
    /// until the cancellation token fires. Failed cycles are reported via the
    /// sink and logged; the loop keeps going with the previous token.
    pub fn spawn_renewal(
        self: &Arc<Self>,
        token: CancellationToken,
        sink: Arc<dyn Sink>,
    ) -> JoinHandle<()> {
        let manager = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                if let Err(error) = manager.refresh().await {
                    sink.report(&Report::TokenRenewalFailed { error }).await;
                }
                tokio::select! {
                    _ = tokio::time::sleep(manager.renew_interval) => {}
                    _ = token.cancelled() => break,
                }
            }
        })
    }
}
