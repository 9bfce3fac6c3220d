//! # Deadline-bounded retrying API client.
//!
//! [`Client`] wraps an injected [`Backend`] (one raw network attempt per
//! call) with the retry-until-deadline policy:
//!
//! ```text
//! create(ctx, ns):
//!   loop {
//!     ├─► backend.create(ns)
//!     │     ├─ Ok                        ─► return Ok (ns.name now qualified)
//!     │     ├─ Err(Validation/Unauthorized) ─► return Err immediately
//!     │     └─ Err(Timeout/Communication):
//!     │          ├─ deadline allows another attempt ─► sleep(backoff), retry
//!     │          └─ otherwise ─► return DeadlineExceeded { last }
//!   }
//! ```
//!
//! The backoff sleep is clamped to the remaining budget so the call never
//! overshoots its deadline waiting to retry.

use async_trait::async_trait;

use crate::api::{Namespace, RequestContext};
use crate::error::ApiError;

/// Raw transport boundary: one network attempt per call.
///
/// Implementations own HTTP, TLS, and token attachment. They must rewrite the
/// entity's name to the server-assigned fully-qualified path on success.
#[async_trait]
pub trait Backend: Send + Sync + 'static {
    /// Performs a single create attempt.
    async fn create(&self, ns: &mut Namespace) -> Result<(), ApiError>;
}

/// Manipulator façade adding retry-until-deadline semantics to a [`Backend`].
pub struct Client<B> {
    backend: B,
}

impl<B: Backend> Client<B> {
    /// Creates a client over the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Creates the namespace, retrying transient failures until the context
    /// deadline.
    ///
    /// Terminal failures ([`ApiError::Validation`], [`ApiError::Unauthorized`])
    /// return immediately. When the deadline elapses mid-retry, the call
    /// fails with [`ApiError::DeadlineExceeded`] wrapping the last transient
    /// error.
    ///
    /// On success the namespace carries its server-assigned fully-qualified
    /// name.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        ns: &mut Namespace,
    ) -> Result<(), ApiError> {
        let mut attempt: u32 = 0;
        loop {
            match self.backend.create(ns).await {
                Ok(()) => return Ok(()),
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) => {
                    let delay = ctx.backoff.next(attempt).min(ctx.remaining());
                    if ctx.expired() || delay >= ctx.remaining() {
                        return Err(ApiError::DeadlineExceeded {
                            attempts: attempt + 1,
                            last: Box::new(e),
                        });
                    }
                    tracing::debug!(
                        label = e.as_label(),
                        attempt,
                        ?delay,
                        "transient create failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use crate::policies::{BackoffPolicy, JitterPolicy};

    /// Backend that fails with scripted errors before succeeding.
    struct ScriptedBackend {
        calls: AtomicU32,
        fail_first: u32,
        error: fn() -> ApiError,
    }

    #[async_trait]
    impl Backend for ScriptedBackend {
        async fn create(&self, ns: &mut Namespace) -> Result<(), ApiError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.fail_first {
                return Err((self.error)());
            }
            ns.set_qualified_name(format!("/acme/{}", ns.name()));
            Ok(())
        }
    }

    fn fast_ctx(timeout: Duration) -> RequestContext {
        RequestContext::with_timeout(timeout).with_backoff(BackoffPolicy {
            first: Duration::from_millis(1),
            max: Duration::from_millis(2),
            factor: 1.0,
            jitter: JitterPolicy::None,
        })
    }

    #[tokio::test]
    async fn transient_failures_are_retried_until_success() {
        let client = Client::new(ScriptedBackend {
            calls: AtomicU32::new(0),
            fail_first: 3,
            error: || ApiError::Communication {
                message: "connection reset".into(),
            },
        });

        let mut ns = Namespace::new("test");
        client
            .create(&fast_ctx(Duration::from_secs(5)), &mut ns)
            .await
            .unwrap();
        assert_eq!(ns.name(), "/acme/test");
    }

    #[tokio::test]
    async fn terminal_failures_return_immediately() {
        let backend = ScriptedBackend {
            calls: AtomicU32::new(0),
            fail_first: u32::MAX,
            error: || ApiError::Validation {
                message: "name already taken".into(),
            },
        };
        let client = Client::new(backend);

        let mut ns = Namespace::new("test");
        let err = client
            .create(&fast_ctx(Duration::from_secs(5)), &mut ns)
            .await
            .unwrap_err();
        assert_eq!(err.as_label(), "api_validation");
        assert_eq!(client.backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unauthorized_is_not_retried() {
        let backend = ScriptedBackend {
            calls: AtomicU32::new(0),
            fail_first: u32::MAX,
            error: || ApiError::Unauthorized {
                message: "token expired".into(),
            },
        };
        let client = Client::new(backend);

        let mut ns = Namespace::new("test");
        let err = client
            .create(&fast_ctx(Duration::from_secs(5)), &mut ns)
            .await
            .unwrap_err();
        assert_eq!(err.as_label(), "api_unauthorized");
        assert_eq!(client.backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn deadline_elapse_wraps_last_transient_error() {
        let client = Client::new(ScriptedBackend {
            calls: AtomicU32::new(0),
            fail_first: u32::MAX,
            error: || ApiError::Timeout {
                timeout: Duration::from_millis(10),
            },
        });

        let mut ns = Namespace::new("test");
        let err = client
            .create(&fast_ctx(Duration::from_millis(20)), &mut ns)
            .await
            .unwrap_err();
        match err {
            ApiError::DeadlineExceeded { attempts, last } => {
                assert!(attempts >= 1);
                assert_eq!(last.as_label(), "api_timeout");
            }
            other => panic!("expected DeadlineExceeded, got {other:?}"),
        }
    }
}
