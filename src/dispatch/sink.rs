//! # Observability sink.
//!
//! Everything the client observes but recovers from locally flows through
//! [`Sink`] as a [`Report`]: decode failures, unexpected event kinds,
//! transport errors, status transitions, token renewal failures. Injecting
//! the sink (instead of calling a global logger) lets tests capture reported
//! conditions deterministically.
//!
//! [`LogSink`] is the default implementation and maps each report to a
//! `tracing` call at the appropriate severity.

use async_trait::async_trait;

use crate::error::{DecodeError, StreamError, TokenError};
use crate::events::{ConnectionStatus, PushEvent};

/// A recovered-from condition worth surfacing.
#[derive(Debug)]
#[non_exhaustive]
pub enum Report {
    /// An event's payload did not decode into the registered shape.
    ///
    /// Carries the raw event for diagnosis.
    DecodeFailure {
        /// The offending event, payload intact.
        event: PushEvent,
        /// What went wrong.
        error: DecodeError,
    },

    /// An event arrived for a kind with no registered route.
    UnexpectedKind {
        /// The offending event.
        event: PushEvent,
    },

    /// A non-fatal transport error surfaced on the errors channel.
    TransportError {
        /// The reported error.
        error: StreamError,
    },

    /// The subscriber's connectivity changed.
    StatusChanged {
        /// The new status.
        status: ConnectionStatus,
    },

    /// A background token renewal cycle failed; the previous token stays in
    /// use.
    TokenRenewalFailed {
        /// The issuance error.
        error: TokenError,
    },
}

/// Contract for report consumers.
///
/// Called from the dispatch/runtime path; implementations should avoid
/// blocking the async runtime (prefer async I/O and cooperative waits).
#[async_trait]
pub trait Sink: Send + Sync + 'static {
    /// Handles a single report.
    async fn report(&self, report: &Report);
}

/// Default sink mapping reports onto `tracing`.
///
/// Severities follow the error-handling design: decode failures and transport
/// errors are error-class, unexpected kinds and renewal failures are
/// warning-class, status transitions are informational except disconnection.
pub struct LogSink;

#[async_trait]
impl Sink for LogSink {
    async fn report(&self, report: &Report) {
        match report {
            Report::DecodeFailure { event, error } => {
                tracing::error!(
                    kind = %event.identity,
                    event_type = event.event_type.as_label(),
                    raw = %event.payload,
                    %error,
                    "failed to decode event"
                );
            }
            Report::UnexpectedKind { event } => {
                tracing::warn!(
                    kind = %event.identity,
                    event_type = event.event_type.as_label(),
                    raw = %event.payload,
                    "received event that was not subscribed"
                );
            }
            Report::TransportError { error } => {
                tracing::error!(label = error.as_label(), %error, "push channel error");
            }
            Report::StatusChanged { status } => match status {
                ConnectionStatus::Disconnection => {
                    tracing::warn!("upstream event channel interrupted, reconnecting");
                }
                ConnectionStatus::InitialConnection => {
                    tracing::info!("upstream event channel connected");
                }
                ConnectionStatus::Reconnection => {
                    tracing::info!("upstream event channel restored");
                }
                ConnectionStatus::FinalDisconnection => {
                    tracing::info!("upstream event channel closed");
                }
            },
            Report::TokenRenewalFailed { error } => {
                tracing::warn!(label = error.as_label(), %error, "token renewal failed");
            }
        }
    }
}
