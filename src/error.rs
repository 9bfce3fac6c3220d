//! Error types used across the scopewatch client.
//!
//! Each failure domain gets its own enum:
//!
//! - [`BootstrapError`] — credential bundle unreadable or unparsable (fatal).
//! - [`TokenError`] — token issuance/renewal failures.
//! - [`ApiError`] — errors from CRUD operations against the remote API.
//! - [`StreamError`] — transport errors on the push-event stream.
//! - [`DecodeError`] — event payload did not match the registered shape.
//!
//! The types provide helper methods (`as_label`, `is_retryable`, `is_fatal`)
//! for logging/metrics and for the retry/reconnect decisions made by the
//! [`Client`](crate::Client) and the [`Subscriber`](crate::Subscriber).

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// # Errors raised while bootstrapping the client.
///
/// Bootstrap failures prevent the system from reaching a useful running
/// state and are therefore fatal: the embedding program should exit non-zero.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// The credential file could not be read.
    #[error("unable to read credential file {path:?}: {source}")]
    Read {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The credential file content could not be parsed.
    #[error("unable to parse credential: {source}")]
    Parse {
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The credential parsed but is missing required material.
    #[error("invalid credential: {reason}")]
    Invalid {
        /// What was missing or malformed.
        reason: String,
    },
}

impl BootstrapError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            BootstrapError::Read { .. } => "bootstrap_read",
            BootstrapError::Parse { .. } => "bootstrap_parse",
            BootstrapError::Invalid { .. } => "bootstrap_invalid",
        }
    }
}

/// # Errors raised by the token lifecycle manager.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TokenError {
    /// No token has ever been issued; `token()` was called before the first
    /// successful issuance.
    #[error("no token issued yet")]
    NotYetIssued,

    /// A renewal cycle failed. The previously issued token stays in use.
    #[error("token issuance failed: {message}")]
    Issue {
        /// Message from the identity provider boundary.
        message: String,
    },
}

impl TokenError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            TokenError::NotYetIssued => "token_not_yet_issued",
            TokenError::Issue { .. } => "token_issue_failed",
        }
    }
}

/// # Errors raised by API operations.
///
/// Only `Timeout` and `Communication` are transient: the client retries those
/// until the request deadline. `Validation` and `Unauthorized` are terminal
/// application failures and are returned immediately.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ApiError {
    /// The remote did not answer in time for a single attempt.
    #[error("request timed out after {timeout:?}")]
    Timeout {
        /// Per-attempt timeout that was exceeded.
        timeout: Duration,
    },

    /// The remote could not be reached or the connection broke mid-request.
    #[error("communication error: {message}")]
    Communication {
        /// Transport-level detail.
        message: String,
    },

    /// The entity was rejected by server-side validation.
    #[error("validation error: {message}")]
    Validation {
        /// Server-provided rejection detail.
        message: String,
    },

    /// The bearer token was missing, expired, or insufficient.
    #[error("unauthorized: {message}")]
    Unauthorized {
        /// Server-provided detail.
        message: String,
    },

    /// The request context deadline elapsed while retrying transient failures.
    #[error("deadline exceeded after {attempts} attempts: {last}")]
    DeadlineExceeded {
        /// Number of attempts made before giving up.
        attempts: u32,
        /// The last transient error observed.
        #[source]
        last: Box<ApiError>,
    },
}

impl ApiError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ApiError::Timeout { .. } => "api_timeout",
            ApiError::Communication { .. } => "api_communication",
            ApiError::Validation { .. } => "api_validation",
            ApiError::Unauthorized { .. } => "api_unauthorized",
            ApiError::DeadlineExceeded { .. } => "api_deadline_exceeded",
        }
    }

    /// Indicates whether the error is safe to retry.
    ///
    /// Returns `true` for [`ApiError::Timeout`] and [`ApiError::Communication`],
    /// `false` otherwise.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::Timeout { .. } | ApiError::Communication { .. }
        )
    }
}

/// # Errors raised on the push-event stream.
///
/// `Connect` and `Connection` are connection-fatal: the subscriber reacts by
/// entering its reconnect cycle. `Protocol` errors are reported on the errors
/// channel while the stream stays up.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum StreamError {
    /// An attempt to open the stream failed.
    #[error("unable to connect: {message}")]
    Connect {
        /// Transport-level detail.
        message: String,
    },

    /// The live stream broke (network reset, server-side close).
    #[error("connection lost: {message}")]
    Connection {
        /// Transport-level detail.
        message: String,
    },

    /// A message-level error that does not invalidate the connection
    /// (malformed frame, oversized message, flow-control violation).
    #[error("protocol error: {message}")]
    Protocol {
        /// Transport-level detail.
        message: String,
    },

    /// The configured reconnect attempt cap was reached.
    #[error("reconnect attempts exhausted after {attempts}")]
    ReconnectExhausted {
        /// Number of consecutive failed attempts.
        attempts: u32,
    },
}

impl StreamError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            StreamError::Connect { .. } => "stream_connect",
            StreamError::Connection { .. } => "stream_connection",
            StreamError::Protocol { .. } => "stream_protocol",
            StreamError::ReconnectExhausted { .. } => "stream_reconnect_exhausted",
        }
    }

    /// Indicates whether the error invalidates the underlying connection.
    ///
    /// Fatal errors trigger the subscriber's reconnect cycle; non-fatal ones
    /// are surfaced on the errors channel while the stream stays up.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            StreamError::Connect { .. }
                | StreamError::Connection { .. }
                | StreamError::ReconnectExhausted { .. }
        )
    }
}

/// # Payload decode failure.
///
/// Raised when an event's opaque payload does not match the shape registered
/// for its kind. Never fatal to the dispatch loop.
#[derive(Error, Debug)]
#[error("unable to decode payload for kind {kind:?}: {source}")]
pub struct DecodeError {
    /// The event's kind tag.
    pub kind: String,
    /// Underlying deserialization error.
    #[source]
    pub source: serde_json::Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_retryability_split() {
        assert!(ApiError::Timeout {
            timeout: Duration::from_secs(1)
        }
        .is_retryable());
        assert!(ApiError::Communication {
            message: "reset".into()
        }
        .is_retryable());
        assert!(!ApiError::Validation {
            message: "bad name".into()
        }
        .is_retryable());
        assert!(!ApiError::Unauthorized {
            message: "expired".into()
        }
        .is_retryable());
    }

    #[test]
    fn stream_fatality_split() {
        assert!(StreamError::Connection {
            message: "reset".into()
        }
        .is_fatal());
        assert!(StreamError::Connect {
            message: "refused".into()
        }
        .is_fatal());
        assert!(!StreamError::Protocol {
            message: "bad frame".into()
        }
        .is_fatal());
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(
            ApiError::DeadlineExceeded {
                attempts: 3,
                last: Box::new(ApiError::Timeout {
                    timeout: Duration::from_secs(1)
                }),
            }
            .as_label(),
            "api_deadline_exceeded"
        );
        assert_eq!(
            StreamError::ReconnectExhausted { attempts: 5 }.as_label(),
            "stream_reconnect_exhausted"
        );
        assert_eq!(TokenError::NotYetIssued.as_label(), "token_not_yet_issued");
    }
}
