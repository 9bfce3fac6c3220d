//! # Subscriber: reconnect-supervised event pump.
//!
//! [`Subscriber::start`] spawns one pump task that owns the transport and is
//! the sole writer on three independent channels. Keeping the channels
//! separate means a backlog of unconsumed events can never starve a status
//! transition.
//!
//! ## State machine
//! ```text
//! Connecting ──ok──► Connected ──fatal error──► Disconnected
//!     ▲                  │                          │
//!     │                  │ server close             ▼
//!     │ backoff          ▼                     Reconnecting ──ok──► Connected
//!     └──────────── FinallyClosed ◄── cancel / ◄──┘   (emits Reconnection)
//!                                     exhaustion
//! ```
//!
//! ## Rules
//! - *initial-connection* is emitted once, on the first successful connect.
//! - A connection-fatal stream error emits *disconnection* and re-enters the
//!   connect loop; the following successful connect emits *reconnection* —
//!   the sequence never goes Disconnected → Connected without it.
//! - Non-fatal stream errors go to the errors channel; the stream stays up.
//! - Every blocking wait (connect, backoff sleep, stream read) races the
//!   cancellation token, so cancellation is observed mid-retry.
//! - *final-disconnection* is emitted exactly once, from the single pump exit
//!   point; afterwards all senders are dropped and nothing else is emitted.
//! - The per-cycle attempt counter resets on every successful connect.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::error::StreamError;
use crate::events::{ConnectionStatus, PushEvent, PushFilter};
use crate::policies::ReconnectPolicy;
use crate::subscribe::{StreamTransport, SubscriptionContext};

/// Owns a persistent streaming connection scoped to a namespace subtree.
pub struct Subscriber {
    transport: Arc<dyn StreamTransport>,
    scope: Arc<str>,
    recursive: bool,
    policy: ReconnectPolicy,
}

/// Channel handles of a started subscription.
///
/// The three receivers are independent streams: ordering holds within each
/// one, never across them.
pub struct Subscription {
    /// Decoded push events, in server order per connected session.
    pub events: mpsc::UnboundedReceiver<PushEvent>,
    /// Non-fatal transport errors.
    pub errors: mpsc::UnboundedReceiver<StreamError>,
    /// Connectivity transitions, ending with
    /// [`ConnectionStatus::FinalDisconnection`].
    pub status: mpsc::UnboundedReceiver<ConnectionStatus>,
}

impl Subscriber {
    /// Creates a subscriber for the given scope.
    ///
    /// `scope` must be the server-assigned fully-qualified path; `recursive`
    /// extends the subscription to the whole subtree.
    pub fn new(
        transport: impl StreamTransport,
        scope: impl Into<Arc<str>>,
        recursive: bool,
    ) -> Self {
        Self {
            transport: Arc::new(transport),
            scope: scope.into(),
            recursive,
            policy: ReconnectPolicy::default(),
        }
    }

    /// Replaces the reconnect policy (defaults to retry-until-cancelled).
    pub fn with_reconnect(mut self, policy: ReconnectPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Starts the pump task and hands back the signal channels.
    ///
    /// The filter and scope settings are fixed from here on. The pump runs
    /// until the token is cancelled, the server deliberately ends the
    /// session, or the reconnect policy is exhausted.
    pub fn start(self, token: CancellationToken, filter: PushFilter) -> Subscription {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (errors_tx, errors_rx) = mpsc::unbounded_channel();
        let (status_tx, status_rx) = mpsc::unbounded_channel();

        let pump = Pump {
            transport: self.transport,
            ctx: SubscriptionContext::new(self.scope, self.recursive, filter),
            policy: self.policy,
            events: events_tx,
            errors: errors_tx,
            status: status_tx,
        };
        tokio::spawn(pump.run(token));

        Subscription {
            events: events_rx,
            errors: errors_rx,
            status: status_rx,
        }
    }
}

/// Producer side of a subscription: sole owner of the transport and the
/// sending halves of all three channels.
struct Pump {
    transport: Arc<dyn StreamTransport>,
    ctx: SubscriptionContext,
    policy: ReconnectPolicy,
    events: mpsc::UnboundedSender<PushEvent>,
    errors: mpsc::UnboundedSender<StreamError>,
    status: mpsc::UnboundedSender<ConnectionStatus>,
}

impl Pump {
    /// Drives connect / read / reconnect until a terminal condition.
    ///
    /// Single exit point: whatever ends the loop, *final-disconnection* is
    /// emitted exactly once and the senders are dropped with `self`.
    async fn run(self, token: CancellationToken) {
        let mut connected_before = false;

        'session: loop {
            let mut stream = match self.connect_with_backoff(&token).await {
                Some(stream) => stream,
                None => break 'session,
            };

            self.emit(if connected_before {
                ConnectionStatus::Reconnection
            } else {
                ConnectionStatus::InitialConnection
            });
            connected_before = true;

            loop {
                let item = tokio::select! {
                    item = stream.next() => item,
                    _ = token.cancelled() => break 'session,
                };
                match item {
                    Ok(Some(event)) => {
                        let _ = self.events.send(event);
                    }
                    // Deliberate, permanent session termination by the server.
                    Ok(None) => break 'session,
                    Err(e) if e.is_fatal() => {
                        tracing::warn!(label = e.as_label(), %e, "stream lost");
                        self.emit(ConnectionStatus::Disconnection);
                        continue 'session;
                    }
                    Err(e) => {
                        let _ = self.errors.send(e);
                    }
                }
            }
        }

        self.emit(ConnectionStatus::FinalDisconnection);
    }

    /// Attempts to open the stream, sleeping per the backoff schedule between
    /// failures.
    ///
    /// Returns `None` when the pump should close: cancellation observed
    /// (including mid-sleep and mid-connect), or the attempt cap reached. In
    /// the latter case [`StreamError::ReconnectExhausted`] is surfaced on the
    /// errors channel first.
    async fn connect_with_backoff(
        &self,
        token: &CancellationToken,
    ) -> Option<Box<dyn crate::subscribe::EventStream>> {
        let mut attempt: u32 = 0;
        loop {
            if token.is_cancelled() {
                return None;
            }

            let result = tokio::select! {
                result = self.transport.connect(&self.ctx) => result,
                _ = token.cancelled() => return None,
            };

            match result {
                Ok(stream) => return Some(stream),
                Err(e) => {
                    attempt += 1;
                    tracing::debug!(label = e.as_label(), attempt, "connect attempt failed");
                    if self.policy.exhausted(attempt) {
                        let _ = self
                            .errors
                            .send(StreamError::ReconnectExhausted { attempts: attempt });
                        return None;
                    }

                    let delay = self.policy.backoff.next(attempt - 1);
                    tokio::select! {
                        _ = time::sleep(delay) => {}
                        _ = token.cancelled() => return None,
                    }
                }
            }
        }
    }

    fn emit(&self, status: ConnectionStatus) {
        let _ = self.status.send(status);
    }
}
