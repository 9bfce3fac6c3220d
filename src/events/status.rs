//! # Subscriber connectivity lifecycle.
//!
//! [`ConnectionStatus`] describes the transitions of the subscriber's
//! underlying stream, emitted on the status channel as they occur.
//!
//! ## Ordering guarantees
//! Statuses form a linear/cyclic sequence:
//! ```text
//! InitialConnection ──► (Disconnection ──► Reconnection)* ──► FinalDisconnection
//! ```
//! `Disconnection` is never followed directly by another `Disconnection`, and
//! `FinalDisconnection` is terminal: it is emitted at most once and nothing
//! follows it on any channel.

/// A transition of the subscriber's underlying stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// The stream connected for the first time.
    InitialConnection,
    /// The live stream was lost; reconnection is about to begin.
    Disconnection,
    /// The stream was re-established after a disconnection.
    Reconnection,
    /// The subscription ended permanently (cancellation, deliberate server
    /// termination, or reconnect exhaustion). Terminal.
    FinalDisconnection,
}

impl ConnectionStatus {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ConnectionStatus::InitialConnection => "initial_connection",
            ConnectionStatus::Disconnection => "disconnection",
            ConnectionStatus::Reconnection => "reconnection",
            ConnectionStatus::FinalDisconnection => "final_disconnection",
        }
    }

    /// Returns whether this status ends the subscription.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ConnectionStatus::FinalDisconnection)
    }
}
