//! # Server-originated push events.
//!
//! A [`PushEvent`] carries an entity-kind identifier (the type tag), the
//! operation that happened, and an opaque encoded payload. Events are
//! ephemeral: constructed by the transport per network message, consumed once
//! by the dispatcher, then discarded.
//!
//! Payload decoding is deferred to the dispatch step: the transport never
//! needs to know the typed shapes, and a payload that fails to decode costs
//! exactly one report, not the subscription.
//!
//! ## Example
//! ```rust
//! use serde::Deserialize;
//! use serde_json::json;
//! use scopewatch::{EventType, PushEvent};
//!
//! #[derive(Deserialize)]
//! struct ExternalNetwork {
//!     name: String,
//! }
//!
//! let ev = PushEvent::new("externalnetwork", EventType::Create, json!({"name": "corp-dns"}));
//! let net: ExternalNetwork = ev.decode().unwrap();
//! assert_eq!(net.name, "corp-dns");
//! ```

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::DecodeError;

/// Operation type carried by a push event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    /// An entity was created.
    Create,
    /// An entity was updated.
    Update,
    /// An entity was deleted.
    Delete,
    /// A system marker (hello/sync messages from the server).
    System,
}

impl EventType {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            EventType::Create => "create",
            EventType::Update => "update",
            EventType::Delete => "delete",
            EventType::System => "system",
        }
    }
}

/// A single server-originated notification.
#[derive(Clone, Debug)]
pub struct PushEvent {
    /// Entity-kind identifier (the type tag the dispatcher routes on).
    pub identity: Arc<str>,
    /// Operation type.
    pub event_type: EventType,
    /// Opaque encoded payload; shape depends on `identity`.
    pub payload: serde_json::Value,
}

impl PushEvent {
    /// Creates a new event.
    pub fn new(
        identity: impl Into<Arc<str>>,
        event_type: EventType,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            identity: identity.into(),
            event_type,
            payload,
        }
    }

    /// Decodes the opaque payload into a typed shape.
    ///
    /// Pure and side-effect free; a failure leaves the event intact so it can
    /// be attached to the diagnostic report.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, DecodeError> {
        serde_json::from_value(self.payload.clone()).map_err(|source| DecodeError {
            kind: self.identity.to_string(),
            source,
        })
    }
}
