//! Resilient push-event subscription.
//!
//! This module contains the central state machine of the crate: a subscriber
//! that owns a persistent streaming connection scoped to a namespace subtree,
//! survives disconnects through supervised reconnection, and fans its signals
//! out on three independent channels (events / errors / status).
//!
//! ## Contents
//! - [`SubscriptionContext`] immutable scope/recursive/filter bundle
//! - [`StreamTransport`], [`EventStream`] the injected wire boundary
//! - [`Subscriber`], [`Subscription`] the pump and its channel handles
//!
//! ## Quick reference
//! - **Producer**: one pump task per subscription drives connect, read, and
//!   reconnect; it is the only writer on all three channels.
//! - **Consumer**: a single fair-multiplexing loop (see
//!   [`Runtime::run`](crate::Runtime::run)) services the channels.

mod context;
mod subscriber;
mod transport;

pub use context::SubscriptionContext;
pub use subscriber::{Subscriber, Subscription};
pub use transport::{EventStream, StreamTransport};
