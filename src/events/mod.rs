//! Push-event data model.
//!
//! This module groups the types that cross the subscription boundary:
//!
//! ## Contents
//! - [`PushEvent`], [`EventType`] the server-originated notification and its
//!   operation type
//! - [`PushFilter`] the declared set of kinds of interest
//! - [`ConnectionStatus`] subscriber connectivity lifecycle transitions
//!
//! ## Quick reference
//! - **Producers**: the stream transport constructs [`PushEvent`]s per network
//!   message; the subscriber pump emits [`ConnectionStatus`] transitions.
//! - **Consumers**: the [`Dispatcher`](crate::Dispatcher) decodes events; the
//!   runtime loop observes statuses and exits on
//!   [`ConnectionStatus::FinalDisconnection`].

mod event;
mod filter;
mod status;

pub use event::{EventType, PushEvent};
pub use filter::PushFilter;
pub use status::ConnectionStatus;
