//! # Stream transport boundary.
//!
//! The wire format is entirely the transport library's responsibility; the
//! subscriber only needs two capabilities: open a stream for a
//! [`SubscriptionContext`], and pull the next message off an open stream.
//!
//! ## Contract
//! - [`StreamTransport::connect`] attaches the context's filter to the
//!   request; a stream it returns is live.
//! - [`EventStream::next`] resolves to:
//!   - `Ok(Some(event))` — the next decoded push event, in server order;
//!   - `Ok(None)` — the server deliberately and permanently terminated the
//!     session (the subscriber closes, it does not reconnect);
//!   - `Err(e)` with `e.is_fatal()` — the connection is gone, the subscriber
//!     reconnects;
//!   - `Err(e)` otherwise — a message-level error; the stream is still live
//!     and the error is surfaced on the errors channel.

use async_trait::async_trait;

use crate::error::StreamError;
use crate::events::PushEvent;
use crate::subscribe::SubscriptionContext;

/// Factory for push-event streams.
#[async_trait]
pub trait StreamTransport: Send + Sync + 'static {
    /// Opens a stream scoped by the given context.
    async fn connect(&self, ctx: &SubscriptionContext)
        -> Result<Box<dyn EventStream>, StreamError>;
}

/// One live stream of push events.
#[async_trait]
pub trait EventStream: Send {
    /// Pulls the next message off the stream.
    async fn next(&mut self) -> Result<Option<PushEvent>, StreamError>;
}
