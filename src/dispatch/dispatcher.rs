//! # Kind-tagged event dispatch.
//!
//! [`Dispatcher`] routes each [`PushEvent`] by its entity-kind tag through an
//! explicit registry: a mapping from kind identifier to a decode-then-handle
//! route, with an explicit unknown-kind fallback. No reflection, no schema
//! validation beyond the tag switch.
//!
//! ## Rules
//! - **Decode failure**: reported with the raw event attached, loop continues.
//! - **Unknown kind**: reported as an unexpected-event condition, not dropped
//!   silently, never fatal.
//! - **Handlers**: perform observational side effects only and must not block
//!   the dispatch loop indefinitely.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use serde::Deserialize;
//! use scopewatch::{Dispatcher, EventType, LogSink};
//!
//! #[derive(Deserialize)]
//! struct ExternalNetwork {
//!     name: String,
//! }
//!
//! let mut dispatcher = Dispatcher::new(Arc::new(LogSink));
//! dispatcher.route("externalnetwork", |t: EventType, net: ExternalNetwork| async move {
//!     println!("external network name: {} type {}", net.name, t.as_label());
//! });
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use serde::de::DeserializeOwned;

use crate::dispatch::{Report, Sink};
use crate::error::DecodeError;
use crate::events::{EventType, PushEvent};

/// A registered route: decodes the event and produces the handler future, or
/// hands the event back with the decode error.
type Route = Box<dyn Fn(PushEvent) -> Result<BoxFuture<'static, ()>, (PushEvent, DecodeError)>
    + Send
    + Sync>;

/// Explicit registry from entity kind to typed handler.
pub struct Dispatcher {
    routes: HashMap<Arc<str>, Route>,
    sink: Arc<dyn Sink>,
}

impl Dispatcher {
    /// Creates an empty dispatcher reporting through the given sink.
    pub fn new(sink: Arc<dyn Sink>) -> Self {
        Self {
            routes: HashMap::new(),
            sink,
        }
    }

    /// Registers a typed handler for an entity kind.
    ///
    /// The payload of matching events is decoded into `T`; on success the
    /// handler is awaited with the operation type and the typed value.
    /// Registering the same kind twice replaces the previous route.
    pub fn route<T, H, Fut>(&mut self, kind: impl Into<Arc<str>>, handler: H) -> &mut Self
    where
        T: DeserializeOwned + Send + 'static,
        H: Fn(EventType, T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let route: Route = Box::new(move |event: PushEvent| match event.decode::<T>() {
            Ok(value) => Ok(handler(event.event_type, value).boxed()),
            Err(error) => Err((event, error)),
        });
        self.routes.insert(kind.into(), route);
        self
    }

    /// Returns whether a route is registered for the given kind.
    pub fn handles(&self, kind: &str) -> bool {
        self.routes.contains_key(kind)
    }

    /// Dispatches one event.
    ///
    /// Never panics and never terminates the caller's loop: every failure
    /// path ends in a [`Report`] on the sink.
    pub async fn dispatch(&self, event: PushEvent) {
        match self.routes.get(event.identity.as_ref()) {
            None => {
                self.sink.report(&Report::UnexpectedKind { event }).await;
            }
            Some(route) => match route(event) {
                Ok(handler) => handler.await,
                Err((event, error)) => {
                    self.sink
                        .report(&Report::DecodeFailure { event, error })
                        .await;
                }
            },
        }
    }
}
