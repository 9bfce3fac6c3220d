//! # scopewatch
//!
//! **scopewatch** is a resilient push-event subscription client.
//!
//! It authenticates against a remote policy-management API, provisions a
//! scoped namespace, and maintains a persistent streaming subscription over
//! that namespace tree, decoding and dispatching typed events as they arrive.
//! Disconnects are survived through supervised reconnection with observable
//! status transitions.
//!
//! ## Architecture
//! ### Overview
//! ```text
//! ┌──────────────────┐      ┌──────────────────┐
//! │ CredentialBundle │─────►│   TokenManager   │  (background renewal task)
//! └──────────────────┘      └────────┬─────────┘
//!                                    ▼
//!                           ┌──────────────────┐
//!                           │    Client<B>     │  create(ctx, namespace)
//!                           │(retry-to-deadline)│
//!                           └────────┬─────────┘
//!                                    │ fully-qualified scope
//!                                    ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Subscriber (pump task)                                           │
//! │  Connecting → Connected → Disconnected → Reconnecting → ...       │
//! │                                        └──► FinallyClosed         │
//! └──────┬──────────────────────┬──────────────────────┬──────────────┘
//!        ▼                      ▼                      ▼
//!   [events chan]         [errors chan]          [status chan]
//!        │                      │                      │
//!        └──────────────────────┴──────────────────────┘
//!                               ▼
//!                  Runtime::run (fair select! loop)
//!                      │                  │
//!                      ▼                  ▼
//!                 Dispatcher          Sink (reports)
//!              (kind → typed route)
//! ```
//!
//! ### Lifecycle
//! ```text
//! CredentialBundle::load ──► TokenManager::spawn_renewal
//!                        ──► Client::create(ctx, ns)     (scope provisioning)
//!                        ──► Subscriber::start(token, filter)
//!                        ──► Runtime::run(subscription, dispatcher, token)
//!
//! pump loop {
//!   ├─► connect (backoff between attempts, cancellable)
//!   ├─► emit InitialConnection | Reconnection
//!   ├─► read stream:
//!   │     ├─ event            ─► events channel
//!   │     ├─ non-fatal error  ─► errors channel (stream stays up)
//!   │     ├─ fatal error      ─► emit Disconnection, reconnect
//!   │     └─ server close     ─► exit loop
//!   └─ exit: cancellation / server close / reconnect exhaustion
//! }
//! emit FinalDisconnection (exactly once), drop transport
//! ```
//!
//! ## Features
//! | Area             | Description                                                | Key types / traits                          |
//! |------------------|------------------------------------------------------------|---------------------------------------------|
//! | **Subscription** | Reconnect-supervised event stream over a scope subtree.    | [`Subscriber`], [`Subscription`]            |
//! | **Dispatch**     | Kind-tagged payload decode with explicit route registry.   | [`Dispatcher`], [`Sink`]                    |
//! | **API client**   | Deadline-bounded retrying create over an injected backend. | [`Client`], [`Backend`], [`RequestContext`] |
//! | **Tokens**       | Non-blocking current-token reads, background renewal.      | [`TokenManager`], [`TokenIssuer`]           |
//! | **Policies**     | Backoff/jitter knobs for reconnects and API retries.       | [`BackoffPolicy`], [`ReconnectPolicy`]      |
//! | **Errors**       | Typed errors per failure domain, retryability helpers.     | [`ApiError`], [`StreamError`]               |
//!
//! ## Example
//! ```rust,ignore
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use scopewatch::{
//!     Client, Config, CredentialBundle, Dispatcher, EventType, LogSink,
//!     Namespace, PushFilter, RequestContext, Runtime, Subscriber,
//! };
//!
//! let cfg = Config::default();
//! let creds = CredentialBundle::load("./sdk.json")?;
//! let client = Client::new(backend);
//!
//! // Provision a namespace; the server rewrites the name to its
//! // fully-qualified path.
//! let mut ns = Namespace::new("test");
//! client.create(&RequestContext::with_timeout(cfg.create_deadline), &mut ns).await?;
//!
//! let mut filter = PushFilter::new();
//! filter.add_kind("externalnetwork");
//! filter.add_kind("networkaccesspolicy");
//!
//! let sink = Arc::new(LogSink);
//! let mut dispatcher = Dispatcher::new(sink.clone());
//! dispatcher.route("externalnetwork", |t: EventType, e: serde_json::Value| async move {
//!     println!("external network {t:?}: {e}");
//! });
//!
//! let token = CancellationToken::new();
//! let subscriber = Subscriber::new(transport, ns.name().to_string(), cfg.recursive);
//! let subscription = subscriber.start(token.child_token(), filter);
//!
//! Runtime::new(cfg, sink).run(subscription, dispatcher, token).await;
//! ```

mod api;
mod config;
mod creds;
mod dispatch;
mod error;
mod events;
mod policies;
mod runtime;
mod subscribe;
mod token;

// ---- Public re-exports ----

pub use api::{Backend, Client, Namespace, RequestContext};
pub use config::Config;
pub use creds::CredentialBundle;
pub use dispatch::{Dispatcher, LogSink, Report, Sink};
pub use error::{ApiError, BootstrapError, DecodeError, StreamError, TokenError};
pub use events::{ConnectionStatus, EventType, PushEvent, PushFilter};
pub use policies::{BackoffPolicy, JitterPolicy, ReconnectPolicy};
pub use runtime::{wait_for_signal, Runtime};
pub use subscribe::{EventStream, StreamTransport, Subscriber, Subscription, SubscriptionContext};
pub use token::{IssuedToken, TokenIssuer, TokenManager};
