//! # Runtime: single-task event multiplexing.
//!
//! [`Runtime`] composes the pieces: it provisions the scope through the API
//! client and then services a started subscription with one cooperative
//! `select!` loop over four sources:
//!
//! ```text
//! loop {
//!   select! {                               (fair: no fixed priority)
//!     event  ─► dispatcher.dispatch(event)
//!     error  ─► sink.report(TransportError)
//!     status ─► sink.report(StatusChanged); exit on FinalDisconnection
//!     cancel ─► exit
//!   }
//! }
//! ```
//!
//! ## Rules
//! - Exactly one ready source is serviced per iteration; `select!` polls the
//!   branches in random order, so a burst on one channel cannot starve the
//!   others.
//! - Both *final-disconnection* and external cancellation exit the loop.
//!   On *final-disconnection*, events and errors already delivered by the
//!   pump are serviced before the loop returns; cancellation exits at once.
//! - Returning from [`Runtime::run`] drops the [`Subscription`], releasing
//!   the channel receivers; the pump itself stops via the shared token.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::api::{Backend, Client, Namespace, RequestContext};
use crate::config::Config;
use crate::dispatch::{Dispatcher, Report, Sink};
use crate::error::ApiError;
use crate::subscribe::Subscription;

/// Composes client, subscriber, dispatcher, and sink into a running listener.
pub struct Runtime {
    cfg: Config,
    sink: Arc<dyn Sink>,
}

impl Runtime {
    /// Creates a runtime with the given configuration and report sink.
    pub fn new(cfg: Config, sink: Arc<dyn Sink>) -> Self {
        Self { cfg, sink }
    }

    /// Returns the runtime configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Provisions a namespace under the client's root scope.
    ///
    /// The create call is bounded by `Config::create_deadline` (transient
    /// failures are retried inside that window). On success the returned
    /// namespace carries the server-assigned fully-qualified path, which
    /// must be used for all subsequent scoping.
    ///
    /// A failure here is fatal for the listener: the caller should propagate
    /// it and exit non-zero.
    pub async fn provision<B: Backend>(
        &self,
        client: &Client<B>,
        name: &str,
    ) -> Result<Namespace, ApiError> {
        let mut ns = Namespace::new(name);
        let ctx = RequestContext::with_timeout(self.cfg.create_deadline);
        client.create(&ctx, &mut ns).await?;
        tracing::info!(scope = ns.name(), "successfully created namespace");
        Ok(ns)
    }

    /// Services the subscription until *final-disconnection* or cancellation.
    ///
    /// Decoded events go through the dispatcher; transport errors and status
    /// transitions are forwarded to the sink. The loop never blocks on one
    /// source while another is ready.
    pub async fn run(
        &self,
        mut subscription: Subscription,
        dispatcher: Dispatcher,
        token: CancellationToken,
    ) {
        loop {
            tokio::select! {
                Some(event) = subscription.events.recv() => {
                    dispatcher.dispatch(event).await;
                }
                Some(error) = subscription.errors.recv() => {
                    self.sink.report(&Report::TransportError { error }).await;
                }
                Some(status) = subscription.status.recv() => {
                    self.sink.report(&Report::StatusChanged { status }).await;
                    if status.is_terminal() {
                        // The pump is done; whatever it already delivered is
                        // still worth servicing before the loop exits.
                        self.drain(&mut subscription, &dispatcher).await;
                        break;
                    }
                }
                _ = token.cancelled() => break,
                // All channels closed: the pump is gone.
                else => break,
            }
        }
    }

    /// Services events and errors buffered behind a terminal status.
    async fn drain(&self, subscription: &mut Subscription, dispatcher: &Dispatcher) {
        while let Ok(event) = subscription.events.try_recv() {
            dispatcher.dispatch(event).await;
        }
        while let Ok(error) = subscription.errors.try_recv() {
            self.sink.report(&Report::TransportError { error }).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use serde::Deserialize;
    use serde_json::json;

    use crate::error::StreamError;
    use crate::events::{EventType, PushEvent, PushFilter};
    use crate::policies::{BackoffPolicy, JitterPolicy, ReconnectPolicy};
    use crate::subscribe::{EventStream, StreamTransport, Subscriber, SubscriptionContext};

    #[derive(Deserialize)]
    struct Named {
        name: String,
    }

    #[derive(Default)]
    struct RecordingSink {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Sink for RecordingSink {
        async fn report(&self, report: &Report) {
            let label = match report {
                Report::DecodeFailure { event, .. } => format!("decode-failure:{}", event.identity),
                Report::UnexpectedKind { event } => format!("unexpected:{}", event.identity),
                Report::TransportError { error } => format!("transport:{}", error.as_label()),
                Report::StatusChanged { status } => format!("status:{}", status.as_label()),
                Report::TokenRenewalFailed { .. } => "token-renewal".to_string(),
            };
            self.seen.lock().unwrap().push(label);
        }
    }

    type Item = Result<Option<PushEvent>, StreamError>;

    struct ScriptedStream {
        items: VecDeque<Item>,
    }

    #[async_trait]
    impl EventStream for ScriptedStream {
        async fn next(&mut self) -> Item {
            match self.items.pop_front() {
                Some(item) => item,
                None => futures::future::pending().await,
            }
        }
    }

    struct OneSession {
        items: Mutex<Option<Vec<Item>>>,
    }

    #[async_trait]
    impl StreamTransport for OneSession {
        async fn connect(
            &self,
            _ctx: &SubscriptionContext,
        ) -> Result<Box<dyn EventStream>, StreamError> {
            match self.items.lock().unwrap().take() {
                Some(items) => Ok(Box::new(ScriptedStream {
                    items: items.into(),
                })),
                None => Err(StreamError::Connect {
                    message: "already consumed".into(),
                }),
            }
        }
    }

    fn fast_policy() -> ReconnectPolicy {
        ReconnectPolicy {
            backoff: BackoffPolicy {
                first: Duration::from_millis(1),
                max: Duration::from_millis(2),
                factor: 1.0,
                jitter: JitterPolicy::None,
            },
            max_attempts: 0,
        }
    }

    fn runtime_with_sink() -> (Runtime, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        (Runtime::new(Config::default(), sink.clone()), sink)
    }

    struct QualifyingBackend;

    #[async_trait]
    impl Backend for QualifyingBackend {
        async fn create(&self, ns: &mut Namespace) -> Result<(), crate::error::ApiError> {
            ns.set_qualified_name(format!("/acme/{}", ns.name()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn provision_returns_the_qualified_scope() {
        let (runtime, _sink) = runtime_with_sink();
        let client = Client::new(QualifyingBackend);
        let ns = runtime.provision(&client, "test").await.unwrap();
        assert_eq!(ns.name(), "/acme/test");
    }

    #[tokio::test]
    async fn full_scenario_dispatch_and_exit_on_final() {
        let (runtime, sink) = runtime_with_sink();
        let order = Arc::new(Mutex::new(Vec::new()));

        let mut dispatcher = Dispatcher::new(sink.clone());
        let log = order.clone();
        dispatcher.route("kind-a", move |t: EventType, e: Named| {
            let log = log.clone();
            async move {
                log.lock()
                    .unwrap()
                    .push(format!("a:{}:{}", t.as_label(), e.name));
            }
        });
        let log = order.clone();
        dispatcher.route("kind-b", move |t: EventType, e: Named| {
            let log = log.clone();
            async move {
                log.lock()
                    .unwrap()
                    .push(format!("b:{}:{}", t.as_label(), e.name));
            }
        });

        let transport = OneSession {
            items: Mutex::new(Some(vec![
                Ok(Some(PushEvent::new(
                    "kind-a",
                    EventType::Create,
                    json!({"name": "one"}),
                ))),
                Ok(Some(PushEvent::new(
                    "kind-unknown",
                    EventType::Update,
                    json!({"name": "two"}),
                ))),
                Ok(Some(PushEvent::new(
                    "kind-b",
                    EventType::Delete,
                    json!({"name": "three"}),
                ))),
                Ok(None),
            ])),
        };

        let mut filter = PushFilter::new();
        filter.add_kind("kind-a").add_kind("kind-b");
        let token = CancellationToken::new();
        let subscription = Subscriber::new(transport, "/acme/test", true)
            .with_reconnect(fast_policy())
            .start(token.child_token(), filter);

        tokio::time::timeout(
            Duration::from_secs(5),
            runtime.run(subscription, dispatcher, token),
        )
        .await
        .expect("loop exits on final disconnection");

        // Handler invocations in exact injection order, unknown kind reported
        // in between.
        assert_eq!(
            order.lock().unwrap().as_slice(),
            ["a:create:one", "b:delete:three"]
        );
        let seen = sink.seen.lock().unwrap();
        let dispatch_reports: Vec<_> = seen
            .iter()
            .filter(|s| !s.starts_with("status:"))
            .collect();
        assert_eq!(dispatch_reports, ["unexpected:kind-unknown"]);
        assert!(seen.contains(&"status:initial_connection".to_string()));
        assert!(seen.contains(&"status:final_disconnection".to_string()));
    }

    #[tokio::test]
    async fn transport_errors_are_forwarded_to_the_sink() {
        let (runtime, sink) = runtime_with_sink();
        let transport = OneSession {
            items: Mutex::new(Some(vec![
                Err(StreamError::Protocol {
                    message: "bad frame".into(),
                }),
                Ok(None),
            ])),
        };

        let token = CancellationToken::new();
        let subscription = Subscriber::new(transport, "/acme/test", true)
            .with_reconnect(fast_policy())
            .start(token.child_token(), PushFilter::new());

        runtime
            .run(subscription, Dispatcher::new(sink.clone()), token)
            .await;

        assert!(sink
            .seen
            .lock()
            .unwrap()
            .contains(&"transport:stream_protocol".to_string()));
    }

    #[tokio::test]
    async fn external_cancellation_exits_the_loop() {
        let (runtime, sink) = runtime_with_sink();
        // A stream that never produces anything.
        let transport = OneSession {
            items: Mutex::new(Some(vec![])),
        };

        let token = CancellationToken::new();
        let subscription = Subscriber::new(transport, "/acme/test", true)
            .with_reconnect(fast_policy())
            .start(token.child_token(), PushFilter::new());

        let cancel = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            cancel.cancel();
        });

        tokio::time::timeout(
            Duration::from_secs(5),
            runtime.run(subscription, Dispatcher::new(sink.clone()), token),
        )
        .await
        .expect("loop exits on cancellation");
    }
}
