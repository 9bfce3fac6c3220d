//! Typed event dispatch and observational reporting.
//!
//! ## Contents
//! - [`Dispatcher`] explicit kind → route registry with decode-then-handle
//! - [`Report`], [`Sink`] injected observability capability
//! - [`LogSink`] default sink backed by `tracing`
//!
//! ## Quick reference
//! - **Producers of reports**: the dispatcher (decode failures, unexpected
//!   kinds), the runtime loop (transport errors, status transitions), the
//!   token manager (renewal failures).
//! - **Consumer**: whatever [`Sink`] the embedding program injects. Tests use
//!   a recording sink to assert reported conditions deterministically.

mod dispatcher;
mod sink;

pub use dispatcher::Dispatcher;
pub use sink::{LogSink, Report, Sink};
