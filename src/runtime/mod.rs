//! Orchestration: scope provisioning and the event-multiplexing loop.
//!
//! ## Contents
//! - [`Runtime`] composes client, subscriber, dispatcher, and sink
//! - [`wait_for_signal`] cross-platform OS signal helper for embedding
//!   programs that want to wire SIGINT/SIGTERM to the cancellation token

mod orchestrator;
mod shutdown;

pub use orchestrator::Runtime;
pub use shutdown::wait_for_signal;
