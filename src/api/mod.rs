//! Remote API client.
//!
//! This module contains the manipulator-style façade over the remote
//! policy-management API.
//!
//! ## Contents
//! - [`Namespace`] the scoped entity this client provisions
//! - [`RequestContext`] deadline and retry policy for one logical call
//! - [`Backend`] the injected raw transport boundary (one network attempt)
//! - [`Client`] deadline-bounded retry wrapper around a backend
//!
//! ## Retry contract
//! The client retries transient failures (`Timeout`, `Communication`) with
//! backoff until the context deadline elapses, and returns immediately on
//! terminal application failures (`Validation`, `Unauthorized`). Implementers
//! of new operations must preserve this split.

mod client;
mod context;
mod namespace;

pub use client::{Backend, Client};
pub use context::RequestContext;
pub use namespace::Namespace;
