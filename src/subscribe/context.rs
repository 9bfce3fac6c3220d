//! # Subscription context.
//!
//! The [`SubscriptionContext`] bundles everything a transport needs to open
//! the stream: the target scope path, whether the subscription covers the
//! whole subtree, and the declared kind filter. It is assembled once when the
//! subscriber starts and never mutated afterwards; there is no live
//! re-filtering.

use std::sync::Arc;

use crate::events::PushFilter;

/// Immutable parameters of one subscription.
#[derive(Clone, Debug)]
pub struct SubscriptionContext {
    /// Fully-qualified scope path the stream is rooted at.
    pub scope: Arc<str>,
    /// `true` = events from the scope and all of its children.
    pub recursive: bool,
    /// Declared set of entity kinds of interest.
    pub filter: PushFilter,
}

impl SubscriptionContext {
    /// Creates a context for the given scope.
    pub fn new(scope: impl Into<Arc<str>>, recursive: bool, filter: PushFilter) -> Self {
        Self {
            scope: scope.into(),
            recursive,
            filter,
        }
    }
}
