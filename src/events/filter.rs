//! # Declared interest for a subscription.
//!
//! A [`PushFilter`] names the entity kinds the caller wants events for. It is
//! attached to the stream request at connect time and never changes for the
//! life of the subscriber.
//!
//! A correctly behaving server only delivers events for kinds in the set, but
//! the dispatcher does not assume this and still guards against unexpected
//! kinds.

use std::collections::BTreeSet;
use std::sync::Arc;

/// Set of entity kinds a subscription is interested in.
///
/// Insertion order is irrelevant and duplicates collapse.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PushFilter {
    kinds: BTreeSet<Arc<str>>,
}

impl PushFilter {
    /// Creates an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares interest in the given entity kind.
    pub fn add_kind(&mut self, kind: impl Into<Arc<str>>) -> &mut Self {
        self.kinds.insert(kind.into());
        self
    }

    /// Returns whether the filter declares the given kind.
    pub fn contains(&self, kind: &str) -> bool {
        self.kinds.contains(kind)
    }

    /// Iterates over the declared kinds.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.kinds.iter().map(|k| k.as_ref())
    }

    /// Returns the number of declared kinds.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Returns whether no kind was declared.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
