//! # Namespace entity.
//!
//! A namespace is a hierarchical scope under which resources and
//! subscriptions are rooted. The caller supplies a relative name; on create
//! the server rewrites it to the fully-qualified path, which is authoritative
//! from then on (filter and subscriber must use it).

use serde::{Deserialize, Serialize};

/// A hierarchical scope resource.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Namespace {
    name: String,
}

impl Namespace {
    /// Creates a namespace with a caller-supplied relative name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the current name.
    ///
    /// Before a successful create this is the relative name the caller
    /// supplied; afterwards it is the server-assigned fully-qualified path.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replaces the name with the server-assigned fully-qualified path.
    ///
    /// Called by backend implementations when the server echoes the created
    /// entity back.
    pub fn set_qualified_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}
