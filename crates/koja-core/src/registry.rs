//! Documentation registry
//!
//! Maps type identities to their parsed [`DocMetadata`]. A registry is filled
//! once per generation session through [`DocRegistryBuilder`] and is read-only
//! afterwards, so a built registry can be shared between threads (e.g. behind
//! an `Arc`) without locking.

use crate::describe::JsonSchema;
use crate::doc::DocMetadata;
use std::collections::{HashMap, HashSet};

/// Read-only lookup from type identity to doc metadata
#[derive(Debug, Clone, Default)]
pub struct DocRegistry {
    entries: HashMap<String, DocMetadata>,
}

impl DocRegistry {
    /// A registry without any documentation
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> DocRegistryBuilder {
        DocRegistryBuilder::default()
    }

    /// Collect the documentation of `T` and every type reachable from it
    pub fn for_type<T: JsonSchema + ?Sized>() -> Self {
        let mut builder = Self::builder();
        T::register_docs(&mut builder);
        builder.build()
    }

    pub fn get(&self, identity: &str) -> Option<&DocMetadata> {
        self.entries.get(identity)
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.entries.contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Mutable stage of a [`DocRegistry`]
#[derive(Debug, Default)]
pub struct DocRegistryBuilder {
    entries: HashMap<String, DocMetadata>,
    visited: HashSet<String>,
}

impl DocRegistryBuilder {
    /// Record the documentation of a type.
    ///
    /// Empty metadata is not stored. A second entry for the same identity
    /// replaces the first, and the replaced entry is returned.
    pub fn insert(&mut self, identity: impl Into<String>, meta: DocMetadata) -> Option<DocMetadata> {
        let identity = identity.into();
        if meta.is_empty() {
            return None;
        }
        let previous = self.entries.insert(identity.clone(), meta);
        if previous.is_some() {
            tracing::warn!(identity = %identity, "replacing documentation registered twice");
        }
        previous
    }

    /// Mark a type as walked.
    ///
    /// Returns `false` when the identity was already visited, which stops
    /// recursive registration on self-referential types.
    pub fn visit(&mut self, identity: &str) -> bool {
        if self.visited.contains(identity) {
            return false;
        }
        self.visited.insert(identity.to_string());
        true
    }

    /// Register `T` and everything reachable from it
    pub fn register<T: JsonSchema + ?Sized>(&mut self) -> &mut Self {
        T::register_docs(self);
        self
    }

    pub fn build(self) -> DocRegistry {
        tracing::debug!(entries = self.entries.len(), "documentation registry built");
        DocRegistry {
            entries: self.entries,
        }
    }
}

impl FromIterator<(String, DocMetadata)> for DocRegistry {
    fn from_iter<I: IntoIterator<Item = (String, DocMetadata)>>(iter: I) -> Self {
        let mut builder = DocRegistry::builder();
        for (identity, meta) in iter {
            builder.insert(identity, meta);
        }
        builder.build()
    }
}
