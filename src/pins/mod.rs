//! Pinned notes.
//!
//! Membership in the pinned set is the only source of truth for whether a note is
//! pinned; notes themselves carry no pinned flag.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub mod store;

pub use store::PinStore;

/// Set of pinned note slugs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PinnedSet {
    slugs: BTreeSet<String>,
}

impl PinnedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.slugs.contains(slug)
    }

    /// Add a slug. Returns true if it was not already pinned.
    pub fn insert(&mut self, slug: impl Into<String>) -> bool {
        self.slugs.insert(slug.into())
    }

    /// Remove a slug. Returns true if it was pinned.
    pub fn remove(&mut self, slug: &str) -> bool {
        self.slugs.remove(slug)
    }

    /// Invert membership of `slug`. Returns the new pinned state.
    pub fn toggle(&mut self, slug: &str) -> bool {
        if self.slugs.remove(slug) {
            false
        } else {
            self.slugs.insert(slug.to_string());
            true
        }
    }

    /// Drop every slug for which `keep` returns false. Returns how many were dropped.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) -> usize {
        let before = self.slugs.len();
        self.slugs.retain(|slug| keep(slug));
        before - self.slugs.len()
    }

    pub fn len(&self) -> usize {
        self.slugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slugs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.slugs.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for PinnedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            slugs: iter.into_iter().map(Into::into).collect(),
        }
    }
}
