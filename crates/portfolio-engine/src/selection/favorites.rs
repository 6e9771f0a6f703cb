//! Favorite properties

use indexmap::IndexSet;
use portfolio_model::PropertyId;
use serde::{Deserialize, Serialize};

/// Set of favorite property ids
///
/// Keeps insertion order so the persisted form is stable between writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteSet {
    ids: IndexSet<PropertyId>,
}

impl FavoriteSet {
    /// Create an empty set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership; returns true if `id` is now a favorite
    pub fn toggle(&mut self, id: &PropertyId) -> bool {
        if self.ids.shift_remove(id) {
            false
        } else {
            self.ids.insert(id.clone());
            true
        }
    }

    /// Membership test
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &PropertyId) -> bool {
        self.ids.contains(id)
    }

    /// Number of favorites
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True if there are no favorites
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &PropertyId> {
        self.ids.iter()
    }
}

impl FromIterator<PropertyId> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = PropertyId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
