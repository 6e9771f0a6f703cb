//! Bounded comparison set

use crate::error::CapacityError;
use portfolio_model::PropertyId;
use smallvec::SmallVec;

/// Default maximum number of compared properties
pub const DEFAULT_COMPARISON_CAPACITY: usize = 4;

/// Outcome of a successful toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonChange {
    /// Id was appended
    Added,
    /// Id was removed
    Removed,
}

/// Ordered list of at most `capacity` property ids
///
/// Session-scoped: never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonSet {
    ids: SmallVec<[PropertyId; DEFAULT_COMPARISON_CAPACITY]>,
    capacity: usize,
}

impl ComparisonSet {
    /// Create an empty set with the default capacity
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_COMPARISON_CAPACITY)
    }

    /// Create an empty set holding at most `capacity` ids (at least one)
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: SmallVec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Remove `id` if present, otherwise append it if there is room
    ///
    /// # Errors
    /// Returns [`CapacityError`] when `id` is absent and the set is full;
    /// the set is left unchanged
    pub fn toggle(&mut self, id: &PropertyId) -> Result<ComparisonChange, CapacityError> {
        if let Some(pos) = self.ids.iter().position(|existing| existing == id) {
            self.ids.remove(pos);
            return Ok(ComparisonChange::Removed);
        }
        if self.is_full() {
            return Err(CapacityError {
                rejected: id.clone(),
                capacity: self.capacity,
            });
        }
        self.ids.push(id.clone());
        Ok(ComparisonChange::Added)
    }

    /// Membership test
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &PropertyId) -> bool {
        self.ids.contains(id)
    }

    /// Ids in the order they were added
    #[inline]
    #[must_use]
    pub fn ids(&self) -> &[PropertyId] {
        &self.ids
    }

    /// Number of compared properties
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True if nothing is being compared
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// True if another id would be rejected
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.ids.len() >= self.capacity
    }

    /// Maximum size
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Remove every id
    #[inline]
    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

impl Default for ComparisonSet {
    fn default() -> Self {
        Self::new()
    }
}
