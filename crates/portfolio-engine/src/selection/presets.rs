//! Saved filter presets

use portfolio_model::{FilterCriteria, SavedFilterPreset};
use serde::{Deserialize, Serialize};

/// Ordered collection of saved presets
///
/// Names are not required to be unique; presets are addressed by position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetBook {
    presets: Vec<SavedFilterPreset>,
}

impl PresetBook {
    /// Create an empty book
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot of `criteria` under `name`; returns its index
    pub fn save(&mut self, name: impl Into<String>, criteria: FilterCriteria) -> usize {
        self.presets.push(SavedFilterPreset::new(name, criteria));
        self.presets.len() - 1
    }

    /// Remove the preset at `index`; `None` if out of range
    pub fn delete(&mut self, index: usize) -> Option<SavedFilterPreset> {
        (index < self.presets.len()).then(|| self.presets.remove(index))
    }

    /// Preset at `index`
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SavedFilterPreset> {
        self.presets.get(index)
    }

    /// All presets in save order
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[SavedFilterPreset] {
        &self.presets
    }

    /// Number of presets
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// True if nothing is saved
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}
