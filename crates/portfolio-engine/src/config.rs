//! Engine configuration
//!
//! Every field has a default, so a partial (or empty) TOML document is a
//! valid configuration.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Store keys used for persisted selections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    /// Favorite ids
    pub favorites: String,
    /// Saved filter presets
    pub presets: String,
    /// Last sort preference
    pub sort: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            favorites: "portfolio.favorites".to_string(),
            presets: "portfolio.filterPresets".to_string(),
            sort: "portfolio.sortPreference".to_string(),
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Page size each bucket starts with
    pub default_items_per_page: usize,
    /// Maximum number of properties in the comparison set
    pub comparison_capacity: usize,
    /// Compare text sort keys by code point instead of case-folded
    pub case_sensitive_sort: bool,
    /// Store keys
    pub storage_keys: StorageKeys,
}

impl EngineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML
    ///
    /// # Errors
    /// Returns error if the document is not valid TOML or a field has the
    /// wrong type
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        Ok(config.normalized())
    }

    /// With page size
    #[inline]
    #[must_use]
    pub fn with_items_per_page(mut self, n: usize) -> Self {
        self.default_items_per_page = n.max(1);
        self
    }

    /// With comparison capacity
    #[inline]
    #[must_use]
    pub fn with_comparison_capacity(mut self, capacity: usize) -> Self {
        self.comparison_capacity = capacity.max(1);
        self
    }

    /// With case-sensitive text sorting
    #[inline]
    #[must_use]
    pub fn with_case_sensitive_sort(mut self, enabled: bool) -> Self {
        self.case_sensitive_sort = enabled;
        self
    }

    /// With custom store keys
    #[inline]
    #[must_use]
    pub fn with_storage_keys(mut self, keys: StorageKeys) -> Self {
        self.storage_keys = keys;
        self
    }

    fn normalized(self) -> Self {
        Self {
            default_items_per_page: self.default_items_per_page.max(1),
            comparison_capacity: self.comparison_capacity.max(1),
            ..self
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_items_per_page: 9,
            comparison_capacity: 4,
            case_sensitive_sort: false,
            storage_keys: StorageKeys::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn partial_toml_overrides() {
        let config = EngineConfig::from_toml_str(
            r#"
            default_items_per_page = 12
            case_sensitive_sort = true

            [storage_keys]
            favorites = "tenant-42.favorites"
            "#,
        )
        .unwrap();

        assert_eq!(config.default_items_per_page, 12);
        assert_eq!(config.comparison_capacity, 4);
        assert!(config.case_sensitive_sort);
        assert_eq!(config.storage_keys.favorites, "tenant-42.favorites");
        assert_eq!(config.storage_keys.presets, "portfolio.filterPresets");
    }

    #[test]
    fn zero_sizes_are_clamped() {
        let config = EngineConfig::from_toml_str("default_items_per_page = 0\ncomparison_capacity = 0")
            .unwrap();
        assert_eq!(config.default_items_per_page, 1);
        assert_eq!(config.comparison_capacity, 1);
    }

    #[test]
    fn wrong_type_is_rejected() {
        assert!(EngineConfig::from_toml_str("comparison_capacity = \"four\"").is_err());
    }
}
