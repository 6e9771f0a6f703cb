//! Error types for the portfolio engine
//!
//! No error raised here is fatal. Every one is recoverable by the caller
//! re-issuing the action that triggered it:
//! - Inverted filter ranges (reported, never enforced)
//! - Comparison set at capacity
//! - Key-value store failures
//! - Property source failures

use portfolio_model::{InvertedRange, PropertyId, RangeField};

/// Main engine error type
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Filter criteria are inconsistent
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Comparison set is full
    #[error("capacity error: {0}")]
    Capacity(#[from] CapacityError),

    /// Store read or write failed
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Property list could not be fetched
    #[error("data fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Configuration could not be parsed
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl EngineError {
    /// Every engine error can be retried after the user adjusts the input
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        true
    }

    /// True if the error came from the injected store
    #[inline]
    #[must_use]
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }
}

/// Inconsistent filter criteria
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A range has `min > max` and therefore matches nothing
    #[error("range {field} is inverted (min {min} > max {max})")]
    InvertedRange {
        /// Offending field
        field: RangeField,
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },
}

impl From<InvertedRange> for ValidationError {
    fn from(inverted: InvertedRange) -> Self {
        Self::InvertedRange {
            field: inverted.field,
            min: inverted.min,
            max: inverted.max,
        }
    }
}

/// Comparison set already holds its maximum number of properties
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot compare {rejected}: comparison is limited to {capacity} properties")]
pub struct CapacityError {
    /// Id that was not added
    pub rejected: PropertyId,
    /// Configured capacity
    pub capacity: usize,
}

/// Raw failure reported by a [`crate::ports::KeyValueStore`]
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Backend unavailable or refused the operation
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Stored value could not be decoded
    #[error("corrupt value: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Which store operation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    /// Reading a key
    Read,
    /// Writing a key
    Write,
}

impl std::fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Read => "read",
            Self::Write => "write",
        })
    }
}

/// Store failure with the key and operation it happened on
#[derive(Debug, thiserror::Error)]
#[error("{operation} of {key:?} failed: {source}")]
pub struct PersistenceError {
    /// Store key
    pub key: String,
    /// Failed operation
    pub operation: StoreOperation,
    /// Underlying store error
    #[source]
    pub source: StoreError,
}

impl PersistenceError {
    /// Failed read
    #[inline]
    pub fn read(key: impl Into<String>, source: StoreError) -> Self {
        Self {
            key: key.into(),
            operation: StoreOperation::Read,
            source,
        }
    }

    /// Failed write
    #[inline]
    pub fn write(key: impl Into<String>, source: StoreError) -> Self {
        Self {
            key: key.into(),
            operation: StoreOperation::Write,
            source,
        }
    }
}

/// Property source failure
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Source could not be reached
    #[error("property source unavailable: {0}")]
    Unavailable(String),

    /// Source returned data that is not a property list
    #[error("malformed property list: {0}")]
    Malformed(String),
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML could not be parsed
    #[error("invalid TOML: {0}")]
    InvalidToml(#[from] toml::de::Error),
}
