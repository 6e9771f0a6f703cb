//! Collaborator ports
//!
//! The engine performs no I/O of its own. Fetching the property list,
//! persisting selections and telling the user about outcomes all go through
//! the traits in this module, injected at construction time.

use crate::error::{FetchError, StoreError};
use portfolio_model::Property;
use serde_json::Value;
use std::collections::HashMap;

/// Supplies the property snapshot
pub trait PropertySource {
    /// Fetch the current property list
    ///
    /// # Errors
    /// Returns error if the list cannot be obtained
    fn fetch(&self) -> Result<Vec<Property>, FetchError>;
}

/// A fixed in-memory property list
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    properties: Vec<Property>,
}

impl StaticSource {
    /// Wrap a list
    #[inline]
    #[must_use]
    pub fn new(properties: Vec<Property>) -> Self {
        Self { properties }
    }
}

impl PropertySource for StaticSource {
    fn fetch(&self) -> Result<Vec<Property>, FetchError> {
        Ok(self.properties.clone())
    }
}

/// Key-value persistence for JSON values
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    /// Read a key; `Ok(None)` if it was never written
    ///
    /// # Errors
    /// Returns error if the backend cannot be read
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Write a key
    ///
    /// # Errors
    /// Returns error if the backend rejects the write
    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError>;
}

/// Volatile store backed by a map
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl MemoryStore {
    /// Create an empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a key
    #[inline]
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, value: Value) -> Self {
        self.entries.insert(key.into(), value);
        self
    }

    /// Number of stored keys
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is stored
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Confirmation of a completed action
    Success,
    /// Informational
    Info,
    /// Action was refused
    Warning,
    /// Action failed
    Error,
}

/// A user-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity
    pub level: NotificationLevel,
    /// Message text
    pub message: String,
}

impl Notification {
    /// Create a notification
    #[inline]
    #[must_use]
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    /// Success notification
    #[inline]
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }

    /// Warning notification
    #[inline]
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, message)
    }

    /// Error notification
    #[inline]
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }
}

/// Receives user-facing notifications
pub trait Notifier {
    /// Deliver a notification
    fn notify(&mut self, notification: Notification);
}

/// Collects notifications in order
impl Notifier for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

/// Forwards notifications to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&mut self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success | NotificationLevel::Info => {
                tracing::info!(message = %notification.message, "notification");
            }
            NotificationLevel::Warning => {
                tracing::warn!(message = %notification.message, "notification");
            }
            NotificationLevel::Error => {
                tracing::error!(message = %notification.message, "notification");
            }
        }
    }
}
