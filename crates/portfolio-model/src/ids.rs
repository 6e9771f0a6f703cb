//! Property identifiers
//!
//! The data provider hands out ids as either JSON strings or JSON numbers.
//! Both are normalised to their string form so selection sets can key on a
//! single type.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of a property, owned by the external data provider
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PropertyId(String);

impl PropertyId {
    /// Create an id from any string-like value
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PropertyId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PropertyId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for PropertyId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for PropertyId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Unsigned(u64),
            Signed(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self(s),
            Raw::Unsigned(n) => Self(n.to_string()),
            Raw::Signed(n) => Self(n.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_text_ids_are_equal() {
        let from_number: PropertyId = serde_json::from_str("42").unwrap();
        let from_text: PropertyId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(from_number, from_text);
        assert_eq!(from_number, PropertyId::from(42u64));
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = PropertyId::new("p-7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"p-7\"");
        assert_eq!(id.to_string(), "p-7");
    }
}
