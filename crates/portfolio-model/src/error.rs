//! Error types for the portfolio model

/// Errors raised while parsing model values from text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Text did not name any variant of the expected enum
    #[error("unknown {kind}: {value:?}")]
    UnknownVariant {
        /// Enum being parsed (e.g. `sort key`)
        kind: &'static str,
        /// Rejected input
        value: String,
    },
}

impl ModelError {
    /// Create an unknown-variant error
    #[inline]
    pub fn unknown(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownVariant {
            kind,
            value: value.into(),
        }
    }
}
