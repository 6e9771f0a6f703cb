//! Portfolio Model
//!
//! Plain data types shared by the portfolio engine and its collaborators.
//!
//! # Overview
//!
//! - **Property**: a read-only listing supplied by the data provider
//! - **FilterCriteria**: the active predicate set, including numeric ranges
//! - **SortSpec**: a closed [`SortKey`] plus a [`SortDirection`]
//! - **SavedFilterPreset**: a named snapshot of criteria
//!
//! All types serialise to the camelCase JSON shape the dashboard uses.
//!
//! # Example
//!
//! ```rust
//! use portfolio_model::{FilterCriteria, NumericRange, SortKey, SortSpec};
//!
//! let criteria = FilterCriteria::default().with_price_range(NumericRange::at_most(250_000.0));
//! assert!(criteria.price_range.is_active());
//!
//! let spec = SortSpec::descending(SortKey::GrossYield);
//! assert_eq!(spec.field.as_str(), "grossYield");
//! ```

#![warn(missing_docs)]

pub mod criteria;
pub mod error;
pub mod ids;
pub mod property;
pub mod sort;

// Re-exports
pub use criteria::{
    FilterCriteria, InvertedRange, NumericRange, RangeField, SavedFilterPreset, TypeFilter,
};
pub use error::ModelError;
pub use ids::PropertyId;
pub use property::{Amenities, Amenity, Bucket, EnergyClass, Property, PropertyStatus, PropertyType};
pub use sort::{Metric, SortDirection, SortKey, SortKind, SortSpec};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with portfolio data
    pub use crate::{
        Amenity, Bucket, FilterCriteria, NumericRange, Property, PropertyId, PropertyStatus,
        PropertyType, SortDirection, SortKey, SortSpec, TypeFilter,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
