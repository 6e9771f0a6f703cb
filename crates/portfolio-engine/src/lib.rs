//! Portfolio Engine
//!
//! Filtering, sorting, pagination and selection over a snapshot of rental
//! properties. The pipeline runs in a fixed order:
//!
//! 1. **Filter**: every criterion must pass
//! 2. **Partition**: one bucket per lifecycle status
//! 3. **Sort**: stable, per bucket, by a text, numeric, date or derived key
//! 4. **Paginate**: independent page state per bucket
//!
//! Favorites, the comparison set and saved presets live beside the pipeline
//! and persist through an injected [`KeyValueStore`].
//!
//! # Example
//!
//! ```rust
//! use portfolio_engine::prelude::*;
//!
//! let mut browser = PortfolioBrowser::new(EngineConfig::default(), MemoryStore::new(), TracingNotifier);
//! browser.replace_properties(vec![
//!     Property::new("1", "Harbour Flat", PropertyType::Apartment, PropertyStatus::Rented)
//!         .with_purchase_price(200_000.0)
//!         .with_monthly_rent(1_000.0),
//!     Property::new("2", "Hill House", PropertyType::House, PropertyStatus::Available),
//! ]);
//!
//! browser.set_sort(SortSpec::descending(SortKey::GrossYield));
//! let page = browser.get_page(Bucket::Rented);
//! assert_eq!(page.len(), 1);
//! assert_eq!(portfolio_engine::metrics::compute(&page[0]).gross_yield, 6.0);
//! ```

#![warn(missing_docs)]

pub mod browser;
pub mod config;
pub mod error;
pub mod filter;
pub mod metrics;
pub mod pagination;
pub mod partition;
pub mod ports;
pub mod selection;
pub mod sorter;
pub mod state;

// Re-exports
pub use browser::{ComparisonRow, PortfolioBrowser};
pub use config::{EngineConfig, StorageKeys};
pub use error::{
    CapacityError, ConfigError, EngineError, FetchError, PersistenceError, StoreError,
    StoreOperation, ValidationError,
};
pub use metrics::DerivedMetrics;
pub use pagination::{BucketPagination, PageState};
pub use partition::Buckets;
pub use ports::{
    KeyValueStore, MemoryStore, Notification, NotificationLevel, Notifier, PropertySource,
    StaticSource, TracingNotifier,
};
pub use selection::{ComparisonChange, ComparisonSet, FavoriteSet, PresetBook};
pub use sorter::{Collation, TextKey};
pub use state::{Action, BrowserState};

/// Common imports
pub mod prelude {
    pub use crate::browser::PortfolioBrowser;
    pub use crate::config::EngineConfig;
    pub use crate::error::EngineError;
    pub use crate::ports::{
        KeyValueStore, MemoryStore, Notification, Notifier, PropertySource, TracingNotifier,
    };
    pub use crate::state::Action;
    pub use portfolio_model::prelude::*;
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
