//! Selection sets
//!
//! Three small stateful collections keyed by property id, independent of the
//! filter/sort pipeline:
//! - [`FavoriteSet`]: persisted set of favorite ids
//! - [`ComparisonSet`]: bounded, ordered, session-only comparison list
//! - [`PresetBook`]: persisted list of named filter snapshots

mod comparison;
mod favorites;
mod presets;

pub use comparison::{ComparisonChange, ComparisonSet, DEFAULT_COMPARISON_CAPACITY};
pub use favorites::FavoriteSet;
pub use presets::PresetBook;
