//! Portfolio browser
//!
//! Ties the pure pipeline (filter, partition, sort, paginate) to the
//! stateful selection sets and the injected collaborators.
//!
//! # Recomputation
//!
//! The filtered, partitioned and sorted view is rebuilt eagerly whenever one
//! of its inputs changes (snapshot, criteria, sort, or favorites while
//! `favorites_only` is set). Page reads are then plain slices of that view.
//!
//! # Persistence
//!
//! Favorites, presets and the sort preference are restored from the store at
//! construction and written back after each change. A failed write leaves the
//! in-memory selection at its last persisted value and is reported through
//! the notifier.

use crate::config::EngineConfig;
use crate::error::{EngineError, PersistenceError, StoreError, StoreOperation, ValidationError};
use crate::filter;
use crate::metrics::{self, DerivedMetrics};
use crate::pagination::{self, PageState};
use crate::partition::{self, Buckets};
use crate::ports::{KeyValueStore, Notification, Notifier, PropertySource};
use crate::selection::{ComparisonChange, ComparisonSet, FavoriteSet, PresetBook};
use crate::sorter::{self, Collation};
use crate::state::{Action, BrowserState};
use portfolio_model::{
    Bucket, FilterCriteria, Property, PropertyId, SavedFilterPreset, SortSpec,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// A compared property with its metrics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonRow<'a> {
    /// The property
    pub property: &'a Property,
    /// Its derived metrics
    pub metrics: DerivedMetrics,
}

/// Browsing session over a property snapshot
#[derive(Debug)]
pub struct PortfolioBrowser<S, N> {
    config: EngineConfig,
    store: S,
    notifier: N,
    properties: Vec<Arc<Property>>,
    state: BrowserState,
    favorites: FavoriteSet,
    comparison: ComparisonSet,
    presets: PresetBook,
    view: Buckets<Arc<Property>>,
}

impl<S: KeyValueStore, N: Notifier> PortfolioBrowser<S, N> {
    /// Create a browser and restore persisted selections
    ///
    /// Unreadable or corrupt persisted values are reported and replaced by
    /// defaults; construction itself never fails.
    pub fn new(config: EngineConfig, store: S, notifier: N) -> Self {
        let mut browser = Self {
            state: BrowserState::new(config.default_items_per_page),
            comparison: ComparisonSet::with_capacity(config.comparison_capacity),
            config,
            store,
            notifier,
            properties: Vec::new(),
            favorites: FavoriteSet::new(),
            presets: PresetBook::new(),
            view: Buckets::empty(),
        };
        browser.restore();
        browser
    }

    fn restore(&mut self) {
        let keys = self.config.storage_keys.clone();
        if let Some(favorites) = self.read::<FavoriteSet>(&keys.favorites) {
            self.favorites = favorites;
        }
        if let Some(presets) = self.read::<PresetBook>(&keys.presets) {
            self.presets = presets;
        }
        if let Some(sort) = self.read::<SortSpec>(&keys.sort) {
            self.state = self.state.clone().with_sort(sort);
        }
        tracing::debug!(
            favorites = self.favorites.len(),
            presets = self.presets.len(),
            sort = %self.state.sort.field,
            "restored persisted selections"
        );
    }

    fn read<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        let decoded = self.store.get(key).and_then(|value| {
            value
                .map(serde_json::from_value::<T>)
                .transpose()
                .map_err(StoreError::from)
        });
        match decoded {
            Ok(value) => value,
            Err(source) => {
                self.report(&PersistenceError::read(key, source));
                None
            }
        }
    }

    fn report(&mut self, err: &PersistenceError) {
        tracing::warn!(
            key = %err.key,
            operation = %err.operation,
            error = %err.source,
            "persistence failure"
        );
        let message = match err.operation {
            StoreOperation::Read => format!("Could not restore saved settings ({err})"),
            StoreOperation::Write => format!("Could not save your changes ({err})"),
        };
        self.notifier.notify(Notification::error(message));
    }

    // ------------------------------------------------------------------
    // Snapshot
    // ------------------------------------------------------------------

    /// Replace the property snapshot
    pub fn replace_properties(&mut self, properties: Vec<Property>) {
        self.properties = properties.into_iter().map(Arc::new).collect();
        tracing::info!(count = self.properties.len(), "loaded property snapshot");
        self.recompute();
    }

    /// Fetch a fresh snapshot from `source`
    ///
    /// # Errors
    /// Returns [`EngineError::Fetch`] if the source fails; the previous
    /// snapshot is kept
    pub fn load_from(&mut self, source: &impl PropertySource) -> Result<usize, EngineError> {
        match source.fetch() {
            Ok(properties) => {
                let count = properties.len();
                self.replace_properties(properties);
                Ok(count)
            }
            Err(err) => {
                tracing::warn!(error = %err, "property fetch failed");
                self.notifier
                    .notify(Notification::error(format!("Could not load properties ({err})")));
                Err(err.into())
            }
        }
    }

    /// All properties in the snapshot, unfiltered
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter().map(AsRef::as_ref)
    }

    /// Look up a property in the snapshot
    #[must_use]
    pub fn find(&self, id: &PropertyId) -> Option<&Property> {
        self.properties().find(|p| &p.id == id)
    }

    // ------------------------------------------------------------------
    // View
    // ------------------------------------------------------------------

    fn recompute(&mut self) {
        let collation = Collation::from_case_sensitive(self.config.case_sensitive_sort);
        let sort = self.state.sort;
        let matched = filter::filter(&self.properties, &self.state.criteria, &self.favorites);
        self.view = partition::partition(matched)
            .map_lists(|_, list| sorter::sort(&list, sort, collation));
        self.state.pagination = self.state.pagination.clamp_to(self.view.counts());
        tracing::debug!(
            matched = self.view.total(),
            field = %sort.field,
            direction = ?sort.direction,
            "recomputed view"
        );
    }

    /// Every matching property in `bucket`, sorted
    #[inline]
    #[must_use]
    pub fn bucket(&self, bucket: Bucket) -> &[Arc<Property>] {
        self.view.get(bucket)
    }

    /// Current page of `bucket`
    #[must_use]
    pub fn get_page(&self, bucket: Bucket) -> &[Arc<Property>] {
        pagination::page(self.view.get(bucket), self.state.pagination.get(bucket))
    }

    /// Number of pages in `bucket`; at least one
    #[must_use]
    pub fn total_pages(&self, bucket: Bucket) -> usize {
        pagination::total_pages(
            self.view.get(bucket).len(),
            self.state.pagination.get(bucket).items_per_page,
        )
    }

    /// Paging state of `bucket`
    #[inline]
    #[must_use]
    pub fn page_state(&self, bucket: Bucket) -> PageState {
        self.state.pagination.get(bucket)
    }

    /// Matching properties per bucket
    #[inline]
    #[must_use]
    pub fn bucket_counts(&self) -> [(Bucket, usize); 4] {
        self.view.counts()
    }

    /// Matching properties across all buckets
    #[inline]
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.view.total()
    }

    // ------------------------------------------------------------------
    // State transitions
    // ------------------------------------------------------------------

    /// Current filter, sort and paging state
    #[inline]
    #[must_use]
    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    /// Apply one state transition
    pub fn dispatch(&mut self, action: Action) {
        let reshapes_view = matches!(
            action,
            Action::SetCriteria(_)
                | Action::ResetCriteria
                | Action::SetSort(_)
                | Action::ToggleSortDirection
        );
        let changes_sort = matches!(action, Action::SetSort(_) | Action::ToggleSortDirection);

        self.state = std::mem::take(&mut self.state).reduce(action);

        if reshapes_view {
            self.recompute();
        } else {
            self.state.pagination = self.state.pagination.clamp_to(self.view.counts());
        }
        if changes_sort {
            self.persist_sort();
        }
    }

    /// Active criteria
    #[inline]
    #[must_use]
    pub fn criteria(&self) -> &FilterCriteria {
        &self.state.criteria
    }

    /// Replace the active criteria
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.dispatch(Action::SetCriteria(criteria));
    }

    /// Clear every filter
    pub fn reset_criteria(&mut self) {
        self.dispatch(Action::ResetCriteria);
    }

    /// Inconsistencies in the active criteria
    ///
    /// These do not block filtering; an inverted range simply matches nothing.
    #[must_use]
    pub fn criteria_warnings(&self) -> Vec<ValidationError> {
        match self.state.criteria.validate() {
            Ok(()) => Vec::new(),
            Err(inverted) => inverted.into_iter().map(ValidationError::from).collect(),
        }
    }

    /// Active sort
    #[inline]
    #[must_use]
    pub fn sort(&self) -> SortSpec {
        self.state.sort
    }

    /// Replace the active sort
    pub fn set_sort(&mut self, sort: SortSpec) {
        self.dispatch(Action::SetSort(sort));
    }

    /// Flip the sort direction
    pub fn toggle_sort_direction(&mut self) {
        self.dispatch(Action::ToggleSortDirection);
    }

    /// Move `bucket` to `page`, clamped to its page range
    pub fn change_page(&mut self, bucket: Bucket, page: usize) {
        let bucket_len = self.view.get(bucket).len();
        self.dispatch(Action::ChangePage {
            bucket,
            page,
            bucket_len,
        });
    }

    /// Change `bucket`'s page size and return it to page one
    pub fn change_items_per_page(&mut self, bucket: Bucket, items_per_page: usize) {
        self.dispatch(Action::ChangeItemsPerPage {
            bucket,
            items_per_page,
        });
    }

    fn persist_sort(&mut self) {
        let key = self.config.storage_keys.sort.clone();
        if let Err(err) = persist(&mut self.store, &key, &self.state.sort) {
            // The sort stays applied for this session.
            self.report(&err);
        }
    }

    // ------------------------------------------------------------------
    // Favorites
    // ------------------------------------------------------------------

    /// Favorite ids
    #[inline]
    #[must_use]
    pub fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    /// Membership test
    #[inline]
    #[must_use]
    pub fn is_favorite(&self, id: &PropertyId) -> bool {
        self.favorites.contains(id)
    }

    /// Flip `id`'s favorite membership and persist the set
    ///
    /// Returns true if `id` is now a favorite.
    ///
    /// # Errors
    /// Returns [`EngineError::Persistence`] if the store rejects the write;
    /// the favorite set is left as it was
    pub fn toggle_favorite(&mut self, id: &PropertyId) -> Result<bool, EngineError> {
        let previous = self.favorites.clone();
        let now_favorite = self.favorites.toggle(id);

        let key = self.config.storage_keys.favorites.clone();
        if let Err(err) = persist(&mut self.store, &key, &self.favorites) {
            self.favorites = previous;
            self.report(&err);
            return Err(err.into());
        }

        if self.state.criteria.favorites_only {
            self.recompute();
        }
        self.notifier.notify(Notification::success(if now_favorite {
            "Added to favorites"
        } else {
            "Removed from favorites"
        }));
        Ok(now_favorite)
    }

    // ------------------------------------------------------------------
    // Comparison
    // ------------------------------------------------------------------

    /// Compared ids in the order they were added
    #[inline]
    #[must_use]
    pub fn comparison(&self) -> &ComparisonSet {
        &self.comparison
    }

    /// Add `id` to the comparison, or remove it if already present
    ///
    /// # Errors
    /// Returns [`EngineError::Capacity`] if the comparison is full and `id`
    /// is not in it; a warning is also sent to the notifier
    pub fn toggle_comparison(&mut self, id: &PropertyId) -> Result<ComparisonChange, EngineError> {
        match self.comparison.toggle(id) {
            Ok(change) => {
                tracing::debug!(%id, ?change, size = self.comparison.len(), "comparison toggled");
                Ok(change)
            }
            Err(err) => {
                tracing::warn!(%id, capacity = err.capacity, "comparison full");
                self.notifier.notify(Notification::warning(format!(
                    "You can compare at most {} properties",
                    err.capacity
                )));
                Err(err.into())
            }
        }
    }

    /// Empty the comparison
    pub fn clear_comparison(&mut self) {
        self.comparison.clear();
    }

    /// Compared properties with their metrics, in comparison order
    ///
    /// Ids no longer present in the snapshot are skipped.
    #[must_use]
    pub fn compared_properties(&self) -> Vec<ComparisonRow<'_>> {
        self.comparison
            .ids()
            .iter()
            .filter_map(|id| self.find(id))
            .map(|property| ComparisonRow {
                property,
                metrics: metrics::compute(property),
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Presets
    // ------------------------------------------------------------------

    /// Saved presets in save order
    #[inline]
    #[must_use]
    pub fn presets(&self) -> &[SavedFilterPreset] {
        self.presets.as_slice()
    }

    /// Save `criteria` under `name`; returns the new preset's index
    ///
    /// # Errors
    /// Returns [`EngineError::Persistence`] if the store rejects the write;
    /// the preset is not kept
    pub fn save_preset(
        &mut self,
        name: impl Into<String>,
        criteria: FilterCriteria,
    ) -> Result<usize, EngineError> {
        let name = name.into();
        let previous = self.presets.clone();
        let index = self.presets.save(name.clone(), criteria);
        self.commit_presets(previous)?;

        tracing::info!(%name, index, "saved filter preset");
        self.notifier
            .notify(Notification::success(format!("Saved filter \"{name}\"")));
        Ok(index)
    }

    /// Save the active criteria under `name`
    ///
    /// # Errors
    /// See [`PortfolioBrowser::save_preset`]
    pub fn save_current_as(&mut self, name: impl Into<String>) -> Result<usize, EngineError> {
        let criteria = self.state.criteria.clone();
        self.save_preset(name, criteria)
    }

    /// Replace the active criteria with the preset's
    pub fn apply_preset(&mut self, preset: &SavedFilterPreset) {
        tracing::debug!(name = %preset.name, "applying filter preset");
        self.set_criteria(preset.criteria.clone());
        self.notifier.notify(Notification::success(format!(
            "Applied filter \"{}\"",
            preset.name
        )));
    }

    /// Apply the preset at `index`; false if there is none
    pub fn apply_preset_at(&mut self, index: usize) -> bool {
        match self.presets.get(index).cloned() {
            Some(preset) => {
                self.apply_preset(&preset);
                true
            }
            None => false,
        }
    }

    /// Delete the preset at `index`
    ///
    /// Returns the removed preset, or `None` if `index` is out of range.
    ///
    /// # Errors
    /// Returns [`EngineError::Persistence`] if the store rejects the write;
    /// the preset is kept
    pub fn delete_preset(&mut self, index: usize) -> Result<Option<SavedFilterPreset>, EngineError> {
        let previous = self.presets.clone();
        let Some(removed) = self.presets.delete(index) else {
            return Ok(None);
        };
        self.commit_presets(previous)?;

        self.notifier.notify(Notification::success(format!(
            "Deleted filter \"{}\"",
            removed.name
        )));
        Ok(Some(removed))
    }

    fn commit_presets(&mut self, previous: PresetBook) -> Result<(), EngineError> {
        let key = self.config.storage_keys.presets.clone();
        if let Err(err) = persist(&mut self.store, &key, &self.presets) {
            self.presets = previous;
            self.report(&err);
            return Err(err.into());
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Collaborators
    // ------------------------------------------------------------------

    /// Engine configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Injected store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the injected store
    #[inline]
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Injected notifier
    #[inline]
    #[must_use]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}

/// Serialise `value` and write it under `key`
fn persist<S, T>(store: &mut S, key: &str, value: &T) -> Result<(), PersistenceError>
where
    S: KeyValueStore,
    T: Serialize,
{
    let json = serde_json::to_value(value)
        .map_err(|e| PersistenceError::write(key, StoreError::Corrupt(e)))?;
    store
        .set(key, json)
        .map_err(|e| PersistenceError::write(key, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::ports::{MemoryStore, MockKeyValueStore, NotificationLevel, StaticSource};
    use portfolio_model::{NumericRange, PropertyStatus, PropertyType, RangeField, SortKey};
    use serde_json::json;

    fn listing(id: &str, name: &str, status: PropertyStatus) -> Property {
        Property::new(id, name, PropertyType::Apartment, status)
    }

    fn browser() -> PortfolioBrowser<MemoryStore, Vec<Notification>> {
        let mut b = PortfolioBrowser::new(
            EngineConfig::default(),
            MemoryStore::new(),
            Vec::<Notification>::new(),
        );
        b.replace_properties(vec![
            listing("1", "Cedar", PropertyStatus::Available),
            listing("2", "Alder", PropertyStatus::Available),
            listing("3", "Birch", PropertyStatus::Rented),
        ]);
        b
    }

    fn names(page: &[Arc<Property>]) -> Vec<&str> {
        page.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn pages_are_sorted_by_name() {
        let b = browser();
        assert_eq!(names(b.get_page(Bucket::Available)), vec!["Alder", "Cedar"]);
        assert_eq!(names(b.get_page(Bucket::Rented)), vec!["Birch"]);
        assert!(b.get_page(Bucket::Sold).is_empty());
        assert_eq!(b.total_pages(Bucket::Sold), 1);
    }

    #[test]
    fn sort_change_is_persisted() {
        let mut b = browser();
        b.set_sort(SortSpec::descending(SortKey::Name));
        assert_eq!(names(b.get_page(Bucket::Available)), vec!["Cedar", "Alder"]);
        assert_eq!(
            b.store().get("portfolio.sortPreference").unwrap(),
            Some(json!({"field": "name", "direction": "desc"}))
        );
    }

    #[test]
    fn favorites_only_follows_toggles() {
        let mut b = browser();
        b.set_criteria(FilterCriteria::new().favorites_only());
        assert_eq!(b.matched_count(), 0);

        assert!(b.toggle_favorite(&PropertyId::new("2")).unwrap());
        assert_eq!(names(b.get_page(Bucket::Available)), vec!["Alder"]);
        assert_eq!(
            b.store().get("portfolio.favorites").unwrap(),
            Some(json!(["2"]))
        );
    }

    #[test]
    fn failed_favorite_write_reverts_and_notifies() {
        let mut store = MockKeyValueStore::new();
        store.expect_get().returning(|_| Ok(None));
        store
            .expect_set()
            .returning(|_, _| Err(StoreError::Unavailable("quota exceeded".into())));

        let mut b = PortfolioBrowser::new(
            EngineConfig::default(),
            store,
            Vec::<Notification>::new(),
        );
        let err = b.toggle_favorite(&PropertyId::new("1")).unwrap_err();

        assert!(err.is_persistence());
        assert!(!b.is_favorite(&PropertyId::new("1")));
        assert_eq!(b.notifier().len(), 1);
        assert_eq!(b.notifier()[0].level, NotificationLevel::Error);
    }

    #[test]
    fn unreadable_store_falls_back_to_defaults() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .returning(|_| Err(StoreError::Unavailable("offline".into())));

        let b = PortfolioBrowser::new(
            EngineConfig::default(),
            store,
            Vec::<Notification>::new(),
        );
        assert!(b.favorites().is_empty());
        assert!(b.presets().is_empty());
        assert_eq!(b.sort(), SortSpec::default());
        assert_eq!(b.notifier().len(), 3);
    }

    #[test]
    fn corrupt_persisted_value_is_reported() {
        let store = MemoryStore::new().with_entry("portfolio.favorites", json!({"not": "a list"}));
        let b = PortfolioBrowser::new(
            EngineConfig::default(),
            store,
            Vec::<Notification>::new(),
        );
        assert!(b.favorites().is_empty());
        assert_eq!(b.notifier().len(), 1);
    }

    #[test]
    fn restores_persisted_selections() {
        let store = MemoryStore::new()
            .with_entry("portfolio.favorites", json!(["3"]))
            .with_entry(
                "portfolio.filterPresets",
                json!([{"name": "Rented", "filters": {"search": "rented"}}]),
            )
            .with_entry(
                "portfolio.sortPreference",
                json!({"field": "grossYield", "direction": "desc"}),
            );

        let b = PortfolioBrowser::new(
            EngineConfig::default(),
            store,
            Vec::<Notification>::new(),
        );
        assert!(b.is_favorite(&PropertyId::new("3")));
        assert_eq!(b.presets()[0].name, "Rented");
        assert_eq!(b.sort(), SortSpec::descending(SortKey::GrossYield));
        assert!(b.notifier().is_empty());
    }

    #[test]
    fn comparison_capacity_notifies() {
        let mut b = PortfolioBrowser::new(
            EngineConfig::default().with_comparison_capacity(2),
            MemoryStore::new(),
            Vec::<Notification>::new(),
        );
        b.toggle_comparison(&PropertyId::new("1")).unwrap();
        b.toggle_comparison(&PropertyId::new("2")).unwrap();
        let err = b.toggle_comparison(&PropertyId::new("3")).unwrap_err();

        assert!(matches!(err, EngineError::Capacity(_)));
        assert_eq!(b.comparison().len(), 2);
        assert_eq!(b.notifier().last().unwrap().level, NotificationLevel::Warning);
    }

    #[test]
    fn compared_properties_skip_unknown_ids() {
        let mut b = browser();
        b.toggle_comparison(&PropertyId::new("3")).unwrap();
        b.toggle_comparison(&PropertyId::new("gone")).unwrap();
        b.toggle_comparison(&PropertyId::new("1")).unwrap();

        let rows = b.compared_properties();
        let ids: Vec<_> = rows.iter().map(|r| r.property.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1"]);
    }

    #[test]
    fn preset_round_trip() {
        let mut b = browser();
        let criteria = FilterCriteria::new().with_search("birch");
        let index = b.save_preset("Birch only", criteria.clone()).unwrap();
        b.reset_criteria();
        assert_eq!(b.matched_count(), 3);

        assert!(b.apply_preset_at(index));
        assert_eq!(b.criteria(), &criteria);
        assert_eq!(b.matched_count(), 1);

        let removed = b.delete_preset(index).unwrap().unwrap();
        assert_eq!(removed.name, "Birch only");
        assert!(b.presets().is_empty());
        assert_eq!(b.store().get("portfolio.filterPresets").unwrap(), Some(json!([])));
    }

    #[test]
    fn failed_fetch_keeps_snapshot() {
        struct Down;
        impl PropertySource for Down {
            fn fetch(&self) -> Result<Vec<Property>, FetchError> {
                Err(FetchError::Unavailable("timeout".into()))
            }
        }

        let mut b = browser();
        assert!(b.load_from(&Down).is_err());
        assert_eq!(b.matched_count(), 3);

        let count = b
            .load_from(&StaticSource::new(vec![listing("9", "Elm", PropertyStatus::Sold)]))
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(names(b.get_page(Bucket::Sold)), vec!["Elm"]);
    }

    #[test]
    fn inverted_range_is_a_warning_not_an_error() {
        let mut b = browser();
        b.set_criteria(FilterCriteria::new().with_price_range(NumericRange::between(9.0, 1.0)));
        assert_eq!(b.matched_count(), 0);
        assert_eq!(
            b.criteria_warnings(),
            vec![ValidationError::InvertedRange {
                field: RangeField::Price,
                min: 9.0,
                max: 1.0,
            }]
        );

        b.reset_criteria();
        assert!(b.criteria_warnings().is_empty());
    }
}
