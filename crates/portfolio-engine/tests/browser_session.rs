//! End-to-end browsing sessions over the sample portfolio

use portfolio_engine::prelude::*;
use portfolio_engine::{ComparisonChange, NotificationLevel, StorageKeys};
use portfolio_test_utils::{ids, levels, sample_portfolio, FailingStore};
use pretty_assertions::assert_eq;
use serde_json::json;

type Session<S> = PortfolioBrowser<S, Vec<Notification>>;

fn session_with<S: KeyValueStore>(store: S, config: EngineConfig) -> Session<S> {
    let mut browser = PortfolioBrowser::new(config, store, Vec::new());
    browser.replace_properties(sample_portfolio());
    browser
}

fn session() -> Session<MemoryStore> {
    session_with(MemoryStore::new(), EngineConfig::default())
}

#[test]
fn snapshot_is_split_into_buckets() {
    let browser = session();
    assert_eq!(
        browser.bucket_counts(),
        [
            (Bucket::Available, 5),
            (Bucket::Rented, 6),
            (Bucket::Maintenance, 6),
            (Bucket::Sold, 6),
        ]
    );
    assert_eq!(browser.matched_count(), 23);
}

#[test]
fn buckets_page_independently() {
    let mut browser = session_with(
        MemoryStore::new(),
        EngineConfig::default().with_items_per_page(2),
    );
    assert_eq!(browser.total_pages(Bucket::Rented), 3);

    browser.change_page(Bucket::Rented, 99);
    assert_eq!(browser.page_state(Bucket::Rented).current_page, 3);
    assert_eq!(browser.page_state(Bucket::Sold).current_page, 1);

    browser.change_items_per_page(Bucket::Sold, 4);
    assert_eq!(browser.page_state(Bucket::Rented).current_page, 3);
    assert_eq!(browser.total_pages(Bucket::Sold), 2);
}

#[test]
fn criteria_change_returns_to_first_page() {
    let mut browser = session_with(
        MemoryStore::new(),
        EngineConfig::default().with_items_per_page(2),
    );
    browser.change_page(Bucket::Maintenance, 2);
    browser.set_criteria(FilterCriteria::new().with_search("street"));

    assert_eq!(browser.page_state(Bucket::Maintenance).current_page, 1);
    assert_eq!(browser.matched_count(), 23);
}

#[test]
fn narrowing_filter_shrinks_buckets() {
    let mut browser = session();
    browser.set_criteria(FilterCriteria::new().with_amenity(Amenity::Garden));

    // Ids divisible by six carry a garden.
    let mut matched: Vec<String> = Bucket::ALL
        .into_iter()
        .flat_map(|b| ids(browser.bucket(b)))
        .collect();
    matched.sort();
    assert_eq!(matched, vec!["12", "18", "6"]);

    browser.reset_criteria();
    assert_eq!(browser.matched_count(), 23);
}

#[test]
fn sorting_by_derived_metric_puts_missing_last() {
    let mut browser = session();
    browser.set_sort(SortSpec::descending(SortKey::GrossYield));

    let rented = browser.bucket(Bucket::Rented);
    let yields: Vec<f64> = rented
        .iter()
        .map(|p| portfolio_engine::metrics::compute(p).gross_yield)
        .collect();
    assert!(yields.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(yields.last().copied(), Some(0.0));
}

#[test]
fn favorites_persist_in_toggle_order() {
    let mut browser = session();
    for id in ["9", "2", "14"] {
        assert!(browser.toggle_favorite(&PropertyId::new(id)).unwrap());
    }
    assert!(!browser.toggle_favorite(&PropertyId::new("2")).unwrap());

    assert_eq!(
        browser.store().get("portfolio.favorites").unwrap(),
        Some(json!(["9", "14"]))
    );
    assert_eq!(
        levels(browser.notifier()),
        vec![NotificationLevel::Success; 4]
    );
}

#[test]
fn failed_write_keeps_last_known_good_state() {
    let store = FailingStore::rejecting_writes(MemoryStore::new().with_entry(
        "portfolio.favorites",
        json!(["1"]),
    ));
    let mut browser = session_with(store, EngineConfig::default());
    assert!(browser.is_favorite(&PropertyId::new("1")));

    let err = browser.toggle_favorite(&PropertyId::new("1")).unwrap_err();
    assert!(err.is_persistence());
    assert!(browser.is_favorite(&PropertyId::new("1")));

    let err = browser
        .save_preset("Cheap", FilterCriteria::new())
        .unwrap_err();
    assert!(err.is_recoverable());
    assert!(browser.presets().is_empty());

    assert_eq!(
        levels(browser.notifier()),
        vec![NotificationLevel::Error, NotificationLevel::Error]
    );

    browser.store_mut().set_fail_writes(false);
    assert!(!browser.toggle_favorite(&PropertyId::new("1")).unwrap());
    assert_eq!(browser.store().write_attempts, 3);
}

#[test]
fn sort_survives_a_failed_write() {
    let mut browser = session_with(
        FailingStore::rejecting_writes(MemoryStore::new()),
        EngineConfig::default(),
    );
    browser.set_sort(SortSpec::descending(SortKey::PurchasePrice));

    assert_eq!(browser.sort(), SortSpec::descending(SortKey::PurchasePrice));
    assert_eq!(levels(browser.notifier()), vec![NotificationLevel::Error]);
}

#[test]
fn unreadable_store_starts_empty() {
    let browser = session_with(FailingStore::rejecting_reads(), EngineConfig::default());
    assert!(browser.favorites().is_empty());
    assert_eq!(browser.sort(), SortSpec::default());
    assert_eq!(levels(browser.notifier()).len(), 3);
}

#[test]
fn custom_storage_keys_are_used() {
    let keys = StorageKeys {
        favorites: "tenant-7.favorites".to_string(),
        ..StorageKeys::default()
    };
    let mut browser = session_with(
        MemoryStore::new(),
        EngineConfig::default().with_storage_keys(keys),
    );
    browser.toggle_favorite(&PropertyId::new("3")).unwrap();

    assert!(browser.store().get("tenant-7.favorites").unwrap().is_some());
    assert!(browser.store().get("portfolio.favorites").unwrap().is_none());
}

#[test]
fn comparison_keeps_insertion_order_and_capacity() {
    let mut browser = session();
    for id in ["5", "1", "22", "7"] {
        assert_eq!(
            browser.toggle_comparison(&PropertyId::new(id)).unwrap(),
            ComparisonChange::Added
        );
    }
    assert!(browser.toggle_comparison(&PropertyId::new("8")).is_err());
    assert_eq!(
        levels(browser.notifier()),
        vec![NotificationLevel::Warning]
    );

    let rows = browser.compared_properties();
    let order: Vec<&str> = rows.iter().map(|r| r.property.id.as_str()).collect();
    assert_eq!(order, vec!["5", "1", "22", "7"]);

    assert_eq!(
        browser.toggle_comparison(&PropertyId::new("1")).unwrap(),
        ComparisonChange::Removed
    );
    browser.clear_comparison();
    assert!(browser.comparison().is_empty());
}

#[test]
fn presets_apply_and_delete() {
    let mut browser = session();
    browser.set_criteria(FilterCriteria::new().with_type(PropertyType::House));
    let houses = browser.matched_count();
    let index = browser.save_current_as("Houses").unwrap();

    browser.reset_criteria();
    browser.save_preset("Houses", FilterCriteria::new()).unwrap();
    assert_eq!(browser.presets().len(), 2);

    assert!(browser.apply_preset_at(index));
    assert_eq!(browser.matched_count(), houses);
    assert!(!browser.apply_preset_at(7));

    assert!(browser.delete_preset(7).unwrap().is_none());
    assert_eq!(browser.delete_preset(0).unwrap().map(|p| p.name), Some("Houses".to_string()));
    assert_eq!(browser.presets().len(), 1);
}
