//! Testing utilities for the portfolio workspace
//!
//! Shared fixtures, store doubles and proptest strategies.

#![allow(missing_docs)]

use portfolio_engine::error::StoreError;
use portfolio_engine::ports::{KeyValueStore, MemoryStore, Notification, NotificationLevel};
use portfolio_model::{
    Amenity, EnergyClass, Property, PropertyId, PropertyStatus, PropertyType,
};
use proptest::prelude::*;
use serde_json::Value;

// ----------------------------------------------------------------------
// Fixtures
// ----------------------------------------------------------------------

/// Bare listing with only the required fields
pub fn listing(id: &str, status: PropertyStatus) -> Property {
    Property::new(id, format!("Property {id}"), PropertyType::Apartment, status)
}

/// A rented flat with price and rent set
pub fn rented_flat(id: &str, price: f64, rent: f64) -> Property {
    listing(id, PropertyStatus::Rented)
        .with_purchase_price(price)
        .with_monthly_rent(rent)
}

/// `count` listings, all in `status`, with ids `{prefix}-0..`
pub fn bucket_of(prefix: &str, count: usize, status: PropertyStatus) -> Vec<Property> {
    (0..count)
        .map(|i| listing(&format!("{prefix}-{i}"), status))
        .collect()
}

const NAMES: [&str; 8] = [
    "Harbour View",
    "Oak Terrace",
    "Mill Lofts",
    "Station Court",
    "Riverside",
    "Garden Villa",
    "Old Bakery",
    "North Yard",
];

/// Deterministic 23-property portfolio covering every bucket and type
///
/// Ids are `"1"..="23"`. Every fourth property lacks a purchase price, and
/// every fifth lacks rent, so derived metrics hit their guarded branches.
pub fn sample_portfolio() -> Vec<Property> {
    (1..=23u32)
        .map(|n| {
            let i = n as usize;
            let status = PropertyStatus::ALL[i % PropertyStatus::ALL.len()];
            let property_type = PropertyType::ALL[i % PropertyType::ALL.len()];
            let mut p = Property::new(
                n.to_string(),
                format!("{} {n}", NAMES[i % NAMES.len()]),
                property_type,
                status,
            )
            .with_address(format!("{n} Long Street"))
            .with_living_area(f64::from(40 + n * 7))
            .with_bedrooms(n % 5)
            .with_energy_class(EnergyClass::ALL[i % EnergyClass::ALL.len()])
            .with_purchase_date(format!("20{:02}-0{}-15", 10 + n % 12, 1 + n % 9));
            if n % 4 != 0 {
                p = p.with_purchase_price(f64::from(90_000 + n * 12_500));
            }
            if n % 5 != 0 {
                p = p
                    .with_monthly_rent(f64::from(600 + n * 45))
                    .with_monthly_expenses(f64::from(80 + n * 5));
            }
            if n % 3 == 0 {
                p = p.with_amenity(Amenity::Parking);
            }
            if n % 6 == 0 {
                p = p.with_amenity(Amenity::Garden);
            }
            p
        })
        .collect()
}

/// Ids of `items`, in order
pub fn ids<T: AsRef<Property>>(items: &[T]) -> Vec<String> {
    items.iter().map(|p| p.as_ref().id.to_string()).collect()
}

// ----------------------------------------------------------------------
// Store and notifier doubles
// ----------------------------------------------------------------------

/// A store whose reads and writes can be made to fail
#[derive(Debug, Default)]
pub struct FailingStore {
    inner: MemoryStore,
    fail_reads: bool,
    fail_writes: bool,
    pub write_attempts: usize,
}

impl FailingStore {
    /// Every write fails; reads see `inner`
    pub fn rejecting_writes(inner: MemoryStore) -> Self {
        Self {
            inner,
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Every read fails; writes succeed
    pub fn rejecting_reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    /// Start or stop failing writes
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Underlying storage
    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }
}

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Unavailable(format!("read of {key} refused")));
        }
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.write_attempts += 1;
        if self.fail_writes {
            return Err(StoreError::Unavailable("quota exceeded".to_string()));
        }
        self.inner.set(key, value)
    }
}

/// Levels of recorded notifications, in order
pub fn levels(notifications: &[Notification]) -> Vec<NotificationLevel> {
    notifications.iter().map(|n| n.level).collect()
}

// ----------------------------------------------------------------------
// Strategies
// ----------------------------------------------------------------------

pub fn arb_status() -> impl Strategy<Value = PropertyStatus> {
    prop::sample::select(PropertyStatus::ALL.to_vec())
}

pub fn arb_property_type() -> impl Strategy<Value = PropertyType> {
    prop::sample::select(PropertyType::ALL.to_vec())
}

fn arb_amount(max: f64) -> impl Strategy<Value = Option<f64>> {
    prop::option::of(prop_oneof![1 => Just(0.0), 9 => 1.0..max])
}

/// A listing with a mix of present, zero and missing fields
///
/// Names come from a small pool, so sorts by name produce ties.
pub fn arb_property() -> impl Strategy<Value = Property> {
    let identity = (
        prop::sample::select(vec!["Alder", "alder", "Birch", "Cedar", "Elm"]),
        prop::option::of(prop::sample::select(vec!["Ash Lane", "beech Road", "Elm Row"])),
        arb_property_type(),
        arb_status(),
    );
    let money = (
        arb_amount(2_000_000.0),
        arb_amount(10_000.0),
        arb_amount(3_000.0),
    );
    let shape = (
        arb_amount(500.0),
        prop::option::of(0u32..8),
        prop::option::of(prop::sample::select(vec![
            "2019-03-15",
            "2021-06-01T12:00:00Z",
            "2020-01-01T08:30:00",
            "someday",
        ])),
        prop::option::of(prop::sample::select(EnergyClass::ALL.to_vec())),
        any::<bool>(),
    );

    (identity, money, shape).prop_map(
        |((name, address, property_type, status), (price, rent, expenses), shape)| {
            let (area, bedrooms, date, energy, parking) = shape;
            let mut p = Property::new("0", name, property_type, status);
            p.address = address.map(str::to_string);
            p.purchase_price = price;
            p.monthly_rent = rent;
            p.monthly_expenses = expenses;
            p.living_area = area;
            p.bedrooms = bedrooms;
            p.purchase_date = date.map(str::to_string);
            p.energy_class = energy;
            p.amenities.set(Amenity::Parking, parking);
            p
        },
    )
}

/// Up to `max_len` listings with unique ids `p0, p1, ..`
pub fn arb_properties(max_len: usize) -> impl Strategy<Value = Vec<Property>> {
    prop::collection::vec(arb_property(), 0..=max_len).prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(i, mut p)| {
                p.id = PropertyId::new(format!("p{i}"));
                p
            })
            .collect()
    })
}
