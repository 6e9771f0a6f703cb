//! Sort keys and directions
//!
//! Sort fields form a closed set. Each [`SortKey`] declares its
//! [`SortKind`], which decides how the engine extracts and compares it.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A derived investment metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    /// Annual rent over purchase price, percent
    GrossYield,
    /// Annual rent minus expenses over purchase price, percent
    NetYield,
    /// Purchase price per square metre
    PricePerSqm,
    /// Purchase price over annual rent
    PriceToRentRatio,
}

impl Metric {
    /// All metrics
    pub const ALL: [Self; 4] = [
        Self::GrossYield,
        Self::NetYield,
        Self::PricePerSqm,
        Self::PriceToRentRatio,
    ];
}

/// How a sort key is extracted and compared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKind {
    /// Optional text; missing values always sort last
    Text,
    /// Optional number; missing counts as 0
    Numeric,
    /// Date parsed to a timestamp; missing or unparsable counts as 0
    Date,
    /// Derived metric computed on demand
    Metric(Metric),
}

/// Sortable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Display name
    Name,
    /// Street address
    Address,
    /// Property type
    #[serde(rename = "type")]
    PropertyType,
    /// Lifecycle status
    Status,
    /// Energy class
    EnergyClass,
    /// Purchase price
    PurchasePrice,
    /// Monthly rent
    MonthlyRent,
    /// Monthly expenses
    MonthlyExpenses,
    /// Living area (falls back to total area)
    LivingArea,
    /// Plot size
    LandArea,
    /// Bedroom count
    Bedrooms,
    /// Bathroom count
    Bathrooms,
    /// Floor count
    Floors,
    /// Unit count
    Units,
    /// Construction year
    ConstructionYear,
    /// Purchase date
    PurchaseDate,
    /// Gross yield
    GrossYield,
    /// Net yield
    NetYield,
    /// Price per square metre
    PricePerSqm,
    /// Price-to-rent ratio
    PriceToRentRatio,
}

impl SortKey {
    /// Every sort key with its wire name and kind
    const TABLE: [(Self, &'static str, SortKind); 20] = [
        (Self::Name, "name", SortKind::Text),
        (Self::Address, "address", SortKind::Text),
        (Self::PropertyType, "type", SortKind::Text),
        (Self::Status, "status", SortKind::Text),
        (Self::EnergyClass, "energyClass", SortKind::Text),
        (Self::PurchasePrice, "purchasePrice", SortKind::Numeric),
        (Self::MonthlyRent, "monthlyRent", SortKind::Numeric),
        (Self::MonthlyExpenses, "monthlyExpenses", SortKind::Numeric),
        (Self::LivingArea, "livingArea", SortKind::Numeric),
        (Self::LandArea, "landArea", SortKind::Numeric),
        (Self::Bedrooms, "bedrooms", SortKind::Numeric),
        (Self::Bathrooms, "bathrooms", SortKind::Numeric),
        (Self::Floors, "floors", SortKind::Numeric),
        (Self::Units, "units", SortKind::Numeric),
        (Self::ConstructionYear, "constructionYear", SortKind::Numeric),
        (Self::PurchaseDate, "purchaseDate", SortKind::Date),
        (Self::GrossYield, "grossYield", SortKind::Metric(Metric::GrossYield)),
        (Self::NetYield, "netYield", SortKind::Metric(Metric::NetYield)),
        (Self::PricePerSqm, "pricePerSqm", SortKind::Metric(Metric::PricePerSqm)),
        (
            Self::PriceToRentRatio,
            "priceToRentRatio",
            SortKind::Metric(Metric::PriceToRentRatio),
        ),
    ];

    /// All sort keys
    pub const ALL: [Self; 20] = [
        Self::Name,
        Self::Address,
        Self::PropertyType,
        Self::Status,
        Self::EnergyClass,
        Self::PurchasePrice,
        Self::MonthlyRent,
        Self::MonthlyExpenses,
        Self::LivingArea,
        Self::LandArea,
        Self::Bedrooms,
        Self::Bathrooms,
        Self::Floors,
        Self::Units,
        Self::ConstructionYear,
        Self::PurchaseDate,
        Self::GrossYield,
        Self::NetYield,
        Self::PricePerSqm,
        Self::PriceToRentRatio,
    ];

    fn entry(self) -> (Self, &'static str, SortKind) {
        Self::TABLE[self as usize]
    }

    /// Wire name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.entry().1
    }

    /// Extraction and comparison kind
    #[inline]
    #[must_use]
    pub fn kind(&self) -> SortKind {
        self.entry().2
    }

    /// True for the four derived metrics
    #[inline]
    #[must_use]
    pub fn is_derived(&self) -> bool {
        matches!(self.kind(), SortKind::Metric(_))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::TABLE
            .iter()
            .find(|(_, name, _)| name.eq_ignore_ascii_case(s))
            .map(|(key, _, _)| *key)
            .ok_or_else(|| ModelError::unknown("sort key", s))
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first
    #[default]
    Asc,
    /// Largest first
    Desc,
}

impl SortDirection {
    /// Apply the direction to an ascending comparison
    ///
    /// `Equal` stays `Equal`, so ties are unaffected by direction.
    #[inline]
    #[must_use]
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }

    /// The other direction
    #[inline]
    #[must_use]
    pub fn toggled(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl FromStr for SortDirection {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ModelError::unknown("sort direction", s)),
        }
    }
}

/// Active sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    /// Field to sort by
    pub field: SortKey,
    /// Direction
    pub direction: SortDirection,
}

impl SortSpec {
    /// Create a sort
    #[inline]
    #[must_use]
    pub const fn new(field: SortKey, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Ascending sort on `field`
    #[inline]
    #[must_use]
    pub const fn ascending(field: SortKey) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    /// Descending sort on `field`
    #[inline]
    #[must_use]
    pub const fn descending(field: SortKey) -> Self {
        Self::new(field, SortDirection::Desc)
    }

    /// Same field, other direction
    #[inline]
    #[must_use]
    pub fn toggled(self) -> Self {
        Self::new(self.field, self.direction.toggled())
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::ascending(SortKey::Name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_discriminant() {
        for (i, key) in SortKey::ALL.iter().enumerate() {
            assert_eq!(SortKey::TABLE[i].0, *key);
        }
    }

    #[test]
    fn wire_names_round_trip_through_from_str() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
    }

    #[test]
    fn derived_keys() {
        let derived: Vec<_> = SortKey::ALL.into_iter().filter(SortKey::is_derived).collect();
        assert_eq!(
            derived,
            vec![
                SortKey::GrossYield,
                SortKey::NetYield,
                SortKey::PricePerSqm,
                SortKey::PriceToRentRatio
            ]
        );
    }

    #[test]
    fn direction_keeps_ties() {
        assert_eq!(SortDirection::Desc.apply(Ordering::Equal), Ordering::Equal);
        assert_eq!(SortDirection::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(SortDirection::Asc.apply(Ordering::Less), Ordering::Less);
    }

    #[test]
    fn default_sort_is_name_ascending() {
        let spec = SortSpec::default();
        assert_eq!(spec.field, SortKey::Name);
        assert_eq!(spec.direction, SortDirection::Asc);
        assert_eq!(spec.toggled().direction, SortDirection::Desc);
    }
}
