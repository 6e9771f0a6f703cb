//! Filter criteria and saved presets
//!
//! Every sub-criterion is independent; an absent bound or flag imposes no
//! constraint. [`FilterCriteria::default`] matches every property.

use crate::error::ModelError;
use crate::property::{Amenities, Amenity, EnergyClass, Property, PropertyType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive numeric range with optional bounds
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericRange {
    /// Lower bound, inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Upper bound, inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl NumericRange {
    /// Range with no bounds
    #[inline]
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    /// Range with both bounds
    #[inline]
    #[must_use]
    pub const fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Range with a lower bound only
    #[inline]
    #[must_use]
    pub const fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// Range with an upper bound only
    #[inline]
    #[must_use]
    pub const fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// True if at least one bound is set
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    /// True if both bounds are set and `min > max`
    #[inline]
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        matches!((self.min, self.max), (Some(lo), Some(hi)) if lo > hi)
    }

    /// Test a possibly-missing value against the range
    ///
    /// A missing value fails whenever a bound is set.
    #[must_use]
    pub fn admits(&self, value: Option<f64>) -> bool {
        if !self.is_active() {
            return true;
        }
        let Some(v) = value else {
            return false;
        };
        self.min.map_or(true, |lo| v >= lo) && self.max.map_or(true, |hi| v <= hi)
    }
}

/// A range whose lower bound exceeds its upper bound
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("range {field} is inverted (min {min} > max {max})")]
pub struct InvertedRange {
    /// Offending field
    pub field: RangeField,
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

/// Range-filtered property fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeField {
    /// Purchase price
    Price,
    /// Bedroom count
    Bedrooms,
    /// Living area (falls back to total area)
    LivingArea,
    /// Plot size
    LandArea,
    /// Floor count
    Floors,
    /// Bathroom count
    Bathrooms,
}

impl RangeField {
    /// All range fields, in criteria order
    pub const ALL: [Self; 6] = [
        Self::Price,
        Self::Bedrooms,
        Self::LivingArea,
        Self::LandArea,
        Self::Floors,
        Self::Bathrooms,
    ];

    /// Name of the criteria field
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Price => "priceRange",
            Self::Bedrooms => "bedrooms",
            Self::LivingArea => "livingArea",
            Self::LandArea => "landArea",
            Self::Floors => "floors",
            Self::Bathrooms => "bathrooms",
        }
    }

    /// Read the filtered value from a property
    #[must_use]
    pub fn value_of(&self, property: &Property) -> Option<f64> {
        match self {
            Self::Price => property.purchase_price,
            Self::Bedrooms => property.bedrooms.map(f64::from),
            Self::LivingArea => property.effective_area(),
            Self::LandArea => property.land_area,
            Self::Floors => property.floors.map(f64::from),
            Self::Bathrooms => property.bathrooms.map(f64::from),
        }
    }
}

impl fmt::Display for RangeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Property type constraint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeFilter {
    /// Any type (`"all"` on the wire)
    #[default]
    All,
    /// Exactly this type
    Only(PropertyType),
}

impl TypeFilter {
    /// Test a property type
    #[inline]
    #[must_use]
    pub fn admits(&self, property_type: PropertyType) -> bool {
        match self {
            Self::All => true,
            Self::Only(t) => *t == property_type,
        }
    }
}

impl TryFrom<String> for TypeFilter {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.eq_ignore_ascii_case("all") || value.is_empty() {
            Ok(Self::All)
        } else {
            value.parse().map(Self::Only)
        }
    }
}

impl From<TypeFilter> for String {
    fn from(value: TypeFilter) -> Self {
        match value {
            TypeFilter::All => "all".to_string(),
            TypeFilter::Only(t) => t.as_str().to_string(),
        }
    }
}

/// Active filter criteria
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Property type constraint
    #[serde(rename = "type")]
    pub property_type: TypeFilter,
    /// Purchase price range
    pub price_range: NumericRange,
    /// Bedroom range
    pub bedrooms: NumericRange,
    /// Living area range
    pub living_area: NumericRange,
    /// Plot size range
    pub land_area: NumericRange,
    /// Floor count range
    pub floors: NumericRange,
    /// Bathroom range
    pub bathrooms: NumericRange,
    /// Required energy class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_class: Option<EnergyClass>,
    /// Required amenities
    pub amenities: Amenities,
    /// Restrict to favorites
    pub favorites_only: bool,
    /// Free-text search
    pub search: String,
}

impl FilterCriteria {
    /// Criteria matching everything
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Range for a field
    #[must_use]
    pub fn range(&self, field: RangeField) -> &NumericRange {
        match field {
            RangeField::Price => &self.price_range,
            RangeField::Bedrooms => &self.bedrooms,
            RangeField::LivingArea => &self.living_area,
            RangeField::LandArea => &self.land_area,
            RangeField::Floors => &self.floors,
            RangeField::Bathrooms => &self.bathrooms,
        }
    }

    /// Mutable range for a field
    pub fn range_mut(&mut self, field: RangeField) -> &mut NumericRange {
        match field {
            RangeField::Price => &mut self.price_range,
            RangeField::Bedrooms => &mut self.bedrooms,
            RangeField::LivingArea => &mut self.living_area,
            RangeField::LandArea => &mut self.land_area,
            RangeField::Floors => &mut self.floors,
            RangeField::Bathrooms => &mut self.bathrooms,
        }
    }

    /// Iterate over every range with its field
    pub fn ranges(&self) -> impl Iterator<Item = (RangeField, &NumericRange)> + '_ {
        RangeField::ALL.into_iter().map(move |f| (f, self.range(f)))
    }

    /// Check the criteria for ranges that can never match
    ///
    /// Filtering never calls this; an inverted range simply admits nothing.
    ///
    /// # Errors
    ///
    /// Every range with `min > max`, in [`RangeField::ALL`] order.
    pub fn validate(&self) -> Result<(), Vec<InvertedRange>> {
        let inverted: Vec<InvertedRange> = self
            .ranges()
            .filter_map(|(field, range)| match (range.min, range.max) {
                (Some(min), Some(max)) if min > max => Some(InvertedRange { field, min, max }),
                _ => None,
            })
            .collect();
        if inverted.is_empty() {
            Ok(())
        } else {
            Err(inverted)
        }
    }

    /// True if no sub-criterion is active
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.property_type == TypeFilter::All
            && self.ranges().all(|(_, r)| !r.is_active())
            && self.energy_class.is_none()
            && self.amenities.iter_set().next().is_none()
            && !self.favorites_only
            && self.search.trim().is_empty()
    }

    /// With type constraint
    #[inline]
    #[must_use]
    pub fn with_type(mut self, property_type: PropertyType) -> Self {
        self.property_type = TypeFilter::Only(property_type);
        self
    }

    /// With price range
    #[inline]
    #[must_use]
    pub fn with_price_range(mut self, range: NumericRange) -> Self {
        self.price_range = range;
        self
    }

    /// With a range on any field
    #[inline]
    #[must_use]
    pub fn with_range(mut self, field: RangeField, range: NumericRange) -> Self {
        *self.range_mut(field) = range;
        self
    }

    /// With a required amenity
    #[inline]
    #[must_use]
    pub fn with_amenity(mut self, amenity: Amenity) -> Self {
        self.amenities.set(amenity, true);
        self
    }

    /// With required energy class
    #[inline]
    #[must_use]
    pub fn with_energy_class(mut self, class: EnergyClass) -> Self {
        self.energy_class = Some(class);
        self
    }

    /// With free-text search
    #[inline]
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Restrict to favorites
    #[inline]
    #[must_use]
    pub fn favorites_only(mut self) -> Self {
        self.favorites_only = true;
        self
    }
}

/// A named snapshot of filter criteria
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedFilterPreset {
    /// Display name; not required to be unique
    pub name: String,
    /// Criteria captured when the preset was saved
    #[serde(rename = "filters", alias = "criteria")]
    pub criteria: FilterCriteria,
}

impl SavedFilterPreset {
    /// Create a preset
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, criteria: FilterCriteria) -> Self {
        Self {
            name: name.into(),
            criteria,
        }
    }
}
