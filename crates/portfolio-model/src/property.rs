//! Property listing types
//!
//! A [`Property`] is owned by the data provider and treated as read-only
//! input. Every numeric field is optional: the engine substitutes neutral
//! defaults rather than rejecting incomplete listings.

use crate::error::ModelError;
use crate::ids::PropertyId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of real estate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    /// Flat in a multi-unit building
    Apartment,
    /// Detached or terraced house
    House,
    /// Villa
    Villa,
    /// Studio flat
    Studio,
    /// Multi-family building with several units
    MultiFamily,
    /// Retail or mixed commercial space
    Commercial,
    /// Office space
    Office,
    /// Undeveloped plot
    Land,
    /// Parking space or lot
    Parking,
    /// Anything else
    Other,
}

impl PropertyType {
    /// All property types, in declaration order
    pub const ALL: [Self; 10] = [
        Self::Apartment,
        Self::House,
        Self::Villa,
        Self::Studio,
        Self::MultiFamily,
        Self::Commercial,
        Self::Office,
        Self::Land,
        Self::Parking,
        Self::Other,
    ];

    /// Wire name of this type
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Apartment => "apartment",
            Self::House => "house",
            Self::Villa => "villa",
            Self::Studio => "studio",
            Self::MultiFamily => "multi_family",
            Self::Commercial => "commercial",
            Self::Office => "office",
            Self::Land => "land",
            Self::Parking => "parking",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ModelError::unknown("property type", s))
    }
}

/// Lifecycle status of a property
///
/// Each status doubles as a [`Bucket`] of the partitioned result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    /// Free to let or sell
    Available,
    /// Currently let
    Rented,
    /// Under maintenance
    Maintenance,
    /// Sold
    Sold,
}

/// A lifecycle-status partition of the property list
pub type Bucket = PropertyStatus;

impl PropertyStatus {
    /// All statuses, in bucket order
    pub const ALL: [Self; 4] = [Self::Available, Self::Rented, Self::Maintenance, Self::Sold];

    /// Wire name of this status
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Rented => "rented",
            Self::Maintenance => "maintenance",
            Self::Sold => "sold",
        }
    }

    /// Position of this bucket in [`PropertyStatus::ALL`]
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            Self::Available => 0,
            Self::Rented => 1,
            Self::Maintenance => 2,
            Self::Sold => 3,
        }
    }
}

impl fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ModelError::unknown("status", s))
    }
}

/// EU energy performance class
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EnergyClass {
    /// A+
    #[serde(rename = "A+")]
    APlus,
    /// A
    A,
    /// B
    B,
    /// C
    C,
    /// D
    D,
    /// E
    E,
    /// F
    F,
    /// G
    G,
}

impl EnergyClass {
    /// All classes, best first
    pub const ALL: [Self; 8] = [
        Self::APlus,
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
    ];

    /// Label as printed on the certificate
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
            Self::G => "G",
        }
    }
}

impl fmt::Display for EnergyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnergyClass {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ModelError::unknown("energy class", s))
    }
}

/// A single amenity flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Amenity {
    /// Outdoor parking space
    Parking,
    /// Closed garage
    Garage,
    /// Terrace
    Terrace,
    /// Balcony
    Balcony,
    /// Private garden
    Garden,
    /// Elevator in the building
    Elevator,
    /// Swimming pool
    Pool,
    /// Cellar or storage room
    Cellar,
    /// Let furnished
    Furnished,
    /// Air conditioning
    AirConditioning,
}

impl Amenity {
    /// All amenities
    pub const ALL: [Self; 10] = [
        Self::Parking,
        Self::Garage,
        Self::Terrace,
        Self::Balcony,
        Self::Garden,
        Self::Elevator,
        Self::Pool,
        Self::Cellar,
        Self::Furnished,
        Self::AirConditioning,
    ];

    /// Wire name of this amenity
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parking => "parking",
            Self::Garage => "garage",
            Self::Terrace => "terrace",
            Self::Balcony => "balcony",
            Self::Garden => "garden",
            Self::Elevator => "elevator",
            Self::Pool => "pool",
            Self::Cellar => "cellar",
            Self::Furnished => "furnished",
            Self::AirConditioning => "airConditioning",
        }
    }
}

impl FromStr for Amenity {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ModelError::unknown("amenity", s))
    }
}

/// Boolean amenity flags
///
/// Used both on a [`Property`] (what it has) and in the filter criteria
/// (what is required).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct Amenities {
    /// Outdoor parking space
    pub parking: bool,
    /// Closed garage
    pub garage: bool,
    /// Terrace
    pub terrace: bool,
    /// Balcony
    pub balcony: bool,
    /// Private garden
    pub garden: bool,
    /// Elevator in the building
    pub elevator: bool,
    /// Swimming pool
    pub pool: bool,
    /// Cellar or storage room
    pub cellar: bool,
    /// Let furnished
    pub furnished: bool,
    /// Air conditioning
    pub air_conditioning: bool,
}

impl Amenities {
    /// No amenities set
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Read a flag
    #[inline]
    #[must_use]
    pub fn has(&self, amenity: Amenity) -> bool {
        match amenity {
            Amenity::Parking => self.parking,
            Amenity::Garage => self.garage,
            Amenity::Terrace => self.terrace,
            Amenity::Balcony => self.balcony,
            Amenity::Garden => self.garden,
            Amenity::Elevator => self.elevator,
            Amenity::Pool => self.pool,
            Amenity::Cellar => self.cellar,
            Amenity::Furnished => self.furnished,
            Amenity::AirConditioning => self.air_conditioning,
        }
    }

    /// Write a flag
    pub fn set(&mut self, amenity: Amenity, value: bool) {
        let slot = match amenity {
            Amenity::Parking => &mut self.parking,
            Amenity::Garage => &mut self.garage,
            Amenity::Terrace => &mut self.terrace,
            Amenity::Balcony => &mut self.balcony,
            Amenity::Garden => &mut self.garden,
            Amenity::Elevator => &mut self.elevator,
            Amenity::Pool => &mut self.pool,
            Amenity::Cellar => &mut self.cellar,
            Amenity::Furnished => &mut self.furnished,
            Amenity::AirConditioning => &mut self.air_conditioning,
        };
        *slot = value;
    }

    /// With a flag set
    #[inline]
    #[must_use]
    pub fn with(mut self, amenity: Amenity) -> Self {
        self.set(amenity, true);
        self
    }

    /// Iterate over the flags that are set
    pub fn iter_set(&self) -> impl Iterator<Item = Amenity> + '_ {
        Amenity::ALL.into_iter().filter(|a| self.has(*a))
    }

    /// True if every flag set on `self` is also set on `other`
    #[inline]
    #[must_use]
    pub fn is_subset_of(&self, other: &Amenities) -> bool {
        self.iter_set().all(|a| other.has(a))
    }
}

/// A property listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Provider id
    pub id: PropertyId,
    /// Display name
    pub name: String,
    /// Street address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Kind of real estate
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    /// Lifecycle status
    pub status: PropertyStatus,
    /// Purchase price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<f64>,
    /// Monthly rent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_rent: Option<f64>,
    /// Monthly running costs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_expenses: Option<f64>,
    /// Living area in square metres
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub living_area: Option<f64>,
    /// Total area in square metres, used when `living_area` is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    /// Plot size in square metres
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub land_area: Option<f64>,
    /// Bedroom count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    /// Bathroom count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
    /// Floor count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floors: Option<u32>,
    /// Rentable units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<u32>,
    /// Year of construction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub construction_year: Option<i32>,
    /// Purchase date as supplied by the provider (ISO-8601 expected)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<String>,
    /// Energy performance class
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_class: Option<EnergyClass>,
    /// Amenity flags
    #[serde(flatten)]
    pub amenities: Amenities,
}

impl Property {
    /// Create a listing with only the required fields set
    #[must_use]
    pub fn new(
        id: impl Into<PropertyId>,
        name: impl Into<String>,
        property_type: PropertyType,
        status: PropertyStatus,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: None,
            property_type,
            status,
            purchase_price: None,
            monthly_rent: None,
            monthly_expenses: None,
            living_area: None,
            area: None,
            land_area: None,
            bedrooms: None,
            bathrooms: None,
            floors: None,
            units: None,
            construction_year: None,
            purchase_date: None,
            energy_class: None,
            amenities: Amenities::none(),
        }
    }

    /// With address
    #[inline]
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// With purchase price
    #[inline]
    #[must_use]
    pub fn with_purchase_price(mut self, price: f64) -> Self {
        self.purchase_price = Some(price);
        self
    }

    /// With monthly rent
    #[inline]
    #[must_use]
    pub fn with_monthly_rent(mut self, rent: f64) -> Self {
        self.monthly_rent = Some(rent);
        self
    }

    /// With monthly expenses
    #[inline]
    #[must_use]
    pub fn with_monthly_expenses(mut self, expenses: f64) -> Self {
        self.monthly_expenses = Some(expenses);
        self
    }

    /// With living area
    #[inline]
    #[must_use]
    pub fn with_living_area(mut self, sqm: f64) -> Self {
        self.living_area = Some(sqm);
        self
    }

    /// With bedroom count
    #[inline]
    #[must_use]
    pub fn with_bedrooms(mut self, bedrooms: u32) -> Self {
        self.bedrooms = Some(bedrooms);
        self
    }

    /// With purchase date
    #[inline]
    #[must_use]
    pub fn with_purchase_date(mut self, date: impl Into<String>) -> Self {
        self.purchase_date = Some(date.into());
        self
    }

    /// With energy class
    #[inline]
    #[must_use]
    pub fn with_energy_class(mut self, class: EnergyClass) -> Self {
        self.energy_class = Some(class);
        self
    }

    /// With an amenity flag set
    #[inline]
    #[must_use]
    pub fn with_amenity(mut self, amenity: Amenity) -> Self {
        self.amenities.set(amenity, true);
        self
    }

    /// Living area, falling back to the total area
    #[inline]
    #[must_use]
    pub fn effective_area(&self) -> Option<f64> {
        self.living_area.or(self.area)
    }

    /// Lifecycle bucket this property belongs to
    #[inline]
    #[must_use]
    pub fn bucket(&self) -> Bucket {
        self.status
    }
}

impl AsRef<Property> for Property {
    fn as_ref(&self) -> &Property {
        self
    }
}
