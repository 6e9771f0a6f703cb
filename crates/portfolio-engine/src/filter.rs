//! Predicate filter
//!
//! A property passes when every sub-predicate passes. Sub-predicates are
//! independent, so evaluation order has no observable effect.

use crate::selection::FavoriteSet;
use portfolio_model::{FilterCriteria, Property};

/// Test one property against the criteria
#[must_use]
pub fn evaluate(property: &Property, criteria: &FilterCriteria, favorites: &FavoriteSet) -> bool {
    matches_search(property, &criteria.search)
        && criteria.property_type.admits(property.property_type)
        && criteria
            .ranges()
            .all(|(field, range)| range.admits(field.value_of(property)))
        && criteria.amenities.is_subset_of(&property.amenities)
        && criteria
            .energy_class
            .map_or(true, |class| property.energy_class == Some(class))
        && (!criteria.favorites_only || favorites.contains(&property.id))
}

/// Keep the properties that pass, preserving input order
#[must_use]
pub fn filter<T>(items: &[T], criteria: &FilterCriteria, favorites: &FavoriteSet) -> Vec<T>
where
    T: AsRef<Property> + Clone,
{
    let kept: Vec<T> = items
        .iter()
        .filter(|item| evaluate(item.as_ref(), criteria, favorites))
        .cloned()
        .collect();
    tracing::debug!(input = items.len(), kept = kept.len(), "filtered properties");
    kept
}

/// Case-insensitive substring search over the searchable text fields
///
/// Blank search text matches everything.
#[must_use]
pub fn matches_search(property: &Property, search: &str) -> bool {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);

    contains(&property.name)
        || property.address.as_deref().is_some_and(contains)
        || contains(property.property_type.as_str())
        || property.energy_class.is_some_and(|c| contains(c.as_str()))
        || contains(property.status.as_str())
        || property
            .purchase_price
            .is_some_and(|price| contains(&price.to_string()))
}
