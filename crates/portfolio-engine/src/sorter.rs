//! Comparator and sorter
//!
//! Sorting is stable and the direction flips the comparator, not the output,
//! so items with equal keys keep their input order in both directions.
//!
//! Keys are extracted once per item before sorting. For derived metrics this
//! means the metric calculator runs once per item per sort, not once per
//! comparison, and text collation keys are built once per item.

use crate::metrics;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use portfolio_model::{Property, SortDirection, SortKey, SortKind, SortSpec};
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// How text keys are compared
///
/// Both collations compare in three levels: base letters with accents
/// removed, then accents, then the raw text. `É` therefore sorts with `E`
/// rather than after `Z`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Collation {
    /// Case-folded base letters; on otherwise equal text, lower case sorts first
    #[default]
    CaseInsensitive,
    /// Base letters compared with their case
    CaseSensitive,
}

/// Precomputed collation key for one string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextKey<'a> {
    primary: String,
    raw: &'a str,
}

impl Collation {
    /// Collation matching the engine's `case_sensitive_sort` flag
    #[inline]
    #[must_use]
    pub fn from_case_sensitive(case_sensitive: bool) -> Self {
        if case_sensitive {
            Self::CaseSensitive
        } else {
            Self::CaseInsensitive
        }
    }

    /// Build the key for `raw`
    #[must_use]
    pub fn key<'a>(&self, raw: &'a str) -> TextKey<'a> {
        let base = raw.nfd().filter(|c| !is_combining_mark(*c));
        let primary = match self {
            Self::CaseInsensitive => base.flat_map(char::to_lowercase).collect(),
            Self::CaseSensitive => base.collect(),
        };
        TextKey { primary, raw }
    }

    /// Compare two keys built by this collation
    #[must_use]
    pub fn compare_keys(&self, a: &TextKey<'_>, b: &TextKey<'_>) -> Ordering {
        a.primary
            .cmp(&b.primary)
            .then_with(|| match self {
                Self::CaseInsensitive => a
                    .raw
                    .nfd()
                    .flat_map(char::to_lowercase)
                    .cmp(b.raw.nfd().flat_map(char::to_lowercase)),
                Self::CaseSensitive => a.raw.nfd().cmp(b.raw.nfd()),
            })
            .then_with(|| match self {
                Self::CaseInsensitive => b.raw.cmp(a.raw),
                Self::CaseSensitive => a.raw.cmp(b.raw),
            })
    }

    /// Compare two defined strings
    #[must_use]
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.compare_keys(&self.key(a), &self.key(b))
    }
}

/// A pre-extracted sort key
#[derive(Debug, Clone, PartialEq)]
enum SortValue<'a> {
    Text(Option<TextKey<'a>>),
    Number(f64),
}

fn extract(property: &Property, key: SortKey, collation: Collation) -> SortValue<'_> {
    match key.kind() {
        SortKind::Text => {
            SortValue::Text(text_value(property, key).map(|raw| collation.key(raw)))
        }
        SortKind::Numeric => SortValue::Number(numeric_value(property, key).unwrap_or(0.0)),
        SortKind::Date => SortValue::Number(
            property
                .purchase_date
                .as_deref()
                .and_then(parse_timestamp_millis)
                .map_or(0.0, |ms| ms as f64),
        ),
        SortKind::Metric(metric) => SortValue::Number(metrics::compute_one(property, metric)),
    }
}

fn text_value(property: &Property, key: SortKey) -> Option<&str> {
    match key {
        SortKey::Name => Some(property.name.as_str()),
        SortKey::Address => property.address.as_deref(),
        SortKey::PropertyType => Some(property.property_type.as_str()),
        SortKey::Status => Some(property.status.as_str()),
        SortKey::EnergyClass => property.energy_class.map(|c| c.as_str()),
        _ => None,
    }
}

fn numeric_value(property: &Property, key: SortKey) -> Option<f64> {
    let value = match key {
        SortKey::PurchasePrice => property.purchase_price,
        SortKey::MonthlyRent => property.monthly_rent,
        SortKey::MonthlyExpenses => property.monthly_expenses,
        SortKey::LivingArea => property.effective_area(),
        SortKey::LandArea => property.land_area,
        SortKey::Bedrooms => property.bedrooms.map(f64::from),
        SortKey::Bathrooms => property.bathrooms.map(f64::from),
        SortKey::Floors => property.floors.map(f64::from),
        SortKey::Units => property.units.map(f64::from),
        SortKey::ConstructionYear => property.construction_year.map(f64::from),
        _ => None,
    };
    value.filter(|v| v.is_finite())
}

/// Parse a provider date into milliseconds since the Unix epoch
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS` and `YYYY-MM-DD`; naive values are
/// taken as UTC. Returns `None` for anything else.
#[must_use]
pub fn parse_timestamp_millis(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

fn compare_values(
    a: &SortValue<'_>,
    b: &SortValue<'_>,
    direction: SortDirection,
    collation: Collation,
) -> Ordering {
    match (a, b) {
        (SortValue::Number(x), SortValue::Number(y)) => direction.apply(x.total_cmp(y)),
        (SortValue::Text(x), SortValue::Text(y)) => match (x, y) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(x), Some(y)) => direction.apply(collation.compare_keys(x, y)),
        },
        // A key has exactly one kind, so mixed pairs cannot occur.
        _ => Ordering::Equal,
    }
}

/// Compare two properties under `spec`
#[must_use]
pub fn compare(a: &Property, b: &Property, spec: SortSpec, collation: Collation) -> Ordering {
    compare_values(
        &extract(a, spec.field, collation),
        &extract(b, spec.field, collation),
        spec.direction,
        collation,
    )
}

/// Return a stably sorted copy of `items`
#[must_use]
pub fn sort<T>(items: &[T], spec: SortSpec, collation: Collation) -> Vec<T>
where
    T: AsRef<Property> + Clone,
{
    let mut keyed: Vec<(SortValue<'_>, usize)> = items
        .iter()
        .enumerate()
        .map(|(i, item)| (extract(item.as_ref(), spec.field, collation), i))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| compare_values(a, b, spec.direction, collation));

    tracing::trace!(field = %spec.field, direction = ?spec.direction, len = items.len(), "sorted bucket");
    keyed.into_iter().map(|(_, i)| items[i].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use portfolio_model::{PropertyStatus, PropertyType};

    fn named(id: &str, name: &str) -> Property {
        Property::new(id, name, PropertyType::Apartment, PropertyStatus::Available)
    }

    fn ids(list: &[Property]) -> Vec<&str> {
        list.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn missing_price_counts_as_zero() {
        let list = vec![
            named("a", "a").with_purchase_price(100_000.0),
            named("b", "b"),
            named("c", "c").with_purchase_price(300_000.0),
        ];
        let desc = sort(&list, SortSpec::descending(SortKey::PurchasePrice), Collation::default());
        assert_eq!(ids(&desc), vec!["c", "a", "b"]);
        let asc = sort(&list, SortSpec::ascending(SortKey::PurchasePrice), Collation::default());
        assert_eq!(ids(&asc), vec!["b", "a", "c"]);
    }

    #[test]
    fn missing_text_sorts_last_in_both_directions() {
        let list = vec![
            named("a", "a"),
            named("b", "b").with_address("Beech Road"),
            named("c", "c").with_address("Ash Lane"),
        ];
        let asc = sort(&list, SortSpec::ascending(SortKey::Address), Collation::default());
        assert_eq!(ids(&asc), vec!["c", "b", "a"]);
        let desc = sort(&list, SortSpec::descending(SortKey::Address), Collation::default());
        assert_eq!(ids(&desc), vec!["b", "c", "a"]);
    }

    #[test]
    fn ties_keep_input_order_in_both_directions() {
        let list = vec![
            named("1", "Same"),
            named("2", "Other"),
            named("3", "Same"),
            named("4", "Same"),
        ];
        let asc = sort(&list, SortSpec::ascending(SortKey::Name), Collation::default());
        assert_eq!(ids(&asc), vec!["2", "1", "3", "4"]);
        let desc = sort(&list, SortSpec::descending(SortKey::Name), Collation::default());
        assert_eq!(ids(&desc), vec!["1", "3", "4", "2"]);
    }

    #[test]
    fn case_insensitive_collation() {
        let list = vec![named("1", "beta"), named("2", "Alpha"), named("3", "alpha")];
        let sorted = sort(&list, SortSpec::ascending(SortKey::Name), Collation::CaseInsensitive);
        assert_eq!(ids(&sorted), vec!["3", "2", "1"]);

        let sorted = sort(&list, SortSpec::ascending(SortKey::Name), Collation::CaseSensitive);
        assert_eq!(ids(&sorted), vec!["2", "3", "1"]);
    }

    #[test]
    fn accented_initials_sort_with_their_base_letter() {
        let list = vec![
            named("z", "Zebra Court"),
            named("e", "Élysée Résidence"),
            named("f", "Fairview"),
        ];
        for collation in [Collation::CaseInsensitive, Collation::CaseSensitive] {
            let sorted = sort(&list, SortSpec::ascending(SortKey::Name), collation);
            assert_eq!(ids(&sorted), vec!["e", "f", "z"]);
        }
    }

    #[test]
    fn accents_break_ties_after_base_letters() {
        let list = vec![named("1", "résumé"), named("2", "Resume"), named("3", "resume")];
        let sorted = sort(&list, SortSpec::ascending(SortKey::Name), Collation::CaseInsensitive);
        assert_eq!(ids(&sorted), vec!["3", "2", "1"]);

        let collation = Collation::default();
        assert_eq!(collation.compare("École", "ecole"), Ordering::Greater);
        assert_eq!(collation.compare("École", "Ecoles"), Ordering::Less);
    }

    #[test]
    fn dates_parse_in_several_shapes() {
        assert_eq!(parse_timestamp_millis("1970-01-02"), Some(86_400_000));
        assert_eq!(parse_timestamp_millis("1970-01-01T00:00:01Z"), Some(1000));
        assert_eq!(parse_timestamp_millis("1970-01-01T00:00:02"), Some(2000));
        assert_eq!(parse_timestamp_millis("last spring"), None);
    }

    #[test]
    fn unparsable_date_sorts_as_epoch() {
        let list = vec![
            named("a", "a").with_purchase_date("2021-06-01"),
            named("b", "b").with_purchase_date("not a date"),
            named("c", "c").with_purchase_date("2019-03-15"),
        ];
        let asc = sort(&list, SortSpec::ascending(SortKey::PurchaseDate), Collation::default());
        assert_eq!(ids(&asc), vec!["b", "c", "a"]);
    }

    #[test]
    fn derived_metric_sort() {
        let list = vec![
            named("low", "low").with_purchase_price(400_000.0).with_monthly_rent(1000.0),
            named("none", "none"),
            named("high", "high").with_purchase_price(100_000.0).with_monthly_rent(1000.0),
        ];
        let desc = sort(&list, SortSpec::descending(SortKey::GrossYield), Collation::default());
        assert_eq!(ids(&desc), vec!["high", "low", "none"]);
    }

    #[test]
    fn compare_matches_sort() {
        let a = named("a", "a").with_bedrooms(3);
        let b = named("b", "b").with_bedrooms(1);
        let spec = SortSpec::ascending(SortKey::Bedrooms);
        assert_eq!(compare(&a, &b, spec, Collation::default()), Ordering::Greater);
        assert_eq!(compare(&a, &b, spec.toggled(), Collation::default()), Ordering::Less);
    }
}
