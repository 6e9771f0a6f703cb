//! Status partitioner
//!
//! Splits a list into the four lifecycle buckets. Relative input order is
//! preserved inside each bucket.

use portfolio_model::{Bucket, Property};

/// One list per lifecycle bucket
#[derive(Debug, Clone, PartialEq)]
pub struct Buckets<T> {
    lists: [Vec<T>; 4],
}

impl<T> Buckets<T> {
    /// Four empty buckets
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self {
            lists: [Vec::new(), Vec::new(), Vec::new(), Vec::new()],
        }
    }

    /// Items in `bucket`
    #[inline]
    #[must_use]
    pub fn get(&self, bucket: Bucket) -> &[T] {
        &self.lists[bucket.index()]
    }

    /// Mutable items in `bucket`
    #[inline]
    pub fn get_mut(&mut self, bucket: Bucket) -> &mut Vec<T> {
        &mut self.lists[bucket.index()]
    }

    /// Item count per bucket, in [`Bucket::ALL`] order
    #[must_use]
    pub fn counts(&self) -> [(Bucket, usize); 4] {
        Bucket::ALL.map(|b| (b, self.get(b).len()))
    }

    /// Total item count
    #[must_use]
    pub fn total(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }

    /// Iterate over buckets in fixed order
    pub fn iter(&self) -> impl Iterator<Item = (Bucket, &[T])> {
        Bucket::ALL.into_iter().map(move |b| (b, self.get(b)))
    }

    /// Transform every bucket's list
    #[must_use]
    pub fn map_lists<U>(self, mut f: impl FnMut(Bucket, Vec<T>) -> Vec<U>) -> Buckets<U> {
        let [available, rented, maintenance, sold] = self.lists;
        Buckets {
            lists: [
                f(Bucket::Available, available),
                f(Bucket::Rented, rented),
                f(Bucket::Maintenance, maintenance),
                f(Bucket::Sold, sold),
            ],
        }
    }
}

impl<T> Default for Buckets<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Group items by status, keeping input order within each bucket
#[must_use]
pub fn partition<T, I>(items: I) -> Buckets<T>
where
    T: AsRef<Property>,
    I: IntoIterator<Item = T>,
{
    let mut buckets = Buckets::empty();
    for item in items {
        let bucket = item.as_ref().bucket();
        buckets.get_mut(bucket).push(item);
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use portfolio_model::{PropertyStatus, PropertyType};

    fn p(id: &str, status: PropertyStatus) -> Property {
        Property::new(id, id, PropertyType::House, status)
    }

    #[test]
    fn groups_and_keeps_order() {
        let list = vec![
            p("a", PropertyStatus::Rented),
            p("b", PropertyStatus::Available),
            p("c", PropertyStatus::Rented),
            p("d", PropertyStatus::Sold),
            p("e", PropertyStatus::Rented),
        ];
        let buckets = partition(&list);

        let rented: Vec<_> = buckets.get(Bucket::Rented).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(rented, vec!["a", "c", "e"]);
        assert_eq!(buckets.get(Bucket::Available).len(), 1);
        assert!(buckets.get(Bucket::Maintenance).is_empty());
        assert_eq!(buckets.total(), list.len());
    }

    #[test]
    fn counts_in_fixed_order() {
        let list = vec![p("a", PropertyStatus::Sold), p("b", PropertyStatus::Maintenance)];
        let counts = partition(list.iter()).counts();
        assert_eq!(
            counts,
            [
                (Bucket::Available, 0),
                (Bucket::Rented, 0),
                (Bucket::Maintenance, 1),
                (Bucket::Sold, 1)
            ]
        );
    }

    #[test]
    fn map_lists_visits_every_bucket() {
        let list = vec![p("a", PropertyStatus::Available), p("b", PropertyStatus::Sold)];
        let names = partition(&list).map_lists(|_, items| {
            items.into_iter().map(|p| p.name.clone()).collect::<Vec<_>>()
        });
        assert_eq!(names.get(Bucket::Sold), &["b".to_string()]);
    }
}
