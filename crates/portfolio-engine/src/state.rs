//! Browser state and reducer
//!
//! The browsing session is a single value object transformed only by
//! [`BrowserState::reduce`]. Each [`Action`] is one discrete, atomic step.

use crate::pagination::BucketPagination;
use portfolio_model::{Bucket, FilterCriteria, SortSpec};
use serde::{Deserialize, Serialize};

/// One state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the criteria wholesale
    SetCriteria(FilterCriteria),
    /// Back to criteria that match everything
    ResetCriteria,
    /// Replace the sort
    SetSort(SortSpec),
    /// Flip the sort direction, keeping the field
    ToggleSortDirection,
    /// Move one bucket to a page, clamped against its current length
    ChangePage {
        /// Bucket to move
        bucket: Bucket,
        /// Requested 1-based page
        page: usize,
        /// Current number of items in the bucket
        bucket_len: usize,
    },
    /// Change one bucket's page size; resets that bucket to page one
    ChangeItemsPerPage {
        /// Bucket to resize
        bucket: Bucket,
        /// New page size
        items_per_page: usize,
    },
}

/// Filter, sort and pagination state of a browsing session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrowserState {
    /// Active filter criteria
    pub criteria: FilterCriteria,
    /// Active sort
    pub sort: SortSpec,
    /// Per-bucket paging
    pub pagination: BucketPagination,
}

impl BrowserState {
    /// Initial state with the given page size
    #[inline]
    #[must_use]
    pub fn new(items_per_page: usize) -> Self {
        Self {
            criteria: FilterCriteria::default(),
            sort: SortSpec::default(),
            pagination: BucketPagination::new(items_per_page),
        }
    }

    /// With a starting sort
    #[inline]
    #[must_use]
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    /// Apply one action, returning the next state
    ///
    /// Criteria and sort changes send every bucket back to page one, since
    /// the page the user was on may no longer exist or show the same items.
    #[must_use]
    pub fn reduce(self, action: Action) -> Self {
        tracing::debug!(?action, "reducing browser state");
        match action {
            Action::SetCriteria(criteria) => Self {
                criteria,
                pagination: self.pagination.reset_pages(),
                ..self
            },
            Action::ResetCriteria => Self {
                criteria: FilterCriteria::default(),
                pagination: self.pagination.reset_pages(),
                ..self
            },
            Action::SetSort(sort) => Self {
                sort,
                pagination: self.pagination.reset_pages(),
                ..self
            },
            Action::ToggleSortDirection => Self {
                sort: self.sort.toggled(),
                pagination: self.pagination.reset_pages(),
                ..self
            },
            Action::ChangePage {
                bucket,
                page,
                bucket_len,
            } => Self {
                pagination: self.pagination.change_page(bucket, page, bucket_len),
                ..self
            },
            Action::ChangeItemsPerPage {
                bucket,
                items_per_page,
            } => Self {
                pagination: self.pagination.change_items_per_page(bucket, items_per_page),
                ..self
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portfolio_model::{SortDirection, SortKey};

    #[test]
    fn set_criteria_resets_pages() {
        let state = BrowserState::new(9)
            .reduce(Action::ChangePage {
                bucket: Bucket::Rented,
                page: 2,
                bucket_len: 20,
            })
            .reduce(Action::SetCriteria(FilterCriteria::new().with_search("x")));

        assert_eq!(state.criteria.search, "x");
        assert_eq!(state.pagination.get(Bucket::Rented).current_page, 1);
    }

    #[test]
    fn toggle_direction_keeps_field() {
        let state = BrowserState::new(9)
            .reduce(Action::SetSort(SortSpec::ascending(SortKey::NetYield)))
            .reduce(Action::ToggleSortDirection);
        assert_eq!(state.sort.field, SortKey::NetYield);
        assert_eq!(state.sort.direction, SortDirection::Desc);
    }

    #[test]
    fn page_size_change_is_local() {
        let state = BrowserState::new(9)
            .reduce(Action::ChangePage {
                bucket: Bucket::Sold,
                page: 2,
                bucket_len: 12,
            })
            .reduce(Action::ChangeItemsPerPage {
                bucket: Bucket::Available,
                items_per_page: 3,
            });
        assert_eq!(state.pagination.get(Bucket::Available).items_per_page, 3);
        assert_eq!(state.pagination.get(Bucket::Sold).current_page, 2);
    }

    #[test]
    fn reduce_does_not_touch_unrelated_fields() {
        let start = BrowserState::new(9).with_sort(SortSpec::descending(SortKey::PurchaseDate));
        let next = start.clone().reduce(Action::ChangePage {
            bucket: Bucket::Available,
            page: 1,
            bucket_len: 0,
        });
        assert_eq!(next, start);
    }
}
