//! Pagination manager
//!
//! Each lifecycle bucket pages independently. Changing one bucket's page or
//! page size never touches another bucket's state.

use portfolio_model::Bucket;
use serde::{Deserialize, Serialize};

/// Number of pages needed for `count` items; never less than one
#[inline]
#[must_use]
pub fn total_pages(count: usize, items_per_page: usize) -> usize {
    count.div_ceil(items_per_page.max(1)).max(1)
}

/// Paging state of one bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageState {
    /// 1-based page number
    pub current_page: usize,
    /// Page size, at least one
    pub items_per_page: usize,
}

impl PageState {
    /// First page with the given size
    #[inline]
    #[must_use]
    pub fn new(items_per_page: usize) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
        }
    }

    /// Half-open index range of the current page within `len` items
    #[must_use]
    pub fn bounds(&self, len: usize) -> (usize, usize) {
        let start = self
            .current_page
            .saturating_sub(1)
            .saturating_mul(self.items_per_page)
            .min(len);
        let end = start.saturating_add(self.items_per_page).min(len);
        (start, end)
    }

    /// Move to `page`, clamped to `[1, total_pages(count)]`
    #[must_use]
    pub fn with_page(self, page: usize, count: usize) -> Self {
        let last = total_pages(count, self.items_per_page);
        Self {
            current_page: page.clamp(1, last),
            ..self
        }
    }

    /// Change the page size and go back to page one
    #[must_use]
    pub fn with_items_per_page(self, items_per_page: usize) -> Self {
        Self::new(items_per_page)
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(9)
    }
}

/// Slice of `items` shown on the current page
#[must_use]
pub fn page<T>(items: &[T], state: PageState) -> &[T] {
    let (start, end) = state.bounds(items.len());
    &items[start..end]
}

/// Independent paging state for each bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketPagination {
    states: [PageState; 4],
}

impl BucketPagination {
    /// All buckets on page one with the same page size
    #[inline]
    #[must_use]
    pub fn new(items_per_page: usize) -> Self {
        Self {
            states: [PageState::new(items_per_page); 4],
        }
    }

    /// State of `bucket`
    #[inline]
    #[must_use]
    pub fn get(&self, bucket: Bucket) -> PageState {
        self.states[bucket.index()]
    }

    /// Move `bucket` to `page`, clamped against its current item count
    #[must_use]
    pub fn change_page(mut self, bucket: Bucket, page: usize, count: usize) -> Self {
        let slot = &mut self.states[bucket.index()];
        *slot = slot.with_page(page, count);
        self
    }

    /// Set `bucket`'s page size and reset it to page one
    #[must_use]
    pub fn change_items_per_page(mut self, bucket: Bucket, items_per_page: usize) -> Self {
        let slot = &mut self.states[bucket.index()];
        *slot = slot.with_items_per_page(items_per_page);
        self
    }

    /// Send every bucket back to page one, keeping page sizes
    #[must_use]
    pub fn reset_pages(mut self) -> Self {
        for state in &mut self.states {
            state.current_page = 1;
        }
        self
    }

    /// Re-clamp every bucket against fresh item counts
    #[must_use]
    pub fn clamp_to(mut self, counts: [(Bucket, usize); 4]) -> Self {
        for (bucket, count) in counts {
            let slot = &mut self.states[bucket.index()];
            *slot = slot.with_page(slot.current_page, count);
        }
        self
    }
}

impl Default for BucketPagination {
    fn default() -> Self {
        Self::new(PageState::default().items_per_page)
    }
}
