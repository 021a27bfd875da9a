//! Pagination math for store listings.
//!
//! This module defines the [`Pagination`] descriptor attached to every list
//! response and the slicing helpers used by the worker when cutting a filtered
//! store sequence into pages.

/// Number of stores shown per page.
pub const PAGE_SIZE: usize = 10;

/// Pagination descriptor for a store listing.
///
/// Pages are 1-based. `total_pages` is the ceiling of `total_items` divided by
/// `page_size`, so an empty result set has zero pages.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Pagination {
    /// The page this listing represents (1-based).
    pub current_page: usize,
    /// Total number of pages in the filtered sequence.
    pub total_pages: usize,
    /// Total number of items in the filtered sequence.
    pub total_items: usize,
    /// Items per page.
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            total_items: 0,
            page_size: PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// Builds the descriptor for a given page over `total_items` items.
    #[must_use]
    pub const fn for_page(page: usize, total_items: usize) -> Self {
        Self {
            current_page: page,
            total_pages: total_items.div_ceil(PAGE_SIZE),
            total_items,
            page_size: PAGE_SIZE,
        }
    }

    /// Whether a previous page exists.
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    /// Whether a next page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// Returns the `[start, end)` index bounds of a page within a sequence.
///
/// Pages are 1-based. `end` is clamped to `total`, so partial final pages and
/// out-of-range pages yield valid (possibly empty) ranges.
#[must_use]
pub fn page_bounds(page: usize, total: usize) -> (usize, usize) {
    let start = page.saturating_sub(1).saturating_mul(PAGE_SIZE).min(total);
    let end = (start + PAGE_SIZE).min(total);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_bounds_slice_the_sequence_in_tens() {
        assert_eq!(page_bounds(1, 25), (0, 10));
        assert_eq!(page_bounds(2, 25), (10, 20));
        assert_eq!(page_bounds(3, 25), (20, 25));
    }

    #[test]
    fn page_bounds_past_the_end_are_empty() {
        assert_eq!(page_bounds(4, 25), (25, 25));
        assert_eq!(page_bounds(1, 0), (0, 0));
    }

    #[test]
    fn total_pages_is_the_ceiling_division() {
        assert_eq!(Pagination::for_page(1, 0).total_pages, 0);
        assert_eq!(Pagination::for_page(1, 1).total_pages, 1);
        assert_eq!(Pagination::for_page(1, 10).total_pages, 1);
        assert_eq!(Pagination::for_page(1, 11).total_pages, 2);
        assert_eq!(Pagination::for_page(1, 25).total_pages, 3);
    }

    #[test]
    fn prev_and_next_respect_boundaries() {
        let first = Pagination::for_page(1, 25);
        assert!(!first.has_prev());
        assert!(first.has_next());

        let last = Pagination::for_page(3, 25);
        assert!(last.has_prev());
        assert!(!last.has_next());

        let only = Pagination::for_page(1, 3);
        assert!(!only.has_prev());
        assert!(!only.has_next());
    }
}
