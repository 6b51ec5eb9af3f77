//! Client-side pagination over the fetched news list.
//!
//! Pages are 1-based. Out-of-range page requests are clamped by
//! [`compute_page`] and ignored by [`Paginator`] navigation.

use std::ops::{Range, RangeInclusive};

/// Derived view of one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    /// Effective page, always within `1..=total_pages`
    pub current_page: usize,
    /// Items per page (at least 1)
    pub page_size: usize,
    /// Length of the whole list
    pub total_items: usize,
    /// Number of pages; an empty list still counts as one empty page
    pub total_pages: usize,
    /// Inclusive start index of the page slice
    pub start: usize,
    /// Exclusive end index of the page slice
    pub end: usize,
}

/// Compute the page view for `total_items` items.
///
/// A `page_size` of 0 is treated as 1.
///
/// ```
/// use news_portal_client::pagination::page_for;
///
/// let page = page_for(20, 9, 3);
/// assert_eq!(page.range(), 18..20);
/// assert!(page.can_go_previous());
/// assert!(!page.can_go_next());
/// ```
pub fn page_for(total_items: usize, page_size: usize, requested_page: i64) -> PageState {
    let page_size = page_size.max(1);
    let total_pages = total_items.div_ceil(page_size).max(1);

    let current_page = if requested_page < 1 {
        1
    } else {
        usize::try_from(requested_page)
            .unwrap_or(usize::MAX)
            .min(total_pages)
    };

    let start = (current_page - 1) * page_size;
    let end = start.saturating_add(page_size).min(total_items);

    PageState {
        current_page,
        page_size,
        total_items,
        total_pages,
        start,
        end,
    }
}

/// Compute the page view of `items`.
pub fn compute_page<T>(items: &[T], page_size: usize, requested_page: i64) -> PageState {
    page_for(items.len(), page_size, requested_page)
}

impl PageState {
    /// Slice bounds of the current page
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The items of the current page.
    ///
    /// `items` must be the list this state was computed from; a shorter list
    /// yields a truncated (possibly empty) slice rather than a panic.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let end = self.end.min(items.len());
        let start = self.start.min(end);
        &items[start..end]
    }

    /// Number of items on the current page
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the current page holds no items
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Whether previous/next/jump controls are worth showing
    pub fn shows_controls(&self) -> bool {
        self.total_pages > 1
    }

    /// Page numbers for jump buttons
    pub fn page_numbers(&self) -> RangeInclusive<usize> {
        1..=self.total_pages
    }
}

/// Holds the requested page across list reloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    page: usize,
    page_size: usize,
    total_items: usize,
}

impl Paginator {
    /// Start on page 1 of an empty list
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            total_items: 0,
        }
    }

    /// The derived view of the current page
    pub fn state(&self) -> PageState {
        page_for(self.total_items, self.page_size, self.page as i64)
    }

    /// The current 1-based page
    pub fn page(&self) -> usize {
        self.state().current_page
    }

    /// Record a new list length, clamping the current page into range
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.page = self.state().current_page;
    }

    /// Jump to `page`; returns false and does nothing when it is out of range
    pub fn go_to(&mut self, page: usize) -> bool {
        let total_pages = self.state().total_pages;
        if page < 1 || page > total_pages {
            return false;
        }
        self.page = page;
        true
    }

    /// Advance one page if possible
    pub fn next(&mut self) -> bool {
        let state = self.state();
        state.can_go_next() && self.go_to(state.current_page + 1)
    }

    /// Go back one page if possible
    pub fn previous(&mut self) -> bool {
        let state = self.state();
        state.can_go_previous() && self.go_to(state.current_page - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn single_full_page() {
        let list = items(9);
        let page = compute_page(&list, 9, 1);
        assert_eq!(page.slice(&list).len(), 9);
        assert_eq!(page.total_pages, 1);
        assert!(!page.can_go_previous());
        assert!(!page.can_go_next());
        assert!(!page.shows_controls());
    }

    #[test]
    fn partial_last_page() {
        let list = items(20);
        let page = compute_page(&list, 9, 3);
        assert_eq!(page.slice(&list), &[18, 19]);
        assert_eq!(page.total_pages, 3);
        assert!(page.can_go_previous());
        assert!(!page.can_go_next());
    }

    #[test]
    fn empty_list_is_one_empty_page() {
        let list: Vec<usize> = Vec::new();
        let page = compute_page(&list, 9, 4);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.is_empty());
        assert!(page.slice(&list).is_empty());
    }

    #[test]
    fn out_of_range_requests_clamp() {
        let list = items(20);
        let last = compute_page(&list, 9, 3);
        assert_eq!(compute_page(&list, 9, 0), compute_page(&list, 9, 1));
        assert_eq!(compute_page(&list, 9, -7), compute_page(&list, 9, 1));
        assert_eq!(compute_page(&list, 9, 3 + 5), last);
        assert_eq!(compute_page(&list, 9, i64::MAX), last);
    }

    #[test]
    fn zero_page_size_counts_as_one() {
        let page = page_for(3, 0, 2);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.range(), 1..2);
    }

    #[test]
    fn bounds_hold_for_all_small_inputs() {
        for total in 0..40 {
            for size in 1..12 {
                for requested in -2..(total as i64 / size as i64 + 4) {
                    let page = page_for(total, size, requested);
                    assert!(page.len() <= size);
                    assert!(page.current_page >= 1);
                    assert!(page.current_page <= page.total_pages);
                    assert!(page.end <= total);
                    assert_eq!(page.can_go_next(), page.current_page < page.total_pages);
                }
            }
        }
    }

    #[test]
    fn huge_totals_stay_in_bounds() {
        let size = usize::MAX / 2 + 1;
        let last = page_for(usize::MAX, size, 2);
        assert_eq!(last.total_pages, 2);
        assert_eq!(last.current_page, 2);
        assert_eq!(last.end, usize::MAX);
        assert!(last.len() <= size);
        assert!(!last.can_go_next());

        assert_eq!(page_for(usize::MAX, size, i64::MAX), last);
        assert_eq!(page_for(usize::MAX, usize::MAX, 1).range(), 0..usize::MAX);
        assert_eq!(page_for(usize::MAX, 1, i64::MAX).len(), 1);
    }

    #[test]
    fn page_numbers_cover_every_page() {
        let page = page_for(20, 9, 2);
        assert_eq!(page.page_numbers().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn paginator_navigation_ignores_out_of_range() {
        let mut paginator = Paginator::new(9);
        paginator.set_total_items(20);

        assert!(!paginator.previous());
        assert_eq!(paginator.page(), 1);

        assert!(paginator.next());
        assert!(paginator.next());
        assert!(!paginator.next());
        assert_eq!(paginator.page(), 3);

        assert!(!paginator.go_to(0));
        assert!(!paginator.go_to(4));
        assert_eq!(paginator.page(), 3);

        assert!(paginator.go_to(1));
        assert_eq!(paginator.state().range(), 0..9);
    }

    #[test]
    fn paginator_reclamps_when_list_shrinks() {
        let mut paginator = Paginator::new(9);
        paginator.set_total_items(30);
        assert!(paginator.go_to(4));

        paginator.set_total_items(10);
        assert_eq!(paginator.page(), 2);

        paginator.set_total_items(0);
        assert_eq!(paginator.page(), 1);
        assert!(paginator.state().is_empty());
    }
}
