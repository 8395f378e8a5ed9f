//! Pagination math and the page type.

use std::num::NonZeroUsize;

use crate::model::Record;

/// Page math for a filtered list.
///
/// Pages are 1-indexed. The current page is never clamped here: a page past
/// the end simply has an empty range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Number of items per page.
    pub per_page: NonZeroUsize,
    /// Current page number (1-indexed).
    pub current_page: usize,
    /// Number of items after filtering.
    pub total_items: usize,
}

impl Pagination {
    /// Creates pagination state.
    pub fn new(per_page: NonZeroUsize, current_page: usize, total_items: usize) -> Self {
        Self {
            per_page,
            current_page,
            total_items,
        }
    }

    /// Returns the total number of pages; zero when there are no items.
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.per_page.get())
    }

    /// Returns the start index for the current page (0-indexed).
    pub fn start_index(&self) -> usize {
        self.current_page
            .saturating_sub(1)
            .saturating_mul(self.per_page.get())
    }

    /// Returns the end index for the current page (exclusive, 0-indexed).
    pub fn end_index(&self) -> usize {
        self.start_index()
            .saturating_add(self.per_page.get())
            .min(self.total_items)
    }

    /// Returns the index range of the current page.
    ///
    /// Empty past the end and for page 0, which precedes the first page.
    pub fn range(&self) -> std::ops::Range<usize> {
        if self.current_page == 0 {
            return 0..0;
        }
        let start = self.start_index().min(self.total_items);
        start..self.end_index().max(start)
    }

    /// Returns the 1-based inclusive `(from, to)` shown in the summary line.
    pub fn summary(&self) -> (usize, usize) {
        if self.current_page == 0 {
            return (0, 0);
        }
        let from = self.start_index() + 1;
        let to = self
            .current_page
            .saturating_mul(self.per_page.get())
            .min(self.total_items);
        (from, to)
    }

    /// Returns `true` if a previous page exists.
    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    /// Returns `true` if a next page exists.
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }
}

/// One page of a filtered, sorted list.
#[derive(Debug, Clone)]
pub struct Page<'a> {
    rows: Vec<&'a Record>,
    pagination: Pagination,
}

impl<'a> Page<'a> {
    /// Creates a page from its rows and the math that produced it.
    pub fn new(rows: Vec<&'a Record>, pagination: Pagination) -> Self {
        Self { rows, pagination }
    }

    /// Returns the rows of this page.
    pub fn rows(&self) -> &[&'a Record] {
        &self.rows
    }

    /// Consumes the page and returns the rows.
    pub fn into_rows(self) -> Vec<&'a Record> {
        self.rows
    }

    /// Returns the pagination math for this page.
    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// Returns `true` if this page has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of rows in this page.
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn per(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(Pagination::new(per(10), 1, 0).total_pages(), 0);
        assert_eq!(Pagination::new(per(10), 1, 10).total_pages(), 1);
        assert_eq!(Pagination::new(per(10), 1, 12).total_pages(), 2);
    }

    #[test]
    fn test_range() {
        assert_eq!(Pagination::new(per(10), 1, 12).range(), 0..10);
        assert_eq!(Pagination::new(per(10), 2, 12).range(), 10..12);
        assert!(Pagination::new(per(10), 3, 12).range().is_empty());
    }

    #[test]
    fn test_page_zero_is_empty() {
        let zero = Pagination::new(per(10), 0, 12);
        assert!(zero.range().is_empty());
        assert_eq!(zero.summary(), (0, 0));
        assert!(!zero.has_prev());
        assert!(zero.has_next());
    }

    #[test]
    fn test_summary() {
        assert_eq!(Pagination::new(per(10), 2, 25).summary(), (11, 20));
        assert_eq!(Pagination::new(per(10), 3, 25).summary(), (21, 25));
    }

    #[test]
    fn test_prev_next() {
        let first = Pagination::new(per(5), 1, 12);
        assert!(!first.has_prev());
        assert!(first.has_next());

        let last = Pagination::new(per(5), 3, 12);
        assert!(last.has_prev());
        assert!(!last.has_next());
    }
}
