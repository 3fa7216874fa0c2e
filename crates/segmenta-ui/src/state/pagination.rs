//! Page bookkeeping for the segment grid

use serde::Serialize;

/// Zero-based current page over a segment count reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    current_page: u64,
    rows_per_page: u64,
    segment_count: u64,
}

impl Pagination {
    pub fn new(rows_per_page: u64) -> Self {
        Self {
            current_page: 0,
            rows_per_page: rows_per_page.max(1),
            segment_count: 0,
        }
    }

    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    pub fn rows_per_page(&self) -> u64 {
        self.rows_per_page
    }

    pub fn segment_count(&self) -> u64 {
        self.segment_count
    }

    /// Number of pages; an empty project still has one
    pub fn max_page(&self) -> u64 {
        self.segment_count.div_ceil(self.rows_per_page).max(1)
    }

    /// Offset of the first row on the current page
    pub fn start(&self) -> u64 {
        self.current_page * self.rows_per_page
    }

    /// Page holding the 1-based segment `index`
    pub fn page_of(&self, index: u64) -> u64 {
        index.saturating_sub(1) / self.rows_per_page
    }

    pub fn has_next(&self) -> bool {
        self.current_page + 1 < self.max_page()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 0
    }

    /// Each move returns false when it would leave the page unchanged
    pub fn first(&mut self) -> bool {
        self.go_to(0)
    }

    pub fn previous(&mut self) -> bool {
        self.has_previous() && self.go_to(self.current_page - 1)
    }

    pub fn next(&mut self) -> bool {
        self.has_next() && self.go_to(self.current_page + 1)
    }

    pub fn last(&mut self) -> bool {
        self.go_to(self.max_page() - 1)
    }

    pub fn go_to(&mut self, page: u64) -> bool {
        let page = page.min(self.max_page() - 1);
        if page == self.current_page {
            return false;
        }
        self.current_page = page;
        true
    }

    /// Change the page size and go back to the first page
    pub fn set_rows_per_page(&mut self, rows: u64) {
        self.rows_per_page = rows.max(1);
        self.current_page = 0;
    }

    /// Record a new count. Returns true if the current page had to move
    /// back because it no longer exists.
    pub fn set_segment_count(&mut self, count: u64) -> bool {
        self.segment_count = count;
        let last = self.max_page() - 1;
        if self.current_page > last {
            self.current_page = last;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pagination(count: u64, rows: u64) -> Pagination {
        let mut pagination = Pagination::new(rows);
        pagination.set_segment_count(count);
        pagination
    }

    #[test]
    fn test_max_page_rounds_up_and_never_zero() {
        assert_eq!(pagination(250, 100).max_page(), 3);
        assert_eq!(pagination(200, 100).max_page(), 2);
        assert_eq!(pagination(0, 100).max_page(), 1);
    }

    #[test]
    fn test_moves_stop_at_boundaries() {
        let mut pagination = pagination(250, 100);
        assert!(!pagination.previous());
        assert!(!pagination.first());
        assert!(pagination.last());
        assert_eq!(pagination.current_page(), 2);
        assert!(!pagination.next());
        assert!(pagination.previous());
        assert_eq!(pagination.start(), 100);
    }

    #[test]
    fn test_page_of_segment_index() {
        let pagination = pagination(250, 100);
        assert_eq!(pagination.page_of(1), 0);
        assert_eq!(pagination.page_of(100), 0);
        assert_eq!(pagination.page_of(101), 1);
    }

    #[test]
    fn test_shrinking_count_clamps_page() {
        let mut pagination = pagination(250, 100);
        pagination.last();
        assert!(pagination.set_segment_count(50));
        assert_eq!(pagination.current_page(), 0);
    }

    #[test]
    fn test_rows_per_page_resets_to_first_page() {
        let mut pagination = pagination(250, 100);
        pagination.next();
        pagination.set_rows_per_page(50);
        assert_eq!(pagination.current_page(), 0);
        assert_eq!(pagination.max_page(), 5);
    }
}
