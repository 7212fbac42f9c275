//! Pagination controller.
//!
//! Tracks the current page and total page count and derives whether the
//! previous/next controls are enabled.

/// Current page index (zero-based) and total page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    total_pages: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            total_pages: 1,
        }
    }
}

impl Pagination {
    /// Current page index.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Set the current page index, clamped to the last page.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.min(self.total_pages - 1);
    }

    /// Set the total page count reported by the server.
    ///
    /// # Details
    /// An empty result set reports zero pages; it is shown as a single empty
    /// page so the current index stays valid. The current index is clamped
    /// into the new range.
    pub fn set_total_pages(&mut self, total: usize) {
        self.total_pages = total.max(1);
        self.page = self.page.min(self.total_pages - 1);
    }

    /// Go back to the first page.
    pub fn reset(&mut self) {
        self.set_page(0);
    }

    /// Whether the "previous" control is disabled.
    pub fn prev_disabled(&self) -> bool {
        self.page == 0
    }

    /// Whether the "next" control is disabled.
    pub fn next_disabled(&self) -> bool {
        self.page + 1 >= self.total_pages
    }

    /// Move to the next page.
    ///
    /// # Returns
    /// * `bool` - False when already on the last page
    pub fn next(&mut self) -> bool {
        if self.next_disabled() {
            return false;
        }
        self.set_page(self.page + 1);
        true
    }

    /// Move to the previous page.
    ///
    /// # Returns
    /// * `bool` - False when already on the first page
    pub fn prev(&mut self) -> bool {
        if self.prev_disabled() {
            return false;
        }
        self.set_page(self.page - 1);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controls_for_every_page() {
        let mut pagination = Pagination::default();
        pagination.set_total_pages(4);
        for p in 0..4 {
            pagination.set_page(p);
            assert_eq!(pagination.prev_disabled(), p == 0, "prev at page {}", p);
            assert_eq!(pagination.next_disabled(), p + 1 >= 4, "next at page {}", p);
        }
    }

    #[test]
    fn test_set_page_clamps_to_last_page() {
        let mut pagination = Pagination::default();
        pagination.set_total_pages(3);
        pagination.set_page(10);
        assert_eq!(pagination.page(), 2);
    }

    #[test]
    fn test_single_page_disables_both() {
        let mut pagination = Pagination::default();
        pagination.set_total_pages(1);
        assert!(pagination.prev_disabled());
        assert!(pagination.next_disabled());
    }

    #[test]
    fn test_empty_result_clamps_to_one_page() {
        let mut pagination = Pagination::default();
        pagination.set_total_pages(5);
        pagination.set_page(3);
        pagination.set_total_pages(0);
        assert_eq!(pagination.total_pages(), 1);
        assert_eq!(pagination.page(), 0);
    }

    #[test]
    fn test_navigation_stops_at_boundaries() {
        let mut pagination = Pagination::default();
        pagination.set_total_pages(2);
        assert!(!pagination.prev());
        assert!(pagination.next());
        assert_eq!(pagination.page(), 1);
        assert!(!pagination.next());
        assert!(pagination.prev());
        assert_eq!(pagination.page(), 0);
    }
}
