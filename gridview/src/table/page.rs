//! Pagination state: 0-based page index and page size.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    page_index: usize,
    page_size: usize,
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size,
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Changing the page size always snaps back to the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size;
        self.page_index = 0;
    }

    pub fn set_page_index(&mut self, page_index: usize) {
        self.page_index = page_index;
    }

    /// Number of pages covering `total` rows. Zero page size is not
    /// validated; it degrades to zero pages rather than a fault.
    pub fn page_count(&self, total: usize) -> usize {
        if self.page_size == 0 {
            0
        } else {
            total.div_ceil(self.page_size)
        }
    }

    /// What the pagination bar shows: never less than one page.
    pub fn display_page_count(&self, total: usize) -> usize {
        self.page_count(total).max(1)
    }

    /// Move to the previous page; returns whether anything changed.
    pub fn prev(&mut self) -> bool {
        if self.page_index > 0 {
            self.page_index -= 1;
            true
        } else {
            false
        }
    }

    /// Move to the next page given `total` rows; returns whether
    /// anything changed.
    pub fn next(&mut self, total: usize) -> bool {
        if self.page_index + 1 < self.page_count(total) {
            self.page_index += 1;
            true
        } else {
            false
        }
    }

    /// Start-of-window row index for client-mode slicing.
    pub fn offset(&self) -> usize {
        self.page_index * self.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        let page = PageState::new(10);
        assert_eq!(page.page_count(0), 0);
        assert_eq!(page.page_count(10), 1);
        assert_eq!(page.page_count(11), 2);
        assert_eq!(page.display_page_count(0), 1);
    }

    #[test]
    fn size_change_resets_index() {
        let mut page = PageState::new(10);
        page.set_page_index(3);
        page.set_page_size(25);
        assert_eq!(page.page_index(), 0);
        assert_eq!(page.page_size(), 25);
    }

    #[test]
    fn next_is_bounded_by_page_count() {
        let mut page = PageState::new(10);
        assert!(page.next(25));
        assert!(page.next(25));
        assert!(!page.next(25));
        assert_eq!(page.page_index(), 2);
    }
}
