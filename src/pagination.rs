/// Default number of records per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Offset/limit bookkeeping for the log table.
///
/// Mutators report whether the offset moved; fetching is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    offset: usize,
    page_size: usize,
    total: usize,
}

impl Pagination {
    /// `page_size` is clamped to at least 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            offset: 0,
            page_size: page_size.max(1),
            total: 0,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn has_previous(&self) -> bool {
        self.offset > 0
    }

    pub fn has_next(&self) -> bool {
        self.offset + self.page_size < self.total
    }

    /// 1-based current page and page count (at least 1) for display.
    pub fn page_number(&self) -> (usize, usize) {
        let pages = self.total.div_ceil(self.page_size).max(1);
        (self.offset / self.page_size + 1, pages)
    }

    pub fn go_to_previous(&mut self) -> bool {
        let before = self.offset;
        self.offset = self.offset.saturating_sub(self.page_size);
        self.offset != before
    }

    pub fn go_to_next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.offset += self.page_size;
        true
    }

    pub fn reset(&mut self) -> bool {
        let before = self.offset;
        self.offset = 0;
        self.offset != before
    }

    /// Store the authoritative total and pull the offset back into
    /// `[0, total)`, onto the start of the last page.
    pub fn apply_total(&mut self, total: usize) -> bool {
        self.total = total;
        let before = self.offset;
        if total == 0 {
            self.offset = 0;
        } else if self.offset >= total {
            self.offset = (total - 1) / self.page_size * self.page_size;
        }
        self.offset != before
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
