//! Local pagination of the row set.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Current page of a locally paginated table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// 1-based page number
    pub current: usize,
    /// Rows per page; 0 shows everything on one page
    pub page_size: usize,
}

impl Pagination {
    pub fn new(current: usize, page_size: usize) -> Self {
        Self { current, page_size }
    }

    /// Number of pages for `total` rows (at least 1)
    pub fn page_count(&self, total: usize) -> usize {
        if self.page_size == 0 {
            return 1;
        }
        total.div_ceil(self.page_size).max(1)
    }

    /// Current page clamped to `[1, page_count]`
    pub fn clamped_current(&self, total: usize) -> usize {
        self.current.clamp(1, self.page_count(total))
    }

    /// Row indices shown on the current page
    pub fn range(&self, total: usize) -> Range<usize> {
        if self.page_size == 0 {
            return 0..total;
        }
        let start = (self.clamped_current(total) - 1).saturating_mul(self.page_size);
        let start = start.min(total);
        let end = start.saturating_add(self.page_size).min(total);
        start..end
    }
}
