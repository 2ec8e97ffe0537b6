//! Page bounds and navigation.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_PAGE_SIZE;

/// Current page and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    /// Zero-based page index.
    pub page_index: usize,
    /// Rows per page, always at least one.
    pub page_size: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Pagination over a row sequence of known length.
///
/// Every navigation method clamps instead of failing; the `bool` they return
/// reports whether the page index actually moved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationController {
    state: PaginationState,
    row_count: usize,
}

impl PaginationController {
    /// Create a controller. A zero page size falls back to the default and
    /// the page index is clamped to the available pages.
    pub fn new(page_index: usize, page_size: usize, row_count: usize) -> Self {
        let page_size = if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        let mut controller = Self {
            state: PaginationState {
                page_index,
                page_size,
            },
            row_count,
        };
        controller.clamp();
        controller
    }

    pub fn state(&self) -> PaginationState {
        self.state
    }

    pub fn page_index(&self) -> usize {
        self.state.page_index
    }

    pub fn page_size(&self) -> usize {
        self.state.page_size
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of pages, zero when there are no rows.
    pub fn page_count(&self) -> usize {
        self.row_count.div_ceil(self.state.page_size)
    }

    pub fn can_previous_page(&self) -> bool {
        self.state.page_index > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.state.page_index + 1 < self.page_count()
    }

    /// Selectable page indices.
    pub fn page_options(&self) -> Range<usize> {
        0..self.page_count()
    }

    /// Whether navigation controls are worth showing (more than one page).
    pub fn shows_controls(&self) -> bool {
        self.page_count() > 1
    }

    /// Index range of the current page within the sorted rows.
    pub fn page_range(&self) -> Range<usize> {
        let start = (self.state.page_index * self.state.page_size).min(self.row_count);
        let end = (start + self.state.page_size).min(self.row_count);
        start..end
    }

    fn max_page_index(&self) -> usize {
        self.page_count().saturating_sub(1)
    }

    /// Pull the page index back into range. Returns `true` if it moved.
    fn clamp(&mut self) -> bool {
        let max = self.max_page_index();
        if self.state.page_index > max {
            self.state.page_index = max;
            true
        } else {
            false
        }
    }

    /// Jump to a page, clamping out-of-range targets.
    pub fn go_to_page(&mut self, target: usize) -> bool {
        let target = target.min(self.max_page_index());
        if target == self.state.page_index {
            return false;
        }
        self.state.page_index = target;
        true
    }

    pub fn next_page(&mut self) -> bool {
        if !self.can_next_page() {
            return false;
        }
        self.go_to_page(self.state.page_index + 1)
    }

    pub fn previous_page(&mut self) -> bool {
        if !self.can_previous_page() {
            return false;
        }
        self.go_to_page(self.state.page_index - 1)
    }

    pub fn first_page(&mut self) -> bool {
        if !self.can_previous_page() {
            return false;
        }
        self.go_to_page(0)
    }

    pub fn last_page(&mut self) -> bool {
        if !self.can_next_page() {
            return false;
        }
        self.go_to_page(self.max_page_index())
    }

    /// Handle a typed, one-based "go to page" value.
    ///
    /// Blank input goes to the first page. Fractions are truncated and
    /// out-of-range numbers clamp to the first or last page. Text that is not
    /// a number is ignored.
    pub fn go_to_page_input(&mut self, input: &str) -> bool {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return self.go_to_page(0);
        }
        match trimmed.parse::<f64>() {
            Ok(page) if !page.is_nan() => {
                // Float to int casts saturate, so huge input lands on the last page.
                let target = (page.trunc() - 1.0).max(0.0) as usize;
                self.go_to_page(target)
            }
            _ => {
                log::debug!("Ignoring page input {:?}", input);
                false
            }
        }
    }

    /// Change rows per page. Zero is rejected and leaves state unchanged.
    ///
    /// Returns `true` if the page size was applied.
    pub fn set_page_size(&mut self, size: usize) -> bool {
        if size == 0 {
            log::warn!("Rejected page size 0, keeping {}", self.state.page_size);
            return false;
        }
        self.state.page_size = size;
        self.clamp();
        true
    }

    /// Update the row count. Returns `true` if the page index had to move.
    pub fn set_row_count(&mut self, row_count: usize) -> bool {
        self.row_count = row_count;
        self.clamp()
    }
}
