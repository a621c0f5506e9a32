//! Pagination arithmetic and page metadata

use serde::{Deserialize, Serialize};

/// Page size used when a screen does not configure one
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Current page of a collection screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    /// 1-based page index
    pub page_index: usize,

    /// Number of items per page
    pub page_size: usize,
}

impl PageState {
    pub fn new(page_index: usize, page_size: usize) -> Self {
        Self {
            page_index: page_index.max(1),
            page_size: page_size.max(1),
        }
    }

    /// First page with the given size
    pub fn first(page_size: usize) -> Self {
        Self::new(1, page_size)
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// Number of pages for `total` items, never less than 1
///
/// An empty result is page 1 of 1, not page 1 of 0.
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Pagination metadata handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1, already clamped)
    pub page_index: usize,

    /// Number of items per page
    pub page_size: usize,

    /// Total number of items (after filters)
    pub total_count: usize,

    /// Total number of pages (at least 1)
    pub page_count: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata, clamping the page index into range
    pub fn new(page_index: usize, page_size: usize, total_count: usize) -> Self {
        // Ensure page size is at least 1 to avoid division by zero
        let page_size = page_size.max(1);
        let page_count = page_count(total_count, page_size);
        let page_index = page_index.clamp(1, page_count);

        Self {
            page_index,
            page_size,
            total_count,
            page_count,
            has_next: page_index < page_count,
            has_prev: page_index > 1,
        }
    }

    /// Slice bounds `[start, end)` of the current page
    pub fn bounds(&self) -> (usize, usize) {
        let start = ((self.page_index - 1) * self.page_size).min(self.total_count);
        let end = (start + self.page_size).min(self.total_count);
        (start, end)
    }

    /// 1-based position of the first visible item, 0 when empty
    pub fn first_item(&self) -> usize {
        let (start, end) = self.bounds();
        if start == end { 0 } else { start + 1 }
    }

    /// 1-based position of the last visible item, 0 when empty
    pub fn last_item(&self) -> usize {
        let (start, end) = self.bounds();
        if start == end { 0 } else { end }
    }

    /// Page buttons to render: at most `window` pages around the current one
    pub fn page_numbers(&self, window: usize) -> Vec<usize> {
        let window = window.clamp(1, self.page_count);
        let half = window / 2;
        let start = self
            .page_index
            .saturating_sub(half)
            .clamp(1, self.page_count - window + 1);
        (start..start + window).collect()
    }
}

/// A visible page plus its metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<U> {
    /// The visible slice
    pub items: Vec<U>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

impl<U> Page<U> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Slice `items` into the page described by `page`
///
/// A stale `page_index` beyond the page count is clamped down before
/// slicing; the corrected index is reported in the returned metadata.
pub fn paginate<U: Clone>(items: &[U], page: PageState) -> Page<U> {
    let pagination = PaginationMeta::new(page.page_index, page.page_size, items.len());
    let (start, end) = pagination.bounds();

    Page {
        items: items[start..end].to_vec(),
        pagination,
    }
}
