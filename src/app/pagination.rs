//! Page slicing over a derived view.

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page index and size of one view.
///
/// The paginator knows nothing about filtering; it slices whatever derived
/// list it is given. Callers reset it whenever an upstream filter changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_index: usize,
    page_size: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    /// A page size of zero is treated as one.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
        }
    }

    #[must_use]
    pub const fn page_index(&self) -> usize {
        self.page_index
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Changes the page size and returns to the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page_index = 0;
    }

    pub fn reset(&mut self) {
        self.page_index = 0;
    }

    /// Number of pages for `total` items; an empty list still has one page.
    #[must_use]
    pub const fn page_count(&self, total: usize) -> usize {
        if total == 0 {
            1
        } else {
            total.div_ceil(self.page_size)
        }
    }

    /// Moves to `page_index`, clamped to the last page for `total` items.
    pub fn go_to(&mut self, page_index: usize, total: usize) {
        self.page_index = page_index.min(self.page_count(total) - 1);
    }

    /// Returns `true` if the page changed.
    pub fn next(&mut self, total: usize) -> bool {
        let before = self.page_index;
        self.go_to(self.page_index + 1, total);
        before != self.page_index
    }

    /// Returns `true` if the page changed.
    pub fn previous(&mut self) -> bool {
        let before = self.page_index;
        self.page_index = self.page_index.saturating_sub(1);
        before != self.page_index
    }

    /// Resets to the first page if the current one no longer exists for
    /// `total` items. Returns `true` if it reset.
    pub fn revalidate(&mut self, total: usize) -> bool {
        if self.page_index >= self.page_count(total) {
            tracing::debug!(
                stale_page = self.page_index,
                total,
                "page index out of range after reload, resetting"
            );
            self.page_index = 0;
            true
        } else {
            false
        }
    }

    /// The contiguous slice `[index * size, index * size + size)` of `items`.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.page_index.saturating_mul(self.page_size).min(items.len());
        let end = start.saturating_add(self.page_size).min(items.len());
        &items[start..end]
    }
}
