//! Fixed-size pagination over the current catalog view.
//!
//! The paginator slices, it never fails: a page past the end is an empty
//! slice paired with the correct total, and navigation is clamped so the
//! controls can simply not offer pages that do not exist.

/// One page of a view plus the page count for the whole view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub total_pages: usize,
}

/// Pagination state: fixed page size, 1-based current page.
///
/// The page size is fixed at construction; the surrounding code always uses
/// a single constant (6 in the reference front end).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    current: usize,
}

impl Paginator {
    /// Create a paginator. A zero page size is bumped to 1 rather than
    /// dividing by zero later.
    #[must_use]
    pub const fn new(page_size: usize) -> Self {
        let page_size = if page_size == 0 { 1 } else { page_size };
        Self {
            page_size,
            current: 1,
        }
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Current page, always at least 1.
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current
    }

    /// Total pages for a view of `len` items: `ceil(len / page_size)`.
    #[must_use]
    pub const fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size)
    }

    /// The sub-slice for a 1-based `page`. Out-of-range pages (including
    /// page 0) return an empty slice with the correct total.
    #[must_use]
    pub fn slice<'a, T>(&self, view: &'a [T], page: usize) -> Page<'a, T> {
        let total_pages = self.total_pages(view.len());
        let items = if page == 0 {
            &[]
        } else {
            let start = (page - 1).saturating_mul(self.page_size);
            let end = start.saturating_add(self.page_size).min(view.len());
            view.get(start..end).unwrap_or(&[])
        };
        Page { items, total_pages }
    }

    /// The sub-slice for the paginator's current page.
    #[must_use]
    pub fn current_slice<'a, T>(&self, view: &'a [T]) -> Page<'a, T> {
        self.slice(view, self.current)
    }

    /// Jump to `page`, clamped to `[1, total_pages]` for a view of `len`
    /// items (an empty view clamps to page 1).
    pub const fn go_to(&mut self, page: usize, len: usize) {
        let total = self.total_pages(len);
        let upper = if total == 0 { 1 } else { total };
        self.current = clamp(page, 1, upper);
    }

    /// Advance one page; no-op on the last page.
    pub const fn next(&mut self, len: usize) {
        self.go_to(self.current + 1, len);
    }

    /// Go back one page; no-op on the first page.
    pub const fn prev(&mut self) {
        if self.current > 1 {
            self.current -= 1;
        }
    }
}

const fn clamp(value: usize, lo: usize, hi: usize) -> usize {
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}
