//! Fixed-size paging over filtered rows.

pub const DEFAULT_PAGE_SIZE: usize = 100;

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: usize,
    pub size: usize,
}

impl Page {
    pub fn new(number: usize, size: usize) -> Self {
        Self { number, size }
    }

    /// Number of pages needed for `total` items. An empty set still has one
    /// (empty) page.
    pub fn page_count(total: usize, size: usize) -> usize {
        if size == 0 {
            return 1;
        }
        total.div_ceil(size).max(1)
    }
}

/// Returns the slice of `items` covered by `page`. Page 0, a zero size and
/// pages past the end all yield an empty slice.
pub fn paginate<T>(items: &[T], page: Page) -> &[T] {
    if page.number == 0 || page.size == 0 {
        return &[];
    }
    let start = (page.number - 1).saturating_mul(page.size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page.size).min(items.len());
    &items[start..end]
}
