//! Page slicing

use std::num::NonZeroUsize;

/// One page of a sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub total_pages: usize,
}

/// Number of pages needed for `len` items, never less than one
pub fn total_pages(len: usize, size: NonZeroUsize) -> usize {
    len.div_ceil(size.get()).max(1)
}

/// Slice out page `page` (1-based). Pages outside `[1, total_pages]` are empty.
pub fn paginate<T>(items: &[T], page: usize, size: NonZeroUsize) -> Page<'_, T> {
    let total_pages = total_pages(items.len(), size);
    let slice = match page.checked_sub(1) {
        Some(index) => {
            let start = index.saturating_mul(size.get()).min(items.len());
            let end = start.saturating_add(size.get()).min(items.len());
            &items[start..end]
        }
        None => &items[..0],
    };

    Page {
        items: slice,
        page,
        total_pages,
    }
}
