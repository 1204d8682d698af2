//! Page arithmetic over a filtered list.

use std::ops::Range;

/// Number of pages needed for `len` items; an empty list still has one page.
#[must_use]
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Index range of 1-based `page` within a list of `len` items.
///
/// Pages past the end yield an empty range at `len`.
#[must_use]
pub fn page_bounds(len: usize, page: usize, page_size: usize) -> Range<usize> {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}
