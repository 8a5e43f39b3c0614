//! Page stage: fixed-size page windows.

use std::ops::Range;

/// Number of pages needed for `count` rows; zero rows means zero pages.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Clamps a requested page into `[1, total_pages]`.
///
/// With zero pages the result is 1: the page number is inert until rows
/// arrive.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Index window of `page` (1-based) over `count` rows.
///
/// The half-open window `[(page-1)*size, (page-1)*size + size)` is cut to
/// `count`; a window starting past the end is empty.
pub fn page_range(page: usize, page_size: usize, count: usize) -> Range<usize> {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(count);
    let end = start.saturating_add(page_size).min(count);
    start..end
}
