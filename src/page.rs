//! Pagination over a result set.
//!
//! `paginate` only clamps the requested page into range. Resetting to page 1
//! when the page size changes is the caller's job (see `TableState`), so the
//! same request always yields the same page.

use crate::error::{GridError, Result};

/// Number of page buttons shown by navigation controls.
pub const PAGE_WINDOW: usize = 5;

/// One page of a result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub rows: Vec<T>,
    /// Always at least 1, even for an empty result set
    pub total_pages: usize,
    /// The requested page clamped to `1..=total_pages`
    pub page: usize,
}

/// Number of pages needed for `count` rows; never less than 1.
pub fn total_pages(count: usize, page_size: usize) -> Result<usize> {
    if page_size == 0 {
        return Err(GridError::InvalidPageSize {
            size: page_size,
            reason: "must be positive",
        });
    }
    Ok(count.div_ceil(page_size).max(1))
}

/// Clamps a 1-based page number into `1..=total_pages`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.max(1).min(total_pages.max(1))
}

/// Row range in the full result set covered by `page`.
fn page_bounds(count: usize, page_size: usize, page: usize) -> (usize, usize) {
    let start = ((page - 1) * page_size).min(count);
    let end = (page * page_size).min(count);
    (start, end)
}

/// Slices `rows` into the requested page.
///
/// # Examples
///
/// ```
/// use gridline::paginate;
///
/// let rows: Vec<u32> = (1..=23).collect();
/// let page = paginate(&rows, 10, 99).unwrap();
///
/// assert_eq!(page.total_pages, 3);
/// assert_eq!(page.page, 3);
/// assert_eq!(page.rows, vec![21, 22, 23]);
/// ```
pub fn paginate<T: Clone>(rows: &[T], page_size: usize, current_page: usize) -> Result<Page<T>> {
    let total_pages = total_pages(rows.len(), page_size)?;
    let page = clamp_page(current_page, total_pages);
    let (start, end) = page_bounds(rows.len(), page_size, page);

    Ok(Page {
        rows: rows[start..end].to_vec(),
        total_pages,
        page,
    })
}

/// Page numbers for navigation buttons: at most `PAGE_WINDOW` of them,
/// anchored to the start near the first page, to the end near the last page,
/// and centred on the current page otherwise.
pub fn page_window(total_pages: usize, current_page: usize) -> Vec<usize> {
    let total_pages = total_pages.max(1);
    let current = clamp_page(current_page, total_pages);
    let half = PAGE_WINDOW / 2;

    let first = if total_pages <= PAGE_WINDOW || current <= half + 1 {
        1
    } else if current + half >= total_pages {
        total_pages - PAGE_WINDOW + 1
    } else {
        current - half
    };
    let last = (first + PAGE_WINDOW - 1).min(total_pages);

    (first..=last).collect()
}
