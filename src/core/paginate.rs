//! Page-window computation for catalog listings.

use serde::Serialize;

use crate::domain::PageSize;

/// One page of a listing.
///
/// `current_page` and `total_pages` are 1-based, `start_index` and
/// `end_index` are 0-based and inclusive. `end_index` is `None` when the
/// page is empty (the "-1" end of an empty listing).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    pub total_pages: usize,
    pub start_index: usize,
    pub end_index: Option<usize>,
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// 1-based "showing X-Y of Z" bounds, `None` for an empty page
    pub fn display_range(&self) -> Option<(usize, usize)> {
        self.end_index.map(|end| (self.start_index + 1, end + 1))
    }
}

/// Number of pages needed for `len` items, never less than one
pub fn total_pages(len: usize, page_size: PageSize) -> usize {
    match page_size {
        PageSize::All => 1,
        PageSize::Count(n) => len.div_ceil(n.get()).max(1),
    }
}

/// Slice out page `current_page` of `items`.
///
/// Out-of-range page numbers (including 0) are clamped to the nearest
/// valid page rather than rejected.
pub fn paginate<T: Clone>(items: &[T], page_size: PageSize, current_page: usize) -> Page<T> {
    let len = items.len();
    let total_pages = total_pages(len, page_size);
    let current_page = current_page.clamp(1, total_pages);

    let (start_index, end_exclusive) = match page_size {
        PageSize::All => (0, len),
        PageSize::Count(n) => {
            let start = (current_page - 1) * n.get();
            (start, (start + n.get()).min(len))
        }
    };

    let displayed = if start_index < end_exclusive {
        items[start_index..end_exclusive].to_vec()
    } else {
        Vec::new()
    };

    Page {
        end_index: end_exclusive.checked_sub(1).filter(|_| !displayed.is_empty()),
        items: displayed,
        current_page,
        total_pages,
        start_index,
        total_items: len,
    }
}
