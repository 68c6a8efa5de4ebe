/// GridView Page Window
///
/// A `PageWindow` is a slice descriptor over the working set: current page,
/// page size, total pages and the half-open index range the renderer should
/// show. All of the pagination math lives here so the engine only ever deals
/// in consistent windows.

use serde::Serialize;

/// Slice descriptor over the working set.
///
/// Invariants (upheld by `compute`):
/// - `1 <= current_page <= total_pages`
/// - `total_pages >= 1`, even for an empty working set
/// - `start_index = (current_page - 1) * page_size`
/// - `end_index = min(start_index + page_size, len)`, and exactly `len` on
///   the last page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub current_page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub start_index: usize,
    pub end_index: usize,
}

impl PageWindow {
    /// Compute a consistent window for `len` rows, clamping `current_page`
    /// into `[1, total_pages]`.
    pub fn compute(current_page: usize, page_size: usize, len: usize) -> PageWindow {
        let total_pages = total_pages(len, page_size);
        let current_page = current_page.clamp(1, total_pages);

        let start_index = (current_page - 1) * page_size;
        let end_index = if current_page == total_pages {
            len
        } else {
            (start_index + page_size).min(len)
        };

        PageWindow {
            current_page,
            page_size,
            total_pages,
            start_index,
            end_index,
        }
    }

    /// Number of rows visible through this window.
    pub fn len(&self) -> usize {
        self.end_index - self.start_index
    }

    pub fn is_empty(&self) -> bool {
        self.start_index == self.end_index
    }

    /// The result-count string consumed verbatim by renderers.
    pub fn results_label(&self, len: usize) -> String {
        if len == 0 {
            "No items".to_string()
        } else {
            format!(
                "{} - {} of {} items",
                self.start_index + 1,
                self.end_index,
                len
            )
        }
    }
}

/// Total pages for `len` rows at `page_size` rows per page.
///
/// An empty set still has one (empty) page.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if len == 0 {
        1
    } else {
        len.div_ceil(page_size)
    }
}
