//! Pagination calculator and paged result.
//!
//! Page numbers are one-based. Requested values are normalized rather than
//! rejected: a page below 1 becomes 1 and a page size outside
//! `1..=max_size` becomes the default size.

use serde::{Deserialize, Serialize};

/// Page size used when none (or an invalid one) is requested.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: usize = 50;

/// Page size bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLimits {
    pub default_size: usize,
    pub max_size: usize,
}

impl Default for PageLimits {
    fn default() -> Self {
        PageLimits {
            default_size: DEFAULT_PAGE_SIZE,
            max_size: MAX_PAGE_SIZE,
        }
    }
}

impl PageLimits {
    /// Normalizes a requested page number.
    pub fn page(&self, requested: i64) -> usize {
        usize::try_from(requested).ok().filter(|p| *p >= 1).unwrap_or(1)
    }

    /// Normalizes a requested page size.
    pub fn page_size(&self, requested: i64) -> usize {
        usize::try_from(requested)
            .ok()
            .filter(|size| (1..=self.max_size).contains(size))
            .unwrap_or_else(|| self.default_size.clamp(1, self.max_size.max(1)))
    }
}

/// Requested page, as bound from a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingDirective {
    pub page: i64,
    pub size: i64,
}

impl Default for PagingDirective {
    fn default() -> Self {
        PagingDirective {
            page: 1,
            size: DEFAULT_PAGE_SIZE as i64,
        }
    }
}

impl PagingDirective {
    pub fn new(page: i64, size: i64) -> Self {
        PagingDirective { page, size }
    }
}

/// One page of an ordered result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    /// Items on this page, in result order.
    pub items: Vec<T>,
    /// One-based page number.
    pub page: usize,
    pub page_size: usize,
    /// Number of items across all pages.
    pub total_count: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> Paginated<T> {
    fn from_parts(items: Vec<T>, page: usize, page_size: usize, total_count: usize) -> Self {
        let total_pages = total_count.div_ceil(page_size);
        Paginated {
            items,
            page,
            page_size,
            total_count,
            total_pages,
            has_previous: page > 1,
            has_next: page < total_pages,
        }
    }

    /// The empty first page.
    pub fn empty(limits: &PageLimits) -> Self {
        Self::from_parts(Vec::new(), 1, limits.page_size(-1), 0)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Converts the items, keeping the page metadata.
    pub fn map<U, F>(self, f: F) -> Paginated<U>
    where
        F: FnMut(T) -> U,
    {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
            has_previous: self.has_previous,
            has_next: self.has_next,
        }
    }

    /// Page numbers for a navigation bar; see [`page_window`].
    pub fn window(&self) -> Vec<Option<usize>> {
        page_window(self.total_pages, self.page, 2, 2, 4, 2)
    }
}

/// Slices `items` into the requested page using the default limits.
pub fn paginate<T>(items: Vec<T>, page: i64, page_size: i64) -> Paginated<T> {
    paginate_with(items, page, page_size, &PageLimits::default())
}

/// Slices `items` into the requested page.
pub fn paginate_with<T>(
    items: Vec<T>,
    page: i64,
    page_size: i64,
    limits: &PageLimits,
) -> Paginated<T> {
    let page = limits.page(page);
    let page_size = limits.page_size(page_size);
    let total_count = items.len();

    let start = (page - 1).saturating_mul(page_size);
    let items: Vec<T> = if start >= total_count {
        Vec::new()
    } else {
        items.into_iter().skip(start).take(page_size).collect()
    };

    Paginated::from_parts(items, page, page_size, total_count)
}

/// Page numbers to render, with `None` marking a gap.
///
/// Shows `left_edge` pages at the start, `left_current`/`right_current`
/// around the current page and `right_edge` at the end. A current page
/// outside `1..=total_pages` is clamped into it.
pub fn page_window(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    if total_pages == 0 {
        return Vec::new();
    }

    let current = current_page.clamp(1, total_pages);
    let near_current = current.saturating_sub(left_current)..=current.saturating_add(right_current);
    let shown = |page: usize| {
        page <= left_edge || near_current.contains(&page) || page + right_edge > total_pages
    };

    let mut window = Vec::new();
    for page in 1..=total_pages {
        if shown(page) {
            window.push(Some(page));
        } else if window.last() != Some(&None) {
            window.push(None);
        }
    }
    window
}
