//! Page envelopes for list endpoints.

use serde::Serialize;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;
pub const MAX_ITEMS_PER_PAGE: usize = 100;
/// Highest page number honoured; later pages are empty for any real account.
pub const MAX_PAGE: usize = 1_000_000;

/// Page numbers to offer around `current`, with `None` marking a gap.
fn page_window(
    total_pages: usize,
    current: usize,
    edge: usize,
    around: usize,
) -> Vec<Option<usize>> {
    if total_pages == 0 {
        return vec![];
    }

    let mut pages = Vec::new();
    let mut last_pushed = 0;
    for page in 1..=total_pages {
        let near_edge = page <= edge || page > total_pages.saturating_sub(edge);
        let near_current =
            page.saturating_add(around) >= current && page <= current.saturating_add(around);
        if near_edge || near_current {
            if page > last_pushed + 1 {
                pages.push(None);
            }
            pages.push(Some(page));
            last_pushed = page;
        }
    }
    pages
}

/// Clamps a requested page and page size to sane bounds.
pub fn page_params(page: Option<usize>, per_page: Option<usize>) -> (usize, usize) {
    let page = page.unwrap_or(1).clamp(1, MAX_PAGE);
    let per_page = per_page
        .unwrap_or(DEFAULT_ITEMS_PER_PAGE)
        .clamp(1, MAX_ITEMS_PER_PAGE);
    (page, per_page)
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    pub pages: Vec<Option<usize>>,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: usize, page: usize, per_page: usize) -> Self {
        let page = page.max(1);
        let total_pages = total.div_ceil(per_page.max(1));

        Self {
            items,
            total,
            page,
            per_page,
            total_pages,
            pages: page_window(total_pages, page, 2, 2),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
            pages: self.pages,
        }
    }
}
