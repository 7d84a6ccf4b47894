//! Client-side pagination over a filtered/ordered collection, plus the
//! windowed page-number strip the pagination control renders.

/// One page of an ordered collection.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current: usize,
    pub per_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Slice out a 1-based page. Out-of-range pages yield an empty page with
/// the counts intact; `per_page` is clamped to at least 1.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let current = page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);

    let start = (current - 1) * per_page;
    let selected = if start >= total_items {
        Vec::new()
    } else {
        items[start..(start + per_page).min(total_items)].to_vec()
    };

    Page {
        items: selected,
        current,
        per_page,
        total_pages,
        total_items,
    }
}

/// Entry in the page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    Page(usize),
    Ellipsis,
}

/// Page numbers to render: first page, a window around the current page
/// (wider near the edges), ellipses over the gaps, last page.
pub fn page_strip(current: usize, total_pages: usize) -> Vec<PageMarker> {
    if total_pages == 0 {
        return Vec::new();
    }

    let mut strip = vec![PageMarker::Page(1)];

    let mut range_start = current.saturating_sub(1).max(2);
    let mut range_end = (current + 1).min(total_pages.saturating_sub(1));
    if current <= 3 {
        range_end = 4.min(total_pages.saturating_sub(1));
    } else if current + 2 >= total_pages {
        range_start = total_pages.saturating_sub(3).max(2);
    }

    if range_start > 2 {
        strip.push(PageMarker::Ellipsis);
    }
    for page in range_start..=range_end {
        strip.push(PageMarker::Page(page));
    }
    if range_end + 1 < total_pages {
        strip.push(PageMarker::Ellipsis);
    }
    if total_pages > 1 {
        strip.push(PageMarker::Page(total_pages));
    }

    strip
}
