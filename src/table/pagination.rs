use std::collections::BTreeSet;

/// Entry in a pagination strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// Zero-based page index
    Page(usize),
    Ellipsis,
}

/// Number of pages needed for `rows` rows at `page_size` per page
pub fn page_count(rows: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    rows.div_ceil(page_size)
}

/// Compact page strip around `current`.
///
/// With `total <= window` every page is listed. Otherwise `window / 2` pages
/// are kept at each edge, the first and last pages are always present, the
/// neighbourhood of `current` is shown, and every gap collapses to an
/// ellipsis.
pub fn pagination_items(current: usize, total: usize, window: usize) -> Vec<PageItem> {
    if total <= window {
        return (0..total).map(PageItem::Page).collect();
    }

    let edge = (window / 2).max(1);
    let tail = total.saturating_sub(edge);
    let mut pages = BTreeSet::new();

    if current < edge {
        pages.extend(0..edge);
        pages.extend(tail..total);
    } else if current >= tail {
        pages.insert(0);
        pages.extend(tail..total);
    } else {
        pages.insert(0);
        pages.extend(current - 1..=current + 1);
        pages.insert(total - 1);
    }

    let mut items = Vec::with_capacity(pages.len() * 2);
    let mut previous: Option<usize> = None;
    for page in pages.into_iter().filter(|&p| p < total) {
        if previous.is_some_and(|prev| page > prev + 1) {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page(page));
        previous = Some(page);
    }
    items
}
