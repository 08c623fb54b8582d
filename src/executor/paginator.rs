//! Pagination and pager window
//!
//! Pages are 1-based. A page past the end (or page 0) is empty, never an
//! error.

use serde::Serialize;

use crate::planner::PageSize;

/// Pages that are always listed in full before gaps are introduced
const FULL_WINDOW: usize = 7;

/// One entry in the pager window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "number", rename_all = "lowercase")]
pub enum PageLink {
    Page(usize),
    /// Elided run of pages, rendered as `...`
    Gap,
}

/// Slices ordered results into pages
pub struct Paginator;

impl Paginator {
    /// Returns items `[(page-1)*size, page*size)` clamped to the input.
    pub fn page<T>(items: &[T], page: usize, size: PageSize) -> &[T] {
        let size = size.get();

        let start = match page.checked_sub(1).and_then(|p| p.checked_mul(size)) {
            Some(start) if start < items.len() => start,
            _ => return &[],
        };
        let end = start.saturating_add(size).min(items.len());

        &items[start..end]
    }

    /// `ceil(total / size)`; zero results means zero pages
    pub fn total_pages(total: usize, size: PageSize) -> usize {
        total.div_ceil(size.get())
    }

    /// Compact pager around `current`.
    ///
    /// Up to seven pages are listed in full. Beyond that the window is the
    /// first page, the neighbours of `current`, and the last page, with a
    /// gap wherever pages are skipped.
    pub fn page_window(current: usize, total_pages: usize) -> Vec<PageLink> {
        if total_pages <= FULL_WINDOW {
            return (1..=total_pages).map(PageLink::Page).collect();
        }

        let mut links = vec![PageLink::Page(1)];

        if current > 3 {
            links.push(PageLink::Gap);
        }

        let start = current.saturating_sub(1).max(2);
        let end = current.saturating_add(1).min(total_pages - 1);
        links.extend((start..=end).map(PageLink::Page));

        if current < total_pages - 2 {
            links.push(PageLink::Gap);
        }

        links.push(PageLink::Page(total_pages));
        links
    }
}
