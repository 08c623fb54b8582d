//! Result types for query execution

use serde::Serialize;

use crate::planner::PageSize;
use crate::schema::StockRecord;

use super::paginator::{PageLink, Paginator};

/// One page of screened records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultPage {
    /// Records on this page, in result order
    pub records: Vec<StockRecord>,
    /// Number of records that matched before pagination
    pub total_matches: usize,
    /// Number of records scanned
    pub scanned_count: usize,
    /// Requested page (1-based)
    pub page: usize,
    pub page_size: PageSize,
}

impl ResultPage {
    /// Creates an empty result
    pub fn empty(page: usize, page_size: PageSize) -> Self {
        Self {
            records: Vec::new(),
            total_matches: 0,
            scanned_count: 0,
            page,
            page_size,
        }
    }

    /// Returns true if this page holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of records on this page
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn total_pages(&self) -> usize {
        Paginator::total_pages(self.total_matches, self.page_size)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// 1-based inclusive range of result positions shown, if any
    pub fn showing(&self) -> Option<(usize, usize)> {
        if self.records.is_empty() {
            return None;
        }
        let first = (self.page - 1) * self.page_size.get() + 1;
        Some((first, first + self.records.len() - 1))
    }

    /// Pager window for this page
    pub fn window(&self) -> Vec<PageLink> {
        Paginator::page_window(self.page, self.total_pages())
    }

    /// `"N results found: Showing page p of P"`
    pub fn summary(&self) -> String {
        format!(
            "{} results found: Showing page {} of {}",
            self.total_matches,
            self.page,
            self.total_pages()
        )
    }
}
