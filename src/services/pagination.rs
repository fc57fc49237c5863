//! Pagination policy shared by every listing flow.

use std::sync::Arc;

use crate::domain::models::{Aggregate, ListWindow, PageOutcome, PageView};

/// Default number of stubs per page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Computes page windows and decides between rendering and redirecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationPolicy {
    page_size: u32,
}

impl Default for PaginationPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PaginationPolicy {
    /// A zero page size is raised to one.
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    /// Normalise a raw page parameter: missing, non-numeric or `<= 0` is page 1.
    pub fn resolve_page(raw: Option<&str>) -> u32 {
        raw.and_then(|value| value.trim().parse::<i64>().ok())
            .filter(|page| *page >= 1)
            .map_or(1, |page| u32::try_from(page).unwrap_or(u32::MAX))
    }

    /// Upstream offset of the first stub on `page`.
    pub fn offset(&self, page: u32) -> u64 {
        u64::from(self.page_size) * u64::from(page.max(1) - 1)
    }

    pub fn window(&self, page: u32) -> ListWindow {
        ListWindow::new(self.page_size, self.offset(page))
    }

    /// `floor(total_count / page_size)`.
    ///
    /// This is one short whenever the total is not an exact multiple of the
    /// page size: with 45 entries and pages of 20 it answers 2 although page
    /// 3 holds entries 41-45.
    pub fn last_valid_page(&self, total_count: u64) -> u32 {
        u32::try_from(total_count / u64::from(self.page_size)).unwrap_or(u32::MAX)
    }

    /// Page to redirect to when a request lands past the end.
    pub fn redirect_target(&self, total_count: u64) -> u32 {
        self.last_valid_page(total_count).max(1)
    }

    /// Decide the terminal state of a page request from its resolved window.
    ///
    /// An empty window redirects to the last valid page, unless the request
    /// already is that page (an empty catalog), which renders empty rather
    /// than redirecting to itself.
    pub fn outcome(&self, page: u32, aggregate: &Arc<Aggregate>) -> PageOutcome {
        let target = self.redirect_target(aggregate.total_count);
        if aggregate.is_empty() && page != target {
            return PageOutcome::Redirect { page: target };
        }
        PageOutcome::Rendered(PageView::from_aggregate(
            page,
            self.last_valid_page(aggregate.total_count),
            aggregate,
        ))
    }
}
