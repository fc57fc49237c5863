//! Outcomes of a paginated listing request.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::aggregate::Aggregate;
use super::record::CatalogRecord;

/// One rendered page of a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageView {
    pub page_number: u32,
    /// `None` on the first page
    pub previous_page: Option<u32>,
    /// `Some` only when the upstream reported a following window
    pub next_page: Option<u32>,
    pub last_page: u32,
    pub total_count: u64,
    pub records: Vec<CatalogRecord>,
}

impl PageView {
    pub fn from_aggregate(page_number: u32, last_page: u32, aggregate: &Arc<Aggregate>) -> Self {
        Self {
            page_number,
            previous_page: page_number.checked_sub(1).filter(|page| *page >= 1),
            next_page: aggregate.has_next.then(|| page_number.saturating_add(1)),
            last_page,
            total_count: aggregate.total_count,
            records: aggregate.records.clone(),
        }
    }
}

/// Terminal state of a page request: there is no third outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PageOutcome {
    Rendered(PageView),
    /// The requested page was past the end; go to `page` instead
    Redirect { page: u32 },
}

impl PageOutcome {
    pub const fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }

    pub const fn view(&self) -> Option<&PageView> {
        match self {
            Self::Rendered(view) => Some(view),
            Self::Redirect { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page_has_no_previous() {
        let aggregate = Arc::new(Aggregate {
            records: vec![],
            total_count: 45,
            has_next: true,
        });
        let view = PageView::from_aggregate(1, 2, &aggregate);
        assert_eq!(view.previous_page, None);
        assert_eq!(view.next_page, Some(2));
        assert_eq!(view.total_count, 45);
    }

    #[test]
    fn test_final_window_has_no_next() {
        let aggregate = Arc::new(Aggregate {
            records: vec![],
            total_count: 45,
            has_next: false,
        });
        let view = PageView::from_aggregate(3, 2, &aggregate);
        assert_eq!(view.previous_page, Some(2));
        assert_eq!(view.next_page, None);
    }
}
