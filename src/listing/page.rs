//! Offset/limit pagination.

use serde::Serialize;

/// A normalized, 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

impl PageRequest {
    /// Normalize raw parameters.
    ///
    /// Missing or zero pages become page 1; missing or zero sizes become
    /// `default_size`; sizes are capped at `max_size`.
    pub fn new(
        page: Option<usize>,
        page_size: Option<usize>,
        default_size: usize,
        max_size: usize,
    ) -> Self {
        let page = page.filter(|&p| p > 0).unwrap_or(1);
        let page_size = page_size
            .filter(|&s| s > 0)
            .unwrap_or(default_size)
            .clamp(1, max_size.max(1));
        Self { page, page_size }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

/// One page of an ordered result plus the size of the whole result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

/// Slice an already ordered list. Out-of-range pages are empty, not errors.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let total = items.len();
    let items = items
        .into_iter()
        .skip(request.offset())
        .take(request.page_size)
        .collect();

    Page {
        items,
        total,
        page: request.page,
        page_size: request.page_size,
        total_pages: total.div_ceil(request.page_size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_page_of_twenty() {
        let items: Vec<usize> = (0..20).collect();
        let page = paginate(items, PageRequest::new(Some(2), Some(9), 9, 100));

        assert_eq!(page.items, (9..18).collect::<Vec<_>>());
        assert_eq!(page.total, 20);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let page = paginate(vec![1, 2, 3], PageRequest::new(Some(5), Some(2), 9, 100));
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
    }

    #[test]
    fn test_request_normalization() {
        assert_eq!(
            PageRequest::new(Some(0), Some(0), 9, 100),
            PageRequest { page: 1, page_size: 9 }
        );
        assert_eq!(PageRequest::new(None, Some(500), 9, 100).page_size, 100);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let page = paginate(vec![1], PageRequest::new(Some(usize::MAX), Some(50), 9, 100));
        assert!(page.items.is_empty());
    }
}
