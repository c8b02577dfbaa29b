//! Page requests and pages of results

use serde::Serialize;

use crate::domain::team::{SortDirection, SortField};

/// Ordering of a paged query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Sort {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

/// Requested slice of an ordered result set
///
/// Page index and size are kept exactly as received. A request with a
/// negative page or a non-positive size is not an error: it resolves to an
/// empty page (see [`PageRequest::is_satisfiable`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Page index (0-based)
    pub page: i64,
    /// Rows per page
    pub size: i64,
    pub sort: Sort,
}

impl PageRequest {
    pub fn new(page: i64, size: i64, sort: Sort) -> Self {
        Self { page, size, sort }
    }

    /// Whether this request can select any row at all
    pub fn is_satisfiable(&self) -> bool {
        self.page >= 0 && self.size > 0
    }

    /// Number of rows preceding the page
    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }

    /// Maximum number of rows on the page
    pub fn limit(&self) -> i64 {
        self.size
    }
}

/// Bounded slice of an ordered result set plus paging metadata
///
/// Serialized as `{content, totalElements, totalPages, number, size}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Rows on this page
    pub content: Vec<T>,
    /// Row count across all pages
    pub total_elements: i64,
    /// Number of pages at the requested size
    pub total_pages: i64,
    /// Page index (0-based)
    pub number: i64,
    /// Requested page size
    pub size: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: i64) -> Self {
        let total_pages = if request.size > 0 {
            total_elements / request.size + i64::from(total_elements % request.size != 0)
        } else {
            0
        };

        Self {
            content,
            total_elements,
            total_pages,
            number: request.page,
            size: request.size,
        }
    }

    /// Page with no rows, returned for unsatisfiable requests
    pub fn empty(request: &PageRequest) -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
            total_pages: 0,
            number: request.page,
            size: request.size,
        }
    }

    /// Converts the rows while keeping the metadata
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number: self.number,
            size: self.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(page: i64, size: i64) -> PageRequest {
        PageRequest::new(page, size, Sort::default())
    }

    #[test]
    fn offset_calculation() {
        assert_eq!(request(0, 10).offset(), 0);
        assert_eq!(request(2, 10).offset(), 20);
        assert_eq!(request(3, 25).offset(), 75);
    }

    #[test]
    fn negative_or_empty_requests_are_unsatisfiable() {
        assert!(request(0, 1).is_satisfiable());
        assert!(!request(-1, 10).is_satisfiable());
        assert!(!request(0, 0).is_satisfiable());
        assert!(!request(-1, -1).is_satisfiable());
    }

    #[test]
    fn total_pages() {
        let page: Page<()> = Page::new(vec![], &request(0, 10), 0);
        assert_eq!(page.total_pages, 0);

        let page: Page<()> = Page::new(vec![], &request(0, 10), 25);
        assert_eq!(page.total_pages, 3);

        let page: Page<()> = Page::new(vec![], &request(0, 10), 100);
        assert_eq!(page.total_pages, 10);
    }

    #[test]
    fn total_pages_with_huge_size() {
        let page: Page<()> = Page::new(vec![], &request(0, i64::MAX), 2);
        assert_eq!(page.total_pages, 1);

        let page: Page<()> = Page::new(vec![], &request(0, i64::MAX), i64::MAX);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn empty_page_echoes_request() {
        let page: Page<()> = Page::empty(&request(-1, -1));
        assert!(page.content.is_empty());
        assert_eq!(page.number, -1);
        assert_eq!(page.size, -1);
        assert_eq!(page.total_elements, 0);
    }

    #[test]
    fn serializes_in_camel_case() {
        let page = Page::new(vec![1, 2], &request(0, 2), 5);
        let json = serde_json::to_value(&page).unwrap();

        assert_eq!(json["content"], serde_json::json!([1, 2]));
        assert_eq!(json["totalElements"], 5);
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["number"], 0);
        assert_eq!(json["size"], 2);
    }

    #[test]
    fn map_keeps_metadata() {
        let page = Page::new(vec![1, 2], &request(1, 2), 4).map(|n| n * 10);
        assert_eq!(page.content, vec![10, 20]);
        assert_eq!(page.number, 1);
        assert_eq!(page.total_pages, 2);
    }
}
