use serde::{Deserialize, Serialize};

/// Paging summary sent with listings (also as the `X-Pagination` header).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    pub total_count: u64,
    pub page_size: u64,
    pub current_page: u64,
    pub total_pages: u64,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PaginationMetadata {
    pub fn new(total_count: u64, current_page: u64, page_size: u64) -> Self {
        let total_pages = total_count.div_ceil(page_size.max(1));
        Self {
            total_count,
            page_size,
            current_page,
            total_pages,
            has_previous: current_page > 1,
            has_next: current_page < total_pages,
        }
    }
}

/// One page of results.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub metadata: PaginationMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_middle_page() {
        let meta = PaginationMetadata::new(25, 2, 10);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_previous);
        assert!(meta.has_next);
    }

    #[test]
    fn test_metadata_empty() {
        let meta = PaginationMetadata::new(0, 1, 10);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_previous);
        assert!(!meta.has_next);
    }
}
