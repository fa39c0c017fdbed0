use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Category;

/// Blog post entity.
///
/// `slug` is always derivable from `(title, id)` and `star` mirrors the
/// number of live [`Star`](super::Star) rows that reference this post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub star: i32,
    pub author_id: Uuid,
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub date_posted: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

/// A post that has not been persisted yet. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewBlogPost {
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub author_id: Uuid,
    pub category_id: Option<i64>,
}

/// Editable fields of an existing post.
#[derive(Debug, Clone)]
pub struct BlogPostChanges {
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub category_id: Option<i64>,
}

/// Listing filter and paging for blog posts.
#[derive(Debug, Clone)]
pub struct PostQuery {
    pub author_id: Option<Uuid>,
    /// Order by star count instead of posting date (both descending).
    pub star_sort: bool,
    /// 1-based page number.
    pub page_number: u64,
    pub page_size: u64,
}

impl PostQuery {
    pub const DEFAULT_PAGE_SIZE: u64 = 10;
    pub const MAX_PAGE_SIZE: u64 = 50;
    const MAX_OFFSET: u64 = i64::MAX as u64;

    /// Build a query, clamping paging values into their valid ranges.
    ///
    /// The page number is capped so the row offset fits a signed 64-bit
    /// SQL `OFFSET`.
    pub fn new(
        author_id: Option<Uuid>,
        star_sort: bool,
        page_number: Option<u64>,
        page_size: Option<u64>,
    ) -> Self {
        let page_size = page_size
            .unwrap_or(Self::DEFAULT_PAGE_SIZE)
            .clamp(1, Self::MAX_PAGE_SIZE);
        let last_page = Self::MAX_OFFSET / page_size + 1;

        Self {
            author_id,
            star_sort,
            page_number: page_number.unwrap_or(1).clamp(1, last_page),
            page_size,
        }
    }

    /// Number of rows to skip for the requested page.
    pub fn offset(&self) -> u64 {
        self.page_number
            .saturating_sub(1)
            .saturating_mul(self.page_size)
            .min(Self::MAX_OFFSET)
    }
}

impl Default for PostQuery {
    fn default() -> Self {
        Self::new(None, false, None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults() {
        let query = PostQuery::default();
        assert_eq!(query.page_number, 1);
        assert_eq!(query.page_size, PostQuery::DEFAULT_PAGE_SIZE);
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn test_query_clamps_paging() {
        let query = PostQuery::new(None, true, Some(0), Some(500));
        assert_eq!(query.page_number, 1);
        assert_eq!(query.page_size, PostQuery::MAX_PAGE_SIZE);

        let query = PostQuery::new(None, false, Some(3), Some(0));
        assert_eq!(query.page_size, 1);
        assert_eq!(query.offset(), 2);
    }

    #[test]
    fn test_huge_page_number_stays_within_sql_offset() {
        let query = PostQuery::new(None, false, Some(u64::MAX), Some(50));
        assert!(query.offset() <= i64::MAX as u64);
        assert!(query.page_number > 1);

        let query = PostQuery {
            author_id: None,
            star_sort: false,
            page_number: u64::MAX,
            page_size: 50,
        };
        assert_eq!(query.offset(), i64::MAX as u64);
    }
}
