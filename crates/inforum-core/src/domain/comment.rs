use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Comment on a blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub blog_post_id: i64,
    pub user_id: Uuid,
    pub content: String,
    pub date_posted: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub blog_post_id: i64,
    pub user_id: Uuid,
    pub content: String,
}

/// Reply to a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubComment {
    pub id: i64,
    pub comment_id: i64,
    pub user_id: Uuid,
    pub content: String,
    pub date_posted: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSubComment {
    pub comment_id: i64,
    pub user_id: Uuid,
    pub content: String,
}
