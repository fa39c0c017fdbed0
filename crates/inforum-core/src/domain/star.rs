use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's star on a blog post. At most one exists per `(blog_post_id, user_id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Star {
    pub blog_post_id: i64,
    pub user_id: Uuid,
}

impl Star {
    pub fn new(blog_post_id: i64, user_id: Uuid) -> Self {
        Self {
            blog_post_id,
            user_id,
        }
    }
}

/// A star row mutation together with its counter adjustment.
///
/// Stores must apply both halves in a single commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarChange {
    /// Insert the star and increment the post's star count.
    Add(Star),
    /// Delete the star and decrement the post's star count.
    Remove(Star),
}

impl StarChange {
    pub fn star(&self) -> &Star {
        match self {
            StarChange::Add(star) | StarChange::Remove(star) => star,
        }
    }

    /// Counter delta applied to the post.
    pub fn delta(&self) -> i32 {
        match self {
            StarChange::Add(_) => 1,
            StarChange::Remove(_) => -1,
        }
    }
}

/// Outcome of a star toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarToggle {
    pub added: bool,
}
