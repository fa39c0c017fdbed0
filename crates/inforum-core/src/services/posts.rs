//! Blog post lifecycle and star operations.

use std::sync::Arc;

use crate::domain::{
    BlogPost, BlogPostChanges, CASCADE_ORDER, CascadeReport, NewBlogPost, Star, StarChange,
    StarToggle,
};
use crate::error::{DomainError, RepoError};
use crate::ports::{BlogPostRepository, StarRepository};
use crate::slug::generate_slug;

const POST: &str = "Post";

/// Fields a caller may set when creating or editing a post.
#[derive(Debug, Clone)]
pub struct PostContent {
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub category_id: Option<i64>,
}

impl PostContent {
    /// Title and body must hold more than whitespace.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::Validation("Title is required".to_string()));
        }
        if self.content.trim().is_empty() {
            return Err(DomainError::Validation("Content is required".to_string()));
        }
        Ok(())
    }
}

/// Post service - owns the slug lifecycle, the star toggle and post removal.
///
/// Repositories are injected at construction so the same logic runs against
/// PostgreSQL or the in-memory store.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn BlogPostRepository>,
    stars: Arc<dyn StarRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn BlogPostRepository>, stars: Arc<dyn StarRepository>) -> Self {
        Self { posts, stars }
    }

    pub fn posts(&self) -> &Arc<dyn BlogPostRepository> {
        &self.posts
    }

    /// Create a post.
    ///
    /// The slug embeds the id, which only exists after the first write, so
    /// the post is inserted first and the slug persisted in a second write.
    pub async fn create_post(
        &self,
        author_id: uuid::Uuid,
        content: PostContent,
    ) -> Result<BlogPost, DomainError> {
        content.validate()?;

        let mut post = self
            .posts
            .insert(NewBlogPost {
                title: content.title,
                excerpt: content.excerpt,
                content: content.content,
                author_id,
                category_id: content.category_id,
            })
            .await?;

        let slug = generate_slug(&post.title, post.id);
        self.posts.set_slug(post.id, &slug).await?;
        post.slug = slug;

        tracing::info!(post_id = post.id, slug = %post.slug, "BlogPost created");
        Ok(post)
    }

    /// Update a post's editable fields, regenerating its slug from the new title.
    pub async fn update_post(&self, id: i64, content: PostContent) -> Result<BlogPost, DomainError> {
        content.validate()?;

        let changes = BlogPostChanges {
            slug: generate_slug(&content.title, id),
            title: content.title,
            excerpt: content.excerpt,
            content: content.content,
            category_id: content.category_id,
        };

        let post = self.posts.update(id, changes).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found(POST, id),
            other => DomainError::Persistence(other),
        })?;

        tracing::info!(post_id = id, "BlogPost updated");
        Ok(post)
    }

    /// Delete a post and everything hanging off it.
    pub async fn delete_post(&self, id: i64) -> Result<CascadeReport, DomainError> {
        self.require_post(id).await?;

        let report = self
            .posts
            .delete_cascade(id, &CASCADE_ORDER)
            .await
            .map_err(|e| match e {
                RepoError::NotFound => DomainError::not_found(POST, id),
                other => DomainError::Persistence(other),
            })?;

        tracing::info!(
            post_id = id,
            sub_comments = report.sub_comments,
            comments = report.comments,
            stars = report.stars,
            "BlogPost deleted"
        );
        Ok(report)
    }

    /// Star the post for the user, or remove the star if it already exists.
    ///
    /// The row mutation and the counter adjustment are handed to the store as
    /// a single change so they commit together.
    pub async fn toggle_star(&self, star: Star) -> Result<StarToggle, DomainError> {
        self.require_post(star.blog_post_id).await?;

        let change = if self.stars.exists(&star).await? {
            StarChange::Remove(star)
        } else {
            StarChange::Add(star)
        };

        self.stars.commit(change).await?;

        let added = matches!(change, StarChange::Add(_));
        tracing::info!(
            post_id = star.blog_post_id,
            user_id = %star.user_id,
            added,
            "Star toggled"
        );
        Ok(StarToggle { added })
    }

    /// Whether the user has starred the post.
    pub async fn star_status(&self, star: Star) -> Result<bool, DomainError> {
        self.require_post(star.blog_post_id).await?;
        let exists = self.stars.exists(&star).await?;

        tracing::debug!(post_id = star.blog_post_id, user_id = %star.user_id, exists, "Star status");
        Ok(exists)
    }

    async fn require_post(&self, id: i64) -> Result<BlogPost, DomainError> {
        match self.posts.find_by_id(id).await? {
            Some(post) => Ok(post),
            None => {
                tracing::info!(post_id = id, "Post not found");
                Err(DomainError::not_found(POST, id))
            }
        }
    }
}
