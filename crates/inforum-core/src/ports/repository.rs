use async_trait::async_trait;

use crate::domain::{
    BlogPost, BlogPostChanges, CascadeReport, Category, Comment, Dependent, Home, NewBlogPost,
    NewCategory, NewComment, NewHome, NewSubComment, Page, PostQuery, Star, StarChange,
    SubComment,
};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
///
/// `D` is the draft type inserted before the store has assigned an id.
#[async_trait]
pub trait BaseRepository<T, D, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// List every entity.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Insert a new entity and return it with its assigned ID.
    async fn insert(&self, draft: D) -> Result<T, RepoError>;

    /// Overwrite an existing entity. Fails with `NotFound` when the row is gone.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Blog post repository.
#[async_trait]
pub trait BlogPostRepository: Send + Sync {
    /// Find a post, with its category, by ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<BlogPost>, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, RepoError>;

    /// One page of posts, newest first or by star count.
    async fn list(&self, query: &PostQuery) -> Result<Page<BlogPost>, RepoError>;

    /// Persist a new post with an empty slug.
    async fn insert(&self, draft: NewBlogPost) -> Result<BlogPost, RepoError>;

    async fn set_slug(&self, id: i64, slug: &str) -> Result<(), RepoError>;

    /// Write the editable fields of a post. Star count, author and posting
    /// date are left untouched.
    async fn update(&self, id: i64, changes: BlogPostChanges) -> Result<BlogPost, RepoError>;

    /// Remove the rows in each `plan` collection that belong to the post,
    /// in order, then the post itself.
    async fn delete_cascade(&self, id: i64, plan: &[Dependent])
    -> Result<CascadeReport, RepoError>;
}

/// Star repository.
#[async_trait]
pub trait StarRepository: Send + Sync {
    async fn exists(&self, star: &Star) -> Result<bool, RepoError>;

    async fn count_for_post(&self, blog_post_id: i64) -> Result<u64, RepoError>;

    /// Apply the star row mutation and the post counter adjustment in one commit.
    async fn commit(&self, change: StarChange) -> Result<(), RepoError>;
}

/// Comment repository with domain-specific methods.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, NewComment, i64> {
    /// Comments of a post, newest first.
    async fn find_by_post(&self, blog_post_id: i64) -> Result<Vec<Comment>, RepoError>;

    /// Delete the comment's replies, then the comment.
    async fn delete_with_replies(&self, id: i64) -> Result<(), RepoError>;
}

/// Sub-comment (reply) repository.
#[async_trait]
pub trait SubCommentRepository: BaseRepository<SubComment, NewSubComment, i64> {
    /// Replies to a comment, oldest first.
    async fn find_by_comment(&self, comment_id: i64) -> Result<Vec<SubComment>, RepoError>;
}

/// Category repository.
pub trait CategoryRepository: BaseRepository<Category, NewCategory, i64> {}

/// Home content repository.
pub trait HomeRepository: BaseRepository<Home, NewHome, i64> {}

impl<R> CategoryRepository for R where R: BaseRepository<Category, NewCategory, i64> {}

impl<R> HomeRepository for R where R: BaseRepository<Home, NewHome, i64> {}
