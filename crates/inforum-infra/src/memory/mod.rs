//! In-memory store - used when no database is configured, and by tests.
//!
//! Every repository port is implemented over one set of tables behind an async
//! `RwLock`. Foreign keys behave like the PostgreSQL schema (`RESTRICT` on
//! delete), and multi-row writes are staged on a copy so they apply all or
//! nothing. Data is lost on process restart.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use inforum_core::domain::{
    BlogPost, BlogPostChanges, CascadeReport, Category, Comment, Dependent, Home, NewBlogPost,
    NewCategory, NewComment, NewHome, NewSubComment, Page, PaginationMetadata, PostQuery, Star,
    StarChange, SubComment,
};
use inforum_core::error::RepoError;
use inforum_core::ports::{
    BaseRepository, BlogPostRepository, CommentRepository, StarRepository, SubCommentRepository,
};

#[derive(Debug, Clone, Default)]
struct Tables {
    sequences: HashMap<&'static str, i64>,
    categories: BTreeMap<i64, Category>,
    homes: BTreeMap<i64, Home>,
    posts: BTreeMap<i64, BlogPost>,
    comments: BTreeMap<i64, Comment>,
    sub_comments: BTreeMap<i64, SubComment>,
    stars: HashSet<Star>,
}

impl Tables {
    fn next_id(&mut self, table: &'static str) -> i64 {
        let id = self.sequences.entry(table).or_insert(0);
        *id += 1;
        *id
    }

    fn with_category(&self, mut post: BlogPost) -> BlogPost {
        post.category = post
            .category_id
            .and_then(|id| self.categories.get(&id).cloned());
        post
    }

    fn check_category(&self, category_id: Option<i64>) -> Result<(), RepoError> {
        match category_id {
            Some(id) if !self.categories.contains_key(&id) => Err(RepoError::Constraint(format!(
                "category {id} does not exist"
            ))),
            _ => Ok(()),
        }
    }

    fn post_is_referenced(&self, id: i64) -> bool {
        self.comments.values().any(|c| c.blog_post_id == id)
            || self.stars.iter().any(|s| s.blog_post_id == id)
    }
}

/// In-memory implementation of every repository port.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A row type kept in one of the id-keyed tables.
trait Stored<D>: Clone + Send + Sync + 'static {
    const TABLE: &'static str;

    fn id(&self) -> i64;

    fn table(tables: &Tables) -> &BTreeMap<i64, Self>;

    fn table_mut(tables: &mut Tables) -> &mut BTreeMap<i64, Self>;

    fn from_draft(id: i64, draft: D) -> Self;

    /// Reject rows whose parent does not exist.
    fn check_parent(_tables: &Tables, _row: &Self) -> Result<(), RepoError> {
        Ok(())
    }

    /// Reject deletes of rows that other rows still reference.
    fn check_unreferenced(_tables: &Tables, _id: i64) -> Result<(), RepoError> {
        Ok(())
    }
}

impl Stored<NewCategory> for Category {
    const TABLE: &'static str = "categories";

    fn id(&self) -> i64 {
        self.id
    }

    fn table(tables: &Tables) -> &BTreeMap<i64, Self> {
        &tables.categories
    }

    fn table_mut(tables: &mut Tables) -> &mut BTreeMap<i64, Self> {
        &mut tables.categories
    }

    fn from_draft(id: i64, draft: NewCategory) -> Self {
        Category {
            id,
            name: draft.name,
            description: draft.description,
        }
    }

    fn check_parent(tables: &Tables, row: &Self) -> Result<(), RepoError> {
        let duplicate = tables
            .categories
            .values()
            .any(|c| c.id != row.id && c.name == row.name);
        if duplicate {
            return Err(RepoError::Constraint(format!(
                "category {} already exists",
                row.name
            )));
        }
        Ok(())
    }

    fn check_unreferenced(tables: &Tables, id: i64) -> Result<(), RepoError> {
        if tables.posts.values().any(|p| p.category_id == Some(id)) {
            return Err(RepoError::Constraint(format!(
                "category {id} is still referenced by posts"
            )));
        }
        Ok(())
    }
}

impl Stored<NewHome> for Home {
    const TABLE: &'static str = "home";

    fn id(&self) -> i64 {
        self.id
    }

    fn table(tables: &Tables) -> &BTreeMap<i64, Self> {
        &tables.homes
    }

    fn table_mut(tables: &mut Tables) -> &mut BTreeMap<i64, Self> {
        &mut tables.homes
    }

    fn from_draft(id: i64, draft: NewHome) -> Self {
        Home {
            id,
            title: draft.title,
            description: draft.description,
            image_url: draft.image_url,
        }
    }
}

impl Stored<NewComment> for Comment {
    const TABLE: &'static str = "comments";

    fn id(&self) -> i64 {
        self.id
    }

    fn table(tables: &Tables) -> &BTreeMap<i64, Self> {
        &tables.comments
    }

    fn table_mut(tables: &mut Tables) -> &mut BTreeMap<i64, Self> {
        &mut tables.comments
    }

    fn from_draft(id: i64, draft: NewComment) -> Self {
        Comment {
            id,
            blog_post_id: draft.blog_post_id,
            user_id: draft.user_id,
            content: draft.content,
            date_posted: Utc::now(),
        }
    }

    fn check_parent(tables: &Tables, row: &Self) -> Result<(), RepoError> {
        if !tables.posts.contains_key(&row.blog_post_id) {
            return Err(RepoError::Constraint(format!(
                "blog post {} does not exist",
                row.blog_post_id
            )));
        }
        Ok(())
    }

    fn check_unreferenced(tables: &Tables, id: i64) -> Result<(), RepoError> {
        if tables.sub_comments.values().any(|r| r.comment_id == id) {
            return Err(RepoError::Constraint(format!(
                "comment {id} still has replies"
            )));
        }
        Ok(())
    }
}

impl Stored<NewSubComment> for SubComment {
    const TABLE: &'static str = "sub_comments";

    fn id(&self) -> i64 {
        self.id
    }

    fn table(tables: &Tables) -> &BTreeMap<i64, Self> {
        &tables.sub_comments
    }

    fn table_mut(tables: &mut Tables) -> &mut BTreeMap<i64, Self> {
        &mut tables.sub_comments
    }

    fn from_draft(id: i64, draft: NewSubComment) -> Self {
        SubComment {
            id,
            comment_id: draft.comment_id,
            user_id: draft.user_id,
            content: draft.content,
            date_posted: Utc::now(),
        }
    }

    fn check_parent(tables: &Tables, row: &Self) -> Result<(), RepoError> {
        if !tables.comments.contains_key(&row.comment_id) {
            return Err(RepoError::Constraint(format!(
                "comment {} does not exist",
                row.comment_id
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl<T, D> BaseRepository<T, D, i64> for InMemoryStore
where
    T: Stored<D>,
    D: Send + Sync + 'static,
{
    async fn find_by_id(&self, id: i64) -> Result<Option<T>, RepoError> {
        let tables = self.tables.read().await;
        Ok(T::table(&tables).get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<T>, RepoError> {
        let tables = self.tables.read().await;
        Ok(T::table(&tables).values().cloned().collect())
    }

    async fn insert(&self, draft: D) -> Result<T, RepoError> {
        let mut tables = self.tables.write().await;

        let id = tables.sequences.get(T::TABLE).copied().unwrap_or(0) + 1;
        let row = T::from_draft(id, draft);
        T::check_parent(&tables, &row)?;

        tables.next_id(T::TABLE);
        T::table_mut(&mut tables).insert(id, row.clone());
        Ok(row)
    }

    async fn update(&self, entity: T) -> Result<T, RepoError> {
        let mut tables = self.tables.write().await;

        if !T::table(&tables).contains_key(&entity.id()) {
            return Err(RepoError::NotFound);
        }
        T::check_parent(&tables, &entity)?;

        T::table_mut(&mut tables).insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;

        if !T::table(&tables).contains_key(&id) {
            return Err(RepoError::NotFound);
        }
        T::check_unreferenced(&tables, id)?;

        T::table_mut(&mut tables).remove(&id);
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn find_by_post(&self, blog_post_id: i64) -> Result<Vec<Comment>, RepoError> {
        let tables = self.tables.read().await;

        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|c| c.blog_post_id == blog_post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.date_posted.cmp(&a.date_posted).then(b.id.cmp(&a.id)));
        Ok(comments)
    }

    async fn delete_with_replies(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;

        if tables.comments.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        tables.sub_comments.retain(|_, r| r.comment_id != id);
        Ok(())
    }
}

#[async_trait]
impl SubCommentRepository for InMemoryStore {
    async fn find_by_comment(&self, comment_id: i64) -> Result<Vec<SubComment>, RepoError> {
        let tables = self.tables.read().await;

        let mut replies: Vec<SubComment> = tables
            .sub_comments
            .values()
            .filter(|r| r.comment_id == comment_id)
            .cloned()
            .collect();
        replies.sort_by(|a, b| a.date_posted.cmp(&b.date_posted).then(a.id.cmp(&b.id)));
        Ok(replies)
    }
}

#[async_trait]
impl BlogPostRepository for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<BlogPost>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.get(&id).cloned().map(|p| tables.with_category(p)))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .posts
            .values()
            .find(|p| p.slug == slug)
            .cloned()
            .map(|p| tables.with_category(p)))
    }

    async fn list(&self, query: &PostQuery) -> Result<Page<BlogPost>, RepoError> {
        let tables = self.tables.read().await;

        let mut posts: Vec<&BlogPost> = tables
            .posts
            .values()
            .filter(|p| query.author_id.is_none_or(|author| p.author_id == author))
            .collect();

        if query.star_sort {
            posts.sort_by(|a, b| b.star.cmp(&a.star).then(b.id.cmp(&a.id)));
        } else {
            posts.sort_by(|a, b| b.date_posted.cmp(&a.date_posted).then(b.id.cmp(&a.id)));
        }

        let total_count = posts.len() as u64;
        let items = posts
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.page_size as usize)
            .map(|p| tables.with_category(p.clone()))
            .collect();

        Ok(Page {
            items,
            metadata: PaginationMetadata::new(total_count, query.page_number, query.page_size),
        })
    }

    async fn insert(&self, draft: NewBlogPost) -> Result<BlogPost, RepoError> {
        let mut tables = self.tables.write().await;
        tables.check_category(draft.category_id)?;

        let id = tables.next_id("blog_posts");
        let now = Utc::now();
        let post = BlogPost {
            id,
            title: draft.title,
            slug: String::new(),
            excerpt: draft.excerpt,
            content: draft.content,
            star: 0,
            author_id: draft.author_id,
            category_id: draft.category_id,
            category: None,
            date_posted: now,
            date_updated: now,
        };

        tables.posts.insert(id, post.clone());
        Ok(post)
    }

    async fn set_slug(&self, id: i64, slug: &str) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;

        let post = tables.posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        post.slug = slug.to_string();
        Ok(())
    }

    async fn update(&self, id: i64, changes: BlogPostChanges) -> Result<BlogPost, RepoError> {
        let mut tables = self.tables.write().await;
        tables.check_category(changes.category_id)?;

        let post = tables.posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        post.title = changes.title;
        post.slug = changes.slug;
        post.excerpt = changes.excerpt;
        post.content = changes.content;
        post.category_id = changes.category_id;
        post.date_updated = Utc::now();

        let updated = post.clone();
        Ok(tables.with_category(updated))
    }

    async fn delete_cascade(
        &self,
        id: i64,
        plan: &[Dependent],
    ) -> Result<CascadeReport, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.contains_key(&id) {
            return Err(RepoError::NotFound);
        }

        let mut staged = tables.clone();
        let mut report = CascadeReport::default();

        for dependent in plan {
            let removed = match dependent {
                Dependent::SubComments => {
                    let post_comments: HashSet<i64> = staged
                        .comments
                        .values()
                        .filter(|c| c.blog_post_id == id)
                        .map(|c| c.id)
                        .collect();
                    let before = staged.sub_comments.len();
                    staged
                        .sub_comments
                        .retain(|_, r| !post_comments.contains(&r.comment_id));
                    before - staged.sub_comments.len()
                }
                Dependent::Comments => {
                    let still_replied: HashSet<i64> =
                        staged.sub_comments.values().map(|r| r.comment_id).collect();
                    let blocked = staged
                        .comments
                        .values()
                        .any(|c| c.blog_post_id == id && still_replied.contains(&c.id));
                    if blocked {
                        return Err(RepoError::Constraint(
                            "comments of the post still have replies".to_string(),
                        ));
                    }
                    let before = staged.comments.len();
                    staged.comments.retain(|_, c| c.blog_post_id != id);
                    before - staged.comments.len()
                }
                Dependent::Stars => {
                    let before = staged.stars.len();
                    staged.stars.retain(|s| s.blog_post_id != id);
                    before - staged.stars.len()
                }
            };
            report.record(*dependent, removed as u64);
        }

        if staged.post_is_referenced(id) {
            return Err(RepoError::Constraint(format!(
                "blog post {id} is still referenced"
            )));
        }
        staged.posts.remove(&id);

        *tables = staged;
        Ok(report)
    }
}

#[async_trait]
impl StarRepository for InMemoryStore {
    async fn exists(&self, star: &Star) -> Result<bool, RepoError> {
        Ok(self.tables.read().await.stars.contains(star))
    }

    async fn count_for_post(&self, blog_post_id: i64) -> Result<u64, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .stars
            .iter()
            .filter(|s| s.blog_post_id == blog_post_id)
            .count() as u64)
    }

    async fn commit(&self, change: StarChange) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let star = *change.star();

        if !tables.posts.contains_key(&star.blog_post_id) {
            return Err(RepoError::NotFound);
        }

        match change {
            StarChange::Add(_) => {
                if !tables.stars.insert(star) {
                    return Err(RepoError::Constraint("star already exists".to_string()));
                }
            }
            StarChange::Remove(_) => {
                if !tables.stars.remove(&star) {
                    return Err(RepoError::NotFound);
                }
            }
        }

        if let Some(post) = tables.posts.get_mut(&star.blog_post_id) {
            post.star += change.delta();
        }
        Ok(())
    }
}
