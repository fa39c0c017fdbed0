//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, NotSet, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use inforum_core::domain::{
    BlogPost, BlogPostChanges, CascadeReport, Comment, Dependent, NewBlogPost, Page,
    PaginationMetadata, PostQuery, Star, StarChange, SubComment,
};
use inforum_core::error::RepoError;
use inforum_core::ports::{
    BlogPostRepository, CommentRepository, StarRepository, SubCommentRepository,
};

use super::entity::blog_post::{self, Entity as BlogPostEntity};
use super::entity::category::Entity as CategoryEntity;
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::home::Entity as HomeEntity;
use super::entity::star::{self, Entity as StarEntity};
use super::entity::sub_comment::{self, Entity as SubCommentEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL home content repository.
pub type PostgresHomeRepository = PostgresBaseRepository<HomeEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// PostgreSQL sub-comment repository.
pub type PostgresSubCommentRepository = PostgresBaseRepository<SubCommentEntity>;

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_post(&self, blog_post_id: i64) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::BlogPostId.eq(blog_post_id))
            .order_by_desc(comment::Column::DatePosted)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn delete_with_replies(&self, id: i64) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let replies = SubCommentEntity::delete_many()
            .filter(sub_comment::Column::CommentId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        let result = CommentEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        txn.commit().await.map_err(map_db_err)?;
        tracing::debug!(comment_id = id, replies = replies.rows_affected, "Comment deleted");
        Ok(())
    }
}

#[async_trait]
impl SubCommentRepository for PostgresSubCommentRepository {
    async fn find_by_comment(&self, comment_id: i64) -> Result<Vec<SubComment>, RepoError> {
        let result = SubCommentEntity::find()
            .filter(sub_comment::Column::CommentId.eq(comment_id))
            .order_by_asc(sub_comment::Column::DatePosted)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

/// PostgreSQL blog post repository. Reads join the post's category.
pub struct PostgresBlogPostRepository {
    pub(crate) db: DbConn,
}

impl PostgresBlogPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BlogPostRepository for PostgresBlogPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<BlogPost>, RepoError> {
        let result = BlogPostEntity::find_by_id(id)
            .find_also_related(CategoryEntity)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(|(post, category)| post.into_domain(category)))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, RepoError> {
        tracing::debug!(slug, "Finding blog post by slug");

        let result = BlogPostEntity::find()
            .filter(blog_post::Column::Slug.eq(slug))
            .find_also_related(CategoryEntity)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(|(post, category)| post.into_domain(category)))
    }

    async fn list(&self, query: &PostQuery) -> Result<Page<BlogPost>, RepoError> {
        let mut select = BlogPostEntity::find();
        if let Some(author_id) = query.author_id {
            select = select.filter(blog_post::Column::AuthorId.eq(author_id));
        }

        let total_count = select.clone().count(&self.db).await.map_err(map_db_err)?;

        let order = if query.star_sort {
            blog_post::Column::Star
        } else {
            blog_post::Column::DatePosted
        };

        let rows = select
            .order_by_desc(order)
            .order_by_desc(blog_post::Column::Id)
            .offset(query.offset())
            .limit(query.page_size)
            .find_also_related(CategoryEntity)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(Page {
            items: rows
                .into_iter()
                .map(|(post, category)| post.into_domain(category))
                .collect(),
            metadata: PaginationMetadata::new(total_count, query.page_number, query.page_size),
        })
    }

    async fn insert(&self, draft: NewBlogPost) -> Result<BlogPost, RepoError> {
        let now = Utc::now();
        let model = blog_post::ActiveModel {
            id: NotSet,
            title: Set(draft.title),
            slug: Set(String::new()),
            excerpt: Set(draft.excerpt),
            content: Set(draft.content),
            star: Set(0),
            author_id: Set(draft.author_id),
            category_id: Set(draft.category_id),
            date_posted: Set(now.into()),
            date_updated: Set(now.into()),
        }
        .insert(&self.db)
        .await
        .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn set_slug(&self, id: i64, slug: &str) -> Result<(), RepoError> {
        let result = BlogPostEntity::update_many()
            .col_expr(blog_post::Column::Slug, Expr::value(slug))
            .filter(blog_post::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn update(&self, id: i64, changes: BlogPostChanges) -> Result<BlogPost, RepoError> {
        blog_post::ActiveModel {
            id: Set(id),
            title: Set(changes.title),
            slug: Set(changes.slug),
            excerpt: Set(changes.excerpt),
            content: Set(changes.content),
            category_id: Set(changes.category_id),
            date_updated: Set(Utc::now().into()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(map_db_err)?;

        // The write returns bare columns; read back with the joined category.
        self.find_by_id(id).await?.ok_or(RepoError::NotFound)
    }

    async fn delete_cascade(
        &self,
        id: i64,
        plan: &[Dependent],
    ) -> Result<CascadeReport, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        let mut report = CascadeReport::default();

        for dependent in plan {
            let result = match dependent {
                Dependent::SubComments => {
                    let post_comments = Query::select()
                        .column(comment::Column::Id)
                        .from(CommentEntity)
                        .and_where(comment::Column::BlogPostId.eq(id))
                        .to_owned();

                    SubCommentEntity::delete_many()
                        .filter(sub_comment::Column::CommentId.in_subquery(post_comments))
                        .exec(&txn)
                        .await
                }
                Dependent::Comments => {
                    CommentEntity::delete_many()
                        .filter(comment::Column::BlogPostId.eq(id))
                        .exec(&txn)
                        .await
                }
                Dependent::Stars => {
                    StarEntity::delete_many()
                        .filter(star::Column::BlogPostId.eq(id))
                        .exec(&txn)
                        .await
                }
            }
            .map_err(map_db_err)?;

            tracing::debug!(post_id = id, ?dependent, rows = result.rows_affected, "Purged dependents");
            report.record(*dependent, result.rows_affected);
        }

        let result = BlogPostEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        txn.commit().await.map_err(map_db_err)?;
        Ok(report)
    }
}

/// PostgreSQL star repository.
pub struct PostgresStarRepository {
    pub(crate) db: DbConn,
}

impl PostgresStarRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StarRepository for PostgresStarRepository {
    async fn exists(&self, star: &Star) -> Result<bool, RepoError> {
        let found = StarEntity::find_by_id((star.blog_post_id, star.user_id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(found.is_some())
    }

    async fn count_for_post(&self, blog_post_id: i64) -> Result<u64, RepoError> {
        StarEntity::find()
            .filter(star::Column::BlogPostId.eq(blog_post_id))
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }

    async fn commit(&self, change: StarChange) -> Result<(), RepoError> {
        let star = *change.star();
        let txn = self.db.begin().await.map_err(map_db_err)?;

        match change {
            StarChange::Add(_) => {
                StarEntity::insert(star::ActiveModel::from(star))
                    .exec_without_returning(&txn)
                    .await
                    .map_err(map_db_err)?;
            }
            StarChange::Remove(_) => {
                let result = StarEntity::delete_by_id((star.blog_post_id, star.user_id))
                    .exec(&txn)
                    .await
                    .map_err(map_db_err)?;

                // Already removed by a concurrent toggle.
                if result.rows_affected == 0 {
                    return Err(RepoError::NotFound);
                }
            }
        }

        // Adjust in SQL so concurrent commits never overwrite each other's count.
        let result = BlogPostEntity::update_many()
            .col_expr(
                blog_post::Column::Star,
                Expr::col(blog_post::Column::Star).add(change.delta()),
            )
            .filter(blog_post::Column::Id.eq(star.blog_post_id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        txn.commit().await.map_err(map_db_err)?;
        Ok(())
    }
}
