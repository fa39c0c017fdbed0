//! Comment entity for SeaORM.

use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use inforum_core::domain::{Comment, NewComment};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(indexed)]
    pub blog_post_id: i64,
    pub user_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub date_posted: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::blog_post::Entity",
        from = "Column::BlogPostId",
        to = "super::blog_post::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    BlogPost,
    #[sea_orm(has_many = "super::sub_comment::Entity")]
    SubComments,
}

impl Related<super::blog_post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BlogPost.def()
    }
}

impl Related<super::sub_comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubComments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Comment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            blog_post_id: model.blog_post_id,
            user_id: model.user_id,
            content: model.content,
            date_posted: model.date_posted.into(),
        }
    }
}

impl From<Comment> for ActiveModel {
    fn from(comment: Comment) -> Self {
        Self {
            id: Set(comment.id),
            blog_post_id: Set(comment.blog_post_id),
            user_id: Set(comment.user_id),
            content: Set(comment.content),
            date_posted: Set(comment.date_posted.into()),
        }
    }
}

impl From<NewComment> for ActiveModel {
    fn from(comment: NewComment) -> Self {
        Self {
            id: NotSet,
            blog_post_id: Set(comment.blog_post_id),
            user_id: Set(comment.user_id),
            content: Set(comment.content),
            date_posted: Set(Utc::now().into()),
        }
    }
}
