//! Sub-comment (reply) entity for SeaORM.

use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use inforum_core::domain::{NewSubComment, SubComment};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sub_comments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(indexed)]
    pub comment_id: i64,
    pub user_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub date_posted: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::comment::Entity",
        from = "Column::CommentId",
        to = "super::comment::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Comment,
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SubComment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            comment_id: model.comment_id,
            user_id: model.user_id,
            content: model.content,
            date_posted: model.date_posted.into(),
        }
    }
}

impl From<SubComment> for ActiveModel {
    fn from(reply: SubComment) -> Self {
        Self {
            id: Set(reply.id),
            comment_id: Set(reply.comment_id),
            user_id: Set(reply.user_id),
            content: Set(reply.content),
            date_posted: Set(reply.date_posted.into()),
        }
    }
}

impl From<NewSubComment> for ActiveModel {
    fn from(reply: NewSubComment) -> Self {
        Self {
            id: NotSet,
            comment_id: Set(reply.comment_id),
            user_id: Set(reply.user_id),
            content: Set(reply.content),
            date_posted: Set(Utc::now().into()),
        }
    }
}
