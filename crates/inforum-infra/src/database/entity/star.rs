//! Star entity for SeaORM. The composite key enforces one star per user and post.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use inforum_core::domain::Star;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "stars")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub blog_post_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: Uuid,
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
}

impl Related<super::blog_post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BlogPost.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Star {
    fn from(model: Model) -> Self {
        Star::new(model.blog_post_id, model.user_id)
    }
}

impl From<Star> for ActiveModel {
    fn from(star: Star) -> Self {
        Self {
            blog_post_id: Set(star.blog_post_id),
            user_id: Set(star.user_id),
        }
    }
}
