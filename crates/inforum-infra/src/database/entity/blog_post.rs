//! Blog post entity for SeaORM.

use sea_orm::entity::prelude::*;

use inforum_core::domain::BlogPost;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blog_posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(indexed)]
    pub slug: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub excerpt: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub star: i32,
    pub author_id: Uuid,
    pub category_id: Option<i64>,
    pub date_posted: DateTimeWithTimeZone,
    pub date_updated: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Category,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,
    #[sea_orm(has_many = "super::star::Entity")]
    Stars,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl Related<super::star::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stars.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert to the domain post, attaching the joined category if loaded.
    pub fn into_domain(self, category: Option<super::category::Model>) -> BlogPost {
        BlogPost {
            id: self.id,
            title: self.title,
            slug: self.slug,
            excerpt: self.excerpt,
            content: self.content,
            star: self.star,
            author_id: self.author_id,
            category_id: self.category_id,
            category: category.map(Into::into),
            date_posted: self.date_posted.into(),
            date_updated: self.date_updated.into(),
        }
    }
}

/// Conversion from SeaORM Model to Domain BlogPost.
impl From<Model> for BlogPost {
    fn from(model: Model) -> Self {
        model.into_domain(None)
    }
}
