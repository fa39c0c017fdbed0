//! Home content entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use inforum_core::domain::{Home, NewHome};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "home")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub image_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Home {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            image_url: model.image_url,
        }
    }
}

impl From<Home> for ActiveModel {
    fn from(home: Home) -> Self {
        Self {
            id: Set(home.id),
            title: Set(home.title),
            description: Set(home.description),
            image_url: Set(home.image_url),
        }
    }
}

impl From<NewHome> for ActiveModel {
    fn from(home: NewHome) -> Self {
        Self {
            id: NotSet,
            title: Set(home.title),
            description: Set(home.description),
            image_url: Set(home.image_url),
        }
    }
}
