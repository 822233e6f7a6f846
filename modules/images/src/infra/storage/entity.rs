use sea_orm::entity::prelude::*;

use crate::domain::model::Image;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "images")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub image_url: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub owner: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Image {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            image_url: model.image_url,
            description: model.description,
            location: model.location,
            owner: model.owner,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&Image> for ActiveModel {
    fn from(image: &Image) -> Self {
        use sea_orm::ActiveValue::Set;
        Self {
            id: Set(image.id),
            image_url: Set(image.image_url.clone()),
            description: Set(image.description.clone()),
            location: Set(image.location.clone()),
            owner: Set(image.owner.clone()),
            created_at: Set(image.created_at),
            updated_at: Set(image.updated_at),
        }
    }
}
