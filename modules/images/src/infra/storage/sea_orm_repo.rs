use async_trait::async_trait;
use sea_orm::{ConnectionTrait, EntityTrait, QueryOrder};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::model::Image;
use crate::domain::repo::ImagesRepository;

use super::entity::{ActiveModel, Column, Entity as ImageEntity};

/// ORM-based implementation of the `ImagesRepository` trait.
#[derive(Clone, Default)]
pub struct OrmImagesRepository;

impl OrmImagesRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ImagesRepository for OrmImagesRepository {
    async fn find_by_id<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: Uuid,
    ) -> Result<Option<Image>, DomainError> {
        let found = ImageEntity::find_by_id(id).one(conn).await?;
        Ok(found.map(Into::into))
    }

    async fn list_all<C: ConnectionTrait>(&self, conn: &C) -> Result<Vec<Image>, DomainError> {
        let models = ImageEntity::find()
            .order_by_desc(Column::CreatedAt)
            .all(conn)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        image: &Image,
    ) -> Result<(), DomainError> {
        let model = ActiveModel::from(image);
        ImageEntity::insert(model).exec(conn).await?;
        Ok(())
    }

    async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        image: &Image,
    ) -> Result<(), DomainError> {
        let model = ActiveModel::from(image);
        ImageEntity::update(model).exec(conn).await?;
        Ok(())
    }

    async fn delete<C: ConnectionTrait>(&self, conn: &C, id: Uuid) -> Result<bool, DomainError> {
        let result = ImageEntity::delete_by_id(id).exec(conn).await?;
        Ok(result.rows_affected > 0)
    }
}
