use async_trait::async_trait;
use sea_orm::ConnectionTrait;
use uuid::Uuid;

use super::error::DomainError;
use super::model::Image;

/// Persistence port for image records.
///
/// Lookup is a primary-key equality query; the repository knows nothing about
/// subjects or capabilities.
#[async_trait]
pub trait ImagesRepository: Send + Sync {
    async fn find_by_id<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: Uuid,
    ) -> Result<Option<Image>, DomainError>;

    async fn list_all<C: ConnectionTrait>(&self, conn: &C) -> Result<Vec<Image>, DomainError>;

    async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        image: &Image,
    ) -> Result<(), DomainError>;

    async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        image: &Image,
    ) -> Result<(), DomainError>;

    async fn delete<C: ConnectionTrait>(&self, conn: &C, id: Uuid) -> Result<bool, DomainError>;
}
