use std::sync::Arc;

use chrono::Utc;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use imagevault_security::{SecurityContext, require_owner};

use super::error::DomainError;
use super::model::{Image, ImagePatch, ImageReplacement, NewImage};
use super::repo::ImagesRepository;

/// Hard ceiling for stored URLs regardless of configuration.
const MAX_URL_LENGTH: usize = 2048;

// ============================================================================
// Service Configuration
// ============================================================================

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub max_description_length: usize,
    pub max_location_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_description_length: 500,
            max_location_length: 200,
        }
    }
}

impl From<&crate::config::ImagesConfig> for ServiceConfig {
    fn from(cfg: &crate::config::ImagesConfig) -> Self {
        Self {
            max_description_length: cfg.max_description_length,
            max_location_length: cfg.max_location_length,
        }
    }
}

// ============================================================================
// Service Implementation
// ============================================================================

/// Domain service for image records.
///
/// Capability checks run upstream in the auth middleware; this service owns
/// the second authorization axis, per-instance ownership, plus validation and
/// persistence orchestration.
pub struct Service<R: ImagesRepository> {
    db: DatabaseConnection,
    repo: Arc<R>,
    config: ServiceConfig,
}

impl<R: ImagesRepository> Service<R> {
    pub fn new(db: DatabaseConnection, repo: Arc<R>, config: ServiceConfig) -> Self {
        Self { db, repo, config }
    }

    /// Resolves a path identifier into a stored record.
    ///
    /// Runs before authentication in the request pipeline, so it must not
    /// consult the subject; an unknown id is `NotFound` for every caller.
    pub async fn load(&self, id: Uuid) -> Result<Image, DomainError> {
        self.repo
            .find_by_id(&self.db, id)
            .await?
            .ok_or(DomainError::NotFound)
    }

    pub async fn list(&self, _ctx: &SecurityContext) -> Result<Vec<Image>, DomainError> {
        self.repo.list_all(&self.db).await
    }

    pub async fn create(
        &self,
        ctx: &SecurityContext,
        new_image: NewImage,
    ) -> Result<Image, DomainError> {
        self.validate_image_url(&new_image.image_url)?;
        self.validate_description(new_image.description.as_deref())?;
        self.validate_location(new_image.location.as_deref())?;

        let now = Utc::now();
        let image = Image {
            id: Uuid::new_v4(),
            image_url: new_image.image_url,
            description: new_image.description.map(|d| d.trim().to_owned()),
            location: new_image.location,
            owner: ctx.subject_id().to_owned(),
            created_at: now,
            updated_at: now,
        };

        self.repo.insert(&self.db, &image).await?;
        Ok(image)
    }

    pub async fn get(
        &self,
        ctx: &SecurityContext,
        image: Image,
    ) -> Result<Image, DomainError> {
        require_owner(ctx, &image.owner)?;
        Ok(image)
    }

    pub async fn replace(
        &self,
        ctx: &SecurityContext,
        mut image: Image,
        replacement: ImageReplacement,
    ) -> Result<Image, DomainError> {
        require_owner(ctx, &image.owner)?;

        self.validate_image_url(&replacement.image_url)?;
        self.validate_description(replacement.description.as_deref())?;
        self.validate_location(replacement.location.as_deref())?;

        image.image_url = replacement.image_url;
        image.description = replacement.description.map(|d| d.trim().to_owned());
        image.location = replacement.location;
        image.updated_at = Utc::now();

        self.repo.update(&self.db, &image).await?;
        Ok(image)
    }

    pub async fn patch(
        &self,
        ctx: &SecurityContext,
        mut image: Image,
        patch: ImagePatch,
    ) -> Result<Image, DomainError> {
        require_owner(ctx, &image.owner)?;

        if let Some(ref image_url) = patch.image_url {
            self.validate_image_url(image_url)?;
        }
        self.validate_description(patch.description.as_deref())?;
        self.validate_location(patch.location.as_deref())?;

        if let Some(image_url) = patch.image_url {
            image.image_url = image_url;
        }
        if let Some(description) = patch.description {
            image.description = Some(description.trim().to_owned());
        }
        if let Some(location) = patch.location {
            image.location = Some(location);
        }
        image.updated_at = Utc::now();

        self.repo.update(&self.db, &image).await?;
        Ok(image)
    }

    pub async fn delete(&self, ctx: &SecurityContext, image: &Image) -> Result<(), DomainError> {
        require_owner(ctx, &image.owner)?;

        let deleted = self.repo.delete(&self.db, image.id).await?;
        if deleted { Ok(()) } else { Err(DomainError::NotFound) }
    }

    fn validate_image_url(&self, image_url: &str) -> Result<(), DomainError> {
        if image_url.len() > MAX_URL_LENGTH {
            return Err(DomainError::validation(
                "image_url",
                format!("exceeds maximum length of {MAX_URL_LENGTH}"),
            ));
        }
        url::Url::parse(image_url)
            .map_err(|e| DomainError::validation("image_url", e.to_string()))?;
        Ok(())
    }

    fn validate_description(&self, description: Option<&str>) -> Result<(), DomainError> {
        let Some(description) = description else {
            return Ok(());
        };
        if description.trim().is_empty() {
            return Err(DomainError::validation("description", "must not be empty"));
        }
        if description.len() > self.config.max_description_length {
            return Err(DomainError::validation(
                "description",
                format!(
                    "exceeds maximum length of {}",
                    self.config.max_description_length
                ),
            ));
        }
        Ok(())
    }

    fn validate_location(&self, location: Option<&str>) -> Result<(), DomainError> {
        let Some(location) = location else {
            return Ok(());
        };
        if location.len() > self.config.max_location_length {
            return Err(DomainError::validation(
                "location",
                format!(
                    "exceeds maximum length of {}",
                    self.config.max_location_length
                ),
            ));
        }
        Ok(())
    }
}
