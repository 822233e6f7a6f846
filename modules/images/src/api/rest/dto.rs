use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::model::{Image, ImagePatch, ImageReplacement, NewImage};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageDto {
    pub id: Uuid,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub owner: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Image> for ImageDto {
    fn from(image: Image) -> Self {
        Self {
            id: image.id,
            image_url: image.image_url,
            description: image.description,
            location: image.location,
            owner: image.owner,
            created_at: image.created_at,
            updated_at: image.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateImageRequest {
    pub image_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl From<CreateImageRequest> for NewImage {
    fn from(req: CreateImageRequest) -> Self {
        Self {
            image_url: req.image_url,
            description: req.description,
            location: req.location,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplaceImageRequest {
    pub image_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl From<ReplaceImageRequest> for ImageReplacement {
    fn from(req: ReplaceImageRequest) -> Self {
        Self {
            image_url: req.image_url,
            description: req.description,
            location: req.location,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatchImageRequest {
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl From<PatchImageRequest> for ImagePatch {
    fn from(req: PatchImageRequest) -> Self {
        Self {
            image_url: req.image_url,
            description: req.description,
            location: req.location,
        }
    }
}
