use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored image record referencing an externally-hosted binary.
///
/// `owner` is the identity of the creating subject and is immutable for the
/// lifetime of the record; mutation and deletion are gated on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: Uuid,
    pub image_url: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub owner: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating an image. The owner is never client-supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImage {
    pub image_url: String,
    pub description: Option<String>,
    pub location: Option<String>,
}

/// Full replacement of the mutable fields (PUT semantics).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReplacement {
    pub image_url: String,
    pub description: Option<String>,
    pub location: Option<String>,
}

/// Partial update (PATCH semantics); absent fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImagePatch {
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
}
