use imagevault_security::AccessDenied;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Image not found")]
    NotFound,

    #[error("Validation error on field '{field}': {message}")]
    Validation { field: String, message: String },

    /// Capability or ownership denial. Terminal; never recovered from.
    #[error("Access forbidden: {0}")]
    Forbidden(#[from] AccessDenied),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
