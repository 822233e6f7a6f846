use imagevault_http::Problem;

use crate::domain::error::DomainError;

/// Convert domain errors to HTTP Problem responses so `?` works in handlers.
impl From<DomainError> for Problem {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound => Problem::not_found("Image not found"),

            DomainError::Validation { field, message } => {
                Problem::unprocessable(format!("Validation error on field '{field}': {message}"))
            }

            DomainError::Forbidden(denied) => Problem::forbidden(denied.to_string()),

            DomainError::Database(e) => {
                tracing::error!(error = %e, "database error");
                Problem::internal("Database error")
            }
        }
    }
}
