use axum::response::{IntoResponse, Response};

use imagevault_http::Problem;
use imagevault_security::AccessDenied;

/// Terminal authentication and authorization failures.
///
/// Each variant maps to exactly one HTTP status; the missing-header and
/// invalid-credential cases are kept distinct because they must produce
/// different status codes.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The `Authorization` header is missing or not of the shape
    /// `Bearer <token>`.
    #[error("missing or malformed authorization header")]
    Unauthenticated,

    /// The token had the right shape but failed signature or expiry checks.
    #[error("invalid or expired credential")]
    InvalidCredential,

    /// Authenticated, but denied by a capability or ownership check.
    #[error("access denied: {0}")]
    Forbidden(#[from] AccessDenied),

    #[error("internal auth error: {0}")]
    Internal(String),
}

impl AuthError {
    fn to_problem(&self) -> Problem {
        match self {
            Self::Unauthenticated => {
                Problem::unauthorized("Missing or invalid Authorization header")
            }
            Self::InvalidCredential => Problem::forbidden("Credential rejected"),
            Self::Forbidden(denied) => Problem::forbidden(denied.to_string()),
            Self::Internal(_) => Problem::internal("Internal authentication error"),
        }
    }
}

/// Log at a level matching severity: denials are routine, internal errors
/// are not.
fn log_auth_error(err: &AuthError) {
    match err {
        AuthError::Unauthenticated | AuthError::InvalidCredential | AuthError::Forbidden(_) => {
            tracing::debug!("auth rejected: {err}");
        }
        AuthError::Internal(msg) => tracing::error!("auth internal error: {msg}"),
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        log_auth_error(&self);
        self.to_problem().into_response()
    }
}
