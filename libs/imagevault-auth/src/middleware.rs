//! Axum authentication middleware and extractors.

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::{HeaderMap, Method, request::Parts};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use imagevault_security::{SecurityContext, require_capability};

use crate::errors::AuthError;
use crate::jwt::TokenValidator;
use crate::route_policy::{AuthRequirement, RouteCapabilityPolicy};

/// Shared state for the authentication middleware.
#[derive(Clone)]
pub struct AuthState {
    pub validator: Arc<dyn TokenValidator>,
    pub policy: Arc<RouteCapabilityPolicy>,
}

impl AuthState {
    #[must_use]
    pub fn new(validator: Arc<dyn TokenValidator>, policy: Arc<RouteCapabilityPolicy>) -> Self {
        Self { validator, policy }
    }
}

/// Authentication middleware.
///
/// For each request:
/// 1. Skips CORS preflight requests
/// 2. Resolves the route's requirement via [`RouteCapabilityPolicy`]
/// 3. For public routes: inserts an anonymous [`SecurityContext`]
/// 4. For required routes: extracts the bearer token, validates it, runs the
///    capability check if the route declares one, and inserts the
///    [`SecurityContext`] and raw [`Claims`](crate::claims::Claims) for
///    downstream handlers
///
/// Terminal failures: missing/malformed header → 401; signature or expiry
/// failure → 403; capability denial → 403.
pub async fn authn_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Response {
    if is_preflight_request(req.method(), req.headers()) {
        return next.run(req).await;
    }

    let requirement = state.policy.resolve(req.method(), req.uri().path());

    match requirement {
        AuthRequirement::None => {
            req.extensions_mut().insert(SecurityContext::anonymous());
            next.run(req).await
        }
        AuthRequirement::Required(required) => {
            let Some(token) = extract_bearer_token(req.headers()) else {
                return AuthError::Unauthenticated.into_response();
            };

            let claims = match state.validator.validate_and_parse(token).await {
                Ok(claims) => claims,
                Err(err) => return err.into_response(),
            };

            let ctx = claims.to_security_context();

            if let Some(capability) = required
                && let Err(denied) = require_capability(&ctx, capability)
            {
                return AuthError::from(denied).into_response();
            }

            req.extensions_mut().insert(claims);
            req.extensions_mut().insert(ctx);
            next.run(req).await
        }
    }
}

/// Extractor for [`SecurityContext`] — validates that auth middleware has run.
#[derive(Debug, Clone)]
pub struct Authz(pub SecurityContext);

impl<S> FromRequestParts<S> for Authz
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SecurityContext>()
            .cloned()
            .map(Authz)
            .ok_or(AuthError::Internal(
                "SecurityContext not found - auth middleware not configured".to_owned(),
            ))
    }
}

/// Extract Bearer token from Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer ").map(str::trim))
}

/// Check if this is a CORS preflight request
///
/// Preflight requests are OPTIONS requests with:
/// - Origin header present
/// - Access-Control-Request-Method header present
fn is_preflight_request(method: &Method, headers: &HeaderMap) -> bool {
    method == Method::OPTIONS
        && headers.contains_key(axum::http::header::ORIGIN)
        && headers.contains_key(axum::http::header::ACCESS_CONTROL_REQUEST_METHOD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, value.parse().expect("header value"));
        headers
    }

    #[test]
    fn bearer_token_extracted() {
        let headers = headers_with_auth("Bearer abc.def.ghi");
        assert_eq!(extract_bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn non_bearer_scheme_yields_none() {
        let headers = headers_with_auth("Basic dXNlcjpwYXNz");
        assert_eq!(extract_bearer_token(&headers), None);
    }

    #[test]
    fn missing_header_yields_none() {
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn preflight_detection_requires_all_markers() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ORIGIN, "https://x".parse().expect("value"));
        assert!(!is_preflight_request(&Method::OPTIONS, &headers));

        headers.insert(
            header::ACCESS_CONTROL_REQUEST_METHOD,
            "GET".parse().expect("value"),
        );
        assert!(is_preflight_request(&Method::OPTIONS, &headers));
        assert!(!is_preflight_request(&Method::GET, &headers));
    }
}
