//! Resource loader middleware.
//!
//! Resolves the `{id}` path segment into a stored [`Image`] and attaches it
//! to the request before authentication runs. An unknown or unparseable id is
//! a terminal 404 for every caller, authenticated or not — the loader is the
//! first stage of the pipeline and does not consult the subject.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use imagevault_http::Problem;

use crate::api::rest::routes::{ConcreteService, IMAGE_BY_ID_PATH};
use crate::domain::error::DomainError;
use crate::domain::model::Image;

/// The resource instance resolved from the request path.
#[derive(Debug, Clone)]
pub struct LoadedImage(pub Image);

/// Shared state for the resource loader middleware.
#[derive(Clone)]
pub struct LoaderState {
    service: Arc<ConcreteService>,
    matcher: Arc<matchit::Router<()>>,
}

impl LoaderState {
    pub fn new(service: Arc<ConcreteService>) -> Result<Self, matchit::InsertError> {
        let mut matcher = matchit::Router::new();
        matcher.insert(IMAGE_BY_ID_PATH, ())?;
        Ok(Self {
            service,
            matcher: Arc::new(matcher),
        })
    }
}

/// Loads the image named by the request path, if any.
///
/// Requests whose path does not carry an id pass through untouched.
pub async fn load_image(
    State(state): State<LoaderState>,
    mut req: Request,
    next: Next,
) -> Response {
    let raw_id = state
        .matcher
        .at(req.uri().path())
        .ok()
        .and_then(|matched| matched.params.get("id").map(ToOwned::to_owned));

    let Some(raw_id) = raw_id else {
        return next.run(req).await;
    };

    // An identifier that does not parse can never match a stored key.
    let Ok(id) = raw_id.parse::<Uuid>() else {
        return not_found().into_response();
    };

    match state.service.load(id).await {
        Ok(image) => {
            req.extensions_mut().insert(LoadedImage(image));
            next.run(req).await
        }
        Err(DomainError::NotFound) => not_found().into_response(),
        Err(err) => Problem::from(err).into_response(),
    }
}

fn not_found() -> Problem {
    Problem::not_found("Image not found")
}
