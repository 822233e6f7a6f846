use std::sync::Arc;

use axum::http::Method;
use axum::routing::get;
use axum::{Extension, Router};

use imagevault_auth::RouteSecurity;

use crate::api::rest::handlers;
use crate::config::ImagesConfig;
use crate::domain::service::Service;
use crate::infra::storage::sea_orm_repo::OrmImagesRepository;

/// Type alias for the concrete service type with ORM repository.
pub type ConcreteService = Service<OrmImagesRepository>;

pub const IMAGES_COLLECTION_PATH: &str = "/images/v1/images";
pub const IMAGE_BY_ID_PATH: &str = "/images/v1/images/{id}";

/// Registers the module's routes on the app router.
///
/// Authentication and resource loading are middleware concerns wired by the
/// server; the handlers only see the context and record those stages attach.
pub fn register_routes(router: Router, service: Arc<ConcreteService>) -> Router {
    router
        .route(
            IMAGES_COLLECTION_PATH,
            get(handlers::list_images).post(handlers::create_image),
        )
        .route(
            IMAGE_BY_ID_PATH,
            get(handlers::get_image)
                .put(handlers::replace_image)
                .patch(handlers::patch_image)
                .delete(handlers::delete_image),
        )
        .layer(Extension(service))
}

/// The module's route security table.
///
/// One entry per operation; the capability each one requires comes from
/// configuration, so the bit assignment is data rather than middleware code.
#[must_use]
pub fn route_security(cfg: &ImagesConfig) -> Vec<RouteSecurity> {
    let caps = &cfg.capabilities;
    vec![
        RouteSecurity::authenticated(Method::GET, IMAGES_COLLECTION_PATH, caps.list),
        RouteSecurity::authenticated(Method::POST, IMAGES_COLLECTION_PATH, caps.create),
        RouteSecurity::authenticated(Method::GET, IMAGE_BY_ID_PATH, caps.get),
        RouteSecurity::authenticated(Method::PUT, IMAGE_BY_ID_PATH, caps.replace),
        RouteSecurity::authenticated(Method::PATCH, IMAGE_BY_ID_PATH, caps.patch),
        RouteSecurity::authenticated(Method::DELETE, IMAGE_BY_ID_PATH, caps.delete),
    ]
}
