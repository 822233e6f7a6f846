use std::sync::Arc;

use anyhow::Context;
use axum::http::Method;
use axum::routing::get;
use axum::{Router, middleware};
use sea_orm::DatabaseConnection;
use tower_http::trace::TraceLayer;

use imagevault_auth::{
    AuthState, JwtTokenValidator, RouteCapabilityPolicy, RouteSecurity, TokenValidator,
    authn_middleware,
};
use images::api::rest::loader::{LoaderState, load_image};
use images::api::rest::routes as images_routes;
use images::domain::service::{Service, ServiceConfig};
use images::infra::storage::sea_orm_repo::OrmImagesRepository;

use crate::config::AppConfig;

/// Builds the full application router.
///
/// Middleware is layered so that a request passes through the stages in the
/// pipeline order: resource loader, then authentication with its capability
/// check, then the handler (where the ownership guard runs in the domain
/// service). The loader deliberately sits before authentication: a
/// nonexistent resource id yields 404 even for an unauthenticated caller.
pub fn build_router(db: DatabaseConnection, cfg: &AppConfig) -> anyhow::Result<Router> {
    let service = Arc::new(Service::new(
        db,
        Arc::new(OrmImagesRepository::new()),
        ServiceConfig::from(&cfg.images),
    ));

    let mut route_security = vec![RouteSecurity::public(Method::GET, "/healthz")];
    route_security.extend(images_routes::route_security(&cfg.images));

    let policy = Arc::new(RouteCapabilityPolicy::build(
        route_security,
        cfg.auth.require_auth_by_default,
    )?);
    let validator: Arc<dyn TokenValidator> = Arc::new(JwtTokenValidator::new(&cfg.auth)?);
    let auth_state = AuthState::new(validator, policy);

    let loader_state =
        LoaderState::new(service.clone()).context("building resource loader matcher")?;

    let router = Router::new().route("/healthz", get(healthz));
    let router = images_routes::register_routes(router, service);

    // Outermost layer runs first: loader, then authentication.
    Ok(router
        .layer(middleware::from_fn_with_state(auth_state, authn_middleware))
        .layer(middleware::from_fn_with_state(loader_state, load_image))
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> &'static str {
    "ok"
}
