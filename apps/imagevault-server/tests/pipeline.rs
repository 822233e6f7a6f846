#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end tests for the authorization pipeline.
//!
//! Each request passes through: resource loader → authentication →
//! capability check → ownership guard → handler. These tests drive the exact
//! router the binary serves and pin down the terminal status of every stage,
//! including the deliberate loader-before-authentication ordering.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use imagevault_auth::AuthConfig;
use imagevault_server::app::build_router;
use imagevault_server::config::{AppConfig, DatabaseConfig, ServerConfig};
use imagevault_security::Capability;
use images::ImagesConfig;

const SECRET_B64: &str = "cGlwZWxpbmUtdGVzdC1zZWNyZXQ=";

fn test_config(images: ImagesConfig) -> AppConfig {
    AppConfig {
        server: ServerConfig::default(),
        database: DatabaseConfig::default(),
        auth: AuthConfig::new(SECRET_B64),
        images,
    }
}

async fn test_app_with(images: ImagesConfig) -> Router {
    use sea_orm_migration::MigratorTrait;

    let mut opts = sea_orm::ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1);
    let db = sea_orm::Database::connect(opts).await.unwrap();
    images::infra::storage::migrations::Migrator::up(&db, None)
        .await
        .unwrap();

    build_router(db, &test_config(images)).unwrap()
}

async fn test_app() -> Router {
    test_app_with(ImagesConfig::default()).await
}

fn token(subject: &str, permission_level: Option<u32>) -> String {
    let mut claims = serde_json::json!({
        "sub": subject,
        "exp": 4_102_444_800u64,
    });
    if let Some(level) = permission_level {
        claims["permission_level"] = level.into();
    }
    let key = jsonwebtoken::EncodingKey::from_base64_secret(SECRET_B64).unwrap();
    jsonwebtoken::encode(
        &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
        &claims,
        &key,
    )
    .unwrap()
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

fn json_request(
    method: &str,
    uri: &str,
    auth: Option<&str>,
    body: &serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn bare_request(method: &str, uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Creates an image as `subject` (with full capabilities) and returns its id.
async fn create_image(app: &Router, subject: &str) -> String {
    let auth = bearer(&token(subject, Some(Capability::ALL.bits())));
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/images/v1/images",
            Some(&auth),
            &serde_json::json!({
                "image_url": "https://images.example.com/cat.png",
                "description": "a cat",
                "location": "Oslo",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    body["id"].as_str().unwrap().to_owned()
}

// =========================================================================
// Authentication stage
// =========================================================================

#[tokio::test]
async fn healthz_is_public() {
    let response = test_app()
        .await
        .oneshot(bare_request("GET", "/healthz", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_header_terminates_with_401() {
    let response = test_app()
        .await
        .oneshot(bare_request("GET", "/images/v1/images", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_bearer_scheme_terminates_with_401() {
    let response = test_app()
        .await
        .oneshot(bare_request(
            "GET",
            "/images/v1/images",
            Some("Basic dXNlcjpwYXNz"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn invalid_signature_terminates_with_403_distinct_from_401() {
    // Valid shape, wrong key.
    let forged = {
        let key =
            jsonwebtoken::EncodingKey::from_base64_secret("d3Jvbmctc2VjcmV0").unwrap();
        jsonwebtoken::encode(
            &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
            &serde_json::json!({"sub": "a@x.com", "permission_level": 15, "exp": 4_102_444_800u64}),
            &key,
        )
        .unwrap()
    };

    let response = test_app()
        .await
        .oneshot(bare_request(
            "GET",
            "/images/v1/images",
            Some(&bearer(&forged)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// =========================================================================
// Resource loader stage (runs before authentication)
// =========================================================================

#[tokio::test]
async fn unknown_id_without_credentials_is_404_not_401() {
    let uri = format!("/images/v1/images/{}", uuid::Uuid::new_v4());
    let response = test_app()
        .await
        .oneshot(bare_request("GET", &uri, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unparseable_id_is_404() {
    let response = test_app()
        .await
        .oneshot(bare_request("GET", "/images/v1/images/not-a-uuid", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn existing_id_without_credentials_is_401() {
    let app = test_app().await;
    let id = create_image(&app, "a@x.com").await;

    // The loader resolves the record, then authentication terminates.
    let response = app
        .oneshot(bare_request(
            "GET",
            &format!("/images/v1/images/{id}"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// =========================================================================
// Capability stage
// =========================================================================

#[tokio::test]
async fn read_only_owner_cannot_update_own_image() {
    let app = test_app().await;
    let id = create_image(&app, "a@x.com").await;

    // Ownership would pass; the capability gate denies first.
    let auth = bearer(&token("a@x.com", Some(Capability::READ.bits())));
    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/images/v1/images/{id}"),
            Some(&auth),
            &serde_json::json!({"image_url": "https://images.example.com/dog.png"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert!(body["detail"].as_str().unwrap().contains("capability"));
}

#[tokio::test]
async fn absent_permission_level_denies_every_capability_route() {
    let app = test_app().await;
    let auth = bearer(&token("a@x.com", None));

    let response = app
        .oneshot(bare_request("GET", "/images/v1/images", Some(&auth)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// =========================================================================
// Ownership stage
// =========================================================================

#[tokio::test]
async fn full_capabilities_cannot_delete_someone_elses_image() {
    let app = test_app().await;
    let id = create_image(&app, "b@y.com").await;

    // All four bits set; the ownership gate still denies.
    let auth = bearer(&token("a@x.com", Some(Capability::ALL.bits())));
    let response = app
        .oneshot(bare_request(
            "DELETE",
            &format!("/images/v1/images/{id}"),
            Some(&auth),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert!(body["detail"].as_str().unwrap().contains("owner"));
}

#[tokio::test]
async fn non_owner_cannot_fetch_by_id() {
    let app = test_app().await;
    let id = create_image(&app, "b@y.com").await;

    let auth = bearer(&token("a@x.com", Some(Capability::ALL.bits())));
    let response = app
        .oneshot(bare_request(
            "GET",
            &format!("/images/v1/images/{id}"),
            Some(&auth),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// =========================================================================
// Full pipeline
// =========================================================================

#[tokio::test]
async fn crud_happy_path() {
    let app = test_app().await;
    let auth = bearer(&token("a@x.com", Some(Capability::ALL.bits())));

    // Create: the owner is the creating subject, never client-supplied.
    let id = create_image(&app, "a@x.com").await;

    // List.
    let response = app
        .clone()
        .oneshot(bare_request("GET", "/images/v1/images", Some(&auth)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    // Get: subject claims round-trip into the stored owner.
    let response = app
        .clone()
        .oneshot(bare_request(
            "GET",
            &format!("/images/v1/images/{id}"),
            Some(&auth),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched["owner"], "a@x.com");
    assert_eq!(fetched["description"], "a cat");

    // Patch only the location.
    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/images/v1/images/{id}"),
            Some(&auth),
            &serde_json::json!({"location": "Bergen"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let patched = body_json(response).await;
    assert_eq!(patched["location"], "Bergen");
    assert_eq!(patched["description"], "a cat");

    // Delete.
    let response = app
        .clone()
        .oneshot(bare_request(
            "DELETE",
            &format!("/images/v1/images/{id}"),
            Some(&auth),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Gone: the loader now terminates with 404.
    let response = app
        .oneshot(bare_request(
            "GET",
            &format!("/images/v1/images/{id}"),
            Some(&auth),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_body_is_422() {
    let app = test_app().await;
    let auth = bearer(&token("a@x.com", Some(Capability::ALL.bits())));

    let response = app
        .oneshot(json_request(
            "POST",
            "/images/v1/images",
            Some(&auth),
            &serde_json::json!({"image_url": "not a url"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// =========================================================================
// Capability assignment is configuration
// =========================================================================

#[tokio::test]
async fn capability_bits_can_be_remapped_per_route() {
    // A deployment that gates deletion on READ, like the older router
    // variants that reused one bit everywhere.
    let mut images_cfg = ImagesConfig::default();
    images_cfg.capabilities.delete = Capability::READ;
    let app = test_app_with(images_cfg).await;

    let id = create_image(&app, "a@x.com").await;

    let auth = bearer(&token("a@x.com", Some(Capability::READ.bits())));
    let response = app
        .oneshot(bare_request(
            "DELETE",
            &format!("/images/v1/images/{id}"),
            Some(&auth),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
