use std::sync::Arc;

use axum::Json;
use axum::extract::Extension;
use axum::http::StatusCode;
use tracing::info;

use imagevault_auth::Authz;
use imagevault_http::ApiResult;

use crate::api::rest::dto::{
    CreateImageRequest, ImageDto, PatchImageRequest, ReplaceImageRequest,
};
use crate::api::rest::loader::LoadedImage;
use crate::api::rest::routes::ConcreteService;

/// List all images.
#[tracing::instrument(skip(svc, ctx))]
#[axum::debug_handler]
pub async fn list_images(
    Authz(ctx): Authz,
    Extension(svc): Extension<Arc<ConcreteService>>,
) -> ApiResult<Json<Vec<ImageDto>>> {
    let images = svc.list(&ctx).await?;

    Ok(Json(images.into_iter().map(ImageDto::from).collect()))
}

/// Create a new image owned by the caller.
#[tracing::instrument(skip(svc, ctx, body), fields(image_url = %body.image_url))]
#[axum::debug_handler]
pub async fn create_image(
    Authz(ctx): Authz,
    Extension(svc): Extension<Arc<ConcreteService>>,
    Json(body): Json<CreateImageRequest>,
) -> ApiResult<(StatusCode, Json<ImageDto>)> {
    info!(subject = %ctx.subject_id(), "creating image");

    let image = svc.create(&ctx, body.into()).await?;

    Ok((StatusCode::CREATED, Json(image.into())))
}

/// Fetch one image by id.
#[tracing::instrument(skip(svc, ctx, image), fields(image_id = %image.0.id))]
#[axum::debug_handler]
pub async fn get_image(
    Authz(ctx): Authz,
    Extension(image): Extension<LoadedImage>,
    Extension(svc): Extension<Arc<ConcreteService>>,
) -> ApiResult<Json<ImageDto>> {
    let image = svc.get(&ctx, image.0).await?;

    Ok(Json(image.into()))
}

/// Replace an image's mutable fields (PUT semantics).
#[tracing::instrument(skip(svc, ctx, image, body), fields(image_id = %image.0.id))]
#[axum::debug_handler]
pub async fn replace_image(
    Authz(ctx): Authz,
    Extension(image): Extension<LoadedImage>,
    Extension(svc): Extension<Arc<ConcreteService>>,
    Json(body): Json<ReplaceImageRequest>,
) -> ApiResult<Json<ImageDto>> {
    let image = svc.replace(&ctx, image.0, body.into()).await?;

    Ok(Json(image.into()))
}

/// Partially update an image (PATCH semantics).
#[tracing::instrument(skip(svc, ctx, image, body), fields(image_id = %image.0.id))]
#[axum::debug_handler]
pub async fn patch_image(
    Authz(ctx): Authz,
    Extension(image): Extension<LoadedImage>,
    Extension(svc): Extension<Arc<ConcreteService>>,
    Json(body): Json<PatchImageRequest>,
) -> ApiResult<Json<ImageDto>> {
    let image = svc.patch(&ctx, image.0, body.into()).await?;

    Ok(Json(image.into()))
}

/// Delete an image.
#[tracing::instrument(skip(svc, ctx, image), fields(image_id = %image.0.id))]
#[axum::debug_handler]
pub async fn delete_image(
    Authz(ctx): Authz,
    Extension(image): Extension<LoadedImage>,
    Extension(svc): Extension<Arc<ConcreteService>>,
) -> ApiResult<StatusCode> {
    svc.delete(&ctx, &image.0).await?;

    Ok(StatusCode::NO_CONTENT)
}
