use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Extension, Json, Router};
use serde_json::Value;

use super::{check_owner, data};
use crate::database::models::{CreatePropertyImageInput, UploadUrlInput};
use crate::error::ApiError;
use crate::middleware::AuthSession;
use crate::services::property_images::PropertyImagesService;
use crate::state::AppState;
use crate::validation::parse_id;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/owners/properties/:id/images",
            get(list_images).post(create_images),
        )
        .route(
            "/api/owners/properties/:id/images/presigned-url",
            post(presigned_url),
        )
        .route(
            "/api/owners/properties/:id/images/:image_id",
            delete(delete_image),
        )
}

/// POST /api/owners/properties/{id}/images/presigned-url
#[utoipa::path(
    post,
    path = "/api/owners/properties/{id}/images/presigned-url",
    tag = "Property images",
    responses(
        (status = 200, description = "Upload URL and storage key, valid for five minutes"),
        (status = 404, description = "Property not found"),
        (status = 422, description = "Validation error(s)"),
    )
)]
pub async fn presigned_url(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let input = UploadUrlInput::from_json(&body)?;
    let id = parse_id(&id)?;
    let owner = check_owner(&auth)?;
    let upload = PropertyImagesService::new(&state.pool, state.storage.clone())
        .upload_url(id, owner.id, &input)
        .await?;
    Ok(data(upload))
}

/// POST /api/owners/properties/{id}/images - one image or a batch of up to five
#[utoipa::path(
    post,
    path = "/api/owners/properties/{id}/images",
    tag = "Property images",
    responses(
        (status = 201, description = "Image metadata stored"),
        (status = 404, description = "Property not found"),
        (status = 422, description = "Validation error(s)"),
    )
)]
pub async fn create_images(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let inputs = CreatePropertyImageInput::batch_from_json(&body)?;
    let id = parse_id(&id)?;
    let owner = check_owner(&auth)?;
    let images = PropertyImagesService::new(&state.pool, state.storage.clone())
        .create(id, owner.id, inputs)
        .await?;
    Ok((StatusCode::CREATED, data(images)))
}

/// GET /api/owners/properties/{id}/images
#[utoipa::path(
    get,
    path = "/api/owners/properties/{id}/images",
    tag = "Property images",
    responses(
        (status = 200, description = "Images of the property, newest first"),
        (status = 404, description = "Property not found"),
        (status = 422, description = "Invalid ID"),
    )
)]
pub async fn list_images(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let owner = check_owner(&auth)?;
    let images = PropertyImagesService::new(&state.pool, state.storage.clone())
        .find_all(id, owner.id)
        .await?;
    Ok(data(images))
}

/// DELETE /api/owners/properties/{id}/images/{imageId} - removes the storage
/// object and the row
#[utoipa::path(
    delete,
    path = "/api/owners/properties/{id}/images/{image_id}",
    tag = "Property images",
    responses(
        (status = 200, description = "Image deleted"),
        (status = 404, description = "Property or image not found"),
        (status = 422, description = "Invalid ID"),
    )
)]
pub async fn delete_image(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path((id, image_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let image_id = parse_id(&image_id)?;
    let owner = check_owner(&auth)?;
    let deleted = PropertyImagesService::new(&state.pool, state.storage.clone())
        .delete(image_id, id, owner.id)
        .await?;
    Ok(data(deleted))
}
