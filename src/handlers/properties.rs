use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::Value;

use super::{check_owner, data};
use crate::database::models::{
    CreatePropertyInput, CreateUnitInput, UpdatePropertyInput,
};
use crate::error::ApiError;
use crate::middleware::AuthSession;
use crate::services::properties::PropertiesService;
use crate::services::units::UnitsService;
use crate::state::AppState;
use crate::validation::parse_id;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/owners/properties",
            get(list_properties).post(create_property),
        )
        .route(
            "/api/owners/properties/:id",
            get(get_property).patch(update_property),
        )
        .route(
            "/api/owners/properties/:id/units",
            get(list_units).post(create_unit),
        )
}

/// GET /api/owners/properties - properties with images, units and owner
#[utoipa::path(
    get,
    path = "/api/owners/properties",
    tag = "Properties",
    responses(
        (status = 200, description = "List of properties, in a `data` envelope"),
        (status = 401, description = "No owner attached to the session"),
    )
)]
pub async fn list_properties(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
) -> Result<impl IntoResponse, ApiError> {
    let owner = check_owner(&auth)?;
    let properties = PropertiesService::new(&state.pool)
        .find_all_by_owner(owner.id)
        .await?;
    Ok(data(properties))
}

/// POST /api/owners/properties
#[utoipa::path(
    post,
    path = "/api/owners/properties",
    tag = "Properties",
    responses(
        (status = 201, description = "Property created"),
        (status = 401, description = "No owner attached to the session"),
        (status = 409, description = "Address already registered"),
        (status = 422, description = "Validation error(s)"),
    )
)]
pub async fn create_property(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let input = CreatePropertyInput::from_json(&body)?;
    let owner = check_owner(&auth)?;
    let property = PropertiesService::new(&state.pool)
        .create(owner.id, &input)
        .await?;
    Ok((StatusCode::CREATED, data(property)))
}

/// GET /api/owners/properties/{id}
#[utoipa::path(
    get,
    path = "/api/owners/properties/{id}",
    tag = "Properties",
    responses(
        (status = 200, description = "Property details"),
        (status = 404, description = "Property not found"),
        (status = 422, description = "Invalid ID"),
    )
)]
pub async fn get_property(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let owner = check_owner(&auth)?;
    let property = PropertiesService::new(&state.pool)
        .find_one(id, owner.id)
        .await?;
    Ok(data(property))
}

/// PATCH /api/owners/properties/{id}
#[utoipa::path(
    patch,
    path = "/api/owners/properties/{id}",
    tag = "Properties",
    responses(
        (status = 200, description = "Property updated"),
        (status = 404, description = "Property not found"),
        (status = 422, description = "Validation error(s)"),
    )
)]
pub async fn update_property(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let input = UpdatePropertyInput::from_json(&body)?;
    let id = parse_id(&id)?;
    let owner = check_owner(&auth)?;
    let property = PropertiesService::new(&state.pool)
        .update(id, owner.id, &input)
        .await?;
    Ok(data(property))
}

/// GET /api/owners/properties/{id}/units
#[utoipa::path(
    get,
    path = "/api/owners/properties/{id}/units",
    tag = "Units",
    responses(
        (status = 200, description = "Units of the property"),
        (status = 404, description = "Property not found"),
        (status = 422, description = "Invalid ID"),
    )
)]
pub async fn list_units(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let owner = check_owner(&auth)?;
    let units = UnitsService::new(&state.pool)
        .find_all_for_property(id, owner.id)
        .await?;
    Ok(data(units))
}

/// POST /api/owners/properties/{id}/units
#[utoipa::path(
    post,
    path = "/api/owners/properties/{id}/units",
    tag = "Units",
    responses(
        (status = 201, description = "Unit created"),
        (status = 404, description = "Property not found"),
        (status = 409, description = "Unit number already used in this property"),
        (status = 422, description = "Validation error(s)"),
    )
)]
pub async fn create_unit(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let input = CreateUnitInput::from_json(&body)?;
    let id = parse_id(&id)?;
    let owner = check_owner(&auth)?;
    let unit = UnitsService::new(&state.pool)
        .create(id, owner.id, &input)
        .await?;
    Ok((StatusCode::CREATED, data(unit)))
}
