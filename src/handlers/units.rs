use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::Value;

use super::{check_owner, data};
use crate::database::models::{CreateLeaseInput, UpdateUnitInput};
use crate::error::ApiError;
use crate::middleware::AuthSession;
use crate::services::units::UnitsService;
use crate::state::AppState;
use crate::validation::parse_id;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/owners/units", get(list_units))
        .route("/api/owners/units/:id", get(get_unit).patch(update_unit))
        .route(
            "/api/owners/units/:id/leases",
            get(list_leases).post(create_lease),
        )
}

/// GET /api/owners/units
#[utoipa::path(
    get,
    path = "/api/owners/units",
    tag = "Units",
    responses(
        (status = 200, description = "List of units"),
        (status = 401, description = "No owner attached to the session"),
    )
)]
pub async fn list_units(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
) -> Result<impl IntoResponse, ApiError> {
    let owner = check_owner(&auth)?;
    let units = UnitsService::new(&state.pool)
        .find_all_by_owner(owner.id)
        .await?;
    Ok(data(units))
}

/// GET /api/owners/units/{id}
#[utoipa::path(
    get,
    path = "/api/owners/units/{id}",
    tag = "Units",
    responses(
        (status = 200, description = "Unit details"),
        (status = 404, description = "Unit not found"),
        (status = 422, description = "Invalid unit ID"),
    )
)]
pub async fn get_unit(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let owner = check_owner(&auth)?;
    let unit = UnitsService::new(&state.pool).find_one(id, owner.id).await?;
    Ok(data(unit))
}

/// PATCH /api/owners/units/{id}
#[utoipa::path(
    patch,
    path = "/api/owners/units/{id}",
    tag = "Units",
    responses(
        (status = 200, description = "Unit updated"),
        (status = 404, description = "Unit not found"),
        (status = 422, description = "Validation error(s)"),
    )
)]
pub async fn update_unit(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let input = UpdateUnitInput::from_json(&body)?;
    let id = parse_id(&id)?;
    let owner = check_owner(&auth)?;
    let unit = UnitsService::new(&state.pool)
        .update(id, owner.id, &input)
        .await?;
    Ok(data(unit))
}

/// GET /api/owners/units/{id}/leases
#[utoipa::path(
    get,
    path = "/api/owners/units/{id}/leases",
    tag = "Units",
    responses(
        (status = 200, description = "Leases of the unit"),
        (status = 404, description = "Unit not found"),
        (status = 422, description = "Invalid unit ID"),
    )
)]
pub async fn list_leases(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let owner = check_owner(&auth)?;
    let leases = UnitsService::new(&state.pool)
        .find_leases(id, owner.id)
        .await?;
    Ok(data(leases))
}

/// POST /api/owners/units/{id}/leases
#[utoipa::path(
    post,
    path = "/api/owners/units/{id}/leases",
    tag = "Units",
    responses(
        (status = 201, description = "Lease created"),
        (status = 400, description = "Unit is not available"),
        (status = 404, description = "Unit not found"),
        (status = 422, description = "Validation error(s)"),
    )
)]
pub async fn create_lease(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let input = CreateLeaseInput::from_json(&body)?;
    let id = parse_id(&id)?;
    let owner = check_owner(&auth)?;
    let lease = UnitsService::new(&state.pool)
        .create_lease(id, owner.id, &input)
        .await?;
    Ok((StatusCode::CREATED, data(lease)))
}
