use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::Value;

use super::{check_owner, data};
use crate::database::models::{CreateTenantInput, UpdateTenantInput};
use crate::error::ApiError;
use crate::middleware::AuthSession;
use crate::services::tenants::TenantsService;
use crate::state::AppState;
use crate::validation::parse_id;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/owners/tenants", get(list_tenants).post(create_tenant))
        .route(
            "/api/owners/tenants/:id",
            get(get_tenant).patch(update_tenant),
        )
        .route("/api/owners/tenants/:id/leases", get(list_leases))
}

/// GET /api/owners/tenants
#[utoipa::path(
    get,
    path = "/api/owners/tenants",
    tag = "Tenants",
    responses(
        (status = 200, description = "List of tenants"),
        (status = 401, description = "No owner attached to the session"),
    )
)]
pub async fn list_tenants(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
) -> Result<impl IntoResponse, ApiError> {
    let owner = check_owner(&auth)?;
    let tenants = TenantsService::new(&state.pool)
        .find_all_by_owner(owner.id)
        .await?;
    Ok(data(tenants))
}

/// POST /api/owners/tenants
#[utoipa::path(
    post,
    path = "/api/owners/tenants",
    tag = "Tenants",
    responses(
        (status = 201, description = "Tenant created"),
        (status = 409, description = "Identical tenant already registered"),
        (status = 422, description = "Validation error(s)"),
    )
)]
pub async fn create_tenant(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let input = CreateTenantInput::from_json(&body)?;
    let owner = check_owner(&auth)?;
    let tenant = TenantsService::new(&state.pool)
        .create(owner.id, &input)
        .await?;
    Ok((StatusCode::CREATED, data(tenant)))
}

/// GET /api/owners/tenants/{id}
#[utoipa::path(
    get,
    path = "/api/owners/tenants/{id}",
    tag = "Tenants",
    responses(
        (status = 200, description = "Tenant details"),
        (status = 404, description = "Tenant not found"),
        (status = 422, description = "Invalid ID"),
    )
)]
pub async fn get_tenant(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let owner = check_owner(&auth)?;
    let tenant = TenantsService::new(&state.pool)
        .find_one(id, owner.id)
        .await?;
    Ok(data(tenant))
}

/// PATCH /api/owners/tenants/{id}
#[utoipa::path(
    patch,
    path = "/api/owners/tenants/{id}",
    tag = "Tenants",
    responses(
        (status = 200, description = "Tenant updated"),
        (status = 404, description = "Tenant not found"),
        (status = 422, description = "Validation error(s)"),
    )
)]
pub async fn update_tenant(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let input = UpdateTenantInput::from_json(&body)?;
    let id = parse_id(&id)?;
    let owner = check_owner(&auth)?;
    let tenant = TenantsService::new(&state.pool)
        .update(id, owner.id, &input)
        .await?;
    Ok(data(tenant))
}

/// GET /api/owners/tenants/{id}/leases
#[utoipa::path(
    get,
    path = "/api/owners/tenants/{id}/leases",
    tag = "Tenants",
    responses(
        (status = 200, description = "Leases signed by the tenant"),
        (status = 404, description = "Tenant not found"),
        (status = 422, description = "Invalid ID"),
    )
)]
pub async fn list_leases(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let owner = check_owner(&auth)?;
    let leases = TenantsService::new(&state.pool)
        .find_leases(id, owner.id)
        .await?;
    Ok(data(leases))
}
