use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::Value;

use super::{check_owner, data};
use crate::database::models::{CreatePaymentInput, UpdateLeaseInput};
use crate::error::ApiError;
use crate::middleware::AuthSession;
use crate::services::leases::LeasesService;
use crate::services::payments::PaymentsService;
use crate::state::AppState;
use crate::validation::parse_id;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/owners/leases", get(list_leases))
        .route("/api/owners/leases/:id", get(get_lease).patch(update_lease))
        .route(
            "/api/owners/leases/:id/payments",
            get(list_payments).post(create_payment),
        )
}

/// GET /api/owners/leases
#[utoipa::path(
    get,
    path = "/api/owners/leases",
    tag = "Leases",
    responses(
        (status = 200, description = "List of leases"),
        (status = 401, description = "No owner attached to the session"),
    )
)]
pub async fn list_leases(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
) -> Result<impl IntoResponse, ApiError> {
    let owner = check_owner(&auth)?;
    let leases = LeasesService::new(&state.pool)
        .find_all_by_owner(owner.id)
        .await?;
    Ok(data(leases))
}

/// GET /api/owners/leases/{id}
#[utoipa::path(
    get,
    path = "/api/owners/leases/{id}",
    tag = "Leases",
    responses(
        (status = 200, description = "Lease details"),
        (status = 404, description = "Lease not found"),
        (status = 422, description = "Invalid ID"),
    )
)]
pub async fn get_lease(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let owner = check_owner(&auth)?;
    let lease = LeasesService::new(&state.pool)
        .find_one(id, owner.id)
        .await?;
    Ok(data(lease))
}

/// PATCH /api/owners/leases/{id}
#[utoipa::path(
    patch,
    path = "/api/owners/leases/{id}",
    tag = "Leases",
    responses(
        (status = 200, description = "Lease updated"),
        (status = 404, description = "Lease not found"),
        (status = 422, description = "Validation error(s)"),
    )
)]
pub async fn update_lease(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let input = UpdateLeaseInput::from_json(&body)?;
    let id = parse_id(&id)?;
    let owner = check_owner(&auth)?;
    let lease = LeasesService::new(&state.pool)
        .update(id, owner.id, &input)
        .await?;
    Ok(data(lease))
}

/// GET /api/owners/leases/{id}/payments
#[utoipa::path(
    get,
    path = "/api/owners/leases/{id}/payments",
    tag = "Payments",
    responses(
        (status = 200, description = "Payments of the lease, newest first"),
        (status = 404, description = "Lease not found"),
        (status = 422, description = "Invalid ID"),
    )
)]
pub async fn list_payments(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let owner = check_owner(&auth)?;
    let payments = PaymentsService::new(&state.pool)
        .find_all_for_lease(id, owner.id)
        .await?;
    Ok(data(payments))
}

/// POST /api/owners/leases/{id}/payments
#[utoipa::path(
    post,
    path = "/api/owners/leases/{id}/payments",
    tag = "Payments",
    responses(
        (status = 201, description = "Payment recorded"),
        (status = 404, description = "Lease not found"),
        (status = 422, description = "Validation error(s)"),
    )
)]
pub async fn create_payment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let input = CreatePaymentInput::from_json(&body)?;
    let id = parse_id(&id)?;
    let owner = check_owner(&auth)?;
    let payment = PaymentsService::new(&state.pool)
        .create(id, owner.id, &input)
        .await?;
    Ok((StatusCode::CREATED, data(payment)))
}
