pub mod auth;
pub mod index;
pub mod leases;
pub mod properties;
pub mod property_images;
pub mod tenants;
pub mod units;

use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::database::models::Owner;
use crate::error::ApiError;
use crate::middleware::AuthSession;

/// `{ data: ... }` response envelope.
#[derive(Debug, Serialize)]
pub struct Data<T: Serialize> {
    pub data: T,
}

pub fn data<T: Serialize>(value: T) -> Json<Data<T>> {
    Json(Data { data: value })
}

/// Explicit guard every owner route calls: the middleware never rejects,
/// so an absent owner surfaces here as a 401.
pub fn check_owner(auth: &AuthSession) -> Result<&Owner, ApiError> {
    auth.owner
        .as_ref()
        .ok_or_else(|| ApiError::unauthorized("Unauthorized"))
}

/// Fallback for unmatched routes.
pub async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("Not Found - {}", uri.path()) })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_owner_is_unauthorized() {
        let err = check_owner(&AuthSession::default()).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.message(), "Unauthorized");
    }
}
