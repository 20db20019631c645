// HTTP API error types and the single place where failures become responses.
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::config::Environment;
use crate::validation::Issue;

/// Typed failure raised by handlers and services.
///
/// Everything downstream of the service layer is HTTP-unaware; this enum is
/// mapped to a transport status exactly once, in `into_response`.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request (business-rule rejection, check/not-null violation)
    BadRequest(String),

    // 401 Unauthorized (no owner attached to the request)
    Unauthorized(String),

    // 403 Forbidden (authenticated but not allowed, e.g. unverified email;
    // never used for ownership mismatches - those are 404s)
    Forbidden(String),

    // 404 Not Found (absent or not owned - indistinguishable by design)
    NotFound(String),

    // 409 Conflict (unique or foreign-key violation)
    Conflict(String),

    // 422 Unprocessable Entity (schema rejection)
    Validation(Vec<Issue>),

    // 500 Internal Server Error (unexpected failure or post-write null)
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn validation(issues: Vec<Issue>) -> Self {
        ApiError::Validation(issues)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::Internal(msg) => msg,
            ApiError::Validation(_) => "The provided data is invalid. Please check your inputs.",
        }
    }
}

/// Map a Postgres SQLSTATE to the client-facing failure it represents.
fn classify_pg_code(code: &str) -> Option<ApiError> {
    match code {
        // Duplicate key (e.g. property address already registered)
        "23505" => Some(ApiError::conflict(
            "A record with this information already exists.",
        )),
        // Foreign key (e.g. removing a record other rows still reference)
        "23503" => Some(ApiError::conflict(
            "This action cannot be completed because this item is currently being used by other records.",
        )),
        // Not null
        "23502" => Some(ApiError::bad_request("A required field is missing.")),
        // Check constraint
        "23514" => Some(ApiError::bad_request(
            "The provided data contains invalid values.",
        )),
        _ => None,
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if let Some(code) = db_err.code() {
                if let Some(mapped) = classify_pg_code(code.as_ref()) {
                    return mapped;
                }
            }
        }
        tracing::error!("database error: {err}");
        ApiError::Internal(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        match self {
            ApiError::Validation(issues) => (
                status,
                Json(json!({
                    "success": false,
                    "error": {
                        "name": "ValidationError",
                        "issues": issues,
                    }
                })),
            )
                .into_response(),
            ApiError::Internal(message) => {
                // Internal details never leave production responses.
                let message = if Environment::current().is_production() {
                    "Internal Server Error".to_string()
                } else {
                    message
                };
                (status, Json(json!({ "message": message }))).into_response()
            }
            other => (status, Json(json!({ "message": other.message() }))).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pg_codes_map_to_client_failures() {
        let conflict = classify_pg_code("23505").unwrap();
        assert_eq!(conflict.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            conflict.message(),
            "A record with this information already exists."
        );

        let fk = classify_pg_code("23503").unwrap();
        assert_eq!(fk.status_code(), StatusCode::CONFLICT);

        let not_null = classify_pg_code("23502").unwrap();
        assert_eq!(not_null.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(not_null.message(), "A required field is missing.");

        let check = classify_pg_code("23514").unwrap();
        assert_eq!(check.status_code(), StatusCode::BAD_REQUEST);

        assert!(classify_pg_code("40001").is_none());
    }

    #[tokio::test]
    async fn validation_error_renders_structured_payload() {
        let err = ApiError::validation(vec![Issue {
            code: "too_small",
            path: vec!["endDate".to_string()],
            message: "End date must be after start date".to_string(),
        }]);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["name"], "ValidationError");
        assert_eq!(body["error"]["issues"][0]["path"][0], "endDate");
        assert_eq!(
            body["error"]["issues"][0]["message"],
            "End date must be after start date"
        );
    }

    #[tokio::test]
    async fn explicit_errors_keep_status_and_message() {
        let response = ApiError::not_found("Lease not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Lease not found");
    }
}
