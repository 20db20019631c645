use axum::Json;
use serde_json::{json, Value};

/// GET / - welcome message
#[utoipa::path(
    get,
    path = "/",
    tag = "Index",
    responses((status = 200, description = "Welcome message"))
)]
pub async fn welcome() -> Json<Value> {
    Json(json!({ "message": "Welcome to RMS API" }))
}
