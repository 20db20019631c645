use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, Method};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use crate::auth::{AuthService, SESSION_MAX_AGE_SECS};
use crate::database::models::{SignInInput, SignUpInput};
use crate::error::ApiError;
use crate::middleware::{AuthSession, SESSION_COOKIE};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/sign-up/email", post(sign_up))
        .route("/api/auth/sign-in/email", post(sign_in))
        .route("/api/auth/sign-out", post(sign_out))
        .route("/api/auth/get-session", get(get_session))
        .route("/api/auth/verify-email", get(verify_email))
        .layer(auth_cors())
}

/// Browser clients talk to the auth endpoints cross-origin with credentials.
fn auth_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin("http://localhost:3000".parse::<HeaderValue>().unwrap())
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_methods([Method::POST, Method::GET, Method::OPTIONS])
        .expose_headers([CONTENT_LENGTH])
        .max_age(Duration::from_secs(600))
        .allow_credentials(true)
}

fn session_cookie(token: &str) -> String {
    format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={SESSION_MAX_AGE_SECS}"
    )
}

fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

fn client_meta(headers: &HeaderMap) -> (Option<String>, Option<String>) {
    let ip = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string());
    let user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    (ip, user_agent)
}

/// POST /api/auth/sign-up/email
#[utoipa::path(
    post,
    path = "/api/auth/sign-up/email",
    tag = "Auth",
    responses(
        (status = 200, description = "User created; a verification email is on its way"),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Validation error(s)"),
    )
)]
pub async fn sign_up(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let input = SignUpInput::from_json(&body)?;
    let user = AuthService::new(&state.pool, state.mailer.clone())
        .sign_up(&input)
        .await?;
    Ok(Json(json!({ "data": { "user": user } })))
}

/// POST /api/auth/sign-in/email
#[utoipa::path(
    post,
    path = "/api/auth/sign-in/email",
    tag = "Auth",
    responses(
        (status = 200, description = "Signed in; session cookie set"),
        (status = 401, description = "Invalid email or password"),
        (status = 403, description = "Email not verified"),
        (status = 422, description = "Validation error(s)"),
    )
)]
pub async fn sign_in(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let input = SignInInput::from_json(&body)?;
    let (ip, user_agent) = client_meta(&headers);
    let (session, user) = AuthService::new(&state.pool, state.mailer.clone())
        .sign_in(&input, ip.as_deref(), user_agent.as_deref())
        .await?;

    let cookie = session_cookie(&session.token);
    Ok((
        [(SET_COOKIE, cookie)],
        Json(json!({ "data": { "token": session.token, "user": user } })),
    ))
}

/// POST /api/auth/sign-out
#[utoipa::path(
    post,
    path = "/api/auth/sign-out",
    tag = "Auth",
    responses(
        (status = 200, description = "Session revoked; cookie cleared"),
        (status = 401, description = "No active session"),
    )
)]
pub async fn sign_out(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
) -> Result<impl IntoResponse, ApiError> {
    let session = auth
        .session
        .as_ref()
        .ok_or_else(|| ApiError::unauthorized("Unauthorized"))?;
    AuthService::new(&state.pool, state.mailer.clone())
        .sign_out(session)
        .await?;
    Ok((
        [(SET_COOKIE, clear_session_cookie())],
        Json(json!({ "data": { "success": true } })),
    ))
}

/// GET /api/auth/get-session
#[utoipa::path(
    get,
    path = "/api/auth/get-session",
    tag = "Auth",
    responses((status = 200, description = "Current user and session, or null"))
)]
pub async fn get_session(Extension(auth): Extension<AuthSession>) -> impl IntoResponse {
    match (&auth.user, &auth.session) {
        (Some(user), Some(session)) => {
            Json(json!({ "data": { "user": user, "session": session } }))
        }
        _ => Json(json!({ "data": null })),
    }
}

#[derive(Debug, Deserialize)]
pub struct VerifyEmailQuery {
    token: Option<String>,
}

/// GET /api/auth/verify-email?token=...
#[utoipa::path(
    get,
    path = "/api/auth/verify-email",
    tag = "Auth",
    responses(
        (status = 200, description = "Email verified; signed in"),
        (status = 400, description = "Invalid or expired verification token"),
    )
)]
pub async fn verify_email(
    State(state): State<AppState>,
    Query(query): Query<VerifyEmailQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let token = query
        .token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::bad_request("Invalid or expired verification token"))?;
    let (session, user) = AuthService::new(&state.pool, state.mailer.clone())
        .verify_email(&token)
        .await?;

    Ok((
        [(SET_COOKIE, session_cookie(&session.token))],
        Json(json!({ "data": { "user": user } })),
    ))
}
