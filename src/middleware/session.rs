use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;

use crate::database::models::{Owner, Session, User};
use crate::database::repositories::{AuthRepository, OwnersRepository};
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "rms.session_token";

/// Per-request authentication context, resolved once by `with_session` and
/// threaded to handlers through request extensions. All fields are `None`
/// for anonymous callers; `owner` is `None` for tenant-role users too.
#[derive(Debug, Clone, Default)]
pub struct AuthSession {
    pub user: Option<User>,
    pub session: Option<Session>,
    pub owner: Option<Owner>,
}

/// Resolves the caller's session before every request. Never rejects:
/// routes that need an owner call `check_owner` explicitly.
pub async fn with_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let mut auth = AuthSession::default();

    if let Some(token) = extract_session_token(request.headers()) {
        let repo = AuthRepository::new(state.pool.clone());
        match repo.find_session_with_user(&token).await {
            Ok(Some((session, user))) if session.expires_at > Utc::now().naive_utc() => {
                let owner = match OwnersRepository::new(state.pool.clone())
                    .find_by_user_id(&user.id)
                    .await
                {
                    Ok(owner) => owner,
                    Err(e) => {
                        tracing::error!("owner lookup failed: {e}");
                        None
                    }
                };
                auth = AuthSession {
                    user: Some(user),
                    session: Some(session),
                    owner,
                };
            }
            // Expired or unknown token: treated the same as no token.
            Ok(_) => {}
            Err(e) => tracing::error!("session lookup failed: {e}"),
        }
    }

    request.extensions_mut().insert(auth);
    next.run(request).await
}

/// Bearer header first, session cookie as fallback.
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(auth) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        if let Some(token) = auth.strip_prefix("Bearer ") {
            let token = token.trim();
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }

    let cookies = headers.get("cookie")?.to_str().ok()?;
    for part in cookies.split(';') {
        if let Some(value) = part.trim().strip_prefix(SESSION_COOKIE) {
            if let Some(token) = value.strip_prefix('=') {
                if !token.is_empty() {
                    return Some(token.to_string());
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(
                axum::http::HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn reads_bearer_token() {
        let map = headers(&[("authorization", "Bearer abc123")]);
        assert_eq!(extract_session_token(&map).as_deref(), Some("abc123"));
    }

    #[test]
    fn reads_session_cookie() {
        let map = headers(&[("cookie", "theme=dark; rms.session_token=tok-1; other=x")]);
        assert_eq!(extract_session_token(&map).as_deref(), Some("tok-1"));
    }

    #[test]
    fn bearer_takes_precedence_over_cookie() {
        let map = headers(&[
            ("authorization", "Bearer from-header"),
            ("cookie", "rms.session_token=from-cookie"),
        ]);
        assert_eq!(
            extract_session_token(&map).as_deref(),
            Some("from-header")
        );
    }

    #[test]
    fn empty_or_missing_tokens_yield_none() {
        assert_eq!(extract_session_token(&HeaderMap::new()), None);
        let map = headers(&[("authorization", "Bearer ")]);
        assert_eq!(extract_session_token(&map), None);
        let map = headers(&[("cookie", "rms.session_token=")]);
        assert_eq!(extract_session_token(&map), None);
    }
}
