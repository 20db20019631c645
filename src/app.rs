use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config;
use crate::handlers;
use crate::middleware::session::with_session;
use crate::openapi;
use crate::state::AppState;

/// Assemble the full application router. Session resolution wraps every
/// route; documentation is exposed outside production only.
pub fn app(state: AppState) -> Router {
    let router = Router::new()
        .route("/", get(handlers::index::welcome))
        .merge(handlers::auth::routes())
        .merge(handlers::properties::routes())
        .merge(handlers::property_images::routes())
        .merge(handlers::units::routes())
        .merge(handlers::leases::routes())
        .merge(handlers::tenants::routes());

    let router = if config::env().environment.is_production() {
        router
    } else {
        router.merge(openapi::routes())
    };

    router
        .fallback(handlers::not_found)
        .layer(from_fn_with_state(state.clone(), with_session))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
