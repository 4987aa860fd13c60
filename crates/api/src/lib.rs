//! HTTP surface of the gallery: configuration, the access gate, error
//! mapping, and the route/handler tree. Exposed as a library so integration
//! tests can build the exact router the binary serves.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::services::ServeDir;

use crate::config::UPLOAD_URL_PREFIX;
use crate::state::AppState;

/// Build the full application router for the given state.
///
/// Mirrored by the integration-test harness so tests exercise the same
/// tree production serves. Middleware layers are applied by the caller.
pub fn app_router(state: AppState) -> Router {
    let uploads = ServeDir::new(&state.config.upload_dir);

    Router::new()
        // Health check at root level (not under /api/v1).
        .merge(routes::health::router())
        // API v1 routes.
        .nest("/api/v1", routes::api_routes())
        // Managed upload storage, served under its predictable prefix.
        .nest_service(UPLOAD_URL_PREFIX, uploads)
        // Uploads are fully buffered; cap the payload before it reaches us.
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .with_state(state)
}
