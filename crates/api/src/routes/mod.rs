pub mod auth;
pub mod health;
pub mod projects;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                      login (public)
/// /auth/logout                     logout (requires session)
///
/// /projects                        list (public), create (admin)
/// /projects/{id}                   detail + view count (public),
///                                  update, delete (admin)
/// /projects/{id}/media/{index}     delete one asset (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/projects", projects::router())
}
