//! Route definitions for the project gallery.
//!
//! All routes are mounted under `/projects`.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::projects;
use crate::state::AppState;

/// Project routes mounted at `/projects`.
///
/// ```text
/// GET    /                     -> list_projects
/// POST   /                     -> create_project (admin only)
/// GET    /{id}                 -> get_project (increments view count)
/// PUT    /{id}                 -> update_project (admin only)
/// DELETE /{id}                 -> delete_project (admin only)
/// DELETE /{id}/media/{index}   -> delete_media (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/{id}",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .route("/{id}/media/{index}", delete(projects::delete_media))
}
