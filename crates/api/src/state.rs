use std::sync::Arc;

use obra_store::ProjectRepo;

use crate::auth::sessions::SessionSet;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// The project repository (flat-file store + managed upload storage).
    pub repo: Arc<ProjectRepo>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Live session registry for the access gate.
    pub sessions: Arc<SessionSet>,
}
