//! Handlers for the `/projects` resource.
//!
//! Read routes are public; every mutating route goes through the
//! [`RequireAdmin`] gate. Create and update accept multipart forms with the
//! descriptive fields plus zero or more `files` parts.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use obra_core::error::CoreError;
use obra_core::media::MediaKind;
use obra_core::project::ProjectFields;
use obra_core::types::ProjectId;
use obra_core::view::{ProjectDetail, ProjectSummary};
use obra_store::{SortOrder, UploadedFile};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Query parameters for the list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// `images` or `videos`: keep only projects with at least one asset of
    /// that kind.
    pub kind: Option<String>,
    /// `recent`: most recently created first.
    pub sort: Option<String>,
}

impl ListParams {
    fn filter(&self) -> AppResult<Option<MediaKind>> {
        match self.kind.as_deref() {
            None => Ok(None),
            Some("images") => Ok(Some(MediaKind::Image)),
            Some("videos") => Ok(Some(MediaKind::Video)),
            Some(other) => Err(AppError::BadRequest(format!(
                "Unknown kind filter '{other}'. Expected 'images' or 'videos'"
            ))),
        }
    }

    fn sort(&self) -> AppResult<SortOrder> {
        match self.sort.as_deref() {
            None => Ok(SortOrder::Insertion),
            Some("recent") => Ok(SortOrder::RecentFirst),
            Some(other) => Err(AppError::BadRequest(format!(
                "Unknown sort '{other}'. Expected 'recent'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Read routes (public)
// ---------------------------------------------------------------------------

/// GET /api/v1/projects
///
/// List project summaries, optionally filtered by media kind and sorted
/// most-recent first. Never mutates persisted state.
pub async fn list_projects(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let projects = state.repo.list(params.filter()?, params.sort()?).await?;
    let summaries: Vec<ProjectSummary> = projects.iter().map(ProjectSummary::from).collect();

    Ok(Json(DataResponse { data: summaries }))
}

/// GET /api/v1/projects/{id}
///
/// Detail view: the full record plus the image/video split. Increments the
/// project's `view_count` by exactly 1 and persists immediately, so this is
/// deliberately not idempotent.
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
) -> AppResult<impl IntoResponse> {
    let project = state
        .repo
        .record_view(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    Ok(Json(DataResponse {
        data: ProjectDetail::from(project),
    }))
}

// ---------------------------------------------------------------------------
// Mutating routes (admin only)
// ---------------------------------------------------------------------------

/// POST /api/v1/projects
///
/// Create a project from a multipart form (`name`, `description`,
/// `location`, `client`, repeated `files`). Disallowed files are skipped;
/// a project with no surviving uploads gets the placeholder cover.
pub async fn create_project(
    admin: RequireAdmin,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let (fields, files) = read_project_form(multipart).await?;
    let project = state.repo.create(fields, files).await?;

    tracing::info!(
        project_id = project.id,
        name = %project.name,
        media = project.media.len(),
        username = %admin.username,
        "Project created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// PUT /api/v1/projects/{id}
///
/// Overwrite the descriptive fields and append any newly uploaded files.
/// Existing media is untouched.
pub async fn update_project(
    admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let (fields, files) = read_project_form(multipart).await?;
    let project = state
        .repo
        .update(id, fields, files)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    tracing::info!(project_id = id, username = %admin.username, "Project updated");

    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/v1/projects/{id}
///
/// Remove a project and best-effort delete its stored media files. A
/// missing id is a no-op; delete-style operations answer 204 either way.
pub async fn delete_project(
    admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
) -> AppResult<impl IntoResponse> {
    state.repo.delete(id).await?;

    tracing::info!(project_id = id, username = %admin.username, "Project deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/projects/{id}/media/{index}
///
/// Remove a single media asset by position. Out-of-bounds indexes and
/// missing projects are no-ops, answered 204 like any delete.
pub async fn delete_media(
    admin: RequireAdmin,
    State(state): State<AppState>,
    Path((id, index)): Path<(ProjectId, usize)>,
) -> AppResult<impl IntoResponse> {
    state.repo.delete_media(id, index).await?;

    tracing::info!(
        project_id = id,
        media_index = index,
        username = %admin.username,
        "Media asset removed",
    );

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Multipart form parsing
// ---------------------------------------------------------------------------

/// Read the project form out of a multipart body.
///
/// Text parts fill the descriptive fields; every `files` part with a
/// filename is buffered whole. Unknown parts are ignored.
async fn read_project_form(
    mut multipart: Multipart,
) -> AppResult<(ProjectFields, Vec<UploadedFile>)> {
    let mut fields = ProjectFields::default();
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "name" => fields.name = field.text().await?.trim().to_string(),
            "description" => fields.description = field.text().await?.trim().to_string(),
            "location" => fields.location = field.text().await?.trim().to_string(),
            "client" => fields.client = field.text().await?.trim().to_string(),
            "files" => {
                let original_name = field.file_name().unwrap_or_default().to_string();
                if original_name.is_empty() {
                    // An empty file input submits a nameless part; skip it.
                    continue;
                }
                let data = field.bytes().await?;
                files.push(UploadedFile {
                    original_name,
                    data: data.to_vec(),
                });
            }
            _ => {}
        }
    }

    Ok((fields, files))
}
