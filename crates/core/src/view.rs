//! Derived display fields for projects.
//!
//! Pure functions over a borrowed [`Project`]; callers attach the results to
//! transient response DTOs, never back onto the stored record.

use serde::Serialize;

use crate::media::MediaKind;
use crate::project::{MediaAsset, Project};
use crate::types::{ProjectId, Timestamp};

/// Cover shown for a project with no media. A project is never rendered
/// with an absent cover.
pub const PLACEHOLDER_URL: &str = "https://via.placeholder.com/400x300?text=Sin+Imagen";

/// Url of the asset representing a project in list views: the first media
/// asset, or the placeholder when `media` is empty.
pub fn cover_of(project: &Project) -> &str {
    project
        .media
        .first()
        .map(|m| m.url.as_str())
        .unwrap_or(PLACEHOLDER_URL)
}

/// Number of media assets attached to a project.
pub fn total_media(project: &Project) -> usize {
    project.media.len()
}

/// Partition a project's media into `(images, videos)`, preserving relative
/// order within each partition.
pub fn split_by_kind(project: &Project) -> (Vec<&MediaAsset>, Vec<&MediaAsset>) {
    project
        .media
        .iter()
        .partition(|m| m.kind == MediaKind::Image)
}

/// List-view projection of a project.
#[derive(Debug, Serialize)]
pub struct ProjectSummary {
    pub id: ProjectId,
    pub name: String,
    pub location: String,
    pub client: String,
    pub cover: String,
    pub total_media: usize,
    pub view_count: u64,
    pub created_at: Timestamp,
}

impl From<&Project> for ProjectSummary {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
            location: project.location.clone(),
            client: project.client.clone(),
            cover: cover_of(project).to_string(),
            total_media: total_media(project),
            view_count: project.view_count,
            created_at: project.created_at,
        }
    }
}

/// Detail-view projection: the full record plus the image/video split.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub images: Vec<MediaAsset>,
    pub videos: Vec<MediaAsset>,
}

impl From<Project> for ProjectDetail {
    fn from(project: Project) -> Self {
        let (images, videos) = split_by_kind(&project);
        let images = images.into_iter().cloned().collect();
        let videos = videos.into_iter().cloned().collect();
        Self {
            project,
            images,
            videos,
        }
    }
}
