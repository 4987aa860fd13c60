//! Project entity model and input DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::media::MediaKind;
use crate::types::{ProjectId, Timestamp};

/// One gallery entry: a construction job with descriptive fields and media.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub client: String,
    /// Insertion order is display order; the first asset is the cover.
    #[serde(default)]
    pub media: Vec<MediaAsset>,
    pub created_at: Timestamp,
    /// Incremented by exactly 1 each time the detail view is rendered.
    #[serde(default)]
    pub view_count: u64,
}

/// One uploaded or linked file attached to a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaAsset {
    /// Either a path into managed upload storage or an external placeholder.
    pub url: String,
    /// Derived from the file extension, never independently settable.
    pub kind: MediaKind,
    /// Filename as supplied by the uploader.
    pub original_name: String,
    pub uploaded_at: Timestamp,
}

/// Descriptive fields supplied on create and update.
///
/// Validation is applied uniformly on both paths: `name` at least 3
/// characters, `description` at least 10.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProjectFields {
    #[validate(length(min = 3, message = "name must be at least 3 characters"))]
    pub name: String,
    #[validate(length(min = 10, message = "description must be at least 10 characters"))]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub client: String,
}

impl ProjectFields {
    /// Run the field constraints, mapping failures into [`CoreError::Validation`]
    /// with one human-readable message per offending field.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate().map_err(|errors| {
            let mut messages: Vec<String> = errors
                .field_errors()
                .into_values()
                .flatten()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .collect();
            messages.sort();
            CoreError::Validation(messages.join("; "))
        })
    }
}

/// Pick the next project id: `max(existing ids, default 0) + 1`.
///
/// Ids are never reused after deletion; the maximum only ever grows while a
/// project holding it exists, and a freed maximum is still larger than every
/// remaining id until it is reassigned.
pub fn next_id(projects: &[Project]) -> ProjectId {
    projects.iter().map(|p| p.id).max().unwrap_or(0) + 1
}
