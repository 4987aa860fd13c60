//! Project repository: every operation loads the whole collection, computes
//! in memory, and saves the whole collection back.
//!
//! Mutating operations (and the view-counting read) serialize through a
//! single async mutex, so two admin requests can no longer race each other
//! into a lost update. Plain reads take their own snapshot without locking.

use std::path::PathBuf;

use chrono::Utc;
use tokio::sync::Mutex;

use obra_core::error::CoreError;
use obra_core::media::{is_allowed_extension, MediaKind};
use obra_core::project::{next_id, MediaAsset, Project, ProjectFields};
use obra_core::types::ProjectId;
use obra_core::view::PLACEHOLDER_URL;

use crate::store::JsonStore;
use crate::uploads::MediaStorage;

/// Sort applied by [`ProjectRepo::list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Stored order (insertion order).
    #[default]
    Insertion,
    /// Most recently created first.
    RecentFirst,
}

/// One fully-buffered uploaded file, as handed over by the HTTP layer.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub original_name: String,
    pub data: Vec<u8>,
}

/// Orchestrates create/update/delete/view-increment against the store.
pub struct ProjectRepo {
    store: JsonStore,
    uploads: MediaStorage,
    write_lock: Mutex<()>,
}

impl ProjectRepo {
    pub fn new(data_file: impl Into<PathBuf>, uploads: MediaStorage) -> Self {
        Self {
            store: JsonStore::new(data_file),
            uploads,
            write_lock: Mutex::new(()),
        }
    }

    pub fn uploads(&self) -> &MediaStorage {
        &self.uploads
    }

    /// List projects, optionally keeping only those with at least one asset
    /// of `filter` kind, optionally sorted most-recent first.
    ///
    /// Never mutates persisted state.
    pub async fn list(
        &self,
        filter: Option<MediaKind>,
        sort: SortOrder,
    ) -> Result<Vec<Project>, CoreError> {
        let mut projects = self.store.load_all().await?;

        if let Some(kind) = filter {
            projects.retain(|p| p.media.iter().any(|m| m.kind == kind));
        }

        if sort == SortOrder::RecentFirst {
            projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }

        Ok(projects)
    }

    /// Plain lookup with no side effect.
    pub async fn find(&self, id: ProjectId) -> Result<Option<Project>, CoreError> {
        let projects = self.store.load_all().await?;
        Ok(projects.into_iter().find(|p| p.id == id))
    }

    /// Detail-view lookup: increments `view_count` by exactly 1 and persists
    /// immediately. Deliberately not idempotent; call once per rendered view.
    pub async fn record_view(&self, id: ProjectId) -> Result<Option<Project>, CoreError> {
        let _guard = self.write_lock.lock().await;

        let mut projects = self.store.load_all().await?;
        let Some(project) = projects.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        project.view_count += 1;
        let snapshot = project.clone();
        self.store.save_all(&projects).await?;
        Ok(Some(snapshot))
    }

    /// Create a project from validated fields and zero or more uploads.
    ///
    /// Files failing the extension allow-list or the disk write are skipped,
    /// never fatal. A project that ends up with no media gets the single
    /// placeholder asset, so persisted `media` is never empty on this path.
    pub async fn create(
        &self,
        fields: ProjectFields,
        files: Vec<UploadedFile>,
    ) -> Result<Project, CoreError> {
        fields.check()?;

        let _guard = self.write_lock.lock().await;
        let mut projects = self.store.load_all().await?;

        let mut media = self.store_uploads(files).await;
        if media.is_empty() {
            media.push(placeholder_asset());
        }

        let project = Project {
            id: next_id(&projects),
            name: fields.name,
            description: fields.description,
            location: fields.location,
            client: fields.client,
            media,
            created_at: Utc::now(),
            view_count: 0,
        };

        projects.push(project.clone());
        self.store.save_all(&projects).await?;
        Ok(project)
    }

    /// Overwrite a project's descriptive fields and append any new uploads.
    ///
    /// Existing media is untouched. Validation is applied the same way as on
    /// create. Returns `None` if no project has the given id.
    pub async fn update(
        &self,
        id: ProjectId,
        fields: ProjectFields,
        files: Vec<UploadedFile>,
    ) -> Result<Option<Project>, CoreError> {
        fields.check()?;

        let _guard = self.write_lock.lock().await;
        let mut projects = self.store.load_all().await?;
        let Some(project) = projects.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        project.name = fields.name;
        project.description = fields.description;
        project.location = fields.location;
        project.client = fields.client;

        let appended = self.store_uploads(files).await;
        project.media.extend(appended);

        let snapshot = project.clone();
        self.store.save_all(&projects).await?;
        Ok(Some(snapshot))
    }

    /// Remove a project. A missing id is a silent no-op, not an error; the
    /// project's managed media files are removed best-effort.
    pub async fn delete(&self, id: ProjectId) -> Result<(), CoreError> {
        let _guard = self.write_lock.lock().await;
        let mut projects = self.store.load_all().await?;

        let Some(index) = projects.iter().position(|p| p.id == id) else {
            return Ok(());
        };

        let removed = projects.remove(index);
        self.store.save_all(&projects).await?;

        for asset in &removed.media {
            self.uploads.remove(&asset.url).await;
        }
        Ok(())
    }

    /// Remove exactly one media asset by position. A missing project or an
    /// out-of-bounds index is a silent no-op; the stored file is removed
    /// best-effort when the url points into managed storage.
    pub async fn delete_media(&self, id: ProjectId, index: usize) -> Result<(), CoreError> {
        let _guard = self.write_lock.lock().await;
        let mut projects = self.store.load_all().await?;

        let Some(project) = projects.iter_mut().find(|p| p.id == id) else {
            return Ok(());
        };
        if index >= project.media.len() {
            return Ok(());
        }

        let removed = project.media.remove(index);
        self.store.save_all(&projects).await?;
        self.uploads.remove(&removed.url).await;
        Ok(())
    }

    /// Persist each allow-listed upload, skipping failures per-file.
    async fn store_uploads(&self, files: Vec<UploadedFile>) -> Vec<MediaAsset> {
        let mut assets = Vec::new();
        for file in files {
            if file.original_name.is_empty() || !is_allowed_extension(&file.original_name) {
                tracing::warn!(name = %file.original_name, "Skipping upload outside extension allow-list");
                continue;
            }
            match self.uploads.store(&file.original_name, &file.data).await {
                Ok(asset) => assets.push(asset),
                Err(e) => {
                    tracing::warn!(name = %file.original_name, error = %e, "Skipping upload that failed to persist");
                }
            }
        }
        assets
    }
}

/// The asset attached when a project would otherwise have no media.
fn placeholder_asset() -> MediaAsset {
    MediaAsset {
        url: PLACEHOLDER_URL.to_string(),
        kind: MediaKind::Image,
        original_name: "placeholder.jpg".to_string(),
        uploaded_at: Utc::now(),
    }
}
