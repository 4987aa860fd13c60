//! Flat-file JSON store for the project collection.
//!
//! The whole collection is the unit of persistence: every operation reads or
//! writes the entire array. There is no partial update and no indexing.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use obra_core::error::CoreError;
use obra_core::project::Project;

/// Load-all/save-all access to the JSON document holding every project.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted collection. An absent file is an empty collection,
    /// not an error; an unparsable file is [`CoreError::StorageCorrupt`].
    pub async fn load_all(&self) -> Result<Vec<Project>, CoreError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(CoreError::StorageCorrupt(format!(
                    "cannot read {}: {e}",
                    self.path.display()
                )))
            }
        };

        serde_json::from_str(&raw).map_err(|e| {
            CoreError::StorageCorrupt(format!("cannot parse {}: {e}", self.path.display()))
        })
    }

    /// Overwrite the persisted collection in one operation.
    ///
    /// Serializes indented with stable field order and full non-ASCII
    /// fidelity, writes to a sibling temp file, then renames over the
    /// target so readers never observe a torn document.
    pub async fn save_all(&self, projects: &[Project]) -> Result<(), CoreError> {
        let body = serde_json::to_string_pretty(projects)
            .map_err(|e| CoreError::StorageWriteFailed(format!("cannot serialize: {e}")))?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body.as_bytes()).await.map_err(|e| {
            CoreError::StorageWriteFailed(format!("cannot write {}: {e}", tmp.display()))
        })?;

        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            CoreError::StorageWriteFailed(format!(
                "cannot replace {}: {e}",
                self.path.display()
            ))
        })
    }
}
