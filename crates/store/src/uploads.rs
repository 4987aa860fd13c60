//! Managed upload storage: a designated directory served back to clients
//! under a predictable url prefix.

use std::path::PathBuf;

use chrono::Utc;
use obra_core::error::CoreError;
use obra_core::media::classify;
use obra_core::project::MediaAsset;

/// Writes uploaded files into the upload directory and maps them to urls.
#[derive(Debug, Clone)]
pub struct MediaStorage {
    root: PathBuf,
    url_prefix: String,
}

impl MediaStorage {
    /// `root` is the directory files land in; `url_prefix` is the public
    /// path it is served under (no trailing slash, e.g. `/static/uploads`).
    pub fn new(root: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            url_prefix: url_prefix.into(),
        }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Persist one uploaded file under a collision-resistant name and return
    /// its media asset record.
    ///
    /// The stored name is the sanitized original name prefixed with a
    /// microsecond timestamp token, so two uploads of the same file never
    /// collide in practice.
    pub async fn store(&self, original_name: &str, data: &[u8]) -> Result<MediaAsset, CoreError> {
        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            CoreError::StorageWriteFailed(format!(
                "cannot create upload dir {}: {e}",
                self.root.display()
            ))
        })?;

        let now = Utc::now();
        let stored_name = format!(
            "{}_{}",
            now.format("%Y%m%d_%H%M%S_%6f"),
            sanitize_filename(original_name)
        );

        let dest = self.root.join(&stored_name);
        tokio::fs::write(&dest, data).await.map_err(|e| {
            CoreError::StorageWriteFailed(format!("cannot write {}: {e}", dest.display()))
        })?;

        Ok(MediaAsset {
            url: format!("{}/{stored_name}", self.url_prefix),
            kind: classify(original_name),
            original_name: original_name.to_string(),
            uploaded_at: now,
        })
    }

    /// Best-effort removal of the stored file behind `url`.
    ///
    /// Only urls pointing into managed storage are touched; external urls
    /// (the placeholder) are ignored. Deletion failures are logged and
    /// swallowed.
    pub async fn remove(&self, url: &str) {
        let prefix = format!("{}/", self.url_prefix);
        let Some(name) = url.strip_prefix(&prefix) else {
            return;
        };
        // A managed url never contains path separators past the prefix.
        if name.is_empty() || name.contains('/') || name.contains("..") {
            return;
        }

        let path = self.root.join(name);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove stored media file");
        }
    }
}

/// Reduce an uploader-supplied filename to a safe basename.
///
/// Strips any path components and replaces everything outside
/// `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_filename(name: &str) -> String {
    let basename = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name)
        .trim_matches('.');

    let cleaned: String = basename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}
