//! Extension-based media classification.
//!
//! The file extension is the sole signal: there is no content sniffing, so a
//! mislabeled file is misclassified. That is a documented heuristic, not a
//! defect.

use serde::{Deserialize, Serialize};

/// Extensions accepted for upload. Anything else is skipped silently.
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "mp4", "mov", "webm", "avi"];

/// The subset of [`ALLOWED_EXTENSIONS`] classified as video.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "webm", "avi"];

/// The kind tag derived for a media asset. Never independently settable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// Lowercased extension of `filename`, if it has one.
fn extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

/// Whether `filename` has an extension on the upload allow-list.
pub fn is_allowed_extension(filename: &str) -> bool {
    extension(filename).is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

/// Classify a filename as image or video by its extension alone.
///
/// Callers are expected to gate on [`is_allowed_extension`] first; anything
/// that is not a known video extension classifies as an image.
pub fn classify(filename: &str) -> MediaKind {
    match extension(filename) {
        Some(ext) if VIDEO_EXTENSIONS.contains(&ext.as_str()) => MediaKind::Video,
        _ => MediaKind::Image,
    }
}
