/// Project identifiers are positive integers assigned as `max(existing) + 1`.
pub type ProjectId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
