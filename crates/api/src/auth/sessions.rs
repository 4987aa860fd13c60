//! In-memory registry of live session identifiers.
//!
//! The gate has exactly two states per caller: anonymous and authenticated.
//! Login inserts a token's `jti`; logout removes it. A token whose `jti` is
//! absent is treated as anonymous even if its signature is still valid.

use std::collections::HashSet;

use tokio::sync::RwLock;

/// Set of `jti` values for sessions that are currently authenticated.
#[derive(Debug, Default)]
pub struct SessionSet {
    inner: RwLock<HashSet<String>>,
}

impl SessionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session: anonymous -> authenticated.
    pub async fn insert(&self, jti: &str) {
        self.inner.write().await.insert(jti.to_string());
    }

    /// Drop a session: authenticated -> anonymous. Removing an unknown id
    /// is harmless.
    pub async fn remove(&self, jti: &str) {
        self.inner.write().await.remove(jti);
    }

    pub async fn contains(&self, jti: &str) -> bool {
        self.inner.read().await.contains(jti)
    }
}
