//! Cache entry state.

use crate::key::QueryKey;
use chrono::{DateTime, Utc};
use stockroom_core::Page;

/// Lifecycle of a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Read-only view of one cache entry, as returned by `QueryCache::get`.
#[derive(Debug, Clone)]
pub struct CacheSnapshot<T> {
    pub key: QueryKey,
    pub data: Option<Page<T>>,
    pub status: QueryStatus,
    pub last_error: Option<String>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub is_invalidated: bool,
}

impl<T> CacheSnapshot<T> {
    /// A fresh entry can be served without re-running its loader.
    pub fn is_fresh(&self) -> bool {
        self.status == QueryStatus::Success && !self.is_invalidated
    }
}
