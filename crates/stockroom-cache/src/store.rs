//! The query cache store.

use crate::entry::{CacheSnapshot, QueryStatus};
use crate::key::QueryKey;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use stockroom_core::{Error, Page, Result};
use tokio::sync::watch;

/// Hardening timeout applied to every loader run.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Seam used by the mutation side to mark cache families stale without
/// knowing the cached item type.
pub trait InvalidateFamily: Send + Sync {
    fn invalidate_family(&self, resource: &str);
}

struct EntryState<T> {
    data: Option<Page<T>>,
    status: QueryStatus,
    last_error: Option<String>,
    fetched_at: Option<DateTime<Utc>>,
    invalidated: bool,
    /// Ticket of the most recently issued load. A settling load whose
    /// ticket no longer matches has been superseded and is discarded.
    issue: u64,
    /// Present while a load is in flight; the channel closes when it
    /// settles, waking coalesced waiters.
    inflight: Option<watch::Receiver<()>>,
}

impl<T> EntryState<T> {
    fn idle() -> Self {
        Self {
            data: None,
            status: QueryStatus::Idle,
            last_error: None,
            fetched_at: None,
            invalidated: false,
            issue: 0,
            inflight: None,
        }
    }
}

enum Plan {
    Hit,
    Wait(watch::Receiver<()>, u64),
    Issue(u64, watch::Sender<()>),
}

/// Keyed cache of fetched pages for one item type.
///
/// Cloning is shallow; all clones share the same entries. The inner lock is
/// never held across an await point.
pub struct QueryCache<T> {
    inner: Arc<Mutex<HashMap<QueryKey, EntryState<T>>>>,
    fetch_timeout: Duration,
}

impl<T> Clone for QueryCache<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            fetch_timeout: self.fetch_timeout,
        }
    }
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> QueryCache<T> {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_FETCH_TIMEOUT)
    }

    pub fn with_timeout(fetch_timeout: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            fetch_timeout,
        }
    }

    /// Marks every entry of the family stale. Idempotent; triggers no fetch
    /// by itself, and leaves in-flight loads untouched so their results can
    /// still land.
    pub fn invalidate_family(&self, resource: &str) {
        let mut map = self.inner.lock();
        let mut marked = 0usize;
        for (key, entry) in map.iter_mut() {
            if key.family() == resource {
                entry.invalidated = true;
                marked += 1;
            }
        }
        tracing::debug!(resource, marked, "invalidated cache family");
    }

    /// Drops the entry. The result of an in-flight load for the key is
    /// discarded when it settles.
    pub fn evict(&self, key: &QueryKey) {
        self.inner.lock().remove(key);
    }

    /// Drops every entry of the family.
    pub fn evict_family(&self, resource: &str) {
        self.inner.lock().retain(|key, _| key.family() != resource);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl<T: Clone> QueryCache<T> {
    /// Synchronous lookup, no side effects.
    pub fn get(&self, key: &QueryKey) -> Option<CacheSnapshot<T>> {
        let map = self.inner.lock();
        map.get(key).map(|entry| CacheSnapshot {
            key: key.clone(),
            data: entry.data.clone(),
            status: entry.status,
            last_error: entry.last_error.clone(),
            fetched_at: entry.fetched_at,
            is_invalidated: entry.invalidated,
        })
    }

    /// Returns the cached page for a fresh entry without running the
    /// loader. Otherwise runs the loader (under the fetch timeout) and
    /// stores the outcome, coalescing with any load already in flight for
    /// the same key. A key invalidated while its load is in flight gets a
    /// fresh, superseding load instead of attaching to the stale one.
    pub async fn fetch<F, Fut>(&self, key: &QueryKey, loader: F) -> Result<Page<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Page<T>>>,
    {
        let (ticket, tx) = loop {
            match self.plan(key) {
                Plan::Hit => {
                    if let Some(page) = self.cached_page(key) {
                        return Ok(page);
                    }
                    // fresh entry vanished between plan and read; re-plan
                }
                Plan::Wait(rx, seen_issue) => {
                    if let Some(settled) = self.await_flight(key, rx, seen_issue).await {
                        return settled;
                    }
                }
                Plan::Issue(ticket, tx) => break (ticket, tx),
            }
        };
        self.run_load(key, ticket, tx, loader).await
    }

    /// Unconditionally issues a new load for the key, superseding any load
    /// in flight. The entry reflects the most recently issued load
    /// regardless of resolution order.
    pub async fn refetch<F, Fut>(&self, key: &QueryKey, loader: F) -> Result<Page<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Page<T>>>,
    {
        let (ticket, tx) = {
            let mut map = self.inner.lock();
            let entry = map.entry(key.clone()).or_insert_with(EntryState::idle);
            Self::issue(entry)
        };
        self.run_load(key, ticket, tx, loader).await
    }

    fn plan(&self, key: &QueryKey) -> Plan {
        let mut map = self.inner.lock();
        let entry = map.entry(key.clone()).or_insert_with(EntryState::idle);
        match entry.status {
            QueryStatus::Success if !entry.invalidated => Plan::Hit,
            QueryStatus::Loading if !entry.invalidated => match entry.inflight.clone() {
                Some(rx) => Plan::Wait(rx, entry.issue),
                None => {
                    let (ticket, tx) = Self::issue(entry);
                    Plan::Issue(ticket, tx)
                }
            },
            _ => {
                let (ticket, tx) = Self::issue(entry);
                Plan::Issue(ticket, tx)
            }
        }
    }

    fn issue(entry: &mut EntryState<T>) -> (u64, watch::Sender<()>) {
        entry.issue += 1;
        entry.status = QueryStatus::Loading;
        entry.invalidated = false;
        let (tx, rx) = watch::channel(());
        entry.inflight = Some(rx);
        (entry.issue, tx)
    }

    fn cached_page(&self, key: &QueryKey) -> Option<Page<T>> {
        self.inner.lock().get(key).and_then(|e| e.data.clone())
    }

    async fn run_load<F, Fut>(
        &self,
        key: &QueryKey,
        ticket: u64,
        tx: watch::Sender<()>,
        loader: F,
    ) -> Result<Page<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Page<T>>>,
    {
        tracing::debug!(key = %key, ticket, "issuing load");
        let result = match tokio::time::timeout(self.fetch_timeout, loader()).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout {
                seconds: self.fetch_timeout.as_secs(),
            }),
        };
        self.settle(key, ticket, &result);
        drop(tx);
        result
    }

    fn settle(&self, key: &QueryKey, ticket: u64, result: &Result<Page<T>>) {
        let mut map = self.inner.lock();
        let Some(entry) = map.get_mut(key) else {
            tracing::debug!(key = %key, "entry evicted; dropping load result");
            return;
        };
        if entry.issue != ticket {
            tracing::debug!(key = %key, ticket, "load superseded; dropping result");
            return;
        }
        entry.inflight = None;
        match result {
            Ok(page) => {
                entry.data = Some(page.clone());
                entry.status = QueryStatus::Success;
                entry.last_error = None;
                entry.fetched_at = Some(Utc::now());
                // `invalidated` is deliberately untouched: an invalidation
                // issued mid-flight keeps the entry eligible for refetch
            }
            Err(err) => {
                // previous successful data stays visible behind the error flag
                entry.status = QueryStatus::Error;
                entry.last_error = Some(err.to_string());
            }
        }
    }

    /// Waits for the in-flight load the waiter attached to. Returns the
    /// settled outcome, or `None` when the waiter must re-plan (entry
    /// evicted, load superseded, or the issuing future was dropped).
    async fn await_flight(
        &self,
        key: &QueryKey,
        mut rx: watch::Receiver<()>,
        seen_issue: u64,
    ) -> Option<Result<Page<T>>> {
        // the sender is only ever dropped, never written to
        let _ = rx.changed().await;
        let mut map = self.inner.lock();
        let entry = map.get_mut(key)?;
        if entry.issue != seen_issue {
            return None;
        }
        match entry.status {
            QueryStatus::Success => entry.data.clone().map(Ok),
            QueryStatus::Error => Some(Err(Error::Remote(
                entry
                    .last_error
                    .clone()
                    .unwrap_or_else(|| "load failed".to_string()),
            ))),
            QueryStatus::Loading | QueryStatus::Idle => {
                // issuing future was dropped before settling; reset so the
                // waiter can take over the load
                entry.status = QueryStatus::Idle;
                entry.inflight = None;
                None
            }
        }
    }
}

impl<T: Clone + Send + 'static> InvalidateFamily for QueryCache<T> {
    fn invalidate_family(&self, resource: &str) {
        QueryCache::invalidate_family(self, resource);
    }
}
