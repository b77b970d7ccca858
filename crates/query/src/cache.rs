//! Keyed, single-flight result cache.
//!
//! Each [`QueryKey`] owns one entry moving through
//! `Idle -> Fetching -> Success | Error`. At most one request per key is in
//! flight: callers asking for a key that is already being fetched attach to
//! the running request instead of issuing another. Every request is stamped
//! with a generation drawn from a cache-wide counter, and only the newest
//! generation may settle the entry, so a slow older response never overwrites
//! a newer one, even across [`QueryCache::remove`].
//!
//! Requests run as spawned Tokio tasks. A caller that stops waiting does not
//! cancel the request for other waiters, and the result still lands in the
//! cache if it is the newest one for its key.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use folio_client::ClientError;
use folio_core::QueryKey;
use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use tokio::time::Instant;

use crate::config::QueryConfig;
use crate::error::QueryError;

pub(crate) type QueryOutcome<T> = Result<Arc<T>, QueryError>;
type SharedFetch<T> = Shared<BoxFuture<'static, QueryOutcome<T>>>;

/// Lifecycle state of one cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryStatus {
    #[default]
    Idle,
    Fetching,
    Success,
    Error,
}

/// Point-in-time copy of one cache entry.
#[derive(Debug)]
pub struct CacheSnapshot<T> {
    pub status: QueryStatus,
    pub data: Option<Arc<T>>,
    pub error: Option<QueryError>,
    pub updated_at: Option<Instant>,
    pub generation: u64,
}

struct Entry<T> {
    status: QueryStatus,
    data: Option<Arc<T>>,
    error: Option<QueryError>,
    in_flight: Option<SharedFetch<T>>,
    generation: u64,
    updated_at: Option<Instant>,
    invalidated: bool,
}

impl<T> Default for Entry<T> {
    fn default() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
            in_flight: None,
            generation: 0,
            updated_at: None,
            invalidated: false,
        }
    }
}

impl<T> Entry<T> {
    fn fresh_data(&self, config: &QueryConfig) -> Option<Arc<T>> {
        if self.status != QueryStatus::Success || self.invalidated {
            return None;
        }
        let updated_at = self.updated_at?;
        if updated_at.elapsed() < config.stale_time { self.data.clone() } else { None }
    }

    fn is_expired(&self, config: &QueryConfig, now: Instant) -> bool {
        self.in_flight.is_none()
            && self.updated_at.is_some_and(|at| now.saturating_duration_since(at) >= config.gc_time)
    }
}

/// Shared cache of query results for one value type.
///
/// Cloning is cheap; clones share the same entries.
pub struct QueryCache<T> {
    entries: Arc<Mutex<HashMap<QueryKey, Entry<T>>>>,
    generations: Arc<AtomicU64>,
    config: QueryConfig,
}

impl<T> Clone for QueryCache<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            generations: Arc::clone(&self.generations),
            config: self.config,
        }
    }
}

impl<T> std::fmt::Debug for QueryCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.lock().len())
            .field("config", &self.config)
            .finish()
    }
}

impl<T: Send + Sync + 'static> QueryCache<T> {
    #[must_use]
    pub fn new(config: QueryConfig) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            generations: Arc::new(AtomicU64::new(0)),
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Return the cached value for `key` if it is still fresh, otherwise
    /// join the in-flight request or start a new one with `fetcher`.
    ///
    /// `fetcher` is only invoked when a new request is started.
    ///
    /// # Errors
    /// The error of the request this call attached to.
    pub async fn fetch<F, Fut>(&self, key: QueryKey, fetcher: F) -> QueryOutcome<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        let request = {
            let mut entries = self.lock();
            self.evict_expired_locked(&mut entries);
            let entry = entries.entry(key.clone()).or_default();
            if let Some(data) = entry.fresh_data(&self.config) {
                tracing::debug!(%key, "query cache hit");
                return Ok(data);
            }
            if let Some(in_flight) = &entry.in_flight {
                tracing::debug!(%key, generation = entry.generation, "joining in-flight query");
                in_flight.clone()
            } else {
                self.start(&key, entry, fetcher())
            }
        };
        request.await
    }

    /// Start a new request for `key` even if one is already running.
    ///
    /// The older request's result is discarded when it arrives.
    ///
    /// # Errors
    /// The error of the new request.
    pub async fn refetch<F, Fut>(&self, key: QueryKey, fetcher: F) -> QueryOutcome<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        let request = {
            let mut entries = self.lock();
            let entry = entries.entry(key.clone()).or_default();
            self.start(&key, entry, fetcher())
        };
        request.await
    }

    /// Copy of the entry for `key`, if one exists.
    #[must_use]
    pub fn snapshot(&self, key: &QueryKey) -> Option<CacheSnapshot<T>> {
        self.lock().get(key).map(|entry| CacheSnapshot {
            status: entry.status,
            data: entry.data.clone(),
            error: entry.error.clone(),
            updated_at: entry.updated_at,
            generation: entry.generation,
        })
    }

    /// Cached data for `key` regardless of freshness.
    #[must_use]
    pub fn get_data(&self, key: &QueryKey) -> Option<Arc<T>> {
        self.lock().get(key).and_then(|entry| entry.data.clone())
    }

    /// Whether a request for `key` is currently running.
    #[must_use]
    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        self.lock().get(key).is_some_and(|entry| entry.in_flight.is_some())
    }

    /// Mark `key` stale so the next [`QueryCache::fetch`] goes to the network.
    pub fn invalidate(&self, key: &QueryKey) {
        if let Some(entry) = self.lock().get_mut(key) {
            entry.invalidated = true;
        }
    }

    /// Mark every key matching `predicate` stale. Returns how many were marked.
    pub fn invalidate_where(&self, predicate: impl Fn(&QueryKey) -> bool) -> usize {
        let mut marked = 0usize;
        for (key, entry) in self.lock().iter_mut() {
            if predicate(key) {
                entry.invalidated = true;
                marked = marked.saturating_add(1);
            }
        }
        marked
    }

    /// Drop the entry for `key`. A request still running for it will not
    /// recreate the entry.
    pub fn remove(&self, key: &QueryKey) {
        self.lock().remove(key);
    }

    /// Drop settled entries older than the configured retention.
    /// Returns how many were evicted.
    pub fn evict_expired(&self) -> usize {
        let mut entries = self.lock();
        self.evict_expired_locked(&mut entries)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn start<Fut>(&self, key: &QueryKey, entry: &mut Entry<T>, fut: Fut) -> SharedFetch<T>
    where
        Fut: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        let generation = self.generations.fetch_add(1, Ordering::SeqCst).wrapping_add(1);
        entry.generation = generation;
        tracing::debug!(%key, generation, "starting query");

        let cache = self.clone();
        let task_key = key.clone();
        let task = tokio::spawn(async move {
            let outcome = fut.await.map(Arc::new).map_err(QueryError::from);
            cache.settle(&task_key, generation, &outcome);
            outcome
        });

        let cache = self.clone();
        let task_key = key.clone();
        let request = async move {
            match task.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::warn!(key = %task_key, generation, "query task failed: {e}");
                    let outcome = Err(QueryError::Aborted(e.to_string()));
                    cache.settle(&task_key, generation, &outcome);
                    outcome
                },
            }
        }
        .boxed()
        .shared();

        entry.status = QueryStatus::Fetching;
        entry.in_flight = Some(request.clone());
        request
    }

    fn settle(&self, key: &QueryKey, generation: u64, outcome: &QueryOutcome<T>) {
        let mut entries = self.lock();
        let Some(entry) = entries.get_mut(key) else {
            tracing::debug!(%key, "query settled after its entry was removed");
            return;
        };
        if entry.generation != generation {
            tracing::debug!(
                %key,
                generation,
                current = entry.generation,
                "discarding superseded query result"
            );
            return;
        }
        entry.in_flight = None;
        entry.updated_at = Some(Instant::now());
        match outcome {
            Ok(data) => {
                entry.status = QueryStatus::Success;
                entry.data = Some(Arc::clone(data));
                entry.error = None;
                entry.invalidated = false;
            },
            Err(e) => {
                tracing::debug!(%key, "query failed: {e}");
                entry.status = QueryStatus::Error;
                entry.error = Some(e.clone());
            },
        }
    }

    fn evict_expired_locked(&self, entries: &mut HashMap<QueryKey, Entry<T>>) -> usize {
        let now = Instant::now();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(&self.config, now));
        let evicted = before.saturating_sub(entries.len());
        if evicted > 0 {
            tracing::debug!(evicted, "evicted expired query entries");
        }
        evicted
    }
}

impl<T> QueryCache<T> {
    fn lock(&self) -> MutexGuard<'_, HashMap<QueryKey, Entry<T>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
