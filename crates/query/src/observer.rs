//! Presentation-facing view of one query at a time.
//!
//! A [`QueryObserver`] follows a single current key. Switching keys keeps the
//! previous key's data visible as a placeholder (when enabled) until the new
//! key resolves, and a result that arrives for a key the observer no longer
//! follows is dropped. Dropping the observer aborts its pending work.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use folio_client::ClientError;
use folio_core::QueryKey;
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::cache::{QueryCache, QueryOutcome, QueryStatus};
use crate::error::QueryError;

type Fetcher<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<T, ClientError>> + Send + Sync>;

/// What presentation code renders for the current key.
#[derive(Debug)]
pub struct QueryResult<T> {
    pub key: Option<QueryKey>,
    pub status: QueryStatus,
    pub data: Option<Arc<T>>,
    pub error: Option<QueryError>,
    /// `data` belongs to a previous key and is shown while the current one loads.
    pub is_placeholder: bool,
}

impl<T> Clone for QueryResult<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            status: self.status,
            data: self.data.clone(),
            error: self.error.clone(),
            is_placeholder: self.is_placeholder,
        }
    }
}

impl<T> Default for QueryResult<T> {
    fn default() -> Self {
        Self { key: None, status: QueryStatus::Idle, data: None, error: None, is_placeholder: false }
    }
}

impl<T> QueryResult<T> {
    /// Nothing to show yet: no data (not even a placeholder) and no error.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.data.is_none() && self.status != QueryStatus::Error
    }

    /// A request for the current key is running.
    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.status == QueryStatus::Fetching
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status == QueryStatus::Error
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == QueryStatus::Success
    }

    /// The current key failed because the resource does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.error.as_ref().is_some_and(QueryError::is_not_found)
    }
}

struct Tracking<T> {
    key: Option<QueryKey>,
    fetcher: Option<Fetcher<T>>,
    task: Option<JoinHandle<()>>,
}

/// Follows one query key and publishes its [`QueryResult`].
///
/// Must be driven from within a Tokio runtime: key changes and refetches
/// spawn the work that applies results.
pub struct QueryObserver<T> {
    cache: QueryCache<T>,
    keep_previous_data: bool,
    state: Arc<watch::Sender<QueryResult<T>>>,
    ticket: Arc<AtomicU64>,
    tracking: Mutex<Tracking<T>>,
}

impl<T> std::fmt::Debug for QueryObserver<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryObserver")
            .field("keep_previous_data", &self.keep_previous_data)
            .field("ticket", &self.ticket.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl<T: Send + Sync + 'static> QueryObserver<T> {
    /// Creates an observer over `cache`, taking the placeholder policy from
    /// the cache's configuration.
    #[must_use]
    pub fn new(cache: QueryCache<T>) -> Self {
        let keep_previous_data = cache.config().keep_previous_data;
        let (state, _) = watch::channel(QueryResult::default());
        Self {
            cache,
            keep_previous_data,
            state: Arc::new(state),
            ticket: Arc::new(AtomicU64::new(0)),
            tracking: Mutex::new(Tracking { key: None, fetcher: None, task: None }),
        }
    }

    /// Follow `key`, loading it with `fetcher` unless the cache already holds
    /// fresh data. Setting the key that is already followed is a no-op.
    pub fn set_key<F, Fut>(&self, key: QueryKey, fetcher: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        let mut tracking = self.lock();
        if tracking.key.as_ref() == Some(&key) {
            return;
        }
        let fetcher: Fetcher<T> = Arc::new(move || fetcher().boxed());
        tracking.key = Some(key);
        tracking.fetcher = Some(fetcher);
        self.run(&mut tracking, false);
    }

    /// Re-request the current key, bypassing the cache and superseding any
    /// request already running for it. No-op when no key is followed.
    pub fn refetch(&self) {
        let mut tracking = self.lock();
        self.run(&mut tracking, true);
    }

    /// Stop following any key and reset to the idle state.
    pub fn clear(&self) {
        let mut tracking = self.lock();
        self.ticket.fetch_add(1, Ordering::SeqCst);
        if let Some(task) = tracking.task.take() {
            task.abort();
        }
        tracking.key = None;
        tracking.fetcher = None;
        self.state.send_replace(QueryResult::default());
    }

    /// The key currently followed.
    #[must_use]
    pub fn key(&self) -> Option<QueryKey> {
        self.lock().key.clone()
    }

    /// Latest published result.
    #[must_use]
    pub fn current(&self) -> QueryResult<T> {
        self.state.borrow().clone()
    }

    /// Receiver notified on every published change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QueryResult<T>> {
        self.state.subscribe()
    }

    /// Wait until the current key is no longer fetching and return its result.
    pub async fn settled(&self) -> QueryResult<T> {
        let mut rx = self.subscribe();
        match rx.wait_for(|result| !result.is_fetching()).await {
            Ok(result) => result.clone(),
            Err(_) => self.current(),
        }
    }

    fn run(&self, tracking: &mut Tracking<T>, force: bool) {
        let (Some(key), Some(fetcher)) = (tracking.key.clone(), tracking.fetcher.clone()) else {
            return;
        };
        if let Some(task) = tracking.task.take() {
            task.abort();
        }
        let ticket = self.ticket.fetch_add(1, Ordering::SeqCst).wrapping_add(1);

        let cached = self.cache.get_data(&key);
        let keep_previous = self.keep_previous_data;
        let pending_key = key.clone();
        self.state.send_modify(|result| {
            let previous = result.data.take();
            let (data, is_placeholder) = match cached {
                Some(data) => (Some(data), false),
                None if keep_previous && previous.is_some() => (previous, true),
                None => (None, false),
            };
            *result = QueryResult {
                key: Some(pending_key),
                status: QueryStatus::Fetching,
                data,
                error: None,
                is_placeholder,
            };
        });

        let cache = self.cache.clone();
        let state = Arc::clone(&self.state);
        let current_ticket = Arc::clone(&self.ticket);
        tracking.task = Some(tokio::spawn(async move {
            let outcome = if force {
                cache.refetch(key, move || fetcher()).await
            } else {
                cache.fetch(key, move || fetcher()).await
            };
            state.send_if_modified(|result| {
                if current_ticket.load(Ordering::SeqCst) != ticket {
                    tracing::debug!(ticket, "dropping result for a key no longer observed");
                    return false;
                }
                apply(result, outcome);
                true
            });
        }));
    }

    fn lock(&self) -> MutexGuard<'_, Tracking<T>> {
        self.tracking.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn apply<T>(result: &mut QueryResult<T>, outcome: QueryOutcome<T>) {
    match outcome {
        Ok(data) => {
            result.status = QueryStatus::Success;
            result.data = Some(data);
            result.error = None;
            result.is_placeholder = false;
        },
        Err(e) => {
            result.status = QueryStatus::Error;
            result.error = Some(e);
            if result.is_placeholder {
                result.data = None;
                result.is_placeholder = false;
            }
        },
    }
}

impl<T> Drop for QueryObserver<T> {
    fn drop(&mut self) {
        self.ticket.fetch_add(1, Ordering::SeqCst);
        let tracking = self.tracking.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(task) = tracking.task.take() {
            task.abort();
        }
    }
}
