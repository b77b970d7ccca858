#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use folio_client::ClientError;
    use folio_core::{ProjectFilters, ProjectStatus, QueryKey};
    use tokio::sync::Notify;

    use crate::cache::{QueryCache, QueryStatus};
    use crate::config::QueryConfig;
    use crate::observer::QueryObserver;

    fn key(page: u32) -> QueryKey {
        QueryKey::project_list(&ProjectFilters::default(), page)
    }

    fn observer(config: QueryConfig) -> (QueryCache<u32>, QueryObserver<u32>) {
        let cache = QueryCache::new(config);
        let observer = QueryObserver::new(cache.clone());
        (cache, observer)
    }

    fn value(
        v: u32,
    ) -> impl Fn() -> std::future::Ready<Result<u32, ClientError>> + Send + Sync + 'static {
        move || std::future::ready(Ok(v))
    }

    fn gated(
        gate: &Arc<Notify>,
        v: u32,
    ) -> impl Fn() -> std::pin::Pin<Box<dyn Future<Output = Result<u32, ClientError>> + Send>>
    + Send
    + Sync
    + 'static
    + use<> {
        let gate = Arc::clone(gate);
        move || {
            let gate = Arc::clone(&gate);
            Box::pin(async move {
                gate.notified().await;
                Ok(v)
            })
        }
    }

    #[tokio::test]
    async fn test_first_load_is_pending_then_success() {
        let (_cache, observer) = observer(QueryConfig::default());
        assert_eq!(observer.current().status, QueryStatus::Idle);

        observer.set_key(key(1), value(12));
        let pending = observer.current();
        assert!(pending.is_pending());
        assert!(pending.is_fetching());

        let settled = observer.settled().await;
        assert!(settled.is_success());
        assert!(!settled.is_pending());
        assert_eq!(settled.data.as_deref(), Some(&12));
        assert_eq!(settled.key, Some(key(1)));
    }

    #[tokio::test]
    async fn test_previous_page_stays_visible_while_next_loads() {
        let (_cache, observer) = observer(QueryConfig::default());
        let gate = Arc::new(Notify::new());

        observer.set_key(key(1), value(1));
        observer.settled().await;

        observer.set_key(key(2), gated(&gate, 2));
        let loading = observer.current();
        assert_eq!(loading.key, Some(key(2)));
        assert!(loading.is_fetching());
        assert!(loading.is_placeholder);
        assert!(!loading.is_pending());
        assert_eq!(loading.data.as_deref(), Some(&1));

        gate.notify_one();
        let settled = observer.settled().await;
        assert!(!settled.is_placeholder);
        assert_eq!(settled.data.as_deref(), Some(&2));
    }

    #[tokio::test]
    async fn test_without_keep_previous_data_new_key_is_pending() {
        let (_cache, observer) = observer(QueryConfig::default().with_keep_previous_data(false));
        let gate = Arc::new(Notify::new());

        observer.set_key(key(1), value(1));
        observer.settled().await;
        observer.set_key(key(2), gated(&gate, 2));

        let loading = observer.current();
        assert!(loading.is_pending());
        assert!(loading.data.is_none());
        gate.notify_one();
        assert_eq!(observer.settled().await.data.as_deref(), Some(&2));
    }

    #[tokio::test]
    async fn test_returning_to_cached_key_shows_it_immediately() {
        let (_cache, observer) = observer(QueryConfig::default());

        observer.set_key(key(1), value(1));
        observer.settled().await;
        observer.set_key(key(2), value(2));
        observer.settled().await;

        observer.set_key(key(1), value(100));
        let current = observer.current();
        assert_eq!(current.data.as_deref(), Some(&1));
        assert!(!current.is_placeholder);
        assert_eq!(observer.settled().await.data.as_deref(), Some(&1));
    }

    #[tokio::test]
    async fn test_result_for_abandoned_key_is_ignored() {
        let (cache, observer) = observer(QueryConfig::default());
        let gate = Arc::new(Notify::new());
        let completed = ProjectFilters::new().with_status(ProjectStatus::Completed);
        let planned = ProjectFilters::new().with_status(ProjectStatus::Planned);
        let slow = QueryKey::project_list(&completed, 1);
        let fast = QueryKey::project_list(&planned, 1);

        observer.set_key(slow.clone(), gated(&gate, 1));
        while !cache.is_fetching(&slow) {
            tokio::task::yield_now().await;
        }
        observer.set_key(fast.clone(), value(2));
        assert_eq!(observer.settled().await.data.as_deref(), Some(&2));

        gate.notify_one();
        while cache.get_data(&slow).is_none() {
            tokio::task::yield_now().await;
        }

        let current = observer.current();
        assert_eq!(current.key, Some(fast));
        assert_eq!(current.data.as_deref(), Some(&2));
    }

    #[tokio::test]
    async fn test_setting_same_key_is_noop() {
        let (_cache, observer) = observer(QueryConfig::default());
        let calls = Arc::new(AtomicUsize::new(0));
        let counting = {
            let calls = Arc::clone(&calls);
            move || {
                calls.fetch_add(1, Ordering::SeqCst);
                std::future::ready(Ok::<u32, ClientError>(3))
            }
        };

        observer.set_key(key(1), counting.clone());
        observer.set_key(key(1), counting);
        observer.settled().await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_error_then_refetch_recovers() {
        let (_cache, observer) = observer(QueryConfig::default());
        let calls = Arc::new(AtomicUsize::new(0));
        let flaky = {
            let calls = Arc::clone(&calls);
            move || {
                let attempt = calls.fetch_add(1, Ordering::SeqCst);
                std::future::ready(if attempt == 0 {
                    Err(ClientError::HttpStatus { code: 503, detail: None })
                } else {
                    Ok(8)
                })
            }
        };

        observer.set_key(key(1), flaky);
        let failed = observer.settled().await;
        assert!(failed.is_error());
        assert!(!failed.is_pending());
        assert!(!failed.is_not_found());
        assert!(failed.data.is_none());

        observer.refetch();
        let recovered = observer.settled().await;
        assert!(recovered.is_success());
        assert!(recovered.error.is_none());
        assert_eq!(recovered.data.as_deref(), Some(&8));
    }

    #[tokio::test]
    async fn test_failed_key_drops_placeholder() {
        let (_cache, observer) = observer(QueryConfig::default());

        observer.set_key(key(1), value(1));
        observer.settled().await;
        observer.set_key(key(2), || {
            std::future::ready(Err::<u32, _>(ClientError::NotFound("gone".to_owned())))
        });

        let settled = observer.settled().await;
        assert!(settled.is_error());
        assert!(settled.is_not_found());
        assert!(settled.data.is_none());
        assert!(!settled.is_placeholder);
    }

    #[tokio::test]
    async fn test_clear_resets_and_ignores_pending_result() {
        let (_cache, observer) = observer(QueryConfig::default());
        let gate = Arc::new(Notify::new());

        observer.set_key(key(1), gated(&gate, 1));
        observer.clear();
        assert!(observer.key().is_none());
        assert_eq!(observer.current().status, QueryStatus::Idle);

        gate.notify_one();
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        let current = observer.current();
        assert_eq!(current.status, QueryStatus::Idle);
        assert!(current.data.is_none());
    }

    #[tokio::test]
    async fn test_subscribers_are_notified() {
        let (_cache, observer) = observer(QueryConfig::default());
        let mut rx = observer.subscribe();

        observer.set_key(key(1), value(5));
        let result = rx.wait_for(|r| r.is_success()).await.unwrap().clone();
        assert_eq!(result.data.as_deref(), Some(&5));
    }

    #[tokio::test]
    async fn test_dropped_observer_leaves_cache_to_settle() {
        let (cache, observer) = observer(QueryConfig::default());
        let gate = Arc::new(Notify::new());

        observer.set_key(key(1), gated(&gate, 9));
        while !cache.is_fetching(&key(1)) {
            tokio::task::yield_now().await;
        }
        drop(observer);
        gate.notify_one();

        while cache.get_data(&key(1)).is_none() {
            tokio::task::yield_now().await;
        }
        assert_eq!(cache.get_data(&key(1)).as_deref(), Some(&9));
    }
}
