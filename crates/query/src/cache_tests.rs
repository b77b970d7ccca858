#[cfg(test)]
mod tests {
    use std::future::{Ready, ready};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use folio_client::ClientError;
    use folio_core::{ProjectFilters, ProjectStatus, QueryKey};
    use tokio::sync::oneshot;

    use crate::cache::{QueryCache, QueryStatus};
    use crate::config::QueryConfig;
    use crate::error::QueryError;

    fn key(page: u32) -> QueryKey {
        QueryKey::project_list(&ProjectFilters::default(), page)
    }

    fn counting(
        calls: &Arc<AtomicUsize>,
        value: u32,
    ) -> impl FnOnce() -> Ready<Result<u32, ClientError>> + use<> {
        let calls = Arc::clone(calls);
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            ready(Ok(value))
        }
    }

    fn failing(calls: &Arc<AtomicUsize>) -> impl FnOnce() -> Ready<Result<u32, ClientError>> + use<> {
        let calls = Arc::clone(calls);
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            ready(Err(ClientError::HttpStatus { code: 500, detail: None }))
        }
    }

    #[tokio::test]
    async fn test_concurrent_fetches_share_one_request() {
        let cache: QueryCache<u32> = QueryCache::new(QueryConfig::default());
        let calls = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = oneshot::channel::<u32>();

        let first_calls = Arc::clone(&calls);
        let first = cache.fetch(key(1), move || {
            first_calls.fetch_add(1, Ordering::SeqCst);
            async move { Ok(rx.await.unwrap_or_default()) }
        });
        let second = cache.fetch(key(1), counting(&calls, 99));
        let release = async {
            tokio::task::yield_now().await;
            tx.send(7).unwrap();
        };

        let (a, b, ()) = tokio::join!(first, second, release);

        assert_eq!(*a.unwrap(), 7);
        assert_eq!(*b.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_distinct_keys_fetch_independently() {
        let cache: QueryCache<u32> = QueryCache::new(QueryConfig::default());
        let calls = Arc::new(AtomicUsize::new(0));

        let (a, b) = tokio::join!(
            cache.fetch(key(1), counting(&calls, 1)),
            cache.fetch(key(2), counting(&calls, 2)),
        );

        assert_eq!(*a.unwrap(), 1);
        assert_eq!(*b.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn test_equal_filters_hit_the_same_entry() {
        let cache: QueryCache<u32> = QueryCache::new(QueryConfig::default());
        let calls = Arc::new(AtomicUsize::new(0));
        let ab = ProjectFilters::new()
            .with_status(ProjectStatus::Completed)
            .with_status(ProjectStatus::Planned);
        let ba = ProjectFilters::new()
            .with_status(ProjectStatus::Planned)
            .with_status(ProjectStatus::Completed);

        cache.fetch(QueryKey::project_list(&ab, 1), counting(&calls, 1)).await.unwrap();
        let hit = cache.fetch(QueryKey::project_list(&ba, 1), counting(&calls, 2)).await.unwrap();

        assert_eq!(*hit, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_refetch_discards_older_response() {
        let cache: QueryCache<u32> = QueryCache::new(QueryConfig::default());
        let (old_tx, old_rx) = oneshot::channel::<u32>();
        let (new_tx, new_rx) = oneshot::channel::<u32>();

        let old_cache = cache.clone();
        let old = tokio::spawn(async move {
            old_cache.fetch(key(1), move || async move { Ok(old_rx.await.unwrap_or_default()) }).await
        });
        while !cache.is_fetching(&key(1)) {
            tokio::task::yield_now().await;
        }

        let new_cache = cache.clone();
        let new = tokio::spawn(async move {
            new_cache
                .refetch(key(1), move || async move { Ok(new_rx.await.unwrap_or_default()) })
                .await
        });
        while cache.snapshot(&key(1)).map(|s| s.generation) != Some(2) {
            tokio::task::yield_now().await;
        }

        new_tx.send(2).unwrap();
        assert_eq!(*new.await.unwrap().unwrap(), 2);

        old_tx.send(1).unwrap();
        assert_eq!(*old.await.unwrap().unwrap(), 1);

        let snapshot = cache.snapshot(&key(1)).unwrap();
        assert_eq!(snapshot.status, QueryStatus::Success);
        assert_eq!(snapshot.data.as_deref(), Some(&2));
        assert_eq!(snapshot.generation, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_data_is_served_until_stale() {
        let config = QueryConfig::default().with_stale_time(Duration::from_secs(30));
        let cache: QueryCache<u32> = QueryCache::new(config);
        let calls = Arc::new(AtomicUsize::new(0));

        cache.fetch(key(1), counting(&calls, 1)).await.unwrap();
        tokio::time::advance(Duration::from_secs(29)).await;
        let cached = cache.fetch(key(1), counting(&calls, 2)).await.unwrap();
        assert_eq!(*cached, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(2)).await;
        let refreshed = cache.fetch(key(1), counting(&calls, 3)).await.unwrap();
        assert_eq!(*refreshed, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settled_entries_are_evicted_after_gc_time() {
        let config = QueryConfig::default()
            .with_stale_time(Duration::from_secs(30))
            .with_gc_time(Duration::from_secs(300));
        let cache: QueryCache<u32> = QueryCache::new(config);
        let calls = Arc::new(AtomicUsize::new(0));

        cache.fetch(key(1), counting(&calls, 1)).await.unwrap();
        tokio::time::advance(Duration::from_secs(120)).await;
        assert_eq!(cache.evict_expired(), 0);
        assert!(cache.get_data(&key(1)).is_some());

        tokio::time::advance(Duration::from_secs(200)).await;
        assert_eq!(cache.evict_expired(), 1);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_invalidate_forces_next_fetch() {
        let cache: QueryCache<u32> = QueryCache::new(QueryConfig::default());
        let calls = Arc::new(AtomicUsize::new(0));

        cache.fetch(key(1), counting(&calls, 1)).await.unwrap();
        cache.invalidate(&key(1));
        assert_eq!(cache.get_data(&key(1)).as_deref(), Some(&1));

        let refreshed = cache.fetch(key(1), counting(&calls, 2)).await.unwrap();
        assert_eq!(*refreshed, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_where_marks_matching_keys() {
        let cache: QueryCache<u32> = QueryCache::new(QueryConfig::default());
        let calls = Arc::new(AtomicUsize::new(0));

        cache.fetch(key(1), counting(&calls, 1)).await.unwrap();
        cache.fetch(key(2), counting(&calls, 2)).await.unwrap();
        cache.fetch(QueryKey::CurrentUser, counting(&calls, 3)).await.unwrap();

        assert_eq!(cache.invalidate_where(QueryKey::is_project), 2);

        cache.fetch(QueryKey::CurrentUser, counting(&calls, 4)).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_error_is_recorded_and_retried() {
        let cache: QueryCache<u32> = QueryCache::new(QueryConfig::default());
        let calls = Arc::new(AtomicUsize::new(0));

        let err = cache.fetch(key(1), failing(&calls)).await.unwrap_err();
        assert_eq!(err.client_error().and_then(ClientError::status_code), Some(500));
        let snapshot = cache.snapshot(&key(1)).unwrap();
        assert_eq!(snapshot.status, QueryStatus::Error);
        assert!(snapshot.data.is_none());

        let value = cache.fetch(key(1), counting(&calls, 5)).await.unwrap();
        assert_eq!(*value, 5);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_error_keeps_previous_data() {
        let cache: QueryCache<u32> = QueryCache::new(QueryConfig::default());
        let calls = Arc::new(AtomicUsize::new(0));

        cache.fetch(key(1), counting(&calls, 1)).await.unwrap();
        assert!(cache.refetch(key(1), failing(&calls)).await.is_err());

        let snapshot = cache.snapshot(&key(1)).unwrap();
        assert_eq!(snapshot.status, QueryStatus::Error);
        assert_eq!(snapshot.data.as_deref(), Some(&1));
    }

    #[tokio::test]
    async fn test_removed_entry_is_not_recreated() {
        let cache: QueryCache<u32> = QueryCache::new(QueryConfig::default());
        let (tx, rx) = oneshot::channel::<u32>();

        let task_cache = cache.clone();
        let pending = tokio::spawn(async move {
            task_cache.fetch(key(1), move || async move { Ok(rx.await.unwrap_or_default()) }).await
        });
        while !cache.is_fetching(&key(1)) {
            tokio::task::yield_now().await;
        }

        cache.remove(&key(1));
        tx.send(4).unwrap();

        assert_eq!(*pending.await.unwrap().unwrap(), 4);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_response_from_before_remove_does_not_settle_new_request() {
        let cache: QueryCache<u32> = QueryCache::new(QueryConfig::default());
        let calls = Arc::new(AtomicUsize::new(0));
        let (old_tx, old_rx) = oneshot::channel::<u32>();
        let (new_tx, new_rx) = oneshot::channel::<u32>();

        let old_cache = cache.clone();
        let old = tokio::spawn(async move {
            old_cache.fetch(key(1), move || async move { Ok(old_rx.await.unwrap_or_default()) }).await
        });
        while !cache.is_fetching(&key(1)) {
            tokio::task::yield_now().await;
        }
        cache.remove(&key(1));

        let new_cache = cache.clone();
        let new = tokio::spawn(async move {
            new_cache.fetch(key(1), move || async move { Ok(new_rx.await.unwrap_or_default()) }).await
        });
        while !cache.is_fetching(&key(1)) {
            tokio::task::yield_now().await;
        }

        old_tx.send(111).unwrap();
        assert_eq!(*old.await.unwrap().unwrap(), 111);

        let snapshot = cache.snapshot(&key(1)).unwrap();
        assert_eq!(snapshot.status, QueryStatus::Fetching);
        assert!(snapshot.data.is_none());
        assert!(cache.is_fetching(&key(1)));

        let joined = cache.fetch(key(1), counting(&calls, 9));
        let release = async {
            tokio::task::yield_now().await;
            new_tx.send(222).unwrap();
        };
        let (joined, ()) = tokio::join!(joined, release);

        assert_eq!(*joined.unwrap(), 222);
        assert_eq!(*new.await.unwrap().unwrap(), 222);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(cache.get_data(&key(1)).as_deref(), Some(&222));
    }

    fn exploding() -> Result<u32, ClientError> {
        panic!("boom")
    }

    #[tokio::test]
    async fn test_panicked_fetch_does_not_wedge_key() {
        let cache: QueryCache<u32> = QueryCache::new(QueryConfig::default());
        let calls = Arc::new(AtomicUsize::new(0));

        let err = cache.fetch(key(1), || async { exploding() }).await.unwrap_err();
        assert!(matches!(err, QueryError::Aborted(_)));

        let snapshot = cache.snapshot(&key(1)).unwrap();
        assert_eq!(snapshot.status, QueryStatus::Error);
        assert!(!cache.is_fetching(&key(1)));

        let value = cache.fetch(key(1), counting(&calls, 5)).await.unwrap();
        assert_eq!(*value, 5);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
