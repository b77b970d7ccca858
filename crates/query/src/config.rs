use std::time::Duration;

use folio_core::{DEFAULT_QUERY_GC_SECS, DEFAULT_QUERY_STALE_SECS, env_secs};

/// Environment variable overriding [`QueryConfig::stale_time`] (seconds).
pub const QUERY_STALE_ENV: &str = "FOLIO_QUERY_STALE_SECS";
/// Environment variable overriding [`QueryConfig::gc_time`] (seconds).
pub const QUERY_GC_ENV: &str = "FOLIO_QUERY_GC_SECS";

/// Cache timing and presentation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryConfig {
    /// How long a successful result is served from cache without refetching.
    pub stale_time: Duration,
    /// How long a settled entry is retained before eviction.
    pub gc_time: Duration,
    /// Keep showing the previous key's data while a new key loads.
    pub keep_previous_data: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            stale_time: Duration::from_secs(DEFAULT_QUERY_STALE_SECS),
            gc_time: Duration::from_secs(DEFAULT_QUERY_GC_SECS),
            keep_previous_data: true,
        }
    }
}

impl QueryConfig {
    /// Reads `FOLIO_QUERY_STALE_SECS` and `FOLIO_QUERY_GC_SECS`, falling back
    /// to the defaults on missing or invalid values.
    #[must_use]
    pub fn from_env() -> Self {
        let stale_time = env_secs(QUERY_STALE_ENV, DEFAULT_QUERY_STALE_SECS);
        let gc_time = env_secs(QUERY_GC_ENV, DEFAULT_QUERY_GC_SECS);
        if gc_time < stale_time {
            tracing::warn!(
                stale_secs = stale_time.as_secs(),
                gc_secs = gc_time.as_secs(),
                "query gc time is shorter than stale time; fresh entries may be evicted early"
            );
        }
        Self {
            stale_time,
            gc_time,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_stale_time(mut self, stale_time: Duration) -> Self {
        self.stale_time = stale_time;
        self
    }

    #[must_use]
    pub const fn with_gc_time(mut self, gc_time: Duration) -> Self {
        self.gc_time = gc_time;
        self
    }

    #[must_use]
    pub const fn with_keep_previous_data(mut self, keep: bool) -> Self {
        self.keep_previous_data = keep;
        self
    }
}
