//! Optional caching of network snapshots.
//!
//! By default every request loads fresh stop and line records. With a TTL
//! configured, the raw records are reused for at most that long; the transit
//! graph itself is still rebuilt per request from whatever snapshot is
//! returned here.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::network::{NetworkError, NetworkSnapshot, NetworkSource, load_snapshot};

/// Configuration for the snapshot cache.
#[derive(Debug, Clone, Default)]
pub struct CacheConfig {
    /// TTL for the cached snapshot. `None` disables caching.
    pub ttl: Option<Duration>,
}

impl CacheConfig {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { ttl: Some(ttl) }
    }
}

/// A network source with an optional snapshot cache in front of it.
pub struct CachedNetwork<S> {
    source: S,
    /// There is only ever one snapshot, stored under the unit key.
    snapshot: Option<MokaCache<(), Arc<NetworkSnapshot>>>,
}

impl<S: NetworkSource> CachedNetwork<S> {
    /// Create a new cached source.
    pub fn new(source: S, config: &CacheConfig) -> Self {
        let snapshot = config.ttl.map(|ttl| {
            MokaCache::builder()
                .time_to_live(ttl)
                .max_capacity(1)
                .build()
        });
        Self { source, snapshot }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Whether a TTL is configured.
    pub fn is_caching(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Get the current stops and lines, using the cache if enabled and warm.
    pub async fn snapshot(&self) -> Result<Arc<NetworkSnapshot>, NetworkError> {
        let Some(cache) = &self.snapshot else {
            return Ok(Arc::new(load_snapshot(&self.source).await?));
        };

        if let Some(hit) = cache.get(&()).await {
            debug!("Network snapshot cache hit");
            return Ok(hit);
        }

        let fresh = Arc::new(load_snapshot(&self.source).await?);
        cache.insert((), fresh.clone()).await;
        Ok(fresh)
    }

    /// Drop the cached snapshot so the next request reloads.
    pub async fn invalidate(&self) {
        if let Some(cache) = &self.snapshot {
            cache.invalidate(&()).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::network::{LineRecord, StopRecord};

    /// Source that counts loads.
    #[derive(Default)]
    struct CountingSource {
        loads: AtomicUsize,
    }

    impl NetworkSource for CountingSource {
        fn load_stops(
            &self,
        ) -> impl Future<Output = Result<Vec<StopRecord>, NetworkError>> + Send {
            self.loads.fetch_add(1, Ordering::SeqCst);
            async { Ok(Vec::new()) }
        }

        fn load_lines(
            &self,
        ) -> impl Future<Output = Result<Vec<LineRecord>, NetworkError>> + Send {
            async { Ok(Vec::new()) }
        }
    }

    #[tokio::test]
    async fn disabled_by_default() {
        let cached = CachedNetwork::new(CountingSource::default(), &CacheConfig::default());
        assert!(!cached.is_caching());

        cached.snapshot().await.unwrap();
        cached.snapshot().await.unwrap();
        assert_eq!(cached.source().loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn ttl_reuses_snapshot() {
        let config = CacheConfig::with_ttl(Duration::from_secs(60));
        let cached = CachedNetwork::new(CountingSource::default(), &config);
        assert!(cached.is_caching());

        cached.snapshot().await.unwrap();
        cached.snapshot().await.unwrap();
        assert_eq!(cached.source().loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalidate_forces_reload() {
        let config = CacheConfig::with_ttl(Duration::from_secs(60));
        let cached = CachedNetwork::new(CountingSource::default(), &config);

        cached.snapshot().await.unwrap();
        cached.invalidate().await;
        cached.snapshot().await.unwrap();
        assert_eq!(cached.source().loads.load(Ordering::SeqCst), 2);
    }
}
