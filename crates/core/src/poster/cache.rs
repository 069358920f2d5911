//! Periodically refreshed snapshot of every known poster path.

use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::resolver::{explain, resolve};
use super::source::PosterSource;
use super::types::{CandidateSet, PosterError, Resolution, ResolutionTrace};
use crate::metrics::{POSTER_CACHE_ENTRIES, POSTER_CACHE_REFRESHES};

/// Default time between refreshes.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30 * 60);

/// An immutable, fully built listing of posters.
#[derive(Debug, Clone, Default)]
pub struct PosterSnapshot {
    candidates: Arc<CandidateSet>,
    /// When the listing was last fetched successfully.
    refreshed_at: Option<DateTime<Utc>>,
    /// When a refresh was last attempted, successful or not.
    checked_at: Option<Instant>,
}

impl PosterSnapshot {
    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// True before the first load and once `interval` has passed since the
    /// last attempt.
    fn is_stale(&self, interval: Duration) -> bool {
        self.checked_at.is_none_or(|at| at.elapsed() >= interval)
    }
}

/// Owns the poster listing and keeps it fresh.
///
/// Readers always see a complete snapshot: a refresh builds the new
/// candidate set off to the side and publishes it with a single pointer
/// swap. Refreshes are serialized so a burst of requests arriving on a
/// stale cache triggers one listing, not one per request.
pub struct PosterCache {
    source: Arc<dyn PosterSource>,
    refresh_interval: Duration,
    snapshot: RwLock<Arc<PosterSnapshot>>,
    refresh_lock: Mutex<()>,
}

impl std::fmt::Debug for PosterCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PosterCache")
            .field("source", &self.source.name())
            .field("refresh_interval", &self.refresh_interval)
            .field("entries", &self.snapshot().len())
            .finish()
    }
}

impl PosterCache {
    /// Create an empty cache. Nothing is listed until first use.
    pub fn new(source: Arc<dyn PosterSource>, refresh_interval: Duration) -> Self {
        Self {
            source,
            refresh_interval,
            snapshot: RwLock::new(Arc::new(PosterSnapshot::default())),
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// The currently published snapshot, without refreshing.
    pub fn snapshot(&self) -> Arc<PosterSnapshot> {
        let guard = self.snapshot.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// The published snapshot, refreshed first if it is stale.
    ///
    /// If a refresh fails but an earlier listing exists, the earlier
    /// listing is kept and served; the next attempt waits a full interval.
    pub async fn current(&self) -> Result<Arc<PosterSnapshot>, PosterError> {
        let snapshot = self.snapshot();
        if !snapshot.is_stale(self.refresh_interval) {
            return Ok(snapshot);
        }

        let _guard = self.refresh_lock.lock().await;

        // Another caller may have refreshed while we waited for the lock.
        let snapshot = self.snapshot();
        if !snapshot.is_stale(self.refresh_interval) {
            return Ok(snapshot);
        }

        match self.reload_locked().await {
            Ok(fresh) => Ok(fresh),
            Err(e) if snapshot.refreshed_at.is_some() => {
                warn!(
                    "Poster refresh from {} failed, keeping {} cached entries: {}",
                    self.source.name(),
                    snapshot.len(),
                    e
                );
                let kept = Arc::new(PosterSnapshot {
                    candidates: Arc::clone(&snapshot.candidates),
                    refreshed_at: snapshot.refreshed_at,
                    checked_at: Some(Instant::now()),
                });
                self.publish(Arc::clone(&kept));
                Ok(kept)
            }
            Err(e) => Err(e),
        }
    }

    /// Re-list the source now, regardless of staleness.
    pub async fn force_reload(&self) -> Result<Arc<PosterSnapshot>, PosterError> {
        let _guard = self.refresh_lock.lock().await;
        self.reload_locked().await
    }

    /// Resolve a title against the current snapshot.
    pub async fn resolve(&self, title: &str) -> Result<Resolution, PosterError> {
        let snapshot = self.current().await?;
        Ok(resolve(title, snapshot.candidates()))
    }

    /// Resolve a title against the current snapshot, keeping the trace.
    pub async fn explain(&self, title: &str) -> Result<ResolutionTrace, PosterError> {
        let snapshot = self.current().await?;
        Ok(explain(title, snapshot.candidates()))
    }

    /// Spawn a task that reloads the cache every refresh interval until a
    /// shutdown signal arrives.
    pub fn spawn_refresh_loop(
        self: Arc<Self>,
        mut shutdown_rx: broadcast::Receiver<()>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!("Poster refresh loop started");
            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        info!("Poster refresh loop received shutdown signal");
                        break;
                    }
                    _ = tokio::time::sleep(self.refresh_interval) => {
                        if let Err(e) = self.current().await {
                            warn!("Scheduled poster refresh failed: {}", e);
                        }
                    }
                }
            }
            info!("Poster refresh loop stopped");
        })
    }

    /// List the source and publish the result. Caller holds `refresh_lock`.
    async fn reload_locked(&self) -> Result<Arc<PosterSnapshot>, PosterError> {
        let paths = match self.source.list().await {
            Ok(paths) => paths,
            Err(e) => {
                POSTER_CACHE_REFRESHES.with_label_values(&["failure"]).inc();
                return Err(e);
            }
        };

        let snapshot = Arc::new(PosterSnapshot {
            candidates: Arc::new(CandidateSet::new(paths)),
            refreshed_at: Some(Utc::now()),
            checked_at: Some(Instant::now()),
        });
        self.publish(Arc::clone(&snapshot));

        POSTER_CACHE_REFRESHES.with_label_values(&["success"]).inc();
        POSTER_CACHE_ENTRIES.set(snapshot.len() as i64);
        info!(
            "Loaded {} posters from {}",
            snapshot.len(),
            self.source.name()
        );
        Ok(snapshot)
    }

    fn publish(&self, snapshot: Arc<PosterSnapshot>) {
        let mut guard = self.snapshot.write().unwrap_or_else(|e| e.into_inner());
        *guard = snapshot;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockPosterSource;

    fn cache_with(source: Arc<MockPosterSource>, interval: Duration) -> PosterCache {
        PosterCache::new(source, interval)
    }

    #[tokio::test]
    async fn test_first_use_loads_source() {
        let source = Arc::new(MockPosterSource::with_paths(vec!["/p/Up.jpg"]));
        let cache = cache_with(Arc::clone(&source), DEFAULT_REFRESH_INTERVAL);

        assert!(cache.snapshot().is_empty());
        let snapshot = cache.current().await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.refreshed_at().is_some());
        assert_eq!(source.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_fresh_snapshot_is_not_relisted() {
        let source = Arc::new(MockPosterSource::with_paths(vec!["/p/Up.jpg"]));
        let cache = cache_with(Arc::clone(&source), DEFAULT_REFRESH_INTERVAL);

        cache.current().await.unwrap();
        cache.current().await.unwrap();
        cache.resolve("Up").await.unwrap();
        assert_eq!(source.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_stale_snapshot_is_relisted() {
        let source = Arc::new(MockPosterSource::with_paths(vec!["/p/Up.jpg"]));
        let cache = cache_with(Arc::clone(&source), Duration::ZERO);

        cache.current().await.unwrap();
        source.set_paths(vec!["/p/Up.jpg", "/p/Cars.jpg"]);
        let snapshot = cache.current().await.unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(source.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_force_reload_ignores_freshness() {
        let source = Arc::new(MockPosterSource::with_paths(vec!["/p/Up.jpg"]));
        let cache = cache_with(Arc::clone(&source), DEFAULT_REFRESH_INTERVAL);

        cache.current().await.unwrap();
        source.set_paths(vec!["/p/Cars.jpg"]);
        let snapshot = cache.force_reload().await.unwrap();
        assert_eq!(snapshot.candidates().paths(), vec!["/p/Cars.jpg"]);
        assert_eq!(source.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_snapshot() {
        let source = Arc::new(MockPosterSource::with_paths(vec!["/p/Up.jpg"]));
        let cache = cache_with(Arc::clone(&source), Duration::ZERO);

        cache.current().await.unwrap();
        source.fail_next("storage offline");
        let snapshot = cache.current().await.unwrap();
        assert_eq!(snapshot.candidates().paths(), vec!["/p/Up.jpg"]);
    }

    #[tokio::test]
    async fn test_failed_first_load_is_an_error() {
        let source = Arc::new(MockPosterSource::new());
        source.fail_next("storage offline");
        let cache = cache_with(Arc::clone(&source), DEFAULT_REFRESH_INTERVAL);

        let err = cache.current().await.unwrap_err();
        assert!(matches!(err, PosterError::Listing { .. }));
        assert!(cache.snapshot().refreshed_at().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_stale_readers_list_once() {
        let source = Arc::new(MockPosterSource::with_paths(vec!["/p/Up.jpg"]));
        let cache = Arc::new(cache_with(Arc::clone(&source), DEFAULT_REFRESH_INTERVAL));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = Arc::clone(&cache);
            handles.push(tokio::spawn(async move { cache.resolve("Up").await }));
        }
        for handle in handles {
            let resolution = handle.await.unwrap().unwrap();
            assert_eq!(resolution.path(), Some("/p/Up.jpg"));
        }
        assert_eq!(source.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_refresh_loop_stops_on_shutdown() {
        let source = Arc::new(MockPosterSource::with_paths(vec!["/p/Up.jpg"]));
        let cache = Arc::new(cache_with(source, Duration::from_millis(10)));
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let handle = Arc::clone(&cache).spawn_refresh_loop(shutdown_rx);
        tokio::time::sleep(Duration::from_millis(50)).await;
        shutdown_tx.send(()).unwrap();
        handle.await.unwrap();

        assert_eq!(cache.snapshot().len(), 1);
    }
}
