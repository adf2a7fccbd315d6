//! Read-through cached user statistics.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use accounthub_cache::keys;
use accounthub_cache::provider::CacheManager;
use accounthub_core::error::AppError;
use accounthub_core::result::AppResult;
use accounthub_core::traits::cache::CacheProvider;
use accounthub_database::repositories::user::UserRepository;
use accounthub_entity::stats::UserStats;
use accounthub_entity::user::UserRole;

/// Snapshot TTL. Staleness of the admin dashboard is bounded by this unless
/// a mutation invalidates the snapshot explicitly.
const STATS_TTL: Duration = Duration::from_secs(300);

/// Budget for a single cache operation. A slower cache is treated as a
/// miss, never as a request failure.
const CACHE_OP_TIMEOUT: Duration = Duration::from_millis(250);

/// Length of the trailing window for "recent" signups, in days.
const RECENT_WINDOW_DAYS: i64 = 7;

/// Count queries the aggregator needs from the relational store.
///
/// Kept narrow (count-where only) so the aggregator is testable without
/// PostgreSQL.
#[async_trait]
pub trait UserCounts: Send + Sync + 'static {
    /// Total registered users.
    async fn count_users(&self) -> AppResult<i64>;

    /// Users created at or after the given instant.
    async fn count_users_since(&self, since: DateTime<Utc>) -> AppResult<i64>;

    /// Users holding the admin role.
    async fn count_admins(&self) -> AppResult<i64>;
}

#[async_trait]
impl UserCounts for UserRepository {
    async fn count_users(&self) -> AppResult<i64> {
        self.count_all().await
    }

    async fn count_users_since(&self, since: DateTime<Utc>) -> AppResult<i64> {
        self.count_created_since(since).await
    }

    async fn count_admins(&self) -> AppResult<i64> {
        self.count_by_role(UserRole::Admin).await
    }
}

/// Composes user counts from the store, cached with a fixed TTL.
///
/// The cache is advisory: every failure path degrades to a fresh
/// computation, so correctness never depends on cache availability.
#[derive(Clone)]
pub struct StatsService {
    /// Count queries.
    counts: Arc<dyn UserCounts>,
    /// Snapshot cache.
    cache: Arc<CacheManager>,
}

impl std::fmt::Debug for StatsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsService").finish()
    }
}

impl StatsService {
    /// Creates a new stats service.
    pub fn new(counts: Arc<dyn UserCounts>, cache: Arc<CacheManager>) -> Self {
        Self { counts, cache }
    }

    /// Returns the current statistics snapshot.
    ///
    /// On a cache hit the cached counts are returned with `from_cache`
    /// set; on a miss the counts are recomputed with the 7-day window
    /// boundary taken at call time, and the fresh snapshot is cached for
    /// the fixed TTL.
    pub async fn get_stats(&self) -> Result<UserStats, AppError> {
        let key = keys::admin_stats();

        if let Some(mut cached) = self.cached_snapshot(&key).await {
            cached.from_cache = true;
            return Ok(cached);
        }

        let window_start = Utc::now() - chrono::Duration::days(RECENT_WINDOW_DAYS);

        let total_users = self.counts.count_users().await?;
        let recent_users = self.counts.count_users_since(window_start).await?;
        let total_admins = self.counts.count_admins().await?;

        let stats = UserStats {
            total_users,
            recent_users,
            // Activity is not tracked per user; the dashboard shows a fixed
            // 70% estimate of the total.
            active_users: total_users * 7 / 10,
            total_admins,
            from_cache: false,
        };

        self.store_snapshot(&key, &stats).await;

        Ok(stats)
    }

    /// Drops the cached snapshot so the next read recomputes.
    ///
    /// Best-effort: with the cache unavailable there is nothing to drop and
    /// staleness stays bounded by the TTL.
    pub async fn invalidate(&self) {
        let key = keys::admin_stats();
        let delete = self.cache.delete(&key);
        match tokio::time::timeout(CACHE_OP_TIMEOUT, delete).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => debug!(error = %e, "Stats cache invalidation failed"),
            Err(_) => debug!("Stats cache invalidation timed out"),
        }
    }

    /// Reads the cached snapshot, treating every failure as a miss.
    async fn cached_snapshot(&self, key: &str) -> Option<UserStats> {
        let read = self.cache.get_json::<UserStats>(key);
        match tokio::time::timeout(CACHE_OP_TIMEOUT, read).await {
            Ok(Ok(found)) => found,
            Ok(Err(e)) => {
                debug!(error = %e, "Stats cache read failed, recomputing");
                None
            }
            Err(_) => {
                debug!("Stats cache read timed out, recomputing");
                None
            }
        }
    }

    /// Writes the snapshot, dropping it on any failure.
    async fn store_snapshot(&self, key: &str, stats: &UserStats) {
        let write = self.cache.set_json(key, stats, STATS_TTL);
        match tokio::time::timeout(CACHE_OP_TIMEOUT, write).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => debug!(error = %e, "Stats cache write failed"),
            Err(_) => debug!("Stats cache write timed out"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accounthub_cache::memory::MemoryCacheProvider;
    use accounthub_core::config::cache::MemoryCacheConfig;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Count source backed by plain atomics.
    #[derive(Debug, Default)]
    struct FakeCounts {
        users: AtomicI64,
        recent: AtomicI64,
        admins: AtomicI64,
    }

    #[async_trait]
    impl UserCounts for FakeCounts {
        async fn count_users(&self) -> AppResult<i64> {
            Ok(self.users.load(Ordering::SeqCst))
        }

        async fn count_users_since(&self, _since: DateTime<Utc>) -> AppResult<i64> {
            Ok(self.recent.load(Ordering::SeqCst))
        }

        async fn count_admins(&self) -> AppResult<i64> {
            Ok(self.admins.load(Ordering::SeqCst))
        }
    }

    fn memory_cache() -> Arc<CacheManager> {
        let provider =
            MemoryCacheProvider::new(&MemoryCacheConfig { max_capacity: 100 }, 300);
        Arc::new(CacheManager::from_provider(Arc::new(provider)))
    }

    fn counts(users: i64, recent: i64, admins: i64) -> Arc<FakeCounts> {
        let c = FakeCounts::default();
        c.users.store(users, Ordering::SeqCst);
        c.recent.store(recent, Ordering::SeqCst);
        c.admins.store(admins, Ordering::SeqCst);
        Arc::new(c)
    }

    #[tokio::test]
    async fn test_first_read_computes_second_read_hits_cache() {
        let source = counts(10, 3, 2);
        let service = StatsService::new(source.clone(), memory_cache());

        let first = service.get_stats().await.unwrap();
        assert!(!first.from_cache);
        assert_eq!(first.total_users, 10);
        assert_eq!(first.recent_users, 3);
        assert_eq!(first.active_users, 7);
        assert_eq!(first.total_admins, 2);

        // Underlying counts change, but the snapshot is still cached.
        source.users.store(99, Ordering::SeqCst);

        let second = service.get_stats().await.unwrap();
        assert!(second.from_cache);
        assert_eq!(second.total_users, 10);
    }

    #[tokio::test]
    async fn test_invalidate_forces_recompute() {
        let source = counts(10, 3, 2);
        let service = StatsService::new(source.clone(), memory_cache());

        let first = service.get_stats().await.unwrap();
        assert!(!first.from_cache);

        source.users.store(11, Ordering::SeqCst);
        service.invalidate().await;

        let next = service.get_stats().await.unwrap();
        assert!(!next.from_cache);
        assert_eq!(next.total_users, 11);
    }

    #[tokio::test]
    async fn test_active_users_is_seventy_percent_of_total() {
        let service = StatsService::new(counts(101, 0, 0), memory_cache());
        let stats = service.get_stats().await.unwrap();
        assert_eq!(stats.active_users, 70);
    }

    /// A cache that fails every operation must degrade to recomputation,
    /// never to an error.
    #[derive(Debug)]
    struct BrokenCache;

    #[async_trait]
    impl CacheProvider for BrokenCache {
        async fn get(&self, _key: &str) -> AppResult<Option<String>> {
            Err(AppError::cache("cache down"))
        }

        async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> AppResult<()> {
            Err(AppError::cache("cache down"))
        }

        async fn set_default(&self, _key: &str, _value: &str) -> AppResult<()> {
            Err(AppError::cache("cache down"))
        }

        async fn delete(&self, _key: &str) -> AppResult<()> {
            Err(AppError::cache("cache down"))
        }

        async fn exists(&self, _key: &str) -> AppResult<bool> {
            Err(AppError::cache("cache down"))
        }

        async fn health_check(&self) -> AppResult<bool> {
            Ok(false)
        }

        async fn flush_all(&self) -> AppResult<()> {
            Err(AppError::cache("cache down"))
        }
    }

    #[tokio::test]
    async fn test_cache_failure_degrades_to_fresh_computation() {
        let cache = Arc::new(CacheManager::from_provider(Arc::new(BrokenCache)));
        let service = StatsService::new(counts(5, 1, 1), cache);

        let stats = service.get_stats().await.unwrap();
        assert!(!stats.from_cache);
        assert_eq!(stats.total_users, 5);

        // Every read recomputes while the cache is down.
        let again = service.get_stats().await.unwrap();
        assert!(!again.from_cache);

        // Invalidation with a broken cache is a quiet no-op.
        service.invalidate().await;
    }
}
