use redis::aio::ConnectionManager;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

/// Two-tier cache for match responses and profile snapshots.
///
/// L1 is an in-process moka cache, L2 is Redis shared across instances.
/// Matching is pure CPU work over backend data, so a short TTL here mostly
/// absorbs dashboard refreshes and pagination of the same result set.
pub struct CacheManager {
    redis: Arc<tokio::sync::Mutex<ConnectionManager>>,
    l1_cache: moka::future::Cache<String, Vec<u8>>,
    ttl_secs: u64,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CacheManager {
    pub async fn new(redis_url: &str, l1_size: u64, ttl_secs: u64) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let redis = redis::aio::ConnectionManager::new(client).await?;

        let l1_cache = moka::future::CacheBuilder::new(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Ok(Self {
            redis: Arc::new(tokio::sync::Mutex::new(redis)),
            l1_cache,
            ttl_secs,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        })
    }

    /// Get a value from cache (L1 first, then L2)
    pub async fn get<T>(&self, key: &str) -> Result<T, CacheError>
    where
        T: for<'de> Deserialize<'de>,
    {
        if let Some(bytes) = self.l1_cache.get(key).await {
            tracing::trace!("L1 cache hit: {}", key);
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let mut conn = self.redis.lock().await;
        let value: Option<String> = redis::cmd("GET").arg(key).query_async(&mut *conn).await?;
        drop(conn);

        if let Some(json) = value {
            tracing::trace!("L2 cache hit: {}", key);
            self.hits.fetch_add(1, Ordering::Relaxed);

            self.l1_cache
                .insert(key.to_string(), json.as_bytes().to_vec())
                .await;

            return Ok(serde_json::from_str(&json)?);
        }

        tracing::trace!("Cache miss: {}", key);
        self.misses.fetch_add(1, Ordering::Relaxed);
        Err(CacheError::CacheMiss(key.to_string()))
    }

    /// Set a value in both tiers with the configured TTL
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let json = serde_json::to_string(value)?;

        self.l1_cache
            .insert(key.to_string(), json.as_bytes().to_vec())
            .await;

        let mut conn = self.redis.lock().await;
        redis::cmd("SETEX")
            .arg(key)
            .arg(self.ttl_secs)
            .arg(json)
            .query_async::<()>(&mut *conn)
            .await?;
        drop(conn);

        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    /// Delete a value from both tiers
    pub async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.l1_cache.invalidate(key).await;
        let mut conn = self.redis.lock().await;
        redis::cmd("DEL").arg(key).query_async::<()>(&mut *conn).await?;
        Ok(())
    }

    /// Invalidate every cached entry belonging to one user, across both tiers.
    /// Called when an interaction event changes what their next matching run
    /// should return.
    pub async fn invalidate_user(&self, user_id: &str) -> Result<(), CacheError> {
        // L1 has no pattern scan; dropping everything is acceptable at its size.
        self.l1_cache.invalidate_all();

        let pattern = format!("matches:{}:*", user_id);
        let mut conn = self.redis.lock().await;
        let keys: Vec<String> = redis::cmd("KEYS")
            .arg(&pattern)
            .query_async(&mut *conn)
            .await?;

        if !keys.is_empty() {
            redis::cmd("DEL")
                .arg(keys)
                .query_async::<()>(&mut *conn)
                .await?;
        }

        tracing::debug!("Invalidated cached matches for user {}", user_id);
        Ok(())
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;

        CacheStats {
            l1_size: self.l1_cache.entry_count(),
            hit_count: hits,
            miss_count: misses,
            hit_rate: if total > 0 {
                hits as f64 / total as f64
            } else {
                0.0
            },
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub l1_size: u64,
    pub hit_count: u64,
    pub miss_count: u64,
    pub hit_rate: f64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Key for a user profile snapshot
    pub fn profile(user_id: &str) -> String {
        format!("profile:{}", user_id)
    }

    /// Key for a full match response. Parameters are part of the key so
    /// differently-filtered runs never shadow each other.
    pub fn matches(user_id: &str, limit: u16, min_score: f64, location: Option<&str>) -> String {
        format!(
            "matches:{}:{}:{}:{}",
            user_id,
            limit,
            min_score,
            location.unwrap_or("-")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "Requires Redis"]
    async fn test_cache_set_get_delete() {
        let cache = CacheManager::new("redis://127.0.0.1:6379", 1000, 60)
            .await
            .expect("Failed to create cache");

        let key = "test_key";
        let value = "test_value";

        cache.set(key, &value).await.unwrap();
        let result: String = cache.get(key).await.unwrap();
        assert_eq!(result, value);

        cache.delete(key).await.unwrap();
        assert!(cache.get::<String>(key).await.is_err());
    }

    #[test]
    fn test_cache_key_builder() {
        assert_eq!(CacheKey::profile("user123"), "profile:user123");
        assert_eq!(
            CacheKey::matches("user123", 20, 0.0, None),
            "matches:user123:20:0:-"
        );
        assert_eq!(
            CacheKey::matches("user123", 5, 55.5, Some("warsaw")),
            "matches:user123:5:55.5:warsaw"
        );
    }
}
