use anyhow::Result;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
#[cfg(feature = "redis_cache")]
use tracing::{debug, error, warn};

#[cfg(feature = "redis_cache")]
use anyhow::Context;
#[cfg(feature = "redis_cache")]
use redis::{aio::ConnectionManager, AsyncCommands, Client};

use crate::config::RedisConfig;

#[cfg_attr(not(feature = "redis_cache"), allow(dead_code))]
/// Stored value plus the time it was written
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry<T> {
    data: T,
    cached_at: i64,
}

#[cfg_attr(not(feature = "redis_cache"), allow(dead_code))]
impl<T> CacheEntry<T> {
    fn new(data: T) -> Self {
        Self {
            data,
            cached_at: chrono::Utc::now().timestamp(),
        }
    }
}

#[cfg_attr(not(feature = "redis_cache"), allow(dead_code))]
/// Prefix every key with the configured namespace
fn namespaced(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}:{key}")
    }
}

#[cfg_attr(not(feature = "redis_cache"), allow(dead_code))]
/// Serialize a value for storage, `None` when it exceeds the size limit
fn encode_entry<T: Serialize>(value: &T, max_value_size_mb: usize) -> Result<Option<String>> {
    let json = serde_json::to_string(&CacheEntry::new(value))?;
    if json.len() > max_value_size_mb * 1024 * 1024 {
        return Ok(None);
    }
    Ok(Some(json))
}

#[cfg_attr(not(feature = "redis_cache"), allow(dead_code))]
fn decode_entry<T: DeserializeOwned>(json: &str) -> Result<T> {
    let entry: CacheEntry<T> = serde_json::from_str(json)?;
    Ok(entry.data)
}

/// Redis-backed JSON cache with string keys
#[cfg(feature = "redis_cache")]
pub struct RedisCache {
    client: ConnectionManager,
    config: RedisConfig,
}

#[cfg(feature = "redis_cache")]
impl RedisCache {
    pub async fn new(config: RedisConfig) -> Result<Self> {
        let client = Client::open(config.url.as_str()).context("Failed to create Redis client")?;

        let connection_manager = ConnectionManager::new(client)
            .await
            .context("Failed to connect to Redis")?;

        debug!("Redis cache connected successfully");

        Ok(Self {
            client: connection_manager,
            config,
        })
    }

    pub async fn test_connection(&self) -> Result<()> {
        let mut conn = self.client.clone();
        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .context("Redis PING failed")?;
        Ok(())
    }

    /// Read a value; errors degrade to a miss
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let key = namespaced(&self.config.key_prefix, key);
        let mut conn = self.client.clone();

        let raw: Option<String> = match conn.get(&key).await {
            Ok(raw) => raw,
            Err(e) => {
                error!("Redis get error for {}: {}", key, e);
                return None;
            }
        };

        match raw.as_deref().map(decode_entry::<T>) {
            Some(Ok(value)) => {
                debug!("Redis cache hit: {}", key);
                Some(value)
            }
            Some(Err(e)) => {
                warn!("Discarding undecodable cache entry {}: {}", key, e);
                None
            }
            None => {
                debug!("Redis cache miss: {}", key);
                None
            }
        }
    }

    /// Store with the default TTL
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.set_with_ttl(key, value, Some(self.config.ttl_seconds))
            .await
    }

    pub async fn set_with_ttl<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: Option<u64>,
    ) -> Result<()> {
        let key = namespaced(&self.config.key_prefix, key);
        let Some(json) = encode_entry(value, self.config.max_value_size_mb)
            .context("Failed to serialize cache entry")?
        else {
            warn!(
                "Cache value exceeds {} MB limit, skipping: {}",
                self.config.max_value_size_mb, key
            );
            return Ok(());
        };

        let mut conn = self.client.clone();
        match ttl_seconds {
            Some(ttl) => conn
                .set_ex::<_, _, ()>(&key, json, ttl)
                .await
                .context("Failed to set value in Redis with TTL")?,
            None => conn
                .set::<_, _, ()>(&key, json)
                .await
                .context("Failed to set value in Redis")?,
        }
        Ok(())
    }

    pub async fn delete(&self, key: &str) -> Result<bool> {
        let key = namespaced(&self.config.key_prefix, key);
        let mut conn = self.client.clone();
        let removed: u64 = conn
            .del(&key)
            .await
            .context("Failed to delete value from Redis")?;
        Ok(removed > 0)
    }
}

/// Stub implementation when Redis is not enabled
#[cfg(not(feature = "redis_cache"))]
pub struct RedisCache;

#[cfg(not(feature = "redis_cache"))]
impl RedisCache {
    pub async fn new(_config: RedisConfig) -> Result<Self> {
        anyhow::bail!("Redis cache support not compiled (missing redis_cache feature)")
    }

    pub async fn test_connection(&self) -> Result<()> {
        Ok(())
    }

    pub async fn get<T: DeserializeOwned>(&self, _key: &str) -> Option<T> {
        None
    }

    pub async fn set<T: Serialize>(&self, _key: &str, _value: &T) -> Result<()> {
        Ok(())
    }

    pub async fn set_with_ttl<T: Serialize>(
        &self,
        _key: &str,
        _value: &T,
        _ttl_seconds: Option<u64>,
    ) -> Result<()> {
        Ok(())
    }

    pub async fn delete(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }
}
