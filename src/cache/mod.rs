pub mod redis;

pub use self::redis::RedisCache;

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::config::RedisConfig;

async fn connect(config: RedisConfig) -> Result<RedisCache> {
    let cache = RedisCache::new(config).await?;
    cache
        .test_connection()
        .await
        .context("Failed to test Redis connection")?;
    Ok(cache)
}

/// Connect and ping the configured cache; any failure leaves the service uncached
pub async fn connect_optional(config: Option<&RedisConfig>) -> Option<RedisCache> {
    let Some(config) = config else {
        info!("Redis cache is disabled");
        return None;
    };

    info!("Redis cache is enabled, connecting to {}...", config.url);
    match connect(config.clone()).await {
        Ok(cache) => {
            info!("Redis cache connected successfully");
            Some(cache)
        }
        Err(e) => {
            error!("Failed to connect to Redis: {:#}", e);
            error!("Continuing without Redis cache");
            None
        }
    }
}
