//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info, warn};

/// Redis cache for fast token lookups.
///
/// Uses `ConnectionManager` for connection reuse and reconnects. Operations are
/// fail-open: errors are logged and reported as misses.
pub struct RedisCache {
    client: ConnectionManager,
    default_ttl: u64,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis, validates the connection with a PING, and sets the default TTL.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING fails.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            default_ttl: default_ttl_seconds,
            key_prefix: "redirect:".to_string(),
        })
    }

    fn build_key(&self, token: &str) -> String {
        format!("{}{}", self.key_prefix, token)
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_url(&self, token: &str) -> CacheResult<Option<String>> {
        let key = self.build_key(token);
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(&key).await {
            Ok(hit) => {
                debug!(token, hit = hit.is_some(), "Redis GET");
                Ok(hit)
            }
            Err(e) => {
                warn!("Redis GET error for {}: {}", token, e);
                Ok(None)
            }
        }
    }

    async fn set_url(&self, token: &str, target_url: &str, ttl: Option<u64>) -> CacheResult<()> {
        let key = self.build_key(token);
        let mut conn = self.client.clone();
        let ttl_seconds = ttl.unwrap_or(self.default_ttl);

        if let Err(e) = conn
            .set_ex::<_, _, ()>(&key, target_url, ttl_seconds)
            .await
        {
            warn!("Redis SET error for {}: {}", token, e);
        } else {
            debug!(token, ttl_seconds, "Redis SET");
        }

        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
