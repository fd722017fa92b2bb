//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching token → target URL mappings.
///
/// Implementations must be thread-safe. Cache failures degrade to storage
/// lookups; they never fail a redirect.
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the target URL for a token.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` on cache hit
    /// - `Ok(None)` on cache miss
    async fn get_url(&self, token: &str) -> CacheResult<Option<String>>;

    /// Stores a mapping with an optional TTL (implementation default if `None`).
    async fn set_url(&self, token: &str, target_url: &str, ttl_seconds: Option<u64>)
    -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;

    /// Short backend name for health reporting.
    fn backend(&self) -> &'static str;
}
