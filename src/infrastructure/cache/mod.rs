//! Read-through cache for redirect lookups.
//!
//! Provides a [`CacheService`] trait with two implementations:
//! - [`RedisCache`] - Redis-backed cache
//! - [`NullCache`] - No-op implementation for testing/disabled caching
//!
//! Redirect records are immutable once created, so cached entries never need
//! invalidation; the TTL only bounds memory use.

mod null_cache;
mod redis_cache;
mod service;

pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService};
