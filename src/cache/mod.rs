//! Key-value stores with TTL expiry, used to cache finished analyses.
//!
//! The service holds an `Option<Arc<dyn Cache>>`. `None` means no store was
//! reachable at startup and every request goes straight to the provider.

pub mod memory;
pub mod redis;

pub use self::memory::MemoryCache;
pub use self::redis::RedisCache;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors from a cache backend. Never surfaced to HTTP callers.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache connection error: {0}")]
    Connection(String),

    #[error("cache backend error: {0}")]
    Backend(String),
}

pub type CacheResult<T> = Result<T, CacheError>;

/// A string key-value store with per-entry expiry.
#[async_trait]
pub trait Cache: Send + Sync {
    /// `Ok(None)` on a miss or an expired entry.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;

    /// Round-trip to the backend to prove it is reachable.
    async fn ping(&self) -> CacheResult<()>;

    fn name(&self) -> &'static str;
}
