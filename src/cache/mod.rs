pub mod client;

pub use client::RedisCache;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

/// TTL applied when a caller does not specify one.
pub const DEFAULT_TTL_SECS: u64 = 3600;

/// Keyed cache port. Every operation is fail-open: a fault in the cache
/// degrades to a miss (get) or a dropped write (set/delete/clear), logged at
/// warning level, and never reaches the caller as an error. A cache outage
/// therefore costs latency, not availability.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CachePort: Send + Sync {
    /// `None` both on a true miss and on any underlying fault.
    async fn get(&self, key: &str) -> Option<String>;

    /// Best-effort write; the next read simply misses if it is dropped.
    async fn set(&self, key: &str, payload: String, ttl_secs: u64);

    async fn delete(&self, key: &str);

    /// Administrative wipe. Operator tooling only, never a read path.
    async fn clear(&self);

    /// Connectivity probe for the startup/health-check routine.
    async fn ping(&self) -> bool;
}

/// Reads a cached JSON payload into `T`. An undecodable payload is treated
/// as a miss so the read path falls back to the relational store.
pub(crate) async fn read_json<T: DeserializeOwned>(cache: &dyn CachePort, key: &str) -> Option<T> {
    let payload = cache.get(key).await?;
    match serde_json::from_str(&payload) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(key, error = %err, "discarding undecodable cache payload");
            None
        }
    }
}

/// Serializes `value` and writes it through with the given TTL.
pub(crate) async fn write_json<T: Serialize>(
    cache: &dyn CachePort,
    key: &str,
    value: &T,
    ttl_secs: u64,
) {
    match serde_json::to_string(value) {
        Ok(payload) => cache.set(key, payload, ttl_secs).await,
        Err(err) => warn!(key, error = %err, "dropping unserializable cache payload"),
    }
}

/// No-op cache: every read misses, every write is dropped. Used when caching
/// is disabled and as a stand-in for a fully faulted cache in tests.
#[derive(Debug, Clone, Default)]
pub struct NullCache;

#[async_trait]
impl CachePort for NullCache {
    async fn get(&self, _key: &str) -> Option<String> {
        None
    }

    async fn set(&self, _key: &str, _payload: String, _ttl_secs: u64) {}

    async fn delete(&self, _key: &str) {}

    async fn clear(&self) {}

    async fn ping(&self) -> bool {
        false
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-process cache double. TTLs are recorded but never expire; tests
    /// exercising expiry clear entries explicitly.
    #[derive(Debug, Default)]
    pub struct MemoryCache {
        entries: Mutex<HashMap<String, (String, u64)>>,
    }

    impl MemoryCache {
        pub fn ttl_of(&self, key: &str) -> Option<u64> {
            self.entries.lock().unwrap().get(key).map(|(_, ttl)| *ttl)
        }

        pub fn raw(&self, key: &str) -> Option<String> {
            self.entries
                .lock()
                .unwrap()
                .get(key)
                .map(|(payload, _)| payload.clone())
        }

        pub fn len(&self) -> usize {
            self.entries.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CachePort for MemoryCache {
        async fn get(&self, key: &str) -> Option<String> {
            self.entries
                .lock()
                .unwrap()
                .get(key)
                .map(|(payload, _)| payload.clone())
        }

        async fn set(&self, key: &str, payload: String, ttl_secs: u64) {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), (payload, ttl_secs));
        }

        async fn delete(&self, key: &str) {
            self.entries.lock().unwrap().remove(key);
        }

        async fn clear(&self) {
            self.entries.lock().unwrap().clear();
        }

        async fn ping(&self) -> bool {
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn null_cache_always_misses() {
        let cache = NullCache;
        cache.set("user:1", "{}".to_string(), DEFAULT_TTL_SECS).await;
        assert_eq!(cache.get("user:1").await, None);
    }

    #[tokio::test]
    async fn undecodable_payload_degrades_to_miss() {
        let cache = memory::MemoryCache::default();
        cache.set("users_count", "not json".to_string(), 120).await;

        let value: Option<i64> = read_json(&cache, "users_count").await;
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn json_round_trips_through_memory_cache() {
        let cache = memory::MemoryCache::default();
        write_json(&cache, "users_count", &42i64, 120).await;

        assert_eq!(cache.ttl_of("users_count"), Some(120));
        let value: Option<i64> = read_json(&cache, "users_count").await;
        assert_eq!(value, Some(42));
    }
}
