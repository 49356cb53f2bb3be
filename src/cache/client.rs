use anyhow::Result;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, IntoConnectionInfo, RedisResult};
use tracing::warn;

use crate::cache::CachePort;
use crate::config::AppConfig;

/// Redis-backed cache client. The connection manager multiplexes one
/// connection and reconnects on its own; cloning it per call is cheap.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    pub async fn connect(config: &AppConfig) -> Result<Self> {
        let mut info = config.cache.get_redis_url().into_connection_info()?;
        info.redis.db = i64::from(config.cache.database_index);

        let client = redis::Client::open(info)?;
        let conn = ConnectionManager::new(client).await?;

        Ok(Self { conn })
    }
}

#[async_trait]
impl CachePort for RedisCache {
    async fn get(&self, key: &str) -> Option<String> {
        let mut conn = self.conn.clone();
        let result: RedisResult<Option<String>> = conn.get(key).await;
        match result {
            Ok(payload) => payload,
            Err(err) => {
                warn!(key, error = %err, "cache get failed, treating as miss");
                None
            }
        }
    }

    async fn set(&self, key: &str, payload: String, ttl_secs: u64) {
        let mut conn = self.conn.clone();
        let result: RedisResult<()> = conn.set_ex(key, payload, ttl_secs).await;
        if let Err(err) = result {
            warn!(key, error = %err, "cache set failed, dropping write");
        }
    }

    async fn delete(&self, key: &str) {
        let mut conn = self.conn.clone();
        let result: RedisResult<()> = conn.del(key).await;
        if let Err(err) = result {
            warn!(key, error = %err, "cache delete failed");
        }
    }

    async fn clear(&self) {
        let mut conn = self.conn.clone();
        let result: RedisResult<()> = redis::cmd("FLUSHDB").query_async(&mut conn).await;
        if let Err(err) = result {
            warn!(error = %err, "cache clear failed");
        }
    }

    async fn ping(&self) -> bool {
        let mut conn = self.conn.clone();
        let result: RedisResult<String> = redis::cmd("PING").query_async(&mut conn).await;
        result.is_ok()
    }
}
