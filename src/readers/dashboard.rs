use std::sync::Arc;

use chrono::Utc;

use crate::cache::{self, CachePort};
use crate::db::database::QueryPort;
use crate::error::StoreError;
use crate::models::DashboardStats;

// Aggregates fast-changing data, so the TTL is the shortest in the table.
const STATS_TTL: u64 = 60;
const STATS_KEY: &str = "dashboard_stats";

/// Computes the multi-metric dashboard summary in a single relational round
/// trip and serves it cache-aside.
pub struct DashboardReader {
    db: Arc<dyn QueryPort>,
    cache: Arc<dyn CachePort>,
}

impl DashboardReader {
    pub fn new(db: Arc<dyn QueryPort>, cache: Arc<dyn CachePort>) -> Self {
        Self { db, cache }
    }

    /// The snapshot carries `generated_at` from the moment it was computed,
    /// stamped before the cache write, so a hit reports the snapshot time
    /// rather than the current instant.
    pub async fn stats(&self) -> Result<DashboardStats, StoreError> {
        if let Some(stats) = cache::read_json::<DashboardStats>(self.cache.as_ref(), STATS_KEY).await
        {
            return Ok(stats);
        }

        let stats = self.db.dashboard_stats().await?.into_stats(Utc::now());
        cache::write_json(self.cache.as_ref(), STATS_KEY, &stats, STATS_TTL).await;

        Ok(stats)
    }
}
