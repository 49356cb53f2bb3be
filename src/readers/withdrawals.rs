use std::sync::Arc;

use crate::cache::{self, CachePort};
use crate::db::database::QueryPort;
use crate::error::StoreError;
use crate::models::{StatusCount, Withdrawal};
use crate::normalize;

const RECENT_TTL: u64 = 60;
const BY_STATUS_TTL: u64 = 120;

const BY_STATUS_KEY: &str = "withdrawals_by_status";

fn recent_key(limit: i64) -> String {
    format!("recent_withdrawals:{limit}")
}

/// Read accessor for withdrawals. The core only reads; status transitions
/// happen in the upstream processor.
pub struct WithdrawalReader {
    db: Arc<dyn QueryPort>,
    cache: Arc<dyn CachePort>,
}

impl WithdrawalReader {
    pub fn new(db: Arc<dyn QueryPort>, cache: Arc<dyn CachePort>) -> Self {
        Self { db, cache }
    }

    /// Uncached: scoped to one user, so the key space is unbounded and a
    /// stale view right after a withdrawal would be visible to its owner.
    pub async fn find_by_user(&self, user_id: &str) -> Result<Vec<Withdrawal>, StoreError> {
        let rows = self.db.withdrawals_by_user(user_id).await?;
        Ok(normalize::withdrawals(rows))
    }

    /// The newest withdrawals, bounded by `limit`. Cached per distinct bound
    /// at a 1 minute TTL since this feeds the fast-moving dashboard feed.
    pub async fn recent(&self, limit: i64) -> Result<Vec<Withdrawal>, StoreError> {
        let key = recent_key(limit);

        if let Some(withdrawals) =
            cache::read_json::<Vec<Withdrawal>>(self.cache.as_ref(), &key).await
        {
            return Ok(withdrawals);
        }

        let withdrawals = normalize::withdrawals(self.db.recent_withdrawals(limit).await?);
        if !withdrawals.is_empty() {
            cache::write_json(self.cache.as_ref(), &key, &withdrawals, RECENT_TTL).await;
        }

        Ok(withdrawals)
    }

    /// Per-status withdrawal counts, cached for 2 minutes.
    pub async fn count_by_status(&self) -> Result<Vec<StatusCount>, StoreError> {
        if let Some(counts) =
            cache::read_json::<Vec<StatusCount>>(self.cache.as_ref(), BY_STATUS_KEY).await
        {
            return Ok(counts);
        }

        let counts = self.db.withdrawals_count_by_status().await?;
        if !counts.is_empty() {
            cache::write_json(self.cache.as_ref(), BY_STATUS_KEY, &counts, BY_STATUS_TTL).await;
        }

        Ok(counts)
    }
}
