use std::sync::Arc;

use crate::cache::{self, CachePort};
use crate::db::database::QueryPort;
use crate::error::StoreError;
use crate::models::UserBalance;
use crate::normalize;

const TOTAL_BALANCE_TTL: u64 = 300;
const TOTAL_BALANCE_KEY: &str = "total_platform_balance";

/// Read accessor for per-user balances and the platform-wide total.
pub struct BalanceReader {
    db: Arc<dyn QueryPort>,
    cache: Arc<dyn CachePort>,
}

impl BalanceReader {
    pub fn new(db: Arc<dyn QueryPort>, cache: Arc<dyn CachePort>) -> Self {
        Self { db, cache }
    }

    /// Uncached: a balance must never look stale right after a withdrawal.
    pub async fn find_by_user(&self, user_id: &str) -> Result<Option<UserBalance>, StoreError> {
        let balance = self.db.balance_by_user(user_id).await?;
        Ok(balance.map(UserBalance::from))
    }

    /// Sum of all user balances, cached for 5 minutes. The value is
    /// normalized before it is written through, so a hit returns it as-is.
    pub async fn total_platform_balance(&self) -> Result<f64, StoreError> {
        if let Some(total) = cache::read_json::<f64>(self.cache.as_ref(), TOTAL_BALANCE_KEY).await {
            return Ok(total);
        }

        let total = normalize::money(self.db.total_platform_balance().await?);
        cache::write_json(self.cache.as_ref(), TOTAL_BALANCE_KEY, &total, TOTAL_BALANCE_TTL).await;

        Ok(total)
    }
}
