use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::db::client::DbClient;
use crate::error::StoreError;
use crate::models::{StatusCount, User, WithdrawalStatus};

/// Withdrawal row as it comes off the wire: `amount` still in the store's
/// NUMERIC representation, normalized before it crosses into cache/response.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct WithdrawalRow {
    pub id: String,
    pub user_id: String,
    pub amount: Decimal,
    pub wallet_address: String,
    pub transaction_hash: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct BalanceRow {
    pub id: String,
    pub user_id: String,
    pub balance: Decimal,
    pub total_earned: Decimal,
    pub total_withdrawn: Decimal,
    pub updated_at: DateTime<Utc>,
}

/// Single-round-trip dashboard aggregate, pre-normalization.
#[derive(Debug, Clone, FromRow)]
pub struct DashboardRow {
    pub total_users: i64,
    pub total_withdrawals: i64,
    pub pending_withdrawals: i64,
    pub completed_withdrawals: i64,
    pub failed_withdrawals: i64,
    pub total_withdrawn: Decimal,
}

/// Relational query port: one typed method per parameterized query the
/// readers need. Parameters are always bound, never interpolated. Zero-row
/// point lookups are `Ok(None)`, never an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueryPort: Send + Sync {
    async fn user_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;
    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn users_page(&self, limit: i64, offset: i64) -> Result<Vec<User>, StoreError>;
    async fn users_count(&self) -> Result<i64, StoreError>;
    async fn users_count_by_status(&self) -> Result<Vec<StatusCount>, StoreError>;

    async fn withdrawals_by_user(&self, user_id: &str) -> Result<Vec<WithdrawalRow>, StoreError>;
    async fn recent_withdrawals(&self, limit: i64) -> Result<Vec<WithdrawalRow>, StoreError>;
    async fn withdrawals_count_by_status(&self) -> Result<Vec<StatusCount>, StoreError>;
    async fn dashboard_stats(&self) -> Result<DashboardRow, StoreError>;

    async fn balance_by_user(&self, user_id: &str) -> Result<Option<BalanceRow>, StoreError>;
    async fn total_platform_balance(&self) -> Result<Decimal, StoreError>;
}

#[async_trait]
impl QueryPort for DbClient {
    async fn user_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&*self.pool)
            .await?;

        Ok(user)
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&*self.pool)
            .await?;

        Ok(user)
    }

    async fn users_page(&self, limit: i64, offset: i64) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&*self.pool)
        .await?;

        Ok(users)
    }

    async fn users_count(&self) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&*self.pool)
            .await?;

        Ok(count)
    }

    async fn users_count_by_status(&self) -> Result<Vec<StatusCount>, StoreError> {
        let counts = sqlx::query_as::<_, StatusCount>(
            r#"
            SELECT status, COUNT(*) AS count
            FROM users
            GROUP BY status
            ORDER BY status
            "#,
        )
        .fetch_all(&*self.pool)
        .await?;

        Ok(counts)
    }

    async fn withdrawals_by_user(&self, user_id: &str) -> Result<Vec<WithdrawalRow>, StoreError> {
        let withdrawals = sqlx::query_as::<_, WithdrawalRow>(
            r#"
            SELECT * FROM withdrawals
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&*self.pool)
        .await?;

        Ok(withdrawals)
    }

    async fn recent_withdrawals(&self, limit: i64) -> Result<Vec<WithdrawalRow>, StoreError> {
        let withdrawals = sqlx::query_as::<_, WithdrawalRow>(
            r#"
            SELECT * FROM withdrawals
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&*self.pool)
        .await?;

        Ok(withdrawals)
    }

    async fn withdrawals_count_by_status(&self) -> Result<Vec<StatusCount>, StoreError> {
        let counts = sqlx::query_as::<_, StatusCount>(
            r#"
            SELECT status, COUNT(*) AS count
            FROM withdrawals
            GROUP BY status
            ORDER BY status
            "#,
        )
        .fetch_all(&*self.pool)
        .await?;

        Ok(counts)
    }

    async fn dashboard_stats(&self) -> Result<DashboardRow, StoreError> {
        let row = sqlx::query_as::<_, DashboardRow>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users) AS total_users,
                (SELECT COUNT(*) FROM withdrawals) AS total_withdrawals,
                (SELECT COUNT(*) FROM withdrawals WHERE status = $1) AS pending_withdrawals,
                (SELECT COUNT(*) FROM withdrawals WHERE status = $2) AS completed_withdrawals,
                (SELECT COUNT(*) FROM withdrawals WHERE status = $3) AS failed_withdrawals,
                (SELECT COALESCE(SUM(amount), 0) FROM withdrawals WHERE status = $2) AS total_withdrawn
            "#,
        )
        .bind(WithdrawalStatus::Pending.as_str())
        .bind(WithdrawalStatus::Completed.as_str())
        .bind(WithdrawalStatus::Failed.as_str())
        .fetch_one(&*self.pool)
        .await?;

        Ok(row)
    }

    async fn balance_by_user(&self, user_id: &str) -> Result<Option<BalanceRow>, StoreError> {
        let balance =
            sqlx::query_as::<_, BalanceRow>("SELECT * FROM user_balances WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&*self.pool)
                .await?;

        Ok(balance)
    }

    async fn total_platform_balance(&self) -> Result<Decimal, StoreError> {
        let total = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(balance), 0) FROM user_balances",
        )
        .fetch_one(&*self.pool)
        .await?;

        Ok(total)
    }
}
