use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Dashboard user. `status` is an open vocabulary controlled upstream, so it
/// stays a plain string and is only matched at filter sites.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub wallet_address: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The three withdrawal states the upstream processor moves through.
/// Used for filter parameters; the stored column is TEXT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WithdrawalStatus {
    Pending,
    Completed,
    Failed,
}

impl WithdrawalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WithdrawalStatus::Pending => "pending",
            WithdrawalStatus::Completed => "completed",
            WithdrawalStatus::Failed => "failed",
        }
    }
}

/// Canonical withdrawal record: `amount` already normalized to a plain
/// number, `transaction_hash` present only once processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Withdrawal {
    pub id: String,
    pub user_id: String,
    pub amount: f64,
    pub wallet_address: String,
    pub transaction_hash: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Canonical per-user balance snapshot, amounts normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserBalance {
    pub id: String,
    pub user_id: String,
    pub balance: f64,
    pub total_earned: f64,
    pub total_withdrawn: f64,
    pub updated_at: DateTime<Utc>,
}

/// One GROUP BY status bucket. Already canonical as it comes off the wire.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// Multi-metric dashboard snapshot computed in a single round trip.
/// `generated_at` records when the snapshot was taken, not when it was read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_users: i64,
    pub total_withdrawals: i64,
    pub pending_withdrawals: i64,
    pub completed_withdrawals: i64,
    pub failed_withdrawals: i64,
    pub total_withdrawn: f64,
    pub generated_at: DateTime<Utc>,
}

/// One page of the user listing plus the pagination envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPage {
    pub users: Vec<User>,
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub pages: i64,
}
