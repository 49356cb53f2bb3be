//! Converts store-native numeric representations into the single canonical
//! numeric type every value carries once it crosses into cache or response
//! layers. Applied after every relational read and before every cache write,
//! so cached payloads deserialize straight into canonical types and a hit
//! never re-normalizes. All conversions are total: nulls stay null, non-numeric
//! scalars pass through, sequences map element-wise preserving order.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::db::database::{BalanceRow, DashboardRow, WithdrawalRow};
use crate::models::{DashboardStats, UserBalance, Withdrawal};

/// NUMERIC/fixed-point to plain number.
pub fn money(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

impl From<WithdrawalRow> for Withdrawal {
    fn from(row: WithdrawalRow) -> Self {
        Withdrawal {
            id: row.id,
            user_id: row.user_id,
            amount: money(row.amount),
            wallet_address: row.wallet_address,
            transaction_hash: row.transaction_hash,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<BalanceRow> for UserBalance {
    fn from(row: BalanceRow) -> Self {
        UserBalance {
            id: row.id,
            user_id: row.user_id,
            balance: money(row.balance),
            total_earned: money(row.total_earned),
            total_withdrawn: money(row.total_withdrawn),
            updated_at: row.updated_at,
        }
    }
}

impl DashboardRow {
    /// Normalizes the aggregate and stamps it with the snapshot time, so a
    /// later cache hit still reports when the numbers were computed.
    pub fn into_stats(self, generated_at: DateTime<Utc>) -> DashboardStats {
        DashboardStats {
            total_users: self.total_users,
            total_withdrawals: self.total_withdrawals,
            pending_withdrawals: self.pending_withdrawals,
            completed_withdrawals: self.completed_withdrawals,
            failed_withdrawals: self.failed_withdrawals,
            total_withdrawn: money(self.total_withdrawn),
            generated_at,
        }
    }
}

pub fn withdrawals(rows: Vec<WithdrawalRow>) -> Vec<Withdrawal> {
    rows.into_iter().map(Withdrawal::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn money_preserves_decimal_value() {
        assert_eq!(money(Decimal::new(123_450, 2)), 1234.5);
        assert_eq!(money(Decimal::ZERO), 0.0);
        assert_eq!(money(Decimal::new(-75, 1)), -7.5);
    }

    #[test]
    fn withdrawal_row_normalizes_amount_and_keeps_the_rest() {
        let now = Utc::now();
        let row = WithdrawalRow {
            id: "w-1".to_string(),
            user_id: "u-1".to_string(),
            amount: Decimal::new(500_25, 2),
            wallet_address: "0xabc".to_string(),
            transaction_hash: None,
            status: "pending".to_string(),
            created_at: now,
            updated_at: now,
        };

        let withdrawal = Withdrawal::from(row);
        assert_eq!(withdrawal.amount, 500.25);
        assert_eq!(withdrawal.transaction_hash, None);
        assert_eq!(withdrawal.status, "pending");
    }

    #[test]
    fn sequence_normalization_preserves_order() {
        let now = Utc::now();
        let row = |id: &str, cents: i64| WithdrawalRow {
            id: id.to_string(),
            user_id: "u-1".to_string(),
            amount: Decimal::new(cents, 2),
            wallet_address: "0xabc".to_string(),
            transaction_hash: Some("0xhash".to_string()),
            status: "completed".to_string(),
            created_at: now,
            updated_at: now,
        };

        let normalized = withdrawals(vec![row("w-2", 200), row("w-1", 100)]);
        let ids: Vec<&str> = normalized.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["w-2", "w-1"]);
        assert_eq!(normalized[0].amount, 2.0);
    }

    #[test]
    fn dashboard_row_stamps_generation_time() {
        let at = Utc::now();
        let stats = DashboardRow {
            total_users: 10,
            total_withdrawals: 4,
            pending_withdrawals: 1,
            completed_withdrawals: 2,
            failed_withdrawals: 1,
            total_withdrawn: Decimal::new(99_99, 2),
        }
        .into_stats(at);

        assert_eq!(stats.total_withdrawn, 99.99);
        assert_eq!(stats.generated_at, at);
    }
}
