pub mod client;
pub mod database;

pub use client::{DbClient, DbPool};
pub use database::{BalanceRow, DashboardRow, QueryPort, WithdrawalRow};
