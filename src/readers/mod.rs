//! Read-side entity accessors. Each one composes the cache port and the
//! relational query port under the cache-aside protocol: check the cache,
//! on miss query the store, normalize, write through, return. Accessors are
//! stateless; all shared state lives behind the injected ports.

pub mod balances;
pub mod dashboard;
pub mod users;
pub mod withdrawals;

pub use balances::BalanceReader;
pub use dashboard::DashboardReader;
pub use users::UserReader;
pub use withdrawals::WithdrawalReader;
