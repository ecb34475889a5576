//! Repository handles over the shared store.
//!
//! Each repository follows the same shape: take the write guard, resolve
//! the acting user and their scope, run the pure core rules against a
//! clone of the record, then write the clone back. Nothing is persisted
//! if any step fails.

mod balance;
mod fund_transfer;
mod transaction;
mod user;

pub use balance::BalanceRepository;
pub use fund_transfer::FundTransferRepository;
pub use transaction::{CategorySpend, TransactionRepository, UpdateTransaction};
pub use user::{NewUser, UserRepository};
