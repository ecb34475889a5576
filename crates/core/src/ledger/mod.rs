//! The shared running cash balance.
//!
//! A single balance record tracks the petty-cash pool. Fund transfers
//! credit it; expense approvals debit it. All mutations must happen
//! inside the store's write guard so check-then-act sequences are atomic.

mod balance;
mod error;

pub use balance::Balance;
pub use error::LedgerError;
