//! Shared domain-neutral types.

mod id;

pub use id::{CategoryId, ClientId, FundTransferId, TransactionId, UserId};
