//! Store-level errors: not-found plus pass-through domain errors.

use thiserror::Error;

use cashdesk_core::access::AccessError;
use cashdesk_core::ledger::LedgerError;
use cashdesk_core::transfer::TransferError;
use cashdesk_core::workflow::WorkflowError;
use cashdesk_shared::types::{FundTransferId, TransactionId, UserId};

/// Errors returned by the repositories.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No transaction with this id, or it is outside the actor's scope.
    #[error("Transaction {0} not found")]
    TransactionNotFound(TransactionId),

    /// No such user.
    #[error("User {0} not found")]
    UserNotFound(UserId),

    /// No such fund transfer.
    #[error("Fund transfer {0} not found")]
    TransferNotFound(FundTransferId),

    /// Email addresses are unique across accounts.
    #[error("A user with email {0} already exists")]
    DuplicateEmail(String),

    /// Role string is neither a known role nor a legacy alias.
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// Access-control violation.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// Workflow rule violation.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// Balance rule violation.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Fund-transfer validation failure.
    #[error(transparent)]
    Transfer(#[from] TransferError),
}

impl StoreError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::TransactionNotFound(_)
            | Self::UserNotFound(_)
            | Self::TransferNotFound(_) => 404,
            Self::DuplicateEmail(_) => 409,
            Self::UnknownRole(_) => 400,
            Self::Access(e) => e.status_code(),
            Self::Workflow(e) => e.status_code(),
            Self::Ledger(e) => e.status_code(),
            Self::Transfer(e) => e.status_code(),
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::TransactionNotFound(_)
            | Self::UserNotFound(_)
            | Self::TransferNotFound(_) => "NOT_FOUND",
            Self::DuplicateEmail(_) => "DUPLICATE_EMAIL",
            Self::UnknownRole(_) => "UNKNOWN_ROLE",
            Self::Access(e) => e.error_code(),
            Self::Workflow(e) => e.error_code(),
            Self::Ledger(e) => e.error_code(),
            Self::Transfer(e) => e.error_code(),
        }
    }
}
