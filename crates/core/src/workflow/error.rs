//! Workflow error types for the expense transaction lifecycle.

use rust_decimal::Decimal;
use thiserror::Error;

use cashdesk_shared::types::UserId;

use crate::access::Role;
use crate::workflow::types::{StepRole, TransactionStatus, WorkflowKind};

/// Errors that can occur during workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Action attempted from a status that does not permit it.
    /// The message names the current status for debuggability.
    #[error("Cannot {action} a transaction in status {from}")]
    InvalidTransition {
        /// The current status.
        from: TransactionStatus,
        /// The attempted action.
        action: &'static str,
    },

    /// Action belongs to the other approval protocol.
    #[error("Transaction uses the {kind} workflow; this action does not apply")]
    WorkflowMismatch {
        /// The transaction's workflow kind.
        kind: WorkflowKind,
    },

    /// Rejection requires a non-empty comment.
    #[error("Rejection reason is required")]
    RejectionReasonRequired,

    /// Info requests require a non-empty message.
    #[error("Info request message is required")]
    InfoMessageRequired,

    /// Only the requester may submit a draft.
    #[error("Only the requester may submit this transaction")]
    NotRequester {
        /// The acting user.
        user_id: UserId,
    },

    /// Actor's role does not match the pending approval step.
    #[error("Role {role} cannot act on the pending {step} approval step")]
    WrongApprovalRole {
        /// Role the pending step waits on.
        step: StepRole,
        /// The actor's role.
        role: Role,
    },

    /// Actor may not act on this transaction at all.
    #[error("User {user_id} is not authorized to act on this transaction")]
    NotAuthorized {
        /// The acting user.
        user_id: UserId,
    },

    /// Only the owner or an admin may edit or delete.
    #[error("User {user_id} is not the owner of this transaction")]
    NotOwner {
        /// The acting user.
        user_id: UserId,
    },

    /// Transaction amount exceeds the approver's cap.
    #[error("Transaction amount {amount} exceeds approval limit {limit}")]
    ExceedsApprovalLimit {
        /// The transaction amount.
        amount: Decimal,
        /// The approver's cap.
        limit: Decimal,
    },

    /// The payable amount must be strictly positive.
    #[error("Post-tax amount must be positive, got {amount}")]
    NonPositiveAmount {
        /// The offending amount.
        amount: Decimal,
    },
}

impl WorkflowError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. } | Self::WorkflowMismatch { .. } => 409,

            Self::RejectionReasonRequired
            | Self::InfoMessageRequired
            | Self::NonPositiveAmount { .. } => 400,

            Self::NotRequester { .. }
            | Self::WrongApprovalRole { .. }
            | Self::NotAuthorized { .. }
            | Self::NotOwner { .. }
            | Self::ExceedsApprovalLimit { .. } => 403,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::WorkflowMismatch { .. } => "WORKFLOW_MISMATCH",
            Self::RejectionReasonRequired => "REJECTION_REASON_REQUIRED",
            Self::InfoMessageRequired => "INFO_MESSAGE_REQUIRED",
            Self::NotRequester { .. } => "NOT_REQUESTER",
            Self::WrongApprovalRole { .. } => "WRONG_APPROVAL_ROLE",
            Self::NotAuthorized { .. } => "NOT_AUTHORIZED",
            Self::NotOwner { .. } => "NOT_OWNER",
            Self::ExceedsApprovalLimit { .. } => "EXCEEDS_APPROVAL_LIMIT",
            Self::NonPositiveAmount { .. } => "NON_POSITIVE_AMOUNT",
        }
    }
}
