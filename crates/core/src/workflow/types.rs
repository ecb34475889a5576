//! Workflow domain types for the expense transaction lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use cashdesk_shared::types::UserId;

/// Transaction status in the approval workflow.
///
/// Simple protocol: `Pending` → `Approved` | `Rejected`, then
/// `Approved` → `Paid`.
///
/// Hierarchical protocol: `Draft` → `PendingManager` → `PendingFinance`
/// → `Approved` | `Rejected`, then `Approved` → `Paid`.
///
/// `InfoRequested` is a detour from any pending status; an owner/admin
/// update returns the transaction to the pending status it was parked
/// from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Being drafted; may be edited or deleted.
    Draft,
    /// Awaiting a single-step (simple protocol) decision.
    Pending,
    /// Awaiting the manager-level approval step.
    PendingManager,
    /// Awaiting the finance-level approval step.
    PendingFinance,
    /// Approved; the balance has been debited. Terminal for edits.
    Approved,
    /// Rejected. Terminal.
    Rejected,
    /// Approved and paid out. Terminal.
    Paid,
    /// An approver asked the owner for more information.
    InfoRequested,
}

impl TransactionStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::PendingManager => "pending_manager",
            Self::PendingFinance => "pending_finance",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Paid => "paid",
            Self::InfoRequested => "info_requested",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "pending" => Some(Self::Pending),
            "pending_manager" => Some(Self::PendingManager),
            "pending_finance" => Some(Self::PendingFinance),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "paid" => Some(Self::Paid),
            "info_requested" => Some(Self::InfoRequested),
            _ => None,
        }
    }

    /// Returns true if the status is terminal: no further update, delete,
    /// approve, or reject may succeed.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected | Self::Paid)
    }

    /// Returns true if the transaction may still be edited by its owner.
    #[must_use]
    pub const fn is_editable(self) -> bool {
        matches!(self, Self::Draft | Self::Pending | Self::InfoRequested)
    }

    /// Returns true if the transaction is waiting on an approval decision.
    #[must_use]
    pub const fn is_awaiting_approval(self) -> bool {
        matches!(self, Self::Pending | Self::PendingManager | Self::PendingFinance)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which approval protocol governs a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowKind {
    /// Single-step admin/manager approval.
    Simple,
    /// Legacy multi-level manager-then-finance approval.
    Hierarchical,
}

impl WorkflowKind {
    /// The status a freshly created transaction starts in.
    #[must_use]
    pub const fn initial_status(self) -> TransactionStatus {
        match self {
            Self::Simple => TransactionStatus::Pending,
            Self::Hierarchical => TransactionStatus::Draft,
        }
    }

    /// Returns the string representation of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Hierarchical => "hierarchical",
        }
    }
}

impl fmt::Display for WorkflowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Role an approval step is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepRole {
    /// The owner's reporting manager.
    Manager,
    /// Finance sign-off (satisfied by the global administrative roles).
    Finance,
}

impl fmt::Display for StepRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manager => write!(f, "manager"),
            Self::Finance => write!(f, "finance"),
        }
    }
}

/// Outcome of an approval step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// Awaiting a decision.
    Pending,
    /// Step approved.
    Approved,
    /// Step rejected (terminal for the transaction).
    Rejected,
}

/// One entry in a transaction's ordered approval history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalStep {
    /// Who acted on the step, once decided.
    pub approver: Option<UserId>,
    /// Role the step waits on.
    pub role: StepRole,
    /// 1-based position in the chain.
    pub level: u8,
    /// Current outcome.
    pub status: StepStatus,
    /// Approver comments, if any.
    pub comments: Option<String>,
    /// When the step was decided.
    pub acted_at: Option<DateTime<Utc>>,
}

impl ApprovalStep {
    /// Creates a pending step for a role at a level.
    #[must_use]
    pub const fn pending(role: StepRole, level: u8) -> Self {
        Self {
            approver: None,
            role,
            level,
            status: StepStatus::Pending,
            comments: None,
            acted_at: None,
        }
    }
}

/// Classification of an audit-trail note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteKind {
    /// An approver asked the owner for more information.
    InfoRequest,
    /// A status transition was recorded.
    StatusChange,
    /// The owner edited the transaction.
    Edit,
}

/// A structured audit-trail entry.
///
/// Replaces the legacy free-text notes blob: each entry keeps its actor,
/// timestamp, and kind so the trail is queryable without parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteEntry {
    /// Who wrote the note.
    pub actor: UserId,
    /// When it was written.
    pub at: DateTime<Utc>,
    /// What kind of event it records.
    pub kind: NoteKind,
    /// Human-readable message.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_strings() {
        for status in [
            TransactionStatus::Draft,
            TransactionStatus::Pending,
            TransactionStatus::PendingManager,
            TransactionStatus::PendingFinance,
            TransactionStatus::Approved,
            TransactionStatus::Rejected,
            TransactionStatus::Paid,
            TransactionStatus::InfoRequested,
        ] {
            assert_eq!(TransactionStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(TransactionStatus::parse("invalid"), None);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(TransactionStatus::Approved.is_terminal());
        assert!(TransactionStatus::Rejected.is_terminal());
        assert!(TransactionStatus::Paid.is_terminal());
        assert!(!TransactionStatus::Pending.is_terminal());
        assert!(!TransactionStatus::InfoRequested.is_terminal());
    }

    #[test]
    fn test_editable_statuses() {
        assert!(TransactionStatus::Draft.is_editable());
        assert!(TransactionStatus::Pending.is_editable());
        assert!(TransactionStatus::InfoRequested.is_editable());
        assert!(!TransactionStatus::PendingManager.is_editable());
        assert!(!TransactionStatus::Approved.is_editable());
    }

    #[test]
    fn test_awaiting_approval_statuses() {
        assert!(TransactionStatus::Pending.is_awaiting_approval());
        assert!(TransactionStatus::PendingManager.is_awaiting_approval());
        assert!(TransactionStatus::PendingFinance.is_awaiting_approval());
        assert!(!TransactionStatus::Draft.is_awaiting_approval());
        assert!(!TransactionStatus::Paid.is_awaiting_approval());
    }

    #[test]
    fn test_initial_status_per_workflow() {
        assert_eq!(
            WorkflowKind::Simple.initial_status(),
            TransactionStatus::Pending
        );
        assert_eq!(
            WorkflowKind::Hierarchical.initial_status(),
            TransactionStatus::Draft
        );
    }

    #[test]
    fn test_pending_step() {
        let step = ApprovalStep::pending(StepRole::Manager, 1);
        assert_eq!(step.status, StepStatus::Pending);
        assert_eq!(step.level, 1);
        assert!(step.approver.is_none());
        assert!(step.acted_at.is_none());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(TransactionStatus::PendingManager.to_string(), "pending_manager");
        assert_eq!(TransactionStatus::InfoRequested.to_string(), "info_requested");
    }
}
