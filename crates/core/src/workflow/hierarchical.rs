//! The hierarchical (multi-level) approval protocol.
//!
//! Transactions start as drafts, are submitted by their requester, then
//! pass a manager step and a finance step in order. Each decided step is
//! recorded in the transaction's approval history. The balance is
//! debited only at the final (finance) approval.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::access::{Role, User};
use crate::workflow::error::WorkflowError;
use crate::workflow::transaction::Transaction;
use crate::workflow::types::{
    ApprovalStep, NoteKind, StepRole, StepStatus, TransactionStatus, WorkflowKind,
};

/// Stateless service for the hierarchical approval protocol.
pub struct HierarchicalApproval;

impl HierarchicalApproval {
    /// Submits a draft for approval, opening the manager step.
    ///
    /// # Errors
    ///
    /// - `WorkflowError::WorkflowMismatch` if the transaction is simple
    /// - `WorkflowError::NotRequester` if the actor is not the requester
    /// - `WorkflowError::InvalidTransition` if not `Draft`
    pub fn submit(
        tx: &mut Transaction,
        actor: &User,
        now: DateTime<Utc>,
    ) -> Result<(), WorkflowError> {
        Self::ensure_hierarchical(tx)?;
        if actor.id != tx.requested_by {
            return Err(WorkflowError::NotRequester { user_id: actor.id });
        }
        if tx.status != TransactionStatus::Draft {
            return Err(WorkflowError::InvalidTransition {
                from: tx.status,
                action: "submit",
            });
        }

        tx.status = TransactionStatus::PendingManager;
        tx.approvals.push(ApprovalStep::pending(StepRole::Manager, 1));
        tx.updated_at = now;
        tx.push_note(
            actor.id,
            NoteKind::StatusChange,
            "submitted for approval",
            now,
        );
        Ok(())
    }

    /// Approves the current step.
    ///
    /// A manager-step approval advances to `PendingFinance` and returns
    /// `None`. A finance-step approval finishes the chain and returns
    /// `Some(post_tax_amount)`: the caller must debit the balance in the
    /// same atomic section, discarding the mutation if the debit fails.
    ///
    /// # Errors
    ///
    /// - `WorkflowError::InvalidTransition` if no step is pending
    /// - `WorkflowError::WrongApprovalRole` if the actor's role does not
    ///   satisfy the pending step
    pub fn approve(
        tx: &mut Transaction,
        actor: &User,
        comment: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Option<Decimal>, WorkflowError> {
        Self::ensure_hierarchical(tx)?;
        let step = Self::pending_step_role(tx, "approve")?;
        Self::check_step_role(step, actor)?;

        Self::decide_pending_step(tx, actor.id, StepStatus::Approved, comment, now);
        match step {
            StepRole::Manager => {
                tx.status = TransactionStatus::PendingFinance;
                tx.approvals.push(ApprovalStep::pending(StepRole::Finance, 2));
                tx.updated_at = now;
                tx.push_note(
                    actor.id,
                    NoteKind::StatusChange,
                    format!("manager step approved by {}", actor.name),
                    now,
                );
                Ok(None)
            }
            StepRole::Finance => {
                tx.status = TransactionStatus::Approved;
                tx.approved_by = Some(actor.id);
                tx.approved_at = Some(now);
                tx.updated_at = now;
                tx.push_note(
                    actor.id,
                    NoteKind::StatusChange,
                    format!("finance step approved by {}", actor.name),
                    now,
                );
                Ok(Some(tx.post_tax_amount))
            }
        }
    }

    /// Rejects the current step, terminating the chain. No balance effect.
    ///
    /// # Errors
    ///
    /// As for [`Self::approve`], plus
    /// `WorkflowError::RejectionReasonRequired` if the reason is empty.
    pub fn reject(
        tx: &mut Transaction,
        actor: &User,
        reason: String,
        now: DateTime<Utc>,
    ) -> Result<(), WorkflowError> {
        Self::ensure_hierarchical(tx)?;
        if reason.trim().is_empty() {
            return Err(WorkflowError::RejectionReasonRequired);
        }
        let step = Self::pending_step_role(tx, "reject")?;
        Self::check_step_role(step, actor)?;

        Self::decide_pending_step(tx, actor.id, StepStatus::Rejected, Some(reason.clone()), now);
        tx.status = TransactionStatus::Rejected;
        tx.rejected_by = Some(actor.id);
        tx.rejected_at = Some(now);
        tx.rejection_reason = Some(reason);
        tx.updated_at = now;
        tx.push_note(
            actor.id,
            NoteKind::StatusChange,
            format!("{step} step rejected by {}", actor.name),
            now,
        );
        Ok(())
    }

    fn ensure_hierarchical(tx: &Transaction) -> Result<(), WorkflowError> {
        if tx.workflow == WorkflowKind::Hierarchical {
            Ok(())
        } else {
            Err(WorkflowError::WorkflowMismatch { kind: tx.workflow })
        }
    }

    /// Maps the status to the step role the transaction currently waits on.
    fn pending_step_role(
        tx: &Transaction,
        action: &'static str,
    ) -> Result<StepRole, WorkflowError> {
        match tx.status {
            TransactionStatus::PendingManager => Ok(StepRole::Manager),
            TransactionStatus::PendingFinance => Ok(StepRole::Finance),
            from => Err(WorkflowError::InvalidTransition { from, action }),
        }
    }

    /// Manager steps take a manager or capped approver; finance steps take
    /// the global administrative roles.
    fn check_step_role(step: StepRole, actor: &User) -> Result<(), WorkflowError> {
        let allowed = match step {
            StepRole::Manager => matches!(actor.role, Role::Manager | Role::Approver),
            StepRole::Finance => actor.role.is_administrative(),
        };
        if allowed {
            Ok(())
        } else {
            Err(WorkflowError::WrongApprovalRole {
                step,
                role: actor.role,
            })
        }
    }

    fn decide_pending_step(
        tx: &mut Transaction,
        approver: cashdesk_shared::types::UserId,
        status: StepStatus,
        comments: Option<String>,
        now: DateTime<Utc>,
    ) {
        if let Some(step) = tx
            .approvals
            .iter_mut()
            .find(|step| step.status == StepStatus::Pending)
        {
            step.approver = Some(approver);
            step.status = status;
            step.comments = comments;
            step.acted_at = Some(now);
        }
    }
}
