//! The simple (single-step) approval protocol.
//!
//! An admin approves anything; a manager/approver approves only
//! transactions owned by themselves or a direct report. Approval debits
//! the balance: the caller receives the debit amount and must apply it
//! atomically with persisting the transaction, aborting both on failure.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::access::{Role, User, VisibilityScope};
use crate::workflow::error::WorkflowError;
use crate::workflow::transaction::Transaction;
use crate::workflow::types::{NoteKind, TransactionStatus, WorkflowKind};

/// Stateless service for the simple approval protocol.
pub struct SimpleApproval;

impl SimpleApproval {
    /// Approves a pending transaction.
    ///
    /// Returns the amount to debit from the balance (`post_tax_amount`).
    /// The caller must debit and persist in one atomic section; if the
    /// debit fails the mutated transaction must be discarded.
    ///
    /// # Errors
    ///
    /// - `WorkflowError::WorkflowMismatch` if the transaction is
    ///   hierarchical
    /// - `WorkflowError::InvalidTransition` if not `Pending`
    /// - `WorkflowError::NotAuthorized` if the actor is not an admin or
    ///   an authorized manager
    /// - `WorkflowError::ExceedsApprovalLimit` for capped approvers
    pub fn approve(
        tx: &mut Transaction,
        actor: &User,
        scope: &VisibilityScope,
        comment: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Decimal, WorkflowError> {
        Self::ensure_simple(tx)?;
        if tx.status != TransactionStatus::Pending {
            return Err(WorkflowError::InvalidTransition {
                from: tx.status,
                action: "approve",
            });
        }
        Self::authorize(tx, actor, scope)?;

        tx.status = TransactionStatus::Approved;
        tx.approved_by = Some(actor.id);
        tx.approved_at = Some(now);
        tx.admin_comment = comment;
        tx.updated_at = now;
        tx.push_note(
            actor.id,
            NoteKind::StatusChange,
            format!("approved by {}", actor.name),
            now,
        );
        Ok(tx.post_tax_amount)
    }

    /// Rejects a pending transaction. No balance effect.
    ///
    /// # Errors
    ///
    /// As for [`Self::approve`], plus
    /// `WorkflowError::RejectionReasonRequired` if the comment is empty.
    pub fn reject(
        tx: &mut Transaction,
        actor: &User,
        scope: &VisibilityScope,
        comment: String,
        now: DateTime<Utc>,
    ) -> Result<(), WorkflowError> {
        Self::ensure_simple(tx)?;
        if comment.trim().is_empty() {
            return Err(WorkflowError::RejectionReasonRequired);
        }
        if tx.status != TransactionStatus::Pending {
            return Err(WorkflowError::InvalidTransition {
                from: tx.status,
                action: "reject",
            });
        }
        Self::authorize(tx, actor, scope)?;

        tx.status = TransactionStatus::Rejected;
        tx.rejected_by = Some(actor.id);
        tx.rejected_at = Some(now);
        tx.rejection_reason = Some(comment);
        tx.updated_at = now;
        tx.push_note(
            actor.id,
            NoteKind::StatusChange,
            format!("rejected by {}", actor.name),
            now,
        );
        Ok(())
    }

    fn ensure_simple(tx: &Transaction) -> Result<(), WorkflowError> {
        if tx.workflow == WorkflowKind::Simple {
            Ok(())
        } else {
            Err(WorkflowError::WorkflowMismatch { kind: tx.workflow })
        }
    }

    /// Admin/ceo act unconditionally; manager/approver must pass the
    /// single-record scope check; everyone else is denied.
    fn authorize(
        tx: &Transaction,
        actor: &User,
        scope: &VisibilityScope,
    ) -> Result<(), WorkflowError> {
        match actor.role {
            Role::Admin | Role::Ceo => Ok(()),
            Role::Manager | Role::Approver => {
                if !scope.permits(Some(tx.submitted_by), Some(tx.requested_by)) {
                    return Err(WorkflowError::NotAuthorized { user_id: actor.id });
                }
                if actor.role == Role::Approver
                    && let Some(limit) = actor.approval_limit
                    && tx.post_tax_amount > limit
                {
                    return Err(WorkflowError::ExceedsApprovalLimit {
                        amount: tx.post_tax_amount,
                        limit,
                    });
                }
                Ok(())
            }
            Role::Employee | Role::Intern | Role::Auditor => {
                Err(WorkflowError::NotAuthorized { user_id: actor.id })
            }
        }
    }
}
