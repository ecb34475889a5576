//! Lifecycle actions shared by both approval protocols: payout,
//! info requests, and the edit/delete guards.

use chrono::{DateTime, NaiveDate, Utc};

use crate::access::{Role, User, VisibilityScope};
use crate::workflow::error::WorkflowError;
use crate::workflow::transaction::Transaction;
use crate::workflow::types::{NoteKind, StepRole, TransactionStatus, WorkflowKind};

/// Stateless service for protocol-independent transitions and guards.
pub struct Lifecycle;

impl Lifecycle {
    /// Marks an approved transaction as paid out.
    ///
    /// Administrative roles only. The caller bumps the monthly
    /// per-category spent aggregate alongside the persist.
    ///
    /// # Errors
    ///
    /// - `WorkflowError::NotAuthorized` unless the actor is admin/ceo
    /// - `WorkflowError::InvalidTransition` if not `Approved`
    pub fn mark_as_paid(
        tx: &mut Transaction,
        actor: &User,
        paid_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<(), WorkflowError> {
        if !actor.role.is_administrative() {
            return Err(WorkflowError::NotAuthorized { user_id: actor.id });
        }
        if tx.status != TransactionStatus::Approved {
            return Err(WorkflowError::InvalidTransition {
                from: tx.status,
                action: "mark as paid",
            });
        }

        tx.status = TransactionStatus::Paid;
        tx.paid_date = Some(paid_date);
        tx.updated_at = now;
        tx.push_note(
            actor.id,
            NoteKind::StatusChange,
            format!("marked paid by {}", actor.name),
            now,
        );
        Ok(())
    }

    /// Asks the owner for more information, parking the transaction in
    /// `InfoRequested` until the owner edits it.
    ///
    /// # Errors
    ///
    /// - `WorkflowError::InfoMessageRequired` if the message is empty
    /// - `WorkflowError::InvalidTransition` unless a decision is pending
    /// - `WorkflowError::NotAuthorized` unless the actor is admin/ceo or
    ///   a manager/approver whose scope covers the owner
    pub fn request_info(
        tx: &mut Transaction,
        actor: &User,
        scope: &VisibilityScope,
        message: String,
        now: DateTime<Utc>,
    ) -> Result<(), WorkflowError> {
        if message.trim().is_empty() {
            return Err(WorkflowError::InfoMessageRequired);
        }
        if !tx.status.is_awaiting_approval() {
            return Err(WorkflowError::InvalidTransition {
                from: tx.status,
                action: "request info on",
            });
        }
        let allowed = match actor.role {
            Role::Admin | Role::Ceo => true,
            Role::Manager | Role::Approver => {
                scope.permits(Some(tx.submitted_by), Some(tx.requested_by))
            }
            Role::Employee | Role::Intern | Role::Auditor => false,
        };
        if !allowed {
            return Err(WorkflowError::NotAuthorized { user_id: actor.id });
        }

        tx.status = TransactionStatus::InfoRequested;
        tx.updated_at = now;
        tx.push_note(actor.id, NoteKind::InfoRequest, message, now);
        Ok(())
    }

    /// Checks that the actor may edit the transaction in its current
    /// status. Owners and admins only, and never once a decision chain is
    /// underway or the status is terminal.
    ///
    /// # Errors
    ///
    /// `WorkflowError::InvalidTransition` for a non-editable status,
    /// `WorkflowError::NotOwner` for anyone but the owner or an admin.
    pub fn ensure_can_update(tx: &Transaction, actor: &User) -> Result<(), WorkflowError> {
        if !tx.status.is_editable() {
            return Err(WorkflowError::InvalidTransition {
                from: tx.status,
                action: "update",
            });
        }
        Self::ensure_owner_or_admin(tx, actor)
    }

    /// Records an owner/admin edit: appends the audit note and, when the
    /// transaction was parked in `InfoRequested`, returns it to the
    /// pending status it was parked from so the approval can continue.
    pub fn record_update(tx: &mut Transaction, actor: &User, now: DateTime<Utc>) {
        if tx.status == TransactionStatus::InfoRequested {
            tx.status = Self::resume_status(tx);
        }
        tx.updated_at = now;
        tx.push_note(
            actor.id,
            NoteKind::Edit,
            format!("updated by {}", actor.name),
            now,
        );
    }

    /// The awaiting status an info-request detour returns to: `Pending`
    /// for the simple protocol, the undecided step's status for the
    /// hierarchical chain.
    fn resume_status(tx: &Transaction) -> TransactionStatus {
        match tx.workflow {
            WorkflowKind::Simple => TransactionStatus::Pending,
            WorkflowKind::Hierarchical => match tx.pending_step().map(|step| step.role) {
                Some(StepRole::Finance) => TransactionStatus::PendingFinance,
                _ => TransactionStatus::PendingManager,
            },
        }
    }

    /// Checks that the actor may delete the transaction. Drafts only,
    /// owner or admin.
    ///
    /// # Errors
    ///
    /// As for [`Self::ensure_can_update`].
    pub fn ensure_can_delete(tx: &Transaction, actor: &User) -> Result<(), WorkflowError> {
        if tx.status != TransactionStatus::Draft {
            return Err(WorkflowError::InvalidTransition {
                from: tx.status,
                action: "delete",
            });
        }
        Self::ensure_owner_or_admin(tx, actor)
    }

    fn ensure_owner_or_admin(tx: &Transaction, actor: &User) -> Result<(), WorkflowError> {
        if actor.role.is_administrative() || tx.is_owned_by(actor.id) {
            Ok(())
        } else {
            Err(WorkflowError::NotOwner { user_id: actor.id })
        }
    }
}
