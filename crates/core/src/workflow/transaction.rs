//! The expense transaction entity.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use cashdesk_shared::types::{CategoryId, TransactionId, UserId};

use crate::workflow::error::WorkflowError;
use crate::workflow::types::{
    ApprovalStep, NoteEntry, NoteKind, TransactionStatus, WorkflowKind,
};

/// An expense claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier.
    pub id: TransactionId,
    /// Human-readable number (`TXN-YYYYMM-NNNN`), assigned once at
    /// creation and never reused.
    pub number: String,
    /// Expense category.
    pub category: CategoryId,
    /// Amount before tax.
    pub pre_tax_amount: Decimal,
    /// Tax amount.
    pub tax_amount: Decimal,
    /// The authoritative payable amount. Always positive.
    pub post_tax_amount: Decimal,
    /// Date the expense occurred.
    pub transaction_date: NaiveDate,
    /// How the expense was or will be paid.
    pub payment_method: String,
    /// Who is being paid.
    pub payee_client_name: String,
    /// What the expense is for.
    pub purpose: String,
    /// Who entered the claim.
    pub submitted_by: UserId,
    /// Who the expense is for; equals `submitted_by` in simple flows.
    pub requested_by: UserId,
    /// Who approved it, once approved.
    pub approved_by: Option<UserId>,
    /// Who rejected it, once rejected.
    pub rejected_by: Option<UserId>,
    /// Approval timestamp.
    pub approved_at: Option<DateTime<Utc>>,
    /// Rejection timestamp.
    pub rejected_at: Option<DateTime<Utc>>,
    /// Current lifecycle status.
    pub status: TransactionStatus,
    /// Which approval protocol governs this transaction.
    pub workflow: WorkflowKind,
    /// Ordered approval-step history (hierarchical protocol).
    pub approvals: Vec<ApprovalStep>,
    /// Reason given on rejection.
    pub rejection_reason: Option<String>,
    /// Optional comment recorded by the approving admin/manager.
    pub admin_comment: Option<String>,
    /// Structured append-only audit trail.
    pub notes: Vec<NoteEntry>,
    /// Date the expense was paid out.
    pub paid_date: Option<NaiveDate>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTransaction {
    /// Which approval protocol to use.
    pub workflow: WorkflowKind,
    /// Expense category.
    pub category: CategoryId,
    /// Amount before tax.
    pub pre_tax_amount: Decimal,
    /// Tax amount.
    pub tax_amount: Decimal,
    /// The authoritative payable amount. Must be positive.
    pub post_tax_amount: Decimal,
    /// Date the expense occurred.
    pub transaction_date: NaiveDate,
    /// How the expense was or will be paid.
    pub payment_method: String,
    /// Who is being paid.
    pub payee_client_name: String,
    /// What the expense is for.
    pub purpose: String,
    /// Who the expense is for; defaults to the submitter.
    pub requested_by: Option<UserId>,
}

impl Transaction {
    /// Creates a transaction from validated input.
    ///
    /// The `number` must come from the store's per-month counter so it is
    /// unique; the initial status follows the workflow kind.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::NonPositiveAmount` if the payable amount
    /// is not positive.
    pub fn create(
        number: String,
        input: NewTransaction,
        submitted_by: UserId,
        now: DateTime<Utc>,
    ) -> Result<Self, WorkflowError> {
        if input.post_tax_amount <= Decimal::ZERO {
            return Err(WorkflowError::NonPositiveAmount {
                amount: input.post_tax_amount,
            });
        }
        Ok(Self {
            id: TransactionId::new(),
            number,
            category: input.category,
            pre_tax_amount: input.pre_tax_amount,
            tax_amount: input.tax_amount,
            post_tax_amount: input.post_tax_amount,
            transaction_date: input.transaction_date,
            payment_method: input.payment_method,
            payee_client_name: input.payee_client_name,
            purpose: input.purpose,
            submitted_by,
            requested_by: input.requested_by.unwrap_or(submitted_by),
            approved_by: None,
            rejected_by: None,
            approved_at: None,
            rejected_at: None,
            status: input.workflow.initial_status(),
            workflow: input.workflow,
            approvals: Vec::new(),
            rejection_reason: None,
            admin_comment: None,
            notes: Vec::new(),
            paid_date: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Returns true if the user owns this transaction (submitted or
    /// requested it).
    #[must_use]
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.submitted_by == user_id || self.requested_by == user_id
    }

    /// Appends a structured audit note.
    pub fn push_note(
        &mut self,
        actor: UserId,
        kind: NoteKind,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) {
        self.notes.push(NoteEntry {
            actor,
            at: now,
            kind,
            message: message.into(),
        });
    }

    /// Returns the approval step currently awaiting a decision, if any.
    #[must_use]
    pub fn pending_step(&self) -> Option<&ApprovalStep> {
        self.approvals
            .iter()
            .find(|step| step.status == crate::workflow::types::StepStatus::Pending)
    }
}
