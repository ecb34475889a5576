//! Transaction repository: lifecycle operations and scoped queries.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use cashdesk_core::numbering;
use cashdesk_core::workflow::{
    HierarchicalApproval, Lifecycle, NewTransaction, SimpleApproval, Transaction,
    TransactionStatus, WorkflowError,
};
use cashdesk_shared::types::{CategoryId, TransactionId, UserId};

use crate::error::StoreError;
use crate::notifier::log_notify_failure;
use crate::Store;

/// Partial update applied by the owner or an admin.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTransaction {
    /// New expense category.
    pub category: Option<CategoryId>,
    /// New pre-tax amount.
    pub pre_tax_amount: Option<Decimal>,
    /// New tax amount.
    pub tax_amount: Option<Decimal>,
    /// New payable amount. Must be positive.
    pub post_tax_amount: Option<Decimal>,
    /// New expense date.
    pub transaction_date: Option<NaiveDate>,
    /// New payment method.
    pub payment_method: Option<String>,
    /// New payee.
    pub payee_client_name: Option<String>,
    /// New purpose.
    pub purpose: Option<String>,
}

/// One row of the per-category spending report.
#[derive(Debug, Clone, Serialize)]
pub struct CategorySpend {
    /// The expense category.
    pub category: CategoryId,
    /// Sum of payable amounts for approved and paid transactions.
    pub total: Decimal,
    /// Number of transactions aggregated.
    pub count: u64,
}

/// Repository for expense transactions.
#[derive(Clone)]
pub struct TransactionRepository {
    store: Store,
}

impl TransactionRepository {
    /// Creates a repository handle.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Creates a transaction, assigning the next number for the month.
    pub async fn create(
        &self,
        actor_id: UserId,
        input: NewTransaction,
    ) -> Result<Transaction, StoreError> {
        // Validate before touching the counter so failed creates leave
        // no gap in the sequence.
        if input.post_tax_amount <= Decimal::ZERO {
            return Err(WorkflowError::NonPositiveAmount {
                amount: input.post_tax_amount,
            }
            .into());
        }

        let mut state = self.store.inner().write().await;
        let actor = state.actor(actor_id)?.clone();
        let now = Utc::now();
        let number = state.next_transaction_number(now.date_naive());
        let tx = Transaction::create(number, input, actor.id, now)?;
        state.transactions.insert(tx.id, tx.clone());
        Ok(tx)
    }

    /// Lists transactions the actor may see, oldest first.
    pub async fn list_visible(&self, actor_id: UserId) -> Result<Vec<Transaction>, StoreError> {
        let state = self.store.inner().read().await;
        let actor = state.actor(actor_id)?;
        let scope = state.scope_for(actor);
        Ok(state
            .transactions
            .values()
            .filter(|tx| scope.permits(Some(tx.submitted_by), Some(tx.requested_by)))
            .cloned()
            .collect())
    }

    /// Fetches one transaction. Records outside the actor's scope are
    /// reported as not found rather than forbidden.
    pub async fn get(
        &self,
        actor_id: UserId,
        id: TransactionId,
    ) -> Result<Transaction, StoreError> {
        let state = self.store.inner().read().await;
        let actor = state.actor(actor_id)?;
        let scope = state.scope_for(actor);
        let tx = state.transaction(id)?;
        if !scope.permits(Some(tx.submitted_by), Some(tx.requested_by)) {
            return Err(StoreError::TransactionNotFound(id));
        }
        Ok(tx.clone())
    }

    /// Applies an owner/admin edit. An edit to an `InfoRequested`
    /// transaction returns it to `Pending`.
    pub async fn update(
        &self,
        actor_id: UserId,
        id: TransactionId,
        patch: UpdateTransaction,
    ) -> Result<Transaction, StoreError> {
        let mut state = self.store.inner().write().await;
        let actor = state.actor(actor_id)?.clone();
        let mut tx = state.transaction(id)?.clone();
        Lifecycle::ensure_can_update(&tx, &actor)?;

        if let Some(amount) = patch.post_tax_amount {
            if amount <= Decimal::ZERO {
                return Err(WorkflowError::NonPositiveAmount { amount }.into());
            }
            tx.post_tax_amount = amount;
        }
        if let Some(category) = patch.category {
            tx.category = category;
        }
        if let Some(amount) = patch.pre_tax_amount {
            tx.pre_tax_amount = amount;
        }
        if let Some(amount) = patch.tax_amount {
            tx.tax_amount = amount;
        }
        if let Some(date) = patch.transaction_date {
            tx.transaction_date = date;
        }
        if let Some(method) = patch.payment_method {
            tx.payment_method = method;
        }
        if let Some(payee) = patch.payee_client_name {
            tx.payee_client_name = payee;
        }
        if let Some(purpose) = patch.purpose {
            tx.purpose = purpose;
        }
        Lifecycle::record_update(&mut tx, &actor, Utc::now());
        state.transactions.insert(tx.id, tx.clone());
        Ok(tx)
    }

    /// Deletes a draft.
    pub async fn delete(&self, actor_id: UserId, id: TransactionId) -> Result<(), StoreError> {
        let mut state = self.store.inner().write().await;
        let actor = state.actor(actor_id)?.clone();
        let tx = state.transaction(id)?;
        Lifecycle::ensure_can_delete(tx, &actor)?;
        state.transactions.remove(&id);
        Ok(())
    }

    /// Submits a hierarchical draft for approval.
    pub async fn submit(
        &self,
        actor_id: UserId,
        id: TransactionId,
    ) -> Result<Transaction, StoreError> {
        let tx = {
            let mut state = self.store.inner().write().await;
            let actor = state.actor(actor_id)?.clone();
            let mut tx = state.transaction(id)?.clone();
            HierarchicalApproval::submit(&mut tx, &actor, Utc::now())?;
            state.transactions.insert(tx.id, tx.clone());
            tx
        };
        log_notify_failure(
            self.store.notifier().notify_submitted(&tx).await,
            "submitted",
        );
        Ok(tx)
    }

    /// Approves a simple-protocol transaction and debits the balance in
    /// the same guarded section. An insufficient balance aborts the whole
    /// approval with no state change.
    pub async fn approve_simple(
        &self,
        actor_id: UserId,
        id: TransactionId,
        comment: Option<String>,
    ) -> Result<Transaction, StoreError> {
        let tx = {
            let mut state = self.store.inner().write().await;
            let actor = state.actor(actor_id)?.clone();
            let scope = state.scope_for(&actor);
            let mut tx = state.transaction(id)?.clone();
            let now = Utc::now();
            let amount = SimpleApproval::approve(&mut tx, &actor, &scope, comment, now)?;
            state.balance.debit(amount, actor.id, now)?;
            state.transactions.insert(tx.id, tx.clone());
            tx
        };
        log_notify_failure(
            self.store.notifier().notify_status_update(&tx).await,
            "approved",
        );
        Ok(tx)
    }

    /// Rejects a simple-protocol transaction.
    pub async fn reject_simple(
        &self,
        actor_id: UserId,
        id: TransactionId,
        comment: String,
    ) -> Result<Transaction, StoreError> {
        let tx = {
            let mut state = self.store.inner().write().await;
            let actor = state.actor(actor_id)?.clone();
            let scope = state.scope_for(&actor);
            let mut tx = state.transaction(id)?.clone();
            SimpleApproval::reject(&mut tx, &actor, &scope, comment, Utc::now())?;
            state.transactions.insert(tx.id, tx.clone());
            tx
        };
        log_notify_failure(
            self.store.notifier().notify_status_update(&tx).await,
            "rejected",
        );
        Ok(tx)
    }

    /// Approves the pending step of a hierarchical transaction. The final
    /// (finance) approval debits the balance atomically, exactly like the
    /// simple protocol.
    pub async fn approve_step(
        &self,
        actor_id: UserId,
        id: TransactionId,
        comment: Option<String>,
    ) -> Result<Transaction, StoreError> {
        let tx = {
            let mut state = self.store.inner().write().await;
            let actor = state.actor(actor_id)?.clone();
            let mut tx = state.transaction(id)?.clone();
            let now = Utc::now();
            if let Some(amount) = HierarchicalApproval::approve(&mut tx, &actor, comment, now)? {
                state.balance.debit(amount, actor.id, now)?;
            }
            state.transactions.insert(tx.id, tx.clone());
            tx
        };
        log_notify_failure(
            self.store.notifier().notify_status_update(&tx).await,
            "step approved",
        );
        Ok(tx)
    }

    /// Rejects the pending step of a hierarchical transaction.
    pub async fn reject_step(
        &self,
        actor_id: UserId,
        id: TransactionId,
        reason: String,
    ) -> Result<Transaction, StoreError> {
        let tx = {
            let mut state = self.store.inner().write().await;
            let actor = state.actor(actor_id)?.clone();
            let mut tx = state.transaction(id)?.clone();
            HierarchicalApproval::reject(&mut tx, &actor, reason, Utc::now())?;
            state.transactions.insert(tx.id, tx.clone());
            tx
        };
        log_notify_failure(
            self.store.notifier().notify_status_update(&tx).await,
            "step rejected",
        );
        Ok(tx)
    }

    /// Asks the owner for more information.
    pub async fn request_info(
        &self,
        actor_id: UserId,
        id: TransactionId,
        message: String,
    ) -> Result<Transaction, StoreError> {
        let (tx, message) = {
            let mut state = self.store.inner().write().await;
            let actor = state.actor(actor_id)?.clone();
            let scope = state.scope_for(&actor);
            let mut tx = state.transaction(id)?.clone();
            Lifecycle::request_info(&mut tx, &actor, &scope, message.clone(), Utc::now())?;
            state.transactions.insert(tx.id, tx.clone());
            (tx, message)
        };
        log_notify_failure(
            self.store
                .notifier()
                .notify_info_requested(&tx, &message)
                .await,
            "info requested",
        );
        Ok(tx)
    }

    /// Marks an approved transaction as paid out and bumps the monthly
    /// per-category spent aggregate.
    pub async fn mark_as_paid(
        &self,
        actor_id: UserId,
        id: TransactionId,
        paid_date: Option<NaiveDate>,
    ) -> Result<Transaction, StoreError> {
        let tx = {
            let mut state = self.store.inner().write().await;
            let actor = state.actor(actor_id)?.clone();
            let mut tx = state.transaction(id)?.clone();
            let now = Utc::now();
            let paid_date = paid_date.unwrap_or_else(|| now.date_naive());
            Lifecycle::mark_as_paid(&mut tx, &actor, paid_date, now)?;

            let key = (tx.category, numbering::month_key(paid_date));
            *state.budget_spent.entry(key).or_insert(Decimal::ZERO) += tx.post_tax_amount;
            state.transactions.insert(tx.id, tx.clone());
            tx
        };
        log_notify_failure(
            self.store.notifier().notify_status_update(&tx).await,
            "paid",
        );
        Ok(tx)
    }

    /// Aggregates approved and paid spending per category within the
    /// actor's scope, optionally restricted to one `YYYYMM` month.
    pub async fn spent_by_category(
        &self,
        actor_id: UserId,
        month: Option<String>,
    ) -> Result<Vec<CategorySpend>, StoreError> {
        let state = self.store.inner().read().await;
        let actor = state.actor(actor_id)?;
        let scope = state.scope_for(actor);

        let mut totals: HashMap<CategoryId, (Decimal, u64)> = HashMap::new();
        for tx in state.transactions.values() {
            if !matches!(
                tx.status,
                TransactionStatus::Approved | TransactionStatus::Paid
            ) {
                continue;
            }
            if !scope.permits(Some(tx.submitted_by), Some(tx.requested_by)) {
                continue;
            }
            if let Some(month) = &month
                && numbering::month_key(tx.transaction_date) != *month
            {
                continue;
            }
            let entry = totals.entry(tx.category).or_insert((Decimal::ZERO, 0));
            entry.0 += tx.post_tax_amount;
            entry.1 += 1;
        }

        let mut report: Vec<CategorySpend> = totals
            .into_iter()
            .map(|(category, (total, count))| CategorySpend {
                category,
                total,
                count,
            })
            .collect();
        report.sort_by(|a, b| b.total.cmp(&a.total));
        Ok(report)
    }
}
