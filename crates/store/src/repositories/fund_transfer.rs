//! Fund transfer repository: recording inbound money and its reversals.

use chrono::Utc;
use rust_decimal::Decimal;

use cashdesk_core::access::{AccessError, Role};
use cashdesk_core::transfer::{FundTransfer, NewFundTransfer, TransferStatus};
use cashdesk_shared::types::{FundTransferId, UserId};

use crate::error::StoreError;
use crate::Store;

/// Currency recorded when the input does not name one.
const POOL_CURRENCY: &str = "USD";

/// Repository for inbound fund transfers.
#[derive(Clone)]
pub struct FundTransferRepository {
    store: Store,
}

impl FundTransferRepository {
    /// Creates a repository handle.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Records a fund transfer and credits the balance in the same
    /// guarded section. Admins, the ceo, and managers may add funds.
    ///
    /// `preserve_timestamp` backdates the record (and its reference's day
    /// bucket) for data-migration scenarios such as converting a rejected
    /// expense back into the pool.
    pub async fn add_funds(
        &self,
        actor_id: UserId,
        input: NewFundTransfer,
    ) -> Result<FundTransfer, StoreError> {
        let mut state = self.store.inner().write().await;
        let actor = state.actor(actor_id)?.clone();
        if !matches!(actor.role, Role::Admin | Role::Ceo | Role::Manager) {
            return Err(AccessError::NotAuthorized { user_id: actor.id }.into());
        }

        let bank = input.validate()?;
        let now = Utc::now();
        let created_at = input.preserve_timestamp.unwrap_or(now);
        let reference = state.next_transfer_reference(created_at.date_naive());

        let transfer = FundTransfer {
            id: FundTransferId::new(),
            reference,
            transfer_type: input.transfer_type,
            amount: input.amount,
            currency: input.currency.unwrap_or_else(|| POOL_CURRENCY.to_string()),
            exchange_rate: input.exchange_rate.unwrap_or(Decimal::ONE),
            bank,
            initiated_by: actor.id,
            recipient_id: input.recipient_id,
            status: TransferStatus::default(),
            created_at,
        };

        state.balance.credit(transfer.amount, actor.id, now)?;
        state.transfers.insert(transfer.id, transfer.clone());
        tracing::info!(
            reference = %transfer.reference,
            amount = %transfer.amount,
            "fund transfer recorded"
        );
        Ok(transfer)
    }

    /// Lists recorded transfers, oldest first. Global- and team-scoped
    /// roles only; regular submitters have no business with the pool's
    /// funding history.
    pub async fn list(&self, actor_id: UserId) -> Result<Vec<FundTransfer>, StoreError> {
        let state = self.store.inner().read().await;
        let actor = state.actor(actor_id)?;
        if !actor.role.has_global_scope() && !actor.role.has_team_scope() {
            return Err(AccessError::NotAuthorized { user_id: actor.id }.into());
        }
        Ok(state.transfers.values().cloned().collect())
    }

    /// Deletes a transfer record and reverses its credit. The balance may
    /// go negative if the money was already spent against; the identity
    /// still holds.
    pub async fn delete(&self, actor_id: UserId, id: FundTransferId) -> Result<(), StoreError> {
        let mut state = self.store.inner().write().await;
        let actor = state.actor(actor_id)?.clone();
        if !actor.role.is_administrative() {
            return Err(AccessError::NotAuthorized { user_id: actor.id }.into());
        }
        let amount = state
            .transfers
            .get(&id)
            .ok_or(StoreError::TransferNotFound(id))?
            .amount;
        state.balance.reverse_credit(amount, actor.id, Utc::now())?;
        state.transfers.remove(&id);
        tracing::info!(transfer_id = %id, %amount, "fund transfer deleted and credit reversed");
        Ok(())
    }

    /// Deletes every transfer record WITHOUT touching the balance.
    ///
    /// This is a bookkeeping purge, not a reversal: anyone who wants the
    /// money reversed must delete transfers one by one first. Returns the
    /// number of records removed.
    pub async fn clear_history(&self, actor_id: UserId) -> Result<usize, StoreError> {
        let mut state = self.store.inner().write().await;
        let actor = state.actor(actor_id)?.clone();
        if !matches!(actor.role, Role::Admin | Role::Ceo | Role::Manager) {
            return Err(AccessError::NotAuthorized { user_id: actor.id }.into());
        }
        let removed = state.transfers.len();
        state.transfers.clear();
        tracing::warn!(removed, "fund transfer history cleared; balance left untouched");
        Ok(removed)
    }
}
