//! Balance repository: read access to the shared pool balance.

use cashdesk_core::ledger::Balance;
use cashdesk_shared::types::UserId;

use crate::error::StoreError;
use crate::Store;

/// Repository for the singleton balance record.
#[derive(Clone)]
pub struct BalanceRepository {
    store: Store,
}

impl BalanceRepository {
    /// Creates a repository handle.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Returns the current balance. Any active account may view it; all
    /// mutations go through approvals and fund transfers.
    pub async fn get(&self, actor_id: UserId) -> Result<Balance, StoreError> {
        let state = self.store.inner().read().await;
        state.actor(actor_id)?;
        Ok(state.balance.clone())
    }
}
