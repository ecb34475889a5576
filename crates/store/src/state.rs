//! The guarded application state.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use cashdesk_core::access::{User, VisibilityScope};
use cashdesk_core::ledger::Balance;
use cashdesk_core::numbering;
use cashdesk_core::transfer::FundTransfer;
use cashdesk_core::workflow::Transaction;
use cashdesk_shared::types::{CategoryId, FundTransferId, TransactionId, UserId};

use crate::error::StoreError;

/// Everything the application persists, behind one write guard.
///
/// Transactions and transfers use `BTreeMap` keyed by UUIDv7 ids, so
/// iteration order is creation order for free.
pub(crate) struct State {
    pub(crate) users: HashMap<UserId, User>,
    pub(crate) transactions: BTreeMap<TransactionId, Transaction>,
    pub(crate) transfers: BTreeMap<FundTransferId, FundTransfer>,
    pub(crate) balance: Balance,
    /// Per-month transaction sequence counters, keyed by `YYYYMM`.
    txn_counters: HashMap<String, u64>,
    /// Per-day transfer sequence counters, keyed by `YYYYMMDD`.
    transfer_counters: HashMap<String, u64>,
    /// Monthly per-category spent aggregate, bumped on payout.
    pub(crate) budget_spent: HashMap<(CategoryId, String), Decimal>,
}

impl State {
    pub(crate) fn new(opening_balance: Decimal, now: DateTime<Utc>) -> Self {
        Self {
            users: HashMap::new(),
            transactions: BTreeMap::new(),
            transfers: BTreeMap::new(),
            balance: Balance::new(opening_balance, now),
            txn_counters: HashMap::new(),
            transfer_counters: HashMap::new(),
            budget_spent: HashMap::new(),
        }
    }

    /// Looks up an acting user, refusing deactivated accounts.
    pub(crate) fn actor(&self, id: UserId) -> Result<&User, StoreError> {
        let user = self.users.get(&id).ok_or(StoreError::UserNotFound(id))?;
        if !user.is_active {
            return Err(cashdesk_core::access::AccessError::Inactive.into());
        }
        Ok(user)
    }

    /// Resolves the acting user's visibility scope, doing the one
    /// direct-report lookup for team-scoped roles.
    pub(crate) fn scope_for(&self, actor: &User) -> VisibilityScope {
        let reports = if VisibilityScope::needs_report_lookup(actor.role) {
            self.direct_reports(actor.id)
        } else {
            Vec::new()
        };
        VisibilityScope::resolve(actor, &reports)
    }

    pub(crate) fn direct_reports(&self, manager: UserId) -> Vec<UserId> {
        self.users
            .values()
            .filter(|u| u.manager_id == Some(manager))
            .map(|u| u.id)
            .collect()
    }

    pub(crate) fn transaction(&self, id: TransactionId) -> Result<&Transaction, StoreError> {
        self.transactions
            .get(&id)
            .ok_or(StoreError::TransactionNotFound(id))
    }

    /// Issues the next transaction number for the month. Counter bumps
    /// happen under the write guard, so numbers are unique and never
    /// reused even after a delete.
    pub(crate) fn next_transaction_number(&mut self, date: NaiveDate) -> String {
        let seq = self
            .txn_counters
            .entry(numbering::month_key(date))
            .and_modify(|n| *n += 1)
            .or_insert(1);
        numbering::transaction_number(date, *seq)
    }

    /// Issues the next fund-transfer reference for the day.
    pub(crate) fn next_transfer_reference(&mut self, date: NaiveDate) -> String {
        let seq = self
            .transfer_counters
            .entry(numbering::day_key(date))
            .and_modify(|n| *n += 1)
            .or_insert(1);
        numbering::transfer_reference(date, *seq)
    }
}
