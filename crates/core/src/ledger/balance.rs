//! The singleton balance record and its mutation rules.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use cashdesk_shared::types::UserId;

use crate::ledger::error::LedgerError;

/// The shared running balance for the petty-cash pool.
///
/// Exactly one record exists by convention. The identity
/// `current_balance == opening_balance + total_received - total_spent`
/// holds as long as every mutation goes through the operations below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balance {
    /// Running total currently available.
    pub current_balance: Decimal,
    /// Sum of all credits since creation.
    pub total_received: Decimal,
    /// Sum of all approved-expense debits since creation.
    pub total_spent: Decimal,
    /// Balance the record was seeded with.
    pub opening_balance: Decimal,
    /// When the balance was last mutated.
    pub last_updated: DateTime<Utc>,
    /// Who last mutated it.
    pub updated_by: Option<UserId>,
}

impl Balance {
    /// Creates a new balance record seeded with an opening balance.
    #[must_use]
    pub fn new(opening_balance: Decimal, now: DateTime<Utc>) -> Self {
        Self {
            current_balance: opening_balance,
            total_received: Decimal::ZERO,
            total_spent: Decimal::ZERO,
            opening_balance,
            last_updated: now,
            updated_by: None,
        }
    }

    /// Credits the balance (fund transfer received).
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NonPositiveAmount` if `amount <= 0`.
    pub fn credit(
        &mut self,
        amount: Decimal,
        actor: UserId,
        now: DateTime<Utc>,
    ) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount { amount });
        }
        self.current_balance += amount;
        self.total_received += amount;
        self.stamp(actor, now);
        Ok(())
    }

    /// Debits the balance (expense approved).
    ///
    /// Conditional update: the amount is checked against the current
    /// balance and applied in the same call, so under the store's write
    /// guard this is an atomic decrement-with-floor.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NonPositiveAmount` if `amount <= 0`, or
    /// `LedgerError::InsufficientBalance` if the balance cannot cover it.
    pub fn debit(
        &mut self,
        amount: Decimal,
        actor: UserId,
        now: DateTime<Utc>,
    ) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount { amount });
        }
        if self.current_balance < amount {
            return Err(LedgerError::InsufficientBalance {
                current: self.current_balance,
                required: amount,
            });
        }
        self.current_balance -= amount;
        self.total_spent += amount;
        self.stamp(actor, now);
        Ok(())
    }

    /// Reverses a prior credit (fund transfer deleted).
    ///
    /// Deliberately skips the sufficiency check: removing a transfer that
    /// has already been spent against can drive the balance negative.
    /// Both `current_balance` and `total_received` are decremented so the
    /// balance identity holds instead of drifting.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NonPositiveAmount` if `amount <= 0`.
    pub fn reverse_credit(
        &mut self,
        amount: Decimal,
        actor: UserId,
        now: DateTime<Utc>,
    ) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount { amount });
        }
        self.current_balance -= amount;
        self.total_received -= amount;
        self.stamp(actor, now);
        Ok(())
    }

    /// Returns true if the balance identity holds.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.current_balance == self.opening_balance + self.total_received - self.total_spent
    }

    fn stamp(&mut self, actor: UserId, now: DateTime<Utc>) {
        self.last_updated = now;
        self.updated_by = Some(actor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn actor() -> UserId {
        UserId::new()
    }

    #[test]
    fn test_credit_increases_balance_and_received() {
        let mut balance = Balance::new(Decimal::ZERO, Utc::now());
        balance.credit(dec!(5000), actor(), Utc::now()).unwrap();
        assert_eq!(balance.current_balance, dec!(5000));
        assert_eq!(balance.total_received, dec!(5000));
        assert_eq!(balance.total_spent, Decimal::ZERO);
        assert!(balance.is_consistent());
    }

    #[test]
    fn test_credit_rejects_non_positive_amounts() {
        let mut balance = Balance::new(Decimal::ZERO, Utc::now());
        assert!(matches!(
            balance.credit(Decimal::ZERO, actor(), Utc::now()),
            Err(LedgerError::NonPositiveAmount { .. })
        ));
        assert!(matches!(
            balance.credit(dec!(-1), actor(), Utc::now()),
            Err(LedgerError::NonPositiveAmount { .. })
        ));
        assert_eq!(balance.current_balance, Decimal::ZERO);
    }

    #[test]
    fn test_debit_decreases_balance_and_increases_spent() {
        let mut balance = Balance::new(Decimal::ZERO, Utc::now());
        balance.credit(dec!(5000), actor(), Utc::now()).unwrap();
        balance.debit(dec!(2000), actor(), Utc::now()).unwrap();
        assert_eq!(balance.current_balance, dec!(3000));
        assert_eq!(balance.total_spent, dec!(2000));
        assert!(balance.is_consistent());
    }

    #[test]
    fn test_debit_fails_when_insufficient_and_leaves_balance_unchanged() {
        let mut balance = Balance::new(Decimal::ZERO, Utc::now());
        balance.credit(dec!(100), actor(), Utc::now()).unwrap();

        let err = balance.debit(dec!(500), actor(), Utc::now()).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InsufficientBalance {
                current,
                required
            } if current == dec!(100) && required == dec!(500)
        ));
        assert_eq!(balance.current_balance, dec!(100));
        assert_eq!(balance.total_spent, Decimal::ZERO);
    }

    #[test]
    fn test_debit_exact_balance_is_allowed() {
        let mut balance = Balance::new(Decimal::ZERO, Utc::now());
        balance.credit(dec!(100), actor(), Utc::now()).unwrap();
        balance.debit(dec!(100), actor(), Utc::now()).unwrap();
        assert_eq!(balance.current_balance, Decimal::ZERO);
    }

    #[test]
    fn test_reverse_credit_can_go_negative_but_stays_consistent() {
        let mut balance = Balance::new(Decimal::ZERO, Utc::now());
        balance.credit(dec!(1000), actor(), Utc::now()).unwrap();
        balance.debit(dec!(800), actor(), Utc::now()).unwrap();
        balance.reverse_credit(dec!(1000), actor(), Utc::now()).unwrap();

        assert_eq!(balance.current_balance, dec!(-800));
        assert_eq!(balance.total_received, Decimal::ZERO);
        assert!(balance.is_consistent());
    }

    #[test]
    fn test_opening_balance_seed() {
        let balance = Balance::new(dec!(250), Utc::now());
        assert_eq!(balance.current_balance, dec!(250));
        assert!(balance.is_consistent());
    }

    #[test]
    fn test_mutations_stamp_actor() {
        let mut balance = Balance::new(Decimal::ZERO, Utc::now());
        let user = actor();
        balance.credit(dec!(10), user, Utc::now()).unwrap();
        assert_eq!(balance.updated_by, Some(user));
    }

    // ========================================================================
    // Property: balance identity holds across arbitrary operation sequences
    // ========================================================================

    #[derive(Debug, Clone)]
    enum Op {
        Credit(Decimal),
        Debit(Decimal),
        Reverse(Decimal),
    }

    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            amount_strategy().prop_map(Op::Credit),
            amount_strategy().prop_map(Op::Debit),
            amount_strategy().prop_map(Op::Reverse),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// For any sequence of credits, debits, and reversals, accepted
        /// mutations preserve `current = opening + received - spent` and a
        /// rejected debit changes nothing.
        #[test]
        fn prop_identity_holds_across_operations(
            opening in (0i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2)),
            ops in prop::collection::vec(op_strategy(), 1..40),
        ) {
            let user = UserId::new();
            let mut balance = Balance::new(opening, Utc::now());

            for op in ops {
                let before = balance.clone();
                let result = match op {
                    Op::Credit(amount) => balance.credit(amount, user, Utc::now()),
                    Op::Debit(amount) => balance.debit(amount, user, Utc::now()),
                    Op::Reverse(amount) => balance.reverse_credit(amount, user, Utc::now()),
                };

                if result.is_err() {
                    prop_assert_eq!(balance.current_balance, before.current_balance);
                    prop_assert_eq!(balance.total_received, before.total_received);
                    prop_assert_eq!(balance.total_spent, before.total_spent);
                }
                prop_assert!(balance.is_consistent());
            }
        }

        /// A debit never succeeds beyond the available balance.
        #[test]
        fn prop_debit_never_overdraws(
            opening in (0i64..100_000i64).prop_map(|n| Decimal::new(n, 2)),
            debits in prop::collection::vec(amount_strategy(), 1..20),
        ) {
            let user = UserId::new();
            let mut balance = Balance::new(opening, Utc::now());
            for amount in debits {
                let _ = balance.debit(amount, user, Utc::now());
                prop_assert!(balance.current_balance >= Decimal::ZERO);
            }
        }
    }
}
