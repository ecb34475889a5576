//! Ledger error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during balance mutations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Credit and debit amounts must be strictly positive.
    #[error("Amount must be positive, got {amount}")]
    NonPositiveAmount {
        /// The offending amount.
        amount: Decimal,
    },

    /// Debit requested exceeds the current balance.
    #[error("Insufficient balance: current balance is {current}, required {required}")]
    InsufficientBalance {
        /// Balance at the time of the attempt.
        current: Decimal,
        /// Amount the debit required.
        required: Decimal,
    },
}

impl LedgerError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NonPositiveAmount { .. } => 400,
            Self::InsufficientBalance { .. } => 422,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount { .. } => "NON_POSITIVE_AMOUNT",
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_insufficient_balance_message_names_both_amounts() {
        let err = LedgerError::InsufficientBalance {
            current: dec!(100),
            required: dec!(500),
        };
        let msg = err.to_string();
        assert!(msg.contains("100"));
        assert!(msg.contains("500"));
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.error_code(), "INSUFFICIENT_BALANCE");
    }

    #[test]
    fn test_non_positive_amount() {
        let err = LedgerError::NonPositiveAmount { amount: dec!(-5) };
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "NON_POSITIVE_AMOUNT");
    }
}
