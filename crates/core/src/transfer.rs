//! Inbound fund transfers.
//!
//! A fund transfer records money entering the petty-cash pool (bank or
//! cash) and credits the balance when recorded. Currency and exchange
//! rate are informational only; they never feed balance arithmetic.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use cashdesk_shared::types::{ClientId, FundTransferId, UserId};

/// How the funds arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferType {
    /// Bank transfer; bank details are required.
    Bank,
    /// Cash handed over directly.
    Cash,
}

/// Administrative status of a transfer record.
///
/// Not state-machine driven; defaults to `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    /// Awaiting confirmation.
    Pending,
    /// Funds received (default).
    #[default]
    Completed,
    /// Transfer cancelled.
    Cancelled,
}

/// Bank details, required when the transfer type is `Bank`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankDetails {
    /// Name of the sending bank.
    pub bank_name: String,
    /// Account number the funds came from.
    pub account_number: String,
    /// Bank-side transaction reference.
    pub transaction_ref: String,
}

/// A recorded inbound fund transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundTransfer {
    /// Unique identifier.
    pub id: FundTransferId,
    /// Human-readable reference (`FT-YYYYMMDD-NNN`), assigned once.
    pub reference: String,
    /// Bank or cash.
    pub transfer_type: TransferType,
    /// Amount credited to the balance. Always positive.
    pub amount: Decimal,
    /// Informational currency code.
    pub currency: String,
    /// Informational exchange rate; not applied to balance arithmetic.
    pub exchange_rate: Decimal,
    /// Bank details, present iff `transfer_type` is `Bank`.
    pub bank: Option<BankDetails>,
    /// Who recorded the transfer.
    pub initiated_by: UserId,
    /// Optional payee/client the funds relate to.
    pub recipient_id: Option<ClientId>,
    /// Administrative status.
    pub status: TransferStatus,
    /// Creation timestamp. May be backdated via `preserve_timestamp`
    /// when migrating a converted rejected expense.
    pub created_at: DateTime<Utc>,
}

/// Input for recording a fund transfer.
#[derive(Debug, Clone, Deserialize)]
pub struct NewFundTransfer {
    /// Bank or cash.
    pub transfer_type: TransferType,
    /// Amount to credit. Must be positive.
    pub amount: Decimal,
    /// Informational currency code; defaults to the pool currency.
    pub currency: Option<String>,
    /// Informational exchange rate; defaults to 1.
    pub exchange_rate: Option<Decimal>,
    /// Sending bank name (required for bank transfers).
    pub bank_name: Option<String>,
    /// Account number (required for bank transfers).
    pub account_number: Option<String>,
    /// Bank transaction reference (required for bank transfers).
    pub transaction_ref: Option<String>,
    /// Optional payee/client reference.
    pub recipient_id: Option<ClientId>,
    /// Backdating override for data-migration scenarios.
    pub preserve_timestamp: Option<DateTime<Utc>>,
}

impl NewFundTransfer {
    /// Validates the input and extracts bank details when required.
    ///
    /// # Errors
    ///
    /// Returns `TransferError::NonPositiveAmount` if `amount <= 0`, or
    /// `TransferError::MissingBankField` when a bank transfer lacks any
    /// of its required fields.
    pub fn validate(&self) -> Result<Option<BankDetails>, TransferError> {
        if self.amount <= Decimal::ZERO {
            return Err(TransferError::NonPositiveAmount {
                amount: self.amount,
            });
        }
        match self.transfer_type {
            TransferType::Cash => Ok(None),
            TransferType::Bank => {
                let bank_name = required_field(self.bank_name.as_deref(), "bank_name")?;
                let account_number =
                    required_field(self.account_number.as_deref(), "account_number")?;
                let transaction_ref =
                    required_field(self.transaction_ref.as_deref(), "transaction_ref")?;
                Ok(Some(BankDetails {
                    bank_name,
                    account_number,
                    transaction_ref,
                }))
            }
        }
    }
}

fn required_field(value: Option<&str>, field: &'static str) -> Result<String, TransferError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        _ => Err(TransferError::MissingBankField { field }),
    }
}

/// Errors that can occur when recording a fund transfer.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Transfer amounts must be strictly positive.
    #[error("Transfer amount must be positive, got {amount}")]
    NonPositiveAmount {
        /// The offending amount.
        amount: Decimal,
    },

    /// A bank transfer is missing a required bank field.
    #[error("Bank transfers require {field}")]
    MissingBankField {
        /// Which field is missing.
        field: &'static str,
    },
}

impl TransferError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        400
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount { .. } => "NON_POSITIVE_AMOUNT",
            Self::MissingBankField { .. } => "MISSING_BANK_FIELD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn cash_input(amount: Decimal) -> NewFundTransfer {
        NewFundTransfer {
            transfer_type: TransferType::Cash,
            amount,
            currency: None,
            exchange_rate: None,
            bank_name: None,
            account_number: None,
            transaction_ref: None,
            recipient_id: None,
            preserve_timestamp: None,
        }
    }

    #[test]
    fn test_cash_transfer_needs_no_bank_details() {
        let input = cash_input(dec!(1000));
        assert!(input.validate().unwrap().is_none());
    }

    #[test]
    fn test_amount_must_be_positive() {
        assert!(matches!(
            cash_input(Decimal::ZERO).validate(),
            Err(TransferError::NonPositiveAmount { .. })
        ));
        assert!(matches!(
            cash_input(dec!(-10)).validate(),
            Err(TransferError::NonPositiveAmount { .. })
        ));
    }

    #[test]
    fn test_bank_transfer_requires_all_bank_fields() {
        let mut input = cash_input(dec!(1000));
        input.transfer_type = TransferType::Bank;
        input.bank_name = Some("First National".to_string());
        input.account_number = Some("12345678".to_string());

        let err = input.validate().unwrap_err();
        assert!(matches!(
            err,
            TransferError::MissingBankField {
                field: "transaction_ref"
            }
        ));

        input.transaction_ref = Some("REF-991".to_string());
        let bank = input.validate().unwrap().unwrap();
        assert_eq!(bank.bank_name, "First National");
    }

    #[test]
    fn test_blank_bank_fields_are_rejected() {
        let mut input = cash_input(dec!(1000));
        input.transfer_type = TransferType::Bank;
        input.bank_name = Some("  ".to_string());
        input.account_number = Some("12345678".to_string());
        input.transaction_ref = Some("REF-991".to_string());

        assert!(matches!(
            input.validate(),
            Err(TransferError::MissingBankField { field: "bank_name" })
        ));
    }

    #[test]
    fn test_default_status_is_completed() {
        assert_eq!(TransferStatus::default(), TransferStatus::Completed);
    }
}
