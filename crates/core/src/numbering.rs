//! Human-readable reference numbering.
//!
//! Formats are pure functions here; the per-period sequence counters live
//! in the store and are incremented under its write guard, so references
//! are unique and gap-free within a period.

use chrono::{Datelike, NaiveDate};

/// Month bucket key for transaction sequence counters (`YYYYMM`).
#[must_use]
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}{:02}", date.year(), date.month())
}

/// Day bucket key for fund-transfer sequence counters (`YYYYMMDD`).
#[must_use]
pub fn day_key(date: NaiveDate) -> String {
    format!("{:04}{:02}{:02}", date.year(), date.month(), date.day())
}

/// Formats a transaction number: `TXN-YYYYMM-NNNN`.
#[must_use]
pub fn transaction_number(date: NaiveDate, seq: u64) -> String {
    format!("TXN-{}-{seq:04}", month_key(date))
}

/// Formats a fund-transfer reference: `FT-YYYYMMDD-NNN`.
#[must_use]
pub fn transfer_reference(date: NaiveDate, seq: u64) -> String {
    format!("FT-{}-{seq:03}", day_key(date))
}
