//! Core business logic for Cashdesk.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and state transitions live here.
//!
//! # Modules
//!
//! - `access` - Role hierarchy and visibility scoping
//! - `workflow` - Expense transaction state machine (simple and hierarchical)
//! - `ledger` - The shared running cash balance
//! - `transfer` - Inbound fund transfers
//! - `numbering` - Human-readable reference numbering

pub mod access;
pub mod ledger;
pub mod numbering;
pub mod transfer;
pub mod workflow;
