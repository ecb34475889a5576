//! Expense transaction state machine.
//!
//! Two approval protocols coexist behind the `WorkflowKind` tag on each
//! transaction:
//!
//! - **Simple**: one step, `Pending` → `Approved`/`Rejected` by an admin
//!   or an authorized manager; approval debits the balance.
//! - **Hierarchical**: the legacy multi-level path,
//!   `Draft` → `PendingManager` → `PendingFinance` → `Approved`, with an
//!   ordered approval-step history.
//!
//! Both are stateless services in the manner of the transition engine
//! they share guards with: validate the current status, then mutate.

mod error;
mod hierarchical;
mod lifecycle;
mod simple;
mod transaction;
mod types;

pub use error::WorkflowError;
pub use hierarchical::HierarchicalApproval;
pub use lifecycle::Lifecycle;
pub use simple::SimpleApproval;
pub use transaction::{NewTransaction, Transaction};
pub use types::{
    ApprovalStep, NoteEntry, NoteKind, StepRole, StepStatus, TransactionStatus, WorkflowKind,
};
