//! Notification seam.
//!
//! Delivery (email, chat, whatever) is a collaborator behind a trait.
//! Notifications are fire-and-forget: repository operations log failures
//! with `tracing::warn!` and never propagate them, so a broken mail
//! server cannot block an approval.

use async_trait::async_trait;
use thiserror::Error;

use cashdesk_core::workflow::Transaction;

/// A notification delivery failure.
#[derive(Debug, Error)]
#[error("Notification delivery failed: {0}")]
pub struct NotifyError(pub String);

/// Delivers workflow notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// A transaction was submitted for approval.
    async fn notify_submitted(&self, tx: &Transaction) -> Result<(), NotifyError>;

    /// A transaction changed status (approved, rejected, paid).
    async fn notify_status_update(&self, tx: &Transaction) -> Result<(), NotifyError>;

    /// An approver asked the owner for more information.
    async fn notify_info_requested(&self, tx: &Transaction, message: &str)
    -> Result<(), NotifyError>;
}

/// Default notifier: logs the event via `tracing` instead of delivering.
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify_submitted(&self, tx: &Transaction) -> Result<(), NotifyError> {
        tracing::info!(number = %tx.number, requested_by = %tx.requested_by, "transaction submitted");
        Ok(())
    }

    async fn notify_status_update(&self, tx: &Transaction) -> Result<(), NotifyError> {
        tracing::info!(number = %tx.number, status = %tx.status, "transaction status updated");
        Ok(())
    }

    async fn notify_info_requested(
        &self,
        tx: &Transaction,
        message: &str,
    ) -> Result<(), NotifyError> {
        tracing::info!(number = %tx.number, message, "information requested");
        Ok(())
    }
}

/// Logs a delivery failure without propagating it.
pub(crate) fn log_notify_failure(result: Result<(), NotifyError>, event: &str) {
    if let Err(err) = result {
        tracing::warn!(event, error = %err, "notification delivery failed");
    }
}
