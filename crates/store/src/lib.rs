//! In-memory persistence for Cashdesk.
//!
//! All state lives behind a single `tokio::sync::RwLock`. Every mutation
//! (status transition, balance change, counter bump) runs inside one
//! write-guard section, which is what makes check-then-act sequences like
//! approve-and-debit atomic: either the whole section applies or none of
//! it does.
//!
//! Repositories are thin handles over the shared [`Store`]; they fetch,
//! validate through the core services, then write back.

mod error;
mod notifier;
pub mod repositories;
mod state;

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use cashdesk_core::access::{Role, User};

pub use error::StoreError;
pub use notifier::{Notifier, NotifyError, TracingNotifier};

pub(crate) use state::State;

/// Shared handle to the application state.
///
/// Cloning is cheap; all clones see the same state.
#[derive(Clone)]
pub struct Store {
    inner: Arc<RwLock<State>>,
    notifier: Arc<dyn Notifier>,
}

impl Store {
    /// Creates an empty store seeded with an opening balance.
    #[must_use]
    pub fn new(opening_balance: Decimal) -> Self {
        Self::with_notifier(opening_balance, Arc::new(TracingNotifier))
    }

    /// Creates a store with a custom notifier implementation.
    #[must_use]
    pub fn with_notifier(opening_balance: Decimal, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(State::new(opening_balance, Utc::now()))),
            notifier,
        }
    }

    /// Creates the initial admin account if no user with the given email
    /// exists yet. Returns the admin either way.
    pub async fn bootstrap_admin(&self, name: &str, email: &str) -> User {
        let mut state = self.inner.write().await;
        if let Some(existing) = state.users.values().find(|u| u.email == email) {
            return existing.clone();
        }
        let admin = User::new(
            name.to_string(),
            email.to_string(),
            Role::Admin,
            None,
            Utc::now(),
        );
        state.users.insert(admin.id, admin.clone());
        tracing::info!(user_id = %admin.id, email, "bootstrapped admin account");
        admin
    }

    pub(crate) fn inner(&self) -> &RwLock<State> {
        &self.inner
    }

    pub(crate) fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }
}
