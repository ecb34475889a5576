//! User repository: account creation rules and lifecycle.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;

use cashdesk_core::access::{AccessError, Role, User};
use cashdesk_shared::types::UserId;

use crate::error::StoreError;
use crate::Store;

/// Input for creating a user account.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Email address (unique).
    pub email: String,
    /// Role for the new account. Legacy names ("custodian", "handler")
    /// normalize to employee at this boundary.
    pub role: String,
    /// Reporting manager. Ignored for manager-created accounts, which are
    /// always assigned to the creating manager.
    pub manager_id: Option<UserId>,
    /// Approval cap for approver accounts.
    pub approval_limit: Option<Decimal>,
}

/// Repository for user accounts.
#[derive(Clone)]
pub struct UserRepository {
    store: Store,
}

impl UserRepository {
    /// Creates a repository handle.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Creates an account.
    ///
    /// Admins may create any role. Managers may create only employee and
    /// intern accounts, which are auto-assigned to them as reports.
    /// Everyone else is refused.
    pub async fn create(&self, actor_id: UserId, input: NewUser) -> Result<User, StoreError> {
        let role = Role::from_stored(&input.role)
            .ok_or_else(|| StoreError::UnknownRole(input.role.clone()))?;

        let mut state = self.store.inner().write().await;
        let actor = state.actor(actor_id)?.clone();

        let manager_id = match actor.role {
            Role::Admin | Role::Ceo => input.manager_id,
            Role::Manager => {
                if !matches!(role, Role::Employee | Role::Intern) {
                    return Err(AccessError::ManagerCannotCreateRole { role }.into());
                }
                Some(actor.id)
            }
            _ => return Err(AccessError::NotAuthorized { user_id: actor.id }.into()),
        };

        if state.users.values().any(|u| u.email == input.email) {
            return Err(StoreError::DuplicateEmail(input.email));
        }

        let mut user = User::new(input.name, input.email, role, manager_id, Utc::now());
        user.approval_limit = input.approval_limit;
        user.validate()?;
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    /// Lists all accounts. Global-visibility roles only.
    pub async fn list(&self, actor_id: UserId) -> Result<Vec<User>, StoreError> {
        let state = self.store.inner().read().await;
        let actor = state.actor(actor_id)?;
        if !actor.role.has_global_scope() {
            return Err(AccessError::NotAuthorized { user_id: actor.id }.into());
        }
        let mut users: Vec<User> = state.users.values().cloned().collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    /// Fetches one account. Admins only.
    pub async fn get(&self, actor_id: UserId, id: UserId) -> Result<User, StoreError> {
        let state = self.store.inner().read().await;
        let actor = state.actor(actor_id)?;
        if !actor.role.has_global_scope() {
            return Err(AccessError::NotAuthorized { user_id: actor.id }.into());
        }
        state
            .users
            .get(&id)
            .cloned()
            .ok_or(StoreError::UserNotFound(id))
    }

    /// Soft-deletes an account so it can no longer act; its historical
    /// records remain attributed.
    pub async fn deactivate(&self, actor_id: UserId, id: UserId) -> Result<User, StoreError> {
        let mut state = self.store.inner().write().await;
        let actor = state.actor(actor_id)?.clone();
        if !actor.role.is_administrative() {
            return Err(AccessError::NotAuthorized { user_id: actor.id }.into());
        }
        let user = state
            .users
            .get_mut(&id)
            .ok_or(StoreError::UserNotFound(id))?;
        user.is_active = false;
        Ok(user.clone())
    }

    /// Hard-deletes an account. Kept for cleanup of mistaken creations;
    /// deactivation is the normal path.
    pub async fn delete(&self, actor_id: UserId, id: UserId) -> Result<(), StoreError> {
        let mut state = self.store.inner().write().await;
        let actor = state.actor(actor_id)?.clone();
        if !actor.role.is_administrative() {
            return Err(AccessError::NotAuthorized { user_id: actor.id }.into());
        }
        state
            .users
            .remove(&id)
            .ok_or(StoreError::UserNotFound(id))?;
        Ok(())
    }
}
