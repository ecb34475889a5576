//! The user domain entity.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use cashdesk_shared::types::UserId;

use crate::access::error::AccessError;
use crate::access::role::Role;

/// A user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address (unique).
    pub email: String,
    /// Role determining authorization scope.
    pub role: Role,
    /// Reporting manager, if any. Never points to the user itself.
    pub manager_id: Option<UserId>,
    /// Soft-delete flag; deactivated users cannot act.
    pub is_active: bool,
    /// Approval cap for the legacy approver role.
    pub approval_limit: Option<Decimal>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new active user.
    #[must_use]
    pub fn new(
        name: String,
        email: String,
        role: Role,
        manager_id: Option<UserId>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: UserId::new(),
            name,
            email,
            role,
            manager_id,
            is_active: true,
            approval_limit: None,
            created_at: now,
        }
    }

    /// Validates structural invariants.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::SelfManaged` if the user is their own manager.
    pub fn validate(&self) -> Result<(), AccessError> {
        if self.manager_id == Some(self.id) {
            return Err(AccessError::SelfManaged);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(role: Role) -> User {
        User::new(
            "Asha".to_string(),
            "asha@example.com".to_string(),
            role,
            None,
            Utc::now(),
        )
    }

    #[test]
    fn test_new_user_is_active() {
        let user = sample_user(Role::Employee);
        assert!(user.is_active);
        assert!(user.approval_limit.is_none());
    }

    #[test]
    fn test_self_managed_user_is_invalid() {
        let mut user = sample_user(Role::Employee);
        user.manager_id = Some(user.id);
        assert!(matches!(user.validate(), Err(AccessError::SelfManaged)));
    }

    #[test]
    fn test_managed_user_is_valid() {
        let mut user = sample_user(Role::Employee);
        user.manager_id = Some(UserId::new());
        assert!(user.validate().is_ok());
    }
}
