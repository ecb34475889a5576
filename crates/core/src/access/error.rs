//! Access control error types.

use thiserror::Error;

use cashdesk_shared::types::UserId;

use crate::access::role::Role;

/// Errors that can occur during access-control checks.
#[derive(Debug, Error)]
pub enum AccessError {
    /// Actor's role or scope does not permit the requested action.
    #[error("User {user_id} is not authorized to perform this action")]
    NotAuthorized {
        /// The acting user.
        user_id: UserId,
    },

    /// Managers may only create employee or intern accounts.
    #[error("Managers may only create employee or intern accounts, not {role}")]
    ManagerCannotCreateRole {
        /// The role that was requested.
        role: Role,
    },

    /// A user may not be their own manager.
    #[error("A user cannot be their own manager")]
    SelfManaged,

    /// The acting user account is deactivated.
    #[error("User account is deactivated")]
    Inactive,
}

impl AccessError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotAuthorized { .. } | Self::ManagerCannotCreateRole { .. } | Self::Inactive => {
                403
            }
            Self::SelfManaged => 400,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotAuthorized { .. } => "NOT_AUTHORIZED",
            Self::ManagerCannotCreateRole { .. } => "MANAGER_CANNOT_CREATE_ROLE",
            Self::SelfManaged => "SELF_MANAGED",
            Self::Inactive => "USER_INACTIVE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let err = AccessError::NotAuthorized {
            user_id: UserId::new(),
        };
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "NOT_AUTHORIZED");

        assert_eq!(AccessError::SelfManaged.status_code(), 400);
        assert_eq!(AccessError::Inactive.status_code(), 403);
    }

    #[test]
    fn test_manager_create_role_message() {
        let err = AccessError::ManagerCannotCreateRole { role: Role::Admin };
        assert!(err.to_string().contains("admin"));
        assert_eq!(err.status_code(), 403);
    }
}
