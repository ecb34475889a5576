//! User roles and legacy role normalization.

use serde::{Deserialize, Serialize};
use std::fmt;

/// User role in the organization.
///
/// Roles determine authorization scope, not the reporting line:
/// an `Admin` has global scope regardless of their `manager_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access to all records and administrative actions.
    Admin,
    /// Executive account with global visibility.
    Ceo,
    /// Sees own records plus direct reports' records; can approve them.
    Manager,
    /// Regular submitter; sees own records only.
    Employee,
    /// Like employee, typically short-term.
    Intern,
    /// Legacy approver role; manager scope with an optional approval cap.
    Approver,
    /// Read-only global visibility for audit purposes.
    Auditor,
}

impl Role {
    /// Parses a role from its canonical string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "ceo" => Some(Self::Ceo),
            "manager" => Some(Self::Manager),
            "employee" => Some(Self::Employee),
            "intern" => Some(Self::Intern),
            "approver" => Some(Self::Approver),
            "auditor" => Some(Self::Auditor),
            _ => None,
        }
    }

    /// Normalizes a stored role string into a domain role.
    ///
    /// Deprecated role names from older data ("custodian", "handler") map
    /// to `Employee`. This is the single normalization point between
    /// storage and the domain model.
    pub fn from_stored(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "custodian" | "handler" => Some(Self::Employee),
            other => Self::parse(other),
        }
    }

    /// Returns the canonical string representation of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Ceo => "ceo",
            Self::Manager => "manager",
            Self::Employee => "employee",
            Self::Intern => "intern",
            Self::Approver => "approver",
            Self::Auditor => "auditor",
        }
    }

    /// Returns true if the role sees all records with no filter.
    #[must_use]
    pub const fn has_global_scope(self) -> bool {
        matches!(self, Self::Admin | Self::Ceo | Self::Auditor)
    }

    /// Returns true if the role sees its direct reports' records.
    #[must_use]
    pub const fn has_team_scope(self) -> bool {
        matches!(self, Self::Manager | Self::Approver)
    }

    /// Returns true if the role may perform administrative actions
    /// (approve anything, mark paid, manage users).
    #[must_use]
    pub const fn is_administrative(self) -> bool {
        matches!(self, Self::Admin | Self::Ceo)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("admin", Some(Role::Admin))]
    #[case("CEO", Some(Role::Ceo))]
    #[case("Manager", Some(Role::Manager))]
    #[case("employee", Some(Role::Employee))]
    #[case("intern", Some(Role::Intern))]
    #[case("approver", Some(Role::Approver))]
    #[case("auditor", Some(Role::Auditor))]
    #[case("invalid", None)]
    fn test_parse_canonical_roles(#[case] input: &str, #[case] expected: Option<Role>) {
        assert_eq!(Role::parse(input), expected);
    }

    #[test]
    fn test_parse_rejects_legacy_names() {
        assert_eq!(Role::parse("custodian"), None);
        assert_eq!(Role::parse("handler"), None);
    }

    #[test]
    fn test_legacy_roles_normalize_to_employee() {
        assert_eq!(Role::from_stored("custodian"), Some(Role::Employee));
        assert_eq!(Role::from_stored("handler"), Some(Role::Employee));
        assert_eq!(Role::from_stored("HANDLER"), Some(Role::Employee));
    }

    #[test]
    fn test_from_stored_passes_canonical_roles_through() {
        assert_eq!(Role::from_stored("manager"), Some(Role::Manager));
        assert_eq!(Role::from_stored("admin"), Some(Role::Admin));
        assert_eq!(Role::from_stored("unknown"), None);
    }

    #[test]
    fn test_scope_classification() {
        assert!(Role::Admin.has_global_scope());
        assert!(Role::Ceo.has_global_scope());
        assert!(Role::Auditor.has_global_scope());
        assert!(!Role::Manager.has_global_scope());

        assert!(Role::Manager.has_team_scope());
        assert!(Role::Approver.has_team_scope());
        assert!(!Role::Employee.has_team_scope());
        assert!(!Role::Admin.has_team_scope());
    }

    #[test]
    fn test_administrative_roles() {
        assert!(Role::Admin.is_administrative());
        assert!(Role::Ceo.is_administrative());
        assert!(!Role::Auditor.is_administrative());
        assert!(!Role::Manager.is_administrative());
    }

    #[test]
    fn test_display() {
        assert_eq!(Role::Approver.to_string(), "approver");
        assert_eq!(Role::Intern.to_string(), "intern");
    }
}
