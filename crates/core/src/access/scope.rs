//! Visibility scope resolution.
//!
//! A scope is resolved once per request from the acting user's role and
//! (for team-scoped roles) a single direct-report lookup, then consumed
//! by both listing and reporting so the authorization rule exists in one
//! place.

use cashdesk_shared::types::UserId;

use crate::access::role::Role;
use crate::access::user::User;

/// The set of records an acting user may see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisibilityScope {
    /// Records the user submitted or requested themselves.
    Own(UserId),
    /// Own records plus records of direct reports (non-transitive).
    Team {
        /// The acting manager.
        manager: UserId,
        /// Users whose `manager_id` equals the acting manager's id.
        reports: Vec<UserId>,
    },
    /// All records, no filter.
    All,
}

impl VisibilityScope {
    /// Returns true if resolving a scope for this role requires a
    /// direct-report lookup. Exactly one lookup for team-scoped roles,
    /// zero otherwise.
    #[must_use]
    pub const fn needs_report_lookup(role: Role) -> bool {
        role.has_team_scope()
    }

    /// Resolves the scope for an acting user.
    ///
    /// `direct_reports` is consulted only for team-scoped roles; callers
    /// may pass an empty slice for every other role.
    #[must_use]
    pub fn resolve(actor: &User, direct_reports: &[UserId]) -> Self {
        if actor.role.has_global_scope() {
            Self::All
        } else if actor.role.has_team_scope() {
            Self::Team {
                manager: actor.id,
                reports: direct_reports.to_vec(),
            }
        } else {
            Self::Own(actor.id)
        }
    }

    /// Returns true if a record with the given owner fields falls inside
    /// this scope.
    ///
    /// Records with absent owners are excluded from non-global scopes,
    /// never included.
    #[must_use]
    pub fn permits(&self, submitted_by: Option<UserId>, requested_by: Option<UserId>) -> bool {
        match self {
            Self::All => true,
            Self::Own(user) => {
                submitted_by == Some(*user) || requested_by == Some(*user)
            }
            Self::Team { manager, reports } => {
                let in_team = |owner: Option<UserId>| match owner {
                    Some(owner) => owner == *manager || reports.contains(&owner),
                    None => false,
                };
                in_team(submitted_by) || in_team(requested_by)
            }
        }
    }

    /// Returns true if this scope carries no filter.
    #[must_use]
    pub const fn is_global(&self) -> bool {
        matches!(self, Self::All)
    }
}
