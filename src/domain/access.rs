//! Role-based access policy.
//!
//! A single state-free decision function maps (acting user, action) to
//! allow/deny. Handlers never inspect access levels directly; they go
//! through [`permit`] so the whole policy lives in one table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Access level assigned to every user account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    Administrator,
    Collaborator,
    Viewer,
}

impl AccessLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Administrator => "administrator",
            Self::Collaborator => "collaborator",
            Self::Viewer => "viewer",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "administrator" => Some(Self::Administrator),
            "collaborator" => Some(Self::Collaborator),
            "viewer" => Some(Self::Viewer),
            _ => None,
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a caller can ask the backend to do, at policy granularity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Read any entity or report.
    Read,
    /// Create or update a secretariat, project, bill, material or resource.
    Write,
    /// Soft-delete (deactivate) a secretariat.
    DeactivateSecretariat,
    /// Hard-delete a project.
    DeleteProject,
    /// Register a new user or list existing users.
    ManageUsers,
}

/// The acting user as seen by the policy: resolved id, level, active flag.
#[derive(Clone, Copy, Debug)]
pub struct Actor {
    pub id: i32,
    pub level: AccessLevel,
    pub active: bool,
}

/// Decide whether `actor` may perform `action`.
///
/// Inactive accounts are denied everything except plain reads.
#[must_use]
pub fn permit(actor: &Actor, action: Action) -> bool {
    if action != Action::Read && !actor.active {
        return false;
    }

    match action {
        Action::Read => true,
        Action::Write => actor.level != AccessLevel::Viewer,
        Action::DeactivateSecretariat | Action::DeleteProject | Action::ManageUsers => {
            actor.level == AccessLevel::Administrator
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(level: AccessLevel) -> Actor {
        Actor {
            id: 1,
            level,
            active: true,
        }
    }

    #[test]
    fn test_everyone_reads() {
        for level in [
            AccessLevel::Administrator,
            AccessLevel::Collaborator,
            AccessLevel::Viewer,
        ] {
            assert!(permit(&actor(level), Action::Read));
        }
    }

    #[test]
    fn test_viewer_denied_all_mutations() {
        let viewer = actor(AccessLevel::Viewer);
        for action in [
            Action::Write,
            Action::DeactivateSecretariat,
            Action::DeleteProject,
            Action::ManageUsers,
        ] {
            assert!(!permit(&viewer, action));
        }
    }

    #[test]
    fn test_collaborator_writes_but_cannot_delete() {
        let collab = actor(AccessLevel::Collaborator);
        assert!(permit(&collab, Action::Write));
        assert!(!permit(&collab, Action::DeactivateSecretariat));
        assert!(!permit(&collab, Action::DeleteProject));
        assert!(!permit(&collab, Action::ManageUsers));
    }

    #[test]
    fn test_administrator_allowed_everything() {
        let admin = actor(AccessLevel::Administrator);
        for action in [
            Action::Read,
            Action::Write,
            Action::DeactivateSecretariat,
            Action::DeleteProject,
            Action::ManageUsers,
        ] {
            assert!(permit(&admin, action));
        }
    }

    #[test]
    fn test_inactive_account_denied_mutations() {
        let mut admin = actor(AccessLevel::Administrator);
        admin.active = false;
        assert!(permit(&admin, Action::Read));
        assert!(!permit(&admin, Action::Write));
        assert!(!permit(&admin, Action::ManageUsers));
    }

    #[test]
    fn test_level_round_trip() {
        for level in [
            AccessLevel::Administrator,
            AccessLevel::Collaborator,
            AccessLevel::Viewer,
        ] {
            assert_eq!(AccessLevel::parse(level.as_str()), Some(level));
        }
        assert_eq!(AccessLevel::parse("root"), None);
    }
}
