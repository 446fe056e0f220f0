//! Access policy
//!
//! Capabilities are evaluated per request against the resolved caller. The
//! public QR check-in endpoints never reach this module.

use crate::entities::User;
use crate::error::DomainError;

use super::Role;

/// A group of actions gated by role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// User directory CRUD and password resets
    ManageUsers,
    /// Member directory
    AccessMembers,
    /// Staff attendance marking, listing and editing
    AccessAttendance,
}

impl Capability {
    /// Message returned to callers whose role lacks the capability
    #[must_use]
    pub const fn denial_message(self) -> &'static str {
        match self {
            Self::ManageUsers => "Super admin privileges required",
            Self::AccessMembers => "Member access denied",
            Self::AccessAttendance => "Texting team members cannot access attendance",
        }
    }
}

impl Role {
    /// Whether this role may perform actions in the given capability group
    #[must_use]
    pub const fn allows(self, capability: Capability) -> bool {
        match capability {
            Capability::ManageUsers => matches!(self, Self::SuperAdmin),
            Capability::AccessMembers => true,
            Capability::AccessAttendance => !matches!(self, Self::TextingTeam),
        }
    }
}

/// Gate an action on the caller's account state and role.
///
/// Deleted and inactive accounts are rejected before the role is consulted.
pub fn authorize(user: &User, capability: Capability) -> Result<(), DomainError> {
    if user.is_deleted || !user.is_active {
        return Err(DomainError::AccountInactive);
    }

    if user.role.allows(capability) {
        Ok(())
    } else {
        Err(DomainError::MissingPermission(
            capability.denial_message().to_string(),
        ))
    }
}
