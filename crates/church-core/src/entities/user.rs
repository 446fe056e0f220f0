//! User entity - a staff account that can sign in

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::patch_field;
use crate::error::DomainError;
use crate::value_objects::Role;

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 100;

/// User entity representing a staff account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub is_active: bool,
    pub must_change_password: bool,
    pub is_deleted: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new active user who must change the initial password
    pub fn new(email: String, username: String, full_name: String, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            username,
            full_name,
            role,
            is_active: true,
            must_change_password: true,
            is_deleted: false,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this account may authenticate at all
    #[inline]
    pub fn can_sign_in(&self) -> bool {
        self.is_active && !self.is_deleted
    }

    #[inline]
    pub fn is_super_admin(&self) -> bool {
        self.role.is_super_admin()
    }

    /// Soft delete; a deleted account is also deactivated
    pub fn mark_deleted(&mut self) {
        self.is_deleted = true;
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}

/// Trim, lowercase and check a username
pub fn normalize_username(raw: &str) -> Result<String, DomainError> {
    let username = raw.trim().to_lowercase();
    let length = username.chars().count();

    if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&length) {
        return Err(DomainError::InvalidUsername(format!(
            "must be between {MIN_USERNAME_LENGTH} and {MAX_USERNAME_LENGTH} characters"
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(DomainError::InvalidUsername(
            "may only contain letters, numbers, hyphens and underscores".to_string(),
        ));
    }
    Ok(username)
}

/// Partial update for a user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

impl UserPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply present fields to `user`, returning whether anything changed
    pub fn apply(self, user: &mut User) -> bool {
        let mut changed = false;
        changed |= patch_field(&mut user.email, self.email);
        changed |= patch_field(&mut user.full_name, self.full_name);
        changed |= patch_field(&mut user.role, self.role);
        changed |= patch_field(&mut user.is_active, self.is_active);
        if changed {
            user.updated_at = Utc::now();
        }
        changed
    }
}
