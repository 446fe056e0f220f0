//! Domain errors - error types for the domain layer

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Member not found: {0}")]
    MemberNotFound(Uuid),

    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Attendance record not found: {0}")]
    AttendanceNotFound(Uuid),

    #[error("No member found with that phone number. Please contact the church office.")]
    PhoneNumberNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Current password is incorrect")]
    IncorrectPassword,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("{0}")]
    MissingPermission(String),

    #[error("User account is inactive")]
    AccountInactive,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Attendance already recorded for this member on {date}.")]
    DuplicateAttendance { member_id: Uuid, date: NaiveDate },

    #[error("You have already been marked as present on {date}.")]
    AlreadyCheckedIn { date: NaiveDate },

    #[error("One or more duplicate attendance records encountered during bulk insert.")]
    DuplicateAttendanceBatch,

    #[error("A member with this email already exists")]
    MemberEmailExists,

    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("Username already taken")]
    UsernameAlreadyExists,

    #[error("Cannot remove the last super admin")]
    LastSuperAdmin,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::MemberNotFound(_) => "UNKNOWN_MEMBER",
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::AttendanceNotFound(_) => "UNKNOWN_ATTENDANCE",
            Self::PhoneNumberNotFound => "UNKNOWN_PHONE_NUMBER",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidUsername(_) => "INVALID_USERNAME",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::IncorrectPassword => "INCORRECT_PASSWORD",

            // Authorization
            Self::MissingPermission(_) => "MISSING_PERMISSIONS",
            Self::AccountInactive => "ACCOUNT_INACTIVE",

            // Conflict
            Self::DuplicateAttendance { .. } => "DUPLICATE_ATTENDANCE",
            Self::AlreadyCheckedIn { .. } => "ALREADY_CHECKED_IN",
            Self::DuplicateAttendanceBatch => "DUPLICATE_ATTENDANCE_BATCH",
            Self::MemberEmailExists => "MEMBER_EMAIL_EXISTS",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            Self::LastSuperAdmin => "LAST_SUPER_ADMIN",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::MemberNotFound(_)
                | Self::UserNotFound(_)
                | Self::AttendanceNotFound(_)
                | Self::PhoneNumberNotFound
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidUsername(_)
                | Self::WeakPassword(_)
                | Self::IncorrectPassword
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::MissingPermission(_) | Self::AccountInactive)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::DuplicateAttendance { .. }
                | Self::AlreadyCheckedIn { .. }
                | Self::DuplicateAttendanceBatch
                | Self::MemberEmailExists
                | Self::EmailAlreadyExists
                | Self::UsernameAlreadyExists
                | Self::LastSuperAdmin
        )
    }
}
