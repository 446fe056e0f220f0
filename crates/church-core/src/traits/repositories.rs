//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Every read excludes soft-deleted rows.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::entities::{
    Attendance, AttendanceRecord, AttendanceStatus, Member, MembershipStatus, User,
};
use crate::error::DomainError;
use crate::value_objects::{Page, PageRequest, Role};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Member Repository
// ============================================================================

/// Filters for member listing
#[derive(Debug, Clone, Default)]
pub struct MemberFilter {
    pub membership_status: Option<MembershipStatus>,
    /// Case-insensitive substring over first name, last name, email and phone
    pub search: Option<String>,
}

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find member by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Member>>;

    /// Find the first member whose phone number matches exactly
    async fn find_by_phone(&self, phone_number: &str) -> RepoResult<Option<Member>>;

    /// Return which of the given ids belong to existing members
    async fn find_existing_ids(&self, ids: &[Uuid]) -> RepoResult<Vec<Uuid>>;

    /// Check if email is used by another member (case-insensitive)
    async fn email_exists(&self, email: &str, exclude: Option<Uuid>) -> RepoResult<bool>;

    /// Create a new member
    async fn create(&self, member: &Member) -> RepoResult<()>;

    /// Update an existing member
    async fn update(&self, member: &Member) -> RepoResult<()>;

    /// Soft delete a member
    async fn delete(&self, id: Uuid) -> RepoResult<()>;

    /// List members ordered by last name, then first name
    async fn list(&self, filter: &MemberFilter, page: PageRequest) -> RepoResult<Page<Member>>;
}

// ============================================================================
// User Repository
// ============================================================================

/// Filters for user listing
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>>;

    /// Find user by username or email (case-insensitive)
    async fn find_by_login(&self, identifier: &str) -> RepoResult<Option<User>>;

    /// Check if email is used by another user (case-insensitive)
    async fn email_exists(&self, email: &str, exclude: Option<Uuid>) -> RepoResult<bool>;

    /// Check if username is already taken
    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Update an existing user
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Soft delete a user and deactivate the account
    async fn delete(&self, id: Uuid) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Uuid) -> RepoResult<Option<String>>;

    /// Update password hash and the forced-change flag
    async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
        must_change_password: bool,
    ) -> RepoResult<()>;

    /// Stamp a successful sign-in
    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> RepoResult<()>;

    /// Count non-deleted super admins
    async fn count_super_admins(&self) -> RepoResult<i64>;

    /// Count non-deleted users
    async fn count(&self) -> RepoResult<i64>;

    /// List users, newest first
    async fn list(&self, filter: &UserFilter, page: PageRequest) -> RepoResult<Page<User>>;
}

// ============================================================================
// Attendance Repository
// ============================================================================

/// Filters for attendance listing; all conditions are combined with AND
#[derive(Debug, Clone, Default)]
pub struct AttendanceFilter {
    pub member_id: Option<Uuid>,
    pub attendance_date: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Find a record by ID, joined with its member's name
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<AttendanceRecord>>;

    /// Find several records by ID, joined with member names
    async fn find_by_ids(&self, ids: &[Uuid]) -> RepoResult<Vec<AttendanceRecord>>;

    /// Check for a record for this member on this date
    async fn exists_for(&self, member_id: Uuid, date: NaiveDate) -> RepoResult<bool>;

    /// Return which of the given members already have a record on this date
    async fn find_marked_members(
        &self,
        member_ids: &[Uuid],
        date: NaiveDate,
    ) -> RepoResult<Vec<Uuid>>;

    /// Insert one record.
    ///
    /// A (member, date) unique violation is reported as
    /// [`DomainError::DuplicateAttendance`].
    async fn create(&self, attendance: &Attendance) -> RepoResult<()>;

    /// Insert all records in one transaction.
    ///
    /// Any unique violation rolls back the whole batch and is reported as
    /// [`DomainError::DuplicateAttendanceBatch`].
    async fn create_many(&self, records: &[Attendance]) -> RepoResult<()>;

    /// Update status and notes of an existing record
    async fn update(&self, attendance: &Attendance) -> RepoResult<()>;

    /// Soft delete a record
    async fn delete(&self, id: Uuid) -> RepoResult<()>;

    /// List records, most recent date and check-in first
    async fn list(
        &self,
        filter: &AttendanceFilter,
        page: PageRequest,
    ) -> RepoResult<Page<AttendanceRecord>>;
}
