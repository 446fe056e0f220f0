//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output with camelCase
//! field names.

use chrono::{DateTime, NaiveDate, Utc};
use church_core::{AttendanceStatus, Gender, MembershipStatus, Page, Role};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

// ============================================================================
// Common Response Types
// ============================================================================

/// One page of a list endpoint
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: i64,
}

impl<T> PaginatedResponse<T> {
    /// Convert a domain page, mapping every item
    pub fn from_page<E>(page: Page<E>, map: impl FnMut(E) -> T) -> Self {
        let total_pages = page.total_pages();
        let page = page.map(map);
        Self {
            items: page.items,
            total: page.total,
            page: page.page,
            page_size: page.page_size,
            total_pages,
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Bearer token and the signed-in profile
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub user: UserResponse,
}

impl AuthResponse {
    pub fn new(access_token: String, expires_in: i64, user: UserResponse) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            expires_in,
            user,
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Staff user profile; never carries the password hash
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub full_name: String,
    #[schema(value_type = String, example = "calling_team")]
    pub role: Role,
    pub is_active: bool,
    pub must_change_password: bool,
    pub is_deleted: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Member Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: Uuid,
    pub first_name: String,
    pub second_name: Option<String>,
    pub other_names: Option<String>,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    #[schema(value_type = String, example = "female")]
    pub gender: Gender,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    #[schema(value_type = String, example = "active")]
    pub membership_status: MembershipStatus,
    pub date_joined: NaiveDate,
    pub notes: Option<String>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Attendance Responses
// ============================================================================

/// Attendance record with the member's display name
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceResponse {
    pub id: Uuid,
    pub member_id: Uuid,
    pub member_name: Option<String>,
    pub attendance_date: NaiveDate,
    #[schema(value_type = String, example = "present")]
    pub status: AttendanceStatus,
    pub check_in_time: DateTime<Utc>,
    pub notes: Option<String>,
    /// Staff user who recorded it; empty for QR self check-in
    pub marked_by: Option<Uuid>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Outcome of a bulk mark.
///
/// `skipped` holds ids that were unknown or already recorded for the date.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkAttendanceResponse {
    pub created: Vec<AttendanceResponse>,
    pub skipped: Vec<Uuid>,
    pub total_created: usize,
    pub total_skipped: usize,
}

impl BulkAttendanceResponse {
    pub fn new(created: Vec<AttendanceResponse>, skipped: Vec<Uuid>) -> Self {
        Self {
            total_created: created.len(),
            total_skipped: skipped.len(),
            created,
            skipped,
        }
    }
}

/// QR step one result, shown to the member for confirmation
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QrLookupResponse {
    pub member_id: Uuid,
    pub member_name: String,
    #[schema(value_type = String, example = "active")]
    pub membership_status: MembershipStatus,
    /// Informational only; confirmation re-checks
    pub already_marked_today: bool,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Service banner served at the root path
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub status: String,
}

impl RootResponse {
    pub fn running(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            status: "running".to_string(),
        }
    }
}

/// Basic health check response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
