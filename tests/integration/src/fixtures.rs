//! Test fixtures and request/response types
//!
//! Wire shapes mirror the API's camelCase JSON.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Password given to every seeded staff account
pub const STAFF_PASSWORD: &str = "Integration1!";

/// Phone number no other test run will reuse
pub fn unique_phone() -> String {
    format!("+1{:012}", Uuid::new_v4().as_u128() % 1_000_000_000_000)
}

/// Short unique tag for names and emails
pub fn unique_tag() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub date_joined: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membership_status: Option<String>,
}

impl CreateMemberRequest {
    /// Member with a unique phone and email
    pub fn sample() -> Self {
        let tag = unique_tag();
        Self {
            first_name: "Ruth".to_string(),
            last_name: format!("Test{tag}"),
            date_of_birth: NaiveDate::from_ymd_opt(1985, 3, 14).unwrap_or_default(),
            gender: "female".to_string(),
            date_joined: NaiveDate::from_ymd_opt(2019, 9, 1).unwrap_or_default(),
            phone_number: Some(unique_phone()),
            email: Some(format!("ruth_{tag}@members.test")),
            membership_status: Some("active".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceRequest {
    pub member_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkMarkAttendanceRequest {
    pub member_ids: Vec<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance_date: Option<NaiveDate>,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub role: String,
    pub is_active: bool,
    pub must_change_password: bool,
    pub is_deleted: bool,
    pub last_login: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub membership_status: String,
    pub is_deleted: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceResponse {
    pub id: Uuid,
    pub member_id: Uuid,
    pub member_name: Option<String>,
    pub attendance_date: NaiveDate,
    pub status: String,
    pub notes: Option<String>,
    pub marked_by: Option<Uuid>,
    pub is_deleted: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAttendanceResponse {
    pub created: Vec<AttendanceResponse>,
    pub skipped: Vec<Uuid>,
    pub total_created: usize,
    pub total_skipped: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrLookupResponse {
    pub member_id: Uuid,
    pub member_name: String,
    pub membership_status: String,
    pub already_marked_today: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: i64,
}
