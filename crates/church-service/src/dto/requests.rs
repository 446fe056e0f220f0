//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Field names are camelCase on the wire; every multi-word field also accepts
//! its snake_case spelling.

use chrono::NaiveDate;
use church_core::{AttendanceStatus, Gender, MembershipStatus, Role};
use serde::{Deserialize, Deserializer};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidateEmail, ValidationError};

/// Distinguish an absent field (`None`) from an explicit `null` (`Some(None)`)
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn check_max_len(
    field: &'static str,
    value: Option<&Option<String>>,
    max: usize,
) -> Result<(), ValidationError> {
    match value {
        Some(Some(v)) if v.chars().count() > max => {
            let mut err = ValidationError::new("length");
            err.message = Some(format!("{field} must be at most {max} characters").into());
            Err(err)
        }
        _ => Ok(()),
    }
}

// ============================================================================
// Auth Requests
// ============================================================================

/// JSON login request; `username` may also be an email address
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// OAuth2 password-grant form body
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct TokenRequest {
    pub grant_type: Option<String>,

    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    pub scope: Option<String>,
}

impl From<TokenRequest> for LoginRequest {
    fn from(form: TokenRequest) -> Self {
        Self {
            username: form.username,
            password: form.password,
        }
    }
}

/// Change the caller's own password
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(alias = "current_password")]
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,

    #[serde(alias = "new_password")]
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub new_password: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// Create a staff user (super admin only)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 3, max = 100, message = "Username must be 3-100 characters"))]
    pub username: String,

    #[serde(alias = "full_name")]
    #[validate(length(min = 1, max = 255, message = "Full name must be 1-255 characters"))]
    pub full_name: String,

    /// Initial password; the user must change it on first login
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: String,

    #[serde(default)]
    #[schema(value_type = Option<String>, example = "calling_team")]
    pub role: Option<Role>,
}

/// Partial user update (super admin only)
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[serde(alias = "full_name")]
    #[validate(length(min = 1, max = 255, message = "Full name must be 1-255 characters"))]
    pub full_name: Option<String>,

    #[schema(value_type = Option<String>, example = "texting_team")]
    pub role: Option<Role>,

    #[serde(alias = "is_active")]
    pub is_active: Option<bool>,
}

/// Admin password reset
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[serde(alias = "new_password")]
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub new_password: String,
}

// ============================================================================
// Member Requests
// ============================================================================

/// Create a member
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    #[serde(alias = "first_name")]
    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub first_name: String,

    #[serde(alias = "second_name")]
    #[validate(length(max = 100, message = "Second name must be at most 100 characters"))]
    pub second_name: Option<String>,

    #[serde(alias = "other_names")]
    #[validate(length(max = 255, message = "Other names must be at most 255 characters"))]
    pub other_names: Option<String>,

    #[serde(alias = "last_name")]
    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub last_name: String,

    #[serde(alias = "date_of_birth")]
    pub date_of_birth: NaiveDate,

    #[schema(value_type = String, example = "female")]
    pub gender: Gender,

    #[serde(alias = "phone_number")]
    #[validate(length(max = 20, message = "Phone number must be at most 20 characters"))]
    pub phone_number: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub address: Option<String>,

    #[serde(default, alias = "membership_status")]
    #[schema(value_type = Option<String>, example = "visitor")]
    pub membership_status: Option<MembershipStatus>,

    #[serde(alias = "date_joined")]
    pub date_joined: NaiveDate,

    pub notes: Option<String>,
}

/// Partial member update; `null` clears an optional field
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_update_member"))]
pub struct UpdateMemberRequest {
    #[serde(alias = "first_name")]
    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub first_name: Option<String>,

    #[serde(default, alias = "second_name", deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub second_name: Option<Option<String>>,

    #[serde(default, alias = "other_names", deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub other_names: Option<Option<String>>,

    #[serde(alias = "last_name")]
    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub last_name: Option<String>,

    #[serde(alias = "date_of_birth")]
    pub date_of_birth: Option<NaiveDate>,

    #[schema(value_type = Option<String>)]
    pub gender: Option<Gender>,

    #[serde(default, alias = "phone_number", deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub phone_number: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub email: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub address: Option<Option<String>>,

    #[serde(alias = "membership_status")]
    #[schema(value_type = Option<String>)]
    pub membership_status: Option<MembershipStatus>,

    #[serde(alias = "date_joined")]
    pub date_joined: Option<NaiveDate>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
}

fn validate_update_member(request: &UpdateMemberRequest) -> Result<(), ValidationError> {
    check_max_len("secondName", request.second_name.as_ref(), 100)?;
    check_max_len("otherNames", request.other_names.as_ref(), 255)?;
    check_max_len("phoneNumber", request.phone_number.as_ref(), 20)?;
    if let Some(Some(email)) = &request.email {
        if !email.validate_email() {
            let mut err = ValidationError::new("email");
            err.message = Some("Invalid email format".into());
            return Err(err);
        }
    }
    Ok(())
}

// ============================================================================
// Attendance Requests
// ============================================================================

/// Mark one member's attendance
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceRequest {
    #[serde(alias = "member_id")]
    pub member_id: Uuid,

    /// Defaults to `present`
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "present")]
    pub status: Option<AttendanceStatus>,

    /// Defaults to today
    #[serde(default, alias = "attendance_date")]
    pub attendance_date: Option<NaiveDate>,

    #[validate(length(max = 500, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,
}

/// Mark the same status for several members at once
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkMarkAttendanceRequest {
    #[serde(alias = "member_ids")]
    #[validate(length(min = 1, message = "At least one member id is required"))]
    pub member_ids: Vec<Uuid>,

    #[serde(default)]
    #[schema(value_type = Option<String>, example = "present")]
    pub status: Option<AttendanceStatus>,

    #[serde(default, alias = "attendance_date")]
    pub attendance_date: Option<NaiveDate>,

    #[validate(length(max = 500, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,
}

/// Partial attendance update; `notes: null` clears the notes
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_update_attendance"))]
pub struct UpdateAttendanceRequest {
    #[schema(value_type = Option<String>)]
    pub status: Option<AttendanceStatus>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
}

fn validate_update_attendance(request: &UpdateAttendanceRequest) -> Result<(), ValidationError> {
    check_max_len("notes", request.notes.as_ref(), 500)
}

/// QR step one: the member enters a phone number
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QrLookupRequest {
    #[serde(alias = "phone_number")]
    #[validate(length(min = 1, max = 20, message = "Phone number must be 1-20 characters"))]
    pub phone_number: String,
}

/// QR step two: the member confirms and checks in.
///
/// Any status sent by the client is ignored; self check-in is always present.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QrConfirmRequest {
    #[serde(alias = "member_id")]
    pub member_id: Uuid,

    #[serde(default, alias = "attendance_date")]
    pub attendance_date: Option<NaiveDate>,
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Offset pagination parameters shared by every list endpoint
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Page number, starting at 1
    pub page: Option<u32>,
    /// Items per page
    #[serde(alias = "page_size")]
    pub page_size: Option<u32>,
}

/// Member list filters
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MemberListQuery {
    #[serde(alias = "membership_status")]
    #[param(value_type = Option<String>)]
    pub membership_status: Option<MembershipStatus>,
    /// Case-insensitive match on first name, last name, email or phone
    pub search: Option<String>,
}

/// User list filters
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserListQuery {
    #[param(value_type = Option<String>)]
    pub role: Option<Role>,
    #[serde(alias = "is_active")]
    pub is_active: Option<bool>,
}

/// Attendance list filters, combined with AND
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AttendanceListQuery {
    #[serde(alias = "member_id")]
    pub member_id: Option<Uuid>,
    #[serde(alias = "attendance_date")]
    pub attendance_date: Option<NaiveDate>,
    #[param(value_type = Option<String>)]
    pub status: Option<AttendanceStatus>,
    #[serde(alias = "from_date")]
    pub from_date: Option<NaiveDate>,
    #[serde(alias = "to_date")]
    pub to_date: Option<NaiveDate>,
}
