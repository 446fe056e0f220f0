//! Attendance database model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Attendance row left-joined with the member's name columns
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceRowModel {
    pub id: Uuid,
    pub member_id: Uuid,
    pub attendance_date: NaiveDate,
    pub status: String,
    pub check_in_time: DateTime<Utc>,
    pub notes: Option<String>,
    pub marked_by: Option<Uuid>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub first_name: Option<String>,
    pub second_name: Option<String>,
    pub last_name: Option<String>,
}
