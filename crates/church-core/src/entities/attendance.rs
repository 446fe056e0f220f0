//! Attendance entity - one member's presence record for one date

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::patch_field;
use crate::error::DomainError;
use crate::value_objects::ParseEnumError;

/// Notes stored on records created through QR self check-in
pub const SELF_CHECK_IN_NOTE: &str = "Self-checked via QR code";

pub const MAX_NOTES_LENGTH: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
    Late,
    Excused,
}

impl AttendanceStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
            Self::Late => "late",
            Self::Excused => "excused",
        }
    }
}

impl FromStr for AttendanceStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            "late" => Ok(Self::Late),
            "excused" => Ok(Self::Excused),
            other => Err(ParseEnumError::new("attendance status", other)),
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attendance entity.
///
/// At most one non-deleted record exists per (member, date).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attendance {
    pub id: Uuid,
    pub member_id: Uuid,
    pub attendance_date: NaiveDate,
    pub status: AttendanceStatus,
    /// Set once at creation
    pub check_in_time: DateTime<Utc>,
    pub notes: Option<String>,
    /// Staff user who recorded it; `None` for self check-in
    pub marked_by: Option<Uuid>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Attendance {
    /// Create a staff-recorded attendance checked in now
    pub fn new(
        member_id: Uuid,
        attendance_date: NaiveDate,
        status: AttendanceStatus,
        notes: Option<String>,
        marked_by: Option<Uuid>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            member_id,
            attendance_date,
            status,
            check_in_time: now,
            notes,
            marked_by,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a QR self check-in; always present with the fixed note
    pub fn self_check_in(member_id: Uuid, attendance_date: NaiveDate) -> Self {
        Self::new(
            member_id,
            attendance_date,
            AttendanceStatus::Present,
            Some(SELF_CHECK_IN_NOTE.to_string()),
            None,
        )
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        validate_notes(self.notes.as_deref())
    }

    /// Mark as soft-deleted
    pub fn mark_deleted(&mut self) {
        self.is_deleted = true;
        self.updated_at = Utc::now();
    }
}

/// Check the notes length limit
pub fn validate_notes(notes: Option<&str>) -> Result<(), DomainError> {
    match notes {
        Some(n) if n.chars().count() > MAX_NOTES_LENGTH => Err(DomainError::ValidationError(
            format!("notes must be at most {MAX_NOTES_LENGTH} characters"),
        )),
        _ => Ok(()),
    }
}

/// Attendance joined with the member's display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub attendance: Attendance,
    pub member_name: Option<String>,
}

/// Partial update for an attendance record.
///
/// `notes: Some(None)` clears the notes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendancePatch {
    pub status: Option<AttendanceStatus>,
    pub notes: Option<Option<String>>,
}

impl AttendancePatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.notes.is_none()
    }

    /// Apply present fields to `attendance`, returning whether anything changed
    pub fn apply(self, attendance: &mut Attendance) -> bool {
        let mut changed = false;
        changed |= patch_field(&mut attendance.status, self.status);
        changed |= patch_field(&mut attendance.notes, self.notes);
        if changed {
            attendance.updated_at = Utc::now();
        }
        changed
    }
}
