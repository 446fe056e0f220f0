//! Attendance row -> record mapper

use church_core::{compose_display_name, Attendance, AttendanceRecord, DomainError};

use super::corrupt_column;
use crate::models::AttendanceRowModel;

impl TryFrom<AttendanceRowModel> for AttendanceRecord {
    type Error = DomainError;

    fn try_from(row: AttendanceRowModel) -> Result<Self, Self::Error> {
        let member_name = match (&row.first_name, &row.last_name) {
            (Some(first), Some(last)) => Some(compose_display_name(
                first,
                row.second_name.as_deref(),
                last,
            )),
            _ => None,
        };

        Ok(AttendanceRecord {
            attendance: Attendance {
                id: row.id,
                member_id: row.member_id,
                attendance_date: row.attendance_date,
                status: row.status.parse().map_err(corrupt_column)?,
                check_in_time: row.check_in_time,
                notes: row.notes,
                marked_by: row.marked_by,
                is_deleted: row.is_deleted,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            member_name,
        })
    }
}
