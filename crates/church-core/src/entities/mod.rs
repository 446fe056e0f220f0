//! Domain entities - core business objects

mod attendance;
mod member;
mod user;

pub use attendance::{
    validate_notes, Attendance, AttendancePatch, AttendanceRecord, AttendanceStatus,
    MAX_NOTES_LENGTH, SELF_CHECK_IN_NOTE,
};
pub use member::{compose_display_name, Gender, Member, MemberPatch, MembershipStatus};
pub use user::{normalize_username, User, UserPatch};

/// Assign `value` to `slot` when present and different, reporting whether anything changed
pub(crate) fn patch_field<T: PartialEq>(slot: &mut T, value: Option<T>) -> bool {
    match value {
        Some(value) if *slot != value => {
            *slot = value;
            true
        }
        _ => false,
    }
}
