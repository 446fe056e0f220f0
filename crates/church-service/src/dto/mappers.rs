//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs, and
//! from update requests to domain patches.

use church_core::{
    AttendancePatch, AttendanceRecord, Member, MemberPatch, User, UserPatch,
};

use super::requests::{UpdateAttendanceRequest, UpdateMemberRequest, UpdateUserRequest};
use super::responses::{AttendanceResponse, MemberResponse, UserResponse};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            role: user.role,
            is_active: user.is_active,
            must_change_password: user.must_change_password,
            is_deleted: user.is_deleted,
            last_login: user.last_login,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(request: UpdateUserRequest) -> Self {
        Self {
            email: request.email.map(|e| e.trim().to_string()),
            full_name: request.full_name.map(|n| n.trim().to_string()),
            role: request.role,
            is_active: request.is_active,
        }
    }
}

// ============================================================================
// Member Mappers
// ============================================================================

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id,
            first_name: member.first_name.clone(),
            second_name: member.second_name.clone(),
            other_names: member.other_names.clone(),
            last_name: member.last_name.clone(),
            date_of_birth: member.date_of_birth,
            gender: member.gender,
            phone_number: member.phone_number.clone(),
            email: member.email.clone(),
            address: member.address.clone(),
            membership_status: member.membership_status,
            date_joined: member.date_joined,
            notes: member.notes.clone(),
            is_deleted: member.is_deleted,
            created_at: member.created_at,
            updated_at: member.updated_at,
        }
    }
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self::from(&member)
    }
}

impl From<UpdateMemberRequest> for MemberPatch {
    fn from(request: UpdateMemberRequest) -> Self {
        Self {
            first_name: request.first_name,
            second_name: request.second_name,
            other_names: request.other_names,
            last_name: request.last_name,
            date_of_birth: request.date_of_birth,
            gender: request.gender,
            phone_number: request.phone_number,
            email: request.email,
            address: request.address,
            membership_status: request.membership_status,
            date_joined: request.date_joined,
            notes: request.notes,
        }
    }
}

// ============================================================================
// Attendance Mappers
// ============================================================================

impl From<&AttendanceRecord> for AttendanceResponse {
    fn from(record: &AttendanceRecord) -> Self {
        let a = &record.attendance;
        Self {
            id: a.id,
            member_id: a.member_id,
            member_name: record.member_name.clone(),
            attendance_date: a.attendance_date,
            status: a.status,
            check_in_time: a.check_in_time,
            notes: a.notes.clone(),
            marked_by: a.marked_by,
            is_deleted: a.is_deleted,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

impl From<AttendanceRecord> for AttendanceResponse {
    fn from(record: AttendanceRecord) -> Self {
        Self::from(&record)
    }
}

impl From<UpdateAttendanceRequest> for AttendancePatch {
    fn from(request: UpdateAttendanceRequest) -> Self {
        Self {
            status: request.status,
            notes: request.notes,
        }
    }
}
