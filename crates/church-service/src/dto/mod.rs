//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers between domain entities and DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    AttendanceListQuery, BulkMarkAttendanceRequest, ChangePasswordRequest, CreateMemberRequest,
    CreateUserRequest, LoginRequest, MarkAttendanceRequest, MemberListQuery, PageParams,
    QrConfirmRequest, QrLookupRequest, ResetPasswordRequest, TokenRequest,
    UpdateAttendanceRequest, UpdateMemberRequest, UpdateUserRequest, UserListQuery,
};

pub use responses::{
    AttendanceResponse, AuthResponse, BulkAttendanceResponse, HealthChecks, HealthResponse,
    MemberResponse, PaginatedResponse, QrLookupResponse, ReadinessResponse,
    RootResponse, UserResponse,
};
