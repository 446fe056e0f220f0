//! # church-service
//!
//! Application layer containing the attendance workflow, the member and user
//! directories, authentication, and the request/response DTOs that form the
//! wire boundary.

pub mod dto;
pub mod services;

#[cfg(test)]
mod testing;

pub use services::{
    AttendanceService, AuthService, MemberService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, UserService,
};
