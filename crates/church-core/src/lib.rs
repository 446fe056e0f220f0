//! # church-core
//!
//! Domain layer containing entities, value objects, the access policy, and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    compose_display_name, normalize_username, Attendance, AttendancePatch, AttendanceRecord,
    AttendanceStatus, Gender, Member, MemberPatch, MembershipStatus, User, UserPatch,
    SELF_CHECK_IN_NOTE,
};
pub use error::DomainError;
pub use traits::{
    AttendanceFilter, AttendanceRepository, MemberFilter, MemberRepository, RepoResult,
    UserFilter, UserRepository,
};
pub use value_objects::{authorize, Capability, Page, PageRequest, ParseEnumError, Role};
