//! Repository traits (ports)

mod repositories;

pub use repositories::{
    AttendanceFilter, AttendanceRepository, MemberFilter, MemberRepository, RepoResult,
    UserFilter, UserRepository,
};
