//! Database models - SQLx-compatible structs for PostgreSQL tables

mod attendance;
mod member;
mod user;

pub use attendance::AttendanceRowModel;
pub use member::MemberModel;
pub use user::UserModel;
