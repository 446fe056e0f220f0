//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in church-core.
//! Each repository handles database operations for a specific domain entity.

mod attendance;
mod error;
mod member;
mod user;

pub use attendance::PgAttendanceRepository;
pub use member::PgMemberRepository;
pub use user::PgUserRepository;
