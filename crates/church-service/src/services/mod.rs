//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] for the duration of a
//! request and orchestrates repository calls around the domain rules.

pub mod attendance;
pub mod auth;
pub mod context;
pub mod error;
pub mod member;
pub mod user;

pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use member::MemberService;
pub use user::UserService;

use chrono::NaiveDate;

/// Current calendar date in the server's local time zone
pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
