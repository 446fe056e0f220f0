//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, path ids and paging.

mod auth;
mod pagination;
mod path;
mod validated;

pub use auth::AuthUser;
pub use pagination::Paging;
pub use path::IdPath;
pub use validated::{QueryParams, ValidatedForm, ValidatedJson};
