//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod attendance;
pub mod auth;
pub mod health;
pub mod members;
pub mod users;
