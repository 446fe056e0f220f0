//! Integration test utilities for the church management API
//!
//! Helpers for running end-to-end tests against the REST API over a real
//! PostgreSQL database.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
