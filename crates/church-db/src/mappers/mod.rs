//! Model to entity mappers
//!
//! Enum columns are stored as text, so conversion is fallible: an unknown
//! value surfaces as a database error rather than a panic.

mod attendance;
mod member;
mod user;

use church_core::{DomainError, ParseEnumError};

pub(crate) fn corrupt_column(e: ParseEnumError) -> DomainError {
    DomainError::DatabaseError(format!("corrupt row: {e}"))
}
