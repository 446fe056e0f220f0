//! Value objects - immutable types that represent domain concepts

mod access;
mod pagination;
mod role;

pub use access::{authorize, Capability};
pub use pagination::{Page, PageRequest};
pub use role::{ParseEnumError, Role};
