//! Staff roles
//!
//! Persisted as lowercase text: `super_admin`, `calling_team`, `texting_team`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role held by a staff user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    #[default]
    CallingTeam,
    TextingTeam,
}

impl Role {
    /// Stored / wire representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::CallingTeam => "calling_team",
            Self::TextingTeam => "texting_team",
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_super_admin(self) -> bool {
        matches!(self, Self::SuperAdmin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Self::SuperAdmin),
            "calling_team" => Ok(Self::CallingTeam),
            "texting_team" => Ok(Self::TextingTeam),
            other => Err(ParseEnumError::new("role", other)),
        }
    }
}

/// Error when a stored or supplied enum value is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} value: '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}
