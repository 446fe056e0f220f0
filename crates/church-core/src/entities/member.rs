//! Member entity - a person on the church roll

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::patch_field;
use crate::error::DomainError;
use crate::value_objects::ParseEnumError;

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_OTHER_NAMES_LENGTH: usize = 255;
pub const MAX_PHONE_LENGTH: usize = 20;
pub const MIN_BIRTH_YEAR: i32 = 1900;

// ============================================================================
// Enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

impl FromStr for Gender {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "other" => Ok(Self::Other),
            other => Err(ParseEnumError::new("gender", other)),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    Active,
    Inactive,
    #[default]
    Visitor,
}

impl MembershipStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Visitor => "visitor",
        }
    }
}

impl FromStr for MembershipStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "visitor" => Ok(Self::Visitor),
            other => Err(ParseEnumError::new("membership status", other)),
        }
    }
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Member
// ============================================================================

/// Member entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: Uuid,
    pub first_name: String,
    pub second_name: Option<String>,
    pub other_names: Option<String>,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub membership_status: MembershipStatus,
    pub date_joined: NaiveDate,
    pub notes: Option<String>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// Create a new member with the required fields; optional fields start empty
    pub fn new(
        first_name: String,
        last_name: String,
        date_of_birth: NaiveDate,
        gender: Gender,
        date_joined: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            first_name,
            second_name: None,
            other_names: None,
            last_name,
            date_of_birth,
            gender,
            phone_number: None,
            email: None,
            address: None,
            membership_status: MembershipStatus::default(),
            date_joined,
            notes: None,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Name shown on attendance records and the QR lookup
    pub fn display_name(&self) -> String {
        compose_display_name(
            &self.first_name,
            self.second_name.as_deref(),
            &self.last_name,
        )
    }

    /// Trim names and drop blank optional text fields
    pub fn normalize(&mut self) {
        self.first_name = self.first_name.trim().to_string();
        self.last_name = self.last_name.trim().to_string();
        for field in [
            &mut self.second_name,
            &mut self.other_names,
            &mut self.phone_number,
            &mut self.email,
        ] {
            *field = field
                .take()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty());
        }
    }

    /// Check field rules against the current calendar date
    pub fn validate(&self, today: NaiveDate) -> Result<(), DomainError> {
        if self.first_name.trim().is_empty() {
            return Err(invalid("First name cannot be empty"));
        }
        if self.last_name.trim().is_empty() {
            return Err(invalid("Last name cannot be empty"));
        }

        check_length("firstName", Some(&self.first_name), MAX_NAME_LENGTH)?;
        check_length("lastName", Some(&self.last_name), MAX_NAME_LENGTH)?;
        check_length("secondName", self.second_name.as_deref(), MAX_NAME_LENGTH)?;
        check_length(
            "otherNames",
            self.other_names.as_deref(),
            MAX_OTHER_NAMES_LENGTH,
        )?;
        check_length("phoneNumber", self.phone_number.as_deref(), MAX_PHONE_LENGTH)?;

        if self.date_of_birth > today {
            return Err(invalid("Date of birth cannot be in the future"));
        }
        if self.date_of_birth.year() < MIN_BIRTH_YEAR {
            return Err(invalid("Date of birth must be after 1900"));
        }
        if self.date_joined > today {
            return Err(invalid("Date joined cannot be in the future"));
        }
        Ok(())
    }

    /// Mark as soft-deleted
    pub fn mark_deleted(&mut self) {
        self.is_deleted = true;
        self.updated_at = Utc::now();
    }
}

/// First name, optional second name and last name joined by single spaces
pub fn compose_display_name(first: &str, second: Option<&str>, last: &str) -> String {
    let mut parts = vec![first.trim()];
    if let Some(second) = second.map(str::trim).filter(|s| !s.is_empty()) {
        parts.push(second);
    }
    parts.push(last.trim());
    parts.retain(|p| !p.is_empty());
    parts.join(" ")
}

fn invalid(message: &str) -> DomainError {
    DomainError::ValidationError(message.to_string())
}

fn check_length(field: &str, value: Option<&str>, max: usize) -> Result<(), DomainError> {
    match value {
        Some(v) if v.chars().count() > max => Err(DomainError::ValidationError(format!(
            "{field} must be at most {max} characters"
        ))),
        _ => Ok(()),
    }
}

// ============================================================================
// Patch
// ============================================================================

/// Partial update for a member.
///
/// Nullable columns use `Option<Option<_>>`: `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberPatch {
    pub first_name: Option<String>,
    pub second_name: Option<Option<String>>,
    pub other_names: Option<Option<String>>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub phone_number: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub address: Option<Option<String>>,
    pub membership_status: Option<MembershipStatus>,
    pub date_joined: Option<NaiveDate>,
    pub notes: Option<Option<String>>,
}

impl MemberPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply present fields to `member`, returning whether anything changed
    pub fn apply(self, member: &mut Member) -> bool {
        let mut changed = false;
        changed |= patch_field(&mut member.first_name, self.first_name);
        changed |= patch_field(&mut member.second_name, self.second_name);
        changed |= patch_field(&mut member.other_names, self.other_names);
        changed |= patch_field(&mut member.last_name, self.last_name);
        changed |= patch_field(&mut member.date_of_birth, self.date_of_birth);
        changed |= patch_field(&mut member.gender, self.gender);
        changed |= patch_field(&mut member.phone_number, self.phone_number);
        changed |= patch_field(&mut member.email, self.email);
        changed |= patch_field(&mut member.address, self.address);
        changed |= patch_field(&mut member.membership_status, self.membership_status);
        changed |= patch_field(&mut member.date_joined, self.date_joined);
        changed |= patch_field(&mut member.notes, self.notes);
        if changed {
            member.updated_at = Utc::now();
        }
        changed
    }
}
