//! Password hashing and strength rules
//!
//! Hashes use Argon2id with a random salt per password.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use church_core::DomainError;

use crate::error::AppError;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Hash a password using Argon2id
///
/// # Errors
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

/// Verify a password against a stored hash
///
/// # Errors
/// Returns an error if the stored hash cannot be parsed
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Hashing front-end held by the service context
#[derive(Debug, Clone, Default)]
pub struct PasswordService;

impl PasswordService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Check strength, then hash
    ///
    /// # Errors
    /// Returns a weak-password error or a hashing failure
    pub fn hash_new(&self, password: &str) -> Result<String, AppError> {
        validate_password_strength(password)?;
        hash_password(password)
    }

    /// Verify against a stored hash; a missing hash never matches
    ///
    /// # Errors
    /// Returns an error if the stored hash is malformed
    pub fn matches(&self, password: &str, hash: Option<&str>) -> Result<bool, AppError> {
        match hash {
            Some(hash) => verify_password(password, hash),
            None => Ok(false),
        }
    }
}

/// Validate password strength.
///
/// A password needs at least 8 characters with an uppercase letter, a
/// lowercase letter and a digit. Every unmet rule is listed in the error.
///
/// # Errors
/// Returns `DomainError::WeakPassword`
pub fn validate_password_strength(password: &str) -> Result<(), DomainError> {
    let mut missing = Vec::new();

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        missing.push("at least 8 characters");
    }
    if !password.chars().any(char::is_uppercase) {
        missing.push("an uppercase letter");
    }
    if !password.chars().any(char::is_lowercase) {
        missing.push("a lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        missing.push("a digit");
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DomainError::WeakPassword(format!(
            "password must contain {}",
            missing.join(", ")
        )))
    }
}
