//! User validation utilities
//!
//! Every check is a pure predicate over a single field. [`validate_candidate`] runs
//! them in a fixed order and reports the first violation only.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::entity::SignUpCandidate;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum UserValidationError {
    #[error("ID should be a valid UUID")]
    InvalidId,

    #[error("Name invalid")]
    InvalidName,

    #[error("Username should have a length between 5 and 32")]
    InvalidUsername,

    #[error("Email invalid")]
    InvalidEmail,
}

pub const MIN_NAME_LENGTH: usize = 1;
pub const MAX_NAME_LENGTH: usize = 255;
pub const MIN_USERNAME_LENGTH: usize = 5;
pub const MAX_USERNAME_LENGTH: usize = 32;
pub const MAX_EMAIL_ADDRESS_LENGTH: usize = 255;

/// Hyphenated UUID of any version, case-insensitive
static UUID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}(?:-[0-9a-f]{4}){3}-[0-9a-f]{12}$").unwrap()
});

/// Dotted ASCII local part, hostname labels and an alphabetic top-level domain
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_+-]+(?:\.[A-Za-z0-9_+-]+)*@[A-Za-z0-9]+(?:[.-][A-Za-z0-9]+)*\.[A-Za-z]{2,}$",
    )
    .unwrap()
});

/// Validate a user ID
pub fn validate_id(id: &str) -> Result<(), UserValidationError> {
    if !UUID_PATTERN.is_match(id) {
        return Err(UserValidationError::InvalidId);
    }

    Ok(())
}

/// Validate a display name
///
/// Rules:
/// - Between 1 and 255 characters
pub fn validate_name(name: &str) -> Result<(), UserValidationError> {
    if !length_within(name, MIN_NAME_LENGTH, MAX_NAME_LENGTH) {
        return Err(UserValidationError::InvalidName);
    }

    Ok(())
}

/// Validate a username
///
/// Rules:
/// - Between 5 and 32 characters
pub fn validate_username(username: &str) -> Result<(), UserValidationError> {
    if !length_within(username, MIN_USERNAME_LENGTH, MAX_USERNAME_LENGTH) {
        return Err(UserValidationError::InvalidUsername);
    }

    Ok(())
}

/// Validate an email address
///
/// Rules:
/// - Word characters, `+` and `-` in dot-separated local part segments
/// - Domain of alphanumeric labels ending in a top-level domain of 2+ letters
/// - No quoted local parts, IP literals or single-label domains
/// - Maximum 255 characters
pub fn validate_email_address(email_address: &str) -> Result<(), UserValidationError> {
    if !EMAIL_PATTERN.is_match(email_address)
        || !length_within(email_address, 0, MAX_EMAIL_ADDRESS_LENGTH)
    {
        return Err(UserValidationError::InvalidEmail);
    }

    Ok(())
}

/// Validate all candidate fields in order: id, name, username, email address
pub fn validate_candidate(candidate: &SignUpCandidate) -> Result<(), UserValidationError> {
    validate_id(&candidate.id)?;
    validate_name(&candidate.name)?;
    validate_username(&candidate.username)?;
    validate_email_address(&candidate.email_address)?;

    Ok(())
}

fn length_within(value: &str, min: usize, max: usize) -> bool {
    let length = value.chars().count();
    (min..=max).contains(&length)
}
