//! Sign-up outcome errors
//!
//! Messages are shown to end users verbatim.

use thiserror::Error;

use super::entity::UniqueField;
use super::validation::UserValidationError;
use crate::domain::DomainError;

/// Reasons a sign-up can be rejected
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignUpError {
    #[error("ID should be a valid UUID")]
    InvalidId,

    #[error("Name invalid")]
    InvalidName,

    #[error("Username should have a length between 5 and 32")]
    InvalidUsername,

    #[error("Email invalid")]
    InvalidEmail,

    #[error("User with id {0} already exists")]
    DuplicateId(String),

    #[error("User with username {0} already exists")]
    DuplicateUsername(String),

    #[error("User with email {0} already exists")]
    DuplicateEmail(String),

    #[error("User store unavailable: {0}")]
    StoreUnavailable(String),
}

impl SignUpError {
    /// Duplicate error for a collision on `field`
    pub fn duplicate(field: UniqueField, value: impl Into<String>) -> Self {
        let value = value.into();

        match field {
            UniqueField::Id => Self::DuplicateId(value),
            UniqueField::Username => Self::DuplicateUsername(value),
            UniqueField::EmailAddress => Self::DuplicateEmail(value),
        }
    }

    /// Candidate field the error refers to, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidId | Self::DuplicateId(_) => Some("id"),
            Self::InvalidName => Some("name"),
            Self::InvalidUsername | Self::DuplicateUsername(_) => Some("username"),
            Self::InvalidEmail | Self::DuplicateEmail(_) => Some("emailAddress"),
            Self::StoreUnavailable(_) => None,
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_id",
            Self::InvalidName => "invalid_name",
            Self::InvalidUsername => "invalid_username",
            Self::InvalidEmail => "invalid_email",
            Self::DuplicateId(_) => "duplicate_id",
            Self::DuplicateUsername(_) => "duplicate_username",
            Self::DuplicateEmail(_) => "duplicate_email",
            Self::StoreUnavailable(_) => "store_unavailable",
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidId | Self::InvalidName | Self::InvalidUsername | Self::InvalidEmail
        )
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            Self::DuplicateId(_) | Self::DuplicateUsername(_) | Self::DuplicateEmail(_)
        )
    }
}

impl From<UserValidationError> for SignUpError {
    fn from(err: UserValidationError) -> Self {
        match err {
            UserValidationError::InvalidId => Self::InvalidId,
            UserValidationError::InvalidName => Self::InvalidName,
            UserValidationError::InvalidUsername => Self::InvalidUsername,
            UserValidationError::InvalidEmail => Self::InvalidEmail,
        }
    }
}

impl From<DomainError> for SignUpError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Duplicate { field, value } => Self::duplicate(field, value),
            other => Self::StoreUnavailable(other.to_string()),
        }
    }
}
