//! User domain
//!
//! This module provides domain types and traits for user registration,
//! including the user entity, field validation, sign-up errors and store ports.

mod entity;
mod error;
mod repository;
mod validation;

pub use entity::{SignUpCandidate, UniqueField, User};
pub use error::SignUpError;
pub use repository::{UserStore, UserStoreConnection};
pub use validation::{
    validate_candidate, validate_email_address, validate_id, validate_name, validate_username,
    UserValidationError, MAX_EMAIL_ADDRESS_LENGTH, MAX_NAME_LENGTH, MAX_USERNAME_LENGTH,
    MIN_NAME_LENGTH, MIN_USERNAME_LENGTH,
};

#[cfg(test)]
pub use repository::{MockUserStore, MockUserStoreConnection};
