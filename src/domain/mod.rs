//! Domain layer - User entity, validation rules and store abstractions

pub mod error;
pub mod user;

pub use error::DomainError;
