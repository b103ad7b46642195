//! User infrastructure module
//!
//! This module provides the sign-up workflow and the user store adapters
//! (in-memory and PostgreSQL).

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::{PostgresConfig, PostgresUserConnection, PostgresUserStore};
pub use repository::{InMemoryUserConnection, InMemoryUserStore};
pub use service::UserSignUpper;
