//! User store ports

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{UniqueField, User};
use crate::domain::DomainError;

/// Source of per-call store connections
///
/// Each connection returned by [`UserStore::connect`] belongs to exactly one caller,
/// which must call [`UserStoreConnection::disconnect`] once it is done.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Open a connection scoped to a single operation
    async fn connect(&self) -> Result<Box<dyn UserStoreConnection>, DomainError>;
}

/// Connection to the user store
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserStoreConnection: Send + Sync {
    /// Find the record whose `field` equals `value`
    async fn find_unique(
        &self,
        field: UniqueField,
        value: &str,
    ) -> Result<Option<User>, DomainError>;

    /// Persist a new record atomically
    ///
    /// Fails with [`DomainError::Duplicate`] if any unique key is already taken.
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Release the connection
    async fn disconnect(&self) -> Result<(), DomainError>;
}
