//! In-memory user store implementation

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::{UniqueField, User, UserStore, UserStoreConnection};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct Records {
    users: HashMap<String, User>,
    /// Index for username -> user ID lookup
    username_index: HashMap<String, String>,
    /// Index for email address -> user ID lookup
    email_index: HashMap<String, String>,
}

impl Records {
    fn find(&self, field: UniqueField, value: &str) -> Option<&User> {
        let id = match field {
            UniqueField::Id => value,
            UniqueField::Username => self.username_index.get(value)?.as_str(),
            UniqueField::EmailAddress => self.email_index.get(value)?.as_str(),
        };

        self.users.get(id)
    }

    fn insert(&mut self, user: User) {
        let id = user.id().to_string();
        self.username_index
            .insert(user.username().to_string(), id.clone());
        self.email_index
            .insert(user.email_address().to_string(), id.clone());
        self.users.insert(id, user);
    }
}

#[derive(Debug, Default)]
struct Shared {
    records: RwLock<Records>,
    should_fail: AtomicBool,
    opened: AtomicUsize,
    released: AtomicUsize,
    lookup_delay: RwLock<Option<Duration>>,
}

impl Shared {
    fn check_should_fail(&self) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::storage("In-memory store configured to fail"));
        }
        Ok(())
    }
}

/// In-memory implementation of [`UserStore`]
///
/// All connections share the same records. Connection counters and failure
/// injection make it suitable for exercising the sign-up workflow in tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    shared: Arc<Shared>,
}

impl InMemoryUserStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with initial users
    pub fn with_users(users: Vec<User>) -> Self {
        let mut records = Records::default();

        for user in users {
            records.insert(user);
        }

        Self {
            shared: Arc::new(Shared {
                records: RwLock::new(records),
                ..Default::default()
            }),
        }
    }

    /// Set whether store operations should fail
    pub fn set_should_fail(&self, fail: bool) {
        self.shared.should_fail.store(fail, Ordering::SeqCst);
    }

    /// Delay every lookup answer by `delay`
    ///
    /// The answer reflects the records as they were when the lookup started.
    pub async fn set_lookup_delay(&self, delay: Option<Duration>) {
        *self.shared.lookup_delay.write().await = delay;
    }

    /// Number of persisted users
    pub async fn len(&self) -> usize {
        self.shared.records.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Look a user up without opening a connection
    pub async fn find(&self, field: UniqueField, value: &str) -> Option<User> {
        self.shared.records.read().await.find(field, value).cloned()
    }

    /// Number of connections handed out so far
    pub fn opened_connections(&self) -> usize {
        self.shared.opened.load(Ordering::SeqCst)
    }

    /// Number of connections released so far
    pub fn released_connections(&self) -> usize {
        self.shared.released.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn connect(&self) -> Result<Box<dyn UserStoreConnection>, DomainError> {
        self.shared.check_should_fail()?;
        self.shared.opened.fetch_add(1, Ordering::SeqCst);

        Ok(Box::new(InMemoryUserConnection {
            shared: Arc::clone(&self.shared),
            released: AtomicBool::new(false),
        }))
    }
}

/// Connection handed out by [`InMemoryUserStore`]
#[derive(Debug)]
pub struct InMemoryUserConnection {
    shared: Arc<Shared>,
    released: AtomicBool,
}

impl InMemoryUserConnection {
    fn ensure_open(&self) -> Result<(), DomainError> {
        if self.released.load(Ordering::SeqCst) {
            return Err(DomainError::storage("Connection already released"));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStoreConnection for InMemoryUserConnection {
    async fn find_unique(
        &self,
        field: UniqueField,
        value: &str,
    ) -> Result<Option<User>, DomainError> {
        self.ensure_open()?;
        self.shared.check_should_fail()?;

        let found = self.shared.records.read().await.find(field, value).cloned();

        let delay = *self.shared.lookup_delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        Ok(found)
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        self.ensure_open()?;
        self.shared.check_should_fail()?;

        let mut records = self.shared.records.write().await;

        for field in [UniqueField::Id, UniqueField::Username, UniqueField::EmailAddress] {
            let value = user.unique_value(field);

            if records.find(field, value).is_some() {
                return Err(DomainError::duplicate(field, value));
            }
        }

        records.insert(user.clone());
        Ok(user)
    }

    async fn disconnect(&self) -> Result<(), DomainError> {
        if self.released.swap(true, Ordering::SeqCst) {
            return Err(DomainError::internal("Connection released twice"));
        }

        self.shared.released.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
