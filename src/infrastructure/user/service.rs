//! User sign-up workflow

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::user::{
    validate_candidate, SignUpCandidate, SignUpError, UniqueField, User, UserStore,
    UserStoreConnection,
};

/// Registers new users in the directory
///
/// Every call opens its own store connection and releases it before returning,
/// whatever the outcome.
#[derive(Debug)]
pub struct UserSignUpper<S: UserStore + ?Sized> {
    store: Arc<S>,
}

impl<S: UserStore + ?Sized> UserSignUpper<S> {
    /// Create a new sign-up workflow over the given store
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Validate, check uniqueness of and persist a new user
    pub async fn sign_up(&self, candidate: SignUpCandidate) -> Result<User, SignUpError> {
        debug!(
            user_id = %candidate.id,
            username = %candidate.username,
            "Signing up user"
        );

        let connection = self.store.connect().await.map_err(|e| {
            error!(error = %e, "Failed to open user store connection");
            SignUpError::from(e)
        })?;

        let guard = ConnectionGuard::new(connection);
        let outcome = register(guard.connection(), candidate).await;
        guard.release().await;

        match &outcome {
            Ok(user) => info!(
                user_id = %user.id(),
                username = %user.username(),
                "User registered"
            ),
            Err(e @ SignUpError::StoreUnavailable(_)) => {
                error!(error = %e, "Sign-up failed")
            }
            Err(e) => warn!(code = e.code(), field = ?e.field(), "Sign-up rejected: {}", e),
        }

        outcome
    }

    /// Open and release a connection to prove the store is reachable
    pub async fn check_store(&self) -> Result<(), SignUpError> {
        let connection = self.store.connect().await?;
        connection.disconnect().await?;
        Ok(())
    }
}

/// Holds a store connection until it is released
///
/// Dropping the guard unreleased (the sign-up future was cancelled) releases the
/// connection on a background task.
struct ConnectionGuard {
    connection: Arc<dyn UserStoreConnection>,
    released: bool,
}

impl ConnectionGuard {
    fn new(connection: Box<dyn UserStoreConnection>) -> Self {
        Self {
            connection: Arc::from(connection),
            released: false,
        }
    }

    fn connection(&self) -> &dyn UserStoreConnection {
        self.connection.as_ref()
    }

    async fn release(mut self) {
        self.released = true;
        release_connection(self.connection.as_ref()).await;
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }

        let connection = Arc::clone(&self.connection);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                debug!("Sign-up abandoned, releasing user store connection");
                handle.spawn(async move { release_connection(connection.as_ref()).await });
            }
            Err(_) => warn!("No runtime left to release abandoned user store connection"),
        }
    }
}

async fn release_connection(connection: &dyn UserStoreConnection) {
    if let Err(e) = connection.disconnect().await {
        warn!(error = %e, "Failed to release user store connection");
    }
}

async fn register(
    connection: &dyn UserStoreConnection,
    candidate: SignUpCandidate,
) -> Result<User, SignUpError> {
    validate_candidate(&candidate)?;
    ensure_user_not_exist(connection, &candidate).await?;

    let user = connection.create(User::new(candidate)).await?;
    Ok(user)
}

/// Looks the candidate up under every unique key at once
///
/// A failed lookup wins over any conflict. Conflicts are reported in id, username,
/// email address order.
async fn ensure_user_not_exist(
    connection: &dyn UserStoreConnection,
    candidate: &SignUpCandidate,
) -> Result<(), SignUpError> {
    let (by_id, by_username, by_email_address) = futures::join!(
        connection.find_unique(UniqueField::Id, &candidate.id),
        connection.find_unique(UniqueField::Username, &candidate.username),
        connection.find_unique(UniqueField::EmailAddress, &candidate.email_address),
    );

    let lookups = [
        (UniqueField::Id, by_id),
        (UniqueField::Username, by_username),
        (UniqueField::EmailAddress, by_email_address),
    ];

    let mut conflict = None;

    for (field, lookup) in lookups {
        if lookup?.is_some() && conflict.is_none() {
            conflict = Some(field);
        }
    }

    match conflict {
        Some(field) => Err(SignUpError::duplicate(
            field,
            candidate.unique_value(field),
        )),
        None => Ok(()),
    }
}
