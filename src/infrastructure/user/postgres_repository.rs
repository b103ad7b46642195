//! PostgreSQL user store implementation

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use tracing::debug;

use crate::domain::user::{UniqueField, User, UserStore, UserStoreConnection};
use crate::domain::DomainError;

const USERNAME_CONSTRAINT: &str = "users_username_key";
const EMAIL_ADDRESS_CONSTRAINT: &str = "users_email_address_key";
const PRIMARY_KEY_CONSTRAINT: &str = "users_pkey";

/// PostgreSQL connection pool configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds
    pub idle_timeout_secs: u64,
}

/// PostgreSQL implementation of [`UserStore`]
///
/// The pool is owned by the store and outlives every connection it hands out.
/// A [`PostgresUserConnection`] is a per-call session over the pool: each query
/// checks out a pooled connection for its own duration, so the three uniqueness
/// lookups of a sign-up can run in parallel, and `disconnect` ends the session
/// without closing the pool.
#[derive(Debug, Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    /// Create a store over an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a store with its own connection pool
    pub async fn connect_with(config: &PostgresConfig) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))?;

        Ok(Self::new(pool))
    }

    /// Ensures the users table and its unique constraints exist
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id VARCHAR(36) NOT NULL,
                name VARCHAR(255) NOT NULL,
                username VARCHAR(32) NOT NULL,
                email_address VARCHAR(255) NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                CONSTRAINT users_pkey PRIMARY KEY (id),
                CONSTRAINT users_username_key UNIQUE (username),
                CONSTRAINT users_email_address_key UNIQUE (email_address)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create users table: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn connect(&self) -> Result<Box<dyn UserStoreConnection>, DomainError> {
        if self.pool.is_closed() {
            return Err(DomainError::storage("PostgreSQL pool is closed"));
        }

        Ok(Box::new(PostgresUserConnection {
            pool: self.pool.clone(),
            released: AtomicBool::new(false),
        }))
    }
}

/// Per-call session handed out by [`PostgresUserStore`]
#[derive(Debug)]
pub struct PostgresUserConnection {
    pool: PgPool,
    released: AtomicBool,
}

impl PostgresUserConnection {
    fn ensure_open(&self) -> Result<(), DomainError> {
        if self.released.load(Ordering::SeqCst) {
            return Err(DomainError::storage("Connection already released"));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStoreConnection for PostgresUserConnection {
    async fn find_unique(
        &self,
        field: UniqueField,
        value: &str,
    ) -> Result<Option<User>, DomainError> {
        self.ensure_open()?;

        let query = format!(
            r#"
            SELECT id, name, username, email_address, created_at
            FROM users
            WHERE {} = $1
            "#,
            column_for(field)
        );

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get user by {}: {}", field, e)))?;

        Ok(row.as_ref().map(row_to_user))
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        self.ensure_open()?;

        sqlx::query(
            r#"
            INSERT INTO users (id, name, username, email_address, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id())
        .bind(user.name())
        .bind(user.username())
        .bind(user.email_address())
        .bind(user.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let violated = e
                .as_database_error()
                .filter(|db| db.is_unique_violation())
                .and_then(|db| db.constraint())
                .and_then(field_for_constraint);

            match violated {
                Some(field) => DomainError::duplicate(field, user.unique_value(field)),
                None => DomainError::storage(format!("Failed to create user: {}", e)),
            }
        })?;

        Ok(user)
    }

    async fn disconnect(&self) -> Result<(), DomainError> {
        if self.released.swap(true, Ordering::SeqCst) {
            return Err(DomainError::internal("Connection released twice"));
        }

        debug!(
            idle = self.pool.num_idle(),
            size = self.pool.size(),
            "Released user store session"
        );
        Ok(())
    }
}

fn column_for(field: UniqueField) -> &'static str {
    match field {
        UniqueField::Id => "id",
        UniqueField::Username => "username",
        UniqueField::EmailAddress => "email_address",
    }
}

fn field_for_constraint(constraint: &str) -> Option<UniqueField> {
    match constraint {
        PRIMARY_KEY_CONSTRAINT => Some(UniqueField::Id),
        USERNAME_CONSTRAINT => Some(UniqueField::Username),
        EMAIL_ADDRESS_CONSTRAINT => Some(UniqueField::EmailAddress),
        _ => None,
    }
}

fn row_to_user(row: &PgRow) -> User {
    let id: String = row.get("id");
    let name: String = row.get("name");
    let username: String = row.get("username");
    let email_address: String = row.get("email_address");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");

    User::from_parts(id, name, username, email_address, created_at)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_mapping() {
        assert_eq!(column_for(UniqueField::Id), "id");
        assert_eq!(column_for(UniqueField::Username), "username");
        assert_eq!(column_for(UniqueField::EmailAddress), "email_address");
    }

    #[test]
    fn test_constraint_mapping() {
        assert_eq!(field_for_constraint("users_pkey"), Some(UniqueField::Id));
        assert_eq!(
            field_for_constraint("users_username_key"),
            Some(UniqueField::Username)
        );
        assert_eq!(
            field_for_constraint("users_email_address_key"),
            Some(UniqueField::EmailAddress)
        );
        assert_eq!(field_for_constraint("users_name_check"), None);
    }

    #[tokio::test]
    async fn test_session_release_keeps_pool_open() {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/user_directory")
            .unwrap();
        let store = PostgresUserStore::new(pool);

        let connection = store.connect().await.unwrap();
        connection.disconnect().await.unwrap();

        assert!(connection.disconnect().await.is_err());
        assert!(connection
            .find_unique(UniqueField::Id, "a3d1c2b4-5e6f-4a7b-8c9d-0e1f2a3b4c5d")
            .await
            .is_err());

        let next = store.connect().await.unwrap();
        next.disconnect().await.unwrap();
    }
}
