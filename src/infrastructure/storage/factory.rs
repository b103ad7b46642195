//! Storage factory for runtime user store selection

use std::sync::Arc;

use tracing::info;

use crate::config::StorageSettings;
use crate::domain::user::UserStore;
use crate::domain::DomainError;
use crate::infrastructure::user::{InMemoryUserStore, PostgresConfig, PostgresUserStore};

/// Supported storage types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl StorageType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Resolved storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    InMemory,
    Postgres(PostgresConfig),
}

impl StorageConfig {
    /// Resolves the backend named in the settings
    ///
    /// PostgreSQL requires a database URL, either configured or taken from
    /// `DATABASE_URL`.
    pub fn from_settings(settings: &StorageSettings) -> Result<Self, DomainError> {
        let storage_type = StorageType::from_str(&settings.backend).ok_or_else(|| {
            DomainError::configuration(format!("Unknown storage backend: {}", settings.backend))
        })?;

        match storage_type {
            StorageType::InMemory => Ok(Self::InMemory),
            StorageType::Postgres => {
                let url = settings.resolve_database_url().ok_or_else(|| {
                    DomainError::configuration(
                        "PostgreSQL storage requires storage.database_url or DATABASE_URL",
                    )
                })?;

                Ok(Self::Postgres(PostgresConfig {
                    url,
                    max_connections: settings.max_connections,
                    min_connections: settings.min_connections,
                    connect_timeout_secs: settings.connect_timeout_secs,
                    idle_timeout_secs: settings.idle_timeout_secs,
                }))
            }
        }
    }
}

/// Factory for creating user stores
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates the user store selected by the settings
    pub async fn create_user_store(
        settings: &StorageSettings,
    ) -> Result<Arc<dyn UserStore>, DomainError> {
        Self::create(&StorageConfig::from_settings(settings)?).await
    }

    /// Creates a user store for a resolved configuration
    pub async fn create(config: &StorageConfig) -> Result<Arc<dyn UserStore>, DomainError> {
        match config {
            StorageConfig::InMemory => {
                info!("Using in-memory user store");
                Ok(Arc::new(InMemoryUserStore::new()))
            }
            StorageConfig::Postgres(pg_config) => {
                info!(
                    max_connections = pg_config.max_connections,
                    "Using PostgreSQL user store"
                );
                let store = PostgresUserStore::connect_with(pg_config).await?;
                store.ensure_schema().await?;
                Ok(Arc::new(store))
            }
        }
    }
}
