//! User directory
//!
//! Registers users whose id, username and email address are unique:
//! - Field validation with fixed precedence
//! - Concurrent uniqueness lookups over a per-call store connection
//! - In-memory and PostgreSQL user stores

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use api::state::AppState;
use infrastructure::storage::StorageFactory;
use tracing::info;

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    info!(backend = %config.storage.backend, "Creating user store");

    let store = StorageFactory::create_user_store(&config.storage).await?;

    Ok(AppState::from_store(store))
}
