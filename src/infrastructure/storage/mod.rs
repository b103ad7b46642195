//! Storage infrastructure - User store selection

mod factory;

pub use factory::{StorageConfig, StorageFactory, StorageType};
