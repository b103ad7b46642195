//! Infrastructure layer - Logging, storage selection and user store adapters

pub mod logging;
pub mod storage;
pub mod user;
