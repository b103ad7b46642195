use thiserror::Error;

use super::user::UniqueField;

/// Core domain errors raised by store adapters and infrastructure
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Duplicate {field}: {value}")]
    Duplicate { field: UniqueField, value: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn duplicate(field: UniqueField, value: impl Into<String>) -> Self {
        Self::Duplicate {
            field,
            value: value.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error() {
        let error = DomainError::storage("connection refused");
        assert_eq!(error.to_string(), "Storage error: connection refused");
    }

    #[test]
    fn test_duplicate_error() {
        let error = DomainError::duplicate(UniqueField::EmailAddress, "jane@example.com");
        assert_eq!(error.to_string(), "Duplicate emailAddress: jane@example.com");
    }

    #[test]
    fn test_configuration_error() {
        let error = DomainError::configuration("DATABASE_URL is not set");
        assert_eq!(
            error.to_string(),
            "Configuration error: DATABASE_URL is not set"
        );
    }
}
