//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Keys under which a user record is unique
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UniqueField {
    Id,
    Username,
    EmailAddress,
}

impl UniqueField {
    /// Field name as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Username => "username",
            Self::EmailAddress => "emailAddress",
        }
    }
}

impl std::fmt::Display for UniqueField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Candidate submitted for registration, not yet validated or persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpCandidate {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email_address: String,
}

impl SignUpCandidate {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        username: impl Into<String>,
        email_address: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            username: username.into(),
            email_address: email_address.into(),
        }
    }

    /// Value of one of the unique keys
    pub fn unique_value(&self, field: UniqueField) -> &str {
        match field {
            UniqueField::Id => &self.id,
            UniqueField::Username => &self.username,
            UniqueField::EmailAddress => &self.email_address,
        }
    }
}

/// Persisted user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Primary unique key (UUID string)
    id: String,
    /// Display name
    name: String,
    /// Unique handle
    username: String,
    /// Unique contact address
    email_address: String,
    /// Server-assigned creation timestamp
    created_at: DateTime<Utc>,
}

impl User {
    /// Build a new record from a candidate, stamped with the current time
    pub fn new(candidate: SignUpCandidate) -> Self {
        Self::from_parts(
            candidate.id,
            candidate.name,
            candidate.username,
            candidate.email_address,
            Utc::now(),
        )
    }

    /// Restore a record read back from a store
    pub fn from_parts(
        id: impl Into<String>,
        name: impl Into<String>,
        username: impl Into<String>,
        email_address: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            username: username.into(),
            email_address: email_address.into(),
            created_at,
        }
    }

    // Getters

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email_address(&self) -> &str {
        &self.email_address
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Value of one of the unique keys
    pub fn unique_value(&self, field: UniqueField) -> &str {
        match field {
            UniqueField::Id => &self.id,
            UniqueField::Username => &self.username,
            UniqueField::EmailAddress => &self.email_address,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> SignUpCandidate {
        SignUpCandidate::new(
            "a3d1c2b4-5e6f-4a7b-8c9d-0e1f2a3b4c5d",
            "Jane Doe",
            "janedoe",
            "jane@example.com",
        )
    }

    #[test]
    fn test_user_from_candidate() {
        let before = Utc::now();
        let user = User::new(jane());

        assert_eq!(user.id(), "a3d1c2b4-5e6f-4a7b-8c9d-0e1f2a3b4c5d");
        assert_eq!(user.name(), "Jane Doe");
        assert_eq!(user.username(), "janedoe");
        assert_eq!(user.email_address(), "jane@example.com");
        assert!(user.created_at() >= before);
    }

    #[test]
    fn test_unique_values() {
        let candidate = jane();
        let user = User::new(candidate.clone());

        for field in [UniqueField::Id, UniqueField::Username, UniqueField::EmailAddress] {
            assert_eq!(candidate.unique_value(field), user.unique_value(field));
        }
    }

    #[test]
    fn test_candidate_deserializes_camel_case() {
        let json = r#"{
            "id": "a3d1c2b4-5e6f-4a7b-8c9d-0e1f2a3b4c5d",
            "name": "Jane Doe",
            "username": "janedoe",
            "emailAddress": "jane@example.com"
        }"#;

        let candidate: SignUpCandidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate, jane());
    }

    #[test]
    fn test_user_serialization() {
        let user = User::new(jane());
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["emailAddress"], "jane@example.com");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_unique_field_display() {
        assert_eq!(UniqueField::Id.to_string(), "id");
        assert_eq!(UniqueField::Username.to_string(), "username");
        assert_eq!(UniqueField::EmailAddress.to_string(), "emailAddress");
    }
}
