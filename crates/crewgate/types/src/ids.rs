//! Strongly-typed identifiers for crewgate entities.
//!
//! Ids are wrapped in newtype structs so a user id can never be confused
//! with a storage reference in a function signature.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a user profile.
///
/// Assigned by the identity provider at registration and immutable
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn parse(value: &str) -> Result<Self, ParseUserIdError> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| ParseUserIdError(value.to_string()))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a string is not a valid user id.
#[derive(Debug, Error)]
#[error("invalid user id: {0}")]
pub struct ParseUserIdError(pub String);

/// Opaque handle identifying an uploaded document in object storage.
///
/// The core never inspects the contents; the reference is only stored on
/// the profile and resolved back into a viewable handle on demand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageRef(String);

impl StorageRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_generation() {
        let id1 = UserId::generate();
        let id2 = UserId::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_user_id_parse_round_trip() {
        let id = UserId::generate();
        let parsed = UserId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_user_id_parse_rejects_garbage() {
        assert!(UserId::parse("not-a-uuid").is_err());
    }

    #[test]
    fn test_storage_ref_display() {
        let reference = StorageRef::new("abc/doc.pdf");
        assert_eq!(reference.to_string(), "abc/doc.pdf");
    }
}
