use crate::{AuthError, DocumentStorageError};
use async_trait::async_trait;
use crewgate_types::{StorageRef, UserId};
use serde::Serialize;

/// Account creation against the external identity backend.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create a new identity and return its id. The id namespaces every
    /// document the user subsequently uploads.
    async fn create_identity(&self, email: &str, password: &str)
        -> Result<UserId, AuthError>;
}

/// A storage reference resolved into something an admin can open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewableDocument {
    pub reference: StorageRef,
    pub url: String,
}

/// Namespaced document storage.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Upload one document under the given namespaced key and return the
    /// opaque reference that gets persisted on the profile.
    async fn upload(&self, key: &str, bytes: &[u8])
        -> Result<StorageRef, DocumentStorageError>;

    /// Resolve a stored reference into a viewable handle.
    async fn resolve(
        &self,
        reference: &StorageRef,
    ) -> Result<ViewableDocument, DocumentStorageError>;
}
