//! Stub collaborators used when the platform provider is not configured.

use crate::traits::{IdentityProvider, ObjectStorage, ViewableDocument};
use crate::{AuthError, DocumentStorageError};
use async_trait::async_trait;
use crewgate_types::{StorageRef, UserId};

/// Identity provider stub: every call fails with the uniform
/// not-configured error.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubIdentityProvider;

#[async_trait]
impl IdentityProvider for StubIdentityProvider {
    async fn create_identity(
        &self,
        _email: &str,
        _password: &str,
    ) -> Result<UserId, AuthError> {
        Err(AuthError::NotConfigured)
    }
}

/// Object storage stub: uploads and resolution both fail with the uniform
/// not-configured error.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubObjectStorage;

#[async_trait]
impl ObjectStorage for StubObjectStorage {
    async fn upload(
        &self,
        _key: &str,
        _bytes: &[u8],
    ) -> Result<StorageRef, DocumentStorageError> {
        Err(DocumentStorageError::NotConfigured)
    }

    async fn resolve(
        &self,
        _reference: &StorageRef,
    ) -> Result<ViewableDocument, DocumentStorageError> {
        Err(DocumentStorageError::NotConfigured)
    }
}
