//! HTTP implementations speaking the platform provider's REST API.

use crate::traits::{IdentityProvider, ObjectStorage, ViewableDocument};
use crate::{AuthError, DocumentStorageError};
use async_trait::async_trait;
use crewgate_types::{StorageRef, UserId};
use serde::Deserialize;
use uuid::Uuid;

const DOCUMENTS_BUCKET: &str = "documents";

/// Identity provider backed by the platform's auth endpoint.
#[derive(Debug, Clone)]
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    endpoint: String,
    access_key: String,
}

#[derive(Debug, Deserialize)]
struct SignupResponse {
    id: Uuid,
}

impl HttpIdentityProvider {
    pub fn new(client: reqwest::Client, endpoint: &str, access_key: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            access_key: access_key.to_string(),
        }
    }

    fn signup_url(&self) -> String {
        format!("{}/auth/v1/signup", self.endpoint)
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn create_identity(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserId, AuthError> {
        let response = self
            .client
            .post(self.signup_url())
            .header("apikey", &self.access_key)
            .bearer_auth(&self.access_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Rejected(format!("{}: {}", status, body)));
        }

        let body: SignupResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Rejected(format!("malformed signup response: {}", e)))?;

        Ok(UserId::from_uuid(body.id))
    }
}

/// Document storage backed by the platform's object-storage endpoint.
///
/// Uploads live in the `documents` bucket; resolution builds the public
/// object URL without a network round trip.
#[derive(Debug, Clone)]
pub struct HttpObjectStorage {
    client: reqwest::Client,
    endpoint: String,
    access_key: String,
}

impl HttpObjectStorage {
    pub fn new(client: reqwest::Client, endpoint: &str, access_key: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            access_key: access_key.to_string(),
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.endpoint, DOCUMENTS_BUCKET, key)
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.endpoint, DOCUMENTS_BUCKET, key
        )
    }
}

#[async_trait]
impl ObjectStorage for HttpObjectStorage {
    async fn upload(
        &self,
        key: &str,
        bytes: &[u8],
    ) -> Result<StorageRef, DocumentStorageError> {
        let response = self
            .client
            .post(self.object_url(key))
            .header("apikey", &self.access_key)
            .bearer_auth(&self.access_key)
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(|e| DocumentStorageError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DocumentStorageError::UploadFailed(format!(
                "{}: {}",
                status, body
            )));
        }

        Ok(StorageRef::new(key))
    }

    async fn resolve(
        &self,
        reference: &StorageRef,
    ) -> Result<ViewableDocument, DocumentStorageError> {
        Ok(ViewableDocument {
            reference: reference.clone(),
            url: self.public_url(reference.as_str()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_trailing_slash_is_normalized() {
        let client = reqwest::Client::new();
        let provider = HttpIdentityProvider::new(client, "https://api.example.com/", "key");
        assert_eq!(provider.signup_url(), "https://api.example.com/auth/v1/signup");
    }

    #[tokio::test]
    async fn resolve_builds_the_public_object_url() {
        let client = reqwest::Client::new();
        let storage = HttpObjectStorage::new(client, "https://api.example.com", "key");
        let reference = StorageRef::new("user-1/doc.pdf");

        let viewable = storage.resolve(&reference).await.unwrap();
        assert_eq!(
            viewable.url,
            "https://api.example.com/storage/v1/object/public/documents/user-1/doc.pdf"
        );
        assert_eq!(viewable.reference, reference);
    }
}
