//! The registration service.

use crate::{RegistrationError, ValidationError};
use crewgate_providers::{IdentityProvider, ObjectStorage, Providers};
use crewgate_store::VerificationStore;
use crewgate_types::{Role, StorageRef, UserId, UserProfile};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use uuid::Uuid;

/// What happens when an individual document upload fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadPolicy {
    /// Skip the failed document and continue. The profile may end up with
    /// fewer documents than were submitted, down to none.
    #[default]
    BestEffort,

    /// Abort the registration on the first failed upload. Documents
    /// uploaded before the failure are not deleted.
    AllOrNothing,
}

/// One document submitted with the registration form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentUpload {
    pub file_name: String,
    pub content: Vec<u8>,
}

/// The registration form as the core receives it. `role` stays a string
/// until validation so an out-of-set value is a field error, not a
/// deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub documents: Vec<DocumentUpload>,
}

const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Drives the validated registration sequence against the injected
/// collaborators.
pub struct RegistrationService {
    identity: Arc<dyn IdentityProvider>,
    documents: Arc<dyn ObjectStorage>,
    store: Arc<dyn VerificationStore>,
    policy: UploadPolicy,
    call_timeout: Duration,
    shutdown: Option<watch::Receiver<bool>>,
}

impl RegistrationService {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        documents: Arc<dyn ObjectStorage>,
        store: Arc<dyn VerificationStore>,
    ) -> Self {
        Self {
            identity,
            documents,
            store,
            policy: UploadPolicy::default(),
            call_timeout: DEFAULT_CALL_TIMEOUT,
            shutdown: None,
        }
    }

    /// Build from a resolved provider bundle.
    pub fn from_providers(providers: &Providers) -> Self {
        Self::new(
            providers.identity.clone(),
            providers.documents.clone(),
            providers.store.clone(),
        )
    }

    pub fn with_policy(mut self, policy: UploadPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Observe the daemon's shutdown signal; an in-flight registration is
    /// cancelled when it fires.
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    /// Run the full registration sequence and return the persisted
    /// pending profile.
    pub async fn register(
        &self,
        request: RegistrationRequest,
    ) -> Result<UserProfile, RegistrationError> {
        let role = Self::validate(&request)?;

        let user_id = self
            .bounded(
                "identity creation",
                self.identity.create_identity(&request.email, &request.password),
            )
            .await?
            .map_err(RegistrationError::Auth)?;

        // Uploads are keyed by the id from the step above, strictly after
        // it, and issued sequentially in form order.
        let mut references: Vec<StorageRef> = Vec::with_capacity(request.documents.len());
        for document in &request.documents {
            let key = document_key(&user_id, &document.file_name);
            let outcome = self
                .bounded(
                    "document upload",
                    self.documents.upload(&key, &document.content),
                )
                .await?;
            match outcome {
                Ok(reference) => references.push(reference),
                Err(err) => match self.policy {
                    UploadPolicy::BestEffort => {
                        tracing::warn!(
                            document = %document.file_name,
                            error = %err,
                            "skipping failed document upload"
                        );
                    }
                    UploadPolicy::AllOrNothing => {
                        return Err(RegistrationError::DocumentUpload(err));
                    }
                },
            }
        }

        let profile = UserProfile::pending(
            user_id,
            &request.email,
            &request.first_name,
            &request.last_name,
            role,
            references,
        );

        // Failure here orphans the uploaded documents; there is no
        // compensating delete.
        self.bounded("profile persistence", self.store.create(profile.clone()))
            .await??;

        tracing::info!(user_id = %profile.id, role = %profile.role, "registered pending profile");
        Ok(profile)
    }

    /// Ordered validation gate. No collaborator is touched until every
    /// check passes.
    fn validate(request: &RegistrationRequest) -> Result<Role, ValidationError> {
        if request.password != request.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        let role = request
            .role
            .parse::<Role>()
            .map_err(|e| ValidationError::UnknownRole(e.0))?;
        if request.documents.is_empty() {
            return Err(ValidationError::NoDocuments);
        }
        Ok(role)
    }

    /// Bound one collaborator call by the configured timeout and the
    /// shutdown signal. A fired (or dropped) shutdown channel cancels the
    /// in-flight call.
    async fn bounded<T, F>(
        &self,
        operation: &'static str,
        fut: F,
    ) -> Result<T, RegistrationError>
    where
        F: Future<Output = T>,
    {
        let deadline = tokio::time::timeout(self.call_timeout, fut);
        match self.shutdown.clone() {
            Some(mut shutdown) => {
                if *shutdown.borrow() {
                    return Err(RegistrationError::Cancelled);
                }
                tokio::select! {
                    _ = shutdown.changed() => Err(RegistrationError::Cancelled),
                    result = deadline => {
                        result.map_err(|_| RegistrationError::Timeout { operation })
                    }
                }
            }
            None => deadline
                .await
                .map_err(|_| RegistrationError::Timeout { operation }),
        }
    }
}

fn document_key(user_id: &UserId, file_name: &str) -> String {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
        .unwrap_or("bin");
    format!("{}/{}.{}", user_id, Uuid::new_v4(), extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crewgate_providers::{AuthError, DocumentStorageError, ViewableDocument};
    use crewgate_store::{MemoryVerificationStore, StoreError, StoreResult};
    use crewgate_types::VerificationStatus;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingIdentityProvider {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl IdentityProvider for CountingIdentityProvider {
        async fn create_identity(
            &self,
            _email: &str,
            _password: &str,
        ) -> Result<UserId, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(AuthError::Rejected("signup disabled".to_string()))
            } else {
                Ok(UserId::generate())
            }
        }
    }

    struct HangingIdentityProvider;

    #[async_trait]
    impl IdentityProvider for HangingIdentityProvider {
        async fn create_identity(
            &self,
            _email: &str,
            _password: &str,
        ) -> Result<UserId, AuthError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(UserId::generate())
        }
    }

    /// Fails uploads whose position is listed in `fail_at`.
    #[derive(Default)]
    struct FlakyObjectStorage {
        calls: AtomicUsize,
        fail_at: Vec<usize>,
    }

    #[async_trait]
    impl ObjectStorage for FlakyObjectStorage {
        async fn upload(
            &self,
            key: &str,
            _bytes: &[u8],
        ) -> Result<StorageRef, DocumentStorageError> {
            let index = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_at.contains(&index) {
                Err(DocumentStorageError::UploadFailed("bucket refused".to_string()))
            } else {
                Ok(StorageRef::new(key))
            }
        }

        async fn resolve(
            &self,
            reference: &StorageRef,
        ) -> Result<ViewableDocument, DocumentStorageError> {
            Ok(ViewableDocument {
                reference: reference.clone(),
                url: format!("https://storage.test/{}", reference),
            })
        }
    }

    /// Store whose writes always fail with a backend error.
    #[derive(Default)]
    struct BrokenStore;

    #[async_trait]
    impl VerificationStore for BrokenStore {
        async fn create(&self, _profile: UserProfile) -> StoreResult<UserId> {
            Err(StoreError::Backend("connection reset".to_string()))
        }

        async fn get(&self, _id: &UserId) -> StoreResult<Option<UserProfile>> {
            Ok(None)
        }

        async fn list_by_status(
            &self,
            _status: VerificationStatus,
        ) -> StoreResult<Vec<UserProfile>> {
            Ok(Vec::new())
        }

        async fn update_status(
            &self,
            _id: &UserId,
            _new_status: VerificationStatus,
        ) -> StoreResult<UserProfile> {
            Err(StoreError::Backend("connection reset".to_string()))
        }
    }

    fn request(docs: usize) -> RegistrationRequest {
        RegistrationRequest {
            email: "worker@example.com".to_string(),
            password: "hunter22".to_string(),
            confirm_password: "hunter22".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            role: "labour".to_string(),
            documents: (0..docs)
                .map(|i| DocumentUpload {
                    file_name: format!("doc-{}.pdf", i),
                    content: vec![0u8; 16],
                })
                .collect(),
        }
    }

    fn service(
        identity: Arc<CountingIdentityProvider>,
        storage: Arc<FlakyObjectStorage>,
        store: Arc<MemoryVerificationStore>,
    ) -> RegistrationService {
        RegistrationService::new(identity, storage, store)
    }

    #[tokio::test]
    async fn password_mismatch_fails_before_any_collaborator_call() {
        let identity = Arc::new(CountingIdentityProvider::default());
        let storage = Arc::new(FlakyObjectStorage::default());
        let store = Arc::new(MemoryVerificationStore::new());
        let svc = service(identity.clone(), storage.clone(), store.clone());

        let mut req = request(2);
        req.confirm_password = "different".to_string();
        let err = svc.register(req).await.expect_err("must fail validation");

        assert!(matches!(
            err,
            RegistrationError::Validation(ValidationError::PasswordMismatch)
        ));
        assert_eq!(identity.calls.load(Ordering::SeqCst), 0);
        assert_eq!(storage.calls.load(Ordering::SeqCst), 0);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn unknown_role_fails_before_any_network_call() {
        let identity = Arc::new(CountingIdentityProvider::default());
        let storage = Arc::new(FlakyObjectStorage::default());
        let store = Arc::new(MemoryVerificationStore::new());
        let svc = service(identity.clone(), storage.clone(), store);

        for bad_role in ["intern", ""] {
            let mut req = request(1);
            req.role = bad_role.to_string();
            let err = svc.register(req).await.expect_err("must fail validation");
            match err {
                RegistrationError::Validation(ValidationError::UnknownRole(value)) => {
                    assert_eq!(value, bad_role);
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
        assert_eq!(identity.calls.load(Ordering::SeqCst), 0);
        assert_eq!(storage.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_document_list_is_rejected() {
        let svc = service(
            Arc::new(CountingIdentityProvider::default()),
            Arc::new(FlakyObjectStorage::default()),
            Arc::new(MemoryVerificationStore::new()),
        );
        let err = svc.register(request(0)).await.expect_err("must fail");
        assert!(matches!(
            err,
            RegistrationError::Validation(ValidationError::NoDocuments)
        ));
    }

    #[tokio::test]
    async fn successful_registration_persists_a_pending_profile() {
        let store = Arc::new(MemoryVerificationStore::new());
        let svc = service(
            Arc::new(CountingIdentityProvider::default()),
            Arc::new(FlakyObjectStorage::default()),
            store.clone(),
        );

        let profile = svc.register(request(2)).await.unwrap();
        assert_eq!(profile.verification_status, VerificationStatus::Pending);
        assert_eq!(profile.documents.len(), 2);

        let stored = store.get(&profile.id).await.unwrap().unwrap();
        assert_eq!(stored.documents, profile.documents);
        assert_eq!(stored.role, Role::Labour);
    }

    #[tokio::test]
    async fn best_effort_skips_failed_uploads_and_keeps_the_rest() {
        let storage = Arc::new(FlakyObjectStorage {
            calls: AtomicUsize::new(0),
            fail_at: vec![1],
        });
        let store = Arc::new(MemoryVerificationStore::new());
        let svc = service(
            Arc::new(CountingIdentityProvider::default()),
            storage.clone(),
            store,
        );

        let profile = svc.register(request(3)).await.unwrap();
        assert_eq!(profile.documents.len(), 2);
        assert_eq!(storage.calls.load(Ordering::SeqCst), 3);
    }

    // Policy decision, not a guaranteed bug: under best effort a profile
    // whose every upload failed is still created, with no documents.
    #[tokio::test]
    async fn best_effort_allows_a_zero_document_profile() {
        let storage = Arc::new(FlakyObjectStorage {
            calls: AtomicUsize::new(0),
            fail_at: vec![0, 1],
        });
        let store = Arc::new(MemoryVerificationStore::new());
        let svc = service(
            Arc::new(CountingIdentityProvider::default()),
            storage,
            store.clone(),
        );

        let profile = svc.register(request(2)).await.unwrap();
        assert!(profile.documents.is_empty());
        assert_eq!(
            store.get(&profile.id).await.unwrap().unwrap().verification_status,
            VerificationStatus::Pending
        );
    }

    #[tokio::test]
    async fn all_or_nothing_aborts_on_first_failed_upload() {
        let storage = Arc::new(FlakyObjectStorage {
            calls: AtomicUsize::new(0),
            fail_at: vec![1],
        });
        let store = Arc::new(MemoryVerificationStore::new());
        let svc = service(
            Arc::new(CountingIdentityProvider::default()),
            storage.clone(),
            store.clone(),
        )
        .with_policy(UploadPolicy::AllOrNothing);

        let err = svc.register(request(3)).await.expect_err("must abort");
        assert!(matches!(err, RegistrationError::DocumentUpload(_)));
        // The third upload was never attempted and nothing was persisted.
        assert_eq!(storage.calls.load(Ordering::SeqCst), 2);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn identity_failure_aborts_before_any_upload() {
        let identity = Arc::new(CountingIdentityProvider {
            calls: AtomicUsize::new(0),
            fail: true,
        });
        let storage = Arc::new(FlakyObjectStorage::default());
        let svc = service(identity, storage.clone(), Arc::new(MemoryVerificationStore::new()));

        let err = svc.register(request(2)).await.expect_err("must fail");
        assert!(matches!(err, RegistrationError::Auth(AuthError::Rejected(_))));
        assert_eq!(storage.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn persistence_failure_surfaces_after_uploads() {
        let storage = Arc::new(FlakyObjectStorage::default());
        let svc = RegistrationService::new(
            Arc::new(CountingIdentityProvider::default()),
            storage.clone(),
            Arc::new(BrokenStore),
        );

        let err = svc.register(request(2)).await.expect_err("must fail");
        assert!(matches!(err, RegistrationError::Persistence(_)));
        // The uploads already happened; those objects are now orphaned.
        assert_eq!(storage.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_identity_provider_times_out() {
        let svc = RegistrationService::new(
            Arc::new(HangingIdentityProvider),
            Arc::new(FlakyObjectStorage::default()),
            Arc::new(MemoryVerificationStore::new()),
        )
        .with_call_timeout(Duration::from_millis(100));

        let err = svc.register(request(1)).await.expect_err("must time out");
        match err {
            RegistrationError::Timeout { operation } => {
                assert_eq!(operation, "identity creation");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn fired_shutdown_signal_cancels_registration() {
        let (tx, rx) = watch::channel(false);
        let svc = RegistrationService::new(
            Arc::new(HangingIdentityProvider),
            Arc::new(FlakyObjectStorage::default()),
            Arc::new(MemoryVerificationStore::new()),
        )
        .with_shutdown(rx);

        let handle = tokio::spawn(async move { svc.register(request(1)).await });
        tokio::task::yield_now().await;
        tx.send(true).unwrap();

        let err = handle.await.unwrap().expect_err("must be cancelled");
        assert!(matches!(err, RegistrationError::Cancelled));
    }

    #[test]
    fn document_keys_are_namespaced_by_user_and_keep_the_extension() {
        let user = UserId::generate();
        let key = document_key(&user, "aadhar-card.pdf");
        assert!(key.starts_with(&format!("{}/", user)));
        assert!(key.ends_with(".pdf"));

        let key = document_key(&user, "no-extension");
        assert!(key.ends_with(".bin"));
    }
}
