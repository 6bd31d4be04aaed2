//! Admin verification review queue.
//!
//! The queue is a thin coordination layer over the verification store and
//! object storage: it lists profiles awaiting a decision, executes
//! approve/reject through the store's single status writer, and resolves
//! document references for the reviewer.
//!
//! Discipline: the queue never mutates a local view. After a confirmed
//! write it re-lists from the store, so two concurrent admin sessions can
//! never diverge from the store's actual state; the loser of a race gets
//! an explicit invalid-transition error instead of silently re-deciding.

#![deny(unsafe_code)]

use crewgate_providers::{DocumentStorageError, ObjectStorage, ViewableDocument};
use crewgate_store::{StoreError, VerificationStore};
use crewgate_types::{UserId, UserProfile, VerificationStatus};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Review queue failures.
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("document resolution failed: {0}")]
    Documents(#[from] DocumentStorageError),
}

/// Result of a confirmed admin decision: the committed profile plus the
/// re-listed pending queue.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewOutcome {
    pub decided: UserProfile,
    pub pending: Vec<UserProfile>,
}

/// Resolved document references for one profile.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentListing {
    pub documents: Vec<ViewableDocument>,
    pub total: usize,
}

/// The admin review queue service.
pub struct ReviewQueue {
    store: Arc<dyn VerificationStore>,
    documents: Arc<dyn ObjectStorage>,
}

impl ReviewQueue {
    pub fn new(store: Arc<dyn VerificationStore>, documents: Arc<dyn ObjectStorage>) -> Self {
        Self { store, documents }
    }

    /// Profiles awaiting a decision, newest first.
    pub async fn pending(&self) -> Result<Vec<UserProfile>, ReviewError> {
        Ok(self.store.list_by_status(VerificationStatus::Pending).await?)
    }

    /// Approved profiles, newest first.
    pub async fn verified(&self) -> Result<Vec<UserProfile>, ReviewError> {
        Ok(self
            .store
            .list_by_status(VerificationStatus::Approved)
            .await?)
    }

    /// Approve a pending profile.
    pub async fn approve(&self, id: &UserId) -> Result<ReviewOutcome, ReviewError> {
        self.decide(id, VerificationStatus::Approved).await
    }

    /// Reject a pending profile.
    pub async fn reject(&self, id: &UserId) -> Result<ReviewOutcome, ReviewError> {
        self.decide(id, VerificationStatus::Rejected).await
    }

    async fn decide(
        &self,
        id: &UserId,
        status: VerificationStatus,
    ) -> Result<ReviewOutcome, ReviewError> {
        let decided = self.store.update_status(id, status).await?;
        tracing::info!(user_id = %id, status = %status, "verification decision committed");

        // Refresh from the store, not by local mutation.
        let pending = self.pending().await?;
        Ok(ReviewOutcome { decided, pending })
    }

    /// Resolve the documents of a profile looked up by id.
    pub async fn documents_for(&self, id: &UserId) -> Result<DocumentListing, ReviewError> {
        let profile = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("profile {} not found", id)))?;
        self.resolve_documents(&profile).await
    }

    /// Resolve a profile's stored references into viewable handles.
    pub async fn resolve_documents(
        &self,
        profile: &UserProfile,
    ) -> Result<DocumentListing, ReviewError> {
        let mut documents = Vec::with_capacity(profile.documents.len());
        for reference in &profile.documents {
            documents.push(self.documents.resolve(reference).await?);
        }
        let total = documents.len();
        Ok(DocumentListing { documents, total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crewgate_providers::{HttpObjectStorage, StubObjectStorage};
    use crewgate_store::MemoryVerificationStore;
    use crewgate_types::{Role, StorageRef};

    fn profile(email: &str) -> UserProfile {
        UserProfile::pending(
            UserId::generate(),
            email,
            "Jane",
            "Smith",
            Role::Supervisor,
            vec![StorageRef::new("x/resume.pdf")],
        )
    }

    fn queue(store: Arc<MemoryVerificationStore>) -> ReviewQueue {
        let storage =
            HttpObjectStorage::new(reqwest::Client::new(), "https://api.example.com", "key");
        ReviewQueue::new(store, Arc::new(storage))
    }

    #[tokio::test]
    async fn approve_refreshes_the_pending_queue_from_the_store() {
        let store = Arc::new(MemoryVerificationStore::new());
        let keep = profile("keep@example.com");
        let decide = profile("decide@example.com");
        store.create(keep.clone()).await.unwrap();
        store.create(decide.clone()).await.unwrap();

        let queue = queue(store.clone());
        let outcome = queue.approve(&decide.id).await.unwrap();

        assert_eq!(
            outcome.decided.verification_status,
            VerificationStatus::Approved
        );
        assert_eq!(outcome.pending.len(), 1);
        assert_eq!(outcome.pending[0].email, "keep@example.com");

        let verified = queue.verified().await.unwrap();
        assert_eq!(verified.len(), 1);
        assert_eq!(verified[0].id, decide.id);
    }

    #[tokio::test]
    async fn reject_removes_the_profile_from_both_listings() {
        let store = Arc::new(MemoryVerificationStore::new());
        let decide = profile("decide@example.com");
        store.create(decide.clone()).await.unwrap();

        let queue = queue(store);
        let outcome = queue.reject(&decide.id).await.unwrap();

        assert_eq!(
            outcome.decided.verification_status,
            VerificationStatus::Rejected
        );
        assert!(outcome.pending.is_empty());
        assert!(queue.verified().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn losing_admin_in_a_decision_race_gets_an_explicit_error() {
        let store = Arc::new(MemoryVerificationStore::new());
        let decide = profile("decide@example.com");
        store.create(decide.clone()).await.unwrap();

        let queue = queue(store);
        queue.approve(&decide.id).await.unwrap();

        // A second admin acting on a stale view.
        let err = queue.reject(&decide.id).await.expect_err("must fail");
        assert!(matches!(
            err,
            ReviewError::Store(StoreError::InvalidTransition(_))
        ));

        // The first decision stands.
        let verified = queue.verified().await.unwrap();
        assert_eq!(verified.len(), 1);
    }

    #[tokio::test]
    async fn failed_decision_leaves_the_queue_untouched() {
        let store = Arc::new(MemoryVerificationStore::new());
        let kept = profile("kept@example.com");
        store.create(kept.clone()).await.unwrap();

        let queue = queue(store);
        let err = queue
            .approve(&UserId::generate())
            .await
            .expect_err("unknown profile must fail");
        assert!(matches!(err, ReviewError::Store(StoreError::NotFound(_))));

        assert_eq!(queue.pending().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn document_listing_carries_resolved_handles_and_count() {
        let store = Arc::new(MemoryVerificationStore::new());
        let mut subject = profile("docs@example.com");
        subject.documents = vec![
            StorageRef::new("u/id-card.pdf"),
            StorageRef::new("u/certificate.pdf"),
        ];
        store.create(subject.clone()).await.unwrap();

        let queue = queue(store);
        let listing = queue.resolve_documents(&subject).await.unwrap();
        assert_eq!(listing.total, 2);
        assert!(listing.documents[0].url.contains("id-card.pdf"));
    }

    #[tokio::test]
    async fn documents_for_unknown_profile_is_not_found() {
        let queue = queue(Arc::new(MemoryVerificationStore::new()));
        let err = queue
            .documents_for(&UserId::generate())
            .await
            .expect_err("must fail");
        assert!(matches!(err, ReviewError::Store(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn stub_storage_fails_document_resolution() {
        let store = Arc::new(MemoryVerificationStore::new());
        let subject = profile("docs@example.com");
        let queue = ReviewQueue::new(store, Arc::new(StubObjectStorage));

        let err = queue
            .resolve_documents(&subject)
            .await
            .expect_err("stub must fail");
        assert!(matches!(
            err,
            ReviewError::Documents(DocumentStorageError::NotConfigured)
        ));
    }
}
