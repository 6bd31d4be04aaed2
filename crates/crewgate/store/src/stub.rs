//! Stub backend used when the platform provider is not configured.
//!
//! Keeps local/demo runs non-crashing: every write fails with the uniform
//! not-configured error, every read succeeds with an empty result, so
//! downstream code never has to special-case "not configured".

use crate::traits::VerificationStore;
use crate::{StoreError, StoreResult};
use async_trait::async_trait;
use crewgate_types::{UserId, UserProfile, VerificationStatus};

/// Verification store stub for unconfigured deployments.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubVerificationStore;

impl StubVerificationStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl VerificationStore for StubVerificationStore {
    async fn create(&self, _profile: UserProfile) -> StoreResult<UserId> {
        Err(StoreError::NotConfigured)
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
        Err(StoreError::NotConfigured)
    }
}
