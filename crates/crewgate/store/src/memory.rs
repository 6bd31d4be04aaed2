//! In-memory reference implementation of the verification store.
//!
//! Deterministic and test-friendly. Production deployments should use the
//! PostgreSQL backend for source-of-truth data.

use crate::traits::VerificationStore;
use crate::{StoreError, StoreResult};
use async_trait::async_trait;
use crewgate_types::{UserId, UserProfile, VerificationStatus};
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

/// In-memory verification store adapter.
#[derive(Default)]
pub struct MemoryVerificationStore {
    profiles: RwLock<HashMap<UserId, UserProfile>>,
    emails: RwLock<HashSet<String>>,
}

impl MemoryVerificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of profiles currently stored.
    pub fn len(&self) -> usize {
        self.profiles.read().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl VerificationStore for MemoryVerificationStore {
    async fn create(&self, profile: UserProfile) -> StoreResult<UserId> {
        let mut emails = self
            .emails
            .write()
            .map_err(|_| StoreError::Backend("email index lock poisoned".to_string()))?;
        let mut profiles = self
            .profiles
            .write()
            .map_err(|_| StoreError::Backend("profiles lock poisoned".to_string()))?;

        if profiles.contains_key(&profile.id) {
            return Err(StoreError::Conflict(format!(
                "profile {} already exists",
                profile.id
            )));
        }
        if !emails.insert(profile.email.clone()) {
            return Err(StoreError::Conflict(format!(
                "email {} already registered",
                profile.email
            )));
        }

        let id = profile.id;
        profiles.insert(id, profile);
        Ok(id)
    }

    async fn get(&self, id: &UserId) -> StoreResult<Option<UserProfile>> {
        let profiles = self
            .profiles
            .read()
            .map_err(|_| StoreError::Backend("profiles lock poisoned".to_string()))?;
        Ok(profiles.get(id).cloned())
    }

    async fn list_by_status(
        &self,
        status: VerificationStatus,
    ) -> StoreResult<Vec<UserProfile>> {
        let profiles = self
            .profiles
            .read()
            .map_err(|_| StoreError::Backend("profiles lock poisoned".to_string()))?;
        let mut matching = profiles
            .values()
            .filter(|p| p.verification_status == status)
            .cloned()
            .collect::<Vec<_>>();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn update_status(
        &self,
        id: &UserId,
        new_status: VerificationStatus,
    ) -> StoreResult<UserProfile> {
        let mut profiles = self
            .profiles
            .write()
            .map_err(|_| StoreError::Backend("profiles lock poisoned".to_string()))?;
        let profile = profiles
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("profile {} not found", id)))?;

        if profile.verification_status.is_terminal() || !new_status.is_terminal() {
            return Err(StoreError::InvalidTransition(format!(
                "cannot move profile {} from {} to {}",
                id, profile.verification_status, new_status
            )));
        }

        profile.verification_status = new_status;
        Ok(profile.clone())
    }
}
