use crate::StoreResult;
use async_trait::async_trait;
use crewgate_types::{UserId, UserProfile, VerificationStatus};

/// Persistence contract for user profiles.
///
/// `update_status` is the only writer of `verification_status`; every
/// other field is immutable after `create`. Updates touch exactly one row,
/// so per-row atomicity is the only mutation discipline a backend must
/// provide.
#[async_trait]
pub trait VerificationStore: Send + Sync {
    /// Insert a newly registered profile. Fails with `Conflict` when the
    /// id or email is already taken.
    async fn create(&self, profile: UserProfile) -> StoreResult<UserId>;

    /// Fetch one profile by id.
    async fn get(&self, id: &UserId) -> StoreResult<Option<UserProfile>>;

    /// List profiles in the given state, newest first.
    async fn list_by_status(
        &self,
        status: VerificationStatus,
    ) -> StoreResult<Vec<UserProfile>>;

    /// Move a pending profile into a terminal state and return the
    /// committed row.
    ///
    /// The only legal transitions are `pending -> approved` and
    /// `pending -> rejected`; anything else fails with
    /// `InvalidTransition` and leaves the row untouched.
    async fn update_status(
        &self,
        id: &UserId,
        new_status: VerificationStatus,
    ) -> StoreResult<UserProfile>;
}
