//! Role router and verification-gated dashboard access.
//!
//! Dispatch is an exhaustive match over the closed four-role set; there is
//! no default dashboard and no catch-all arm. Unknown, missing, or
//! malformed tokens all land on role selection. Before any dashboard is
//! granted the gate re-checks that the profile's verification status is
//! approved; pending and rejected profiles get their own decisions rather
//! than a render.

#![deny(unsafe_code)]

use crewgate_store::{StoreError, VerificationStore};
use crewgate_types::{Role, UserId, UserProfile, VerificationStatus};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// The four dashboard variants. Exactly one per role; nothing else
/// renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardVariant {
    Labour,
    Supervisor,
    SiteManager,
    Client,
}

impl DashboardVariant {
    /// Parse a route token. Anything outside the closed set is `None`,
    /// which callers turn into a role-selection redirect.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "labour" => Some(DashboardVariant::Labour),
            "supervisor" => Some(DashboardVariant::Supervisor),
            "site_manager" => Some(DashboardVariant::SiteManager),
            "client" => Some(DashboardVariant::Client),
            _ => None,
        }
    }

    pub fn as_token(&self) -> &'static str {
        match self {
            DashboardVariant::Labour => "labour",
            DashboardVariant::Supervisor => "supervisor",
            DashboardVariant::SiteManager => "site_manager",
            DashboardVariant::Client => "client",
        }
    }
}

impl fmt::Display for DashboardVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_token())
    }
}

/// The variant each role is routed to. Exhaustive by construction.
pub fn dashboard_for_role(role: Role) -> DashboardVariant {
    match role {
        Role::Labour => DashboardVariant::Labour,
        Role::Supervisor => DashboardVariant::Supervisor,
        Role::SiteManager => DashboardVariant::SiteManager,
        Role::ClientContractor => DashboardVariant::Client,
    }
}

/// Outcome of an access check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum AccessDecision {
    /// Render the variant for this profile.
    Granted {
        variant: DashboardVariant,
        profile: UserProfile,
    },

    /// Unknown token, unknown user, or a role/dashboard mismatch: back to
    /// role selection.
    SelectRole,

    /// The profile exists but has not been approved yet.
    AwaitingVerification,

    /// The profile was rejected by an admin.
    Rejected,
}

/// Access gate failures (store trouble only; bad input is a decision, not
/// an error).
#[derive(Debug, Error)]
pub enum AccessError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Verification-aware router from an authenticated user and a requested
/// dashboard token to exactly one decision.
pub struct AccessGate {
    store: Arc<dyn VerificationStore>,
}

impl AccessGate {
    pub fn new(store: Arc<dyn VerificationStore>) -> Self {
        Self { store }
    }

    pub async fn authorize(
        &self,
        user_id: &UserId,
        token: &str,
    ) -> Result<AccessDecision, AccessError> {
        let Some(requested) = DashboardVariant::from_token(token) else {
            return Ok(AccessDecision::SelectRole);
        };

        let Some(profile) = self.store.get(user_id).await? else {
            return Ok(AccessDecision::SelectRole);
        };

        match profile.verification_status {
            VerificationStatus::Pending => Ok(AccessDecision::AwaitingVerification),
            VerificationStatus::Rejected => Ok(AccessDecision::Rejected),
            VerificationStatus::Approved => {
                let assigned = dashboard_for_role(profile.role);
                if assigned == requested {
                    Ok(AccessDecision::Granted {
                        variant: assigned,
                        profile,
                    })
                } else {
                    tracing::debug!(
                        user_id = %user_id,
                        requested = %requested,
                        assigned = %assigned,
                        "dashboard request does not match assigned role"
                    );
                    Ok(AccessDecision::SelectRole)
                }
            }
        }
    }
}
