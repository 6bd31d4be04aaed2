//! User profile record and its closed enums.

use crate::ids::{StorageRef, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The four workforce roles. Set once at registration and immutable
/// thereafter; there is no fifth value and no catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Labour,
    Supervisor,
    SiteManager,
    ClientContractor,
}

impl Role {
    /// All members of the closed role set, in registration-form order.
    pub const ALL: [Role; 4] = [
        Role::Labour,
        Role::Supervisor,
        Role::SiteManager,
        Role::ClientContractor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Labour => "labour",
            Role::Supervisor => "supervisor",
            Role::SiteManager => "site_manager",
            Role::ClientContractor => "client_contractor",
        }
    }
}

impl FromStr for Role {
    type Err = UnknownRoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "labour" => Ok(Role::Labour),
            "supervisor" => Ok(Role::Supervisor),
            "site_manager" => Ok(Role::SiteManager),
            "client_contractor" => Ok(Role::ClientContractor),
            other => Err(UnknownRoleError(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a string is not a member of the role set.
#[derive(Debug, Error)]
#[error("unknown role: {0}")]
pub struct UnknownRoleError(pub String);

/// Lifecycle state of a profile. Starts at `Pending`; only the admin
/// review queue moves it, and only into a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Pending,
    Approved,
    Rejected,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Approved => "approved",
            VerificationStatus::Rejected => "rejected",
        }
    }

    /// Approved and rejected are terminal; no transition leaves them.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, VerificationStatus::Pending)
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One applicant/worker account as persisted in the verification store.
///
/// Every field except `verification_status` is immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub verification_status: VerificationStatus,
    /// Ordered storage references for the uploaded documents.
    pub documents: Vec<StorageRef>,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// Build a freshly registered profile: status pending, creation time
    /// stamped now.
    pub fn pending(
        id: UserId,
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        role: Role,
        documents: Vec<StorageRef>,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            role,
            verification_status: VerificationStatus::Pending,
            documents,
            created_at: Utc::now(),
        }
    }
}
