//! Shared domain types for the crewgate workforce core.
//!
//! Everything here is plain data: identifiers, the closed role and
//! verification-status sets, and the persisted user profile. Services and
//! storage backends build on these types; none of them carry behavior
//! beyond parsing and display.

#![deny(unsafe_code)]

mod ids;
mod profile;

pub use ids::{ParseUserIdError, StorageRef, UserId};
pub use profile::{Role, UnknownRoleError, UserProfile, VerificationStatus};
