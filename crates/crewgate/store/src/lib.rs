//! Durable verification store for crewgate user profiles.
//!
//! This crate defines the single persistence contract of the core:
//! - profile creation at registration time
//! - status-ordered listings for the admin review queue
//! - the one sanctioned writer of `verification_status`
//!
//! Design stance:
//! - `update_status` enforces the lifecycle: only `pending` profiles can
//!   be moved, and only into a terminal state. Re-deciding an already
//!   terminal profile is an error, not a silent overwrite.
//! - PostgreSQL is the transactional backend for configured deployments;
//!   the in-memory adapter exists for tests and local runs; the stub
//!   adapter backs unconfigured (demo) mode.

#![deny(unsafe_code)]

mod error;
mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;
mod stub;
mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryVerificationStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresVerificationStore;
pub use stub::StubVerificationStore;
pub use traits::VerificationStore;
