//! Crewgate REST daemon library.
//!
//! Components of the `crewgated` binary:
//! - REST API handlers for signup, the admin review queue, and
//!   role-gated dashboard access
//! - configuration loading and one-shot provider resolution
//! - server lifecycle management

pub mod api;
pub mod config;
pub mod error;
pub mod server;

pub use config::ServiceConfig;
pub use error::{ApiError, DaemonError};
pub use server::Server;
