//! Domain metric tables, one per dashboard variant.
//!
//! Each dashboard supplies only its snapshot type and cutoff constants;
//! the evaluator in [`crate::engine`] does the rest.

mod client;
mod labour;
mod site_manager;
mod supervisor;

pub use client::ClientProjectSnapshot;
pub use labour::LabourSnapshot;
pub use site_manager::ProjectOversightSnapshot;
pub use supervisor::TeamSnapshot;

use crate::engine::{derive_status, StatusReport};
use serde::{Deserialize, Serialize};

/// A dashboard metrics snapshot, tagged by domain on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", rename_all = "snake_case")]
pub enum MetricsSnapshot {
    Labour(LabourSnapshot),
    Supervisor(TeamSnapshot),
    SiteManager(ProjectOversightSnapshot),
    Client(ClientProjectSnapshot),
}

impl MetricsSnapshot {
    /// Route token of the dashboard this snapshot belongs to.
    pub fn domain_token(&self) -> &'static str {
        match self {
            MetricsSnapshot::Labour(_) => "labour",
            MetricsSnapshot::Supervisor(_) => "supervisor",
            MetricsSnapshot::SiteManager(_) => "site_manager",
            MetricsSnapshot::Client(_) => "client",
        }
    }

    /// Derive the status report for this snapshot's domain table.
    pub fn derive(&self) -> StatusReport {
        let rows = match self {
            MetricsSnapshot::Labour(snapshot) => labour::rows(snapshot),
            MetricsSnapshot::Supervisor(snapshot) => supervisor::rows(snapshot),
            MetricsSnapshot::SiteManager(snapshot) => site_manager::rows(snapshot),
            MetricsSnapshot::Client(snapshot) => client::rows(snapshot),
        };
        derive_status(&rows)
    }
}
