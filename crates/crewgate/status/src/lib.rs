//! Status derivation engine shared by the crewgate dashboards.
//!
//! One deterministic evaluator, four domain metric tables. Each dashboard
//! contributes only its own ordered table of metric rows (value, two
//! thresholds, per-tier messages, optional action text); the evaluator
//! turns a table into severity-tagged status items plus a worst-wins
//! aggregate. Nothing here is persisted: a report is computed per render
//! and discarded.

#![deny(unsafe_code)]

mod domains;
mod engine;

pub use domains::{
    ClientProjectSnapshot, LabourSnapshot, MetricsSnapshot, ProjectOversightSnapshot,
    TeamSnapshot,
};
pub use engine::{
    derive_status, MetricRow, Severity, StatusItem, StatusReport, Thresholds, TierActions,
    TierCounts, TierMessages,
};
