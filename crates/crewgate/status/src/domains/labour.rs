//! Labour profile status table.

use crate::engine::{MetricRow, Thresholds, TierActions, TierMessages};
use serde::{Deserialize, Serialize};

/// Metrics snapshot for one labour worker's profile dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabourSnapshot {
    pub total_budget: f64,
    pub amount_paid: f64,
    /// Documents uploaded and awaiting admin review.
    pub pending_documents: u32,
    /// Documents the worker still has to submit.
    pub required_documents: u32,
    /// Performance rating on the 0-5 scale.
    pub rating: f64,
    pub on_site: bool,
}

impl LabourSnapshot {
    pub fn payment_percent(&self) -> f64 {
        if self.total_budget > 0.0 {
            (self.amount_paid / self.total_budget) * 100.0
        } else {
            0.0
        }
    }
}

pub(crate) fn rows(snapshot: &LabourSnapshot) -> Vec<MetricRow> {
    let payment = MetricRow {
        section: "Payment Status".to_string(),
        value: snapshot.payment_percent(),
        thresholds: Thresholds::HigherIsBetter {
            good_min: 90.0,
            warning_min: 70.0,
        },
        messages: TierMessages {
            good: "Payments up to date".to_string(),
            warning: "Payment partially pending".to_string(),
            critical: "Significant payment pending".to_string(),
        },
        actions: TierActions::critical_only("Contact admin for payment"),
    };

    // Missing documents dominate documents that are merely under review.
    let documentation = if snapshot.required_documents > 0 {
        MetricRow {
            section: "Documentation".to_string(),
            value: snapshot.required_documents as f64,
            thresholds: Thresholds::LowerIsBetter {
                good_max: 0.0,
                warning_max: 0.0,
            },
            messages: TierMessages {
                good: "All documents verified".to_string(),
                warning: format!("{} documents under review", snapshot.pending_documents),
                critical: format!("{} documents required", snapshot.required_documents),
            },
            actions: TierActions::critical_only("Submit missing documents"),
        }
    } else {
        MetricRow {
            section: "Documentation".to_string(),
            value: snapshot.pending_documents as f64,
            thresholds: Thresholds::LowerIsBetter {
                good_max: 0.0,
                warning_max: f64::MAX,
            },
            messages: TierMessages {
                good: "All documents verified".to_string(),
                warning: format!("{} documents under review", snapshot.pending_documents),
                critical: format!("{} documents required", snapshot.required_documents),
            },
            actions: TierActions::none(),
        }
    };

    let performance = MetricRow {
        section: "Performance Rating".to_string(),
        value: snapshot.rating,
        thresholds: Thresholds::HigherIsBetter {
            good_min: 4.5,
            warning_min: 3.5,
        },
        messages: TierMessages {
            good: format!("Excellent performance ({}/5)", snapshot.rating),
            warning: format!("Good performance ({}/5)", snapshot.rating),
            critical: format!("Performance needs improvement ({}/5)", snapshot.rating),
        },
        actions: TierActions::critical_only("Skill development recommended"),
    };

    let work = MetricRow {
        section: "Work Status".to_string(),
        value: if snapshot.on_site { 1.0 } else { 0.0 },
        thresholds: Thresholds::HigherIsBetter {
            good_min: 1.0,
            warning_min: 1.0,
        },
        messages: TierMessages {
            good: "Currently active on site".to_string(),
            warning: "Not assigned to an active site".to_string(),
            critical: "Not assigned to an active site".to_string(),
        },
        actions: TierActions::none(),
    };

    vec![payment, documentation, performance, work]
}
