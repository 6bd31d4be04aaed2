//! Site manager project-oversight status table.

use crate::engine::{MetricRow, Thresholds, TierActions, TierMessages};
use serde::{Deserialize, Serialize};

/// Metrics snapshot for the site manager's project dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectOversightSnapshot {
    pub progress_percent: f64,
    pub budget_planned: f64,
    pub budget_spent: f64,
    pub pending_approvals: u32,
    pub unresolved_issues: u32,
}

impl ProjectOversightSnapshot {
    pub fn budget_utilization_percent(&self) -> f64 {
        if self.budget_planned > 0.0 {
            (self.budget_spent / self.budget_planned) * 100.0
        } else {
            0.0
        }
    }
}

pub(crate) fn rows(snapshot: &ProjectOversightSnapshot) -> Vec<MetricRow> {
    let progress = MetricRow {
        section: "Project Progress".to_string(),
        value: snapshot.progress_percent,
        thresholds: Thresholds::HigherIsBetter {
            good_min: 90.0,
            warning_min: 60.0,
        },
        messages: TierMessages {
            good: "Project is nearing completion".to_string(),
            warning: "Project progressing but monitor timeline".to_string(),
            critical: "Project behind schedule".to_string(),
        },
        actions: TierActions::critical_only("Review timeline and resources"),
    };

    let budget = MetricRow {
        section: "Budget Management".to_string(),
        value: snapshot.budget_utilization_percent(),
        thresholds: Thresholds::LowerIsBetter {
            good_max: 80.0,
            warning_max: 95.0,
        },
        messages: TierMessages {
            good: "Budget is well controlled".to_string(),
            warning: "Budget utilization high, monitor expenses".to_string(),
            critical: "Budget overrun detected".to_string(),
        },
        actions: TierActions::critical_only("Immediate cost review needed"),
    };

    let approvals = MetricRow {
        section: "Pending Approvals".to_string(),
        value: snapshot.pending_approvals as f64,
        thresholds: Thresholds::LowerIsBetter {
            good_max: 0.0,
            warning_max: 2.0,
        },
        messages: TierMessages {
            good: "No pending approvals".to_string(),
            warning: format!("{} approvals pending", snapshot.pending_approvals),
            critical: format!("{} approvals pending", snapshot.pending_approvals),
        },
        actions: TierActions::critical_only("Review and expedite approvals"),
    };

    let issues = MetricRow {
        section: "Issue Management".to_string(),
        value: snapshot.unresolved_issues as f64,
        thresholds: Thresholds::LowerIsBetter {
            good_max: 0.0,
            warning_max: 1.0,
        },
        messages: TierMessages {
            good: "All issues resolved".to_string(),
            warning: format!("{} issue in progress", snapshot.unresolved_issues),
            critical: format!("{} unresolved issues", snapshot.unresolved_issues),
        },
        actions: TierActions::critical_only("Follow up with contractors"),
    };

    vec![progress, budget, approvals, issues]
}
