//! Client project status table.

use crate::engine::{MetricRow, Thresholds, TierActions, TierMessages};
use serde::{Deserialize, Serialize};

/// Metrics snapshot for the client's project dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientProjectSnapshot {
    pub progress_percent: f64,
    pub budget_planned: f64,
    pub budget_spent: f64,
    pub pending_approvals: u32,
    pub unresolved_issues: u32,
}

impl ClientProjectSnapshot {
    pub fn budget_utilization_percent(&self) -> f64 {
        if self.budget_planned > 0.0 {
            (self.budget_spent / self.budget_planned) * 100.0
        } else {
            0.0
        }
    }
}

pub(crate) fn rows(snapshot: &ClientProjectSnapshot) -> Vec<MetricRow> {
    let progress = MetricRow {
        section: "Project Progress".to_string(),
        value: snapshot.progress_percent,
        thresholds: Thresholds::HigherIsBetter {
            good_min: 90.0,
            warning_min: 60.0,
        },
        messages: TierMessages::uniform(format!(
            "Progress: {:.0}%",
            snapshot.progress_percent
        )),
        actions: TierActions::none(),
    };

    let budget = MetricRow {
        section: "Budget Status".to_string(),
        value: snapshot.budget_utilization_percent(),
        thresholds: Thresholds::LowerIsBetter {
            good_max: 80.0,
            warning_max: 95.0,
        },
        messages: TierMessages::uniform(format!(
            "Used: ₹{:.0} of ₹{:.0}",
            snapshot.budget_spent, snapshot.budget_planned
        )),
        actions: TierActions::none(),
    };

    let approvals = MetricRow {
        section: "Pending Approvals".to_string(),
        value: snapshot.pending_approvals as f64,
        thresholds: Thresholds::LowerIsBetter {
            good_max: 2.0,
            warning_max: 4.0,
        },
        messages: TierMessages::uniform(format!(
            "{} approvals pending",
            snapshot.pending_approvals
        )),
        actions: TierActions::none(),
    };

    let issues = MetricRow {
        section: "Unresolved Issues".to_string(),
        value: snapshot.unresolved_issues as f64,
        thresholds: Thresholds::LowerIsBetter {
            good_max: 0.0,
            warning_max: 1.0,
        },
        messages: TierMessages::uniform(format!(
            "{} unresolved issues",
            snapshot.unresolved_issues
        )),
        actions: TierActions::none(),
    };

    vec![progress, budget, approvals, issues]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{derive_status, Severity};

    fn healthy() -> ClientProjectSnapshot {
        ClientProjectSnapshot {
            progress_percent: 95.0,
            budget_planned: 500_000.0,
            budget_spent: 350_000.0,
            pending_approvals: 1,
            unresolved_issues: 0,
        }
    }

    #[test]
    fn healthy_project_is_all_good() {
        let report = derive_status(&rows(&healthy()));
        assert_eq!(report.overall, Severity::Good);
        assert_eq!(report.items[0].message, "Progress: 95%");
        assert_eq!(report.items[1].message, "Used: ₹350000 of ₹500000");
    }

    #[test]
    fn client_approval_cutoffs_are_looser_than_site_manager() {
        let tier = |count| {
            let mut s = healthy();
            s.pending_approvals = count;
            derive_status(&rows(&s)).items[2].status
        };
        assert_eq!(tier(2), Severity::Good);
        assert_eq!(tier(4), Severity::Warning);
        assert_eq!(tier(5), Severity::Critical);
    }

    #[test]
    fn one_unresolved_issue_is_a_warning() {
        let mut s = healthy();
        s.unresolved_issues = 1;
        let report = derive_status(&rows(&s));
        assert_eq!(report.items[3].status, Severity::Warning);
        assert_eq!(report.items[3].message, "1 unresolved issues");
        assert_eq!(report.overall, Severity::Warning);
    }
}
