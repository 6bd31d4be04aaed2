//! Supervisor team status table.

use crate::engine::{MetricRow, Thresholds, TierActions, TierMessages};
use serde::{Deserialize, Serialize};

/// Metrics snapshot for a supervisor's team dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSnapshot {
    pub workers_present: u32,
    pub workers_total: u32,
    /// Mean supervisor rating across the team, 0-5 scale.
    pub average_rating: f64,
}

impl TeamSnapshot {
    pub fn attendance_percent(&self) -> f64 {
        if self.workers_total > 0 {
            (self.workers_present as f64 / self.workers_total as f64) * 100.0
        } else {
            0.0
        }
    }
}

pub(crate) fn rows(snapshot: &TeamSnapshot) -> Vec<MetricRow> {
    let attendance_percent = snapshot.attendance_percent();
    let attendance = MetricRow {
        section: "Team Attendance".to_string(),
        value: attendance_percent,
        thresholds: Thresholds::HigherIsBetter {
            good_min: 90.0,
            warning_min: 75.0,
        },
        messages: TierMessages::uniform(format!("Attendance: {:.1}%", attendance_percent)),
        actions: TierActions::none(),
    };

    let performance = MetricRow {
        section: "Team Performance".to_string(),
        value: snapshot.average_rating,
        thresholds: Thresholds::HigherIsBetter {
            good_min: 4.5,
            warning_min: 3.5,
        },
        messages: TierMessages::uniform(format!(
            "Avg Rating: {:.1}/5",
            snapshot.average_rating
        )),
        actions: TierActions::none(),
    };

    vec![attendance, performance]
}
