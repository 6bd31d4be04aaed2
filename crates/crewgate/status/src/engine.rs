//! The deterministic status evaluator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity tier of one status item. Ordering is worst-last so the
/// aggregate is a plain `max`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Good,
    Warning,
    Critical,
}

impl Severity {
    /// Badge label shown next to the dashboard's overall status.
    pub fn badge(&self) -> &'static str {
        match self {
            Severity::Good => "All Good",
            Severity::Warning => "Needs Attention",
            Severity::Critical => "Urgent Action Required",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Good => write!(f, "good"),
            Severity::Warning => write!(f, "warning"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// One computed, severity-tagged message about a metric area. Ephemeral:
/// built per render, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusItem {
    pub section: String,
    pub status: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_required: Option<String>,
}

/// Two cutoffs classify a value into a tier. Direction is explicit so
/// "95% paid" and "2 unresolved issues" both read naturally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Thresholds {
    /// `value >= good_min` is good, `value >= warning_min` is warning,
    /// anything below is critical.
    HigherIsBetter { good_min: f64, warning_min: f64 },

    /// `value <= good_max` is good, `value <= warning_max` is warning,
    /// anything above is critical.
    LowerIsBetter { good_max: f64, warning_max: f64 },
}

impl Thresholds {
    pub fn classify(&self, value: f64) -> Severity {
        match *self {
            Thresholds::HigherIsBetter {
                good_min,
                warning_min,
            } => {
                if value >= good_min {
                    Severity::Good
                } else if value >= warning_min {
                    Severity::Warning
                } else {
                    Severity::Critical
                }
            }
            Thresholds::LowerIsBetter {
                good_max,
                warning_max,
            } => {
                if value <= good_max {
                    Severity::Good
                } else if value <= warning_max {
                    Severity::Warning
                } else {
                    Severity::Critical
                }
            }
        }
    }
}

/// Rendered message for each tier of one metric.
#[derive(Debug, Clone, PartialEq)]
pub struct TierMessages {
    pub good: String,
    pub warning: String,
    pub critical: String,
}

impl TierMessages {
    /// The same text for every tier (metrics whose message only reports
    /// the value).
    pub fn uniform(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            good: message.clone(),
            warning: message.clone(),
            critical: message,
        }
    }

    fn for_tier(&self, tier: Severity) -> &str {
        match tier {
            Severity::Good => &self.good,
            Severity::Warning => &self.warning,
            Severity::Critical => &self.critical,
        }
    }
}

/// Optional action text, only ever attached to non-good tiers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TierActions {
    pub warning: Option<String>,
    pub critical: Option<String>,
}

impl TierActions {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn critical_only(action: impl Into<String>) -> Self {
        Self {
            warning: None,
            critical: Some(action.into()),
        }
    }

    fn for_tier(&self, tier: Severity) -> Option<String> {
        match tier {
            Severity::Good => None,
            Severity::Warning => self.warning.clone(),
            Severity::Critical => self.critical.clone(),
        }
    }
}

/// One row of a domain's metric table.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    pub section: String,
    pub value: f64,
    pub thresholds: Thresholds,
    pub messages: TierMessages,
    pub actions: TierActions,
}

/// Per-tier item counts for the report summary strip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierCounts {
    pub good: usize,
    pub warning: usize,
    pub critical: usize,
}

/// The derived status list plus its worst-wins aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    pub items: Vec<StatusItem>,
    pub overall: Severity,
}

impl StatusReport {
    pub fn badge(&self) -> &'static str {
        self.overall.badge()
    }

    pub fn counts(&self) -> TierCounts {
        let mut counts = TierCounts::default();
        for item in &self.items {
            match item.status {
                Severity::Good => counts.good += 1,
                Severity::Warning => counts.warning += 1,
                Severity::Critical => counts.critical += 1,
            }
        }
        counts
    }
}

/// Evaluate a metric table. Items come out in table order; the aggregate
/// is the worst tier across all items (good for an empty table). Same
/// snapshot in, same report out.
pub fn derive_status(rows: &[MetricRow]) -> StatusReport {
    let mut overall = Severity::Good;
    let items = rows
        .iter()
        .map(|row| {
            let tier = row.thresholds.classify(row.value);
            overall = overall.max(tier);
            StatusItem {
                section: row.section.clone(),
                status: tier,
                message: row.messages.for_tier(tier).to_string(),
                action_required: row.actions.for_tier(tier),
            }
        })
        .collect();

    StatusReport { items, overall }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(section: &str, value: f64, thresholds: Thresholds) -> MetricRow {
        MetricRow {
            section: section.to_string(),
            value,
            thresholds,
            messages: TierMessages {
                good: "fine".to_string(),
                warning: "watch".to_string(),
                critical: "bad".to_string(),
            },
            actions: TierActions::critical_only("act now"),
        }
    }

    #[test]
    fn higher_is_better_boundaries() {
        let thresholds = Thresholds::HigherIsBetter {
            good_min: 90.0,
            warning_min: 70.0,
        };
        assert_eq!(thresholds.classify(95.0), Severity::Good);
        assert_eq!(thresholds.classify(90.0), Severity::Good);
        assert_eq!(thresholds.classify(75.0), Severity::Warning);
        assert_eq!(thresholds.classify(70.0), Severity::Warning);
        assert_eq!(thresholds.classify(50.0), Severity::Critical);
    }

    #[test]
    fn lower_is_better_count_cutoffs() {
        let thresholds = Thresholds::LowerIsBetter {
            good_max: 0.0,
            warning_max: 1.0,
        };
        assert_eq!(thresholds.classify(0.0), Severity::Good);
        assert_eq!(thresholds.classify(1.0), Severity::Warning);
        assert_eq!(thresholds.classify(2.0), Severity::Critical);
    }

    #[test]
    fn all_good_snapshot_aggregates_to_good() {
        let rows = vec![
            row(
                "A",
                95.0,
                Thresholds::HigherIsBetter {
                    good_min: 90.0,
                    warning_min: 70.0,
                },
            ),
            row(
                "B",
                0.0,
                Thresholds::LowerIsBetter {
                    good_max: 0.0,
                    warning_max: 1.0,
                },
            ),
        ];
        let report = derive_status(&rows);
        assert_eq!(report.overall, Severity::Good);
        assert_eq!(report.badge(), "All Good");
        assert_eq!(report.counts().good, 2);
    }

    #[test]
    fn single_critical_wins_the_aggregate() {
        let rows = vec![
            row(
                "A",
                95.0,
                Thresholds::HigherIsBetter {
                    good_min: 90.0,
                    warning_min: 70.0,
                },
            ),
            row(
                "B",
                50.0,
                Thresholds::HigherIsBetter {
                    good_min: 90.0,
                    warning_min: 70.0,
                },
            ),
            row(
                "C",
                95.0,
                Thresholds::HigherIsBetter {
                    good_min: 90.0,
                    warning_min: 70.0,
                },
            ),
        ];
        let report = derive_status(&rows);
        assert_eq!(report.overall, Severity::Critical);
        assert_eq!(report.badge(), "Urgent Action Required");
    }

    #[test]
    fn action_text_only_surfaces_on_matching_tier() {
        let good = derive_status(&[row(
            "A",
            95.0,
            Thresholds::HigherIsBetter {
                good_min: 90.0,
                warning_min: 70.0,
            },
        )]);
        assert!(good.items[0].action_required.is_none());

        let critical = derive_status(&[row(
            "A",
            10.0,
            Thresholds::HigherIsBetter {
                good_min: 90.0,
                warning_min: 70.0,
            },
        )]);
        assert_eq!(critical.items[0].action_required.as_deref(), Some("act now"));
    }

    #[test]
    fn items_keep_table_order_and_derivation_is_deterministic() {
        let rows = vec![
            row(
                "First",
                50.0,
                Thresholds::HigherIsBetter {
                    good_min: 90.0,
                    warning_min: 70.0,
                },
            ),
            row(
                "Second",
                95.0,
                Thresholds::HigherIsBetter {
                    good_min: 90.0,
                    warning_min: 70.0,
                },
            ),
        ];
        let first = derive_status(&rows);
        let second = derive_status(&rows);
        assert_eq!(first, second);
        assert_eq!(first.items[0].section, "First");
        assert_eq!(first.items[1].section, "Second");
    }

    #[test]
    fn empty_table_is_good() {
        let report = derive_status(&[]);
        assert_eq!(report.overall, Severity::Good);
        assert!(report.items.is_empty());
    }
}
