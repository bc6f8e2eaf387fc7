//! Tunable constants for the analytics engine.

use serde::{Deserialize, Serialize};

use crate::calendar::CalendarZone;

/// Thresholds behind each insight rule.
///
/// Every comparison is strict (`>` / `<`), so a value sitting exactly on a
/// threshold does not fire its rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightThresholds {
    /// Percent growth of spending between window halves that raises an alert
    pub velocity_alert: f64,
    /// Budget utilization percent that raises a budget alert
    pub budget_alert: f64,
    /// Budget utilization percent above which the alert becomes high priority
    pub budget_critical: f64,
    /// Savings rate percent considered excellent
    pub savings_excellent: f64,
    /// Savings rate percent below which spending exceeds earning
    pub savings_deficit: f64,
    /// Average transactions per day considered high frequency
    pub high_frequency_per_day: f64,
    /// Share of income treated as the ideal spending budget
    pub ideal_spending_ratio: f64,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            velocity_alert: 20.0,
            budget_alert: 80.0,
            budget_critical: 100.0,
            savings_excellent: 20.0,
            savings_deficit: 0.0,
            high_frequency_per_day: 5.0,
            ideal_spending_ratio: 0.7,
        }
    }
}

/// Everything the engine needs besides the records themselves
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Calendar used for day/month bucketing
    pub zone: CalendarZone,
    pub thresholds: InsightThresholds,
}

impl AnalyticsConfig {
    pub fn with_zone(mut self, zone: CalendarZone) -> Self {
        self.zone = zone;
        self
    }

    pub fn with_thresholds(mut self, thresholds: InsightThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }
}
