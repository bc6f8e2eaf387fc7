//! Rule-based advisory messages.
//!
//! Each rule looks at the summary scalars (or the top category) on its own and
//! contributes at most one insight. Rules run in a fixed order and never
//! suppress each other:
//!
//! 1. spending acceleration
//! 2. budget utilization
//! 3. top spending category
//! 4. savings rate (excellent, or spending more than earning)
//! 5. transaction frequency

use serde::{Deserialize, Serialize};

use super::categories::CategoryInsight;
use super::metrics::SummaryMetrics;
use crate::config::InsightThresholds;
use crate::fmt::{money, percent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightTrend {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightPriority {
    High,
    Medium,
    Low,
}

/// The headline number of an insight, kept numeric for presenters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum InsightValue {
    Percent { value: f64, decimals: usize },
    Currency { amount: f64 },
    Count { count: usize, unit: CountUnit },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountUnit {
    Transactions,
}

impl InsightValue {
    /// Display string: "200.0%", "$1,234.56", "42 transactions"
    pub fn formatted(&self) -> String {
        match *self {
            InsightValue::Percent { value, decimals } => percent(value, decimals),
            InsightValue::Currency { amount } => money(amount),
            InsightValue::Count { count, unit } => match unit {
                CountUnit::Transactions => format!("{count} transactions"),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialInsight {
    pub title: String,
    pub description: String,
    pub value: InsightValue,
    pub trend: InsightTrend,
    pub priority: InsightPriority,
}

impl FinancialInsight {
    pub fn formatted_value(&self) -> String {
        self.value.formatted()
    }
}

/// Run the rule set over one window's numbers.
///
/// `category_insights` must already be sorted by total spent, largest first.
pub fn generate_financial_insights(
    metrics: &SummaryMetrics,
    category_insights: &[CategoryInsight],
    record_count: usize,
    window_days: u32,
    thresholds: &InsightThresholds,
) -> Vec<FinancialInsight> {
    let mut insights = Vec::new();

    let velocity = metrics.spending_velocity;
    if velocity > thresholds.velocity_alert {
        insights.push(FinancialInsight {
            title: "Spending Acceleration Alert".to_string(),
            description: format!(
                "Your spending has increased by {} in the recent period",
                percent(velocity, 1)
            ),
            value: InsightValue::Percent { value: velocity, decimals: 1 },
            trend: InsightTrend::Negative,
            priority: InsightPriority::High,
        });
    }

    let utilization = metrics.budget_utilization;
    if utilization > thresholds.budget_alert {
        insights.push(FinancialInsight {
            title: "Budget Alert".to_string(),
            description: format!(
                "You've used {} of your recommended spending budget",
                percent(utilization, 0)
            ),
            value: InsightValue::Percent { value: utilization, decimals: 0 },
            trend: InsightTrend::Negative,
            priority: if utilization > thresholds.budget_critical {
                InsightPriority::High
            } else {
                InsightPriority::Medium
            },
        });
    }

    if let Some(top) = category_insights.first() {
        insights.push(FinancialInsight {
            title: "Top Spending Category".to_string(),
            description: format!(
                "{} represents {} of your total expenses",
                top.category,
                percent(top.percentage, 1)
            ),
            value: InsightValue::Currency { amount: top.total_spent },
            trend: if top.trend > 0.0 {
                InsightTrend::Negative
            } else {
                InsightTrend::Positive
            },
            priority: InsightPriority::Medium,
        });
    }

    let savings_rate = metrics.savings_rate();
    if savings_rate > thresholds.savings_excellent {
        insights.push(FinancialInsight {
            title: "Excellent Savings Rate".to_string(),
            description: format!(
                "You're successfully saving {} of your income",
                percent(savings_rate, 1)
            ),
            value: InsightValue::Percent { value: savings_rate, decimals: 1 },
            trend: InsightTrend::Positive,
            priority: InsightPriority::Medium,
        });
    } else if savings_rate < thresholds.savings_deficit {
        let overspend = savings_rate.abs();
        insights.push(FinancialInsight {
            title: "Spending More Than Earning".to_string(),
            description: format!(
                "Your expenses exceed your income by {}",
                percent(overspend, 1)
            ),
            value: InsightValue::Percent { value: overspend, decimals: 1 },
            trend: InsightTrend::Negative,
            priority: InsightPriority::High,
        });
    }

    let per_day = if window_days > 0 {
        record_count as f64 / f64::from(window_days)
    } else {
        0.0
    };
    if per_day > thresholds.high_frequency_per_day {
        insights.push(FinancialInsight {
            title: "High Transaction Frequency".to_string(),
            description: format!("You're making {per_day:.1} transactions per day on average"),
            value: InsightValue::Count {
                count: record_count,
                unit: CountUnit::Transactions,
            },
            trend: InsightTrend::Neutral,
            priority: InsightPriority::Low,
        });
    }

    insights
}
