//! Summary scalars: totals, daily average, velocity and budget utilization.

use serde::{Deserialize, Serialize};

use crate::config::InsightThresholds;
use crate::record::TransactionRecord;

/// Headline numbers for a window
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SummaryMetrics {
    /// Sum of expense magnitudes (always >= 0)
    pub total_spent: f64,
    /// Sum of income amounts (always >= 0)
    pub total_income: f64,
    pub average_daily_spending: f64,
    /// Percent change in spending between the two halves of the window
    pub spending_velocity: f64,
    /// Spending as a percent of the ideal budget (a share of income)
    pub budget_utilization: f64,
}

impl SummaryMetrics {
    /// `(income - spent) / income * 100`, 0 without income
    pub fn savings_rate(&self) -> f64 {
        if self.total_income > 0.0 {
            (self.total_income - self.total_spent) / self.total_income * 100.0
        } else {
            0.0
        }
    }
}

pub fn compute_basic_metrics(
    records: &[TransactionRecord],
    window_days: u32,
    thresholds: &InsightThresholds,
) -> SummaryMetrics {
    let expenses: Vec<&TransactionRecord> = records.iter().filter(|r| r.is_expense()).collect();

    let total_spent: f64 = expenses.iter().map(|r| r.abs_amount()).sum();
    let total_income: f64 = records
        .iter()
        .filter(|r| r.is_income())
        .map(|r| r.amount)
        .sum();

    let average_daily_spending = if window_days > 0 {
        total_spent / f64::from(window_days)
    } else {
        0.0
    };

    let ideal_spending = total_income * thresholds.ideal_spending_ratio;
    let budget_utilization = if ideal_spending > 0.0 {
        total_spent / ideal_spending * 100.0
    } else {
        0.0
    };

    SummaryMetrics {
        total_spent,
        total_income,
        average_daily_spending,
        spending_velocity: spending_velocity(&expenses),
        budget_utilization,
    }
}

/// Percent change between the summed magnitudes of the older and newer half
/// of `expenses`.
pub fn spending_velocity(expenses: &[&TransactionRecord]) -> f64 {
    let (first, second) = date_halves(expenses);
    if first.is_empty() || second.is_empty() {
        return 0.0;
    }

    let first_total: f64 = first.iter().map(|r| r.abs_amount()).sum();
    let second_total: f64 = second.iter().map(|r| r.abs_amount()).sum();

    if first_total > 0.0 {
        (second_total - first_total) / first_total * 100.0
    } else {
        0.0
    }
}

/// Order by date and cut at `len / 2`; with an odd count the extra record
/// lands in the second half.
pub(crate) fn date_halves<'a>(
    records: &[&'a TransactionRecord],
) -> (Vec<&'a TransactionRecord>, Vec<&'a TransactionRecord>) {
    let mut sorted = records.to_vec();
    sorted.sort_by_key(|r| r.date);
    let second = sorted.split_off(sorted.len() / 2);
    (sorted, second)
}
