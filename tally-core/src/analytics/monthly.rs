//! Month-by-month income and expense totals.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::CalendarZone;
use crate::record::TransactionRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyComparison {
    /// "Aug 2025"
    pub month: String,
    pub income: f64,
    pub expenses: f64,
    pub net_flow: f64,
    /// Reserved for a month-over-month delta; currently always 0.0.
    pub previous_month_change: f64,
}

/// Totals per calendar month, ordered by the month label as a string.
///
/// The label ordering is lexicographic ("Apr 2025" < "Aug 2025" < "Jan 2026"),
/// not chronological.
pub fn generate_monthly_comparisons(
    records: &[TransactionRecord],
    zone: &CalendarZone,
) -> Vec<MonthlyComparison> {
    // month start -> (income, expenses)
    let mut months: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
    for r in records {
        let entry = months.entry(zone.month_of(r.date)).or_default();
        if r.is_income() {
            entry.0 += r.amount;
        } else if r.is_expense() {
            entry.1 += r.abs_amount();
        }
    }

    let mut comparisons: Vec<MonthlyComparison> = months
        .into_iter()
        .map(|(start, (income, expenses))| MonthlyComparison {
            month: CalendarZone::month_label(start),
            income,
            expenses,
            net_flow: income - expenses,
            previous_month_change: 0.0,
        })
        .collect();

    comparisons.sort_by(|a, b| a.month.cmp(&b.month));
    comparisons
}
