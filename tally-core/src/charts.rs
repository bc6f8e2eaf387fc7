//! Chart-ready series derived from a report.

use serde::Serialize;

use crate::analytics::{AnalyticsReport, TransactionKind};
use crate::timeframe::Timeframe;

/// Number of slices in the category share chart
pub const CATEGORY_CHART_SLICES: usize = 8;
/// Number of bars in the top categories chart
pub const TOP_CATEGORY_BARS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledAmount {
    pub label: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub percentage: f64,
    /// Index into the presenter's colour palette, cycling by rank
    pub palette_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthBar {
    pub month: String,
    pub income: f64,
    pub expenses: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IncomeVsExpense {
    pub income: f64,
    pub expenses: f64,
    /// Never negative
    pub savings: f64,
}

/// Expense points only; weekday labels for 7D, "Aug 3" style otherwise.
pub fn daily_spending_series(report: &AnalyticsReport) -> Vec<LabeledAmount> {
    let pattern = match report.timeframe {
        Timeframe::SevenDays => "%a",
        _ => "%b %-d",
    };
    report
        .spending_trends
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense)
        .map(|t| LabeledAmount {
            label: t.date.format(pattern).to_string(),
            amount: t.amount,
        })
        .collect()
}

pub fn category_share_series(report: &AnalyticsReport, palette_len: usize) -> Vec<CategoryShare> {
    report
        .category_insights
        .iter()
        .take(CATEGORY_CHART_SLICES)
        .enumerate()
        .map(|(i, c)| CategoryShare {
            category: c.category.clone(),
            percentage: c.percentage,
            palette_index: if palette_len > 0 { i % palette_len } else { 0 },
        })
        .collect()
}

pub fn monthly_series(report: &AnalyticsReport) -> Vec<MonthBar> {
    report
        .monthly_comparisons
        .iter()
        .map(|m| MonthBar {
            month: m.month.clone(),
            income: m.income,
            expenses: m.expenses,
        })
        .collect()
}

pub fn income_vs_expense(report: &AnalyticsReport) -> IncomeVsExpense {
    let m = &report.metrics;
    IncomeVsExpense {
        income: m.total_income,
        expenses: m.total_spent,
        savings: (m.total_income - m.total_spent).max(0.0),
    }
}

pub fn top_categories(report: &AnalyticsReport) -> Vec<LabeledAmount> {
    report
        .category_insights
        .iter()
        .take(TOP_CATEGORY_BARS)
        .map(|c| LabeledAmount {
            label: c.category.clone(),
            amount: c.total_spent,
        })
        .collect()
}
