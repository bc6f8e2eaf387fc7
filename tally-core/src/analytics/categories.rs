//! Expense breakdown by category.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::metrics::date_halves;
use crate::record::TransactionRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryInsight {
    pub category: String,
    /// Sum of expense magnitudes in the category
    pub total_spent: f64,
    pub transaction_count: usize,
    /// Share of all expenses, 0-100
    pub percentage: f64,
    /// Percent change of the average expense between window halves
    pub trend: f64,
}

/// Group expenses by category, largest total first.
pub fn analyze_category_insights(records: &[TransactionRecord]) -> Vec<CategoryInsight> {
    let expenses: Vec<&TransactionRecord> = records.iter().filter(|r| r.is_expense()).collect();
    let total_expenses: f64 = expenses.iter().map(|r| r.abs_amount()).sum();

    let mut groups: BTreeMap<&str, Vec<&TransactionRecord>> = BTreeMap::new();
    for &r in &expenses {
        groups.entry(r.category_label()).or_default().push(r);
    }

    let mut insights: Vec<CategoryInsight> = groups
        .into_iter()
        .map(|(category, items)| {
            let total: f64 = items.iter().map(|r| r.abs_amount()).sum();
            let percentage = if total_expenses > 0.0 {
                total / total_expenses * 100.0
            } else {
                0.0
            };
            CategoryInsight {
                category: category.to_string(),
                total_spent: total,
                transaction_count: items.len(),
                percentage,
                trend: category_trend(&items),
            }
        })
        .collect();

    // Stable: equal totals keep alphabetical order
    insights.sort_by(|a, b| b.total_spent.total_cmp(&a.total_spent));
    insights
}

/// Like spending velocity, but compares per-half averages instead of sums.
pub fn category_trend(items: &[&TransactionRecord]) -> f64 {
    let (first, second) = date_halves(items);
    if first.is_empty() || second.is_empty() {
        return 0.0;
    }

    let first_avg = first.iter().map(|r| r.abs_amount()).sum::<f64>() / first.len() as f64;
    let second_avg = second.iter().map(|r| r.abs_amount()).sum::<f64>() / second.len() as f64;

    if first_avg > 0.0 {
        (second_avg - first_avg) / first_avg * 100.0
    } else {
        0.0
    }
}
