//! Aggregation engine: one pass from a window of records to a full report.
//!
//! Everything here is a pure function of its inputs. The caller is expected
//! to have already narrowed the records to the timeframe (see
//! [`crate::timeframe::filter_window`]); a failed fetch upstream should arrive
//! here as an empty slice.

pub mod categories;
pub mod insights;
pub mod metrics;
pub mod monthly;
pub mod trends;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AnalyticsConfig;
use crate::record::TransactionRecord;
use crate::timeframe::Timeframe;

pub use categories::{analyze_category_insights, category_trend, CategoryInsight};
pub use insights::{
    generate_financial_insights, CountUnit, FinancialInsight, InsightPriority, InsightTrend,
    InsightValue,
};
pub use metrics::{compute_basic_metrics, spending_velocity, SummaryMetrics};
pub use monthly::{generate_monthly_comparisons, MonthlyComparison};
pub use trends::{generate_spending_trends, SpendingTrend, TransactionKind};

/// Immutable result of one aggregation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub timeframe: Timeframe,
    pub metrics: SummaryMetrics,
    pub spending_trends: Vec<SpendingTrend>,
    pub category_insights: Vec<CategoryInsight>,
    pub monthly_comparisons: Vec<MonthlyComparison>,
    pub financial_insights: Vec<FinancialInsight>,
}

impl AnalyticsReport {
    pub fn is_empty(&self) -> bool {
        self.spending_trends.is_empty()
            && self.category_insights.is_empty()
            && self.monthly_comparisons.is_empty()
    }
}

/// Build every derived collection for `records` over `timeframe`.
pub fn analyze(
    records: &[TransactionRecord],
    timeframe: Timeframe,
    config: &AnalyticsConfig,
) -> AnalyticsReport {
    let window_days = timeframe.days();
    let thresholds = &config.thresholds;

    let metrics = compute_basic_metrics(records, window_days, thresholds);
    let spending_trends = generate_spending_trends(records, &config.zone);
    let category_insights = analyze_category_insights(records);
    let monthly_comparisons = generate_monthly_comparisons(records, &config.zone);
    let financial_insights = generate_financial_insights(
        &metrics,
        &category_insights,
        records.len(),
        window_days,
        thresholds,
    );

    debug!(
        timeframe = %timeframe,
        records = records.len(),
        total_spent = metrics.total_spent,
        total_income = metrics.total_income,
        insights = financial_insights.len(),
        "analytics refreshed"
    );

    AnalyticsReport {
        timeframe,
        metrics,
        spending_trends,
        category_insights,
        monthly_comparisons,
        financial_insights,
    }
}
