//! tally-core: transaction records and the analytics engine that turns them
//! into trends, category breakdowns, monthly totals and insights.

pub mod analytics;
pub mod calendar;
pub mod charts;
pub mod config;
pub mod fmt;
pub mod record;
pub mod timeframe;

pub use analytics::{
    analyze, AnalyticsReport, CategoryInsight, FinancialInsight, InsightPriority, InsightTrend,
    InsightValue, MonthlyComparison, SpendingTrend, SummaryMetrics, TransactionKind,
};
pub use calendar::CalendarZone;
pub use config::{AnalyticsConfig, InsightThresholds};
pub use record::{TransactionRecord, UNCATEGORIZED};
pub use timeframe::{filter_window, Timeframe};
