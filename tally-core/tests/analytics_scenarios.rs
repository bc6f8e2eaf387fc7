use chrono::{DateTime, Duration, TimeZone, Utc};
use tally_core::{
    analyze, filter_window, AnalyticsConfig, InsightPriority, InsightThresholds, Timeframe,
    TransactionKind, TransactionRecord,
};

const EPS: f64 = 1e-9;

fn day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 10, 15, 0, 0).unwrap() + Duration::days(n)
}

/// A month of mixed activity, deliberately out of date order.
fn mixed_month() -> Vec<TransactionRecord> {
    vec![
        TransactionRecord::new(2500.0, day(0)).with_category("salary").with_notes("Monthly Salary"),
        TransactionRecord::new(-89.99, day(3)).with_category("food").with_merchant("Whole Foods"),
        TransactionRecord::new(-4.5, day(1)).with_category("food").with_merchant("Starbucks"),
        TransactionRecord::new(-25.99, day(2)).with_category("transport"),
        TransactionRecord::new(-45.0, day(12)).with_category("bills"),
        TransactionRecord::new(-12.99, day(20)),
        TransactionRecord::new(100.0, day(18)).with_category("income"),
        TransactionRecord::new(-310.0, day(25)).with_category("food"),
    ]
}

#[test]
fn test_two_expenses_one_income_week() {
    let records = vec![
        TransactionRecord::new(-50.0, day(0)).with_category("food"),
        TransactionRecord::new(-150.0, day(1)).with_category("food"),
        TransactionRecord::new(1000.0, day(0)).with_category("salary"),
    ];

    let report = analyze(&records, Timeframe::SevenDays, &AnalyticsConfig::default());
    let m = report.metrics;
    assert!((m.total_spent - 200.0).abs() < EPS);
    assert!((m.total_income - 1000.0).abs() < EPS);
    assert!((m.average_daily_spending - 200.0 / 7.0).abs() < EPS);
    assert!((m.spending_velocity - 200.0).abs() < EPS);
    assert!((m.budget_utilization - 200.0 / 700.0 * 100.0).abs() < EPS);

    let rows: Vec<(TransactionKind, f64)> = report
        .spending_trends
        .iter()
        .map(|t| (t.kind, t.amount))
        .collect();
    assert_eq!(
        rows,
        vec![
            (TransactionKind::Expense, 50.0),
            (TransactionKind::Income, 1000.0),
            (TransactionKind::Expense, 150.0),
        ]
    );

    // The acceleration alert is the only high-priority insight; the
    // top-category and savings-rate rules also hold for this input.
    let high: Vec<&str> = report
        .financial_insights
        .iter()
        .filter(|i| i.priority == InsightPriority::High)
        .map(|i| i.title.as_str())
        .collect();
    assert_eq!(high, vec!["Spending Acceleration Alert"]);
    assert_eq!(report.financial_insights[0].formatted_value(), "200.0%");
    let titles: Vec<&str> = report.financial_insights.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Spending Acceleration Alert", "Top Spending Category", "Excellent Savings Rate"]
    );
}

#[test]
fn test_empty_input_all_zero() {
    for tf in Timeframe::ALL {
        let report = analyze(&[], tf, &AnalyticsConfig::default());
        assert_eq!(report.metrics.total_spent, 0.0);
        assert_eq!(report.metrics.total_income, 0.0);
        assert_eq!(report.metrics.average_daily_spending, 0.0);
        assert_eq!(report.metrics.spending_velocity, 0.0);
        assert_eq!(report.metrics.budget_utilization, 0.0);
        assert!(report.spending_trends.is_empty());
        assert!(report.category_insights.is_empty());
        assert!(report.monthly_comparisons.is_empty());
        assert!(report.financial_insights.is_empty());
    }
}

#[test]
fn test_expenses_without_income_trigger_no_savings_rules() {
    let records = vec![
        TransactionRecord::new(-200.0, day(0)),
        TransactionRecord::new(-300.0, day(0)),
    ];
    let report = analyze(&records, Timeframe::ThirtyDays, &AnalyticsConfig::default());
    assert_eq!(report.metrics.total_spent, 500.0);
    assert_eq!(report.metrics.budget_utilization, 0.0);
    assert!(report.financial_insights.iter().all(|i| {
        i.title != "Excellent Savings Rate" && i.title != "Spending More Than Earning"
    }));
}

#[test]
fn test_totals_reconcile_with_raw_sum() {
    let records = mixed_month();
    let report = analyze(&records, Timeframe::NinetyDays, &AnalyticsConfig::default());
    let raw: f64 = records.iter().map(|r| r.amount).sum();
    assert!(report.metrics.total_spent >= 0.0);
    assert!(report.metrics.total_income >= 0.0);
    assert!((report.metrics.total_income - report.metrics.total_spent - raw).abs() < 1e-6);
}

#[test]
fn test_category_percentages_sum_to_hundred() {
    let report = analyze(&mixed_month(), Timeframe::NinetyDays, &AnalyticsConfig::default());
    let total: f64 = report.category_insights.iter().map(|c| c.percentage).sum();
    assert!((total - 100.0).abs() < 1e-6);

    let income_only = vec![TransactionRecord::new(10.0, day(0))];
    let report = analyze(&income_only, Timeframe::NinetyDays, &AnalyticsConfig::default());
    let total: f64 = report.category_insights.iter().map(|c| c.percentage).sum();
    assert_eq!(total, 0.0);
}

#[test]
fn test_category_order_and_uncategorized() {
    let report = analyze(&mixed_month(), Timeframe::NinetyDays, &AnalyticsConfig::default());
    let names: Vec<&str> = report.category_insights.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(names, vec!["food", "bills", "transport", "Uncategorized"]);
    for w in report.category_insights.windows(2) {
        assert!(w[0].total_spent >= w[1].total_spent);
    }
}

#[test]
fn test_trends_never_emit_zero_rows() {
    let mut records = mixed_month();
    records.push(TransactionRecord::new(0.0, day(5)));
    let report = analyze(&records, Timeframe::NinetyDays, &AnalyticsConfig::default());
    assert!(report.spending_trends.iter().all(|t| t.amount > 0.0));
    for w in report.spending_trends.windows(2) {
        assert!(w[0].date <= w[1].date);
    }
}

#[test]
fn test_analysis_is_idempotent() {
    let records = mixed_month();
    let config = AnalyticsConfig::default();
    let a = analyze(&records, Timeframe::ThirtyDays, &config);
    let b = analyze(&records, Timeframe::ThirtyDays, &config);
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn test_window_then_analyze() {
    let records = mixed_month();
    let now = day(25);
    let window = filter_window(&records, Timeframe::SevenDays, now);
    // days 18, 20 and 25 fall inside the inclusive [now - 7d, now]
    assert_eq!(window.len(), 3);

    let report = analyze(&window, Timeframe::SevenDays, &AnalyticsConfig::default());
    assert_eq!(report.metrics.total_income, 100.0);
    assert!((report.metrics.total_spent - 322.99).abs() < 1e-6);
}

#[test]
fn test_custom_thresholds_change_rule_outcomes() {
    let records = vec![
        TransactionRecord::new(-100.0, day(0)),
        TransactionRecord::new(-115.0, day(1)),
    ];
    // velocity is 15%
    let default_report = analyze(&records, Timeframe::SevenDays, &AnalyticsConfig::default());
    assert!(default_report
        .financial_insights
        .iter()
        .all(|i| i.title != "Spending Acceleration Alert"));

    let strict = AnalyticsConfig::default().with_thresholds(InsightThresholds {
        velocity_alert: 10.0,
        ..InsightThresholds::default()
    });
    let strict_report = analyze(&records, Timeframe::SevenDays, &strict);
    assert_eq!(strict_report.financial_insights[0].title, "Spending Acceleration Alert");
}
